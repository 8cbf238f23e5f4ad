//! RDAP domain lookup payload.

use crate::model::DomainRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RdapResponse {
    #[serde(default)]
    pub events: Vec<RdapEvent>,
    #[serde(default)]
    pub entities: Vec<RdapEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdapEvent {
    #[serde(default)]
    pub event_action: String,
    #[serde(default)]
    pub event_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdapEntity {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// jCard: `["vcard", [[name, params, type, value], ...]]`
    #[serde(default)]
    pub vcard_array: Option<serde_json::Value>,
}

impl RdapEntity {
    fn is_registrar(&self) -> bool {
        self.roles.iter().any(|role| role.eq_ignore_ascii_case("registrar"))
    }

    /// Formatted name from the jCard, if any.
    fn formatted_name(&self) -> Option<String> {
        let properties = self.vcard_array.as_ref()?.get(1)?.as_array()?;
        properties.iter().find_map(|property| {
            let property = property.as_array()?;
            if property.first()?.as_str()? != "fn" {
                return None;
            }
            let name = property.get(3)?.as_str()?.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
    }
}

/// Map an RDAP response to a domain record.
///
/// The age is measured against `as_of`, never the wall clock. Event dates
/// that are not RFC 3339 are ignored.
#[must_use]
pub fn map_rdap(response: &RdapResponse, as_of: DateTime<Utc>) -> DomainRecord {
    let created_at = event_date(response, "registration");
    let expires_at = event_date(response, "expiration");
    let registrar = response
        .entities
        .iter()
        .find(|entity| entity.is_registrar())
        .and_then(|entity| entity.formatted_name().or_else(|| entity.handle.clone()));

    DomainRecord {
        registrar,
        created_at,
        expires_at,
        age_years: created_at.map(|created| age_in_years(created, as_of)),
    }
}

fn event_date(response: &RdapResponse, action: &str) -> Option<DateTime<Utc>> {
    let event = response
        .events
        .iter()
        .find(|event| event.event_action.eq_ignore_ascii_case(action))?;
    match DateTime::parse_from_rfc3339(event.event_date.trim()) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(action, date = %event.event_date, "ignoring RDAP event date: {e}");
            None
        }
    }
}

/// Fractional years between two instants; 0 if `created` is in the future.
#[must_use]
pub fn age_in_years(created: DateTime<Utc>, as_of: DateTime<Utc>) -> f64 {
    let seconds = (as_of - created).num_seconds().max(0) as f64;
    seconds / SECONDS_PER_DAY / DAYS_PER_YEAR
}
