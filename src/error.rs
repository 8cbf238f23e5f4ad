//! Unified error types for beepulse.
//!
//! Only bundle parsing and provider payload mapping produce these errors.
//! The scoring core is total and never fails.

use thiserror::Error;

/// Main error type for beepulse operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BeePulseError {
    /// Errors while reading a measurement bundle or provider payload
    #[error("Failed to parse input: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while mapping a raw provider payload into bundle parts
    #[error("Provider payload rejected: {context}")]
    Provider {
        context: String,
        #[source]
        source: ProviderErrorKind,
    },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },
}

/// Specific provider error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderErrorKind {
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Analysis not finished: {0}")]
    AnalysisIncomplete(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for beepulse operations
pub type Result<T> = std::result::Result<T, BeePulseError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BeePulseError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a provider error with context
    pub fn provider(context: impl Into<String>, source: ProviderErrorKind) -> Self {
        Self::Provider {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<serde_json::Error> for BeePulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, so an error raised while reading
/// the TLS payload of a bundle reads `"assembling bundle: ssl labs: ..."`.
///
/// ```ignore
/// use beepulse::error::ErrorContext;
///
/// let response: SslLabsResponse = serde_json::from_str(&raw)
///     .context("reading SSL Labs payload")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on the error path.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BeePulseError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: BeePulseError, new_ctx: &str) -> BeePulseError {
    match err {
        BeePulseError::Parse {
            context: existing,
            source,
        } => BeePulseError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BeePulseError::Provider {
            context: existing,
            source,
        } => BeePulseError::Provider {
            context: chain_context(new_ctx, &existing),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BeePulseError::missing_field("lighthouseResult", "page speed payload");
        let display = err.to_string();
        assert!(
            display.contains("parse") || display.contains("input"),
            "Error message should mention parsing: {display}"
        );

        let err = BeePulseError::provider(
            "ssl labs",
            ProviderErrorKind::AnalysisIncomplete("IN_PROGRESS".to_string()),
        );
        assert!(err.to_string().contains("ssl labs"));
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let result: Result<()> = Err(BeePulseError::missing_field(
            "lighthouseResult.categories",
            "PageSpeed response",
        ));
        match result.context("page speed") {
            Err(BeePulseError::Parse { context, source }) => {
                assert_eq!(context, "page speed: missing required field");
                assert!(source.to_string().contains("lighthouseResult.categories"));
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(BeePulseError::provider(
                "base",
                ProviderErrorKind::InvalidResponse("no categories".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("page speed")
        }

        fn outer() -> Result<()> {
            middle().context("assembling bundle")
        }

        match outer() {
            Err(BeePulseError::Provider { context, .. }) => {
                assert_eq!(context, "assembling bundle: page speed: base");
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_error_converts_to_parse() {
        let result: Result<serde_json::Value> =
            serde_json::from_str::<serde_json::Value>("{not json").context("bundle.json");
        match result {
            Err(BeePulseError::Parse { context, source }) => {
                assert!(context.starts_with("bundle.json"));
                assert!(matches!(source, ParseErrorKind::InvalidJson(_)));
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(BeePulseError::provider(
            "dns",
            ProviderErrorKind::InvalidResponse("error".to_string()),
        ));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
