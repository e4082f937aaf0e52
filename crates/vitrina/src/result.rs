//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur while driving a scenario.
///
/// Every variant is scenario-fatal: the failing step terminates the current
/// scenario and the run continues with the next one. There is no retry policy
/// and no distinction between environment flakes and genuine regressions.
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Locator never resolved within its timeout
    #[error("Element not found: {selector} (waited {timeout_ms}ms)")]
    ElementNotFound {
        /// Selector that never matched
        selector: String,
        /// How long the lookup polled before giving up
        timeout_ms: u64,
    },

    /// Displayed text was not convertible to the expected numeric type
    #[error("Failed to parse {text:?} as a number")]
    Parse {
        /// Text as read from the page
        text: String,
    },

    /// Caller supplied a value outside the accepted enumerated set
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the value
        message: String,
    },

    /// Step-level expected-vs-actual mismatch
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Human-readable expected-vs-actual message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// A scenario line matched no registered step pattern
    #[error("No step definition matches: {sentence:?}")]
    UndefinedStep {
        /// The unmatched sentence
        sentence: String,
    },
}

impl VitrinaError {
    /// Build an assertion failure from an expected/actual pair.
    pub fn assertion(expected: impl std::fmt::Display, actual: impl std::fmt::Display) -> Self {
        Self::AssertionFailed {
            message: format!("expected {expected}, got {actual}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_display() {
        let err = VitrinaError::ElementNotFound {
            selector: ".checkout-btn".to_string(),
            timeout_ms: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains(".checkout-btn"));
        assert!(msg.contains("10000ms"));
    }

    #[test]
    fn test_parse_display() {
        let err = VitrinaError::Parse {
            text: "free".to_string(),
        };
        assert!(err.to_string().contains("free"));
    }

    #[test]
    fn test_assertion_helper() {
        let err = VitrinaError::assertion("'Your cart'", "'Checkout'");
        assert!(err.to_string().contains("expected 'Your cart'"));
        assert!(err.to_string().contains("got 'Checkout'"));
    }

    #[test]
    fn test_undefined_step_display() {
        let err = VitrinaError::UndefinedStep {
            sentence: "user does something unknown".to_string(),
        };
        assert!(err.to_string().contains("user does something unknown"));
    }
}
