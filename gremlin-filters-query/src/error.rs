//! Error types for filter rendering and predicate extraction.
//!
//! Every failure in this crate is terminal for the call that produced it:
//! no partial fragment is ever returned alongside an error.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: G{category}{number}
//! - 1xxx: Rendering errors (unsupported values, unknown comparison mode)
//! - 2xxx: Predicate errors (unsupported expression shapes, enum coercion)
//! - 7xxx: Configuration errors
//!
//! ```rust
//! use gremlin_filters_query::{ErrorCode, QueryError};
//!
//! let err = QueryError::unsupported_comparison_mode("culture");
//! assert_eq!(err.code, ErrorCode::UnsupportedComparisonMode);
//! assert_eq!(err.code.code(), "G1001");
//! assert!(err.to_string().contains("culture"));
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for filter operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Rendering errors (1xxx)
    /// Comparison mode has no rendering dialect (G1001).
    UnsupportedComparisonMode = 1001,
    /// One or more filter values have no rendering template (G1002).
    UnsupportedFilterTypes = 1002,
    /// The same property was filtered twice (G1003).
    DuplicateFilter = 1003,

    // Predicate errors (2xxx)
    /// Predicate is not a top-level equality comparison (G2001).
    UnsupportedExpressionShape = 2001,
    /// Left side is not a (possibly converted) property access (G2002).
    UnsupportedLeftHandSide = 2002,
    /// Right side cannot be folded to a constant (G2003).
    UnsupportedRightHandSide = 2003,
    /// Value has no matching member in the declared enumeration (G2004).
    UnknownEnumValue = 2004,

    // Configuration errors (7xxx)
    /// Invalid configuration (G7001).
    InvalidConfiguration = 7001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "G1002").
    pub fn code(&self) -> String {
        format!("G{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedComparisonMode => "Unsupported comparison mode",
            Self::UnsupportedFilterTypes => "Unsupported filter value types",
            Self::DuplicateFilter => "Duplicate property filter",
            Self::UnsupportedExpressionShape => "Unsupported predicate shape",
            Self::UnsupportedLeftHandSide => "Unsupported left-hand side",
            Self::UnsupportedRightHandSide => "Unsupported right-hand side",
            Self::UnknownEnumValue => "Unknown enumeration value",
            Self::InvalidConfiguration => "Invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Suggestion for fixing an error.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The suggestion text.
    pub text: String,
    /// Optional code example.
    pub code: Option<String>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
        }
    }

    /// Add a code example.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The node type the predicate was written against.
    pub node: Option<String>,
    /// The property involved.
    pub property: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<Suggestion>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while extracting or rendering filters.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(suggestion));
        self
    }

    /// Add a code suggestion.
    pub fn with_code_suggestion(mut self, text: impl Into<String>, code: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(text).with_code(code));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the node type.
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.context.node = Some(node.into());
        self
    }

    /// Set the property.
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.context.property = Some(property.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create an unsupported comparison mode error.
    pub fn unsupported_comparison_mode(mode: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::UnsupportedComparisonMode,
            format!("Comparison mode {} is not supported.", mode),
        )
        .with_suggestion("Use \"exact\" for ordinal matching")
        .with_suggestion("Use \"case-insensitive\" to ignore the case of text values")
    }

    /// Create an unsupported filter types error listing every offender.
    ///
    /// Each offender is a `(property_name, full_type_name)` pair.
    pub fn unsupported_filter_types<'a>(
        offenders: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let listed: Vec<String> = offenders
            .into_iter()
            .map(|(property, type_name)| format!("{} of type {}", property, type_name))
            .collect();
        Self::new(
            ErrorCode::UnsupportedFilterTypes,
            format!(
                "One or more of the supplied filters is of an unsupported type. Unsupported filters were: {}",
                listed.join(", ")
            ),
        )
        .with_help("Only text, 32-bit integer, 64-bit integer, enum and null values can be rendered")
    }

    /// Create a duplicate filter error.
    pub fn duplicate_filter(property: impl Into<String>) -> Self {
        let property = property.into();
        Self::new(
            ErrorCode::DuplicateFilter,
            format!("A filter for property {} has already been added", property),
        )
        .with_property(&property)
    }

    /// Create an unsupported expression shape error.
    pub fn unsupported_expression_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedExpressionShape, message)
            .with_code_suggestion(
                "Compare a single property for equality",
                "Property::<Person, i32>::new(\"Age\").eq(30)",
            )
    }

    /// Create an unsupported left-hand side error.
    pub fn unsupported_left_hand_side() -> Self {
        Self::new(
            ErrorCode::UnsupportedLeftHandSide,
            "Only property accessors are supported for the left-hand side of the expression at this time.",
        )
    }

    /// Create an unsupported right-hand side error.
    pub fn unsupported_right_hand_side(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::UnsupportedRightHandSide,
            format!("The right-hand side of the expression cannot be evaluated: {}", message),
        )
        .with_suggestion("Compute the value before building the predicate")
    }

    /// Create an unknown enumeration value error.
    pub fn unknown_enum_value(enum_name: impl Into<String>, value: impl fmt::Display) -> Self {
        let enum_name = enum_name.into();
        Self::new(
            ErrorCode::UnknownEnumValue,
            format!("Value {} is not a member of enumeration {}", value, enum_name),
        )
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::InvalidConfiguration,
            format!("Invalid configuration: {}", message),
        )
    }

    // ============== Error Checks ==============

    /// Check if this error was raised by the renderer for a value type.
    pub fn is_unsupported_type(&self) -> bool {
        self.code == ErrorCode::UnsupportedFilterTypes
    }

    /// Check if this error was raised while reading a predicate.
    pub fn is_predicate_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::UnsupportedExpressionShape
                | ErrorCode::UnsupportedLeftHandSide
                | ErrorCode::UnsupportedRightHandSide
                | ErrorCode::UnknownEnumValue
        )
    }

    /// Check if this error stems from configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidConfiguration | ErrorCode::UnsupportedComparisonMode
        )
    }

    // ============== Display Functions ==============

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref node) = self.context.node {
            output.push_str(&format!("  → Node: {}\n", node));
        }
        if let Some(ref property) = self.context.property {
            output.push_str(&format!("  → Property: {}\n", property));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion.text));
                if let Some(ref code) = suggestion.code {
                    output.push_str(&format!("     ```\n     {}\n     ```\n", code.replace('\n', "\n     ")));
                }
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

/// Helper for creating errors with context.
#[macro_export]
macro_rules! query_error {
    ($code:expr, $msg:expr) => {
        $crate::error::QueryError::new($code, $msg)
    };
    ($code:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {{
        let mut err = $crate::error::QueryError::new($code, $msg);
        $(
            err = err.$key($value);
        )+
        err
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::UnsupportedComparisonMode.code(), "G1001");
        assert_eq!(ErrorCode::UnsupportedExpressionShape.code(), "G2001");
        assert_eq!(ErrorCode::InvalidConfiguration.code(), "G7001");
    }

    #[test]
    fn test_unsupported_filter_types_lists_all_offenders() {
        let err = QueryError::unsupported_filter_types([("score", "f64"), ("active", "bool")]);
        assert!(err.is_unsupported_type());
        assert!(err.message.ends_with(
            "Unsupported filters were: score of type f64, active of type bool"
        ));
    }

    #[test]
    fn test_predicate_errors() {
        assert!(QueryError::unsupported_left_hand_side().is_predicate_error());
        assert!(QueryError::unsupported_expression_shape("nope").is_predicate_error());
        assert!(QueryError::unknown_enum_value("Status", 7).is_predicate_error());
        assert!(!QueryError::duplicate_filter("Age").is_predicate_error());
    }

    #[test]
    fn test_configuration_errors() {
        assert!(QueryError::configuration("bad toml").is_configuration_error());
        assert!(QueryError::unsupported_comparison_mode("culture").is_configuration_error());
    }

    #[test]
    fn test_every_code_has_a_category() {
        let codes = [
            ErrorCode::UnsupportedComparisonMode,
            ErrorCode::UnsupportedFilterTypes,
            ErrorCode::DuplicateFilter,
            ErrorCode::UnsupportedExpressionShape,
            ErrorCode::UnsupportedLeftHandSide,
            ErrorCode::UnsupportedRightHandSide,
            ErrorCode::UnknownEnumValue,
            ErrorCode::InvalidConfiguration,
        ];

        for code in codes {
            let n = code as u16;
            assert!(matches!(n / 1000, 1 | 2 | 7), "{} has no category", code);
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn test_display_prefixes_code() {
        let err = QueryError::unsupported_left_hand_side();
        assert!(err.to_string().starts_with("[G2002] "));
    }

    #[test]
    fn test_display_full() {
        let err = QueryError::duplicate_filter("Name").with_context("Translating predicate");

        let output = err.display_full();
        assert!(output.contains("G1003"));
        assert!(output.contains("→ While: Translating predicate"));
        assert!(output.contains("→ Property: Name"));
    }

    #[test]
    fn test_error_macro() {
        let err = query_error!(
            ErrorCode::UnsupportedRightHandSide,
            "right side reads the parameter",
            with_property = "Age",
            with_suggestion = "Use a literal"
        );

        assert_eq!(err.code, ErrorCode::UnsupportedRightHandSide);
        assert_eq!(err.context.property, Some("Age".to_string()));
        assert_eq!(err.context.suggestions.len(), 1);
    }

    #[test]
    fn test_suggestion_with_code() {
        let err = QueryError::unsupported_expression_shape("Only equality expressions are supported at this time.");

        let suggestion = err.context.suggestions.last().unwrap();
        assert!(suggestion.code.is_some());
    }
}
