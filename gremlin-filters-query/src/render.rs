//! Rendering filter collections into Gremlin query fragments.
//!
//! ```rust
//! use gremlin_filters_query::{ComparisonMode, Filter, format_gremlin_filter};
//!
//! let filters = [Filter::new("age", 30), Filter::new("name", "Bob")];
//!
//! let exact = format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap();
//! assert_eq!(exact, "[['age':30],['name':'Bob']]");
//!
//! let relaxed = format_gremlin_filter(&filters, ComparisonMode::CaseInsensitive).unwrap();
//! assert_eq!(relaxed, "{ it.'age' == 30 && it.'name'.equalsIgnoreCase('Bob') }");
//! ```

use tracing::{debug, info, trace, warn};

use crate::dialect::{ComparisonMode, Dialect};
use crate::error::{QueryError, QueryResult};
use crate::filter::{Filter, FilterSet};

/// Render filters with the given comparison mode and default options.
pub fn format_gremlin_filter(filters: &[Filter], mode: ComparisonMode) -> QueryResult<String> {
    FilterFormatter::new(mode).format(filters)
}

/// Reusable renderer for one comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterFormatter {
    mode: ComparisonMode,
    escape_strings: bool,
    log_fragments: bool,
}

impl Default for FilterFormatter {
    fn default() -> Self {
        Self::new(ComparisonMode::default())
    }
}

impl FilterFormatter {
    /// Create a formatter that escapes quotes in names and text values.
    pub fn new(mode: ComparisonMode) -> Self {
        Self {
            mode,
            escape_strings: true,
            log_fragments: false,
        }
    }

    /// Create a formatter from a mode name such as `"exact"`.
    pub fn from_mode_name(mode: &str) -> QueryResult<Self> {
        Ok(Self::new(mode.parse()?))
    }

    /// Enable or disable literal escaping.
    pub fn escape_strings(mut self, escape: bool) -> Self {
        self.escape_strings = escape;
        self
    }

    /// Log every rendered fragment at info level.
    pub fn log_fragments(mut self, enabled: bool) -> Self {
        self.log_fragments = enabled;
        self
    }

    /// Get the comparison mode.
    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    /// Get the dialect used by this formatter.
    pub fn dialect(&self) -> &'static Dialect {
        Dialect::for_mode(self.mode)
    }

    /// Render filters into a fragment.
    ///
    /// Empty input renders as the empty string. Filters keep their input order.
    /// If any value cannot be rendered, every offender is named in one error.
    pub fn format(&self, filters: &[Filter]) -> QueryResult<String> {
        debug!(mode = %self.mode, count = filters.len(), "Formatting Gremlin filters");

        let normalized: Vec<Filter> = filters.iter().map(Filter::normalized).collect();
        let dialect = self.dialect();

        let mut formatted = Vec::with_capacity(normalized.len());
        let mut unsupported = Vec::new();
        for filter in &normalized {
            match dialect.format_filter(&filter.property_name, &filter.value, self.escape_strings) {
                Some(text) => {
                    trace!(property = %filter.property_name, fragment = %text, "Formatted filter");
                    formatted.push(text);
                }
                None => unsupported.push((filter.property_name.as_str(), filter.value.type_name())),
            }
        }

        if !unsupported.is_empty() {
            warn!(count = unsupported.len(), "Filters with unsupported value types");
            return Err(QueryError::unsupported_filter_types(unsupported)
                .with_context(format!("Formatting {} filters", self.mode)));
        }

        let joined = formatted.join(dialect.separator);
        let fragment = if joined.trim().is_empty() {
            String::new()
        } else {
            dialect.wrap(&joined)
        };

        if self.log_fragments {
            info!(mode = %self.mode, fragment = %fragment, "Rendered Gremlin filter");
        }
        Ok(fragment)
    }

    /// Render a filter set in insertion order.
    pub fn format_set(&self, filters: &FilterSet) -> QueryResult<String> {
        self.format(&filters.to_filters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{EnumValue, FilterValue};
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_filters() {
        assert_eq!(format_gremlin_filter(&[], ComparisonMode::Exact).unwrap(), "");
        assert_eq!(format_gremlin_filter(&[], ComparisonMode::CaseInsensitive).unwrap(), "");
    }

    #[test]
    fn test_single_int_filter() {
        let filters = [Filter::new("age", 30)];
        assert_eq!(format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap(), "[['age':30]]");
        assert_eq!(
            format_gremlin_filter(&filters, ComparisonMode::CaseInsensitive).unwrap(),
            "{ it.'age' == 30 }"
        );
    }

    #[test]
    fn test_long_filter() {
        let filters = [Filter::new("id", 9_000_000_000i64)];
        assert_eq!(
            format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap(),
            "[['id':9000000000]]"
        );
    }

    #[test]
    fn test_null_filter() {
        let filters = [Filter::null("email")];
        assert_eq!(format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap(), "[['email':null]]");
        assert_eq!(
            format_gremlin_filter(&filters, ComparisonMode::CaseInsensitive).unwrap(),
            "{ it.'email' == null }"
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let forward = [Filter::new("age", 30), Filter::new("name", "Bob")];
        let backward = [Filter::new("name", "Bob"), Filter::new("age", 30)];

        assert_eq!(
            format_gremlin_filter(&forward, ComparisonMode::Exact).unwrap(),
            "[['age':30],['name':'Bob']]"
        );
        assert_eq!(
            format_gremlin_filter(&backward, ComparisonMode::Exact).unwrap(),
            "[['name':'Bob'],['age':30]]"
        );
    }

    #[test]
    fn test_enum_renders_as_name() {
        let filters = [Filter::new("Status", EnumValue::new("app::Status", "Active", 1))];
        assert_eq!(
            format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap(),
            "[['Status':'Active']]"
        );
        assert!(matches!(filters[0].value, FilterValue::Enum(_)));
    }

    #[test]
    fn test_unsupported_types_are_aggregated() {
        let filters = [
            Filter::new("score", 1.5f64),
            Filter::new("name", "Bob"),
            Filter::new("active", true),
        ];

        let err = format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFilterTypes);
        assert_eq!(
            err.message,
            "One or more of the supplied filters is of an unsupported type. \
             Unsupported filters were: score of type f64, active of type bool"
        );
    }

    #[test]
    fn test_from_mode_name() {
        let formatter = FilterFormatter::from_mode_name("case-insensitive").unwrap();
        assert_eq!(formatter.mode(), ComparisonMode::CaseInsensitive);

        let err = FilterFormatter::from_mode_name("invariant-culture").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedComparisonMode);
    }

    #[test]
    fn test_escaping_option() {
        let filters = [Filter::new("name", "O'Brien")];

        let escaped = FilterFormatter::new(ComparisonMode::CaseInsensitive).format(&filters).unwrap();
        assert_eq!(escaped, "{ it.'name'.equalsIgnoreCase('O\\'Brien') }");

        let raw = FilterFormatter::new(ComparisonMode::CaseInsensitive)
            .escape_strings(false)
            .format(&filters)
            .unwrap();
        assert_eq!(raw, "{ it.'name'.equalsIgnoreCase('O'Brien') }");
    }

    #[test]
    fn test_format_set() {
        let mut set = FilterSet::new();
        set.insert("name", "Bob").unwrap();
        set.insert("age", 30).unwrap();

        let formatter = FilterFormatter::new(ComparisonMode::CaseInsensitive);
        assert_eq!(
            formatter.format_set(&set).unwrap(),
            "{ it.'name'.equalsIgnoreCase('Bob') && it.'age' == 30 }"
        );
    }
}
