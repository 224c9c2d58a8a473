//! Gremlin rendering dialects, one per comparison mode.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::filter::FilterValue;

/// Selects how property values are compared by the rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Ordinal matching through a property map lookup.
    #[default]
    #[serde(alias = "ordinal")]
    Exact,
    /// Text values compared with `equalsIgnoreCase` inside a closure.
    #[serde(alias = "ordinal-ignore-case")]
    CaseInsensitive,
}

impl ComparisonMode {
    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
        }
    }

    /// Get the rendering dialect for this mode.
    pub fn dialect(&self) -> &'static Dialect {
        Dialect::for_mode(*self)
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "ordinal" => Ok(Self::Exact),
            "case-insensitive" | "ordinal-ignore-case" => Ok(Self::CaseInsensitive),
            _ => Err(QueryError::unsupported_comparison_mode(s)),
        }
    }
}

/// Formatting templates and joining rules for one comparison mode.
///
/// Templates use `{name}`, `{value}` and `{joined}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Template for a property compared against null.
    pub null_template: &'static str,
    /// Template for a text value.
    pub string_template: &'static str,
    /// Template for 32-bit and 64-bit integer values.
    pub integer_template: &'static str,
    /// Placed between formatted filters.
    pub separator: &'static str,
    /// Applied to the joined filters.
    pub wrap_template: &'static str,
}

/// Dialect for [`ComparisonMode::Exact`].
pub const EXACT: Dialect = Dialect {
    null_template: "['{name}':null]",
    string_template: "['{name}':'{value}']",
    integer_template: "['{name}':{value}]",
    separator: ",",
    wrap_template: "[{joined}]",
};

/// Dialect for [`ComparisonMode::CaseInsensitive`].
pub const CASE_INSENSITIVE: Dialect = Dialect {
    null_template: "it.'{name}' == null",
    string_template: "it.'{name}'.equalsIgnoreCase('{value}')",
    integer_template: "it.'{name}' == {value}",
    separator: " && ",
    wrap_template: "{ {joined} }",
};

impl Dialect {
    /// Get the dialect for a comparison mode.
    pub fn for_mode(mode: ComparisonMode) -> &'static Dialect {
        match mode {
            ComparisonMode::Exact => &EXACT,
            ComparisonMode::CaseInsensitive => &CASE_INSENSITIVE,
        }
    }

    /// Template for a value, `None` if the value's type cannot be rendered.
    ///
    /// Enum values must be normalized to text first.
    pub fn template_for(&self, value: &FilterValue) -> Option<&'static str> {
        match value {
            FilterValue::Null => Some(self.null_template),
            FilterValue::String(_) => Some(self.string_template),
            FilterValue::Int32(_) | FilterValue::Int64(_) => Some(self.integer_template),
            FilterValue::Enum(_) | FilterValue::Unsupported(_) => None,
        }
    }

    /// Format a single filter, `None` if the value's type cannot be rendered.
    pub fn format_filter(&self, name: &str, value: &FilterValue, escape: bool) -> Option<String> {
        let template = self.template_for(value)?;
        let value_text = match value {
            FilterValue::Null => None,
            FilterValue::String(s) if escape => Some(escape_literal(s)),
            other => Some(Cow::Owned(other.to_string())),
        };
        let name = if escape { escape_literal(name) } else { Cow::Borrowed(name) };

        Some(expand(
            template,
            &[("{name}", name.as_ref()), ("{value}", value_text.as_deref().unwrap_or(""))],
        ))
    }

    /// Wrap joined filters with the dialect's template.
    pub fn wrap(&self, joined: &str) -> String {
        expand(self.wrap_template, &[("{joined}", joined)])
    }
}

/// Escape a string for use inside a single-quoted Groovy literal.
pub fn escape_literal(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if matches!(c, '\\' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Substitute placeholders in a single left-to-right pass.
///
/// Substituted text is never scanned again, so a value containing
/// `{name}` is emitted as-is.
fn expand(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    'scan: while !rest.is_empty() {
        for (placeholder, replacement) in substitutions {
            if let Some(tail) = rest.strip_prefix(placeholder) {
                out.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}
