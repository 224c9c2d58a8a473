//! # gremlin-filters-query
//!
//! Translates typed property filters into Gremlin query fragments.
//!
//! This crate provides:
//! - Filter values restricted to what Gremlin fragments can express
//! - Two rendering dialects: exact and case-insensitive matching
//! - Extraction of `(name, value)` pairs from single-equality predicates
//! - Typed property handles and enum support
//! - TOML configuration and `tracing`-based logging
//!
//! ## Rendering Filters
//!
//! ```rust
//! use gremlin_filters_query::{ComparisonMode, Filter, format_gremlin_filter};
//!
//! let filters = vec![Filter::new("age", 30), Filter::null("email")];
//!
//! let fragment = format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap();
//! assert_eq!(fragment, "[['age':30],['email':null]]");
//!
//! let fragment = format_gremlin_filter(&filters, ComparisonMode::CaseInsensitive).unwrap();
//! assert_eq!(fragment, "{ it.'age' == 30 && it.'email' == null }");
//! ```
//!
//! ## Unsupported Values
//!
//! Every filter whose value cannot be rendered is reported in one error:
//!
//! ```rust
//! use gremlin_filters_query::{ComparisonMode, ErrorCode, Filter, format_gremlin_filter};
//!
//! let filters = vec![Filter::new("score", 1.5f64), Filter::new("active", true)];
//!
//! let err = format_gremlin_filter(&filters, ComparisonMode::Exact).unwrap_err();
//! assert_eq!(err.code, ErrorCode::UnsupportedFilterTypes);
//! assert!(err.message.ends_with("score of type f64, active of type bool"));
//! ```
//!
//! ## Predicates
//!
//! ```rust
//! use gremlin_filters_query::typed::Property;
//! use gremlin_filters_query::{FilterSet, translate_filter};
//!
//! struct Person;
//!
//! const NAME: Property<Person, String> = Property::new("Name");
//! const AGE: Property<Person, i32> = Property::new("Age");
//!
//! let mut filters = FilterSet::new();
//! translate_filter(&NAME.eq("Bob"), &mut filters).unwrap();
//! translate_filter(&AGE.eq(30), &mut filters).unwrap();
//! assert_eq!(filters.len(), 2);
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod logging;
#[macro_use]
pub mod macros;
pub mod predicate;
pub mod render;
pub mod typed;

pub use config::{DebugConfig, FiltersConfig, GremlinConfig};
pub use dialect::{ComparisonMode, Dialect};
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult, Suggestion};
pub use filter::{EnumValue, Filter, FilterSet, FilterValue, UnsupportedValue};
pub use predicate::{BinaryOp, Expr, Predicate, PropertyType, extract, translate_filter};
pub use render::{FilterFormatter, format_gremlin_filter};
pub use typed::{EnumDescriptor, GraphEnum, Property, PropertyValue};

// Re-export logging utilities
pub use logging::{get_log_format, get_log_level, init as init_logging, init_with_level, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dialect::ComparisonMode;
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::filter::{Filter, FilterSet, FilterValue};
    pub use crate::predicate::{Expr, Predicate, PropertyType, extract, translate_filter};
    pub use crate::render::{FilterFormatter, format_gremlin_filter};
    pub use crate::typed::{GraphEnum, Property};
    pub use crate::{filter, graph_enum};
}
