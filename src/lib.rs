//! # gremlin-filters
//!
//! Typed property filters rendered as Gremlin query fragments.
//!
//! gremlin-filters provides:
//! - Exact and case-insensitive rendering dialects
//! - Aggregated reporting of every filter that cannot be rendered
//! - Typed property handles that build single-equality predicates
//! - Enum support through the `graph_enum!` macro
//!
//! ## Quick Start
//!
//! ```rust
//! use gremlin_filters::prelude::*;
//!
//! pub struct Person;
//!
//! #[derive(Debug, Clone, Copy)]
//! pub enum Status {
//!     Inactive = 0,
//!     Active = 1,
//! }
//!
//! graph_enum!(Status { Inactive, Active });
//!
//! const NAME: Property<Person, String> = Property::new("Name");
//! const STATUS: Property<Person, Status> = Property::new("Status");
//!
//! fn main() -> Result<(), QueryError> {
//!     let mut filters = FilterSet::new();
//!     translate_filter(&NAME.eq("Bob"), &mut filters)?;
//!     translate_filter(&STATUS.eq(Status::Active), &mut filters)?;
//!
//!     let fragment = FilterFormatter::new(ComparisonMode::CaseInsensitive).format_set(&filters)?;
//!     assert_eq!(
//!         fragment,
//!         "{ it.'Name'.equalsIgnoreCase('Bob') && it.'Status'.equalsIgnoreCase('Active') }"
//!     );
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Filter rendering, predicates and configuration.
pub mod query {
    pub use gremlin_filters_query::*;
}

pub use gremlin_filters_query::{filter, graph_enum};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use gremlin_filters_query::prelude::*;
}

// Re-export key types at the crate root
pub use query::{
    ComparisonMode, ErrorCode, Filter, FilterFormatter, FilterSet, FilterValue, GremlinConfig,
    QueryError, QueryResult, format_gremlin_filter,
};
