//! Filter and enumeration macros.
//!
//! # Examples
//!
//! ```rust
//! use gremlin_filters_query::filter;
//! use gremlin_filters_query::{Filter, FilterValue};
//!
//! let f = filter!(age == 30);
//! assert_eq!(f, Filter::new("age", 30));
//!
//! let f = filter!(email is null);
//! assert_eq!(f.value, FilterValue::Null);
//! ```

/// Create a single property filter.
///
/// # Syntax
///
/// - `filter!(property == value)` - Equality
/// - `filter!("property name" == value)` - Equality on a name that is not an identifier
/// - `filter!(property is null)` - Null match
#[macro_export]
macro_rules! filter {
    ($field:ident is null) => {
        $crate::filter::Filter::null(stringify!($field))
    };

    ($field:literal is null) => {
        $crate::filter::Filter::null($field)
    };

    ($field:ident == $value:expr) => {
        $crate::filter::Filter::new(stringify!($field), $value)
    };

    ($field:literal == $value:expr) => {
        $crate::filter::Filter::new($field, $value)
    };
}

/// Implement [`GraphEnum`](crate::typed::GraphEnum) and value conversions for
/// a fieldless enum.
///
/// Every variant must be listed.
///
/// ```rust
/// use gremlin_filters_query::graph_enum;
/// use gremlin_filters_query::typed::GraphEnum;
///
/// pub enum Role {
///     Reader = 1,
///     Writer = 2,
/// }
///
/// graph_enum!(Role { Reader, Writer });
///
/// assert_eq!(Role::Writer.name(), "Writer");
/// assert_eq!(Role::DESCRIPTOR.member(1).unwrap().name, "Reader");
/// ```
#[macro_export]
macro_rules! graph_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::typed::GraphEnum for $ty {
            const DESCRIPTOR: $crate::typed::EnumDescriptor = $crate::typed::EnumDescriptor::new(
                concat!(module_path!(), "::", stringify!($ty)),
                &[$((stringify!($variant), $ty::$variant as i64)),+],
            );

            fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant)),+
                }
            }

            fn discriminant(&self) -> i64 {
                match self {
                    $($ty::$variant => $ty::$variant as i64),+
                }
            }
        }

        impl ::core::convert::From<$ty> for $crate::filter::FilterValue {
            fn from(v: $ty) -> Self {
                $crate::filter::FilterValue::Enum($crate::typed::GraphEnum::to_enum_value(&v))
            }
        }

        impl $crate::typed::PropertyValue for $ty {
            fn property_type() -> $crate::predicate::PropertyType {
                $crate::predicate::PropertyType::Enum(<$ty as $crate::typed::GraphEnum>::DESCRIPTOR)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::filter::{Filter, FilterValue};

    #[test]
    fn test_filter_eq_macro() {
        let f = filter!(id == 42);
        assert_eq!(f.property_name, "id");
        assert_eq!(f.value, FilterValue::Int32(42));
    }

    #[test]
    fn test_filter_string_macro() {
        let f = filter!(name == "Bob");
        assert_eq!(f, Filter::new("name", "Bob"));
    }

    #[test]
    fn test_filter_literal_name_macro() {
        let f = filter!("first name" == "Bob");
        assert_eq!(f.property_name, "first name");
    }

    #[test]
    fn test_filter_null_macro() {
        assert_eq!(filter!(deleted_at is null), Filter::null("deleted_at"));
        assert_eq!(filter!("deleted at" is null), Filter::null("deleted at"));
    }

    #[test]
    fn test_filter_expression_value() {
        let base = 40i64;
        let f = filter!(total == base + 2);
        assert_eq!(f.value, FilterValue::Int64(42));
    }
}
