//! Typed property handles for building predicates.
//!
//! A [`Property`] ties a property name to the node type it belongs to and to
//! the Rust type of its value, so equality predicates are checked by the
//! compiler and always have a shape the extractor accepts.
//!
//! ```rust
//! use gremlin_filters_query::{graph_enum, ComparisonMode, FilterFormatter};
//! use gremlin_filters_query::typed::Property;
//!
//! pub struct Account;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! pub enum Status {
//!     Inactive = 0,
//!     Active = 1,
//! }
//!
//! graph_enum!(Status { Inactive, Active });
//!
//! const STATUS: Property<Account, Status> = Property::new("Status");
//!
//! let filter = STATUS.eq(Status::Active).to_filter().unwrap();
//! let fragment = FilterFormatter::new(ComparisonMode::Exact).format(&[filter]).unwrap();
//! assert_eq!(fragment, "[['Status':'Active']]");
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::filter::{EnumValue, FilterValue};
use crate::predicate::{Expr, Predicate, PropertyType};

/// Static description of a graph enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    /// Full type name of the enumeration.
    pub type_name: &'static str,
    /// `(variant name, discriminant)` pairs.
    pub members: &'static [(&'static str, i64)],
}

impl EnumDescriptor {
    /// Create a new descriptor.
    pub const fn new(type_name: &'static str, members: &'static [(&'static str, i64)]) -> Self {
        Self { type_name, members }
    }

    /// The member with the given discriminant.
    pub fn member(&self, discriminant: i64) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|(_, d)| *d == discriminant)
            .map(|(name, d)| EnumValue::new(self.type_name, *name, *d))
    }

    /// The member with the given variant name.
    pub fn member_named(&self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, d)| EnumValue::new(self.type_name, *n, *d))
    }
}

/// A fieldless enum usable as a property value.
///
/// Implement it with [`graph_enum!`](crate::graph_enum).
pub trait GraphEnum {
    /// Description of all members.
    const DESCRIPTOR: EnumDescriptor;

    /// Variant name of this member.
    fn name(&self) -> &'static str;

    /// Discriminant of this member.
    fn discriminant(&self) -> i64;

    /// This member as a filter value.
    fn to_enum_value(&self) -> EnumValue {
        EnumValue::new(Self::DESCRIPTOR.type_name, self.name(), self.discriminant())
    }
}

/// Rust types that can be declared as property types.
pub trait PropertyValue: Into<FilterValue> {
    /// The declared type reported to the extractor.
    fn property_type() -> PropertyType;
}

impl PropertyValue for String {
    fn property_type() -> PropertyType {
        PropertyType::String
    }
}

impl PropertyValue for i32 {
    fn property_type() -> PropertyType {
        PropertyType::Int32
    }
}

impl PropertyValue for i64 {
    fn property_type() -> PropertyType {
        PropertyType::Int64
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    fn property_type() -> PropertyType {
        T::property_type()
    }
}

/// A typed property of node type `N` holding values of type `T`.
pub struct Property<N, T> {
    name: &'static str,
    _marker: PhantomData<fn(&N) -> T>,
}

impl<N, T> Property<N, T> {
    /// Create a property handle.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The property name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<N, T: PropertyValue> Property<N, T> {
    /// The property access expression, for hand-built predicates.
    pub fn expr(&self) -> Expr {
        Expr::property(self.name, T::property_type())
    }

    /// Predicate matching nodes whose property equals `value`.
    pub fn eq(&self, value: impl Into<T>) -> Predicate<N> {
        let value: T = value.into();
        Predicate::new(self.expr().eq(Expr::Constant(value.into())))
    }
}

impl<N, T> Clone for Property<N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, T> Copy for Property<N, T> {}

impl<N, T> fmt::Debug for Property<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("node", &std::any::type_name::<N>())
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
