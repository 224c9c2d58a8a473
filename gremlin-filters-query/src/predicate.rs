//! Single-equality predicates and extraction of `(name, value)` pairs.
//!
//! A predicate is a small expression tree over one parameter, the node being
//! matched. Only one shape is understood:
//!
//! ```text
//! <property of the parameter, optionally converted> == <constant expression>
//! ```
//!
//! Anything else is rejected with a predicate error.
//!
//! ```rust
//! use gremlin_filters_query::predicate::{extract, Expr, Predicate, PropertyType};
//! use gremlin_filters_query::FilterValue;
//!
//! struct Person;
//!
//! let predicate: Predicate<Person> =
//!     Predicate::new(Expr::property("Age", PropertyType::Int32).eq(Expr::constant(30)));
//!
//! let (name, value) = extract(&predicate).unwrap();
//! assert_eq!(name, "Age");
//! assert_eq!(value, FilterValue::Int32(30));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::filter::{Filter, FilterSet, FilterValue};
use crate::typed::EnumDescriptor;

/// Declared type of a node property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    /// Text property.
    String,
    /// 32-bit integer property.
    Int32,
    /// 64-bit integer property.
    Int64,
    /// Enumeration property.
    Enum(EnumDescriptor),
    /// Any other type, identified by its full name.
    Other(&'static str),
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Int32 => f.write_str("i32"),
            Self::Int64 => f.write_str("i64"),
            Self::Enum(d) => f.write_str(d.type_name),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Binary operators that may appear in a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Expression tree of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The predicate parameter (the node being matched).
    Parameter,
    /// A property read from a target expression.
    Property {
        /// Expression the property is read from.
        target: Box<Expr>,
        /// Property name.
        name: Cow<'static, str>,
        /// Declared property type.
        ty: PropertyType,
    },
    /// A plain field read, which is not a property.
    Field {
        /// Expression the field is read from.
        target: Box<Expr>,
        /// Field name.
        name: Cow<'static, str>,
    },
    /// A literal value.
    Constant(FilterValue),
    /// A type conversion.
    Convert {
        /// Converted expression.
        operand: Box<Expr>,
        /// Target type.
        to: PropertyType,
    },
    /// A binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Logical negation.
    Not(Box<Expr>),
    /// A method call.
    Call {
        /// Method name.
        method: Cow<'static, str>,
        /// Call arguments.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// A property of the predicate parameter.
    pub fn property(name: impl Into<Cow<'static, str>>, ty: PropertyType) -> Self {
        Self::Parameter.member(name, ty)
    }

    /// A property of this expression.
    pub fn member(self, name: impl Into<Cow<'static, str>>, ty: PropertyType) -> Self {
        Self::Property {
            target: Box::new(self),
            name: name.into(),
            ty,
        }
    }

    /// A field of this expression.
    pub fn field(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self::Field {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// A literal value.
    pub fn constant(value: impl Into<FilterValue>) -> Self {
        Self::Constant(value.into())
    }

    /// Convert this expression to another type.
    pub fn convert(self, to: PropertyType) -> Self {
        Self::Convert {
            operand: Box::new(self),
            to,
        }
    }

    /// A method call.
    pub fn call(method: impl Into<Cow<'static, str>>, args: Vec<Expr>) -> Self {
        Self::Call {
            method: method.into(),
            args,
        }
    }

    /// Combine with another expression through a binary operator.
    pub fn binary(self, op: BinaryOp, other: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// `self == other`
    pub fn eq(self, other: Expr) -> Self {
        self.binary(BinaryOp::Eq, other)
    }

    /// `self != other`
    pub fn ne(self, other: Expr) -> Self {
        self.binary(BinaryOp::Ne, other)
    }

    /// `self < other`
    pub fn lt(self, other: Expr) -> Self {
        self.binary(BinaryOp::Lt, other)
    }

    /// `self > other`
    pub fn gt(self, other: Expr) -> Self {
        self.binary(BinaryOp::Gt, other)
    }

    /// `self && other`
    pub fn and(self, other: Expr) -> Self {
        self.binary(BinaryOp::And, other)
    }

    /// `self || other`
    pub fn or(self, other: Expr) -> Self {
        self.binary(BinaryOp::Or, other)
    }

    /// `!self`
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// A boolean predicate over nodes of type `N`.
pub struct Predicate<N> {
    body: Expr,
    _node: PhantomData<fn(&N) -> bool>,
}

impl<N> Predicate<N> {
    /// Wrap an expression as a predicate over `N`.
    pub fn new(body: Expr) -> Self {
        Self {
            body,
            _node: PhantomData,
        }
    }

    /// The predicate body.
    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Extract this predicate as a filter.
    pub fn to_filter(&self) -> QueryResult<Filter> {
        let (name, value) = extract(self)?;
        Ok(Filter::new(name, value))
    }
}

impl<N> Clone for Predicate<N> {
    fn clone(&self) -> Self {
        Self::new(self.body.clone())
    }
}

impl<N> fmt::Debug for Predicate<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("node", &std::any::type_name::<N>())
            .field("body", &self.body)
            .finish()
    }
}

struct ExtractedKey {
    name: String,
    declared_type: PropertyType,
}

/// Extract the `(property_name, value)` pair of a single-equality predicate.
///
/// When the property is declared as an enumeration, the value is coerced to
/// the enumeration member with the same discriminant.
pub fn extract<N>(predicate: &Predicate<N>) -> QueryResult<(String, FilterValue)> {
    let node = std::any::type_name::<N>();
    debug!(node, "Extracting filter from predicate");

    let (left, right) = match predicate.body() {
        Expr::Binary {
            op: BinaryOp::Eq,
            left,
            right,
        } => (left, right),
        Expr::Binary { .. } => {
            return Err(QueryError::unsupported_expression_shape(
                "Only equality expressions are supported at this time.",
            )
            .with_node(node));
        }
        _ => {
            return Err(QueryError::unsupported_expression_shape(
                "Only binary expressions are supported at this time.",
            )
            .with_node(node));
        }
    };

    let key = parse_key(left).map_err(|e| e.with_node(node))?;
    let constant = fold_constant(right)
        .map_err(|e| e.with_node(node).with_property(&key.name))?;
    let value = coerce(&key, constant).map_err(|e| e.with_node(node))?;

    debug!(node, property = %key.name, value = %value, "Extracted filter");
    Ok((key.name, value))
}

/// Extract a predicate and add it to a filter set.
pub fn translate_filter<N>(predicate: &Predicate<N>, filters: &mut FilterSet) -> QueryResult<()> {
    let (name, value) = extract(predicate)?;
    filters.insert(name, value)
}

fn parse_key(expr: &Expr) -> QueryResult<ExtractedKey> {
    let expr = match expr {
        Expr::Convert { operand, .. } => operand.as_ref(),
        other => other,
    };

    match expr {
        Expr::Property { target, name, ty } if matches!(target.as_ref(), Expr::Parameter) => {
            Ok(ExtractedKey {
                name: name.to_string(),
                declared_type: *ty,
            })
        }
        _ => Err(QueryError::unsupported_left_hand_side()),
    }
}

fn fold_constant(expr: &Expr) -> QueryResult<FilterValue> {
    match expr {
        Expr::Constant(value) => Ok(value.clone()),
        Expr::Convert { operand, to } => convert(fold_constant(operand)?, to),
        Expr::Parameter => Err(reads_parameter()),
        Expr::Property { target, .. } | Expr::Field { target, .. }
            if matches!(target.as_ref(), Expr::Parameter) =>
        {
            Err(reads_parameter())
        }
        Expr::Property { .. }
        | Expr::Field { .. }
        | Expr::Binary { .. }
        | Expr::Not(_)
        | Expr::Call { .. } => Err(QueryError::unsupported_right_hand_side(
            "only constants and conversions can be evaluated",
        )),
    }
}

fn reads_parameter() -> QueryError {
    QueryError::unsupported_right_hand_side("it reads from the predicate parameter")
}

fn convert(value: FilterValue, to: &PropertyType) -> QueryResult<FilterValue> {
    let discriminant = match &value {
        FilterValue::Null => return Ok(FilterValue::Null),
        FilterValue::Int32(v) => Some(i64::from(*v)),
        FilterValue::Int64(v) => Some(*v),
        FilterValue::Enum(e) => Some(e.discriminant),
        FilterValue::String(_) | FilterValue::Unsupported(_) => None,
    };

    let invalid = || {
        QueryError::unsupported_right_hand_side(format!(
            "cannot convert {} of type {} to {}",
            value,
            value.type_name(),
            to
        ))
    };

    match (to, discriminant) {
        (PropertyType::Int32, Some(d)) => i32::try_from(d).map(FilterValue::Int32).map_err(|_| invalid()),
        (PropertyType::Int64, Some(d)) => Ok(FilterValue::Int64(d)),
        (PropertyType::Enum(descriptor), Some(d)) => descriptor
            .member(d)
            .map(FilterValue::Enum)
            .ok_or_else(|| QueryError::unknown_enum_value(descriptor.type_name, d)),
        (PropertyType::String, None) if matches!(value, FilterValue::String(_)) => Ok(value.clone()),
        (PropertyType::Other(_), _) => Ok(value.clone()),
        _ => Err(invalid()),
    }
}

fn coerce(key: &ExtractedKey, value: FilterValue) -> QueryResult<FilterValue> {
    let PropertyType::Enum(descriptor) = key.declared_type else {
        return Ok(value);
    };

    let discriminant = match &value {
        FilterValue::Null => return Ok(value),
        FilterValue::Int32(v) => i64::from(*v),
        FilterValue::Int64(v) => *v,
        FilterValue::Enum(e) => e.discriminant,
        FilterValue::String(name) => {
            return descriptor.member_named(name).map(FilterValue::Enum).ok_or_else(|| {
                QueryError::unknown_enum_value(descriptor.type_name, name).with_property(&key.name)
            });
        }
        FilterValue::Unsupported(_) => {
            return Err(QueryError::unknown_enum_value(descriptor.type_name, &value)
                .with_property(&key.name));
        }
    };

    descriptor
        .member(discriminant)
        .map(FilterValue::Enum)
        .ok_or_else(|| {
            QueryError::unknown_enum_value(descriptor.type_name, discriminant).with_property(&key.name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::EnumValue;
    use crate::ErrorCode;

    struct Person;

    const STATUS: EnumDescriptor =
        EnumDescriptor::new("app::Status", &[("Inactive", 0), ("Active", 1)]);

    fn predicate(body: Expr) -> Predicate<Person> {
        Predicate::new(body)
    }

    #[test]
    fn test_extract_int() {
        let p = predicate(Expr::property("Age", PropertyType::Int32).eq(Expr::constant(30)));
        assert_eq!(extract(&p).unwrap(), ("Age".to_string(), FilterValue::Int32(30)));
    }

    #[test]
    fn test_extract_string() {
        let p = predicate(Expr::property("Name", PropertyType::String).eq(Expr::constant("Bob")));
        assert_eq!(extract(&p).unwrap(), ("Name".to_string(), FilterValue::from("Bob")));
    }

    #[test]
    fn test_extract_enum_compared_through_conversions() {
        // p.Status == Status.Active, where both sides are compared as integers
        let p = predicate(
            Expr::property("Status", PropertyType::Enum(STATUS))
                .convert(PropertyType::Int32)
                .eq(Expr::constant(1)),
        );

        let (name, value) = extract(&p).unwrap();
        assert_eq!(name, "Status");
        assert_eq!(value, FilterValue::Enum(EnumValue::new("app::Status", "Active", 1)));
    }

    #[test]
    fn test_extract_enum_member_constant() {
        let p = predicate(
            Expr::property("Status", PropertyType::Enum(STATUS))
                .eq(Expr::constant(EnumValue::new("app::Status", "Inactive", 0))),
        );
        let (_, value) = extract(&p).unwrap();
        assert_eq!(value.to_string(), "Inactive");
    }

    #[test]
    fn test_extract_enum_by_variant_name() {
        let p = predicate(
            Expr::property("Status", PropertyType::Enum(STATUS)).eq(Expr::constant("Active")),
        );
        let (_, value) = extract(&p).unwrap();
        assert_eq!(value, FilterValue::Enum(EnumValue::new("app::Status", "Active", 1)));

        let p = predicate(
            Expr::property("Status", PropertyType::Enum(STATUS)).eq(Expr::constant("Archived")),
        );
        let err = extract(&p).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownEnumValue);
        assert_eq!(err.message, "Value Archived is not a member of enumeration app::Status");
    }

    #[test]
    fn test_unknown_enum_value() {
        let p = predicate(
            Expr::property("Status", PropertyType::Enum(STATUS)).eq(Expr::constant(9)),
        );
        let err = extract(&p).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownEnumValue);
        assert_eq!(err.context.property.as_deref(), Some("Status"));
    }

    #[test]
    fn test_non_equality_is_rejected() {
        let p = predicate(Expr::property("Age", PropertyType::Int32).gt(Expr::constant(5)));
        let err = extract(&p).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedExpressionShape);
        assert!(err.message.contains("equality"));
    }

    #[test]
    fn test_non_binary_is_rejected() {
        let p = predicate(Expr::property("Deleted", PropertyType::Other("bool")).not());
        let err = extract(&p).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedExpressionShape);
        assert!(err.message.contains("binary"));
    }

    #[test]
    fn test_combinators_are_rejected() {
        let age = Expr::property("Age", PropertyType::Int32).eq(Expr::constant(30));
        let name = Expr::property("Name", PropertyType::String).eq(Expr::constant("Bob"));
        let err = extract(&predicate(age.and(name))).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedExpressionShape);
    }

    #[test]
    fn test_left_hand_side_must_be_property() {
        let constant_left = predicate(Expr::constant(1).eq(Expr::constant(1)));
        assert_eq!(extract(&constant_left).unwrap_err().code, ErrorCode::UnsupportedLeftHandSide);

        let field_left = predicate(Expr::Parameter.field("age").eq(Expr::constant(1)));
        assert_eq!(extract(&field_left).unwrap_err().code, ErrorCode::UnsupportedLeftHandSide);

        let nested = predicate(
            Expr::property("Address", PropertyType::Other("app::Address"))
                .member("City", PropertyType::String)
                .eq(Expr::constant("Paris")),
        );
        assert_eq!(extract(&nested).unwrap_err().code, ErrorCode::UnsupportedLeftHandSide);

        let call = predicate(Expr::call("ToUpper", vec![]).eq(Expr::constant("BOB")));
        assert_eq!(extract(&call).unwrap_err().code, ErrorCode::UnsupportedLeftHandSide);
    }

    #[test]
    fn test_only_one_conversion_is_unwrapped() {
        let p = predicate(
            Expr::property("Age", PropertyType::Int32)
                .convert(PropertyType::Int64)
                .convert(PropertyType::Int64)
                .eq(Expr::constant(30i64)),
        );
        assert_eq!(extract(&p).unwrap_err().code, ErrorCode::UnsupportedLeftHandSide);
    }

    #[test]
    fn test_right_hand_side_is_folded() {
        let p = predicate(
            Expr::property("Id", PropertyType::Int64)
                .convert(PropertyType::Int64)
                .eq(Expr::constant(7).convert(PropertyType::Int64)),
        );
        assert_eq!(extract(&p).unwrap().1, FilterValue::Int64(7));
    }

    #[test]
    fn test_right_hand_side_cannot_read_parameter() {
        let p = predicate(
            Expr::property("Age", PropertyType::Int32)
                .eq(Expr::property("Height", PropertyType::Int32)),
        );
        let err = extract(&p).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedRightHandSide);
        assert_eq!(err.context.property.as_deref(), Some("Age"));
    }

    #[test]
    fn test_right_hand_side_member_of_constant() {
        let p = predicate(
            Expr::property("City", PropertyType::String).eq(
                Expr::constant("Paris").member("Length", PropertyType::Int32),
            ),
        );
        let err = extract(&p).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedRightHandSide);
        assert!(err.message.ends_with("only constants and conversions can be evaluated"));

        let p = predicate(
            Expr::property("City", PropertyType::String).eq(Expr::Parameter.field("city")),
        );
        let err = extract(&p).unwrap_err();
        assert!(err.message.ends_with("it reads from the predicate parameter"));
    }

    #[test]
    fn test_narrowing_overflow_is_rejected() {
        let p = predicate(
            Expr::property("Age", PropertyType::Int32)
                .eq(Expr::constant(5_000_000_000i64).convert(PropertyType::Int32)),
        );
        assert_eq!(extract(&p).unwrap_err().code, ErrorCode::UnsupportedRightHandSide);
    }

    #[test]
    fn test_translate_filter_rejects_duplicates() {
        let mut filters = FilterSet::new();
        let p = predicate(Expr::property("Age", PropertyType::Int32).eq(Expr::constant(30)));

        translate_filter(&p, &mut filters).unwrap();
        let err = translate_filter(&p, &mut filters).unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateFilter);
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_error_names_node_type() {
        let p = predicate(Expr::constant(1).eq(Expr::constant(1)));
        let err = extract(&p).unwrap_err();
        assert!(err.context.node.unwrap().ends_with("Person"));
    }
}
