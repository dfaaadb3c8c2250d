//! Tuples, templates, and structural matching
//!
//! A [`Tuple`] is fully bound by construction. A [`Template`] is the
//! query side: each field is bound to a value, a wildcard over a
//! [`FieldType`], or a nested template with wildcards of its own.
//! Matching is directional, always a tuple checked against a template.

use crate::error::TupleError;
use crate::value::{FieldType, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered, fixed-arity sequence of bound values
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tuple {
    fields: Vec<Value>,
}

impl Tuple {
    /// Create a tuple from its field values
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    /// Get the fields of the tuple
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Number of fields
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Check if this tuple satisfies a template
    ///
    /// Arity must agree, then every template field must accept the value
    /// in the same position.
    pub fn matches(&self, template: &Template) -> bool {
        if self.fields.len() != template.fields.len() {
            return false;
        }

        self.fields
            .iter()
            .zip(template.fields.iter())
            .all(|(value, field)| field.accepts(value))
    }

    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }
}

impl<V: Into<Value>> FromIterator<V> for Tuple {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for value in &self.fields {
            write!(f, " {}", value)?;
        }
        f.write_str(" ]")
    }
}

/// One position of a template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Matches only an equal value
    Bound(Value),
    /// Matches any value of the given type
    Wildcard(FieldType),
    /// Matches a nested tuple against an open template
    Nested(Template),
}

impl Field {
    pub fn bound(value: impl Into<Value>) -> Self {
        Field::Bound(value.into())
    }

    pub fn wildcard(ty: FieldType) -> Self {
        Field::Wildcard(ty)
    }

    /// Field for a nested template
    ///
    /// A fully bound template collapses to [`Field::Bound`], so a nested
    /// tuple has a single structural form whichever way it was built.
    pub fn nested(template: Template) -> Self {
        match template.to_tuple() {
            Ok(tuple) => Field::Bound(Value::Tuple(tuple)),
            Err(_) => Field::Nested(template),
        }
    }

    /// Check whether a tuple value satisfies this field
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Field::Bound(expected) => expected == value,
            Field::Wildcard(ty) => value.field_type() == *ty,
            Field::Nested(template) => {
                matches!(value, Value::Tuple(inner) if inner.matches(template))
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Bound(value) => write!(f, "{}", value),
            Field::Wildcard(ty) => write!(f, "?{}", ty),
            Field::Nested(template) => write!(f, "{}", template),
        }
    }
}

/// A tuple-shaped pattern
///
/// Equality and hashing cover the literal structure, wildcard markers
/// included, so identical templates group together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Template {
    fields: Vec<Field>,
}

impl Template {
    /// Create a template from its fields
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Check whether a tuple satisfies this template
    pub fn matches(&self, tuple: &Tuple) -> bool {
        tuple.matches(self)
    }

    /// Convert a fully bound template into a tuple
    ///
    /// Fails with [`TupleError::Unbound`] if any field is a wildcard or
    /// an open nested template.
    pub fn to_tuple(&self) -> Result<Tuple, TupleError> {
        self.fields
            .iter()
            .enumerate()
            .map(|(position, field)| match field {
                Field::Bound(value) => Ok(value.clone()),
                Field::Wildcard(ty) => Err(TupleError::Unbound {
                    position,
                    field_type: *ty,
                }),
                Field::Nested(_) => Err(TupleError::Unbound {
                    position,
                    field_type: FieldType::Tuple,
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Tuple::new)
    }
}

impl From<Tuple> for Template {
    fn from(tuple: Tuple) -> Self {
        Self::new(tuple.into_fields().into_iter().map(Field::Bound).collect())
    }
}

impl From<&Tuple> for Template {
    fn from(tuple: &Tuple) -> Self {
        Self::new(tuple.fields().iter().cloned().map(Field::Bound).collect())
    }
}

impl TryFrom<Template> for Tuple {
    type Error = TupleError;

    fn try_from(template: Template) -> Result<Self, Self::Error> {
        template.to_tuple()
    }
}

impl FromIterator<Field> for Template {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for field in &self.fields {
            write!(f, " {}", field)?;
        }
        f.write_str(" ]")
    }
}
