// crates/reptor-models/src/binding/field.rs
// ============================================================================
// Module: Bound Fields
// Description: One raw JSON value validated against one field schema.
// Purpose: Type-directed validation and recursive binding of design fields.
// Dependencies: crate::schema, serde_json, thiserror, time, uuid
// ============================================================================

//! ## Overview
//! [`BoundField::bind`] dispatches on the schema's [`FieldType`]: leaf types
//! are checked against their predicate, `list` binds every element against
//! the shared `items` schema, and `object` binds every present member against
//! its property schema. Errors carry the path of the offending value, for
//! example `list_field[1].enum_in_object`.
//!
//! A bound field is only ever written through validating methods. A failed
//! write returns the error and leaves the previous value untouched, so a bound
//! tree never holds a value inconsistent with its schema.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use uuid::Uuid;
use uuid::Version;

use crate::schema::FieldSchema;
use crate::schema::FieldType;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted layout of `date` field values.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Bind Mode
// ============================================================================

/// Strictness of binding.
///
/// Strict binding rejects object members missing from the raw value and raw
/// keys that have no schema field. Lenient binding skips both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// Missing members and unknown keys are errors.
    #[default]
    Strict,
    /// Missing members and unknown keys are skipped.
    Lenient,
}

impl BindMode {
    /// Returns true for [`BindMode::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

// ============================================================================
// SECTION: Bound Values
// ============================================================================

/// Validated value of a bound field.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// Value of `string`, `markdown`, `cvss`, `combobox`, `enum`, `date` and `user` fields.
    Text(String),
    /// Value of `number` fields.
    Number(Number),
    /// Value of `boolean` fields.
    Boolean(bool),
    /// Elements of `list` fields, each bound against the `items` schema.
    List(Vec<BoundField>),
    /// Present members of `object` fields, in property order.
    Object(Vec<BoundField>),
}

/// A field schema paired with a validated value.
///
/// # Invariants
/// - `value` always satisfies the predicate of `schema.field_type`.
/// - List elements share one schema equal to `schema.items()`.
/// - Object members appear in property order, at most once each.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    /// Schema the value was validated against.
    schema: Arc<FieldSchema>,
    /// Validated value.
    value: BoundValue,
    /// Location of the field inside its record.
    path: String,
    /// Strictness used for this field and later writes.
    mode: BindMode,
}

impl BoundField {
    /// Binds `raw` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when the value, or any nested value, does not
    /// satisfy its schema.
    pub fn bind(schema: Arc<FieldSchema>, raw: &Value, mode: BindMode) -> Result<Self, FieldError> {
        let path = schema.id.clone();
        Self::bind_at(schema, raw, mode, path)
    }

    /// Binds `raw` against `schema`, reporting errors under `path`.
    fn bind_at(
        schema: Arc<FieldSchema>,
        raw: &Value,
        mode: BindMode,
        path: String,
    ) -> Result<Self, FieldError> {
        let value = bind_value(&schema, raw, mode, &path)?;
        Ok(Self {
            schema,
            value,
            path,
            mode,
        })
    }

    /// Field id.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.schema.id
    }

    /// Field type tag.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.schema.field_type
    }

    /// Schema the field is bound against.
    #[must_use]
    pub const fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    /// Validated value.
    #[must_use]
    pub const fn value(&self) -> &BoundValue {
        &self.value
    }

    /// Location of the field inside its record.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Strictness used by this field.
    #[must_use]
    pub const fn mode(&self) -> BindMode {
        self.mode
    }

    /// Returns the value of a textual field.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            BoundValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the value of a `boolean` field.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match &self.value {
            BoundValue::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the value of a `number` field.
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match &self.value {
            BoundValue::Number(number) => Some(number),
            _ => None,
        }
    }

    /// Returns the elements of a `list` field.
    #[must_use]
    pub fn items(&self) -> Option<&[Self]> {
        match &self.value {
            BoundValue::List(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns a mutable element of a `list` field.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Self> {
        match &mut self.value {
            BoundValue::List(elements) => elements.get_mut(index),
            _ => None,
        }
    }

    /// Returns a member of an `object` field.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Self> {
        match &self.value {
            BoundValue::Object(members) => members.iter().find(|member| member.name() == name),
            _ => None,
        }
    }

    /// Returns a mutable member of an `object` field.
    pub fn member_mut(&mut self, name: &str) -> Option<&mut Self> {
        match &mut self.value {
            BoundValue::Object(members) => members.iter_mut().find(|member| member.name() == name),
            _ => None,
        }
    }

    /// Replaces the value with `raw` after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when `raw` does not satisfy the schema; the
    /// previous value is kept.
    pub fn set_value(&mut self, raw: &Value) -> Result<(), FieldError> {
        self.value = bind_value(&self.schema, raw, self.mode, &self.path)?;
        Ok(())
    }

    /// Replaces the elements of a `list` field with already bound fields.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when the field is not a list, the elements have
    /// differing types, or an element was bound against another schema.
    pub fn set_list(&mut self, mut elements: Vec<Self>) -> Result<(), FieldError> {
        self.expect_type(FieldType::List)?;
        ensure_homogeneous(&self.path, &elements)?;
        let items = self.items_schema()?;
        if let Some(element) = elements.iter().find(|element| element.schema != *items) {
            return Err(FieldError::SchemaMismatch {
                path: self.path.clone(),
                field: element.name().to_string(),
            });
        }
        for (index, element) in elements.iter_mut().enumerate() {
            element.relocate(format!("{}[{index}]", self.path));
        }
        self.value = BoundValue::List(elements);
        Ok(())
    }

    /// Inserts or replaces one member of an `object` field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when the field is not an object or `member`
    /// was bound against a schema other than the matching property.
    pub fn set_member(&mut self, mut member: Self) -> Result<(), FieldError> {
        self.expect_type(FieldType::Object)?;
        let Some(position) =
            self.schema.properties().iter().position(|property| property.id == member.name())
        else {
            return Err(FieldError::UnknownMember {
                path: self.path.clone(),
                member: member.name().to_string(),
            });
        };
        if self.schema.properties()[position] != member.schema {
            return Err(FieldError::SchemaMismatch {
                path: self.path.clone(),
                field: member.name().to_string(),
            });
        }
        let member_path = format!("{}.{}", self.path, member.name());
        member.relocate(member_path);
        let schema = Arc::clone(&self.schema);
        if let BoundValue::Object(members) = &mut self.value {
            members.retain(|existing| existing.name() != member.name());
            members.push(member);
            members.sort_by_key(|existing| {
                schema.properties().iter().position(|property| property.id == existing.name())
            });
        }
        Ok(())
    }

    /// Returns false for `enum` fields whose value is not a declared choice.
    ///
    /// Such fields are left out when their container is serialized, so an
    /// empty selection is never sent to the server.
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        match (&self.schema.field_type, &self.value) {
            (FieldType::Enum, BoundValue::Text(value)) => self.schema.is_valid_choice(value),
            _ => true,
        }
    }

    /// Serializes the field value to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match &self.value {
            BoundValue::Text(text) => Value::String(text.clone()),
            BoundValue::Number(number) => Value::Number(number.clone()),
            BoundValue::Boolean(flag) => Value::Bool(*flag),
            BoundValue::List(elements) => Value::Array(
                elements.iter().filter(|element| element.is_serializable()).map(Self::to_json).collect(),
            ),
            BoundValue::Object(members) => Value::Object(
                members
                    .iter()
                    .filter(|member| member.is_serializable())
                    .map(|member| (member.name().to_string(), member.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// Walks this field and every nested element or member, depth first.
    #[must_use]
    pub fn iter(&self) -> FieldIter<'_> {
        FieldIter::new(vec![self])
    }

    /// Direct children of a composite field.
    fn children(&self) -> &[Self] {
        match &self.value {
            BoundValue::List(children) | BoundValue::Object(children) => children,
            _ => &[],
        }
    }

    /// Moves the field to `path`, rewriting the paths of nested fields.
    fn relocate(&mut self, path: String) {
        match &mut self.value {
            BoundValue::List(elements) => {
                for (index, element) in elements.iter_mut().enumerate() {
                    element.relocate(format!("{path}[{index}]"));
                }
            }
            BoundValue::Object(members) => {
                for member in members {
                    let member_path = format!("{path}.{}", member.name());
                    member.relocate(member_path);
                }
            }
            BoundValue::Text(_) | BoundValue::Number(_) | BoundValue::Boolean(_) => {}
        }
        self.path = path;
    }

    /// Fails unless the field has the expected type.
    fn expect_type(&self, expected: FieldType) -> Result<(), FieldError> {
        if self.schema.field_type == expected {
            Ok(())
        } else {
            Err(FieldError::WrongFieldType {
                path: self.path.clone(),
                expected,
                actual: self.schema.field_type,
            })
        }
    }

    /// Element schema of a `list` field.
    fn items_schema(&self) -> Result<&Arc<FieldSchema>, FieldError> {
        self.schema.items().ok_or_else(|| FieldError::MissingItemSchema(self.path.clone()))
    }
}

impl<'a> IntoIterator for &'a BoundField {
    type Item = &'a BoundField;
    type IntoIter = FieldIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// SECTION: Iteration
// ============================================================================

/// Depth-first, pre-order iterator over bound fields.
#[derive(Debug, Clone)]
pub struct FieldIter<'a> {
    /// Fields still to visit, next on top.
    stack: Vec<&'a BoundField>,
}

impl<'a> FieldIter<'a> {
    /// Creates an iterator visiting `roots` in order.
    pub(crate) fn new(mut roots: Vec<&'a BoundField>) -> Self {
        roots.reverse();
        Self {
            stack: roots,
        }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a BoundField;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.stack.pop()?;
        self.stack.extend(field.children().iter().rev());
        Some(field)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation failure of a single field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The value does not satisfy the field type.
    #[error("'{path}' expects {expected} (got {received})")]
    Invalid {
        /// Location of the field.
        path: String,
        /// Description of the accepted shape.
        expected: String,
        /// Offending raw value.
        received: Value,
    },
    /// A strict object value lacks a declared member.
    #[error("'{path}' is missing object member '{member}'")]
    MissingMember {
        /// Location of the object.
        path: String,
        /// Missing member id.
        member: String,
    },
    /// A strict object value carries an undeclared member.
    #[error("'{path}' has unknown object member '{member}'")]
    UnknownMember {
        /// Location of the object.
        path: String,
        /// Undeclared member id.
        member: String,
    },
    /// List elements have more than one type.
    #[error("'{path}' list elements must share one type (found {})", join_types(.types))]
    HeterogeneousList {
        /// Location of the list.
        path: String,
        /// Distinct element types, in first-seen order.
        types: Vec<FieldType>,
    },
    /// A bound element was validated against a different schema.
    #[error("'{path}' cannot hold '{field}': it was bound against a different schema")]
    SchemaMismatch {
        /// Location of the container.
        path: String,
        /// Id of the rejected element.
        field: String,
    },
    /// A list or object operation was applied to another field type.
    #[error("'{path}' is a {actual} field, not a {expected} field")]
    WrongFieldType {
        /// Location of the field.
        path: String,
        /// Type the operation requires.
        expected: FieldType,
        /// Actual type of the field.
        actual: FieldType,
    },
    /// A list schema has no element schema.
    #[error("'{0}' has no list items schema")]
    MissingItemSchema(String),
    /// A record key has no schema field (strict mode).
    #[error("'{0}' is not a field of the design")]
    UnknownField(String),
}

impl FieldError {
    /// Location of the failing field.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Invalid {
                path, ..
            }
            | Self::MissingMember {
                path, ..
            }
            | Self::UnknownMember {
                path, ..
            }
            | Self::HeterogeneousList {
                path, ..
            }
            | Self::SchemaMismatch {
                path, ..
            }
            | Self::WrongFieldType {
                path, ..
            } => path,
            Self::MissingItemSchema(path) | Self::UnknownField(path) => path,
        }
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates `raw` against `schema`, binding nested values recursively.
fn bind_value(
    schema: &FieldSchema,
    raw: &Value,
    mode: BindMode,
    path: &str,
) -> Result<BoundValue, FieldError> {
    match schema.field_type {
        FieldType::Cvss | FieldType::String | FieldType::Markdown | FieldType::Combobox => {
            match raw {
                Value::String(text) => Ok(BoundValue::Text(text.clone())),
                _ => Err(invalid(path, "a string", raw)),
            }
        }
        FieldType::Date => match raw {
            Value::String(text) if is_calendar_date(text) => Ok(BoundValue::Text(text.clone())),
            _ => Err(invalid(path, "a date formatted as YYYY-MM-DD", raw)),
        },
        FieldType::Enum => match raw {
            Value::String(text) if text.is_empty() || schema.is_valid_choice(text) => {
                Ok(BoundValue::Text(text.clone()))
            }
            _ => {
                let choices = schema.choice_values().collect::<Vec<_>>().join(", ");
                Err(invalid(path, &format!("one of [{choices}] or an empty string"), raw))
            }
        },
        FieldType::User => match raw {
            Value::String(text) if is_uuid_v4(text) => Ok(BoundValue::Text(text.clone())),
            _ => Err(invalid(path, "a version 4 UUID", raw)),
        },
        FieldType::Boolean => match raw {
            Value::Bool(flag) => Ok(BoundValue::Boolean(*flag)),
            _ => Err(invalid(path, "a boolean", raw)),
        },
        FieldType::Number => match raw {
            Value::Number(number) => Ok(BoundValue::Number(number.clone())),
            _ => Err(invalid(path, "a number", raw)),
        },
        FieldType::List => bind_list(schema, raw, mode, path),
        FieldType::Object => bind_object(schema, raw, mode, path),
    }
}

/// Binds every element of a list against the shared `items` schema.
fn bind_list(
    schema: &FieldSchema,
    raw: &Value,
    mode: BindMode,
    path: &str,
) -> Result<BoundValue, FieldError> {
    let Value::Array(elements) = raw else {
        return Err(invalid(path, "a list", raw));
    };
    let items = schema.items().ok_or_else(|| FieldError::MissingItemSchema(path.to_string()))?;
    let bound = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            BoundField::bind_at(Arc::clone(items), element, mode, format!("{path}[{index}]"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    ensure_homogeneous(path, &bound)?;
    Ok(BoundValue::List(bound))
}

/// Binds every present member of an object against its property schema.
fn bind_object(
    schema: &FieldSchema,
    raw: &Value,
    mode: BindMode,
    path: &str,
) -> Result<BoundValue, FieldError> {
    let Value::Object(members) = raw else {
        return Err(invalid(path, "an object", raw));
    };
    let mut bound = Vec::with_capacity(schema.properties().len());
    for property in schema.properties() {
        match members.get(&property.id) {
            Some(member) => bound.push(BoundField::bind_at(
                Arc::clone(property),
                member,
                mode,
                format!("{path}.{}", property.id),
            )?),
            None if mode.is_strict() => {
                return Err(FieldError::MissingMember {
                    path: path.to_string(),
                    member: property.id.clone(),
                });
            }
            None => {}
        }
    }
    if mode.is_strict()
        && let Some(extra) = members.keys().find(|key| schema.property(key).is_none())
    {
        return Err(FieldError::UnknownMember {
            path: path.to_string(),
            member: extra.clone(),
        });
    }
    Ok(BoundValue::Object(bound))
}

/// Rejects lists whose elements carry more than one type tag.
fn ensure_homogeneous(path: &str, elements: &[BoundField]) -> Result<(), FieldError> {
    let mut types: Vec<FieldType> = Vec::new();
    for element in elements {
        if !types.contains(&element.field_type()) {
            types.push(element.field_type());
        }
    }
    if types.len() > 1 {
        return Err(FieldError::HeterogeneousList {
            path: path.to_string(),
            types,
        });
    }
    Ok(())
}

/// Returns true for an unsigned `YYYY-MM-DD` date with a year from 1 to 9999.
fn is_calendar_date(text: &str) -> bool {
    text.len() == 10
        && text.as_bytes()[..4].iter().all(u8::is_ascii_digit)
        && Date::parse(text, DATE_FORMAT).is_ok_and(|date| date.year() > 0)
}

/// Returns true when `text` is a version 4 UUID.
fn is_uuid_v4(text: &str) -> bool {
    Uuid::parse_str(text).is_ok_and(|id| id.get_version() == Some(Version::Random))
}

/// Builds an [`FieldError::Invalid`] for `raw`.
fn invalid(path: &str, expected: &str, raw: &Value) -> FieldError {
    FieldError::Invalid {
        path: path.to_string(),
        expected: expected.to_string(),
        received: raw.clone(),
    }
}

/// Renders type tags as a comma-separated list.
fn join_types(types: &[FieldType]) -> String {
    types.iter().map(|field_type| field_type.as_str()).collect::<Vec<_>>().join(", ")
}
