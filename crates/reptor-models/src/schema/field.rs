// crates/reptor-models/src/schema/field.rs
// ============================================================================
// Module: Field Schemas
// Description: One field definition of a project design, possibly nested.
// Purpose: Normalize server field definitions into a validated schema tree.
// Dependencies: crate::schema::field_type, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`FieldSchema`] describes one field of a project design: its type tag,
//! presentation metadata, and for composite types the nested schemas. Field
//! definitions arrive either keyed by field name (map form) or carrying their
//! own `id` (list form); both are normalized into ordered schema lists.
//!
//! Nested schemas are shared behind [`Arc`] so a cached design can back any
//! number of bound records without copying the tree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::field_type::FieldType;

// ============================================================================
// SECTION: Field Metadata
// ============================================================================

/// Provenance of a design field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    /// Field required by SysReptor itself.
    Core,
    /// Field shipped with SysReptor but optional.
    Predefined,
    /// Field added by the design author.
    #[default]
    Custom,
}

/// One selectable option of an `enum` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChoice {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Stored value.
    pub value: String,
}

impl FieldChoice {
    /// Creates a choice whose label equals its value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

// ============================================================================
// SECTION: Field Schema
// ============================================================================

/// Schema of a single design field.
///
/// # Invariants
/// - `items` is present if and only if `field_type` is [`FieldType::List`].
/// - `properties` is non-empty only when `field_type` is [`FieldType::Object`].
/// - Property ids are unique within one object.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Stable field identifier, unique within the enclosing schema list.
    pub id: String,
    /// Type tag.
    pub field_type: FieldType,
    /// Display label.
    pub label: String,
    /// Provenance tag.
    pub origin: FieldOrigin,
    /// Default value suggested by the design.
    pub default: Option<Value>,
    /// Advisory required flag; the binder never enforces it.
    pub required: bool,
    /// Whether the editor spellchecks the field.
    pub spellcheck: bool,
    /// Optional validation pattern shown by the editor.
    pub pattern: Option<String>,
    /// Optional help text.
    pub help_text: Option<String>,
    /// Suggested values for `combobox` fields.
    pub suggestions: Vec<String>,
    /// Valid choices for `enum` fields.
    pub choices: Vec<FieldChoice>,
    /// Element schema for `list` fields.
    items: Option<Arc<FieldSchema>>,
    /// Member schemas for `object` fields.
    properties: Vec<Arc<FieldSchema>>,
}

impl FieldSchema {
    /// Creates a leaf field schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingItems`] or [`SchemaError::MissingProperties`]
    /// for composite types; use [`FieldSchema::list`] or [`FieldSchema::object`].
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Result<Self, SchemaError> {
        let id = id.into();
        match field_type {
            FieldType::List => Err(SchemaError::MissingItems(id)),
            FieldType::Object => Err(SchemaError::MissingProperties(id)),
            _ => Ok(Self::bare(id, field_type)),
        }
    }

    /// Creates a `list` field schema with the given element schema.
    #[must_use]
    pub fn list(id: impl Into<String>, items: Self) -> Self {
        let mut schema = Self::bare(id.into(), FieldType::List);
        schema.items = Some(Arc::new(items));
        schema
    }

    /// Creates an `object` field schema with the given member schemas.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] when two members share an id.
    pub fn object(id: impl Into<String>, properties: Vec<Self>) -> Result<Self, SchemaError> {
        let mut schema = Self::bare(id.into(), FieldType::Object);
        schema.properties = properties.into_iter().map(Arc::new).collect();
        ensure_unique_ids(&schema.properties)?;
        Ok(schema)
    }

    /// Replaces the enum choices, returning the updated schema.
    #[must_use]
    pub fn with_choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = values.into_iter().map(FieldChoice::new).collect();
        self
    }

    /// Replaces the label, returning the updated schema.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds a field schema from its JSON definition.
    ///
    /// `key` is the map key the definition was stored under; when given it
    /// becomes the field id. Otherwise the id is read from `id`, then `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the definition is structurally invalid.
    pub fn from_json(key: Option<&str>, raw: &Value) -> Result<Self, SchemaError> {
        build_field(raw, key, None)
    }

    /// Read-only alias of the field id.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.id
    }

    /// Element schema of a `list` field.
    #[must_use]
    pub fn items(&self) -> Option<&Arc<Self>> {
        self.items.as_ref()
    }

    /// Member schemas of an `object` field, in design order.
    #[must_use]
    pub fn properties(&self) -> &[Arc<Self>] {
        &self.properties
    }

    /// Looks up an `object` member schema by id.
    #[must_use]
    pub fn property(&self, id: &str) -> Option<&Arc<Self>> {
        self.properties.iter().find(|property| property.id == id)
    }

    /// Iterates the stored values of the enum choices.
    pub fn choice_values(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|choice| choice.value.as_str())
    }

    /// Returns true when `value` is one of the declared choices.
    #[must_use]
    pub fn is_valid_choice(&self, value: &str) -> bool {
        self.choice_values().any(|choice| choice == value)
    }

    /// Creates a schema with every optional attribute unset.
    fn bare(id: String, field_type: FieldType) -> Self {
        Self {
            id,
            field_type,
            label: String::new(),
            origin: FieldOrigin::default(),
            default: None,
            required: false,
            spellcheck: false,
            pattern: None,
            help_text: None,
            suggestions: Vec::new(),
            choices: Vec::new(),
            items: None,
            properties: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural errors in design or field definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field definition is not a JSON object.
    #[error("field definition for '{0}' must be an object")]
    NotAnObject(String),
    /// A field definition carries no usable id.
    #[error("field definition has no id or name")]
    MissingId,
    /// A field definition has no type tag.
    #[error("field '{0}' has no type")]
    MissingType(String),
    /// A field definition has an unknown type tag.
    #[error("field '{field}' has unknown type '{field_type}'")]
    UnknownFieldType {
        /// Field identifier.
        field: String,
        /// Offending type tag.
        field_type: String,
    },
    /// A `list` field has no `items` definition.
    #[error("list field '{0}' has no items definition")]
    MissingItems(String),
    /// An `object` field has no `properties` definition.
    #[error("object field '{0}' has no properties definition")]
    MissingProperties(String),
    /// A known attribute has the wrong shape.
    #[error("field '{field}' has an invalid attribute: {reason}")]
    InvalidAttribute {
        /// Field identifier.
        field: String,
        /// Decoder message.
        reason: String,
    },
    /// Two fields in one schema list share an id.
    #[error("duplicate field id '{0}'")]
    DuplicateField(String),
    /// A field collection is neither a map nor a list.
    #[error("'{0}' must be a map or a list of field definitions")]
    InvalidCollection(String),
    /// The design is the overview variant without inline field definitions.
    #[error("'{0}' is a reference, not inline fields; request the full project design")]
    OverviewDesign(String),
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Known attributes of a field definition; unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawFieldSchema {
    /// Explicit id.
    id: Option<String>,
    /// Legacy id spelling.
    name: Option<String>,
    /// Type tag.
    #[serde(rename = "type")]
    field_type: Option<String>,
    /// Display label.
    label: Option<String>,
    /// Provenance tag.
    origin: Option<FieldOrigin>,
    /// Default value.
    default: Option<Value>,
    /// Advisory required flag.
    required: Option<bool>,
    /// Spellcheck flag.
    spellcheck: Option<bool>,
    /// Validation pattern.
    pattern: Option<String>,
    /// Help text.
    help_text: Option<String>,
    /// Combobox suggestions.
    suggestions: Option<Vec<String>>,
    /// Enum choices.
    choices: Option<Vec<FieldChoice>>,
    /// List element definition.
    items: Option<Value>,
    /// Object member definitions.
    properties: Option<Value>,
}

/// Builds one field; `forced_id` wins over the definition, `fallback_id` loses.
fn build_field(
    raw: &Value,
    forced_id: Option<&str>,
    fallback_id: Option<&str>,
) -> Result<FieldSchema, SchemaError> {
    let label = forced_id.or(fallback_id).unwrap_or_default().to_string();
    if !raw.is_object() {
        return Err(SchemaError::NotAnObject(label));
    }
    let decoded = RawFieldSchema::deserialize(raw).map_err(|err| {
        SchemaError::InvalidAttribute {
            field: label,
            reason: err.to_string(),
        }
    })?;

    let id = forced_id
        .map(ToString::to_string)
        .or(decoded.id)
        .or(decoded.name)
        .or_else(|| fallback_id.map(ToString::to_string))
        .ok_or(SchemaError::MissingId)?;
    let tag = decoded.field_type.ok_or_else(|| SchemaError::MissingType(id.clone()))?;
    let field_type = FieldType::parse(&tag).ok_or_else(|| SchemaError::UnknownFieldType {
        field: id.clone(),
        field_type: tag,
    })?;

    let mut schema = FieldSchema::bare(id, field_type);
    schema.label = decoded.label.unwrap_or_default();
    schema.origin = decoded.origin.unwrap_or_default();
    schema.default = decoded.default;
    schema.required = decoded.required.unwrap_or(false);
    schema.spellcheck = decoded.spellcheck.unwrap_or(false);
    schema.pattern = decoded.pattern;
    schema.help_text = decoded.help_text;
    schema.suggestions = decoded.suggestions.unwrap_or_default();
    schema.choices = decoded.choices.unwrap_or_default();

    match field_type {
        FieldType::List => {
            let items =
                decoded.items.ok_or_else(|| SchemaError::MissingItems(schema.id.clone()))?;
            schema.items = Some(Arc::new(build_field(&items, None, Some(&schema.id))?));
        }
        FieldType::Object => {
            let properties = decoded
                .properties
                .ok_or_else(|| SchemaError::MissingProperties(schema.id.clone()))?;
            schema.properties = fields_from_json(&schema.id, &properties)?;
        }
        _ => {}
    }
    Ok(schema)
}

/// Normalizes a map or list of field definitions into an ordered schema list.
///
/// # Errors
///
/// Returns [`SchemaError`] when the collection or any definition is invalid.
pub(crate) fn fields_from_json(
    collection: &str,
    raw: &Value,
) -> Result<Vec<Arc<FieldSchema>>, SchemaError> {
    let fields = match raw {
        Value::Object(map) => map
            .iter()
            .map(|(key, definition)| FieldSchema::from_json(Some(key), definition).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?,
        Value::Array(list) => list
            .iter()
            .map(|definition| FieldSchema::from_json(None, definition).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(SchemaError::InvalidCollection(collection.to_string())),
    };
    ensure_unique_ids(&fields)?;
    Ok(fields)
}

/// Ensures field ids are unique within one schema list.
pub(crate) fn ensure_unique_ids(fields: &[Arc<FieldSchema>]) -> Result<(), SchemaError> {
    for (index, field) in fields.iter().enumerate() {
        if fields.iter().skip(index + 1).any(|other| other.id == field.id) {
            return Err(SchemaError::DuplicateField(field.id.clone()));
        }
    }
    Ok(())
}
