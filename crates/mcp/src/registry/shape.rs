//! Declared tool input shapes.
//!
//! A shape is a flat list of named fields. It renders to the JSON schema
//! advertised in `tools/list` and validates incoming arguments against that
//! same schema, so the two can never drift apart.

use comicvine_engine::ComicsError;
use comicvine_util::validate_against_schema;
use serde_json::{Map, Value, json};

/// Largest page size the upstream accepts.
pub const MAX_LIMIT: i64 = 100;

/// Largest offset a page request can carry.
pub const MAX_OFFSET: i64 = u32::MAX as i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

/// One named argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: &'static str,
    pub required: bool,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl FieldSpec {
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            description,
            required: false,
            minimum: None,
            maximum: None,
        }
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            field_type: FieldType::Integer,
            ..Self::string(name, description)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn range(mut self, minimum: Option<i64>, maximum: Option<i64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    fn schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".into(), json!(self.field_type.as_str()));
        property.insert("description".into(), json!(self.description));
        if let Some(minimum) = self.minimum {
            property.insert("minimum".into(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            property.insert("maximum".into(), json!(maximum));
        }
        Value::Object(property)
    }
}

/// The full argument object of one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolInputShape {
    fields: Vec<FieldSpec>,
}

impl ToolInputShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// `field_list`, `limit` and `offset`, shared by every paged tool.
    pub fn paging(self) -> Self {
        self.field(FieldSpec::string(
            "field_list",
            "Comma separated list of fields to return, e.g. `id,name,image`. Defaults to a curated list.",
        ))
        .field(FieldSpec::integer("limit", "Number of results to return (1-100).").range(Some(1), Some(MAX_LIMIT)))
        .field(FieldSpec::integer("offset", "Number of results to skip.").range(Some(0), Some(MAX_OFFSET)))
    }

    /// JSON schema of the argument object.
    pub fn schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), field.schema()))
            .collect();
        let required: Vec<Value> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| json!(field.name))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema
    }

    /// Validates `arguments` for `tool`.
    ///
    /// Absent arguments count as an empty object. `null` on an optional field
    /// counts as absent and is removed. Undeclared keys are dropped.
    pub fn validate(&self, tool: &str, arguments: Option<Map<String, Value>>) -> Result<Map<String, Value>, ComicsError> {
        let mut arguments = arguments.unwrap_or_default();
        arguments.retain(|key, value| {
            self.fields
                .iter()
                .find(|field| field.name == key.as_str())
                .is_some_and(|field| field.required || !value.is_null())
        });

        let candidate = Value::Object(arguments);
        validate_against_schema(&candidate, &Value::Object(self.schema()))
            .map_err(|violations| ComicsError::validation(format!("{tool} arguments"), violations))?;

        match candidate {
            Value::Object(arguments) => Ok(arguments),
            _ => Ok(Map::new()),
        }
    }
}
