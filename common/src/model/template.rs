use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named message template made of configurable fields.
///
/// Attributes the client does not interpret are kept in `extra` so that a
/// template sent back to the server carries everything it was loaded with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub template_fields: Vec<TemplateField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    pub fn field(&self, field_type: &str) -> Option<&TemplateField> {
        self.template_fields
            .iter()
            .find(|field| field.field_type == field_type)
    }
}

/// One configurable slot of a template. `field_type` is unique within its
/// template and keys the form value bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub default_value: FieldValue,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Value accepted for a template field: a string, a number or a list of
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl FieldValue {
    /// Rendering used by the text inputs of the dashboard. Lists are joined
    /// with commas.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// Parses user input back into the same kind as `self`, so a numeric
    /// field stays numeric and a list field stays a list.
    pub fn with_input(&self, input: &str) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(input.to_string()),
            FieldValue::Number(_) => match input.trim().parse::<serde_json::Number>() {
                Ok(number) => FieldValue::Number(number),
                Err(_) => FieldValue::Text(input.to_string()),
            },
            FieldValue::List(_) => FieldValue::List(
                input
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}
