use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single string field from the submitted form, as it arrived on the wire.
///
/// - `Absent` → key missing or `null`
/// - `Text` → a JSON string, untouched
/// - `Mistyped` → any other JSON value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormField {
    #[default]
    Absent,
    Text(String),
    Mistyped,
}

impl FormField {
    /// Trimmed text, or `None` when the field is absent, mistyped or blank.
    pub fn trimmed(&self) -> Option<&str> {
        match self {
            FormField::Text(value) => Some(value.trim()).filter(|v| !v.is_empty()),
            _ => None,
        }
    }

    /// Text exactly as sent, or `None` when the field is absent, mistyped or
    /// the empty string. Whitespace is kept.
    pub fn raw(&self) -> Option<&str> {
        match self {
            FormField::Text(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_mistyped(&self) -> bool {
        matches!(self, FormField::Mistyped)
    }
}

impl From<&str> for FormField {
    fn from(value: &str) -> Self {
        FormField::Text(value.to_string())
    }
}

impl<'de> Deserialize<'de> for FormField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => FormField::Absent,
            Value::String(s) => FormField::Text(s),
            _ => FormField::Mistyped,
        })
    }
}

/// Only a literal JSON `true` marks a booking as urgent.
fn deserialize_urgent<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Raw booking form body. Nothing here has been validated.
#[derive(Debug, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: FormField,

    #[serde(default)]
    pub phone: FormField,

    #[serde(default)]
    pub service: FormField,

    #[serde(default)]
    pub email: FormField,

    #[serde(default)]
    pub date: FormField,

    #[serde(default)]
    pub message: FormField,

    #[serde(default, deserialize_with = "deserialize_urgent")]
    pub urgent: bool,
}

/// A booking that passed every field rule. Only the validator builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub email: Option<String>,
    pub date: Option<String>,
    pub message: Option<String>,
    pub urgent: bool,
}
