use serde::{Deserialize, Serialize};

/// A named, typed content slot declared by a template.
///
/// Fields are owned by the template library; the matrix model reads them
/// when a template is selected and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicField {
    /// Unique within the owning template.
    pub id: String,
    /// Display label.
    pub name: String,
    pub field_type: FieldType,
    /// Affects completion reporting only; assignments are never rejected
    /// for missing a required field.
    pub required: bool,
    /// Free-text guidance shown to the content author.
    pub description: String,
}

/// Closed set of field content types. Adding a type is a compile-time
/// change: every match over `FieldType` is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Image,
    Video,
    Audio,
    Color,
    Link,
}

impl FieldType {
    /// Whether values for this field are asset references rather than
    /// inline strings.
    pub fn is_asset(self) -> bool {
        match self {
            FieldType::Image | FieldType::Video | FieldType::Audio => true,
            FieldType::Text | FieldType::Color | FieldType::Link => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Image => "image",
            FieldType::Video => "video",
            FieldType::Audio => "audio",
            FieldType::Color => "color",
            FieldType::Link => "link",
        }
    }

    pub fn parse(s: &str) -> Option<FieldType> {
        match s {
            "text" => Some(FieldType::Text),
            "image" => Some(FieldType::Image),
            "video" => Some(FieldType::Video),
            "audio" => Some(FieldType::Audio),
            "color" => Some(FieldType::Color),
            "link" => Some(FieldType::Link),
            _ => None,
        }
    }
}
