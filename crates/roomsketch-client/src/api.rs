//! Wire types for the design backend.

use serde::{Deserialize, Serialize};

/// Room categories accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    #[default]
    LivingRoom,
    Bedroom,
    Kitchen,
    Office,
}

impl RoomType {
    /// Parses the wire spelling, e.g. `living_room`.
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "living_room" => Some(Self::LivingRoom),
            "bedroom" => Some(Self::Bedroom),
            "kitchen" => Some(Self::Kitchen),
            "office" => Some(Self::Office),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl RoomSize {
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// User-supplied parameters for one submission. The pipeline fills in the
/// control-image URL after the upload succeeds.
#[derive(Debug, Clone, Default)]
pub struct DesignParams {
    pub prompt: String,
    pub room_type: RoomType,
    pub room_size: RoomSize,
    pub style_preferences: Vec<String>,
    pub budget_max: Option<f64>,
}

impl DesignParams {
    pub fn into_request(self, control_image_url: Option<String>) -> DesignRequest {
        DesignRequest {
            prompt: self.prompt,
            room_type: self.room_type,
            room_size: self.room_size,
            style_preferences: self.style_preferences,
            budget_max: self.budget_max,
            control_image_url,
        }
    }
}

/// Body of `POST /agent/design/multi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRequest {
    pub prompt: String,
    pub room_type: RoomType,
    pub room_size: RoomSize,
    pub style_preferences: Vec<String>,
    pub budget_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_image_url: Option<String>,
}

/// Response of `POST /upload-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

/// The structured design result. Opaque here: presentation layers interpret
/// it, this crate only carries it through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignResult(pub serde_json::Value);

/// An exported sketch ready for upload.
#[derive(Debug, Clone)]
pub struct SketchImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl SketchImage {
    pub const MIME: &'static str = "image/png";

    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "sketch.png".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn design_request_uses_wire_spellings() {
        let request = DesignParams {
            prompt: "cozy reading corner".to_string(),
            room_type: RoomType::LivingRoom,
            room_size: RoomSize::Large,
            style_preferences: vec!["scandinavian".to_string()],
            budget_max: Some(2500.0),
        }
        .into_request(Some("https://img.example/abc.png".to_string()));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "prompt": "cozy reading corner",
                "room_type": "living_room",
                "room_size": "large",
                "style_preferences": ["scandinavian"],
                "budget_max": 2500.0,
                "control_image_url": "https://img.example/abc.png",
            })
        );
    }

    #[test]
    fn missing_control_image_is_omitted_but_budget_is_nullable() {
        let request = DesignParams::default().into_request(None);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("control_image_url").is_none());
        assert_eq!(value["budget_max"], serde_json::Value::Null);
    }

    #[test]
    fn room_enums_parse_their_wire_names() {
        assert_eq!(RoomType::from_arg("kitchen"), Some(RoomType::Kitchen));
        assert_eq!(RoomType::from_arg("garage"), None);
        assert_eq!(RoomSize::from_arg("small"), Some(RoomSize::Small));
        assert_eq!(RoomSize::from_arg("huge"), None);
    }
}
