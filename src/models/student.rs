use serde::{Deserialize, Serialize};

/// Placeholder stored when a student signs up without a photo.
pub const PLACEHOLDER_PHOTO: &str = "https://placehold.co/400x400.png";

/// A student identity. The enrolled photo lives under its own key and is only
/// attached when needed, so it is never part of the serialized identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub enrolled_photo_data_uri: Option<String>,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enrolled_photo_data_uri: None,
        }
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.enrolled_photo_data_uri = Some(photo.into());
        self
    }
}
