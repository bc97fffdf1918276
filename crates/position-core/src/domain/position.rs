//! Position Entity
//!
//! A node of the organizational hierarchy (single parent).

use serde::{Deserialize, Serialize};

use super::error::{PositionError, PositionResult};

/// Longest accepted position name, in characters
pub const NAME_MAX_CHARS: usize = 150;

/// A position as stored by the remote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Unique identifier, assigned by the remote collection
    #[serde(deserialize_with = "wire::id")]
    pub id: u32,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default, deserialize_with = "wire::text")]
    pub description: String,
    /// Parent position ID (None = root level)
    #[serde(default, deserialize_with = "wire::parent_id")]
    pub parent_id: Option<u32>,
}

/// Create payload: a position without an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDraft {
    pub name: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub description: String,
    #[serde(default, deserialize_with = "wire::parent_id")]
    pub parent_id: Option<u32>,
}

impl Position {
    /// Create a root position with an empty description
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<u32>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if this is a root position (no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Editable fields of this position
    pub fn draft(&self) -> PositionDraft {
        PositionDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            parent_id: self.parent_id,
        }
    }

    /// This position with its editable fields replaced by `draft`, id kept
    pub fn merged(&self, draft: PositionDraft) -> Position {
        Position {
            id: self.id,
            name: draft.name,
            description: draft.description,
            parent_id: draft.parent_id,
        }
    }

    pub fn validate(&self) -> PositionResult<()> {
        validate_name(&self.name)
    }
}

impl PositionDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parent_id: Option<u32>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parent_id,
        }
    }

    pub fn validate(&self) -> PositionResult<()> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> PositionResult<()> {
    if name.trim().is_empty() {
        return Err(PositionError::ValidationFailed("Name is required".to_string()));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(PositionError::ValidationFailed(format!(
            "Name must be less than {} characters",
            NAME_MAX_CHARS
        )));
    }
    Ok(())
}

/// Lenient decoding for fields the collection may render as numbers or numeric strings
mod wire {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u32),
        Text(String),
    }

    fn parse<E: serde::de::Error>(text: &str) -> Result<u32, E> {
        text.trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid position id {:?}", text)))
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(n),
            RawId::Text(s) => parse(&s),
        }
    }

    pub fn parent_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Option::<RawId>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawId::Number(n)) => Ok(Some(n)),
            Some(RawId::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(RawId::Text(s)) => parse::<D::Error>(&s).map(Some),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let root = Position::new(1, "CEO");
        assert!(root.is_root());
        assert!(root.description.is_empty());

        let child = Position::new(2, "CTO").with_parent(Some(1));
        assert_eq!(child.parent_id, Some(1));
        assert!(!child.is_root());
    }

    #[test]
    fn test_decode_numeric_and_string_ids() {
        let json = r#"[
            {"id": 1, "name": "CEO", "description": "Chief", "parentId": null},
            {"id": "2", "name": "CTO", "parentId": "1"},
            {"id": 3, "name": "CFO", "description": null, "parentId": ""}
        ]"#;
        let positions: Vec<Position> = serde_json::from_str(json).unwrap();

        assert_eq!(positions[0], Position::new(1, "CEO").with_description("Chief"));
        assert_eq!(positions[1], Position::new(2, "CTO").with_parent(Some(1)));
        assert_eq!(positions[2], Position::new(3, "CFO"));
    }

    #[test]
    fn test_decode_rejects_garbage_id() {
        let result = serde_json::from_str::<Position>(r#"{"id": "abc", "name": "X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_uses_camel_case_and_null_parent() {
        let value = serde_json::to_value(PositionDraft::new("CEO", "", None)).unwrap();
        assert_eq!(value, serde_json::json!({"name": "CEO", "description": "", "parentId": null}));

        let value = serde_json::to_value(Position::new(7, "CTO").with_parent(Some(1))).unwrap();
        assert_eq!(value["parentId"], 1);
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_name_validation() {
        assert!(PositionDraft::new("CEO", "", None).validate().is_ok());

        let err = PositionDraft::new("   ", "", None).validate().unwrap_err();
        assert_eq!(err, PositionError::ValidationFailed("Name is required".to_string()));

        let long = "x".repeat(NAME_MAX_CHARS + 1);
        let err = PositionDraft::new(long, "", None).validate().unwrap_err();
        assert_eq!(
            err,
            PositionError::ValidationFailed("Name must be less than 150 characters".to_string())
        );

        // limit counts characters, not bytes
        assert!(PositionDraft::new("é".repeat(NAME_MAX_CHARS), "", None).validate().is_ok());
    }

    #[test]
    fn test_merged_keeps_id() {
        let original = Position::new(4, "Dev").with_parent(Some(2));
        let updated = original.merged(PositionDraft::new("Senior Dev", "Backend", Some(3)));
        assert_eq!(updated.id, 4);
        assert_eq!(updated.name, "Senior Dev");
        assert_eq!(updated.parent_id, Some(3));
    }
}
