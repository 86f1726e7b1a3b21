//! Registry entry types.

use hexcast_geometry::Pattern;
use hexcast_handlers::{SpecialHandlerInfo, SpecialValue};
use serde::{Deserialize, Serialize};

/// Metadata for one ordinary or per-world pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInfo {
    /// Namespaced identifier, e.g. `hexcasting:get_caster`.
    pub id: String,
    /// Short internal name, e.g. `get_caster`.
    pub name: String,
    /// Human-readable name, e.g. `Mind's Reflection`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Identified by drawn shape in any rotation rather than by strokes.
    #[serde(default)]
    pub is_per_world: bool,
    /// The defining drawing; for per-world patterns, any one drawing of the
    /// shape.
    pub pattern: Pattern,
}

impl PatternInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            translation: None,
            is_per_world: false,
            pattern,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    #[must_use]
    pub fn per_world(mut self) -> Self {
        self.is_per_world = true;
        self
    }

    /// The translation if there is one, otherwise the name.
    pub fn display_name(&self) -> &str {
        self.translation.as_deref().unwrap_or(&self.name)
    }
}

/// Anything the registry can hand back by id or name.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Pattern(&'a PatternInfo),
    Special(&'a SpecialHandlerInfo),
}

impl<'a> Entry<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Pattern(info) => &info.id,
            Self::Special(info) => &info.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Pattern(info) => &info.name,
            Self::Special(info) => &info.name,
        }
    }

    pub fn display_name(&self) -> &'a str {
        match self {
            Self::Pattern(info) => info.display_name(),
            Self::Special(info) => &info.display_name,
        }
    }
}

/// What a drawn pattern turned out to be.
#[derive(Debug, Clone)]
pub enum PatternMatch<'a> {
    Pattern(&'a PatternInfo),
    Special {
        info: &'a SpecialHandlerInfo,
        value: SpecialValue,
    },
    Unknown,
}

impl PatternMatch<'_> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// `Mind's Reflection`, `Numerical Reflection: 5`, or `None` when unknown.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Pattern(info) => Some(info.display_name().to_string()),
            Self::Special { info, value } => Some(info.label(value)),
            Self::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcast_geometry::Direction;

    #[test]
    fn display_name_falls_back_to_name() {
        let pattern = Pattern::from_static(Direction::East, "qaq");
        let bare = PatternInfo::new("mod:thing", "thing", pattern.clone());
        assert_eq!(bare.display_name(), "thing");
        let named = bare.with_translation("Thing's Reflection");
        assert_eq!(named.display_name(), "Thing's Reflection");
    }

    #[test]
    fn deserializes_metadata_record() {
        let json = r#"{
            "id": "mod:storm",
            "name": "storm",
            "translation": "Summon Storm",
            "is_per_world": true,
            "pattern": {"start": "EAST", "signature": "qaqwqaq"}
        }"#;
        let info: PatternInfo = serde_json::from_str(json).unwrap();
        assert!(info.is_per_world);
        assert_eq!(info.pattern, Pattern::from_static(Direction::East, "qaqwqaq"));

        let minimal = r#"{"id": "mod:x", "name": "x", "pattern": {"start": "WEST"}}"#;
        let info: PatternInfo = serde_json::from_str(minimal).unwrap();
        assert!(!info.is_per_world);
        assert_eq!(info.translation, None);
        assert_eq!(info.pattern.signature(), "");
    }

    #[test]
    fn rejects_bad_strokes_in_metadata() {
        let json = r#"{"id": "mod:x", "name": "x", "pattern": {"start": "EAST", "signature": "qxq"}}"#;
        assert!(serde_json::from_str::<PatternInfo>(json).is_err());
    }
}
