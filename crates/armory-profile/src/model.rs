//! Wire and normalized data types
//!
//! The `Deserialize` types mirror the subset of the Blizzard payloads this
//! layer extracts; everything else in the upstream documents is ignored.
//! The `Serialize` types are the normalized records handed to the roster
//! layer.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Opaque reference to another API resource
#[derive(Debug, Clone, Deserialize)]
pub struct KeyRef {
    pub href: String,
}

/// Reference wrapper around a media document
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    pub key: KeyRef,
}

/// Character profile document
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub realm: RealmRef,
    pub character_class: ClassRef,
    #[serde(default)]
    pub active_spec: Option<ActiveSpec>,
    pub level: u32,
    pub equipped_item_level: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealmRef {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassRef {
    pub id: u32,
}

/// The profile's active specialization, carrying the opaque href used to
/// resolve its role
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveSpec {
    pub name: String,
    pub key: KeyRef,
}

/// Asset list shared by character-media and media documents
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDocument {
    #[serde(default)]
    pub assets: Vec<MediaAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaAsset {
    pub key: String,
    pub value: String,
}

impl MediaDocument {
    /// URL of the asset with the given key, if present
    pub fn asset(&self, key: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.key == key)
            .map(|asset| asset.value.as_str())
    }
}

/// Playable-class document
#[derive(Debug, Clone, Deserialize)]
pub struct PlayableClass {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub media: Option<MediaRef>,
    #[serde(default)]
    pub specializations: Vec<IndexEntry>,
}

/// Specialization document
#[derive(Debug, Clone, Deserialize)]
pub struct Specialization {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub media: Option<MediaRef>,
}

/// Raw role token as the API reports it, e.g. `{"type": "HEALER"}`
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRef {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Playable-class index document
#[derive(Debug, Clone, Deserialize)]
pub struct ClassIndex {
    #[serde(default)]
    pub classes: Vec<IndexEntry>,
}

/// Named entry of an index document
#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    pub id: u32,
    pub name: String,
    pub key: KeyRef,
}

/// Normalized class description for roster display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMetadata {
    pub id: u32,
    pub name: String,
    /// Icon asset URL; empty when the class document has no media
    pub icon: String,
    /// Display color, `#FFFFFF` for names outside the palette
    pub color: String,
}

/// Normalized specialization description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecializationMetadata {
    pub name: String,
    /// Icon asset URL; empty when the specialization has no media
    pub icon: String,
    pub role: Role,
}

/// The merged per-character record handed to the roster layer.
///
/// Built fresh on every aggregate call; only its constituent sub-fetches
/// are cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSummary {
    pub name: String,
    pub realm_slug: String,
    pub class_name: String,
    pub class_color: String,
    pub class_icon: String,
    /// `None` when the profile exposes no active specialization
    pub spec_name: Option<String>,
    pub spec_icon: Option<String>,
    pub role: Role,
    pub level: u32,
    pub item_level: u32,
    /// `None` when the character-media document has no avatar asset; a real
    /// absence, distinct from a fetch failure
    pub avatar: Option<String>,
}
