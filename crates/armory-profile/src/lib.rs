//! Normalized character data from the Blizzard API
//!
//! Built on top of `armory-client`, this crate encodes the concrete
//! endpoints and field mappings the roster application needs: character
//! profiles, avatars, playable classes with their display colors, and
//! specializations with their group roles. The headline operation is
//! [`ProfileClient::complete_character`], which fans out over those
//! endpoints and merges the results into one [`model::CharacterSummary`].

pub mod client;
pub mod colors;
pub mod model;
pub mod role;
pub mod spec_ids;

pub use armory_client::{ApiConfig, Error, Payload, Region, Result};
pub use client::ProfileClient;
pub use colors::class_color;
pub use model::{CharacterSummary, ClassMetadata, SpecializationMetadata};
pub use role::Role;
pub use spec_ids::spec_id_by_name;
