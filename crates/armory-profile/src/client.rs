//! Domain operations over the authenticated gateway

use std::sync::Arc;

use armory_cache::CacheStore;
use armory_client::{ApiConfig, HttpGateway, Payload, Result};
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::model::{
    CharacterProfile, CharacterSummary, ClassIndex, ClassMetadata, IndexEntry, MediaDocument,
    PlayableClass, Specialization, SpecializationMetadata,
};
use crate::{Role, class_color};

/// High-level client for the character and game-data endpoints.
///
/// Owns a secondary memo mapping specialization hrefs to roles: that
/// mapping is immutable within a game data version, so it lives for the
/// lifetime of the client and is reset on redeploy rather than by TTL.
pub struct ProfileClient {
    gateway: HttpGateway,
    spec_roles: DashMap<String, Role>,
}

impl ProfileClient {
    /// Wrap an existing gateway
    pub fn new(gateway: HttpGateway) -> Self {
        Self {
            gateway,
            spec_roles: DashMap::new(),
        }
    }

    /// Build a client from environment configuration and the given cache
    pub fn from_env(cache: Arc<dyn CacheStore>) -> Result<Self> {
        let config = ApiConfig::from_env()?;
        Ok(Self::new(HttpGateway::new(config, cache)?))
    }

    fn config(&self) -> &ApiConfig {
        self.gateway.config()
    }

    /// Live profile for a (realm, character name) pair. Path segments are
    /// lower-cased; the API rejects mixed-case slugs.
    pub async fn character_profile(&self, realm: &str, name: &str) -> Result<CharacterProfile> {
        let url = self.config().api_url(&format!(
            "/profile/wow/character/{}/{}",
            realm.to_lowercase(),
            name.to_lowercase()
        ));
        let namespace = self.config().namespace("profile");
        self.gateway
            .get(&url, &[("namespace", namespace.as_str())], Payload::Dynamic)
            .await
    }

    /// Avatar URL from the character-media document. `None` when the
    /// document carries no avatar asset; that is a valid state, not an
    /// error.
    pub async fn character_avatar(&self, realm: &str, name: &str) -> Result<Option<String>> {
        let url = self.config().api_url(&format!(
            "/profile/wow/character/{}/{}/character-media",
            realm.to_lowercase(),
            name.to_lowercase()
        ));
        let namespace = self.config().namespace("profile");
        let media: MediaDocument = self
            .gateway
            .get(&url, &[("namespace", namespace.as_str())], Payload::Dynamic)
            .await?;
        Ok(media.asset("avatar").map(str::to_string))
    }

    /// Playable-class document with its icon and display color resolved
    pub async fn class_metadata(&self, class_id: u32) -> Result<ClassMetadata> {
        let url = self
            .config()
            .api_url(&format!("/data/wow/playable-class/{class_id}"));
        let namespace = self.config().namespace("static");
        let class: PlayableClass = self
            .gateway
            .get(&url, &[("namespace", namespace.as_str())], Payload::Static)
            .await?;

        let icon = match class.media.as_ref() {
            Some(media) => self
                .media_asset(&media.key.href, "icon")
                .await?
                .unwrap_or_default(),
            None => String::new(),
        };

        Ok(ClassMetadata {
            id: class.id,
            color: class_color(&class.name).to_string(),
            name: class.name,
            icon,
        })
    }

    /// Specialization document at the opaque `spec_href`, with role and
    /// icon resolved. The resolved role is memoized for the lifetime of the
    /// client.
    pub async fn specialization_metadata(&self, spec_href: &str) -> Result<SpecializationMetadata> {
        let namespace = self.config().namespace("static");
        let spec: Specialization = self
            .gateway
            .get(spec_href, &[("namespace", namespace.as_str())], Payload::Static)
            .await?;

        let role = spec
            .role
            .as_ref()
            .map_or(Role::Unknown, |r| Role::from_api_token(&r.kind));
        self.spec_roles.insert(spec_href.to_string(), role);

        let icon = match spec.media.as_ref() {
            Some(media) => self
                .media_asset(&media.key.href, "icon")
                .await?
                .unwrap_or_default(),
            None => String::new(),
        };

        Ok(SpecializationMetadata {
            name: spec.name,
            icon,
            role,
        })
    }

    /// Role for the specialization at `spec_href`. Repeat lookups are
    /// answered from the memo without touching the response cache or the
    /// network.
    pub async fn spec_role(&self, spec_href: &str) -> Result<Role> {
        if let Some(role) = self.spec_roles.get(spec_href) {
            trace!(spec_href, "spec role memo hit");
            return Ok(*role);
        }
        Ok(self.specialization_metadata(spec_href).await?.role)
    }

    /// All playable classes from the class index
    pub async fn list_classes(&self) -> Result<Vec<IndexEntry>> {
        let url = self.config().api_url("/data/wow/playable-class/index");
        let namespace = self.config().namespace("static");
        let index: ClassIndex = self
            .gateway
            .get(&url, &[("namespace", namespace.as_str())], Payload::Static)
            .await?;
        Ok(index.classes)
    }

    /// Specializations belonging to a class, each with role and icon
    /// resolved. Sub-requests are reference data and hit the long-TTL cache
    /// after the first call.
    pub async fn class_specializations(
        &self,
        class_id: u32,
    ) -> Result<Vec<SpecializationMetadata>> {
        let url = self
            .config()
            .api_url(&format!("/data/wow/playable-class/{class_id}"));
        let namespace = self.config().namespace("static");
        let class: PlayableClass = self
            .gateway
            .get(&url, &[("namespace", namespace.as_str())], Payload::Static)
            .await?;

        let mut specs = Vec::with_capacity(class.specializations.len());
        for entry in &class.specializations {
            specs.push(self.specialization_metadata(&entry.key.href).await?);
        }
        Ok(specs)
    }

    /// Fan-out aggregate: profile and avatar are fetched concurrently, then
    /// class metadata, then specialization metadata when the profile
    /// carries an active spec.
    ///
    /// Any sub-fetch failure fails the whole call; this layer never
    /// substitutes defaults for data it could not fetch. Callers wanting
    /// graceful degradation must catch and fill in their own fallbacks.
    pub async fn complete_character(&self, realm: &str, name: &str) -> Result<CharacterSummary> {
        let (profile, avatar) = tokio::try_join!(
            self.character_profile(realm, name),
            self.character_avatar(realm, name),
        )?;

        let class = self.class_metadata(profile.character_class.id).await?;

        let spec = match profile.active_spec.as_ref() {
            Some(active) => Some(self.specialization_metadata(&active.key.href).await?),
            None => None,
        };

        debug!(
            name = %profile.name,
            realm = %profile.realm.slug,
            class = %class.name,
            "assembled character summary"
        );

        Ok(CharacterSummary {
            name: profile.name,
            realm_slug: profile.realm.slug,
            class_name: class.name,
            class_color: class.color,
            class_icon: class.icon,
            spec_name: spec.as_ref().map(|s| s.name.clone()),
            spec_icon: spec.as_ref().map(|s| s.icon.clone()),
            role: spec.as_ref().map_or(Role::Unknown, |s| s.role),
            level: profile.level,
            item_level: profile.equipped_item_level,
            avatar,
        })
    }

    async fn media_asset(&self, href: &str, key: &str) -> Result<Option<String>> {
        let namespace = self.config().namespace("static");
        let media: MediaDocument = self
            .gateway
            .get(href, &[("namespace", namespace.as_str())], Payload::Static)
            .await?;
        Ok(media.asset(key).map(str::to_string))
    }
}
