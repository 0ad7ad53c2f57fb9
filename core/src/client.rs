//! The Destiny 2 API client.
//!
//! # Design
//! `Destiny2Client` holds its configuration and a transport and nothing else;
//! every method takes `&self`. A call builds a fresh `HttpRequest` from an
//! [`Endpoint`], sends it once, and parses the whole body as JSON. The
//! upstream envelope (`ErrorCode`, `Response`, ...) is returned untouched, so
//! an upstream failure code still comes back as `Ok`.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, OAuthConfig, API_HOST, BASE_PATH};
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, API_KEY_HEADER, USER_AGENT_HEADER};
use crate::json::format_json;
use crate::query::QueryParams;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::MembershipType;

#[derive(Debug, Clone)]
pub struct Destiny2Client<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl Destiny2Client<ReqwestTransport> {
    /// Client talking to the live service over HTTPS.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Destiny2Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    pub fn user_agent(&self) -> &str {
        self.config.user_agent()
    }

    pub fn oauth(&self) -> Option<&OAuthConfig> {
        self.config.oauth.as_ref()
    }

    /// Build the request for `endpoint` without sending it.
    pub fn build_request(&self, endpoint: &Endpoint<'_>) -> HttpRequest {
        let mut path = format!("{BASE_PATH}{}", endpoint.path());
        if endpoint.escapes_spaces() {
            path = path.replace(' ', "%20");
        }
        path.push_str(&endpoint.query().to_query_string());

        HttpRequest {
            method: HttpMethod::Get,
            host: API_HOST.to_string(),
            path,
            headers: vec![
                (
                    USER_AGENT_HEADER.to_string(),
                    self.config.user_agent().to_string(),
                ),
                (
                    API_KEY_HEADER.to_string(),
                    self.api_key().unwrap_or_default().to_string(),
                ),
            ],
        }
    }

    /// Send `endpoint` and parse the response body as JSON.
    pub async fn request(&self, endpoint: Endpoint<'_>) -> Result<Value> {
        let request = self.build_request(&endpoint);
        debug!(endpoint = endpoint.name(), path = %request.path, "dispatching");

        let response = self.transport.send(&request).await?;
        let status = response.status;
        let content_type = response.header("content-type").map(str::to_string);
        format_json(response.body).await.map_err(|e| {
            warn!(
                endpoint = endpoint.name(),
                status,
                content_type = content_type.as_deref().unwrap_or("-"),
                error = %e,
                "bad response body"
            );
            e
        })
    }

    /// Locations of the static content databases.
    pub async fn get_manifest(&self) -> Result<Value> {
        self.request(Endpoint::Manifest).await
    }

    /// Static definition of one entity, e.g. `DestinyInventoryItemDefinition`.
    pub async fn get_destiny_entity_definition(&self, entity_type: &str, hash: u32) -> Result<Value> {
        self.request(Endpoint::EntityDefinition { entity_type, hash })
            .await
    }

    /// Memberships matching `display_name` on the given platform.
    pub async fn search_destiny_player(
        &self,
        membership_type: impl Into<MembershipType>,
        display_name: &str,
    ) -> Result<Value> {
        self.request(Endpoint::SearchPlayer {
            membership_type: membership_type.into(),
            display_name,
        })
        .await
    }

    pub async fn get_profile(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        components: &[u32],
    ) -> Result<Value> {
        self.request(Endpoint::Profile {
            membership_type: membership_type.into(),
            membership_id,
            components,
        })
        .await
    }

    pub async fn get_character(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
        components: &[u32],
    ) -> Result<Value> {
        self.request(Endpoint::Character {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
            components,
        })
        .await
    }

    pub async fn get_clan_weekly_reward_state(&self, group_id: &str) -> Result<Value> {
        self.request(Endpoint::ClanWeeklyRewardState { group_id })
            .await
    }

    /// One item instance in a character's inventory.
    pub async fn get_item(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        item_instance_id: &str,
        components: &[u32],
    ) -> Result<Value> {
        self.request(Endpoint::Item {
            membership_type: membership_type.into(),
            membership_id,
            item_instance_id,
            components,
        })
        .await
    }

    pub async fn get_vendors(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
        components: &[u32],
    ) -> Result<Value> {
        self.request(Endpoint::Vendors {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
            components,
        })
        .await
    }

    pub async fn get_vendor(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
        vendor_hash: u32,
    ) -> Result<Value> {
        self.request(Endpoint::Vendor {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
            vendor_hash,
        })
        .await
    }

    pub async fn get_post_game_carnage_report(&self, activity_id: &str) -> Result<Value> {
        self.request(Endpoint::PostGameCarnageReport { activity_id })
            .await
    }

    pub async fn get_historical_stats_definition(&self) -> Result<Value> {
        self.request(Endpoint::HistoricalStatsDefinition).await
    }

    pub async fn get_clan_leaderboards(&self, group_id: &str) -> Result<Value> {
        self.request(Endpoint::ClanLeaderboards { group_id }).await
    }

    /// `modes` are activity mode type codes; empty means all.
    pub async fn get_clan_aggregate_stats(&self, group_id: &str, modes: &[i32]) -> Result<Value> {
        self.request(Endpoint::ClanAggregateStats { group_id, modes })
            .await
    }

    /// Recognised params: `maxtop`, `modes`, `statid`.
    pub async fn get_leaderboards(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        params: &QueryParams,
    ) -> Result<Value> {
        self.request(Endpoint::Leaderboards {
            membership_type: membership_type.into(),
            membership_id,
            params,
        })
        .await
    }

    pub async fn get_leaderboards_for_character(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
        params: &QueryParams,
    ) -> Result<Value> {
        self.request(Endpoint::LeaderboardsForCharacter {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
            params,
        })
        .await
    }

    /// Paged item search. `page` starts at 0.
    pub async fn search_destiny_entities(
        &self,
        entity_type: &str,
        search_term: &str,
        page: &[u32],
    ) -> Result<Value> {
        self.request(Endpoint::SearchEntities {
            entity_type,
            search_term,
            page,
        })
        .await
    }

    /// Recognised params: `dayend`, `daystart`, `groups`, `modes`, `periodType`.
    pub async fn get_historical_stats(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
        params: &QueryParams,
    ) -> Result<Value> {
        self.request(Endpoint::HistoricalStats {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
            params,
        })
        .await
    }

    /// Stats across every character on one platform account.
    pub async fn get_historical_stats_for_account(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        groups: &[u32],
    ) -> Result<Value> {
        self.request(Endpoint::HistoricalStatsForAccount {
            membership_type: membership_type.into(),
            membership_id,
            groups,
        })
        .await
    }

    /// Recognised params: `count`, `mode`, `page`.
    pub async fn get_activity_history(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
        params: &QueryParams,
    ) -> Result<Value> {
        self.request(Endpoint::ActivityHistory {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
            params,
        })
        .await
    }

    pub async fn get_unique_weapon_history(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
    ) -> Result<Value> {
        self.request(Endpoint::UniqueWeaponHistory {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
        })
        .await
    }

    pub async fn get_destiny_aggregate_activity_stats(
        &self,
        membership_type: impl Into<MembershipType>,
        membership_id: &str,
        character_id: &str,
    ) -> Result<Value> {
        self.request(Endpoint::AggregateActivityStats {
            membership_type: membership_type.into(),
            membership_id,
            character_id,
        })
        .await
    }

    pub async fn get_public_milestone_content(&self, milestone_hash: u32) -> Result<Value> {
        self.request(Endpoint::PublicMilestoneContent { milestone_hash })
            .await
    }

    pub async fn get_public_milestones(&self) -> Result<Value> {
        self.request(Endpoint::PublicMilestones).await
    }
}
