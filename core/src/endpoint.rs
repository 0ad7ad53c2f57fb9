//! Path templates for every supported endpoint.
//!
//! # Design
//! Each variant carries exactly the arguments its path needs. `path()` is the
//! whole template table in one `match`; `query()` says which arguments go into
//! the query string. The client combines them in a single dispatch function,
//! so adding an endpoint is a new variant plus one row in each match.

use crate::query::QueryParams;
use crate::types::MembershipType;

/// One upstream GET endpoint with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Manifest,
    EntityDefinition {
        entity_type: &'a str,
        hash: u32,
    },
    SearchPlayer {
        membership_type: MembershipType,
        display_name: &'a str,
    },
    Profile {
        membership_type: MembershipType,
        membership_id: &'a str,
        components: &'a [u32],
    },
    Character {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
        components: &'a [u32],
    },
    ClanWeeklyRewardState {
        group_id: &'a str,
    },
    Item {
        membership_type: MembershipType,
        membership_id: &'a str,
        item_instance_id: &'a str,
        components: &'a [u32],
    },
    Vendors {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
        components: &'a [u32],
    },
    Vendor {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
        vendor_hash: u32,
    },
    PostGameCarnageReport {
        activity_id: &'a str,
    },
    HistoricalStatsDefinition,
    ClanLeaderboards {
        group_id: &'a str,
    },
    ClanAggregateStats {
        group_id: &'a str,
        modes: &'a [i32],
    },
    Leaderboards {
        membership_type: MembershipType,
        membership_id: &'a str,
        params: &'a QueryParams,
    },
    LeaderboardsForCharacter {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
        params: &'a QueryParams,
    },
    SearchEntities {
        entity_type: &'a str,
        search_term: &'a str,
        page: &'a [u32],
    },
    HistoricalStats {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
        params: &'a QueryParams,
    },
    HistoricalStatsForAccount {
        membership_type: MembershipType,
        membership_id: &'a str,
        groups: &'a [u32],
    },
    ActivityHistory {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
        params: &'a QueryParams,
    },
    UniqueWeaponHistory {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
    },
    AggregateActivityStats {
        membership_type: MembershipType,
        membership_id: &'a str,
        character_id: &'a str,
    },
    PublicMilestoneContent {
        milestone_hash: u32,
    },
    PublicMilestones,
}

impl Endpoint<'_> {
    /// Upstream operation name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Manifest => "Destiny2.GetDestinyManifest",
            Endpoint::EntityDefinition { .. } => "Destiny2.GetDestinyEntityDefinition",
            Endpoint::SearchPlayer { .. } => "Destiny2.SearchDestinyPlayer",
            Endpoint::Profile { .. } => "Destiny2.GetProfile",
            Endpoint::Character { .. } => "Destiny2.GetCharacter",
            Endpoint::ClanWeeklyRewardState { .. } => "Destiny2.GetClanWeeklyRewardState",
            Endpoint::Item { .. } => "Destiny2.GetItem",
            Endpoint::Vendors { .. } => "Destiny2.GetVendors",
            Endpoint::Vendor { .. } => "Destiny2.GetVendor",
            Endpoint::PostGameCarnageReport { .. } => "Destiny2.GetPostGameCarnageReport",
            Endpoint::HistoricalStatsDefinition => "Destiny2.GetHistoricalStatsDefinition",
            Endpoint::ClanLeaderboards { .. } => "Destiny2.GetClanLeaderboards",
            Endpoint::ClanAggregateStats { .. } => "Destiny2.GetClanAggregateStats",
            Endpoint::Leaderboards { .. } => "Destiny2.GetLeaderboards",
            Endpoint::LeaderboardsForCharacter { .. } => "Destiny2.GetLeaderboardsForCharacter",
            Endpoint::SearchEntities { .. } => "Destiny2.SearchDestinyEntities",
            Endpoint::HistoricalStats { .. } => "Destiny2.GetHistoricalStats",
            Endpoint::HistoricalStatsForAccount { .. } => "Destiny2.GetHistoricalStatsForAccount",
            Endpoint::ActivityHistory { .. } => "Destiny2.GetActivityHistory",
            Endpoint::UniqueWeaponHistory { .. } => "Destiny2.GetUniqueWeaponHistory",
            Endpoint::AggregateActivityStats { .. } => "Destiny2.GetDestinyAggregateActivityStats",
            Endpoint::PublicMilestoneContent { .. } => "Destiny2.GetPublicMilestoneContent",
            Endpoint::PublicMilestones => "Destiny2.GetPublicMilestones",
        }
    }

    /// Path relative to the API base path, without the query string.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Manifest => "/Manifest/".to_string(),
            Endpoint::EntityDefinition { entity_type, hash } => {
                format!("/Manifest/{entity_type}/{hash}/")
            }
            Endpoint::SearchPlayer {
                membership_type,
                display_name,
            } => format!("/SearchDestinyPlayer/{membership_type}/{display_name}/"),
            Endpoint::Profile {
                membership_type,
                membership_id,
                ..
            } => format!("/{membership_type}/Profile/{membership_id}/"),
            Endpoint::Character {
                membership_type,
                membership_id,
                character_id,
                ..
            } => format!("/{membership_type}/Profile/{membership_id}/character/{character_id}/"),
            Endpoint::ClanWeeklyRewardState { group_id } => {
                format!("/Clan/{group_id}/WeeklyRewardState/")
            }
            Endpoint::Item {
                membership_type,
                membership_id,
                item_instance_id,
                ..
            } => format!("/{membership_type}/Profile/{membership_id}/Item/{item_instance_id}/"),
            Endpoint::Vendors {
                membership_type,
                membership_id,
                character_id,
                ..
            } => format!(
                "/{membership_type}/Profile/{membership_id}/Character/{character_id}/Vendors/"
            ),
            Endpoint::Vendor {
                membership_type,
                membership_id,
                character_id,
                vendor_hash,
            } => format!(
                "/{membership_type}/Profile/{membership_id}/Character/{character_id}/Vendors/{vendor_hash}"
            ),
            Endpoint::PostGameCarnageReport { activity_id } => {
                format!("/Stats/PostGameCarnageReport/{activity_id}/")
            }
            Endpoint::HistoricalStatsDefinition => "/Stats/Definition/".to_string(),
            Endpoint::ClanLeaderboards { group_id } => {
                format!("/Stats/Leaderboards/Clans/{group_id}/")
            }
            Endpoint::ClanAggregateStats { group_id, .. } => {
                format!("/Stats/AggregateClanStats/{group_id}/")
            }
            Endpoint::Leaderboards {
                membership_type,
                membership_id,
                ..
            } => format!("/{membership_type}/Account/{membership_id}/Stats/Leaderboards/"),
            Endpoint::LeaderboardsForCharacter {
                membership_type,
                membership_id,
                character_id,
                ..
            } => format!("/Stats/Leaderboards/{membership_type}/{membership_id}/{character_id}/"),
            Endpoint::SearchEntities {
                entity_type,
                search_term,
                ..
            } => format!("/Armory/Search/{entity_type}/{search_term}/"),
            Endpoint::HistoricalStats {
                membership_type,
                membership_id,
                character_id,
                ..
            } => format!(
                "/{membership_type}/Account/{membership_id}/Character/{character_id}/Stats/"
            ),
            Endpoint::HistoricalStatsForAccount {
                membership_type,
                membership_id,
                ..
            } => format!("/{membership_type}/Account/{membership_id}/Stats/"),
            Endpoint::ActivityHistory {
                membership_type,
                membership_id,
                character_id,
                ..
            } => format!(
                "/{membership_type}/Account/{membership_id}/Character/{character_id}/Stats/Activities/"
            ),
            Endpoint::UniqueWeaponHistory {
                membership_type,
                membership_id,
                character_id,
            } => format!(
                "/{membership_type}/Account/{membership_id}/Character/{character_id}/Stats/UniqueWeapons/"
            ),
            Endpoint::AggregateActivityStats {
                membership_type,
                membership_id,
                character_id,
            } => format!(
                "/{membership_type}/Account/{membership_id}/Character/{character_id}/Stats/AggregateActivityStats/"
            ),
            Endpoint::PublicMilestoneContent { milestone_hash } => {
                format!("/Milestones/{milestone_hash}/Content/")
            }
            Endpoint::PublicMilestones => "/Milestones/".to_string(),
        }
    }

    /// Query parameters for this call; empty for endpoints that take none.
    pub fn query(&self) -> QueryParams {
        match self {
            Endpoint::Profile { components, .. }
            | Endpoint::Character { components, .. }
            | Endpoint::Item { components, .. }
            | Endpoint::Vendors { components, .. } => {
                QueryParams::new().with("components", components.iter())
            }
            Endpoint::ClanAggregateStats { modes, .. } => {
                QueryParams::new().with("modes", modes.iter())
            }
            Endpoint::SearchEntities { page, .. } => QueryParams::new().with("page", page.iter()),
            Endpoint::HistoricalStatsForAccount { groups, .. } => {
                QueryParams::new().with("groups", groups.iter())
            }
            Endpoint::Leaderboards { params, .. }
            | Endpoint::LeaderboardsForCharacter { params, .. }
            | Endpoint::HistoricalStats { params, .. }
            | Endpoint::ActivityHistory { params, .. } => (*params).clone(),
            _ => QueryParams::new(),
        }
    }

    /// Whether the path embeds free text whose spaces must become `%20`.
    pub fn escapes_spaces(&self) -> bool {
        matches!(
            self,
            Endpoint::SearchPlayer { .. } | Endpoint::SearchEntities { .. }
        )
    }
}
