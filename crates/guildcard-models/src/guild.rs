use serde::{Deserialize, Serialize};

/// The slice of a guild that a card shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub banner_url: Option<String>,
    pub member_count: u64,
    /// Members whose presence is online, idle or do-not-disturb.
    pub online_member_count: u64,
}
