use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extension data attached to a card. Known provenance and analytics fields are
/// typed; anything else round-trips opaquely through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardMeta {
    /// Provisional card backing an open inline edit; deleted on edit-cancel.
    #[serde(default)]
    pub temp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tba_team_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_prov: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<TeamAnalytics>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardMeta {
    /// External provenance key used to deduplicate imported cards.
    pub fn provenance_key(&self) -> Option<&str> {
        self.tba_team_key.as_deref()
    }
}

/// Computed per-team statistics attached to imported cards for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalytics {
    pub rank: Option<i64>,
    pub record: Option<WltRecord>,
    pub matches_played: i64,
    pub avg_fuel: f64,
    pub avg_hang: f64,
    pub epa: Option<f64>,
    pub recent: Vec<RecentMatch>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WltRecord {
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    #[serde(default)]
    pub ties: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMatch {
    pub match_key: String,
    pub comp_level: String,
    pub match_number: i64,
    pub outcome: MatchOutcome,
    /// Score from this team's perspective, own alliance first ("72-61").
    pub score: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}
