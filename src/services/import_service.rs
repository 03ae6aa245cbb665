use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::domain::{Board, BoardError, Card, CardMeta, CardPatch, CardSpec, TeamAnalytics};

use super::analytics::event_analytics;
use super::statbotics::{epa_total, StatboticsClient};
use super::tba::{normalize_event_key, TbaClient, TeamSimple};

/// What a re-import does to the destination column: `Replace` discards its
/// sequence and reloads the fetched set, `Merge` prepends only net-new teams.
/// Other columns are untouched either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    #[default]
    Replace,
    Merge,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(ImportMode::Replace),
            "merge" => Ok(ImportMode::Merge),
            _ => Err(format!("invalid import mode: {}", s)),
        }
    }
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub board: Board,
    pub event_key: String,
    pub team_count: usize,
}

/// Deterministic id for an imported team card, so re-importing the same
/// event never duplicates.
pub fn import_card_id(event_key: &str, team_key: &str) -> String {
    format!("tba_{}_{}", event_key, team_key)
}

fn team_card(event_key: &str, team: &TeamSimple) -> Card {
    let nickname = team
        .nickname
        .clone()
        .or_else(|| team.name.clone())
        .filter(|n| !n.is_empty());
    Card::new(CardSpec {
        id: Some(import_card_id(event_key, &team.key)),
        title: format!("Team {}", team.team_number),
        description: String::new(),
        meta: CardMeta {
            source: Some("tba".into()),
            event_key: Some(event_key.into()),
            tba_team_key: Some(team.key.clone()),
            team_number: Some(team.team_number),
            nickname,
            city: team.city.clone(),
            state_prov: team.state_prov.clone(),
            country: team.country.clone(),
            ..CardMeta::default()
        },
    })
}

/// Pure merge of a fetched team roster into one column. Deduplicates by
/// provenance key: in `Replace` mode a team whose card already lives in
/// another column is not re-created (the user's sorting survives a reload),
/// in `Merge` mode only teams absent from the whole board are prepended.
pub fn merge_teams(
    board: &Board,
    column_id: &str,
    event_key: &str,
    teams: &[TeamSimple],
    mode: ImportMode,
) -> Board {
    if !board.has_column(column_id) || !board.cards_by_column.contains_key(column_id) {
        return board.clone();
    }

    let mut seen = HashSet::new();
    let fetched: Vec<Card> = teams
        .iter()
        .filter(|t| seen.insert(t.key.as_str()))
        .map(|t| team_card(event_key, t))
        .collect();

    let mut next = board.clone();
    match mode {
        ImportMode::Replace => {
            let elsewhere: HashSet<&str> = board
                .columns
                .iter()
                .filter(|col| col.id != column_id)
                .flat_map(|col| board.cards(&col.id))
                .filter_map(|card| card.meta.provenance_key())
                .collect();
            let fresh = fetched
                .into_iter()
                .filter(|card| {
                    card.meta
                        .provenance_key()
                        .map_or(true, |key| !elsewhere.contains(key))
                })
                .collect();
            *next.cards_by_column.get_mut(column_id).expect("destination column") = fresh;
        }
        ImportMode::Merge => {
            let existing: HashSet<&str> = board
                .columns
                .iter()
                .flat_map(|col| board.cards(&col.id))
                .filter_map(|card| card.meta.provenance_key())
                .collect();
            let mut merged: Vec<Card> = fetched
                .into_iter()
                .filter(|card| {
                    card.meta
                        .provenance_key()
                        .map_or(true, |key| !existing.contains(key))
                })
                .collect();
            let list = next.cards_by_column.get_mut(column_id).expect("destination column");
            merged.extend(list.drain(..));
            *list = merged;
        }
    }
    next
}

/// Fetch-and-merge pipeline: TBA roster into the destination column, with
/// optional analytics enrichment. Runs outside the mutation path and hands
/// back one complete snapshot; any fetch failure leaves the board unchanged.
pub struct ImportService {
    tba: TbaClient,
    statbotics: StatboticsClient,
    mode: ImportMode,
    with_analytics: bool,
}

impl ImportService {
    pub fn new(http: reqwest::Client, config: &Config) -> ImportService {
        ImportService {
            tba: TbaClient::new(http.clone(), &config.tba_base_url, &config.tba_auth_key),
            statbotics: StatboticsClient::new(http, &config.statbotics_base_url),
            mode: config.import_mode,
            with_analytics: config.import_analytics,
        }
    }

    pub async fn import_event(
        &self,
        board: &Board,
        column_id: &str,
        raw_code: &str,
    ) -> Result<ImportOutcome, BoardError> {
        let event_key = normalize_event_key(raw_code);
        if event_key.is_empty() {
            return Err(BoardError::Config("empty event code".into()));
        }

        tracing::info!(event_key = %event_key, mode = ?self.mode, "importing event teams");
        let teams = self.tba.event_teams_simple(&event_key).await?;
        let mut next = merge_teams(board, column_id, &event_key, &teams, self.mode);

        if self.with_analytics {
            match self.team_analytics(&event_key, &teams).await {
                Ok(by_team) => next = attach_analytics(next, &event_key, by_team),
                Err(err) => {
                    // Enrichment is optional; the roster import stands.
                    tracing::warn!(error = %err, "analytics enrichment failed");
                }
            }
        }

        tracing::info!(event_key = %event_key, teams = teams.len(), "event import complete");
        Ok(ImportOutcome {
            board: next,
            event_key,
            team_count: teams.len(),
        })
    }

    async fn team_analytics(
        &self,
        event_key: &str,
        teams: &[TeamSimple],
    ) -> Result<HashMap<String, TeamAnalytics>, BoardError> {
        let (matches, rankings) = tokio::join!(
            self.tba.event_matches(event_key),
            self.tba.event_rankings(event_key),
        );
        let mut by_team = event_analytics(teams, &matches?, &rankings?);

        let year = Utc::now().year();
        for team in teams {
            match self.statbotics.team_year(team.team_number, year).await {
                Ok(payload) => {
                    if let Some(stats) = by_team.get_mut(&team.key) {
                        stats.epa = epa_total(&payload);
                    }
                }
                Err(err) => {
                    tracing::warn!(team = team.team_number, error = %err, "Statbotics lookup failed");
                }
            }
        }
        Ok(by_team)
    }
}

fn attach_analytics(
    board: Board,
    event_key: &str,
    by_team: HashMap<String, TeamAnalytics>,
) -> Board {
    let mut next = board;
    for (team_key, stats) in by_team {
        let card_id = import_card_id(event_key, &team_key);
        let Some(found) = next.find_card(&card_id) else {
            continue;
        };
        let mut meta = found.card.meta.clone();
        meta.analytics = Some(stats);
        next = next.update_card(
            &card_id,
            CardPatch {
                meta: Some(meta),
                ..CardPatch::default()
            },
        );
    }
    next
}
