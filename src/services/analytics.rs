use std::collections::HashMap;

use serde_json::Value;

use crate::domain::{MatchOutcome, RecentMatch, TeamAnalytics};

use super::tba::{EventRankings, RankingRow, TbaMatch, TeamSimple};

const RECENT_MATCH_LIMIT: usize = 5;

/// Per-team aggregates over one event's matches and rankings, keyed by TBA
/// team key. EPA is filled in separately by the import service.
pub fn event_analytics(
    teams: &[TeamSimple],
    matches: &[TbaMatch],
    rankings: &EventRankings,
) -> HashMap<String, TeamAnalytics> {
    let rank_rows: HashMap<&str, &RankingRow> = rankings
        .rankings
        .iter()
        .map(|row| (row.team_key.as_str(), row))
        .collect();

    // Only matches that were actually played and carry a breakdown.
    let played: Vec<&TbaMatch> = matches
        .iter()
        .filter(|m| m.actual_time.is_some() && m.score_breakdown.is_some())
        .collect();

    let mut out = HashMap::new();
    for team in teams {
        let mut fuel_sum = 0.0;
        let mut hang_sum = 0.0;
        let mut played_count = 0i64;
        let mut recent = Vec::new();

        for m in &played {
            let Some(result) = match_result_for_team(m, &team.key) else {
                continue;
            };

            let breakdown = m
                .score_breakdown
                .as_ref()
                .and_then(|b| b.get(result.my_color));
            fuel_sum += extract_fuel(breakdown);
            hang_sum += extract_hang_points(breakdown);
            played_count += 1;

            let (my_score, their_score) = if result.my_color == "red" {
                (result.red_score, result.blue_score)
            } else {
                (result.blue_score, result.red_score)
            };
            recent.push(RecentMatch {
                match_key: m.key.clone(),
                comp_level: m.comp_level.clone(),
                match_number: m.match_number,
                outcome: result.outcome,
                score: format!("{}-{}", my_score, their_score),
            });
        }

        recent.sort_by(|a, b| b.match_number.cmp(&a.match_number));
        recent.truncate(RECENT_MATCH_LIMIT);

        let row = rank_rows.get(team.key.as_str());
        out.insert(
            team.key.clone(),
            TeamAnalytics {
                rank: row.map(|r| r.rank),
                record: row.and_then(|r| r.record),
                matches_played: row.map(|r| r.matches_played).unwrap_or(played_count),
                avg_fuel: if played_count > 0 { fuel_sum / played_count as f64 } else { 0.0 },
                avg_hang: if played_count > 0 { hang_sum / played_count as f64 } else { 0.0 },
                epa: None,
                recent,
            },
        );
    }
    out
}

struct TeamMatchResult {
    outcome: MatchOutcome,
    my_color: &'static str,
    red_score: i64,
    blue_score: i64,
}

fn match_result_for_team(m: &TbaMatch, team_key: &str) -> Option<TeamMatchResult> {
    let is_red = m.alliances.red.team_keys.iter().any(|k| k == team_key);
    let is_blue = m.alliances.blue.team_keys.iter().any(|k| k == team_key);
    if !is_red && !is_blue {
        return None;
    }

    let red_score = m.alliances.red.score?;
    let blue_score = m.alliances.blue.score?;
    let my_color = if is_red { "red" } else { "blue" };

    let outcome = if red_score == blue_score {
        MatchOutcome::Tie
    } else if (red_score > blue_score) == is_red {
        MatchOutcome::Win
    } else {
        MatchOutcome::Loss
    };

    Some(TeamMatchResult { outcome, my_color, red_score, blue_score })
}

// The exact breakdown keys are game-specific; probe the likely names and
// take the first non-zero hit.
fn extract_fuel(breakdown: Option<&Value>) -> f64 {
    probe_keys(breakdown, &["fuel", "autoFuel", "teleopFuel", "totalFuel"])
}

fn extract_hang_points(breakdown: Option<&Value>) -> f64 {
    probe_keys(
        breakdown,
        &["hangPoints", "endgameHangPoints", "endgamePoints"],
    )
}

fn probe_keys(breakdown: Option<&Value>, keys: &[&str]) -> f64 {
    let Some(breakdown) = breakdown else {
        return 0.0;
    };
    keys.iter()
        .filter_map(|key| breakdown.get(key).and_then(Value::as_f64))
        .find(|&v| v != 0.0)
        .unwrap_or(0.0)
}
