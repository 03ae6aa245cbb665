#![allow(dead_code)]

use alliance_board::domain::{Board, Card, CardMeta, CardSpec, Column};
use alliance_board::services::tba::TeamSimple;

pub fn card(id: &str) -> Card {
    Card::new(CardSpec {
        id: Some(id.to_string()),
        title: id.to_uppercase(),
        description: String::new(),
        meta: CardMeta::default(),
    })
}

/// Board literal: `board(&[("a", &["x", "y"]), ("b", &[])])`.
pub fn board(columns: &[(&str, &[&str])]) -> Board {
    Board {
        columns: columns
            .iter()
            .map(|(id, _)| Column {
                id: id.to_string(),
                title: id.to_uppercase(),
            })
            .collect(),
        cards_by_column: columns
            .iter()
            .map(|(id, cards)| (id.to_string(), cards.iter().map(|c| card(c)).collect()))
            .collect(),
    }
}

pub fn team(key: &str, number: u32, nickname: &str) -> TeamSimple {
    TeamSimple {
        key: key.to_string(),
        team_number: number,
        nickname: Some(nickname.to_string()),
        name: None,
        city: Some("Honolulu".into()),
        state_prov: Some("HI".into()),
        country: Some("USA".into()),
    }
}

/// Number of columns whose sequence contains `card_id`.
pub fn owning_columns(board: &Board, card_id: &str) -> usize {
    board
        .columns
        .iter()
        .filter(|col| board.cards(&col.id).iter().any(|c| c.id == card_id))
        .count()
}
