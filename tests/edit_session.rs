mod common;

use alliance_board::domain::{Board, CardPatch};
use alliance_board::services::EditSession;

use common::{board, owning_columns};

#[test]
fn add_card_creates_a_draft_that_enters_edit_mode() {
    let b = Board::seed();
    let mut edit = EditSession::new();

    let (next, card_id) = edit.add_card(&b, "unsorted").expect("column exists");

    let first = &next.cards("unsorted")[0];
    assert_eq!(first.id, card_id);
    assert!(first.meta.temp);
    assert_eq!(first.title, "");
    assert_eq!(edit.editing_card(), Some(card_id.as_str()));
    assert_eq!(owning_columns(&next, &card_id), 1);
}

#[test]
fn add_card_to_a_missing_column_is_refused() {
    let b = Board::seed();
    let mut edit = EditSession::new();

    assert!(edit.add_card(&b, "nope").is_none());
    assert_eq!(edit.editing_card(), None);
}

#[test]
fn cancelling_a_draft_deletes_it_everywhere() {
    let b = Board::seed();
    let mut edit = EditSession::new();
    let (b, card_id) = edit.add_card(&b, "unsorted").unwrap();

    let next = edit.cancel(&b, &card_id, true).expect("draft deletion mutates");

    assert_eq!(owning_columns(&next, &card_id), 0);
    assert!(next.find_card(&card_id).is_none());
    assert_eq!(edit.editing_card(), None);
}

#[test]
fn cancelling_a_saved_card_keeps_it() {
    let b = board(&[("a", &["x"])]);
    let mut edit = EditSession::new();
    edit.start("x");

    assert!(edit.cancel(&b, "x", false).is_none());
    assert_eq!(edit.editing_card(), None);
    assert!(b.find_card("x").is_some());
}

#[test]
fn save_refuses_an_empty_title_and_stays_open() {
    let b = Board::seed();
    let mut edit = EditSession::new();
    let (b, card_id) = edit.add_card(&b, "unsorted").unwrap();

    let refused = edit.save(
        &b,
        &card_id,
        CardPatch { title: Some("   ".into()), ..CardPatch::default() },
    );

    assert!(refused.is_none());
    assert_eq!(edit.editing_card(), Some(card_id.as_str()));
    assert!(b.find_card(&card_id).unwrap().card.meta.temp);
}

#[test]
fn save_trims_clears_the_draft_flag_and_closes_the_session() {
    let b = Board::seed();
    let mut edit = EditSession::new();
    let (b, card_id) = edit.add_card(&b, "unsorted").unwrap();

    let next = edit
        .save(
            &b,
            &card_id,
            CardPatch {
                title: Some("  Team 4270  ".into()),
                description: Some(" strong auto ".into()),
                ..CardPatch::default()
            },
        )
        .expect("valid save mutates");

    let saved = next.find_card(&card_id).unwrap().card;
    assert_eq!(saved.title, "Team 4270");
    assert_eq!(saved.description, "strong auto");
    assert!(!saved.meta.temp);
    assert!(saved.updated_at.is_some());
    assert_eq!(edit.editing_card(), None);
}

#[test]
fn save_on_a_vanished_card_is_refused() {
    let b = Board::seed();
    let mut edit = EditSession::new();
    edit.start("ghost");

    let refused = edit.save(
        &b,
        "ghost",
        CardPatch { title: Some("Title".into()), ..CardPatch::default() },
    );
    assert!(refused.is_none());
}

#[test]
fn starting_a_new_edit_replaces_the_target() {
    let mut edit = EditSession::new();
    edit.start("x");
    edit.start("y");
    assert_eq!(edit.editing_card(), Some("y"));
    assert!(!edit.is_editing("x"));
}
