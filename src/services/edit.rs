use crate::domain::{Board, Card, CardMeta, CardPatch, CardSpec};

/// Inline edit controller. At most one card is editable at a time; a freshly
/// added card enters as a draft (`meta.temp`) with its edit session already
/// open, and an abandoned draft is deleted rather than left behind empty.
#[derive(Debug, Default)]
pub struct EditSession {
    editing: Option<String>,
}

impl EditSession {
    pub fn new() -> EditSession {
        EditSession::default()
    }

    pub fn editing_card(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_editing(&self, card_id: &str) -> bool {
        self.editing.as_deref() == Some(card_id)
    }

    /// Create a draft card at the front of `column_id` and open its edit
    /// session. Returns the new snapshot and the draft's id, or `None` when
    /// the column does not exist.
    pub fn add_card(&mut self, board: &Board, column_id: &str) -> Option<(Board, String)> {
        if !board.has_column(column_id) {
            return None;
        }

        let card = Card::new(CardSpec {
            meta: CardMeta { temp: true, ..CardMeta::default() },
            ..CardSpec::default()
        });
        let card_id = card.id.clone();
        let next = board.insert_card_front(column_id, card);

        tracing::debug!(card_id = %card_id, column_id, "draft card created, edit opened");
        self.editing = Some(card_id.clone());
        Some((next, card_id))
    }

    pub fn start(&mut self, card_id: &str) {
        tracing::debug!(card_id, "inline edit started");
        self.editing = Some(card_id.to_string());
    }

    /// Close the edit session without saving. A draft is deleted outright;
    /// returns the new snapshot when a deletion happened.
    pub fn cancel(&mut self, board: &Board, card_id: &str, was_draft: bool) -> Option<Board> {
        tracing::debug!(card_id, was_draft, "inline edit cancelled");
        self.editing = None;
        if was_draft {
            Some(board.delete_card(card_id))
        } else {
            None
        }
    }

    /// Apply the edit. The trimmed title is required: an empty title refuses
    /// the save (no mutation, session stays open). On success the draft flag
    /// is cleared unconditionally and the session closes.
    pub fn save(&mut self, board: &Board, card_id: &str, patch: CardPatch) -> Option<Board> {
        let title = patch.title.as_deref().unwrap_or("").trim().to_string();
        if title.is_empty() {
            tracing::debug!(card_id, "save refused: empty title");
            return None;
        }

        let found = board.find_card(card_id)?;
        let mut meta = patch.meta.unwrap_or_else(|| found.card.meta.clone());
        meta.temp = false;

        let next = board.update_card(
            card_id,
            CardPatch {
                title: Some(title),
                description: patch.description.map(|d| d.trim().to_string()),
                meta: Some(meta),
            },
        );

        tracing::debug!(card_id, "inline edit saved");
        self.editing = None;
        Some(next)
    }

    /// Drop the edit target if it points at `card_id` (card deleted outside
    /// the edit flow).
    pub fn forget(&mut self, card_id: &str) {
        if self.is_editing(card_id) {
            self.editing = None;
        }
    }
}
