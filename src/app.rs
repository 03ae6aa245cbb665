use crate::domain::{Board, CardPatch};
use crate::infrastructure::DebouncedSaver;
use crate::services::{DragEvent, DragSession, EditSession};

/// Application facade: the authoritative board snapshot plus the two pieces
/// of session state (active drag, active inline edit) kept distinct from the
/// aggregate. Every committed mutation queues a debounced save.
pub struct BoardApp {
    board: Board,
    drag: DragSession,
    edit: EditSession,
    saver: Option<DebouncedSaver>,
}

impl BoardApp {
    pub fn new(board: Board) -> BoardApp {
        BoardApp {
            board,
            drag: DragSession::new(),
            edit: EditSession::new(),
            saver: None,
        }
    }

    pub fn with_saver(mut self, saver: DebouncedSaver) -> BoardApp {
        self.saver = Some(saver);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dragging_card(&self) -> Option<&str> {
        self.drag.active_card()
    }

    pub fn editing_card(&self) -> Option<&str> {
        self.edit.editing_card()
    }

    fn commit(&mut self, next: Board) {
        if let Some(saver) = &self.saver {
            saver.queue(&next);
        }
        self.board = next;
    }

    // ── Gestures ───────────────────────────────────────────────

    pub fn handle_drag(&mut self, event: DragEvent) {
        if let Some(next) = self.drag.handle(&self.board, &self.edit, event) {
            self.commit(next);
        }
    }

    // ── Cards ──────────────────────────────────────────────────

    /// Add a draft card to a column; it enters edit mode immediately.
    /// Returns the new card's id.
    pub fn add_card(&mut self, column_id: &str) -> Option<String> {
        let (next, card_id) = self.edit.add_card(&self.board, column_id)?;
        self.commit(next);
        Some(card_id)
    }

    pub fn start_edit(&mut self, card_id: &str) {
        self.edit.start(card_id);
    }

    pub fn cancel_edit(&mut self, card_id: &str, was_draft: bool) {
        if let Some(next) = self.edit.cancel(&self.board, card_id, was_draft) {
            self.commit(next);
        }
    }

    /// Returns false when the save was refused (empty title).
    pub fn save_edit(&mut self, card_id: &str, patch: CardPatch) -> bool {
        match self.edit.save(&self.board, card_id, patch) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    pub fn delete_card(&mut self, card_id: &str) {
        self.edit.forget(card_id);
        let next = self.board.delete_card(card_id);
        self.commit(next);
    }

    // ── Columns ────────────────────────────────────────────────

    pub fn add_column(&mut self, title: &str) {
        let next = self.board.add_column(title);
        self.commit(next);
    }

    pub fn rename_column(&mut self, column_id: &str, title: &str) {
        let next = self.board.rename_column(column_id, title);
        self.commit(next);
    }

    pub fn delete_column(&mut self, column_id: &str) {
        if let Some(editing) = self.edit.editing_card().map(str::to_string) {
            if self.board.cards(column_id).iter().any(|c| c.id == editing) {
                self.edit.forget(&editing);
            }
        }
        let next = self.board.delete_column(column_id);
        self.commit(next);
    }

    // ── Board-level ────────────────────────────────────────────

    pub fn reset(&mut self) {
        tracing::info!("resetting board to defaults");
        self.edit = EditSession::new();
        self.drag = DragSession::new();
        self.commit(Board::seed());
    }

    /// Install a complete snapshot produced outside the mutation path
    /// (import result).
    pub fn replace_board(&mut self, board: Board) {
        self.commit(board);
    }
}
