use crate::domain::Board;

use super::edit::EditSession;

/// Gesture-boundary events. `Over` and `End` carry the hovered element's id,
/// which may name another card or a column itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { card_id: String },
    Over { over_id: String },
    End { over_id: Option<String> },
    Cancel,
}

/// Drag state machine: `Idle -> Dragging(card) -> Idle`, one active drag at
/// most. Cross-column moves are applied eagerly on `Over` so that a drop that
/// reports no target (scroll/overflow edge cases) cannot lose the gesture;
/// `End` handles same-column reordering and acts as an idempotent safety net
/// for the cross-column case.
#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<String>,
}

impl DragSession {
    pub fn new() -> DragSession {
        DragSession::default()
    }

    pub fn active_card(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Process one event against the current snapshot. Returns the new
    /// snapshot when the event caused a mutation. Events must be fed in
    /// arrival order: each `Over` depends on the board the previous one left.
    pub fn handle(
        &mut self,
        board: &Board,
        edit: &EditSession,
        event: DragEvent,
    ) -> Option<Board> {
        match event {
            DragEvent::Start { card_id } => {
                self.start(board, edit, &card_id);
                None
            }
            DragEvent::Over { over_id } => self.over(board, &over_id),
            DragEvent::End { over_id } => self.end(board, over_id.as_deref()),
            DragEvent::Cancel => {
                self.cancel();
                None
            }
        }
    }

    fn start(&mut self, board: &Board, edit: &EditSession, card_id: &str) {
        if self.active.is_some() {
            tracing::debug!(card_id, "drag start ignored: drag already active");
            return;
        }
        if edit.is_editing(card_id) {
            tracing::debug!(card_id, "drag start refused: card under inline edit");
            return;
        }
        if board.find_card(card_id).is_none() {
            tracing::debug!(card_id, "drag start refused: unknown card");
            return;
        }
        tracing::debug!(card_id, "drag started");
        self.active = Some(card_id.to_string());
    }

    fn over(&mut self, board: &Board, over_id: &str) -> Option<Board> {
        let card_id = self.active.clone()?;
        let from = resolve_column(board, &card_id)?;
        let to = resolve_column(board, over_id)?;
        if from == to {
            // Same column: reordering is deferred to End to avoid index
            // churn while hovering.
            return None;
        }

        tracing::debug!(
            card_id = %card_id,
            from = %from,
            to = %to,
            over_id,
            "drag over crossed columns, moving eagerly"
        );
        Some(board.move_card_across_columns(&card_id, &from, &to, Some(over_id)))
    }

    fn end(&mut self, board: &Board, over_id: Option<&str>) -> Option<Board> {
        let card_id = self.active.take()?;
        let over_id = match over_id {
            Some(id) => id,
            None => {
                // The eager hover move already applied any cross-column
                // transfer; a targetless drop ends the gesture as-is.
                tracing::debug!(card_id = %card_id, "drag ended with no drop target");
                return None;
            }
        };

        let from = resolve_column(board, &card_id)?;
        let to = resolve_column(board, over_id)?;

        if from == to {
            let cards = board.cards(&from);
            let old_index = cards.iter().position(|c| c.id == card_id)?;
            let new_index = cards.iter().position(|c| c.id == over_id)?;
            tracing::debug!(
                card_id = %card_id,
                column_id = %from,
                old_index,
                new_index,
                "drag ended, reordering within column"
            );
            return Some(board.reorder_column(&from, old_index, new_index));
        }

        // Safety net: only reachable if the hover move was missed. The move
        // no-ops once the card has left `from`, so double application cannot
        // duplicate or drop it.
        tracing::debug!(card_id = %card_id, from = %from, to = %to, "drag ended cross-column");
        Some(board.move_card_across_columns(&card_id, &from, &to, Some(over_id)))
    }

    fn cancel(&mut self) {
        if let Some(card_id) = self.active.take() {
            tracing::debug!(card_id = %card_id, "drag cancelled");
        }
    }
}

/// A droppable id is either a column id or a card id, in which case the
/// owning column is used.
fn resolve_column(board: &Board, id: &str) -> Option<String> {
    if board.has_column(id) {
        return Some(id.to_string());
    }
    board.find_card(id).map(|loc| loc.column_id.to_string())
}
