use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::CardMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub meta: CardMeta,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for [`Card::new`]. An explicit `id` wins over generation.
#[derive(Debug, Clone, Default)]
pub struct CardSpec {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub meta: CardMeta,
}

/// Shallow patch: present fields replace the card's top-level fields
/// (`meta` is replaced wholesale when present).
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub meta: Option<CardMeta>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLocation<'a> {
    pub column_id: &'a str,
    pub index: usize,
    pub card: &'a Card,
}

impl Card {
    pub fn new(spec: CardSpec) -> Card {
        let id = spec
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| fresh_id("card"));
        Card {
            id,
            title: spec.title.trim().to_string(),
            description: spec.description.trim().to_string(),
            meta: spec.meta,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// The root aggregate: display-ordered columns plus each column's ranked card
/// sequence. Every transform takes `&self` and returns a new snapshot; an
/// operation whose target cannot be found returns the snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    pub cards_by_column: HashMap<String, Vec<Card>>,
}

impl Board {
    /// Fresh board with the five default columns and no cards.
    pub fn seed() -> Board {
        let columns = vec![
            Column { id: "unsorted".into(), title: "Unsorted".into() },
            Column { id: "first_pick".into(), title: "First Pick".into() },
            Column { id: "second_pick".into(), title: "Second Pick".into() },
            Column { id: "third_pick".into(), title: "Third Pick".into() },
            Column { id: "do_not_pick".into(), title: "Do Not Pick".into() },
        ];
        let cards_by_column = columns
            .iter()
            .map(|col| (col.id.clone(), Vec::new()))
            .collect();
        Board { columns, cards_by_column }
    }

    pub fn has_column(&self, column_id: &str) -> bool {
        self.columns.iter().any(|col| col.id == column_id)
    }

    pub fn cards(&self, column_id: &str) -> &[Card] {
        self.cards_by_column
            .get(column_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| self.cards(&col.id).len()).sum()
    }

    /// Canonical ownership resolution: scan columns in display order, then
    /// cards in rank order.
    pub fn find_card(&self, card_id: &str) -> Option<CardLocation<'_>> {
        for col in &self.columns {
            let list = self.cards(&col.id);
            if let Some(index) = list.iter().position(|c| c.id == card_id) {
                return Some(CardLocation {
                    column_id: &col.id,
                    index,
                    card: &list[index],
                });
            }
        }
        None
    }

    pub fn update_card(&self, card_id: &str, patch: CardPatch) -> Board {
        let Some(found) = self.find_card(card_id) else {
            return self.clone();
        };
        let (column_id, index) = (found.column_id.to_string(), found.index);

        let mut next = self.clone();
        let card = &mut next.cards_by_column.get_mut(&column_id).expect("owning column")[index];
        if let Some(title) = patch.title {
            card.title = title;
        }
        if let Some(description) = patch.description {
            card.description = description;
        }
        if let Some(meta) = patch.meta {
            card.meta = meta;
        }
        card.updated_at = Some(Utc::now());
        next
    }

    pub fn delete_card(&self, card_id: &str) -> Board {
        let Some(found) = self.find_card(card_id) else {
            return self.clone();
        };
        let (column_id, index) = (found.column_id.to_string(), found.index);

        let mut next = self.clone();
        next.cards_by_column.get_mut(&column_id).expect("owning column").remove(index);
        next
    }

    /// Insert a card at the front of a column's sequence. No-op when the
    /// column has no card sequence.
    pub fn insert_card_front(&self, column_id: &str, card: Card) -> Board {
        if !self.cards_by_column.contains_key(column_id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.cards_by_column
            .get_mut(column_id)
            .expect("column")
            .insert(0, card);
        next
    }

    /// Ownership-transferring move: remove from `from`, insert into `to`
    /// before `over_id`'s position, or at the front when `over_id` does not
    /// resolve in the destination (hovering an empty column reports the
    /// column itself). No-op when the card is not currently at `from`.
    pub fn move_card_across_columns(
        &self,
        card_id: &str,
        from: &str,
        to: &str,
        over_id: Option<&str>,
    ) -> Board {
        if !self.cards_by_column.contains_key(from) || !self.cards_by_column.contains_key(to) {
            return self.clone();
        }

        let mut next = self.clone();
        let source = next.cards_by_column.get_mut(from).expect("source column");
        let Some(from_index) = source.iter().position(|c| c.id == card_id) else {
            return self.clone();
        };
        let moved = source.remove(from_index);

        let dest = next.cards_by_column.get_mut(to).expect("destination column");
        match over_id.and_then(|over| dest.iter().position(|c| c.id == over)) {
            Some(to_index) => dest.insert(to_index, moved),
            None => dest.insert(0, moved),
        }
        next
    }

    /// Same-column reorder: move the element at `from_index` to `to_index`.
    /// No-op when the column or `from_index` does not resolve.
    pub fn reorder_column(&self, column_id: &str, from_index: usize, to_index: usize) -> Board {
        let Some(list) = self.cards_by_column.get(column_id) else {
            return self.clone();
        };
        if from_index >= list.len() {
            return self.clone();
        }

        let mut next = self.clone();
        let list = next.cards_by_column.get_mut(column_id).expect("column");
        let card = list.remove(from_index);
        let to_index = to_index.min(list.len());
        list.insert(to_index, card);
        next
    }

    // ── Column operations ──────────────────────────────────────

    pub fn add_column(&self, title: &str) -> Board {
        let mut next = self.clone();
        let id = fresh_id("col");
        next.columns.push(Column {
            id: id.clone(),
            title: title.trim().to_string(),
        });
        next.cards_by_column.insert(id, Vec::new());
        next
    }

    pub fn rename_column(&self, column_id: &str, title: &str) -> Board {
        if !self.has_column(column_id) {
            return self.clone();
        }
        let mut next = self.clone();
        let col = next
            .columns
            .iter_mut()
            .find(|col| col.id == column_id)
            .expect("column");
        col.title = title.trim().to_string();
        next
    }

    /// Delete a column and cascade: its entire card sequence goes with it.
    pub fn delete_column(&self, column_id: &str) -> Board {
        let mut next = self.clone();
        next.columns.retain(|col| col.id != column_id);
        next.cards_by_column.remove(column_id);
        next
    }
}

pub fn fresh_id(prefix: &str) -> String {
    format!(
        "{}_{}_{:x}",
        prefix,
        Utc::now().timestamp_millis(),
        rand::random::<u64>()
    )
}
