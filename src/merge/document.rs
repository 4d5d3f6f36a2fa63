/// The board export document: one board subtree (board, columns, cards) plus
/// the labels those cards reference. This is the wire format for board
/// portability; entities use the live schema shapes.

use serde::{Deserialize, Serialize};

use crate::store::{EntityStore, StoreError};
use crate::types::{now_timestamp, Board, Card, Column, Label};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardExport {
    pub exported_at: String,
    pub board: Board,
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
    pub labels: Vec<Label>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("malformed import document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid import document: {0}")]
    Invalid(String),
}

impl BoardExport {
    /// Parse and fully validate a document. Nothing is mutated anywhere on
    /// failure; import only ever sees documents that passed this.
    pub fn from_json(content: &str) -> Result<Self, ImportError> {
        let document: Self = serde_json::from_str(content)?;
        document.validate()?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural validation beyond shape: the subtree must be internally
    /// consistent before any of it may touch the store.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.board.id.is_empty() {
            return Err(ImportError::Invalid("board id is empty".into()));
        }

        let mut column_ids = std::collections::HashSet::new();
        for column in &self.columns {
            if column.board_id != self.board.id {
                return Err(ImportError::Invalid(format!(
                    "column {} belongs to board {}, expected {}",
                    column.id, column.board_id, self.board.id
                )));
            }
            if !column_ids.insert(column.id.as_str()) {
                return Err(ImportError::Invalid(format!(
                    "duplicate column id {}",
                    column.id
                )));
            }
        }

        let mut card_ids = std::collections::HashSet::new();
        for card in &self.cards {
            if !column_ids.contains(card.column_id.as_str()) {
                return Err(ImportError::Invalid(format!(
                    "card {} references unknown column {}",
                    card.id, card.column_id
                )));
            }
            if !card_ids.insert(card.id.as_str()) {
                return Err(ImportError::Invalid(format!("duplicate card id {}", card.id)));
            }
        }

        // Card labelIds are allowed to be stale; they are reconciled (or left
        // dangling) at import time, never validated against the label list.
        Ok(())
    }
}

/// Assemble an export document for one board: the board, its columns, their
/// cards, and the union of labels those cards reference (stale ids skipped),
/// stamped with the current time.
pub fn export_board(store: &EntityStore, board_id: &str) -> Result<BoardExport, StoreError> {
    let board = store
        .board(board_id)
        .ok_or_else(|| StoreError::NotFound {
            entity: crate::store::Entity::Board,
            id: board_id.to_string(),
        })?
        .clone();

    let columns: Vec<Column> = store
        .board_columns(board_id)
        .into_iter()
        .cloned()
        .collect();
    let cards: Vec<Card> = store.board_cards(board_id).into_iter().cloned().collect();

    let referenced: std::collections::HashSet<&str> = cards
        .iter()
        .flat_map(|card| card.label_ids.iter().map(String::as_str))
        .collect();
    let labels: Vec<Label> = store
        .labels()
        .iter()
        .filter(|label| referenced.contains(label.id.as_str()))
        .cloned()
        .collect();

    Ok(BoardExport {
        exported_at: now_timestamp(),
        board,
        columns,
        cards,
        labels,
    })
}
