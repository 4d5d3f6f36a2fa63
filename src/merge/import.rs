/// Import/merge: reconcile an export document into the live store.
///
/// Both modes share label reconciliation and the final commit; they differ
/// only in how identity collisions with existing data are resolved:
///
/// - `New`: the whole subtree gets fresh identifiers (board, columns, cards),
///   with child references rewritten along the way. Safe regardless of where
///   the export originated.
/// - `Overwrite`: the existing board with the document's id is deleted first
///   (full cascade), then the subtree is inserted under its original ids.
///
/// Labels are reconciled by (title, color) identity, never by id: a label
/// that already exists under another id is reused, so repeated imports of the
/// same human-named label never duplicate label records.

use serde::{Deserialize, Serialize};

use crate::store::EntityStore;
use crate::types::new_id;

use super::document::{BoardExport, ImportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    New,
    Overwrite,
}

/// Reconcile `document` into the store. Validates the document before any
/// mutation; a rejected document leaves the store untouched. Returns the id
/// the board ends up under.
pub fn import_board(
    store: &mut EntityStore,
    document: BoardExport,
    mode: ImportMode,
) -> Result<String, ImportError> {
    document.validate()?;

    let BoardExport {
        mut board,
        mut columns,
        mut cards,
        labels,
        ..
    } = document;

    match mode {
        ImportMode::New => {
            board.id = new_id();
            for column in &mut columns {
                let old_id = std::mem::replace(&mut column.id, new_id());
                column.board_id = board.id.clone();
                for card in cards.iter_mut().filter(|c| c.column_id == old_id) {
                    card.column_id = column.id.clone();
                }
            }
            for card in &mut cards {
                card.id = new_id();
            }
        }
        ImportMode::Overwrite => {
            store.delete_board(&board.id);
        }
    }

    for mut label in labels {
        let old_id = label.id.clone();
        let target_id = match store.label_id_by_identity(&label.title, label.color) {
            Some(existing) => existing.to_string(),
            None => {
                label.id = new_id();
                let fresh = label.id.clone();
                store.adopt_label(label);
                fresh
            }
        };
        if target_id != old_id {
            for card in &mut cards {
                for id in &mut card.label_ids {
                    if *id == old_id {
                        *id = target_id.clone();
                    }
                }
            }
        }
    }
    // Two document labels can reconcile to one store label; drop the
    // duplicate reference while keeping order.
    for card in &mut cards {
        let mut seen = std::collections::HashSet::new();
        card.label_ids.retain(|id| seen.insert(id.clone()));
    }

    let board_id = board.id.clone();
    log::info!(
        "[quadro.merge] Imported board {} ({} columns, {} cards, {:?} mode)",
        board_id,
        columns.len(),
        cards.len(),
        mode
    );
    store.commit_board_subtree(board, columns, cards);
    Ok(board_id)
}
