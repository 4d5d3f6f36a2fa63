/// The entity store: owns the five collections (boards, columns, cards,
/// labels, themes) plus the selected-board scalar, and enforces the
/// relational rules between them.
///
/// - Every mutation is a synchronous in-memory state transition followed by a
///   write-through of the affected collections to the persistence port. The
///   in-memory state is authoritative; a failed write is logged and not
///   retried.
/// - Cascades (board delete, column delete, label delete, theme delete) run
///   children-before-parents inside one critical section, so no reader ever
///   observes a dangling reference mid-operation.
/// - Lookup misses and attempts to touch built-in themes are surfaced as
///   `StoreError` without mutating anything.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::seed;
use crate::storage::{Persistence, StorageError};
use crate::types::*;

const KEY_BOARDS: &str = "boards";
const KEY_COLUMNS: &str = "columns";
const KEY_CARDS: &str = "cards";
const KEY_LABELS: &str = "labels";
const KEY_THEMES: &str = "themes";
const KEY_SELECTED_BOARD: &str = "selectedBoardId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Board,
    Column,
    Card,
    Label,
    Theme,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Board => "board",
            Entity::Column => "column",
            Entity::Card => "card",
            Entity::Label => "label",
            Entity::Theme => "theme",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("built-in {entity} is immutable: {id}")]
    Forbidden { entity: Entity, id: String },
}

pub struct EntityStore {
    port: Arc<dyn Persistence>,
    boards: Vec<Board>,
    columns: Vec<Column>,
    cards: Vec<Card>,
    labels: Vec<Label>,
    themes: Vec<Theme>,
    selected_board_id: String,
}

impl EntityStore {
    /// Open a store over a persistence port. Each collection is loaded from
    /// its own key; an absent key falls back to the built-in seed data, which
    /// is written back so the next open sees it.
    pub fn open(port: Arc<dyn Persistence>) -> Result<Self, StorageError> {
        let boards = load_or_seed(&*port, KEY_BOARDS, seed::seed_boards)?;
        let columns = load_or_seed(&*port, KEY_COLUMNS, seed::seed_columns)?;
        let cards = load_or_seed(&*port, KEY_CARDS, seed::seed_cards)?;
        let labels = load_or_seed(&*port, KEY_LABELS, seed::seed_labels)?;
        let themes = load_or_seed(&*port, KEY_THEMES, seed::seed_themes)?;

        let selected_board_id = match port.load(KEY_SELECTED_BOARD)? {
            Some(value) => value.as_str().unwrap_or_default().to_string(),
            None => String::new(),
        };

        Ok(Self {
            port,
            boards,
            columns,
            cards,
            labels,
            themes,
            selected_board_id,
        })
    }

    // -----------------------------------------------------------------------
    // Boards
    // -----------------------------------------------------------------------

    pub fn create_board(&mut self, draft: BoardDraft) -> Board {
        let now = now_timestamp();
        let board = Board {
            id: new_id(),
            theme_id: draft.theme_id,
            title: draft.title,
            description: draft.description,
            view_settings: draft.view_settings,
            date_created: now.clone(),
            date_updated: now,
        };
        self.boards.push(board.clone());
        self.persist(KEY_BOARDS, &self.boards);
        board
    }

    pub fn update_board(&mut self, patch: BoardPatch) -> Result<Board, StoreError> {
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == patch.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: Entity::Board,
                id: patch.id.clone(),
            })?;

        if let Some(theme_id) = patch.theme_id {
            board.theme_id = theme_id;
        }
        if let Some(title) = patch.title {
            board.title = title;
        }
        if let Some(description) = patch.description {
            board.description = Some(description);
        }
        if let Some(view_settings) = patch.view_settings {
            board.view_settings = Some(view_settings);
        }
        board.date_updated = now_timestamp();
        let updated = board.clone();

        self.persist(KEY_BOARDS, &self.boards);
        Ok(updated)
    }

    /// Delete a board and everything it owns: cards first, then columns, then
    /// the board itself. Deleting an unknown id is a no-op.
    pub fn delete_board(&mut self, board_id: &str) {
        let column_ids: HashSet<String> = self
            .columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .map(|c| c.id.clone())
            .collect();

        let cards_before = self.cards.len();
        self.cards.retain(|card| !column_ids.contains(&card.column_id));
        let columns_before = self.columns.len();
        self.columns.retain(|c| c.board_id != board_id);
        let boards_before = self.boards.len();
        self.boards.retain(|b| b.id != board_id);

        if cards_before != self.cards.len() {
            self.persist(KEY_CARDS, &self.cards);
        }
        if columns_before != self.columns.len() {
            self.persist(KEY_COLUMNS, &self.columns);
        }
        if boards_before != self.boards.len() {
            self.persist(KEY_BOARDS, &self.boards);
        }
    }

    // -----------------------------------------------------------------------
    // Columns
    // -----------------------------------------------------------------------

    pub fn create_column(&mut self, draft: ColumnDraft) -> Column {
        let now = now_timestamp();
        let column = Column {
            id: new_id(),
            board_id: draft.board_id,
            title: draft.title,
            order: draft.order,
            date_created: now.clone(),
            date_updated: now,
        };
        self.columns.push(column.clone());
        self.persist(KEY_COLUMNS, &self.columns);
        column
    }

    pub fn update_column(&mut self, patch: ColumnPatch) -> Result<Column, StoreError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == patch.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: Entity::Column,
                id: patch.id.clone(),
            })?;

        if let Some(board_id) = patch.board_id {
            column.board_id = board_id;
        }
        if let Some(title) = patch.title {
            column.title = title;
        }
        if let Some(order) = patch.order {
            column.order = order;
        }
        column.date_updated = now_timestamp();
        let updated = column.clone();

        self.persist(KEY_COLUMNS, &self.columns);
        Ok(updated)
    }

    /// Bulk reassign column ordering. Unknown ids are skipped. Ordering is
    /// view state, not content: `dateUpdated` stays untouched.
    pub fn update_column_orders(&mut self, entries: &[OrderEntry]) {
        let mut changed = false;
        for entry in entries {
            if let Some(column) = self.columns.iter_mut().find(|c| c.id == entry.id) {
                if column.order != entry.order {
                    column.order = entry.order;
                    changed = true;
                }
            }
        }
        if changed {
            self.persist(KEY_COLUMNS, &self.columns);
        }
    }

    /// Delete a column and its cards. Deleting an unknown id is a no-op.
    pub fn delete_column(&mut self, column_id: &str) {
        let cards_before = self.cards.len();
        self.cards.retain(|card| card.column_id != column_id);
        let columns_before = self.columns.len();
        self.columns.retain(|c| c.id != column_id);

        if cards_before != self.cards.len() {
            self.persist(KEY_CARDS, &self.cards);
        }
        if columns_before != self.columns.len() {
            self.persist(KEY_COLUMNS, &self.columns);
        }
    }

    // -----------------------------------------------------------------------
    // Cards
    // -----------------------------------------------------------------------

    pub fn create_card(&mut self, draft: CardDraft) -> Card {
        let now = now_timestamp();
        let card = Card {
            id: new_id(),
            column_id: draft.column_id,
            label_ids: draft.label_ids,
            title: draft.title,
            description: draft.description,
            links: draft.links,
            todos: draft.todos,
            order: draft.order,
            date_created: now.clone(),
            date_updated: now,
        };
        self.cards.push(card.clone());
        self.persist(KEY_CARDS, &self.cards);
        card
    }

    pub fn update_card(&mut self, patch: CardPatch) -> Result<Card, StoreError> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == patch.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: Entity::Card,
                id: patch.id.clone(),
            })?;

        if let Some(column_id) = patch.column_id {
            card.column_id = column_id;
        }
        if let Some(label_ids) = patch.label_ids {
            card.label_ids = label_ids;
        }
        if let Some(title) = patch.title {
            card.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            card.description = Some(description.trim().to_string());
        }
        if let Some(links) = patch.links {
            card.links = Some(links);
        }
        if let Some(todos) = patch.todos {
            card.todos = Some(todos);
        }
        if let Some(order) = patch.order {
            card.order = order;
        }
        card.date_updated = now_timestamp();
        let updated = card.clone();

        self.persist(KEY_CARDS, &self.cards);
        Ok(updated)
    }

    pub fn delete_card(&mut self, card_id: &str) {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != card_id);
        if before != self.cards.len() {
            self.persist(KEY_CARDS, &self.cards);
        }
    }

    // -----------------------------------------------------------------------
    // Labels
    // -----------------------------------------------------------------------

    pub fn create_label(&mut self, draft: LabelDraft) -> Label {
        let now = now_timestamp();
        let label = Label {
            id: new_id(),
            title: draft.title,
            color: draft.color,
            date_created: now.clone(),
            date_updated: now,
        };
        self.labels.push(label.clone());
        self.persist(KEY_LABELS, &self.labels);
        label
    }

    pub fn update_label(&mut self, patch: LabelPatch) -> Result<Label, StoreError> {
        let label = self
            .labels
            .iter_mut()
            .find(|l| l.id == patch.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: Entity::Label,
                id: patch.id.clone(),
            })?;

        if let Some(title) = patch.title {
            label.title = title;
        }
        if let Some(color) = patch.color {
            label.color = color;
        }
        label.date_updated = now_timestamp();
        let updated = label.clone();

        self.persist(KEY_LABELS, &self.labels);
        Ok(updated)
    }

    /// Delete a label and prune it from every card that references it. The
    /// cards themselves survive; only the dangling reference goes.
    pub fn delete_label(&mut self, label_id: &str) {
        let mut cards_changed = false;
        for card in &mut self.cards {
            let before = card.label_ids.len();
            card.label_ids.retain(|id| id != label_id);
            cards_changed |= before != card.label_ids.len();
        }
        let labels_before = self.labels.len();
        self.labels.retain(|l| l.id != label_id);

        if cards_changed {
            self.persist(KEY_CARDS, &self.cards);
        }
        if labels_before != self.labels.len() {
            self.persist(KEY_LABELS, &self.labels);
        }
    }

    // -----------------------------------------------------------------------
    // Themes
    // -----------------------------------------------------------------------

    /// Themes created through the store are always custom, whatever the
    /// caller might claim.
    pub fn create_theme(&mut self, draft: ThemeDraft) -> Theme {
        let now = now_timestamp();
        let theme = Theme {
            id: new_id(),
            title: draft.title,
            image: draft.image,
            thumbnail: draft.thumbnail,
            is_custom: true,
            date_created: Some(now.clone()),
            date_updated: Some(now),
        };
        self.themes.push(theme.clone());
        self.persist(KEY_THEMES, &self.themes);
        theme
    }

    pub fn update_theme(&mut self, patch: ThemePatch) -> Result<Theme, StoreError> {
        let theme = self
            .themes
            .iter_mut()
            .find(|t| t.id == patch.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: Entity::Theme,
                id: patch.id.clone(),
            })?;
        if !theme.is_custom {
            return Err(StoreError::Forbidden {
                entity: Entity::Theme,
                id: patch.id,
            });
        }

        if let Some(title) = patch.title {
            theme.title = title;
        }
        if let Some(image) = patch.image {
            theme.image = image;
        }
        if let Some(thumbnail) = patch.thumbnail {
            theme.thumbnail = thumbnail;
        }
        theme.date_updated = Some(now_timestamp());
        let updated = theme.clone();

        self.persist(KEY_THEMES, &self.themes);
        Ok(updated)
    }

    /// Delete a custom theme. Boards referencing it are repointed to the
    /// first theme in the collection before removal (positional fallback).
    pub fn delete_theme(&mut self, theme_id: &str) -> Result<(), StoreError> {
        let theme = self
            .themes
            .iter()
            .find(|t| t.id == theme_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: Entity::Theme,
                id: theme_id.to_string(),
            })?;
        if !theme.is_custom {
            return Err(StoreError::Forbidden {
                entity: Entity::Theme,
                id: theme_id.to_string(),
            });
        }

        let fallback_id = self.themes[0].id.clone();
        let mut boards_changed = false;
        for board in &mut self.boards {
            if board.theme_id == theme_id {
                board.theme_id = fallback_id.clone();
                boards_changed = true;
            }
        }
        self.themes.retain(|t| t.id != theme_id);

        if boards_changed {
            self.persist(KEY_BOARDS, &self.boards);
        }
        self.persist(KEY_THEMES, &self.themes);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Selected board
    // -----------------------------------------------------------------------

    pub fn selected_board_id(&self) -> &str {
        &self.selected_board_id
    }

    pub fn set_selected_board(&mut self, board_id: &str) {
        self.selected_board_id = board_id.to_string();
        if let Err(e) = self
            .port
            .save(KEY_SELECTED_BOARD, &serde_json::Value::String(board_id.to_string()))
        {
            log::warn!("[quadro.store] Write-through for {KEY_SELECTED_BOARD} failed: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Read accessors (pure projections)
    // -----------------------------------------------------------------------

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    /// Columns of a board, ascending by `order`, stable for ties.
    pub fn board_columns(&self, board_id: &str) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    /// All cards of a board, joined through its columns.
    pub fn board_cards(&self, board_id: &str) -> Vec<&Card> {
        let column_ids: HashSet<&str> = self
            .columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .map(|c| c.id.as_str())
            .collect();
        self.cards
            .iter()
            .filter(|card| column_ids.contains(card.column_id.as_str()))
            .collect()
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Cards of a column, ascending by `order`. The sort is stable: cards
    /// with equal order keep their insertion order.
    pub fn column_cards(&self, column_id: &str) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .iter()
            .filter(|card| card.column_id == column_id)
            .collect();
        cards.sort_by_key(|card| card.order);
        cards
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Labels of a card, in label-collection order. Stale references (label
    /// ids that no longer resolve) are skipped.
    pub fn card_labels(&self, card_id: &str) -> Vec<&Label> {
        let Some(card) = self.card(card_id) else {
            return Vec::new();
        };
        self.labels
            .iter()
            .filter(|label| card.label_ids.iter().any(|id| id == &label.id))
            .collect()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    // -----------------------------------------------------------------------
    // Import commit seams (crate-internal; the merge engine owns the
    // reconciliation logic, the store stays sole owner of the collections)
    // -----------------------------------------------------------------------

    pub(crate) fn label_id_by_identity(&self, title: &str, color: LabelColor) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.title == title && l.color == color)
            .map(|l| l.id.as_str())
    }

    pub(crate) fn adopt_label(&mut self, label: Label) {
        self.labels.push(label);
        self.persist(KEY_LABELS, &self.labels);
    }

    pub(crate) fn commit_board_subtree(
        &mut self,
        board: Board,
        columns: Vec<Column>,
        cards: Vec<Card>,
    ) {
        self.boards.push(board);
        self.columns.extend(columns);
        self.cards.extend(cards);
        self.persist(KEY_BOARDS, &self.boards);
        self.persist(KEY_COLUMNS, &self.columns);
        self.persist(KEY_CARDS, &self.cards);
    }

    // -----------------------------------------------------------------------

    fn persist<T: Serialize>(&self, key: &str, collection: &T) {
        match serde_json::to_value(collection) {
            Ok(value) => {
                if let Err(e) = self.port.save(key, &value) {
                    log::warn!("[quadro.store] Write-through for {key} failed: {e}");
                }
            }
            Err(e) => log::warn!("[quadro.store] Failed to serialize {key}: {e}"),
        }
    }
}

/// Load a collection from its key, falling back to (and writing back) the
/// built-in seed when the key is absent.
fn load_or_seed<T, F>(
    port: &dyn Persistence,
    key: &str,
    fallback: F,
) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce() -> Vec<T>,
{
    match port.load(key)? {
        Some(value) => {
            serde_json::from_value(value).map_err(|source| StorageError::Malformed {
                key: key.to_string(),
                source,
            })
        }
        None => {
            let seeded = fallback();
            match serde_json::to_value(&seeded) {
                Ok(value) => port.save(key, &value)?,
                Err(e) => log::warn!("[quadro.store] Failed to serialize seed for {key}: {e}"),
            }
            Ok(seeded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryPersistence;

    fn open_store() -> EntityStore {
        EntityStore::open(Arc::new(MemoryPersistence::new())).unwrap()
    }

    fn add_card(store: &mut EntityStore, column_id: &str, title: &str, order: i64) -> Card {
        store.create_card(CardDraft {
            column_id: column_id.into(),
            label_ids: Vec::new(),
            title: title.into(),
            description: None,
            links: None,
            todos: None,
            order,
        })
    }

    #[test]
    fn test_open_falls_back_to_seed() {
        let store = open_store();
        assert_eq!(store.boards().len(), 1);
        assert_eq!(store.board_columns("1").len(), 4);
        assert_eq!(store.labels().len(), 3);
        assert_eq!(store.themes().len(), 4);
        assert_eq!(store.selected_board_id(), "");
    }

    #[test]
    fn test_reopen_sees_written_state() {
        let port = Arc::new(MemoryPersistence::new());
        let board_id = {
            let mut store = EntityStore::open(port.clone()).unwrap();
            let board = store.create_board(BoardDraft {
                theme_id: "1".into(),
                title: "Roadmap".into(),
                description: None,
                view_settings: None,
            });
            store.set_selected_board(&board.id);
            board.id
        };

        let reopened = EntityStore::open(port).unwrap();
        assert!(reopened.board(&board_id).is_some());
        assert_eq!(reopened.selected_board_id(), board_id);
    }

    #[test]
    fn test_update_board_merges_and_stamps() {
        let mut store = open_store();
        let board = store.create_board(BoardDraft {
            theme_id: "1".into(),
            title: "Original".into(),
            description: None,
            view_settings: None,
        });

        let updated = store
            .update_board(BoardPatch {
                id: board.id.clone(),
                title: Some("Renamed".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.theme_id, "1");
        assert_eq!(updated.date_created, board.date_created);
    }

    #[test]
    fn test_update_missing_board_is_not_found_and_mutates_nothing() {
        let mut store = open_store();
        let before = store.boards().to_vec();

        let err = store
            .update_board(BoardPatch {
                id: "missing".into(),
                title: Some("x".into()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::NotFound {
                entity: Entity::Board,
                id: "missing".into()
            }
        );
        assert_eq!(store.boards(), before.as_slice());
    }

    #[test]
    fn test_delete_board_cascades_to_columns_and_cards() {
        let mut store = open_store();
        add_card(&mut store, "2", "In col 2", 0);
        add_card(&mut store, "3", "In col 3", 0);
        let other_board = store.create_board(BoardDraft {
            theme_id: "1".into(),
            title: "Survivor".into(),
            description: None,
            view_settings: None,
        });
        let other_column = store.create_column(ColumnDraft {
            board_id: other_board.id.clone(),
            title: "Keep".into(),
            order: 0,
        });
        let other_card = add_card(&mut store, &other_column.id, "Keep me", 0);

        store.delete_board("1");

        assert!(store.board("1").is_none());
        assert!(store.board_columns("1").is_empty());
        assert!(store.board_cards("1").is_empty());
        // unrelated board untouched
        assert!(store.card(&other_card.id).is_some());
        assert_eq!(store.board_columns(&other_board.id).len(), 1);
    }

    #[test]
    fn test_delete_column_cascades_to_cards_only() {
        let mut store = open_store();
        let doomed = add_card(&mut store, "1", "Doomed", 0);
        let safe = add_card(&mut store, "2", "Safe", 0);

        store.delete_column("1");

        assert!(store.column("1").is_none());
        assert!(store.card(&doomed.id).is_none());
        assert!(store.card(&safe.id).is_some());
        assert!(store.board("1").is_some());
    }

    #[test]
    fn test_update_column_orders_skips_unknown_and_keeps_date_updated() {
        let mut store = open_store();
        let stamp_before = store.column("1").unwrap().date_updated.clone();

        store.update_column_orders(&[
            OrderEntry { id: "1".into(), order: 7 },
            OrderEntry { id: "ghost".into(), order: 9 },
        ]);

        let column = store.column("1").unwrap();
        assert_eq!(column.order, 7);
        assert_eq!(column.date_updated, stamp_before);
    }

    #[test]
    fn test_update_card_trims_title_and_description() {
        let mut store = open_store();
        let card = add_card(&mut store, "1", "Untrimmed", 0);

        let updated = store
            .update_card(CardPatch {
                id: card.id,
                title: Some("  Padded title  ".into()),
                description: Some("\tdesc\n".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.title, "Padded title");
        assert_eq!(updated.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_update_card_moves_between_columns() {
        let mut store = open_store();
        let card = add_card(&mut store, "1", "Mover", 0);

        store
            .update_card(CardPatch {
                id: card.id.clone(),
                column_id: Some("3".into()),
                order: Some(5),
                ..Default::default()
            })
            .unwrap();

        assert!(store.column_cards("1").is_empty() || store
            .column_cards("1")
            .iter()
            .all(|c| c.id != card.id));
        assert_eq!(store.column_cards("3").last().unwrap().id, card.id);
    }

    #[test]
    fn test_column_cards_sorted_stable() {
        let mut store = open_store();
        store.delete_card("1");
        let c_late = add_card(&mut store, "1", "late", 5);
        let c_first_tie = add_card(&mut store, "1", "tie one", 2);
        let c_second_tie = add_card(&mut store, "1", "tie two", 2);
        let c_early = add_card(&mut store, "1", "early", 0);

        let ordered: Vec<&str> = store
            .column_cards("1")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            ordered,
            vec![
                c_early.id.as_str(),
                c_first_tie.id.as_str(),
                c_second_tie.id.as_str(),
                c_late.id.as_str()
            ]
        );
    }

    #[test]
    fn test_delete_label_prunes_cards() {
        let mut store = open_store();
        let label = store.create_label(LabelDraft {
            title: "Bug".into(),
            color: LabelColor::Red,
        });
        let card = store.create_card(CardDraft {
            column_id: "1".into(),
            label_ids: vec![label.id.clone(), "3".into()],
            title: "Tagged".into(),
            description: None,
            links: None,
            todos: None,
            order: 0,
        });

        store.delete_label(&label.id);

        assert!(store.label(&label.id).is_none());
        let card = store.card(&card.id).unwrap();
        assert!(!card.label_ids.contains(&label.id));
        assert!(card.label_ids.contains(&"3".to_string()));
    }

    #[test]
    fn test_card_labels_skips_stale_ids() {
        let mut store = open_store();
        let card = store.create_card(CardDraft {
            column_id: "1".into(),
            label_ids: vec!["3".into(), "long-gone".into()],
            title: "Stale ref".into(),
            description: None,
            links: None,
            todos: None,
            order: 0,
        });

        let labels = store.card_labels(&card.id);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].id, "3");
    }

    #[test]
    fn test_create_theme_is_always_custom() {
        let mut store = open_store();
        let theme = store.create_theme(ThemeDraft {
            title: "Mine".into(),
            image: "app://theme-image-1.png".into(),
            thumbnail: "app://theme-image-1-thumb.png".into(),
        });
        assert!(theme.is_custom);
        assert!(theme.date_created.is_some());
    }

    #[test]
    fn test_builtin_theme_is_protected() {
        let mut store = open_store();
        let themes_before = store.themes().to_vec();
        let boards_before = store.boards().to_vec();

        let update_err = store
            .update_theme(ThemePatch {
                id: "1".into(),
                title: Some("Defaced".into()),
                ..Default::default()
            })
            .unwrap_err();
        let delete_err = store.delete_theme("1").unwrap_err();

        assert!(matches!(update_err, StoreError::Forbidden { .. }));
        assert!(matches!(delete_err, StoreError::Forbidden { .. }));
        assert_eq!(store.themes(), themes_before.as_slice());
        assert_eq!(store.boards(), boards_before.as_slice());
    }

    #[test]
    fn test_delete_custom_theme_reassigns_boards_to_first_theme() {
        let mut store = open_store();
        let theme = store.create_theme(ThemeDraft {
            title: "Mine".into(),
            image: "x".into(),
            thumbnail: "y".into(),
        });
        let board = store.create_board(BoardDraft {
            theme_id: theme.id.clone(),
            title: "Themed".into(),
            description: None,
            view_settings: None,
        });

        store.delete_theme(&theme.id).unwrap();

        assert!(store.theme(&theme.id).is_none());
        let first_theme_id = store.themes()[0].id.clone();
        assert_eq!(store.board(&board.id).unwrap().theme_id, first_theme_id);
    }

    #[test]
    fn test_update_custom_theme() {
        let mut store = open_store();
        let theme = store.create_theme(ThemeDraft {
            title: "Mine".into(),
            image: "x".into(),
            thumbnail: "y".into(),
        });

        let updated = store
            .update_theme(ThemePatch {
                id: theme.id,
                image: Some("app://theme-image-2.png".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.image, "app://theme-image-2.png");
        assert_eq!(updated.title, "Mine");
    }
}
