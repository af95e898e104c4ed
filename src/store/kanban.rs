//! Kanban Board Store

use serde_json::Value;

use super::{ListenerId, Listeners};
use crate::collate;
use crate::color::random_color;
use crate::config::{BoardConfig, DEFAULT_CARD_TITLE};
use crate::models::{new_id, now_millis, Card, ColumnKey, Direction, KanbanState};
use crate::storage::{read_slot, write_slot, KeyValueStorage};

/// What the last kanban mutation did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KanbanChange {
    Init,
    Add { column: ColumnKey, id: String },
    Remove { column: ColumnKey, id: String },
    Move { from: ColumnKey, to: ColumnKey, id: String },
    RecolorCard { column: ColumnKey, id: String },
    RecolorColumn { column: ColumnKey },
    Sort { column: ColumnKey },
    UpdateTitle { column: ColumnKey, id: String },
}

impl KanbanChange {
    pub fn action(&self) -> &'static str {
        match self {
            KanbanChange::Init => "init",
            KanbanChange::Add { .. } => "add",
            KanbanChange::Remove { .. } => "remove",
            KanbanChange::Move { .. } => "move",
            KanbanChange::RecolorCard { .. } => "recolorCard",
            KanbanChange::RecolorColumn { .. } => "recolorColumn",
            KanbanChange::Sort { .. } => "sort",
            KanbanChange::UpdateTitle { .. } => "updateTitle",
        }
    }
}

pub struct KanbanStore {
    state: KanbanState,
    config: BoardConfig,
    storage: Box<dyn KeyValueStorage>,
    listeners: Listeners<KanbanState, KanbanChange>,
}

impl KanbanStore {
    pub fn new(config: BoardConfig, storage: Box<dyn KeyValueStorage>) -> Self {
        let state = load_state(storage.as_ref(), config.storage_key);
        log::debug!("kanban store loaded {} cards", state.len());
        Self {
            state,
            config,
            storage,
            listeners: Listeners::default(),
        }
    }

    /// Register a listener; it is called once right away with `Init`
    pub fn subscribe(&mut self, listener: impl FnMut(&KanbanState, &KanbanChange) + 'static) -> ListenerId {
        let id = self.listeners.add(Box::new(listener));
        self.listeners.notify_one(id, &self.state, &KanbanChange::Init);
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn snapshot(&self) -> KanbanState {
        self.state.clone()
    }

    #[cfg(test)]
    pub fn count(&self, column: ColumnKey) -> usize {
        self.state.column(column).len()
    }

    pub fn find(&self, column: ColumnKey, id: &str) -> Option<&Card> {
        self.state.column(column).iter().find(|card| card.id == id)
    }

    pub fn add_card(&mut self, column: ColumnKey) -> Card {
        let card = Card {
            id: new_id(),
            title: DEFAULT_CARD_TITLE.to_string(),
            color: random_color(self.config.palette),
            created_at: now_millis(),
        };
        self.state.column_mut(column).push(card.clone());
        self.commit(KanbanChange::Add { column, id: card.id.clone() });
        card
    }

    pub fn delete_card(&mut self, column: ColumnKey, id: &str) {
        let cards = self.state.column_mut(column);
        let Some(index) = cards.iter().position(|card| card.id == id) else {
            return;
        };
        cards.remove(index);
        self.commit(KanbanChange::Remove { column, id: id.to_string() });
    }

    /// Move a card to the end of the adjacent column
    pub fn move_card(&mut self, column: ColumnKey, id: &str, direction: Direction) {
        let Some(target) = column.neighbor(direction) else {
            return;
        };
        let cards = self.state.column_mut(column);
        let Some(index) = cards.iter().position(|card| card.id == id) else {
            return;
        };
        let card = cards.remove(index);
        self.state.column_mut(target).push(card);
        self.commit(KanbanChange::Move { from: column, to: target, id: id.to_string() });
    }

    pub fn recolor_card(&mut self, column: ColumnKey, id: &str, color: Option<&str>) {
        let palette = self.config.palette;
        let Some(card) = self.state.column_mut(column).iter_mut().find(|card| card.id == id) else {
            return;
        };
        card.color = color.map(str::to_string).unwrap_or_else(|| random_color(palette));
        self.commit(KanbanChange::RecolorCard { column, id: id.to_string() });
    }

    /// Recolor a whole column; without a color each card gets its own random one
    pub fn recolor_column(&mut self, column: ColumnKey, color: Option<&str>) {
        let palette = self.config.palette;
        let cards = self.state.column_mut(column);
        if cards.is_empty() {
            return;
        }
        for card in cards.iter_mut() {
            card.color = color.map(str::to_string).unwrap_or_else(|| random_color(palette));
        }
        self.commit(KanbanChange::RecolorColumn { column });
    }

    /// Stable sort by title, case-insensitive and accent-aware
    pub fn sort_column(&mut self, column: ColumnKey) {
        self.state
            .column_mut(column)
            .sort_by(|a, b| collate::compare(&a.title, &b.title));
        self.commit(KanbanChange::Sort { column });
    }

    /// Store the title verbatim, empty included
    pub fn update_title(&mut self, column: ColumnKey, id: &str, text: &str) {
        let Some(card) = self.state.column_mut(column).iter_mut().find(|card| card.id == id) else {
            return;
        };
        card.title = text.to_string();
        self.commit(KanbanChange::UpdateTitle { column, id: id.to_string() });
    }

    fn commit(&mut self, change: KanbanChange) {
        log::debug!("kanban store: {}", change.action());
        write_slot(self.storage.as_ref(), self.config.storage_key, &self.state);
        self.listeners.notify(&self.state, &change);
    }
}

/// Parse stored state; each column defaults to empty on its own when missing
/// or not an array, malformed cards reset the whole board
fn load_state(storage: &dyn KeyValueStorage, key: &str) -> KanbanState {
    let Some(saved) = read_slot(storage, key) else {
        return KanbanState::default();
    };
    let parsed: Value = match serde_json::from_str(&saved) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("stored kanban state is not valid JSON: {}", e);
            return KanbanState::default();
        }
    };

    let mut state = KanbanState::default();
    for column in ColumnKey::ALL {
        let Some(cards) = parsed.get(column.as_str()).filter(|cards| cards.is_array()) else {
            continue;
        };
        match serde_json::from_value::<Vec<Card>>(cards.clone()) {
            Ok(cards) => *state.column_mut(column) = cards,
            Err(e) => {
                log::warn!("stored cards in `{}` are malformed: {}", column.as_str(), e);
                return KanbanState::default();
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KANBAN;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup_store() -> (KanbanStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (KanbanStore::new(KANBAN, Box::new(storage.clone())), storage)
    }

    fn record_changes(store: &mut KanbanStore) -> Rc<RefCell<Vec<KanbanChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        store.subscribe(move |_, change| sink.borrow_mut().push(change.clone()));
        changes
    }

    fn titles(store: &KanbanStore, column: ColumnKey) -> Vec<String> {
        store.snapshot().column(column).iter().map(|c| c.title.clone()).collect()
    }

    fn add_titled(store: &mut KanbanStore, column: ColumnKey, title: &str) -> Card {
        let card = store.add_card(column);
        store.update_title(column, &card.id, title);
        card
    }

    #[test]
    fn test_add_card_defaults() {
        let (mut store, _) = setup_store();
        let card = store.add_card(ColumnKey::Todo);
        assert_eq!(card.title, "Nowa karta");
        assert!(card.color.starts_with("hsl("));
        assert!(card.color.ends_with(", 70%, 55%)"));
        assert_eq!(store.count(ColumnKey::Todo), 1);
        assert_eq!(store.count(ColumnKey::Done), 0);
    }

    #[test]
    fn test_move_right_scenario() {
        let (mut store, _) = setup_store();
        let card = store.add_card(ColumnKey::Todo);
        let changes = record_changes(&mut store);

        store.move_card(ColumnKey::Todo, &card.id, Direction::Right);

        assert!(store.find(ColumnKey::Todo, &card.id).is_none());
        assert_eq!(store.find(ColumnKey::InProgress, &card.id), Some(&card));
        assert_eq!(store.count(ColumnKey::Todo), 0);
        assert_eq!(store.count(ColumnKey::InProgress), 1);
        assert_eq!(
            changes.borrow().last(),
            Some(&KanbanChange::Move {
                from: ColumnKey::Todo,
                to: ColumnKey::InProgress,
                id: card.id.clone(),
            })
        );
    }

    #[test]
    fn test_move_appends_to_target_end() {
        let (mut store, _) = setup_store();
        let existing = store.add_card(ColumnKey::InProgress);
        let moving = store.add_card(ColumnKey::Done);
        store.move_card(ColumnKey::Done, &moving.id, Direction::Left);

        let ids: Vec<String> = store
            .snapshot()
            .in_progress
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(ids, vec![existing.id, moving.id]);
    }

    #[test]
    fn test_move_past_edge_is_noop() {
        let (mut store, _) = setup_store();
        let first = store.add_card(ColumnKey::Todo);
        let last = store.add_card(ColumnKey::Done);
        let before = store.snapshot();
        let changes = record_changes(&mut store);

        store.move_card(ColumnKey::Todo, &first.id, Direction::Left);
        store.move_card(ColumnKey::Done, &last.id, Direction::Right);

        assert_eq!(store.snapshot(), before);
        assert_eq!(*changes.borrow(), vec![KanbanChange::Init]);
    }

    #[test]
    fn test_move_from_wrong_column_is_noop() {
        let (mut store, _) = setup_store();
        let card = store.add_card(ColumnKey::Todo);
        let changes = record_changes(&mut store);

        store.move_card(ColumnKey::InProgress, &card.id, Direction::Right);

        assert!(store.find(ColumnKey::Todo, &card.id).is_some());
        assert_eq!(store.count(ColumnKey::Done), 0);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn test_sort_column_case_insensitive() {
        let (mut store, _) = setup_store();
        for title in ["banana", "Apple", "cherry"] {
            add_titled(&mut store, ColumnKey::Todo, title);
        }

        store.sort_column(ColumnKey::Todo);
        assert_eq!(titles(&store, ColumnKey::Todo), vec!["Apple", "banana", "cherry"]);

        store.sort_column(ColumnKey::Todo);
        assert_eq!(titles(&store, ColumnKey::Todo), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_titles() {
        let (mut store, _) = setup_store();
        let first = add_titled(&mut store, ColumnKey::Done, "apple");
        add_titled(&mut store, ColumnKey::Done, "Zebra");
        let second = add_titled(&mut store, ColumnKey::Done, "APPLE");

        store.sort_column(ColumnKey::Done);

        let ids: Vec<String> = store.snapshot().done.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids[0], first.id);
        assert_eq!(ids[1], second.id);
    }

    #[test]
    fn test_update_title_is_verbatim() {
        let (mut store, _) = setup_store();
        let card = store.add_card(ColumnKey::Todo);
        store.update_title(ColumnKey::Todo, &card.id, "");
        assert_eq!(store.find(ColumnKey::Todo, &card.id).unwrap().title, "");
        store.update_title(ColumnKey::Todo, &card.id, "  spaced  ");
        assert_eq!(store.find(ColumnKey::Todo, &card.id).unwrap().title, "  spaced  ");
    }

    #[test]
    fn test_delete_card_twice() {
        let (mut store, _) = setup_store();
        let card = store.add_card(ColumnKey::InProgress);
        let changes = record_changes(&mut store);

        store.delete_card(ColumnKey::InProgress, &card.id);
        store.delete_card(ColumnKey::InProgress, &card.id);

        assert_eq!(store.count(ColumnKey::InProgress), 0);
        assert_eq!(changes.borrow().len(), 2);
    }

    #[test]
    fn test_recolor_card_and_column() {
        let (mut store, _) = setup_store();
        let a = store.add_card(ColumnKey::Todo);
        let b = store.add_card(ColumnKey::Todo);
        let other = store.add_card(ColumnKey::Done);

        store.recolor_card(ColumnKey::Todo, &a.id, Some("#112233"));
        assert_eq!(store.find(ColumnKey::Todo, &a.id).unwrap().color, "#112233");
        assert_eq!(store.find(ColumnKey::Todo, &b.id).unwrap().color, b.color);

        store.recolor_column(ColumnKey::Todo, Some("#445566"));
        assert!(store.snapshot().todo.iter().all(|c| c.color == "#445566"));
        assert_eq!(store.find(ColumnKey::Done, &other.id).unwrap().color, other.color);
    }

    #[test]
    fn test_recolor_empty_column_is_noop() {
        let (mut store, _) = setup_store();
        let changes = record_changes(&mut store);
        store.recolor_column(ColumnKey::Done, None);
        store.recolor_card(ColumnKey::Done, "missing", None);
        assert_eq!(*changes.borrow(), vec![KanbanChange::Init]);
    }

    #[test]
    fn test_state_survives_reload() {
        let (mut store, storage) = setup_store();
        let card = add_titled(&mut store, ColumnKey::Todo, "Zadanie");
        store.move_card(ColumnKey::Todo, &card.id, Direction::Right);
        store.add_card(ColumnKey::Done);

        let reloaded = KanbanStore::new(KANBAN, Box::new(storage));
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn test_missing_columns_default_independently() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                KANBAN.storage_key,
                r##"{"todo": [{"id": "a", "title": "t", "color": "#fff", "createdAt": 1}], "done": "oops"}"##,
            )
            .unwrap();
        let store = KanbanStore::new(KANBAN, Box::new(storage));
        assert_eq!(store.count(ColumnKey::Todo), 1);
        assert_eq!(store.count(ColumnKey::InProgress), 0);
        assert_eq!(store.count(ColumnKey::Done), 0);
    }

    #[test]
    fn test_null_title_keeps_other_cards() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                KANBAN.storage_key,
                r##"{"todo": [{"id": "a", "title": "ok", "color": "#fff", "createdAt": 1},
                              {"id": "b", "title": null, "color": "#000", "createdAt": 2}],
                     "done": [{"id": "c", "title": "done", "color": "#abc", "createdAt": 3}]}"##,
            )
            .unwrap();
        let store = KanbanStore::new(KANBAN, Box::new(storage));
        assert_eq!(titles(&store, ColumnKey::Todo), vec!["ok", ""]);
        assert_eq!(titles(&store, ColumnKey::Done), vec!["done"]);
    }

    #[test]
    fn test_malformed_state_loads_empty() {
        for raw in ["{not json", "[]", r#"{"todo": [{"title": 3}]}"#] {
            let storage = MemoryStorage::new();
            storage.set_item(KANBAN.storage_key, raw).unwrap();
            let store = KanbanStore::new(KANBAN, Box::new(storage));
            assert_eq!(store.snapshot(), KanbanState::default(), "{}", raw);
        }
    }
}
