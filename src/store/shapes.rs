//! Shape Board Store

use serde_json::Value;

use super::{ListenerId, Listeners};
use crate::color::random_color;
use crate::config::BoardConfig;
use crate::models::{new_id, now_millis, Shape, ShapeType, ShapesState};
use crate::storage::{read_slot, write_slot, KeyValueStorage};

/// What the last shape mutation did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeChange {
    Init,
    Add { id: String, shape_type: ShapeType },
    Remove { id: String },
    RecolorShape { id: String },
    RecolorType { shape_type: ShapeType },
}

impl ShapeChange {
    pub fn action(&self) -> &'static str {
        match self {
            ShapeChange::Init => "init",
            ShapeChange::Add { .. } => "add",
            ShapeChange::Remove { .. } => "remove",
            ShapeChange::RecolorShape { .. } => "recolorShape",
            ShapeChange::RecolorType { .. } => "recolorType",
        }
    }
}

pub struct ShapeStore {
    state: ShapesState,
    config: BoardConfig,
    storage: Box<dyn KeyValueStorage>,
    listeners: Listeners<[Shape], ShapeChange>,
}

impl ShapeStore {
    /// Load persisted shapes from the configured slot
    pub fn new(config: BoardConfig, storage: Box<dyn KeyValueStorage>) -> Self {
        let state = load_state(storage.as_ref(), config.storage_key);
        log::debug!("shape store loaded {} shapes", state.shapes.len());
        Self {
            state,
            config,
            storage,
            listeners: Listeners::default(),
        }
    }

    /// Register a listener; it is called once right away with `Init`
    pub fn subscribe(&mut self, listener: impl FnMut(&[Shape], &ShapeChange) + 'static) -> ListenerId {
        let id = self.listeners.add(Box::new(listener));
        self.listeners.notify_one(id, &self.state.shapes, &ShapeChange::Init);
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Copy of the current shapes
    pub fn snapshot(&self) -> Vec<Shape> {
        self.state.shapes.clone()
    }

    pub fn find(&self, id: &str) -> Option<&Shape> {
        self.state.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn add_shape(&mut self, shape_type: ShapeType) -> Shape {
        let shape = Shape {
            id: new_id(),
            shape_type,
            color: random_color(self.config.palette),
            created_at: now_millis(),
        };
        self.state.shapes.push(shape.clone());
        self.commit(ShapeChange::Add { id: shape.id.clone(), shape_type });
        shape
    }

    pub fn remove_shape(&mut self, id: &str) {
        let Some(index) = self.state.shapes.iter().position(|shape| shape.id == id) else {
            return;
        };
        self.state.shapes.remove(index);
        self.commit(ShapeChange::Remove { id: id.to_string() });
    }

    /// Recolor every shape of a type; without a color each shape gets its own
    /// random one
    pub fn recolor_type(&mut self, shape_type: ShapeType, color: Option<&str>) {
        let palette = self.config.palette;
        let mut changed = false;
        for shape in self.state.shapes.iter_mut().filter(|shape| shape.shape_type == shape_type) {
            shape.color = color.map(str::to_string).unwrap_or_else(|| random_color(palette));
            changed = true;
        }
        if changed {
            self.commit(ShapeChange::RecolorType { shape_type });
        }
    }

    pub fn recolor_shape(&mut self, id: &str, color: Option<&str>) {
        let palette = self.config.palette;
        let Some(shape) = self.state.shapes.iter_mut().find(|shape| shape.id == id) else {
            return;
        };
        shape.color = color.map(str::to_string).unwrap_or_else(|| random_color(palette));
        self.commit(ShapeChange::RecolorShape { id: id.to_string() });
    }

    fn commit(&mut self, change: ShapeChange) {
        log::debug!("shape store: {}", change.action());
        write_slot(self.storage.as_ref(), self.config.storage_key, &self.state);
        self.listeners.notify(&self.state.shapes, &change);
    }
}

/// Number of shapes of one type
pub fn count_by_type(shapes: &[Shape], shape_type: ShapeType) -> usize {
    shapes.iter().filter(|shape| shape.shape_type == shape_type).count()
}

/// Parse stored state; anything but a well-formed `shapes` array yields the
/// empty board
fn load_state(storage: &dyn KeyValueStorage, key: &str) -> ShapesState {
    let Some(saved) = read_slot(storage, key) else {
        return ShapesState::default();
    };
    let parsed: Value = match serde_json::from_str(&saved) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("stored shape state is not valid JSON: {}", e);
            return ShapesState::default();
        }
    };
    let Some(shapes) = parsed.get("shapes").filter(|shapes| shapes.is_array()) else {
        return ShapesState::default();
    };
    match serde_json::from_value(shapes.clone()) {
        Ok(shapes) => ShapesState { shapes },
        Err(e) => {
            log::warn!("stored shapes are malformed: {}", e);
            ShapesState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::is_valid_color;
    use crate::config::SHAPES;
    use crate::storage::{BrokenStorage, MemoryStorage};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn setup_store() -> (ShapeStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (ShapeStore::new(SHAPES, Box::new(storage.clone())), storage)
    }

    fn record_changes(store: &mut ShapeStore) -> Rc<RefCell<Vec<ShapeChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        store.subscribe(move |_, change| sink.borrow_mut().push(change.clone()));
        changes
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (mut store, _) = setup_store();
        for i in 0..25 {
            let shape_type = if i % 2 == 0 { ShapeType::Square } else { ShapeType::Circle };
            let shape = store.add_shape(shape_type);
            assert!(is_valid_color(&shape.color));
            assert!(shape.created_at > 0);
        }
        let shapes = store.snapshot();
        assert_eq!(shapes.len(), 25);
        let ids: HashSet<_> = shapes.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 25);
        assert_eq!(count_by_type(&shapes, ShapeType::Square), 13);
        assert_eq!(count_by_type(&shapes, ShapeType::Circle), 12);
    }

    #[test]
    fn test_subscribe_delivers_init_then_changes() {
        let (mut store, _) = setup_store();
        let changes = record_changes(&mut store);
        let shape = store.add_shape(ShapeType::Circle);

        assert_eq!(
            *changes.borrow(),
            vec![
                ShapeChange::Init,
                ShapeChange::Add { id: shape.id, shape_type: ShapeType::Circle },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (mut store, _) = setup_store();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let id = store.subscribe(move |_, _| *c.borrow_mut() += 1);
        assert!(store.unsubscribe(id));
        store.add_shape(ShapeType::Square);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut store, _) = setup_store();
        let shape = store.add_shape(ShapeType::Square);
        let changes = record_changes(&mut store);

        store.remove_shape(&shape.id);
        store.remove_shape(&shape.id);

        assert!(store.snapshot().is_empty());
        assert_eq!(
            *changes.borrow(),
            vec![ShapeChange::Init, ShapeChange::Remove { id: shape.id }]
        );
    }

    #[test]
    fn test_recolor_shape_touches_only_target() {
        let (mut store, _) = setup_store();
        let target = store.add_shape(ShapeType::Square);
        let other = store.add_shape(ShapeType::Square);

        store.recolor_shape(&target.id, Some("#112233"));

        assert_eq!(store.find(&target.id).unwrap().color, "#112233");
        assert_eq!(store.find(&other.id).unwrap().color, other.color);
    }

    #[test]
    fn test_recolor_missing_shape_is_silent() {
        let (mut store, _) = setup_store();
        let changes = record_changes(&mut store);
        store.recolor_shape("nope", Some("#112233"));
        assert_eq!(*changes.borrow(), vec![ShapeChange::Init]);
    }

    #[test]
    fn test_recolor_type_only_matching() {
        let (mut store, _) = setup_store();
        let square = store.add_shape(ShapeType::Square);
        let circle = store.add_shape(ShapeType::Circle);
        let changes = record_changes(&mut store);

        store.recolor_type(ShapeType::Square, Some("#abcdef"));
        store.recolor_type(ShapeType::Square, None);

        assert_eq!(store.find(&circle.id).unwrap().color, circle.color);
        assert!(is_valid_color(&store.find(&square.id).unwrap().color));
        assert_eq!(changes.borrow().len(), 3);
        assert_eq!(changes.borrow()[1], ShapeChange::RecolorType { shape_type: ShapeType::Square });
    }

    #[test]
    fn test_recolor_type_without_matches_is_noop() {
        let (mut store, _) = setup_store();
        store.add_shape(ShapeType::Circle);
        let changes = record_changes(&mut store);
        store.recolor_type(ShapeType::Square, None);
        assert_eq!(*changes.borrow(), vec![ShapeChange::Init]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let (mut store, _) = setup_store();
        store.add_shape(ShapeType::Square);
        let mut copy = store.snapshot();
        copy[0].color = "#000000".to_string();
        copy.clear();
        assert_eq!(store.snapshot().len(), 1);
        assert_ne!(store.snapshot()[0].color, "#000000");
    }

    #[test]
    fn test_state_survives_reload() {
        let (mut store, storage) = setup_store();
        store.add_shape(ShapeType::Square);
        let circle = store.add_shape(ShapeType::Circle);
        store.recolor_shape(&circle.id, Some("#112233"));

        let reloaded = ShapeStore::new(SHAPES, Box::new(storage));
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn test_malformed_state_loads_empty() {
        let cases = [
            "{not json",
            r#"{"shapes": 5}"#,
            r#"{"other": []}"#,
            r#"{"shapes": [{"id": "x", "type": "triangle", "color": "red", "createdAt": 1}]}"#,
            "null",
        ];
        for raw in cases {
            let storage = MemoryStorage::new();
            storage.set_item(SHAPES.storage_key, raw).unwrap();
            let store = ShapeStore::new(SHAPES, Box::new(storage));
            assert!(store.snapshot().is_empty(), "{}", raw);
        }
    }

    #[test]
    fn test_write_failure_keeps_change_in_memory() {
        let mut store = ShapeStore::new(SHAPES, Box::new(BrokenStorage));
        let changes = record_changes(&mut store);
        store.add_shape(ShapeType::Circle);
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(changes.borrow().len(), 2);
    }
}
