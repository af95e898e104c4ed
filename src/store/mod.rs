//! Board State Stores
//!
//! Each store owns its board's records, persists the full state after every
//! mutation and notifies listeners with a change descriptor.

mod kanban;
mod shapes;

pub use kanban::{KanbanChange, KanbanStore};
pub use shapes::{count_by_type, ShapeChange, ShapeStore};

/// Capability token returned by `subscribe`; only its holder can unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback: read-only snapshot plus what changed
pub type Listener<S, C> = Box<dyn FnMut(&S, &C)>;

/// Registered listeners, notified in subscription order
pub struct Listeners<S: ?Sized, C> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<S, C>)>,
}

impl<S: ?Sized, C> Default for Listeners<S, C> {
    fn default() -> Self {
        Self { next_id: 0, entries: Vec::new() }
    }
}

impl<S: ?Sized, C> Listeners<S, C> {
    pub fn add(&mut self, listener: Listener<S, C>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Call one listener directly (the initial `init` delivery)
    pub fn notify_one(&mut self, id: ListenerId, snapshot: &S, change: &C) {
        if let Some((_, listener)) = self.entries.iter_mut().find(|(entry, _)| *entry == id) {
            listener(snapshot, change);
        }
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, snapshot: &S, change: &C) {
        for (_, listener) in self.entries.iter_mut() {
            listener(snapshot, change);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listener_tokens_are_independent() {
        let mut listeners: Listeners<[i32], &'static str> = Listeners::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log_a = seen.clone();
        let a = listeners.add(Box::new(move |_, change| log_a.borrow_mut().push(format!("a:{}", change))));
        let log_b = seen.clone();
        let b = listeners.add(Box::new(move |_, change| log_b.borrow_mut().push(format!("b:{}", change))));
        assert_ne!(a, b);

        listeners.notify(&[1, 2], &"first");
        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        listeners.notify(&[1, 2], &"second");

        assert_eq!(*seen.borrow(), vec!["a:first", "b:first", "b:second"]);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_notify_one_targets_single_listener() {
        let mut listeners: Listeners<[i32], u8> = Listeners::default();
        let count = Rc::new(RefCell::new(0));
        let other = Rc::new(RefCell::new(0));

        let c = count.clone();
        let id = listeners.add(Box::new(move |_, _| *c.borrow_mut() += 1));
        let o = other.clone();
        listeners.add(Box::new(move |_, _| *o.borrow_mut() += 1));

        listeners.notify_one(id, &[], &0);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(*other.borrow(), 0);
    }
}
