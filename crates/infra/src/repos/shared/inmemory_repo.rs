use barber_reminders_domain::Entity;
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

/// Replaces the stored entity with the same id, inserts it if there is none
pub fn upsert<I: PartialEq, T: Clone + Entity<I>>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|item| item.id() == val.id()) {
        Some(existing) => *existing = val.clone(),
        None => collection.push(val.clone()),
    }
}

pub fn find<I: PartialEq, T: Clone + Entity<I>>(val_id: &I, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == *val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

/// Applies `update` to the entity with the given id while holding the lock,
/// which makes check and write a single atomic step.
/// Returns whatever `update` returns, or `None` if the entity does not exist.
pub fn update_one<I: PartialEq, T: Entity<I>, R, U: FnOnce(&mut T) -> R>(
    val_id: &I,
    collection: &Mutex<Vec<T>>,
    update: U,
) -> Option<R> {
    let mut collection = collection.lock().unwrap();
    collection
        .iter_mut()
        .find(|item| item.id() == *val_id)
        .map(update)
}
