//! Upsert and delete-by-id over ordered entity lists.
//!
//! Both helpers return a fresh `Vec` and never touch the input slice, so a
//! reducer can build its next state while the previous one stays intact.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

/// An entity with a stable integer identity.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Position of the first entry whose id matches, if any.
fn position_by_id<T: Identified>(items: &[T], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Replace the entry with the same id in place, or append when absent.
#[must_use]
pub fn put_by_id<T: Identified + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    match position_by_id(items, item.id()) {
        Some(index) => next[index] = item,
        None => next.push(item),
    }
    next
}

/// Remove the entry with the given id.
///
/// Returns `None` when no entry matches so callers can keep their state as is.
#[must_use]
pub fn delete_by_id<T: Identified + Clone>(items: &[T], id: i64) -> Option<Vec<T>> {
    let index = position_by_id(items, id)?;
    let mut next = items.to_vec();
    next.remove(index);
    Some(next)
}
