//! Per-type memo of the empty key
//!
//! Generic statics do not exist, so the memo is one process-wide map keyed by
//! `TypeId`. Entries are leaked once and live for the process. Construction
//! runs outside the lock; if two threads race, the first insert wins and the
//! other candidate is dropped.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

type Registry = HashMap<TypeId, &'static (dyn Any + Send + Sync)>;

static EMPTY_KEYS: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Return the memoized value for `K`, building it with `init` on first use
pub(crate) fn memoized<K: Any + Send + Sync>(init: impl FnOnce() -> K) -> &'static K {
    let id = TypeId::of::<K>();

    if let Some(existing) = EMPTY_KEYS.read().get(&id).copied() {
        return downcast(existing);
    }

    let candidate = init();
    let entry = *EMPTY_KEYS
        .write()
        .entry(id)
        .or_insert_with(|| -> &'static (dyn Any + Send + Sync) { Box::leak(Box::new(candidate)) });
    downcast(entry)
}

fn downcast<K: Any>(entry: &'static (dyn Any + Send + Sync)) -> &'static K {
    entry
        .downcast_ref::<K>()
        .expect("memo entries are keyed by their own TypeId")
}
