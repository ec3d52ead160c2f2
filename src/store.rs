//! In-memory keyed collections backing the repositories.
//!
//! Each collection owns one readers-writer lock. Reads share it, mutations take
//! it exclusively, and nothing ever holds two collections' locks at once.

use std::collections::HashMap;

use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A stored record with a server-assigned identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Used in `NotFound` messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> OffsetDateTime;
}

pub struct Collection<T> {
    items: RwLock<HashMap<Uuid, T>>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// All entities, oldest first, ties broken by id.
    pub fn all(&self) -> Vec<T> {
        self.filter(|_| true)
    }

    pub fn filter<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut out: Vec<T> = self
            .items
            .read()
            .values()
            .filter(|item| pred(item))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        out
    }

    /// First entity matching `pred`, in no particular order.
    pub fn find<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.read().values().find(|item| pred(item)).cloned()
    }

    pub fn get(&self, id: Uuid) -> AppResult<T> {
        self.items
            .read()
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound(T::KIND))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(Uuid) -> T,
    {
        let id = Uuid::new_v4();
        let item = build(id);
        self.items.write().insert(id, item.clone());
        item
    }

    /// Like `insert_with`, but `build` sees the current contents under the
    /// write lock and may refuse the insert.
    pub fn try_insert_with<F>(&self, build: F) -> AppResult<T>
    where
        F: FnOnce(Uuid, &HashMap<Uuid, T>) -> AppResult<T>,
    {
        let mut items = self.items.write();
        let id = Uuid::new_v4();
        let item = build(id, &items)?;
        items.insert(id, item.clone());
        Ok(item)
    }

    /// Replaces the entity at `id` with whatever `f` builds from the current
    /// value. `f` runs under the write lock and also sees every other entity.
    pub fn update_with<F>(&self, id: Uuid, f: F) -> AppResult<T>
    where
        F: FnOnce(&T, &HashMap<Uuid, T>) -> AppResult<T>,
    {
        let mut items = self.items.write();
        let updated = {
            let original = items.get(&id).ok_or(AppError::NotFound(T::KIND))?;
            f(original, &items)?
        };
        items.insert(id, updated.clone());
        Ok(updated)
    }

    pub fn remove(&self, id: Uuid) -> AppResult<T> {
        self.items
            .write()
            .remove(&id)
            .ok_or(AppError::NotFound(T::KIND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Uuid,
        body: String,
        created_at: OffsetDateTime,
    }

    impl Entity for Note {
        const KIND: &'static str = "note";

        fn id(&self) -> Uuid {
            self.id
        }
        fn created_at(&self) -> OffsetDateTime {
            self.created_at
        }
    }

    fn note(body: &str) -> impl FnOnce(Uuid) -> Note + '_ {
        move |id| Note {
            id,
            body: body.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn insert_then_get() {
        let c = Collection::new();
        let n = c.insert_with(note("hello"));
        assert_eq!(c.get(n.id).unwrap(), n);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn missing_id_is_not_found() {
        let c: Collection<Note> = Collection::new();
        let err = c.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound("note")));
        assert!(matches!(c.remove(Uuid::new_v4()), Err(AppError::NotFound(_))));
        assert!(matches!(
            c.update_with(Uuid::new_v4(), |n, _| Ok(n.clone())),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn all_is_ordered_by_creation_then_id() {
        let c = Collection::new();
        let base = OffsetDateTime::now_utc();
        for (i, body) in ["c", "a", "b"].into_iter().enumerate() {
            c.insert_with(|id| Note {
                id,
                body: body.into(),
                created_at: base + time::Duration::seconds(i as i64),
            });
        }
        let bodies: Vec<_> = c.all().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["c", "a", "b"]);

        // Two calls agree even when timestamps collide.
        let same = Collection::new();
        for body in ["x", "y", "z"] {
            same.insert_with(|id| Note {
                id,
                body: body.into(),
                created_at: base,
            });
        }
        assert_eq!(same.all(), same.all());
    }

    #[test]
    fn try_insert_can_refuse() {
        let c = Collection::new();
        c.insert_with(note("taken"));
        let err = c
            .try_insert_with(|id, existing| {
                if existing.values().any(|n| n.body == "taken") {
                    return Err(AppError::Duplicate("body already exists".into()));
                }
                Ok(note("taken")(id))
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn update_with_error_leaves_value_unchanged() {
        let c = Collection::new();
        let n = c.insert_with(note("before"));
        let err = c
            .update_with(n.id, |_, _| Err(AppError::Validation("no".into())))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(c.get(n.id).unwrap().body, "before");
    }

    #[test]
    fn remove_deletes() {
        let c = Collection::new();
        let n = c.insert_with(note("gone"));
        c.remove(n.id).unwrap();
        assert!(c.get(n.id).is_err());
        assert!(c.find(|x| x.body == "gone").is_none());
    }
}
