use crate::domain::errors::StoreError;
use crate::ports::outbound::EntityStore;
use parking_lot::RwLock;
use shared_types::{EntityId, Resource};

struct Inner<E> {
    entities: Vec<E>,
    next_id: u64,
}

/// In-memory entity store.
///
/// Keeps insertion order, so `find_all` and first-match lookups are
/// deterministic. Ids are sequential decimal strings.
pub struct InMemoryStore<E> {
    inner: RwLock<Inner<E>>,
}

impl<E: Resource> InMemoryStore<E> {
    pub fn new() -> Self {
        Self::with_entities(Vec::new())
    }

    /// Seed the store. Fresh ids continue after the largest numeric id seen.
    pub fn with_entities(entities: Vec<E>) -> Self {
        let next_id = entities
            .iter()
            .filter_map(|e| e.id().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);

        Self {
            inner: RwLock::new(Inner { entities, next_id }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Resource> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Resource> EntityStore<E> for InMemoryStore<E> {
    fn find_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        Ok(self
            .inner
            .read()
            .entities
            .iter()
            .find(|e| e.id() == id)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.inner.read().entities.clone())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<E>, StoreError> {
        Ok(self
            .inner
            .read()
            .entities
            .iter()
            .find(|e| e.name() == name)
            .cloned())
    }

    fn save(&self, mut entity: E) -> Result<E, StoreError> {
        let mut inner = self.inner.write();

        if entity.id().is_empty() {
            let id: EntityId = inner.next_id.to_string();
            inner.next_id += 1;
            entity.set_id(id);
            inner.entities.push(entity.clone());
            return Ok(entity);
        }

        match inner.entities.iter_mut().find(|e| e.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(StoreError::UnknownId {
                kind: E::KIND,
                id: entity.id().to_string(),
            }),
        }
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        let before = inner.entities.len();
        inner.entities.retain(|e| e.id() != id);
        Ok(inner.entities.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Service;

    fn service(id: &str, name: &str, group_id: u64) -> Service {
        Service {
            id: id.into(),
            name: name.into(),
            group_id,
            datacenter_id: "1".into(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = InMemoryStore::<Service>::new();

        let a = store.save(service("", "a", 1)).unwrap();
        let b = store.save(service("", "b", 1)).unwrap();

        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_seeded_store_continues_after_max_id() {
        let store =
            InMemoryStore::with_entities(vec![service("1", "test", 1), service("2", "test2", 2)]);

        let created = store.save(service("", "test3", 1)).unwrap();
        assert_eq!(created.id, "3");
    }

    #[test]
    fn test_save_with_id_replaces_in_place() {
        let store =
            InMemoryStore::with_entities(vec![service("1", "test", 1), service("2", "test2", 2)]);

        let mut updated = service("1", "renamed", 1);
        updated.datacenter_id = "9".into();
        store.save(updated).unwrap();

        let all = store.find_all().unwrap();
        assert_eq!(all[0].name, "renamed");
        assert_eq!(all[0].datacenter_id, "9");
        assert_eq!(all[1].name, "test2");
    }

    #[test]
    fn test_save_unknown_id_is_rejected() {
        let store = InMemoryStore::<Service>::new();
        let result = store.save(service("42", "ghost", 1));
        assert!(matches!(result, Err(StoreError::UnknownId { kind: "service", .. })));
    }

    #[test]
    fn test_lookups_and_delete() {
        let store = InMemoryStore::with_entities(vec![service("1", "test", 1)]);

        assert!(store.find_by_id("1").unwrap().is_some());
        assert!(store.find_by_name("test").unwrap().is_some());
        assert!(store.find_by_name("nope").unwrap().is_none());

        assert!(store.delete("1").unwrap());
        assert!(!store.delete("1").unwrap());
        assert!(store.is_empty());
    }
}
