//! In-process store. Ids come from a counter that never goes backwards, so
//! deleted ids are not reused.

use super::RiddleStore;
use crate::error::AppError;
use crate::model::{Riddle, RiddleProperty};
use crate::pagination::{Direction, Page, PageRequest, SortOrder};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, String>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryRiddleStore {
    inner: RwLock<Inner>,
}

impl MemoryRiddleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal("riddle store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal("riddle store lock poisoned".into()))
    }
}

fn compare(a: &Riddle, b: &Riddle, sort: &[SortOrder]) -> Ordering {
    for order in sort {
        let ord = match order.property {
            RiddleProperty::Id => a.id.cmp(&b.id),
            RiddleProperty::Name => a.name.cmp(&b.name),
        };
        let ord = match order.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.id.cmp(&b.id)
}

#[async_trait]
impl RiddleStore for MemoryRiddleStore {
    async fn insert(&self, name: &str) -> Result<Riddle, AppError> {
        let mut inner = self.write()?;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(id, name.to_string());
        Ok(Riddle::with_id(id, name))
    }

    async fn replace(&self, riddle: &Riddle) -> Result<Option<Riddle>, AppError> {
        let Some(id) = riddle.id else {
            return Ok(None);
        };
        let mut inner = self.write()?;
        match inner.rows.get_mut(&id) {
            Some(name) => {
                *name = riddle.name.clone();
                Ok(Some(riddle.clone()))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Riddle>, AppError> {
        let inner = self.read()?;
        Ok(inner.rows.get(&id).map(|name| Riddle::with_id(id, name.clone())))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Riddle>, AppError> {
        let inner = self.read()?;
        let mut all: Vec<Riddle> = inner
            .rows
            .iter()
            .map(|(id, name)| Riddle::with_id(*id, name.clone()))
            .collect();
        drop(inner);
        all.sort_by(|a, b| compare(a, b, &request.sort));
        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .collect();
        Ok(Page {
            content,
            total,
            request: request.clone(),
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.read()?.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryRiddleStore::new();
        let a = store.insert("a").await.unwrap();
        let b = store.insert("b").await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = MemoryRiddleStore::new();
        let a = store.insert("a").await.unwrap();
        assert!(store.delete_by_id(a.id.unwrap()).await.unwrap());
        assert!(!store.delete_by_id(a.id.unwrap()).await.unwrap());
        let b = store.insert("b").await.unwrap();
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn save_dispatches_on_id() {
        let store = MemoryRiddleStore::new();
        let created = store.save(&Riddle::new("AAAAAAAAAA")).await.unwrap();
        let id = created.id.unwrap();
        let updated = store.save(&Riddle::with_id(id, "BBBBBBBBBB")).await.unwrap();
        assert_eq!(updated, Riddle::with_id(id, "BBBBBBBBBB"));
        assert_eq!(store.find_by_id(id).await.unwrap(), Some(updated));
        assert_eq!(store.count().await.unwrap(), 1);

        let err = store.save(&Riddle::with_id(999, "x")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_all_pages_and_sorts() {
        let store = MemoryRiddleStore::new();
        for name in ["c", "a", "b", "a"] {
            store.insert(name).await.unwrap();
        }
        let page = store.find_all(&PageRequest::new(0, 3)).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.content.iter().map(|r| r.id.unwrap()).collect::<Vec<_>>(), vec![1, 2, 3]);

        let page = store.find_all(&PageRequest::new(1, 3)).await.unwrap();
        assert_eq!(page.content.len(), 1);

        let by_name = PageRequest::new(0, 10).sorted_by(RiddleProperty::Name, Direction::Desc);
        let page = store.find_all(&by_name).await.unwrap();
        let order: Vec<(String, i64)> = page.content.into_iter().map(|r| (r.name, r.id.unwrap())).collect();
        assert_eq!(
            order,
            vec![("c".into(), 1), ("b".into(), 3), ("a".into(), 2), ("a".into(), 4)]
        );

        let by_id_desc = PageRequest::new(0, 10).sorted_by(RiddleProperty::Id, Direction::Desc);
        let page = store.find_all(&by_id_desc).await.unwrap();
        assert_eq!(page.content[0].id, Some(4));
    }
}
