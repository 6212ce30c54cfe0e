//! [`MemoryRepository`]: a [`Repository`] over an owned `Vec`.
//!
//! Each instance owns its collection; there is no shared or static state, so
//! every test or server run constructs its own.

use std::convert::Infallible;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repository::{Entity, Repository};

#[derive(Debug)]
pub struct MemoryRepository<T> {
  items: RwLock<Vec<T>>,
}

impl<T> MemoryRepository<T> {
  pub fn new() -> Self { Self { items: RwLock::new(Vec::new()) } }
}

impl<T> Default for MemoryRepository<T> {
  fn default() -> Self { Self::new() }
}

impl<T: Entity> Repository<T> for MemoryRepository<T> {
  type Error = Infallible;

  async fn add(&self, entity: T) -> Result<T, Infallible> {
    self.items.write().await.push(entity.clone());
    Ok(entity)
  }

  async fn get_all(&self) -> Result<Vec<T>, Infallible> {
    Ok(self.items.read().await.clone())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, Infallible> {
    Ok(self.items.read().await.iter().find(|e| e.id() == id).cloned())
  }

  async fn update(&self, entity: T) -> Result<Option<T>, Infallible> {
    let mut items = self.items.write().await;
    match items.iter_mut().find(|e| e.id() == entity.id()) {
      Some(slot) => {
        *slot = entity.clone();
        Ok(Some(entity))
      }
      None => Ok(None),
    }
  }

  async fn delete(&self, id: Uuid) -> Result<bool, Infallible> {
    let mut items = self.items.write().await;
    let before = items.len();
    items.retain(|e| e.id() != id);
    Ok(items.len() != before)
  }

  async fn find_where<'a, P>(&'a self, predicate: P) -> Result<Vec<T>, Infallible>
  where
    P: Fn(&T) -> bool + Send + 'a,
  {
    Ok(
      self
        .items
        .read()
        .await
        .iter()
        .filter(|e| predicate(*e))
        .cloned()
        .collect(),
    )
  }
}
