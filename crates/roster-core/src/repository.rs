//! The `Repository` trait: the persistence seam the stores delegate to.
//!
//! The trait is implemented by storage backends ([`MemoryRepository`] here,
//! `SqliteStore` in `roster-store-sqlite`). The stores depend on this
//! abstraction, never on a concrete backend.
//!
//! [`MemoryRepository`]: crate::memory::MemoryRepository

use std::future::Future;

use uuid::Uuid;

/// A record a [`Repository`] can hold.
pub trait Entity: Clone + Send + Sync + 'static {
  /// The server-assigned identifier; never changes once set.
  fn id(&self) -> Uuid;
}

/// Storage for one entity type.
///
/// `get_all` returns records in insertion order. All methods return `Send`
/// futures so stores built on a repository can be shared across an axum
/// router.
pub trait Repository<T: Entity>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record and return it as stored.
  fn add(&self, entity: T) -> impl Future<Output = Result<T, Self::Error>> + Send + '_;

  fn get_all(&self) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send + '_;

  /// Returns `None` if no record has this id.
  fn get_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send + '_;

  /// Replace the stored record with the same id. Returns `None` if no record
  /// has that id.
  fn update(
    &self,
    entity: T,
  ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send + '_;

  /// Remove a record. Returns `false` if nothing was removed.
  fn delete(&self, id: Uuid) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All records for which `predicate` holds, in insertion order.
  fn find_where<'a, P>(
    &'a self,
    predicate: P,
  ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send + 'a
  where
    P: Fn(&T) -> bool + Send + 'a;
}
