//! In-memory record store holding seed users and orders.
//!
//! The default store carries the canonical seed. A JSON seed document can
//! replace it at startup:
//!
//! ```json
//! {
//!   "usuarios": [{ "id": 1, "nombre": "Ana" }],
//!   "pedidos": [{ "idUsuario": 1, "producto": "Computador" }]
//! }
//! ```
//!
//! Orders without an `id` are numbered at construction, continuing after the
//! largest explicit id, the way an identity column would number them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::RecordStore;
use crate::domain::{Order, User, UserId};

/// Errors raised while building a seed store.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be opened or read.
    #[error("read seed file '{path}': {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The seed file is not a valid seed document.
    #[error("parse seed file '{path}': {source}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// Two seed users share an identifier.
    #[error("duplicate user id {0} in seed data")]
    DuplicateUserId(UserId),
    /// No order id is left after the largest explicit one.
    #[error("order ids exhausted: no identity left after {0}")]
    OrderIdsExhausted(i64),
}

#[derive(Debug, Default, Deserialize)]
struct SeedDocument {
    #[serde(default, rename = "usuarios")]
    users: Vec<User>,
    #[serde(default, rename = "pedidos")]
    orders: Vec<Order>,
}

/// Read-only record store backed by seed vectors.
///
/// # Examples
/// ```
/// use order_aggregation::outbound::seed::SeedRecordStore;
///
/// let store = SeedRecordStore::default();
/// assert_eq!(store.users().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SeedRecordStore {
    users: Vec<User>,
    orders: Vec<Order>,
}

impl SeedRecordStore {
    /// Build a store from explicit records.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DuplicateUserId`] when two users share an id and
    /// [`SeedError::OrderIdsExhausted`] when an order needs an id past
    /// `i64::MAX`.
    pub fn new(users: Vec<User>, orders: Vec<Order>) -> Result<Self, SeedError> {
        let mut seen = HashSet::with_capacity(users.len());
        if let Some(duplicate) = users.iter().find(|user| !seen.insert(user.id())) {
            return Err(SeedError::DuplicateUserId(duplicate.id()));
        }

        Ok(Self {
            users,
            orders: assign_order_ids(orders)?,
        })
    }

    /// Load a store from a JSON seed document.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] when the file cannot be read,
    /// [`SeedError::Parse`] when it is not a seed document, and
    /// [`SeedError::DuplicateUserId`] when user ids repeat.
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = read_seed_file(path)?;
        let document: SeedDocument =
            serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            users = document.users.len(),
            orders = document.orders.len(),
            "loaded seed document"
        );
        Self::new(document.users, document.orders)
    }

    /// Seeded users in insertion order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Seeded orders in insertion order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

impl Default for SeedRecordStore {
    fn default() -> Self {
        Self {
            users: vec![User::new(1, "Ana"), User::new(2, "Luis")],
            orders: vec![
                Order::new(1, "Computador").with_id(1),
                Order::new(2, "Teléfono").with_id(2),
            ],
        }
    }
}

#[async_trait]
impl RecordStore for SeedRecordStore {
    async fn list_users(&self) -> Vec<User> {
        self.users.clone()
    }

    async fn list_orders(&self) -> Vec<Order> {
        self.orders.clone()
    }
}

fn assign_order_ids(orders: Vec<Order>) -> Result<Vec<Order>, SeedError> {
    let largest = orders.iter().filter_map(Order::id).max().unwrap_or(0);
    let mut last = largest;
    let mut next_id = largest.checked_add(1);
    orders
        .into_iter()
        .map(|order| {
            if order.id().is_some() {
                return Ok(order);
            }
            let id = next_id.ok_or(SeedError::OrderIdsExhausted(last))?;
            last = id;
            next_id = id.checked_add(1);
            Ok(order.with_id(id))
        })
        .collect()
}

fn read_seed_file(path: &Path) -> Result<String, SeedError> {
    let io_error = |source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        ))
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    directory.read_to_string(Path::new(file_name)).map_err(io_error)
}

#[cfg(test)]
mod tests {
    //! Seed loading and identity assignment.

    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn seed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp seed file");
        file.write_all(contents.as_bytes()).expect("write seed file");
        file
    }

    #[tokio::test]
    async fn default_store_holds_canonical_seed() {
        let store = SeedRecordStore::default();

        assert_eq!(
            store.list_users().await,
            vec![User::new(1, "Ana"), User::new(2, "Luis")]
        );
        assert_eq!(
            store.list_orders().await,
            vec![
                Order::new(1, "Computador").with_id(1),
                Order::new(2, "Teléfono").with_id(2),
            ]
        );
    }

    #[test]
    fn identities_continue_after_largest_explicit_id() {
        let store = SeedRecordStore::new(
            vec![User::new(1, "Ana")],
            vec![
                Order::new(1, "Computador"),
                Order::new(1, "Monitor").with_id(10),
                Order::new(1, "Teclado"),
            ],
        )
        .expect("valid seed");

        let ids: Vec<Option<i64>> = store.orders().iter().map(Order::id).collect();
        assert_eq!(ids, vec![Some(11), Some(10), Some(12)]);
    }

    #[test]
    fn explicit_maximum_id_leaves_no_identity_for_unnumbered_orders() {
        let error = SeedRecordStore::new(
            vec![User::new(1, "Ana")],
            vec![
                Order::new(1, "Computador").with_id(i64::MAX),
                Order::new(1, "Monitor"),
                Order::new(1, "Teclado"),
            ],
        )
        .expect_err("ids past i64::MAX must fail");

        assert!(matches!(error, SeedError::OrderIdsExhausted(i64::MAX)));
    }

    #[test]
    fn explicit_maximum_id_is_kept_when_nothing_needs_numbering() {
        let store = SeedRecordStore::new(
            vec![User::new(1, "Ana")],
            vec![Order::new(1, "Computador").with_id(i64::MAX)],
        )
        .expect("fully numbered seed");

        let ids: Vec<Option<i64>> = store.orders().iter().map(Order::id).collect();
        assert_eq!(ids, vec![Some(i64::MAX)]);
    }

    #[test]
    fn duplicate_user_ids_are_rejected() {
        let error = SeedRecordStore::new(
            vec![User::new(1, "Ana"), User::new(1, "Otra")],
            Vec::new(),
        )
        .expect_err("duplicates must fail");

        assert!(matches!(error, SeedError::DuplicateUserId(id) if id == UserId::new(1)));
    }

    #[test]
    fn loads_seed_document_from_disk() {
        let file = seed_file(
            r#"{
                "usuarios": [{ "id": 7, "nombre": "Marta" }],
                "pedidos": [{ "id": 3, "idUsuario": 7, "producto": "Libro" }]
            }"#,
        );

        let store = SeedRecordStore::from_path(file.path()).expect("seed loads");

        assert_eq!(store.users(), &[User::new(7, "Marta")]);
        assert_eq!(store.orders(), &[Order::new(7, "Libro").with_id(3)]);
    }

    #[rstest]
    #[case::missing_orders(r#"{ "usuarios": [{ "id": 1, "nombre": "Ana" }] }"#, 1, 0)]
    #[case::missing_users(r#"{ "pedidos": [{ "idUsuario": 1, "producto": "Libro" }] }"#, 0, 1)]
    #[case::empty(r"{}", 0, 0)]
    fn absent_collections_default_to_empty(
        #[case] contents: &str,
        #[case] users: usize,
        #[case] orders: usize,
    ) {
        let file = seed_file(contents);

        let store = SeedRecordStore::from_path(file.path()).expect("seed loads");

        assert_eq!(store.users().len(), users);
        assert_eq!(store.orders().len(), orders);
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let file = seed_file("[1, 2, 3]");

        let error = SeedRecordStore::from_path(file.path()).expect_err("parse must fail");

        assert!(matches!(error, SeedError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let error = SeedRecordStore::from_path(&path).expect_err("read must fail");

        assert!(matches!(error, SeedError::Io { .. }));
    }
}
