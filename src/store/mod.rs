// Remote table store collaborator - generic select/insert/delete surface.
//
// The pipeline never issues native joins; every lookup is a single-table
// select with equality filters, and cross-table assembly happens in
// pipeline code.

use color_eyre::{eyre::OptionExt, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

mod memory;

pub use memory::MemoryStore;

/// Row predicate understood by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Column equals the given value.
    Eq { column: &'static str, value: String },
    /// Column is null or absent.
    IsNull { column: &'static str },
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self::Eq {
            column,
            value: value.into(),
        }
    }

    pub fn is_null(column: &'static str) -> Self {
        Self::IsNull { column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
        }
    }
}

/// Generic table operations of the remote data store. Rows travel as JSON
/// objects; `insert` returns the inserted rows including every
/// store-assigned column (id, creation timestamp).
#[cfg_attr(test, mockall::automock)]
pub trait TableStore: Send + Sync {
    fn select(
        &self,
        table: &str,
        filters: Vec<Filter>,
        order: Option<Order>,
    ) -> impl std::future::Future<Output = Result<Vec<Value>>> + Send;

    fn insert(
        &self,
        table: &str,
        rows: Vec<Value>,
    ) -> impl std::future::Future<Output = Result<Vec<Value>>> + Send;

    fn delete(
        &self,
        table: &str,
        filters: Vec<Filter>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Fetch all matching rows and deserialize each into `T`.
pub async fn select_all<T, S>(
    store: &S,
    table: &str,
    filters: Vec<Filter>,
    order: Option<Order>,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: TableStore,
{
    let rows = store.select(table, filters, order).await?;
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        results.push(serde_json::from_value(row)?);
    }
    Ok(results)
}

/// Fetch the first matching row and deserialize into `T`, or `None` if no
/// rows matched.
pub async fn select_optional<T, S>(
    store: &S,
    table: &str,
    filters: Vec<Filter>,
) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: TableStore,
{
    let rows = store.select(table, filters, None).await?;
    match rows.into_iter().next() {
        Some(row) => Ok(Some(serde_json::from_value(row)?)),
        None => Ok(None),
    }
}

/// Insert a single row and deserialize the stored result, with every
/// store-assigned column filled in. Errors if the store returns nothing.
pub async fn insert_one<T, R, S>(store: &S, table: &str, row: &T) -> Result<R>
where
    T: Serialize,
    R: DeserializeOwned,
    S: TableStore,
{
    let payload = vec![serde_json::to_value(row)?];
    let returned = store
        .insert(table, payload)
        .await?
        .into_iter()
        .next()
        .ok_or_eyre("store returned no row for insert")?;
    Ok(serde_json::from_value(returned)?)
}

/// Insert a batch of rows, discarding whatever the store returns.
pub async fn insert_rows<T, S>(store: &S, table: &str, rows: &[T]) -> Result<()>
where
    T: Serialize,
    S: TableStore,
{
    if rows.is_empty() {
        return Ok(());
    }
    let payload = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.insert(table, payload).await?;
    Ok(())
}
