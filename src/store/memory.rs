use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use color_eyre::{eyre::eyre, Result};
use serde_json::{Map, Value};
use ulid::Ulid;

use super::{Filter, Order, TableStore};

/// In-process [`TableStore`] keeping rows in plain maps. Assigns `id` and
/// `created_at` on insert the way the remote store would. Handles are
/// cheap clones sharing one set of tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: Mutex<HashMap<String, Vec<Map<String, Value>>>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Microseconds since the epoch plus a sequence offset, so timestamps
    /// stay strictly increasing even within one tick.
    fn next_created_at(&self) -> String {
        let base = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);
        let offset = self.inner.sequence.fetch_add(1, Ordering::SeqCst);
        (base + offset).to_string()
    }
}

fn matches(row: &Map<String, Value>, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => row
            .get(*column)
            .and_then(Value::as_str)
            .is_some_and(|v| v == value),
        Filter::IsNull { column } => row.get(*column).is_none_or(Value::is_null),
    }
}

fn matches_all(row: &Map<String, Value>, filters: &[Filter]) -> bool {
    filters.iter().all(|f| matches(row, f))
}

fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or(0.0)
            .total_cmp(&y.as_f64().unwrap_or(0.0)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

impl TableStore for MemoryStore {
    async fn select(
        &self,
        table: &str,
        filters: Vec<Filter>,
        order: Option<Order>,
    ) -> Result<Vec<Value>> {
        let tables = self
            .inner
            .tables
            .lock()
            .map_err(|_| eyre!("store lock poisoned"))?;

        let mut rows: Vec<Map<String, Value>> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ordering = compare(
                    a.get(order.column).unwrap_or(&Value::Null),
                    b.get(order.column).unwrap_or(&Value::Null),
                );
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        Ok(rows.into_iter().map(Value::Object).collect())
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>> {
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut row) = row else {
                return Err(eyre!("insert into {table} expects JSON object rows"));
            };
            if row.get("id").is_none_or(Value::is_null) {
                row.insert("id".to_string(), Value::String(Ulid::new().to_string()));
            }
            if row.get("created_at").is_none_or(Value::is_null) {
                row.insert(
                    "created_at".to_string(),
                    Value::String(self.next_created_at()),
                );
            }
            stored.push(row);
        }

        let mut tables = self
            .inner
            .tables
            .lock()
            .map_err(|_| eyre!("store lock poisoned"))?;
        tables
            .entry(table.to_string())
            .or_default()
            .extend(stored.iter().cloned());

        Ok(stored.into_iter().map(Value::Object).collect())
    }

    async fn delete(&self, table: &str, filters: Vec<Filter>) -> Result<()> {
        let mut tables = self
            .inner
            .tables
            .lock()
            .map_err(|_| eyre!("store lock poisoned"))?;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !matches_all(row, &filters));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();
        let rows = store
            .insert("courses", vec![json!({ "title": "Rust" })])
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0]["id"].is_string());
        assert!(rows[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn select_filters_on_equality_and_null() {
        let store = MemoryStore::new();
        store
            .insert(
                "quiz_questions",
                vec![
                    json!({ "question": "scoped", "course_id": "c1", "chapter_id": "ch1" }),
                    json!({ "question": "legacy", "course_id": "c1" }),
                    json!({ "question": "other", "course_id": "c2", "chapter_id": null }),
                ],
            )
            .await
            .unwrap();

        let legacy = store
            .select(
                "quiz_questions",
                vec![Filter::eq("course_id", "c1"), Filter::is_null("chapter_id")],
                None,
            )
            .await
            .unwrap();

        assert_eq!(legacy.len(), 1);
        assert_eq!(legacy[0]["question"], "legacy");
    }

    #[tokio::test]
    async fn select_orders_rows() {
        let store = MemoryStore::new();
        store
            .insert(
                "chapters",
                vec![
                    json!({ "title": "b", "order_index": 1 }),
                    json!({ "title": "a", "order_index": 0 }),
                ],
            )
            .await
            .unwrap();

        let rows = store
            .select("chapters", vec![], Some(Order::asc("order_index")))
            .await
            .unwrap();
        assert_eq!(rows[0]["title"], "a");

        let rows = store
            .select("chapters", vec![], Some(Order::desc("order_index")))
            .await
            .unwrap();
        assert_eq!(rows[0]["title"], "b");
    }

    #[tokio::test]
    async fn delete_removes_matching_rows_only() {
        let store = MemoryStore::new();
        store
            .insert(
                "flash_cards",
                vec![
                    json!({ "question": "keep", "course_id": "c1" }),
                    json!({ "question": "drop", "course_id": "c2" }),
                ],
            )
            .await
            .unwrap();

        store
            .delete("flash_cards", vec![Filter::eq("course_id", "c2")])
            .await
            .unwrap();

        let rows = store.select("flash_cards", vec![], None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["question"], "keep");
    }
}
