use color_eyre::{eyre::eyre, Result};
use serde_json::{json, Value};

use coursedeck::catalog::Catalog;
use coursedeck::models::{NewChapter, NewCourse, NewFlashCard, NewQuizQuestion};
use coursedeck::services::auth::{Session, SessionProvider};
use coursedeck::store::{Filter, MemoryStore, Order, TableStore};

/// Session provider with a fixed answer, standing in for the remote auth
/// API.
#[derive(Clone)]
pub struct StubSessions {
    session: Option<Session>,
}

impl StubSessions {
    pub fn signed_in() -> Self {
        Self {
            session: Some(Session {
                user_id: "admin".to_string(),
                email: "admin@example.com".to_string(),
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { session: None }
    }
}

impl SessionProvider for StubSessions {
    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }
}

/// Catalog over a fresh in-process store, plus a second handle onto the
/// same tables for seeding and orphan checks.
pub fn create_test_catalog() -> (Catalog<MemoryStore, StubSessions>, MemoryStore) {
    let store = MemoryStore::new();
    let catalog = Catalog::new(store.clone(), StubSessions::signed_in());
    (catalog, store)
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FailOp {
    Select,
    Insert,
    Delete,
}

/// Store wrapper that fails one operation on one table and forwards
/// everything else.
pub struct FailingStore {
    inner: MemoryStore,
    op: FailOp,
    table: &'static str,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, op: FailOp, table: &'static str) -> Self {
        Self { inner, op, table }
    }
}

impl TableStore for FailingStore {
    async fn select(
        &self,
        table: &str,
        filters: Vec<Filter>,
        order: Option<Order>,
    ) -> Result<Vec<Value>> {
        if self.op == FailOp::Select && table == self.table {
            return Err(eyre!("injected select failure on {table}"));
        }
        self.inner.select(table, filters, order).await
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>> {
        if self.op == FailOp::Insert && table == self.table {
            return Err(eyre!("injected insert failure on {table}"));
        }
        self.inner.insert(table, rows).await
    }

    async fn delete(&self, table: &str, filters: Vec<Filter>) -> Result<()> {
        if self.op == FailOp::Delete && table == self.table {
            return Err(eyre!("injected delete failure on {table}"));
        }
        self.inner.delete(table, filters).await
    }
}

pub fn question(text: &str, options: [&str; 4], correct: &str) -> NewQuizQuestion {
    NewQuizQuestion {
        id: format!("draft-q-{text}"),
        question: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct.to_string(),
    }
}

pub fn card(front: &str, back: &str) -> NewFlashCard {
    NewFlashCard {
        id: format!("draft-fc-{front}"),
        question: front.to_string(),
        answer: back.to_string(),
        color_code: "#F2FCE2".to_string(),
    }
}

pub fn chapter(
    title: &str,
    quiz_questions: Vec<NewQuizQuestion>,
    flash_cards: Vec<NewFlashCard>,
) -> NewChapter {
    NewChapter {
        id: format!("draft-ch-{title}"),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        order_index: 0,
        video_url: None,
        quiz_questions,
        flash_cards,
    }
}

pub fn sample_course() -> NewCourse {
    NewCourse {
        title: "Rust Fundamentals".to_string(),
        category: "Programming".to_string(),
        description: "Ownership, borrowing and the rest".to_string(),
        thumbnail_url: "https://example.com/rust.png".to_string(),
        video_url: None,
        duration: "4 weeks".to_string(),
        level: "Beginner".to_string(),
        featured: true,
        chapters: vec![
            chapter(
                "Getting Started",
                vec![question(
                    "What installs the toolchain?",
                    ["rustup", "cargo", "npm", "pip"],
                    "rustup",
                )],
                vec![card("What is a crate?", "A compilation unit")],
            ),
            chapter(
                "Ownership",
                vec![question(
                    "How many owners can a value have?",
                    ["1", "2", "3", "4"],
                    "1",
                )],
                vec![card("What does a move do?", "Transfers ownership")],
            ),
        ],
        quiz_questions: Vec::new(),
        flash_cards: Vec::new(),
    }
}

/// Insert a bare course row, bypassing the writer, and return its id.
pub async fn seed_course_row(store: &MemoryStore, title: &str) -> String {
    let rows = store
        .insert(
            "courses",
            vec![json!({
                "title": title,
                "category": "Programming",
                "description": "seeded",
                "thumbnailurl": "https://example.com/thumb.png",
                "duration": "1 hour",
                "level": "Beginner",
            })],
        )
        .await
        .expect("failed to seed course row");
    rows[0]["id"]
        .as_str()
        .expect("seeded course row has no id")
        .to_string()
}
