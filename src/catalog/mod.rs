// Catalog pipeline - assembles nested courses out of the store's flat
// tables and normalizes authored courses back into them.

use crate::services::auth::SessionProvider;
use crate::store::TableStore;

mod create;
mod delete;
mod fetch;
mod rows;

pub use create::{CourseWriteReport, CreateCourseOutcome, SkippedWrite};
pub use delete::DeleteCourseOutcome;

pub(crate) const COURSES: &str = "courses";
pub(crate) const CHAPTERS: &str = "chapters";
pub(crate) const QUIZ_QUESTIONS: &str = "quiz_questions";
pub(crate) const FLASH_CARDS: &str = "flash_cards";

/// The four-operation consumer surface over the remote store: list, fetch,
/// create, delete. Joins between the four tables happen here, never at the
/// store.
pub struct Catalog<S, A> {
    store: S,
    sessions: A,
}

impl<S: TableStore, A: SessionProvider> Catalog<S, A> {
    pub fn new(store: S, sessions: A) -> Self {
        Self { store, sessions }
    }
}
