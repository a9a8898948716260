use color_eyre::Result;

use super::{Catalog, CHAPTERS, COURSES, FLASH_CARDS, QUIZ_QUESTIONS};
use crate::services::auth::SessionProvider;
use crate::store::{Filter, TableStore};

pub enum DeleteCourseOutcome {
    Deleted,
    /// No active session; nothing was removed.
    AuthenticationRequired,
    /// A cascade step failed; earlier steps may already have committed.
    Failed,
}

impl<S: TableStore, A: SessionProvider> Catalog<S, A> {
    /// Remove a course and every row hanging off it. Children go first so
    /// stores that enforce referential integrity accept the order; each
    /// statement filters by course id and so covers chapter-scoped and
    /// legacy rows alike.
    pub async fn delete_course(&self, id: &str) -> Result<DeleteCourseOutcome> {
        if self.sessions.current_session().await?.is_none() {
            tracing::error!("course deletion attempted without an active session");
            return Ok(DeleteCourseOutcome::AuthenticationRequired);
        }

        match self.cascade(id).await {
            Ok(()) => {
                tracing::info!("course {id} and related rows deleted");
                Ok(DeleteCourseOutcome::Deleted)
            }
            Err(e) => {
                tracing::error!("deletion of course {id} failed: {e}");
                Ok(DeleteCourseOutcome::Failed)
            }
        }
    }

    async fn cascade(&self, course_id: &str) -> Result<()> {
        self.store
            .delete(FLASH_CARDS, vec![Filter::eq("course_id", course_id)])
            .await?;
        self.store
            .delete(QUIZ_QUESTIONS, vec![Filter::eq("course_id", course_id)])
            .await?;
        self.store
            .delete(CHAPTERS, vec![Filter::eq("course_id", course_id)])
            .await?;
        self.store
            .delete(COURSES, vec![Filter::eq("id", course_id)])
            .await?;
        Ok(())
    }
}
