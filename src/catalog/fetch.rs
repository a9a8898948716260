use color_eyre::Result;
use futures::future::try_join_all;

use super::rows::{CardRow, ChapterRow, CourseRow, QuizRow};
use super::{Catalog, CHAPTERS, COURSES, FLASH_CARDS, QUIZ_QUESTIONS};
use crate::models::{Chapter, Course, FlashCard, QuizQuestion};
use crate::services::auth::SessionProvider;
use crate::store::{select_all, select_optional, Filter, Order, TableStore};

impl<S: TableStore, A: SessionProvider> Catalog<S, A> {
    /// All courses, newest first, each fully aggregated.
    pub async fn fetch_courses(&self) -> Result<Vec<Course>> {
        let rows: Vec<CourseRow> = select_all(
            &self.store,
            COURSES,
            vec![],
            Some(Order::desc("created_at")),
        )
        .await?;

        try_join_all(rows.into_iter().map(|row| self.assemble_course(row))).await
    }

    /// A single course by id, or `None` when no such course exists.
    pub async fn fetch_course_by_id(&self, id: &str) -> Result<Option<Course>> {
        let row: Option<CourseRow> =
            select_optional(&self.store, COURSES, vec![Filter::eq("id", id)]).await?;

        match row {
            Some(row) => Ok(Some(self.assemble_course(row).await?)),
            None => Ok(None),
        }
    }

    /// Join the chapter, quiz and flashcard tables onto one course row.
    /// Chapter details are fetched concurrently; each chapter only reads
    /// rows scoped to its own id.
    async fn assemble_course(&self, row: CourseRow) -> Result<Course> {
        let chapter_rows: Vec<ChapterRow> = select_all(
            &self.store,
            CHAPTERS,
            vec![Filter::eq("course_id", &row.id)],
            Some(Order::asc("order_index")),
        )
        .await?;

        let chapters = try_join_all(
            chapter_rows
                .into_iter()
                .map(|chapter| self.assemble_chapter(chapter)),
        )
        .await?;

        let (quiz_questions, flash_cards) = self.legacy_content(&row.id).await?;

        Ok(row.into_course(chapters, quiz_questions, flash_cards))
    }

    async fn assemble_chapter(&self, row: ChapterRow) -> Result<Chapter> {
        let (quiz_rows, card_rows) = tokio::join!(
            self.chapter_quiz_rows(&row.id),
            self.chapter_card_rows(&row.id),
        );

        let quiz_questions = quiz_rows
            .into_iter()
            .map(QuizRow::into_question)
            .collect::<Result<Vec<_>>>()?;
        let flash_cards = card_rows.into_iter().map(CardRow::into_card).collect();

        Ok(row.into_chapter(quiz_questions, flash_cards))
    }

    /// Quiz and flashcard rows attached directly to the course, predating
    /// the chapter model.
    async fn legacy_content(
        &self,
        course_id: &str,
    ) -> Result<(Vec<QuizQuestion>, Vec<FlashCard>)> {
        let (quiz_rows, card_rows) = tokio::join!(
            self.legacy_quiz_rows(course_id),
            self.legacy_card_rows(course_id),
        );

        let quiz_questions = quiz_rows
            .into_iter()
            .map(QuizRow::into_question)
            .collect::<Result<Vec<_>>>()?;
        let flash_cards = card_rows.into_iter().map(CardRow::into_card).collect();

        Ok((quiz_questions, flash_cards))
    }

    // A failed quiz or flashcard sub-fetch degrades to an empty set for
    // that chapter; assembly of the rest of the course continues.

    async fn chapter_quiz_rows(&self, chapter_id: &str) -> Vec<QuizRow> {
        match select_all(
            &self.store,
            QUIZ_QUESTIONS,
            vec![Filter::eq("chapter_id", chapter_id)],
            None,
        )
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("failed to fetch quiz questions for chapter {chapter_id}: {e}");
                Vec::new()
            }
        }
    }

    async fn chapter_card_rows(&self, chapter_id: &str) -> Vec<CardRow> {
        match select_all(
            &self.store,
            FLASH_CARDS,
            vec![Filter::eq("chapter_id", chapter_id)],
            None,
        )
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("failed to fetch flash cards for chapter {chapter_id}: {e}");
                Vec::new()
            }
        }
    }

    async fn legacy_quiz_rows(&self, course_id: &str) -> Vec<QuizRow> {
        match select_all(
            &self.store,
            QUIZ_QUESTIONS,
            vec![
                Filter::eq("course_id", course_id),
                Filter::is_null("chapter_id"),
            ],
            None,
        )
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("failed to fetch legacy quiz questions for course {course_id}: {e}");
                Vec::new()
            }
        }
    }

    async fn legacy_card_rows(&self, course_id: &str) -> Vec<CardRow> {
        match select_all(
            &self.store,
            FLASH_CARDS,
            vec![
                Filter::eq("course_id", course_id),
                Filter::is_null("chapter_id"),
            ],
            None,
        )
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("failed to fetch legacy flash cards for course {course_id}: {e}");
                Vec::new()
            }
        }
    }
}
