use color_eyre::{eyre::OptionExt, Result};

use super::rows::{ChapterRow, CourseRow, NewCardRow, NewChapterRow, NewCourseRow, NewQuizRow};
use super::{Catalog, CHAPTERS, COURSES, FLASH_CARDS, QUIZ_QUESTIONS};
use crate::models::{Course, NewCourse, NewFlashCard, NewQuizQuestion};
use crate::services::auth::SessionProvider;
use crate::store::{insert_one, insert_rows, TableStore};

pub enum CreateCourseOutcome {
    /// The course row was created. Carries the canonical read-back plus any
    /// sub-writes that were skipped after individual failures.
    Created(CourseWriteReport),
    /// No active session; nothing was written.
    AuthenticationRequired,
}

pub struct CourseWriteReport {
    /// The course as the store now holds it, store-assigned ids included.
    pub course: Course,
    pub skipped: Vec<SkippedWrite>,
}

/// A sub-write the writer gave up on while the rest of the course went
/// through. Callers that want all-or-nothing can delete the course again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedWrite {
    Chapter { title: String, reason: String },
    QuizBatch { chapter_title: String, reason: String },
    FlashCardBatch { chapter_title: String, reason: String },
    LegacyQuizBatch { reason: String },
    LegacyFlashCardBatch { reason: String },
}

impl<S: TableStore, A: SessionProvider> Catalog<S, A> {
    /// Publish a course: the course row first, then chapters in input order
    /// (their position becomes `order_index`, overriding whatever the input
    /// carried), then each successful chapter's quiz and flashcard rows,
    /// then chapter-less legacy items. Later steps consume identifiers the
    /// store assigned in earlier ones, so the sequence never runs in
    /// parallel. There is no rollback: a failed chapter or batch is
    /// recorded and the loop moves on.
    pub async fn create_course(&self, input: NewCourse) -> Result<CreateCourseOutcome> {
        if self.sessions.current_session().await?.is_none() {
            tracing::error!("course creation attempted without an active session");
            return Ok(CreateCourseOutcome::AuthenticationRequired);
        }

        let course_row: CourseRow = insert_one(
            &self.store,
            COURSES,
            &NewCourseRow {
                title: &input.title,
                category: &input.category,
                description: &input.description,
                thumbnailurl: &input.thumbnail_url,
                video_url: input.video_url.as_deref(),
                duration: &input.duration,
                level: &input.level,
                featured: input.featured,
            },
        )
        .await?;
        let course_id = course_row.id.as_str();
        tracing::info!("course {course_id} created: '{}'", input.title);

        let mut skipped = Vec::new();

        for (index, chapter) in input.chapters.iter().enumerate() {
            let inserted: ChapterRow = match insert_one(
                &self.store,
                CHAPTERS,
                &NewChapterRow {
                    course_id,
                    title: &chapter.title,
                    description: chapter.description.as_deref(),
                    order_index: index as i32,
                    video_url: chapter.video_url.as_deref(),
                },
            )
            .await
            {
                Ok(row) => row,
                Err(e) => {
                    tracing::error!("failed to add chapter '{}': {e}", chapter.title);
                    skipped.push(SkippedWrite::Chapter {
                        title: chapter.title.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if let Err(e) = self
                .insert_quiz_batch(course_id, Some(&inserted.id), &chapter.quiz_questions)
                .await
            {
                tracing::error!(
                    "failed to add quiz questions for chapter '{}': {e}",
                    chapter.title
                );
                skipped.push(SkippedWrite::QuizBatch {
                    chapter_title: chapter.title.clone(),
                    reason: e.to_string(),
                });
            }

            if let Err(e) = self
                .insert_card_batch(course_id, Some(&inserted.id), &chapter.flash_cards)
                .await
            {
                tracing::error!(
                    "failed to add flash cards for chapter '{}': {e}",
                    chapter.title
                );
                skipped.push(SkippedWrite::FlashCardBatch {
                    chapter_title: chapter.title.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if let Err(e) = self
            .insert_quiz_batch(course_id, None, &input.quiz_questions)
            .await
        {
            tracing::error!("failed to add legacy quiz questions: {e}");
            skipped.push(SkippedWrite::LegacyQuizBatch {
                reason: e.to_string(),
            });
        }

        if let Err(e) = self
            .insert_card_batch(course_id, None, &input.flash_cards)
            .await
        {
            tracing::error!("failed to add legacy flash cards: {e}");
            skipped.push(SkippedWrite::LegacyFlashCardBatch {
                reason: e.to_string(),
            });
        }

        // The caller gets the store's view of the course, never an echo of
        // its own input.
        let course = self
            .fetch_course_by_id(course_id)
            .await?
            .ok_or_eyre("created course missing on read-back")?;

        Ok(CreateCourseOutcome::Created(CourseWriteReport {
            course,
            skipped,
        }))
    }

    async fn insert_quiz_batch(
        &self,
        course_id: &str,
        chapter_id: Option<&str>,
        questions: &[NewQuizQuestion],
    ) -> Result<()> {
        if questions.is_empty() {
            return Ok(());
        }
        let mut rows = Vec::with_capacity(questions.len());
        for question in questions {
            rows.push(NewQuizRow {
                course_id,
                chapter_id,
                question: &question.question,
                options: serde_json::to_string(&question.options)?,
                correctanswer: &question.correct_answer,
            });
        }
        insert_rows(&self.store, QUIZ_QUESTIONS, &rows).await
    }

    async fn insert_card_batch(
        &self,
        course_id: &str,
        chapter_id: Option<&str>,
        cards: &[NewFlashCard],
    ) -> Result<()> {
        if cards.is_empty() {
            return Ok(());
        }
        let rows: Vec<NewCardRow> = cards
            .iter()
            .map(|card| NewCardRow {
                course_id,
                chapter_id,
                question: &card.question,
                answer: &card.answer,
                color_code: &card.color_code,
            })
            .collect();
        insert_rows(&self.store, FLASH_CARDS, &rows).await
    }
}
