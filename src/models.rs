// Domain model structs shared by the catalog pipeline and the viewer.

use serde::{Deserialize, Serialize};

/// A published course as assembled from the store.
///
/// Chapters are the primary content container. The course-scoped
/// `quiz_questions` / `flash_cards` collections exist for records that
/// predate chapters and are only surfaced when `chapters` is empty; use
/// [`Course::content`] instead of inspecting the collections directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    pub video_url: Option<String>,
    pub duration: String,
    pub level: String,
    #[serde(default)]
    pub featured: bool,
    pub created_at: Option<String>,
    pub chapters: Vec<Chapter>,
    #[serde(rename = "quizQuestions", default)]
    pub quiz_questions: Vec<QuizQuestion>,
    #[serde(rename = "flashCards", default)]
    pub flash_cards: Vec<FlashCard>,
}

/// The course content the viewer should present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CourseContent<'a> {
    Chapters(&'a [Chapter]),
    /// Pre-chapter record: quiz and flashcard items attached directly to
    /// the course.
    Legacy {
        quiz_questions: &'a [QuizQuestion],
        flash_cards: &'a [FlashCard],
    },
}

impl Course {
    /// Chapters win whenever any exist; the legacy collections are only
    /// consulted for courses that have none.
    pub fn content(&self) -> CourseContent<'_> {
        if self.chapters.is_empty() {
            CourseContent::Legacy {
                quiz_questions: &self.quiz_questions,
                flash_cards: &self.flash_cards,
            }
        } else {
            CourseContent::Chapters(&self.chapters)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Zero-based position within the course, contiguous and unique.
    pub order_index: i32,
    pub video_url: Option<String>,
    #[serde(rename = "quizQuestions", default)]
    pub quiz_questions: Vec<QuizQuestion>,
    #[serde(rename = "flashCards", default)]
    pub flash_cards: Vec<FlashCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// The literal text of the correct option, not an index into `options`.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    /// Absent on legacy, course-scoped questions.
    #[serde(default)]
    pub chapter_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashCard {
    pub id: String,
    pub question: String,
    pub answer: String,
    /// Display hint, stored opaquely (e.g. a hex color).
    pub color_code: String,
    #[serde(default)]
    pub chapter_id: Option<String>,
}

/// Author input for a course that does not exist yet: no store id, no
/// timestamp. Nested entities carry client-generated placeholder ids which
/// the store replaces at publish time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    pub video_url: Option<String>,
    pub duration: String,
    pub level: String,
    #[serde(default)]
    pub featured: bool,
    pub chapters: Vec<NewChapter>,
    #[serde(rename = "quizQuestions", default)]
    pub quiz_questions: Vec<NewQuizQuestion>,
    #[serde(rename = "flashCards", default)]
    pub flash_cards: Vec<NewFlashCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChapter {
    /// Placeholder id, never persisted.
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Advisory only: the writer derives the persisted index from the
    /// chapter's position in `NewCourse::chapters`.
    pub order_index: i32,
    pub video_url: Option<String>,
    #[serde(rename = "quizQuestions", default)]
    pub quiz_questions: Vec<NewQuizQuestion>,
    #[serde(rename = "flashCards", default)]
    pub flash_cards: Vec<NewFlashCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuizQuestion {
    /// Placeholder id, never persisted.
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlashCard {
    /// Placeholder id, never persisted.
    pub id: String,
    pub question: String,
    pub answer: String,
    pub color_code: String,
}
