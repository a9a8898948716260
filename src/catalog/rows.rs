// Row shapes as the store holds them, and the mapping onto the domain
// model. The store's course table spells the thumbnail column as lowercase
// `thumbnailurl` and the quiz table spells the answer column `correctanswer`;
// both map to the camel-cased domain fields in each direction.

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Chapter, Course, FlashCard, QuizQuestion};

#[derive(Debug, Deserialize)]
pub(crate) struct CourseRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub thumbnailurl: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    pub duration: String,
    pub level: String,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CourseRow {
    pub fn into_course(
        self,
        chapters: Vec<Chapter>,
        quiz_questions: Vec<QuizQuestion>,
        flash_cards: Vec<FlashCard>,
    ) -> Course {
        Course {
            id: self.id,
            title: self.title,
            category: self.category,
            description: self.description,
            thumbnail_url: self.thumbnailurl.unwrap_or_default(),
            video_url: self.video_url,
            duration: self.duration,
            level: self.level,
            featured: self.featured.unwrap_or_default(),
            created_at: self.created_at,
            chapters,
            quiz_questions,
            flash_cards,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChapterRow {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order_index: i32,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ChapterRow {
    pub fn into_chapter(
        self,
        quiz_questions: Vec<QuizQuestion>,
        flash_cards: Vec<FlashCard>,
    ) -> Chapter {
        Chapter {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            order_index: self.order_index,
            video_url: self.video_url,
            quiz_questions,
            flash_cards,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizRow {
    pub id: String,
    pub question: String,
    pub options: Value,
    pub correctanswer: String,
    #[serde(default)]
    pub chapter_id: Option<String>,
}

impl QuizRow {
    pub fn into_question(self) -> Result<QuizQuestion> {
        let options = decode_options(&self.options)?;
        Ok(QuizQuestion {
            id: self.id,
            question: self.question,
            options,
            correct_answer: self.correctanswer,
            chapter_id: self.chapter_id,
        })
    }
}

/// Older quiz rows persist options as a serialized text blob, newer ones as
/// a native JSON array. Anything else is corrupt and fails the assembly of
/// the whole course.
pub(crate) fn decode_options(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value.clone())?),
        Value::String(raw) => Ok(serde_json::from_str(raw)?),
        other => Err(eyre!(
            "quiz options are neither a sequence nor serialized text: {other}"
        )),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardRow {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default)]
    pub chapter_id: Option<String>,
}

impl CardRow {
    pub fn into_card(self) -> FlashCard {
        FlashCard {
            id: self.id,
            question: self.question,
            answer: self.answer,
            color_code: self.color_code.unwrap_or_default(),
            chapter_id: self.chapter_id,
        }
    }
}

// Insert payloads. Legacy quiz/card rows omit chapter_id entirely rather
// than writing an explicit null.

#[derive(Debug, Serialize)]
pub(crate) struct NewCourseRow<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub thumbnailurl: &'a str,
    pub video_url: Option<&'a str>,
    pub duration: &'a str,
    pub level: &'a str,
    pub featured: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewChapterRow<'a> {
    pub course_id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub order_index: i32,
    pub video_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewQuizRow<'a> {
    pub course_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<&'a str>,
    pub question: &'a str,
    /// Options serialized to a JSON text blob, the write-side format.
    pub options: String,
    pub correctanswer: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCardRow<'a> {
    pub course_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<&'a str>,
    pub question: &'a str,
    pub answer: &'a str,
    pub color_code: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_options_accepts_native_sequence() {
        let decoded = decode_options(&json!(["A", "B", "C", "D"])).unwrap();
        assert_eq!(decoded, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn decode_options_accepts_serialized_text() {
        let decoded = decode_options(&json!(r#"["A","B","C","D"]"#)).unwrap();
        assert_eq!(decoded, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn decode_options_both_encodings_agree() {
        let native = decode_options(&json!(["A", "B", "C", "D"])).unwrap();
        let text = decode_options(&json!(r#"["A","B","C","D"]"#)).unwrap();
        assert_eq!(native, text);
    }

    #[test]
    fn decode_options_rejects_other_shapes() {
        assert!(decode_options(&json!(42)).is_err());
        assert!(decode_options(&json!("not json")).is_err());
        assert!(decode_options(&json!({ "a": 1 })).is_err());
    }
}
