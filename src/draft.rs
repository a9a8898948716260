// Authoring session for a course that has not been published yet. Keeps the
// chapter order indexes contiguous while the author edits, and gates
// publishing on the required fields.

use ulid::Ulid;

use crate::models::{NewChapter, NewCourse, NewFlashCard, NewQuizQuestion};

pub const DEFAULT_LEVEL: &str = "Beginner";
pub const DEFAULT_CARD_COLOR: &str = "#F2FCE2";

/// Something that blocks publishing. `UntitledChapter` carries the
/// zero-based chapter position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftIssue {
    MissingTitle,
    MissingDescription,
    MissingCategory,
    MissingThumbnail,
    NoChapters,
    UntitledChapter { index: usize },
}

/// Working copy of a course under authoring. Chapters are managed through
/// the methods so `order_index` always equals array position.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: Option<String>,
    pub duration: String,
    pub level: String,
    pub featured: bool,
    chapters: Vec<NewChapter>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            category: String::new(),
            description: String::new(),
            thumbnail_url: String::new(),
            video_url: None,
            duration: String::new(),
            level: DEFAULT_LEVEL.to_string(),
            featured: false,
            chapters: Vec::new(),
        }
    }

    pub fn chapters(&self) -> &[NewChapter] {
        &self.chapters
    }

    /// Append an empty chapter and hand it out for editing.
    pub fn add_chapter(&mut self) -> &mut NewChapter {
        let index = self.chapters.len();
        self.chapters.push(NewChapter {
            id: placeholder_id("ch"),
            title: String::new(),
            description: None,
            order_index: index as i32,
            video_url: None,
            quiz_questions: Vec::new(),
            flash_cards: Vec::new(),
        });
        &mut self.chapters[index]
    }

    pub fn chapter_mut(&mut self, index: usize) -> Option<&mut NewChapter> {
        self.chapters.get_mut(index)
    }

    /// Drop a chapter and renumber the survivors so order indexes stay
    /// contiguous and equal to array position.
    pub fn remove_chapter(&mut self, index: usize) {
        if index >= self.chapters.len() {
            return;
        }
        self.chapters.remove(index);
        for (position, chapter) in self.chapters.iter_mut().enumerate() {
            chapter.order_index = position as i32;
        }
    }

    /// Append a blank four-option question to a chapter and hand it out for
    /// editing. `None` if no such chapter.
    pub fn add_quiz_question(&mut self, chapter: usize) -> Option<&mut NewQuizQuestion> {
        let questions = &mut self.chapters.get_mut(chapter)?.quiz_questions;
        questions.push(blank_quiz_question());
        questions.last_mut()
    }

    /// Append a blank flashcard to a chapter and hand it out for editing.
    /// `None` if no such chapter.
    pub fn add_flash_card(&mut self, chapter: usize) -> Option<&mut NewFlashCard> {
        let cards = &mut self.chapters.get_mut(chapter)?.flash_cards;
        cards.push(blank_flash_card());
        cards.last_mut()
    }

    pub fn remove_quiz_question(&mut self, chapter: usize, index: usize) {
        if let Some(chapter) = self.chapters.get_mut(chapter) {
            if index < chapter.quiz_questions.len() {
                chapter.quiz_questions.remove(index);
            }
        }
    }

    pub fn remove_flash_card(&mut self, chapter: usize, index: usize) {
        if let Some(chapter) = self.chapters.get_mut(chapter) {
            if index < chapter.flash_cards.len() {
                chapter.flash_cards.remove(index);
            }
        }
    }

    /// Everything that still blocks publishing; empty means ready.
    pub fn validate(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if self.title.is_empty() {
            issues.push(DraftIssue::MissingTitle);
        }
        if self.description.is_empty() {
            issues.push(DraftIssue::MissingDescription);
        }
        if self.category.is_empty() {
            issues.push(DraftIssue::MissingCategory);
        }
        if self.thumbnail_url.is_empty() {
            issues.push(DraftIssue::MissingThumbnail);
        }
        if self.chapters.is_empty() {
            issues.push(DraftIssue::NoChapters);
        }
        for (index, chapter) in self.chapters.iter().enumerate() {
            if chapter.title.is_empty() {
                issues.push(DraftIssue::UntitledChapter { index });
            }
        }
        issues
    }

    pub fn into_new_course(self) -> NewCourse {
        NewCourse {
            title: self.title,
            category: self.category,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
            duration: self.duration,
            level: self.level,
            featured: self.featured,
            chapters: self.chapters,
            quiz_questions: Vec::new(),
            flash_cards: Vec::new(),
        }
    }
}

/// An empty four-option question for the authoring form.
pub fn blank_quiz_question() -> NewQuizQuestion {
    NewQuizQuestion {
        id: placeholder_id("q"),
        question: String::new(),
        options: vec![String::new(); 4],
        correct_answer: String::new(),
    }
}

pub fn blank_flash_card() -> NewFlashCard {
    NewFlashCard {
        id: placeholder_id("fc"),
        question: String::new(),
        answer: String::new(),
        color_code: DEFAULT_CARD_COLOR.to_string(),
    }
}

fn placeholder_id(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}
