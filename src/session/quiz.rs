use std::collections::HashMap;

use crate::models::QuizQuestion;

/// Percentage at or above which an attempt counts as passed. Messaging
/// only; nothing is gated on it.
pub const PASS_THRESHOLD_PERCENT: f64 = 60.0;

#[derive(Clone, Copy)]
enum Progress {
    InProgress { current: usize },
    Completed { score: usize },
}

/// One quiz attempt: one question at a time, answers recorded by question
/// id, scored when the last question is advanced past. Completion is
/// terminal; a retake is a fresh [`QuizWalkthrough::start`].
pub struct QuizWalkthrough {
    questions: Vec<QuizQuestion>,
    answers: HashMap<String, String>,
    progress: Progress,
}

impl QuizWalkthrough {
    pub fn start(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            progress: Progress::InProgress { current: 0 },
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the question on screen; `None` once completed.
    pub fn current_index(&self) -> Option<usize> {
        match self.progress {
            Progress::InProgress { current } => Some(current),
            Progress::Completed { .. } => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Record (or replace) the answer for a question. Ignored once the
    /// attempt is completed.
    pub fn select_answer(&mut self, question_id: &str, answer: impl Into<String>) {
        if matches!(self.progress, Progress::InProgress { .. }) {
            self.answers.insert(question_id.to_string(), answer.into());
        }
    }

    /// Move to the next question. A no-op unless the current question has a
    /// recorded answer; advancing past the last question scores the attempt
    /// and completes it.
    pub fn advance(&mut self) {
        let Progress::InProgress { current } = self.progress else {
            return;
        };
        let Some(question) = self.questions.get(current) else {
            return;
        };
        if !self.answers.contains_key(&question.id) {
            return;
        }

        if current + 1 < self.questions.len() {
            self.progress = Progress::InProgress {
                current: current + 1,
            };
        } else {
            self.progress = Progress::Completed {
                score: self.compute_score(),
            };
        }
    }

    /// Count of questions whose recorded answer equals the correct answer
    /// exactly (case-sensitive).
    fn compute_score(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answer_for(&q.id) == Some(q.correct_answer.as_str()))
            .count()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.progress, Progress::Completed { .. })
    }

    pub fn score(&self) -> Option<usize> {
        match self.progress {
            Progress::Completed { score } => Some(score),
            Progress::InProgress { .. } => None,
        }
    }

    pub fn percentage(&self) -> Option<f64> {
        self.score()
            .map(|score| score as f64 / self.total() as f64 * 100.0)
    }

    pub fn passed(&self) -> Option<bool> {
        self.percentage().map(|p| p >= PASS_THRESHOLD_PERCENT)
    }
}
