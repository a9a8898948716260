// Viewer-side walkthroughs over an already aggregated course. Pure state,
// no I/O.

pub mod flashcards;
pub mod quiz;

pub use flashcards::{CardFace, FlashcardWalkthrough};
pub use quiz::QuizWalkthrough;
