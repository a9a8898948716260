use crate::models::FlashCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Prompt,
    Answer,
}

/// Stepping through a chapter's flashcards one at a time. The face belongs
/// to the card on screen, so navigating always lands on the prompt side.
/// Navigation clamps at both ends; on the last card the viewer offers
/// "return to course" instead of a next step (see
/// [`is_last_card`](Self::is_last_card)).
pub struct FlashcardWalkthrough {
    cards: Vec<FlashCard>,
    index: usize,
    face: CardFace,
}

impl FlashcardWalkthrough {
    pub fn start(cards: Vec<FlashCard>) -> Self {
        Self {
            cards,
            index: 0,
            face: CardFace::Prompt,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_card(&self) -> Option<&FlashCard> {
        self.cards.get(self.index)
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_last_card(&self) -> bool {
        !self.cards.is_empty() && self.index == self.cards.len() - 1
    }

    /// Toggle the current card between its prompt and its answer.
    pub fn flip(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.face = match self.face {
            CardFace::Prompt => CardFace::Answer,
            CardFace::Answer => CardFace::Prompt,
        };
    }

    /// Step forward; a no-op on the last card.
    pub fn next(&mut self) {
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.face = CardFace::Prompt;
        }
    }

    /// Step back; a no-op on the first card.
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.face = CardFace::Prompt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, question: &str) -> FlashCard {
        FlashCard {
            id: id.to_string(),
            question: question.to_string(),
            answer: format!("{question} answer"),
            color_code: "#F2FCE2".to_string(),
            chapter_id: None,
        }
    }

    fn deck() -> Vec<FlashCard> {
        vec![card("c1", "one"), card("c2", "two"), card("c3", "three")]
    }

    #[test]
    fn starts_on_first_card_prompt_side() {
        let cards = FlashcardWalkthrough::start(deck());

        assert_eq!(cards.current_index(), 0);
        assert_eq!(cards.face(), CardFace::Prompt);
        assert!(!cards.is_last_card());
    }

    #[test]
    fn previous_at_first_card_is_a_no_op() {
        let mut cards = FlashcardWalkthrough::start(deck());

        cards.previous();

        assert_eq!(cards.current_index(), 0);
    }

    #[test]
    fn next_at_last_card_is_a_no_op() {
        let mut cards = FlashcardWalkthrough::start(deck());

        cards.next();
        cards.next();
        assert!(cards.is_last_card());

        cards.next();

        assert_eq!(cards.current_index(), 2);
    }

    #[test]
    fn flip_toggles_the_face() {
        let mut cards = FlashcardWalkthrough::start(deck());

        cards.flip();
        assert_eq!(cards.face(), CardFace::Answer);

        cards.flip();
        assert_eq!(cards.face(), CardFace::Prompt);
    }

    #[test]
    fn navigation_resets_to_prompt_face() {
        let mut cards = FlashcardWalkthrough::start(deck());

        cards.flip();
        cards.next();
        assert_eq!(cards.face(), CardFace::Prompt);

        cards.flip();
        cards.previous();
        assert_eq!(cards.face(), CardFace::Prompt);
    }

    #[test]
    fn empty_deck_has_no_card_and_no_exit_prompt() {
        let mut cards = FlashcardWalkthrough::start(Vec::new());

        cards.flip();
        cards.next();

        assert_eq!(cards.current_card(), None);
        assert_eq!(cards.face(), CardFace::Prompt);
        assert!(!cards.is_last_card());
    }
}
