//! Rule-based manager replies for when the model is unavailable.
//!
//! Category selection is deterministic (first keyword match wins, in the
//! order of `ReplyCategory::PRECEDENCE`). Only the reply within the category
//! is random. The responder ignores history and pack facts.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;

static DOLLAR_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\d+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Compensation,
    Achievements,
    Market,
    Numbers,
    Budget,
    General,
}

impl ReplyCategory {
    pub const PRECEDENCE: [ReplyCategory; 6] = [
        ReplyCategory::Compensation,
        ReplyCategory::Achievements,
        ReplyCategory::Market,
        ReplyCategory::Numbers,
        ReplyCategory::Budget,
        ReplyCategory::General,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            ReplyCategory::Compensation => &["salary", "compensation", "raise"],
            ReplyCategory::Achievements => &["achievement", "accomplished", "delivered"],
            ReplyCategory::Market => &["market", "industry", "research"],
            ReplyCategory::Numbers => &["thousand", "percent"],
            ReplyCategory::Budget => &["budget", "constraint", "limited"],
            ReplyCategory::General => &[],
        }
    }

    /// `utterance` must already be lower-cased.
    fn matches(self, utterance: &str) -> bool {
        match self {
            ReplyCategory::General => true,
            ReplyCategory::Numbers if DOLLAR_AMOUNT.is_match(utterance) => true,
            _ => self.keywords().iter().any(|k| utterance.contains(k)),
        }
    }

    pub fn replies(self) -> &'static [&'static str] {
        match self {
            ReplyCategory::Compensation => &[
                "I appreciate you bringing this up. Can you tell me more about what's prompting this discussion?",
                "Let's talk about this. What specific aspects of your compensation are you thinking about?",
                "I'm glad you're comfortable discussing this with me. What would you like to see change?",
            ],
            ReplyCategory::Achievements => &[
                "Those are impressive accomplishments. How do you see these contributing to your compensation discussion?",
                "Thank you for highlighting those achievements. They definitely show your value to the team.",
                "I recognize the great work you've been doing. What kind of adjustment are you thinking about?",
            ],
            ReplyCategory::Market => &[
                "I understand you've done some research. Can you share what you've found?",
                "Market data is certainly important. What does your research show for your role?",
                "I appreciate you coming prepared with market information. What are you seeing out there?",
            ],
            ReplyCategory::Numbers => &[
                "That's a significant number. Help me understand how you arrived at that figure.",
                "I want to make sure I understand your request correctly. Can you walk me through your thinking?",
                "Let me see what might be possible. What's the timeline you're thinking about for this adjustment?",
            ],
            ReplyCategory::Budget => &[
                "I understand there are always budget considerations. What alternatives might work for both of us?",
                "Budget is definitely a factor we need to consider. Are there other forms of compensation we could explore?",
                "Let's think creatively about this. What would be most valuable to you besides base salary?",
            ],
            ReplyCategory::General => &[
                "That's a good point. Can you elaborate on that?",
                "I appreciate you sharing that perspective. What would you like to see happen next?",
                "Help me understand your thinking on this better.",
                "That's valuable feedback. How do you think we should move forward?",
                "I want to make sure we're aligned on this. Can you tell me more about your expectations?",
            ],
        }
    }
}

/// Picks the reply category for an utterance. Deterministic.
pub fn classify(utterance: &str) -> ReplyCategory {
    let lowered = utterance.to_lowercase();
    ReplyCategory::PRECEDENCE
        .into_iter()
        .find(|category| category.matches(&lowered))
        .unwrap_or(ReplyCategory::General)
}

/// Keyword responder with an injectable random source.
///
/// Production uses `from_entropy`; tests seed it.
pub struct FallbackResponder {
    rng: Mutex<StdRng>,
}

impl FallbackResponder {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn respond(&self, utterance: &str) -> (ReplyCategory, &'static str) {
        let category = classify(utterance);
        let replies = category.replies();
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let reply = replies.choose(&mut *rng).copied().unwrap_or(replies[0]);
        (category, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_question_always_market_category() {
        for seed in 0..50 {
            let responder = FallbackResponder::seeded(seed);
            let (category, reply) = responder.respond("What does the market say about this role?");
            assert_eq!(category, ReplyCategory::Market);
            assert!(ReplyCategory::Market.replies().contains(&reply));
        }
    }

    #[test]
    fn test_precedence_order() {
        // compensation beats everything after it
        assert_eq!(
            classify("My salary is below market research by 10 percent"),
            ReplyCategory::Compensation
        );
        assert_eq!(
            classify("I delivered results the industry rarely sees"),
            ReplyCategory::Achievements
        );
        assert_eq!(
            classify("Industry data says $150000 is typical"),
            ReplyCategory::Market
        );
        assert_eq!(
            classify("I'm thinking $140000 despite the budget"),
            ReplyCategory::Numbers
        );
        assert_eq!(classify("I know budgets are limited"), ReplyCategory::Budget);
        assert_eq!(classify("Good morning!"), ReplyCategory::General);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classify("RAISE please"), ReplyCategory::Compensation);
        assert_eq!(classify("We ACCOMPLISHED a lot"), ReplyCategory::Achievements);
    }

    #[test]
    fn test_numbers_category_triggers() {
        assert_eq!(classify("How about $5"), ReplyCategory::Numbers);
        assert_eq!(classify("Ten thousand more"), ReplyCategory::Numbers);
        assert_eq!(classify("Fifteen percent"), ReplyCategory::Numbers);
        // a bare dollar sign is not an amount
        assert_eq!(classify("What about $ later"), ReplyCategory::General);
    }

    #[test]
    fn test_same_seed_same_reply() {
        let a = FallbackResponder::seeded(7);
        let b = FallbackResponder::seeded(7);
        for utterance in ["hello", "my raise", "hello again"] {
            assert_eq!(a.respond(utterance), b.respond(utterance));
        }
    }

    #[test]
    fn test_general_reply_from_general_set() {
        let responder = FallbackResponder::from_entropy();
        let (category, reply) = responder.respond("Thanks for meeting with me.");
        assert_eq!(category, ReplyCategory::General);
        assert!(ReplyCategory::General.replies().contains(&reply));
    }

    #[test]
    fn test_every_category_has_replies() {
        for category in ReplyCategory::PRECEDENCE {
            assert!(!category.replies().is_empty());
        }
        assert_eq!(ReplyCategory::General.replies().len(), 5);
    }
}
