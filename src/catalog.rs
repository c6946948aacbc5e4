//! Lesson registry and shared exercise constants.
//!
//! The vocabulary phrase lists below are the single source of truth for the
//! positional answers stored in vocabulary submissions: the writing side
//! records answers by index only, and the renderer pairs them back up
//! against these same lists. Reordering an entry changes the meaning of
//! every stored submission, so the lists carry a version tag.

use crate::submission::VocabularyKind;

pub const LESSON_PROFESSIONAL_COMMUNICATION: &str = "professional-communication-1";
pub const LESSON_CASUAL_CONVERSATION: &str = "casual-conversation-1";
pub const LESSON_TAX_ESSENTIALS: &str = "tax-essentials-1";

/// Bumped whenever a phrase list changes, so old submissions can be told
/// apart from ones written against the current lists.
#[allow(dead_code)]
pub const VOCABULARY_BANK_VERSION: &str = "v1";

const MEETING_VOCABULARY_PHRASES: &[&str] = &[
  "Let's get started",
  "To summarize",
  "Any questions?",
  "Moving on to",
];

const EMAIL_PHRASES: &[&str] = &[
  "I am writing to",
  "I look forward to",
  "Please find attached",
  "Thank you for your",
];

const SMALL_TALK_PROMPTS: &[&str] = &[
  "How are things going with the project?",
  "I heard you're working on something new",
  "That sounds challenging",
];

/// Display heading for one vocabulary exercise kind.
pub fn vocabulary_exercise_title(kind: VocabularyKind) -> &'static str {
  match kind {
    VocabularyKind::Matching => "Meeting Vocabulary",
    VocabularyKind::FillInBlank => "Email Phrases",
    VocabularyKind::MultipleChoice => "Professional Small Talk",
  }
}

/// The phrase list a vocabulary exercise's answers are positionally
/// matched against.
pub fn vocabulary_phrases(kind: VocabularyKind) -> &'static [&'static str] {
  match kind {
    VocabularyKind::Matching => MEETING_VOCABULARY_PHRASES,
    VocabularyKind::FillInBlank => EMAIL_PHRASES,
    VocabularyKind::MultipleChoice => SMALL_TALK_PROMPTS,
  }
}

/// Lessons the renderer has a dispatch table for.
pub fn known_lessons() -> &'static [&'static str] {
  &[
    LESSON_PROFESSIONAL_COMMUNICATION,
    LESSON_CASUAL_CONVERSATION,
    LESSON_TAX_ESSENTIALS,
  ]
}
