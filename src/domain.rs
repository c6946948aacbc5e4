//! Domain models used by the backend: submissions, progress, and the
//! bilingual feedback record attached after grading.

use serde::{Deserialize, Serialize};

/// One learner's stored answer to one exercise section.
///
/// `content` is opaque at write time; all shape knowledge lives on the read
/// side, keyed by `(lesson_id, section_id)` — see `submission` and `render`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
  pub id: String,
  #[serde(rename = "lessonId")]
  pub lesson_id: String,
  #[serde(rename = "sectionId")]
  pub section_id: String,
  pub content: String,
  #[serde(rename = "createdAt")]
  pub created_at: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub feedback: Option<Feedback>,
}

/// Derived bilingual grading record. Created only by an explicit grading
/// request; overwritten (not versioned) if grading is requested again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
  /// Single letter A-F, or "N/A" when extraction found no grade marker.
  pub grade: String,
  pub advice: BilingualAdvice,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BilingualAdvice {
  pub en: FeedbackSections,
  pub ar: FeedbackSections,
}

/// One language's advice lists. A section the extractor could not locate in
/// the LLM completion is an empty list, never an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSections {
  pub strengths: Vec<String>,
  pub improvements: Vec<String>,
  pub actions: Vec<String>,
}

/// Per-lesson completion progress. Keyed by lesson id in the store, so
/// repeated "mark complete" requests upsert the same record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Progress {
  #[serde(rename = "lessonId")]
  pub lesson_id: String,
  #[serde(rename = "moduleId")]
  pub module_id: String,
  pub completed: bool,
  #[serde(rename = "lastAccessed")]
  pub last_accessed: i64,
}
