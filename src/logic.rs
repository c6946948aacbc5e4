//! Core application logic shared by the HTTP handlers.
//!
//! Handlers stay thin; validation, store access, and collaborator calls live
//! here. Every fallible operation returns `Result<_, String>` with a message
//! fit to show the client.

use tracing::{error, info, instrument, warn};

use crate::catalog;
use crate::domain::{Feedback, Progress, Submission};
use crate::feedback::extract_feedback;
use crate::state::AppState;
use crate::translate::Translation;
use crate::util::trunc_for_log;

/// Validate and store a new submission. The content string is stored as-is;
/// only the addressing fields are checked.
#[instrument(level = "info", skip(state, content), fields(%lesson_id, %section_id, content_len = content.len()))]
pub async fn save_submission(
  state: &AppState,
  lesson_id: &str,
  section_id: &str,
  content: String,
) -> Result<Submission, String> {
  if lesson_id.trim().is_empty() || section_id.trim().is_empty() {
    return Err("lessonId and sectionId are required".into());
  }
  // Unknown lessons are stored anyway; they just render raw until the
  // dispatch table learns about them.
  if !catalog::known_lessons().contains(&lesson_id) {
    warn!(target: "submission", %lesson_id, "Submission for a lesson with no render dispatch");
  }
  let sub = state.save_submission(lesson_id, section_id, content).await;
  info!(target: "submission", id = %sub.id, %lesson_id, %section_id, "Submission stored");
  Ok(sub)
}

/// Grade a stored submission: run the LLM, extract the bilingual record,
/// attach it to the stored row, and return it.
#[instrument(level = "info", skip(state), fields(%response_id))]
pub async fn grade_submission_by_id(
  state: &AppState,
  response_id: &str,
) -> Result<Feedback, String> {
  let sub = state
    .get_submission(response_id)
    .await
    .ok_or_else(|| format!("Unknown response id: {}", response_id))?;

  let oa = state
    .openai
    .as_ref()
    .ok_or_else(|| "Grading unavailable: OPENAI_API_KEY not set".to_string())?;

  let completion = oa
    .grade_submission(&state.prompts, &sub.lesson_id, &sub.section_id, &sub.content)
    .await
    .map_err(|e| {
      error!(target: "submission", id = %response_id, error = %e, "Grading call failed");
      e
    })?;

  let feedback = extract_feedback(&completion);
  if feedback.grade == crate::feedback::GRADE_NOT_FOUND {
    info!(target: "submission", id = %response_id, preview = %trunc_for_log(&completion, 60), "Completion had no grade marker");
  }

  state.attach_feedback(response_id, feedback.clone()).await;
  info!(target: "submission", id = %response_id, grade = %feedback.grade, "Feedback attached");
  Ok(feedback)
}

/// Mark a lesson complete.
#[instrument(level = "info", skip(state), fields(%lesson_id))]
pub async fn mark_lesson_complete(
  state: &AppState,
  lesson_id: &str,
) -> Result<Progress, String> {
  if lesson_id.trim().is_empty() {
    return Err("lessonId is required".into());
  }
  Ok(state.mark_complete(lesson_id).await)
}

/// Translate via MyMemory.
#[instrument(level = "info", skip(state, text), fields(text_len = text.len(), %source_lang, %target_lang))]
pub async fn do_translate(
  state: &AppState,
  text: &str,
  source_lang: &str,
  target_lang: &str,
) -> Result<Translation, String> {
  if text.trim().is_empty() {
    return Err("text is required".into());
  }
  state.translator.translate(text, source_lang, target_lang).await
}
