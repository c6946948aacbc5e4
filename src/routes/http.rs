//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument, warn};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(%body.lesson_id, %body.section_id, content_len = body.content.len()))]
pub async fn http_post_submission(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SaveSubmissionIn>,
) -> impl IntoResponse {
  match save_submission(&state, &body.lesson_id, &body.section_id, body.content).await {
    Ok(sub) => {
      info!(target: "submission", id = %sub.id, "HTTP submission saved");
      Json(SaveSubmissionOut { success: true, data: Some(to_out(&sub)), error: None })
    }
    Err(e) => {
      warn!(target: "submission", error = %e, "HTTP submission rejected");
      Json(SaveSubmissionOut { success: false, data: None, error: Some(e) })
    }
  }
}

#[instrument(level = "info", skip(state), fields(lesson = ?q.lesson_id, section = ?q.section_id))]
pub async fn http_list_submissions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ListQuery>,
) -> impl IntoResponse {
  let subs = state
    .list_submissions(q.lesson_id.as_deref(), q.section_id.as_deref())
    .await;
  info!(target: "submission", count = subs.len(), "HTTP submissions listed");
  Json(ListOut { responses: subs.iter().map(to_out).collect() })
}

#[instrument(level = "info", skip(state, body), fields(%body.response_id))]
pub async fn http_post_grade(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GradeIn>,
) -> impl IntoResponse {
  match grade_submission_by_id(&state, &body.response_id).await {
    Ok(fb) => {
      info!(target: "submission", id = %body.response_id, grade = %fb.grade, "HTTP grade served");
      Json(GradeOut { success: true, data: Some(fb), error: None })
    }
    Err(e) => {
      warn!(target: "submission", id = %body.response_id, error = %e, "HTTP grade failed");
      Json(GradeOut { success: false, data: None, error: Some(e) })
    }
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.lesson_id))]
pub async fn http_post_progress(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ProgressIn>,
) -> impl IntoResponse {
  match mark_lesson_complete(&state, &body.lesson_id).await {
    Ok(p) => Json(ProgressOut { success: true, data: Some(p), error: None }),
    Err(e) => Json(ProgressOut { success: false, data: None, error: Some(e) }),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_progress(
  State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
  Json(ProgressListOut { progress: state.list_progress().await })
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), %body.source_lang, %body.target_lang))]
pub async fn http_post_translate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TranslateIn>,
) -> impl IntoResponse {
  match do_translate(&state, &body.text, &body.source_lang, &body.target_lang).await {
    Ok(t) => Json(TranslateOut {
      success: true,
      translation: Some(t.translation),
      alternatives: t.alternatives,
      error: None,
    }),
    Err(e) => {
      warn!(target: "studyio_backend", error = %e, "HTTP translate failed");
      Json(TranslateOut { success: false, translation: None, alternatives: Vec::new(), error: Some(e) })
    }
  }
}
