//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Feedback, Progress, Submission};
use crate::render::{format_response, Rendered};
use crate::util::title_from_slug;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// DTO for submission delivery: the stored record plus the display tree the
/// renderer derives from its opaque content.
#[derive(Serialize)]
pub struct SubmissionOut {
    pub id: String,
    #[serde(rename = "lessonId")]
    pub lesson_id: String,
    #[serde(rename = "lessonTitle")]
    pub lesson_title: String,
    #[serde(rename = "sectionId")]
    pub section_id: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    pub rendered: Rendered,
}

/// Convert the internal record to the public DTO, rendering as we go.
pub fn to_out(s: &Submission) -> SubmissionOut {
    SubmissionOut {
        id: s.id.clone(),
        lesson_id: s.lesson_id.clone(),
        lesson_title: title_from_slug(&s.lesson_id),
        section_id: s.section_id.clone(),
        content: s.content.clone(),
        created_at: s.created_at,
        feedback: s.feedback.clone(),
        rendered: format_response(&s.content, &s.section_id, &s.lesson_id),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct SaveSubmissionIn {
    #[serde(rename = "lessonId")]
    pub lesson_id: String,
    #[serde(rename = "sectionId")]
    pub section_id: String,
    pub content: String,
}
#[derive(Serialize)]
pub struct SaveSubmissionOut {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SubmissionOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "lessonId")]
    pub lesson_id: Option<String>,
    #[serde(rename = "sectionId")]
    pub section_id: Option<String>,
}
#[derive(Serialize)]
pub struct ListOut {
    pub responses: Vec<SubmissionOut>,
}

#[derive(Debug, Deserialize)]
pub struct GradeIn {
    #[serde(rename = "responseId")]
    pub response_id: String,
}
#[derive(Serialize)]
pub struct GradeOut {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Feedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressIn {
    #[serde(rename = "lessonId")]
    pub lesson_id: String,
}
#[derive(Serialize)]
pub struct ProgressOut {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
#[derive(Serialize)]
pub struct ProgressListOut {
    pub progress: Vec<Progress>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateIn {
    pub text: String,
    #[serde(rename = "sourceLang")]
    pub source_lang: String,
    #[serde(rename = "targetLang")]
    pub target_lang: String,
}
#[derive(Serialize)]
pub struct TranslateOut {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
