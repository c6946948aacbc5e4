//! Application state: in-memory stores, prompts, and outbound clients.
//!
//! This module owns:
//!   - the submission store (append-only vec, newest served first)
//!   - per-lesson progress records (keyed by lesson id)
//!   - the prompts struct (from TOML or defaults)
//!   - optional OpenAI client and the MyMemory translator
//!
//! Stores are process-local; a restart starts empty.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{load_agent_config_from_env, Prompts};
use crate::domain::{Feedback, Progress, Submission};
use crate::openai::OpenAI;
use crate::translate::Translator;
use crate::util::now_ms;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<RwLock<Vec<Submission>>>,
    pub progress: Arc<RwLock<HashMap<String, Progress>>>,
    pub openai: Option<OpenAI>,
    pub translator: Translator,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, init clients, start with empty stores.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_agent_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "studyio_backend", base_url = %oa.base_url, fast_model = %oa.fast_model, strong_model = %oa.strong_model, "OpenAI enabled.");
        } else {
            info!(target: "studyio_backend", "OpenAI disabled (no OPENAI_API_KEY). Grading requests will be rejected.");
        }

        Self {
            submissions: Arc::new(RwLock::new(Vec::new())),
            progress: Arc::new(RwLock::new(HashMap::new())),
            openai,
            translator: Translator::new(),
            prompts,
        }
    }

    /// Store a new submission and touch the lesson's progress record.
    #[instrument(level = "debug", skip(self, content), fields(%lesson_id, %section_id, content_len = content.len()))]
    pub async fn save_submission(
        &self,
        lesson_id: &str,
        section_id: &str,
        content: String,
    ) -> Submission {
        let sub = Submission {
            id: Uuid::new_v4().to_string(),
            lesson_id: lesson_id.to_string(),
            section_id: section_id.to_string(),
            content,
            created_at: now_ms(),
            feedback: None,
        };
        self.submissions.write().await.push(sub.clone());
        self.touch_progress(lesson_id).await;
        sub
    }

    /// Submissions newest-first, optionally filtered by lesson and/or section.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_submissions(
        &self,
        lesson_id: Option<&str>,
        section_id: Option<&str>,
    ) -> Vec<Submission> {
        let subs = self.submissions.read().await;
        let mut out: Vec<Submission> = subs
            .iter()
            .filter(|s| lesson_id.map_or(true, |l| s.lesson_id == l))
            .filter(|s| section_id.map_or(true, |sec| s.section_id == sec))
            .cloned()
            .collect();
        out.reverse();
        out
    }

    /// Read-only access to a submission by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_submission(&self, id: &str) -> Option<Submission> {
        let subs = self.submissions.read().await;
        subs.iter().find(|s| s.id == id).cloned()
    }

    /// Attach (or overwrite) the grading record on a stored submission.
    /// Returns false if the id is unknown.
    #[instrument(level = "debug", skip(self, feedback), fields(%id))]
    pub async fn attach_feedback(&self, id: &str, feedback: Feedback) -> bool {
        let mut subs = self.submissions.write().await;
        match subs.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.feedback = Some(feedback);
                true
            }
            None => false,
        }
    }

    /// Mark a lesson complete. Idempotent upsert keyed by lesson id.
    #[instrument(level = "debug", skip(self), fields(%lesson_id))]
    pub async fn mark_complete(&self, lesson_id: &str) -> Progress {
        let mut map = self.progress.write().await;
        let rec = map
            .entry(lesson_id.to_string())
            .or_insert_with(|| fresh_progress(lesson_id));
        rec.completed = true;
        rec.last_accessed = now_ms();
        rec.clone()
    }

    /// All progress records, unordered.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_progress(&self) -> Vec<Progress> {
        self.progress.read().await.values().cloned().collect()
    }

    /// Refresh `last_accessed` without changing completion, creating the
    /// record on first touch.
    async fn touch_progress(&self, lesson_id: &str) {
        let mut map = self.progress.write().await;
        let rec = map
            .entry(lesson_id.to_string())
            .or_insert_with(|| fresh_progress(lesson_id));
        rec.last_accessed = now_ms();
    }
}

fn fresh_progress(lesson_id: &str) -> Progress {
    Progress {
        lesson_id: lesson_id.to_string(),
        module_id: module_of(lesson_id),
        completed: false,
        last_accessed: now_ms(),
    }
}

/// Lesson ids are `<module>-...-<n>`; the module is the leading segment.
fn module_of(lesson_id: &str) -> String {
    lesson_id
        .split_once('-')
        .map(|(head, _)| head.to_string())
        .unwrap_or_else(|| lesson_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_list_newest_first() {
        let state = AppState::new();
        let a = state
            .save_submission("casual-conversation-1", "conversation", "one".into())
            .await;
        let b = state
            .save_submission("casual-conversation-1", "conversation", "two".into())
            .await;

        let all = state.list_submissions(None, None).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, b.id);
        assert_eq!(all[1].id, a.id);

        let none = state.list_submissions(Some("tax-essentials-1"), None).await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn filters_compose_on_lesson_and_section() {
        let state = AppState::new();
        state
            .save_submission("casual-conversation-1", "speaking", "x".into())
            .await;
        state
            .save_submission("casual-conversation-1", "conversation", "y".into())
            .await;

        let speaking = state
            .list_submissions(Some("casual-conversation-1"), Some("speaking"))
            .await;
        assert_eq!(speaking.len(), 1);
        assert_eq!(speaking[0].content, "x");
    }

    #[tokio::test]
    async fn mark_complete_is_an_idempotent_upsert() {
        let state = AppState::new();
        state.save_submission("tax-essentials-1", "tax-basics", "c".into()).await;
        let first = state.mark_complete("tax-essentials-1").await;
        let second = state.mark_complete("tax-essentials-1").await;

        assert!(first.completed && second.completed);
        assert_eq!(first.module_id, "tax");
        assert_eq!(state.list_progress().await.len(), 1);
    }

    #[tokio::test]
    async fn attach_feedback_overwrites_in_place() {
        let state = AppState::new();
        let sub = state
            .save_submission("professional-communication-1", "email-writing", "e".into())
            .await;

        let fb = crate::feedback::extract_feedback("Grade: A\n");
        assert!(state.attach_feedback(&sub.id, fb.clone()).await);
        let again = crate::feedback::extract_feedback("Grade: C\n");
        assert!(state.attach_feedback(&sub.id, again).await);

        let stored = state.get_submission(&sub.id).await.unwrap();
        assert_eq!(stored.feedback.unwrap().grade, "C");
        assert!(!state.attach_feedback("missing-id", fb).await);
    }
}
