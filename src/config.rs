//! Loading agent configuration (grading prompts) from TOML.
//!
//! See `AgentConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used by the OpenAI client. The defaults produce the exact bilingual
/// layout the feedback extractor expects; override them in TOML only if the
/// extractor's markers are kept intact.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub grading_system: String,
  pub grading_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      grading_system: "You are an encouraging English teacher grading exercises from an Egyptian Arabic speaker learning English. \
Respond in EXACTLY this layout, keeping every header literal:\n\
Grade: <one letter A-F>\n\
\n\
Strengths:\n\
• <point>\n\
• <point>\n\
\n\
Areas for Improvement:\n\
• <point>\n\
• <point>\n\
\n\
Action Items:\n\
1. <step>\n\
2. <step>\n\
3. <step>\n\
\n\
النقاط الحلوة:\n\
• <point in Egyptian Arabic>\n\
• <point in Egyptian Arabic>\n\
\n\
المحتاج شغل:\n\
• <point in Egyptian Arabic>\n\
• <point in Egyptian Arabic>\n\
\n\
عشان تتحسن لازم:\n\
١. <step in Egyptian Arabic>\n\
٢. <step in Egyptian Arabic>\n\
٣. <step in Egyptian Arabic>\n\
Use Egyptian Arabic (masri), not Modern Standard Arabic. Number the Arabic action items with Arabic-Indic digits exactly as shown.".into(),
      grading_user_template: "Lesson: {lesson_id}\nSection: {section_id}\n\nThe learner submitted:\n{submission}\n\nGrade the submission and give feedback in the required layout.".into(),
    }
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "studyio_backend", %path, "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "studyio_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "studyio_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
