//! Submission content model: the closed set of shapes exercises persist.
//!
//! Every exercise writes a single opaque `content` string. Most shapes are
//! JSON with the wire field names the page components use (camelCase);
//! email is the plain "Subject: ...\n\n..." convention so a raw display
//! never shows braces. Encoding a well-typed payload cannot fail. Decoding
//! is best-effort: `None` means the reader should fall back to showing the
//! raw string — see `render`.

use serde::{Deserialize, Serialize};

/// Wire tag for the three vocabulary exercise kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VocabularyKind {
  #[serde(rename = "matching")]
  Matching,
  #[serde(rename = "fillInBlank")]
  FillInBlank,
  #[serde(rename = "multipleChoice")]
  MultipleChoice,
}

/// Answers are positional against the catalog phrase list for `kind`;
/// the question text is deliberately not stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyExercise {
  #[serde(rename = "type")]
  pub kind: VocabularyKind,
  pub answers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularySubmission {
  pub exercises: Vec<VocabularyExercise>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
  pub situation: String,
  #[serde(rename = "selectedAnswer")]
  pub selected_answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationSubmission {
  pub responses: Vec<ConversationTurn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorySubmission {
  pub prompt: String,
  pub story: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpinionSubmission {
  pub topic: String,
  pub question: String,
  pub opinion: String,
}

/// Wire tag pinned to the literal `"video-quiz"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuizTag {
  #[default]
  #[serde(rename = "video-quiz")]
  VideoQuiz,
}

/// Quiz rows store the write-time verdict; readers trust `isCorrect`
/// verbatim and never recompute it against a question bank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoQuizAnswer {
  pub question: String,
  #[serde(rename = "selectedAnswer")]
  pub selected_answer: String,
  #[serde(rename = "correctAnswer")]
  pub correct_answer: String,
  #[serde(rename = "isCorrect")]
  pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoQuizSubmission {
  #[serde(rename = "type")]
  pub tag: VideoQuizTag,
  pub answers: Vec<VideoQuizAnswer>,
}

/// Row shape shared by the flat tax quizzes. `correctAnswer` is optional
/// because the tax-basics writer never includes it while the filing and
/// deductions writers do; keeping it optional round-trips all three.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxQuizAnswer {
  pub question: String,
  #[serde(rename = "selectedAnswer")]
  pub selected_answer: String,
  #[serde(rename = "correctAnswer", default, skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<String>,
  #[serde(rename = "isCorrect")]
  pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxAnswer {
  pub question: String,
  #[serde(rename = "userAnswer")]
  pub user_answer: String,
  #[serde(rename = "correctAnswer")]
  pub correct_answer: String,
}

/// Free-entry scenario row; `kind` is the question type ("text" or
/// "calculation") copied from the exercise definition at write time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnswer {
  pub question: String,
  pub answer: String,
  #[serde(rename = "type")]
  pub kind: String,
}

/// The five tax-lesson shapes, distinguished by the embedded `type` string.
/// An unrecognized `type` fails decode and the renderer pretty-prints the
/// JSON instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaxSubmission {
  #[serde(rename = "tax-basics-quiz")]
  BasicsQuiz { answers: Vec<TaxQuizAnswer> },
  #[serde(rename = "filing-process-quiz")]
  FilingQuiz { answers: Vec<TaxQuizAnswer> },
  #[serde(rename = "income-tax-scenario")]
  IncomeTaxScenario {
    scenario: String,
    answers: Vec<IncomeTaxAnswer>,
  },
  #[serde(rename = "deductions-case-study")]
  DeductionsCaseStudy {
    #[serde(rename = "caseStudy")]
    case_study: String,
    answers: Vec<TaxQuizAnswer>,
  },
  #[serde(rename = "tax-scenario")]
  TaxScenario {
    scenario: String,
    answers: Vec<ScenarioAnswer>,
  },
}

/// Audio submissions hold a base64 data URI and the recording length in
/// seconds (fractional, as reported by the recorder).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioSubmission {
  pub audio: String,
  pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailSubmission {
  pub subject: String,
  pub body: String,
}

/// Closed sum over every shape an exercise may persist.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionContent {
  Vocabulary(VocabularySubmission),
  Conversation(ConversationSubmission),
  Story(StorySubmission),
  Opinion(OpinionSubmission),
  VideoQuiz(VideoQuizSubmission),
  Tax(TaxSubmission),
  Audio(AudioSubmission),
  Email(EmailSubmission),
}

/// Which shape the reader expects for a given (lesson, section) pair.
/// Computed by `render::section_shape`; `CasualConversation` probes the
/// three casual-conversation shapes in the order the page components do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionShape {
  Vocabulary,
  CasualConversation,
  VideoQuiz,
  Tax,
  Audio,
  Email,
  PlainText,
}

impl SubmissionContent {
  /// Serialize to the persisted `content` string.
  pub fn encode(&self) -> String {
    match self {
      SubmissionContent::Email(e) => {
        format!("Subject: {}\n\n{}", e.subject, e.body)
      }
      SubmissionContent::Vocabulary(v) => to_json(v),
      SubmissionContent::Conversation(c) => to_json(c),
      SubmissionContent::Story(s) => to_json(s),
      SubmissionContent::Opinion(o) => to_json(o),
      SubmissionContent::VideoQuiz(q) => to_json(q),
      SubmissionContent::Tax(t) => to_json(t),
      SubmissionContent::Audio(a) => to_json(a),
    }
  }
}

fn to_json<T: Serialize>(value: &T) -> String {
  serde_json::to_string(value).unwrap_or_default()
}

/// Best-effort decode of a stored `content` string back into the shape the
/// section expects. `None` means "show the raw string instead" — malformed
/// or legacy submissions must stay visible, degraded, never crash a page.
pub fn decode(shape: SectionShape, content: &str) -> Option<SubmissionContent> {
  match shape {
    SectionShape::Vocabulary => serde_json::from_str::<VocabularySubmission>(content)
      .ok()
      .map(SubmissionContent::Vocabulary),
    SectionShape::CasualConversation => decode_casual(content),
    SectionShape::VideoQuiz => serde_json::from_str::<VideoQuizSubmission>(content)
      .ok()
      .map(SubmissionContent::VideoQuiz),
    SectionShape::Tax => serde_json::from_str::<TaxSubmission>(content)
      .ok()
      .map(SubmissionContent::Tax),
    SectionShape::Audio => serde_json::from_str::<AudioSubmission>(content)
      .ok()
      .map(SubmissionContent::Audio),
    SectionShape::Email => Some(SubmissionContent::Email(decode_email(content))),
    SectionShape::PlainText => None,
  }
}

/// The casual-conversation lesson reuses one formatter for three shapes;
/// probe them in the same order the original page logic checks fields.
fn decode_casual(content: &str) -> Option<SubmissionContent> {
  if let Ok(c) = serde_json::from_str::<ConversationSubmission>(content) {
    return Some(SubmissionContent::Conversation(c));
  }
  if let Ok(s) = serde_json::from_str::<StorySubmission>(content) {
    return Some(SubmissionContent::Story(s));
  }
  if let Ok(o) = serde_json::from_str::<OpinionSubmission>(content) {
    return Some(SubmissionContent::Opinion(o));
  }
  None
}

/// Email content is the plain-text convention "Subject: <s>\n\n<body>".
/// A missing "Subject:" prefix yields an empty subject with the remaining
/// lines as the body; this decode is total.
fn decode_email(content: &str) -> EmailSubmission {
  let mut lines = content.lines();
  let first = lines.next().unwrap_or_default();
  let subject = first
    .strip_prefix("Subject:")
    .map(|s| s.trim().to_string())
    .unwrap_or_default();
  let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
  EmailSubmission { subject, body }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roundtrip(shape: SectionShape, content: SubmissionContent) {
    let encoded = content.encode();
    let decoded = decode(shape, &encoded).expect("decode");
    assert_eq!(decoded, content);
  }

  #[test]
  fn vocabulary_roundtrip() {
    roundtrip(
      SectionShape::Vocabulary,
      SubmissionContent::Vocabulary(VocabularySubmission {
        exercises: vec![
          VocabularyExercise {
            kind: VocabularyKind::Matching,
            answers: vec!["to open a meeting".into(), "to recap".into()],
          },
          VocabularyExercise {
            kind: VocabularyKind::FillInBlank,
            answers: vec!["inquire about the role".into()],
          },
        ],
      }),
    );
  }

  #[test]
  fn vocabulary_wire_field_names_are_preserved() {
    let content = SubmissionContent::Vocabulary(VocabularySubmission {
      exercises: vec![VocabularyExercise {
        kind: VocabularyKind::MultipleChoice,
        answers: vec!["Pretty well, thanks!".into()],
      }],
    });
    let encoded = content.encode();
    assert!(encoded.contains(r#""type":"multipleChoice""#));
    assert!(encoded.contains(r#""answers":["Pretty well, thanks!"]"#));
  }

  #[test]
  fn casual_conversation_roundtrips_all_three_shapes() {
    roundtrip(
      SectionShape::CasualConversation,
      SubmissionContent::Conversation(ConversationSubmission {
        responses: vec![ConversationTurn {
          situation: "You meet a colleague at the coffee machine.".into(),
          selected_answer: "How was your weekend?".into(),
        }],
      }),
    );
    roundtrip(
      SectionShape::CasualConversation,
      SubmissionContent::Story(StorySubmission {
        prompt: "Tell us about a memorable trip.".into(),
        story: "Last summer I visited Alexandria...".into(),
      }),
    );
    roundtrip(
      SectionShape::CasualConversation,
      SubmissionContent::Opinion(OpinionSubmission {
        topic: "Remote Work".into(),
        question: "Is working from home better?".into(),
        opinion: "In my opinion it depends on the job.".into(),
      }),
    );
  }

  #[test]
  fn video_quiz_roundtrip_carries_type_tag() {
    let content = SubmissionContent::VideoQuiz(VideoQuizSubmission {
      tag: VideoQuizTag::VideoQuiz,
      answers: vec![VideoQuizAnswer {
        question: "What is a good opener?".into(),
        selected_answer: "The weather".into(),
        correct_answer: "The weather".into(),
        is_correct: true,
      }],
    });
    let encoded = content.encode();
    assert!(encoded.contains(r#""type":"video-quiz""#));
    roundtrip(SectionShape::VideoQuiz, content);
  }

  #[test]
  fn tax_shapes_roundtrip() {
    roundtrip(
      SectionShape::Tax,
      SubmissionContent::Tax(TaxSubmission::BasicsQuiz {
        answers: vec![TaxQuizAnswer {
          question: "When is the filing deadline?".into(),
          selected_answer: "April 30".into(),
          correct_answer: None,
          is_correct: true,
        }],
      }),
    );
    roundtrip(
      SectionShape::Tax,
      SubmissionContent::Tax(TaxSubmission::FilingQuiz {
        answers: vec![TaxQuizAnswer {
          question: "Which form reports employment income?".into(),
          selected_answer: "T4".into(),
          correct_answer: Some("T4".into()),
          is_correct: true,
        }],
      }),
    );
    roundtrip(
      SectionShape::Tax,
      SubmissionContent::Tax(TaxSubmission::IncomeTaxScenario {
        scenario: "Reading your first T4".into(),
        answers: vec![IncomeTaxAnswer {
          question: "What is in box 14?".into(),
          user_answer: "Employment income".into(),
          correct_answer: "Employment income".into(),
        }],
      }),
    );
    roundtrip(
      SectionShape::Tax,
      SubmissionContent::Tax(TaxSubmission::DeductionsCaseStudy {
        case_study: "Sara's moving expenses".into(),
        answers: vec![TaxQuizAnswer {
          question: "Can she deduct the moving truck?".into(),
          selected_answer: "Yes".into(),
          correct_answer: Some("Yes".into()),
          is_correct: true,
        }],
      }),
    );
    roundtrip(
      SectionShape::Tax,
      SubmissionContent::Tax(TaxSubmission::TaxScenario {
        scenario: "First job, two employers".into(),
        answers: vec![ScenarioAnswer {
          question: "Estimate the total income.".into(),
          answer: "42000".into(),
          kind: "calculation".into(),
        }],
      }),
    );
  }

  #[test]
  fn tax_unknown_type_fails_decode() {
    let content = r#"{"type":"mystery-quiz","answers":[]}"#;
    assert_eq!(decode(SectionShape::Tax, content), None);
  }

  #[test]
  fn audio_roundtrip() {
    roundtrip(
      SectionShape::Audio,
      SubmissionContent::Audio(AudioSubmission {
        audio: "data:audio/webm;base64,AAAA".into(),
        duration: 12.4,
      }),
    );
  }

  #[test]
  fn email_encodes_as_plain_text_and_roundtrips() {
    let content = SubmissionContent::Email(EmailSubmission {
      subject: "Meeting follow-up".into(),
      body: "Dear Ms. Park,\n\nThank you for your time today.".into(),
    });
    let encoded = content.encode();
    assert!(encoded.starts_with("Subject: Meeting follow-up\n\n"));
    assert!(!encoded.contains('{'));
    roundtrip(SectionShape::Email, content);
  }

  #[test]
  fn email_without_subject_prefix_decodes_totally() {
    let decoded = decode(SectionShape::Email, "just a plain reply\nwith two lines");
    match decoded {
      Some(SubmissionContent::Email(e)) => {
        assert_eq!(e.subject, "");
        assert_eq!(e.body, "with two lines");
      }
      other => panic!("unexpected decode: {:?}", other),
    }
  }

  #[test]
  fn malformed_json_fails_decode_for_json_shapes() {
    for shape in [
      SectionShape::Vocabulary,
      SectionShape::CasualConversation,
      SectionShape::VideoQuiz,
      SectionShape::Tax,
      SectionShape::Audio,
    ] {
      assert_eq!(decode(shape, "not json at all"), None, "shape {:?}", shape);
    }
  }
}
