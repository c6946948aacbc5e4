//! Read-side formatting of stored submissions.
//!
//! Dispatch is keyed on the `(lesson_id, section_id)` pair first — different
//! lessons reuse section names like "speaking" for differently-shaped
//! content, so lesson scoping is mandatory. Every formatter degrades to a
//! raw-text render on parse or shape failure: a learner's past submission
//! must stay visible no matter how malformed or legacy-shaped it is.

use base64::Engine;
use serde::Serialize;

use crate::catalog;
use crate::submission::{
  self, AudioSubmission, ConversationSubmission, EmailSubmission, OpinionSubmission,
  SectionShape, StorySubmission, SubmissionContent, TaxQuizAnswer, TaxSubmission,
  VideoQuizSubmission, VocabularySubmission,
};

/// Marker for quiz rows shown green/red from the stored verdict. The stored
/// `isCorrect` is trusted as ground truth; nothing is recomputed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  Correct,
  Incorrect,
}

/// Renderable tree handed to the page layer (serde ready).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rendered {
  /// Fallback: the literal stored string, shown as-is.
  RawText { text: String },
  Group { children: Vec<Rendered> },
  Section { title: String, children: Vec<Rendered> },
  /// A "label: value" line, e.g. a vocabulary phrase and its answer.
  Labeled { label: String, value: String },
  Paragraph { text: String },
  /// Dimmed context line (a situation, prompt or question).
  Context { text: String },
  AudioClip {
    src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    byte_len: Option<usize>,
  },
  Email {
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    body: String,
  },
  QuizRow {
    question: String,
    answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
  },
  /// Pretty-printed JSON for tax payloads with an unrecognized `type`.
  PrettyJson { text: String },
}

/// Shape expected for a `(lesson, section)` pair. Everything unknown is
/// plain text, which always renders raw.
pub fn section_shape(lesson_id: &str, section_id: &str) -> SectionShape {
  match lesson_id {
    catalog::LESSON_PROFESSIONAL_COMMUNICATION => match section_id {
      "vocabulary" => SectionShape::Vocabulary,
      "speaking" => SectionShape::Audio,
      "email-writing" => SectionShape::Email,
      "watch" => SectionShape::VideoQuiz,
      _ => SectionShape::PlainText,
    },
    catalog::LESSON_CASUAL_CONVERSATION => match section_id {
      "conversation" | "storytelling" | "opinion" => SectionShape::CasualConversation,
      "speaking" => SectionShape::Audio,
      "watch" => SectionShape::VideoQuiz,
      _ => SectionShape::PlainText,
    },
    catalog::LESSON_TAX_ESSENTIALS => match section_id {
      "tax-basics" | "filing" | "income-tax" | "deductions" | "scenarios" => SectionShape::Tax,
      _ => SectionShape::PlainText,
    },
    _ => SectionShape::PlainText,
  }
}

/// Reconstruct a human-viewable representation of a stored submission.
/// Total: never panics, never errors; worst case is the raw string.
pub fn format_response(content: &str, section_id: &str, lesson_id: &str) -> Rendered {
  let shape = section_shape(lesson_id, section_id);
  match shape {
    SectionShape::PlainText => raw(content),
    // Tax keeps its own fallback ladder (pretty JSON for unknown `type`).
    SectionShape::Tax => format_tax(content),
    _ => match submission::decode(shape, content) {
      Some(SubmissionContent::Vocabulary(v)) => format_vocabulary(&v),
      Some(SubmissionContent::Conversation(c)) => format_conversation(&c),
      Some(SubmissionContent::Story(s)) => format_story(&s),
      Some(SubmissionContent::Opinion(o)) => format_opinion(&o),
      Some(SubmissionContent::VideoQuiz(q)) => format_video_quiz(&q),
      Some(SubmissionContent::Audio(a)) => format_audio(&a),
      Some(SubmissionContent::Email(e)) => format_email(&e),
      Some(SubmissionContent::Tax(_)) | None => raw(content),
    },
  }
}

fn raw(content: &str) -> Rendered {
  Rendered::RawText { text: content.to_string() }
}

/// Positional pairing against the catalog phrase lists. A submission with
/// fewer answers than the list renders blanks for the missing entries —
/// the write side made the same positional-index assumption.
fn format_vocabulary(v: &VocabularySubmission) -> Rendered {
  let children = v
    .exercises
    .iter()
    .map(|ex| {
      let phrases = catalog::vocabulary_phrases(ex.kind);
      let rows = phrases
        .iter()
        .enumerate()
        .map(|(i, phrase)| Rendered::Labeled {
          label: (*phrase).to_string(),
          value: ex.answers.get(i).cloned().unwrap_or_default(),
        })
        .collect();
      Rendered::Section {
        title: catalog::vocabulary_exercise_title(ex.kind).to_string(),
        children: rows,
      }
    })
    .collect();
  Rendered::Group { children }
}

fn format_conversation(c: &ConversationSubmission) -> Rendered {
  let children = c
    .responses
    .iter()
    .flat_map(|turn| {
      [
        Rendered::Context { text: turn.situation.clone() },
        Rendered::Paragraph { text: turn.selected_answer.clone() },
      ]
    })
    .collect();
  Rendered::Group { children }
}

fn format_story(s: &StorySubmission) -> Rendered {
  Rendered::Group {
    children: vec![
      Rendered::Context { text: s.prompt.clone() },
      Rendered::Paragraph { text: s.story.clone() },
    ],
  }
}

fn format_opinion(o: &OpinionSubmission) -> Rendered {
  Rendered::Group {
    children: vec![
      Rendered::Labeled { label: "Topic".into(), value: o.topic.clone() },
      Rendered::Context { text: o.question.clone() },
      Rendered::Paragraph { text: o.opinion.clone() },
    ],
  }
}

fn format_video_quiz(q: &VideoQuizSubmission) -> Rendered {
  let children = q
    .answers
    .iter()
    .map(|a| Rendered::QuizRow {
      question: a.question.clone(),
      answer: a.selected_answer.clone(),
      expected: Some(a.correct_answer.clone()),
      verdict: Some(verdict(a.is_correct)),
    })
    .collect();
  Rendered::Group { children }
}

fn format_audio(a: &AudioSubmission) -> Rendered {
  Rendered::AudioClip {
    src: a.audio.clone(),
    duration_secs: if a.duration > 0.0 { Some(a.duration.round() as u32) } else { None },
    byte_len: data_uri_byte_len(&a.audio),
  }
}

fn format_email(e: &EmailSubmission) -> Rendered {
  Rendered::Email {
    subject: if e.subject.is_empty() { None } else { Some(e.subject.clone()) },
    body: e.body.clone(),
  }
}

/// Tax fallback ladder: not JSON -> raw text; JSON but unrecognized `type`
/// -> pretty-printed JSON; otherwise the matching sub-renderer.
fn format_tax(content: &str) -> Rendered {
  let value: serde_json::Value = match serde_json::from_str(content) {
    Ok(v) => v,
    Err(_) => return raw(content),
  };
  match serde_json::from_value::<TaxSubmission>(value.clone()) {
    Ok(tax) => format_tax_submission(&tax),
    Err(_) => Rendered::PrettyJson {
      text: serde_json::to_string_pretty(&value).unwrap_or_else(|_| content.to_string()),
    },
  }
}

fn format_tax_submission(tax: &TaxSubmission) -> Rendered {
  match tax {
    TaxSubmission::BasicsQuiz { answers } | TaxSubmission::FilingQuiz { answers } => {
      Rendered::Group { children: tax_quiz_rows(answers) }
    }
    TaxSubmission::IncomeTaxScenario { scenario, answers } => Rendered::Section {
      title: scenario.clone(),
      children: answers
        .iter()
        .map(|a| Rendered::QuizRow {
          question: a.question.clone(),
          answer: a.user_answer.clone(),
          expected: Some(a.correct_answer.clone()),
          // No verdict was stored at write time, so none is shown.
          verdict: None,
        })
        .collect(),
    },
    TaxSubmission::DeductionsCaseStudy { case_study, answers } => Rendered::Section {
      title: case_study.clone(),
      children: tax_quiz_rows(answers),
    },
    TaxSubmission::TaxScenario { scenario, answers } => Rendered::Section {
      title: scenario.clone(),
      children: answers
        .iter()
        .flat_map(|a| {
          [
            Rendered::Context { text: a.question.clone() },
            Rendered::Paragraph { text: a.answer.clone() },
          ]
        })
        .collect(),
    },
  }
}

fn tax_quiz_rows(answers: &[TaxQuizAnswer]) -> Vec<Rendered> {
  answers
    .iter()
    .map(|a| Rendered::QuizRow {
      question: a.question.clone(),
      answer: a.selected_answer.clone(),
      expected: a.correct_answer.clone(),
      verdict: Some(verdict(a.is_correct)),
    })
    .collect()
}

fn verdict(is_correct: bool) -> Verdict {
  if is_correct { Verdict::Correct } else { Verdict::Incorrect }
}

fn data_uri_byte_len(src: &str) -> Option<usize> {
  let (_, payload) = src.split_once(";base64,")?;
  base64::engine::general_purpose::STANDARD
    .decode(payload)
    .ok()
    .map(|bytes| bytes.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::submission::{VocabularyExercise, VocabularyKind};

  const PROF: &str = catalog::LESSON_PROFESSIONAL_COMMUNICATION;
  const CASUAL: &str = catalog::LESSON_CASUAL_CONVERSATION;
  const TAX: &str = catalog::LESSON_TAX_ESSENTIALS;

  #[test]
  fn non_json_renders_raw_for_every_json_section() {
    let pairs = [
      (PROF, "vocabulary"),
      (PROF, "speaking"),
      (PROF, "watch"),
      (CASUAL, "conversation"),
      (CASUAL, "storytelling"),
      (CASUAL, "opinion"),
      (CASUAL, "speaking"),
      (TAX, "tax-basics"),
      (TAX, "filing"),
      (TAX, "income-tax"),
      (TAX, "deductions"),
      (TAX, "scenarios"),
    ];
    for (lesson, section) in pairs {
      let out = format_response("{oops, not json", section, lesson);
      assert_eq!(
        out,
        Rendered::RawText { text: "{oops, not json".into() },
        "pair ({lesson}, {section})"
      );
    }
  }

  #[test]
  fn dispatch_is_a_function_of_the_lesson_section_pair() {
    let content = r#"{"responses":[{"situation":"At the park","selectedAnswer":"Nice day!"}]}"#;
    // Under the casual-conversation lesson this is a structured render.
    let casual = format_response(content, "conversation", CASUAL);
    assert!(matches!(casual, Rendered::Group { .. }));
    // The same section name under another lesson has no formatter and
    // must fall back to the raw string, not cross-interpret.
    let prof = format_response(content, "conversation", PROF);
    assert_eq!(prof, Rendered::RawText { text: content.into() });
  }

  #[test]
  fn unknown_lesson_renders_raw() {
    let out = format_response("anything", "speaking", "brand-new-lesson-9");
    assert_eq!(out, Rendered::RawText { text: "anything".into() });
  }

  #[test]
  fn vocabulary_missing_answers_render_silent_blanks() {
    let content = SubmissionContent::Vocabulary(VocabularySubmission {
      exercises: vec![VocabularyExercise {
        kind: VocabularyKind::Matching,
        answers: vec!["to begin".into(), "to wrap up".into()],
      }],
    })
    .encode();
    let out = format_response(&content, "vocabulary", PROF);
    let rows = match out {
      Rendered::Group { children } => match &children[0] {
        Rendered::Section { title, children } => {
          assert_eq!(title, "Meeting Vocabulary");
          children.clone()
        }
        other => panic!("expected section, got {:?}", other),
      },
      other => panic!("expected group, got {:?}", other),
    };
    // Four phrases in the shared list; two answered, two blank.
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], Rendered::Labeled { label: "Let's get started".into(), value: "to begin".into() });
    assert_eq!(rows[2], Rendered::Labeled { label: "Any questions?".into(), value: String::new() });
    assert_eq!(rows[3], Rendered::Labeled { label: "Moving on to".into(), value: String::new() });
  }

  #[test]
  fn speaking_sections_render_audio_under_both_lessons() {
    let content = r#"{"audio":"data:audio/webm;base64,aGVsbG8=","duration":3.6}"#;
    for lesson in [PROF, CASUAL] {
      match format_response(content, "speaking", lesson) {
        Rendered::AudioClip { src, duration_secs, byte_len } => {
          assert!(src.starts_with("data:audio/webm;base64,"));
          assert_eq!(duration_secs, Some(4));
          assert_eq!(byte_len, Some(5)); // "hello"
        }
        other => panic!("expected audio clip, got {:?}", other),
      }
    }
  }

  #[test]
  fn audio_with_undecodable_payload_still_renders() {
    let content = r#"{"audio":"data:audio/webm;base64,%%%","duration":0.0}"#;
    match format_response(content, "speaking", PROF) {
      Rendered::AudioClip { duration_secs, byte_len, .. } => {
        assert_eq!(duration_secs, None);
        assert_eq!(byte_len, None);
      }
      other => panic!("expected audio clip, got {:?}", other),
    }
  }

  #[test]
  fn email_renders_subject_and_body() {
    let out = format_response(
      "Subject: Sick day\n\nDear team,\nI will be out today.",
      "email-writing",
      PROF,
    );
    assert_eq!(
      out,
      Rendered::Email {
        subject: Some("Sick day".into()),
        body: "Dear team,\nI will be out today.".into(),
      }
    );
  }

  #[test]
  fn video_quiz_rows_trust_stored_verdicts() {
    let content = concat!(
      r#"{"type":"video-quiz","answers":["#,
      r#"{"question":"Q1","selectedAnswer":"A","correctAnswer":"A","isCorrect":true},"#,
      r#"{"question":"Q2","selectedAnswer":"B","correctAnswer":"C","isCorrect":false}"#,
      r#"]}"#
    );
    match format_response(content, "watch", CASUAL) {
      Rendered::Group { children } => {
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[0], Rendered::QuizRow { verdict: Some(Verdict::Correct), .. }));
        assert!(matches!(&children[1], Rendered::QuizRow { verdict: Some(Verdict::Incorrect), .. }));
      }
      other => panic!("expected group, got {:?}", other),
    }
  }

  #[test]
  fn tax_unrecognized_type_pretty_prints_json() {
    let content = r#"{"type":"surprise-quiz","answers":[]}"#;
    match format_response(content, "tax-basics", TAX) {
      Rendered::PrettyJson { text } => {
        assert!(text.contains("surprise-quiz"));
        assert!(text.contains('\n')); // pretty, not the stored one-liner
      }
      other => panic!("expected pretty json, got {:?}", other),
    }
  }

  #[test]
  fn tax_scenario_renders_question_answer_pairs() {
    let content = concat!(
      r#"{"type":"tax-scenario","scenario":"Two employers","answers":["#,
      r#"{"question":"Total income?","answer":"42000","type":"calculation"}"#,
      r#"]}"#
    );
    match format_response(content, "scenarios", TAX) {
      Rendered::Section { title, children } => {
        assert_eq!(title, "Two employers");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], Rendered::Context { text: "Total income?".into() });
        assert_eq!(children[1], Rendered::Paragraph { text: "42000".into() });
      }
      other => panic!("expected section, got {:?}", other),
    }
  }
}
