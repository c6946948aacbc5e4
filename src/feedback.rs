//! Extraction of the structured bilingual feedback record from one LLM
//! completion.
//!
//! Purely syntactic pattern matching: the grading prompt (see `config`) is
//! responsible for emitting the header literals in exactly this form. The
//! extractor has zero semantic understanding — a completion that deviates
//! from the template degrades to empty sections and a "N/A" grade, never an
//! error. A `Feedback` value is always returned.

use crate::domain::{BilingualAdvice, Feedback, FeedbackSections};

pub const EN_STRENGTHS_HEADER: &str = "Strengths:";
pub const EN_IMPROVEMENTS_HEADER: &str = "Areas for Improvement:";
pub const EN_ACTIONS_HEADER: &str = "Action Items:";

// Egyptian-Arabic section headers, kept literal byte-for-byte.
pub const AR_STRENGTHS_HEADER: &str = "النقاط الحلوة:";
pub const AR_IMPROVEMENTS_HEADER: &str = "المحتاج شغل:";
pub const AR_ACTIONS_HEADER: &str = "عشان تتحسن لازم:";

/// Sentinel grade when no `Grade:` line was found.
pub const GRADE_NOT_FOUND: &str = "N/A";

/// Convert one completion into the structured record. Total function.
pub fn extract_feedback(completion: &str) -> Feedback {
  Feedback {
    grade: extract_grade(completion),
    advice: BilingualAdvice {
      en: FeedbackSections {
        strengths: bullet_block(completion, EN_STRENGTHS_HEADER),
        improvements: bullet_block(completion, EN_IMPROVEMENTS_HEADER),
        actions: numbered_block(completion, EN_ACTIONS_HEADER, ascii_ordinal_item),
      },
      ar: FeedbackSections {
        strengths: bullet_block(completion, AR_STRENGTHS_HEADER),
        improvements: bullet_block(completion, AR_IMPROVEMENTS_HEADER),
        actions: numbered_block(completion, AR_ACTIONS_HEADER, arabic_ordinal_item),
      },
    },
  }
}

/// First line of the form `Grade: <single letter A-F>`, case-insensitive on
/// both the prefix and the letter. Anything else keeps scanning; no match
/// at all yields the sentinel.
fn extract_grade(completion: &str) -> String {
  for line in completion.lines() {
    let rest = match strip_prefix_ci(line.trim(), "grade:") {
      Some(r) => r.trim(),
      None => continue,
    };
    let mut chars = rest.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
      let up = letter.to_ascii_uppercase();
      if ('A'..='F').contains(&up) {
        return up.to_string();
      }
    }
  }
  GRADE_NOT_FOUND.into()
}

/// Bullet lines (`•`) following `header`, markers stripped and trimmed.
fn bullet_block(text: &str, header: &str) -> Vec<String> {
  collect_block(text, header, bullet_item)
}

/// Numbered lines following `header`; the ordinal alphabet differs between
/// the English (ASCII digits) and Arabic (Arabic-Indic digits) blocks.
fn numbered_block(text: &str, header: &str, item: fn(&str) -> Option<String>) -> Vec<String> {
  collect_block(text, header, item)
}

/// Shared block scanner: find the header line, skip blank lines, then
/// collect consecutive marker lines. The first line that breaks the
/// pattern ends the block; a missing header yields an empty list.
fn collect_block(text: &str, header: &str, item: fn(&str) -> Option<String>) -> Vec<String> {
  let mut lines = text.lines();
  loop {
    match lines.next() {
      Some(line) if line.trim().starts_with(header) => break,
      Some(_) => continue,
      None => return Vec::new(),
    }
  }

  let mut out = Vec::new();
  for line in lines {
    let trimmed = line.trim();
    if trimmed.is_empty() {
      if out.is_empty() {
        continue;
      }
      break;
    }
    match item(trimmed) {
      Some(v) => out.push(v),
      None => break,
    }
  }
  out
}

fn bullet_item(line: &str) -> Option<String> {
  line.strip_prefix('•').map(|rest| rest.trim().to_string())
}

fn ascii_ordinal_item(line: &str) -> Option<String> {
  let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
  if digits == 0 {
    return None;
  }
  line[digits..].strip_prefix('.').map(|rest| rest.trim().to_string())
}

/// Arabic action items are numbered with Arabic-Indic digits (١ ٢ ٣ ...,
/// U+0660..=U+0669) followed by an ASCII dot.
fn arabic_ordinal_item(line: &str) -> Option<String> {
  let mut digits_len = 0;
  for c in line.chars() {
    if ('\u{0660}'..='\u{0669}').contains(&c) {
      digits_len += c.len_utf8();
    } else {
      break;
    }
  }
  if digits_len == 0 {
    return None;
  }
  line[digits_len..].strip_prefix('.').map(|rest| rest.trim().to_string())
}

/// Case-insensitive ASCII prefix strip that never splits a UTF-8 boundary.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
  match s.get(..prefix.len()) {
    Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&s[prefix.len()..]),
    _ => None,
  }
}
