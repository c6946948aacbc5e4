//! MyMemory translation client.
//!
//! Free GET endpoint, no API key. We surface the primary translation plus up
//! to three distinct alternatives from the match list.

use std::time::Duration;

use serde::Deserialize;
use tracing::{instrument, info};

const MYMEMORY_BASE_URL: &str = "https://api.mymemory.translated.net";

#[derive(Clone)]
pub struct Translator {
  client: reqwest::Client,
  base_url: String,
}

/// Primary translation plus alternative renderings, best first.
#[derive(Clone, Debug)]
pub struct Translation {
  pub translation: String,
  pub alternatives: Vec<String>,
}

impl Translator {
  pub fn new() -> Self {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(15))
      .build()
      .unwrap_or_else(|_| reqwest::Client::new());
    let base_url =
      std::env::var("MYMEMORY_BASE_URL").unwrap_or_else(|_| MYMEMORY_BASE_URL.into());
    Self { client, base_url }
  }

  /// Translate `text` between two ISO language codes (e.g. "en" -> "ar").
  #[instrument(level = "info", skip(self, text), fields(text_len = text.len(), %source_lang, %target_lang))]
  pub async fn translate(
    &self,
    text: &str,
    source_lang: &str,
    target_lang: &str,
  ) -> Result<Translation, String> {
    let url = format!("{}/get", self.base_url);
    let langpair = format!("{}|{}", source_lang, target_lang);

    let res = self.client.get(&url)
      .query(&[("q", text), ("langpair", langpair.as_str())])
      .send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      return Err(format!("MyMemory HTTP {}", res.status()));
    }

    let body: MyMemoryResponse = res.json().await.map_err(|e| e.to_string())?;
    if body.response_status != 200 {
      let detail = body.response_message.unwrap_or_default();
      return Err(format!("MyMemory error {}: {}", body.response_status, detail));
    }

    let translation = body.response_data.translated_text;
    let alternatives: Vec<String> = body.matches.into_iter()
      .map(|m| m.translation)
      .filter(|t| !t.is_empty() && *t != translation)
      .take(3)
      .collect();

    info!(alt_count = alternatives.len(), "Translation received");
    Ok(Translation { translation, alternatives })
  }
}

// --- MyMemory DTOs ---

#[derive(Deserialize)]
struct MyMemoryResponse {
  #[serde(rename = "responseData")]
  response_data: ResponseData,
  #[serde(rename = "responseStatus")]
  response_status: i64,
  #[serde(rename = "responseDetails", default)]
  response_message: Option<String>,
  #[serde(default)]
  matches: Vec<TranslationMatch>,
}

#[derive(Deserialize)]
struct ResponseData {
  #[serde(rename = "translatedText")]
  translated_text: String,
}

#[derive(Deserialize)]
struct TranslationMatch {
  #[serde(default)]
  translation: String,
}
