//! Character generation: prompt, parse, validate, and fall back.

use crate::core::catalog;
use crate::core::models::{Character, GeneratedRecord, Universe};
use crate::services::llm::{ChatOptions, LlmClient};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;
use std::sync::Arc;
use thiserror::Error;

/// How many characters each request asks for. Not enforced on the result.
pub const CHARACTER_COUNT: usize = 6;

/// Advisory shown whenever the built-in roster replaces generated characters.
/// The underlying failure stays in the logs.
pub const FALLBACK_WARNING: &str = "Character generation unavailable; showing default characters";

pub const POWER_RANGE: RangeInclusive<u8> = 60..=100;
pub const COMPLEXITY_RANGE: RangeInclusive<u8> = 40..=70;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("response contained no JSON")]
    NoJson,
    #[error("expected a JSON array of characters")]
    NotAnArray,
    #[error("response contained no characters")]
    Empty,
    #[error("character {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Category is required")]
    MissingCategory,
    #[error("character generation failed: {0:#}")]
    Upstream(anyhow::Error),
    #[error("failed to parse character data: {0}")]
    Malformed(#[from] ParseError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Serve the fallback roster when generation fails. When off, the HTTP
    /// endpoint reports the failure and leaves the fallback to the client.
    #[serde(default = "default_fallback")]
    pub fallback: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            fallback: default_fallback(),
        }
    }
}

fn default_count() -> usize {
    CHARACTER_COUNT
}
fn default_temperature() -> f32 {
    0.8
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_fallback() -> bool {
    true
}

// --- Parsing ---

/// Strips a surrounding markdown code fence, if any.
pub fn strip_code_blocks(s: &str) -> String {
    let s = s.trim();
    if s.starts_with("```json") {
        s.trim_start_matches("```json").trim_end_matches("```").trim().to_string()
    } else if s.starts_with("```") {
        s.trim_start_matches("```").trim_end_matches("```").trim().to_string()
    } else {
        s.to_string()
    }
}

/// Finds the end of the bracketed literal opening at `start`, honouring JSON
/// strings and escapes. Returns the byte index one past the closing bracket.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Every balanced `[...]` substring that parses as a JSON array, in order of
/// their opening bracket.
pub fn array_literals(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('[').filter_map(move |(start, _)| {
        let end = balanced_end(text, start)?;
        let candidate = &text[start..end];
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Array(_)) => Some(candidate),
            _ => None,
        }
    })
}

pub fn find_array_literal(text: &str) -> Option<&str> {
    array_literals(text).next()
}

/// Turns free-form model output into validated records.
///
/// The first array literal that validates wins, so bracketed prose such as
/// `[6]` ahead of the payload is skipped. With no array literal at all the
/// whole text (minus a code fence) is tried as JSON. Validation is
/// all-or-nothing per candidate; when none validates, the first candidate's
/// error is returned.
pub fn parse_characters(text: &str) -> Result<Vec<GeneratedRecord>, ParseError> {
    let mut first_error = None;
    for literal in array_literals(text) {
        let value = serde_json::from_str(literal).map_err(|_| ParseError::NoJson)?;
        match validate_characters(value) {
            Ok(records) => return Ok(records),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    let value = serde_json::from_str(&strip_code_blocks(text)).map_err(|_| ParseError::NoJson)?;
    validate_characters(value)
}

pub fn validate_characters(value: Value) -> Result<Vec<GeneratedRecord>, ParseError> {
    let Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };
    if items.is_empty() {
        return Err(ParseError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: GeneratedRecord = serde_json::from_value(item)
                .map_err(|e| ParseError::InvalidRecord { index, reason: e.to_string() })?;
            record.check().map_err(|field| ParseError::InvalidRecord {
                index,
                reason: format!("{} is empty", field),
            })?;
            Ok(record)
        })
        .collect()
}

// --- Prompting ---

pub fn system_prompt() -> &'static str {
    "You are a creative character generator for role-playing games. \
     Produce diverse, structured character records and always respond with valid JSON."
}

pub fn user_prompt(category: &str, count: usize) -> String {
    let setting = Universe::from_id(category)
        .map(|u| u.generation_description())
        .unwrap_or(category);

    format!(
        "Generate {count} unique and diverse characters for the {setting}.\n\
         \n\
         Each character needs:\n\
         - name: a fitting name\n\
         - description: two or three sentences on appearance, personality and background\n\
         - role: their primary role or profession\n\
         - abilities: 2-3 key abilities or skills\n\
         - personality: 3-4 defining traits\n\
         \n\
         Respond with a JSON array only, shaped like:\n\
         [\n  {{\n    \"name\": \"...\",\n    \"description\": \"...\",\n    \"role\": \"...\",\n    \
         \"abilities\": [\"...\", \"...\"],\n    \"personality\": [\"...\", \"...\", \"...\"]\n  }}\n]"
    )
}

// --- Generation ---

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationSource {
    Generated,
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub records: Vec<GeneratedRecord>,
    pub source: GenerationSource,
}

impl Generation {
    pub fn fallback(category: &str, reason: impl Into<String>) -> Self {
        Self {
            records: catalog::fallback_for_category(category),
            source: GenerationSource::Fallback { reason: reason.into() },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, GenerationSource::Fallback { .. })
    }

    /// Client-safe advisory; never includes the failure detail.
    pub fn warning(&self) -> Option<&'static str> {
        self.is_fallback().then_some(FALLBACK_WARNING)
    }

    /// Why the fallback was used. For logs only.
    pub fn reason(&self) -> Option<&str> {
        match &self.source {
            GenerationSource::Generated => None,
            GenerationSource::Fallback { reason } => Some(reason),
        }
    }
}

/// Stateless front for the generative service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CharacterGenerator {
    llm: Arc<dyn LlmClient>,
    config: GenerationConfig,
}

impl CharacterGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, config: GenerationConfig) -> Self {
        Self { llm, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// One generation attempt with no fallback.
    pub async fn request(&self, category: &str) -> Result<Vec<GeneratedRecord>, GenerationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(GenerationError::MissingCategory);
        }

        let prompt = user_prompt(category, self.config.count);
        let text = self
            .llm
            .chat(system_prompt(), &prompt, &self.chat_options())
            .await
            .map_err(GenerationError::Upstream)?;

        if text.trim().is_empty() {
            return Err(GenerationError::Upstream(anyhow::anyhow!("No response from AI")));
        }

        match parse_characters(&text) {
            Ok(records) => {
                if records.len() != self.config.count {
                    log::debug!(
                        "Asked for {} characters for {}, got {}",
                        self.config.count,
                        category,
                        records.len()
                    );
                }
                Ok(records)
            }
            Err(e) => {
                log::warn!("Failed to parse character response for {}: {}", category, e);
                log::debug!("Unparseable response: {}", text);
                Err(e.into())
            }
        }
    }

    /// Generates characters, substituting the fallback roster on any failure
    /// other than a missing category.
    pub async fn generate(&self, category: &str) -> Result<Generation, GenerationError> {
        match self.request(category).await {
            Ok(records) => Ok(Generation {
                records,
                source: GenerationSource::Generated,
            }),
            Err(GenerationError::MissingCategory) => Err(GenerationError::MissingCategory),
            Err(e) => {
                log::warn!("Using fallback characters for {}: {}", category.trim(), e);
                Ok(Generation::fallback(category.trim(), e.to_string()))
            }
        }
    }
}

// --- Roster ---

pub fn annotate<R: Rng>(records: Vec<GeneratedRecord>, rng: &mut R) -> Vec<Character> {
    records
        .into_iter()
        .map(|record| Character {
            record,
            power_level: rng.random_range(POWER_RANGE),
            complexity: rng.random_range(COMPLEXITY_RANGE),
        })
        .collect()
}

/// The character step's choices plus an optional advisory message.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub characters: Vec<Character>,
    pub warning: Option<String>,
}

impl Roster {
    pub fn from_generation<R: Rng>(generation: Generation, rng: &mut R) -> Self {
        let warning = generation.warning().map(str::to_string);
        Self {
            characters: annotate(generation.records, rng),
            warning,
        }
    }

    /// Builds the roster from an API call's outcome, falling back locally when
    /// the call itself failed.
    pub fn from_response<R: Rng>(
        universe: &str,
        response: anyhow::Result<(Vec<GeneratedRecord>, Option<String>)>,
        rng: &mut R,
    ) -> Self {
        match response {
            Ok((records, warning)) => Self {
                characters: annotate(records, rng),
                warning,
            },
            Err(e) => {
                log::warn!("Character request failed, using fallback roster: {:#}", e);
                Self::from_generation(Generation::fallback(universe, e.to_string()), rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    const ONE_RECORD: &str = "Here you go:\n[{\"name\":\"A\",\"description\":\"d\",\"role\":\"r\",\"abilities\":[\"x\",\"y\"],\"personality\":[\"p\",\"q\",\"s\"]}]";

    #[derive(Debug)]
    struct MockLlmClient {
        reply: Result<String, String>,
        prompts: Mutex<Vec<(String, ChatOptions)>>,
    }

    impl MockLlmClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.to_string()), prompts: Mutex::new(Vec::new()) })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self { reply: Err(message.to_string()), prompts: Mutex::new(Vec::new()) })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn chat(&self, _system: &str, user: &str, options: &ChatOptions) -> Result<String> {
            self.prompts.lock().unwrap().push((user.to_string(), *options));
            self.reply.clone().map_err(|e| anyhow!(e))
        }
    }

    fn generator(llm: Arc<MockLlmClient>) -> CharacterGenerator {
        CharacterGenerator::new(llm, GenerationConfig::default())
    }

    fn six_records_json() -> String {
        let records: Vec<GeneratedRecord> = (0..6)
            .map(|i| GeneratedRecord {
                name: format!("Hero {i}"),
                description: "A wanderer with a [redacted] past.".to_string(),
                role: "Ranger".to_string(),
                abilities: vec!["Archery".to_string(), "Tracking".to_string()],
                personality: vec!["Calm".to_string(), "Wry".to_string(), "Loyal".to_string()],
            })
            .collect();
        serde_json::to_string_pretty(&records).unwrap()
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("json"), "json");
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("  ```json  \n  {}  \n  ```  "), "{}");
    }

    #[test]
    fn parse_extracts_array_from_prose() {
        let records = parse_characters(ONE_RECORD).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].personality, vec!["p", "q", "s"]);
    }

    #[test]
    fn parse_ignores_brackets_inside_strings_and_trailing_prose() {
        let text = format!("Sure! ```json\n{}\n```\nEnjoy [and have fun].", six_records_json());
        let records = parse_characters(&text).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[2].description, "A wanderer with a [redacted] past.");
    }

    #[test]
    fn parse_skips_bracketed_prose_before_the_array() {
        let text = format!("[Note] see below\n{}", six_records_json());
        assert!(find_array_literal(&text).is_some_and(|s| s.starts_with("[\n")));
        assert_eq!(parse_characters(&text).unwrap().len(), 6);
    }

    #[test]
    fn parse_skips_arrays_in_prose_that_are_not_characters() {
        let text = format!("Here are [6] characters:\n{}", six_records_json());
        assert_eq!(find_array_literal(&text), Some("[6]"));
        let records = parse_characters(&text).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].name, "Hero 0");
    }

    #[test]
    fn parse_is_idempotent_over_its_own_output() {
        let first = parse_characters(&six_records_json()).unwrap();
        let again = parse_characters(&serde_json::to_string(&first).unwrap()).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn parse_rejects_non_json() {
        assert_eq!(parse_characters("I cannot help with that."), Err(ParseError::NoJson));
        assert_eq!(parse_characters("[unclosed"), Err(ParseError::NoJson));
    }

    #[test]
    fn parse_rejects_object_and_empty_array() {
        assert_eq!(parse_characters(r#"{"name": "A"}"#), Err(ParseError::NotAnArray));
        assert_eq!(parse_characters("[]"), Err(ParseError::Empty));
    }

    #[test]
    fn validation_is_all_or_nothing() {
        let text = r#"[
            {"name":"A","description":"d","role":"r","abilities":["x"],"personality":["p"]},
            {"name":"B","description":"d","role":"r","abilities":["x"]}
        ]"#;
        match parse_characters(text) {
            Err(ParseError::InvalidRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("personality"), "{reason}");
            }
            other => panic!("expected invalid record, got {other:?}"),
        }

        let blank = r#"[{"name":"","description":"d","role":"r","abilities":["x"],"personality":["p"]}]"#;
        assert_eq!(
            parse_characters(blank),
            Err(ParseError::InvalidRecord { index: 0, reason: "name is empty".to_string() })
        );
    }

    #[test]
    fn prompt_uses_setting_description() {
        let prompt = user_prompt("star-wars", 6);
        assert!(prompt.contains("Generate 6"));
        assert!(prompt.contains("Jedi, Sith"));
        assert!(user_prompt("star-trek", 6).contains("star-trek"));
    }

    #[tokio::test]
    async fn generate_returns_parsed_records_without_count_check() {
        let llm = MockLlmClient::replying(ONE_RECORD);
        let generation = generator(llm.clone()).generate("star-wars").await.unwrap();

        assert_eq!(generation.source, GenerationSource::Generated);
        assert_eq!(generation.records.len(), 1);
        assert_eq!(generation.records[0].name, "A");

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].1, ChatOptions { temperature: 0.8, max_tokens: 2000 });
    }

    #[tokio::test]
    async fn generate_returns_six_for_every_universe() {
        for universe in Universe::ALL {
            let llm = MockLlmClient::replying(&six_records_json());
            let generation = generator(llm).generate(universe.id()).await.unwrap();
            assert!(!generation.is_fallback());
            assert_eq!(generation.records.len(), CHARACTER_COUNT);
        }
    }

    #[tokio::test]
    async fn missing_category_is_rejected_without_calling_upstream() {
        let llm = MockLlmClient::replying(ONE_RECORD);
        let result = generator(llm.clone()).generate("  ").await;
        assert!(matches!(result, Err(GenerationError::MissingCategory)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn failures_fall_back_to_catalog() {
        let cases = [
            MockLlmClient::replying(""),
            MockLlmClient::replying("The characters are lovely."),
            MockLlmClient::replying(r#"[{"name":"A","description":"d"}]"#),
            MockLlmClient::failing("connection refused"),
        ];

        for universe in Universe::ALL {
            for llm in &cases {
                let generation = generator(llm.clone()).generate(universe.id()).await.unwrap();
                assert!(generation.is_fallback());
                assert!(generation.warning().is_some());
                assert_eq!(generation.records, catalog::fallback_characters(universe));
            }
        }
    }

    #[tokio::test]
    async fn unknown_category_falls_back_to_default_universe() {
        let llm = MockLlmClient::failing("timeout");
        let generation = generator(llm).generate("star-trek").await.unwrap();
        assert_eq!(generation.records, catalog::fallback_characters(Universe::DEFAULT));
        assert_eq!(generation.warning(), Some(FALLBACK_WARNING));
        assert!(generation.reason().unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn fallback_warning_hides_upstream_detail() {
        let llm = MockLlmClient::failing(
            "error sending request for url (https://example.test/v1?key=SECRET_KEY_123)",
        );
        let generation = generator(llm).generate("dc").await.unwrap();
        assert!(!generation.warning().unwrap().contains("SECRET_KEY_123"));
        assert!(generation.reason().unwrap().contains("SECRET_KEY_123"));
    }

    #[tokio::test]
    async fn request_surfaces_the_failure() {
        let llm = MockLlmClient::replying("nope");
        let err = generator(llm).request("dc").await.unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(ParseError::NoJson)));
    }

    #[test]
    fn annotate_draws_scores_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = catalog::fallback_characters(Universe::GameOfThrones);
        for _ in 0..50 {
            for character in annotate(records.clone(), &mut rng) {
                assert!(POWER_RANGE.contains(&character.power_level));
                assert!(COMPLEXITY_RANGE.contains(&character.complexity));
            }
        }
        let annotated = annotate(records.clone(), &mut rng);
        let stripped: Vec<_> = annotated.into_iter().map(|c| c.record).collect();
        assert_eq!(stripped, records);
    }

    #[test]
    fn roster_falls_back_when_the_call_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let roster = Roster::from_response("lord-of-the-rings", Err(anyhow!("Failed to generate characters")), &mut rng);
        assert_eq!(roster.warning.as_deref(), Some(FALLBACK_WARNING));
        let names: Vec<_> = roster.characters.iter().map(|c| c.record.name.as_str()).collect();
        assert_eq!(names, ["Ranger Elara", "Loremaster Theron", "Captain Borin"]);
    }

    #[test]
    fn roster_keeps_server_warning() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = parse_characters(ONE_RECORD).unwrap();
        let roster = Roster::from_response("star-wars", Ok((records, Some("used fallback".to_string()))), &mut rng);
        assert_eq!(roster.characters.len(), 1);
        assert_eq!(roster.warning.as_deref(), Some("used fallback"));
    }
}
