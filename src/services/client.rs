use crate::core::models::{CharactersResponse, ErrorBody, GeneratedRecord};
use anyhow::{anyhow, bail, Context, Result};
use url::Url;

/// Client side of `POST /api/characters`.
#[derive(Debug, Clone)]
pub struct CharacterApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl CharacterApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join("/api/characters")
            .context("Failed to build characters endpoint")
    }

    /// Returns the records and the server's advisory warning, if any.
    pub async fn create_characters(&self, category: &str) -> Result<(Vec<GeneratedRecord>, Option<String>)> {
        let res = self
            .client
            .post(self.endpoint()?)
            .json(&serde_json::json!({ "category": category }))
            .send()
            .await
            .context("Failed to reach character service")?;

        let status = res.status();
        let text = res.text().await.context("Failed to read character response")?;
        parse_response(status.as_u16(), &text)
    }
}

fn parse_response(status: u16, text: &str) -> Result<(Vec<GeneratedRecord>, Option<String>)> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(text)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("Character service returned {}", status));
        return Err(anyhow!(message));
    }

    let body: CharactersResponse =
        serde_json::from_str(text).context("Failed to parse character response")?;
    if body.characters.is_empty() {
        bail!("No characters received");
    }
    Ok((body.characters, body.warning))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_absolute() {
        let client = CharacterApiClient::new("http://localhost:3000/universe").unwrap();
        assert_eq!(client.endpoint().unwrap().as_str(), "http://localhost:3000/api/characters");
        assert!(CharacterApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_error_body_becomes_error_message() {
        let err = parse_response(400, r#"{"error":"Category is required"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Category is required");

        let err = parse_response(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.to_string(), "Character service returned 502");
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let err = parse_response(200, r#"{"characters":[]}"#).unwrap_err();
        assert_eq!(err.to_string(), "No characters received");
    }

    #[test]
    fn test_success_keeps_warning() {
        let text = r#"{"characters":[{"name":"A","description":"d","role":"r","abilities":["x"],"personality":["p"]}],"warning":"fallback"}"#;
        let (records, warning) = parse_response(200, text).unwrap();
        assert_eq!(records[0].name, "A");
        assert_eq!(warning.as_deref(), Some("fallback"));
    }
}
