use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::GenerationService;
use crate::domain::{DomainError, GenerationConfig};

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// One generation payload. The non-streaming endpoint returns a single one
/// of these; the streaming endpoint returns one JSON object per line.
#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    #[serde(default)]
    name: String,
}

/// HTTP client for an Ollama-compatible generation server.
///
/// Implements [`GenerationService`] so the pipelines stay decoupled from
/// transport and serialization details. Requests are issued one at a time
/// with no retry; failures surface as [`DomainError::GenerationError`] and
/// the use-case layer decides how to degrade.
///
/// No request timeout is set; a local model can legitimately take minutes
/// on a large prompt.
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    generate_url: String,
    tags_url: String,
}

impl OllamaClient {
    pub fn new(config: &GenerationConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            model: config.model.clone(),
            generate_url: format!("{base}{GENERATE_PATH}"),
            tags_url: format!("{base}{TAGS_PATH}"),
        }
    }

    /// Consume a newline-delimited JSON response body, accumulating the text
    /// fragments until a chunk carries `done: true` or the body ends.
    async fn collect_stream(&self, response: reqwest::Response) -> Result<String, DomainError> {
        let mut stream = response.bytes_stream();
        let mut pending = String::new();
        let mut accumulated = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk
                .map_err(|e| DomainError::generation(format!("stream read failed: {e}")))?;
            pending.push_str(&String::from_utf8_lossy(&bytes));

            // A network chunk can end mid-line; only complete lines are
            // decoded, the tail stays buffered.
            while let Some(newline) = pending.find('\n') {
                let line = pending[..newline].to_string();
                pending.drain(..=newline);
                if apply_chunk_line(&line, &mut accumulated)? {
                    return Ok(accumulated);
                }
            }
        }

        if !pending.trim().is_empty() {
            apply_chunk_line(&pending, &mut accumulated)?;
        }
        Ok(accumulated)
    }
}

/// Decode one NDJSON line and append its fragment. Returns true when the
/// chunk is flagged terminal. Blank lines are skipped.
fn apply_chunk_line(line: &str, accumulated: &mut String) -> Result<bool, DomainError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(false);
    }
    let chunk: GenerateChunk = serde_json::from_str(line)
        .map_err(|e| DomainError::generation(format!("undecodable stream chunk: {e}")))?;
    accumulated.push_str(&chunk.response);
    Ok(chunk.done)
}

#[async_trait]
impl GenerationService for OllamaClient {
    async fn generate(&self, prompt: &str, stream: bool) -> Result<String, DomainError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream,
        };
        debug!("Sending generation request ({} prompt chars)", prompt.len());

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Generation API returned {status}: {body}");
            return Err(DomainError::generation(format!("server returned {status}")));
        }

        if stream {
            self.collect_stream(response).await
        } else {
            let payload: GenerateChunk = response
                .json()
                .await
                .map_err(|e| DomainError::generation(format!("undecodable response: {e}")))?;
            Ok(payload.response)
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, DomainError> {
        let response = self
            .client
            .get(&self.tags_url)
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::generation(format!(
                "server returned {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| DomainError::generation(format!("undecodable response: {e}")))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
