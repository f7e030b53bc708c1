use std::future::Future;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Annotator, parse_conllu};
use crate::error::PipelineError;
use crate::models::AnnotatedDoc;

const DEFAULT_URL: &str = "https://lindat.mff.cuni.cz/services/udpipe/api/process";
const DEFAULT_MODEL: &str = "english";

/// Configuration for a UDPipe-compatible REST service
#[derive(Debug, Clone)]
pub struct UdpipeConfig {
    /// Endpoint of the `process` method (UDPIPE_URL)
    pub url: String,
    /// Model name or prefix (UDPIPE_MODEL)
    pub model: String,
}

impl UdpipeConfig {
    /// Create config from environment variables, falling back to the public service
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("UDPIPE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            model: std::env::var("UDPIPE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn new(url: String, model: String) -> Self {
        Self { url, model }
    }
}

impl Default for UdpipeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL.to_string(), DEFAULT_MODEL.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    result: String,
}

/// Annotates text through a UDPipe REST endpoint
pub struct UdpipeClient {
    client: Client,
    config: UdpipeConfig,
}

impl UdpipeClient {
    pub fn new(config: UdpipeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Tokenize, tag and parse `text`, returning the raw CoNLL-U
    pub async fn process(&self, text: &str) -> Result<String> {
        let form = [
            ("tokenizer", ""),
            ("tagger", ""),
            ("parser", ""),
            ("model", self.config.model.as_str()),
            ("data", text),
        ];

        let response = self
            .client
            .post(&self.config.url)
            .form(&form)
            .send()
            .await
            .context("Failed to send request to UDPipe service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Annotation(format!("{} - {}", status, body)).into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read UDPipe response")?;
        conllu_from_response(&body)
    }
}

fn conllu_from_response(body: &str) -> Result<String> {
    let response: ProcessResponse =
        serde_json::from_str(body).context("Failed to parse UDPipe response")?;
    Ok(response.result)
}

impl Annotator for UdpipeClient {
    fn annotate(&self, text: &str) -> impl Future<Output = Result<AnnotatedDoc>> + Send {
        async move {
            let conllu = self.process(text).await?;
            let doc = parse_conllu(&conllu)?;
            debug!("Annotated {} sentences", doc.sentences.len());
            Ok(doc)
        }
    }
}
