use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::models::{DialectConfig, RawLine, Utterance};
use crate::stages::parse_transcript;

const TRANSCRIPT_EXTENSIONS: &[&str] = &["cha", "txt"];

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()).into());
    }
    Ok(())
}

/// List transcript files in a directory, sorted by name
pub fn list_transcripts(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_exists(dir)?;
    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?
    {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, TRANSCRIPT_EXTENSIONS) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one transcript file into utterance records tagged with the file name
pub fn read_transcript(path: &Path, dialect: &DialectConfig) -> Result<Vec<Utterance>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let mut utterances = parse_transcript(&RawLine::from_content(&content), dialect);
    for utterance in &mut utterances {
        utterance.source_file = source.clone();
    }
    debug!("Parsed {} records from {:?}", utterances.len(), path);
    Ok(utterances)
}

/// Parse every transcript in a directory
pub fn read_transcript_dir(dir: &Path, dialect: &DialectConfig) -> Result<(usize, Vec<Utterance>)> {
    let files = list_transcripts(dir)?;
    let mut utterances = Vec::new();
    for file in &files {
        utterances.extend(read_transcript(file, dialect)?);
    }
    info!(
        "Parsed {} records from {} files in {:?}",
        utterances.len(),
        files.len(),
        dir
    );
    Ok((files.len(), utterances))
}

/// Read a JSON Lines file, skipping blank lines
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Failed to parse record at {:?}:{}", path, i + 1))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SentenceRecord {
    preprocessed_text: Option<String>,
    text: Option<String>,
}

/// Read input sentences for synthesis.
///
/// `.jsonl`/`.json` files hold one record per line with a `preprocessed_text` or
/// `text` field. `.txt` files hold one sentence per line.
pub fn read_sentences(path: &Path) -> Result<Vec<String>> {
    ensure_exists(path)?;

    let sentences: Vec<String> = if has_extension(path, &["jsonl", "json"]) {
        read_jsonl::<SentenceRecord>(path)?
            .into_iter()
            .filter_map(|r| r.preprocessed_text.or(r.text))
            .collect()
    } else if has_extension(path, &["txt"]) {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    } else {
        return Err(PipelineError::UnsupportedFormat(path.to_path_buf()).into());
    };

    info!("Loaded {} sentences from {:?}", sentences.len(), path);
    Ok(sentences)
}
