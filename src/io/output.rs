use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    Ok(())
}

/// Write records as JSON Lines, one object per line
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    create_parent(path)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record).context("Failed to serialize record")?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Counts and settings of one pipeline run, written next to its output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub files: usize,
    pub records: usize,
    pub selected: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub generated_at: DateTime<Utc>,
}

impl RunMetadata {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            seed: None,
            files: 0,
            records: 0,
            selected: 0,
            accepted: 0,
            rejected: 0,
            generated_at: Utc::now(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        create_parent(path)?;
        let json = serde_json::to_string_pretty(self).context("Failed to serialize metadata")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write metadata: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentencePair;
    use tempfile::tempdir;

    #[test]
    fn test_write_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("pairs.jsonl");
        let pairs = vec![
            SentencePair::new("The boy ran.", "Boy ran"),
            SentencePair::new("She sat down.", "Sat down"),
        ];

        write_jsonl(&path, &pairs).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: SentencePair = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, pairs[0]);
    }

    #[test]
    fn test_run_metadata_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        let mut meta = RunMetadata::new("synthesize");
        meta.seed = Some(7);
        meta.accepted = 3;

        meta.write(&path).unwrap();

        let read: RunMetadata =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read.command, "synthesize");
        assert_eq!(read.seed, Some(7));
        assert_eq!(read.accepted, 3);
        assert_eq!(read.generated_at, meta.generated_at);
    }
}
