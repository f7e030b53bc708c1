use tracing::debug;

use crate::models::dialect::char_prefix;
use crate::models::{DialectConfig, RawLine, Utterance};

/// Consecutive lines sharing a grouping counter and scenario
struct LineGroup<'a> {
    line_number: usize,
    scenario: String,
    lines: Vec<&'a str>,
}

/// Perform Stage 0: transcript parsing
///
/// This stage:
/// 1. Tracks the current scenario from scenario-marker lines
/// 2. Bumps a grouping counter whenever a new line-type run starts
/// 3. Joins consecutive lines with the same counter and scenario into one record
/// 4. Drops file-header records and numbers the participant utterances
pub fn parse_transcript(lines: &[RawLine], dialect: &DialectConfig) -> Vec<Utterance> {
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    let participants = dialect.participant_tags(&texts);
    let is_line_type = |tag: &str| {
        participants.iter().any(|p| p == tag) || dialect.extra_line_types.iter().any(|t| t == tag)
    };

    let mut groups: Vec<LineGroup> = Vec::new();
    let mut current_scenario = "N/A".to_string();
    let mut current_line_type: Option<&str> = None;
    let mut line_number = 0usize;

    for (i, text) in texts.iter().enumerate() {
        if let Some(rest) = text.strip_prefix(dialect.scenario_marker.as_str()) {
            let first_of_run = !dialect.scenario_first_of_run
                || i == 0
                || !texts[i - 1].starts_with(dialect.scenario_marker.as_str());
            if first_of_run {
                current_scenario = scenario_label(rest, dialect.strip_scenario_period);
            }
        }

        let tag = dialect.tag_of(text);
        if is_line_type(tag) && current_line_type != Some(tag) {
            line_number += 1;
            current_line_type = Some(tag);
        }

        match groups.last_mut() {
            Some(group) if group.line_number == line_number && group.scenario == current_scenario => {
                group.lines.push(text);
            }
            _ => groups.push(LineGroup {
                line_number,
                scenario: current_scenario.clone(),
                lines: vec![text],
            }),
        }
    }

    let mut utterances = Vec::with_capacity(groups.len());
    let mut utterance_count = 0usize;

    for group in groups {
        let joined = group.lines.join(" ");
        let line_information = char_prefix(&joined, dialect.prefix_width).to_string();
        if dialect.skip_markers.contains(&line_information) {
            continue;
        }

        let participant = participants.iter().any(|p| p == dialect.tag_of(&joined));
        if participant {
            utterance_count += 1;
        }

        utterances.push(Utterance {
            line_number: group.line_number,
            scenario: group.scenario,
            line_information,
            text: joined.chars().skip(dialect.text_offset).collect(),
            utterance_count,
            participant,
            source_file: None,
        });
    }

    debug!(
        "Parsed {} lines into {} records ({} participant utterances)",
        lines.len(),
        utterances.len(),
        utterance_count
    );

    utterances
}

fn scenario_label(rest: &str, strip_period: bool) -> String {
    let label = rest.trim();
    if strip_period {
        label.strip_suffix('.').unwrap_or(label).to_string()
    } else {
        label.to_string()
    }
}
