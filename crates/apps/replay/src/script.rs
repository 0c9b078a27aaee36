//! JSON-lines event scripts.
//!
//! One step per line: an `at_ms` offset plus a tagged [`EditorEvent`], e.g.
//! `{"at_ms":0,"type":"clicked","lat":13.7,"lng":100.5}`. Blank lines and
//! lines starting with `#` are skipped.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use waypoints::EditorEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the replay started.
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: EditorEvent,
}

#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
    OutOfRange {
        line: usize,
        lat: f64,
        lng: f64,
    },
    OutOfOrder {
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "failed to read script: {e}"),
            ScriptError::Malformed { line, source } => {
                write!(f, "line {line}: malformed step: {source}")
            }
            ScriptError::OutOfRange { line, lat, lng } => {
                write!(f, "line {line}: coordinate ({lat}, {lng}) is outside lat [-90, 90] / lng [-180, 180]")
            }
            ScriptError::OutOfOrder {
                line,
                at_ms,
                previous_ms,
            } => write!(
                f,
                "line {line}: at_ms {at_ms} is earlier than the previous step ({previous_ms})"
            ),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(e) => Some(e),
            ScriptError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        ScriptError::Io(e)
    }
}

pub fn parse_script(reader: impl BufRead) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps: Vec<ScriptStep> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step: ScriptStep =
            serde_json::from_str(trimmed).map_err(|source| ScriptError::Malformed {
                line: line_no,
                source,
            })?;

        if let Some(previous) = steps.last()
            && step.at_ms < previous.at_ms
        {
            return Err(ScriptError::OutOfOrder {
                line: line_no,
                at_ms: step.at_ms,
                previous_ms: previous.at_ms,
            });
        }
        if let Some(position) = step.event.position()
            && !position.is_in_range()
        {
            return Err(ScriptError::OutOfRange {
                line: line_no,
                lat: position.lat,
                lng: position.lng,
            });
        }

        steps.push(step);
    }

    Ok(steps)
}
