//! Load suite runs produced by test-runner adapters.
//!
//! Accepted inputs:
//! - a single suite object (`{"suite_name": ..., ...}`)
//! - an array of suite objects
//! - an analytics document (`{"results": [...]}`), e.g. a previous JSON report
//! - JSONL, one suite object per line (blank lines ignored)

use crate::analytics::Analytics;
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::model::TestSuiteResult;
use serde_json::Value;
use std::path::Path;

/// Read and parse one input file.
pub fn load_path(path: &Path) -> AnalyticsResult<Vec<TestSuiteResult>> {
    let content = std::fs::read_to_string(path).map_err(|e| AnalyticsError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_suites(path, &content)
}

/// Parse `content`; `origin` only labels errors.
pub fn parse_suites(origin: &Path, content: &str) -> AnalyticsResult<Vec<TestSuiteResult>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let suites = match serde_json::from_str::<Value>(content) {
        Ok(doc) => from_document(origin, doc)?,
        Err(doc_err) => {
            let mut lines = content.lines().filter(|l| !l.trim().is_empty());
            let first_is_value = lines
                .next()
                .is_some_and(|l| serde_json::from_str::<Value>(l).is_ok());
            if !first_is_value {
                return Err(AnalyticsError::parse(origin, doc_err.to_string()));
            }
            from_jsonl(origin, content)?
        }
    };

    tracing::debug!(
        path = %origin.display(),
        suites = suites.len(),
        "loaded suite results"
    );
    Ok(suites)
}

fn from_document(origin: &Path, doc: Value) -> AnalyticsResult<Vec<TestSuiteResult>> {
    let parsed = match doc {
        Value::Array(_) => serde_json::from_value::<Vec<TestSuiteResult>>(doc),
        Value::Object(ref obj) if obj.contains_key("suite_name") => {
            serde_json::from_value::<TestSuiteResult>(doc).map(|s| vec![s])
        }
        Value::Object(_) => serde_json::from_value::<Analytics>(doc).map(|a| a.results().to_vec()),
        other => {
            return Err(AnalyticsError::parse(
                origin,
                format!("expected a suite object, an array of suites or a results document, got {}", kind(&other)),
            ))
        }
    };
    parsed.map_err(|e| AnalyticsError::parse(origin, e.to_string()))
}

fn from_jsonl(origin: &Path, content: &str) -> AnalyticsResult<Vec<TestSuiteResult>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<TestSuiteResult>(line)
                .map_err(|e| AnalyticsError::parse(origin, format!("line {}: {}", idx + 1, e)))
        })
        .collect()
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
