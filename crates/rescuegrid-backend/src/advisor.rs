//! Advisory decision provider
//!
//! The fleet-commander endpoint forwards the published snapshot to an
//! external language model and returns its structured decision. The
//! provider is a trait so nothing outside this module knows which model
//! answers; the default implementation speaks the Gemini REST API.

use crate::types::{Decision, SimulationState};
use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const ADVISOR_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("advisory request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advisory response malformed: {0}")]
    Malformed(String),
}

/// The seam between the aggregator and whichever model advises it
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    async fn decide(&self, state: &SimulationState) -> Result<Decision, AdvisorError>;
}

/// Default provider backed by the Gemini REST API
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiAdvisor {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(ADVISOR_TIMEOUT)
            .build()?;
        Ok(Self { client, api_key })
    }

    fn prompt(state: &SimulationState) -> String {
        format!(
            "You are the commander of a rescue robot fleet.\n\
             Current simulation step: {}\n\n\
             Active ops:\n\
             - Robots: {}\n\
             - Active missions: {}\n\n\
             Analyze the following state and decide on the next best action.\n\
             Prioritize high-priority missions and ensure efficient battery usage.\n\
             Respond with JSON: {{\"priority_mission_id\": string|null, \
             \"reassignments\": [{{\"robot_id\": string, \"new_mission_id\": string}}], \
             \"reasoning\": string}}\n\n\
             State data:\n{}",
            state.step,
            state.robots.len(),
            state.active_missions.len(),
            serde_json::to_string(state).unwrap_or_default(),
        )
    }
}

#[async_trait]
impl DecisionProvider for GeminiAdvisor {
    async fn decide(&self, state: &SimulationState) -> Result<Decision, AdvisorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AdvisorError::MissingCredential)?;

        let url = format!("{GEMINI_ENDPOINT}/{GEMINI_MODEL}:generateContent?key={api_key}");
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": Self::prompt(state)}]}],
            "generationConfig": {"response_mime_type": "application/json"},
        });

        let response: serde_json::Value = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_decision(&response)
    }
}

/// Pull the structured decision out of a generateContent response
fn extract_decision(response: &serde_json::Value) -> Result<Decision, AdvisorError> {
    let text = response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| AdvisorError::Malformed("no candidate text in response".to_string()))?;
    serde_json::from_str(text).map_err(|e| AdvisorError::Malformed(e.to_string()))
}

#[derive(Serialize)]
struct LogEntry<'a> {
    step: u64,
    decision: &'a Decision,
}

/// Append-only JSONL log of advisory decisions, one object per line.
/// The file is opened per append; OS append semantics keep lines whole.
#[derive(Clone, Debug)]
pub struct DecisionLog {
    path: PathBuf,
}

impl DecisionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log directory; called once at process startup
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn append(&self, step: u64, decision: &Decision) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(&LogEntry { step, decision })?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reassignment;

    fn decision() -> Decision {
        Decision {
            priority_mission_id: Some("2".to_string()),
            reassignments: vec![Reassignment {
                robot_id: "1".to_string(),
                new_mission_id: "2".to_string(),
            }],
            reasoning: "mission 2 is high priority and robot 1 is closest".to_string(),
        }
    }

    #[test]
    fn test_extract_decision_from_gemini_shape() {
        let inner = serde_json::to_string(&decision()).unwrap();
        let response = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": inner}]}}]
        });
        let parsed = extract_decision(&response).unwrap();
        assert_eq!(parsed, decision());
    }

    #[test]
    fn test_extract_decision_rejects_empty_response() {
        let response = serde_json::json!({"candidates": []});
        assert!(matches!(
            extract_decision(&response),
            Err(AdvisorError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_errors_without_network() {
        let advisor = GeminiAdvisor::new(None).unwrap();
        let state = SimulationState::empty(10);
        assert!(matches!(
            advisor.decide(&state).await,
            Err(AdvisorError::MissingCredential)
        ));
    }

    #[test]
    fn test_decision_log_appends_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::new(dir.path().join("logs/ai_decisions.jsonl"));
        log.ensure_dir().unwrap();

        log.append(3, &decision()).unwrap();
        log.append(4, &decision()).unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["step"], 3);
        assert_eq!(first["decision"]["priority_mission_id"], "2");
    }
}
