//! Boundary to the optional generative-text advisor.
//!
//! # Responsibility
//! - Build prompts for task suggestions and schedule summaries.
//! - Convert every advisor failure into an empty list or fallback text.
//!
//! # Invariants
//! - No method on `AdvisorService` returns an error.
//! - Malformed suggestion payloads decode to an empty list.

use crate::model::task::Task;
use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Summary returned when no advisor is configured.
pub const UNAVAILABLE_SUMMARY: &str = "AI services unavailable.";
/// Summary returned when the advisor call fails.
pub const FAILED_SUMMARY: &str = "Stay focused and achieve your goals!";
/// Summary returned when the advisor answers with empty text.
pub const EMPTY_SUMMARY: &str = "Have a productive day!";

const SUGGESTION_COUNT: usize = 3;

/// Prompt sent to the advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorRequest {
    pub prompt: String,
    /// Ask the backend for a JSON array of suggestions.
    pub expect_json: bool,
}

/// One suggested task as returned by the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSuggestion {
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    Unavailable,
    Transport(String),
    InvalidResponse(String),
}

impl Display for AdvisorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "advisor is unavailable"),
            Self::Transport(message) => write!(f, "advisor transport failed: {message}"),
            Self::InvalidResponse(message) => write!(f, "advisor response invalid: {message}"),
        }
    }
}

impl Error for AdvisorError {}

/// Generative-text backend. Returns the raw response text, `None` when empty.
#[async_trait]
pub trait TaskAdvisor: Send + Sync {
    async fn generate(&self, request: AdvisorRequest) -> Result<Option<String>, AdvisorError>;
}

/// Degrading wrapper used by callers; an absent advisor is a valid state.
#[derive(Clone, Default)]
pub struct AdvisorService {
    advisor: Option<Arc<dyn TaskAdvisor>>,
}

impl AdvisorService {
    pub fn new(advisor: Arc<dyn TaskAdvisor>) -> Self {
        Self {
            advisor: Some(advisor),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.advisor.is_some()
    }

    /// Suggested tasks for `role`; empty on any failure.
    pub async fn suggest_tasks(&self, role: &str) -> Vec<TaskSuggestion> {
        let Some(advisor) = &self.advisor else {
            return Vec::new();
        };

        let request = AdvisorRequest {
            prompt: suggestion_prompt(role),
            expect_json: true,
        };
        match advisor.generate(request).await {
            Ok(Some(text)) => parse_suggestions(&text),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=advisor_suggest module=advisor status=fallback error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Short motivational summary of `tasks`; fallback text on any failure.
    pub async fn summarize_schedule(&self, tasks: &[Task]) -> String {
        let Some(advisor) = &self.advisor else {
            return UNAVAILABLE_SUMMARY.to_string();
        };

        let schedule = match serde_json::to_string(tasks) {
            Ok(schedule) => schedule,
            Err(err) => {
                warn!(
                    "event=advisor_summary module=advisor status=fallback error_code=encode_failed error={}",
                    err
                );
                return FAILED_SUMMARY.to_string();
            }
        };
        let request = AdvisorRequest {
            prompt: schedule_prompt(&schedule),
            expect_json: false,
        };

        match advisor.generate(request).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_SUMMARY.to_string(),
            Err(err) => {
                warn!(
                    "event=advisor_summary module=advisor status=fallback error={}",
                    err
                );
                FAILED_SUMMARY.to_string()
            }
        }
    }
}

/// Decodes a JSON array of suggestions; anything else yields an empty list.
pub fn parse_suggestions(text: &str) -> Vec<TaskSuggestion> {
    match serde_json::from_str::<Vec<TaskSuggestion>>(text.trim()) {
        Ok(suggestions) => suggestions,
        Err(err) => {
            warn!(
                "event=advisor_parse module=advisor status=fallback error_code=invalid_json error={}",
                err
            );
            Vec::new()
        }
    }
}

pub fn suggestion_prompt(role: &str) -> String {
    format!(
        "Generate {SUGGESTION_COUNT} productive task suggestions for a person with the role: {role}. Return JSON only."
    )
}

pub fn schedule_prompt(schedule_json: &str) -> String {
    format!(
        "Analyze this daily schedule and give a 2-sentence motivation or insight about the workload: {schedule_json}"
    )
}
