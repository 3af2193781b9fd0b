use reqwest::StatusCode;
use serde::Serialize;

/// Result of one submission attempt. Exactly one is produced per accepted submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Success(serde_json::Value),
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            SubmissionOutcome::Success(payload) => Some(payload),
            SubmissionOutcome::Failure(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Success(_) => None,
            SubmissionOutcome::Failure(msg) => Some(msg),
        }
    }
}

impl From<Result<serde_json::Value, SubmissionError>> for SubmissionOutcome {
    fn from(result: Result<serde_json::Value, SubmissionError>) -> Self {
        match result {
            Ok(payload) => SubmissionOutcome::Success(payload),
            Err(err) => SubmissionOutcome::Failure(err.to_string()),
        }
    }
}

/// Everything that can go wrong between sending a request and holding its JSON body.
#[derive(Debug)]
pub enum SubmissionError {
    /// Connection refused, DNS failure, body read interrupted.
    Transport(reqwest::Error),
    /// The backend answered outside the 2xx range.
    Status { status: StatusCode, body: String },
    /// 2xx answer whose body is not JSON.
    Parse(serde_json::Error),
}

const BODY_EXCERPT_CHARS: usize = 200;

impl SubmissionError {
    pub fn status(status: StatusCode, body: &str) -> Self {
        SubmissionError::Status {
            status,
            body: body.trim().chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Transport(err) => write!(f, "Errore di connessione: {err}"),
            SubmissionError::Status { status, body } => {
                write!(
                    f,
                    "Errore HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("risposta inattesa")
                )?;
                if !body.is_empty() {
                    write!(f, " ({body})")?;
                }
                Ok(())
            }
            SubmissionError::Parse(err) => write!(f, "Risposta non valida dal server: {err}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::Transport(err)
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::Parse(err)
    }
}
