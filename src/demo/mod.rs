//! The four AI demo forms and their result renderers.
//!
//! Each use case is a type implementing [`UseCase`]: it names its form, shapes
//! the form into a [`SubmissionRequest`] and renders a success payload. The
//! shared [`render_outcome`] makes every renderer total over both outcome
//! variants.

pub mod exams;
pub mod failure;
pub mod materials;
pub mod options;
pub mod reports;
pub mod scenario;
pub mod session;

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::Serialize;
use serde_json::Value;

use crate::submission::{SubmissionOutcome, SubmissionRequest};

pub use exams::LabExamGeneration;
pub use materials::MaterialsGeneration;
pub use reports::ReportGeneration;
pub use scenario::ScenarioGeneration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCaseKind {
    Scenario,
    Materials,
    Exams,
    Reports,
}

impl UseCaseKind {
    pub const ALL: [UseCaseKind; 4] = [
        UseCaseKind::Scenario,
        UseCaseKind::Materials,
        UseCaseKind::Exams,
        UseCaseKind::Reports,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            UseCaseKind::Scenario => "scenario",
            UseCaseKind::Materials => "materials",
            UseCaseKind::Exams => "exams",
            UseCaseKind::Reports => "reports",
        }
    }

    pub fn endpoint_path(&self) -> &'static str {
        match self {
            UseCaseKind::Scenario => "/scenarios/generate-scenario",
            UseCaseKind::Materials => "/materials/generate-materials",
            UseCaseKind::Exams => "/exams/generate-lab-exams",
            UseCaseKind::Reports => "/reports/generate-medical-report",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            UseCaseKind::Scenario => "Genera Scenario",
            UseCaseKind::Materials => "Genera Materiali",
            UseCaseKind::Exams => "Genera Esami",
            UseCaseKind::Reports => "Genera Referto",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            UseCaseKind::Scenario => "Generazione scenario",
            UseCaseKind::Materials => "Materiali necessari",
            UseCaseKind::Exams => "Esami di laboratorio",
            UseCaseKind::Reports => "Referto medico",
        }
    }
}

impl std::fmt::Display for UseCaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

pub trait UseCase {
    const KIND: UseCaseKind;

    type Form: DeserializeOwned + Send + 'static;

    fn shape(form: Self::Form) -> SubmissionRequest;

    fn render_success(payload: &Value) -> Result<String, RenderError>;
}

/// Render either outcome for use case `U`. A payload that does not fit the
/// use case's schema is shown as a failure.
pub fn render_outcome<U: UseCase>(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Success(payload) => U::render_success(payload).unwrap_or_else(|err| {
            tracing::warn!("Could not render {} response: {err}", U::KIND);
            failure::render(&err.to_string())
        }),
        SubmissionOutcome::Failure(message) => failure::render(message),
    }
}

#[derive(Debug)]
pub enum RenderError {
    Schema(serde_json::Error),
    Template(askama::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Schema(err) => write!(f, "Risposta non valida: {err}"),
            RenderError::Template(err) => write!(f, "Impossibile mostrare il risultato: {err}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Schema(err)
    }
}

impl From<askama::Error> for RenderError {
    fn from(err: askama::Error) -> Self {
        RenderError::Template(err)
    }
}

/// Display text for a scalar JSON value. Null and blank strings are absent.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(scalar_text))
}

pub(crate) fn opt_text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let values = Option::<Vec<Value>>::deserialize(d)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .filter_map(scalar_text)
        .collect())
}
