use askama::Template;
use serde::Deserialize;
use serde_json::Value;

use super::{opt_text, opt_text_list, RenderError, UseCase, UseCaseKind};
use crate::submission::SubmissionRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioForm {
    pub description: String,
    pub scenario_type: String,
    pub target: Option<String>,
    pub difficulty: String,
}

/// Every field optional; the backend's Italian names are accepted too,
/// flat or nested under `scenario`.
#[derive(Debug, Default, Deserialize)]
struct ScenarioResponse {
    #[serde(default, alias = "titolo", deserialize_with = "opt_text")]
    title: Option<String>,
    #[serde(default, alias = "timer_generale", deserialize_with = "opt_text")]
    duration: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    difficulty: Option<String>,
    #[serde(default, alias = "nome_paziente", deserialize_with = "opt_text")]
    patient_name: Option<String>,
    #[serde(default, alias = "descrizione", deserialize_with = "opt_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "opt_text_list")]
    objectives: Vec<String>,
    #[serde(default, alias = "azioniChiave", deserialize_with = "opt_text_list")]
    key_actions: Vec<String>,
    #[serde(default, alias = "presidi", deserialize_with = "opt_text_list")]
    equipment: Vec<String>,
    #[serde(default)]
    scenario: Option<ScenarioInfo>,
}

/// General information the backend nests under `"scenario"`.
#[derive(Debug, Default, Deserialize)]
struct ScenarioInfo {
    #[serde(default, alias = "titolo", deserialize_with = "opt_text")]
    title: Option<String>,
    #[serde(default, alias = "timer_generale", deserialize_with = "opt_text")]
    duration: Option<String>,
    #[serde(default, alias = "nome_paziente", deserialize_with = "opt_text")]
    patient_name: Option<String>,
    #[serde(default, alias = "descrizione", deserialize_with = "opt_text")]
    description: Option<String>,
    #[serde(default, alias = "obiettivo", deserialize_with = "opt_text")]
    objective: Option<String>,
}

impl ScenarioResponse {
    /// Fill what the top level leaves out from the nested `scenario` block.
    fn merged(mut self) -> Self {
        let Some(info) = self.scenario.take() else {
            return self;
        };

        self.title = self.title.or(info.title);
        self.duration = self.duration.or(info.duration);
        self.patient_name = self.patient_name.or(info.patient_name);
        self.description = self.description.or(info.description);
        if let Some(objective) = info.objective {
            if !self.objectives.contains(&objective) {
                self.objectives.push(objective);
            }
        }
        self
    }

    fn has_meta(&self) -> bool {
        self.duration.is_some() || self.difficulty.is_some() || self.patient_name.is_some()
    }
}

#[derive(Template)]
#[template(path = "fragments/scenario.html")]
struct ScenarioTemplate {
    scenario: ScenarioResponse,
}

pub struct ScenarioGeneration;

impl UseCase for ScenarioGeneration {
    const KIND: UseCaseKind = UseCaseKind::Scenario;

    type Form = ScenarioForm;

    fn shape(form: ScenarioForm) -> SubmissionRequest {
        SubmissionRequest::new()
            .field("description", form.description)
            .field("scenario_type", form.scenario_type)
            .optional("target", form.target)
            .field("difficulty", form.difficulty)
    }

    fn render_success(payload: &Value) -> Result<String, RenderError> {
        let scenario = ScenarioResponse::deserialize(payload)?.merged();
        Ok(ScenarioTemplate { scenario }.render()?)
    }
}
