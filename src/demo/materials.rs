use askama::Template;
use serde::Deserialize;
use serde_json::Value;

use super::{opt_text, RenderError, UseCase, UseCaseKind};
use crate::submission::SubmissionRequest;

/// Rendered verbatim when the backend returns no materials.
pub const NO_MATERIALS: &str = "Nessun materiale generato.";

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialsForm {
    pub scenario_description: String,
    pub patient_type: String,
    pub target_audience: String,
    pub objective_exam: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Material {
    #[serde(default, alias = "nome", deserialize_with = "opt_text")]
    name: Option<String>,
    #[serde(
        default,
        alias = "descrizione",
        alias = "descrizione_scenario",
        deserialize_with = "opt_text"
    )]
    description: Option<String>,
}

/// The backend answers with a bare list; a `{"materials": [...]}` wrapper is
/// accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaterialsResponse {
    List(Vec<Material>),
    Wrapped { materials: Vec<Material> },
}

impl MaterialsResponse {
    fn into_items(self) -> Vec<Material> {
        match self {
            MaterialsResponse::List(items) => items,
            MaterialsResponse::Wrapped { materials } => materials,
        }
    }
}

#[derive(Template)]
#[template(path = "fragments/materials.html")]
struct MaterialsTemplate {
    materials: Vec<Material>,
}

pub struct MaterialsGeneration;

impl UseCase for MaterialsGeneration {
    const KIND: UseCaseKind = UseCaseKind::Materials;

    type Form = MaterialsForm;

    fn shape(form: MaterialsForm) -> SubmissionRequest {
        SubmissionRequest::new()
            .field("scenario_description", form.scenario_description)
            .field("patient_type", form.patient_type)
            .field("target_audience", form.target_audience)
            .optional("objective_exam", form.objective_exam)
    }

    fn render_success(payload: &Value) -> Result<String, RenderError> {
        let materials = MaterialsResponse::deserialize(payload)?.into_items();
        if materials.is_empty() {
            return Ok(NO_MATERIALS.to_string());
        }
        Ok(MaterialsTemplate { materials }.render()?)
    }
}
