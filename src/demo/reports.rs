use askama::Template;
use serde::Deserialize;
use serde_json::Value;

use super::{opt_text, RenderError, UseCase, UseCaseKind};
use crate::submission::SubmissionRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct ReportForm {
    pub scenario_description: String,
    pub exam_type: String,
    pub patient_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReportResponse {
    #[serde(default, alias = "tipologia_esame", deserialize_with = "opt_text")]
    exam_type: Option<String>,
    #[serde(default, alias = "referto", deserialize_with = "opt_text")]
    report: Option<String>,
}

#[derive(Template)]
#[template(path = "fragments/report.html")]
struct ReportTemplate {
    report: ReportResponse,
}

pub struct ReportGeneration;

impl UseCase for ReportGeneration {
    const KIND: UseCaseKind = UseCaseKind::Reports;

    type Form = ReportForm;

    fn shape(form: ReportForm) -> SubmissionRequest {
        SubmissionRequest::new()
            .field("scenario_description", form.scenario_description)
            .field("exam_type", form.exam_type)
            .field("patient_type", form.patient_type)
    }

    fn render_success(payload: &Value) -> Result<String, RenderError> {
        let report = ReportResponse::deserialize(payload)?;
        Ok(ReportTemplate { report }.render()?)
    }
}
