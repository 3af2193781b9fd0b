use askama::Template;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{opt_text, scalar_text, RenderError, UseCase, UseCaseKind};
use crate::submission::SubmissionRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct LabExamForm {
    pub scenario_description: String,
    pub patient_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct LabExamResponse {
    #[serde(default)]
    exams: Vec<ExamBlock>,
    /// Category-grouped shape produced by the SimSuite AI agents.
    #[serde(default)]
    esami_laboratorio: Vec<LabCategory>,
}

#[derive(Debug, Deserialize)]
struct ExamBlock {
    #[serde(default, deserialize_with = "opt_text")]
    name: Option<String>,
    /// Rows keep the order the backend sent them in.
    #[serde(default)]
    values: Map<String, Value>,
    #[serde(default, alias = "referto", deserialize_with = "opt_text")]
    report: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LabCategory {
    #[serde(default, deserialize_with = "opt_text")]
    categoria: Option<String>,
    #[serde(default)]
    test: Vec<LabTest>,
}

#[derive(Debug, Deserialize)]
struct LabTest {
    #[serde(default, deserialize_with = "opt_text")]
    nome: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    valore: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    unita_misura: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    range_riferimento: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    referto: Option<String>,
}

struct ValueRow {
    name: String,
    value: String,
}

struct ExamView {
    name: Option<String>,
    rows: Vec<ValueRow>,
    report: Option<String>,
}

impl From<ExamBlock> for ExamView {
    fn from(block: ExamBlock) -> Self {
        let rows = block
            .values
            .iter()
            .filter_map(|(name, value)| {
                scalar_text(value).map(|value| ValueRow {
                    name: name.clone(),
                    value,
                })
            })
            .collect();

        ExamView {
            name: block.name,
            rows,
            report: block.report,
        }
    }
}

impl From<LabCategory> for ExamView {
    fn from(category: LabCategory) -> Self {
        let mut rows = Vec::with_capacity(category.test.len());
        let mut findings = Vec::new();

        for test in category.test {
            let Some(name) = test.nome else { continue };

            if let Some(valore) = test.valore {
                let mut value = valore;
                if let Some(unit) = test.unita_misura {
                    value = format!("{value} {unit}");
                }
                if let Some(range) = test.range_riferimento {
                    value = format!("{value} ({range})");
                }
                rows.push(ValueRow {
                    name: name.clone(),
                    value,
                });
            }

            if let Some(referto) = test.referto {
                findings.push(format!("{name}: {referto}"));
            }
        }

        ExamView {
            name: category.categoria,
            rows,
            report: (!findings.is_empty()).then(|| findings.join("\n")),
        }
    }
}

#[derive(Template)]
#[template(path = "fragments/exams.html")]
struct LabExamTemplate {
    exams: Vec<ExamView>,
}

pub struct LabExamGeneration;

impl UseCase for LabExamGeneration {
    const KIND: UseCaseKind = UseCaseKind::Exams;

    type Form = LabExamForm;

    fn shape(form: LabExamForm) -> SubmissionRequest {
        SubmissionRequest::new()
            .field("scenario_description", form.scenario_description)
            .field("patient_type", form.patient_type)
    }

    fn render_success(payload: &Value) -> Result<String, RenderError> {
        let response = LabExamResponse::deserialize(payload)?;

        let exams: Vec<ExamView> = response
            .exams
            .into_iter()
            .map(ExamView::from)
            .chain(response.esami_laboratorio.into_iter().map(ExamView::from))
            .collect();

        Ok(LabExamTemplate { exams }.render()?)
    }
}
