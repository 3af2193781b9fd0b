use serde::{Deserialize, Serialize};

use crate::submission::Transport;

const DIFFICULTY_LEVELS_PATH: &str = "/scenarios/difficulty-levels";
const PATIENT_TYPES_PATH: &str = "/materials/patient-types";
const EXAM_TYPES_PATH: &str = "/reports/exam-types";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Choices offered by the demo form selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormOptions {
    pub scenario_types: Vec<String>,
    pub difficulty_levels: Vec<DifficultyLevel>,
    pub default_difficulty: String,
    pub patient_types: Vec<String>,
    pub target_audiences: Vec<String>,
    pub exam_types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DifficultyLevelsResponse {
    #[serde(default)]
    difficulty_levels: Vec<DifficultyLevel>,
    #[serde(default)]
    default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatientTypesResponse {
    #[serde(default)]
    patient_types: Vec<String>,
    #[serde(default)]
    target_audiences: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExamTypesResponse {
    #[serde(default)]
    exam_types: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl FormOptions {
    /// The lists the AI backend ships with, used when it cannot be asked.
    pub fn builtin() -> Self {
        let difficulty_levels = [
            (
                "Facile",
                "Scenario semplice con poche complicazioni, parametri stabili, evoluzione prevedibile",
            ),
            (
                "Medio",
                "Scenario con complessità moderata, 1-2 complicazioni gestibili, richiede pensiero critico",
            ),
            (
                "Difficile",
                "Scenario complesso con multiple complicazioni, parametri critici, evoluzione rapida",
            ),
        ]
        .into_iter()
        .map(|(value, description)| DifficultyLevel {
            value: value.to_string(),
            label: value.to_string(),
            description: Some(description.to_string()),
        })
        .collect();

        FormOptions {
            scenario_types: strings(&[
                "Quick Scenario",
                "Advanced Scenario",
                "Patient Simulated Scenario",
            ]),
            difficulty_levels,
            default_difficulty: "Facile".to_string(),
            patient_types: strings(&["Adulto", "Pediatrico", "Neonatale", "Prematuro"]),
            target_audiences: strings(&[
                "Studenti di Medicina",
                "Infermieri",
                "Medici Specialisti",
                "Medici di Base",
                "Studenti di Infermieristica",
                "Operatori Sanitari",
            ]),
            exam_types: strings(&[
                "ECG (Elettrocardiogramma)",
                "RX Torace",
                "TC Torace (con mdc)",
                "TC Torace (senza mdc)",
                "TC Addome (con mdc)",
                "TC Addome (senza mdc)",
                "Ecografia addominale",
                "Ecografia polmonare",
                "Ecocardio (Transtoracico)",
                "Ecocardio (Transesofageo)",
                "Spirometria",
                "EEG (Elettroencefalogramma)",
                "RM Encefalo",
                "TC Cranio (con mdc)",
                "TC Cranio (senza mdc)",
                "Doppler TSA (Tronchi Sovraortici)",
                "Angio-TC Polmonare",
                "Fundus oculi",
            ]),
        }
    }

    /// Ask the backend for its current lists. Each list the backend cannot
    /// provide keeps its built-in value.
    pub async fn load(transport: &dyn Transport) -> Self {
        let mut options = Self::builtin();

        let (difficulty, patients, exams) = tokio::join!(
            fetch::<DifficultyLevelsResponse>(transport, DIFFICULTY_LEVELS_PATH),
            fetch::<PatientTypesResponse>(transport, PATIENT_TYPES_PATH),
            fetch::<ExamTypesResponse>(transport, EXAM_TYPES_PATH),
        );

        if let Some(resp) = difficulty {
            if !resp.difficulty_levels.is_empty() {
                options.difficulty_levels = resp.difficulty_levels;
            }
            if let Some(default) = resp.default {
                options.default_difficulty = default;
            }
        }

        if let Some(resp) = patients {
            if !resp.patient_types.is_empty() {
                options.patient_types = resp.patient_types;
            }
            if !resp.target_audiences.is_empty() {
                options.target_audiences = resp.target_audiences;
            }
        }

        if let Some(resp) = exams {
            if !resp.exam_types.is_empty() {
                options.exam_types = resp.exam_types;
            }
        }

        options
    }
}

async fn fetch<T: for<'de> Deserialize<'de>>(transport: &dyn Transport, path: &str) -> Option<T> {
    let value = match transport.get_json(path).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Using built-in options, {path} unavailable: {e}");
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Using built-in options, {path} returned an unexpected shape: {e}");
            None
        }
    }
}
