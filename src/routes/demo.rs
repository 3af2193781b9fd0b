use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::demo::session::ControlSnapshot;
use crate::demo::UseCaseKind;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::UiState;
use crate::views::demo::session_id;

#[derive(Serialize)]
pub struct StatusResponse {
    pub use_case: UseCaseKind,
    #[serde(flatten)]
    pub control: ControlSnapshot,
    pub result_visible: bool,
}

/// Lifecycle state of one demo control for the calling browser.
pub async fn status(
    State(state): State<SharedState>,
    Path(use_case): Path<String>,
    jar: CookieJar,
) -> Result<Json<StatusResponse>, AppError> {
    let kind = UseCaseKind::ALL
        .into_iter()
        .find(|kind| kind.slug() == use_case)
        .ok_or_else(|| AppError::NotFound(format!("Unknown demo form: {use_case}")))?;

    let slot = session_id(&jar).and_then(|session| state.sessions.get(session, kind));

    let response = match slot {
        Some(slot) => StatusResponse {
            use_case: kind,
            control: slot.control.snapshot(),
            result_visible: slot.panel.snapshot().visible,
        },
        None => StatusResponse {
            use_case: kind,
            control: ControlSnapshot {
                state: UiState::Idle,
                disabled: false,
                label: kind.button_label().to_string(),
            },
            result_visible: false,
        },
    };

    Ok(Json(response))
}
