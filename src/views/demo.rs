use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::demo::options::FormOptions;
use crate::demo::session::{ControlSnapshot, DemoSlot, PanelSnapshot};
use crate::demo::{
    render_outcome, LabExamGeneration, MaterialsGeneration, ReportGeneration, ScenarioGeneration,
    UseCase, UseCaseKind,
};
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{SubmissionPipeline, UiState};

pub const SESSION_COOKIE: &str = "simsuite_demo";

pub fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

fn ensure_session(jar: CookieJar) -> (CookieJar, Uuid) {
    if let Some(id) = session_id(&jar) {
        return (jar, id);
    }

    let id = Uuid::now_v7();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

#[derive(Template)]
#[template(path = "fragments/result_panel.html")]
struct ResultPanelTemplate<'a> {
    slug: &'a str,
    state: &'a str,
    visible: bool,
    content: &'a str,
}

struct FormView {
    slug: &'static str,
    title: &'static str,
    label: String,
    disabled: bool,
    panel: String,
}

#[derive(Template)]
#[template(path = "demo/index.html")]
struct DemoPageTemplate {
    options: FormOptions,
    scenario: FormView,
    materials: FormView,
    exams: FormView,
    reports: FormView,
}

fn render_panel(
    kind: UseCaseKind,
    control: &ControlSnapshot,
    panel: &PanelSnapshot,
) -> Result<String, AppError> {
    let template = ResultPanelTemplate {
        slug: kind.slug(),
        state: control.state.as_str(),
        visible: panel.visible,
        content: &panel.content,
    };
    Ok(template.render()?)
}

fn form_view(kind: UseCaseKind, slot: Option<&DemoSlot>) -> Result<FormView, AppError> {
    let (control, panel) = match slot {
        Some(slot) => (slot.control.snapshot(), slot.panel.snapshot()),
        None => (
            ControlSnapshot {
                state: UiState::Idle,
                disabled: false,
                label: kind.button_label().to_string(),
            },
            PanelSnapshot {
                visible: false,
                content: String::new(),
                scrolled: false,
            },
        ),
    };

    Ok(FormView {
        slug: kind.slug(),
        title: kind.title(),
        panel: render_panel(kind, &control, &panel)?,
        label: control.label,
        disabled: control.disabled,
    })
}

pub async fn page(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, session) = ensure_session(jar);
    let options = FormOptions::load(state.transport.as_ref()).await;

    let view = |kind: UseCaseKind| {
        let slot = state.sessions.get(session, kind);
        form_view(kind, slot.as_deref())
    };

    let template = DemoPageTemplate {
        options,
        scenario: view(UseCaseKind::Scenario)?,
        materials: view(UseCaseKind::Materials)?,
        exams: view(UseCaseKind::Exams)?,
        reports: view(UseCaseKind::Reports)?,
    };

    Ok((jar, Html(template.render()?)))
}

/// Run one demo form through the submission pipeline for the calling
/// browser and answer with its refreshed result container.
async fn run_submission<U: UseCase>(
    state: SharedState,
    jar: CookieJar,
    form: Result<Form<U::Form>, FormRejection>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (jar, session) = ensure_session(jar);

    let slot = state.sessions.slot(session, U::KIND);
    let pipeline = SubmissionPipeline::new(
        state.transport.clone(),
        slot.control.clone(),
        slot.panel.clone(),
    );

    tracing::info!("Demo submission for {} from session {session}", U::KIND);

    pipeline
        .submit(U::shape(form), U::KIND.endpoint_path(), &render_outcome::<U>)
        .await
        .map_err(|e| AppError::Conflict(e.to_string()))?;

    let fragment = render_panel(U::KIND, &slot.control.snapshot(), &slot.panel.snapshot())?;
    Ok((jar, Html(fragment)))
}

pub async fn submit_scenario(
    State(state): State<SharedState>,
    jar: CookieJar,
    form: Result<Form<<ScenarioGeneration as UseCase>::Form>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    run_submission::<ScenarioGeneration>(state, jar, form).await
}

pub async fn submit_materials(
    State(state): State<SharedState>,
    jar: CookieJar,
    form: Result<Form<<MaterialsGeneration as UseCase>::Form>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    run_submission::<MaterialsGeneration>(state, jar, form).await
}

pub async fn submit_exams(
    State(state): State<SharedState>,
    jar: CookieJar,
    form: Result<Form<<LabExamGeneration as UseCase>::Form>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    run_submission::<LabExamGeneration>(state, jar, form).await
}

pub async fn submit_reports(
    State(state): State<SharedState>,
    jar: CookieJar,
    form: Result<Form<<ReportGeneration as UseCase>::Form>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    run_submission::<ReportGeneration>(state, jar, form).await
}
