use std::sync::Arc;

use super::outcome::SubmissionOutcome;
use super::request::SubmissionRequest;
use super::transport::Transport;
use super::ui::{BusyGuard, PENDING_LABEL, ResultContainer, SubmitControl};

/// Turns an outcome into the HTML shown in the result container.
/// Must handle both variants.
pub trait Renderer: Send + Sync {
    fn render(&self, outcome: &SubmissionOutcome) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&SubmissionOutcome) -> String + Send + Sync,
{
    fn render(&self, outcome: &SubmissionOutcome) -> String {
        self(outcome)
    }
}

/// The control was still pending from an earlier submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRejected;

impl std::fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Una richiesta è già in corso per questo modulo")
    }
}

impl std::error::Error for SubmitRejected {}

/// One form's submit button and result area, wired to a backend.
pub struct SubmissionPipeline<C, R> {
    transport: Arc<dyn Transport>,
    control: C,
    container: R,
    pending_label: String,
}

impl<C: SubmitControl, R: ResultContainer> SubmissionPipeline<C, R> {
    pub fn new(transport: Arc<dyn Transport>, control: C, container: R) -> Self {
        Self {
            transport,
            control,
            container,
            pending_label: PENDING_LABEL.to_string(),
        }
    }

    pub fn with_pending_label(mut self, label: impl Into<String>) -> Self {
        self.pending_label = label.into();
        self
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn container(&self) -> &R {
        &self.container
    }

    /// Run one request/response cycle.
    ///
    /// Every backend failure ends up as `SubmissionOutcome::Failure` and is
    /// rendered; only a submission on a still-pending control is refused,
    /// in which case neither the backend nor the container is touched.
    pub async fn submit<F: Renderer + ?Sized>(
        &self,
        request: SubmissionRequest,
        endpoint_path: &str,
        renderer: &F,
    ) -> Result<SubmissionOutcome, SubmitRejected> {
        let Some(_busy) = BusyGuard::acquire(&self.control, &self.pending_label) else {
            tracing::debug!("Rejected submission to {endpoint_path}: control still pending");
            return Err(SubmitRejected);
        };

        self.container.hide();

        let outcome = SubmissionOutcome::from(self.transport.post_json(endpoint_path, &request).await);

        match &outcome {
            SubmissionOutcome::Success(_) => {
                tracing::info!("Submission to {endpoint_path} succeeded");
            }
            SubmissionOutcome::Failure(msg) => {
                tracing::warn!("Submission to {endpoint_path} failed: {msg}");
            }
        }

        self.container.set_content(renderer.render(&outcome));
        self.container.show();
        self.container.scroll_into_view();

        Ok(outcome)
    }
}
