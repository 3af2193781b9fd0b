pub mod outcome;
pub mod pipeline;
pub mod request;
pub mod transport;
pub mod ui;

pub use outcome::{SubmissionError, SubmissionOutcome};
pub use pipeline::{Renderer, SubmissionPipeline, SubmitRejected};
pub use request::SubmissionRequest;
pub use transport::{HttpTransport, Transport};
pub use ui::{BusyGuard, ResultContainer, SubmitControl, UiState, PENDING_LABEL};
