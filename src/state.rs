use std::sync::Arc;

use crate::config::Config;
use crate::demo::session::DemoSessions;
use crate::submission::Transport;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub transport: Arc<dyn Transport>,
    pub sessions: DemoSessions,
}
