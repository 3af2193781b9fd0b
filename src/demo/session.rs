use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use super::UseCaseKind;
use crate::submission::{ResultContainer, SubmitControl, UiState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlSnapshot {
    pub state: UiState,
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    pub visible: bool,
    pub content: String,
    pub scrolled: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Server-side stand-in for a demo form's submit button.
pub struct ControlSlot {
    inner: Mutex<ControlSnapshot>,
}

impl ControlSlot {
    pub fn new(label: &str) -> Self {
        Self {
            inner: Mutex::new(ControlSnapshot {
                state: UiState::Idle,
                disabled: false,
                label: label.to_string(),
            }),
        }
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        lock(&self.inner).clone()
    }
}

impl SubmitControl for ControlSlot {
    fn label(&self) -> String {
        lock(&self.inner).label.clone()
    }

    fn set_label(&self, label: &str) {
        lock(&self.inner).label = label.to_string();
    }

    fn is_disabled(&self) -> bool {
        lock(&self.inner).disabled
    }

    fn disable(&self) -> bool {
        let mut inner = lock(&self.inner);
        if inner.disabled {
            return false;
        }
        inner.disabled = true;
        true
    }

    fn enable(&self) {
        lock(&self.inner).disabled = false;
    }

    fn state(&self) -> UiState {
        lock(&self.inner).state
    }

    fn set_state(&self, state: UiState) {
        lock(&self.inner).state = state;
    }

    fn enter_pending(&self, pending_label: &str) -> Option<String> {
        let mut inner = lock(&self.inner);
        if inner.disabled {
            return None;
        }
        inner.disabled = true;
        inner.state = UiState::Pending;
        Some(std::mem::replace(&mut inner.label, pending_label.to_string()))
    }

    fn settle(&self, label: &str) {
        let mut inner = lock(&self.inner);
        inner.label = label.to_string();
        inner.state = UiState::Settled;
        inner.disabled = false;
    }
}

/// Server-side stand-in for a demo form's result area.
pub struct PanelSlot {
    inner: Mutex<PanelSnapshot>,
}

impl PanelSlot {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PanelSnapshot {
                visible: false,
                content: String::new(),
                scrolled: false,
            }),
        }
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        lock(&self.inner).clone()
    }
}

impl Default for PanelSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultContainer for PanelSlot {
    fn hide(&self) {
        let mut inner = lock(&self.inner);
        inner.visible = false;
        inner.scrolled = false;
    }

    fn show(&self) {
        lock(&self.inner).visible = true;
    }

    fn is_visible(&self) -> bool {
        lock(&self.inner).visible
    }

    fn set_content(&self, html: String) {
        lock(&self.inner).content = html;
    }

    fn scroll_into_view(&self) {
        lock(&self.inner).scrolled = true;
    }
}

/// One demo form as seen by one browser.
pub struct DemoSlot {
    pub control: Arc<ControlSlot>,
    pub panel: Arc<PanelSlot>,
    last_used: Mutex<Instant>,
}

impl DemoSlot {
    fn new(kind: UseCaseKind) -> Self {
        Self {
            control: Arc::new(ControlSlot::new(kind.button_label())),
            panel: Arc::new(PanelSlot::new()),
            last_used: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *lock(&self.last_used) = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.duration_since(*lock(&self.last_used))
    }
}

/// Demo controls keyed by browser session and use case.
pub struct DemoSessions {
    /// (session_id, use case) -> slot
    slots: DashMap<(Uuid, UseCaseKind), Arc<DemoSlot>>,
}

impl DemoSessions {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Get or create the slot, marking it as used.
    pub fn slot(&self, session: Uuid, kind: UseCaseKind) -> Arc<DemoSlot> {
        let slot = self
            .slots
            .entry((session, kind))
            .or_insert_with(|| Arc::new(DemoSlot::new(kind)))
            .clone();
        slot.touch();
        slot
    }

    pub fn get(&self, session: Uuid, kind: UseCaseKind) -> Option<Arc<DemoSlot>> {
        self.slots.get(&(session, kind)).map(|slot| slot.clone())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop slots idle for longer than `max_age`. Pending slots are kept.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.slots.retain(|_, slot| {
            slot.control.is_disabled() || slot.idle_for(now) < max_age
        });
    }
}

impl Default for DemoSessions {
    fn default() -> Self {
        Self::new()
    }
}
