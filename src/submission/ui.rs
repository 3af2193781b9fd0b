use std::sync::Arc;

use serde::Serialize;

/// Label shown on a control while its request is in flight.
pub const PENDING_LABEL: &str = "Generazione in corso...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    Idle,
    Pending,
    Settled,
}

impl UiState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Pending => "pending",
            UiState::Settled => "settled",
        }
    }
}

/// The button (or equivalent) that triggered a submission.
pub trait SubmitControl: Send + Sync {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn is_disabled(&self) -> bool;
    /// Disable the control. Returns `false` if it was already disabled.
    /// Implementations must check and set atomically.
    fn disable(&self) -> bool;
    fn enable(&self);
    fn state(&self) -> UiState;
    fn set_state(&self, state: UiState);

    /// Disable, swap in `pending_label` and move to `Pending` in one step.
    /// Returns the label the control had, or `None` if it was already busy.
    ///
    /// Controls observed from other tasks should override this so the
    /// transition is never seen half done.
    fn enter_pending(&self, pending_label: &str) -> Option<String> {
        if !self.disable() {
            return None;
        }
        let original = self.label();
        self.set_label(pending_label);
        self.set_state(UiState::Pending);
        Some(original)
    }

    /// Restore `label`, move to `Settled` and re-enable in one step.
    fn settle(&self, label: &str) {
        self.set_label(label);
        self.set_state(UiState::Settled);
        self.enable();
    }
}

/// Where a rendered outcome is displayed.
pub trait ResultContainer: Send + Sync {
    fn hide(&self);
    fn show(&self);
    fn is_visible(&self) -> bool;
    fn set_content(&self, html: String);
    fn scroll_into_view(&self);
}

impl<T: SubmitControl + ?Sized> SubmitControl for Arc<T> {
    fn label(&self) -> String {
        (**self).label()
    }
    fn set_label(&self, label: &str) {
        (**self).set_label(label)
    }
    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
    fn disable(&self) -> bool {
        (**self).disable()
    }
    fn enable(&self) {
        (**self).enable()
    }
    fn state(&self) -> UiState {
        (**self).state()
    }
    fn set_state(&self, state: UiState) {
        (**self).set_state(state)
    }
    fn enter_pending(&self, pending_label: &str) -> Option<String> {
        (**self).enter_pending(pending_label)
    }
    fn settle(&self, label: &str) {
        (**self).settle(label)
    }
}

impl<T: ResultContainer + ?Sized> ResultContainer for Arc<T> {
    fn hide(&self) {
        (**self).hide()
    }
    fn show(&self) {
        (**self).show()
    }
    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
    fn set_content(&self, html: String) {
        (**self).set_content(html)
    }
    fn scroll_into_view(&self) {
        (**self).scroll_into_view()
    }
}

/// Holds a control in `Pending` for as long as it lives.
///
/// Dropping the guard re-enables the control, restores the label it had
/// before acquisition and moves it to `Settled`. This also runs when the
/// owning future is dropped mid-request or a renderer panics.
pub struct BusyGuard<'a, C: SubmitControl + ?Sized> {
    control: &'a C,
    original_label: String,
}

impl<'a, C: SubmitControl + ?Sized> BusyGuard<'a, C> {
    /// Returns `None` when the control is already busy.
    pub fn acquire(control: &'a C, pending_label: &str) -> Option<Self> {
        let original_label = control.enter_pending(pending_label)?;
        Some(Self {
            control,
            original_label,
        })
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}

impl<C: SubmitControl + ?Sized> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.settle(&self.original_label);
    }
}
