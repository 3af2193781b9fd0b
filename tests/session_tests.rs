use std::sync::Arc;
use std::thread;
use std::time::Duration;

use uuid::Uuid;

use simsuite_site::demo::session::{ControlSlot, DemoSessions, PanelSlot};
use simsuite_site::demo::UseCaseKind;
use simsuite_site::submission::{
    BusyGuard, ResultContainer, SubmissionRequest, SubmitControl, UiState, PENDING_LABEL,
};

// ── Request ─────────────────────────────────────────────────────

#[test]
fn request_serializes_in_declaration_order() {
    let request = SubmissionRequest::new()
        .field("zeta", "1")
        .optional("alpha", None)
        .field("mid", "due");

    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"zeta":"1","alpha":null,"mid":"due"}"#
    );
    assert_eq!(request.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
}

#[test]
fn request_blank_optional_is_absent() {
    let request = SubmissionRequest::new()
        .optional("blank", Some("  ".to_string()))
        .optional("set", Some("valore".to_string()));

    assert_eq!(request.get("blank"), Some(None));
    assert_eq!(request.get("set"), Some(Some("valore")));
    assert_eq!(request.get("missing"), None);
}

#[test]
fn request_repeated_field_keeps_position_and_last_value() {
    let request = SubmissionRequest::new()
        .field("a", "1")
        .field("b", "2")
        .field("a", "3");

    assert_eq!(request.len(), 2);
    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"a":"3","b":"2"}"#
    );
}

// ── Busy guard ──────────────────────────────────────────────────

#[test]
fn busy_guard_marks_control_pending_and_restores_it() {
    let control = ControlSlot::new("Genera Esami");

    {
        let guard = BusyGuard::acquire(&control, PENDING_LABEL).expect("control was idle");
        assert_eq!(guard.original_label(), "Genera Esami");
        assert!(control.is_disabled());
        assert_eq!(control.label(), PENDING_LABEL);
        assert_eq!(control.state(), UiState::Pending);

        assert!(BusyGuard::acquire(&control, PENDING_LABEL).is_none());
        // A refused acquisition leaves the pending control alone
        assert_eq!(control.label(), PENDING_LABEL);
    }

    assert!(!control.is_disabled());
    assert_eq!(control.label(), "Genera Esami");
    assert_eq!(control.state(), UiState::Settled);
}

#[test]
fn busy_guard_restores_control_on_panic() {
    let control = ControlSlot::new("Genera Referto");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = BusyGuard::acquire(&control, "Attendere").unwrap();
        panic!("renderer exploded");
    }));

    assert!(result.is_err());
    assert!(!control.is_disabled());
    assert_eq!(control.label(), "Genera Referto");
    assert_eq!(control.state(), UiState::Settled);
}

#[test]
fn control_snapshots_never_show_half_done_transitions() {
    let control = Arc::new(ControlSlot::new("Genera Scenario"));

    let toggler = {
        let control = control.clone();
        thread::spawn(move || {
            for _ in 0..5_000 {
                let _guard = BusyGuard::acquire(control.as_ref(), PENDING_LABEL).unwrap();
            }
        })
    };

    while !toggler.is_finished() {
        let snap = control.snapshot();
        let pending = snap.state == UiState::Pending;
        assert_eq!(snap.disabled, pending, "torn snapshot: {snap:?}");
        assert_eq!(snap.label == PENDING_LABEL, pending, "torn snapshot: {snap:?}");
    }
    toggler.join().unwrap();

    let snap = control.snapshot();
    assert_eq!(snap.state, UiState::Settled);
    assert_eq!(snap.label, "Genera Scenario");
}

#[test]
fn enter_pending_refuses_busy_control() {
    let control = ControlSlot::new("Genera Materiali");

    assert_eq!(
        control.enter_pending(PENDING_LABEL).as_deref(),
        Some("Genera Materiali")
    );
    assert_eq!(control.enter_pending("Altro"), None);
    assert_eq!(control.label(), PENDING_LABEL);

    control.settle("Genera Materiali");
    let snap = control.snapshot();
    assert!(!snap.disabled);
    assert_eq!(snap.state, UiState::Settled);
    assert_eq!(snap.label, "Genera Materiali");
}

#[test]
fn panel_hide_clears_scroll() {
    let panel = PanelSlot::new();
    panel.set_content("<p>ok</p>".to_string());
    panel.show();
    panel.scroll_into_view();
    assert!(panel.snapshot().scrolled);

    panel.hide();
    let snap = panel.snapshot();
    assert!(!snap.visible);
    assert!(!snap.scrolled);
    assert_eq!(snap.content, "<p>ok</p>");
}

// ── Sessions ────────────────────────────────────────────────────

#[test]
fn slots_are_per_session_and_use_case() {
    let sessions = DemoSessions::new();
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();

    let slot = sessions.slot(a, UseCaseKind::Scenario);
    assert_eq!(slot.control.label(), "Genera Scenario");
    assert!(Arc::ptr_eq(
        &slot,
        &sessions.slot(a, UseCaseKind::Scenario)
    ));

    sessions.slot(a, UseCaseKind::Reports);
    sessions.slot(b, UseCaseKind::Scenario);

    assert_eq!(sessions.len(), 3);
    assert!(sessions.get(b, UseCaseKind::Materials).is_none());
}

#[test]
fn cleanup_drops_idle_slots_but_keeps_pending_ones() {
    let sessions = DemoSessions::new();
    let session = Uuid::now_v7();

    sessions.slot(session, UseCaseKind::Materials);
    let busy = sessions.slot(session, UseCaseKind::Exams);
    let _guard = BusyGuard::acquire(busy.control.as_ref(), PENDING_LABEL).unwrap();

    sessions.cleanup(Duration::from_secs(3600));
    assert_eq!(sessions.len(), 2);

    sessions.cleanup(Duration::ZERO);
    assert_eq!(sessions.len(), 1);
    assert!(sessions.get(session, UseCaseKind::Exams).is_some());
    assert!(sessions.get(session, UseCaseKind::Materials).is_none());
}
