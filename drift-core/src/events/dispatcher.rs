//! Fan-out dispatcher over registered [`DriftEventHandler`]s.
//!
//! A handler that panics is caught and logged; the remaining handlers still
//! receive the event. This matters because handlers run arbitrary
//! IDE/plugin/bridge code we don't control.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::handler::DriftEventHandler;
use super::types::*;

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn DriftEventHandler>>,
}

macro_rules! emit_method {
    ($emit_fn:ident, $on_fn:ident, $event_ty:ty) => {
        pub fn $emit_fn(&self, event: &$event_ty) {
            for handler in &self.handlers {
                let handler = handler.clone();
                let event = event.clone();
                let result = catch_unwind(AssertUnwindSafe(|| handler.$on_fn(&event)));
                if let Err(panic) = result {
                    ::tracing::warn!(panic = ?panic, "event handler panicked in {}", stringify!($on_fn));
                }
            }
        }
    };
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn DriftEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    emit_method!(emit_scan_started, on_scan_started, ScanStartedEvent);
    emit_method!(emit_scan_progress, on_scan_progress, ScanProgressEvent);
    emit_method!(emit_scan_complete, on_scan_complete, ScanCompleteEvent);
    emit_method!(emit_scan_error, on_scan_error, ScanErrorEvent);
    emit_method!(emit_pattern_discovered, on_pattern_discovered, PatternDiscoveredEvent);
    emit_method!(emit_pattern_approved, on_pattern_approved, PatternApprovedEvent);
    emit_method!(emit_pattern_ignored, on_pattern_ignored, PatternIgnoredEvent);
    emit_method!(emit_pattern_merged, on_pattern_merged, PatternMergedEvent);
    emit_method!(emit_violation_detected, on_violation_detected, ViolationDetectedEvent);
    emit_method!(emit_violation_dismissed, on_violation_dismissed, ViolationDismissedEvent);
    emit_method!(emit_violation_fixed, on_violation_fixed, ViolationFixedEvent);
    emit_method!(emit_gate_evaluated, on_gate_evaluated, GateEvaluatedEvent);
    emit_method!(emit_regression_detected, on_regression_detected, RegressionDetectedEvent);
    emit_method!(emit_enforcement_changed, on_enforcement_changed, EnforcementChangedEvent);
    emit_method!(emit_constraint_approved, on_constraint_approved, ConstraintApprovedEvent);
    emit_method!(emit_constraint_violated, on_constraint_violated, ConstraintViolatedEvent);
    emit_method!(emit_decision_mined, on_decision_mined, DecisionMinedEvent);
    emit_method!(emit_decision_reversed, on_decision_reversed, DecisionReversedEvent);
    emit_method!(emit_adr_detected, on_adr_detected, AdrDetectedEvent);
    emit_method!(emit_boundary_discovered, on_boundary_discovered, BoundaryDiscoveredEvent);
    emit_method!(emit_detector_alert, on_detector_alert, DetectorAlertEvent);
    emit_method!(emit_detector_disabled, on_detector_disabled, DetectorDisabledEvent);
    emit_method!(emit_feedback_abuse_detected, on_feedback_abuse_detected, FeedbackAbuseDetectedEvent);
    emit_method!(emit_error, on_error, ErrorEvent);
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
