//! `DriftEventHandler` — the pluggable sink for domain events.
//!
//! Every method has a no-op default so a handler only overrides the events it
//! cares about (an IDE bridge might only want `on_violation_detected`; a
//! telemetry-free CLI might implement none at all).

use super::types::*;

pub trait DriftEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
    fn on_scan_error(&self, _event: &ScanErrorEvent) {}
    fn on_pattern_discovered(&self, _event: &PatternDiscoveredEvent) {}
    fn on_pattern_approved(&self, _event: &PatternApprovedEvent) {}
    fn on_pattern_ignored(&self, _event: &PatternIgnoredEvent) {}
    fn on_pattern_merged(&self, _event: &PatternMergedEvent) {}
    fn on_violation_detected(&self, _event: &ViolationDetectedEvent) {}
    fn on_violation_dismissed(&self, _event: &ViolationDismissedEvent) {}
    fn on_violation_fixed(&self, _event: &ViolationFixedEvent) {}
    fn on_gate_evaluated(&self, _event: &GateEvaluatedEvent) {}
    fn on_regression_detected(&self, _event: &RegressionDetectedEvent) {}
    fn on_enforcement_changed(&self, _event: &EnforcementChangedEvent) {}
    fn on_constraint_approved(&self, _event: &ConstraintApprovedEvent) {}
    fn on_constraint_violated(&self, _event: &ConstraintViolatedEvent) {}
    fn on_decision_mined(&self, _event: &DecisionMinedEvent) {}
    fn on_decision_reversed(&self, _event: &DecisionReversedEvent) {}
    fn on_adr_detected(&self, _event: &AdrDetectedEvent) {}
    fn on_boundary_discovered(&self, _event: &BoundaryDiscoveredEvent) {}
    fn on_detector_alert(&self, _event: &DetectorAlertEvent) {}
    fn on_detector_disabled(&self, _event: &DetectorDisabledEvent) {}
    fn on_feedback_abuse_detected(&self, _event: &FeedbackAbuseDetectedEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}
