use crate::foundation::core::{BackendKind, Device};

/// Terminal outcome of a selection run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// A backend had at least one accepted device; those devices are now enabled.
    Selected,
    /// Every candidate was exhausted. Callers pick CPU fallback or abort.
    NoHardwareFound,
}

/// What happened when one candidate was probed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// `count` devices were accepted; this candidate won.
    Accepted {
        /// Number of devices enabled.
        count: usize,
    },
    /// Enumeration worked but no device was accepted.
    Empty {
        /// Devices listed by the host (CPU and rejected kinds included).
        enumerated: usize,
    },
    /// Switching backend or enumerating failed.
    Failed {
        /// Provider error message.
        reason: String,
    },
}

/// Diagnostic record of one probe, in candidate order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProbeAttempt {
    /// Probed backend.
    pub kind: BackendKind,
    /// Outcome of the probe.
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

/// Outcome of one [`BackendSelector::select`](crate::BackendSelector::select) call.
///
/// `status == Selected` exactly when `chosen_kind` is set and `activated_devices` is non-empty.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionResult {
    /// Winning backend, if any.
    pub chosen_kind: Option<BackendKind>,
    /// Devices enabled for the winning backend, in enumeration order.
    pub activated_devices: Vec<Device>,
    /// Terminal status.
    pub status: SelectionStatus,
    /// Every probe performed, failures included.
    pub attempts: Vec<ProbeAttempt>,
}

impl SelectionResult {
    pub(crate) fn selected(
        kind: BackendKind,
        activated_devices: Vec<Device>,
        attempts: Vec<ProbeAttempt>,
    ) -> Self {
        debug_assert!(!activated_devices.is_empty());
        Self {
            chosen_kind: Some(kind),
            activated_devices,
            status: SelectionStatus::Selected,
            attempts,
        }
    }

    pub(crate) fn no_hardware(attempts: Vec<ProbeAttempt>) -> Self {
        Self {
            chosen_kind: None,
            activated_devices: Vec::new(),
            status: SelectionStatus::NoHardwareFound,
            attempts,
        }
    }

    /// Whether an accelerated backend was selected.
    pub fn is_accelerated(&self) -> bool {
        self.status == SelectionStatus::Selected
    }

    /// Candidates whose probe failed, with the provider's reason.
    pub fn probe_failures(&self) -> impl Iterator<Item = (BackendKind, &str)> {
        self.attempts.iter().filter_map(|a| match &a.outcome {
            ProbeOutcome::Failed { reason } => Some((a.kind, reason.as_str())),
            _ => None,
        })
    }

    /// Operator-facing log: one line per candidate tried, then the decision.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .attempts
            .iter()
            .map(|a| match &a.outcome {
                ProbeOutcome::Accepted { count } => {
                    format!("{}: available, {count} device(s) accepted", a.kind)
                }
                ProbeOutcome::Empty { enumerated } => {
                    format!("{}: no matching devices ({enumerated} enumerated)", a.kind)
                }
                ProbeOutcome::Failed { reason } => format!("{}: probe failed: {reason}", a.kind),
            })
            .collect();

        match self.chosen_kind {
            Some(kind) => {
                lines.push(format!(
                    "selected {kind} with {} device(s)",
                    self.activated_devices.len()
                ));
                for d in &self.activated_devices {
                    lines.push(format!("  enabled: {} ({})", d.name, d.kind));
                }
            }
            None => {
                lines.push("no acceleration hardware found, CPU rendering required".to_string())
            }
        }
        lines
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/result.rs"]
mod tests;
