use crate::{
    foundation::{
        core::{BackendKind, Device},
        error::{RendeviceError, RendeviceResult},
    },
    inventory::provider::DeviceProvider,
    select::{
        acceptance::{Acceptance, AcceptancePolicy},
        result::{ProbeAttempt, ProbeOutcome, SelectionResult},
    },
};

/// First-match compute backend selection over a priority-ordered candidate list.
///
/// Candidate order is the only priority signal. Probe failures are recorded and skipped, the
/// first candidate with at least one accepted device wins, and its accepted devices are enabled
/// through the provider. Devices of other kinds are never disabled.
///
/// The selector does not switch the render device to GPU; callers derive that from the
/// returned [`SelectionResult`] (see [`JobSetup`](crate::JobSetup)).
#[derive(Clone, Debug)]
pub struct BackendSelector<A = AcceptancePolicy> {
    candidates: Vec<BackendKind>,
    acceptance: A,
}

impl<A: Acceptance> BackendSelector<A> {
    /// Validate the configuration and build a selector.
    ///
    /// Fails with [`RendeviceError::InvalidConfiguration`] for an empty or duplicated candidate
    /// list, or an acceptance policy that rejects itself.
    pub fn new(
        candidates: impl IntoIterator<Item = BackendKind>,
        acceptance: A,
    ) -> RendeviceResult<Self> {
        let candidates: Vec<BackendKind> = candidates.into_iter().collect();
        if candidates.is_empty() {
            return Err(RendeviceError::invalid_config(
                "candidate backend list must be non-empty",
            ));
        }
        for (i, kind) in candidates.iter().enumerate() {
            if candidates[..i].contains(kind) {
                return Err(RendeviceError::invalid_config(format!(
                    "candidate backend {kind} listed more than once"
                )));
            }
        }
        acceptance.validate()?;

        Ok(Self {
            candidates,
            acceptance,
        })
    }

    /// Candidates in priority order.
    pub fn candidates(&self) -> &[BackendKind] {
        &self.candidates
    }

    /// Acceptance policy in use.
    pub fn acceptance(&self) -> &A {
        &self.acceptance
    }

    /// Probe candidates in order and activate the devices of the first one that has any.
    ///
    /// Probe and activation failures never abort the run: both are recorded in
    /// [`SelectionResult::attempts`] and the next candidate is tried.
    #[tracing::instrument(skip_all, fields(candidates = self.candidates.len()))]
    pub fn select<P: DeviceProvider + ?Sized>(
        &self,
        provider: &mut P,
    ) -> RendeviceResult<SelectionResult> {
        let mut attempts = Vec::with_capacity(self.candidates.len());

        for &kind in &self.candidates {
            let devices = match provider.probe(kind) {
                Ok(devices) => devices,
                Err(err) => {
                    tracing::warn!(
                        backend = %kind,
                        error = %err,
                        "probe failed, trying next candidate"
                    );
                    attempts.push(ProbeAttempt {
                        kind,
                        outcome: ProbeOutcome::Failed {
                            reason: err.to_string(),
                        },
                    });
                    continue;
                }
            };

            let enumerated = devices.len();
            let accepted: Vec<(usize, Device)> = devices
                .into_iter()
                .enumerate()
                .filter(|(_, d)| self.acceptance.accepts(kind, d))
                .collect();

            if accepted.is_empty() {
                tracing::info!(backend = %kind, enumerated, "no matching devices");
                attempts.push(ProbeAttempt {
                    kind,
                    outcome: ProbeOutcome::Empty { enumerated },
                });
                continue;
            }

            let activated = match activate(provider, kind, accepted) {
                Ok(activated) => activated,
                Err(err) => {
                    tracing::warn!(
                        backend = %kind,
                        error = %err,
                        "activation failed, trying next candidate"
                    );
                    attempts.push(ProbeAttempt {
                        kind,
                        outcome: ProbeOutcome::Failed {
                            reason: format!("activation failed: {err}"),
                        },
                    });
                    continue;
                }
            };

            tracing::info!(backend = %kind, devices = activated.len(), "selected compute backend");
            attempts.push(ProbeAttempt {
                kind,
                outcome: ProbeOutcome::Accepted {
                    count: activated.len(),
                },
            });
            return Ok(SelectionResult::selected(kind, activated, attempts));
        }

        tracing::info!(
            tried = attempts.len(),
            "no acceleration hardware found on any candidate backend"
        );
        Ok(SelectionResult::no_hardware(attempts))
    }
}

/// Enable every accepted device of `kind`.
///
/// If the provider refuses one, flags switched on by this call are switched back off before the
/// error is returned, so a failed candidate leaves the host as it was found.
fn activate<P: DeviceProvider + ?Sized>(
    provider: &mut P,
    kind: BackendKind,
    accepted: Vec<(usize, Device)>,
) -> RendeviceResult<Vec<Device>> {
    let mut activated = Vec::with_capacity(accepted.len());
    let mut switched_on = Vec::new();

    for (index, mut device) in accepted {
        if let Err(err) = provider.set_enabled(index, true) {
            for &undo in switched_on.iter().rev() {
                if let Err(undo_err) = provider.set_enabled(undo, false) {
                    tracing::warn!(
                        backend = %kind,
                        index = undo,
                        error = %undo_err,
                        "could not restore activation flag"
                    );
                }
            }
            return Err(err);
        }
        if !device.enabled {
            switched_on.push(index);
        }
        device.enabled = true;
        tracing::debug!(backend = %kind, index, device = %device.name, "enabled device");
        activated.push(device);
    }
    Ok(activated)
}

/// One-shot selection: validate `candidates` and `acceptance`, then run against `provider`.
///
/// An invalid configuration is reported before the provider is touched.
pub fn select_backend<A, P>(
    candidates: &[BackendKind],
    acceptance: A,
    provider: &mut P,
) -> RendeviceResult<SelectionResult>
where
    A: Acceptance,
    P: DeviceProvider + ?Sized,
{
    BackendSelector::new(candidates.iter().copied(), acceptance)?.select(provider)
}

#[cfg(test)]
#[path = "../../tests/unit/select/selector.rs"]
mod tests;
