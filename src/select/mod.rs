//! Backend selection: acceptance policies, the selector and its result.

/// Acceptance trait and configurable policy.
pub mod acceptance;
/// Selection outcome and diagnostics.
pub mod result;
/// First-match selector.
pub mod selector;
