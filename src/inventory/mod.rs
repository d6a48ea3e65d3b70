//! Device providers: the seam between selection and the render host.

/// JSON-described inventory used by the CLI and tests.
pub mod fixture;
/// Provider trait.
pub mod provider;
