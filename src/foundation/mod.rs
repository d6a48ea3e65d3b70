/// Backend kinds, device kinds and devices.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
