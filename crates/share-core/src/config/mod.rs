//! Declared desired state
//!
//! Share points are declared in TOML manifests. Several manifests can be
//! layered; later ones override earlier ones share by share.

mod manifest;

pub use manifest::{DEFAULT_CONFIG_PATH, Manifest, SharingSection};
