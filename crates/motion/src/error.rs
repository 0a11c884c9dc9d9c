//! Engine error type.
//!
//! Behavior handlers themselves never fail — missing collaborators
//! degrade to no-ops — so errors only surface while constructing the
//! engine: bad selectors, bad margin strings, bad config files.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error(transparent)]
    Selector(#[from] dom::SelectorError),
    #[error(transparent)]
    Margin(#[from] viewport::MarginError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
