//! Shared types for the TokenTrim codecs: errors, configuration and
//! the metadata that travels alongside encoded files.

pub mod config;
pub mod error;
pub mod types;

pub use config::{LosslessConfig, TrimConfig};
pub use error::{Result, TrimError};
pub use types::FileMeta;
