//! Core module - ambient services shared by the rest of the crate
//!
//! - `settings` - `ClientSettings`, persisted as JSON with env overrides
//! - `logging` - Tracing subscriber installation
//! - `error` - `CoreError`

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use logging::init_tracing;
pub use settings::ClientSettings;
