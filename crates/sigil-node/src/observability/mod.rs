//! Process-level observability.

mod logging;

pub use logging::{init_logging, LogFormat};
