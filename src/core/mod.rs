//! Core process state shared across the codebase.

mod state;

pub use state::{
    is_shutdown, is_watching, register_watcher, set_watching, setup_shutdown_handler,
};
