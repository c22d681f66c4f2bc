pub mod config;
pub mod inject;
pub mod placeholder;

pub use config::Config;
pub use inject::{InjectError, inject_file, render_file};
