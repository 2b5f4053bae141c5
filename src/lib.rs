pub mod clipboard;
pub mod config;
pub mod discover;
pub mod errors;
pub mod export;
pub mod ignore;
pub mod logger;
pub mod reporting;
pub mod selection;
pub mod session;
pub mod state;
pub mod tree;
pub mod utils;

pub use config::{SpoonConfig, TitleMode};
pub use errors::SpoonError;
pub use ignore::IgnorePatterns;
pub use session::Session;
pub use tree::{CheckState, FileTree};
