#![deny(warnings)]

pub mod bundle;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod markdown;
pub mod prompts;
pub mod strip_indent;

pub use prompts::{build_system_prompt, continue_prompt, get_system_prompt};
