pub mod cli;
pub mod config;
pub mod error;
pub mod error_log;
pub mod scanner;
pub mod search;
pub mod session;
pub mod shell;

pub use png_meta_search_common as common;
