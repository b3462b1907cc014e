//! PNG Meta Search Common Library
//!
//! CLIとデスクトップで共有される型とキーワード照合

pub mod types;
pub mod error;
pub mod keywords;
pub mod matcher;
pub mod metadata;

pub use types::SearchOutcome;
pub use error::{Error, Result};
pub use keywords::parse_keywords;
pub use matcher::{KeywordMatcher, Verdict};
pub use metadata::Metadata;
