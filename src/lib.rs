//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeMatchError};
pub use processing::analyzer::{MatchReport, MatchResult};
pub use processing::document::{Document, DocumentInput, DocumentType};
pub use processing::keywords::SkillVocabulary;
