//! Text processing and analysis module

pub mod document;
pub mod text_processor;
pub mod keywords;
pub mod similarity;
pub mod analyzer;
