//! Input processing module
//! Handles format detection, text extraction, and loading documents from disk

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
