//! Input processing module
//! Handles file type detection and text extraction

pub mod file_type;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
