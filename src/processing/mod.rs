//! Text processing and analysis module

pub mod analyzer;
pub mod document;
pub mod similarity;
pub mod skill_matcher;
pub mod text_processor;
