//! Audiogram chart drawing and file export.

pub mod bands;
pub mod export;
pub mod render;
