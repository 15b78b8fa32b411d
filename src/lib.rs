//! Pure-tone audiogram rendering and export.
//!
//! One chart per subject: hearing level (dB HL) against the six standard
//! audiometric frequencies, right and left ear as separate series, clinical
//! severity bands shaded behind the data. Charts are written as PNG, TIFF,
//! PDF and SVG under a configurable output directory.

pub mod chart;
pub mod cli;
pub mod config;
pub mod input;
pub mod session;
pub mod subjects;
