//! Figures for ECMAScript compatibility and transparency measurements.
//!
//! An archive is a directory holding `logfile.json`; figures read its
//! `syntaxReport` and `toolReport` sections, or fall back to the embedded
//! reference measurements in [`data`].

pub mod analysis;
pub mod archive;
pub mod cli;
pub mod data;
pub mod error;
pub mod export;
pub mod figure_config;
pub mod figures;
pub mod output;
pub mod palette;
pub mod plotting;
pub mod verify;

pub use archive::Archive;
pub use error::{FigureError, Result};
pub use figures::{Figure, FigureData};
