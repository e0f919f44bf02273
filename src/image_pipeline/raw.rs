//! RAW image reading module
//!
//! This module provides format-agnostic camera RAW decoding. Sensor mosaics
//! are demosaiced to RGB before they leave the module.

mod rawloader_reader;
pub mod types;

pub use rawloader_reader::RawLoaderReader;
pub use types::{CfaPattern, RawMosaic};
