//! Common utilities module
//!
//! This module contains the error taxonomy and the run configuration shared
//! across the image pipeline.

pub mod config;
pub mod error;

pub use config::{ContainerCompression, ConversionConfig, ConversionConfigBuilder, DEFAULT_HFOV_DEGREES};
pub use error::{ConversionError, Result};
