use thiserror::Error;

/// Every failure a conversion run can end with. All of them are terminal.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to load image {0}")]
    ImageLoadError(String),

    #[error("Invalid camera geometry: {0}")]
    InvalidGeometry(String),

    #[error("Failed to create output container {0}")]
    ContainerCreateError(String),

    #[error("Failed to write output container {0}")]
    ContainerWriteError(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
