use thiserror::Error;

pub type ToolkitResult<T> = Result<T, ToolkitError>;

#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no time-aware layers found")]
    NoTimeAwareLayers,

    #[error("full time extent is missing its start or end")]
    MissingExtentBounds,

    #[error("at least 2 time steps are required, got {requested}")]
    TooFewTimeSteps { requested: usize },

    #[error("failed to load layer `{layer}`: {reason}")]
    LayerLoad { layer: String, reason: String },

    #[error("time slider has no time steps configured")]
    NotConfigured,

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ToolkitError {
    /// Returns `true` for errors caused by unusable time configuration input.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NoTimeAwareLayers | Self::MissingExtentBounds | Self::TooFewTimeSteps { .. }
        )
    }

    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::LayerLoad { .. })
    }
}
