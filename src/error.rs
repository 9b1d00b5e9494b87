use thiserror::Error;

pub type PageResult<T> = Result<T, PageError>;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("required element not found: `{selector}`")]
    MissingElement { selector: String },

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("element is missing attribute `{attribute}`")]
    MissingAttribute { attribute: String },

    #[error("navigation target does not resolve: `{target}`")]
    UnresolvedTarget { target: String },

    #[error("render surface unavailable for `{selector}`")]
    SurfaceUnavailable { selector: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("field `{field}` is not a number")]
    InvalidInput { field: String },

    #[error("degenerate calculator input: {reason}")]
    DegenerateInput { reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
