use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChoreoError {
    #[error("a choreographer needs at least one section")]
    NoSections,

    #[error("viewport extent must be positive and finite, got {0}")]
    InvalidViewport(f64),

    #[error("invalid tuning value for {field}: {value}")]
    InvalidTuning { field: &'static str, value: f64 },

    #[error("failed to parse section data: {0}")]
    SectionData(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChoreoError>;
