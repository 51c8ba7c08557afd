use thiserror::Error;

/// Errors raised while loading or checking an [`AuraConfig`](crate::AuraConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} needs at least one color")]
    EmptyPalette { field: &'static str },
    #[error("emotion parameter value {value} is mapped more than once")]
    DuplicateEmotionValue { value: i32 },
}
