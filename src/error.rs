use thiserror::Error;

/// Errors raised by checked configuration surfaces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("size value must be finite, got {0}")]
    NonFiniteSize(f64),
    #[error("layer name must be non-empty")]
    EmptyLayer,
}
