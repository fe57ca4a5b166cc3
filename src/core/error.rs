// Construction-time validation errors
//
// Runtime queries (cell lookups, collision resolution, clock advances) are
// total and never fail; every invalid value is rejected when the object is built.

/// Invalid configuration passed to a constructor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Frame count must be at least 1")]
    ZeroFrameCount,

    #[error("Cooldown must be a positive number of seconds, got {0}")]
    InvalidCooldown(f32),

    #[error("Frame size must be positive, got {width}x{height}")]
    InvalidFrameSize { width: f32, height: f32 },

    #[error("Frame table must contain at least one frame")]
    EmptyFrames,

    #[error("Cell size must be positive, got {0}")]
    InvalidCellSize(f32),

    #[error("Grid of {width}x{height} cells is too large")]
    GridTooLarge { width: usize, height: usize },

    #[error("Viewport {width}x{height} needs too many cells of size {cell_size}")]
    ViewportTooLarge {
        width: f32,
        height: f32,
        cell_size: f32,
    },

    #[error("Actor size must be positive, got {width}x{height}")]
    InvalidActorSize { width: f32, height: f32 },

    #[error("Invalid tuning value for {name}: {value}")]
    InvalidTuning { name: &'static str, value: f32 },

    #[error("Grid row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown grid cell '{symbol}' at row {row}, column {column}")]
    UnknownCell {
        symbol: char,
        row: usize,
        column: usize,
    },
}

/// `Some(value)` when `value` is finite and strictly positive
pub(crate) fn positive(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidCooldown(-0.1);
        assert_eq!(
            err.to_string(),
            "Cooldown must be a positive number of seconds, got -0.1"
        );
        assert_eq!(
            ConfigError::ZeroFrameCount.to_string(),
            "Frame count must be at least 1"
        );
    }

    #[test]
    fn test_positive() {
        assert_eq!(positive(70.0), Some(70.0));
        assert_eq!(positive(0.0), None);
        assert_eq!(positive(-3.0), None);
        assert_eq!(positive(f32::NAN), None);
    }
}
