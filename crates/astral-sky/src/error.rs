use std::fmt;
use std::path::PathBuf;

use crate::surface::Layer;

/// Errors raised while setting up the backdrop.
///
/// Nothing in the per-frame path can fail; these only occur at construction
/// or when loading configuration.
#[derive(Debug)]
pub enum SkyError {
    /// The host could not provide a drawing surface for `layer`.
    ///
    /// The backdrop does not start its frame loop in this case.
    SurfaceUnavailable { layer: Layer },
    /// A config file could not be read.
    ConfigRead { path: PathBuf, source: std::io::Error },
    /// A config file was read but is not valid RON for [`SkyConfig`](crate::SkyConfig).
    ConfigParse { path: PathBuf, message: String },
}

impl fmt::Display for SkyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkyError::SurfaceUnavailable { layer } => {
                write!(f, "no drawing surface available for the {layer} layer")
            }
            SkyError::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            SkyError::ConfigParse { path, message } => {
                write!(f, "failed to parse config {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for SkyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SkyError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_error_names_the_layer() {
        let err = SkyError::SurfaceUnavailable { layer: Layer::Particles };
        assert_eq!(err.to_string(), "no drawing surface available for the particles layer");
    }

    #[test]
    fn read_error_exposes_io_source() {
        let err = SkyError::ConfigRead {
            path: PathBuf::from("sky.ron"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("sky.ron"));
    }
}
