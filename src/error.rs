use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no scene set")]
    NoScene,

    #[error("at least one render thread is required")]
    InvalidThreadCount,

    #[error("image size must be positive, got {width}x{height}")]
    InvalidImageSize { width: usize, height: usize },

    #[error("failed to write image")]
    ImageWrite(#[from] image::ImageError),

    #[error("couldn't read model {}", path.display())]
    ModelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("material {index} is not part of this scene ({count} materials)")]
    UnknownMaterial { index: usize, count: usize },

    #[error("model line {line}: {message}")]
    ModelParse { line: usize, message: String },
}
