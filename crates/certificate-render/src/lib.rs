//! Certificate rendering and export
//!
//! Turns a [`certforge_common::CertificateData`] record into a downloadable
//! artifact: the certificate view is built as an SVG document
//! ([`template`]), rasterized once at a fixed upscale factor ([`raster`]),
//! and the cached bitmap is reused for both PDF and PNG export
//! ([`export`]).

pub mod export;
pub mod raster;
pub mod template;

use thiserror::Error;

pub use export::CertificateExporter;
pub use raster::{rasterize_svg, UPSCALE_FACTOR};
pub use template::{CertificateTemplate, Theme};

/// Convenience result type used across the renderer.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error taxonomy for the rendering pipeline.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The SVG view could not be parsed or rasterized.
    #[error("raster error: {0}")]
    Raster(String),

    /// An artifact could not be encoded or written.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    /// Build a [`RenderError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`RenderError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
