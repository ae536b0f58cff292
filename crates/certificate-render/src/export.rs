//! Artifact export
//!
//! The exporter captures the certificate view once and reuses the cached
//! bitmap for both PDF and PNG downloads. The PDF page mirrors the
//! download geometry of the web client: landscape A4, image at a fixed
//! 280 mm width with aspect-preserving height, 10 mm margin.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};
use printpdf::{image_crate, Image, ImageTransform, Mm, PdfDocument};
use tracing::info;

use certforge_common::CertificateData;

use crate::template::{CertificateTemplate, Theme};
use crate::{raster, RenderError, RenderResult};

const PAGE_WIDTH_MM: f64 = 297.0;
const PAGE_HEIGHT_MM: f64 = 210.0;
const IMAGE_WIDTH_MM: f64 = 280.0;
const MARGIN_MM: f64 = 10.0;
const IMAGE_DPI: f64 = 300.0;

/// Renders one certificate record into downloadable artifacts.
///
/// The first capture rasterizes the SVG view at [`raster::UPSCALE_FACTOR`];
/// subsequent exports reuse the cached bitmap.
pub struct CertificateExporter {
    template: CertificateTemplate,
    data: CertificateData,
    bitmap: Option<RgbaImage>,
}

impl CertificateExporter {
    pub fn new(theme: Theme, data: CertificateData) -> Self {
        Self {
            template: CertificateTemplate::new(theme),
            data,
            bitmap: None,
        }
    }

    /// The record this exporter renders.
    pub fn data(&self) -> &CertificateData {
        &self.data
    }

    /// Whether the view has already been captured.
    pub fn is_rendered(&self) -> bool {
        self.bitmap.is_some()
    }

    /// The captured certificate bitmap, rasterizing on first use.
    pub fn bitmap(&mut self) -> RenderResult<&RgbaImage> {
        if self.bitmap.is_none() {
            let svg = self.template.render_svg(&self.data);
            let bitmap = raster::rasterize_svg(&svg, raster::UPSCALE_FACTOR)?;
            info!(
                "captured certificate {} at {}x{}",
                self.data.certificate_id,
                bitmap.width(),
                bitmap.height()
            );
            self.bitmap = Some(bitmap);
        }
        self.bitmap
            .as_ref()
            .ok_or_else(|| RenderError::raster("certificate capture missing"))
    }

    /// Encode the certificate as a single-page landscape PDF.
    pub fn pdf_bytes(&mut self) -> RenderResult<Vec<u8>> {
        let certificate_id = self.data.certificate_id.clone();
        let bitmap = self.bitmap()?;
        let (px_width, px_height) = bitmap.dimensions();
        let rgb: RgbImage = bitmap.convert();

        let (doc, page, layer) = PdfDocument::new(
            format!("Certificate {certificate_id}"),
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);

        // Fixed width, height from the bitmap aspect ratio.
        let image_height_mm = px_height as f64 * IMAGE_WIDTH_MM / px_width as f64;
        let natural_width_mm = px_width as f64 * 25.4 / IMAGE_DPI;
        let natural_height_mm = px_height as f64 * 25.4 / IMAGE_DPI;

        // printpdf embeds through its own image version, so the buffer is
        // rebuilt under that type.
        let embedded = image_crate::RgbImage::from_raw(px_width, px_height, rgb.into_raw())
            .ok_or_else(|| RenderError::export("bitmap buffer does not match its dimensions"))?;
        let image = Image::from_dynamic_image(&image_crate::DynamicImage::ImageRgb8(embedded));
        image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM as f32)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - MARGIN_MM - image_height_mm) as f32)),
                scale_x: Some((IMAGE_WIDTH_MM / natural_width_mm) as f32),
                scale_y: Some((image_height_mm / natural_height_mm) as f32),
                dpi: Some(IMAGE_DPI as f32),
                ..Default::default()
            },
        );

        let bytes = doc.save_to_bytes().context("encode certificate pdf")?;
        Ok(bytes)
    }

    /// Write `certificate_<id>.pdf` into `dir` and return its path.
    pub fn write_pdf(&mut self, dir: &Path) -> RenderResult<PathBuf> {
        let path = dir.join(self.artifact_file_name("pdf"));
        let bytes = self.pdf_bytes()?;
        fs::write(&path, bytes).context("write certificate pdf")?;
        info!("wrote {}", path.display());
        Ok(path)
    }

    /// Write `certificate_<id>.png` into `dir` and return its path.
    ///
    /// Saves the cached bitmap directly; no re-capture.
    pub fn write_png(&mut self, dir: &Path) -> RenderResult<PathBuf> {
        let path = dir.join(self.artifact_file_name("png"));
        self.bitmap()?
            .save(&path)
            .context("write certificate png")?;
        info!("wrote {}", path.display());
        Ok(path)
    }

    fn artifact_file_name(&self, extension: &str) -> String {
        format!("certificate_{}.{extension}", self.data.certificate_id)
    }
}
