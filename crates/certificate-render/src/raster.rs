//! SVG rasterization
//!
//! The certificate view is captured at a fixed upscale factor to improve
//! print resolution. resvg produces premultiplied RGBA; pixels are
//! demultiplied before export so encoders see straight alpha.

use anyhow::Context;
use image::RgbaImage;

use crate::{RenderError, RenderResult};

/// Fixed capture upscale factor for print resolution.
pub const UPSCALE_FACTOR: f32 = 2.0;

/// Rasterize an SVG document into a straight-alpha RGBA bitmap at the
/// given scale.
pub fn rasterize_svg(svg: &str, scale: f32) -> RenderResult<RgbaImage> {
    let mut opts = usvg::Options::default();
    opts.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse certificate svg")?;

    let size = tree.size();
    let width = (size.width() * scale).round() as u32;
    let height = (size.height() * scale).round() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RenderError::raster(format!("invalid capture size {width}x{height}")))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgba8 = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba8);

    RgbaImage::from_raw(width, height, rgba8)
        .ok_or_else(|| RenderError::raster("pixel buffer does not match capture size"))
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
