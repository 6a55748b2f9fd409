//! PNG rendering of lozenge tilings with transparent background
//!
//! Lozenges are filled and outlined as anti-aliased vector paths on a
//! `tiny_skia` canvas, then copied into an `image` buffer for encoding.

use crate::io::configuration::{
    FAMILY_COLORS, OUTLINE_COLOR, OUTLINE_WIDTH, RENDER_MARGIN, RENDER_SCALE,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::tiling::{LozengeKind, Tiling};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tiny_skia::{
    FillRule, LineJoin, Paint, Path as SkiaPath, PathBuilder, Pixmap, Stroke, Transform,
};

/// Maps projected plane coordinates onto pixel coordinates
#[derive(Debug, Clone, Copy)]
struct Viewport {
    min: [f64; 2],
    max: [f64; 2],
    scale: f64,
    margin: f64,
}

impl Viewport {
    fn fit(tiling: &Tiling, scale: f64) -> Self {
        let (min, max) = tiling.plane_bounds();
        Self {
            min,
            max,
            scale,
            margin: f64::from(RENDER_MARGIN),
        }
    }

    fn width(&self) -> u32 {
        (self.max[0] - self.min[0])
            .mul_add(self.scale, 2.0 * self.margin)
            .ceil() as u32
    }

    fn height(&self) -> u32 {
        (self.max[1] - self.min[1])
            .mul_add(self.scale, 2.0 * self.margin)
            .ceil() as u32
    }

    // Plane y grows upward, image rows grow downward
    fn to_pixel(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [
            (x - self.min[0]).mul_add(self.scale, self.margin),
            (self.max[1] - y).mul_add(self.scale, self.margin),
        ]
    }
}

fn paint(color: [u8; 4]) -> Paint<'static> {
    let [r, g, b, a] = color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

const fn family_color(kind: LozengeKind) -> [u8; 4] {
    match kind {
        LozengeKind::Left => FAMILY_COLORS[0],
        LozengeKind::Right => FAMILY_COLORS[1],
        LozengeKind::Top => FAMILY_COLORS[2],
    }
}

/// Closed quadrilateral through the given pixel coordinates
fn quad_path(corners: [[f64; 2]; 4]) -> Option<SkiaPath> {
    let mut pb = PathBuilder::new();
    let mut points = corners.iter().map(|&[x, y]| (x as f32, y as f32));
    let (start_x, start_y) = points.next()?;
    pb.move_to(start_x, start_y);
    for (x, y) in points {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

/// Rasterise a tiling, one colour per lozenge family
///
/// # Errors
///
/// Returns `InvalidParameter` if the scale yields an empty or oversized
/// canvas, or a lozenge has degenerate corners
pub fn render_tiling(tiling: &Tiling, scale: f64) -> Result<RgbaImage> {
    let viewport = Viewport::fit(tiling, scale);
    let (width, height) = (viewport.width(), viewport.height());
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        invalid_parameter(
            "scale",
            &scale,
            &format!("cannot allocate a {width}x{height} canvas"),
        )
    })?;

    let quads = tiling
        .iter()
        .map(|lozenge| {
            let corners = lozenge.plane_corners().map(|corner| viewport.to_pixel(corner));
            quad_path(corners)
                .map(|path| (lozenge.kind, path))
                .ok_or_else(|| invalid_parameter("scale", &scale, &"degenerate lozenge outline"))
        })
        .collect::<Result<Vec<_>>>()?;

    for (kind, path) in &quads {
        let fill = paint(family_color(*kind));
        pixmap.fill_path(path, &fill, FillRule::Winding, Transform::identity(), None);
    }

    // Outlines go on last so no fill covers a shared edge
    let outline = paint(OUTLINE_COLOR);
    let stroke = Stroke {
        width: OUTLINE_WIDTH,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    for (_, path) in &quads {
        pixmap.stroke_path(path, &outline, &stroke, Transform::identity(), None);
    }

    let mut img = RgbaImage::new(width, height);
    for (pixel, premultiplied) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = premultiplied.demultiply();
        *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    Ok(img)
}

/// Rasterise two tilings of the same hexagon next to each other
///
/// # Errors
///
/// Propagates any error from `render_tiling`
pub fn render_side_by_side(left: &Tiling, right: &Tiling, scale: f64) -> Result<RgbaImage> {
    let left_img = render_tiling(left, scale)?;
    let right_img = render_tiling(right, scale)?;

    let mut canvas = RgbaImage::new(
        left_img.width() + right_img.width(),
        left_img.height().max(right_img.height()),
    );
    image::imageops::replace(&mut canvas, &left_img, 0, 0);
    image::imageops::replace(&mut canvas, &right_img, i64::from(left_img.width()), 0);
    Ok(canvas)
}

pub(crate) fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Render a tiling and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The tiling has no lozenges
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tiling_as_png(tiling: &Tiling, output_path: &Path) -> Result<()> {
    if tiling.is_empty() {
        return Err(AlgorithmError::InvalidParameter {
            parameter: "tiling",
            value: tiling.hexagon().to_string(),
            reason: "tiling has no lozenges to render".to_string(),
        });
    }

    let img = render_tiling(tiling, RENDER_SCALE)?;
    ensure_parent_dir(output_path)?;

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
