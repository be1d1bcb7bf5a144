use std::{path::Path, sync::Arc};

use crate::foundation::error::{ScrollyError, ScrollyResult};

/// An RGBA8 frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Rasterize SVG text at its own pixel size.
///
/// Relative `href`s resolve against `resources_dir`. Text uses system fonts plus any font files in
/// `resources_dir` and its `fonts/` subdirectory.
#[tracing::instrument(skip(svg), fields(bytes = svg.len()))]
pub fn rasterize(svg: &str, resources_dir: Option<&Path>) -> ScrollyResult<FrameRGBA> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb: build_fontdb(resources_dir),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| ScrollyError::render(format!("parse svg: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ScrollyError::render("failed to allocate frame pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width: size.width(),
        height: size.height(),
        data: pixmap.data().to_vec(),
        premultiplied: true,
    })
}

/// Encode `frame` as PNG at `path`.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> ScrollyResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ScrollyError::render(format!("write png '{}': {e}", path.display())))
}

fn build_fontdb(resources_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = resources_dir {
        db.load_fonts_dir(dir.join("fonts"));
    }
    Arc::new(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_rect_lands_in_pixels() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="2" height="2" fill="#ff0000"/></svg>"##;
        let frame = rasterize(svg, None).unwrap();
        assert_eq!((frame.width, frame.height), (4, 2));
        assert_eq!(&frame.data[0..4], &[255, 0, 0, 255]);
        assert_eq!(frame.data[4 * 3 + 3], 0);
    }

    #[test]
    fn malformed_svg_is_a_render_error() {
        let err = rasterize("<svg", None).unwrap_err();
        assert!(err.to_string().starts_with("render error:"));
    }

    #[test]
    fn straight_alpha_undoes_premultiplication() {
        let frame = FrameRGBA {
            width: 1,
            height: 1,
            data: vec![64, 0, 0, 128],
            premultiplied: true,
        };
        assert_eq!(frame.to_straight_rgba(), [128, 0, 0, 128]);
    }
}
