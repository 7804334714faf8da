//! Social preview image rendering.
//!
//! Produces a 1920x1080 PNG with the page title laid over a background
//! photo (or a solid dark fill when no photo is configured). The title is
//! typeset as SVG text and rasterized with resvg, so line wrapping, kerning
//! and letter spacing all come from the font itself.
//!
//! Serve mode renders on demand for `GET /og?title=...`; build mode
//! pre-renders one PNG per post into the output directory.

use crate::{config::SiteConfig, render::escape_html};
use anyhow::{Context, Result, anyhow};
use resvg::tiny_skia::{Color, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};
use std::{fs, sync::Arc};
use usvg::fontdb::Database;

/// Canvas size in pixels.
pub const OG_WIDTH: u32 = 1920;
pub const OG_HEIGHT: u32 = 1080;

/// Title typography, tuned for the 1920x1080 canvas.
const FONT_SIZE: f32 = 130.0;
const LINE_ADVANCE: f32 = 120.0;
const MARGIN_X: f32 = 190.0;
const LETTER_SPACING: f32 = -6.5;

/// Baseline offset from the top of a line box, as a fraction of the
/// line advance.
const BASELINE_RATIO: f32 = 0.8;

/// Estimated horizontal advance per character, used only for line breaking.
/// The real metrics come from the font at raster time.
const CHAR_ADVANCE: f32 = FONT_SIZE * 0.56 + LETTER_SPACING;
const MAX_TEXT_WIDTH: f32 = OG_WIDTH as f32 - 2.0 * MARGIN_X;

/// Fill used when no background photo is configured.
const FALLBACK_FILL: (u8, u8, u8) = (15, 23, 42);

/// Renderer holding the loaded font and decoded background.
pub struct OgRenderer {
    fontdb: Arc<Database>,
    family: Option<String>,
    background: Option<Pixmap>,
}

impl OgRenderer {
    /// Build a renderer from config, reading the font and background from
    /// disk. The font file is required; a missing font is an error so the
    /// caller can turn it into a 5xx or a build warning.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let font = fs::read(&config.og.font)
            .with_context(|| format!("Failed to read og font: {}", config.og.font.display()))?;

        let background = match &config.og.background {
            Some(path) => Some(
                fs::read(path)
                    .with_context(|| format!("Failed to read og background: {}", path.display()))?,
            ),
            None => None,
        };

        Self::new(Some(font), background.as_deref())
    }

    /// Build a renderer from raw bytes.
    ///
    /// With no font the title is silently dropped from the output; the
    /// canvas and background still render.
    pub fn new(font: Option<Vec<u8>>, background: Option<&[u8]>) -> Result<Self> {
        let mut db = Database::new();
        if let Some(bytes) = font {
            db.load_font_data(bytes);
        }
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()));

        let background = match background {
            Some(bytes) => Some(decode_background(bytes)?),
            None => None,
        };

        Ok(Self {
            fontdb: Arc::new(db),
            family,
            background,
        })
    }

    /// Render the preview PNG for a title.
    pub fn render(&self, title: &str) -> Result<Vec<u8>> {
        let mut canvas = Pixmap::new(OG_WIDTH, OG_HEIGHT)
            .ok_or_else(|| anyhow!("failed to allocate canvas"))?;

        match &self.background {
            Some(bg) => draw_cover(&mut canvas, bg),
            None => {
                let (r, g, b) = FALLBACK_FILL;
                canvas.fill(Color::from_rgba8(r, g, b, 255));
            }
        }

        let svg = self.title_svg(title);
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)?;
        resvg::render(&tree, Transform::identity(), &mut canvas.as_mut());

        encode_png(&canvas)
    }

    /// SVG document with one `<text>` element per wrapped title line.
    ///
    /// The block of lines is centered vertically on the canvas.
    fn title_svg(&self, title: &str) -> String {
        let family = self.family.as_deref().unwrap_or("sans-serif");

        let lines = wrap_title(title);
        let block_top = (OG_HEIGHT as f32 - lines.len() as f32 * LINE_ADVANCE) / 2.0;

        let mut text = String::new();
        for (i, line) in lines.iter().enumerate() {
            let y = block_top + (i as f32 + BASELINE_RATIO) * LINE_ADVANCE;
            text.push_str(&format!(
                r##"<text x="{MARGIN_X}" y="{y}" font-family="{}" font-size="{FONT_SIZE}" letter-spacing="{LETTER_SPACING}" fill="#ffffff">{}</text>"##,
                escape_html(family),
                escape_html(line)
            ));
        }

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{OG_WIDTH}" height="{OG_HEIGHT}" viewBox="0 0 {OG_WIDTH} {OG_HEIGHT}">{text}</svg>"#
        )
    }
}

/// Greedy word wrap against the estimated character advance.
///
/// A single word wider than the text column stays on its own line rather
/// than being split mid-word.
fn wrap_title(title: &str) -> Vec<String> {
    let max_chars = (MAX_TEXT_WIDTH / CHAR_ADVANCE) as usize;

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in title.split_whitespace() {
        if current.is_empty() {
            current = word.to_owned();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_owned();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Decode an image file into a premultiplied pixmap.
fn decode_background(bytes: &[u8]) -> Result<Pixmap> {
    let decoded = image::load_from_memory(bytes)
        .context("Failed to decode og background image")?
        .into_rgba8();
    let (width, height) = decoded.dimensions();

    let mut data = decoded.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        px[0] = ((px[0] as u16 * a) / 255) as u8;
        px[1] = ((px[1] as u16 * a) / 255) as u8;
        px[2] = ((px[2] as u16 * a) / 255) as u8;
    }

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| anyhow!("og background has zero size"))?;
    Pixmap::from_vec(data, size).ok_or_else(|| anyhow!("og background buffer mismatch"))
}

/// Scale the background center-cover onto the canvas: fill the full
/// 1920x1080 frame and crop the overflow evenly on both sides.
fn draw_cover(canvas: &mut Pixmap, bg: &Pixmap) {
    let scale = f32::max(
        OG_WIDTH as f32 / bg.width() as f32,
        OG_HEIGHT as f32 / bg.height() as f32,
    );
    let dx = (OG_WIDTH as f32 - bg.width() as f32 * scale) / 2.0;
    let dy = (OG_HEIGHT as f32 - bg.height() as f32 * scale) / 2.0;

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(
        0,
        0,
        bg.as_ref(),
        &paint,
        Transform::from_row(scale, 0.0, 0.0, scale, dx, dy),
        None,
    );
}

/// Encode a premultiplied pixmap as PNG bytes.
fn encode_png(canvas: &Pixmap) -> Result<Vec<u8>> {
    let mut rgba = Vec::with_capacity((OG_WIDTH * OG_HEIGHT * 4) as usize);
    for px in canvas.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), rgba)
        .ok_or_else(|| anyhow!("pixel buffer size mismatch"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)?;
    Ok(out)
}
