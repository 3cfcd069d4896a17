//! View module - softbuffer rendering
//!
//! Contains the Renderer, which owns the window surface and the label font,
//! and the canvas adapting a pixel frame to the library's `DrawTarget`.

pub mod frame;

pub use frame::{Frame, TextPainter};

use anyhow::Result;
use fontdue::{Font, FontSettings, Metrics};
use softbuffer::Surface;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use cellgrid::config::GridConfig;
use cellgrid::model::AppModel;
use cellgrid::render::{draw_frame, DrawTarget};
use cellgrid::viewport::PixelRect;

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Fonts tried when the config names none
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

struct LabelFont {
    font: Font,
    font_size: f32,
    ascent: f32,
}

impl LabelFont {
    fn load(config: &GridConfig) -> Option<Self> {
        let candidates = config
            .label_font
            .iter()
            .cloned()
            .chain(FALLBACK_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            match Self::from_file(&path, config.axis_font_size as f32) {
                Ok(font) => {
                    tracing::info!("Axis labels use {}", path.display());
                    return Some(font);
                }
                Err(e) => tracing::debug!("Skipping font {}: {}", path.display(), e),
            }
        }

        tracing::warn!("No usable font found; axis labels are disabled");
        None
    }

    fn from_file(path: &Path, font_size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font: {}", e))?;
        let ascent = font
            .horizontal_line_metrics(font_size)
            .map_or(font_size, |metrics| metrics.ascent);
        Ok(Self {
            font,
            font_size,
            ascent,
        })
    }
}

/// Frame plus optional text painter, drawn on by the grid renderer
struct GridCanvas<'a, 'b> {
    frame: Frame<'a>,
    text: Option<TextPainter<'b>>,
}

impl DrawTarget for GridCanvas<'_, '_> {
    fn width(&self) -> i32 {
        self.frame.width() as i32
    }

    fn height(&self) -> i32 {
        self.frame.height() as i32
    }

    fn clear(&mut self, color: u32) {
        self.frame.clear(color);
    }

    // Only axis-aligned lines are drawn; thickness grows to both sides of
    // the coordinate, one extra pixel after it for even widths.
    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), width: i32, color: u32) {
        let width = width.max(1);
        let before = (width - 1) / 2;
        let rect = if start.1 == end.1 {
            let x0 = start.0.min(end.0);
            let x1 = start.0.max(end.0);
            PixelRect::new(x0, start.1 - before, x1 - x0 + 1, width)
        } else {
            let y0 = start.1.min(end.1);
            let y1 = start.1.max(end.1);
            PixelRect::new(start.0 - before, y0, width, y1 - y0 + 1)
        };
        self.frame.fill_rect(rect, color);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: u32) {
        self.frame.fill_rect(rect, color);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u32) {
        if let Some(painter) = &mut self.text {
            painter.draw(&mut self.frame, x, y, text, color);
        }
    }
}

/// Pixel size of the drawing surface.
///
/// Drawing and hit-testing both use the viewport's size, so the surface follows
/// it even when the window manager hands out a different inner size.
fn surface_size(window: PhysicalSize<u32>, viewport: (i32, i32)) -> (u32, u32) {
    let width = u32::try_from(viewport.0).unwrap_or(0).max(1);
    let height = u32::try_from(viewport.1).unwrap_or(0).max(1);
    if (window.width, window.height) != (width, height) {
        tracing::warn!(
            "Window is {}x{} but the grid surface is {}x{}",
            window.width,
            window.height,
            width,
            height
        );
    }
    (width, height)
}

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    labels: Option<LabelFont>,
    glyph_cache: GlyphCache,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        model: &AppModel,
    ) -> Result<Self> {
        let viewport = (
            model.viewport.surface_width(),
            model.viewport.surface_height(),
        );
        let (width, height) = surface_size(window.inner_size(), viewport);

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        surface
            .resize(
                NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
                NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
            )
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        Ok(Self {
            surface,
            labels: LabelFont::load(&model.config),
            glyph_cache: HashMap::new(),
            width,
            height,
        })
    }

    /// Draw the grid and present it
    pub fn render(&mut self, model: &AppModel) -> Result<()> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get buffer: {}", e))?;

        {
            let frame = Frame::new(&mut buffer, self.width as usize, self.height as usize);
            let text = self.labels.as_ref().map(|labels| {
                TextPainter::new(
                    &labels.font,
                    &mut self.glyph_cache,
                    labels.font_size,
                    labels.ascent,
                )
            });
            let mut canvas = GridCanvas { frame, text };
            draw_frame(&mut canvas, &model.viewport, &model.grid, &model.palette());
        }

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_follows_viewport_size() {
        assert_eq!(surface_size(PhysicalSize::new(791, 791), (791, 791)), (791, 791));
        // Window manager ignored the requested size
        assert_eq!(surface_size(PhysicalSize::new(1024, 768), (791, 791)), (791, 791));
    }

    #[test]
    fn test_surface_size_is_never_zero() {
        assert_eq!(surface_size(PhysicalSize::new(0, 0), (0, -5)), (1, 1));
    }
}
