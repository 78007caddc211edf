use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

/// Font sizes outside `MIN_FONT_SIZE..=MAX_FONT_SIZE` are clamped.
const MIN_FONT_SIZE: f32 = 1.0;
const MAX_FONT_SIZE: f32 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_size: f32,
    /// Space between the text block and the box edge, on every side.
    pub padding: u32,
    pub line_spacing: u32,
    pub box_color: Rgba<u8>,
    pub text_color: Rgba<u8>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 42.0,
            padding: 16,
            line_spacing: 10,
            box_color: Rgba([0, 0, 0, 140]),
            text_color: Rgba([255, 255, 0, 255]),
        }
    }
}

/// Box position in image pixels. The origin may be negative when the box is
/// wider or taller than the image. Both end corners are inside the box, so it
/// covers `width + 1` by `height + 1` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Center a box of `content + 2 * padding` on an image of size `dims`.
pub fn centered_box(dims: (u32, u32), content: (u32, u32), padding: u32) -> BoxPlacement {
    let pad = padding.saturating_mul(2);
    let width = content.0.saturating_add(pad);
    let height = content.1.saturating_add(pad);
    BoxPlacement {
        x: ((i64::from(dims.0) - i64::from(width)) / 2) as i32,
        y: ((i64::from(dims.1) - i64::from(height)) / 2) as i32,
        width,
        height,
    }
}

pub struct LabelRenderer {
    font: FontArc,
    style: LabelStyle,
}

impl LabelRenderer {
    pub fn new(font: FontArc, mut style: LabelStyle) -> Self {
        style.font_size = if style.font_size.is_finite() {
            style.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        } else {
            LabelStyle::default().font_size
        };
        Self { font, style }
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.style.font_size)
    }

    fn line_height(&self) -> u32 {
        self.font.as_scaled(self.scale()).height().ceil() as u32
    }

    /// Size of the multi-line text block, without padding.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            return (0, 0);
        }
        let width = lines
            .iter()
            .map(|l| text_size(self.scale(), &self.font, l).0)
            .max()
            .unwrap_or(0);
        let n = lines.len() as u32;
        let height = n
            .saturating_mul(self.line_height())
            .saturating_add((n - 1).saturating_mul(self.style.line_spacing));
        (width, height)
    }

    pub fn placement(&self, dims: (u32, u32), text: &str) -> BoxPlacement {
        centered_box(dims, self.measure(text), self.style.padding)
    }

    /// Composite the label over `base` and flatten to RGB. Dimensions are preserved.
    pub fn render(&self, base: &DynamicImage, text: &str) -> RgbImage {
        let mut canvas = base.to_rgba8();
        let dims = canvas.dimensions();
        let mut layer = RgbaImage::new(dims.0, dims.1);

        let place = self.placement(dims, text);
        draw_filled_rect_mut(
            &mut layer,
            Rect::at(place.x, place.y).of_size(
                place.width.saturating_add(1),
                place.height.saturating_add(1),
            ),
            self.style.box_color,
        );

        let pad = self.style.padding as i32;
        let step = self.line_height().saturating_add(self.style.line_spacing) as i32;
        let mut y = place.y.saturating_add(pad);
        for line in text.lines() {
            draw_text_mut(
                &mut layer,
                self.style.text_color,
                place.x.saturating_add(pad),
                y,
                self.scale(),
                &self.font,
                line,
            );
            y = y.saturating_add(step);
        }

        imageops::overlay(&mut canvas, &layer, 0, 0);
        DynamicImage::ImageRgba8(canvas).to_rgb8()
    }
}
