use std::path::Path;

use tiny_skia::{Pixmap, Paint, Transform};

use crate::{
    geometry::{Size, Affine},
    color::Color,
    ops::DisplayList
};

const MAX_EXTENT: u32 = 16384;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} pixmap")]
    InvalidSize {
        width: u32,
        height: u32
    },
    #[error("failed to encode png: {0}")]
    Encode(String)
}

/// Rasterizes resolved display lists in software.
#[derive(Clone, Debug)]
pub struct Renderer {
    background: Color,
    scale_factor: f32
}

impl Renderer {
    #[inline]
    pub fn new(background: Color) -> Self {
        Self {
            background,
            scale_factor: 1f32
        }
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    #[inline]
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor.is_finite() && scale_factor > 0f32 {
            self.scale_factor = scale_factor;
        }
    }

    pub fn render(&self, list: &DisplayList, size: Size) -> Result<Pixmap, RenderError> {
        let width = (size.width * self.scale_factor).ceil().max(0f32) as u32;
        let height = (size.height * self.scale_factor).ceil().max(0f32) as u32;

        if width > MAX_EXTENT || height > MAX_EXTENT {
            return Err(RenderError::InvalidSize { width, height });
        }

        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::InvalidSize { width, height })?;
        pixmap.fill(self.background.into());

        let scale = Transform::from_scale(self.scale_factor, self.scale_factor);

        for item in &list.items {
            let Some(rect) = tiny_skia::Rect::from_xywh(
                item.rect.x,
                item.rect.y,
                item.rect.width,
                item.rect.height
            ) else {
                // Empty or inverted rectangles cover no pixels.
                continue;
            };

            let mut paint = Paint::default();
            paint.set_color(item.color.into());
            paint.anti_alias = false;

            pixmap.fill_rect(rect, &paint, to_skia(item.transform).post_concat(scale), None);
        }

        Ok(pixmap)
    }

    pub fn save_png(
        &self,
        list: &DisplayList,
        size: Size,
        path: impl AsRef<Path>
    ) -> Result<(), RenderError> {
        let pixmap = self.render(list, size)?;

        pixmap.save_png(path)
            .map_err(|err| RenderError::Encode(err.to_string()))
    }
}

impl Default for Renderer {
    #[inline]
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[inline]
fn to_skia(transform: Affine) -> Transform {
    Transform::from_row(
        transform.sx,
        transform.hy,
        transform.hx,
        transform.sy,
        transform.ox,
        transform.oy
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::{Rect, Point}, ops::Ops};

    #[test]
    fn fills_transformed_rects() {
        let mut ops = Ops::new();
        ops.push_offset(Point::new(4f32, 4f32));
        ops.fill(Rect::new(0f32, 0f32, 2f32, 2f32), Color::rgb(200, 0, 0));
        ops.pop_transform();

        let pixmap = Renderer::default()
            .render(&ops.resolve(), Size::new(8f32, 8f32))
            .unwrap();

        let inside = pixmap.pixel(5, 5).unwrap();
        assert_eq!((inside.red(), inside.green(), inside.blue()), (200, 0, 0));

        let outside = pixmap.pixel(1, 1).unwrap();
        assert_eq!((outside.red(), outside.green(), outside.blue()), (255, 255, 255));
    }

    #[test]
    fn zero_sized_target_is_an_error() {
        let result = Renderer::default().render(&DisplayList::default(), Size::ZERO);

        assert!(matches!(result, Err(RenderError::InvalidSize { width: 0, height: 0 })));
    }
}
