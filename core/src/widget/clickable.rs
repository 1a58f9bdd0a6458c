use crate::{
    geometry::{Rect, Size},
    input::{Tag, Buttons, Filter, Kinds, PointerKind},
    frame::{Context, FrameStamp}
};
use super::Dimensions;

/// Detects primary clicks: a press followed by a release that
/// lands inside the area.
#[derive(Debug)]
pub struct Clickable {
    tag: Tag,
    last_update: Option<FrameStamp>,
    size: Size,
    pressed: bool,
    clicks: u32
}

impl Clickable {
    pub fn new() -> Self {
        Self {
            tag: Tag::new(),
            last_update: None,
            size: Size::ZERO,
            pressed: false,
            clicks: 0
        }
    }

    /// Returns `true` and consumes one click if any are pending.
    #[inline]
    pub fn clicked(&mut self) -> bool {
        if self.clicks > 0 {
            self.clicks -= 1;

            true
        } else {
            false
        }
    }

    #[inline]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn update(&mut self, ctx: &mut Context) {
        if self.last_update == Some(ctx.stamp()) {
            return;
        }

        self.last_update = Some(ctx.stamp());

        while let Some(event) = ctx.event(
            Filter::new(self.tag, Kinds::PRESS | Kinds::RELEASE)
        ) {
            match event.kind {
                PointerKind::Press if event.buttons.contain(Buttons::PRIMARY) => {
                    self.pressed = true;
                }
                PointerKind::Release if self.pressed => {
                    self.pressed = false;

                    if Rect::from_size(self.size).contains(event.position) {
                        self.clicks += 1;
                    }
                }
                _ => { }
            }
        }
    }

    pub fn layout(
        &mut self,
        ctx: &mut Context,
        content: impl FnOnce(&mut Context) -> Dimensions
    ) -> Dimensions {
        self.update(ctx);

        let dims = content(ctx);
        self.size = dims.size;

        ctx.ops.input_area(Rect::from_size(dims.size), self.tag, false);

        dims
    }
}

impl Default for Clickable {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
