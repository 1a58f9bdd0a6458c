use crate::{
    geometry::{Size, Point},
    frame::Context
};

// Constraints implementation was basically taken from Xilem/Kurbo.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Constraints {
    pub min: Size,
    pub max: Size
}

/// The size a widget ended up occupying in the flow layout.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Dimensions {
    pub size: Size
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32
}

/// A corner, an edge or the center of a rectangle.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum Direction {
    #[default]
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    Center
}

impl Constraints {
    pub const UNBOUNDED: Self = Self {
        min: Size::ZERO,
        max: Size::new(f32::INFINITY, f32::INFINITY)
    };

    #[inline]
    pub fn new(min: Size, max: Size) -> Self {
        let min = min.non_negative();

        Self {
            min,
            max: max.non_negative().clamp(min, Size::new(f32::INFINITY, f32::INFINITY))
        }
    }

    #[inline]
    pub fn tight(size: Size) -> Self {
        let size = size.non_negative();

        Self {
            min: size,
            max: size
        }
    }

    pub fn shrink(&self, diff: Size) -> Self {
        let min = Size::new(
            (self.min.width - diff.width).max(0f32),
            (self.min.height - diff.height).max(0f32),
        );
        let max = Size::new(
            (self.max.width - diff.width).max(0f32),
            (self.max.height - diff.height).max(0f32),
        );

        Self::new(min, max)
    }

    #[inline]
    pub fn loosen(&self) -> Self {
        Self {
            min: Size::ZERO,
            max: self.max
        }
    }

    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        size.clamp(self.min, self.max)
    }

    #[inline]
    pub fn pad(&self, padding: Padding) -> Self {
        self.shrink(
            Size::new(padding.horizontal(), padding.vertical())
        )
    }
}

impl Dimensions {
    #[inline]
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Padding {
    pub const ZERO: Self = Self::new(0f32, 0f32, 0f32, 0f32);

    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.right + self.left
    }

    /// Lays out `content` inside the padding and returns the padded size.
    pub fn layout(
        &self,
        ctx: &mut Context,
        content: impl FnOnce(&mut Context) -> Dimensions
    ) -> Dimensions {
        let constraints = ctx.constraints.pad(*self);

        ctx.ops.push_offset(Point::new(self.left, self.top));
        let dims = ctx.with_constraints(constraints, content);
        ctx.ops.pop_transform();

        let size = Size::new(
            dims.size.width + self.horizontal(),
            dims.size.height + self.vertical()
        );

        Dimensions::new(ctx.constraints.constrain(size))
    }
}

impl From<f32> for Padding {
    #[inline]
    fn from(value: f32) -> Self {
        Padding::new(value, value, value, value)
    }
}
