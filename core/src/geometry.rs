use std::ops::{Add, Sub};

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Size {
    pub width: f32,
    pub height: f32
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32
}

/// A 2D affine transform. Maps a point `p` to
/// `(sx * p.x + hx * p.y + ox, hy * p.x + sy * p.y + oy)`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Affine {
    pub sx: f32,
    pub hx: f32,
    pub ox: f32,
    pub hy: f32,
    pub sy: f32,
    pub oy: f32
}

impl Size {
    pub const ZERO: Size = Size::new(0f32, 0f32);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    /// Replaces negative or NaN extents with zero.
    #[inline]
    pub fn non_negative(self) -> Self {
        Size::new(self.width.max(0f32), self.height.max(0f32))
    }

    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let width = self.width.max(min.width).min(max.width);
        let height = self.height.max(min.height).min(max.height);

        Self { width, height }
    }
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0f32, 0f32, size.width, size.height)
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Half-open containment: the left and top edges are inside,
    /// the right and bottom edges are not.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x &&
            point.y >= self.y &&
            point.x < self.x + self.width &&
            point.y < self.y + self.height
    }

    /// The axis aligned bounding box of this rectangle after `transform`.
    pub fn transform(&self, transform: Affine) -> Rect {
        let corners = [
            transform.apply(Point::new(self.x, self.y)),
            transform.apply(Point::new(self.x + self.width, self.y)),
            transform.apply(Point::new(self.x, self.y + self.height)),
            transform.apply(Point::new(self.x + self.width, self.y + self.height))
        ];

        let mut min = corners[0];
        let mut max = corners[0];

        for corner in &corners[1..] {
            min.x = min.x.min(corner.x);
            min.y = min.y.min(corner.y);
            max.x = max.x.max(corner.x);
            max.y = max.y.max(corner.y);
        }

        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

impl Point {
    pub const ZERO: Self = Self::new(0f32, 0f32);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        sx: 1f32,
        hx: 0f32,
        ox: 0f32,
        hy: 0f32,
        sy: 1f32,
        oy: 0f32
    };

    #[inline]
    pub const fn new(sx: f32, hx: f32, ox: f32, hy: f32, sy: f32, oy: f32) -> Self {
        Self { sx, hx, ox, hy, sy, oy }
    }

    #[inline]
    pub const fn offset(offset: Point) -> Self {
        Self::new(1f32, 0f32, offset.x, 0f32, 1f32, offset.y)
    }

    /// Scales by `factor` around `origin`.
    #[inline]
    pub fn scale(origin: Point, factor: Size) -> Self {
        Self::new(
            factor.width,
            0f32,
            origin.x - origin.x * factor.width,
            0f32,
            factor.height,
            origin.y - origin.y * factor.height
        )
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.sx * p.x + self.hx * p.y + self.ox,
            self.hy * p.x + self.sy * p.y + self.oy
        )
    }

    /// Returns the transform that applies `self` first and `next` second.
    #[must_use]
    pub fn then(&self, next: Affine) -> Self {
        Self {
            sx: next.sx * self.sx + next.hx * self.hy,
            hx: next.sx * self.hx + next.hx * self.sy,
            ox: next.sx * self.ox + next.hx * self.oy + next.ox,
            hy: next.hy * self.sx + next.sy * self.hy,
            sy: next.hy * self.hx + next.sy * self.sy,
            oy: next.hy * self.ox + next.sy * self.oy + next.oy
        }
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.sx * self.sy - self.hx * self.hy
    }

    pub fn try_invert(&self) -> Option<Self> {
        let det = self.determinant();

        if det == 0f32 || !det.is_finite() {
            return None;
        }

        let inv = 1f32 / det;
        let sx = self.sy * inv;
        let hx = -self.hx * inv;
        let hy = -self.hy * inv;
        let sy = self.sx * inv;

        Some(Self {
            sx,
            hx,
            ox: -(sx * self.ox + hx * self.oy),
            hy,
            sy,
            oy: -(hy * self.ox + sy * self.oy)
        })
    }

    /// Like [`Affine::try_invert`] but a singular transform
    /// inverts to the identity.
    #[inline]
    pub fn invert(&self) -> Self {
        self.try_invert().unwrap_or(Self::IDENTITY)
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from(point: (f32, f32)) -> Self {
        Self { x: point.0, y: point.1 }
    }
}

impl From<(f32, f32)> for Size {
    fn from(size: (f32, f32)) -> Self {
        Self { width: size.0, height: size.1 }
    }
}
