use std::mem;

use crate::{
    geometry::{Size, Point},
    input::{Router, Filter, PointerEvent, PointerInput},
    ops::{Ops, DisplayList, HitArea},
    widget::{Constraints, Dimensions}
};

/// Identifies a frame. Stable for every query made while the frame
/// is being laid out and strictly increasing from one frame to the next.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct FrameStamp(u64);

/// Everything a widget has access to while it is being laid out.
pub struct Context<'a> {
    pub ops: &'a mut Ops,
    pub constraints: Constraints,
    window_size: Size,
    stamp: FrameStamp,
    router: &'a mut Router
}

/// Drives frames: feeds platform input to the router, runs the
/// layout closure and keeps the resulting hit areas for the next frame.
#[derive(Debug)]
pub struct Window {
    size: Size,
    stamp: FrameStamp,
    ops: Ops,
    router: Router,
    pending: Vec<PointerInput>,
    areas: Vec<HitArea>
}

impl FrameStamp {
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl<'a> Context<'a> {
    pub fn new(
        ops: &'a mut Ops,
        router: &'a mut Router,
        stamp: FrameStamp,
        window_size: Size
    ) -> Self {
        let window_size = window_size.non_negative();

        Self {
            ops,
            constraints: Constraints::tight(window_size),
            window_size,
            stamp,
            router
        }
    }

    /// The next event queued for `filter.target` with a kind in `filter.kinds`.
    #[inline]
    pub fn event(&mut self, filter: Filter) -> Option<PointerEvent> {
        self.router.next(filter)
    }

    #[inline]
    pub fn stamp(&self) -> FrameStamp {
        self.stamp
    }

    #[inline]
    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// Runs `f` with `constraints` and restores the current ones afterwards.
    pub fn with_constraints<R>(
        &mut self,
        constraints: Constraints,
        f: impl FnOnce(&mut Context) -> R
    ) -> R {
        let prev = mem::replace(&mut self.constraints, constraints);
        let result = f(self);
        self.constraints = prev;

        result
    }

    /// Runs `f` with everything it adds translated by `offset`.
    pub fn offset<R>(
        &mut self,
        offset: Point,
        f: impl FnOnce(&mut Context) -> R
    ) -> R {
        self.ops.push_offset(offset);
        let result = f(self);
        self.ops.pop_transform();

        result
    }
}

impl Window {
    pub fn new(size: Size) -> Self {
        Self {
            size: size.non_negative(),
            stamp: FrameStamp::default(),
            ops: Ops::new(),
            router: Router::new(),
            pending: Vec::with_capacity(8),
            areas: Vec::new()
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn resize(&mut self, size: Size) {
        self.size = size.non_negative();
    }

    #[inline]
    pub fn stamp(&self) -> FrameStamp {
        self.stamp
    }

    /// Queues `input` for delivery at the start of the next frame.
    #[inline]
    pub fn pointer(&mut self, input: PointerInput) {
        self.pending.push(input);
    }

    /// Input areas of the last resolved frame, bottom to top.
    #[inline]
    pub fn hit_areas(&self) -> &[HitArea] {
        &self.areas
    }

    pub fn frame(&mut self, f: impl FnOnce(&mut Context) -> Dimensions) -> DisplayList {
        self.stamp = self.stamp.next();

        for input in self.pending.drain(..) {
            self.router.route(input, &self.areas);
        }

        self.ops.clear();

        let mut ctx = Context::new(
            &mut self.ops,
            &mut self.router,
            self.stamp,
            self.size
        );
        f(&mut ctx);

        let list = self.ops.resolve();
        self.areas.clone_from(&list.areas);
        self.router.clear();

        tracing::trace!(
            frame = self.stamp.value(),
            items = list.items.len(),
            areas = list.areas.len(),
            "frame resolved"
        );

        list
    }
}
