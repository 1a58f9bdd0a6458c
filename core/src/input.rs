use std::{
    collections::VecDeque,
    hash::{Hash, Hasher},
    ops::{BitOr, BitOrAssign},
    sync::atomic::{AtomicU64, Ordering}
};

use nohash::IntMap;
use smallvec::SmallVec;

use crate::{
    geometry::{Point, Affine},
    ops::HitArea
};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Identifies an event target. Widgets allocate their tags once and
/// register them every frame through [`crate::ops::Ops::input_area`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tag(u64);

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Buttons(u8);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerKind {
    Press,
    Release,
    Move
}

/// A set of [`PointerKind`]s used when querying events.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Kinds(u8);

/// Raw pointer input in window coordinates, as reported by the platform.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PointerInput {
    pub kind: PointerKind,
    /// The buttons held down after this input.
    pub buttons: Buttons,
    pub position: Point
}

/// A pointer event delivered to a single target.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// The buttons held down after this event. A press contains the pressed
    /// button, a release no longer contains the released one.
    pub buttons: Buttons,
    /// Position in the local space of the receiving input area.
    pub position: Point,
    /// Maps the local space of the receiving input area to window space.
    pub transform: Affine
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Filter {
    pub target: Tag,
    pub kinds: Kinds
}

/// Routes raw window-space input to per-target queues using the
/// hit areas of the previously resolved frame.
#[derive(Default, Debug)]
pub struct Router {
    queues: IntMap<Tag, VecDeque<PointerEvent>>,
    grab: SmallVec<[(Tag, Affine); 4]>
}

impl Tag {
    #[inline]
    pub fn new() -> Self {
        Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Tag {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Hash for Tag {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0);
    }
}

impl nohash::IsEnabled for Tag { }

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(1 << 1);
    pub const TERTIARY: Self = Self(1 << 2);

    /// Whether every button in `other` is also in `self`.
    /// Containment of the empty set is always true.
    #[inline]
    pub fn contain(&self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl PointerKind {
    #[inline]
    const fn bit(self) -> u8 {
        match self {
            PointerKind::Press => 1,
            PointerKind::Release => 1 << 1,
            PointerKind::Move => 1 << 2
        }
    }
}

impl Kinds {
    pub const PRESS: Self = Self(PointerKind::Press.bit());
    pub const RELEASE: Self = Self(PointerKind::Release.bit());
    pub const MOVE: Self = Self(PointerKind::Move.bit());

    #[inline]
    pub fn contain(&self, kind: PointerKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

impl BitOr for Kinds {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<PointerKind> for Kinds {
    #[inline]
    fn from(kind: PointerKind) -> Self {
        Self(kind.bit())
    }
}

impl PointerInput {
    #[inline]
    pub fn press(position: impl Into<Point>, buttons: Buttons) -> Self {
        Self { kind: PointerKind::Press, buttons, position: position.into() }
    }

    #[inline]
    pub fn release(position: impl Into<Point>) -> Self {
        Self {
            kind: PointerKind::Release,
            buttons: Buttons::NONE,
            position: position.into()
        }
    }

    #[inline]
    pub fn moved(position: impl Into<Point>, buttons: Buttons) -> Self {
        Self { kind: PointerKind::Move, buttons, position: position.into() }
    }
}

impl PointerEvent {
    /// The event position in window coordinates.
    #[inline]
    pub fn absolute_position(&self) -> Point {
        self.transform.apply(self.position)
    }
}

impl Filter {
    #[inline]
    pub fn new(target: Tag, kinds: impl Into<Kinds>) -> Self {
        Self { target, kinds: kinds.into() }
    }
}

impl Router {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `input` for every target it reaches. `areas` are ordered
    /// bottom to top. Areas that do not pass input through stop the
    /// hit test for everything beneath them.
    pub fn route(&mut self, input: PointerInput, areas: &[HitArea]) {
        if input.kind == PointerKind::Release && !self.grab.is_empty() {
            let grab = std::mem::take(&mut self.grab);

            for (tag, transform) in grab {
                self.deliver(tag, transform, input);
            }

            return;
        }

        let mut hits: SmallVec<[(Tag, Affine); 4]> = SmallVec::new();

        for area in areas.iter().rev() {
            let local = area.transform.invert().apply(input.position);

            if !area.rect.contains(local) {
                continue;
            }

            if !hits.iter().any(|(tag, _)| *tag == area.tag) {
                hits.push((area.tag, area.transform));
            }

            if !area.pass {
                break;
            }
        }

        tracing::trace!(kind = ?input.kind, targets = hits.len(), "routed pointer input");

        for (tag, transform) in &hits {
            self.deliver(*tag, *transform, input);
        }

        if input.kind == PointerKind::Press {
            self.grab = hits;
        }
    }

    /// Removes and returns the first queued event matching `filter`.
    pub fn next(&mut self, filter: Filter) -> Option<PointerEvent> {
        let queue = self.queues.get_mut(&filter.target)?;
        let index = queue.iter().position(|e| filter.kinds.contain(e.kind))?;

        queue.remove(index)
    }

    /// Drops everything that was not consumed during the frame.
    /// The press grab is kept: a release in a later frame still reaches
    /// the targets that saw the press.
    #[inline]
    pub fn clear(&mut self) {
        self.queues.clear();
    }

    #[inline]
    fn deliver(&mut self, tag: Tag, transform: Affine, input: PointerInput) {
        let event = PointerEvent {
            kind: input.kind,
            buttons: input.buttons,
            position: transform.invert().apply(input.position),
            transform
        };

        self.queues.entry(tag).or_default().push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn area(rect: Rect, tag: Tag, pass: bool) -> HitArea {
        HitArea { rect, transform: Affine::IDENTITY, tag, pass }
    }

    #[test]
    fn tags_are_unique() {
        assert_ne!(Tag::new(), Tag::new());
    }

    #[test]
    fn empty_set_is_always_contained() {
        assert!(Buttons::NONE.contain(Buttons::NONE));
        assert!(Buttons::PRIMARY.contain(Buttons::NONE));
        assert!(!Buttons::NONE.contain(Buttons::SECONDARY));
        assert!((Buttons::PRIMARY | Buttons::SECONDARY).contain(Buttons::SECONDARY));
    }

    #[test]
    fn opaque_area_stops_hit_test() {
        let below = Tag::new();
        let above = Tag::new();
        let areas = [
            area(Rect::new(0f32, 0f32, 100f32, 100f32), below, false),
            area(Rect::new(0f32, 0f32, 50f32, 50f32), above, false)
        ];

        let mut router = Router::new();
        router.route(PointerInput::press((10f32, 10f32), Buttons::PRIMARY), &areas);

        assert!(router.next(Filter::new(above, Kinds::PRESS)).is_some());
        assert!(router.next(Filter::new(below, Kinds::PRESS)).is_none());
    }

    #[test]
    fn pass_through_area_reaches_below() {
        let below = Tag::new();
        let above = Tag::new();
        let areas = [
            area(Rect::new(0f32, 0f32, 100f32, 100f32), below, false),
            area(Rect::new(0f32, 0f32, 50f32, 50f32), above, true)
        ];

        let mut router = Router::new();
        router.route(PointerInput::press((10f32, 10f32), Buttons::PRIMARY), &areas);

        assert!(router.next(Filter::new(above, Kinds::PRESS)).is_some());
        assert!(router.next(Filter::new(below, Kinds::PRESS)).is_some());
    }

    #[test]
    fn release_follows_press_grab() {
        let tag = Tag::new();
        let areas = [area(Rect::new(0f32, 0f32, 50f32, 50f32), tag, false)];

        let mut router = Router::new();
        router.route(PointerInput::press((10f32, 10f32), Buttons::PRIMARY), &areas);
        router.clear();
        router.route(PointerInput::release((200f32, 200f32)), &areas);

        let event = router.next(Filter::new(tag, Kinds::RELEASE)).unwrap();
        assert_eq!(event.position, Point::new(200f32, 200f32));
    }

    #[test]
    fn positions_are_local_to_the_area() {
        let tag = Tag::new();
        let areas = [HitArea {
            rect: Rect::new(0f32, 0f32, 50f32, 50f32),
            transform: Affine::offset(Point::new(100f32, 100f32)),
            tag,
            pass: false
        }];

        let mut router = Router::new();
        router.route(PointerInput::press((110f32, 120f32), Buttons::PRIMARY), &areas);

        let event = router.next(Filter::new(tag, Kinds::PRESS)).unwrap();
        assert_eq!(event.position, Point::new(10f32, 20f32));
        assert_eq!(event.absolute_position(), Point::new(110f32, 120f32));
    }

    #[test]
    fn filter_skips_other_kinds_without_dropping_them() {
        let tag = Tag::new();
        let areas = [area(Rect::new(0f32, 0f32, 50f32, 50f32), tag, false)];

        let mut router = Router::new();
        router.route(PointerInput::press((10f32, 10f32), Buttons::PRIMARY), &areas);
        router.route(PointerInput::release((10f32, 10f32)), &areas);

        assert_eq!(router.next(Filter::new(tag, Kinds::RELEASE)).unwrap().kind, PointerKind::Release);
        assert_eq!(router.next(Filter::new(tag, Kinds::PRESS)).unwrap().kind, PointerKind::Press);
        assert!(router.next(Filter::new(tag, Kinds::PRESS | Kinds::RELEASE)).is_none());
    }
}
