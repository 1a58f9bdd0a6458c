use smallvec::SmallVec;

use crate::{
    geometry::{Point, Size, Rect, Affine},
    input::{Tag, Buttons, Filter, Kinds, PointerKind, PointerEvent},
    frame::{Context, FrameStamp}
};
use super::{Dimensions, Constraints, Direction};

/// Extent of the suppression scrim in every direction. Large enough to
/// cover any window regardless of where the context area sits.
const SCRIM_EXTENT: f32 = 1e6;

/// A region of the UI that responds to certain pointer presses by
/// displaying a contextual widget on top of everything else. The
/// contextual widget is dismissed by a primary press outside of it or
/// by releasing a press inside of it.
#[derive(Debug)]
pub struct ContextArea {
    tags: Tags,
    last_update: Option<FrameStamp>,
    active: bool,
    started_active: bool,
    anchor_local: Point,
    anchor: Anchor,
    overlay_size: Size,
    overlay_origin: Point,
    transitions: SmallVec<[Transition; 2]>,
    activation: Buttons,
    absolute_anchor: bool,
    edge_hint: Direction
}

/// Where the contextual widget is anchored, captured when the area
/// was activated and never refreshed until the next activation.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Anchor {
    /// Anchor position in window coordinates.
    pub window: Point,
    /// Maps the area's local space to window space at activation time.
    pub transform: Affine
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    Activated,
    Dismissed
}

#[derive(Clone, Copy, Debug)]
struct Tags {
    region: Tag,
    suppression: Tag,
    dismiss: Tag
}

impl ContextArea {
    /// A context area activated by [`Buttons::SECONDARY`], anchored at the
    /// click position.
    pub fn new() -> Self {
        Self {
            tags: Tags {
                region: Tag::new(),
                suppression: Tag::new(),
                dismiss: Tag::new()
            },
            last_update: None,
            active: false,
            started_active: false,
            anchor_local: Point::ZERO,
            anchor: Anchor::default(),
            overlay_size: Size::ZERO,
            overlay_origin: Point::ZERO,
            transitions: SmallVec::new(),
            activation: Buttons::SECONDARY,
            absolute_anchor: false,
            edge_hint: Direction::default()
        }
    }

    /// The buttons that summon the contextual widget when pressed inside
    /// the area. An empty set behaves like [`Buttons::SECONDARY`].
    #[inline]
    pub fn activation(mut self, buttons: Buttons) -> Self {
        self.activation = buttons;

        self
    }

    /// Anchor the contextual widget at the area's origin instead of the
    /// click position. Useful for button activated menus.
    #[inline]
    pub fn absolute_anchor(mut self, absolute: bool) -> Self {
        self.absolute_anchor = absolute;

        self
    }

    /// The window edge or corner closest to where the area is used. The
    /// area itself only keeps the overlay inside the window; the hint is
    /// for hosts that pick a container placement.
    #[inline]
    pub fn edge_hint(mut self, hint: Direction) -> Self {
        self.edge_hint = hint;

        self
    }

    #[inline]
    pub fn hint(&self) -> Direction {
        self.edge_hint
    }

    #[inline]
    pub fn activation_buttons(&self) -> Buttons {
        if self.activation.is_empty() {
            Buttons::SECONDARY
        } else {
            self.activation
        }
    }

    /// Whether the contextual widget is currently displayed.
    #[inline]
    pub fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` once for every activation since the last call.
    #[inline]
    pub fn activated(&mut self) -> bool {
        self.take(Transition::Activated)
    }

    /// Returns `true` once for every dismissal since the last call.
    #[inline]
    pub fn dismissed(&mut self) -> bool {
        self.take(Transition::Dismissed)
    }

    /// Drains every pending transition in the order it happened.
    #[inline]
    pub fn take_transitions(&mut self) -> SmallVec<[Transition; 2]> {
        std::mem::take(&mut self.transitions)
    }

    #[inline]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The click position in the area's local space.
    #[inline]
    pub fn anchor_local(&self) -> Point {
        self.anchor_local
    }

    /// Size of the contextual widget as measured during the last layout.
    #[inline]
    pub fn overlay_size(&self) -> Size {
        self.overlay_size
    }

    /// Local position the contextual widget was last placed at.
    #[inline]
    pub fn overlay_origin(&self) -> Point {
        self.overlay_origin
    }

    /// Hides the contextual widget. Does nothing if it is not displayed.
    pub fn dismiss(&mut self) {
        if !self.active {
            return;
        }

        self.active = false;
        self.push(Transition::Dismissed);

        tracing::debug!(region = ?self.tags.region, "context area dismissed");
    }

    /// Processes the events of the current frame. Invoked by
    /// [`ContextArea::layout`], subsequent calls within the same frame
    /// do nothing.
    pub fn update(&mut self, ctx: &mut Context) {
        if self.last_update == Some(ctx.stamp()) {
            return;
        }

        self.last_update = Some(ctx.stamp());
        self.started_active = self.active;

        let activation = self.activation_buttons();

        while let Some(event) = ctx.event(
            Filter::new(self.tags.region, Kinds::PRESS | Kinds::RELEASE)
        ) {
            if event.kind != PointerKind::Press {
                continue;
            }

            // The press that opens the widget never counts as outside of it.
            if self.active && event.buttons.contain(Buttons::PRIMARY) {
                let pos = event.position - self.overlay_origin;

                if !Rect::from_size(self.overlay_size).contains(pos) {
                    self.dismiss();
                }
            }

            if event.buttons.contain(activation) {
                self.activate(&event);
            }
        }

        while ctx.event(Filter::new(self.tags.suppression, Kinds::PRESS)).is_some() {
            self.dismiss();
        }

        while ctx.event(Filter::new(self.tags.dismiss, Kinds::RELEASE)).is_some() {
            self.dismiss();
        }
    }

    /// Lays out the area and, while it is active, `content` on top of
    /// everything else. The area occupies exactly the minimum constraints.
    pub fn layout(
        &mut self,
        ctx: &mut Context,
        content: impl FnOnce(&mut Context) -> Dimensions
    ) -> Dimensions {
        self.update(ctx);

        let dims = Dimensions::new(ctx.constraints.min);

        // Content is still laid out on the frame that dismisses it; its
        // widgets observe the dismissing event.
        let contextual = if self.active || self.started_active {
            let constraints = Constraints::new(Size::ZERO, ctx.window_size());
            let rec = ctx.ops.record();
            let content_dims = ctx.with_constraints(constraints, content);
            self.overlay_size = content_dims.size.non_negative();

            Some(rec.stop(ctx.ops))
        } else {
            None
        };

        if let (true, Some(contextual)) = (self.active, contextual) {
            let window = place_overlay(
                self.anchor.window,
                self.overlay_size,
                ctx.window_size()
            );
            let local = self.anchor.transform.invert().apply(window).round();
            self.overlay_origin = local;

            tracing::trace!(?window, ?local, size = ?self.overlay_size, "placed overlay");

            // Blocks input to everything beneath the contextual widget.
            let rec = ctx.ops.record();
            ctx.ops.input_area(
                Rect::new(
                    -SCRIM_EXTENT,
                    -SCRIM_EXTENT,
                    SCRIM_EXTENT * 2f32,
                    SCRIM_EXTENT * 2f32
                ),
                self.tags.suppression,
                false
            );
            let scrim = rec.stop(ctx.ops);
            ctx.ops.defer(scrim);

            let rec = ctx.ops.record();
            ctx.ops.push_offset(local);
            ctx.ops.call(contextual);
            // Catches completed interactions with the contextual widget.
            ctx.ops.input_area(
                Rect::from_size(self.overlay_size),
                self.tags.dismiss,
                true
            );
            ctx.ops.pop_transform();
            let overlay = rec.stop(ctx.ops);
            ctx.ops.defer(overlay);
        }

        ctx.ops.input_area(Rect::from_size(dims.size), self.tags.region, true);

        dims
    }

    fn activate(&mut self, event: &PointerEvent) {
        let was_active = self.active;
        self.active = true;

        if self.absolute_anchor {
            self.anchor_local = Point::ZERO;
        } else {
            self.anchor_local = event.position;
        }

        self.anchor = Anchor {
            window: event.transform.apply(self.anchor_local),
            transform: event.transform
        };

        if !was_active {
            self.push(Transition::Activated);
        }

        tracing::debug!(
            region = ?self.tags.region,
            anchor = ?self.anchor.window,
            "context area activated"
        );
    }

    #[inline]
    fn push(&mut self, transition: Transition) {
        // At most one pending entry per kind.
        self.transitions.retain(|x| *x != transition);
        self.transitions.push(transition);
    }

    #[inline]
    fn take(&mut self, transition: Transition) -> bool {
        let len = self.transitions.len();
        self.transitions.retain(|x| *x != transition);

        self.transitions.len() != len
    }
}

impl Default for ContextArea {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Window-space position for an overlay of `size` anchored at `anchor`.
/// An axis that would overflow `viewport` is flipped to the other side of
/// the anchor and clamped to zero. An overlay larger than the viewport
/// still overflows past the far edge.
pub fn place_overlay(anchor: Point, size: Size, viewport: Size) -> Point {
    let size = size.non_negative();
    let mut pos = Point::new(anchor.x.round().max(0f32), anchor.y.round().max(0f32));

    if pos.x + size.width > viewport.width {
        pos.x = (pos.x - size.width).max(0f32);
    }

    if pos.y + size.height > viewport.height {
        pos.y = (pos.y - size.height).max(0f32);
    }

    pos
}
