use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::{
    geometry::{Rect, Point, Affine},
    color::Color,
    input::Tag
};

/// The operations produced by a single frame, in paint order.
#[derive(Default, Debug)]
pub struct Ops {
    list: Vec<Op>
}

#[derive(Clone, Debug)]
pub enum Op {
    /// Concatenates a transform onto the current one until the matching pop.
    PushTransform(Affine),
    PopTransform,
    Fill {
        rect: Rect,
        color: Color
    },
    /// Registers `rect` as an input area for `tag`. When `pass` is set,
    /// input reaching the area also continues to the areas beneath it.
    InputArea {
        rect: Rect,
        tag: Tag,
        pass: bool
    },
    /// Replays the recorded ops in place.
    Call(CallOp),
    /// Replays the recorded ops after the main pass, on top of everything
    /// else, using the transform in effect at this point.
    Defer(CallOp)
}

/// A recording in progress. Obtained from [`Ops::record`].
#[must_use = "a macro must be stopped to retrieve its ops"]
#[derive(Debug)]
pub struct Macro {
    start: usize
}

/// A recorded list of ops that can be replayed.
#[derive(Clone, Default, Debug)]
pub struct CallOp {
    ops: Vec<Op>
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DrawItem {
    pub rect: Rect,
    pub transform: Affine,
    pub color: Color
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct HitArea {
    pub rect: Rect,
    /// Maps the area's local space to window space.
    pub transform: Affine,
    pub tag: Tag,
    pub pass: bool
}

/// The resolved output of a frame. Both lists are ordered bottom to top.
#[derive(Clone, Default, Debug)]
pub struct DisplayList {
    pub items: Vec<DrawItem>,
    pub areas: Vec<HitArea>
}

struct Resolver<'a> {
    out: &'a mut DisplayList,
    stack: SmallVec<[Affine; 8]>,
    deferred: VecDeque<(Affine, &'a CallOp)>
}

impl Ops {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, op: Op) {
        self.list.push(op);
    }

    #[inline]
    pub fn push_transform(&mut self, transform: Affine) {
        self.list.push(Op::PushTransform(transform));
    }

    #[inline]
    pub fn push_offset(&mut self, offset: Point) {
        self.push_transform(Affine::offset(offset));
    }

    #[inline]
    pub fn pop_transform(&mut self) {
        self.list.push(Op::PopTransform);
    }

    #[inline]
    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.list.push(Op::Fill { rect, color });
    }

    #[inline]
    pub fn input_area(&mut self, rect: Rect, tag: Tag, pass: bool) {
        self.list.push(Op::InputArea { rect, tag, pass });
    }

    #[inline]
    pub fn call(&mut self, call: CallOp) {
        self.list.push(Op::Call(call));
    }

    #[inline]
    pub fn defer(&mut self, call: CallOp) {
        self.list.push(Op::Defer(call));
    }

    /// Starts recording. Everything added until [`Macro::stop`] is moved
    /// out of the list and into the returned [`CallOp`].
    #[inline]
    pub fn record(&self) -> Macro {
        Macro { start: self.list.len() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.list.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.list.iter()
    }

    /// Flattens the ops into a display list: the main pass first,
    /// followed by every deferred call in the order it was deferred.
    pub fn resolve(&self) -> DisplayList {
        let mut out = DisplayList::default();
        let mut resolver = Resolver {
            out: &mut out,
            stack: SmallVec::new(),
            deferred: VecDeque::new()
        };

        resolver.stack.push(Affine::IDENTITY);
        resolver.run(&self.list);

        while let Some((base, call)) = resolver.deferred.pop_front() {
            resolver.stack.clear();
            resolver.stack.push(base);
            resolver.run(&call.ops);
        }

        out
    }
}

impl Macro {
    pub fn stop(self, ops: &mut Ops) -> CallOp {
        let start = self.start.min(ops.list.len());

        CallOp { ops: ops.list.split_off(start) }
    }
}

impl CallOp {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }
}

impl<'a> Resolver<'a> {
    fn run(&mut self, ops: &'a [Op]) {
        let depth = self.stack.len();

        for op in ops {
            match op {
                Op::PushTransform(transform) => {
                    let current = self.current();
                    self.stack.push(transform.then(current));
                }
                Op::PopTransform => {
                    if self.stack.len() > depth {
                        self.stack.pop();
                    } else {
                        tracing::warn!("unbalanced transform pop ignored");
                    }
                }
                Op::Fill { rect, color } => {
                    if color.is_visible() {
                        self.out.items.push(DrawItem {
                            rect: *rect,
                            transform: self.current(),
                            color: *color
                        });
                    }
                }
                Op::InputArea { rect, tag, pass } => {
                    self.out.areas.push(HitArea {
                        rect: *rect,
                        transform: self.current(),
                        tag: *tag,
                        pass: *pass
                    });
                }
                Op::Call(call) => self.run(&call.ops),
                Op::Defer(call) => {
                    let current = self.current();
                    self.deferred.push_back((current, call));
                }
            }
        }

        self.stack.truncate(depth);
    }

    #[inline]
    fn current(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }
}
