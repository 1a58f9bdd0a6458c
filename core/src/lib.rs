pub mod widget;
pub mod input;
pub mod ops;
mod frame;
mod geometry;
mod color;
mod renderer;

pub use frame::*;
pub use geometry::*;
pub use color::*;
pub use renderer::*;
pub use input::{Tag, Buttons, Kinds, PointerKind, PointerInput, PointerEvent, Filter};
pub use ops::{Ops, DisplayList};
pub use tiny_skia;
