pub mod context_area;
pub mod clickable;
mod layout;

pub use layout::*;
pub use context_area::{ContextArea, Anchor, Transition, place_overlay};
pub use clickable::Clickable;
