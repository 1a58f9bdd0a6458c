pub use contextual_core::*;
