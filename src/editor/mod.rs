//! Text buffer for the surface's editable region.
//!
//! Provides a rope-backed buffer with a caret, used by
//! [`HtmlSurface`](crate::surface::HtmlSurface) for native key handling.

mod buffer;

pub use buffer::{Caret, Direction, RegionBuffer};
