//! Containers, overlays and leaf helpers.
//!
//! Every type here implements [`trellis_core::Widget`] and owns its children
//! as `Box<dyn Widget<A>>`. Containers differ only in how they hand out
//! space and route input:
//!
//! | container | layout | input routing |
//! |---|---|---|
//! | [`Stack`] | overlapping, per-child placement | topmost first, stops at first consumer |
//! | [`Layout`] | cursor along one axis + padding | every child, in order |
//! | [`Grid`] | column template, two passes per row | every child, in order |
//! | [`EvenVertLayout`] | equal height slots | every child, in order |
//! | [`ScrollView`] | one child, clipped + scrollbar | scrollbar, wheel, then child |
//! | [`PopupLayer`] | one floating child, healed into view | child only; outside press closes |
//! | [`DragLayer`] | a borrowed widget under the pointer | none |
//!
//! ```rust
//! use trellis_core::*;
//! use trellis_ui::*;
//!
//! let mut root: Stack<()> = Stack::new()
//!     .with(ColorRect::new(Color::from_hex("#202020")), StackLayout::Fill)
//!     .with(
//!         Layout::vertical()
//!             .with_padding(4)
//!             .with(ColorRect::fixed(Color::WHITE, PixelSize::new(40, 10)))
//!             .with(ColorRect::fixed(Color::WHITE, PixelSize::new(60, 10))),
//!         StackLayout::Centered,
//!     );
//! root.update(PixelSize::new(320, 240), 0.016).unwrap();
//! assert_eq!(root.size(), PixelSize::new(60, 24));
//! ```

pub mod drag;
pub mod focus;
pub mod grid;
pub mod label;
pub mod layout;
pub mod leaf;
pub mod one_of;
pub mod popup;
pub mod scroll;
pub mod scrollbar;
pub mod shared;
pub mod stack;

#[cfg(test)]
mod probe;

pub use drag::DragLayer;
pub use focus::{FocusTracker, Slot};
pub use grid::{ColumnWidth, Grid};
pub use label::Label;
pub use layout::{Direction, EvenVertLayout, Justify, Layout};
pub use leaf::{ColorRect, Null, SizedBox};
pub use one_of::OneOf;
pub use popup::PopupLayer;
pub use scroll::ScrollView;
pub use scrollbar::{Scrollbar, ScrollbarState};
pub use shared::{Shared, WidgetRef};
pub use stack::{Stack, StackLayout};
