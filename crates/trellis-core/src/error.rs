use thiserror::Error;

/// Failures surfaced through `Widget::update`.
///
/// A failing child aborts the layout pass of the subtree above it for the
/// current frame; nothing in the toolkit retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("grid overflow: {items} items exceed capacity of {capacity}")]
    GridOverflow { items: usize, capacity: usize },

    #[error("selection {index} is out of range for {len} children")]
    SelectionOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, UiError>;
