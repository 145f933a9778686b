//! # Grid
//!
//! A fixed column template filled row by row, left to right.
//!
//! Each column is either `Fixed(px)` or `Ratio(r)`. Ratios are normalized to
//! sum to 1 and share whatever width is left after fixed columns and column
//! gaps. A row is as tall as its tallest child, so every row is laid out in
//! two passes: first all of its children are measured, then they are placed
//! using the row height for vertical justification.
//!
//! The reported height is the sum of all row heights plus the gaps between
//! rows. A ragged last row counts like any other.

use smallvec::SmallVec;
use trellis_core::*;

use crate::focus::FocusTracker;
use crate::layout::{Justify, Placed, render_all, route_all};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnWidth {
    /// Share of the width left over after fixed columns.
    Ratio(f32),
    Fixed(u32),
}

pub struct Grid<A> {
    columns: Vec<ColumnWidth>,
    items: Vec<Placed<A>>,
    padding_x: u32,
    padding_y: u32,
    justify: Justify,
    max_rows: Option<usize>,
    size: PixelSize,
    focus: FocusTracker,
    name: Option<&'static str>,
}

impl<A> Grid<A> {
    /// # Panics
    ///
    /// If `columns` is empty or any ratio is negative or not finite.
    pub fn new(columns: impl Into<Vec<ColumnWidth>>) -> Self {
        let mut columns = columns.into();
        assert!(!columns.is_empty(), "grid needs at least one column");

        let mut ratio_sum = 0.0f32;
        for c in &columns {
            if let ColumnWidth::Ratio(r) = c {
                assert!(r.is_finite() && *r >= 0.0, "invalid column ratio {r}");
                ratio_sum += *r;
            }
        }
        if ratio_sum > 0.0 {
            for c in &mut columns {
                if let ColumnWidth::Ratio(r) = c {
                    *r /= ratio_sum;
                }
            }
        }

        Self {
            columns,
            items: Vec::new(),
            padding_x: 0,
            padding_y: 0,
            justify: Justify::Start,
            max_rows: None,
            size: PixelSize::ZERO,
            focus: FocusTracker::default(),
            name: None,
        }
    }

    /// `n` equally wide columns.
    pub fn even(n: usize) -> Self {
        Self::new(vec![ColumnWidth::Ratio(1.0); n])
    }

    pub fn with_padding(mut self, x: u32, y: u32) -> Self {
        self.padding_x = x;
        self.padding_y = y;
        self
    }

    /// Vertical placement of a child shorter than its row.
    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Caps the row count; `update` fails once the children need more.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn push(&mut self, widget: impl Widget<A> + 'static) -> usize {
        self.items.push(Placed::new(Box::new(widget)));
        self.items.len() - 1
    }

    pub fn with(mut self, widget: impl Widget<A> + 'static) -> Self {
        self.push(widget);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn columns(&self) -> &[ColumnWidth] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns.len())
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus.focused()
    }

    pub fn child_bounds(&self, index: usize, bounds: PixelBBox) -> Option<PixelBBox> {
        self.items.get(index).map(|item| item.bounds(bounds))
    }

    /// Left edge and width of every column at the given total width.
    pub fn column_layout(&self, width: u32) -> SmallVec<[(u32, u32); 8]> {
        let gaps = self
            .padding_x
            .saturating_mul(self.columns.len().saturating_sub(1) as u32);
        let fixed: u32 = self
            .columns
            .iter()
            .map(|c| match c {
                ColumnWidth::Fixed(px) => *px,
                ColumnWidth::Ratio(_) => 0,
            })
            .fold(0u32, u32::saturating_add);
        let leftover = width.saturating_sub(fixed).saturating_sub(gaps);

        let mut x = 0u32;
        self.columns
            .iter()
            .map(|c| {
                let w = match c {
                    ColumnWidth::Fixed(px) => *px,
                    ColumnWidth::Ratio(r) => (leftover as f32 * r).floor() as u32,
                };
                let col = (x, w);
                x = x.saturating_add(w).saturating_add(self.padding_x);
                col
            })
            .collect()
    }

    fn has_ratio_column(&self) -> bool {
        self.columns
            .iter()
            .any(|c| matches!(c, ColumnWidth::Ratio(_)))
    }
}

impl<A> Widget<A> for Grid<A> {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn update(&mut self, available: PixelSize, dt: f32) -> Result<()> {
        let rows = self.rows();
        if let Some(max) = self.max_rows
            && rows > max
        {
            return Err(UiError::GridOverflow {
                items: self.items.len(),
                capacity: max.saturating_mul(self.columns.len()),
            });
        }

        let cols = self.column_layout(available.width);
        let justify = self.justify;
        let mut top = 0u32;
        let mut bottom = 0u32;
        for (row_index, row) in self.items.chunks_mut(cols.len()).enumerate() {
            if row_index > 0 {
                top = bottom.saturating_add(self.padding_y);
            }

            // measure
            let remaining = available.height.saturating_sub(top);
            let mut row_height = 0;
            for (item, &(_, w)) in row.iter_mut().zip(&cols) {
                item.widget.update(PixelSize::new(w, remaining), dt)?;
                row_height = row_height.max(item.widget.size().height);
            }

            // place
            for (item, &(x, _)) in row.iter_mut().zip(&cols) {
                let s = item.widget.size();
                let y = top.saturating_add(justify.offset(row_height, s.height));
                item.local = PixelBBox::at(
                    PixelPoint::new(x.min(i32::MAX as u32) as i32, y.min(i32::MAX as u32) as i32),
                    s,
                );
            }
            bottom = top.saturating_add(row_height);
        }

        let width = if self.has_ratio_column() {
            available.width
        } else {
            cols.last().map_or(0, |&(x, w)| x.saturating_add(w))
        };
        self.size = PixelSize::new(width, bottom);
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext<'_>, widget_bounds: PixelBBox, window_bounds: PixelBBox) {
        render_all(&self.items, ctx, widget_bounds, window_bounds);
    }

    fn set_input_state(
        &mut self,
        widget_bounds: PixelBBox,
        input_bounds: PixelBBox,
        input: &InputState,
    ) -> InputResponse<A> {
        route_all(&mut self.items, &mut self.focus, widget_bounds, input_bounds, input)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focus.forward(focused, &mut self.items);
    }

    fn reset(&mut self) {
        for item in &mut self.items {
            item.widget.reset();
        }
    }

    fn debug_name(&self) -> Option<&str> {
        self.name.or(Some("grid"))
    }
}
