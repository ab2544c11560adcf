//! Container layout with flexible sizing and alignment.
//!
//! The container computes child slot rectangles; pages own the actual
//! widgets and copy the computed bounds onto them after layout. This keeps
//! the container free of generics over widget types.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::ui::styling::Padding;

/// Cross-axis alignment of children (perpendicular to the layout direction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// Left for vertical layout, top for horizontal
    Start,
    Center,
    /// Right for vertical layout, bottom for horizontal
    End,
    /// Fill the available cross-axis space
    Stretch,
}

/// Main-axis direction children are laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// How a child's main-axis size is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeConstraint {
    /// Keep the size the child was added with
    Fit,
    /// Share the remaining space equally with the other `Expand` children
    Expand,
    /// Fixed size in pixels
    Fixed(u32),
}

struct ChildSlot {
    bounds: Rectangle,
    constraint: SizeConstraint,
}

/// Arranges up to `N` child slots along one axis.
pub struct Container<const N: usize> {
    bounds: Rectangle,
    direction: Direction,
    alignment: Alignment,
    spacing: u32,
    padding: Padding,
    children: Vec<ChildSlot, N>,
}

impl<const N: usize> Container<N> {
    pub fn new(bounds: Rectangle, direction: Direction) -> Self {
        Self {
            bounds,
            direction,
            alignment: Alignment::Start,
            spacing: 0,
            padding: Padding::default(),
            children: Vec::new(),
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Gap between consecutive children along the main axis.
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Space between the container's edge and its children.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Add a child slot and recompute the layout.
    ///
    /// Returns the slot index, or an error once the container is full.
    pub fn add_child(&mut self, size: Size, constraint: SizeConstraint) -> Result<usize, ()> {
        let child = ChildSlot {
            bounds: Rectangle::new(self.bounds.top_left, size),
            constraint,
        };
        self.children.push(child).map_err(|_| ())?;
        self.layout();
        Ok(self.children.len() - 1)
    }

    /// Computed bounds of the child slot at `index`.
    pub fn child_bounds(&self, index: usize) -> Option<Rectangle> {
        self.children.get(index).map(|c| c.bounds)
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn layout(&mut self) {
        if self.children.is_empty() {
            return;
        }

        let available_width = self
            .bounds
            .size
            .width
            .saturating_sub(self.padding.horizontal());
        let available_height = self
            .bounds
            .size
            .height
            .saturating_sub(self.padding.vertical());
        let start = Point::new(
            self.bounds.top_left.x + self.padding.left as i32,
            self.bounds.top_left.y + self.padding.top as i32,
        );

        let (main_avail, cross_avail) = match self.direction {
            Direction::Horizontal => (available_width, available_height),
            Direction::Vertical => (available_height, available_width),
        };

        // Fixed and Fit sizes are reserved first; Expand children share what
        // remains after spacing.
        let total_spacing = self.spacing * (self.children.len().saturating_sub(1)) as u32;
        let mut reserved = 0u32;
        let mut expand_count = 0usize;
        for child in &self.children {
            match child.constraint {
                SizeConstraint::Fixed(size) => reserved += size,
                SizeConstraint::Fit => reserved += self.main_size(child.bounds.size),
                SizeConstraint::Expand => expand_count += 1,
            }
        }

        let remaining = main_avail.saturating_sub(reserved).saturating_sub(total_spacing);
        let expand_size = if expand_count > 0 {
            remaining / expand_count as u32
        } else {
            0
        };

        let mut cursor = match self.direction {
            Direction::Horizontal => start.x,
            Direction::Vertical => start.y,
        };

        for i in 0..self.children.len() {
            let main_size = match self.children[i].constraint {
                SizeConstraint::Fixed(size) => size,
                SizeConstraint::Fit => self.main_size(self.children[i].bounds.size),
                SizeConstraint::Expand => expand_size,
            };

            let cross_size = match self.alignment {
                Alignment::Stretch => cross_avail,
                _ => self.cross_size(self.children[i].bounds.size).min(cross_avail),
            };

            let cross_offset = match self.alignment {
                Alignment::Start | Alignment::Stretch => 0,
                Alignment::Center => ((cross_avail - cross_size) / 2) as i32,
                Alignment::End => (cross_avail - cross_size) as i32,
            };

            self.children[i].bounds = match self.direction {
                Direction::Horizontal => Rectangle::new(
                    Point::new(cursor, start.y + cross_offset),
                    Size::new(main_size, cross_size),
                ),
                Direction::Vertical => Rectangle::new(
                    Point::new(start.x + cross_offset, cursor),
                    Size::new(cross_size, main_size),
                ),
            };

            cursor += main_size as i32 + self.spacing as i32;
        }
    }

    fn main_size(&self, size: Size) -> u32 {
        match self.direction {
            Direction::Horizontal => size.width,
            Direction::Vertical => size.height,
        }
    }

    fn cross_size(&self, size: Size) -> u32 {
        match self.direction {
            Direction::Horizontal => size.height,
            Direction::Vertical => size.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(320, 240))
    }

    #[test]
    fn test_fixed_children_stack_with_spacing() {
        let mut container = Container::<4>::new(screen(), Direction::Vertical)
            .with_alignment(Alignment::Stretch)
            .with_spacing(10);

        let first = container
            .add_child(Size::new(320, 30), SizeConstraint::Fixed(30))
            .unwrap();
        let second = container
            .add_child(Size::new(320, 40), SizeConstraint::Fixed(40))
            .unwrap();

        let first_bounds = container.child_bounds(first).unwrap();
        let second_bounds = container.child_bounds(second).unwrap();

        assert_eq!(first_bounds.top_left, Point::zero());
        assert_eq!(first_bounds.size, Size::new(320, 30));
        assert_eq!(second_bounds.top_left, Point::new(0, 40));
    }

    #[test]
    fn test_expand_children_share_remaining_space() {
        let mut container =
            Container::<4>::new(screen(), Direction::Vertical).with_alignment(Alignment::Stretch);

        let _ = container.add_child(Size::new(320, 40), SizeConstraint::Fixed(40));
        let a = container
            .add_child(Size::zero(), SizeConstraint::Expand)
            .unwrap();
        let b = container
            .add_child(Size::zero(), SizeConstraint::Expand)
            .unwrap();

        assert_eq!(container.child_bounds(a).unwrap().size.height, 100);
        assert_eq!(container.child_bounds(b).unwrap().size.height, 100);
    }

    #[test]
    fn test_horizontal_row_splits_width() {
        let row = Rectangle::new(Point::new(0, 200), Size::new(320, 40));
        let mut container = Container::<2>::new(row, Direction::Horizontal)
            .with_alignment(Alignment::Stretch)
            .with_spacing(20);

        let left = container
            .add_child(Size::zero(), SizeConstraint::Expand)
            .unwrap();
        let right = container
            .add_child(Size::zero(), SizeConstraint::Expand)
            .unwrap();

        assert_eq!(
            container.child_bounds(left).unwrap(),
            Rectangle::new(Point::new(0, 200), Size::new(150, 40))
        );
        assert_eq!(
            container.child_bounds(right).unwrap().top_left,
            Point::new(170, 200)
        );
    }
}
