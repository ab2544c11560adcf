//! Layout components for arranging UI elements.

pub mod container;

pub use container::{Alignment, Container, Direction, SizeConstraint};
