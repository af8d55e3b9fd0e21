//! Rendering backend seam.
//!
//! Effects never touch a drawing surface directly. They emit commands through
//! the [`Renderer`] trait: immediate-mode primitives for the particle field
//! (`clear`, `draw_circle`, `draw_line`) and declarative property sets for
//! element-style targets (`apply_transform`). Backends decide what a "target"
//! is: the CPU raster backend retains transforms in a map, a DOM-style host
//! would move real elements.
//!
//! Transforms are applied as direct sets, never eased. The per-frame driven
//! paths (drag updates, scroll progress) require frame-perfect positioning.
//!
//! # Usage
//!
//! ```ignore
//! use marquee::prelude::*;
//!
//! let mut recorder = RecordingRenderer::new();
//! field.render(&mut recorder);
//! assert!(recorder.circles().len() > 0);
//! ```

use glam::Vec2;

/// Declarative property targets for a named element.
///
/// Only the properties that are `Some` are applied; everything else on the
/// target is left untouched. Mirrors a tweening library's "set" call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Rotation around the Y axis, in degrees.
    pub rotation_y: Option<f32>,
    /// Horizontal translation in pixels.
    pub x: Option<f32>,
    /// Vertical translation in pixels.
    pub y: Option<f32>,
    /// Transform-origin depth in pixels (the Z distance of the rotation
    /// pivot). A constant depth across items produces a carousel arc.
    pub origin_depth: Option<f32>,
    /// Height as a percentage of the target's container (progress fills).
    pub height_percent: Option<f32>,
}

impl Transform {
    /// Create an empty transform (applies nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Y-axis rotation in degrees.
    pub fn rotation_y(mut self, degrees: f32) -> Self {
        self.rotation_y = Some(degrees);
        self
    }

    /// Set the horizontal translation in pixels.
    pub fn x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    /// Set the vertical translation in pixels.
    pub fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    /// Set the transform-origin depth in pixels.
    pub fn origin_depth(mut self, depth: f32) -> Self {
        self.origin_depth = Some(depth);
        self
    }

    /// Set the fill height percentage.
    pub fn height_percent(mut self, percent: f32) -> Self {
        self.height_percent = Some(percent);
        self
    }

    /// A transform that resets translation to the origin.
    pub fn at_origin() -> Self {
        Self::new().x(0.0).y(0.0)
    }

    /// Merge another transform on top of this one. Properties set in `other`
    /// win; unset properties keep their current value.
    pub fn merged(self, other: Transform) -> Self {
        Self {
            rotation_y: other.rotation_y.or(self.rotation_y),
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            origin_depth: other.origin_depth.or(self.origin_depth),
            height_percent: other.height_percent.or(self.height_percent),
        }
    }
}

/// Drawing and transform backend for effects.
///
/// Coordinates are in pixels with the origin at the top-left, matching the
/// viewport the effects were measured against.
pub trait Renderer {
    /// Clear the drawing surface to the background color.
    fn clear(&mut self);

    /// Draw a filled circle at the given opacity (0.0 to 1.0).
    fn draw_circle(&mut self, center: Vec2, radius: f32, opacity: f32);

    /// Draw a line segment of the given width at the given opacity.
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, opacity: f32);

    /// Apply a declarative transform to a named target, immediately.
    fn apply_transform(&mut self, target: &str, transform: Transform);
}

/// A single recorded renderer command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        opacity: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        opacity: f32,
    },
    Transform {
        target: String,
        transform: Transform,
    },
}

/// Backend that records every command for inspection.
///
/// Used by tests to assert on what an effect drew without rasterizing
/// anything. Commands are kept in submission order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<Command>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands in submission order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Every recorded circle as `(center, radius, opacity)`.
    pub fn circles(&self) -> Vec<(Vec2, f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Circle {
                    center,
                    radius,
                    opacity,
                } => Some((*center, *radius, *opacity)),
                _ => None,
            })
            .collect()
    }

    /// Every recorded line as `(from, to, opacity)`.
    pub fn lines(&self) -> Vec<(Vec2, Vec2, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Line {
                    from, to, opacity, ..
                } => Some((*from, *to, *opacity)),
                _ => None,
            })
            .collect()
    }

    /// The last transform applied to a target, if any.
    pub fn transform(&self, target: &str) -> Option<Transform> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Transform { target: t, transform } if t == target => Some(*transform),
            _ => None,
        })
    }

    /// Number of `clear` calls recorded.
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Clear))
            .count()
    }

    /// Drop all recorded commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, opacity: f32) {
        self.commands.push(Command::Circle {
            center,
            radius,
            opacity,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, opacity: f32) {
        self.commands.push(Command::Line {
            from,
            to,
            width,
            opacity,
        });
    }

    fn apply_transform(&mut self, target: &str, transform: Transform) {
        self.commands.push(Command::Transform {
            target: target.to_string(),
            transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_builder() {
        let t = Transform::new().rotation_y(36.0).origin_depth(800.0);
        assert_eq!(t.rotation_y, Some(36.0));
        assert_eq!(t.origin_depth, Some(800.0));
        assert_eq!(t.x, None);
    }

    #[test]
    fn test_transform_merge() {
        let base = Transform::new().x(10.0).y(20.0);
        let overlay = Transform::new().x(0.0);
        let merged = base.merged(overlay);
        assert_eq!(merged.x, Some(0.0));
        assert_eq!(merged.y, Some(20.0));
    }

    #[test]
    fn test_recorder_queries() {
        let mut r = RecordingRenderer::new();
        r.clear();
        r.draw_circle(Vec2::new(1.0, 2.0), 3.0, 0.5);
        r.draw_line(Vec2::ZERO, Vec2::ONE, 0.5, 0.1);
        r.apply_transform("ring", Transform::new().rotation_y(12.0));
        r.apply_transform("ring", Transform::new().rotation_y(24.0));

        assert_eq!(r.clear_count(), 1);
        assert_eq!(r.circles().len(), 1);
        assert_eq!(r.lines().len(), 1);
        // Last write wins.
        assert_eq!(r.transform("ring").unwrap().rotation_y, Some(24.0));
        assert_eq!(r.transform("missing"), None);
    }
}
