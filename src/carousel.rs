//! Drag-driven rotating gallery.
//!
//! Items sit on a ring: item `i` starts at `i * -angle_step` degrees of Y
//! rotation with its transform origin pushed back a constant radius, which
//! bends the row into an arc. Dragging accumulates a scroll offset scalar
//! and every item's rotation is recomputed as
//! `index * -angle_step + scroll_offset`.
//!
//! The offset is unbounded on purpose: rotation wraps naturally through the
//! periodic transform, so there is nothing to clamp.
//!
//! # Quick Start
//!
//! ```ignore
//! use marquee::prelude::*;
//!
//! let mut carousel = Carousel::new(CarouselConfig::default());
//! carousel.apply(&mut renderer);          // initial arrangement
//!
//! // Per drag-move event:
//! carousel.drag_by(delta_px);
//! carousel.apply(&mut renderer);
//!
//! // On drag release:
//! carousel.release(&mut renderer);        // snaps the handle home
//! ```

use crate::renderer::{Renderer, Transform};

/// Carousel tuning and target naming.
///
/// `sensitivity` converts drag pixels into degrees of offset. Its value was
/// tuned by eye; it is carried as-is rather than re-derived.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Number of items on the ring.
    pub total: usize,
    /// Transform-origin depth in pixels; controls how curved the arc is.
    pub radius: f32,
    /// Degrees of scroll offset per pixel of drag.
    pub sensitivity: f32,
    /// Renderer target name for item `i`, formatted as `{item_prefix}{i}`.
    pub item_prefix: String,
    /// Renderer target name of the drag handle (a proxy control that is
    /// reset to the origin after every drag, never a moved element).
    pub handle_target: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            total: 10,
            radius: 800.0,
            sensitivity: 0.2,
            item_prefix: "item-".to_string(),
            handle_target: "dragger".to_string(),
        }
    }
}

/// The rotating gallery effect.
///
/// All visual state is derived from `scroll_offset` plus the fixed config;
/// items carry no per-item state beyond their index.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    scroll_offset: f32,
}

impl Carousel {
    /// Create a carousel at offset zero. An empty ring is clamped to one
    /// item so the angle step stays finite.
    pub fn new(mut config: CarouselConfig) -> Self {
        config.total = config.total.max(1);
        Self {
            config,
            scroll_offset: 0.0,
        }
    }

    /// Degrees between adjacent items.
    pub fn angle_step(&self) -> f32 {
        360.0 / self.config.total as f32
    }

    /// Current accumulated scroll offset in degrees.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Rotation of item `i` in degrees.
    pub fn rotation(&self, index: usize) -> f32 {
        index as f32 * -self.angle_step() + self.scroll_offset
    }

    /// Feed a drag delta in pixels. Positive deltas rotate the ring forward.
    pub fn drag_by(&mut self, delta_px: f32) {
        self.scroll_offset += delta_px * self.config.sensitivity;
    }

    /// Renderer target name of item `i`.
    pub fn item_target(&self, index: usize) -> String {
        format!("{}{}", self.config.item_prefix, index)
    }

    /// Apply every item's rotation around the fixed-radius origin.
    ///
    /// Direct sets, no easing: the drag path is frame-driven and needs
    /// frame-perfect positioning.
    pub fn apply<R: Renderer>(&self, renderer: &mut R) {
        for i in 0..self.config.total {
            renderer.apply_transform(
                &self.item_target(i),
                Transform::new()
                    .rotation_y(self.rotation(i))
                    .origin_depth(self.config.radius),
            );
        }
    }

    /// End a drag: snap the handle back to the origin.
    ///
    /// The ring keeps its offset; only the proxy control moves home.
    pub fn release<R: Renderer>(&self, renderer: &mut R) {
        renderer.apply_transform(&self.config.handle_target, Transform::at_origin());
    }
}
