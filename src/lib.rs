//! # marquee
//!
//! Pointer-driven showcase effects with a simple, testable core.
//!
//! Three independent effects, each a pure function of one driving scalar
//! plus fixed configuration:
//!
//! - [`Carousel`]: a drag-driven 3D image ring. Drag pixels accumulate a
//!   scroll offset and every item's Y rotation is recomputed around a
//!   fixed-radius arc.
//! - [`ParticleField`]: a capped population of particles pulled toward a
//!   logotype attractor row, repelled by the pointer, and linked by
//!   proximity-faded connection lines.
//! - [`Showcase`]: a scroll-pinned card row. An external pin mechanism
//!   reports progress, and track position, counter position, active index,
//!   and rail fill are all derived from it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use marquee::prelude::*;
//!
//! fn main() -> Result<(), marquee::error::RunnerError> {
//!     Runner::new()
//!         .with_title("particle field")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Renderers
//!
//! Effects draw through the [`Renderer`] trait: primitive `clear` /
//! `draw_circle` / `draw_line` calls plus declarative
//! [`Transform`](renderer::Transform) sets on named targets. Backends:
//! [`PixelSurface`] rasterizes to an RGBA buffer for the GPU blit;
//! [`RecordingRenderer`](renderer::RecordingRenderer) captures commands for
//! assertions.
//!
//! ### Deterministic driving
//!
//! Nothing schedules itself. [`FrameClock`](time::FrameClock) owns
//! start/stop and can be advanced synthetically, the field takes an
//! explicit seed, and every effect exposes its update as a plain method
//! call, so a test can step a thousand frames without a window.
//!
//! | Effect | Driving scalar | Update call |
//! |--------|----------------|-------------|
//! | [`Carousel`] | drag delta (px) | [`Carousel::drag_by`] |
//! | [`ParticleField`] | animation clock | [`ParticleField::update`] |
//! | [`Showcase`] | pin progress | [`Showcase::frame`] |

pub mod carousel;
pub mod error;
pub mod field;
pub mod input;
pub mod raster;
pub mod renderer;
pub mod showcase;
pub mod spawn;
pub mod time;
pub mod window;

pub use carousel::{Carousel, CarouselConfig};
pub use field::{Attractor, FieldConfig, Particle, ParticleField};
pub use glam::Vec2;
pub use input::{DragTracker, Input};
pub use raster::{PixelSurface, Rgba};
pub use renderer::{Renderer, Transform};
pub use showcase::{Layout, PinRegion, ScrollPin, Showcase, ShowcaseFrame};
pub use spawn::SpawnContext;
pub use window::Runner;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use marquee::prelude::*;
/// ```
pub mod prelude {
    pub use crate::carousel::{Carousel, CarouselConfig};
    pub use crate::field::{Attractor, FieldConfig, Particle, ParticleField};
    pub use crate::input::{DragTracker, Input};
    pub use crate::raster::{PixelSurface, Rgba};
    pub use crate::renderer::{RecordingRenderer, Renderer, Transform};
    pub use crate::showcase::{Layout, PinRegion, ScrollPin, Showcase, ShowcaseFrame};
    pub use crate::spawn::SpawnContext;
    pub use crate::time::FrameClock;
    pub use crate::window::Runner;
    pub use crate::Vec2;
}
