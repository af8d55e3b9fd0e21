//! Pointer and drag input for effects.
//!
//! [`Input`] is a thin abstraction over raw window events. Mouse and touch
//! are collapsed into a single pointer stream: a touch contact behaves like
//! a held left button, and both are normalized to one client coordinate
//! before any delta computation.
//!
//! [`DragTracker`] implements the drag contract the carousel relies on:
//! anchor at the rounded x coordinate on drag start, emit rounded-x deltas
//! per move, and report the release so the handle reset can fire.
//!
//! # Usage
//!
//! ```ignore
//! // In the window event handler:
//! input.handle_event(&event);
//!
//! // Per frame:
//! if let Some(delta) = input.drag_delta() {
//!     carousel.drag_by(delta);
//!     carousel.apply(&mut renderer);
//! }
//! if input.drag_released() {
//!     carousel.release(&mut renderer);
//! }
//! input.end_frame();
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-move drag delta computation against a rounded-x anchor.
///
/// The anchor snaps to whole pixels so repeated sub-pixel moves cannot
/// accumulate rounding drift into the scroll offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragTracker {
    anchor_x: Option<f32>,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.anchor_x.is_some()
    }

    /// Begin a drag at the given client x coordinate.
    pub fn begin(&mut self, x: f32) {
        self.anchor_x = Some(x.round());
    }

    /// Feed a move. Returns the rounded delta since the last sample, or
    /// `None` when no drag is in progress.
    pub fn update(&mut self, x: f32) -> Option<f32> {
        let anchor = self.anchor_x?;
        let rounded = x.round();
        self.anchor_x = Some(rounded);
        Some(rounded - anchor)
    }

    /// End the drag. Returns `true` if one was in progress (the caller
    /// should reset the drag handle to its origin).
    pub fn end(&mut self) -> bool {
        self.anchor_x.take().is_some()
    }
}

/// Input state tracking for the pointer and the demo's few keys.
///
/// Instantaneous events (released this frame, key pressed this frame) are
/// cleared by [`end_frame`](Self::end_frame); continuous state (position,
/// held) persists.
#[derive(Debug, Default)]
pub struct Input {
    pointer_position: Vec2,
    pointer_present: bool,
    pointer_held: bool,
    drag: DragTracker,
    drag_delta: Option<f32>,
    drag_released: bool,
    pause_pressed: bool,
    quit_pressed: bool,
}

impl Input {
    /// Create an idle input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest normalized pointer position in pixels.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    /// The pointer position, or `None` before the first pointer event or
    /// after the cursor left the surface.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer_present.then_some(self.pointer_position)
    }

    /// Whether the pointer is currently down (mouse button or touch
    /// contact).
    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    /// Accumulated drag delta this frame, if dragging.
    pub fn drag_delta(&self) -> Option<f32> {
        self.drag_delta
    }

    /// Whether a drag ended this frame.
    pub fn drag_released(&self) -> bool {
        self.drag_released
    }

    /// Whether the pause key (space) was pressed this frame.
    pub fn pause_pressed(&self) -> bool {
        self.pause_pressed
    }

    /// Whether the quit key (escape) was pressed this frame.
    pub fn quit_pressed(&self) -> bool {
        self.quit_pressed
    }

    /// Clear per-frame state. Call once after consuming input each frame.
    pub fn end_frame(&mut self) {
        self.drag_delta = None;
        self.drag_released = false;
        self.pause_pressed = false;
        self.quit_pressed = false;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.pointer_down(self.pointer_position),
                        ElementState::Released => self.pointer_up(),
                    }
                }
            }

            WindowEvent::CursorLeft { .. } => self.pointer_left(),

            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => self.pointer_down(position),
                    TouchPhase::Moved => self.pointer_moved(position),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.pointer_up(),
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Space) => self.pause_pressed = true,
                        PhysicalKey::Code(KeyCode::Escape) => self.quit_pressed = true,
                        _ => {}
                    }
                }
            }

            _ => {}
        }
    }

    // ========== Normalized pointer stream ==========

    fn pointer_down(&mut self, position: Vec2) {
        self.pointer_position = position;
        self.pointer_present = true;
        self.pointer_held = true;
        self.drag.begin(position.x);
    }

    fn pointer_moved(&mut self, position: Vec2) {
        self.pointer_position = position;
        self.pointer_present = true;
        if self.pointer_held {
            if let Some(delta) = self.drag.update(position.x) {
                *self.drag_delta.get_or_insert(0.0) += delta;
            }
        }
    }

    fn pointer_left(&mut self) {
        self.pointer_present = false;
    }

    fn pointer_up(&mut self) {
        self.pointer_held = false;
        if self.drag.end() {
            self.drag_released = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_tracker_rounded_deltas() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.update(100.0), None);

        drag.begin(100.4);
        // Anchor rounds to 100; 150.6 rounds to 151.
        assert_eq!(drag.update(150.6), Some(51.0));
        assert_eq!(drag.update(131.0), Some(-20.0));
        assert!(drag.end());
        assert!(!drag.end());
    }

    #[test]
    fn test_pointer_stream_mouse() {
        let mut input = Input::new();
        input.pointer_moved(Vec2::new(100.0, 50.0));
        input.pointer_down(input.pointer_position());
        input.pointer_moved(Vec2::new(150.0, 50.0));
        input.pointer_moved(Vec2::new(130.0, 50.0));

        // Deltas accumulate within a frame: +50 then -20.
        assert_eq!(input.drag_delta(), Some(30.0));
        assert!(input.pointer_held());

        input.pointer_up();
        assert!(input.drag_released());

        input.end_frame();
        assert_eq!(input.drag_delta(), None);
        assert!(!input.drag_released());
    }

    #[test]
    fn test_touch_normalizes_to_pointer() {
        let mut input = Input::new();
        input.pointer_down(Vec2::new(200.0, 300.0));
        assert!(input.pointer_held());
        assert_eq!(input.pointer_position(), Vec2::new(200.0, 300.0));

        input.pointer_moved(Vec2::new(240.0, 300.0));
        assert_eq!(input.drag_delta(), Some(40.0));

        input.pointer_up();
        assert!(!input.pointer_held());
        assert!(input.drag_released());
    }

    #[test]
    fn test_pointer_absent_until_first_event() {
        let mut input = Input::new();
        assert_eq!(input.pointer(), None);

        input.pointer_moved(Vec2::new(30.0, 40.0));
        assert_eq!(input.pointer(), Some(Vec2::new(30.0, 40.0)));

        input.pointer_left();
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn test_move_without_press_is_not_a_drag() {
        let mut input = Input::new();
        input.pointer_moved(Vec2::new(10.0, 10.0));
        input.pointer_moved(Vec2::new(90.0, 10.0));
        assert_eq!(input.drag_delta(), None);
        assert!(!input.drag_released());
    }
}
