//! Scroll-pinned horizontal card showcase.
//!
//! An external scroll-pin mechanism freezes the section in place and reports
//! a normalized progress scalar per update tick. Everything visual is a pure
//! function of that scalar plus cached layout measurements: the card track
//! slides left, the stacked counter slides up, exactly one card and counter
//! are marked active, and a progress rail fills top to bottom.
//!
//! # Quick Start
//!
//! ```ignore
//! use marquee::prelude::*;
//!
//! let mut showcase = Showcase::new(5, Layout { step: 436.0, number_height: 160.0 });
//! pin.register(showcase.pin_region());
//!
//! // Per progress tick from the pin mechanism:
//! let frame = showcase.frame(progress);
//! showcase.apply(&mut renderer, &frame);
//!
//! // On viewport resize:
//! showcase.resize(measure(), &mut pin);
//! ```

use crate::renderer::{Renderer, Transform};

/// Cached layout measurements, recomputed by the host on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Horizontal distance between adjacent cards (card width plus gap).
    pub step: f32,
    /// Height of one stacked counter numeral.
    pub number_height: f32,
}

/// Pin registration: the travel distance over which the section stays
/// frozen while progress runs 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinRegion {
    /// Travel offset where pinning begins.
    pub start: f32,
    /// Travel offset where pinning ends.
    pub end: f32,
}

/// External scroll-pin collaborator.
///
/// Supplies progress ticks (outside this crate's control) and recomputes its
/// internal scroll length on [`refresh`](Self::refresh) so a resized layout
/// stays synchronized with content width.
pub trait ScrollPin {
    /// Register the pin region for the showcase section.
    fn register(&mut self, region: PinRegion);

    /// Recompute scroll length after layout changes.
    fn refresh(&mut self);
}

/// One derived showcase frame. Everything here is a function of the
/// progress scalar; nothing persists between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowcaseFrame {
    /// Horizontal card-track translation in pixels (moves left).
    pub track_x: f32,
    /// Vertical counter-stack translation in pixels (moves up).
    pub stack_y: f32,
    /// Index of the card nearest the current progress.
    pub active: usize,
    /// Progress-rail fill height, 0 to 100.
    pub fill_percent: f32,
}

/// Renderer target names for the showcase elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseTargets {
    /// The sliding card track.
    pub track: String,
    /// The stacked counter numerals.
    pub stack: String,
    /// The progress rail fill.
    pub fill: String,
}

impl Default for ShowcaseTargets {
    fn default() -> Self {
        Self {
            track: "cards-track".to_string(),
            stack: "count-stack".to_string(),
            fill: "rail-fill".to_string(),
        }
    }
}

/// The scroll showcase effect.
///
/// Holds only the card count and cached layout; the driving progress scalar
/// is owned by the external pin mechanism.
#[derive(Debug, Clone)]
pub struct Showcase {
    cards: usize,
    layout: Layout,
    targets: ShowcaseTargets,
}

impl Showcase {
    /// Create a showcase over `cards` cards with measured layout.
    pub fn new(cards: usize, layout: Layout) -> Self {
        Self {
            cards: cards.max(1),
            layout,
            targets: ShowcaseTargets::default(),
        }
    }

    /// Override the renderer target names.
    pub fn with_targets(mut self, targets: ShowcaseTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Number of cards.
    pub fn cards(&self) -> usize {
        self.cards
    }

    /// Current layout measurements.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Total travel distance: one step per card transition.
    pub fn total_travel(&self) -> f32 {
        self.layout.step * (self.cards - 1) as f32
    }

    /// The pin registration for this showcase: pin from the section top for
    /// the full travel distance.
    pub fn pin_region(&self) -> PinRegion {
        PinRegion {
            start: 0.0,
            end: self.total_travel(),
        }
    }

    /// Derive a frame from progress `p` in [0, 1].
    ///
    /// `raw = p * (cards - 1)` spans the card range; the active index rounds
    /// `raw` to the nearest card, midpoints rounding up.
    pub fn frame(&self, progress: f32) -> ShowcaseFrame {
        let raw = progress * (self.cards - 1) as f32;
        ShowcaseFrame {
            track_x: -raw * self.layout.step,
            stack_y: -raw * self.layout.number_height,
            active: (raw.round() as usize).min(self.cards - 1),
            fill_percent: progress * 100.0,
        }
    }

    /// Boolean active marker per card: exactly one `true`.
    pub fn active_flags(&self, frame: &ShowcaseFrame) -> Vec<bool> {
        (0..self.cards).map(|i| i == frame.active).collect()
    }

    /// Push a derived frame to the renderer: track x, stack y, fill height.
    /// Direct sets for frame-perfect positioning under scrubbing.
    pub fn apply<R: Renderer>(&self, renderer: &mut R, frame: &ShowcaseFrame) {
        renderer.apply_transform(&self.targets.track, Transform::new().x(frame.track_x));
        renderer.apply_transform(&self.targets.stack, Transform::new().y(frame.stack_y));
        renderer.apply_transform(
            &self.targets.fill,
            Transform::new().height_percent(frame.fill_percent),
        );
    }

    /// Swap in fresh measurements after a viewport resize and refresh the
    /// pin mechanism so its scroll length tracks the new content width.
    pub fn resize<P: ScrollPin>(&mut self, layout: Layout, pin: &mut P) {
        self.layout = layout;
        pin.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;

    const LAYOUT: Layout = Layout {
        step: 436.0,
        number_height: 160.0,
    };

    #[derive(Default)]
    struct FakePin {
        region: Option<PinRegion>,
        refreshes: usize,
    }

    impl ScrollPin for FakePin {
        fn register(&mut self, region: PinRegion) {
            self.region = Some(region);
        }

        fn refresh(&mut self) {
            self.refreshes += 1;
        }
    }

    #[test]
    fn test_midpoint_progress_activates_middle_card() {
        let showcase = Showcase::new(5, LAYOUT);
        let frame = showcase.frame(0.5);

        // raw = 0.5 * 4 = 2 exactly.
        assert_eq!(frame.active, 2);
        assert!((frame.track_x - -2.0 * 436.0).abs() < 0.001);
        assert!((frame.stack_y - -2.0 * 160.0).abs() < 0.001);

        let flags = showcase.active_flags(&frame);
        assert_eq!(flags, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_fill_percent_endpoints() {
        let showcase = Showcase::new(5, LAYOUT);
        assert_eq!(showcase.frame(0.0).fill_percent, 0.0);
        assert_eq!(showcase.frame(1.0).fill_percent, 100.0);
    }

    #[test]
    fn test_midpoints_round_up() {
        let showcase = Showcase::new(5, LAYOUT);
        // raw = 0.375 * 4 = 1.5: ties go to the higher card.
        assert_eq!(showcase.frame(0.375).active, 2);
        // Just below the midpoint stays low.
        assert_eq!(showcase.frame(0.37).active, 1);
    }

    #[test]
    fn test_extremes_clamp_to_card_range() {
        let showcase = Showcase::new(5, LAYOUT);
        assert_eq!(showcase.frame(0.0).active, 0);
        assert_eq!(showcase.frame(1.0).active, 4);
    }

    #[test]
    fn test_pin_region_spans_total_travel() {
        let showcase = Showcase::new(5, LAYOUT);
        let region = showcase.pin_region();
        assert_eq!(region.start, 0.0);
        assert!((region.end - 436.0 * 4.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_updates_layout_and_refreshes_pin() {
        let mut showcase = Showcase::new(5, LAYOUT);
        let mut pin = FakePin::default();
        pin.register(showcase.pin_region());

        let narrow = Layout {
            step: 300.0,
            number_height: 120.0,
        };
        showcase.resize(narrow, &mut pin);

        assert_eq!(showcase.layout(), narrow);
        assert_eq!(pin.refreshes, 1);
        assert!((showcase.total_travel() - 1200.0).abs() < 0.001);
    }

    #[test]
    fn test_apply_pushes_three_targets() {
        let showcase = Showcase::new(5, LAYOUT);
        let frame = showcase.frame(0.25);

        let mut recorder = RecordingRenderer::new();
        showcase.apply(&mut recorder, &frame);

        assert_eq!(
            recorder.transform("cards-track").unwrap().x,
            Some(frame.track_x)
        );
        assert_eq!(
            recorder.transform("count-stack").unwrap().y,
            Some(frame.stack_y)
        );
        assert_eq!(
            recorder.transform("rail-fill").unwrap().height_percent,
            Some(25.0)
        );
    }

    #[test]
    fn test_single_card_degenerates_gracefully() {
        let showcase = Showcase::new(1, LAYOUT);
        let frame = showcase.frame(0.7);
        assert_eq!(frame.active, 0);
        assert_eq!(frame.track_x, 0.0);
        assert_eq!(showcase.total_travel(), 0.0);
    }
}
