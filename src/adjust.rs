//! Viewport containment: nudge an element's inline-start margin one pixel
//! per animation frame until it stops overflowing the viewport horizontally.
//!
//! The adjuster is a host-agnostic state machine. The host supplies the
//! element ([`Target`]), the live viewport width ([`Viewport`]), and
//! animation-frame scheduling ([`FrameScheduler`]), then calls
//! [`ContainmentAdjuster::run_pass`] from each frame callback it was asked
//! to schedule.
//!
//! ```text
//!   attach ──► offset = -(natural_width / 2)
//!                │
//!   resize / toggle ──► request_recheck ──► [frame] ──► run_pass
//!                                              ▲            │
//!                                              └── Moved ◄──┤ left < 0: +1
//!                                                           │ right > vw: -1
//!                                                Settled ◄──┘ inside / pinned
//! ```
//!
//! # Example
//!
//! ```
//! use keepinside::{Bounds, Config, ContainmentAdjuster, FrameScheduler, Target};
//!
//! struct Panel { left: f64, width: f64, margin: i32 }
//!
//! impl Target for Panel {
//!     fn natural_width(&self) -> Option<f64> { Some(self.width) }
//!     fn bounding_box(&self) -> Bounds {
//!         Bounds::from_left_width(self.left + self.margin as f64, self.width)
//!     }
//!     fn set_inline_start_margin(&mut self, px: i32) { self.margin = px; }
//! }
//!
//! struct Frames(u32);
//! impl FrameScheduler for Frames {
//!     fn request_frame(&mut self) -> bool { self.0 += 1; true }
//! }
//!
//! let panel = Panel { left: 10.0, width: 100.0, margin: 0 };
//! let mut adjuster = ContainmentAdjuster::attach(Some(panel), Config::new()).unwrap();
//! assert_eq!(adjuster.offset(), -50);
//!
//! let viewport = 800.0;
//! let mut frames = Frames(0);
//! adjuster.request_recheck(&mut frames);
//! while adjuster.has_pending_pass() {
//!     adjuster.run_pass(&viewport, &mut frames);
//! }
//! assert_eq!(adjuster.offset(), -10);
//! assert!(adjuster.target().bounding_box().is_inside(viewport));
//! ```

use crate::geometry::{Bounds, centering_offset};

/// The element whose horizontal position is constrained.
pub trait Target {
    /// Layout width of the element at attach time. `None` when unavailable.
    fn natural_width(&self) -> Option<f64>;

    /// Current bounding box relative to the viewport.
    fn bounding_box(&self) -> Bounds;

    /// Write the inline-start margin, in whole CSS pixels.
    fn set_inline_start_margin(&mut self, px: i32);
}

/// Live viewport measurement. Read on every pass.
pub trait Viewport {
    /// Width of the visible window in CSS pixels.
    fn width(&self) -> f64;
}

impl Viewport for f64 {
    fn width(&self) -> f64 {
        *self
    }
}

/// Schedules a single call to [`ContainmentAdjuster::run_pass`] before the
/// next repaint.
pub trait FrameScheduler {
    /// Returns `false` if the host refused the request; no frame will arrive.
    fn request_frame(&mut self) -> bool;
}

/// How the offset is initialized when the adjuster attaches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InitialOffset {
    /// `-(natural_width / 2)`, or `0` if the width is zero or unavailable.
    #[default]
    CenterOnHalfWidth,
    /// Start from no margin.
    Zero,
    /// Start from a fixed margin.
    Fixed(i32),
}

/// Adjuster configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Config {
    pub initial_offset: InitialOffset,
}

impl Config {
    /// Default configuration: half-width centering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the offset is initialized at attach.
    pub fn initial_offset(mut self, initial: InitialOffset) -> Self {
        self.initial_offset = initial;
        self
    }
}

/// An external reason to re-run the adjustment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The viewport was resized.
    Resize,
    /// A sibling control (e.g. an expand/collapse toggle) changed layout.
    Recheck,
}

/// Result of one adjustment pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Offset changed by `delta` (always ±1); another pass is requested.
    Moved(i32),
    /// Element fits inside the viewport. Nothing scheduled.
    Settled,
    /// Element is wider than the viewport and its left edge is at or past 0.
    /// Nothing scheduled.
    Pinned,
    /// Adjuster was detached. No mutation, nothing scheduled.
    Detached,
}

impl Pass {
    /// Whether this pass scheduled a follow-up pass.
    pub fn continues(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Pixels moved per pass.
const STEP: i32 = 1;

/// Keeps a [`Target`] inside the horizontal viewport extent.
#[derive(Debug)]
pub struct ContainmentAdjuster<T> {
    target: T,
    offset: i32,
    attached: bool,
    pending: bool,
}

impl<T: Target> ContainmentAdjuster<T> {
    /// Begin managing `target`.
    ///
    /// Returns `None` without touching anything when there is no target.
    /// Otherwise applies the initial offset from `config` and returns the
    /// attached adjuster. No pass is scheduled until the first trigger.
    pub fn attach(target: Option<T>, config: Config) -> Option<Self> {
        let mut target = target?;
        let offset = match config.initial_offset {
            InitialOffset::CenterOnHalfWidth => {
                target.natural_width().map(centering_offset).unwrap_or(0)
            }
            InitialOffset::Zero => 0,
            InitialOffset::Fixed(px) => px,
        };
        target.set_inline_start_margin(offset);
        log::debug!("keep-inside attached, initial offset {offset}px");
        Some(Self {
            target,
            offset,
            attached: true,
            pending: false,
        })
    }

    /// Current inline-start margin in pixels.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Whether [`detach`](Self::detach) has not been called.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a frame has been requested and its pass has not run yet.
    pub fn has_pending_pass(&self) -> bool {
        self.pending
    }

    /// The managed element.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Schedule one pass on the next animation frame.
    ///
    /// A no-op while a pass is already pending or after detach, so bursts
    /// of resize events cost at most one outstanding frame request. A
    /// refused request leaves nothing pending, so the next trigger retries.
    ///
    /// Returns whether a pass is pending afterwards.
    pub fn request_recheck(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if !self.attached || self.pending {
            return self.pending;
        }
        self.pending = scheduler.request_frame();
        if !self.pending {
            log::warn!("keep-inside: frame request refused at offset {}px", self.offset);
        }
        self.pending
    }

    /// React to an external trigger.
    pub fn handle(&mut self, trigger: Trigger, scheduler: &mut impl FrameScheduler) -> bool {
        log::trace!("keep-inside trigger {trigger:?}");
        self.request_recheck(scheduler)
    }

    /// Run one adjustment pass. Call this from the frame callback.
    ///
    /// Moves at most one pixel in one direction. Left overflow is
    /// corrected first; right overflow is only corrected while doing so
    /// keeps the left edge at or past 0, so an element wider than the
    /// viewport ends up left-aligned instead of oscillating.
    pub fn run_pass(
        &mut self,
        viewport: &impl Viewport,
        scheduler: &mut impl FrameScheduler,
    ) -> Pass {
        self.pending = false;
        if !self.attached {
            return Pass::Detached;
        }

        let bounds = self.target.bounding_box();
        let viewport_width = viewport.width();

        let delta = if bounds.overflows_left() {
            STEP
        } else if bounds.overflows_right(viewport_width) && bounds.left >= STEP as f64 {
            -STEP
        } else {
            let pass = if bounds.overflows_right(viewport_width) {
                Pass::Pinned
            } else {
                Pass::Settled
            };
            log::debug!("keep-inside {pass:?} at offset {}px", self.offset);
            return pass;
        };

        self.move_by(delta);
        log::trace!(
            "keep-inside left={} right={} viewport={viewport_width}: moved {delta:+}",
            bounds.left,
            bounds.right
        );
        self.request_recheck(scheduler);
        Pass::Moved(delta)
    }

    /// Stop managing the element. Frames already requested still call
    /// [`run_pass`](Self::run_pass), which then does nothing.
    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("keep-inside detached at offset {}px", self.offset);
        }
        self.attached = false;
    }

    /// Detach and hand back the element.
    pub fn into_target(mut self) -> T {
        self.detach();
        self.target
    }

    fn move_by(&mut self, delta: i32) {
        self.offset = self.offset.saturating_add(delta);
        self.target.set_inline_start_margin(self.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Element laid out at `origin` before its margin is applied.
    struct Fake {
        origin: f64,
        width: Option<f64>,
        margin: i32,
        writes: u32,
    }

    impl Fake {
        fn new(origin: f64, width: f64) -> Self {
            Self {
                origin,
                width: Some(width),
                margin: 0,
                writes: 0,
            }
        }
    }

    impl Target for Fake {
        fn natural_width(&self) -> Option<f64> {
            self.width
        }
        fn bounding_box(&self) -> Bounds {
            Bounds::from_left_width(self.origin + self.margin as f64, self.width.unwrap_or(0.0))
        }
        fn set_inline_start_margin(&mut self, px: i32) {
            self.margin = px;
            self.writes += 1;
        }
    }

    #[derive(Default)]
    struct Frames {
        requested: u32,
        refuse: bool,
    }

    impl FrameScheduler for Frames {
        fn request_frame(&mut self) -> bool {
            self.requested += 1;
            !self.refuse
        }
    }

    fn attach(origin: f64, width: f64, config: Config) -> ContainmentAdjuster<Fake> {
        ContainmentAdjuster::attach(Some(Fake::new(origin, width)), config).unwrap()
    }

    #[test]
    fn attach_centers_on_half_width() {
        let a = attach(0.0, 300.0, Config::new());
        assert_eq!(a.offset(), -150);
        assert_eq!(a.target().margin, -150);
        assert_eq!(a.target().writes, 1);
        assert!(!a.has_pending_pass());
    }

    #[test]
    fn attach_zero_width_starts_at_zero() {
        let a = attach(0.0, 0.0, Config::new());
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn attach_unavailable_width_starts_at_zero() {
        let fake = Fake {
            width: None,
            ..Fake::new(0.0, 0.0)
        };
        let a = ContainmentAdjuster::attach(Some(fake), Config::new()).unwrap();
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn attach_respects_configured_initial_offset() {
        let a = attach(0.0, 300.0, Config::new().initial_offset(InitialOffset::Zero));
        assert_eq!(a.offset(), 0);
        let a = attach(0.0, 300.0, Config::new().initial_offset(InitialOffset::Fixed(7)));
        assert_eq!(a.offset(), 7);
    }

    #[test]
    fn attach_absent_target_is_noop() {
        assert!(ContainmentAdjuster::<Fake>::attach(None, Config::new()).is_none());
    }

    #[test]
    fn left_overflow_moves_right_by_one() {
        let mut a = attach(0.0, 100.0, Config::new());
        let mut frames = Frames::default();
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Moved(1));
        assert_eq!(a.offset(), -49);
        assert_eq!(frames.requested, 1);
        assert!(a.has_pending_pass());
    }

    #[test]
    fn right_overflow_moves_left_by_one() {
        let mut a = attach(760.0, 100.0, Config::new().initial_offset(InitialOffset::Zero));
        let mut frames = Frames::default();
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Moved(-1));
        assert_eq!(a.offset(), -1);
    }

    #[test]
    fn inside_settles_without_scheduling() {
        let mut a = attach(100.0, 100.0, Config::new());
        let mut frames = Frames::default();
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Settled);
        assert_eq!(frames.requested, 0);
        assert_eq!(a.target().writes, 1);
    }

    #[test]
    fn wider_than_viewport_prefers_left() {
        // left = -5, right = 995 on an 800px viewport.
        let mut a = attach(-5.0, 1000.0, Config::new().initial_offset(InitialOffset::Zero));
        let mut frames = Frames::default();
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Moved(1));
        assert_eq!(a.offset(), 1);
    }

    #[test]
    fn wider_than_viewport_pins_left_edge() {
        let mut a = attach(-5.0, 1000.0, Config::new().initial_offset(InitialOffset::Zero));
        let mut frames = Frames::default();
        while a.has_pending_pass() || frames.requested == 0 {
            a.run_pass(&800.0, &mut frames);
        }
        assert_eq!(a.target().bounding_box().left, 0.0);
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Pinned);
        assert_eq!(a.offset(), 5);
    }

    #[test]
    fn recheck_requests_at_most_one_frame() {
        let mut a = attach(0.0, 100.0, Config::new());
        let mut frames = Frames::default();
        a.request_recheck(&mut frames);
        a.handle(Trigger::Resize, &mut frames);
        a.handle(Trigger::Recheck, &mut frames);
        assert_eq!(frames.requested, 1);
    }

    #[test]
    fn refused_frame_request_is_retried_on_next_trigger() {
        let mut a = attach(0.0, 100.0, Config::new());
        let mut frames = Frames {
            refuse: true,
            ..Frames::default()
        };
        assert!(!a.handle(Trigger::Resize, &mut frames));
        assert!(!a.has_pending_pass());
        assert!(!a.handle(Trigger::Resize, &mut frames));
        assert_eq!(frames.requested, 2);

        frames.refuse = false;
        assert!(a.handle(Trigger::Resize, &mut frames));
        assert_eq!(frames.requested, 3);
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Moved(1));
        assert_eq!(a.offset(), -49);
    }

    #[test]
    fn refused_follow_up_frame_leaves_nothing_pending() {
        let mut a = attach(0.0, 100.0, Config::new());
        let mut frames = Frames::default();
        a.request_recheck(&mut frames);
        frames.refuse = true;
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Moved(1));
        assert!(!a.has_pending_pass());

        frames.refuse = false;
        assert!(a.request_recheck(&mut frames));
    }

    #[test]
    fn detach_neutralizes_in_flight_pass() {
        let mut a = attach(0.0, 100.0, Config::new());
        let mut frames = Frames::default();
        a.request_recheck(&mut frames);
        a.detach();
        let writes = a.target().writes;
        assert_eq!(a.run_pass(&800.0, &mut frames), Pass::Detached);
        assert_eq!(a.target().writes, writes);
        assert_eq!(frames.requested, 1);
        a.request_recheck(&mut frames);
        assert_eq!(frames.requested, 1);
    }

    #[test]
    fn pass_continues_only_when_moved() {
        assert!(Pass::Moved(1).continues());
        assert!(!Pass::Settled.continues());
        assert!(!Pass::Pinned.continues());
        assert!(!Pass::Detached.continues());
    }
}
