//! Carousel state machine: active index, autoplay, dragging, and pagination.
//!
//! The controller never touches a clock. The rendering layer feeds it
//! [`CarouselEvent`]s one at a time and carries out the [`TimerCommand`]s it
//! returns, so every transition can be driven deterministically in tests.
use crate::breakpoint::{BreakpointPolicy, BreakpointRule};
use crate::card::CardRecord;
use crate::render::{VisualTree, render};
use thiserror::Error;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u32 = 3000;
pub const DEFAULT_TRANSITION_MS: u32 = 300;
pub const DEFAULT_SWIPE_THRESHOLD_PX: u32 = 50;

/// Static behaviour of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    pub autoplay_interval_ms: u32,
    pub transition_ms: u32,
    pub looping: bool,
    pub pagination: bool,
    /// Minimum horizontal drag distance that counts as a swipe.
    pub swipe_threshold_px: u32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        CarouselOptions {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            looping: true,
            pagination: true,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }
}

/// Externally visible phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Autoplay is running.
    Idle,
    /// A pointer is held down over the track.
    UserDragging,
    /// Autoplay is stopped by the host or because there is nothing to cycle.
    Paused,
}

/// Snapshot of the carousel taken for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub active_index: usize,
    pub card_count: usize,
    pub phase: Phase,
    pub is_looping: bool,
    pub transitioning: bool,
    pub show_pagination: bool,
}

impl CarouselState {
    pub fn is_user_interacting(&self) -> bool {
        matches!(self.phase, Phase::UserDragging)
    }
}

/// Inputs accepted by [`CarouselController::handle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// The autoplay interval elapsed.
    Tick,
    /// Pointer pressed over the track at horizontal position `x`.
    PointerDown { x: i32 },
    /// Pointer released at horizontal position `x`.
    PointerUp { x: i32 },
    /// Pointer left the track at horizontal position `x`; ends a drag as if
    /// released there.
    PointerLeave { x: i32 },
    /// The gesture was aborted by the browser.
    PointerCancel,
    /// A pagination dot was clicked.
    DotClicked(usize),
    Next,
    Previous,
    /// The slide transition with this id has finished. Ends of superseded
    /// transitions are ignored.
    TransitionEnd { id: u64 },
    /// The host hid the page.
    Pause,
    /// The host showed the page again.
    Resume,
    /// The host reported a new viewport width, if it could measure one.
    Resize { width: Option<f64> },
}

/// What the rendering layer must do with its autoplay timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Cancel any running timer and start a new one.
    Start { interval_ms: u32 },
    Cancel,
}

/// Side effects of handling one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The active index changed and a transition of `transition_ms` started.
    pub moved: bool,
    /// The resolved breakpoint rule changed.
    pub relayout: bool,
    pub timer: Option<TimerCommand>,
}

impl Outcome {
    fn moved() -> Self {
        Outcome {
            moved: true,
            ..Default::default()
        }
    }

    fn timer(command: TimerCommand) -> Self {
        Outcome {
            timer: Some(command),
            ..Default::default()
        }
    }

    /// Whether anything the renderer draws may have changed.
    pub fn needs_render(&self) -> bool {
        self.moved || self.relayout
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("slide {index} does not exist, carousel has {count} slides")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Owns the active index and drives autoplay for one carousel instance.
#[derive(Debug, Clone)]
pub struct CarouselController {
    options: CarouselOptions,
    policy: BreakpointPolicy,
    rule: BreakpointRule,
    card_count: usize,
    active_index: usize,
    drag_origin: Option<i32>,
    paused: bool,
    transitioning: bool,
    transition_id: u64,
}

impl CarouselController {
    /// Creates a controller at index 0 with the narrowest layout.
    ///
    /// Carousels with fewer than two cards start paused since there is
    /// nothing to cycle through.
    pub fn new(card_count: usize, options: CarouselOptions, policy: BreakpointPolicy) -> Self {
        let rule = policy.narrowest();
        CarouselController {
            options,
            policy,
            rule,
            card_count,
            active_index: 0,
            drag_origin: None,
            paused: card_count < 2,
            transitioning: false,
            transition_id: 0,
        }
    }

    /// Timer command to issue when the carousel is mounted.
    pub fn mount(&self) -> Option<TimerCommand> {
        match self.phase() {
            Phase::Idle => Some(self.start_timer()),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.drag_origin.is_some() {
            Phase::UserDragging
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active_index,
            card_count: self.card_count,
            phase: self.phase(),
            is_looping: self.options.looping,
            transitioning: self.transitioning,
            show_pagination: self.options.pagination,
        }
    }

    /// Projects the current state and layout onto `cards`.
    pub fn view(&self, cards: &[CardRecord]) -> VisualTree {
        render(&self.state(), &self.rule, cards)
    }

    pub fn rule(&self) -> BreakpointRule {
        self.rule
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Id of the most recently started transition, to be echoed back in
    /// [`CarouselEvent::TransitionEnd`].
    pub fn transition_id(&self) -> u64 {
        self.transition_id
    }

    /// Applies one event and reports what the renderer has to do next.
    ///
    /// Only [`CarouselEvent::DotClicked`] can fail; a failed event leaves the
    /// controller untouched.
    pub fn handle(&mut self, event: CarouselEvent) -> Result<Outcome, CarouselError> {
        let outcome = match event {
            CarouselEvent::Tick => self.tick(),
            CarouselEvent::PointerDown { x } => self.pointer_down(x),
            CarouselEvent::PointerUp { x } | CarouselEvent::PointerLeave { x } => {
                self.pointer_up(Some(x))
            }
            CarouselEvent::PointerCancel => self.pointer_up(None),
            CarouselEvent::DotClicked(index) => self.go_to(index)?,
            CarouselEvent::Next => self.step(1),
            CarouselEvent::Previous => self.step(-1),
            CarouselEvent::TransitionEnd { id } => self.transition_end(id),
            CarouselEvent::Pause => self.pause(),
            CarouselEvent::Resume => self.resume(),
            CarouselEvent::Resize { width } => self.resize(width),
        };
        Ok(outcome)
    }

    fn tick(&mut self) -> Outcome {
        if self.phase() != Phase::Idle {
            trace!(phase = ?self.phase(), "autoplay tick suppressed");
            return Outcome::default();
        }
        if self.transitioning {
            trace!("autoplay tick dropped, transition in flight");
            return Outcome::default();
        }
        self.step(1)
    }

    fn pointer_down(&mut self, x: i32) -> Outcome {
        if self.drag_origin.is_some() {
            return Outcome::default();
        }
        let was_idle = self.phase() == Phase::Idle;
        self.drag_origin = Some(x);
        debug!(x, "drag started");
        if was_idle {
            Outcome::timer(TimerCommand::Cancel)
        } else {
            Outcome::default()
        }
    }

    fn pointer_up(&mut self, release_x: Option<i32>) -> Outcome {
        let Some(origin) = self.drag_origin.take() else {
            return Outcome::default();
        };

        let mut outcome = match release_x {
            Some(x) => {
                let delta = x.saturating_sub(origin);
                debug!(delta, "drag released");
                if delta.unsigned_abs() >= self.options.swipe_threshold_px {
                    // Dragging the track left brings the next card in.
                    self.step(if delta < 0 { 1 } else { -1 })
                } else {
                    Outcome::default()
                }
            }
            None => Outcome::default(),
        };

        if !self.paused {
            outcome.timer = Some(self.start_timer());
        }
        outcome
    }

    fn go_to(&mut self, index: usize) -> Result<Outcome, CarouselError> {
        if index >= self.card_count {
            return Err(CarouselError::IndexOutOfRange {
                index,
                count: self.card_count,
            });
        }
        if index == self.active_index {
            return Ok(Outcome::default());
        }
        Ok(self.move_to(index))
    }

    fn step(&mut self, delta: isize) -> Outcome {
        if self.card_count == 0 {
            return Outcome::default();
        }

        let target = if self.options.looping {
            let count = self.card_count as isize;
            (self.active_index as isize + delta).rem_euclid(count) as usize
        } else {
            self.active_index
                .saturating_add_signed(delta)
                .min(self.card_count - 1)
        };

        if target == self.active_index {
            return Outcome::default();
        }
        self.move_to(target)
    }

    fn move_to(&mut self, index: usize) -> Outcome {
        debug!(from = self.active_index, to = index, "active slide changed");
        self.active_index = index;
        self.transitioning = true;
        self.transition_id = self.transition_id.wrapping_add(1);
        Outcome::moved()
    }

    fn transition_end(&mut self, id: u64) -> Outcome {
        if id != self.transition_id {
            trace!(id, current = self.transition_id, "stale transition end ignored");
            return Outcome::default();
        }
        self.transitioning = false;
        Outcome::default()
    }

    fn pause(&mut self) -> Outcome {
        if self.paused {
            return Outcome::default();
        }
        let was_idle = self.phase() == Phase::Idle;
        self.paused = true;
        debug!("autoplay paused");
        if was_idle {
            Outcome::timer(TimerCommand::Cancel)
        } else {
            Outcome::default()
        }
    }

    fn resume(&mut self) -> Outcome {
        if !self.paused || self.card_count < 2 {
            return Outcome::default();
        }
        self.paused = false;
        debug!("autoplay resumed");
        if self.drag_origin.is_none() {
            Outcome::timer(self.start_timer())
        } else {
            Outcome::default()
        }
    }

    fn resize(&mut self, width: Option<f64>) -> Outcome {
        let rule = self.policy.resolve_reported(width);
        if rule == self.rule {
            return Outcome::default();
        }
        debug!(
            min_width = rule.min_width,
            visible = rule.visible_count,
            "breakpoint changed"
        );
        self.rule = rule;
        Outcome {
            relayout: true,
            ..Default::default()
        }
    }

    fn start_timer(&self) -> TimerCommand {
        TimerCommand::Start {
            interval_ms: self.options.autoplay_interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(cards: usize) -> CarouselController {
        CarouselController::new(cards, CarouselOptions::default(), BreakpointPolicy::default())
    }

    /// Ticks and lets each transition finish before the next one.
    fn settle_tick(carousel: &mut CarouselController) -> Outcome {
        let outcome = carousel.handle(CarouselEvent::Tick).unwrap();
        let id = carousel.transition_id();
        carousel.handle(CarouselEvent::TransitionEnd { id }).unwrap();
        outcome
    }

    #[test]
    fn can_create_controller_at_first_slide() {
        let carousel = controller(3);

        let expected = CarouselState {
            active_index: 0,
            card_count: 3,
            phase: Phase::Idle,
            is_looping: true,
            transitioning: false,
            show_pagination: true,
        };

        assert_eq!(carousel.state(), expected);
        assert_eq!(
            carousel.mount(),
            Some(TimerCommand::Start { interval_ms: 3000 })
        );
    }

    #[test]
    fn tick_advances_and_wraps() {
        let mut carousel = controller(3);

        let outcome = settle_tick(&mut carousel);
        assert!(outcome.moved);
        assert_eq!(carousel.active_index(), 1);

        settle_tick(&mut carousel);
        settle_tick(&mut carousel);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn tick_during_transition_is_dropped() {
        let mut carousel = controller(3);

        carousel.handle(CarouselEvent::Tick).unwrap();
        let dropped = carousel.handle(CarouselEvent::Tick).unwrap();

        assert_eq!(dropped, Outcome::default());
        assert_eq!(carousel.active_index(), 1);
        assert!(carousel.state().transitioning);
    }

    #[test]
    fn stale_transition_end_keeps_newer_transition_in_flight() {
        let mut carousel = controller(3);

        // Arrange: a second move starts before the first one has finished
        carousel.handle(CarouselEvent::DotClicked(1)).unwrap();
        let first = carousel.transition_id();
        carousel.handle(CarouselEvent::DotClicked(2)).unwrap();
        let second = carousel.transition_id();
        assert_ne!(first, second);

        // Act: the first move's timer fires
        carousel.handle(CarouselEvent::TransitionEnd { id: first }).unwrap();
        let tick = carousel.handle(CarouselEvent::Tick).unwrap();

        // Assert
        assert!(!tick.moved);
        assert!(carousel.state().transitioning);
        assert_eq!(carousel.active_index(), 2);

        carousel.handle(CarouselEvent::TransitionEnd { id: second }).unwrap();
        assert!(!carousel.state().transitioning);
        assert!(carousel.handle(CarouselEvent::Tick).unwrap().moved);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn leaving_the_track_mid_drag_counts_as_release() {
        let mut carousel = controller(3);

        carousel.handle(CarouselEvent::PointerDown { x: 300 }).unwrap();
        let outcome = carousel.handle(CarouselEvent::PointerLeave { x: 150 }).unwrap();

        assert!(outcome.moved);
        assert_eq!(outcome.timer, Some(TimerCommand::Start { interval_ms: 3000 }));
        assert_eq!(carousel.active_index(), 1);
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn leaving_the_track_without_drag_is_ignored() {
        let mut carousel = controller(3);

        let outcome = carousel.handle(CarouselEvent::PointerLeave { x: 0 }).unwrap();

        assert_eq!(outcome, Outcome::default());
    }

    #[test]
    fn drag_cancels_and_restarts_autoplay() {
        let mut carousel = controller(3);

        let down = carousel.handle(CarouselEvent::PointerDown { x: 200 }).unwrap();
        assert_eq!(down.timer, Some(TimerCommand::Cancel));
        assert_eq!(carousel.phase(), Phase::UserDragging);
        assert!(carousel.state().is_user_interacting());

        let suppressed = carousel.handle(CarouselEvent::Tick).unwrap();
        assert!(!suppressed.moved);
        assert_eq!(carousel.active_index(), 0);

        let up = carousel.handle(CarouselEvent::PointerUp { x: 190 }).unwrap();
        assert!(!up.moved);
        assert_eq!(up.timer, Some(TimerCommand::Start { interval_ms: 3000 }));
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn swipe_left_moves_to_next_slide() {
        let mut carousel = controller(3);

        carousel.handle(CarouselEvent::PointerDown { x: 300 }).unwrap();
        let outcome = carousel.handle(CarouselEvent::PointerUp { x: 200 }).unwrap();

        assert!(outcome.moved);
        assert_eq!(carousel.active_index(), 1);
    }

    #[test]
    fn swipe_right_wraps_to_last_slide() {
        let mut carousel = controller(3);

        carousel.handle(CarouselEvent::PointerDown { x: 100 }).unwrap();
        carousel.handle(CarouselEvent::PointerUp { x: 180 }).unwrap();

        assert_eq!(carousel.active_index(), 2);
    }

    #[test]
    fn cancelled_drag_does_not_move() {
        let mut carousel = controller(3);

        carousel.handle(CarouselEvent::PointerDown { x: 100 }).unwrap();
        let outcome = carousel.handle(CarouselEvent::PointerCancel).unwrap();

        assert!(!outcome.moved);
        assert_eq!(outcome.timer, Some(TimerCommand::Start { interval_ms: 3000 }));
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let mut carousel = controller(3);

        let outcome = carousel.handle(CarouselEvent::PointerUp { x: 10 }).unwrap();

        assert_eq!(outcome, Outcome::default());
    }

    #[test]
    fn dot_click_jumps_without_touching_autoplay() {
        let mut carousel = controller(3);

        let outcome = carousel.handle(CarouselEvent::DotClicked(2)).unwrap();

        assert!(outcome.moved);
        assert_eq!(outcome.timer, None);
        assert_eq!(carousel.active_index(), 2);
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn dot_click_on_active_slide_is_noop() {
        let mut carousel = controller(3);
        let before = carousel.state();

        let outcome = carousel.handle(CarouselEvent::DotClicked(0)).unwrap();

        assert_eq!(outcome, Outcome::default());
        assert_eq!(carousel.state(), before);
    }

    #[test]
    fn cannot_click_dot_past_last_slide() {
        let mut carousel = controller(3);

        let result = carousel.handle(CarouselEvent::DotClicked(3));

        assert_eq!(result, Err(CarouselError::IndexOutOfRange { index: 3, count: 3 }));
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn previous_wraps_from_first_slide() {
        let mut carousel = controller(4);

        carousel.handle(CarouselEvent::Previous).unwrap();

        assert_eq!(carousel.active_index(), 3);
    }

    #[test]
    fn stops_at_edges_without_loop() {
        let options = CarouselOptions {
            looping: false,
            ..CarouselOptions::default()
        };
        let mut carousel = CarouselController::new(2, options, BreakpointPolicy::default());

        assert!(!carousel.handle(CarouselEvent::Previous).unwrap().moved);
        assert!(settle_tick(&mut carousel).moved);
        assert!(!settle_tick(&mut carousel).moved);
        assert_eq!(carousel.active_index(), 1);
        assert!(!carousel.state().is_looping);
    }

    #[test]
    fn pause_and_resume_follow_page_visibility() {
        let mut carousel = controller(3);

        let pause = carousel.handle(CarouselEvent::Pause).unwrap();
        assert_eq!(pause.timer, Some(TimerCommand::Cancel));
        assert_eq!(carousel.phase(), Phase::Paused);
        assert!(!carousel.handle(CarouselEvent::Tick).unwrap().moved);

        let resume = carousel.handle(CarouselEvent::Resume).unwrap();
        assert_eq!(resume.timer, Some(TimerCommand::Start { interval_ms: 3000 }));
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn drag_while_paused_keeps_autoplay_stopped() {
        let mut carousel = controller(3);
        carousel.handle(CarouselEvent::Pause).unwrap();

        let down = carousel.handle(CarouselEvent::PointerDown { x: 0 }).unwrap();
        let up = carousel.handle(CarouselEvent::PointerUp { x: -80 }).unwrap();

        assert_eq!(down.timer, None);
        assert_eq!(up.timer, None);
        assert!(up.moved);
        assert_eq!(carousel.phase(), Phase::Paused);
    }

    #[test]
    fn empty_carousel_stays_paused() {
        let mut carousel = controller(0);

        assert_eq!(carousel.mount(), None);
        assert_eq!(carousel.phase(), Phase::Paused);
        assert_eq!(carousel.handle(CarouselEvent::Resume).unwrap(), Outcome::default());
        assert_eq!(carousel.handle(CarouselEvent::Next).unwrap(), Outcome::default());
        assert_eq!(carousel.active_index(), 0);
        assert!(carousel.handle(CarouselEvent::DotClicked(0)).is_err());
    }

    #[test]
    fn resize_reports_relayout_only_on_tier_change() {
        let mut carousel = controller(3);

        let first = carousel.handle(CarouselEvent::Resize { width: Some(1200.0) }).unwrap();
        assert!(first.relayout);
        assert_eq!(carousel.rule(), BreakpointRule::WIDE);

        let same = carousel.handle(CarouselEvent::Resize { width: Some(1300.0) }).unwrap();
        assert!(!same.relayout);

        let unknown = carousel.handle(CarouselEvent::Resize { width: None }).unwrap();
        assert!(unknown.relayout);
        assert_eq!(carousel.rule(), BreakpointRule::NARROW);
    }
}
