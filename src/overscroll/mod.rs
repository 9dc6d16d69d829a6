//! Overscroll navigation controller.
//!
//! Dragging past the top of the article view previews the previous article, dragging past the
//! bottom previews the next one. The drag distance is damped with a [`RubberBand`]. Releasing at
//! or past the threshold commits the navigation, releasing earlier springs the preview back.
//!
//! The controller owns at most one settle animation, stored in [`OverscrollOffset`]. The host
//! drives it by advancing the shared [`Clock`] and calling
//! [`OverscrollNav::advance_animations`], which yields the [`NavigationRequest`] once a commit
//! settles. Any reset replaces the animation, so a superseded settle can never act.

use std::time::Duration;

use overscroll_nav_config::Config;
use serde::Serialize;

use crate::animation::{Animation, Clock};
use crate::input::{HandledTouch, TouchEvent};
use crate::rubber_band::RubberBand;

mod offset;
pub use offset::{DragGesture, OverscrollOffset};

mod render;
pub use render::{derive_styles, PreviewStyle, RenderOutputs, RenderState, Transition, Translate};


#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureState {
    /// No gesture is classified yet.
    #[default]
    Idle,
    /// Native scrolling, the controller stays passive.
    Scrolling,
    /// The controller drives the preview, or settles it after a release.
    Overscrolling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Previous article, revealed above the content by dragging down.
    Prev,
    /// Next article, revealed below the content by dragging up.
    Next,
}

/// What happens when the settle animation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Commit { target: usize },
    SpringBack,
}

/// Emitted once per committed gesture, after the commit animation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    pub target: usize,
}

/// Boundary and sequence facts the controller consults while handling touches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavContext {
    pub at_top: bool,
    pub at_bottom: bool,
    pub has_prev: bool,
    pub has_next: bool,
    pub current_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub threshold: f64,
    pub max_overscroll: f64,
    pub dead_zone: f64,
    pub commit_reveal: f64,
    pub content_shift: f64,
    pub opacity_ramp: f64,
    pub spring_back_anim: overscroll_nav_config::Animation,
    pub commit_anim: overscroll_nav_config::Animation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchSession {
    start_y: f64,
    /// Only used for logging how long the touch lasted.
    start_time: Duration,
    last_y: f64,
    was_at_top: bool,
    was_at_bottom: bool,
    /// Point the overscroll distance is measured from.
    reference_y: f64,
    /// Direction this session is locked to once it first overscrolled.
    locked: Option<Direction>,
}

#[derive(Debug)]
pub struct OverscrollNav {
    state: GestureState,
    /// Set exactly while overscrolling.
    direction: Option<Direction>,
    offset: OverscrollOffset,
    /// The current touch, from touch start until release.
    session: Option<TouchSession>,
    disabled: bool,
    clock: Clock,
    options: Options,
}

impl Direction {
    /// Sign of finger movement that drags further into this direction's overscroll region.
    fn drag_sign(self) -> f64 {
        match self {
            Direction::Prev => 1.,
            Direction::Next => -1.,
        }
    }

    /// Direction revealed by a finger movement of `dy`.
    fn from_drag(dy: f64) -> Self {
        if dy > 0. {
            Direction::Prev
        } else {
            Direction::Next
        }
    }

    /// Index of the adjacent article in this direction.
    pub fn apply(self, index: usize) -> Option<usize> {
        match self {
            Direction::Prev => index.checked_sub(1),
            Direction::Next => index.checked_add(1),
        }
    }
}

impl NavContext {
    fn has_adjacent(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.has_prev,
            Direction::Next => self.has_next,
        }
    }

    fn is_at_boundary(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.at_top,
            Direction::Next => self.at_bottom,
        }
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let overscroll = &config.overscroll;
        let animations = &config.animations;

        Self {
            threshold: overscroll.threshold.get(),
            max_overscroll: overscroll.max_overscroll.get(),
            dead_zone: overscroll.dead_zone.get(),
            commit_reveal: overscroll.commit_reveal.get(),
            content_shift: overscroll.content_shift.get(),
            opacity_ramp: overscroll.opacity_ramp.get(),
            spring_back_anim: animations.spring_back.0,
            commit_anim: animations.commit.0,
        }
    }

    pub fn rubber_band(&self) -> RubberBand {
        RubberBand::new(self.max_overscroll)
    }

    /// Offset a committed preview settles at.
    pub fn commit_offset(&self) -> f64 {
        self.max_overscroll + self.commit_reveal
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TouchSession {
    fn new(y: f64, time: Duration, ctx: &NavContext) -> Self {
        Self {
            start_y: y,
            start_time: time,
            last_y: y,
            was_at_top: ctx.at_top,
            was_at_bottom: ctx.at_bottom,
            reference_y: y,
            locked: None,
        }
    }

    fn was_at_boundary(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.was_at_top,
            Direction::Next => self.was_at_bottom,
        }
    }

    fn allows(&self, direction: Direction) -> bool {
        self.locked.map_or(true, |locked| locked == direction)
    }
}

impl OverscrollNav {
    pub fn new(clock: Clock, options: Options) -> Self {
        Self {
            state: GestureState::Idle,
            direction: None,
            offset: OverscrollOffset::new(),
            session: None,
            disabled: false,
            clock,
            options,
        }
    }

    pub fn on_touch_start(&mut self, evt: &TouchEvent, ctx: &NavContext) -> HandledTouch {
        if self.disabled {
            trace!("ignoring touch start, gesture is disabled");
            return HandledTouch::PASS;
        }

        let Some(point) = evt.primary() else {
            trace!("ignoring touch start without touch points");
            return HandledTouch::PASS;
        };

        self.clock.set_unadjusted(evt.time);

        if let Some(settle) = self.offset.settle() {
            debug!("new touch cancels pending {settle:?}");
        }
        self.reset_state();

        self.session = Some(TouchSession::new(point.y, evt.time, ctx));
        HandledTouch::PASS
    }

    pub fn on_touch_move(&mut self, evt: &TouchEvent, ctx: &NavContext) -> HandledTouch {
        if self.disabled {
            return HandledTouch::PASS;
        }

        let Some(point) = evt.primary() else {
            trace!("ignoring touch move without touch points");
            return self.handled();
        };

        let Some(mut session) = self.session else {
            trace!("ignoring touch move without touch start");
            return self.handled();
        };

        self.clock.set_unadjusted(evt.time);
        let y = point.y;

        match self.state {
            GestureState::Idle => {
                let dy = y - session.start_y;
                if dy.abs() > self.options.dead_zone {
                    let direction = Direction::from_drag(dy);
                    if session.was_at_boundary(direction) && ctx.has_adjacent(direction) {
                        session.reference_y = session.start_y;
                        self.begin_overscroll(&mut session, direction);
                        self.drag_to(&session, y, evt.time);
                    } else {
                        debug!("touch classified as scrolling");
                        self.state = GestureState::Scrolling;
                    }
                }
            }
            GestureState::Scrolling => {
                let step = y - session.last_y;
                let dy = if step != 0. { step } else { y - session.start_y };

                if dy != 0. {
                    let direction = Direction::from_drag(dy);
                    if ctx.is_at_boundary(direction)
                        && ctx.has_adjacent(direction)
                        && session.allows(direction)
                    {
                        session.reference_y = y;
                        self.begin_overscroll(&mut session, direction);
                    }
                }
            }
            GestureState::Overscrolling => self.drag_to(&session, y, evt.time),
        }

        session.last_y = y;
        self.session = Some(session);

        self.handled()
    }

    pub fn on_touch_end(&mut self, evt: &TouchEvent, ctx: &NavContext) -> HandledTouch {
        if self.disabled {
            return HandledTouch::PASS;
        }

        let Some(session) = self.session.take() else {
            trace!("ignoring touch end without touch start");
            return HandledTouch::PASS;
        };

        self.clock.set_unadjusted(evt.time);
        trace!(
            "touch released after {:?}",
            evt.time.saturating_sub(session.start_time)
        );

        self.release(Some(ctx.current_index))
    }

    /// Handles a touch taken away by the platform.
    ///
    /// An overscroll in progress springs back, it never commits.
    pub fn on_touch_cancel(&mut self, evt: &TouchEvent) -> HandledTouch {
        if self.disabled {
            return HandledTouch::PASS;
        }

        if self.session.take().is_none() {
            trace!("ignoring touch cancel without touch start");
            return HandledTouch::PASS;
        }

        self.clock.set_unadjusted(evt.time);
        self.release(None)
    }

    /// Resets the controller after the current article changed.
    pub fn on_index_changed(&mut self, new_index: usize) {
        if self.is_active() {
            debug!("current article changed to {new_index}, resetting gesture");
        }
        self.reset_state();
    }

    /// Enables or disables all touch handling.
    ///
    /// Disabling resets any gesture in progress, including a pending commit.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled == self.disabled {
            return;
        }

        debug!("overscroll navigation disabled: {disabled}");
        if disabled {
            self.reset();
        }
        self.disabled = disabled;
    }

    /// Returns to idle, dropping any gesture and pending settle.
    pub fn reset(&mut self) {
        if self.is_active() {
            debug!("resetting overscroll gesture");
        }
        self.reset_state();
    }

    /// Finishes the settle animation if it's done.
    ///
    /// Returns the navigation request when a commit settles.
    pub fn advance_animations(&mut self) -> Option<NavigationRequest> {
        let OverscrollOffset::Animation { anim, settle } = &self.offset else {
            return None;
        };

        if !anim.is_done() {
            return None;
        }

        let settle = *settle;
        self.reset_state();

        match settle {
            Settle::Commit { target } => {
                debug!("commit settled, navigating to article {target}");
                Some(NavigationRequest { target })
            }
            Settle::SpringBack => {
                debug!("spring-back settled");
                None
            }
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.offset.is_animation_ongoing()
    }

    pub fn update_options(&mut self, options: Options) {
        self.options = options;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Damped overscroll offset as currently displayed, never negative.
    pub fn offset(&self) -> f64 {
        self.offset.current().max(0.)
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animation_ongoing()
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.offset.settle(), Some(Settle::Commit { .. }))
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether a release now would commit.
    pub fn overscroll_ready(&self) -> bool {
        self.offset.target() >= self.options.threshold
    }

    pub fn render_state(&self) -> RenderState {
        let transition = match &self.offset {
            OverscrollOffset::Animation { anim, settle } => Transition::for_settle(anim, *settle),
            _ => Transition::None,
        };

        RenderState {
            state: self.state,
            direction: self.direction,
            displayed_offset: self.offset.current(),
            target_offset: self.offset.target(),
            transition,
        }
    }

    pub fn render(&self) -> RenderOutputs {
        derive_styles(&self.render_state(), &self.options)
    }

    fn is_active(&self) -> bool {
        self.state != GestureState::Idle
            || self.session.is_some()
            || !matches!(self.offset, OverscrollOffset::Static(offset) if offset == 0.)
    }

    fn handled(&self) -> HandledTouch {
        HandledTouch {
            prevent_default: self.state == GestureState::Overscrolling && self.offset.is_gesture(),
        }
    }

    fn reset_state(&mut self) {
        self.state = GestureState::Idle;
        self.direction = None;
        self.offset = OverscrollOffset::new();
        self.session = None;
    }

    fn begin_overscroll(&mut self, session: &mut TouchSession, direction: Direction) {
        debug!("overscrolling towards {direction:?}");

        session.locked = Some(direction);
        self.state = GestureState::Overscrolling;
        self.direction = Some(direction);
        self.offset = OverscrollOffset::Gesture(DragGesture::new(self.options.rubber_band()));
    }

    fn drag_to(&mut self, session: &TouchSession, y: f64, time: Duration) {
        let Some(direction) = self.direction else {
            return;
        };

        let raw = (y - session.reference_y) * direction.drag_sign();
        if raw <= 0. {
            debug!("dragged back into the content, demoting to scrolling");
            self.state = GestureState::Scrolling;
            self.direction = None;
            self.offset = OverscrollOffset::new();
            return;
        }

        if let Some(gesture) = self.offset.gesture_mut() {
            gesture.update(raw, time);
        }
    }

    /// Starts the settle animation for a released touch.
    ///
    /// `current_index` is `None` when the release must not commit.
    fn release(&mut self, current_index: Option<usize>) -> HandledTouch {
        let (GestureState::Overscrolling, Some(direction)) = (self.state, self.direction) else {
            self.reset_state();
            return HandledTouch::PASS;
        };

        let Some(gesture) = self.offset.gesture_mut() else {
            self.reset_state();
            return HandledTouch::PASS;
        };

        // Take into account any idle time between the last event and now.
        gesture.tracker.push(0., self.clock.now_unadjusted());

        let current = gesture.damped();
        let velocity = gesture.damped_velocity();

        let target = current_index
            .filter(|_| current >= self.options.threshold)
            .and_then(|index| direction.apply(index));

        self.offset = match target {
            Some(target) => {
                debug!("released at {current:.1}, committing to article {target}");
                let anim = Animation::new(
                    self.clock.clone(),
                    current,
                    self.options.commit_offset(),
                    velocity,
                    self.options.commit_anim,
                );
                OverscrollOffset::Animation {
                    anim,
                    settle: Settle::Commit { target },
                }
            }
            None => {
                debug!("released at {current:.1}, springing back");
                let anim = Animation::new(
                    self.clock.clone(),
                    current,
                    0.,
                    velocity,
                    self.options.spring_back_anim,
                );
                OverscrollOffset::Animation {
                    anim,
                    settle: Settle::SpringBack,
                }
            }
        };

        HandledTouch::CONSUMED
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        let target = self.offset.target();
        assert!(target >= 0., "offset target must not be negative: {target}");
        assert!(self.offset() >= 0.);

        assert_eq!(
            self.direction.is_some(),
            self.state == GestureState::Overscrolling,
            "direction must be set exactly while overscrolling"
        );

        if self.is_committing() {
            assert!(self.is_animating());
        }

        match &self.offset {
            OverscrollOffset::Static(offset) => {
                assert_eq!(*offset, 0., "static offset is always at rest");
            }
            OverscrollOffset::Gesture(gesture) => {
                assert_eq!(self.state, GestureState::Overscrolling);
                assert!(gesture.damped() < self.options.max_overscroll);
                let session = self.session.expect("gesture without touch session");
                assert_eq!(session.locked, self.direction, "direction must stay locked");
            }
            OverscrollOffset::Animation { .. } => {
                assert_eq!(self.state, GestureState::Overscrolling);
                assert!(self.session.is_none(), "settling after release");
            }
        }

        if let (Some(session), Some(direction)) = (self.session, self.direction) {
            assert_eq!(session.locked, Some(direction));
        }

        if self.state == GestureState::Idle {
            assert!(!self.is_animating());
        }

        if self.disabled {
            assert_eq!(self.state, GestureState::Idle);
            assert!(self.session.is_none());
        }
    }
}
