//! Derived visual outputs for the host view.
//!
//! Everything here is a pure function of [`RenderState`], recomputed by the host after every
//! mutation and every animation frame.

use serde::Serialize;

use super::{Direction, GestureState, Options, Settle};
use crate::animation::Animation;

/// Controller state that the render outputs are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub state: GestureState,
    pub direction: Option<Direction>,
    /// Displayed offset, may overshoot below zero while springing back.
    pub displayed_offset: f64,
    /// Offset the controller is heading to.
    pub target_offset: f64,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderOutputs {
    /// Transform of the article content, `None` when no transform should be applied at all.
    pub content: Option<Translate>,
    /// Preview of the previous article, above the content.
    pub top_preview: PreviewStyle,
    /// Preview of the next article, below the content.
    pub bottom_preview: PreviewStyle,
    pub transition: Transition,
    pub state: GestureState,
    pub direction: Option<Direction>,
    pub overscroll_ready: bool,
    pub is_animating: bool,
    pub is_committing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Translate {
    /// Vertical translation in logical pixels, positive is down.
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewStyle {
    pub opacity: f64,
    /// Vertical translation in percent of the panel height.
    ///
    /// `-100` is parked fully above the viewport, `100` fully below, `0` is fully on-screen.
    pub translate_y_percent: f64,
}

/// How the host should interpolate between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Transition {
    /// Values follow the finger directly.
    None,
    /// Returning to rest after a release below the threshold.
    Settle { duration_ms: u64, curve: &'static str },
    /// Revealing the adjacent article after a release past the threshold.
    Commit { duration_ms: u64, curve: &'static str },
}

impl Transition {
    /// Describes a running settle animation.
    pub fn for_settle(anim: &Animation, settle: Settle) -> Self {
        let duration_ms = u64::try_from(anim.duration().as_millis()).unwrap_or(u64::MAX);
        let curve = anim.curve().map_or("spring", |curve| curve.name());

        match settle {
            Settle::Commit { .. } => Transition::Commit { duration_ms, curve },
            Settle::SpringBack => Transition::Settle { duration_ms, curve },
        }
    }
}

impl PreviewStyle {
    pub const PARKED_ABOVE: Self = Self {
        opacity: 0.,
        translate_y_percent: -100.,
    };

    pub const PARKED_BELOW: Self = Self {
        opacity: 0.,
        translate_y_percent: 100.,
    };
}

pub fn derive_styles(state: &RenderState, options: &Options) -> RenderOutputs {
    let offset = state.displayed_offset.max(0.);

    let content = if state.state == GestureState::Idle && state.displayed_offset == 0. {
        None
    } else {
        let shift = state.displayed_offset * options.content_shift;
        let translate_y = match state.direction {
            Some(Direction::Prev) => shift,
            Some(Direction::Next) => -shift,
            None => 0.,
        };
        Some(Translate { translate_y })
    };

    let opacity = (offset / options.opacity_ramp).min(1.);
    let progress = (offset / options.max_overscroll).min(1.);

    let top_preview = if state.direction == Some(Direction::Prev) {
        PreviewStyle {
            opacity,
            translate_y_percent: -100. + 100. * progress,
        }
    } else {
        PreviewStyle::PARKED_ABOVE
    };

    let bottom_preview = if state.direction == Some(Direction::Next) {
        PreviewStyle {
            opacity,
            translate_y_percent: 100. - 100. * progress,
        }
    } else {
        PreviewStyle::PARKED_BELOW
    };

    let is_committing = matches!(state.transition, Transition::Commit { .. });
    let is_animating = is_committing || matches!(state.transition, Transition::Settle { .. });

    RenderOutputs {
        content,
        top_preview,
        bottom_preview,
        transition: state.transition,
        state: state.state,
        direction: state.direction,
        overscroll_ready: state.target_offset >= options.threshold,
        is_animating,
        is_committing,
    }
}
