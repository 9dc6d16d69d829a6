use std::str::FromStr;

use knuffel::errors::DecodeError;
use knuffel::Decode as _;
use miette::miette;

use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(1.))]
    pub slowdown: FloatOrInt<0, 1000>,
    #[knuffel(child, default)]
    pub spring_back: SpringBackAnim,
    #[knuffel(child, default)]
    pub commit: CommitAnim,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            slowdown: FloatOrInt(1.),
            spring_back: Default::default(),
            commit: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub kind: AnimationKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    Easing(EasingParams),
    Spring(SpringParams),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingParams {
    pub duration_ms: u32,
    pub curve: AnimationCurve,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCurve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
    /// Overshoots the target slightly before settling.
    EaseOutBack,
    CubicBezier(CubicBezierCurve),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping_ratio: f64,
    pub stiffness: u32,
    pub epsilon: f64,
}

/// Settle animation after a release below the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringBackAnim(pub Animation);

impl Default for SpringBackAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            kind: AnimationKind::Easing(EasingParams {
                duration_ms: 400,
                curve: AnimationCurve::EaseOutBack,
            }),
        })
    }
}

/// Settle animation after a release at or past the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitAnim(pub Animation);

impl Default for CommitAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            kind: AnimationKind::Easing(EasingParams {
                duration_ms: 300,
                curve: AnimationCurve::EaseOutCubic,
            }),
        })
    }
}

impl Default for EasingParams {
    fn default() -> Self {
        Self {
            duration_ms: 250,
            curve: AnimationCurve::EaseOutCubic,
        }
    }
}

impl FromStr for AnimationCurve {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "ease-out-quad" => Ok(Self::EaseOutQuad),
            "ease-out-cubic" => Ok(Self::EaseOutCubic),
            "ease-out-expo" => Ok(Self::EaseOutExpo),
            "ease-out-back" => Ok(Self::EaseOutBack),
            _ => Err(miette!(
                "unknown curve `{s}`, expected one of: linear, ease-out-quad, ease-out-cubic, \
                 ease-out-expo, ease-out-back"
            )),
        }
    }
}

#[derive(knuffel::Decode, Debug, Default)]
struct AnimationNode {
    #[knuffel(child)]
    off: bool,
    #[knuffel(child, unwrap(argument))]
    duration_ms: Option<u32>,
    #[knuffel(child, unwrap(argument, str))]
    curve: Option<AnimationCurve>,
    #[knuffel(child)]
    cubic_bezier: Option<CubicBezierNode>,
    #[knuffel(child)]
    spring: Option<SpringNode>,
}

#[derive(knuffel::Decode, Debug)]
struct CubicBezierNode {
    #[knuffel(argument)]
    x1: FloatOrInt<0, 1>,
    #[knuffel(argument)]
    y1: FloatOrInt<-10, 10>,
    #[knuffel(argument)]
    x2: FloatOrInt<0, 1>,
    #[knuffel(argument)]
    y2: FloatOrInt<-10, 10>,
}

#[derive(knuffel::Decode, Debug)]
struct SpringNode {
    #[knuffel(property)]
    damping_ratio: FloatOrInt<0, 10>,
    #[knuffel(property)]
    stiffness: u32,
    #[knuffel(property)]
    epsilon: FloatOrInt<0, 1>,
}

impl Animation {
    fn decode_with_default<S: knuffel::traits::ErrorSpan>(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
        default: Self,
    ) -> Result<Self, DecodeError<S>> {
        let parsed = AnimationNode::decode_node(node, ctx)?;

        let has_easing =
            parsed.duration_ms.is_some() || parsed.curve.is_some() || parsed.cubic_bezier.is_some();

        if parsed.curve.is_some() && parsed.cubic_bezier.is_some() {
            ctx.emit_error(DecodeError::unexpected(
                node,
                "node",
                "`curve` and `cubic-bezier` cannot be set at the same time",
            ));
        }

        let kind = if let Some(spring) = parsed.spring {
            if has_easing {
                ctx.emit_error(DecodeError::unexpected(
                    node,
                    "node",
                    "`spring` cannot be combined with `duration-ms`, `curve` or `cubic-bezier`",
                ));
            }

            if spring.stiffness == 0 {
                ctx.emit_error(DecodeError::unexpected(
                    node,
                    "node",
                    "spring stiffness must be greater than 0",
                ));
            }

            if spring.damping_ratio.0 <= 0. {
                ctx.emit_error(DecodeError::unexpected(
                    node,
                    "node",
                    "spring damping-ratio must be greater than 0",
                ));
            }

            if spring.epsilon.0 <= 0. {
                ctx.emit_error(DecodeError::unexpected(
                    node,
                    "node",
                    "spring epsilon must be greater than 0",
                ));
            }

            AnimationKind::Spring(SpringParams {
                damping_ratio: spring.damping_ratio.0,
                stiffness: spring.stiffness.max(1),
                epsilon: spring.epsilon.0,
            })
        } else {
            let mut params = match default.kind {
                AnimationKind::Easing(params) => params,
                AnimationKind::Spring(_) => EasingParams::default(),
            };

            if let Some(duration_ms) = parsed.duration_ms {
                params.duration_ms = duration_ms;
            }

            if let Some(curve) = parsed.curve {
                params.curve = curve;
            }

            if let Some(bezier) = parsed.cubic_bezier {
                params.curve = AnimationCurve::CubicBezier(CubicBezierCurve {
                    x1: bezier.x1.0,
                    y1: bezier.y1.0,
                    x2: bezier.x2.0,
                    y2: bezier.y2.0,
                });
            }

            AnimationKind::Easing(params)
        };

        Ok(Self {
            off: parsed.off,
            kind,
        })
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for SpringBackAnim {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        Ok(Self(Animation::decode_with_default(node, ctx, default)?))
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for CommitAnim {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        Ok(Self(Animation::decode_with_default(node, ctx, default)?))
    }
}
