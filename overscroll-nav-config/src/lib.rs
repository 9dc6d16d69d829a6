//! Configuration for the overscroll navigation controller.
//!
//! The config is written in [KDL](https://kdl.dev) and decoded with `knuffel`. Every section and
//! every field is optional; anything missing falls back to the defaults in [`DEFAULT_CONFIG`].

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context, IntoDiagnostic};
use tracing::debug;

pub mod animations;
pub mod overscroll;
pub mod utils;

pub use crate::animations::{
    Animation, AnimationCurve, AnimationKind, Animations, CommitAnim, CubicBezierCurve,
    EasingParams, SpringBackAnim, SpringParams,
};
pub use crate::overscroll::Overscroll;
pub use crate::utils::FloatOrInt;

/// The default config, with every option spelled out.
pub const DEFAULT_CONFIG: &str = r#"overscroll {
    // Release at or past this damped offset navigates to the adjacent article.
    threshold 120

    // The damped offset approaches this value but never reaches it.
    max-overscroll 250

    // Movement needed before a touch is classified as a gesture.
    dead-zone 10

    // How far past max-overscroll a committed preview settles.
    commit-reveal 50

    // Fraction of the offset that the article content yields to the preview.
    content-shift 0.3

    // Offset at which a preview panel is fully opaque.
    opacity-ramp 60

    // Wider viewports are treated as desktop and disable the gesture.
    mobile-max-width 768
}

animations {
    // Uncomment to make every settle animation finish instantly.
    // off

    // Values above 1 slow animations down.
    slowdown 1.0

    spring-back {
        duration-ms 400
        curve "ease-out-back"
    }

    commit {
        duration-ms 300
        curve "ease-out-cubic"
    }
}
"#;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub overscroll: Overscroll,
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        Self::load_internal(path).context("error loading config")
    }

    fn load_internal(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        config.validate()?;

        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }

    /// Checks constraints between options that can't be expressed per field.
    pub fn validate(&self) -> miette::Result<()> {
        let overscroll = &self.overscroll;

        if overscroll.threshold.0 >= overscroll.max_overscroll.0 {
            miette::bail!(
                "overscroll threshold ({}) must be less than max-overscroll ({}), \
                 otherwise a release can never navigate",
                overscroll.threshold.0,
                overscroll.max_overscroll.0,
            );
        }

        if overscroll.dead_zone.0 >= overscroll.threshold.0 {
            miette::bail!(
                "overscroll dead-zone ({}) must be less than threshold ({})",
                overscroll.dead_zone.0,
                overscroll.threshold.0,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn default_config_matches_defaults() {
        let parsed = do_parse(DEFAULT_CONFIG);
        assert_eq!(parsed, Config::default());
        parsed.validate().unwrap();
    }

    #[test]
    fn empty_config_uses_defaults() {
        let parsed = do_parse("");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn parse_overscroll() {
        let parsed = do_parse(
            r#"
            overscroll {
                threshold 100.5
                max-overscroll 300
                dead-zone 8
            }
            "#,
        );

        assert_debug_snapshot!(parsed.overscroll, @r"
        Overscroll {
            threshold: FloatOrInt(
                100.5,
            ),
            max_overscroll: FloatOrInt(
                300.0,
            ),
            dead_zone: FloatOrInt(
                8.0,
            ),
            commit_reveal: FloatOrInt(
                50.0,
            ),
            content_shift: FloatOrInt(
                0.3,
            ),
            opacity_ramp: FloatOrInt(
                60.0,
            ),
            mobile_max_width: FloatOrInt(
                768.0,
            ),
        }
        ");
    }

    #[test]
    fn parse_animations() {
        let parsed = do_parse(
            r#"
            animations {
                slowdown 2
                spring-back {
                    spring damping-ratio=0.8 stiffness=400 epsilon=0.0001
                }
                commit {
                    cubic-bezier 0.2 0 0 1
                }
            }
            "#,
        );

        let animations = parsed.animations;
        assert!(!animations.off);
        assert_eq!(animations.slowdown.0, 2.);
        assert_eq!(
            animations.spring_back.0,
            Animation {
                off: false,
                kind: AnimationKind::Spring(SpringParams {
                    damping_ratio: 0.8,
                    stiffness: 400,
                    epsilon: 0.0001,
                }),
            }
        );
        assert_eq!(
            animations.commit.0,
            Animation {
                off: false,
                kind: AnimationKind::Easing(EasingParams {
                    duration_ms: 300,
                    curve: AnimationCurve::CubicBezier(CubicBezierCurve {
                        x1: 0.2,
                        y1: 0.,
                        x2: 0.,
                        y2: 1.,
                    }),
                }),
            }
        );
    }

    #[test]
    fn partial_animation_keeps_default_duration() {
        let parsed = do_parse(
            r#"
            animations {
                spring-back {
                    curve "linear"
                }
                commit {
                    off
                }
            }
            "#,
        );

        assert_eq!(
            parsed.animations.spring_back.0.kind,
            AnimationKind::Easing(EasingParams {
                duration_ms: 400,
                curve: AnimationCurve::Linear,
            })
        );
        assert!(parsed.animations.commit.0.off);
        assert_eq!(
            parsed.animations.commit.0.kind,
            CommitAnim::default().0.kind
        );
    }

    #[test]
    fn unknown_curve_is_an_error() {
        let result = Config::parse(
            "test.kdl",
            r#"
            animations {
                commit {
                    curve "bouncy"
                }
            }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn spring_and_easing_cannot_mix() {
        let result = Config::parse(
            "test.kdl",
            r#"
            animations {
                commit {
                    duration-ms 200
                    spring damping-ratio=1 stiffness=800 epsilon=0.001
                }
            }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn spring_that_never_settles_is_an_error() {
        for spring in [
            "spring damping-ratio=0.8 stiffness=400 epsilon=0",
            "spring damping-ratio=0 stiffness=400 epsilon=0.0001",
        ] {
            let result = Config::parse(
                "test.kdl",
                &format!("animations {{ spring-back {{ {spring}; }} }}"),
            );
            assert!(result.is_err(), "{spring}");
        }
    }

    #[test]
    fn out_of_range_values_are_errors() {
        let result = Config::parse(
            "test.kdl",
            r#"
            overscroll {
                content-shift 1.5
            }
            "#,
        );
        assert!(result.is_err());

        let result = Config::parse(
            "test.kdl",
            r#"
            overscroll {
                threshold -5
            }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn threshold_must_be_below_max_overscroll() {
        let parsed = do_parse(
            r#"
            overscroll {
                threshold 250
                max-overscroll 250
            }
            "#,
        );
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn dead_zone_must_be_below_threshold() {
        let parsed = do_parse(
            r#"
            overscroll {
                threshold 10
                dead-zone 10
            }
            "#,
        );
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join(format!(
            "overscroll-nav-config-test-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.kdl");
        std::fs::write(&path, "overscroll { threshold 90; }").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.overscroll.threshold.0, 90.);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/overscroll-nav/config.kdl");
        assert!(Config::load(path).is_err());
    }
}
