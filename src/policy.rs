//! When the overscroll gesture is available at all.

use overscroll_nav_config::Config;

/// How the article body is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Feed summary rendered by the reader, scrolled by the reader.
    #[default]
    Summary,
    /// Original page embedded in a frame that handles its own touches.
    Original,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f64,
    /// Whether the primary input can produce touch events.
    pub is_touch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePolicy {
    /// Widest viewport that still counts as a touch layout.
    pub mobile_max_width: f64,
}

impl GesturePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mobile_max_width: config.overscroll.mobile_max_width.get(),
        }
    }

    pub fn is_disabled(&self, viewport: Viewport, mode: ContentMode) -> bool {
        mode == ContentMode::Original
            || !viewport.is_touch
            || viewport.width > self.mobile_max_width
    }
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
