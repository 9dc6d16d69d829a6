use crate::utils::FloatOrInt;

/// Gesture tuning for the overscroll navigation controller.
///
/// All distances are in logical pixels.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Overscroll {
    /// Damped offset at which a release commits the navigation.
    #[knuffel(child, unwrap(argument), default = Self::default().threshold)]
    pub threshold: FloatOrInt<0, 65535>,
    /// Asymptotic limit of the damped offset.
    #[knuffel(child, unwrap(argument), default = Self::default().max_overscroll)]
    pub max_overscroll: FloatOrInt<1, 65535>,
    /// Vertical movement below which a touch is not yet classified.
    #[knuffel(child, unwrap(argument), default = Self::default().dead_zone)]
    pub dead_zone: FloatOrInt<0, 1000>,
    /// Extra offset past `max-overscroll` that a committed preview settles at.
    #[knuffel(child, unwrap(argument), default = Self::default().commit_reveal)]
    pub commit_reveal: FloatOrInt<0, 65535>,
    /// Fraction of the offset that the content moves away from the preview.
    #[knuffel(child, unwrap(argument), default = Self::default().content_shift)]
    pub content_shift: FloatOrInt<0, 1>,
    /// Offset at which a preview panel reaches full opacity.
    #[knuffel(child, unwrap(argument), default = Self::default().opacity_ramp)]
    pub opacity_ramp: FloatOrInt<1, 65535>,
    /// Widest viewport that still counts as a touch layout.
    #[knuffel(child, unwrap(argument), default = Self::default().mobile_max_width)]
    pub mobile_max_width: FloatOrInt<0, 65535>,
}

impl Default for Overscroll {
    fn default() -> Self {
        Self {
            threshold: FloatOrInt(120.),
            max_overscroll: FloatOrInt(250.),
            dead_zone: FloatOrInt(10.),
            commit_reveal: FloatOrInt(50.),
            content_shift: FloatOrInt(0.3),
            opacity_ramp: FloatOrInt(60.),
            mobile_max_width: FloatOrInt(768.),
        }
    }
}
