use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Highest value the speed slider accepts.
pub const MAX_SPEED_SLIDER: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Move playback parameters.
pub struct PlaybackOptions {
    /// Speed slider value; moves per second is its square.
    #[schemars(title = "Anim Speed", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub speed: f64,
    /// Keep playing through checkpoints without pausing.
    #[schemars(title = "Auto Animate")]
    pub auto_animate: bool,
    /// Easing curve applied to each move's progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Fixed tick rate of the headless player, in ticks per second.
    #[schemars(skip)]
    pub tick_hz: u32,
}

impl PlaybackOptions {
    /// Progress per second after the slider's quadratic mapping. A
    /// non-finite slider value stops playback.
    #[must_use]
    pub fn effective_speed(&self) -> f64 {
        if !self.speed.is_finite() {
            return 0.0;
        }
        let slider = self.speed.clamp(0.0, MAX_SPEED_SLIDER);
        slider * slider
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            auto_animate: false,
            easing: EasingFunction::SineInOut,
            tick_hz: 60,
        }
    }
}
