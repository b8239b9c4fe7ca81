use crate::foundation::error::{MosaicError, MosaicResult};

pub use kurbo::{Point, Vec2};

/// Frame rate of the host compositions this core schedules for.
///
/// The host UI collects the fade-out head room in frames; it is converted to
/// seconds at this fixed rate before it reaches the scheduler.
pub const HOST_FRAME_RATE: Fps = Fps { num: 30, den: 1 };

/// A frame rate as a rational number of frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator in frames.
    pub num: u32,
    /// Denominator in seconds, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> MosaicResult<Self> {
        if den == 0 {
            return Err(MosaicError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MosaicError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Canvas dimensions of the target composition in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}
