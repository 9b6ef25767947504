use crate::foundation::{
    core::{Fps, FrameIndex, FrameRange},
    error::{OrreryError, OrreryResult},
};

/// Evenly spaced sample times covering `[0, seconds]`, both ends included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSchedule {
    fps: Fps,
    seconds: f64,
    frame_count: u64,
}

impl FrameSchedule {
    pub fn new(fps: Fps, seconds: f64) -> OrreryResult<Self> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(OrreryError::validation(format!(
                "animation duration must be a positive number of seconds (got {seconds})"
            )));
        }
        let frame_count = fps.secs_to_frames_floor(seconds);
        if frame_count == 0 {
            return Err(OrreryError::validation(format!(
                "{seconds}s at {} fps yields no frames",
                fps.as_f64()
            )));
        }
        Ok(Self {
            fps,
            seconds,
            frame_count,
        })
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn len(&self) -> u64 {
        self.frame_count
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.frame_count),
        }
    }

    /// Animation time of frame `f`, in seconds.
    ///
    /// Frames past the end clamp to the last sample.
    pub fn sample_time(&self, f: FrameIndex) -> f64 {
        if self.frame_count <= 1 {
            return 0.0;
        }
        let last = self.frame_count - 1;
        let i = f.0.min(last);
        if i == last {
            return self.seconds;
        }
        (i as f64) * self.seconds / (last as f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, f64)> + '_ {
        (0..self.frame_count).map(|i| (FrameIndex(i), self.sample_time(FrameIndex(i))))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/schedule.rs"]
mod tests;
