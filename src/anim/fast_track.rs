use super::track::{self, KeyframeTrack, Track};
use super::value::TrackValue;
use glam::{Quat, Vec3};

/// Resolution of the frame lookup table, in samples per second of track time.
pub const SAMPLES_PER_SECOND: f32 = 60.0;

/// A [`Track`] with a precomputed frame lookup table.
///
/// Sampling gives the same results as the source track; the bracketing
/// keyframe is found through the table instead of a linear scan.
#[derive(Debug, Clone, PartialEq)]
pub struct FastTrack<T, const N: usize> {
    track: Track<T, N>,
    sampled_frames: Vec<u32>,
}

pub type FastScalarTrack = FastTrack<f32, 1>;
pub type FastVectorTrack = FastTrack<Vec3, 3>;
pub type FastQuaternionTrack = FastTrack<Quat, 4>;

impl<T, const N: usize> Default for FastTrack<T, N> {
    fn default() -> Self {
        Self {
            track: Track::default(),
            sampled_frames: Vec::new(),
        }
    }
}

impl<T, const N: usize> From<Track<T, N>> for FastTrack<T, N> {
    fn from(track: Track<T, N>) -> Self {
        let mut fast = Self {
            track,
            sampled_frames: Vec::new(),
        };
        fast.update_index_lookup_table();
        fast
    }
}

impl<T, const N: usize> FastTrack<T, N> {
    pub fn track(&self) -> &Track<T, N> {
        &self.track
    }

    pub fn sampled_frames(&self) -> &[u32] {
        &self.sampled_frames
    }

    fn update_index_lookup_table(&mut self) {
        let frames = self.track.frames();
        let len = frames.len();
        self.sampled_frames.clear();
        if len <= 1 {
            return;
        }

        let start = frames[0].time;
        let duration = frames[len - 1].time - start;
        if duration <= 0.0 {
            return;
        }

        let num_samples = ((duration * SAMPLES_PER_SECOND) as usize).max(1);
        self.sampled_frames = (0..num_samples)
            .map(|i| {
                let time = start + duration * (i as f32 / num_samples as f32);
                let index = frames
                    .iter()
                    .rposition(|f| time >= f.time)
                    .unwrap_or(0)
                    .min(len - 2);
                index as u32
            })
            .collect();
    }

    /// Same contract as [`Track::frame_index`], resolved through the table.
    pub fn frame_index(&self, time: f32, looping: bool) -> Option<usize> {
        let frames = self.track.frames();
        let len = frames.len();
        if len <= 1 || self.sampled_frames.is_empty() {
            return None;
        }

        let start = frames[0].time;
        let duration = frames[len - 1].time - start;

        let time = if looping {
            track::wrap_time(time, start, duration)
        } else {
            if time <= frames[0].time {
                return Some(0);
            }
            if time >= frames[len - 2].time {
                return Some(len - 2);
            }
            time
        };
        if time.is_nan() {
            return None;
        }

        let samples = self.sampled_frames.len();
        let slot = (((time - start) / duration) * samples as f32) as usize;
        let mut index = self.sampled_frames[slot.min(samples - 1)] as usize;

        // The table is exact at each slot's start; step across keys that
        // fall between the slot start and `time`.
        while index + 2 < len && frames[index + 1].time <= time {
            index += 1;
        }
        while index > 0 && frames[index].time > time {
            index -= 1;
        }

        Some(index)
    }
}

impl<T: TrackValue<N>, const N: usize> KeyframeTrack for FastTrack<T, N> {
    type Value = T;

    fn sample(&self, time: f32, looping: bool) -> T {
        let index = self.frame_index(time, looping);
        track::sample_frames(
            self.track.frames(),
            self.track.interpolation(),
            index,
            time,
            looping,
        )
    }

    fn start_time(&self) -> f32 {
        self.track.start_time()
    }

    fn end_time(&self) -> f32 {
        self.track.end_time()
    }

    fn len(&self) -> usize {
        self.track.len()
    }
}

/// Builds a [`FastTrack`] from a finished track.
pub fn optimize_track<T: Clone, const N: usize>(track: &Track<T, N>) -> FastTrack<T, N> {
    FastTrack::from(track.clone())
}
