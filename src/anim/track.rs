use super::frame::KeyFrame;
use super::interpolation::Interpolation;
use super::value::TrackValue;
use glam::{Quat, Vec3};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Common sampling surface of [`Track`] and [`super::FastTrack`].
pub trait KeyframeTrack: Clone + Default {
    type Value;

    fn sample(&self, time: f32, looping: bool) -> Self::Value;

    fn start_time(&self) -> f32;

    fn end_time(&self) -> f32;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(start, end)` when the track has enough frames to be sampled.
    fn span(&self) -> Option<(f32, f32)> {
        (self.len() > 1).then(|| (self.start_time(), self.end_time()))
    }
}

/// Ordered keyframes producing values of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Track<T, const N: usize> {
    frames: Vec<KeyFrame<N>>,
    interpolation: Interpolation,
    _value: PhantomData<T>,
}

pub type ScalarTrack = Track<f32, 1>;
pub type VectorTrack = Track<Vec3, 3>;
pub type QuaternionTrack = Track<Quat, 4>;

impl<T, const N: usize> Default for Track<T, N> {
    fn default() -> Self {
        Self::new(Interpolation::default())
    }
}

impl<T, const N: usize> Track<T, N> {
    pub fn new(interpolation: Interpolation) -> Self {
        Self {
            frames: Vec::new(),
            interpolation,
            _value: PhantomData,
        }
    }

    pub fn from_frames(interpolation: Interpolation, frames: Vec<KeyFrame<N>>) -> Self {
        Self {
            frames,
            interpolation,
            _value: PhantomData,
        }
    }

    pub fn resize(&mut self, len: usize) {
        self.frames.resize(len, KeyFrame::default());
    }

    pub fn push(&mut self, frame: KeyFrame<N>) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[KeyFrame<N>] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [KeyFrame<N>] {
        &mut self.frames
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Index of the frame at or before `time`, never the last frame.
    pub fn frame_index(&self, time: f32, looping: bool) -> Option<usize> {
        frame_index(&self.frames, time, looping)
    }

    /// `time` wrapped (looping) or clamped into the track's range.
    pub fn adjust_time(&self, time: f32, looping: bool) -> f32 {
        adjust_time(&self.frames, time, looping)
    }
}

impl<T: TrackValue<N>, const N: usize> KeyframeTrack for Track<T, N> {
    type Value = T;

    fn sample(&self, time: f32, looping: bool) -> T {
        let index = self.frame_index(time, looping);
        sample_frames(&self.frames, self.interpolation, index, time, looping)
    }

    fn start_time(&self) -> f32 {
        self.frames.first().map_or(0.0, |f| f.time)
    }

    fn end_time(&self) -> f32 {
        self.frames.last().map_or(0.0, |f| f.time)
    }

    fn len(&self) -> usize {
        self.frames.len()
    }
}

impl<T, const N: usize> Index<usize> for Track<T, N> {
    type Output = KeyFrame<N>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Track<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.frames[index]
    }
}

pub(crate) fn wrap_time(time: f32, start: f32, duration: f32) -> f32 {
    let mut wrapped = (time - start) % duration;
    if wrapped < 0.0 {
        wrapped += duration;
    }
    wrapped + start
}

pub(crate) fn frame_index<const N: usize>(
    frames: &[KeyFrame<N>],
    time: f32,
    looping: bool,
) -> Option<usize> {
    let len = frames.len();
    if len <= 1 {
        return None;
    }

    let time = if looping {
        let start = frames[0].time;
        let duration = frames[len - 1].time - start;
        if duration <= 0.0 {
            return None;
        }
        wrap_time(time, start, duration)
    } else {
        if time <= frames[0].time {
            return Some(0);
        }
        if time >= frames[len - 2].time {
            return Some(len - 2);
        }
        time
    };

    frames
        .iter()
        .rposition(|f| time >= f.time)
        .map(|i| i.min(len - 2))
}

pub(crate) fn adjust_time<const N: usize>(frames: &[KeyFrame<N>], time: f32, looping: bool) -> f32 {
    let len = frames.len();
    if len <= 1 {
        return 0.0;
    }

    let start = frames[0].time;
    let end = frames[len - 1].time;
    let duration = end - start;
    if duration <= 0.0 {
        return 0.0;
    }

    if looping {
        wrap_time(time, start, duration)
    } else {
        time.clamp(start, end)
    }
}

pub(crate) fn sample_frames<T: TrackValue<N>, const N: usize>(
    frames: &[KeyFrame<N>],
    interpolation: Interpolation,
    index: Option<usize>,
    time: f32,
    looping: bool,
) -> T {
    let Some(index) = index else {
        return T::default();
    };

    match interpolation {
        Interpolation::Constant => sample_constant(frames, index, time, looping),
        Interpolation::Linear => sample_linear(frames, index, time, looping),
        Interpolation::Cubic => sample_cubic(frames, index, time, looping),
    }
}

fn sample_constant<T: TrackValue<N>, const N: usize>(
    frames: &[KeyFrame<N>],
    index: usize,
    time: f32,
    looping: bool,
) -> T {
    match frames.last() {
        Some(last) if !looping && time >= last.time => last.value(),
        _ => frames.get(index).map_or_else(T::default, |f| f.value()),
    }
}

/// Bracketing frames and the normalized segment parameter for `time`.
fn segment<const N: usize>(
    frames: &[KeyFrame<N>],
    index: usize,
    time: f32,
    looping: bool,
) -> Option<(usize, usize, f32, f32)> {
    let next = index + 1;
    if next >= frames.len() {
        return None;
    }

    let delta = frames[next].time - frames[index].time;
    if delta <= 0.0 {
        return None;
    }

    let track_time = adjust_time(frames, time, looping);
    let t = (track_time - frames[index].time) / delta;
    Some((index, next, t, delta))
}

fn sample_linear<T: TrackValue<N>, const N: usize>(
    frames: &[KeyFrame<N>],
    index: usize,
    time: f32,
    looping: bool,
) -> T {
    let Some((this, next, t, _)) = segment(frames, index, time, looping) else {
        return T::default();
    };

    T::interpolate(frames[this].value(), frames[next].value(), t)
}

fn sample_cubic<T: TrackValue<N>, const N: usize>(
    frames: &[KeyFrame<N>],
    index: usize,
    time: f32,
    looping: bool,
) -> T {
    let Some((this, next, t, delta)) = segment(frames, index, time, looping) else {
        return T::default();
    };

    let point1: T = frames[this].value();
    let slope1: T = frames[this].raw_out_tangent::<T>() * delta;
    let point2: T = frames[next].value();
    let slope2: T = frames[next].raw_in_tangent::<T>() * delta;

    hermite(t, point1, slope1, point2, slope2)
}

pub(crate) fn hermite<T: TrackValue<N>, const N: usize>(
    t: f32,
    point1: T,
    slope1: T,
    point2: T,
    slope2: T,
) -> T {
    let point2 = T::neighborhood(point1, point2);

    let tt = t * t;
    let ttt = tt * t;

    let h1 = 2.0 * ttt - 3.0 * tt + 1.0;
    let h2 = -2.0 * ttt + 3.0 * tt;
    let h3 = ttt - 2.0 * tt + t;
    let h4 = ttt - tt;

    let result = point1 * h1 + point2 * h2 + slope1 * h3 + slope2 * h4;
    result.adjust_hermite_result()
}
