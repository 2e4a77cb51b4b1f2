use super::value::TrackValue;

/// One sample point of a curve with `N` float components.
///
/// Tangents are only read by cubic interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFrame<const N: usize> {
    pub value: [f32; N],
    pub in_tangent: [f32; N],
    pub out_tangent: [f32; N],
    pub time: f32,
}

pub type ScalarFrame = KeyFrame<1>;
pub type VectorFrame = KeyFrame<3>;
pub type QuaternionFrame = KeyFrame<4>;

impl<const N: usize> Default for KeyFrame<N> {
    fn default() -> Self {
        Self {
            value: [0.0; N],
            in_tangent: [0.0; N],
            out_tangent: [0.0; N],
            time: 0.0,
        }
    }
}

impl<const N: usize> KeyFrame<N> {
    pub fn new(time: f32, value: [f32; N]) -> Self {
        Self {
            value,
            time,
            ..Self::default()
        }
    }

    pub fn from_value<T: TrackValue<N>>(time: f32, value: T) -> Self {
        Self::new(time, value.components())
    }

    pub fn with_tangents(mut self, in_tangent: [f32; N], out_tangent: [f32; N]) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }

    /// The keyframe value as `T`, normalized where `T` requires it.
    pub fn value<T: TrackValue<N>>(&self) -> T {
        T::cast(&self.value)
    }

    /// The incoming tangent reinterpreted as `T` without normalization.
    pub fn raw_in_tangent<T: TrackValue<N>>(&self) -> T {
        T::from_raw(&self.in_tangent)
    }

    /// The outgoing tangent reinterpreted as `T` without normalization.
    pub fn raw_out_tangent<T: TrackValue<N>>(&self) -> T {
        T::from_raw(&self.out_tangent)
    }
}
