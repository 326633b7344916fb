use std::ops::{Add, Sub};

use num_traits::{ToPrimitive, Zero};

/// Element of a running or sliding sum.
///
/// Windowed aggregation evicts samples by subtracting them from the running
/// total, so subtraction is required alongside addition.
pub trait WindowValue: Copy + Add<Output = Self> + Sub<Output = Self> {}

impl<T: Copy + Add<Output = T> + Sub<Output = T>> WindowValue for T {}

/// Sample that can report a delta against a previous observation and be
/// compared against its zero/empty value.
pub trait DeltaValue: Clone + PartialEq + Zero + Sub<Output = Self> {}

impl<T: Clone + PartialEq + Zero + Sub<Output = T>> DeltaValue for T {}

/// Scalar sample convertible to `f64` for exponential smoothing.
pub trait SmoothValue: Copy + ToPrimitive {}

impl<T: Copy + ToPrimitive> SmoothValue for T {}
