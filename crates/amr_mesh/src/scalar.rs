//! Scalar - numeric contract for values stored in an adaptive mesh.
//!
//! The mesh is generic over its stored value type. Geometry needs real
//! division and NaN, the merge operator needs negation, so in practice the
//! implementors are the IEEE float types.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Floating point value that can live in an [`AdaptiveMesh`](crate::AdaptiveMesh).
pub trait Scalar:
  Copy
  + Debug
  + PartialOrd
  + Add<Output = Self>
  + Sub<Output = Self>
  + Mul<Output = Self>
  + Div<Output = Self>
  + Neg<Output = Self>
  + AddAssign
  + Send
  + Sync
  + 'static
{
  /// Additive identity. Returned for absent cells.
  const ZERO: Self;
  /// Multiplicative identity.
  const ONE: Self;
  /// `2`, the per-axis refinement ratio.
  const TWO: Self;

  /// Quiet NaN, used as the error coordinate.
  fn nan() -> Self;

  /// Absolute value.
  fn abs(self) -> Self;

  /// Lossy conversion from a grid index or count.
  fn from_u64(value: u64) -> Self;

  /// Floor to a grid index. `None` for negative, NaN or too large values.
  fn floor_to_u64(self) -> Option<u64>;

  /// Whether this value is NaN.
  fn is_nan(self) -> bool;
}

macro_rules! impl_scalar_for_float {
  ($t:ty) => {
    impl Scalar for $t {
      const ZERO: Self = 0.0;
      const ONE: Self = 1.0;
      const TWO: Self = 2.0;

      #[inline]
      fn nan() -> Self {
        <$t>::NAN
      }

      #[inline]
      fn abs(self) -> Self {
        <$t>::abs(self)
      }

      #[inline]
      fn from_u64(value: u64) -> Self {
        value as $t
      }

      #[inline]
      fn floor_to_u64(self) -> Option<u64> {
        let floored = self.floor();
        if floored.is_nan() || floored < 0.0 || floored >= u64::MAX as $t {
          return None;
        }
        Some(floored as u64)
      }

      #[inline]
      fn is_nan(self) -> bool {
        <$t>::is_nan(self)
      }
    }
  };
}

impl_scalar_for_float!(f32);
impl_scalar_for_float!(f64);
