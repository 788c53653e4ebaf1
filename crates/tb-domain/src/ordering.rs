//! Pure ordering primitives (C1). No I/O, no timestamps, no randomness —
//! ported from `original_source/core-service/internal/usecase/common/order.go`.
//!
//! Generic over any integer-like position type via a small local trait
//! rather than pulling in `num-traits`, which nothing else in this
//! workspace depends on.

use std::ops::{Add, Sub};

pub trait OrdinalPos: Copy + Ord + Add<Output = Self> + Sub<Output = Self> {
    const ZERO: Self;
    const ONE: Self;
}

impl OrdinalPos for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

impl OrdinalPos for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

/// The half-open range of sibling positions to shift, and by how much, to
/// make room for (or close the gap left by) a moving element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan<T> {
    pub from_incl: T,
    pub to_incl: T,
    pub delta: T,
    pub need: bool,
}

/// Compute the shift range needed to move an element from `from` to `to`
/// within a dense `{0..N-1}` ordering, without touching the moving element
/// itself.
///
/// - `from == to`: no-op.
/// - `to < from`: elements in `[to, from-1]` shift `+1` (make room above).
/// - `to > from`: elements in `[from+1, to]` shift `-1` (close the gap below).
pub fn calc_shift<T: OrdinalPos>(from: T, to: T) -> ShiftPlan<T> {
    if from == to {
        return ShiftPlan {
            from_incl: from,
            to_incl: from,
            delta: T::ZERO,
            need: false,
        };
    }
    if to < from {
        ShiftPlan {
            from_incl: to,
            to_incl: from - T::ONE,
            delta: T::ONE,
            need: true,
        }
    } else {
        ShiftPlan {
            from_incl: from + T::ONE,
            to_incl: to,
            delta: T::ZERO - T::ONE,
            need: true,
        }
    }
}

/// Bound `pos` to the closed interval `[lo, hi]`.
pub fn clamp<T: OrdinalPos>(pos: T, lo: T, hi: T) -> T {
    if pos < lo {
        lo
    } else if pos > hi {
        hi
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_position_needs_no_shift() {
        let plan = calc_shift(2_i64, 2);
        assert!(!plan.need);
    }

    #[test]
    fn moving_earlier_shifts_intervening_up() {
        // [A@0 B@1 C@2 D@3], move D(3) to 1: B,C shift +1 -> B@2 C@3... wait
        // from=3, to=1: range [1, 2] shift +1.
        let plan = calc_shift(3_i64, 1);
        assert_eq!(plan.from_incl, 1);
        assert_eq!(plan.to_incl, 2);
        assert_eq!(plan.delta, 1);
        assert!(plan.need);
    }

    #[test]
    fn moving_later_shifts_intervening_down() {
        // spec scenario 2: [A@0,B@1,C@2,D@3], MoveColumn(A,2): from=0, to=2
        let plan = calc_shift(0_i64, 2);
        assert_eq!(plan.from_incl, 1);
        assert_eq!(plan.to_incl, 2);
        assert_eq!(plan.delta, -1);
        assert!(plan.need);
    }

    #[test]
    fn clamp_bounds_into_range() {
        assert_eq!(clamp(-1_i64, 0, 3), 0);
        assert_eq!(clamp(10_i64, 0, 3), 3);
        assert_eq!(clamp(2_i64, 0, 3), 2);
    }

    #[test]
    fn clamp_is_inclusive_of_n_for_tail_insert() {
        // cross-column insert clamps to [0, n] (n inclusive — tail append)
        assert_eq!(clamp(5_i64, 0, 2), 2);
        assert_eq!(clamp(2_i64, 0, 2), 2);
    }
}
