//! Cost algebra.
//!
//! A cost is an additive value with a total order. The additive identity is
//! normally [`Cost::zero`], but a problem may supply its own through
//! [`crate::problem::GraphProblem::zero_cost`].

use std::cmp::Ordering;
use std::fmt::Debug;

/// Additive, totally ordered cost.
///
/// Priority-based search is only optimal for non-negative step costs;
/// [`Cost::is_valid_step`] is how the engine checks that contract.
pub trait Cost: Copy + Debug + PartialEq {
    /// The numeric additive identity.
    fn zero() -> Self;

    /// Total order over costs. Floating-point costs use IEEE `total_cmp`.
    fn cmp_cost(&self, other: &Self) -> Ordering;

    /// Checked addition. `None` on overflow or a non-finite result.
    fn checked_add_cost(self, rhs: Self) -> Option<Self>;

    /// Whether this value may be used as a single operator cost:
    /// finite and not below zero.
    fn is_valid_step(&self) -> bool;

    /// Whether this value is positive infinity. Integer costs never are.
    fn is_unbounded(&self) -> bool {
        false
    }

    /// Canonical JSON rendering used in traces and reports.
    ///
    /// Integers render as JSON integers. Floats render as strings in Rust's
    /// shortest round-trip form, which keeps canonical JSON integer-only.
    fn to_canonical_json(&self) -> serde_json::Value;
}

macro_rules! impl_float_cost {
    ($($t:ty),*) => {$(
        impl Cost for $t {
            fn zero() -> Self {
                0.0
            }

            fn cmp_cost(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            fn checked_add_cost(self, rhs: Self) -> Option<Self> {
                let sum = self + rhs;
                sum.is_finite().then_some(sum)
            }

            fn is_valid_step(&self) -> bool {
                self.is_finite() && *self >= 0.0
            }

            fn is_unbounded(&self) -> bool {
                self.is_infinite() && self.is_sign_positive()
            }

            fn to_canonical_json(&self) -> serde_json::Value {
                serde_json::Value::String(self.to_string())
            }
        }
    )*};
}

macro_rules! impl_int_cost {
    ($($t:ty => $valid:expr),*) => {$(
        impl Cost for $t {
            fn zero() -> Self {
                0
            }

            fn cmp_cost(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            fn checked_add_cost(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            fn is_valid_step(&self) -> bool {
                let valid: fn(&$t) -> bool = $valid;
                valid(self)
            }

            fn to_canonical_json(&self) -> serde_json::Value {
                serde_json::json!(*self)
            }
        }
    )*};
}

impl_float_cost!(f32, f64);
impl_int_cost!(
    i32 => |c| *c >= 0,
    i64 => |c| *c >= 0,
    u32 => |_| true,
    u64 => |_| true
);
