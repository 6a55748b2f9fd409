//! Exact tiling counts and exhaustive enumeration for small hexagons

use crate::chain::{Direction, Hexagon, PathSystem, Update, apply_update};
use crate::io::error::{Result, computation_error, invalid_parameter};
use num_traits::PrimInt;
use std::collections::{HashSet, VecDeque};

fn gcd<T: PrimInt>(mut x: T, mut y: T) -> T {
    while !y.is_zero() {
        let remainder = x % y;
        x = y;
        y = remainder;
    }
    x
}

fn cast<T: PrimInt>(value: usize) -> Result<T> {
    T::from(value).ok_or_else(|| {
        computation_error("macmahon_count", &format!("{value} does not fit the count type"))
    })
}

/// Number of lozenge tilings of `hexagon`
///
/// MacMahon's formula `∏_{i≤a} ∏_{j≤b} (i + j + c - 1) / (i + j - 1)`. The
/// partial product over `i ≤ a'` is the count for the a'×b×c hexagon, so the
/// running value is an integer after every outer step; within a step the
/// fraction is kept reduced to delay overflow.
///
/// # Errors
///
/// Returns `Computation` if the count or an intermediate value overflows `T`
pub fn macmahon_count<T: PrimInt>(hexagon: &Hexagon) -> Result<T> {
    let overflow = || computation_error("macmahon_count", &format!("{hexagon} overflows"));
    let mut count = T::one();

    for i in 1..=hexagon.a() {
        let mut numerator = count;
        let mut denominator = T::one();

        for j in 1..=hexagon.b() {
            let mut factor: T = cast(i + j + hexagon.c() - 1)?;
            let mut divisor: T = cast(i + j - 1)?;

            let shared = gcd(factor, denominator);
            factor = factor / shared;
            denominator = denominator / shared;
            let shared = gcd(numerator, divisor);
            numerator = numerator / shared;
            divisor = divisor / shared;

            numerator = numerator.checked_mul(&factor).ok_or_else(overflow)?;
            denominator = denominator.checked_mul(&divisor).ok_or_else(overflow)?;

            let shared = gcd(numerator, denominator);
            numerator = numerator / shared;
            denominator = denominator / shared;
        }

        if denominator != T::one() {
            return Err(computation_error(
                "macmahon_count",
                &format!("non-integral partial count for {hexagon}"),
            ));
        }
        count = numerator;
    }

    Ok(count)
}

/// Every path system of `hexagon`, in breadth-first order from the minimum
///
/// The chain is irreducible, so closing the minimal state under all updates
/// reaches every tiling.
///
/// # Errors
///
/// Returns `InvalidParameter` if more than `limit` states exist
pub fn enumerate_states(hexagon: &Hexagon, limit: usize) -> Result<Vec<PathSystem>> {
    let start = PathSystem::minimal(hexagon);
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);
    let mut states = vec![start];

    let moves: Vec<Update> = (1..=hexagon.c())
        .flat_map(|row| {
            (1..hexagon.a() + hexagon.b()).flat_map(move |column| {
                [Direction::PushUp, Direction::PushDown].map(|direction| Update {
                    row,
                    column,
                    direction,
                })
            })
        })
        .collect();

    while let Some(state) = queue.pop_front() {
        for &update in &moves {
            let mut next = state.clone();
            if !apply_update(&mut next, update) || seen.contains(&next) {
                continue;
            }
            if states.len() >= limit {
                return Err(invalid_parameter(
                    "limit",
                    &limit,
                    &format!("the {hexagon} hexagon has more tilings than that"),
                ));
            }
            seen.insert(next.clone());
            queue.push_back(next.clone());
            states.push(next);
        }
    }

    Ok(states)
}
