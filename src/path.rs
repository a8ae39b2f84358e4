use crate::bounds::{Billiard, BoxSizes, Direction, Point};
use crate::classify::{is_bouncing, is_corner};
use crate::error::Result;
use crate::retrace;

/// Greatest common divisor of `|a|` and `|b|`.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of `|a|` and `|b|`, `None` on overflow or when either
/// argument is zero.
pub fn lcm(a: i64, b: i64) -> Option<i64> {
    if a == 0 || b == 0 {
        return None;
    }
    let l = (a.unsigned_abs() / gcd(a, b)).checked_mul(b.unsigned_abs())?;
    i64::try_from(l).ok()
}

/// Least common multiple of all sides.
pub fn lcm_all(sides: &[i64]) -> Option<i64> {
    sides.iter().try_fold(1, |acc, &s| lcm(acc, s))
}

/// Generates the trajectory for a runtime tuple of `n` sides and start coordinates.
///
/// Fails before producing any point when `n < 2`, `n` differs from `D`, a tuple
/// has the wrong length, a side is zero, or the start lies outside the box.
pub fn generate<const D: usize>(n: usize, sizes: &[i64], start: &[i64]) -> Result<Path<D>> {
    Ok(Billiard::<D>::from_slices(n, sizes, start)?.path())
}

/// The discrete walk of a ball moving with unit diagonal velocity.
///
/// The path holds `period + 1` points: the start, then one point per step.
/// The last point equals the first, closing the orbit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<const D: usize> {
    sizes: BoxSizes<D>,
    points: Vec<Point<D>>,
}

impl<const D: usize> Path<D> {
    /// Walks one full period of `billiard`.
    ///
    /// Each step adds the direction to the point, then flips the direction on
    /// every axis whose new coordinate is a multiple of the side. Axes that start
    /// on their far face move inwards first, which is the unfolded `+1` walk
    /// mirrored back into the box.
    pub fn trace(billiard: &Billiard<D>) -> Self {
        let sizes = *billiard.sizes();
        let sides = sizes.sides();
        let period = sizes.period();

        let mut point = billiard.start();
        let mut direction: Direction<D> = [1; D];
        for axis in 0..D {
            if point[axis] == sides[axis] {
                direction[axis] = -1;
            }
        }

        let mut points = Vec::with_capacity(period + 1);
        points.push(point);
        for _ in 0..period {
            for axis in 0..D {
                point[axis] += direction[axis];
            }
            points.push(point);
            for axis in 0..D {
                if point[axis] % sides[axis] == 0 {
                    direction[axis] = -direction[axis];
                }
            }
        }

        tracing::debug!(sizes = ?sides, start = ?billiard.start(), period, "generated path");
        Self { sizes, points }
    }

    pub fn sizes(&self) -> &BoxSizes<D> {
        &self.sizes
    }

    pub fn start(&self) -> Point<D> {
        self.points[0]
    }

    pub fn period(&self) -> usize {
        self.sizes.period()
    }

    /// All `period + 1` points, closing point included.
    pub fn points(&self) -> &[Point<D>] {
        &self.points
    }

    /// The first `period` points, each time step of the orbit exactly once.
    pub fn one_period(&self) -> &[Point<D>] {
        &self.points[..self.period()]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<D>> {
        self.points.iter()
    }

    /// Points touching at least one face, in time order.
    pub fn bounce_points(&self) -> impl Iterator<Item = &Point<D>> + '_ {
        self.points.iter().filter(|p| is_bouncing(p, &self.sizes))
    }

    /// Points touching a face on every axis, in time order.
    pub fn corner_points(&self) -> impl Iterator<Item = &Point<D>> + '_ {
        self.points.iter().filter(|p| is_corner(p, &self.sizes))
    }

    /// Whether the ball retraces its route after a corner hit.
    pub fn is_double(&self) -> bool {
        retrace::is_double(&self.points)
    }
}

impl<'a, const D: usize> IntoIterator for &'a Path<D> {
    type Item = &'a Point<D>;
    type IntoIter = std::slice::Iter<'a, Point<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
