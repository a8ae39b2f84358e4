//! Aggregate multiplicity statistics over many boxes and start points.
//!
//! Every `(sizes, start)` pair is independent, so the work is mapped to local
//! histograms in parallel and folded back with [`MultiplicityHistogram::merge`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bounds::{Billiard, BoxSizes, Point};
use crate::error::{BilliardError, Result};
use crate::multiplicity::MultiplicityMap;

/// Number of histogram buckets; bucket `m` counts points of multiplicity `m`.
pub const HISTOGRAM_BUCKETS: usize = 10;

/// Point counts per multiplicity value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplicityHistogram {
    buckets: [u64; HISTOGRAM_BUCKETS],
}

impl MultiplicityHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram of a single orbit. Fails if a multiplicity has no bucket.
    pub fn from_map<const D: usize>(map: &MultiplicityMap<D>) -> Result<Self> {
        let mut histogram = Self::default();
        for (point, m) in map.iter() {
            let Some(bucket) = histogram.buckets.get_mut(m as usize) else {
                let err = BilliardError::MultiplicityOverflow {
                    multiplicity: m,
                    capacity: HISTOGRAM_BUCKETS,
                    sizes: map.sizes().sides().to_vec(),
                    start: map.start().to_vec(),
                    point: point.to_vec(),
                };
                tracing::error!(%err, "multiplicity outside histogram range");
                return Err(err);
            };
            *bucket += 1;
        }
        Ok(histogram)
    }

    /// Number of points with multiplicity `m`, zero outside the buckets.
    pub fn count(&self, m: usize) -> u64 {
        self.buckets.get(m).copied().unwrap_or(0)
    }

    pub fn buckets(&self) -> &[u64; HISTOGRAM_BUCKETS] {
        &self.buckets
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }

    /// Non-empty buckets with `m >= 1`, ascending.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.buckets.iter().copied().enumerate().skip(1).filter(|&(_, c)| c != 0)
    }

    pub fn merge(&mut self, other: &MultiplicityHistogram) {
        for (a, b) in self.buckets.iter_mut().zip(other.buckets.iter()) {
            *a += b;
        }
    }

    pub fn merged(mut self, other: MultiplicityHistogram) -> Self {
        self.merge(&other);
        self
    }
}

/// Shared flag for stopping a long computation between iterations.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Number of canonical box shapes `1 <= i <= j <= k <= max_side`.
pub fn shape_count(max_side: i64) -> u64 {
    if max_side < 1 {
        return 0;
    }
    let n = max_side as u64;
    n * (n + 1) * (n + 2) / 6
}

/// Drives path generation over ranges of boxes and start points.
#[derive(Clone, Debug, Default)]
pub struct StatsAggregator {
    cancel: CancelToken,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(BilliardError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Maps every item to a histogram in parallel and merges the result into
    /// `histogram`. Nothing is merged unless every item succeeds.
    fn accumulate_with<T, F>(&self, items: Vec<T>, histogram: &mut MultiplicityHistogram, evaluate: F) -> Result<()>
    where
        T: Send,
        F: Fn(T) -> Result<MultiplicityHistogram> + Sync + Send,
    {
        let local = items
            .into_par_iter()
            .map(|item| {
                self.checkpoint()?;
                evaluate(item)
            })
            .try_reduce(MultiplicityHistogram::default, |a, b| Ok(a.merged(b)));
        match local {
            Ok(local) => {
                histogram.merge(&local);
                Ok(())
            }
            Err(err) => {
                if err == BilliardError::Cancelled {
                    tracing::warn!("statistics cancelled");
                }
                Err(err)
            }
        }
    }

    /// Adds the multiplicities of every orbit starting at a lattice point of
    /// `sizes` into `histogram`. On error `histogram` is left untouched.
    pub fn accumulate<const D: usize>(
        &self,
        sizes: &BoxSizes<D>,
        histogram: &mut MultiplicityHistogram,
    ) -> Result<()> {
        self.accumulate_with(sizes.lattice_points().collect(), histogram, |start: Point<D>| orbit_histogram(sizes, start))?;
        tracing::debug!(sizes = ?sizes.sides(), starts = sizes.lattice_count(), "accumulated box");
        Ok(())
    }

    /// Like [`accumulate`](Self::accumulate) but over `samples` start points
    /// drawn uniformly from the box with a seeded generator.
    pub fn accumulate_sampled<const D: usize>(
        &self,
        sizes: &BoxSizes<D>,
        samples: usize,
        seed: u64,
        histogram: &mut MultiplicityHistogram,
    ) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        let starts: Vec<Point<D>> = (0..samples)
            .map(|_| {
                let mut start = [0; D];
                for (axis, coordinate) in start.iter_mut().enumerate() {
                    *coordinate = rng.gen_range(0..=sizes.side(axis));
                }
                start
            })
            .collect();
        self.accumulate_with(starts, histogram, |start: Point<D>| orbit_histogram(sizes, start))
    }

    /// Statistics over every start point of the single box `(a, b, c)`.
    pub fn single(&self, a: i64, b: i64, c: i64) -> Result<MultiplicityHistogram> {
        let sizes = BoxSizes::new([a, b, c])?;
        let mut histogram = MultiplicityHistogram::default();
        self.accumulate(&sizes, &mut histogram)?;
        tracing::info!(sizes = ?[a, b, c], points = histogram.total(), "single box statistics");
        Ok(histogram)
    }

    /// Statistics over every canonical shape `1 <= i <= j <= k <= max_side`.
    pub fn sweep(&self, max_side: i64) -> Result<MultiplicityHistogram> {
        let mut shapes = Vec::new();
        for i in 1..=max_side {
            for j in i..=max_side {
                for k in j..=max_side {
                    shapes.push([i, j, k]);
                }
            }
        }
        tracing::info!(max_side, shapes = shapes.len(), "starting sweep");

        let histogram = shapes
            .into_par_iter()
            .map(|sides| -> Result<MultiplicityHistogram> {
                self.checkpoint()?;
                let sizes = BoxSizes::new(sides)?;
                let mut local = MultiplicityHistogram::default();
                self.accumulate(&sizes, &mut local)?;
                Ok(local)
            })
            .try_reduce(MultiplicityHistogram::default, |a, b| Ok(a.merged(b)))?;

        tracing::info!(max_side, points = histogram.total(), "sweep finished");
        Ok(histogram)
    }
}

fn orbit_histogram<const D: usize>(sizes: &BoxSizes<D>, start: Point<D>) -> Result<MultiplicityHistogram> {
    let billiard = Billiard::new(*sizes, start)?;
    MultiplicityHistogram::from_map(&MultiplicityMap::from_path(&billiard.path()))
}

/// [`StatsAggregator::accumulate`] without cancellation.
pub fn accumulate<const D: usize>(sizes: &BoxSizes<D>, histogram: &mut MultiplicityHistogram) -> Result<()> {
    StatsAggregator::new().accumulate(sizes, histogram)
}

/// [`StatsAggregator::sweep`] without cancellation.
pub fn sweep(max_side: i64) -> Result<MultiplicityHistogram> {
    StatsAggregator::new().sweep(max_side)
}

/// [`StatsAggregator::single`] without cancellation.
pub fn single(a: i64, b: i64, c: i64) -> Result<MultiplicityHistogram> {
    StatsAggregator::new().single(a, b, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiplicity::get_multiplicities;

    #[test]
    fn test_unit_cube_single() {
        let histogram = single(1, 1, 1).unwrap();
        // 8 corner starts, each bouncing between two opposite corners.
        assert_eq!(histogram.count(1), 16);
        assert_eq!(histogram.total(), 16);
        assert_eq!(histogram.nonzero().collect::<Vec<_>>(), vec![(1, 16)]);
    }

    #[test]
    fn test_accumulate_matches_individual_maps() {
        let sizes = BoxSizes::new([2, 3, 4]).unwrap();
        let mut histogram = MultiplicityHistogram::default();
        accumulate(&sizes, &mut histogram).unwrap();

        let mut expected = MultiplicityHistogram::default();
        for start in sizes.lattice_points() {
            let map = get_multiplicities::<3>(3, &sizes.sides(), &start).unwrap();
            expected.merge(&MultiplicityHistogram::from_map(&map).unwrap());
        }
        assert_eq!(histogram, expected);
    }

    #[test]
    fn test_sweep_is_sum_of_shapes() {
        let swept = sweep(2).unwrap();
        let mut expected = MultiplicityHistogram::default();
        for (a, b, c) in [(1, 1, 1), (1, 1, 2), (1, 2, 2), (2, 2, 2)] {
            expected.merge(&single(a, b, c).unwrap());
        }
        assert_eq!(swept, expected);
        assert_eq!(sweep(1).unwrap(), single(1, 1, 1).unwrap());
        assert_eq!(sweep(0).unwrap(), MultiplicityHistogram::default());
    }

    #[test]
    fn test_shape_count() {
        assert_eq!(shape_count(0), 0);
        assert_eq!(shape_count(1), 1);
        assert_eq!(shape_count(2), 4);
        assert_eq!(shape_count(3), 10);
    }

    #[test]
    fn test_merge_commutes() {
        let a = single(1, 2, 3).unwrap();
        let b = single(2, 2, 3).unwrap();
        assert_eq!(a.merged(b), b.merged(a));
    }

    #[test]
    fn test_cancelled_aggregator() {
        let aggregator = StatsAggregator::new();
        aggregator.cancel_token().cancel();
        let mut histogram = MultiplicityHistogram::default();
        let sizes = BoxSizes::new([2, 2, 2]).unwrap();
        assert_eq!(aggregator.accumulate(&sizes, &mut histogram), Err(BilliardError::Cancelled));
        assert_eq!(histogram, MultiplicityHistogram::default());
        assert_eq!(aggregator.sweep(3), Err(BilliardError::Cancelled));
    }

    #[test]
    fn test_sampled_is_deterministic() {
        let sizes = BoxSizes::new([3, 4, 5]).unwrap();
        let mut first = MultiplicityHistogram::default();
        let mut second = MultiplicityHistogram::default();
        accumulate_sampled_default(&sizes, &mut first);
        accumulate_sampled_default(&sizes, &mut second);
        assert_eq!(first, second);
        assert!(first.total() > 0);
    }

    fn overflowing_map() -> MultiplicityMap<3> {
        let sizes = BoxSizes::new([2, 2, 2]).unwrap();
        let counts = [([0, 0, 0], 1), ([1, 1, 1], HISTOGRAM_BUCKETS as u32)].into_iter().collect();
        MultiplicityMap::from_counts(sizes, [0, 0, 0], counts)
    }

    #[test]
    fn test_histogram_overflow() {
        let err = MultiplicityHistogram::from_map(&overflowing_map()).unwrap_err();
        assert!(matches!(
            err,
            BilliardError::MultiplicityOverflow { multiplicity: 10, capacity: HISTOGRAM_BUCKETS, .. }
        ));
        if let BilliardError::MultiplicityOverflow { point, sizes, .. } = err {
            assert_eq!(point, vec![1, 1, 1]);
            assert_eq!(sizes, vec![2, 2, 2]);
        }
    }

    #[test]
    fn test_overflow_leaves_histogram_untouched() {
        let aggregator = StatsAggregator::new();
        let mut histogram = single(1, 1, 1).unwrap();
        let before = histogram;
        let sizes = BoxSizes::new([2, 2, 2]).unwrap();
        let result = aggregator.accumulate_with(sizes.lattice_points().collect(), &mut histogram, |start: Point<3>| {
            if start == [1, 1, 1] {
                MultiplicityHistogram::from_map(&overflowing_map())
            } else {
                orbit_histogram(&sizes, start)
            }
        });
        assert!(matches!(result, Err(BilliardError::MultiplicityOverflow { .. })));
        assert_eq!(histogram, before);

        aggregator
            .accumulate_with(sizes.lattice_points().collect(), &mut histogram, |start: Point<3>| orbit_histogram(&sizes, start))
            .unwrap();
        let mut expected = before;
        accumulate(&sizes, &mut expected).unwrap();
        assert_eq!(histogram, expected);
    }

    fn accumulate_sampled_default(sizes: &BoxSizes<3>, histogram: &mut MultiplicityHistogram) {
        StatsAggregator::new().accumulate_sampled(sizes, 25, 7, histogram).unwrap();
    }
}
