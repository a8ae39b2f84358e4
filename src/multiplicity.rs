use std::collections::BTreeMap;

use serde::Serialize;

use crate::bounds::{BoxSizes, Point};
use crate::classify::is_corner;
use crate::error::Result;
use crate::path::{Path, generate};

/// Generates the path for a runtime tuple and counts visits per point.
pub fn get_multiplicities<const D: usize>(
    n: usize,
    sizes: &[i64],
    start: &[i64],
) -> Result<MultiplicityMap<D>> {
    Ok(MultiplicityMap::from_path(&generate::<D>(n, sizes, start)?))
}

/// Number of visits to each distinct point of an orbit within one period.
///
/// Raw counts cover `path[0..period)`, so the closing point is not counted a
/// second time. For a double path every corner visit counts twice, since the
/// ball arrives and leaves along the same line, and all counts are halved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplicityMap<const D: usize> {
    sizes: BoxSizes<D>,
    start: Point<D>,
    counts: BTreeMap<Point<D>, u32>,
    double: bool,
}

/// One point of a [`MultiplicityMap`] in a serializable shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MultiplicityEntry {
    pub point: Vec<i64>,
    pub multiplicity: u32,
}

impl<const D: usize> MultiplicityMap<D> {
    pub fn from_path(path: &Path<D>) -> Self {
        let double = path.is_double();
        let mut counts: BTreeMap<Point<D>, u32> = BTreeMap::new();
        for point in path.one_period() {
            let visits = if double && is_corner(point, path.sizes()) { 2 } else { 1 };
            *counts.entry(*point).or_insert(0) += visits;
        }
        if double {
            for count in counts.values_mut() {
                debug_assert!(*count % 2 == 0, "retracing orbit with odd raw count {}", count);
                *count /= 2;
            }
        }
        Self { sizes: *path.sizes(), start: path.start(), counts, double }
    }

    /// A map with given counts, bypassing path generation.
    #[cfg(test)]
    pub(crate) fn from_counts(sizes: BoxSizes<D>, start: Point<D>, counts: BTreeMap<Point<D>, u32>) -> Self {
        Self { sizes, start, counts, double: false }
    }

    pub fn sizes(&self) -> &BoxSizes<D> {
        &self.sizes
    }

    pub fn start(&self) -> Point<D> {
        self.start
    }

    pub fn is_double(&self) -> bool {
        self.double
    }

    pub fn get(&self, point: &Point<D>) -> Option<u32> {
        self.counts.get(point).copied()
    }

    /// Points and their multiplicities in ascending point order.
    pub fn iter(&self) -> impl Iterator<Item = (&Point<D>, u32)> + '_ {
        self.counts.iter().map(|(p, &m)| (p, m))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn max_multiplicity(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Points visited exactly `multiplicity` times, in ascending order.
    pub fn points_with(&self, multiplicity: u32) -> Vec<Point<D>> {
        self.iter().filter(|&(_, m)| m == multiplicity).map(|(p, _)| *p).collect()
    }

    /// Number of points per multiplicity value.
    pub fn distribution(&self) -> BTreeMap<u32, usize> {
        let mut distribution = BTreeMap::new();
        for &m in self.counts.values() {
            *distribution.entry(m).or_insert(0) += 1;
        }
        distribution
    }

    /// Sum of all multiplicities.
    pub fn total_visits(&self) -> u64 {
        self.counts.values().map(|&m| u64::from(m)).sum()
    }

    pub fn entries(&self) -> Vec<MultiplicityEntry> {
        self.iter()
            .map(|(p, m)| MultiplicityEntry { point: p.to_vec(), multiplicity: m })
            .collect()
    }
}
