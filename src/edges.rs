//! Classification of trajectory points lying on the twelve edges of a 3D box.
//!
//! An edge parallel to the free axis `i` is fixed by putting both other axes
//! `j < k` on a face, either the near one (0) or the far one (the side length).

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::bounds::{BoxSizes, Point};
use crate::error::{BilliardError, Result};
use crate::path::Path;

/// Which faces of the two other axes meet at an edge. The first word names
/// the lower of the two axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EdgeId {
    NearNear,
    FarNear,
    NearFar,
    FarFar,
}

impl EdgeId {
    pub const ALL: [EdgeId; 4] = [EdgeId::NearNear, EdgeId::FarNear, EdgeId::NearFar, EdgeId::FarFar];

    pub fn from_sides(j_far: bool, k_far: bool) -> Self {
        match (j_far, k_far) {
            (false, false) => EdgeId::NearNear,
            (true, false) => EdgeId::FarNear,
            (false, true) => EdgeId::NearFar,
            (true, true) => EdgeId::FarFar,
        }
    }

    pub fn j_far(self) -> bool {
        matches!(self, EdgeId::FarNear | EdgeId::FarFar)
    }

    pub fn k_far(self) -> bool {
        matches!(self, EdgeId::NearFar | EdgeId::FarFar)
    }
}

/// The two axes other than `axis`, in ascending order.
pub fn other_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Distinct free-axis coordinates visited on one edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeTrace {
    /// `(axis, value)` of the two fixed coordinates, lower axis first.
    pub fixed: [(usize, i64); 2],
    pub values: BTreeSet<i64>,
}

impl EdgeTrace {
    fn new(sizes: &BoxSizes<3>, axis: usize, edge: EdgeId) -> Self {
        let (j, k) = other_axes(axis);
        let at = |a: usize, far: bool| if far { sizes.side(a) } else { 0 };
        Self {
            fixed: [(j, at(j, edge.j_far())), (k, at(k, edge.k_far()))],
            values: BTreeSet::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }
}

/// Edge traces keyed by free axis and edge. Every analysed axis has all four
/// of its edges present, visited or not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeReport {
    edges: BTreeMap<(usize, EdgeId), EdgeTrace>,
}

/// Flat, serializable form of one [`EdgeReport`] entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeEntry {
    pub axis: usize,
    pub edge: EdgeId,
    pub fixed: [(usize, i64); 2],
    pub values: Vec<i64>,
}

impl EdgeReport {
    pub fn get(&self, axis: usize, edge: EdgeId) -> Option<&EdgeTrace> {
        self.edges.get(&(axis, edge))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, EdgeId), &EdgeTrace)> + '_ {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Free axes present in the report.
    pub fn axes(&self) -> BTreeSet<usize> {
        self.edges.keys().map(|&(axis, _)| axis).collect()
    }

    /// Unites the visited values of `other` into `self`.
    pub fn merge(&mut self, other: &EdgeReport) {
        for (key, trace) in &other.edges {
            self.edges
                .entry(*key)
                .and_modify(|t| t.values.extend(trace.values.iter().copied()))
                .or_insert_with(|| trace.clone());
        }
    }

    pub fn entries(&self) -> Vec<EdgeEntry> {
        self.edges
            .iter()
            .map(|(&(axis, edge), trace)| EdgeEntry {
                axis,
                edge,
                fixed: trace.fixed,
                values: trace.values.iter().copied().collect(),
            })
            .collect()
    }
}

/// Collects, for the four edges parallel to `axis`, the distinct `point[axis]`
/// values the path visits on them.
pub fn edges_on_axis(path: &Path<3>, axis: usize) -> Result<EdgeReport> {
    if axis >= 3 {
        return Err(BilliardError::InvalidAxis { axis, dimension: 3 });
    }
    Ok(axis_edges(path, axis))
}

/// [`edges_on_axis`] for an axis already known to be `0..3`.
fn axis_edges(path: &Path<3>, axis: usize) -> EdgeReport {
    let sizes = path.sizes();
    let (j, k) = other_axes(axis);

    let mut edges: BTreeMap<(usize, EdgeId), EdgeTrace> = EdgeId::ALL
        .iter()
        .map(|&edge| ((axis, edge), EdgeTrace::new(sizes, axis, edge)))
        .collect();

    for point in path {
        if let Some(edge) = edge_of(point, sizes, j, k) {
            if let Some(trace) = edges.get_mut(&(axis, edge)) {
                trace.values.insert(point[axis]);
            }
        }
    }

    EdgeReport { edges }
}

/// Runs [`edges_on_axis`] for all three axes.
pub fn edge_report(path: &Path<3>) -> EdgeReport {
    let mut report = EdgeReport::default();
    for axis in 0..3 {
        report.merge(&axis_edges(path, axis));
    }
    report
}

fn edge_of(point: &Point<3>, sizes: &BoxSizes<3>, j: usize, k: usize) -> Option<EdgeId> {
    let side = |a: usize| match point[a] {
        0 => Some(false),
        v if v == sizes.side(a) => Some(true),
        _ => None,
    };
    Some(EdgeId::from_sides(side(j)?, side(k)?))
}
