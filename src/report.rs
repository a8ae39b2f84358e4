//! Human-readable reports for multiplicities, edges and histograms.

use std::fmt;

use serde::Serialize;

use crate::bounds::Point;
use crate::edges::{EdgeId, EdgeReport};
use crate::multiplicity::MultiplicityMap;
use crate::stats::MultiplicityHistogram;

fn write_point<const D: usize>(f: &mut fmt::Formatter<'_>, point: &Point<D>) -> fmt::Result {
    write!(f, "(")?;
    for (i, c) in point.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, ")")
}

/// Lists, for every multiplicity of at least 2, how many points carry it.
pub struct MultiplicityReport<'a, const D: usize> {
    map: &'a MultiplicityMap<D>,
    with_points: bool,
}

impl<'a, const D: usize> MultiplicityReport<'a, D> {
    pub fn new(map: &'a MultiplicityMap<D>) -> Self {
        Self { map, with_points: false }
    }

    /// Also list the coordinates of each repeated point.
    pub fn with_points(mut self) -> Self {
        self.with_points = true;
        self
    }
}

impl<const D: usize> fmt::Display for MultiplicityReport<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path from ")?;
        write_point(f, &self.map.start())?;
        write!(f, " in box ")?;
        write_point(f, &self.map.sizes().sides())?;
        writeln!(f, ": {} points, double: {}", self.map.len(), if self.map.is_double() { "yes" } else { "no" })?;

        let repeated: Vec<(u32, usize)> =
            self.map.distribution().into_iter().filter(|&(m, _)| m >= 2).collect();
        if repeated.is_empty() {
            return writeln!(f, "Every point is visited once");
        }
        for (m, count) in repeated {
            writeln!(f, "Multiplicity {}: {} points", m, count)?;
            if self.with_points {
                for point in self.map.points_with(m) {
                    write!(f, "  ")?;
                    write_point(f, &point)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

impl fmt::Display for EdgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_axis = None;
        for (&(axis, edge), trace) in self.iter() {
            if current_axis != Some(axis) {
                writeln!(f, "Edges parallel to the {} axis", AXIS_NAMES[axis])?;
                current_axis = Some(axis);
            }
            let [(j, vj), (k, vk)] = trace.fixed;
            let values: Vec<String> = trace.values.iter().map(|v| v.to_string()).collect();
            writeln!(
                f,
                "  {} ({}={}, {}={}): {} values [{}]",
                edge,
                AXIS_NAMES[j],
                vj,
                AXIS_NAMES[k],
                vk,
                trace.count(),
                values.join(", ")
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a histogram was accumulated over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HistogramScope {
    Sweep { max_side: i64 },
    Single { sizes: [i64; 3] },
}

/// Histogram totals in the layout of the statistics tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistogramReport {
    pub scope: HistogramScope,
    pub histogram: MultiplicityHistogram,
}

impl HistogramReport {
    pub fn new(scope: HistogramScope, histogram: MultiplicityHistogram) -> Self {
        Self { scope, histogram }
    }
}

impl fmt::Display for HistogramReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            HistogramScope::Sweep { max_side } => {
                writeln!(f, "Statistics for paths with 0 < a <= b <= c <= {}", max_side)?
            }
            HistogramScope::Single { sizes: [a, b, c] } => {
                writeln!(f, "Statistics for paths with a={}, b={} and c={}", a, b, c)?
            }
        }
        writeln!(f, "Considering all paths starting from any possible point")?;
        for (m, count) in self.histogram.nonzero() {
            writeln!(f, "Multiplicity {}: {} points", m, count)?;
        }
        writeln!(f, "There are no points of positive multiplicity different from those listed above")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::edges_on_axis;
    use crate::multiplicity::get_multiplicities;
    use crate::path::generate;
    use crate::stats::single;

    #[test]
    fn test_multiplicity_report() {
        let map = get_multiplicities::<3>(3, &[2, 3, 4], &[0, 0, 0]).unwrap();
        let text = MultiplicityReport::new(&map).with_points().to_string();
        assert!(text.starts_with("Path from (0, 0, 0) in box (2, 3, 4)"));
        assert!(text.contains("double: yes"));
        assert!(text.contains("Multiplicity 2:"));
        assert!(text.contains("  (1, 1, 1)\n"));
        assert!(!text.contains("Multiplicity 1:"));
    }

    #[test]
    fn test_multiplicity_report_all_single() {
        let map = get_multiplicities::<2>(2, &[2, 2], &[1, 0]).unwrap();
        let text = MultiplicityReport::new(&map).to_string();
        assert!(text.ends_with("Every point is visited once\n"));
    }

    #[test]
    fn test_edge_report_text() {
        let path = generate::<3>(3, &[2, 3, 4], &[0, 0, 0]).unwrap();
        let text = edges_on_axis(&path, 2).unwrap().to_string();
        assert!(text.starts_with("Edges parallel to the z axis\n"));
        assert!(text.contains("  NearNear (x=0, y=0): 2 values [0, 4]\n"));
        assert!(text.contains("  FarNear (x=2, y=0): 1 values [2]\n"));
        assert!(text.contains("  FarFar (x=2, y=3): 0 values []\n"));
    }

    #[test]
    fn test_histogram_report() {
        let report = HistogramReport::new(HistogramScope::Single { sizes: [1, 1, 1] }, single(1, 1, 1).unwrap());
        assert_eq!(
            report.to_string(),
            "Statistics for paths with a=1, b=1 and c=1\n\
             Considering all paths starting from any possible point\n\
             Multiplicity 1: 16 points\n\
             There are no points of positive multiplicity different from those listed above\n"
        );
    }
}
