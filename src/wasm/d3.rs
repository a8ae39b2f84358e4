use wasm_bindgen::prelude::*;

use crate::bounds::{Billiard, BoxSizes, Face};
use crate::edges::{EdgeId, edges_on_axis};
use crate::error::BilliardError;
use crate::multiplicity::MultiplicityMap;
use crate::path::Path;
use crate::projection::face_bounce_points;
use crate::stats::StatsAggregator;
use crate::wasm::utils::{flatten, to_js};

/// A trajectory in a 3D box, computed once on construction.
#[wasm_bindgen]
pub struct Billiard3D {
    path: Path<3>,
}

#[wasm_bindgen]
impl Billiard3D {
    #[wasm_bindgen(constructor)]
    pub fn new(a: i32, b: i32, c: i32, ra: i32, rb: i32, rc: i32) -> Result<Billiard3D, JsValue> {
        let sizes = BoxSizes::new([a.into(), b.into(), c.into()]).map_err(to_js)?;
        let billiard = Billiard::new(sizes, [ra.into(), rb.into(), rc.into()]).map_err(to_js)?;
        Ok(Billiard3D { path: billiard.path() })
    }

    #[wasm_bindgen(getter)]
    pub fn period(&self) -> usize {
        self.path.period()
    }

    /// Path coordinates `[x0, y0, z0, x1, ...]`, closing point included.
    #[wasm_bindgen(getter)]
    pub fn path(&self) -> Vec<i32> {
        flatten(self.path.points())
    }

    #[wasm_bindgen(getter)]
    pub fn bounce_points(&self) -> Vec<i32> {
        flatten(self.path.bounce_points())
    }

    #[wasm_bindgen(getter)]
    pub fn corner_points(&self) -> Vec<i32> {
        flatten(self.path.corner_points())
    }

    #[wasm_bindgen(getter)]
    pub fn is_double(&self) -> bool {
        self.path.is_double()
    }

    /// Quadruples `[x, y, z, multiplicity]` in ascending point order.
    pub fn multiplicities(&self) -> Vec<i32> {
        MultiplicityMap::from_path(&self.path)
            .iter()
            .flat_map(|(p, m)| [p[0] as i32, p[1] as i32, p[2] as i32, m as i32])
            .collect()
    }

    /// Bounce points on the face `face_id` (one of the `BOX_ID_*` constants),
    /// projected to the two free coordinates, in time order.
    pub fn face_bounce_points(&self, face_id: i32) -> Result<Vec<i32>, JsValue> {
        let face = Face::from_id(self.path.sizes(), face_id).map_err(to_js)?;
        Ok(flatten(&face_bounce_points(&self.path, &face)))
    }

    /// Sorted free-axis values visited on an edge parallel to `axis`.
    /// `edge` indexes `NearNear`, `FarNear`, `NearFar`, `FarFar`.
    pub fn edge_values(&self, axis: usize, edge: usize) -> Result<Vec<i32>, JsValue> {
        let id = *EdgeId::ALL
            .get(edge)
            .ok_or_else(|| to_js(BilliardError::UnknownEdge(edge)))?;
        let report = edges_on_axis(&self.path, axis).map_err(to_js)?;
        Ok(report
            .get(axis, id)
            .map(|trace| trace.values.iter().map(|&v| v as i32).collect())
            .unwrap_or_default())
    }
}

/// Histogram buckets over all start points of the box `(a, b, c)`.
#[wasm_bindgen(js_name = multiplicityStatistics)]
pub fn multiplicity_statistics(a: i32, b: i32, c: i32) -> Result<Vec<f64>, JsValue> {
    let histogram = StatsAggregator::new()
        .single(a.into(), b.into(), c.into())
        .map_err(to_js)?;
    Ok(histogram.buckets().iter().map(|&n| n as f64).collect())
}
