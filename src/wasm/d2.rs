use wasm_bindgen::prelude::*;

use crate::bounds::{Billiard, BoxSizes};
use crate::multiplicity::MultiplicityMap;
use crate::path::Path;
use crate::wasm::utils::{flatten, to_js};

/// A trajectory in a 2D box, computed once on construction.
#[wasm_bindgen]
pub struct Billiard2D {
    path: Path<2>,
}

#[wasm_bindgen]
impl Billiard2D {
    #[wasm_bindgen(constructor)]
    pub fn new(a: i32, b: i32, ra: i32, rb: i32) -> Result<Billiard2D, JsValue> {
        let sizes = BoxSizes::new([a.into(), b.into()]).map_err(to_js)?;
        let billiard = Billiard::new(sizes, [ra.into(), rb.into()]).map_err(to_js)?;
        Ok(Billiard2D { path: billiard.path() })
    }

    #[wasm_bindgen(getter)]
    pub fn period(&self) -> usize {
        self.path.period()
    }

    /// Path coordinates `[x0, y0, x1, y1, ...]`, closing point included.
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

    /// Triples `[x, y, multiplicity]` in ascending point order.
    pub fn multiplicities(&self) -> Vec<i32> {
        MultiplicityMap::from_path(&self.path)
            .iter()
            .flat_map(|(p, m)| [p[0] as i32, p[1] as i32, m as i32])
            .collect()
    }
}
