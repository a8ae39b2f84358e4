use wasm_bindgen::prelude::*;

use crate::bounds::{BoxSizes, Point};
use crate::classify;
use crate::error::BilliardError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_BOUNDS: &'static str = r#"
export const BOX_ID_LEFT = -1;
export const BOX_ID_RIGHT = -2;
export const BOX_ID_FRONT = -3;
export const BOX_ID_BACK = -4;
export const BOX_ID_BOTTOM = -5;
export const BOX_ID_TOP = -6;
"#;

pub fn to_js(err: BilliardError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn widen(values: &[i32]) -> Vec<i64> {
    values.iter().map(|&v| i64::from(v)).collect()
}

/// Flattens points into `[x0, y0, ..., x1, y1, ...]`.
///
/// Coordinates stay within sides that came in as `i32`, so narrowing is lossless.
pub fn flatten<'a, const D: usize>(points: impl IntoIterator<Item = &'a Point<D>>) -> Vec<i32> {
    points.into_iter().flat_map(|p| p.iter().map(|&c| c as i32)).collect()
}

fn point_from<const D: usize>(point: &[i32]) -> Result<Point<D>, BilliardError> {
    widen(point).as_slice().try_into().map_err(|_| BilliardError::LengthMismatch {
        what: "point",
        expected: D,
        found: point.len(),
    })
}

fn classify_dyn(
    point: &[i32],
    sizes: &[i32],
    f2: fn(&Point<2>, &BoxSizes<2>) -> bool,
    f3: fn(&Point<3>, &BoxSizes<3>) -> bool,
) -> Result<bool, BilliardError> {
    let wide = widen(sizes);
    match sizes.len() {
        2 => Ok(f2(&point_from::<2>(point)?, &BoxSizes::from_slice(2, &wide)?)),
        3 => Ok(f3(&point_from::<3>(point)?, &BoxSizes::from_slice(3, &wide)?)),
        n if n < 2 => Err(BilliardError::InvalidDimension(n)),
        n => Err(BilliardError::LengthMismatch { what: "sizes", expected: 3, found: n }),
    }
}

/// Whether `point` touches a face on every axis of a 2D or 3D box.
#[wasm_bindgen(js_name = isCorner)]
pub fn is_corner(point: &[i32], sizes: &[i32]) -> Result<bool, JsValue> {
    classify_dyn(point, sizes, classify::is_corner::<2>, classify::is_corner::<3>).map_err(to_js)
}

/// Whether `point` touches at least one face of a 2D or 3D box.
#[wasm_bindgen(js_name = isBouncing)]
pub fn is_bouncing(point: &[i32], sizes: &[i32]) -> Result<bool, JsValue> {
    classify_dyn(point, sizes, classify::is_bouncing::<2>, classify::is_bouncing::<3>).map_err(to_js)
}
