//! Flattening a 3D trajectory onto the faces of its box.
//!
//! Each face sees two things: the 2D billiard obtained by dropping the fixed
//! axis from the box and the start point, and the 3D bounce points that land
//! on that face.

use crate::bounds::{Billiard, BoxSizes, Face};
use crate::classify::is_bouncing;
use crate::error::Result;
use crate::path::Path;

/// Bounce points of `path` lying on `face`, projected and in time order.
pub fn face_bounce_points(path: &Path<3>, face: &Face) -> Vec<[i64; 2]> {
    path.iter()
        .filter(|p| face.contains(p) && is_bouncing(p, path.sizes()))
        .map(|p| face.project(p))
        .collect()
}

/// The 2D billiard seen on `face`: box and start with the fixed axis dropped.
pub fn face_billiard(billiard: &Billiard<3>, face: &Face) -> Result<Billiard<2>> {
    let sizes = BoxSizes::new(face.project(&billiard.sizes().sides()))?;
    Billiard::new(sizes, face.project(&billiard.start()))
}

/// Per face, in ID order: the projected 2D path and the bounce points on the face.
pub fn net(billiard: &Billiard<3>) -> Result<Vec<(Face, Path<2>, Vec<[i64; 2]>)>> {
    let path = billiard.path();
    Face::all(billiard.sizes())
        .into_iter()
        .map(|face| {
            let flat = face_billiard(billiard, &face)?.path();
            Ok((face, flat, face_bounce_points(&path, &face)))
        })
        .collect()
}
