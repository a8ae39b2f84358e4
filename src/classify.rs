//! Pure predicates telling where a lattice point sits relative to the box faces.

use crate::bounds::{BoxSizes, Point, box_side};

/// True iff every coordinate is a multiple of its side: the ball touches a face on all axes.
pub fn is_corner<const D: usize>(point: &Point<D>, sizes: &BoxSizes<D>) -> bool {
    point.iter().zip(sizes.sides().iter()).all(|(p, s)| p % s == 0)
}

/// True iff at least one coordinate is a multiple of its side.
pub fn is_bouncing<const D: usize>(point: &Point<D>, sizes: &BoxSizes<D>) -> bool {
    point.iter().zip(sizes.sides().iter()).any(|(p, s)| p % s == 0)
}

/// Face IDs (see [`box_side`]) of every face an in-box point touches.
pub fn contact_faces<const D: usize>(point: &Point<D>, sizes: &BoxSizes<D>) -> Vec<i32> {
    let mut faces = Vec::new();
    for (axis, (&p, &s)) in point.iter().zip(sizes.sides().iter()).enumerate() {
        if p == 0 {
            faces.push(box_side(axis, false));
        } else if p == s {
            faces.push(box_side(axis, true));
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BOX_ID_BACK, BOX_ID_LEFT, BOX_ID_TOP};

    #[test]
    fn test_corner_and_bounce() {
        let sizes = BoxSizes::new([2, 3, 4]).unwrap();
        assert!(is_corner(&[0, 0, 0], &sizes));
        assert!(is_corner(&[2, 3, 4], &sizes));
        assert!(!is_corner(&[2, 3, 1], &sizes));

        assert!(is_bouncing(&[2, 3, 1], &sizes));
        assert!(is_bouncing(&[1, 1, 4], &sizes));
        assert!(!is_bouncing(&[1, 1, 1], &sizes));
    }

    #[test]
    fn test_corner_implies_bouncing() {
        let sizes = BoxSizes::new([3, 2, 5]).unwrap();
        for p in sizes.lattice_points() {
            if is_corner(&p, &sizes) {
                assert!(is_bouncing(&p, &sizes), "corner {:?} must bounce", p);
            }
        }
    }

    #[test]
    fn test_contact_faces() {
        let sizes = BoxSizes::new([2, 3, 4]).unwrap();
        assert_eq!(contact_faces(&[0, 3, 4], &sizes), vec![BOX_ID_LEFT, BOX_ID_BACK, BOX_ID_TOP]);
        assert!(contact_faces(&[1, 1, 1], &sizes).is_empty());
    }
}
