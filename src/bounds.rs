use crate::error::{BilliardError, Result};
use crate::path::{Path, lcm_all};

/// Face ID for the `x = 0` side of a 3D box, negative like all face IDs.
pub const BOX_ID_LEFT: i32 = -1;
/// Face ID for the `x = a` side of a 3D box.
pub const BOX_ID_RIGHT: i32 = -2;
/// Face ID for the `y = 0` side of a 3D box.
pub const BOX_ID_FRONT: i32 = -3;
/// Face ID for the `y = b` side of a 3D box.
pub const BOX_ID_BACK: i32 = -4;
/// Face ID for the `z = 0` side of a 3D box.
pub const BOX_ID_BOTTOM: i32 = -5;
/// Face ID for the `z = c` side of a 3D box.
pub const BOX_ID_TOP: i32 = -6;

/// A lattice point, one integer coordinate per axis.
pub type Point<const D: usize> = [i64; D];

/// Step sign per axis, every entry is `+1` or `-1`.
pub type Direction<const D: usize> = [i64; D];

/// Calculates the ID for a box face based on the axis and side.
///
/// The IDs start at -1 and decrease.
/// - Axis 0 (X) Min: -1
/// - Axis 0 (X) Max: -2
/// - Axis 1 (Y) Min: -3
/// - Axis 1 (Y) Max: -4
pub fn box_side(axis: usize, is_max: bool) -> i32 {
    -1 - (axis * 2 + if is_max { 1 } else { 0 }) as i32
}

/// Longest period a box may have. A path holds `period + 1` points, so longer
/// walks cannot be buffered.
pub const MAX_PERIOD: usize = u32::MAX as usize;

/// Side lengths of an axis-aligned box with one corner at the origin.
///
/// Every side is at least 1 and the period `2 * lcm(sides)` is at most
/// [`MAX_PERIOD`], so a validated `BoxSizes` can always produce a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxSizes<const D: usize> {
    sides: [i64; D],
    period: usize,
}

impl<const D: usize> BoxSizes<D> {
    pub fn new(sides: [i64; D]) -> Result<Self> {
        if D < 2 {
            return Err(BilliardError::InvalidDimension(D));
        }
        for (axis, &value) in sides.iter().enumerate() {
            if value == 0 {
                return Err(BilliardError::ZeroSize { axis });
            }
            if value < 0 {
                return Err(BilliardError::NegativeSize { axis, value });
            }
        }
        let period = lcm_all(&sides)
            .and_then(|l| l.checked_mul(2))
            .and_then(|p| usize::try_from(p).ok())
            .filter(|&p| p <= MAX_PERIOD && path_bytes::<D>(p).is_some())
            .ok_or_else(|| BilliardError::PeriodOverflow { sizes: sides.to_vec() })?;

        Ok(Self { sides, period })
    }

    /// Builds the sides from a runtime tuple that is claimed to have `n` axes.
    pub fn from_slice(n: usize, sides: &[i64]) -> Result<Self> {
        check_arity::<D>(n)?;
        let sides = fixed::<D>("sizes", sides)?;
        Self::new(sides)
    }

    pub fn sides(&self) -> [i64; D] {
        self.sides
    }

    pub fn side(&self, axis: usize) -> i64 {
        self.sides[axis]
    }

    /// Number of steps after which every walk in this box repeats.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Checks whether `point` lies inside the closed box.
    pub fn contains(&self, point: &Point<D>) -> bool {
        point.iter().zip(self.sides.iter()).all(|(&p, &s)| (0..=s).contains(&p))
    }

    /// Number of lattice points in the closed box, `prod(side + 1)`.
    pub fn lattice_count(&self) -> usize {
        self.sides.iter().map(|&s| s as usize + 1).product()
    }

    /// Visits every lattice point of the closed box, last axis fastest.
    pub fn lattice_points(&self) -> LatticePoints<D> {
        LatticePoints { sides: self.sides, next: Some([0; D]) }
    }
}

/// Size in bytes of a path buffer for `period` steps, if it can be allocated.
fn path_bytes<const D: usize>(period: usize) -> Option<usize> {
    period
        .checked_add(1)?
        .checked_mul(size_of::<Point<D>>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
}

/// Iterator over the lattice points of a closed box.
#[derive(Clone, Debug)]
pub struct LatticePoints<const D: usize> {
    sides: [i64; D],
    next: Option<Point<D>>,
}

impl<const D: usize> Iterator for LatticePoints<D> {
    type Item = Point<D>;

    fn next(&mut self) -> Option<Point<D>> {
        let current = self.next?;
        let mut successor = current;
        let mut axis = D;
        self.next = loop {
            if axis == 0 {
                break None;
            }
            axis -= 1;
            if successor[axis] < self.sides[axis] {
                successor[axis] += 1;
                break Some(successor);
            }
            successor[axis] = 0;
        };
        Some(current)
    }
}

/// A validated box together with a start point inside it.
///
/// This is the immutable configuration every analysis works from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Billiard<const D: usize> {
    sizes: BoxSizes<D>,
    start: Point<D>,
}

impl<const D: usize> Billiard<D> {
    pub fn new(sizes: BoxSizes<D>, start: Point<D>) -> Result<Self> {
        for axis in 0..D {
            let (value, size) = (start[axis], sizes.side(axis));
            if !(0..=size).contains(&value) {
                return Err(BilliardError::StartOutOfRange { axis, value, size });
            }
        }
        Ok(Self { sizes, start })
    }

    /// Validates `n`, the side lengths and the start point given as runtime tuples.
    pub fn from_slices(n: usize, sizes: &[i64], start: &[i64]) -> Result<Self> {
        check_arity::<D>(n)?;
        let start = fixed::<D>("start", start)?;
        let sizes = BoxSizes::from_slice(n, sizes)?;
        Self::new(sizes, start)
    }

    pub fn sizes(&self) -> &BoxSizes<D> {
        &self.sizes
    }

    pub fn start(&self) -> Point<D> {
        self.start
    }

    /// Generates the trajectory over one full period.
    pub fn path(&self) -> Path<D> {
        Path::trace(self)
    }
}

fn check_arity<const D: usize>(n: usize) -> Result<()> {
    if n < 2 {
        return Err(BilliardError::InvalidDimension(n));
    }
    if n != D {
        return Err(BilliardError::LengthMismatch { what: "dimension", expected: D, found: n });
    }
    Ok(())
}

fn fixed<const D: usize>(what: &'static str, values: &[i64]) -> Result<[i64; D]> {
    values
        .try_into()
        .map_err(|_| BilliardError::LengthMismatch { what, expected: D, found: values.len() })
}

/// One of the six faces of a 3D box: the plane `point[axis] == value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    pub axis: usize,
    pub value: i64,
    pub is_max: bool,
}

impl Face {
    pub fn new(sizes: &BoxSizes<3>, axis: usize, is_max: bool) -> Result<Self> {
        if axis >= 3 {
            return Err(BilliardError::InvalidAxis { axis, dimension: 3 });
        }
        let value = if is_max { sizes.side(axis) } else { 0 };
        Ok(Self { axis, value, is_max })
    }

    /// Resolves one of the `BOX_ID_*` constants to the face it names.
    pub fn from_id(sizes: &BoxSizes<3>, id: i32) -> Result<Self> {
        if !(BOX_ID_TOP..=BOX_ID_LEFT).contains(&id) {
            return Err(BilliardError::UnknownFace(id));
        }
        let index = (-1 - id) as usize;
        Self::new(sizes, index / 2, index % 2 == 1)
    }

    /// All six faces in ID order, left first.
    pub fn all(sizes: &BoxSizes<3>) -> [Face; 6] {
        let side = |axis: usize, is_max: bool| Face {
            axis,
            value: if is_max { sizes.side(axis) } else { 0 },
            is_max,
        };
        [
            side(0, false),
            side(0, true),
            side(1, false),
            side(1, true),
            side(2, false),
            side(2, true),
        ]
    }

    pub fn id(&self) -> i32 {
        box_side(self.axis, self.is_max)
    }

    pub fn contains(&self, point: &Point<3>) -> bool {
        point[self.axis] == self.value
    }

    /// Drops the fixed coordinate, keeping the other two in axis order.
    pub fn project(&self, point: &Point<3>) -> [i64; 2] {
        match self.axis {
            0 => [point[1], point[2]],
            1 => [point[0], point[2]],
            _ => [point[0], point[1]],
        }
    }
}
