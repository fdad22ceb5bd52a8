use glam::{Quat, UVec3, Vec3};
use itertools::iproduct;

/// Edge length of a single cubie.
pub const CUBIE_SIZE: f32 = 1.0;
/// Gap between adjacent cubies.
pub const CUBIE_SPACING: f32 = 0.05;
/// Distance between the centers of adjacent grid cells.
pub const CUBIE_PITCH: f32 = CUBIE_SIZE + CUBIE_SPACING;

/// Smallest supported cube size.
pub const MIN_SIZE: usize = 3;
/// Largest supported cube size.
pub const MAX_SIZE: usize = 7;

// An orientation counts as axis-aligned identity when its w component is
// within this much of ±1.
const ORIENTATION_EPSILON: f32 = 1e-3;

/// One visible piece of the puzzle: where it started, where it is, and
/// which way it faces.
#[derive(Debug, Clone)]
pub struct Cubie {
    home: UVec3,
    pub(crate) coord: UVec3,
    pub(crate) orientation: Quat,
}

impl Cubie {
    fn new(coord: UVec3) -> Cubie {
        Cubie {
            home: coord,
            coord,
            orientation: Quat::IDENTITY,
        }
    }

    /// The grid cell this cubie was created in. Unique per cubie, so it
    /// doubles as the cubie's identity.
    #[must_use]
    pub fn home(&self) -> UVec3 {
        self.home
    }

    /// The grid cell this cubie currently occupies.
    #[must_use]
    pub fn coord(&self) -> UVec3 {
        self.coord
    }

    /// The current orientation. Snapped to one of the 24 axis-aligned
    /// rotations whenever no turn is animating.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    fn is_home(&self) -> bool {
        self.coord == self.home && self.orientation.w.abs() > 1.0 - ORIENTATION_EPSILON
    }
}

/// The ground truth of cube state: every surface cubie of an N×N×N cube.
///
/// Interior cubies are never instantiated, leaving exactly
/// `n³ − (n−2)³` pieces. Cubies are owned exclusively by this store and
/// referred to elsewhere by index.
#[derive(Debug, Clone)]
pub struct CubeState {
    n: usize,
    cubies: Vec<Cubie>,
}

impl CubeState {
    /// Build a solved cube of the given size.
    ///
    /// # Panics
    ///
    /// If `n` is outside [`MIN_SIZE`]`..=`[`MAX_SIZE`]. Offering only
    /// valid sizes is the caller's responsibility; anything else is a
    /// programming error.
    #[must_use]
    pub fn new(n: usize) -> CubeState {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&n),
            "unsupported cube size {n}"
        );

        let mut cubies = Vec::with_capacity(n.pow(3) - (n - 2).pow(3));
        for (x, y, z) in iproduct!(0..n, 0..n, 0..n) {
            // Skip the hidden core
            if (1..n - 1).contains(&x) && (1..n - 1).contains(&y) && (1..n - 1).contains(&z) {
                continue;
            }

            cubies.push(Cubie::new(UVec3::new(x as u32, y as u32, z as u32)));
        }

        CubeState { n, cubies }
    }

    /// Layers per edge.
    #[must_use]
    pub fn size(&self) -> usize {
        self.n
    }

    /// The grid coordinate that maps to the spatial origin. Fractional for
    /// even sizes.
    #[must_use]
    pub fn half_n(&self) -> f32 {
        (self.n as f32 - 1.0) / 2.0
    }

    #[must_use]
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub(crate) fn cubie_mut(&mut self, idx: usize) -> &mut Cubie {
        &mut self.cubies[idx]
    }

    /// The continuous spatial position derived from a grid coordinate.
    #[must_use]
    pub fn position_of(&self, coord: UVec3) -> Vec3 {
        (coord.as_vec3() - Vec3::splat(self.half_n())) * CUBIE_PITCH
    }

    /// Whether every cubie is back at its home cell with an identity
    /// orientation. Layer turns are the only mutation, so this is
    /// equivalent to "returned to the state the cube was created in".
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(Cubie::is_home)
    }
}
