use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

/// The magnitude of every legal turn angle.
pub const QUARTER_TURN: f32 = FRAC_PI_2;

/// One of the three rotation axes of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// The component index of this axis in a `Vec3` or grid coordinate.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A quarter turn of a single layer: which axis, which layer along that
/// axis, and a signed angle of ±π/2. Immutable once created; the
/// constructors are the only way to build one, which keeps the angle
/// domain exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    axis: Axis,
    layer: usize,
    angle: f32,
}

impl Move {
    /// A turn by +π/2 about `axis`.
    #[must_use]
    pub fn positive(axis: Axis, layer: usize) -> Move {
        Move {
            axis,
            layer,
            angle: QUARTER_TURN,
        }
    }

    /// A turn by −π/2 about `axis`.
    #[must_use]
    pub fn negative(axis: Axis, layer: usize) -> Move {
        Move {
            axis,
            layer,
            angle: -QUARTER_TURN,
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn layer(self) -> usize {
        self.layer
    }

    #[must_use]
    pub fn angle(self) -> f32 {
        self.angle
    }

    /// The algebraic inverse: same axis and layer, negated angle. Applying
    /// a move and then its inverse returns every affected cubie to where
    /// it started.
    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            angle: -self.angle,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Move, QUARTER_TURN};

    #[test]
    fn inverse_negates_the_angle_only() {
        let mv = Move::positive(Axis::Y, 2);
        let inv = mv.inverse();

        assert_eq!(inv.axis(), Axis::Y);
        assert_eq!(inv.layer(), 2);
        assert_eq!(inv.angle(), -QUARTER_TURN);
        assert_eq!(inv.inverse(), mv);
    }

    #[test]
    fn axis_indices_match_vector_components() {
        for axis in Axis::ALL {
            assert_eq!(axis.unit()[axis.index()], 1.0);
        }
    }
}
