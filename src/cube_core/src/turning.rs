//! Layer membership and quarter-turn application.
//!
//! A turn is position + orientation composition about the cube center
//! followed by a snap back onto the grid. The snap after every turn is
//! what keeps float error from accumulating over a long scramble/solve
//! sequence and keeps the threshold test in [`select_layer`] exact for
//! the next move.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, UVec3, Vec3};

use crate::{
    cube::{CUBIE_PITCH, CubeState},
    moves::{Axis, Move},
};

/// Slack allowed when testing a cubie's spatial coordinate against a
/// layer threshold. Exists solely to absorb float error from the
/// continuous representation; adjacent layers sit a full [`CUBIE_PITCH`]
/// apart, so the canonical comparison is integer equality after rounding.
pub const LAYER_TOLERANCE: f32 = 0.1;

/// Indices of the cubies currently occupying `layer` along `axis`.
///
/// For a cube in a valid post-snap state this is every cubie whose
/// integer coordinate along `axis` equals `layer` — up to `n²` of them.
/// A corrupted state may produce an empty set; the scheduler treats that
/// as a skippable no-op rather than an error.
///
/// # Panics
///
/// If `layer` is outside the cube's grid.
#[must_use]
pub fn select_layer(cube: &CubeState, axis: Axis, layer: usize) -> Vec<usize> {
    assert!(layer < cube.size(), "layer {layer} out of range");

    let threshold = (layer as f32 - cube.half_n()) * CUBIE_PITCH;

    cube.cubies()
        .iter()
        .enumerate()
        .filter(|(_, cubie)| {
            (cube.position_of(cubie.coord())[axis.index()] - threshold).abs() < LAYER_TOLERANCE
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Rotate the given cubies by `angle` about the cube-center axis, then
/// snap: positions back onto the nearest grid cell, orientations onto the
/// nearest of the 24 axis-aligned rotations.
pub fn rotate_cubies(cube: &mut CubeState, indices: &[usize], axis: Axis, angle: f32) {
    let rotation = Quat::from_axis_angle(axis.unit(), angle);
    let half_n = cube.half_n();
    let max_coord = (cube.size() - 1) as f32;

    for &idx in indices {
        let position = cube.position_of(cube.cubies()[idx].coord());
        let rotated = rotation * position;

        let cubie = cube.cubie_mut(idx);
        cubie.coord = snap_to_grid(rotated, half_n, max_coord);
        cubie.orientation = snap_orientation(rotation * cubie.orientation);
    }
}

/// Select-and-rotate in one step. Returns how many cubies were affected.
pub fn apply_move(cube: &mut CubeState, mv: Move) -> usize {
    let layer = select_layer(cube, mv.axis(), mv.layer());
    rotate_cubies(cube, &layer, mv.axis(), mv.angle());
    layer.len()
}

fn snap_to_grid(position: Vec3, half_n: f32, max_coord: f32) -> UVec3 {
    (position / CUBIE_PITCH + half_n)
        .round()
        .clamp(Vec3::ZERO, Vec3::splat(max_coord))
        .as_uvec3()
}

/// Round an orientation to the nearest axis-aligned rotation by rounding
/// each Euler component to a multiple of π/2 and rebuilding the
/// quaternion.
#[must_use]
pub fn snap_orientation(orientation: Quat) -> Quat {
    let (x, y, z) = orientation.to_euler(EulerRot::XYZ);
    Quat::from_euler(
        EulerRot::XYZ,
        round_quarter(x),
        round_quarter(y),
        round_quarter(z),
    )
}

fn round_quarter(angle: f32) -> f32 {
    (angle / FRAC_PI_2).round() * FRAC_PI_2
}
