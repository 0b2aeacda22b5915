//! Initial-condition providers. Each builds a macroscopic state matching the
//! configured lattice extents; the lattice constructor re-validates the
//! extents on entry.

use crate::prelude::*;
use std::f64::consts::TAU;

pub const BASE_HEIGHT: Float = 1.0;

pub const PERTURBATION_AMPLITUDE: Float = 0.1;

pub fn uniform_height(value: Float, lx: usize, ly: usize) -> ScalarField {
    ScalarField::uniform(value, lx, ly)
}

pub fn zero_velocity(lx: usize, ly: usize) -> Velocity {
    Velocity::zeros(lx, ly)
}

/// Flat resting film of unit height.
pub fn uniform_film(constants: &InputConstants) -> MacroscopicState {
    let (lx, ly) = (constants.lx, constants.ly);
    MacroscopicState::new(uniform_height(BASE_HEIGHT, lx, ly), zero_velocity(lx, ly))
        .expect("uniform fields share extents")
}

/// Resting film with a sinusoidal surface perturbation, one full wave per
/// periodic box in each dimension. The standard seed for dewetting runs.
pub fn perturbed_film(constants: &InputConstants) -> MacroscopicState {
    let (lx, ly) = (constants.lx, constants.ly);
    let mut height = uniform_height(BASE_HEIGHT, lx, ly);
    (0..ly).for_each(|y| {
        (0..lx).for_each(|x| {
            let wave_x = (TAU * x as Float / lx as Float).sin();
            let wave = if constants.is_one_dimensional() {
                wave_x
            } else {
                wave_x * (TAU * y as Float / ly as Float).sin()
            };
            height.set(x, y, BASE_HEIGHT + PERTURBATION_AMPLITUDE * wave);
        });
    });
    MacroscopicState::new(height, zero_velocity(lx, ly)).expect("uniform fields share extents")
}
