//! Discretized differential operators on periodic fields.
//!
//! There is no boundary special-casing anywhere in this module; correctness at
//! the domain edges rests entirely on the modular indexing of
//! [`ScalarField::periodic`].

use crate::prelude::*;
use rayon::prelude::*;

/// Periodic Laplacian of a scalar field.
///
/// On a 1D lattice this is the central difference
/// `Δh(x) = h(x-1) - 2h(x) + h(x+1)`. On a 2D lattice it is the nine-point
/// isotropic stencil: the four axis neighbors with weight 4, the four diagonal
/// neighbors with weight 1, minus 20 times the center, the sum scaled by 1/6.
pub fn laplacian(h: &ScalarField) -> ScalarField {
    let (lx, ly) = h.extents();
    if ly == 1 {
        let data = (0..lx)
            .into_par_iter()
            .map(|x| {
                let x = x as i32;
                h.periodic(x - 1, 0) - 2.0 * h.periodic(x, 0) + h.periodic(x + 1, 0)
            })
            .collect::<Vec<Float>>();
        ScalarField::from_vec(data, lx, ly).expect("same extents as the input")
    } else {
        let data = (0..lx * ly)
            .into_par_iter()
            .map(|i| {
                let x = (i % lx) as i32;
                let y = (i / lx) as i32;
                let axis = h.periodic(x + 1, y)
                    + h.periodic(x - 1, y)
                    + h.periodic(x, y + 1)
                    + h.periodic(x, y - 1);
                let diagonal = h.periodic(x + 1, y + 1)
                    + h.periodic(x - 1, y + 1)
                    + h.periodic(x - 1, y - 1)
                    + h.periodic(x + 1, y - 1);
                (4.0 * axis + diagonal - 20.0 * h.periodic(x, y)) / 6.0
            })
            .collect::<Vec<Float>>();
        ScalarField::from_vec(data, lx, ly).expect("same extents as the input")
    }
}

/// Periodic central-difference derivative along x:
/// `∂h(x) = (h(x+1) - h(x-1)) / 2`.
pub fn gradient_x(h: &ScalarField) -> ScalarField {
    let (lx, ly) = h.extents();
    let data = (0..lx * ly)
        .into_par_iter()
        .map(|i| {
            let x = (i % lx) as i32;
            let y = (i / lx) as i32;
            0.5 * (h.periodic(x + 1, y) - h.periodic(x - 1, y))
        })
        .collect::<Vec<Float>>();
    ScalarField::from_vec(data, lx, ly).expect("same extents as the input")
}

/// Periodic central-difference derivative along y. On a single-row lattice the
/// wrapped neighbors coincide with the site itself and the derivative is
/// identically zero.
pub fn gradient_y(h: &ScalarField) -> ScalarField {
    let (lx, ly) = h.extents();
    let data = (0..lx * ly)
        .into_par_iter()
        .map(|i| {
            let x = (i % lx) as i32;
            let y = (i / lx) as i32;
            0.5 * (h.periodic(x, y + 1) - h.periodic(x, y - 1))
        })
        .collect::<Vec<Float>>();
    ScalarField::from_vec(data, lx, ly).expect("same extents as the input")
}

/// Squared velocity magnitude, pointwise: `u² = ux² + uy²` for a vector
/// field, the plain square for a scalar field.
pub fn velocity_squared(velocity: &Velocity) -> ScalarField {
    match velocity {
        Velocity::Scalar(u) => {
            let (lx, ly) = u.extents();
            let data = u.iter().map(|u_x| u_x * u_x).collect::<Vec<Float>>();
            ScalarField::from_vec(data, lx, ly).expect("same extents as the input")
        }
        Velocity::Vector(u) => {
            let (lx, ly) = u.extents();
            let data = u
                .x
                .iter()
                .zip(u.y.iter())
                .map(|(u_x, u_y)| u_x * u_x + u_y * u_y)
                .collect::<Vec<Float>>();
            ScalarField::from_vec(data, lx, ly).expect("same extents as the input")
        }
    }
}
