// ---------------------------------------------------------------------- ENUM: Velocity

use crate::prelude::*;

/// Macroscopic velocity, tagged by lattice dimensionality: a single scalar
/// field on a 1D lattice, a two-component vector field on a 2D lattice. The
/// variant is fixed at construction time; kernels dispatch on it once per
/// sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum Velocity {
    Scalar(ScalarField),
    Vector(VectorField),
}

impl Velocity {
    pub fn zeros(lx: usize, ly: usize) -> Self {
        if ly == 1 {
            Velocity::Scalar(ScalarField::zeros(lx, ly))
        } else {
            Velocity::Vector(VectorField::zeros(lx, ly))
        }
    }

    pub fn extents(&self) -> (usize, usize) {
        match self {
            Velocity::Scalar(u) => u.extents(),
            Velocity::Vector(u) => u.extents(),
        }
    }

    pub fn all_finite(&self) -> bool {
        match self {
            Velocity::Scalar(u) => u.all_finite(),
            Velocity::Vector(u) => u.all_finite(),
        }
    }
}

// ------------------------------------------------------------ STRUCT: MacroscopicState

/// Bundle of macroscopic observables for one time step: film height, velocity,
/// film pressure and kinetic-energy density. All constituent fields share the
/// lattice extents; the bundle is created once from the initial condition and
/// afterwards mutated only by the stepper's tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroscopicState {
    pub height: ScalarField,
    pub velocity: Velocity,
    pub pressure: ScalarField,
    pub energy: ScalarField,
}

impl MacroscopicState {
    /// Builds a state from height and velocity, with zeroed pressure and
    /// energy fields. Fails if the velocity extents differ from the height
    /// extents.
    pub fn new(height: ScalarField, velocity: Velocity) -> FilmResult<Self> {
        let (lx, ly) = height.extents();
        if velocity.extents() != (lx, ly) {
            return Err(FilmError::DimensionMismatch {
                context: "macroscopic state construction",
                expected: format!("{lx}x{ly}"),
                found: format!("{}x{}", velocity.extents().0, velocity.extents().1),
            });
        }
        Ok(MacroscopicState {
            height,
            velocity,
            pressure: ScalarField::zeros(lx, ly),
            energy: ScalarField::zeros(lx, ly),
        })
    }

    pub fn extents(&self) -> (usize, usize) {
        self.height.extents()
    }

    pub fn number_of_sites(&self) -> usize {
        self.height.number_of_sites()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_velocity_extents() {
        let height = ScalarField::uniform(1.0, 8, 1);
        let velocity = Velocity::zeros(4, 1);

        let result = MacroscopicState::new(height, velocity);

        assert!(matches!(
            result,
            Err(FilmError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_velocity_variant_follows_extents() {
        assert!(matches!(Velocity::zeros(8, 1), Velocity::Scalar(_)));
        assert!(matches!(Velocity::zeros(8, 8), Velocity::Vector(_)));
    }

    #[test]
    fn test_new_zeroes_pressure_and_energy() {
        let height = ScalarField::uniform(1.0, 4, 4);
        let velocity = Velocity::zeros(4, 4);

        let state = MacroscopicState::new(height, velocity).unwrap();

        assert!(state.pressure.iter().all(|&p| p == 0.0));
        assert!(state.energy.iter().all(|&e| e == 0.0));
    }
}
