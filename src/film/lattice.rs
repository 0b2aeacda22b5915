use super::{Parameters, PostFunction};
use crate::kernel::{self, SlipModel};
use crate::operators;
use crate::prelude::*;
use crate::pressure::{self, DisjoiningPressure};
use crate::velocity_set::{self, VelocitySet};
use rayon::prelude::*;

// ----------------------------------------------------------------------- STRUCT: Lattice

/// The collision-stream stepper. Owns one macroscopic state and one
/// distribution set; every tick reads the previous sweep's fields and writes
/// fresh buffers, so nothing is mutated while a sibling computation within the
/// same sweep still reads it.
#[derive(Debug)]
pub struct Lattice {
    constants: InputConstants,
    velocity_set_parameters: velocity_set::Parameters,
    slip: SlipModel,
    disjoining: DisjoiningPressure,
    state: MacroscopicState,
    f: DistributionSet,
    time_step: usize,
    post_functions: Option<Vec<PostFunction>>,
}

impl Lattice {
    /// Validates the configuration and the initial state, selects the
    /// velocity set from the lattice extents, and seeds the populations with
    /// the equilibrium of the initial state.
    pub fn new(params: Parameters) -> FilmResult<Self> {
        let constants = params.constants;
        constants.validate()?;
        let (lx, ly) = (constants.lx, constants.ly);

        let mut state = params.initial_state;
        if state.extents() != (lx, ly) {
            return Err(FilmError::DimensionMismatch {
                context: "initial state",
                expected: format!("{lx}x{ly}"),
                found: format!("{}x{}", state.extents().0, state.extents().1),
            });
        }

        let velocity_set_parameters =
            VelocitySet::from_extents(lx, ly).get_velocity_set_parameters();
        match (&state.velocity, velocity_set_parameters.get_d()) {
            (Velocity::Scalar(_), 1) | (Velocity::Vector(_), 2) => {}
            (velocity, d) => {
                return Err(FilmError::Configuration(format!(
                    "{}D lattice cannot carry a {} velocity field",
                    d,
                    match velocity {
                        Velocity::Scalar(_) => "scalar",
                        Velocity::Vector(_) => "vector",
                    }
                )));
            }
        }

        let slip = SlipModel::new(params.tau, constants.delta)?;
        let disjoining = DisjoiningPressure::new(
            params.precursor_thickness,
            params.exponents,
            constants.gamma,
            &params.contact_angle,
            lx,
            ly,
        )?;

        state.pressure = pressure::film_pressure(&state.height, constants.gamma, &disjoining)?;
        let f = kernel::equilibrium(&state, constants.gravity, &velocity_set_parameters);

        let lattice = Lattice {
            constants,
            velocity_set_parameters,
            slip,
            disjoining,
            state,
            f,
            time_step: 0,
            post_functions: params.post_functions,
        };
        lattice.check_finite()?;
        Ok(lattice)
    }

    pub fn test_default(dim: usize) -> Self {
        Lattice::new(Parameters::test_default(dim)).expect("test parameters are valid")
    }
}

impl Lattice {
    pub fn get_time_step(&self) -> usize {
        self.time_step
    }

    pub fn get_state(&self) -> &MacroscopicState {
        &self.state
    }

    pub fn get_constants(&self) -> &InputConstants {
        &self.constants
    }

    pub fn get_distributions(&self) -> &DistributionSet {
        &self.f
    }

    pub fn get_d(&self) -> usize {
        self.velocity_set_parameters.get_d()
    }

    pub(super) fn get_post_functions(&self) -> &Option<Vec<PostFunction>> {
        &self.post_functions
    }
}

impl Lattice {
    /// Film pressure of the current height field.
    pub fn pressure_step(&mut self) -> FilmResult<()> {
        self.state.pressure =
            pressure::film_pressure(&self.state.height, self.constants.gamma, &self.disjoining)?;
        Ok(())
    }

    /// BGK relaxation of the populations toward the equilibrium of the
    /// current macroscopic state.
    pub fn collision_step(&mut self) {
        let f_eq = kernel::equilibrium(
            &self.state,
            self.constants.gravity,
            &self.velocity_set_parameters,
        );
        self.f = kernel::bgk_collision(&self.f, &f_eq, self.slip.relaxation_rate());
    }

    /// Displaces every population along its lattice direction with periodic
    /// wraparound.
    pub fn streaming_step(&mut self) {
        self.f = self.f.stream(&self.velocity_set_parameters);
    }

    /// Recovers height as the zeroth moment and velocity as the first moment
    /// with half a time step of pressure-gradient and slip forcing, then
    /// updates the kinetic-energy density.
    pub fn moments_step(&mut self) {
        let (lx, ly) = self.state.extents();
        let n = self.state.number_of_sites();
        let height = self.f.zeroth_moment();

        let velocity = match &self.state.velocity {
            Velocity::Scalar(u_old) => {
                let momentum = self.f.first_moment(&self.velocity_set_parameters, 0);
                let dp_dx = operators::gradient_x(&self.state.pressure);
                let data = (0..n)
                    .into_par_iter()
                    .map(|i| {
                        let force = self.slip.forcing(height[i], dp_dx[i], u_old[i]);
                        (momentum[i] + 0.5 * DELTA_T * force) / height[i]
                    })
                    .collect::<Vec<Float>>();
                Velocity::Scalar(
                    ScalarField::from_vec(data, lx, ly).expect("same extents as the lattice"),
                )
            }
            Velocity::Vector(u_old) => {
                let momentum_x = self.f.first_moment(&self.velocity_set_parameters, 0);
                let momentum_y = self.f.first_moment(&self.velocity_set_parameters, 1);
                let dp_dx = operators::gradient_x(&self.state.pressure);
                let dp_dy = operators::gradient_y(&self.state.pressure);
                let data_x = (0..n)
                    .into_par_iter()
                    .map(|i| {
                        let force = self.slip.forcing(height[i], dp_dx[i], u_old.x[i]);
                        (momentum_x[i] + 0.5 * DELTA_T * force) / height[i]
                    })
                    .collect::<Vec<Float>>();
                let data_y = (0..n)
                    .into_par_iter()
                    .map(|i| {
                        let force = self.slip.forcing(height[i], dp_dy[i], u_old.y[i]);
                        (momentum_y[i] + 0.5 * DELTA_T * force) / height[i]
                    })
                    .collect::<Vec<Float>>();
                Velocity::Vector(VectorField {
                    x: ScalarField::from_vec(data_x, lx, ly).expect("same extents as the lattice"),
                    y: ScalarField::from_vec(data_y, lx, ly).expect("same extents as the lattice"),
                })
            }
        };

        let u_squared = operators::velocity_squared(&velocity);
        let energy = ScalarField::from_vec(
            height
                .iter()
                .zip(u_squared.iter())
                .map(|(h, u2)| 0.5 * h * u2)
                .collect(),
            lx,
            ly,
        )
        .expect("same extents as the lattice");

        self.state.height = height;
        self.state.velocity = velocity;
        self.state.energy = energy;
    }

    /// One full time step: pressure, equilibrium and collision, streaming,
    /// moment recovery, then the divergence check. Any non-finite field is
    /// fatal for the run; the dynamics are explicit and cannot continue from
    /// a non-finite state.
    pub fn tick(&mut self) -> FilmResult<()> {
        self.pressure_step()?;
        self.collision_step();
        self.streaming_step();
        self.moments_step();
        self.time_step += 1;
        self.check_finite()
    }

    fn check_finite(&self) -> FilmResult<()> {
        let time_step = self.time_step;
        if !self.state.height.all_finite() {
            return Err(FilmError::NumericalDivergence {
                time_step,
                field: "height",
            });
        }
        match &self.state.velocity {
            Velocity::Scalar(u) => {
                if !u.all_finite() {
                    return Err(FilmError::NumericalDivergence {
                        time_step,
                        field: "velocity",
                    });
                }
            }
            Velocity::Vector(u) => {
                if !u.x.all_finite() {
                    return Err(FilmError::NumericalDivergence {
                        time_step,
                        field: "velocity_x",
                    });
                }
                if !u.y.all_finite() {
                    return Err(FilmError::NumericalDivergence {
                        time_step,
                        field: "velocity_y",
                    });
                }
            }
        }
        if !self.state.pressure.all_finite() {
            return Err(FilmError::NumericalDivergence {
                time_step,
                field: "pressure",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_state_close(actual: &MacroscopicState, target: &MacroscopicState) {
        for (a, b) in actual.height.iter().zip(target.height.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        match (&actual.velocity, &target.velocity) {
            (Velocity::Scalar(a), Velocity::Scalar(b)) => {
                for (a, b) in a.iter().zip(b.iter()) {
                    assert!((a - b).abs() < 1e-12);
                }
            }
            (Velocity::Vector(a), Velocity::Vector(b)) => {
                for (a, b) in a.x.iter().zip(b.x.iter()) {
                    assert!((a - b).abs() < 1e-12);
                }
                for (a, b) in a.y.iter().zip(b.y.iter()) {
                    assert!((a - b).abs() < 1e-12);
                }
            }
            _ => panic!("velocity variants differ"),
        }
    }

    #[test]
    fn test_initial_populations_recover_the_initial_height() {
        let lattice = Lattice::test_default(2);

        let height = lattice.get_distributions().zeroth_moment();

        for (a, b) in height.iter().zip(lattice.get_state().height.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_uniform_resting_film_is_a_fixed_point_1d() {
        let mut lattice = Lattice::test_default(1);
        let initial = lattice.get_state().clone();

        lattice.tick().unwrap();

        assert_state_close(lattice.get_state(), &initial);
    }

    #[test]
    fn test_uniform_resting_film_is_a_fixed_point_2d() {
        let mut lattice = Lattice::test_default(2);
        let initial = lattice.get_state().clone();

        lattice.tick().unwrap();

        assert_state_close(lattice.get_state(), &initial);
    }

    #[test]
    fn test_tick_advances_the_time_step() {
        let mut lattice = Lattice::test_default(1);
        assert_eq!(lattice.get_time_step(), 0);

        lattice.tick().unwrap();
        lattice.tick().unwrap();

        assert_eq!(lattice.get_time_step(), 2);
    }

    #[test]
    fn test_tick_conserves_mass() {
        let constants = InputConstants::test_default(2);
        let mut params = Parameters::test_default(2);
        params.initial_state = functions::perturbed_film(&constants);
        let mut lattice = Lattice::new(params).unwrap();
        let mass_before = lattice.get_state().height.sum();

        for _ in 0..5 {
            lattice.tick().unwrap();
        }

        let mass_after = lattice.get_state().height.sum();
        assert!((mass_before - mass_after).abs() < 1e-10 * mass_before);
    }

    #[test]
    fn test_rejects_initial_state_of_wrong_extents() {
        let mut params = Parameters::test_default(2);
        params.initial_state = functions::uniform_film(&InputConstants {
            lx: 4,
            ly: 4,
            ..InputConstants::test_default(2)
        });

        let result = Lattice::new(params);

        assert!(matches!(
            result,
            Err(FilmError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_velocity_variant_of_wrong_dimensionality() {
        let mut params = Parameters::test_default(2);
        let (lx, ly) = (params.constants.lx, params.constants.ly);
        params.initial_state = MacroscopicState::new(
            ScalarField::uniform(1.0, lx, ly),
            Velocity::Scalar(ScalarField::uniform(0.0, lx, ly)),
        )
        .unwrap();

        let result = Lattice::new(params);

        assert!(matches!(result, Err(FilmError::Configuration(_))));
    }

    #[test]
    fn test_ruptured_film_surfaces_numerical_divergence() {
        let mut params = Parameters::test_default(1);
        let mut height = ScalarField::uniform(1.0, 10, 1);
        height.set(3, 0, 0.0);
        params.initial_state =
            MacroscopicState::new(height, Velocity::zeros(10, 1)).unwrap();

        let result = Lattice::new(params);

        match result {
            Err(FilmError::NumericalDivergence { time_step, field }) => {
                assert_eq!(time_step, 0);
                assert_eq!(field, "pressure");
            }
            other => panic!("expected numerical divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_perturbation_relaxes_under_surface_tension() {
        let constants = InputConstants {
            lx: 16,
            ly: 1,
            max_runtime: 50,
            dump_interval: 50,
            gravity: 0.0,
            gamma: 0.01,
            delta: 1.0,
        };
        let initial_state = functions::perturbed_film(&constants);
        let amplitude_before = initial_state
            .height
            .iter()
            .fold(Float::NEG_INFINITY, |max, &h| max.max(h))
            - 1.0;
        let mut lattice = Lattice::new(Parameters::new(constants, initial_state)).unwrap();

        for _ in 0..50 {
            lattice.tick().unwrap();
        }

        let amplitude_after = lattice
            .get_state()
            .height
            .iter()
            .fold(Float::NEG_INFINITY, |max, &h| max.max(h))
            - 1.0;
        assert!(amplitude_after.abs() < amplitude_before.abs());
    }
}
