use crate::operators;
use crate::prelude::*;
use crate::velocity_set;
use rayon::prelude::*;

/// Default BGK relaxation time.
pub const DEFAULT_TAU: Float = 1.0;

// ---------------------------------------------------------------------- STRUCT: SlipModel

/// Relaxation and forcing closure of the physical model.
///
/// The exact coupling between the slip length `δ` and the BGK relaxation rate
/// `ω`, and the constants of the pressure-gradient forcing, are properties of
/// the thin-film formulation rather than of this solver; `tau` is the
/// configuration surface for that coupling. The defaults follow the standard
/// BGK form `ω = Δt/τ` with the lattice viscosity `ν = c_s²(τ - 1/2)` and a
/// slip friction that interpolates between no-slip (`δ → 0`) and free-slip
/// (`δ → ∞`) substrates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlipModel {
    tau: Float,
    delta: Float,
}

impl SlipModel {
    pub fn new(tau: Float, delta: Float) -> FilmResult<Self> {
        if tau <= 0.5 {
            return Err(FilmError::Configuration(format!(
                "relaxation time must exceed 1/2, got {tau}"
            )));
        }
        if delta <= 0.0 {
            return Err(FilmError::Configuration(format!(
                "slip length must be positive, got {delta}"
            )));
        }
        Ok(SlipModel { tau, delta })
    }

    pub fn with_default_tau(delta: Float) -> FilmResult<Self> {
        SlipModel::new(DEFAULT_TAU, delta)
    }

    pub fn get_tau(&self) -> Float {
        self.tau
    }

    pub fn get_delta(&self) -> Float {
        self.delta
    }

    pub fn relaxation_rate(&self) -> Float {
        DELTA_T / self.tau
    }

    pub fn viscosity(&self) -> Float {
        CS_2 * (self.tau - 0.5)
    }

    /// Substrate friction coefficient for local film height `h`:
    /// `α = 6νh / (2h² + 6δh + 3δ²)`.
    pub fn friction(&self, h: Float) -> Float {
        let delta = self.delta;
        6.0 * self.viscosity() * h / (2.0 * h * h + 6.0 * delta * h + 3.0 * delta * delta)
    }

    /// Per-site force entering the first-moment recovery:
    /// `F = -h·∇p - α(h)·u`.
    pub fn forcing(&self, h: Float, pressure_gradient: Float, u: Float) -> Float {
        -h * pressure_gradient - self.friction(h) * u
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// D1Q3 equilibrium populations for lattice speed `v`:
///
/// $$ f\_{0}^{\text{eq}} = h - \frac{1}{2v^{2}}gh^{2} - \frac{1}{v^{2}}hu^{2} $$
/// $$ f\_{1}^{\text{eq}} = \frac{1}{4v^{2}}gh^{2} + \frac{1}{2v}hu + \frac{1}{2v^{2}}hu^{2} $$
/// $$ f\_{2}^{\text{eq}} = \frac{1}{4v^{2}}gh^{2} - \frac{1}{2v}hu + \frac{1}{2v^{2}}hu^{2} $$
///
/// The populations sum to `h` exactly and their first moment is `hu` exactly.
pub fn equilibrium_d1q3(h: Float, u: Float, u_squared: Float, gravity: Float) -> [Float; 3] {
    let v = LATTICE_SPEED;
    let g_h2 = gravity * h * h;
    let h_u = h * u;
    let h_u2 = h * u_squared;
    [
        h - 0.5 / (v * v) * g_h2 - h_u2 / (v * v),
        0.25 / (v * v) * g_h2 + 0.5 / v * h_u + 0.5 / (v * v) * h_u2,
        0.25 / (v * v) * g_h2 - 0.5 / v * h_u + 0.5 / (v * v) * h_u2,
    ]
}

/// D2Q9 equilibrium populations:
///
/// $$ f\_{i}^{\text{eq}} = w\_{i}h\left[\frac{3}{2}gh + 3\,\mathbf{c}\_{i}\cdot\mathbf{u} + \frac{9}{2}\left(\mathbf{c}\_{i}\cdot\mathbf{u}\right)^{2} - \frac{3}{2}\mathbf{u}^{2}\right], \quad i = 1..8 $$
/// $$ f\_{0}^{\text{eq}} = h - \frac{4}{9}h\left(\frac{15}{8}gh + \frac{3}{2}\mathbf{u}^{2}\right) $$
///
/// The rest population absorbs what the moving directions carry, so the set
/// sums to `h` exactly and its first moment is `h`**u** exactly.
pub fn equilibrium_d2q9(
    h: Float,
    u_x: Float,
    u_y: Float,
    u_squared: Float,
    gravity: Float,
    vel_set_params: &velocity_set::Parameters,
) -> [Float; 9] {
    let c = vel_set_params.get_c();
    let w = vel_set_params.get_w();
    let mut f_eq = [0.0; 9];
    f_eq[0] = h - 4.0 / 9.0 * h * (15.0 / 8.0 * gravity * h + 1.5 * u_squared);
    (1..9).for_each(|i| {
        let u_dot_c = u_x * c[i][0] as Float + u_y * c[i][1] as Float;
        f_eq[i] = w[i]
            * h
            * (1.5 * gravity * h + 3.0 * u_dot_c + 4.5 * u_dot_c * u_dot_c - 1.5 * u_squared);
    });
    f_eq
}

/// Equilibrium distribution set from the macroscopic state, dispatched on the
/// velocity variant selected at construction time.
pub fn equilibrium(
    state: &MacroscopicState,
    gravity: Float,
    vel_set_params: &velocity_set::Parameters,
) -> DistributionSet {
    let (lx, ly) = state.extents();
    let n = state.number_of_sites();
    let u_squared = operators::velocity_squared(&state.velocity);
    let h = &state.height;
    match &state.velocity {
        Velocity::Scalar(u) => {
            let per_site = (0..n)
                .into_par_iter()
                .map(|i| equilibrium_d1q3(h[i], u[i], u_squared[i], gravity))
                .collect::<Vec<[Float; 3]>>();
            let f = (0..3)
                .map(|dir| {
                    ScalarField::from_vec(per_site.iter().map(|f_eq| f_eq[dir]).collect(), lx, ly)
                        .expect("same extents as the state")
                })
                .collect::<Vec<ScalarField>>();
            DistributionSet::new(f)
        }
        Velocity::Vector(u) => {
            let per_site = (0..n)
                .into_par_iter()
                .map(|i| {
                    equilibrium_d2q9(h[i], u.x[i], u.y[i], u_squared[i], gravity, vel_set_params)
                })
                .collect::<Vec<[Float; 9]>>();
            let f = (0..9)
                .map(|dir| {
                    ScalarField::from_vec(per_site.iter().map(|f_eq| f_eq[dir]).collect(), lx, ly)
                        .expect("same extents as the state")
                })
                .collect::<Vec<ScalarField>>();
            DistributionSet::new(f)
        }
    }
}

/// BGK relaxation toward equilibrium:
///
/// $$ f\_{i} \leftarrow f\_{i} + \omega\left(f\_{i}^{\text{eq}} - f\_{i}\right) $$
pub fn bgk_collision(
    f: &DistributionSet,
    f_eq: &DistributionSet,
    omega: Float,
) -> DistributionSet {
    let (lx, ly) = f.extents();
    let omega_prime = 1.0 - omega;
    let f_star = (0..f.get_q())
        .map(|i| {
            let data = f
                .get_f(i)
                .as_slice()
                .par_iter()
                .zip(f_eq.get_f(i).as_slice().par_iter())
                .map(|(f_i, f_eq_i)| omega_prime * f_i + omega * f_eq_i)
                .collect::<Vec<Float>>();
            ScalarField::from_vec(data, lx, ly).expect("same extents as the populations")
        })
        .collect::<Vec<ScalarField>>();
    DistributionSet::new(f_star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::velocity_set::Parameters;

    fn wavy_state_1d(lx: usize) -> MacroscopicState {
        let height = ScalarField::from_vec(
            (0..lx).map(|x| 0.5 + 0.05 * (x as Float).sin()).collect(),
            lx,
            1,
        )
        .unwrap();
        let velocity = Velocity::Scalar(
            ScalarField::from_vec(
                (0..lx).map(|x| 0.02 * (x as Float).cos()).collect(),
                lx,
                1,
            )
            .unwrap(),
        );
        MacroscopicState::new(height, velocity).unwrap()
    }

    fn wavy_state_2d(lx: usize, ly: usize) -> MacroscopicState {
        let height = ScalarField::from_vec(
            (0..lx * ly)
                .map(|i| 0.5 + 0.05 * (i as Float).sin())
                .collect(),
            lx,
            ly,
        )
        .unwrap();
        let u_x = ScalarField::from_vec(
            (0..lx * ly).map(|i| 0.02 * (i as Float).cos()).collect(),
            lx,
            ly,
        )
        .unwrap();
        let u_y = ScalarField::from_vec(
            (0..lx * ly).map(|i| 0.01 * (i as Float).sin()).collect(),
            lx,
            ly,
        )
        .unwrap();
        let velocity = Velocity::Vector(VectorField::new(u_x, u_y).unwrap());
        MacroscopicState::new(height, velocity).unwrap()
    }

    #[test]
    fn test_equilibrium_d1q3_conserves_zeroth_moment() {
        let state = wavy_state_1d(16);
        let vel_set_params = Parameters::test_default(1);

        let f_eq = equilibrium(&state, 0.3, &vel_set_params);

        let height = f_eq.zeroth_moment();
        for (a, b) in height.iter().zip(state.height.iter()) {
            assert!((a - b).abs() < 1e-12 * b.abs());
        }
    }

    #[test]
    fn test_equilibrium_d1q3_first_moment_is_momentum() {
        let state = wavy_state_1d(16);
        let vel_set_params = Parameters::test_default(1);

        let f_eq = equilibrium(&state, 0.3, &vel_set_params);

        let momentum = f_eq.first_moment(&vel_set_params, 0);
        let Velocity::Scalar(u) = &state.velocity else {
            unreachable!()
        };
        for ((m, h), u_x) in momentum.iter().zip(state.height.iter()).zip(u.iter()) {
            assert!((m - h * u_x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_equilibrium_d2q9_conserves_zeroth_moment() {
        let state = wavy_state_2d(6, 5);
        let vel_set_params = Parameters::test_default(2);

        let f_eq = equilibrium(&state, 0.3, &vel_set_params);

        let height = f_eq.zeroth_moment();
        for (a, b) in height.iter().zip(state.height.iter()) {
            assert!((a - b).abs() < 1e-12 * b.abs());
        }
    }

    #[test]
    fn test_equilibrium_d2q9_first_moment_is_momentum() {
        let state = wavy_state_2d(6, 5);
        let vel_set_params = Parameters::test_default(2);

        let f_eq = equilibrium(&state, 0.3, &vel_set_params);

        let Velocity::Vector(u) = &state.velocity else {
            unreachable!()
        };
        for (component, u_c) in [&u.x, &u.y].iter().enumerate() {
            let momentum = f_eq.first_moment(&vel_set_params, component);
            for ((m, h), u_x) in momentum.iter().zip(state.height.iter()).zip(u_c.iter()) {
                assert!((m - h * u_x).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_equilibrium_at_rest_without_gravity_is_pure_rest_population() {
        let h = 0.7;
        let f_eq = equilibrium_d1q3(h, 0.0, 0.0, 0.0);
        assert_eq!(f_eq, [h, 0.0, 0.0]);

        let vel_set_params = Parameters::test_default(2);
        let f_eq = equilibrium_d2q9(h, 0.0, 0.0, 0.0, 0.0, &vel_set_params);
        assert_eq!(f_eq[0], h);
        for &f_i in &f_eq[1..] {
            assert_eq!(f_i, 0.0);
        }
    }

    #[test]
    fn test_bgk_collision_with_unit_rate_reaches_equilibrium() {
        let state = wavy_state_1d(8);
        let vel_set_params = Parameters::test_default(1);
        let f_eq = equilibrium(&state, 0.0, &vel_set_params);
        let f = DistributionSet::zeros(3, 8, 1);

        let f_star = bgk_collision(&f, &f_eq, 1.0);

        for i in 0..3 {
            for (a, b) in f_star.get_f(i).iter().zip(f_eq.get_f(i).iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_bgk_collision_relaxes_halfway() {
        let f = DistributionSet::new(vec![ScalarField::uniform(1.0, 4, 1); 3]);
        let f_eq = DistributionSet::new(vec![ScalarField::uniform(2.0, 4, 1); 3]);

        let f_star = bgk_collision(&f, &f_eq, 0.5);

        for i in 0..3 {
            for &value in f_star.get_f(i).iter() {
                assert!((value - 1.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_slip_model_rejects_invalid_parameters() {
        assert!(matches!(
            SlipModel::new(0.5, 1.0),
            Err(FilmError::Configuration(_))
        ));
        assert!(matches!(
            SlipModel::new(1.0, 0.0),
            Err(FilmError::Configuration(_))
        ));
    }

    #[test]
    fn test_slip_model_relaxation_rate() {
        let slip = SlipModel::new(1.0, 1.0).unwrap();
        assert!((slip.relaxation_rate() - 1.0).abs() < 1e-12);

        let slip = SlipModel::new(2.0, 1.0).unwrap();
        assert!((slip.relaxation_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_slip_friction_decreases_with_slip_length() {
        let tight = SlipModel::new(1.0, 0.1).unwrap();
        let loose = SlipModel::new(1.0, 10.0).unwrap();

        assert!(tight.friction(1.0) > loose.friction(1.0));
        assert!(loose.friction(1.0) > 0.0);
    }

    #[test]
    fn test_forcing_vanishes_at_rest_with_flat_pressure() {
        let slip = SlipModel::new(1.0, 1.0).unwrap();

        assert_eq!(slip.forcing(0.5, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_forcing_opposes_pressure_gradient_and_velocity() {
        let slip = SlipModel::new(1.0, 1.0).unwrap();

        assert!(slip.forcing(0.5, 1.0, 0.0) < 0.0);
        assert!(slip.forcing(0.5, 0.0, 1.0) < 0.0);
    }
}
