//! Wetting potential and film pressure.

use crate::operators;
use crate::prelude::*;
use rayon::prelude::*;

pub const DEFAULT_PRECURSOR_THICKNESS: Float = 0.1;

pub const DEFAULT_EXPONENTS: (i32, i32) = (9, 3);

/// Equilibrium contact angle in units of π.
pub const DEFAULT_CONTACT_ANGLE: Float = 1.0 / 9.0;

// ------------------------------------------------------------------- ENUM: ContactAngle

/// Equilibrium contact angle, in units of π. Either a single value broadcast
/// to every site or a full per-site field for patterned substrates.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactAngle {
    Uniform(Float),
    PerSite(ScalarField),
}

impl ContactAngle {
    /// Resolves the angle into a per-site field once, so the hot kernel never
    /// branches on the shape.
    fn resolve(&self, lx: usize, ly: usize) -> FilmResult<ScalarField> {
        match self {
            ContactAngle::Uniform(theta) => Ok(ScalarField::uniform(*theta, lx, ly)),
            ContactAngle::PerSite(theta) => {
                if theta.extents() != (lx, ly) {
                    return Err(FilmError::DimensionMismatch {
                        context: "per-site contact angle",
                        expected: format!("{lx}x{ly}"),
                        found: format!("{}x{}", theta.get_lx(), theta.get_ly()),
                    });
                }
                Ok(theta.clone())
            }
        }
    }
}

impl Default for ContactAngle {
    fn default() -> Self {
        ContactAngle::Uniform(DEFAULT_CONTACT_ANGLE)
    }
}

// ------------------------------------------------------------ STRUCT: DisjoiningPressure

/// Powerlaw wetting potential
///
/// $$ \Pi(h) = \kappa\left[\left(\frac{h_{\ast}}{h}\right)^{n} - \left(\frac{h_{\ast}}{h}\right)^{m}\right], \qquad \kappa = \gamma\left(1-\cos\pi\theta\right)\frac{(n-1)(m-1)}{(n-m)\,h_{\ast}} $$
///
/// with precursor film thickness `h*`, exponent pair `(n, m)` and contact
/// angle `θ`. The potential vanishes exactly at `h = h*`. The prefactor is
/// resolved into a per-site field at construction.
#[derive(Debug, Clone)]
pub struct DisjoiningPressure {
    h_star: Float,
    n: i32,
    m: i32,
    kappa: ScalarField,
}

impl DisjoiningPressure {
    pub fn new(
        h_star: Float,
        exponents: (i32, i32),
        gamma: Float,
        contact_angle: &ContactAngle,
        lx: usize,
        ly: usize,
    ) -> FilmResult<Self> {
        let (n, m) = exponents;
        if h_star <= 0.0 {
            return Err(FilmError::Configuration(format!(
                "precursor thickness must be positive, got {h_star}"
            )));
        }
        if n == m {
            return Err(FilmError::Configuration(format!(
                "disjoining exponents must differ, got ({n}, {m})"
            )));
        }
        if gamma < 0.0 {
            return Err(FilmError::Configuration(format!(
                "surface tension must be non-negative, got {gamma}"
            )));
        }
        let theta = contact_angle.resolve(lx, ly)?;
        let prefactor = gamma * ((n - 1) * (m - 1)) as Float / ((n - m) as Float * h_star);
        let kappa = ScalarField::from_vec(
            theta
                .iter()
                .map(|theta| prefactor * (1.0 - (std::f64::consts::PI * theta).cos()))
                .collect(),
            lx,
            ly,
        )?;
        Ok(DisjoiningPressure {
            h_star,
            n,
            m,
            kappa,
        })
    }

    pub fn with_defaults(gamma: Float, lx: usize, ly: usize) -> FilmResult<Self> {
        DisjoiningPressure::new(
            DEFAULT_PRECURSOR_THICKNESS,
            DEFAULT_EXPONENTS,
            gamma,
            &ContactAngle::default(),
            lx,
            ly,
        )
    }

    pub fn get_precursor_thickness(&self) -> Float {
        self.h_star
    }

    /// Per-site disjoining pressure of a height field. Heights at or below
    /// zero produce non-finite values here; the stepper's per-tick divergence
    /// check turns those into a fatal error instead of clamping them.
    pub fn compute(&self, height: &ScalarField) -> FilmResult<ScalarField> {
        let (lx, ly) = height.extents();
        if self.kappa.extents() != (lx, ly) {
            return Err(FilmError::DimensionMismatch {
                context: "disjoining pressure",
                expected: format!("{}x{}", self.kappa.get_lx(), self.kappa.get_ly()),
                found: format!("{lx}x{ly}"),
            });
        }
        let data = height
            .as_slice()
            .par_iter()
            .zip(self.kappa.as_slice().par_iter())
            .map(|(&h, &kappa)| {
                let ratio = self.h_star / h;
                kappa * (ratio.powi(self.n) - ratio.powi(self.m))
            })
            .collect::<Vec<Float>>();
        ScalarField::from_vec(data, lx, ly)
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// Film pressure `p = -γ·Δh + Π(h)`.
///
/// Positive pressure drives local thinning, negative pressure local
/// thickening; the forcing term consumes the gradient of this field with the
/// same convention.
pub fn film_pressure(
    height: &ScalarField,
    gamma: Float,
    disjoining: &DisjoiningPressure,
) -> FilmResult<ScalarField> {
    let (lx, ly) = height.extents();
    let laplacian = operators::laplacian(height);
    let disjoining = disjoining.compute(height)?;
    let data = laplacian
        .iter()
        .zip(disjoining.iter())
        .map(|(lap, pi)| -gamma * lap + pi)
        .collect::<Vec<Float>>();
    ScalarField::from_vec(data, lx, ly)
}
