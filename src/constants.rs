pub type Float = f64;

pub const DELTA_T: Float = 1.0;

pub const DELTA_X: Float = 1.0;

/// Lattice speed `v = Δx/Δt`, the magnitude of one lattice link per step.
pub const LATTICE_SPEED: Float = DELTA_X / DELTA_T;

pub const CS_2: Float = 1.0 / 3.0 * DELTA_X * DELTA_X / DELTA_T / DELTA_T;
