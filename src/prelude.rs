pub use crate::constants::*;
pub use crate::distribution::DistributionSet;
pub use crate::error::{FilmError, FilmResult};
pub use crate::field::{ScalarField, VectorField};
pub use crate::film;
pub use crate::functions;
pub use crate::moments::{MacroscopicState, Velocity};
pub use crate::parameters::InputConstants;
pub use crate::pressure::ContactAngle;
