//! Runtime constants, read once from a TOML input file and immutable for the
//! duration of the run.

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_ly() -> usize {
    1
}

fn default_gamma() -> Float {
    0.01
}

fn default_delta() -> Float {
    1.0
}

// -------------------------------------------------------------- STRUCT: InputConstants

/// Lattice extents, run length, dump cadence and the physical constants of
/// the film: gravitational acceleration, surface tension `γ` and slip length
/// `δ`. A `ly` of 1 selects the one-dimensional model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConstants {
    pub lx: usize,
    #[serde(default = "default_ly")]
    pub ly: usize,
    pub max_runtime: usize,
    pub dump_interval: usize,
    #[serde(default)]
    pub gravity: Float,
    #[serde(default = "default_gamma")]
    pub gamma: Float,
    #[serde(default = "default_delta")]
    pub delta: Float,
}

impl InputConstants {
    pub fn validate(&self) -> FilmResult<()> {
        if self.lx == 0 || self.ly == 0 {
            return Err(FilmError::Configuration(format!(
                "lattice extents must be positive, got {}x{}",
                self.lx, self.ly
            )));
        }
        if self.max_runtime == 0 {
            return Err(FilmError::Configuration(
                "max_runtime must be positive".to_string(),
            ));
        }
        if self.dump_interval == 0 || self.dump_interval > self.max_runtime {
            return Err(FilmError::Configuration(format!(
                "dump_interval must lie in 1..={}, got {}",
                self.max_runtime, self.dump_interval
            )));
        }
        if self.gamma < 0.0 {
            return Err(FilmError::Configuration(format!(
                "surface tension must be non-negative, got {}",
                self.gamma
            )));
        }
        if self.delta <= 0.0 {
            return Err(FilmError::Configuration(format!(
                "slip length must be positive, got {}",
                self.delta
            )));
        }
        Ok(())
    }

    pub fn number_of_sites(&self) -> usize {
        self.lx * self.ly
    }

    pub fn is_one_dimensional(&self) -> bool {
        self.ly == 1
    }

    pub fn test_default(dim: usize) -> Self {
        match dim {
            1 => InputConstants {
                lx: 10,
                ly: 1,
                max_runtime: 100,
                dump_interval: 10,
                gravity: 0.0,
                gamma: 0.01,
                delta: 1.0,
            },
            2 => InputConstants {
                ly: 10,
                ..InputConstants::test_default(1)
            },
            _ => panic!("Unsupported dimension: {dim}"),
        }
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

pub fn parse_input(contents: &str) -> FilmResult<InputConstants> {
    let constants = toml::from_str::<InputConstants>(contents)
        .map_err(|e| FilmError::Configuration(format!("invalid input file: {e}")))?;
    constants.validate()?;
    Ok(constants)
}

pub fn read_input_file<P>(path: P) -> FilmResult<InputConstants>
where
    P: AsRef<Path>,
{
    let contents = fs::read_to_string(&path).map_err(|e| {
        FilmError::Configuration(format!(
            "cannot read input file {}: {e}",
            path.as_ref().display()
        ))
    })?;
    parse_input(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_applies_defaults() {
        let constants = parse_input(
            r#"
            lx = 20
            max_runtime = 1000
            dump_interval = 100
            "#,
        )
        .unwrap();

        assert_eq!(constants.lx, 20);
        assert_eq!(constants.ly, 1);
        assert_eq!(constants.gravity, 0.0);
        assert_eq!(constants.gamma, 0.01);
        assert_eq!(constants.delta, 1.0);
        assert!(constants.is_one_dimensional());
    }

    #[test]
    fn test_parse_input_full_record() {
        let constants = parse_input(
            r#"
            lx = 10
            ly = 5
            max_runtime = 1000
            dump_interval = 100
            gravity = 0.0
            gamma = 0.01
            delta = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(constants.lx, 10);
        assert_eq!(constants.ly, 5);
        assert_eq!(constants.max_runtime, 1000);
        assert_eq!(constants.dump_interval, 100);
        assert!(!constants.is_one_dimensional());
        assert_eq!(constants.number_of_sites(), 50);
    }

    #[test]
    fn test_parse_input_rejects_unknown_fields() {
        let result = parse_input(
            r#"
            lx = 10
            max_runtime = 1000
            dump_interval = 100
            viscosity = 0.1
            "#,
        );

        assert!(matches!(result, Err(FilmError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_zero_extents() {
        let constants = InputConstants {
            lx: 0,
            ..InputConstants::test_default(1)
        };

        assert!(matches!(
            constants.validate(),
            Err(FilmError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_dump_interval() {
        let constants = InputConstants {
            dump_interval: 0,
            ..InputConstants::test_default(1)
        };

        assert!(matches!(
            constants.validate(),
            Err(FilmError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_dump_interval_beyond_runtime() {
        let constants = InputConstants {
            max_runtime: 10,
            dump_interval: 11,
            ..InputConstants::test_default(1)
        };

        assert!(matches!(
            constants.validate(),
            Err(FilmError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_slip_length() {
        let constants = InputConstants {
            delta: 0.0,
            ..InputConstants::test_default(1)
        };

        assert!(matches!(
            constants.validate(),
            Err(FilmError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_surface_tension() {
        let constants = InputConstants {
            gamma: -0.01,
            ..InputConstants::test_default(2)
        };

        assert!(matches!(
            constants.validate(),
            Err(FilmError::Configuration(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let constants = InputConstants::test_default(2);

        let encoded = toml::to_string(&constants).unwrap();
        let decoded = parse_input(&encoded).unwrap();

        assert_eq!(decoded, constants);
    }
}
