// ------------------------------------------------------------------------------- MODULES

mod d1q3;
mod d2q9;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude::*;

pub use VelocitySet::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocitySet {
    D1Q3 = 0,
    D2Q9 = 1,
}

impl VelocitySet {
    /// Construction-time dimensionality selection: a single row of lattice
    /// points runs the 1D three-speed model, anything else the 2D nine-speed
    /// model.
    pub fn from_extents(_lx: usize, ly: usize) -> Self {
        if ly == 1 { D1Q3 } else { D2Q9 }
    }

    pub fn get_velocity_set_parameters(&self) -> Parameters {
        match self {
            D1Q3 => Parameters {
                velocity_set: D1Q3,
                d: d1q3::D,
                q: d1q3::Q,
                c: d1q3::C.iter().map(|&arr| arr.to_vec()).collect(),
                w: d1q3::W.to_vec(),
            },
            D2Q9 => Parameters {
                velocity_set: D2Q9,
                d: d2q9::D,
                q: d2q9::Q,
                c: d2q9::C.iter().map(|&arr| arr.to_vec()).collect(),
                w: d2q9::W.to_vec(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub(crate) velocity_set: VelocitySet,
    pub(crate) d: usize,
    pub(crate) q: usize,
    pub(crate) c: Vec<Vec<i32>>,
    pub(crate) w: Vec<Float>,
}

impl Default for Parameters {
    fn default() -> Self {
        D2Q9.get_velocity_set_parameters()
    }
}

impl Parameters {
    pub fn test_default(dim: usize) -> Self {
        match dim {
            1 => D1Q3.get_velocity_set_parameters(),
            2 => Default::default(),
            _ => panic!("Unsupported dimension: {dim}"),
        }
    }
}

impl Parameters {
    pub fn get_d(&self) -> usize {
        self.d
    }

    pub fn get_q(&self) -> usize {
        self.q
    }

    pub fn get_c(&self) -> &Vec<Vec<i32>> {
        &self.c
    }

    pub fn get_w(&self) -> &Vec<Float> {
        &self.w
    }

    /// The streaming offset of direction `i` as an `(cx, cy)` pair; the y
    /// component is zero for the 1D set.
    pub fn get_offset(&self, i: usize) -> (i32, i32) {
        let c_i = &self.c[i];
        match self.d {
            1 => (c_i[0], 0),
            2 => (c_i[0], c_i[1]),
            _ => panic!("Unsupported dimension: {}", self.d),
        }
    }
}
