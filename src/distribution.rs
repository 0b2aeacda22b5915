// --------------------------------------------------------------- STRUCT: DistributionSet

use crate::prelude::*;
use crate::velocity_set;

/// One population field per lattice direction (3 for D1Q3, 9 for D2Q9), every
/// field sharing the lattice extents. The zeroth moment of the set is the
/// film height, the first moment the (unforced) film momentum.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSet {
    f: Vec<ScalarField>,
}

impl DistributionSet {
    pub(crate) fn new(f: Vec<ScalarField>) -> Self {
        DistributionSet { f }
    }

    pub fn zeros(q: usize, lx: usize, ly: usize) -> Self {
        DistributionSet {
            f: (0..q).map(|_| ScalarField::zeros(lx, ly)).collect(),
        }
    }

    pub fn get_q(&self) -> usize {
        self.f.len()
    }

    pub fn get_f(&self, i: usize) -> &ScalarField {
        &self.f[i]
    }

    pub fn extents(&self) -> (usize, usize) {
        self.f[0].extents()
    }

    /// Zeroth moment `Σ_i f_i`, the film height.
    pub fn zeroth_moment(&self) -> ScalarField {
        let (lx, ly) = self.extents();
        let mut data = vec![0.0; lx * ly];
        self.f.iter().for_each(|f_i| {
            data.iter_mut()
                .zip(f_i.iter())
                .for_each(|(sum, value)| *sum += value);
        });
        ScalarField::from_vec(data, lx, ly).expect("same extents as the populations")
    }

    /// Raw first moment `Σ_i c_i·f_i` along component `x` of the velocity
    /// set (0 for x, 1 for y).
    pub fn first_moment(
        &self,
        vel_set_params: &velocity_set::Parameters,
        component: usize,
    ) -> ScalarField {
        let (lx, ly) = self.extents();
        let c = vel_set_params.get_c();
        let mut data = vec![0.0; lx * ly];
        self.f.iter().enumerate().for_each(|(i, f_i)| {
            let c_ix = c[i][component] as Float;
            if c_ix != 0.0 {
                data.iter_mut()
                    .zip(f_i.iter())
                    .for_each(|(sum, value)| *sum += c_ix * value);
            }
        });
        ScalarField::from_vec(data, lx, ly).expect("same extents as the populations")
    }

    /// Streams every population along its lattice direction with periodic
    /// wraparound: a pure index shift per direction.
    pub fn stream(&self, vel_set_params: &velocity_set::Parameters) -> DistributionSet {
        let f = self
            .f
            .iter()
            .enumerate()
            .map(|(i, f_i)| {
                let (cx, cy) = vel_set_params.get_offset(i);
                f_i.shifted(cx, cy)
            })
            .collect::<Vec<ScalarField>>();
        DistributionSet { f }
    }
}
