use crate::prelude::*;
use rayon::prelude::*;

pub type PostComputation = fn(&MacroscopicState) -> Vec<PostResult>;

pub struct PostResult {
    pub name: String,
    pub value: Float,
}

impl PostResult {
    pub fn new(name: String, value: Float) -> Self {
        Self { name, value }
    }
}

#[derive(Debug)]
pub struct PostFunction {
    pub file_name: String,
    pub interval: usize,
    pub function: PostComputation,
}

impl PostFunction {
    pub fn new(file_name: String, interval: usize, function: PostComputation) -> Self {
        Self {
            file_name,
            interval,
            function,
        }
    }
}

pub fn compute_mean_height(state: &MacroscopicState) -> Vec<PostResult> {
    let height_sum = state.height.as_slice().par_iter().sum::<Float>();
    let mean = height_sum / state.number_of_sites() as Float;
    vec![PostResult::new("mean_height".to_string(), mean)]
}

pub fn compute_total_mass(state: &MacroscopicState) -> Vec<PostResult> {
    let mass = state.height.as_slice().par_iter().sum::<Float>();
    vec![PostResult::new("total_mass".to_string(), mass)]
}

pub fn compute_kinetic_energy(state: &MacroscopicState) -> Vec<PostResult> {
    let energy = state.energy.as_slice().par_iter().sum::<Float>();
    vec![PostResult::new("kinetic_energy".to_string(), energy)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_mean_height_of_uniform_film() {
        let constants = InputConstants::test_default(2);
        let state = functions::uniform_film(&constants);

        let results = compute_mean_height(&state);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "mean_height");
        assert!((results[0].value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_total_mass_scales_with_sites() {
        let constants = InputConstants::test_default(2);
        let state = functions::uniform_film(&constants);

        let results = compute_total_mass(&state);

        assert!((results[0].value - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_kinetic_energy_of_resting_film_is_zero() {
        let constants = InputConstants::test_default(1);
        let state = functions::uniform_film(&constants);

        let results = compute_kinetic_energy(&state);

        assert_eq!(results[0].value, 0.0);
    }
}
