use lbfilm::film::{self, Parameters, PostFunction};
use lbfilm::prelude::*;

fn main() {
    film::load(build_parameters);
}

fn build_parameters(constants: InputConstants) -> Parameters {
    let initial_state = functions::perturbed_film(&constants);
    let mut parameters = Parameters::new(constants, initial_state);
    parameters.post_functions = Some(vec![
        PostFunction::new(
            "mean_height.csv".to_string(),
            5,
            film::post::compute_mean_height,
        ),
        PostFunction::new(
            "kinetic_energy.csv".to_string(),
            5,
            film::post::compute_kinetic_energy,
        ),
    ]);
    parameters
}
