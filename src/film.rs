// ------------------------------------------------------------------------------- MODULES

mod io;
mod lattice;
pub mod post;

// ------------------------------------------------------------------------------- IMPORTS

use crate::cli;
use crate::kernel;
use crate::parameters;
use crate::prelude::*;
use crate::pressure::{
    ContactAngle, DEFAULT_EXPONENTS, DEFAULT_PRECURSOR_THICKNESS,
};
pub use io::CsvSink;
pub use lattice::Lattice;
pub use post::{PostFunction, PostResult};

// ---------------------------------------------------------------------- TRAIT: DumpSink

/// Receiver for macroscopic snapshots. The stepper only ever hands over a
/// fully consistent, finite state, at multiples of the configured dump
/// interval (including time step 0).
pub trait DumpSink {
    fn dump(&mut self, state: &MacroscopicState, time_step: usize) -> FilmResult<()>;
}

// -------------------------------------------------------------------- STRUCT: Parameters

pub struct Parameters {
    pub constants: InputConstants,
    pub initial_state: MacroscopicState,
    pub precursor_thickness: Float,
    pub exponents: (i32, i32),
    pub contact_angle: ContactAngle,
    pub tau: Float,
    pub post_functions: Option<Vec<PostFunction>>,
}

impl Parameters {
    /// Parameters with the default wetting and relaxation model.
    pub fn new(constants: InputConstants, initial_state: MacroscopicState) -> Self {
        Parameters {
            constants,
            initial_state,
            precursor_thickness: DEFAULT_PRECURSOR_THICKNESS,
            exponents: DEFAULT_EXPONENTS,
            contact_angle: ContactAngle::default(),
            tau: kernel::DEFAULT_TAU,
            post_functions: None,
        }
    }

    pub fn test_default(dim: usize) -> Self {
        let constants = InputConstants::test_default(dim);
        let initial_state = functions::uniform_film(&constants);
        Parameters::new(constants, initial_state)
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// Runs the collision-stream loop to completion: dumps at every multiple of
/// the dump interval, ticks until `max_runtime`, and aborts on the first
/// non-finite field.
pub fn run<S>(params: Parameters, sink: &mut S) -> FilmResult<()>
where
    S: DumpSink,
{
    let max_runtime = params.constants.max_runtime;
    let dump_interval = params.constants.dump_interval;
    let mut lattice = Lattice::new(params)?;
    loop {
        let time_step = lattice.get_time_step();
        if time_step % dump_interval == 0 {
            sink.dump(lattice.get_state(), time_step)?;
        }
        lattice.compute_post_processing()?;
        if time_step == max_runtime {
            break;
        }
        lattice.tick()?;
        crate::io::progress_bar(time_step, max_runtime);
    }
    Ok(())
}

/// Binary entry point: parses the command line, reads the runtime constants,
/// builds the case from `parameters_from`, and runs with the CSV sink.
pub fn load(parameters_from: fn(InputConstants) -> Parameters) {
    let config = match cli::get_args().and_then(|matches| cli::parse_matches(&matches)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    cli::init_global_pool(config.get_number_of_threads(), config.core_affinity);

    let constants = parameters::read_input_file(&config.input).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    crate::io::create_case_directories().unwrap_or_else(|e| {
        eprintln!("Error while creating the case directories: {e}");
        std::process::exit(1);
    });

    let params = parameters_from(constants);
    let mut sink = CsvSink::new();
    run(params, &mut sink).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
}
