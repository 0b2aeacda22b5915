// ------------------------------------------------------------------------------- IMPORTS

use super::{DumpSink, Lattice};
use crate::prelude::*;
use colored::*;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

// ----------------------------------------------------------------------- STRUCT: CsvSink

/// Writes each dumped snapshot as `height.csv` and `velocity.csv` under a
/// per-step directory of the data path.
pub struct CsvSink {
    data_path: PathBuf,
}

impl CsvSink {
    pub fn new() -> Self {
        CsvSink {
            data_path: PathBuf::from(crate::io::DATA_PATH),
        }
    }

    pub fn with_data_path<P>(data_path: P) -> Self
    where
        P: AsRef<Path>,
    {
        CsvSink {
            data_path: data_path.as_ref().to_path_buf(),
        }
    }

    fn write_height(state: &MacroscopicState, step_path: &Path) -> FilmResult<()> {
        let path = step_path.join(crate::io::HEIGHT_FILE);
        let mut file = File::create(path)?;
        writeln!(file, "height")?;
        for h in state.height.iter() {
            writeln!(file, "{h:.8e}")?;
        }
        Ok(())
    }

    fn write_velocity(state: &MacroscopicState, step_path: &Path) -> FilmResult<()> {
        let path = step_path.join(crate::io::VELOCITY_FILE);
        let mut file = File::create(path)?;
        match &state.velocity {
            Velocity::Scalar(u) => {
                writeln!(file, "velocity")?;
                for u_x in u.iter() {
                    writeln!(file, "{u_x:.8e}")?;
                }
            }
            Velocity::Vector(u) => {
                writeln!(file, "velocity_x,velocity_y")?;
                for (u_x, u_y) in u.x.iter().zip(u.y.iter()) {
                    writeln!(file, "{u_x:.8e},{u_y:.8e}")?;
                }
            }
        }
        Ok(())
    }
}

impl Default for CsvSink {
    fn default() -> Self {
        CsvSink::new()
    }
}

impl DumpSink for CsvSink {
    fn dump(&mut self, state: &MacroscopicState, time_step: usize) -> FilmResult<()> {
        let step_path = self.data_path.join(time_step.to_string());
        fs::create_dir_all(&step_path)?;
        println!(
            "\nWriting {} and {} for time step {}.\n",
            crate::io::HEIGHT_FILE.yellow().bold(),
            crate::io::VELOCITY_FILE.yellow().bold(),
            time_step.to_string().yellow().bold()
        );
        CsvSink::write_height(state, &step_path)?;
        CsvSink::write_velocity(state, &step_path)?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

impl Lattice {
    pub fn compute_post_processing(&self) -> FilmResult<()> {
        if let Some(post_functions) = self.get_post_functions() {
            for post_function in post_functions {
                self.write_post_processing(post_function)?;
            }
        }
        Ok(())
    }

    fn write_post_processing(&self, post_function: &super::PostFunction) -> FilmResult<()> {
        if self.get_time_step() % post_function.interval == 0 {
            let post_results = (post_function.function)(self.get_state());
            let post_processing_path = Path::new(crate::io::POST_PROCESSING_PATH);
            let path = post_processing_path.join(&post_function.file_name);
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            if self.get_time_step() == 0 {
                write!(file, "time_step")?;
                for post_result in &post_results {
                    write!(file, ",{}", post_result.name)?;
                }
                writeln!(file)?;
            }
            write!(file, "{}", self.get_time_step())?;
            for post_result in &post_results {
                write!(file, ",{:.8e}", post_result.value)?;
            }
            writeln!(file)?;
        }
        Ok(())
    }
}
