use crate::prelude::*;
use clap::{Arg, Command};
use core_affinity::{get_core_ids, set_for_current};
use std::num::{NonZero, NonZeroUsize};
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub number_of_threads: NonZeroUsize,
    pub core_affinity: bool,
    pub input: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            number_of_threads: NonZero::new(1).unwrap(),
            core_affinity: false,
            input: PathBuf::from("input.toml"),
        }
    }
}

impl Config {
    pub fn get_number_of_threads(&self) -> usize {
        usize::from(self.number_of_threads)
    }
}

pub fn get_args() -> FilmResult<clap::ArgMatches> {
    let matches = clap::command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1)")
                .value_parser(clap::value_parser!(NonZeroUsize))
                .default_value("1")
                .global(true),
        )
        .arg(
            Arg::new("core_affinity")
                .long("affinity")
                .help("Set the core affinity")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run").about("Run the simulation").arg(
                Arg::new("input")
                    .short('i')
                    .long("input")
                    .value_name("FILE")
                    .help("The runtime constants input file")
                    .value_parser(clap::value_parser!(PathBuf))
                    .default_value("input.toml"),
            ),
        )
        .get_matches();
    Ok(matches)
}

pub fn parse_matches(matches: &clap::ArgMatches) -> FilmResult<Config> {
    let number_of_threads = *matches
        .get_one::<NonZeroUsize>("number_of_threads")
        .expect("Has 1 as default");
    let core_affinity = matches.get_flag("core_affinity");
    match matches.subcommand() {
        Some(("run", sub_m)) => {
            let input = sub_m
                .get_one::<PathBuf>("input")
                .expect("Has input.toml as default")
                .clone();
            Ok(Config {
                number_of_threads,
                core_affinity,
                input,
            })
        }
        _ => unreachable!("At least one subcommand is required: .subcommand_required(true)"),
    }
}

pub fn init_global_pool(num_threads: usize, pin_all_cores: bool) {
    if pin_all_cores {
        let cores = get_core_ids().expect("list the system cores");
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .start_handler(move |idx| {
                if pin_all_cores {
                    let core = cores[idx % cores.len()];
                    let _ = set_for_current(core);
                }
            })
            .build_global()
            .expect("global pool already created?");
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .expect("global pool already created?");
    };
}
