use colored::*;
use std::fs;
use std::io;
use std::path::Path;
use std::process;

pub const DATA_PATH: &str = "./data";
pub const POST_PROCESSING_PATH: &str = "./post_processing";
pub const HEIGHT_FILE: &str = "height.csv";
pub const VELOCITY_FILE: &str = "velocity.csv";

pub fn create_case_directories() -> io::Result<()> {
    let list_of_paths = [DATA_PATH, POST_PROCESSING_PATH];
    for path_str in list_of_paths {
        let path = Path::new(path_str);
        if !path.exists() {
            println!("Creating the {} path.\n", path_str.yellow().bold());
            if let Err(e) = fs::create_dir(path) {
                eprintln!("Error while creating the {path_str} path: {e}.");
                process::exit(1);
            };
        } else {
            println!("The {} path already exists.\n", path_str.yellow().bold());
        }
    }
    Ok(())
}

pub fn progress_bar(current: usize, total: usize) {
    let current = current + 1;
    let percentage = current as f64 / total as f64;
    let bar_length = 50;
    let filled_length = (bar_length as f64 * percentage) as usize;
    let completed = "█".repeat(filled_length);
    let remaining = "░".repeat(bar_length - filled_length);
    let bar = completed + &remaining;
    let percentage = percentage * 100.0;
    print!("\r{}", format!("{bar} {percentage:.2}%").green().bold());
    std::io::Write::flush(&mut std::io::stdout()).unwrap();
    if current == total {
        println!();
        println!();
    }
}
