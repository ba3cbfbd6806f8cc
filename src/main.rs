// src/main.rs
use page_scrape::cli;

fn main() {
    if let Err(e) = cli::run_from_args() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
