//! Entry point for the `waypoint` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = waypoint_cli::run() {
        eprintln!("waypoint: {err}");
        std::process::exit(1);
    }
}
