//! # `cmdrunner`
//!
//! Runs named management commands declared in a YAML runner file.
//!
//! ## Usage
//!
//! ```sh
//! cmdrunner --migrate                 # run one command
//! cmdrunner --migrate --seed 100      # run several, in order
//! cmdrunner --setup                   # run a command group
//! cmdrunner --help                    # list everything
//! ```
//!
//! The runner file defaults to `./cmdrunner.yaml`; set `CMDRUNNER_CONFIG` to
//! use another one. `CMDRUNNER_VERBOSE=1` enables debug logging and
//! `RUST_LOG` overrides the log filter.

use cmdrunner::cli::Settings;
use cmdrunner::error::RunnerError;
use cmdrunner::system::real::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let system = RealSystem::new();
    let settings = Settings::from_system(&system);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level()));

    // Logs go to stderr so stdout only carries usage text and command output
    fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match cmdrunner::run(&args, &settings, &system) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<RunnerError>()
                    .map_or(1, RunnerError::exit_code),
            );
        }
    }
}
