//! # hpreserve
//!
//! Reserves a block of 2 MiB huge pages and holds it until the process is
//! interrupted (Ctrl-C), then releases the mapping and exits.
//!
//! ```sh
//! echo 16 | sudo tee /proc/sys/vm/nr_hugepages
//! cargo run --release --bin=hpreserve -- 4
//! ```
//!
//! Status lines are written to stderr through `log`; use `RUST_LOG=debug` to
//! also see the huge page pool counters.
//!
//! ## Exit codes
//!
//! - `0`: the reservation was released after an interrupt
//! - `1`: the mapping was rejected or the interrupt could not be awaited
//! - `3`: wrong number of arguments

#[macro_use]
extern crate log;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use hpreserve_core::{HugeTlbMapper, PageCount, SignalWaiter, hold};

/// Exit code for a wrong number of arguments.
pub const EXIT_USAGE: u8 = 3;
/// Exit code when the reservation could not be made or held.
pub const EXIT_FAILURE: u8 = 1;

/// Raw command line. Every argument is a value, there are no flags.
#[derive(Debug, Parser)]
#[command(
    name = "hpreserve",
    about = "Hold huge pages until interrupted",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct RawArgs {
    /// Number of 2 MiB huge pages to reserve. Non-numeric input counts as 0.
    #[arg(
        value_parser = clap::value_parser!(OsString),
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    page_count: Vec<OsString>,
}

/// CLI arguments for the `hpreserve` binary.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// The single page count argument, as passed by the OS.
    pub page_count: OsString,
}

impl CliArgs {
    /// The requested page count, parsed leniently.
    pub fn pages(&self) -> PageCount {
        PageCount::parse_lenient(self.page_count.as_encoded_bytes())
    }
}

/// Parses the process arguments, including the binary name.
///
/// Exactly one argument is accepted, whatever its content. Any other count
/// prints the usage error and maps to [`EXIT_USAGE`].
pub fn parse_args<I, T>(args: I) -> Result<CliArgs, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let bin = args.next().unwrap_or_else(|| OsString::from("hpreserve"));
    // The leading escape turns a user supplied `--` into a value.
    let argv = [bin, OsString::from("--")].into_iter().chain(args);
    let raw = match RawArgs::try_parse_from(argv) {
        Ok(raw) => raw,
        Err(e) => {
            error!("{}", e);
            return Err(ExitCode::from(EXIT_FAILURE));
        }
    };
    match <[OsString; 1]>::try_from(raw.page_count) {
        Ok([page_count]) => Ok(CliArgs { page_count }),
        Err(args) => {
            println!("Invalid number of arguments");
            debug!("Expected 1 argument, got {}", args.len());
            Err(ExitCode::from(EXIT_USAGE))
        }
    }
}

/// Installs `env_logger` on stderr with an `info` default filter.
///
/// `RUST_LOG` overrides the filter.
pub fn init_logging() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()?;
    Ok(())
}

/// Holds the requested huge pages until `SIGINT` arrives.
///
/// `SIGINT` is blocked before anything else happens, so this must run before
/// any other thread is spawned.
pub fn run(args: &CliArgs) -> anyhow::Result<()> {
    let mut interrupt = SignalWaiter::interrupt()?;
    let report = hold(HugeTlbMapper::default(), args.pages(), &mut interrupt)?;
    debug!("{:?}", report);
    Ok(())
}
