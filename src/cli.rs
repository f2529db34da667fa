use clap::Parser;

use crate::utils::version;

/// The game takes no arguments; clap still provides `--help`/`--version` and
/// rejects anything unexpected.
#[derive(Parser, Debug)]
#[command(version = version(), about)]
pub struct Cli {}
