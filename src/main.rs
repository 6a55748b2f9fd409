//! CLI entry point for the lozenge tiling sampler

use clap::Parser;
use lozenge_cftp::io::cli::{Cli, SampleRunner};

fn main() -> lozenge_cftp::Result<()> {
    let cli = Cli::parse();
    let mut runner = SampleRunner::new(cli);
    runner.process()
}
