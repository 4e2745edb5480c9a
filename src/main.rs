//! CLI entry point for the Shikaku puzzle solver

use clap::Parser;
use shikaku::io::cli::{Cli, FileProcessor};

fn main() -> shikaku::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
