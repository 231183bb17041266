/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Inspect themes and build the theme_data.js file for the themes site.
 */

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use theme_data_builder::builder::SiteBuilder;
use theme_data_builder::emit;

#[derive(Parser, Debug)]
#[command(name = "theme-data-builder")]
#[command(about = "Inspect themes and build the data file for the themes site")]
#[command(version)]
struct Args {
    /// Directory containing the v<N> theme trees
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Destination data file
    #[arg(long, value_name = "FILE", default_value = "output/theme_data.js")]
    output: PathBuf,

    /// Print each theme as it is processed
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "ERROR:".red());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    println!("Building theme_data.js");
    let builder = SiteBuilder::new(&args.root);
    let data = builder.build(args.verbose)?;
    emit::write_data_file(&args.output, &data)?;

    Ok(())
}
