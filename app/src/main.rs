//! # Gleaner
//!
//! Loads a glTF file and prints the geometry assembled for every mesh
//! primitive reachable from a node.

mod args;
mod report;

use std::process::ExitCode;

use clap::Parser;
use gleaner_core::gltf::{load_document, MeshAssembler};

use args::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("Core version: {}", gleaner_core::VERSION);

    let document = match load_document(&args.file) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("error: {}: {e}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let assembly = match MeshAssembler::new(&document)
        .with_options(args.options())
        .assemble()
    {
        Ok(assembly) => assembly,
        Err(failure) => {
            eprintln!("error: {}", report::failure_line(&failure));
            return ExitCode::FAILURE;
        }
    };

    for primitive in &assembly.primitives {
        println!("{}", report::primitive_line(primitive));
        if args.dump {
            print!("{}", report::dump(primitive));
        }
    }
    for failure in &assembly.failures {
        println!("{}", report::failure_line(failure));
    }
    println!("{}", report::totals(&assembly));

    if assembly.all_failed() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
