//! Symna - symbolic MNA netlist reader
//!
//! Reads a SPICE-like netlist, flattens its subcircuits and reports whether
//! the read succeeded. The exit code is 0 only for a valid netlist.
//!
//! # Usage
//!
//! ```bash
//! symna amplifier.sp --dialect spectre --list --matrix
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use symna_core::{error::Result, Dialect, Netlist, ReadOptions};

/// Symbolic MNA netlist reader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Dialect at the start of the file
    #[arg(short, long, default_value_t = Dialect::Spice)]
    dialect: Dialect,

    /// Echo comment and command lines while reading
    #[arg(short, long)]
    echo: bool,

    /// Print the flattened components
    #[arg(short, long)]
    list: bool,

    /// Print the non-zero entries of the symbolic matrix
    #[arg(short, long)]
    matrix: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let options = ReadOptions::new()
        .with_dialect(args.dialect)
        .with_echo(args.echo);

    let mut netlist = Netlist::new();
    let result = netlist.read_file(&args.netlist_file, &options);
    for line in netlist.echoed() {
        println!("{}", line);
    }
    if let Err(e) = result {
        eprintln!("{}", e);
    }
    for diagnostic in netlist.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }

    if !netlist.is_valid() {
        println!("parse failed");
        return ExitCode::FAILURE;
    }
    println!("parse succeeded");

    if let Err(e) = report(&netlist, &args) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn report(netlist: &Netlist, args: &Args) -> Result<()> {
    if args.list {
        println!(
            "{} components, {} nodes, {} unknowns",
            netlist.components().len(),
            netlist.node_count(),
            netlist.full_size()
        );
        print!("{}", netlist);
    }

    if args.matrix {
        let system = netlist.assemble()?;
        for (i, name) in system.unknowns().iter().enumerate() {
            if let Some(unknown) = system.classify(i + 1) {
                println!("{} = {}", unknown, name);
            }
        }
        print!("{}", system.matrix());
    }

    Ok(())
}
