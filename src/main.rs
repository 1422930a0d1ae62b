use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use mind2mm::{ConvertOptions, Converter};

#[derive(Parser)]
#[command(name = "mind2mm")]
#[command(about = "Convert mind maps between dotMind (.mind) archives and FreeMind (.mm) XML")]
struct Cli {
    /// Source file
    #[arg(long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Destination file (refused if it already exists)
    #[arg(long = "out", value_name = "PATH")]
    output: PathBuf,

    /// Direction: true converts .mind to .mm, false the reverse
    /// (override with --j2m=false)
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    j2m: bool,

    /// Enable debug diagnostics
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "mind2mm=debug" } else { "mind2mm=info" };
    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    // Input must exist; output must not (do not clobber). Both are
    // reported as plain messages, matching the tool's CLI contract.
    if !cli.input.exists() {
        println!("The input file '{}' does not exist", cli.input.display());
        return ExitCode::SUCCESS;
    }
    if cli.output.exists() {
        println!(
            "Output file '{}' already exists - will not overwrite",
            cli.output.display()
        );
        return ExitCode::SUCCESS;
    }

    let converter = Converter::new(ConvertOptions { debug: cli.debug });

    let result = if cli.j2m {
        println!("Converting from json to xml");
        converter.dotmind_to_freemind(&cli.input, &cli.output)
    } else {
        println!("Converting from xml to json");
        converter.freemind_to_dotmind(&cli.input, &cli.output)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
