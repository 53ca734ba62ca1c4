use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use muffin::codegen::DEFAULT_YIELD_THRESHOLD;
use muffin::{HeadlessTarget, InteractiveTarget, compile};

/// Muffin recipe compiler: translates a recipe program to JavaScript
#[derive(Parser)]
#[command(name = "muffinc", version)]
struct Args {
    /// Recipe source file, or `-` for stdin
    input: PathBuf,

    /// Write the generated program here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Host environment the generated program runs in
    #[arg(long, value_enum, default_value_t = TargetKind::Headless)]
    target: TargetKind,

    /// Steps a recipe call runs between pauses (interactive target)
    #[arg(long, default_value_t = DEFAULT_YIELD_THRESHOLD)]
    yield_threshold: u32,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetKind {
    /// Stand-alone Node.js script
    Headless,
    /// Async function driven by a host object
    Interactive,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    let (name, source) = read_source(&args.input)?;
    info!(input = %name, backend = ?args.target, "compiling");

    let compiled = match args.target {
        TargetKind::Headless => compile(&source, &HeadlessTarget),
        TargetKind::Interactive => {
            compile(&source, &InteractiveTarget::new(args.yield_threshold))
        }
    };

    let code = match compiled {
        Ok(code) => code,
        Err(error) => {
            match error.location() {
                Some(location) => eprintln!("{name}:{location}: {}", error.message()),
                None => eprintln!("{name}: {}", error.message()),
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    match &args.output {
        Some(path) => fs::write(path, &code)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{code}"),
    }
    debug!(bytes = code.len(), "wrote program");
    Ok(ExitCode::SUCCESS)
}

fn read_source(input: &Path) -> Result<(String, String)> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(("<stdin>".to_string(), source));
    }

    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok((input.display().to_string(), source))
}
