//! Shape drawing demo.
//!
//! Takes `KEY PARAMS` pairs and draws each shape. A key registered with a
//! parameter string receives `PARAMS`; otherwise the no-argument constructor
//! is used and `PARAMS` is ignored.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use fabrik_registry::store;
use tracing::{debug, info};

mod shapes;

use shapes::Shape;

/// Shape demo command line arguments.
#[derive(Parser, Debug)]
#[command(name = "fabrik-shapes")]
#[command(about = "Draws shapes looked up by name in the factory registry")]
struct Args {
	/// Shape key and parameter pairs; a trailing unpaired key is ignored
	#[arg(value_name = "KEY PARAMS")]
	pairs: Vec<String>,

	/// List registered shapes with their registration sites
	#[arg(short, long)]
	list: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	shapes::install_aliases()?;

	let stdout = io::stdout();
	let stderr = io::stderr();
	if args.list {
		list(&mut stdout.lock())?;
		return Ok(ExitCode::SUCCESS);
	}

	if draw_all(&args.pairs, &mut stdout.lock(), &mut stderr.lock())? {
		Ok(ExitCode::SUCCESS)
	} else {
		Ok(ExitCode::from(255))
	}
}

/// Draws every `KEY PARAMS` pair; stops at the first unknown key.
///
/// Returns `false` if a key was not registered in either signature.
fn draw_all(pairs: &[String], out: &mut impl Write, err: &mut impl Write) -> io::Result<bool> {
	let sized = store::<dyn Shape, (String,)>();
	let plain = store::<dyn Shape, ()>();

	for pair in pairs.chunks_exact(2) {
		let (key, params) = (&pair[0], &pair[1]);
		let shape = if sized.can_create(key) {
			sized.create(key, (params.clone(),))
		} else {
			plain.create(key, ())
		};

		let Some(shape) = shape else {
			info!(key = %key, "unknown shape");
			writeln!(err, "No '{key}' shape registered. Registered are")?;
			for k in plain.keys() {
				writeln!(err, "  {k}")?;
			}
			for k in sized.keys() {
				writeln!(err, "  {k}(string)")?;
			}
			return Ok(false);
		};

		debug!(key = %key, params = %params, "drawing");
		writeln!(out, "{}", shape.draw())?;
	}

	Ok(true)
}

fn list(out: &mut impl Write) -> io::Result<()> {
	for line in store::<dyn Shape, ()>().keys_with_locations() {
		writeln!(out, "{line}")?;
	}
	for line in store::<dyn Shape, (String,)>().keys_with_locations() {
		writeln!(out, "{line} (string)")?;
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("fabrik_registry=debug,fabrik_shapes=debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
