//! The vgcolour driver.
//!
//! Two sources feed the classifier: a pre-captured log file, or the stderr
//! of a live valgrind subprocess (valgrind writes its diagnostics to stderr;
//! the instrumented program's stdout is passed through untouched). Either
//! way, every line goes through the classifier exactly once and in order,
//! including lines still buffered when the child exits, so no diagnostic is
//! lost on interrupt.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{self, Command, Stdio};

use clap::Parser;

use crate::errors::VgError;
use crate::stream::{Rendered, StreamClassifier, TerminalWidth, WidthSource};
use crate::style::Painter;

pub mod args;

use args::VgArgs;

/// The main entry point for the CLI.
pub fn run() {
    let args = VgArgs::parse();
    let painter = Painter::new(args.colour.coloured());
    let mut classifier = StreamClassifier::new(painter, TerminalWidth);

    let result = match args.input {
        Some(path) => colourise_log(&path, &mut classifier),
        None => run_valgrind(&args.valgrind_args, &mut classifier),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Colourises a pre-captured log file.
fn colourise_log<W: WidthSource>(
    path: &Path,
    classifier: &mut StreamClassifier<W>,
) -> Result<i32, VgError> {
    let file = File::open(path).map_err(|source| VgError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    colourise_lines(BufReader::new(file), classifier)?;
    Ok(0)
}

/// Spawns valgrind with forwarded arguments, colourises its stderr, and
/// propagates its exit status.
fn run_valgrind<W: WidthSource>(
    valgrind_args: &[String],
    classifier: &mut StreamClassifier<W>,
) -> Result<i32, VgError> {
    let mut child = Command::new("valgrind")
        .args(valgrind_args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| VgError::Spawn {
            command: "valgrind".to_string(),
            source,
        })?;

    let stderr = child.stderr.take().expect("stderr was piped at spawn");
    colourise_lines(BufReader::new(stderr), classifier)?;

    let status = child.wait().map_err(|source| VgError::Wait { source })?;
    Ok(status.code().unwrap_or(1))
}

fn colourise_lines<R: BufRead, W: WidthSource>(
    reader: R,
    classifier: &mut StreamClassifier<W>,
) -> Result<(), VgError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in reader.lines() {
        let line = line.map_err(|source| VgError::ReadStream { source })?;
        let _ = print_rendered(&mut out, classifier.classify(&line));
    }
    let _ = out.flush();
    Ok(())
}

fn print_rendered(out: &mut impl Write, rendered: Rendered) -> io::Result<()> {
    if let Some(separator) = rendered.separator {
        writeln!(out, "{}", separator)?;
    }
    writeln!(out, "{}", rendered.line)
}
