// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use csv2vhdl::{render, TestbenchOptions, DEFAULT_SIGNAL_TYPE};
use csvwave::{CsvWaveError, LoadOptions, TimeUnit, DEFAULT_TIME_COLUMN};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "csv2vhdl")]
#[command(author = "Kevin Laeufer <laeufer@cornell.edu>")]
#[command(version)]
#[command(about = "Turns a logic analyzer CSV capture into a VHDL testbench that replays it.", long_about = None)]
struct Args {
    #[arg(value_name = "CSVFILE", index = 1)]
    filename: PathBuf,
    #[arg(long, default_value = DEFAULT_TIME_COLUMN, help = "header of the timestamp column")]
    time_column: String,
    #[arg(long, help = "wrap the stimulus in an entity and architecture of this name")]
    entity: Option<String>,
    #[arg(long, default_value = DEFAULT_SIGNAL_TYPE)]
    signal_type: String,
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
    #[arg(long, default_value = "sec", help = "unit of the delay literals: fs, ps, ns, us, ms or sec")]
    time_unit: TimeUnit,
    #[arg(short, long, value_name = "VHDLFILE", help = "write to a file instead of stdout")]
    output: Option<PathBuf>,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Load(#[from] CsvWaveError),
    #[error("failed to write {0:?}")]
    Write(PathBuf, #[source] std::io::Error),
    #[error("failed to write to stdout")]
    Stdout(#[source] std::io::Error),
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("expected a single ASCII character, not `{value}`")),
        },
    }
}

fn run(args: Args) -> Result<(), Error> {
    let load_opts = LoadOptions {
        time_column: args.time_column,
        delimiter: args.delimiter,
    };
    // extraction has to succeed completely before anything gets written
    let waveform = csvwave::simple::read_with_options(&args.filename, &load_opts)?;
    log::info!(
        "{} samples of {} signals, {:.3e} s total",
        waveform.len(),
        waveform.signals().len(),
        waveform.total_duration()
    );

    let tb_opts = TestbenchOptions {
        entity: args.entity,
        signal_type: args.signal_type,
        time_unit: args.time_unit,
        source: args
            .filename
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
    };
    let text = render(&waveform, &tb_opts);

    match args.output {
        Some(path) => {
            std::fs::write(&path, text).map_err(|e| Error::Write(path.clone(), e))?;
            log::info!("wrote testbench to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(Error::Stdout)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut message = e.to_string();
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
