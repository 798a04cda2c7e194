//! CLI entry point for the Z80 disassembly listing tool.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use log::{debug, error};
#[cfg(test)]
use tempfile as _;
use z80_disasm::{disassemble, DisassemblyRow, ListingOptions, RenderConfig, DEFAULT_CAPACITY};

const USAGE_TEXT: &str = "\
Usage: z80-dis <input> [options]

Prints a disassembly listing of a raw Z80 binary image.

Options:
  -o, --origin <addr>   Address of the first byte, hex with 0x prefix or decimal (default: 0)
  -n, --count <rows>    Stop after this many rows
  -c, --capacity <n>    Per-instruction text buffer size in bytes (default: 32)
  -v, --verbose         Enable debug logging (RUST_LOG overrides)
  -h, --help            Show this help message

Examples:
  z80-dis rom.bin
  z80-dis rom.bin --origin 0x8000 --count 16
";

#[derive(Debug, PartialEq, Eq)]
struct ListArgs {
    input: PathBuf,
    origin: u16,
    count: Option<usize>,
    capacity: usize,
    verbose: bool,
}

#[derive(Debug)]
enum ParseResult {
    List(ListArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut input: Option<PathBuf> = None;
    let mut origin = 0u16;
    let mut count = None;
    let mut capacity = DEFAULT_CAPACITY;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--verbose" || arg == "-v" {
            verbose = true;
            continue;
        }

        if arg == "-o" || arg == "--origin" {
            let value = option_value(&mut args, "--origin")?;
            origin = parse_number(&value)
                .and_then(|n| u16::try_from(n).ok())
                .ok_or_else(|| format!("invalid origin: {value}"))?;
            continue;
        }

        if arg == "-n" || arg == "--count" {
            let value = option_value(&mut args, "--count")?;
            count = Some(parse_number(&value).ok_or_else(|| format!("invalid count: {value}"))?);
            continue;
        }

        if arg == "-c" || arg == "--capacity" {
            let value = option_value(&mut args, "--capacity")?;
            capacity = parse_number(&value)
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("invalid capacity: {value}"))?;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| "missing input path".to_string())?;
    Ok(ParseResult::List(ListArgs {
        input,
        origin,
        count,
        capacity,
        verbose,
    }))
}

fn option_value(
    args: &mut impl Iterator<Item = OsString>,
    name: &str,
) -> Result<String, String> {
    args.next()
        .map(|value| value.to_string_lossy().into_owned())
        .ok_or_else(|| format!("missing value for {name}"))
}

fn parse_number(text: &str) -> Option<usize> {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .map_or_else(
            || text.parse().ok(),
            |hex| usize::from_str_radix(hex, 16).ok(),
        )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn format_row(row: &DisassemblyRow) -> String {
    let hex_bytes = row
        .bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{:04x}  {hex_bytes:<12} {}", row.addr, row.text)
}

fn run_list(args: &ListArgs) -> Result<(), i32> {
    let image = fs::read(&args.input).map_err(|e| {
        error!("failed to read {}: {e}", args.input.display());
        1
    })?;
    debug!("read {} bytes from {}", image.len(), args.input.display());

    let options = ListingOptions {
        origin: args.origin,
        max_rows: args.count,
        render: RenderConfig::default().with_capacity(args.capacity),
    };

    let rows = disassemble(&image, &options).map_err(|e| {
        error!("{}: {e}", args.input.display());
        1
    })?;

    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::List(args)) => {
            init_logging(args.verbose);
            match run_list(&args) {
                Ok(()) => 0,
                Err(code) => code,
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
