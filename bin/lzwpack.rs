#![forbid(unsafe_code)]
use std::path::PathBuf;
use std::{env, ffi, fs, io};

use lzwpack::{Codec, Stats, Trailing};
use tracing_subscriber::EnvFilter;

fn main() -> CodingResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    CodingResult::catch_panic(|| {
        let flags = Flags::from_args(env::args_os());
        run_coding(flags)
    })
}

fn run_coding(flags: Flags) -> Result<(), io::Error> {
    let codec = Codec::with_dict_size(flags.dict_size)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?
        .trailing(flags.trailing);
    tracing::debug!(?codec, input = ?flags.input, operation = ?flags.operation, "starting");

    let out = io::stdout();
    let out = io::BufWriter::new(out.lock());

    let stats = match (flags.input, flags.operation) {
        (Input::File(file), Operation::Encode) => {
            codec.compress_reader(fs::File::open(file)?, out)?
        }
        (Input::Stdin, Operation::Encode) => codec.compress_reader(io::stdin().lock(), out)?,
        (Input::File(file), Operation::Decode) => {
            codec.decompress_reader(fs::File::open(file)?, out)?
        }
        (Input::Stdin, Operation::Decode) => codec.decompress_reader(io::stdin().lock(), out)?,
    };

    if flags.stats {
        report(&stats);
    }

    Ok(())
}

fn report(stats: &Stats) {
    eprintln!("original size:   {} bytes", stats.original);
    eprintln!("compressed size: {} bytes", stats.compressed);
    match stats.ratio() {
        Some(ratio) => eprintln!("ratio:           {:.3}", ratio),
        None => eprintln!("ratio:           n/a"),
    }
}

#[derive(Debug)]
struct Flags {
    input: Input,
    operation: Operation,
    dict_size: u32,
    trailing: Trailing,
    stats: bool,
}

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Stdin,
}

#[derive(Debug)]
enum Operation {
    Encode,
    Decode,
}

impl Default for Flags {
    fn default() -> Flags {
        Flags {
            input: Input::Stdin,
            operation: Operation::Encode,
            dict_size: lzwpack::DEFAULT_DICT_SIZE,
            trailing: Trailing::Discard,
            stats: false,
        }
    }
}

fn command() -> clap::Command {
    clap::Command::new("lzwpack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress and decompress with a fixed-capacity LZW dictionary")
        .arg(
            clap::Arg::new("decode")
                .short('d')
                .long("decode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("encode")
                .short('e')
                .long("encode")
                .action(clap::ArgAction::SetTrue),
        )
        .group(
            clap::ArgGroup::new("operation")
                .args(["decode", "encode"])
                .multiple(false)
                .required(true),
        )
        .arg(
            clap::Arg::new("dict_size")
                .short('n')
                .long("dict-size")
                .help("Dictionary capacity, both ends must agree on it")
                .value_parser(clap::value_parser!(u32).range(257..=65536)),
        )
        .arg(
            clap::Arg::new("trailing")
                .short('t')
                .long("trailing")
                .help("Drop or pad the final partial byte of the packed codes")
                .default_value("discard")
                .value_parser(["discard", "pad"]),
        )
        .arg(
            clap::Arg::new("stats")
                .long("stats")
                .help("Print sizes and compression ratio to stderr")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("file")
                .default_value("-")
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
}

impl Flags {
    fn from_args(args: impl Iterator<Item = ffi::OsString>) -> Self {
        let mut flags = Flags::default();
        let matches = command().get_matches_from(args);

        if matches.get_flag("decode") {
            flags.operation = Operation::Decode;
        } else if matches.get_flag("encode") {
            flags.operation = Operation::Encode;
        }

        if let Some(&n) = matches.get_one::<u32>("dict_size") {
            flags.dict_size = n;
        }

        match matches.get_one::<String>("trailing").map(String::as_str) {
            Some("discard") => flags.trailing = Trailing::Discard,
            Some("pad") => flags.trailing = Trailing::Pad,
            Some(_) => unreachable!("unparsed trailing mode"),
            None => {}
        }

        flags.stats = matches.get_flag("stats");

        match matches.get_one::<PathBuf>("file") {
            None => flags.input = Input::Stdin,
            Some(p) if *p == PathBuf::from("-") => flags.input = Input::Stdin,
            Some(p) => flags.input = Input::File(p.clone()),
        }

        flags
    }
}

enum CodingResult {
    Ok,
    Err(io::Error),
    Panic,
}

impl CodingResult {
    fn catch_panic(op: fn() -> Result<(), io::Error>) -> Self {
        std::panic::catch_unwind(|| match op() {
            Ok(()) => CodingResult::Ok,
            Err(err) => CodingResult::Err(err),
        })
        .unwrap_or(CodingResult::Panic)
    }
}

impl std::process::Termination for CodingResult {
    fn report(self) -> std::process::ExitCode {
        match self {
            CodingResult::Ok => std::process::ExitCode::SUCCESS,
            CodingResult::Err(err) => {
                tracing::error!(%err, "coding failed");
                eprintln!("{}", err);
                std::process::ExitCode::FAILURE
            }
            CodingResult::Panic => {
                eprintln!(
                    "The process failed irrecoverably! This should never happen and is a bug."
                );
                std::process::ExitCode::from(128)
            }
        }
    }
}
