//! Contains the main `run()` function of the `typecodec-dump` tool.
//!
//! The tool writes a few values to a file, reads them back and prints the
//! encoded bytes on both sides, which makes the wire format visible from the
//! command line.

use std::{
    fmt::Write as _,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use typecodec::{
    observe::LogObserver, Config, Deserialize, Deserializer, Serialize,
    Serializer,
};

/// The fixed-size array written by the demo.
pub const HELLO: [u8; 7] = *b"Hello!\0";

/// The string written by the demo.
pub const HELLO_STR: &str = "hello";

/// The numbers written by the demo.
pub const NUMBERS: [i32; 5] = [1, 2, 3, 5, 4];

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "typecodec-dump",
    about = "Prints the binary encoding of a few sample values",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// Raises the log level; repeat for more detail (`-vvv` traces every
    /// dispatched value).
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// The action to run.
    #[clap(subcommand)]
    pub command: Command,
}

/// The actions of the program.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Subcommand,
)]
pub enum Command {
    /// Writes the sample values to a file and reads them back.
    Demo {
        /// The file to write the values to.
        #[clap(short, long, default_value = "test.ser")]
        output: PathBuf,
    },

    /// Prints the encoding of a string.
    String {
        /// The string to encode.
        text: String,
    },

    /// Prints the encoding of a 32-bit integer.
    Int {
        /// The integer to encode.
        #[clap(allow_negative_numbers = true)]
        value: i32,
    },
}

/// The values read back by [`demo`], together with the number of bytes the
/// file held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// The size of the written file.
    pub file_len: u64,

    /// The decoded fixed-size array.
    pub hello: [u8; 7],

    /// The decoded string.
    pub text: String,

    /// The decoded numbers.
    pub numbers: Vec<i32>,
}

/// Formats `bytes` as uppercase hexadecimal pairs, prefixed with their count.
///
/// # Examples
///
/// ```rust
/// assert_eq!(
///     typecodec_dump::format_bytes(b"Hi"),
///     "Bytes (size: 2): 48 69 "
/// );
/// ```
#[must_use]
pub fn format_bytes(bytes: &[u8]) -> String {
    let mut output = format!("Bytes (size: {}): ", bytes.len());

    for byte in bytes {
        // writing to a `String` never fails
        let _ = write!(output, "{byte:02X} ");
    }

    output
}

/// Writes the sample values to `path` in order, then reads them back in the
/// same order.
///
/// The string is decoded into a destination that already holds content, which
/// the decoding discards.
///
/// # Errors
///
/// Returns any I/O failure on the file and any decoding error.
pub fn demo(path: &Path) -> typecodec::Result<DemoReport> {
    let file = BufWriter::new(File::create(path)?);
    let mut serializer = Serializer::with_observer(file, LogObserver);

    HELLO.serialize(&mut serializer)?;
    HELLO_STR.serialize(&mut serializer)?;
    NUMBERS.to_vec().serialize(&mut serializer)?;

    serializer.writer_mut().flush()?;
    drop(serializer);

    let file_len = std::fs::metadata(path)?.len();
    log::info!("wrote {file_len} bytes to {}", path.display());

    let file = BufReader::new(File::open(path)?);
    let mut deserializer =
        Deserializer::with_observer(file, Config::default(), LogObserver);

    let hello = <[u8; 7]>::deserialize(&mut deserializer)?;

    let mut text = "1".to_owned();
    text.deserialize_in_place(&mut deserializer)?;

    let mut numbers = Vec::<i32>::new();
    numbers.deserialize_in_place(&mut deserializer)?;

    log::info!(
        "read {} bytes from {}",
        deserializer.consumed(),
        path.display()
    );

    Ok(DemoReport { file_len, hello, text, numbers })
}

fn print_encoding<T: Serialize + ?Sized>(value: &T) -> typecodec::Result<()> {
    println!("{}", format_bytes(&typecodec::to_bytes(value)?));
    Ok(())
}

fn run_command(command: &Command) -> typecodec::Result<()> {
    match command {
        Command::Demo { output } => {
            print_encoding(&HELLO)?;
            print_encoding(HELLO_STR)?;

            let report = demo(output)?;

            print_encoding(&report.hello)?;
            print_encoding(report.text.as_str())?;

            println!("{}", report.text);

            if report.text == HELLO_STR {
                println!("strings equal!!!");
            }

            let numbers = report
                .numbers
                .iter()
                .map(ToString::to_string)
                .collect::<String>();
            println!("Numbers2: {numbers}");

            Ok(())
        }

        Command::String { text } => print_encoding(text.as_str()),

        Command::Int { value } => print_encoding(value),
    }
}

/// Maps the number of `-v` flags to a log filter.
#[must_use]
pub const fn log_filter(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Arguments) -> ExitCode {
    let filter = log_filter(argument.verbose);

    // `RUST_LOG` overrides the verbosity flags
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter.to_string()),
    )
    .try_init();

    match run_command(&argument.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
