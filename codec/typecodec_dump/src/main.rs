//! The entry point of the `typecodec-dump` demonstration tool.

use std::process::ExitCode;

use clap::Parser;
use typecodec_dump::Arguments;

fn main() -> ExitCode { typecodec_dump::run(Arguments::parse()) }
