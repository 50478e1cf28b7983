//! cli component of the huffpack project.
//!
//! lines starting with `> ` denote commands that should be valid under the current implementation.
//! `$exename` stands for the executable name, which is `huffpack` in linux or `huffpack.exe` on windows.
//! `<description>` denotes a required argument, while `[description]` denotes an optional argument.
//!
//! # Compression
//!
//! > `$exename enc <input file> <output file> [--raw]`
//!
//! by default the output is a self-describing container: a header holding the symbol counts and
//! the exact bit count, followed by the packed payload. with `--raw` only the packed payload is
//! written, and the header goes to a `{output stem}.code.json` file next to it.
//!
//! # Decompression
//!
//! > `$exename dec <input file> <output file> [--sidecar <path to code.json>]`
//!
//! without `--sidecar` the input must be a container. with it, the input is a raw payload and the
//! header is read from the given json file.
//!
//! # Testing
//!
//! > `$exename test <input file>`
//!
//! compresses the file, immediately decompresses the output and compares it with the original.
//! sizes, ratio and timings are printed to stderr. if a discrepancy is found the process exits
//! with an error.
//!
//! # Inspection
//!
//! > `$exename inspect <input file> [--pretty]`
//!
//! prints the frequency table, code table and the resulting sizes as json.
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use huffpack::HuffmanError;

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod test;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    #[error("Compressor error: {0:#}")]
    Compressor(anyhow::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("roundtrip of {} did not reproduce the original bytes", .0.display())]
    RoundtripMismatch(PathBuf),

    #[error("Invalid output path: {}", .0.display())]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print the frequency and code tables of a file as JSON
    Inspect(InspectArgs),
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    pub output: PathBuf,

    /// Write only the packed payload, with the header in a `.code.json` sidecar
    #[arg(long)]
    pub raw: bool,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    pub output: PathBuf,

    /// Header sidecar written by `encode --raw`; the input is then a raw payload
    #[arg(long)]
    pub sidecar: Option<PathBuf>,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the original file
    pub input: PathBuf,
}

/// Arguments specific to the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the file to analyze
    pub input: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `out/data.bin` -> `out/data.code.json`
pub fn sidecar_path(output: &Path) -> Result<PathBuf> {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::InvalidPath(output.to_path_buf()))?;
    Ok(output.with_file_name(format!("{}.code.json", stem)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_and_flags() {
        let cli = Cli::try_parse_from(["huffpack", "enc", "in.txt", "out.huf", "--raw"]).unwrap();
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(args.input, PathBuf::from("in.txt"));
        assert_eq!(args.output, PathBuf::from("out.huf"));
        assert!(args.raw);

        let cli = Cli::try_parse_from(["huffpack", "dec", "a", "b", "--sidecar", "a.code.json"]).unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.sidecar, Some(PathBuf::from("a.code.json")));
    }

    #[test]
    fn encode_requires_output() {
        assert!(Cli::try_parse_from(["huffpack", "encode", "in.txt"]).is_err());
    }

    #[test]
    fn sidecar_sits_next_to_output() {
        assert_eq!(
            sidecar_path(Path::new("out/data.bin")).unwrap(),
            PathBuf::from("out/data.code.json")
        );
        assert!(sidecar_path(Path::new("..")).is_err());
    }
}
