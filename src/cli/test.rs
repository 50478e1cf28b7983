use std::time::Duration;

use huffpack::timing::time_fn;
use huffpack::{Compressor, CompressorExt, HuffmanCoding};

use crate::cli::{CliError, Result, TestArgs, read_file};

pub fn test(args: TestArgs) -> Result<()> {
    let path = &args.input;
    let input = read_file(path)?;
    let mut compressor = HuffmanCoding;

    let (compressed, comp_dur) = time_fn(|| compressor.compress_bytes(&input));
    let compressed = compressed.map_err(CliError::Compressor)?;
    if !compressor.format_validity_check(&compressed).map_err(CliError::Compressor)? {
        return Err(CliError::Compressor(anyhow::anyhow!(
            "{} produced output it does not recognize",
            compressor.debug_name()
        )));
    }
    let (decompressed, decomp_dur) = time_fn(|| compressor.decompress_bytes(&compressed));
    let decompressed = decompressed.map_err(CliError::Compressor)?;

    let passed = input == decompressed;
    print_results(passed, &compressor.compressor_name(), &args, &input, &compressed, &decompressed, comp_dur, decomp_dur);

    if passed { Ok(()) } else { Err(CliError::RoundtripMismatch(path.clone())) }
}

#[allow(clippy::too_many_arguments)]
fn print_results(
    passed: bool,
    name: &str,
    args: &TestArgs,
    expected: &[u8],
    intermediate: &[u8],
    got: &[u8],
    compression_time: Duration,
    decompression_time: Duration,
) {
    let original_size = expected.len();
    let compressed_size = intermediate.len();
    let decompressed_size = got.len();

    let ratio = if original_size == 0 {
        1.0
    } else {
        compressed_size as f64 / original_size as f64
    };

    let bytes_saved = original_size as isize - compressed_size as isize;
    let percent_saved = if original_size == 0 {
        0.0
    } else {
        (bytes_saved as f64) / (original_size as f64) * 100.0
    };

    let passed_string = if passed { "PASSED" } else { "FAILED" };
    eprintln!(
        "======== {} {} ({}) ========\n\t{:.0?} encode\n\t{:.0?} decode\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%)",
        passed_string,
        args.input.display(),
        name,
        compression_time,
        decompression_time,
        original_size,
        compressed_size,
        decompressed_size,
        ratio * 100.0,
        bytes_saved,
        percent_saved,
    );
}
