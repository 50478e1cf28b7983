use huffpack::container::{self, Header};
use huffpack::timing::time_fn;

use crate::cli::{DecodeArgs, Result, read_file, write_file};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let compressed_data = read_file(input_path)?;
    let header = match &args.sidecar {
        Some(path) => Some(serde_json::from_slice::<Header>(&read_file(path)?)?),
        None => None,
    };

    let (res, decomp_dur) = time_fn(|| match &header {
        Some(header) => container::decode_payload(header, &compressed_data),
        None => container::unpack(&compressed_data),
    });

    huffpack::if_tracing! {{
        match &res {
            Ok(data) => tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %decomp_dur.as_micros(), decompressed_len = data.len(), "decode finished"),
            Err(err) => tracing::error!(event = "decode_failed", input = %input_path.display(), error = %err, "decode failed"),
        }
    }}
    huffpack::if_not_tracing! {
        let _ = decomp_dur;
    }

    write_file(output_path, &res?)
}
