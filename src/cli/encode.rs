use huffpack::container;
use huffpack::timing::time_fn;

use crate::cli::{EncodeArgs, Result, sidecar_path, write_file};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = crate::cli::read_file(input_path)?;

    if args.raw {
        let (res, comp_dur) = time_fn(|| container::encode_payload(&input_data));
        let (header, payload) = res?;
        let sidecar = sidecar_path(output_path)?;
        huffpack::if_tracing! {
            tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), sidecar = %sidecar.display(), elapsed_us = %comp_dur.as_micros(), bit_count = header.bit_count, compressed_len = payload.len(), "raw encode finished");
        }
        huffpack::if_not_tracing! {
            let _ = comp_dur;
        }
        write_file(output_path, &payload)?;
        write_file(&sidecar, serde_json::to_string_pretty(&header)?.as_bytes())?;
        return Ok(());
    }

    let (res, comp_dur) = time_fn(|| container::pack(&input_data));
    let compressed_data = res?;
    huffpack::if_tracing! {
        tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %comp_dur.as_micros(), compressed_len = compressed_data.len(), "encode finished");
    }
    huffpack::if_not_tracing! {
        let _ = comp_dur;
    }
    write_file(output_path, &compressed_data)
}
