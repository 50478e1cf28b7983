use serde::Serialize;

use huffpack::{CodeTable, FrequencyTable, HuffmanTree, container};

use crate::cli::{InspectArgs, Result, read_file};

/// What `inspect` prints for one file.
#[derive(Serialize, Debug)]
pub struct InspectReport {
    pub original_len: u64,
    pub distinct_symbols: usize,
    pub max_code_len: usize,
    pub bit_count: u64,
    pub payload_len: u64,
    pub container_len: usize,
    pub frequencies: FrequencyTable,
    pub codes: CodeTable,
}

impl InspectReport {
    pub fn new(data: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::from_bytes(data);
        let container_len = container::pack(data)?.len();

        let (codes, max_code_len) = if frequencies.is_empty() {
            (CodeTable::new(), 0)
        } else {
            let tree = HuffmanTree::from_frequencies(&frequencies)?;
            (tree.code_table(), tree.depth())
        };
        let bit_count = codes.encoded_bits(&frequencies)?;

        Ok(Self {
            original_len: frequencies.total(),
            distinct_symbols: frequencies.distinct(),
            max_code_len,
            bit_count,
            payload_len: bit_count.div_ceil(8),
            container_len,
            frequencies,
            codes,
        })
    }
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let data = read_file(&args.input)?;
    let report = InspectReport::new(&data)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
