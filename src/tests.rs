use voxell_rng::rng::XorShift128;

use crate::algorithms::huffman::HuffmanCoding;
use crate::bits::{compress, decompress};
use crate::compressor::Compressor;
use crate::container;
use crate::error::HuffmanError;
use crate::tree::build_code;

const SHORT_DATA: &[u8] = b"Hello, World!";
const LONG_DATA: &[u8] =
    b"This is a longer string to test the huffman coding algorithm. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &[u8] = b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_SYMBOL_DATA: &[u8] = &[0x41, 0x41, 0x41];
const ONE_BYTE_DATA: &[u8] = &[0x00];
const EMPTY_DATA: &[u8] = &[];

const LOREM_WORDS: &[&str] = &[
    "Lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do", "eiusmod", "tempor",
    "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "Ut", "enim", "ad", "minim", "veniam", "quis",
    "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "Duis",
    "aute", "irure", "in", "reprehenderit", "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla",
    "pariatur", "Excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// Deterministic stream of pseudo-random `u64`s.
fn rng_stream(seed: u64) -> impl Iterator<Item = u64> {
    let mut rng = XorShift128::new(seed);
    core::iter::from_fn(move || {
        let data = rng.peek_next_u64();
        rng = XorShift128::new(data);
        Some(data)
    })
}

pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    rng_stream(seed).take(len).map(|data| (data & 0xFF) as u8).collect()
}

/// Space-separated lorem ipsum words, cut to exactly `len` bytes.
pub fn lorem_ipsum(seed: u64, len: usize) -> Vec<u8> {
    let mut text = Vec::with_capacity(len + 16);
    let mut words = rng_stream(seed);
    while text.len() < len {
        let pick = words.next().unwrap_or(0) % LOREM_WORDS.len() as u64;
        text.extend_from_slice(LOREM_WORDS[pick as usize].as_bytes());
        text.push(b' ');
    }
    text.truncate(len);
    text
}

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    let rng_data = random_bytes(0xdeadcafe, 1000);
    let lorem_data = lorem_ipsum(0x5eed, 4096);
    let test_cases: &[(&[u8], &str)] = &[
        (REPEATING_DATA, "repeating data"),
        (SHORT_DATA, "short data"),
        (LONG_DATA, "long data"),
        (SINGLE_SYMBOL_DATA, "single symbol data"),
        (ONE_BYTE_DATA, "one byte data"),
        (&rng_data[..], "rng data"),
        (&lorem_data[..], "lorem data"),
        (EMPTY_DATA, "empty data"),
    ];

    for &(test_case, test_name) in test_cases {
        match compressor.test_roundtrip(test_case) {
            Ok(eq) => {
                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    compressor.compressor_name(),
                    eq.ratio() * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    compressor.compressor_name(),
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {}",
                    test_name,
                    compressor.compressor_name(),
                    e
                );
            }
        }
    }
}

#[test]
fn huffman_coding_roundtrips() {
    roundtrip_test(HuffmanCoding);
}

#[test]
fn core_operations_roundtrip() {
    let lorem = lorem_ipsum(7, 2000);
    let random = random_bytes(42, 2000);
    for data in [SHORT_DATA, LONG_DATA, REPEATING_DATA, SINGLE_SYMBOL_DATA, ONE_BYTE_DATA, &lorem[..], &random[..]] {
        let (tree, codes) = build_code(data).unwrap();
        assert!(codes.is_prefix_free());
        assert_eq!(tree.weight(), data.len() as u64);

        let stream = compress(data, &codes).unwrap();
        assert_eq!(decompress(stream.bytes(), stream.bit_count(), &tree).unwrap(), data);
    }
}

#[test]
fn every_prefix_of_a_text_roundtrips() {
    // exercises every padding width and the boundary where the last code ends a byte exactly
    let text = lorem_ipsum(99, 64);
    for end in 1..=text.len() {
        let data = &text[..end];
        let (tree, codes) = build_code(data).unwrap();
        let stream = compress(data, &codes).unwrap();
        assert_eq!(decompress(stream.bytes(), stream.bit_count(), &tree).unwrap(), data);
    }
}

#[test]
fn core_rejects_empty_input() {
    assert_eq!(build_code(EMPTY_DATA), Err(HuffmanError::EmptyInput));
}

#[test]
fn repetitive_input_compresses_to_an_eighth() {
    let data = vec![b'z'; 10_000];
    let (_, codes) = build_code(&data).unwrap();
    let stream = compress(&data, &codes).unwrap();
    assert_eq!(stream.bytes().len(), 1250);

    let artifact = container::pack(&data).unwrap();
    assert!(artifact.len() <= 1250 + 16, "artifact is {} bytes", artifact.len());
    assert!(artifact.len() <= data.len());
}

#[test]
fn uniform_input_does_not_shrink() {
    let data: Vec<u8> = (0..=255u8).cycle().take(8192).collect();
    let (_, codes) = build_code(&data).unwrap();
    assert!(codes.iter().all(|(_, code)| code.len() == 8));

    let artifact = container::pack(&data).unwrap();
    assert!(artifact.len() >= data.len());
    assert_eq!(container::unpack(&artifact).unwrap(), data);
}

#[test]
fn random_input_roundtrips_without_shrinking_much() {
    let data = random_bytes(0xfeed_f00d, 8192);
    let artifact = container::pack(&data).unwrap();
    assert_eq!(container::unpack(&artifact).unwrap(), data);
    assert!(
        artifact.len() * 10 >= data.len() * 9,
        "random data shrank to {} of {} bytes",
        artifact.len(),
        data.len()
    );
}

#[test]
fn text_compresses() {
    let data = lorem_ipsum(1, 16_384);
    let artifact = container::pack(&data).unwrap();
    assert!(artifact.len() < data.len() * 3 / 4, "lorem ipsum packed to {} bytes", artifact.len());
}

#[test]
fn sample_generators_are_deterministic() {
    assert_eq!(random_bytes(3, 256), random_bytes(3, 256));
    assert_eq!(lorem_ipsum(3, 300), lorem_ipsum(3, 300));
    assert_eq!(lorem_ipsum(3, 300).len(), 300);
}
