//! Integration tests for stage-2 byte compression.

use scanpack_bytes::{ByteMethod, LzssParams, compress, decompress};
use scanpack_core::error::ScanPackError;

fn corpus() -> Vec<(&'static str, Vec<u8>)> {
    let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
    let noise: Vec<u8> = (0..3000)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect();

    vec![
        ("empty", Vec::new()),
        ("single", vec![42]),
        ("run", vec![0u8; 5000]),
        ("text", b"the quick brown fox jumps over the lazy dog. ".repeat(40)),
        ("noise", noise),
        ("ramp", (0..4096u32).map(|i| (i / 16) as u8).collect()),
    ]
}

#[test]
fn test_supported_methods_roundtrip() {
    for method in ByteMethod::SUPPORTED {
        for (name, data) in corpus() {
            let frame = compress(&data, method, LzssParams::default()).unwrap();
            assert_eq!(decompress(&frame).unwrap(), data, "{method} on {name}");
        }
    }
}

#[test]
fn test_parameter_grid_roundtrip() {
    let corpus = corpus();
    let text = &corpus[3].1;
    for index_bits in [2, 5, 9, 12] {
        for len_bits in [1, 3, 8] {
            let params = LzssParams::new(index_bits, len_bits);
            for method in [ByteMethod::Lzss, ByteMethod::MtfLzss] {
                let frame = compress(text, method, params).unwrap();
                assert_eq!(
                    &decompress(&frame).unwrap(),
                    text,
                    "{method} {index_bits}/{len_bits}"
                );
            }
        }
    }
}

#[test]
fn test_run_of_one_byte_compresses() {
    let data = vec![0xAB; 10_000];
    let frame = compress(&data, ByteMethod::Lzss, LzssParams::new(8, 8)).unwrap();
    assert!(frame.len() < 200);
    assert_eq!(decompress(&frame).unwrap(), data);
}

#[test]
fn test_reserved_methods_rejected_on_encode() {
    for method in [ByteMethod::Lzw, ByteMethod::Lzwv, ByteMethod::Bwt, ByteMethod::BwtMtf] {
        let err = compress(b"abc", method, LzssParams::default()).unwrap_err();
        assert!(
            matches!(err, ScanPackError::UnsupportedAlgorithm { code, .. } if code == method.code()),
            "{method}"
        );
    }
}

#[test]
fn test_invalid_params_rejected_on_encode() {
    let err = compress(b"abc", ByteMethod::Lzss, LzssParams::new(20, 4)).unwrap_err();
    assert!(matches!(err, ScanPackError::InvalidInput { .. }));
}

#[test]
fn test_corrupt_params_rejected_on_decode() {
    let mut frame = compress(b"abcabc", ByteMethod::Lzss, LzssParams::default()).unwrap();
    frame[2] = 30;
    assert!(matches!(
        decompress(&frame),
        Err(ScanPackError::MalformedFrame { .. })
    ));
}

#[test]
fn test_truncated_lzss_payload() {
    let data = b"the quick brown fox jumps over the lazy dog".to_vec();
    let frame = compress(&data, ByteMethod::Lzss, LzssParams::default()).unwrap();
    let err = decompress(&frame[..frame.len() - 10]).unwrap_err();
    assert!(matches!(err, ScanPackError::OutOfData { .. }));
}

#[test]
fn test_wrong_magic() {
    let mut frame = compress(b"abc", ByteMethod::None, LzssParams::default()).unwrap();
    frame[1] = b'C';
    assert!(matches!(
        decompress(&frame),
        Err(ScanPackError::BadMagic { .. })
    ));
}
