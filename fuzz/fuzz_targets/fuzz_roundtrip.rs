#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce
    // an identical image (samples, dimensions, encoding, max value).
    let Ok(decoded) = pnmkit::decode(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = match decoded.encode(enough::Unstoppable) {
        Ok(bytes) => bytes,
        Err(_) => panic!("decoded image failed to encode"),
    };
    let Ok(decoded2) = pnmkit::decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip image mismatch");
});
