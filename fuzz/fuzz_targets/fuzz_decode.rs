#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any of the six formats, any garbage — must never panic
    let _ = pnmkit::decode(data, enough::Unstoppable);

    // Header probe on the same input — must never panic either
    let _ = pnmkit::ImageInfo::from_bytes(data);
});
