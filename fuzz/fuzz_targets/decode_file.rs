#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full file decoder entry point.
//
// Calls `an2k_codec::decode(data)` on arbitrary input bytes.
// Catches bugs in:
// - Type-1 tag scanning and LEN handling
// - Charset discovery and payload decoding
// - Content directory parsing
// - Per-framing record dispatch and cursor advancement
// - Truncated DATA clamping
fuzz_target!(|data: &[u8]| {
    let _ = an2k_codec::decode(data);
});
