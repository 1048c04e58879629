#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: image-header prober.
//
// Calls `an2k_image::probe(data)` on arbitrary bytes. Catches panics
// in the JPEG/PNG/JP2/WSQ marker, chunk and box walks — offset
// arithmetic, segment lengths, truncated headers.
fuzz_target!(|data: &[u8]| {
    let _ = an2k_image::probe(data);
});
