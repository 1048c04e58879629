#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: decode → encode stability.
//
// Any input that decodes must re-serialize without panicking. The
// first re-serialization canonicalizes LEN spellings, so stability is
// asserted on the second generation: decoding canonical bytes and
// writing again must be byte-identical.
fuzz_target!(|data: &[u8]| {
    if let Ok(file) = an2k_codec::decode(data) {
        if let Ok(bytes) = an2k_codec::An2kWriter::to_bytes(&file) {
            if let Ok(again) = an2k_codec::decode(&bytes) {
                if let Ok(stable) = an2k_codec::An2kWriter::to_bytes(&again) {
                    assert_eq!(stable, bytes);
                }
            }
        }
    }
});
