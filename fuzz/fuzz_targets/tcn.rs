#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: TCN generation and check-digit idempotence.
//
// For any agency string and sequence, a generated TCN must be 11
// characters and recomputing the check digit over its 10-char base
// must reproduce the final character.
fuzz_target!(|input: (String, u32)| {
    let (agency, sequence) = input;
    if let Ok(tcn) = an2k_builder::generate_agency_tcn(&agency, sequence) {
        assert_eq!(tcn.chars().count(), 11);
        let base: String = tcn.chars().take(10).collect();
        let digit = an2k_builder::tcn::check_digit(&base).unwrap();
        assert_eq!(tcn.chars().last().unwrap(), digit);
    }
});
