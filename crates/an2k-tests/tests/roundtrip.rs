//! Roundtrip integration tests for the read → write → read pipeline.
//!
//! The byte-identity invariant holds because the writer walks the
//! record map in type-tag order with ascending field ids, recomputing
//! LEN the same way on every pass — so a tree decoded from a
//! well-formed file serializes back to the exact input bytes, and a
//! second decode yields a structurally equal tree.

use an2k_codec::{An2kReader, An2kWriter, decode};
use an2k_tests::fixtures;
use an2k_types::catalog::{tagged_image, transaction};
use an2k_types::record_type::RecordType;

#[test]
fn built_file_roundtrips_byte_identical() {
    let file = fixtures::sample_transaction();
    let bytes = An2kWriter::to_bytes(&file).unwrap();

    let reread = decode(&bytes).unwrap();
    let rewritten = An2kWriter::to_bytes(&reread).unwrap();

    assert_eq!(rewritten, bytes);
    assert_eq!(reread, file);
}

#[test]
fn image_payload_survives_untouched() {
    let payload = fixtures::jpeg(1024, 959, 3, 300);
    let file = fixtures::sample_transaction();
    let bytes = An2kWriter::to_bytes(&file).unwrap();
    let reread = decode(&bytes).unwrap();

    let facial = reread.record_of(RecordType::FacialSmtImage, 1).unwrap();
    assert_eq!(facial.image(999).unwrap(), Some(payload));
}

#[test]
fn every_len_field_matches_serialized_size() {
    let file = fixtures::sample_transaction();
    let bytes = An2kWriter::to_bytes(&file).unwrap();

    // Sum of declared LENs must cover the file exactly.
    let total: u64 = file.iter().map(|r| r.declared_len().unwrap()).sum();
    assert_eq!(total, bytes.len() as u64);
}

#[test]
fn utf8_domain_roundtrips_cjk_text() {
    // A Type-14 fingerprint file whose Type-2 descriptive record
    // carries Chinese text, under the UTF-8 domain.
    let transaction = an2k_builder::TransactionBuilder::new()
        .with_version("0300")
        .with_transaction_type("CRM")
        .with_originating_agency("ORI042")
        .build()
        .unwrap();
    let descriptive = an2k_builder::DescriptiveTextBuilder::new()
        .with_idc("01")
        .with_field(14, "華裔")
        .build()
        .unwrap();
    let finger = an2k_builder::TaggedImageBuilder::new(RecordType::VariableResolutionFinger)
        .with_idc("1")
        .with_image_data(fixtures::wsq(545, 622, 500))
        .calculate_fields(true)
        .build()
        .unwrap();
    let file = an2k_builder::FileBuilder::new()
        .transaction(transaction)
        .record(descriptive)
        .record(finger)
        .build()
        .unwrap();

    let bytes = An2kWriter::to_bytes(&file).unwrap();
    let reread = decode(&bytes).unwrap();
    let rewritten = An2kWriter::to_bytes(&reread).unwrap();
    assert_eq!(rewritten, bytes);
    assert_eq!(reread, file);

    let record = reread.record_of(RecordType::DescriptiveText, 1).unwrap();
    assert_eq!(record.text(14).unwrap(), Some("華裔".to_owned()));

    // The raw bytes really are UTF-8 on the wire.
    let needle = "華裔".as_bytes();
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn utf16_domain_roundtrips_accented_text() {
    // "0200" selects the UTF-16 charset for everything after Type-1.
    let transaction = an2k_builder::TransactionBuilder::new()
        .with_version("0200")
        .with_transaction_type("CRM")
        .build()
        .unwrap();
    let descriptive = an2k_builder::DescriptiveTextBuilder::new()
        .with_idc("01")
        .with_field(7, "Zoë Muñoz")
        .build()
        .unwrap();
    let file = an2k_builder::FileBuilder::new()
        .transaction(transaction)
        .record(descriptive)
        .build()
        .unwrap();

    let bytes = An2kWriter::to_bytes(&file).unwrap();
    let reread = decode(&bytes).unwrap();
    assert_eq!(reread, file);
    assert_eq!(An2kWriter::to_bytes(&reread).unwrap(), bytes);

    let record = reread.record_of(RecordType::DescriptiveText, 1).unwrap();
    assert_eq!(record.text(7).unwrap(), Some("Zoë Muñoz".to_owned()));

    // Text payloads really are two bytes per character on the wire:
    // 'Z' appears as the big-endian unit 0x005A.
    assert!(bytes.windows(2).any(|w| w == [0x00, 0x5A]));
}

#[test]
fn charset_discovery_reads_domain_field() {
    let file = fixtures::sample_transaction();
    let bytes = An2kWriter::to_bytes(&file).unwrap();
    let reread = decode(&bytes).unwrap();
    assert_eq!(
        reread
            .transaction_information()
            .text(transaction::VERSION)
            .unwrap(),
        Some("0300".to_owned())
    );
}

#[test]
fn reader_conveniences_cover_raw_buffer() {
    let file = fixtures::sample_transaction();
    let bytes = An2kWriter::to_bytes(&file).unwrap();

    let reader = An2kReader::from_bytes(bytes.clone());
    assert_eq!(reader.decode().unwrap(), file);

    // SHA-256 and base64 are over the raw ingested bytes.
    assert_eq!(reader.sha256_hex(), an2k_wire::digest::sha256_hex(&bytes));
    assert_eq!(reader.to_base64().len() % 4, 0);
    assert!(!reader.to_base64().is_empty());
}

#[test]
fn derived_image_fields_present_after_reread() {
    let file = fixtures::sample_transaction();
    let bytes = An2kWriter::to_bytes(&file).unwrap();
    let reread = decode(&bytes).unwrap();

    let facial = reread.record_of(RecordType::FacialSmtImage, 1).unwrap();
    assert_eq!(
        facial.text(tagged_image::CGA).unwrap(),
        Some("JPEGB".to_owned())
    );
    assert_eq!(
        facial.text(tagged_image::CSP).unwrap(),
        Some("RGB".to_owned())
    );
    assert_eq!(facial.int(tagged_image::HLL).unwrap(), Some(1024));
    assert_eq!(facial.int(tagged_image::VLL).unwrap(), Some(959));
}
