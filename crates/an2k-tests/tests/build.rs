//! Build-from-scratch integration tests: a transaction assembled from
//! individual builders must come out with a correct directory, correct
//! lengths, and prober-derived image metadata.

use an2k_builder::{
    BuildError, DescriptiveTextBuilder, FileBuilder, RecordBuilder, TaggedImageBuilder,
    TransactionBuilder, generate_agency_tcn,
};
use an2k_codec::{An2kWriter, decode};
use an2k_tests::fixtures;
use an2k_types::TypeError;
use an2k_types::catalog::{tagged_image, transaction};
use an2k_types::record_type::RecordType;

fn built_file() -> an2k_types::An2kFile {
    let tcn = generate_agency_tcn("INTERPOOL", 1000).unwrap();
    let t1 = TransactionBuilder::new()
        .with_version("0300")
        .with_transaction_type("CRM")
        .with_control_number(tcn)
        .with_originating_agency("ORI042")
        .build()
        .unwrap();
    let t2 = DescriptiveTextBuilder::new().with_idc("01").build().unwrap();
    let t10 = TaggedImageBuilder::new(RecordType::FacialSmtImage)
        .with_idc("1")
        .with_image_data(fixtures::jpeg(640, 480, 3, 300))
        .calculate_fields(true)
        .build()
        .unwrap();

    FileBuilder::new()
        .transaction(t1)
        .record(t2)
        .record(t10)
        .build()
        .unwrap()
}

#[test]
fn type10_gets_probed_compression_and_colorspace() {
    let file = built_file();
    let facial = file.record_of(RecordType::FacialSmtImage, 1).unwrap();
    assert_eq!(
        facial.text(tagged_image::CGA).unwrap(),
        Some("JPEGB".to_owned())
    );
    assert_eq!(
        facial.text(tagged_image::CSP).unwrap(),
        Some("RGB".to_owned())
    );
}

#[test]
fn directory_lists_every_record_in_order() {
    let file = built_file();
    let directory = file
        .transaction_information()
        .text(transaction::FILE_CONTENT)
        .unwrap()
        .unwrap();
    assert_eq!(directory, "1\u{1F}2\u{1E}2\u{1F}1\u{1E}10\u{1F}1");
}

#[test]
fn every_record_len_matches_its_serialization() {
    let file = built_file();
    let bytes = An2kWriter::to_bytes(&file).unwrap();
    let total: u64 = file.iter().map(|r| r.declared_len().unwrap()).sum();
    assert_eq!(total, bytes.len() as u64);

    // And the reread tree keeps the same numbers.
    let reread = decode(&bytes).unwrap();
    for (built, parsed) in file.iter().zip(reread.iter()) {
        assert_eq!(built.declared_len(), parsed.declared_len());
    }
}

#[test]
fn control_number_carries_its_check_digit() {
    let file = built_file();
    let tcn = file
        .transaction_information()
        .text(transaction::CONTROL_NUMBER)
        .unwrap()
        .unwrap();
    assert_eq!(tcn, "INTE001000A");
}

#[test]
fn field_type_safety_on_accessors() {
    let file = built_file();
    let facial = file.record_of(RecordType::FacialSmtImage, 1).unwrap();

    // get_text on the image field and get_image on a text field both
    // refuse with FieldTypeMismatch.
    assert!(matches!(
        facial.text(999),
        Err(TypeError::FieldTypeMismatch { field_id: 999, .. })
    ));
    assert!(matches!(
        facial.image(tagged_image::CGA),
        Err(TypeError::FieldTypeMismatch { .. })
    ));
}

#[test]
fn image_egress_is_deep_copied() {
    let file = built_file();
    let facial = file.record_of(RecordType::FacialSmtImage, 1).unwrap();

    let mut copy = facial.image(999).unwrap().unwrap();
    copy[0] = 0x00;
    copy[1] = 0x00;

    let fresh = facial.image(999).unwrap().unwrap();
    assert_eq!(&fresh[..2], &[0xFF, 0xD8]);
}

#[test]
fn builder_rejects_fields_outside_catalog() {
    let result = RecordBuilder::new(RecordType::TransactionInformation)
        .text(500, "out of range")
        .build();
    assert!(matches!(
        result,
        Err(BuildError::FieldOutsideCatalog {
            tag: 1,
            field_id: 500
        })
    ));
}

#[test]
fn file_builder_requires_type1() {
    let t2 = DescriptiveTextBuilder::new().with_idc("01").build().unwrap();
    assert!(matches!(
        FileBuilder::new().record(t2).build(),
        Err(BuildError::MissingTransactionRecord)
    ));
}

#[test]
fn seeding_a_builder_leaves_the_original_intact() {
    let file = built_file();
    let original = file.record_of(RecordType::DescriptiveText, 1).unwrap();

    let edited = DescriptiveTextBuilder::from_record(original)
        .with_field(6, "amended")
        .build()
        .unwrap();

    assert_eq!(edited.text(6).unwrap(), Some("amended".to_owned()));
    assert_eq!(original.text(6).unwrap(), None);
}
