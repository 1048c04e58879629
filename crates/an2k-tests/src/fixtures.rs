//! Synthetic fixtures shared by the integration tests and benches.
//!
//! The image builders emit minimal but structurally honest byte
//! streams: real signatures, real header segments, junk pixel data.
//! The prober only reads headers, so these are indistinguishable from
//! scanner output as far as the codec is concerned.

use an2k_builder::{FileBuilder, TaggedImageBuilder, TransactionBuilder, generate_agency_tcn};
use an2k_types::file::An2kFile;
use an2k_types::record_type::RecordType;

/// A baseline JFIF JPEG: `width`×`height`, `components` color
/// channels, `dpi` pixel density in both axes.
pub fn jpeg(width: u16, height: u16, components: u8, dpi: u16) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    // APP0: "JFIF\0", version 1.1, unit 1 (dots per inch).
    out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[0x01, 0x01, 0x01]);
    out.extend_from_slice(&dpi.to_be_bytes());
    out.extend_from_slice(&dpi.to_be_bytes());
    out.extend_from_slice(&[0x00, 0x00]);
    // SOF0: precision 8, geometry, component specs.
    let sof_len = 8 + 3 * u16::from(components);
    out.extend_from_slice(&[0xFF, 0xC0]);
    out.extend_from_slice(&sof_len.to_be_bytes());
    out.push(8);
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.push(components);
    for c in 0..components {
        out.extend_from_slice(&[c + 1, 0x11, 0x00]);
    }
    // SOS + a little entropy data + EOI.
    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    out.extend_from_slice(&[0x5A; 32]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// A PNG with an IHDR, an optional pHYs density (pixels per meter) and
/// an empty IDAT.
pub fn png(width: u32, height: u32, bit_depth: u8, color_type: u8, ppm: Option<u32>) -> Vec<u8> {
    let mut out = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    out.extend_from_slice(&13u32.to_be_bytes());
    out.extend_from_slice(b"IHDR");
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
    out.extend_from_slice(&[0; 4]);
    if let Some(ppm) = ppm {
        out.extend_from_slice(&9u32.to_be_bytes());
        out.extend_from_slice(b"pHYs");
        out.extend_from_slice(&ppm.to_be_bytes());
        out.extend_from_slice(&ppm.to_be_bytes());
        out.push(1);
        out.extend_from_slice(&[0; 4]);
    }
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(b"IDAT");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(b"IEND");
    out.extend_from_slice(&[0; 4]);
    out
}

/// A WSQ stream with a NISTCOM `PPI` comment and a frame header.
pub fn wsq(width: u16, height: u16, ppi: u32) -> Vec<u8> {
    let mut out = vec![0xFF, 0xA0];
    let comment = format!("NIST_COM 2\nPPI {ppi}\nLOSSY 1");
    out.extend_from_slice(&[0xFF, 0xA8]);
    out.extend_from_slice(&((comment.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(comment.as_bytes());
    out.extend_from_slice(&[0xFF, 0xA2]);
    out.extend_from_slice(&17u16.to_be_bytes());
    out.extend_from_slice(&[0x00, 0xFF]);
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&[0; 9]);
    out.extend_from_slice(&[0xFF, 0xA3]);
    out.extend_from_slice(&[0x77; 24]);
    out.extend_from_slice(&[0xFF, 0xA1]);
    out
}

/// A JPEG 2000 file: signature, ftyp, and a jp2h/ihdr header pair.
pub fn jp2(width: u32, height: u32, components: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&[
        0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
    ]);
    out.extend_from_slice(&20u32.to_be_bytes());
    out.extend_from_slice(b"ftyp");
    out.extend_from_slice(b"jp2 ");
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&30u32.to_be_bytes());
    out.extend_from_slice(b"jp2h");
    out.extend_from_slice(&22u32.to_be_bytes());
    out.extend_from_slice(b"ihdr");
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&components.to_be_bytes());
    out.extend_from_slice(&[7, 7, 0, 0]);
    out
}

/// A canonical small transaction: Type-1 under the UTF-8 domain, one
/// Type-2 descriptive record and one Type-10 facial image.
pub fn sample_transaction() -> An2kFile {
    let transaction = TransactionBuilder::new()
        .with_version("0300")
        .with_transaction_type("CRM")
        .with_date("20260801")
        .with_originating_agency("ORI042")
        .with_destination_agency("DAI007")
        .with_control_number(generate_agency_tcn("INTERPOOL", 1000).expect("valid tcn"))
        .build()
        .expect("valid transaction record");

    let descriptive = an2k_builder::DescriptiveTextBuilder::new()
        .with_idc("01")
        .with_field(5, "CRM")
        .with_field(9, "case 2041")
        .build()
        .expect("valid descriptive record");

    let facial = TaggedImageBuilder::new(RecordType::FacialSmtImage)
        .with_idc("1")
        .with_source_agency("ORI042")
        .with_image_data(jpeg(1024, 959, 3, 300))
        .calculate_fields(true)
        .build()
        .expect("valid facial record");

    FileBuilder::new()
        .transaction(transaction)
        .record(descriptive)
        .record(facial)
        .build()
        .expect("valid transaction file")
}
