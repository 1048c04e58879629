//! Image prober integration tests over the synthetic fixtures.
//!
//! Shapes mirror the scanner outputs the codec sees in practice: an
//! RGB mugshot JPEG, an RGB PNG with density, an 8-bit grayscale WSQ
//! fingerprint, and a JPEG 2000 capture.

use an2k_image::{Colorspace, CompressionAlgorithm, ProbeError, probe};
use an2k_tests::fixtures;

#[test]
fn jpeg_mugshot() {
    let info = probe(&fixtures::jpeg(1024, 959, 3, 300)).unwrap();
    assert_eq!(info.compression, CompressionAlgorithm::Jpegb);
    assert_eq!((info.width, info.height), (1024, 959));
    assert_eq!((info.ppi_x, info.ppi_y), (300, 300));
    assert_eq!(info.colorspace, Colorspace::Rgb);
    assert_eq!(info.depth, 24);
}

#[test]
fn png_with_72dpi_density() {
    // 2835 pixels per meter is the 72 dpi the file was scanned at.
    let info = probe(&fixtures::png(804, 752, 8, 2, Some(2835))).unwrap();
    assert_eq!(info.compression, CompressionAlgorithm::Png);
    assert_eq!((info.width, info.height), (804, 752));
    assert_eq!((info.ppi_x, info.ppi_y), (72, 72));
    assert_eq!(info.colorspace, Colorspace::Rgb);
    assert_eq!(info.depth, 24);
}

#[test]
fn wsq_fingerprint() {
    let info = probe(&fixtures::wsq(545, 622, 24)).unwrap();
    assert_eq!(info.compression, CompressionAlgorithm::Wsq20);
    assert_eq!((info.width, info.height), (545, 622));
    assert_eq!((info.ppi_x, info.ppi_y), (24, 24));
    assert_eq!(info.colorspace, Colorspace::Gray);
    assert_eq!(info.depth, 8);
}

#[test]
fn jp2_capture() {
    let info = probe(&fixtures::jp2(640, 480, 3)).unwrap();
    assert_eq!(info.compression, CompressionAlgorithm::Jp2);
    assert_eq!((info.width, info.height), (640, 480));
    assert_eq!(info.colorspace, Colorspace::Rgb);
    assert_eq!(info.depth, 24);
}

#[test]
fn grayscale_jpeg_single_component() {
    let info = probe(&fixtures::jpeg(500, 500, 1, 500)).unwrap();
    assert_eq!(info.colorspace, Colorspace::Gray);
    assert_eq!(info.depth, 8);
}

#[test]
fn unknown_payload_rejected() {
    assert!(matches!(
        probe(b"BM\x00\x00bitmap data"),
        Err(ProbeError::UnsupportedImage)
    ));
}

#[test]
fn label_and_code_pairs() {
    let pairs = [
        (CompressionAlgorithm::Wsq20, "WSQ20", 1),
        (CompressionAlgorithm::Jpegb, "JPEGB", 2),
        (CompressionAlgorithm::Jp2, "JP2", 4),
        (CompressionAlgorithm::Png, "PNG", 6),
    ];
    for (algorithm, label, code) in pairs {
        assert_eq!(algorithm.label(), label);
        assert_eq!(algorithm.code(), code);
    }
}
