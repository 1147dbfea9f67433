use pdf_core::{Color, PdfDocument, Point, Shape};

/// Helper: find a byte pattern in a buffer.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

/// Helper: check that a byte pattern exists in the buffer.
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle).is_some()
}

fn triangle_shape(fill: Color) -> Shape {
    let mut shape = Shape::new();
    shape
        .draw_polyline(&[
            Point::new(5.0, 5.0),
            Point::new(145.0, 5.0),
            Point::new(75.0, 126.0),
        ])
        .finish(fill, true);
    shape
}

#[test]
fn full_workflow_produces_valid_pdf() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_info("Creator", "sierpinski-triangle");
    doc.set_info("Title", "A Test Document");
    doc.begin_page(150.0, 130.0).unwrap();
    doc.commit_shape(triangle_shape(Color::rgb(0.0, 0.0, 1.0)));
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();

    // Header.
    assert!(bytes.starts_with(b"%PDF-1.7\n"));

    // Trailer.
    assert!(bytes.ends_with(b"%%EOF\n"));

    // Core PDF structure.
    assert!(contains_bytes(&bytes, b"/Type /Catalog"));
    assert!(contains_bytes(&bytes, b"/Type /Pages"));
    assert!(contains_bytes(&bytes, b"/Type /Page"));
    assert!(contains_bytes(&bytes, b"/MediaBox [0 0 150.0 130.0]"));

    // Content stream with the filled triangle.
    assert!(contains_bytes(&bytes, b"0 0 1 rg\n5 5 m\n145 5 l\n75 126 l\nh\nf\n"));

    // Info dictionary.
    assert!(contains_bytes(&bytes, b"(sierpinski-triangle)"));
    assert!(contains_bytes(&bytes, b"(A Test Document)"));

    // Xref and trailer structure.
    assert!(contains_bytes(&bytes, b"xref\n"));
    assert!(contains_bytes(&bytes, b"trailer\n"));
    assert!(contains_bytes(&bytes, b"startxref\n"));
    assert!(contains_bytes(&bytes, b"/Root 1 0 R"));
    assert!(contains_bytes(&bytes, b"/Info"));
}

#[test]
fn empty_page_produces_valid_pdf() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();

    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains_bytes(&bytes, b"/Count 1"));
    // Empty content stream should have /Length 0.
    assert!(contains_bytes(&bytes, b"/Length 0"));
}

#[test]
fn multi_page_document() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    for level in [0.25, 0.5, 0.75] {
        doc.begin_page(150.0, 130.0).unwrap();
        doc.commit_shape(triangle_shape(Color::gray(level)));
        doc.end_page().unwrap();
    }
    assert_eq!(doc.page_count(), 3);
    let bytes = doc.end_document().unwrap();

    assert!(contains_bytes(&bytes, b"/Count 3"));
    assert!(contains_bytes(&bytes, b"0.25 0.25 0.25 rg"));
    assert!(contains_bytes(&bytes, b"0.5 0.5 0.5 rg"));
    assert!(contains_bytes(&bytes, b"0.75 0.75 0.75 rg"));
}

#[test]
fn xref_object_count_matches() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_info("Creator", "test");
    doc.begin_page(612.0, 792.0).unwrap();
    doc.commit_shape(triangle_shape(Color::gray(0.0)));
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();

    // Objects: 1=Catalog, 2=Pages, 3=ContentStream, 4=Page, 5=Info
    // Size = max_obj + 1 = 6
    assert!(
        contains_bytes(&bytes, b"/Size 6"),
        "Expected /Size 6 in output: {}",
        String::from_utf8_lossy(&bytes),
    );
    assert!(
        contains_bytes(&bytes, b"xref\n0 6\n"),
        "Expected xref header '0 6' in output: {}",
        String::from_utf8_lossy(&bytes),
    );
}

#[test]
fn xref_offsets_point_at_objects() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_info("Title", "offsets");
    doc.begin_page(150.0, 130.0).unwrap();
    doc.commit_shape(triangle_shape(Color::gray(0.0)));
    let bytes = doc.end_document().unwrap();

    let xref_pos = find_bytes(&bytes, b"xref\n0 6\n").unwrap();
    let entries = &bytes[xref_pos + b"xref\n0 6\n".len()..];
    for obj_num in 1..6usize {
        let entry = &entries[obj_num * 20..obj_num * 20 + 10];
        let offset: usize = std::str::from_utf8(entry).unwrap().parse().unwrap();
        let expected = format!("{} 0 obj\n", obj_num);
        assert!(
            bytes[offset..].starts_with(expected.as_bytes()),
            "xref entry for object {} should point at its header",
            obj_num,
        );
    }
}

#[test]
fn save_to_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triangle.pdf");

    let mut doc = PdfDocument::create(&path).unwrap();
    doc.set_compression(true);
    doc.set_info("Title", "A Test Document");
    doc.begin_page(150.0, 130.0).unwrap();
    doc.commit_shape(triangle_shape(Color::rgb(0.0, 0.0, 1.0)));
    doc.end_page().unwrap();
    doc.end_document().unwrap();

    // end_document flushes the buffered file writer.
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains_bytes(&bytes, b"/Filter /FlateDecode"));
}
