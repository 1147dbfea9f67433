use pdf_core::{colors, Color, PdfDocument, Point, Shape};

fn main() {
    let path = "shapes_output.pdf";
    let mut doc = PdfDocument::create(path).unwrap();
    doc.set_compression(true);
    doc.set_info("Creator", "pdf-core");
    doc.set_info("Title", "Shape Demo");
    doc.set_info("CreationDate", &pdf_core::date::pdf_now());
    doc.begin_page(612.0, 792.0).unwrap();

    let mut shape = Shape::new();

    // Light gray backdrop
    shape
        .draw_polyline(&[
            Point::new(72.0, 72.0),
            Point::new(540.0, 72.0),
            Point::new(540.0, 720.0),
            Point::new(72.0, 720.0),
        ])
        .finish(Color::gray(0.9), true);

    // A row of named-color triangles
    let names = ["tomato", "gold", "seagreen", "steelblue", "orchid"];
    for (i, name) in names.iter().enumerate() {
        let x = 100.0 + i as f64 * 90.0;
        let fill = colors::lookup(name).unwrap();
        shape
            .draw_polyline(&[
                Point::new(x, 400.0),
                Point::new(x + 80.0, 400.0),
                Point::new(x + 40.0, 469.3),
            ])
            .finish(fill, true);
    }

    // Open zigzag, filled without closing
    let zigzag: Vec<Point> = (0..8)
        .map(|i| Point::new(100.0 + i as f64 * 55.0, if i % 2 == 0 { 200.0 } else { 260.0 }))
        .collect();
    shape.draw_polyline(&zigzag).finish(Color::rgb(0.0, 0.0, 1.0), false);

    doc.commit_shape(shape);
    doc.end_page().unwrap();
    doc.end_document().unwrap();
    println!("Generated: {}", path);
}
