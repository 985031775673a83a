#![cfg(feature = "raster")]

use wdplot::raster::RasterOptions;
use wdplot::{PlotOptions, plot_text};

fn png_size(bytes: &[u8]) -> (u32, u32) {
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (w, h)
}

#[test]
fn png_matches_canvas_times_scale() {
    let mut options = PlotOptions::with_weights(true);
    options.svg.width = 320.0;
    options.svg.height = 200.0;
    let plot = plot_text("3\n2\n0 1 4.5\n1 2 2.0\n", &options).expect("plot ok");

    let png = plot.to_png(&RasterOptions::default()).expect("png");
    assert_eq!(png_size(&png), (320, 200));

    let png = plot
        .to_png(&RasterOptions {
            scale: 2.0,
            ..RasterOptions::default()
        })
        .expect("png");
    assert_eq!(png_size(&png), (640, 400));
}

#[test]
fn jpeg_and_pdf_encode() {
    let plot = plot_text("1\n1\n0 0 1.0\n", &PlotOptions::with_weights(true)).expect("plot ok");
    let jpg = plot.to_jpeg(&RasterOptions::default()).expect("jpeg");
    assert!(jpg.starts_with(&[0xFF, 0xD8, 0xFF]));
    let pdf = plot.to_pdf().expect("pdf");
    assert!(pdf.starts_with(b"%PDF-"));
}
