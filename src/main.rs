use sheet_splitter::image::ImageRgba8;
use sheet_splitter::{GridSpec, SheetSplitter, SplitRequest};

fn main() {
    // Demo stub: builds a synthetic sheet with a dark cross and splits it.
    let (w, h) = (240usize, 240usize);
    let mut sheet = ImageRgba8::new(w, h);
    sheet.data.fill([235, 235, 235, 255]);
    for i in 0..w {
        for c in 118..122 {
            sheet.set(i, c, [15, 15, 15, 255]);
            sheet.set(c, i, [15, 15, 15, 255]);
        }
    }

    let splitter = SheetSplitter::default();
    let request = SplitRequest {
        grid: GridSpec::Auto,
        ..Default::default()
    };
    match splitter.process(&sheet, &request) {
        Ok(outcome) => println!(
            "tiles={} confidence={:.2} latency_ms={:.3}",
            outcome.tiles.len(),
            outcome.detection.confidence,
            outcome.latency_ms
        ),
        Err(err) => eprintln!("Error: {err}"),
    }
}
