use carousel::{CarouselHost, CarouselLayout, CarouselOptions, ItemPlacement};

struct PrintHost;

impl CarouselHost for PrintHost {
    fn attach(&mut self, index: usize) {
        println!("  attach {index}");
    }

    fn detach(&mut self, index: usize) {
        println!("  detach {index}");
    }

    fn place(&mut self, p: &ItemPlacement) {
        println!(
            "  place {} center={:.1} size={:.1} mask={:.2}",
            p.index, p.center, p.masked_size, p.mask
        );
    }
}

fn main() {
    // Example: start-aligned carousel with 20 items in a 300px viewport.
    let mut layout = CarouselLayout::new(CarouselOptions::new(20));
    if let Err(err) = layout.on_first_measure(100.0, 300.0) {
        eprintln!("measure failed: {err}");
        return;
    }

    println!(
        "scroll bounds: {:.1}..={:.1}",
        layout.min_scroll(),
        layout.max_scroll()
    );

    let mut host = PrintHost;
    println!("fill:");
    layout.fill(&mut host);

    for delta in [60.0, 60.0, 5000.0] {
        println!("scroll_by({delta}):");
        let consumed = layout.scroll_by(delta, &mut host);
        println!("  consumed={consumed:.1} off={:.1}", layout.scroll_offset());
    }

    if let Some(overlay) = layout.debug_overlay() {
        for (location, mask) in overlay.location_mask_pairs() {
            println!("keyline location={location:.1} mask={mask:.2}");
        }
    }
}
