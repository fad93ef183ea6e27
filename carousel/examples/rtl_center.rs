use carousel::{
    CarouselLayout, CarouselOptions, LayoutDirection, NoopHost, Strategy, StrategyParams,
};

fn main() {
    // Example: a center-aligned, right-to-left carousel.
    let options = CarouselOptions::new(12)
        .with_strategy(Strategy::CenterAligned(StrategyParams::default()))
        .with_direction(LayoutDirection::RightToLeft)
        .with_initial_index(4);
    let mut layout = CarouselLayout::new(options);
    if let Err(err) = layout.on_first_measure(180.0, 400.0) {
        eprintln!("measure failed: {err}");
        return;
    }

    let range = layout.fill(&mut NoopHost);
    println!(
        "off={:.1} focal={:?} attached={range:?}",
        layout.scroll_offset(),
        layout.focal_index()
    );
    layout.for_each_placement(|p| {
        println!(
            "item {} center={:.1} size={:.1} cutoff={:.1}",
            p.index, p.center, p.masked_size, p.cutoff
        );
    });
}
