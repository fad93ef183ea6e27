use carousel::{CarouselOptions, NoopHost};
use carousel_adapter::{Controller, Easing};

fn main() {
    // Example: controller driving a tween and an animated resize without holding any UI objects.
    //
    // An adapter would:
    // - forward measure/resize/scroll events to the controller
    // - call tick(now_ms) in a frame loop / timer while is_animating()
    // - render attached items from the layout's placements
    let mut host = NoopHost;
    let mut c = Controller::new(CarouselOptions::new(50));
    if let Err(err) = c.on_first_measure(100.0, 300.0, &mut host) {
        eprintln!("measure failed: {err}");
        return;
    }

    let target = c.start_tween_to_index(12, 0, 240, Easing::SmoothStep);
    println!("target_offset={target:?}");

    let mut now_ms = 0u64;
    while let Some(off) = c.tick(now_ms, &mut host) {
        if now_ms % 80 == 0 {
            println!("t={now_ms} off={off:.1} focal={:?}", c.layout().focal_index());
        }
        now_ms += 16;
    }

    match c.on_viewport_extent(320.0, now_ms, 200, Easing::EaseInOutCubic, &mut host) {
        Ok(true) => println!("animating resize"),
        Ok(false) => println!("resize adopted immediately"),
        Err(err) => {
            eprintln!("resize failed: {err}");
            return;
        }
    }
    while let Some(off) = c.tick(now_ms, &mut host) {
        println!(
            "t={now_ms} off={off:.1} extent={:.1}",
            c.layout().viewport_extent()
        );
        now_ms += 40;
    }

    println!(
        "done: off={:.1} focal={:?} attached={:?}",
        c.layout().scroll_offset(),
        c.layout().focal_index(),
        c.layout().attached_range()
    );
}
