// Example: a horizontal ribbon of variable-width cards, dragged, flung and settled.
use ribbon::{Extent, Ribbon, RibbonOptions, source_fn};

fn main() {
    let source = source_fn(
        |i: i64| Some(format!("card {i}")),
        |i, _label: &String| Extent::new(80.0 + (i.rem_euclid(3) * 20) as f64, 120.0),
    );
    let options = RibbonOptions::new()
        .with_on_selection_changed(Some(|i| println!("selected {i}")))
        .with_on_navigated(Some(|i| println!("navigated to {i}")));

    let mut r = Ribbon::new(source, 480.0, options).expect("card 0 always exists");
    println!("initial window={:?}", r.window());

    // Simulate a pointer fling to the left at ~60 Hz.
    let mut now_ms = 0u64;
    r.drag_start(300.0, now_ms);
    for pos in [280.0, 240.0, 180.0, 110.0] {
        now_ms += 16;
        r.drag_move(pos, now_ms);
    }
    let target = r.drag_end();
    println!("released: offset={:.1} target={target:?}", r.offset());

    // The host's timer loop.
    while r.tick(now_ms) {
        now_ms += 16;
    }

    r.for_each_placed_item(|it| {
        println!(
            "#{:<3} at {:>7.1} (w={:>5.1}){}",
            it.index,
            it.screen_pos,
            it.extent,
            if it.selected { " *" } else { "" }
        );
    });

    // Programmatic navigation far away resets the window instead of walking to it.
    r.go_to_index(1_000).expect("every index has a card");
    while r.tick(now_ms) {
        now_ms += 16;
    }
    println!("done: {:?}", r.frame_state());
}
