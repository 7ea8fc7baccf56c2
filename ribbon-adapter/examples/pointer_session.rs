// Example: replaying a recorded pointer session through a shared controller.
use ribbon::{Extent, RibbonOptions, source_fn};
use ribbon_adapter::{Controller, InputEvent, PointerButton, SharedRibbon};

fn main() {
    let source = source_fn(|i: i64| Some(i), |_i, _item: &i64| Extent::new(120.0, 90.0));
    let options = RibbonOptions::new().with_on_navigated(Some(|i| println!("navigated to {i}")));
    let controller = Controller::new(source, 600.0, options).expect("every index exists");
    let shared = SharedRibbon::new(controller);

    let session = [
        InputEvent::PointerDown {
            x: 400.0,
            y: 40.0,
            button: PointerButton::Primary,
            time_ms: 0,
        },
        InputEvent::PointerMove {
            x: 340.0,
            y: 42.0,
            time_ms: 16,
        },
        InputEvent::PointerMove {
            x: 250.0,
            y: 45.0,
            time_ms: 32,
        },
        InputEvent::PointerUp { time_ms: 40 },
    ];
    for event in session {
        println!("{event:?} -> {:?}", shared.dispatch(event));
    }

    let mut now_ms = 40;
    while let Some(offset) = shared.tick(now_ms) {
        println!("t={now_ms:>4} offset={offset:.1}");
        now_ms += 16;
    }

    let click = InputEvent::Click { x: 80.0, y: 40.0 };
    println!("{click:?} -> {:?}", shared.dispatch(click));
    while shared.tick(now_ms).is_some() {
        now_ms += 16;
    }
    println!("selected: {:?}", shared.selected_index());
}
