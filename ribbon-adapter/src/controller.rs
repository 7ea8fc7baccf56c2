use ribbon::{ItemSource, MotionPhase, Ribbon, RibbonError, RibbonOptions};

use crate::{InputEvent, PointerButton};

/// What a dispatched event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dispatch {
    /// The event does not apply in the ribbon's current state; let it propagate.
    Ignored,
    /// The event was consumed.
    Handled,
    /// A drag gesture ended. Carries the snap target, or `None` when the gesture was a click.
    Released(Option<i64>),
    /// The ribbon refused the request.
    Rejected(RibbonError),
}

impl From<ribbon::Result<()>> for Dispatch {
    fn from(result: ribbon::Result<()>) -> Self {
        match result {
            Ok(()) => Self::Handled,
            Err(err) => Self::Rejected(err),
        }
    }
}

/// A framework-neutral controller that wraps a [`Ribbon`] and routes host input to it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `dispatch(event)` for pointer, touch, wheel, click and resize events
/// - `tick(now_ms)` each frame/timer tick while [`Controller::is_animating`]
///
/// Every event is resolved against the ribbon's state when it is dispatched: a click is
/// matched to whichever item is under the pointer at that moment, and moves or releases
/// only act while a drag is in progress.
#[derive(Debug)]
pub struct Controller<S: ItemSource> {
    r: Ribbon<S>,
}

impl<S: ItemSource> Controller<S> {
    pub fn new(source: S, viewport_extent: f64, options: RibbonOptions) -> ribbon::Result<Self> {
        Ribbon::new(source, viewport_extent, options).map(Self::from_ribbon)
    }

    pub fn from_ribbon(r: Ribbon<S>) -> Self {
        Self { r }
    }

    pub fn ribbon(&self) -> &Ribbon<S> {
        &self.r
    }

    pub fn ribbon_mut(&mut self) -> &mut Ribbon<S> {
        &mut self.r
    }

    pub fn into_ribbon(self) -> Ribbon<S> {
        self.r
    }

    pub fn is_animating(&self) -> bool {
        self.r.is_animating()
    }

    /// The materialized item under `pos` (relative to the viewport, along the axis).
    pub fn item_at(&self, pos: f64) -> Option<i64> {
        let mut hit = None;
        self.r.for_each_placed_item(|it| {
            if hit.is_none() && pos >= it.screen_pos && pos < it.end() {
                hit = Some(it.index);
            }
        });
        hit
    }

    /// Routes one host event to the ribbon.
    pub fn dispatch(&mut self, event: InputEvent) -> Dispatch {
        let axis = self.r.options().axis;
        let phase = self.r.phase();
        atrace!(?event, ?phase, "dispatch");

        match (event, phase) {
            (InputEvent::PointerDown { button, .. }, _) if button != PointerButton::Primary => {
                Dispatch::Ignored
            }
            (
                InputEvent::PointerDown { time_ms, .. } | InputEvent::TouchStart { time_ms, .. },
                _,
            ) => {
                let Some(pos) = event.position(axis) else {
                    return Dispatch::Ignored;
                };
                self.r.drag_start(pos, time_ms);
                Dispatch::Handled
            }
            (
                InputEvent::PointerMove { time_ms, .. } | InputEvent::TouchMove { time_ms, .. },
                MotionPhase::Dragging,
            ) => {
                let Some(pos) = event.position(axis) else {
                    return Dispatch::Ignored;
                };
                self.r.drag_move(pos, time_ms);
                Dispatch::Handled
            }
            (InputEvent::PointerUp { .. } | InputEvent::TouchEnd { .. }, MotionPhase::Dragging) => {
                Dispatch::Released(self.r.drag_end())
            }
            (
                InputEvent::PointerMove { .. }
                | InputEvent::TouchMove { .. }
                | InputEvent::PointerUp { .. }
                | InputEvent::TouchEnd { .. },
                _,
            ) => Dispatch::Ignored,
            (InputEvent::Wheel { .. }, MotionPhase::Dragging) => Dispatch::Ignored,
            (InputEvent::Wheel { delta }, _) => self.r.wheel(delta).into(),
            (InputEvent::Click { .. }, _) => {
                let hit = event.position(axis).and_then(|pos| self.item_at(pos));
                match hit {
                    Some(index) => self.r.click_item(index).into(),
                    None => Dispatch::Ignored,
                }
            }
            (InputEvent::ItemClick { index }, _) => {
                if self.r.record(index).is_none() {
                    adebug!(index, "click on an item outside the window");
                    return Dispatch::Ignored;
                }
                self.r.click_item(index).into()
            }
            (InputEvent::Resize { width, height }, _) => {
                self.r.handle_resize(axis.project(width, height)).into()
            }
        }
    }

    /// Advances a running snap animation.
    ///
    /// Returns the updated offset while animating (including the tick that settles), or
    /// `None` when there is nothing to animate.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        if !self.r.is_animating() {
            return None;
        }
        self.r.tick(now_ms);
        Some(self.r.offset())
    }

    pub fn go_to_index(&mut self, index: i64) -> ribbon::Result<()> {
        self.r.go_to_index(index)
    }

    pub fn refresh(&mut self) {
        self.r.refresh();
    }

    pub fn selected_index(&self) -> i64 {
        self.r.selected_index()
    }
}
