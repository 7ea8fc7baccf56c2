use crate::MotionPhase;

/// The fixed-period schedule of a running snap.
///
/// A timer only exists inside [`DragState::Snapping`], so replacing the motion state is what
/// cancels it and two timers can never be live at once.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SnapTimer {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl SnapTimer {
    pub(crate) fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    /// Returns `true` when a tick is due at `now_ms`, and schedules the next one. The first
    /// call only arms the timer.
    pub(crate) fn fire(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            None => {
                self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
                false
            }
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(due.saturating_add(self.interval_ms));
                true
            }
            Some(_) => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Drag {
    pub(crate) start_pos: f64,
    pub(crate) last_pos: f64,
    pub(crate) last_time_ms: u64,
    /// Smoothed pointer velocity, in px/ms.
    pub(crate) velocity: f64,
    pub(crate) start_offset: f64,
}

impl Drag {
    fn new(pos: f64, now_ms: u64, offset: f64) -> Self {
        Self {
            start_pos: pos,
            last_pos: pos,
            last_time_ms: now_ms,
            velocity: 0.0,
            start_offset: offset,
        }
    }

    pub(crate) fn moved(&self) -> bool {
        self.last_pos != self.start_pos
    }

    fn track(&mut self, pos: f64, now_ms: u64, smoothing: f64) -> f64 {
        let dt = now_ms.saturating_sub(self.last_time_ms).max(1) as f64;
        self.velocity = self.velocity * smoothing + (pos - self.last_pos) / dt * (1.0 - smoothing);
        self.last_pos = pos;
        self.last_time_ms = now_ms;
        pos - self.start_pos + self.start_offset
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct Snap {
    pub(crate) target_offset: f64,
    /// `None` for offset snaps (wheel scrolling).
    pub(crate) target_index: Option<i64>,
    pub(crate) timer: SnapTimer,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
    Snapping(Snap),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum StepOutcome {
    Moving(f64),
    Settled {
        offset: f64,
        target_index: Option<i64>,
    },
}

/// The drag / momentum / snap state machine.
#[derive(Debug, Default)]
pub(crate) struct Motion {
    state: DragState,
}

impl Motion {
    pub(crate) fn phase(&self) -> MotionPhase {
        match self.state {
            DragState::Idle => MotionPhase::Idle,
            DragState::Dragging(_) => MotionPhase::Dragging,
            DragState::Snapping(_) => MotionPhase::Snapping,
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub(crate) fn is_snapping(&self) -> bool {
        matches!(self.state, DragState::Snapping(_))
    }

    pub(crate) fn snap_target(&self) -> Option<(f64, Option<i64>)> {
        match &self.state {
            DragState::Snapping(snap) => Some((snap.target_offset, snap.target_index)),
            _ => None,
        }
    }

    /// Drops whatever is in progress.
    pub(crate) fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    pub(crate) fn begin_drag(&mut self, pos: f64, now_ms: u64, offset: f64) {
        self.state = DragState::Dragging(Drag::new(pos, now_ms, offset));
    }

    /// Returns the new offset, or `None` when no drag is in progress.
    pub(crate) fn drag_to(&mut self, pos: f64, now_ms: u64, smoothing: f64) -> Option<f64> {
        match &mut self.state {
            DragState::Dragging(drag) => Some(drag.track(pos, now_ms, smoothing)),
            _ => None,
        }
    }

    /// Ends the drag, leaving the controller idle. Returns the finished gesture.
    pub(crate) fn end_drag(&mut self) -> Option<Drag> {
        let DragState::Dragging(drag) = self.state else {
            return None;
        };
        self.state = DragState::Idle;
        Some(drag)
    }

    pub(crate) fn snap(&mut self, target_offset: f64, target_index: Option<i64>, interval_ms: u64) {
        self.state = DragState::Snapping(Snap {
            target_offset,
            target_index,
            timer: SnapTimer::new(interval_ms),
        });
    }

    /// Whether the running snap's timer is due at `now_ms`.
    pub(crate) fn snap_due(&mut self, now_ms: u64) -> bool {
        match &mut self.state {
            DragState::Snapping(snap) => snap.timer.fire(now_ms),
            _ => false,
        }
    }

    /// Eases `offset` towards the snap target by one tick. Settling leaves the controller
    /// idle.
    pub(crate) fn step(&mut self, offset: f64, ease_factor: f64, epsilon: f64) -> Option<StepOutcome> {
        let DragState::Snapping(snap) = &self.state else {
            return None;
        };
        let target = snap.target_offset;
        let next = offset * (1.0 - ease_factor) + target * ease_factor;
        if (next - target).abs() < epsilon {
            let target_index = snap.target_index;
            self.state = DragState::Idle;
            return Some(StepOutcome::Settled {
                offset: target,
                target_index,
            });
        }
        Some(StepOutcome::Moving(next))
    }
}
