/// A closed block interval scanned in one pass for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Window {
    pub from: u64,
    pub to: u64,
}

impl Window {
    pub fn len(&self) -> u64 {
        self.to - self.from + 1
    }
}

/// Compute the next scan window, bounded by `max_window` so one pass never
/// issues an unbounded log fetch or an unbounded commit. `None` means the
/// source is already caught up (or the chain is behind the checkpoint) and
/// is skipped this tick.
pub fn plan(last_processed: u64, height: u64, max_window: u64) -> Option<Window> {
    let from = last_processed + 1;
    if from > height {
        return None;
    }
    let to = height.min(from + max_window - 1);
    Some(Window { from, to })
}
