use std::time::Duration;

use gpui::{Context, SharedString, Task};

use crate::item::FileHandle;

/// Coalesces bursts of refresh requests into one run after a quiet period.
///
/// Scheduling while a run is pending drops the pending task, which cancels it.
pub(crate) struct Debounced {
    delay: Duration,
    pending: Option<Task<()>>,
}

impl Debounced {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule<V: 'static>(
        &mut self,
        cx: &mut Context<V>,
        run: impl FnOnce(&mut V, &mut Context<V>) + 'static,
    ) {
        let delay = self.delay;
        self.pending = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            this.update(cx, |view, cx| run(view, cx)).ok();
        }));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Run `tick` every `interval` until the view is released.
pub(crate) fn poll_every<V: 'static>(
    interval: Duration,
    cx: &mut Context<V>,
    tick: impl Fn(&mut V, &mut Context<V>) + 'static,
) -> Task<()> {
    cx.spawn(async move |this, cx| {
        loop {
            cx.background_executor().timer(interval).await;
            if this.update(cx, |view, cx| tick(view, cx)).is_err() {
                break;
            }
        }
    })
}

/// Host notifications that may mean the list is out of date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    FileOpened(FileHandle),
    FileClosed(FileHandle),
    SelectionChanged,
    /// A host action finished running, by action id.
    ActionPerformed(SharedString),
}
