use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Refresh rate for status line updates (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const TEMPLATE: &str = "{spinner:.cyan} {msg}";
const TEMPLATE_NO_COLOR: &str = "{spinner} {msg}";

#[derive(Debug)]
struct TickerState {
    visible_after: Instant,
    visible: AtomicBool,
    started_at: Instant,
}

/// A cosmetic status line shown while a search is pending.
///
/// The line stays hidden until the search outlives a delay threshold, then
/// rotates through the configured messages on a fixed interval. The
/// rotation carries no semantic weight. [`StatusTicker::done`] tears the
/// line down deterministically: the refresh task is aborted before the
/// display clears, so no tick fires after teardown.
pub struct StatusTicker {
    bar: ProgressBar,
    state: Arc<TickerState>,
    refresh_task: JoinHandle<()>,
}

impl StatusTicker {
    /// Create a ticker rotating `messages` every `interval`.
    ///
    /// The line only becomes visible if the search is still pending after
    /// `delay`. An empty message list renders nothing.
    #[must_use]
    pub fn new(messages: Vec<String>, interval: Duration, delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(ProgressDrawTarget::hidden());

        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        bar.set_style(ProgressStyle::default_spinner().template(template).expect("could not create status line style"));
        bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));

        let state = Arc::new(TickerState {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
            started_at: Instant::now(),
        });

        Self {
            refresh_task: tokio::spawn(refresh_task(bar.clone(), Arc::clone(&state), messages, interval)),
            bar,
            state,
        }
    }

    /// Tear down the status line and its recurring refresh task.
    pub fn done(&self) {
        self.refresh_task.abort();
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for StatusTicker {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatusTicker")
            .field("bar", &self.bar)
            .field("state", &self.state)
            .field("refresh_task", &"<task>")
            .finish()
    }
}

/// Background refresh task that reveals the line after the delay and
/// rotates the message.
async fn refresh_task(bar: ProgressBar, state: Arc<TickerState>, messages: Vec<String>, interval: Duration) {
    let interval_secs = interval.as_secs().max(1);
    let mut timer = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));

    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = timer.tick().await;

        if messages.is_empty() {
            continue;
        }

        if !state.visible.load(Ordering::Relaxed) && Instant::now() >= state.visible_after {
            state.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        if state.visible.load(Ordering::Relaxed) {
            let rotation = state.started_at.elapsed().as_secs() / interval_secs;
            let index = usize::try_from(rotation).map_or(0, |r| r % messages.len());
            bar.set_message(messages[index].clone());
        }
    }
}
