use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

// ── Events from pipeline components ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CycleStarted { cycle: u64, day: String },

    FetchStarted { url: String },
    FetchComplete { bytes: usize },

    Decoded { records: usize },
    Ranked { total: usize, shown: usize },

    NoResults { day: String },
    Sleeping { duration: Duration },

    Error(String),
}

// ── EventSink trait ─────────────────────────────────────────────────────────

/// Where components report what they are doing. Handed to each component
/// at construction instead of logging through a global.
pub trait EventSink {
    fn send(&self, event: Event);
}

// ── Console sink ────────────────────────────────────────────────────────────

/// Forwards events to `tracing` and shows a spinner on stderr while a
/// request is in flight.
pub struct ConsoleSink {
    spinner: bool,
    pb: Mutex<Option<ProgressBar>>,
}

impl ConsoleSink {
    pub fn new(spinner: bool) -> Self {
        Self {
            spinner,
            pb: Mutex::new(None),
        }
    }

    fn make_spinner(url: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]") {
            pb.set_style(style);
        }
        pb.set_message(format!("Fetching {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.pb.lock().ok().and_then(|mut guard| guard.take()) {
            pb.finish_and_clear();
        }
    }
}

impl EventSink for ConsoleSink {
    fn send(&self, event: Event) {
        match event {
            Event::CycleStarted { cycle, day } => {
                tracing::debug!(cycle, %day, "starting fetch cycle");
            }

            Event::FetchStarted { url } => {
                tracing::info!(%url, "requesting flights");
                if self.spinner {
                    if let Ok(mut guard) = self.pb.lock() {
                        *guard = Some(Self::make_spinner(&url));
                    }
                }
            }
            Event::FetchComplete { bytes } => {
                self.clear_spinner();
                tracing::debug!(bytes, "response received");
            }

            Event::Decoded { records } => tracing::info!(records, "decoded flights"),
            Event::Ranked { total, shown } => tracing::info!(total, shown, "ranked flights"),

            Event::NoResults { day } => tracing::info!(%day, "no flights reported"),
            Event::Sleeping { duration } => {
                tracing::debug!(seconds = duration.as_secs_f64(), "waiting for next refresh");
            }

            Event::Error(msg) => {
                self.clear_spinner();
                tracing::error!("{}", msg);
            }
        }
    }
}

// ── Recording sink (tests) ──────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub events: Mutex<Vec<Event>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[cfg(test)]
impl EventSink for MemorySink {
    fn send(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}
