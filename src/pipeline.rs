use crate::config::Config;
use crate::events::{ConsoleSink, Event, EventSink};
use crate::fetch::{Fetch, HttpFetcher};
use crate::flights;
use crate::rank::rank;
use crate::table::TableRenderer;
use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Stopped,
}

/// Run against the live API, printing to stdout.
pub fn run(config: &Config) -> Result<()> {
    let sink = ConsoleSink::new(config.color);
    let fetcher = HttpFetcher::new();
    let mut stdout = io::stdout().lock();
    run_with(config, &fetcher, &sink, &mut stdout, thread::sleep)
}

/// Repeat fetch → decode → rank → filter → render until a cycle stops the
/// loop. Any failure is reported through `sink` and ends the run.
pub fn run_with<W: Write>(
    config: &Config,
    fetcher: &dyn Fetch,
    sink: &dyn EventSink,
    out: &mut W,
    mut sleep: impl FnMut(Duration),
) -> Result<()> {
    let renderer = TableRenderer {
        color: config.color,
        flight_id: config.flight_id,
    };
    let mut state = State::Running;
    let mut cycle = 0u64;

    while state == State::Running {
        cycle += 1;
        sink.send(Event::CycleStarted { cycle, day: config.day.clone() });

        state = match run_cycle(config, fetcher, sink, &renderer, out) {
            Ok(state) => state,
            Err(e) => {
                sink.send(Event::Error(format!("{:#}", e)));
                return Err(e);
            }
        };

        if state == State::Running {
            match config.sleep_interval() {
                Some(duration) => {
                    sink.send(Event::Sleeping { duration });
                    sleep(duration);
                }
                None => state = State::Stopped,
            }
        }
    }
    Ok(())
}

fn run_cycle<W: Write>(
    config: &Config,
    fetcher: &dyn Fetch,
    sink: &dyn EventSink,
    renderer: &TableRenderer,
    out: &mut W,
) -> Result<State> {
    if config.interval_secs > 0 {
        clear_screen(out).context("Failed to clear terminal")?;
    }

    let body = fetcher.get(&config.flights_url(), sink)?;
    let mut records = flights::decode(&body)?.into_records()?;
    sink.send(Event::Decoded { records: records.len() });

    if records.is_empty() {
        writeln!(out, "No results for today: {}", config.day)?;
        sink.send(Event::NoResults { day: config.day.clone() });
        return Ok(State::Stopped);
    }

    rank(&mut records);
    let rows = config.filter.select(&records);
    sink.send(Event::Ranked { total: records.len(), shown: rows.len() });

    renderer.render(&rows, out).context("Failed to write table")?;
    Ok(State::Running)
}

fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}
