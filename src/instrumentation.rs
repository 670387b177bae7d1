//! Latency profiling for the search engine.
//!
//! Compiled only with `--features instrumentation`. The engine's hot paths
//! carry `tracing` spans; the layer below counts how often each span is
//! entered and how long it stays open.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Span name -> (calls, total nanoseconds).
static SPAN_TIMINGS: Lazy<Mutex<HashMap<&'static str, (u64, u64)>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

struct TimingLayer;

impl<S> Layer<S> for TimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let span = match ctx.span(id) {
            Some(span) => span,
            None => return,
        };
        let started = span.extensions_mut().remove::<Instant>();
        if let (Some(started), Ok(mut timings)) = (started, SPAN_TIMINGS.lock()) {
            let entry = timings.entry(span.name()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += started.elapsed().as_nanos() as u64;
        }
    }
}

/// Installs the timing layer as the global subscriber.
///
/// With `RUST_LOG` unset or `off` only timings are collected; any other value
/// also prints span events filtered by `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let result = if rust_log.is_empty() || rust_log == "off" {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(TimingLayer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(TimingLayer)
            .with(fmt::layer().with_target(false).compact());
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(err) = result {
        eprintln!("Failed to set tracing subscriber: {}", err);
    }
}

/// Prints call counts and durations per span, slowest total first.
pub fn print_timing_statistics() {
    let timings = match SPAN_TIMINGS.lock() {
        Ok(timings) => timings,
        Err(_) => return,
    };
    if timings.is_empty() {
        eprintln!("\nNo timing data collected.");
        return;
    }

    let mut entries: Vec<_> = timings.iter().collect();
    entries.sort_by_key(|(_, (_, nanos))| std::cmp::Reverse(*nanos));

    eprintln!("\n{:<30} {:>12} {:>12} {:>12}", "Span", "Calls", "Total (ms)", "Avg (µs)");
    eprintln!("{:-<70}", "");
    for (name, (calls, nanos)) in entries {
        eprintln!(
            "{:<30} {:>12} {:>12.2} {:>12.2}",
            name,
            calls,
            *nanos as f64 / 1_000_000.0,
            *nanos as f64 / *calls.max(&1) as f64 / 1_000.0
        );
    }
}
