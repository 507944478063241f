//! Adaptive Window-TinyLFU simulator: replays a synthetic trace through a
//! hill-climbing cache and a skew indicator.

mod config;
mod logging;
mod metrics;

use crate::config::{Config, DEFAULT_CONFIG};

use clap::Parser;
use climber::{AdaptiveWindowTinyLfu, MiniSimClimber};
use indicator::Indicator;
use std::path::PathBuf;
use std::time::Instant;
use trace::{SyntheticTrace, TraceSource};
use wtinylfu::Access;

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "Adaptive Window-TinyLFU simulator")]
struct Args {
    /// Path to configuration file
    config: Option<PathBuf>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let args = Args::parse();

    if args.print_config {
        print!("{DEFAULT_CONFIG}");
        return;
    }

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("No config file specified. Use simulator <path> or --print-config");
            std::process::exit(1);
        }
    };

    logging::init(&config.logging);

    if let Err(e) = run(config) {
        tracing::error!(error = %e, "simulation failed");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    print_config(&config);

    let trace = SyntheticTrace::from_config(&config.settings.trace)?;
    let mut cache = AdaptiveWindowTinyLfu::from_settings(&config.settings)?;
    let mut indicator = Indicator::from_config(&config.settings.indicator)?;
    let interval = config.report.interval;

    let start = Instant::now();
    let mut evictions = 0;
    let mut adaptations = 0;
    let mut accesses = 0u64;

    for key in trace.keys() {
        match cache.record(key) {
            Access::Hit(_) => metrics::HITS.increment(),
            Access::Miss => metrics::MISSES.increment(),
        };
        indicator.record(key);
        metrics::ACCESSES.increment();
        accesses += 1;

        let stats = cache.policy().stats();
        if stats.evictions > evictions {
            metrics::EVICTIONS.add(stats.evictions - evictions);
            evictions = stats.evictions;
        }
        if cache.adaptations() > adaptations {
            metrics::ADAPTATIONS.add(cache.adaptations() - adaptations);
            adaptations = cache.adaptations();
            update_gauges(&cache);
        }

        if accesses % interval == 0 {
            report(&cache, &indicator, accesses);
            indicator.reset();
        }
    }

    update_gauges(&cache);
    print_summary(&cache, start.elapsed().as_secs_f64());
    Ok(())
}

fn update_gauges(cache: &AdaptiveWindowTinyLfu<MiniSimClimber>) {
    metrics::WINDOW_SIZE.set(cache.policy().max_window() as i64);
    metrics::WINDOW_PERCENT.set(cache.climber().window_percent() as i64);
}

fn report(cache: &AdaptiveWindowTinyLfu<MiniSimClimber>, indicator: &Indicator, accesses: u64) {
    let stats = cache.policy().stats();
    let snapshot = indicator.snapshot();
    tracing::info!(
        accesses,
        hit_rate = stats.hit_rate(),
        window_percent = cache.climber().window_percent(),
        max_window = cache.policy().max_window(),
        adaptations = cache.adaptations(),
        hint = ?snapshot.hint,
        skew = ?snapshot.skew,
        indicator = ?snapshot.indicator,
        "progress"
    );
}

fn print_config(config: &Config) {
    let settings = &config.settings;
    eprintln!("simulator configuration:");
    eprintln!("  maximum_size:  {}", settings.maximum_size);
    eprintln!("  strategy:      {}", settings.hill_climber.strategy);
    eprintln!("  percent_main:  {:?}", settings.hill_climber.percent_main);
    eprintln!("  period:        {}", settings.hill_climber.minisim.period);
    eprintln!(
        "  protected:     {}",
        settings.window_tiny_lfu.percent_main_protected
    );
    eprintln!(
        "  indicator:     k={} ss_size={}",
        settings.indicator.k, settings.indicator.ss_size
    );
    eprintln!(
        "  trace:         {} x {} (seed {})",
        settings.trace.distribution, settings.trace.events, settings.trace.seed
    );
    eprintln!();
}

fn print_summary(cache: &AdaptiveWindowTinyLfu<MiniSimClimber>, elapsed: f64) {
    let accesses = metrics::ACCESSES.value();
    let hits = metrics::HITS.value();
    let misses = metrics::MISSES.value();
    let evictions = metrics::EVICTIONS.value();
    let adaptations = metrics::ADAPTATIONS.value();

    let hit_pct = if accesses > 0 {
        (hits as f64 / accesses as f64) * 100.0
    } else {
        0.0
    };
    let rate = if elapsed > 0.0 {
        accesses as f64 / elapsed
    } else {
        0.0
    };

    let climber = cache.climber().snapshot();
    let best = climber
        .best_replica()
        .map_or_else(|| "-".to_string(), |index| format!("{index}%"));

    eprintln!();
    eprintln!("=== Final Summary ===");
    eprintln!("Accesses:      {accesses}");
    eprintln!("Hits:          {hits} ({hit_pct:.2}%)");
    eprintln!("Misses:        {misses}");
    eprintln!("Evictions:     {evictions}");
    eprintln!("Adaptations:   {adaptations}");
    eprintln!(
        "Window:        {} entries ({}%)",
        cache.policy().max_window(),
        climber.window_percent
    );
    eprintln!("Best replica:  {best} window");
    eprintln!("Sampling rate: 1/{}", climber.sampling_rate);
    eprintln!("Elapsed:       {elapsed:.2}s ({rate:.0} accesses/sec)");
}
