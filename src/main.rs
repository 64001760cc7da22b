//! Binary entry point for tracecache.
//!
//! A small diagnostic CLI for the cache facade. Construction flushes the
//! backend namespace, so each invocation is a self-contained session:
//! values are stored, read back, and the recorded call history is
//! replayed before the process exits.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow prints in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracecache::{replay, Cache, CacheConfig, KvBackend, MemoryBackend, Value};

/// Tracecache - instrumented key-value cache with call history replay.
#[derive(Parser)]
#[command(name = "tracecache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend connection URL.
    #[arg(long, global = true, env = "TRACECACHE_REDIS_URL")]
    url: Option<String>,

    /// Use the in-memory backend instead of Redis.
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Store values, read them back, and replay the call history.
    Demo {
        /// Values to store. Defaults to a small sample set.
        values: Vec<String>,
    },

    /// Round-trip one value of each scalar shape and report the result.
    Smoke,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = CacheConfig::from_env();
    if let Some(url) = &cli.url {
        config = config.with_url(url.clone());
    }

    let result = if cli.memory {
        match Cache::new(MemoryBackend::new()) {
            Ok(cache) => run(&cache, &cli.command),
            Err(e) => Err(e),
        }
    } else {
        match Cache::connect(&config) {
            Ok(cache) => run(&cache, &cli.command),
            Err(e) => Err(e),
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run<B: KvBackend>(cache: &Cache<B>, command: &Commands) -> tracecache::Result<()> {
    match command {
        Commands::Demo { values } => cmd_demo(cache, values),
        Commands::Smoke => cmd_smoke(cache),
    }
}

fn cmd_demo<B: KvBackend>(cache: &Cache<B>, values: &[String]) -> tracecache::Result<()> {
    let values = if values.is_empty() {
        vec!["hello".to_string(), "world".to_string(), "42".to_string()]
    } else {
        values.to_vec()
    };

    for value in &values {
        let key = cache.store(value.as_str())?;
        let read_back = cache.get_str(&key)?.unwrap_or_default();
        println!("stored {value:?} under {key} (read back: {read_back:?})");
    }

    let method = cache.store_method();
    println!();
    println!("call count for {method}: {}", cache.call_count(method)?);
    replay(cache, method)?;
    Ok(())
}

fn cmd_smoke<B: KvBackend>(cache: &Cache<B>) -> tracecache::Result<()> {
    let samples = [
        ("text", Value::Text("smoke".to_string())),
        ("bytes", Value::Bytes(vec![0x73, 0x6d, 0x6f, 0x6b, 0x65])),
        ("int", Value::Int(123)),
        ("float", Value::Float(2.5)),
    ];

    let mut failures = 0u32;
    for (label, value) in samples {
        let expected = value.encode();
        let key = cache.store(value)?;
        let status = match cache.get(&key)? {
            Some(bytes) if bytes == expected => "ok",
            Some(_) => {
                failures += 1;
                "MISMATCH"
            },
            None => {
                failures += 1;
                "MISSING"
            },
        };
        println!("{label}: {status}");
    }

    let method = cache.store_method();
    let count = cache.call_count(method)?;
    let history = cache.call_history(method)?;
    let counter_matches = usize::try_from(count).is_ok_and(|c| c == history.len());
    if counter_matches && history.inputs().len() == history.outputs().len() {
        println!("instrumentation: ok ({count} calls recorded)");
    } else {
        failures += 1;
        println!(
            "instrumentation: MISMATCH (counter {count}, {} inputs, {} outputs)",
            history.inputs().len(),
            history.outputs().len()
        );
    }

    if failures > 0 {
        return Err(tracecache::Error::OperationFailed {
            operation: "smoke".to_string(),
            cause: format!("{failures} check(s) failed"),
        });
    }
    println!("smoke: all checks passed");
    Ok(())
}
