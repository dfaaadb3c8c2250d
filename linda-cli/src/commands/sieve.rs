//! Parallel prime sieve over a shared space.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use linda_core::{Linda, SharedSpace};
use linda_types::{Field, FieldType, Template, Tuple, Value};
use serde::Serialize;
use std::path::Path;
use std::thread;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct SieveSummary<'a> {
    limit: i64,
    workers: usize,
    elapsed_ms: u128,
    count: usize,
    primes: &'a [i64],
}

fn number(n: i64) -> Tuple {
    Tuple::new(vec![Value::Integer(n)])
}

/// Find the primes up to `limit` by striking composites out of the space
///
/// Every candidate `2..=limit` is written as a one-field tuple. For each
/// candidate still present, `workers` threads race to take its multiples
/// over disjoint slices. Whatever survives is prime and stays resident.
pub fn sieve(space: &SharedSpace, limit: i64, workers: usize) -> Vec<i64> {
    let workers = workers.max(1);
    for n in 2..=limit {
        space.write(number(n));
    }

    let mut p: i64 = 2;
    while p.saturating_mul(p) <= limit {
        if space.try_read(&Template::from(number(p))).is_some() {
            tracing::debug!("striking multiples of {}", p);
            let multiples: Vec<i64> = (p * p..=limit).step_by(p as usize).collect();
            let per_worker = multiples.len().div_ceil(workers).max(1);
            thread::scope(|scope| {
                for slice in multiples.chunks(per_worker) {
                    scope.spawn(move || {
                        for &m in slice {
                            space.try_take(&Template::from(number(m)));
                        }
                    });
                }
            });
        }
        p += 1;
    }

    let any_int = Template::new(vec![Field::wildcard(FieldType::Integer)]);
    let mut primes: Vec<i64> = space
        .read_all(&any_int)
        .iter()
        .filter_map(|t| t.get(0).and_then(Value::as_integer))
        .collect();
    primes.sort_unstable();
    primes
}

/// Run the sieve demo; flags override values from the config file.
pub fn run_sieve(
    config_path: &Path,
    limit: Option<i64>,
    workers: Option<usize>,
    json: bool,
    debug: bool,
) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let limit = limit.unwrap_or(config.sieve.limit);
    let workers = workers.unwrap_or(config.sieve.workers);
    if workers == 0 {
        bail!("--workers must be at least 1");
    }

    let space = SharedSpace::named("sieve");
    let start = Instant::now();
    let primes = sieve(&space, limit, workers);
    let elapsed_ms = start.elapsed().as_millis();
    tracing::info!(
        "sieve up to {} with {} workers took {}ms",
        limit,
        workers,
        elapsed_ms
    );

    let summary = SieveSummary {
        limit,
        workers,
        elapsed_ms,
        count: primes.len(),
        primes: &primes,
    };

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        println!(
            "{} primes up to {} ({} workers, {}ms)",
            summary.count, limit, workers, elapsed_ms
        );
        let listed: Vec<String> = primes.iter().map(ToString::to_string).collect();
        println!("{}", listed.join(" "));
    }

    if debug {
        space.debug("[sieve]");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sieve_finds_primes_up_to_limit() {
        let space = SharedSpace::new();
        let primes = sieve(&space, 50, 3);
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
        assert_eq!(space.size(), primes.len());
    }

    #[test]
    fn test_sieve_agrees_across_worker_counts() {
        let single = sieve(&SharedSpace::new(), 500, 1);
        let many = sieve(&SharedSpace::new(), 500, 8);
        assert_eq!(single, many);
        assert_eq!(single.len(), 95);
    }

    #[test]
    fn test_sieve_below_two_is_empty() {
        let space = SharedSpace::new();
        assert!(sieve(&space, 1, 3).is_empty());
        assert_eq!(space.size(), 0);
    }
}
