use anyhow::{Context, Result, bail};
use orbit_config::{PolicyKind, RingSettings};
use orbit_ring::{Grow, OverflowPolicy, Overwrite, RingBuffer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Usage: `orbit <config.toml> [value ...]`
///
/// Pushes every value onto a ring built from the config and prints what is
/// left, oldest first.
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: orbit <config.toml> [value ...]");
    };

    let settings =
        RingSettings::load(path.as_str()).with_context(|| format!("loading config from {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    let values: Vec<String> = args.collect();
    let content = match settings.policy {
        PolicyKind::Overwrite => replay::<Overwrite>(settings.capacity, values)?,
        PolicyKind::Grow => replay::<Grow>(settings.capacity, values)?,
    };

    println!("{}", content.join(" "));
    Ok(())
}

fn replay<P: OverflowPolicy>(capacity: usize, values: Vec<String>) -> Result<Vec<String>> {
    let mut ring = RingBuffer::<String, P>::try_with_capacity(capacity)
        .with_context(|| format!("allocating a ring of {capacity} slots"))?;
    let pushed = values.len();
    ring.extend(values);
    info!(
        policy = P::NAME,
        pushed,
        len = ring.len(),
        capacity = ring.capacity(),
        "replay finished"
    );
    Ok(ring.into_iter().collect())
}
