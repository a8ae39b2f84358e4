use billiards::{StatsAggregator, StatsConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Optional JSON config, e.g. {"mode": "sweep", "max_side": 4} or {"mode": "single", "sizes": [2, 3, 4]}
    let config = match std::env::args().nth(1) {
        Some(file) => StatsConfig::from_json(&std::fs::read_to_string(file)?)?,
        None => StatsConfig::Sweep { max_side: 3 },
    };

    let report = config.run(&StatsAggregator::new())?;
    print!("{}", report);
    Ok(())
}
