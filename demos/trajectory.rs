use billiards::{BilliardConfig, MultiplicityMap, MultiplicityReport, edge_report, net};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Optional JSON config, e.g. {"sizes": [15, 9, 7], "start": [2, 0, 0], "mode": "projections"}
    let config = match std::env::args().nth(1) {
        Some(file) => BilliardConfig::from_json(&std::fs::read_to_string(file)?)?,
        None => BilliardConfig::default(),
    };
    let billiard = config.billiard::<3>()?;
    let path = billiard.path();

    println!("Box {:?}, start {:?}", billiard.sizes().sides(), billiard.start());
    println!("Period {} ({} points), double: {}", path.period(), path.len(), path.is_double());

    if config.mode.projections() {
        for (face, flat, points) in net(&billiard)? {
            println!(
                "Face {} ({}={}): 2D period {}, {} bounce points {:?}",
                face.id(),
                ["x", "y", "z"][face.axis],
                face.value,
                flat.period(),
                points.len(),
                points
            );
        }
    }

    if config.mode.three_d() {
        let bounces: Vec<_> = path.bounce_points().collect();
        println!("{} bounce points, {} corners", bounces.len(), path.corner_points().count());
    }

    let map = MultiplicityMap::from_path(&path);
    print!("{}", MultiplicityReport::new(&map).with_points());
    print!("{}", edge_report(&path));

    Ok(())
}
