use ant_colony::prelude::*;
use ant_colony::world::{parse_terrain, write_terrain};
use clap::Parser;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let config = args.world_config()?;

    // Build terrain and colony
    let mut sim = match &args.map {
        Some(path) => Simulation::from_terrain(parse_terrain(path)?, &config)?,
        None => Simulation::new(&config)?,
    };

    // Run simulation
    let summary = sim.run(args.ticks, args.suppress_events);

    if let Some(path) = &args.output {
        write_terrain(path, sim.world().grid())?;
    }

    // Print results
    sim.print_summary(&summary, args.render);

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
