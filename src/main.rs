//! Headless scenario player: plays every move set of a `.scen` file and logs
//! where each module ends up.

use std::path::Path;
use std::time::Duration;

use metavis::animation::AnimationDriver;
use metavis::options::Options;
use metavis::scenario::Scenario;
use metavis::MetavisError;

fn run(scenario_path: &Path, options_path: Option<&Path>) -> Result<(), MetavisError> {
    let options = match options_path {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let mut playback = options.playback.clone();
    playback.auto_animate = true;
    if playback.effective_speed() <= 0.0 {
        return Err(MetavisError::OptionsParse(
            "playback speed must be positive".to_owned(),
        ));
    }
    let dt = Duration::from_secs_f64(1.0 / f64::from(playback.tick_hz.max(1)));

    let scenario = Scenario::load(scenario_path)?;
    let expected = scenario.net_displacements();
    let (modules, sequence) = scenario.into_simulation(&options.shape_table());
    let initial: Vec<_> = modules
        .sorted_ids()
        .into_iter()
        .filter_map(|id| modules.get(id).map(|m| (id, m.position())))
        .collect();

    let mut driver = AnimationDriver::new(modules, sequence, playback);
    driver.set_auto_animate(true);

    let mut frames = 0_u64;
    let mut played = 0;
    while !driver.is_settled() {
        driver.tick(dt);
        frames += 1;
        if driver.sequence().current() != played {
            played = driver.sequence().current();
            log::info!(
                "move set {played}/{} ({})",
                driver.sequence().total(),
                driver.progress_label()
            );
        }
    }
    log::info!(
        "finished {} move sets in {frames} frames ({:.1}s simulated)",
        driver.sequence().total(),
        dt.as_secs_f64() * frames as f64
    );

    for (id, start) in initial {
        let Some(module) = driver.modules().get(id) else {
            continue;
        };
        let end = module.position();
        let moved = expected.get(&id).copied().unwrap_or_default();
        if !(start + moved).abs_diff_eq(end, 1e-6) {
            log::warn!("module {id} ended at {end} but its moves add up to {}", start + moved);
        }
        log::info!("module {id}: {start} -> {end}");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(scenario) = args.next() else {
        log::error!("Usage: metavis <scenario.scen> [options.toml]");
        std::process::exit(1);
    };
    let options = args.next();

    if let Err(e) = run(Path::new(&scenario), options.as_deref().map(Path::new)) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
