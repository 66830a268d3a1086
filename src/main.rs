use nbsim::{Scenario, ScenarioConfig, NVec3};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "two_charges.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_scenario_from_yaml() -> Result<ScenarioConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let scenario_cfg = load_scenario_from_yaml()?;

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    let n = scenario.system.particles.len();
    let mut forces = vec![NVec3::zeros(); n];
    let energy =
        scenario
            .forces
            .accumulate_forces(&scenario.system, &scenario.parameters, &mut forces)?;

    println!("particles: {n}");
    println!("potential energy: {energy:.6}");

    let max_force = forces.iter().map(|f| f.norm()).fold(0.0_f64, f64::max);
    println!("max |force|: {max_force:.6}");

    for (i, f) in forces.iter().take(10).enumerate() {
        println!("  f[{i}] = ({:.6}, {:.6}, {:.6})", f.x, f.y, f.z);
    }

    //nbsim::bench_nonbonded();
    //nbsim::bench_nonbonded_curve();

    Ok(())
}
