use std::time::Instant;

use crate::nonbonded::exceptions::ExceptionTable;
use crate::nonbonded::forces::{
    DirectNonbonded, ForceTerm, ParallelTiledNonbonded, TiledNonbonded,
};
use crate::nonbonded::params::{CombiningRule, Parameters};
use crate::nonbonded::states::{NVec3, Particle, System};

/// Helper to build a manual System of size `n`
fn make_system(n: usize) -> System {
    let mut particles = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );

        particles.push(Particle {
            x,
            q: if i % 2 == 0 { 1.0 } else { -1.0 },
            sigma: 0.2,
            eps: 0.2,
        });
    }

    System {
        particles,
        cell: None,
        exceptions: ExceptionTable::new(),
    }
}

fn make_params() -> Parameters {
    Parameters {
        cutoff: 1.0,
        rf_dielectric: 78.3,
        block_size: 32,
        combining: CombiningRule::LorentzBerthelot,
    }
}

/// Time a single evaluation of one force term (after a warm-up call)
fn time_eval(term: &mut dyn ForceTerm, sys: &System, params: &Parameters) -> f64 {
    let n = sys.particles.len();
    let mut out = vec![NVec3::zeros(); n];

    // Warm up
    term.add_forces(sys, params, &mut out)
        .expect("evaluation failed");

    for f in out.iter_mut() {
        *f = NVec3::zeros();
    }

    let t0 = Instant::now();
    term.add_forces(sys, params, &mut out)
        .expect("evaluation failed");
    t0.elapsed().as_secs_f64()
}

pub fn bench_nonbonded() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let sys = make_system(n);
        let params = make_params();

        let mut direct = DirectNonbonded;
        let mut tiled = TiledNonbonded::new(1);
        let mut parallel = ParallelTiledNonbonded::new(1);

        let dt_direct = time_eval(&mut direct, &sys, &params);
        let dt_tiled = time_eval(&mut tiled, &sys, &params);
        let dt_parallel = time_eval(&mut parallel, &sys, &params);

        println!(
            "N = {n:5}, direct = {dt_direct:8.6} s, tiled = {dt_tiled:8.6} s, parallel = {dt_parallel:8.6} s"
        );
    }
}

/// Benchmark all three backends for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_nonbonded_curve() {
    println!("N,direct_ms,tiled_ms,parallel_ms");

    // Steps of 200 to give a smoother graph
    for n in (200..=6400).step_by(200) {
        let sys = make_system(n);
        let params = make_params();

        let mut direct = DirectNonbonded;
        let mut tiled = TiledNonbonded::new(1);
        let mut parallel = ParallelTiledNonbonded::new(1);

        let ms_direct = time_eval(&mut direct, &sys, &params) * 1000.0;
        let ms_tiled = time_eval(&mut tiled, &sys, &params) * 1000.0;
        let ms_parallel = time_eval(&mut parallel, &sys, &params) * 1000.0;

        println!("{n},{ms_direct:.6},{ms_tiled:.6},{ms_parallel:.6}");
    }
}
