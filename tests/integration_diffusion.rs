//! Integration tests: physics module + solver module
//!
//! These tests run the reference hot-disc experiment through every entry
//! point and check the physical invariants of the explicit scheme.

use approx::assert_relative_eq;
use heat2d_rs::DiffusionError;
use heat2d_rs::physics::{
    DomainSpec,
    FieldInitializer,
    PhysicalParameters,
    set_initial_condition,
    stability_limit,
};
use heat2d_rs::settings::SimulationSettings;
use heat2d_rs::solver::{
    EulerSolver,
    SnapshotSchedule,
    Solver,
    SolverConfiguration,
    step,
};

mod common;
use common::{hot_neighbours_of_cold_cells, reference_scenario};

// =================================================================================================
// Setup Stages
// =================================================================================================

#[test]
fn test_domain_cell_counts() {
    let domain = DomainSpec::new(2.0, 4.0, 0.1, 0.1).unwrap();

    assert_eq!(domain.nx(), 20);
    assert_eq!(domain.ny(), 40);
    assert_eq!(domain, DomainSpec::new(2.0, 4.0, 0.1, 0.1).unwrap());
}

#[test]
fn test_reference_time_step() {
    let domain = DomainSpec::new(2.0, 4.0, 0.1, 0.1).unwrap();
    let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0).unwrap();

    assert_relative_eq!(params.dt(), 0.000625, epsilon = 1e-15);
}

#[test]
fn test_time_step_scaling() {
    let base = stability_limit(0.1, 0.1, 4.0);

    assert_relative_eq!(stability_limit(0.1, 0.1, 8.0), base / 2.0, max_relative = 1e-12);
    assert!(stability_limit(0.2, 0.1, 4.0) > base);
}

#[test]
fn test_reference_initial_condition() {
    let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1).unwrap();
    let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0).unwrap();
    let u = set_initial_condition(&domain, &params);

    assert_eq!(u.shape(), (100, 100));
    assert_eq!(u[(0, 0)], 300.0);
    assert_eq!(u[(50, 50)], 700.0);
    assert!(u.as_array().iter().all(|&v| v == 300.0 || v == 700.0));

    let untyped = FieldInitializer::default()
        .from_grid(100, 100, 0.1, 0.1, 300.0, 700.0)
        .unwrap();
    assert_eq!(u, untyped);
}

// =================================================================================================
// Stepping
// =================================================================================================

#[test]
fn test_one_step_warms_cells_next_to_the_disc() {
    let scenario = reference_scenario();
    let initial = scenario.initial();
    let rim = hot_neighbours_of_cold_cells(initial, 300.0, 700.0);
    assert!(!rim.is_empty());

    let after = scenario.evolve().next().unwrap();

    assert_eq!(after.boundary_values(), initial.boundary_values());
    for (i, j) in rim {
        assert!(after[(i, j)] > 300.0, "cell ({}, {}) did not warm up", i, j);
    }
}

#[test]
fn test_maximum_principle() {
    let scenario = reference_scenario();
    let config = SolverConfiguration::time_evolution(100).with_schedule(SnapshotSchedule::Every(10));
    let result = EulerSolver::new().solve(&scenario, &config).unwrap();

    for (step, _, field) in result.iter() {
        assert!(field.min() >= 300.0 - 1e-9, "undershoot at step {}", step);
        assert!(field.max() <= 700.0 + 1e-9, "overshoot at step {}", step);
    }
    assert!(result.final_field.max() < 700.0);
}

#[test]
fn test_heat_is_conserved_away_from_the_boundary() {
    // After 100 steps the diffusion length is ~1, the disc is 3 from the plate edge
    let scenario = reference_scenario();
    let config = SolverConfiguration::time_evolution(100).with_schedule(SnapshotSchedule::FinalOnly);
    let result = EulerSolver::new().solve(&scenario, &config).unwrap();

    let excess = |sum: f64| sum - 300.0 * scenario.initial().len() as f64;
    let before = excess(scenario.initial().sum());
    let after = excess(result.final_field.sum());

    assert_relative_eq!(after, before, max_relative = 1e-3);
}

#[test]
fn test_all_entry_points_agree() {
    let scenario = reference_scenario();
    let params = *scenario.parameters();

    let config = SolverConfiguration::time_evolution(100)
        .with_schedule(SnapshotSchedule::At(vec![0, 10, 50, 100]));
    let result = EulerSolver::new().solve(&scenario, &config).unwrap();

    let evolved: Vec<_> = scenario.evolve().take(100).collect();
    assert_eq!(result.snapshot_at(0), Some(scenario.initial()));
    assert_eq!(result.snapshot_at(10), Some(&evolved[9]));
    assert_eq!(result.snapshot_at(50), Some(&evolved[49]));
    assert_eq!(result.snapshot_at(100), Some(&evolved[99]));

    let mut raw = scenario.initial().clone();
    step(&mut raw, params.dt(), params.dx(), params.dy(), params.d(), 100).unwrap();
    assert_eq!(raw, result.final_field);
}

#[test]
fn test_untyped_pipeline_matches_typed() {
    let params = PhysicalParameters::from_spacing(0.1, 0.1, 4.0, 300.0, 700.0).unwrap();
    let mut field = FieldInitializer::default()
        .from_grid(100, 100, 0.1, 0.1, 300.0, 700.0)
        .unwrap();
    step(&mut field, params.dt(), 0.1, 0.1, 4.0, 10).unwrap();

    let typed = reference_scenario().evolve().nth(9).unwrap();
    assert_eq!(field, typed);
}

#[test]
fn test_smaller_time_step_diffuses_less() {
    let scenario = reference_scenario();
    let dt = scenario.parameters().dt();
    let slow = scenario.clone().with_time_step(dt / 2.0).unwrap();

    let fast_peak = scenario.evolve().nth(19).unwrap().max();
    let slow_peak = slow.evolve().nth(19).unwrap().max();

    assert!(slow_peak > fast_peak);
}

#[test]
fn test_unstable_raw_step_rejected() {
    let scenario = reference_scenario();
    let mut field = scenario.initial().clone();
    let limit = scenario.parameters().dt();

    let err = step(&mut field, 2.0 * limit, 0.1, 0.1, 4.0, 1).unwrap_err();

    assert!(matches!(err, DiffusionError::UnstableTimestep { .. }));
    assert_eq!(&field, scenario.initial());
}

// =================================================================================================
// Parallel Execution
// =================================================================================================

#[cfg(feature = "parallel")]
#[test]
fn test_serial_and_parallel_runs_identical() {
    use heat2d_rs::solver::{parallel_threshold, set_parallel_threshold};

    let scenario = reference_scenario();
    let config = SolverConfiguration::time_evolution(30).with_schedule(SnapshotSchedule::Every(10));
    let previous = parallel_threshold();

    set_parallel_threshold(usize::MAX);
    let serial = EulerSolver::new().solve(&scenario, &config).unwrap();

    set_parallel_threshold(1);
    let parallel = EulerSolver::new().solve(&scenario, &config).unwrap();

    set_parallel_threshold(previous);

    assert_eq!(serial.snapshots, parallel.snapshots);
    assert_eq!(serial.final_field, parallel.final_field);
}

// =================================================================================================
// Settings
// =================================================================================================

#[test]
fn test_default_settings_run() {
    let (scenario, config) = SimulationSettings::default().build().unwrap();
    let result = EulerSolver::new().solve(&scenario, &config).unwrap();

    assert_eq!(result.steps, vec![0, 10, 50, 100]);
    assert_eq!(result.final_field.shape(), (100, 100));
    assert_eq!(result.metadata.get("time steps").map(String::as_str), Some("100"));
    assert_relative_eq!(result.time_points[3], 100.0 * 0.000625, max_relative = 1e-12);
}
