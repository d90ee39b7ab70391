//! Helper functions for integration tests

use std::f64::consts::PI;

use heat2d_rs::physics::{DomainSpec, PhysicalParameters, TemperatureField};
use heat2d_rs::solver::Scenario;

/// The 10 x 10 plate at `dx = dy = 0.1`, `D = 4`, 300 K with a 700 K disc
pub fn reference_scenario() -> Scenario {
    let domain = DomainSpec::new(10.0, 10.0, 0.1, 0.1).unwrap();
    let params = PhysicalParameters::new(&domain, 4.0, 300.0, 700.0).unwrap();
    Scenario::hot_disc(domain, params).unwrap()
}

/// Unit square with `n` x `n` nodes seeded with the first sine mode
///
/// The mode `sin(πx)·sin(πy)` vanishes on the boundary and is an eigenvector
/// of the discrete Laplacian, so each step multiplies it by a known factor.
pub fn sine_mode_scenario(n: usize, d: f64) -> Scenario {
    let dx = 1.0 / (n - 1) as f64;
    // Half a cell of slack keeps floor(w / dx) at exactly n
    let w = (n as f64 + 0.5) * dx;

    let domain = DomainSpec::new(w, w, dx, dx).unwrap();
    assert_eq!(domain.shape(), (n, n));

    let params = PhysicalParameters::new(&domain, d, 0.0, 1.0).unwrap();
    let initial = TemperatureField::from_fn(n, n, |(i, j)| {
        (PI * i as f64 * dx).sin() * (PI * j as f64 * dx).sin()
    });

    Scenario::new(domain, params, initial).unwrap()
}

/// Largest cell-wise absolute difference
pub fn max_abs_difference(a: &TemperatureField, b: &TemperatureField) -> f64 {
    assert_eq!(a.shape(), b.shape(), "Dimension mismatch");
    a.as_array()
        .iter()
        .zip(b.as_array().iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Assert that two fields are close (within tolerance)
pub fn assert_fields_close(a: &TemperatureField, b: &TemperatureField, tolerance: f64, message: &str) {
    let diff = max_abs_difference(a, b);
    assert!(
        diff < tolerance,
        "{}: fields differ by {} (tolerance {})",
        message,
        diff,
        tolerance
    );
}

/// Interior cells at `t_cold` with at least one 4-neighbour at `t_hot`
pub fn hot_neighbours_of_cold_cells(
    field: &TemperatureField,
    t_cold: f64,
    t_hot: f64,
) -> Vec<(usize, usize)> {
    let (nx, ny) = field.shape();
    let mut cells = Vec::new();
    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            if field[(i, j)] != t_cold {
                continue;
            }
            let touches_hot = [(i - 1, j), (i + 1, j), (i, j - 1), (i, j + 1)]
                .iter()
                .any(|&cell| field[cell] == t_hot);
            if touches_hot {
                cells.push((i, j));
            }
        }
    }
    cells
}
