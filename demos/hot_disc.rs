//! Hot disc cooling in a cold plate
//!
//! ∂u/∂t = D·(∂²u/∂x² + ∂²u/∂y²)
//!
//! Runs the reference experiment (10 x 10 plate, D = 4, 300 K background,
//! 700 K disc of radius 2) and renders the snapshots at steps 0, 10, 50 and
//! 100 as heatmaps, plus the temperature profile through the disc centre.
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --example hot_disc [output_dir]
//! ```

use heat2d_rs::prelude::*;
use plotters::prelude::*;
use std::error::Error;
use std::path::PathBuf;

/// Blue (cold) to red (hot)
fn heat_colour(value: f64, t_cold: f64, t_hot: f64) -> HSLColor {
    let t = ((value - t_cold) / (t_hot - t_cold)).clamp(0.0, 1.0);
    HSLColor(2.0 / 3.0 * (1.0 - t), 0.9, 0.5)
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    field: &TemperatureField,
    domain: &DomainSpec,
    params: &PhysicalParameters,
    caption: &str,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let (nx, ny) = field.shape();
    let (dx, dy) = (domain.dx(), domain.dy());

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24.0).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..nx as f64 * dx, 0.0..ny as f64 * dy)?;

    chart.configure_mesh().disable_mesh().x_desc("x").y_desc("y").draw()?;

    chart.draw_series(field.as_array().indexed_iter().map(|((i, j), &v)| {
        let x = i as f64 * dx;
        let y = j as f64 * dy;
        Rectangle::new(
            [(x, y), (x + dx, y + dy)],
            heat_colour(v, params.t_cold(), params.t_hot()).filled(),
        )
    }))?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("heat2d"));
    std::fs::create_dir_all(&output_dir)?;

    println!("=== Hot disc in a cold plate ===\n");

    let settings = SimulationSettings::default();
    let (scenario, config) = settings.build()?;
    let domain = *scenario.domain();
    let params = *scenario.parameters();

    println!("Grid: {} x {} cells (dx = {}, dy = {})", domain.nx(), domain.ny(), domain.dx(), domain.dy());
    println!("D = {}, dt = {:e}", params.d(), params.dt());
    println!("T_cold = {} K, T_hot = {} K", params.t_cold(), params.t_hot());
    println!("Steps: {}, snapshots: {:?}\n", config.time_steps, config.schedule);

    let start = std::time::Instant::now();
    let result = EulerSolver::new().solve(&scenario, &config)?;
    println!("✓ Completed in {:.3}s\n", start.elapsed().as_secs_f64());

    for (step, time, field) in result.iter() {
        println!(
            "step {:>3}  t = {:.5}  min = {:.2}  max = {:.2}  mean = {:.3}",
            step,
            time,
            field.min(),
            field.max(),
            field.mean().unwrap_or(f64::NAN)
        );
    }

    // ====== Heatmaps ======

    let heatmap_path = output_dir.join("hot_disc_snapshots.png");
    let root = BitMapBackend::new(&heatmap_path, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, (step, time, field)) in root.split_evenly((2, 2)).iter().zip(result.iter()) {
        let caption = format!("step {} (t = {:.4})", step, time);
        draw_heatmap(area, field, &domain, &params, &caption)?;
    }
    root.present()?;
    println!("\nHeatmaps written to {}", heatmap_path.display());

    // ====== Profile through the disc centre ======

    let profile_path = output_dir.join("hot_disc_profile.png");
    let root = BitMapBackend::new(&profile_path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let centre_row = domain.nx() / 2;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Temperature along x = {}", domain.x(centre_row)), ("sans-serif", 30.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..domain.h(), params.t_cold() - 20.0..params.t_hot() + 20.0)?;

    chart.configure_mesh().x_desc("y").y_desc("T (K)").draw()?;

    for (index, (step, _, field)) in result.iter().enumerate() {
        let colour = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(
                field.row(centre_row).into_iter().enumerate().map(|(j, v)| (domain.y(j), v)),
                colour.stroke_width(2),
            ))?
            .label(format!("step {}", step))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    println!("Profile written to {}", profile_path.display());

    Ok(())
}
