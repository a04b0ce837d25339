//! Run command implementation.

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use spinchain_render::{GifEncoder, PngSequenceEncoder, render_animation};
use spinchain_sim::{EvolutionDriver, ObservableMode, SimulationParameters, Trajectory};

use super::common::RunArgs;
use crate::config::Config;

/// JSON export layout.
#[derive(Serialize)]
struct TrajectoryExport<'a> {
    parameters: &'a SimulationParameters,
    initial_state: String,
    observable: ObservableMode,
    trajectory: &'a Trajectory,
}

/// Execute the run command.
pub fn execute(config: Config, args: &RunArgs) -> Result<()> {
    let config = args.apply(config)?;
    let params = config.simulation_parameters()?;
    let initial_state = config.initial_state()?;

    println!(
        "{} Simulating {}-site TFIM (J = {}, h = {}) for {} steps of dt = {:.4}",
        style("→").cyan().bold(),
        style(params.num_qubits).green(),
        params.coupling,
        params.field,
        params.n_steps,
        params.dt
    );

    let driver = EvolutionDriver::new(params.clone())?
        .with_initial_state(initial_state.clone())?
        .with_observable(config.observable)?;
    let step = driver.step();
    println!(
        "  Slice: {} gates ({} cx), depth {}, {} order, start {}",
        step.gate_count(),
        step.cx_count(),
        step.circuit().depth(),
        step.order(),
        style(&initial_state).yellow()
    );

    // Evolve
    let progress = ProgressBar::new(params.n_steps as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} steps {msg}")?
            .progress_chars("=> "),
    );
    let trajectory = driver.run_with(|snapshot| {
        progress.set_message(format!("t = {:.2}", snapshot.time));
        progress.inc(1);
    })?;
    progress.finish_and_clear();
    info!(snapshots = trajectory.len(), "evolution complete");

    // Render
    let mut render = config.render.clone();
    render.total_time.get_or_insert(params.total_time());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Encoding {} frames...", trajectory.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let summary = render_animation(
        &trajectory,
        &render,
        &GifEncoder::default(),
        &config.output.path,
    )
    .with_context(|| format!("failed to write {}", config.output.path))?;

    let frames_summary = match &config.output.frames_dir {
        Some(dir) => {
            spinner.set_message(format!("Writing PNG frames to {dir}..."));
            Some(
                render_animation(&trajectory, &render, &PngSequenceEncoder, dir)
                    .with_context(|| format!("failed to write frames to {dir}"))?,
            )
        }
        None => None,
    };
    spinner.finish_and_clear();

    if let Some(path) = &config.output.export {
        let export = TrajectoryExport {
            parameters: &params,
            initial_state: initial_state.to_string(),
            observable: config.observable,
            trajectory: &trajectory,
        };
        let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &export)?;
        println!("  Trajectory: {}", style(path).green());
    }

    println!(
        "{} Wrote {} frames to {}",
        style("✓").green().bold(),
        summary.frames,
        style(summary.path.display()).green()
    );
    if let Some(frames) = frames_summary {
        println!(
            "  PNG frames: {} in {}",
            frames.frames,
            style(frames.path.display()).green()
        );
    }
    if let Some(last) = trajectory.snapshots().last() {
        let values: Vec<String> = last
            .magnetization
            .iter()
            .map(|z| format!("{z:+.3}"))
            .collect();
        println!("  Final ⟨Z⟩: [{}]", values.join(", "));
    }

    Ok(())
}
