//! Slice command implementation.

use anyhow::Result;
use console::style;

use spinchain_sim::TrotterStep;

use super::common::SliceArgs;
use crate::config::Config;

/// Execute the slice command.
pub fn execute(config: Config, args: &SliceArgs) -> Result<()> {
    let config = args.apply(config)?;
    let params = config.simulation_parameters()?;
    let step = TrotterStep::build(&params)?;

    if args.json {
        let instructions: Vec<_> = step.circuit().instructions().collect();
        println!("{}", serde_json::to_string_pretty(&instructions)?);
        return Ok(());
    }

    println!(
        "{} H = {}",
        style("→").cyan().bold(),
        params.hamiltonian()
    );
    println!(
        "  {} order slice, dt = {:.4}: {} gates ({} cx), depth {}",
        step.order(),
        step.dt(),
        step.gate_count(),
        step.cx_count(),
        step.circuit().depth()
    );
    println!();
    for (i, instruction) in step.circuit().instructions().enumerate() {
        let line = instruction.to_string();
        if instruction.is_barrier() {
            println!("  {:>3}  {}", i, style(line).dim());
        } else {
            println!("  {:>3}  {}", i, line);
        }
    }

    Ok(())
}
