//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - transverse-field Ising dynamics, Trotterised and animated",
        style("spinchain").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  spinchain-ir           Circuit intermediate representation");
    println!("  spinchain-adapter-sim  Statevector engine");
    println!("  spinchain-sim          Hamiltonian, Trotter synthesis and evolution");
    println!("  spinchain-render       Frame rendering and GIF encoding");
    println!("  spinchain-cli          Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
