//! Control-surface listing command.

use clap::Args;
use vokomp_chain::KNOBS;

#[derive(Args)]
pub struct KnobsArgs {}

pub fn run(_args: KnobsArgs) -> anyhow::Result<()> {
    println!("Available Knobs\n");
    println!(
        "  {:<14} {:>8} {:>8} {:>8} {:>6}",
        "Name", "Min", "Max", "Default", "Unit"
    );
    for knob in &KNOBS {
        println!(
            "  {:<14} {:>8} {:>8} {:>8} {:>6}",
            knob.name, knob.min, knob.max, knob.default, knob.unit
        );
    }
    Ok(())
}
