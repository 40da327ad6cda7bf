//! List strategies command.

use anyhow::Result;
use trading_strategies::StrategyRegistry;

use crate::cli::OutputFormat;

pub async fn run(output: OutputFormat) -> Result<()> {
    let registry = StrategyRegistry::builtin()?;
    let infos = registry.info();

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in infos {
        println!("  {} ({}, min {} bars)", info.name, info.timeframe, info.min_bars);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        for param in &info.parameters {
            let range = match (&param.min, &param.max) {
                (Some(min), Some(max)) => format!(" [{}..{}]", min, max),
                _ => String::new(),
            };
            println!(
                "    {:<14} default {}{}  {}",
                param.name, param.default, range, param.description
            );
        }
        println!();
    }

    println!("Use --strategy <name> with the signal command to evaluate one.");

    Ok(())
}
