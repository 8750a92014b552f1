use compdb_core::link::LinkOutcome;
use compdb_core::runner::RunSummary;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_summary(summary: &RunSummary) {
    let noun = if summary.commands == 1 {
        "compile command"
    } else {
        "compile commands"
    };
    println!(
        "Wrote {} {noun} to {}",
        summary.commands,
        summary.database.display()
    );
    if summary.external == LinkOutcome::Created {
        println!(
            "Linked {}",
            compdb_core::paths::external_link_path(&summary.workspace).display()
        );
    }
}
