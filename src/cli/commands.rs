use crate::batch::BatchRunner;
use crate::config::BatchConfig;
use crate::error::{ReceiptError, ReceiptResult};
use crate::excel::DuesLoader;
use crate::receipt::format_amount;
use crate::types::DuesRecord;
use colored::Colorize;
use std::path::PathBuf;

/// One-line summary of a record for terminal output
fn record_summary(record: &DuesRecord) -> String {
    format!(
        "House {:<8} {:<28} due ₦{:>12}  paid ₦{:>12}  outstanding ₦{:>12}",
        record.house,
        record.landlord,
        format_amount(record.total_bill_due),
        format_amount(record.total_paid),
        format_amount(record.total_outstanding),
    )
}

/// Execute the generate command
pub fn generate(input: PathBuf, config: BatchConfig, verbose: bool) -> ReceiptResult<()> {
    println!("{}", "🧾 Receipts - Generating batch".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Sheet:  {}", config.sheet_name);
    println!("   Format: {}\n", config.format);

    if !input.exists() {
        return Err(ReceiptError::Input(format!(
            "input file not found: {}",
            input.display()
        )));
    }

    let runner = BatchRunner::new(config);
    let summary = runner.run(&input)?;

    if verbose {
        for receipt in &summary.receipts {
            println!("   📄 {}", receipt.display());
        }
        println!();
    }

    println!("{}", "✅ Batch Complete!".bold().green());
    println!("   Batch:    {}", summary.id.to_string().bright_blue());
    println!("   Receipts: {}", summary.receipt_count());
    println!("   Archive:  {}\n", summary.archive.display());

    Ok(())
}

/// Execute the check command: load the sheet and report what would be rendered
pub fn check(input: PathBuf, sheet_name: String, json: bool) -> ReceiptResult<()> {
    let records = DuesLoader::new(&input).load(&sheet_name)?;

    if json {
        let out = serde_json::to_string_pretty(&records)
            .map_err(|e| ReceiptError::Io(std::io::Error::other(e)))?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", "🧾 Receipts - Checking spreadsheet".bold().green());
    println!("   File:  {}", input.display());
    println!("   Sheet: {}\n", sheet_name);

    for record in &records {
        println!("   {}", record_summary(record));
    }
    if records.is_empty() {
        println!("{}", "   ⚠️  No households found".yellow());
    }

    println!();
    println!(
        "{} {} household(s) ready for receipts",
        "✅".green(),
        records.len().to_string().bold()
    );
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
