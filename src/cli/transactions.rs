use colored::Colorize;
use comfy_table::{Cell, Table};
use serde_json::Value;

use daftar::error::Result;
use daftar::fmt::rupees;
use daftar::transactions::{analyze_transactions, read_csv};

use super::{invalid, read_input, read_json, Output};

pub fn run(file: &str, csv: bool, out: Output) -> Result<()> {
    let value = if csv {
        Value::Array(read_csv(read_input(file)?.as_bytes())?)
    } else {
        read_json(file)?
    };
    let summary = analyze_transactions(&value).ok_or_else(|| invalid("transaction log"))?;

    if out.json {
        return out.print_json(&summary);
    }

    let mut table = Table::new();
    table.set_header(vec!["Summary", "Amount"]);
    table.add_row(vec![
        Cell::new("Credit".green().bold()),
        Cell::new(rupees(summary.total_credit)),
    ]);
    table.add_row(vec![
        Cell::new("Debit".red().bold()),
        Cell::new(rupees(summary.total_debit)),
    ]);
    let net_label = if summary.net_balance >= 0.0 {
        "Net".green().bold()
    } else {
        "Net".red().bold()
    };
    table.add_row(vec![Cell::new(net_label), Cell::new(rupees(summary.net_balance))]);
    table.add_row(vec![
        Cell::new("Average"),
        Cell::new(rupees(summary.avg_transaction as f64)),
    ]);
    println!(
        "UPI Summary ({} transactions)\n{table}",
        summary.transaction_count
    );

    let mut ctable = Table::new();
    ctable.set_header(vec!["Category", "Amount"]);
    for (category, total) in &summary.category_breakdown {
        ctable.add_row(vec![Cell::new(category), Cell::new(rupees(*total))]);
    }
    println!("\nBy Category\n{ctable}");

    let highest_id = summary
        .highest_transaction
        .get("id")
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .unwrap_or_default();
    println!();
    println!("Most frequent contact:  {}", summary.frequent_contact);
    println!("Highest transaction:    {highest_id}");
    if summary.has_large_transaction {
        println!("{}", "Contains a transaction of \u{20b9}5,000 or more".yellow());
    }
    if summary.all_above100 {
        println!("Every transaction is above \u{20b9}100");
    }
    Ok(())
}
