use colored::Colorize;
use comfy_table::{Cell, Table};

use daftar::error::Result;
use daftar::message::{parse_message, Sentiment};

use super::{invalid, Output};

pub fn run(line: &str, out: Output) -> Result<()> {
    let msg = parse_message(line).ok_or_else(|| invalid("chat line"))?;

    if out.json {
        return out.print_json(&msg);
    }

    let sentiment = match msg.sentiment {
        Sentiment::Funny => msg.sentiment.as_str().yellow().bold(),
        Sentiment::Love => msg.sentiment.as_str().magenta().bold(),
        Sentiment::Neutral => msg.sentiment.as_str().normal(),
    };
    let when = msg
        .timestamp()
        .map(|ts| ts.format("%a %d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| format!("{} {}", msg.date, msg.time));

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec![Cell::new("When"), Cell::new(when)]);
    table.add_row(vec![Cell::new("Sender"), Cell::new(&msg.sender)]);
    table.add_row(vec![Cell::new("Text"), Cell::new(&msg.text)]);
    table.add_row(vec![Cell::new("Words"), Cell::new(msg.word_count)]);
    table.add_row(vec![Cell::new("Sentiment"), Cell::new(sentiment)]);
    println!("Message\n{table}");
    Ok(())
}
