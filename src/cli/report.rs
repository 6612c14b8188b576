use colored::Colorize;
use comfy_table::{Cell, Table};

use daftar::error::Result;
use daftar::fmt::number;
use daftar::report::{generate_report, Grade, PASS_MARK};

use super::{invalid, read_json, Output};

pub fn run(file: &str, out: Output) -> Result<()> {
    let value = read_json(file)?;
    let card = generate_report(&value).ok_or_else(|| invalid("student record"))?;

    if out.json {
        return out.print_json(&card);
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Marks", "Result"]);
    if let Some(marks) = value.get("marks").and_then(|m| m.as_object()) {
        for (subject, score) in marks {
            let score = score.as_f64().unwrap_or_default();
            let result = if score >= PASS_MARK {
                "PASS".green()
            } else {
                "FAIL".red().bold()
            };
            let mut name = subject.clone();
            if *subject == card.highest_subject {
                name.push_str(" \u{2191}");
            } else if *subject == card.lowest_subject {
                name.push_str(" \u{2193}");
            }
            table.add_row(vec![Cell::new(name), Cell::new(number(score)), Cell::new(result)]);
        }
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(number(card.total_marks)),
        Cell::new(""),
    ]);

    let grade = match card.grade {
        Grade::APlus | Grade::A => card.grade.as_str().green().bold(),
        Grade::F => card.grade.as_str().red().bold(),
        _ => card.grade.as_str().normal(),
    };
    println!("Report Card: {}\n{table}", card.name);
    println!(
        "Percentage: {}%   Grade: {grade}   Passed {}/{}",
        number(card.percentage),
        card.passed_subjects.len(),
        card.subject_count
    );
    Ok(())
}
