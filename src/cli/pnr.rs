use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};

use daftar::error::Result;
use daftar::pnr::{process_reservation, StatusLabel};

use super::{invalid, read_json, Output};

fn colored_label(label: StatusLabel) -> ColoredString {
    match label {
        StatusLabel::Confirmed => label.as_str().green().bold(),
        StatusLabel::Waiting => label.as_str().yellow().bold(),
        StatusLabel::Rac => label.as_str().cyan().bold(),
        StatusLabel::Cancelled => label.as_str().red(),
    }
}

pub fn run(file: &str, out: Output) -> Result<()> {
    let value = read_json(file)?;
    let report = process_reservation(&value).ok_or_else(|| invalid("PNR record"))?;

    if out.json {
        return out.print_json(&report);
    }

    println!("PNR {}", report.pnr_formatted.bold());
    println!("{}", report.train_info);

    let mut table = Table::new();
    table.set_header(vec!["Passenger", "Booking", "Current", "Status"]);
    for p in &report.passengers {
        table.add_row(vec![
            Cell::new(&p.formatted_name),
            Cell::new(&p.booking_status),
            Cell::new(&p.current_status),
            Cell::new(colored_label(p.status_label)),
        ]);
    }
    println!("{table}");

    let s = &report.summary;
    println!(
        "{} passengers: {} confirmed, {} waiting, {} RAC, {} cancelled",
        s.total_passengers, s.confirmed, s.waiting, s.rac, s.cancelled
    );
    if report.chart_prepared {
        println!("{}", "Chart prepared".green());
    } else {
        println!("{}", "Chart not prepared".yellow());
    }
    Ok(())
}
