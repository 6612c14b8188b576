use colored::Colorize;
use comfy_table::{Cell, Table};

use daftar::error::{DaftarError, Result};
use daftar::form::validate_form;

use super::{read_json, Output};

pub fn run(file: &str, out: Output) -> Result<()> {
    let value = read_json(file)?;
    let result = validate_form(&value);

    if out.json {
        out.print_json(&result)?;
    } else if result.is_valid {
        println!("{}", "Form is valid".green().bold());
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Field", "Error"]);
        for (field, message) in &result.errors {
            table.add_row(vec![Cell::new(field.key()), Cell::new(message.red())]);
        }
        println!("Form Errors\n{table}");
    }

    if result.is_valid {
        Ok(())
    } else {
        Err(DaftarError::Other(format!(
            "{} invalid field(s)",
            result.errors.len()
        )))
    }
}
