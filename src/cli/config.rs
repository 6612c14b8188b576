use daftar::error::Result;
use daftar::settings::{load_settings, save_settings, settings_path, OutputFormat};

use super::FormatArg;

pub fn run(format: Option<FormatArg>, color: Option<bool>) -> Result<()> {
    let mut settings = load_settings();
    let changed = format.is_some() || color.is_some();
    if let Some(f) = format {
        settings.output_format = f.into();
    }
    if let Some(c) = color {
        settings.color = c;
    }
    if changed {
        save_settings(&settings)?;
        println!("Saved {}", settings_path().display());
    }

    let format = match settings.output_format {
        OutputFormat::Table => "table",
        OutputFormat::Json => "json",
    };
    println!("Settings:  {}", settings_path().display());
    println!("Format:    {format}");
    println!("Color:     {}", settings.color);
    Ok(())
}
