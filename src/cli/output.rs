//! User-facing output for the CLI.
//!
//! Field dumps are colorized when stdout is a terminal; URLs and JSON are
//! printed plain so they can be piped.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::permalink::Permalink;

/// Print one `label: value` line per field.
pub fn print_permalink(permalink: &Permalink) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_permalink(&mut stdout, permalink)
}

pub fn write_permalink(out: &mut impl WriteColor, permalink: &Permalink) -> io::Result<()> {
    if let Some(source) = &permalink.source {
        write_field(out, "href", &source.href)?;
    }
    write_field(out, "country", &permalink.country)?;
    write_field(out, "lang", &permalink.language)?;
    write_field(out, "contentType", &permalink.content_type)?;
    if let Some(title) = &permalink.title {
        write_field(out, "title", title)?;
    }
    write_field(out, "id", &permalink.id)?;
    if let Some(data) = &permalink.data {
        write_field(out, "data", data)?;
    }
    Ok(())
}

fn write_field(out: &mut impl WriteColor, label: &str, value: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(out, "{label:>12}")?;
    out.reset()?;
    writeln!(out, ": {value}")
}

pub fn print_json(permalink: &Permalink) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(permalink)?;
    println!("{json}");
    Ok(())
}

pub fn print_line(text: &str) {
    println!("{text}");
}
