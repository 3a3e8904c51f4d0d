//! Labels command implementation.

use crate::display::print_labels;
use anyhow::Result;
use chrono::NaiveDate;
use sessionbars_lib::{ExchangeCalendar, SessionType};

/// Show the session window and its ordered minute labels.
pub(crate) fn labels(
    calendar: &ExchangeCalendar,
    date: NaiveDate,
    session: SessionType,
    summary: bool,
) -> Result<()> {
    let window = calendar.resolve(date, session)?;

    println!("Exchange: {} ({})", calendar.name(), calendar.timezone());
    println!("Window:   {window}");
    println!("Labels:   {}", window.len());

    if !summary {
        println!();
        print_labels(&window);
    }

    Ok(())
}
