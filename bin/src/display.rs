//! Display utilities for the sessionbars CLI.

use sessionbars_lib::{LoadReport, MinuteLabel, SessionBars, SessionWindow, Symbol, SymbolOutcome};

/// Prints the per-symbol table of a load.
pub(crate) fn print_report(report: &LoadReport) {
    println!("Scope:   {}", report.scope);
    println!("Session: {} ({} labels)", report.window, report.window.len());
    println!();
    println!(
        "{:<10} {:>6} {:>9} {:>6} {:>8}  STATUS",
        "SYMBOL", "BARS", "TRADES", "PAGES", "ATTEMPTS"
    );
    println!("{}", "-".repeat(60));

    for (symbol, outcome) in &report.outcomes {
        match outcome {
            SymbolOutcome::Loaded(load) => {
                let mut status = String::from("ok");
                if load.truncated {
                    status = String::from("TRUNCATED");
                }
                if load.write_failures > 0 {
                    status.push_str(&format!(", {} writes failed", load.write_failures));
                }
                println!(
                    "{:<10} {:>6} {:>9} {:>6} {:>8}  {}",
                    symbol.as_str(),
                    load.bars_written,
                    load.trades,
                    load.pages,
                    load.attempts,
                    status
                );
            }
            SymbolOutcome::Failed { error, attempts } => {
                println!(
                    "{:<10} {:>6} {:>9} {:>6} {:>8}  FAILED: {}",
                    symbol.as_str(),
                    "-",
                    "-",
                    "-",
                    attempts,
                    error
                );
            }
        }
    }

    println!("{}", "-".repeat(60));
    println!("Total bars written: {}", report.total_bars());

    let truncated: Vec<_> = report.truncated().map(Symbol::as_str).collect();
    if !truncated.is_empty() {
        println!(
            "\nTruncated: {} (raise --max-pages and reload; volume is understated)",
            truncated.join(", ")
        );
    }
}

/// Prints labels ten per row.
pub(crate) fn print_labels(window: &SessionWindow) {
    for row in window.labels().chunks(10) {
        let row: Vec<String> = row.iter().map(MinuteLabel::to_string).collect();
        println!("{}", row.join(" "));
    }
}

/// Prints one row of a coverage table.
pub(crate) fn print_coverage_row(symbol: &Symbol, session: &SessionBars) {
    let first = session.bars.first().map(|b| b.label.to_string());
    let last = session.bars.last().map(|b| b.label.to_string());
    println!(
        "{:<10} {:>5}/{:<5} {:>7.1}%  {} - {}",
        symbol.as_str(),
        session.found(),
        session.expected,
        session.completeness() * 100.0,
        first.as_deref().unwrap_or("--:--"),
        last.as_deref().unwrap_or("--:--"),
    );
}
