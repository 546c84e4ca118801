//! Run the reference codeword search and print the results.
//!
//! The library emits semantic values only; all rendering lives here.
//!
//! Run with: cargo run -p codeset-core --example find_codewords

use codeset_core::config::SearchConfig;
use codeset_core::distance::DistanceMatrix;
use codeset_core::search;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = SearchConfig::default();
    let report = match search::run(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("search failed: {err}");
            std::process::exit(1);
        }
    };

    println!("== Filter stages ==");
    for stage in &report.diagnostics {
        println!(
            "  {:<18} {:>6} entered  {:>6} accepted",
            stage.name, stage.entered, stage.accepted
        );
    }

    println!("\n== Candidates ({}) ==", report.candidates.len());
    if report.candidates.len() <= 48 {
        for seq in report.candidates.iter() {
            println!("  {seq}");
        }
    }

    if let Some(min) = report.min_distance {
        println!("\nMinimum pairwise distance among candidates: {min}");
    }

    // Worst pairs, the diagnostic the link designer actually reads.
    let matrix = DistanceMatrix::build(&report.candidates);
    let mut pairs: Vec<_> = matrix.pairs().collect();
    pairs.sort_by_key(|&(_, _, d)| d);
    println!("\n== Closest pairs ==");
    for &(i, j, d) in pairs.iter().take(10) {
        let a = &report.candidates.as_slice()[i];
        let b = &report.candidates.as_slice()[j];
        println!("  {a}, {b} : {d}");
    }

    match report.assignment {
        Some(table) => {
            println!("\n== Codeword table ==");
            for (symbol, codeword) in table.iter() {
                println!("  symbol {symbol:2} -> {codeword}");
            }
        }
        None => {
            if let Some(shortfall) = report.outcome.shortfall() {
                println!("\nNo complete table: {shortfall}.");
                println!("Selected so far:");
                for (index, seq) in report.outcome.selected().iter() {
                    println!("  candidate {index:3} -> {seq}");
                }
            }
        }
    }
}
