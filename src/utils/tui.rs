//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use super::bench::format_micros;
use super::cpu_affinity::online_cores;
use super::cycles::cycles_available;
use super::runner::{ExperimentConfig, ExperimentReport, SizeOutcome};
use super::timer::PinStrategy;
use crate::registry::{AlgorithmRegistry, AlgorithmRunner};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

fn pin_label(strategy: PinStrategy) -> &'static str {
    match strategy {
        PinStrategy::Off => "off",
        PinStrategy::Global => "global",
        PinStrategy::PerRepetition => "per-repetition",
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80); // Cap header at 80
    let title = " Reduction Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

fn info_lines(
    algo: &dyn AlgorithmRunner,
    selected: &[&str],
    config: &ExperimentConfig,
    show_cycles: bool,
) -> [String; 7] {
    [
        format!("Algorithm: {}", algo.name()),
        format!("Category:  {}", algo.category()),
        algo.description().to_string(),
        format!("Variants:  {}", selected.join(", ")),
        format!("Baseline:  {}", algo.baseline()),
        format!(
            "Sizes: {}  Runs: {}  Warmup: {}  Seed: {}  Pin: {}",
            config.sizes.len(),
            config.timing.repetitions,
            config.timing.warmup_iterations,
            config.seed,
            pin_label(config.timing.pin_strategy)
        ),
        format!(
            "Cores: {}  Cycle counter: {}",
            online_cores().map_or_else(|| "?".to_string(), |n| n.to_string()),
            match (show_cycles, cycles_available()) {
                (false, _) => "not shown",
                (true, true) => "on",
                (true, false) => "unavailable",
            }
        ),
    ]
}

/// Print algorithm info box with the resolved run settings
pub fn print_algo_info_box(
    algo: &dyn AlgorithmRunner,
    selected: &[&str],
    config: &ExperimentConfig,
    show_cycles: bool,
) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);
    let lines = info_lines(algo, selected, config, show_cycles);

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print the marked diagnostic block for a failed equivalence check
pub fn print_divergence(outcome: &SizeOutcome) {
    println!("  !! Size {}: variants diverge from the baseline", outcome.size);
    for line in outcome.equivalence.to_string().lines() {
        println!("  !! {}", line);
    }
    println!();
}

/// Print results table for a single size, preceded by the divergence block
/// when the equivalence check failed
pub fn print_size_outcome(outcome: &SizeOutcome, runs: usize, show_cycles: bool) {
    if !outcome.is_equivalent() {
        print_divergence(outcome);
    }
    if outcome.results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let fixed_width = 70;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let cycles_width = if show_cycles { 11 } else { 0 };
    let table_width = variant_col_width + 62 + 6 + cycles_width;

    println!("  Size: {} ({} runs)", outcome.size, runs);
    println!("  {}", "─".repeat(table_width));
    print!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>14}",
        "Variant",
        "Mean",
        "Min",
        "Max",
        "Speedup",
        "Result",
        v_width = variant_col_width
    );
    if show_cycles {
        print!(" {:>10}", "Cyc/elem");
    }
    println!();
    println!("  {}", "─".repeat(table_width));

    for result in &outcome.results {
        let sample = result
            .result_sample
            .map(|v| format!("{:.6e}", v))
            .unwrap_or_else(|| "-".to_string());

        print!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>14}",
            truncate(result.variant, variant_col_width),
            format_micros(result.mean_time_us),
            format_micros(result.min_time_us),
            format_micros(result.max_time_us),
            result.speedup_vs_baseline,
            sample,
            v_width = variant_col_width
        );
        if show_cycles {
            let cpe = result
                .cycles_per_element
                .map_or_else(|| "-".to_string(), |c| format!("{:.2}", c));
            print!(" {:>10}", cpe);
        }
        println!();
    }
    println!();
}

/// Print the speedup of every variant at every size
pub fn print_speedup_summary(report: &ExperimentReport) {
    let others: Vec<&str> = report
        .variants
        .iter()
        .copied()
        .filter(|v| *v != report.baseline)
        .collect();
    if report.outcomes.is_empty() || others.is_empty() {
        return;
    }

    let col_width = others.iter().map(|v| v.len()).max().unwrap_or(8).clamp(8, 24);
    let table_width = 12 + (col_width + 1) * others.len();

    println!("  Speedup vs {} ({})", report.baseline, report.algorithm);
    println!("  {}", "─".repeat(table_width));
    print!("  {:>11}", "Size");
    for v in &others {
        print!(" {:>width$}", truncate(v, col_width), width = col_width);
    }
    println!();
    println!("  {}", "─".repeat(table_width));

    for outcome in &report.outcomes {
        print!("  {:>11}", outcome.size);
        for v in &others {
            let cell = outcome
                .results
                .iter()
                .find(|r| r.variant == *v)
                .map(|r| format!("{:.2}x", r.speedup_vs_baseline))
                .unwrap_or_else(|| "-".to_string());
            print!(" {:>width$}", cell, width = col_width);
        }
        if !outcome.is_equivalent() {
            print!("  !!");
        }
        println!();
    }
    println!();

    let divergent = report.divergent_sizes();
    if !divergent.is_empty() {
        println!("  !! Equivalence failed at sizes: {:?}", divergent);
        println!();
    }
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
        println!(
            "  {:<20} variants: {}",
            "",
            algo.available_variants().join(", ")
        );
    }
}
