use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use sweepr_core::scanner::ScanProgress;

const TEMPLATE: &str = "{spinner:.blue} {msg} {bar:32.green/bright_black} {pos}/{len} [{elapsed_precise}]";

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
    "▁▁▁▁▁",
];

pub fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(TEMPLATE)
        .map(|style| style.tick_strings(TICKS).progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// The span the scan runs in; its progress bar lives as long as the span.
pub fn discovery_span(total: u64) -> Span {
    let span = info_span!("discovery", indicatif.pb_show = true);
    span.pb_set_length(total);
    span.pb_set_message("Probing hosts...");
    span
}

pub fn report(span: &Span, progress: ScanProgress) {
    span.pb_set_position(progress.completed as u64);
    span.pb_set_message(&format!(
        "Identified {} hosts so far...",
        progress.online.to_string().green().bold()
    ));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
