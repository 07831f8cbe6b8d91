use std::time::Duration;

use anyhow::Context;
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::sprint;
use crate::terminal::{colors, print, progress};
use sweepr_common::config::Config;
use sweepr_common::network::host::Host;
use sweepr_common::network::range::NetworkRange;
use sweepr_common::report::ScanReport;
use sweepr_common::{success, warn};
use sweepr_core::discovery::DiscoveryService;

use super::DiscoverArgs;

/// Prefixes shorter than this get a size warning before the scan starts.
const LARGE_RANGE_PREFIX: u8 = 16;

type Detail = (String, ColoredString);

pub async fn discover(args: DiscoverArgs, quiet: u8) -> anyhow::Result<()> {
    let cfg: Config = Config::builder()
        .timeout_ms(args.timeout)
        .concurrency(args.concurrency)
        .sequential(args.sequential)
        .no_vendor(args.no_vendor)
        .quiet(quiet)
        .build()
        .context("invalid scan parameters")?;

    let target: NetworkRange = args.target;
    if let Some(message) = large_range_warning(&target) {
        warn!("{message}");
    }

    let cancel = CancellationToken::new();
    watch_interrupt(cancel.clone());

    let span = progress::discovery_span(target.total_hosts);
    let bar = span.clone();
    let service = DiscoveryService::system(&cfg).on_progress(move |p| progress::report(&bar, p));

    let report = service
        .perform_discovery(&target, &cfg, &cancel)
        .instrument(span)
        .await;

    discovery_ends(&report, &cfg);
    Ok(())
}

fn large_range_warning(target: &NetworkRange) -> Option<String> {
    (target.prefix < LARGE_RANGE_PREFIX).then(|| {
        format!(
            "{target} spans {} to {}, {} addresses to probe, this will take a while",
            target.network,
            target.broadcast(),
            target.total_hosts
        )
    })
}

/// Cancels the scan on the first Ctrl-C.
fn watch_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning outstanding probes");
            cancel.cancel();
        }
    });
}

fn discovery_ends(report: &ScanReport, cfg: &Config) {
    if report.hosts.is_empty() {
        no_hosts_found(cfg);
        return;
    }

    if cfg.quiet > 0 {
        sprint!();
    }

    print::header("Network Discovery", cfg.quiet);
    print_hosts(&report.hosts, cfg);
    print_summary(report, cfg);
}

fn no_hosts_found(cfg: &Config) {
    print::header("ZERO HOSTS DETECTED", cfg.quiet);
    if cfg.quiet == 0 {
        print::no_results();
    }
}

fn print_hosts(hosts: &[Host], cfg: &Config) {
    for (idx, host) in hosts.iter().enumerate() {
        match cfg.quiet {
            0 => {
                print_host_tree(host, idx);
                if idx + 1 != hosts.len() {
                    sprint!();
                }
            }
            1 => print::host_row(host),
            _ => {}
        }
    }
}

fn print_summary(report: &ScanReport, cfg: &Config) {
    let active_hosts: ColoredString = format!("{} active hosts", report.online()).bold().green();
    let total_time: ColoredString = seconds(report.duration).bold().yellow();
    let mut output: String = format!(
        "Discovery Complete: {active_hosts} identified in {total_time}"
    );
    if report.cancelled {
        output.push_str(&format!(" {}", "(cancelled)".red()));
    }
    let output: ColoredString = output.color(colors::TEXT_DEFAULT);
    let detail: String = format!("{} addresses probed, {} mode", report.scanned, report.mode);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::centerln(&detail.color(colors::SEPARATOR).to_string());
        }
        _ => {
            sprint!();
            success!("{output} ({detail})");
        }
    }
}

fn print_host_tree(host: &Host, idx: usize) {
    print::tree_head(idx, &host.address.to_string());

    let mut details: Vec<Detail> = vec![
        ("MAC".to_string(), host.link_layer.to_string().color(colors::MAC_ADDR)),
        ("State".to_string(), print::state_colored(host.state)),
    ];
    if let Some(vendor) = &host.vendor {
        details.push(("Vendor".to_string(), vendor.normal()));
    }

    print::as_tree_one_level(details);
}

fn seconds(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
