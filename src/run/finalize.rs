//! Scan finalization.

use std::time::Instant;

use log::info;

use crate::error_handling::ScanEvent;

use super::resources::ScanState;
use super::ScanReport;

/// Logs the run summary and builds the report.
pub fn finalize_scan(state: &ScanState, start_time: Instant) -> ScanReport {
    let report = ScanReport {
        domains_scanned: state.domains_scanned,
        subdomains_found: state.stats.get(ScanEvent::SubdomainResolved),
        nearby_hosts: state.stats.get(ScanEvent::NearbyResolved),
        zone_transfers: state.stats.get(ScanEvent::ZoneTransferSucceeded),
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    };

    state.stats.log_summary();
    info!(
        "Done in {:.2}s: {} subdomains, {} nearby hosts, {} zone transfers",
        report.elapsed_seconds, report.subdomains_found, report.nearby_hosts, report.zone_transfers
    );
    report
}
