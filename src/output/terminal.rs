//! Terminal summary of a run.

use crate::models::{broadcast_addr, usable_hosts, AccountAllocation};
use crate::processing::PlanReport;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// One line per allocated subnet: account, tier, zone, cidr, last address, usable hosts.
pub fn subnet_rows(account: &str, allocation: &AccountAllocation) -> Vec<String> {
    let mut rows = Vec::new();
    for (tier, zones) in allocation.subnets.iter() {
        for (zone, subnet) in zones.iter() {
            let last = broadcast_addr(subnet.addr, subnet.mask)
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "none".to_string());
            let hosts = usable_hosts(subnet.mask).unwrap_or(0);
            rows.push(format!(
                "{account},{tier},{zone},{cidr},{last},{hosts}",
                account = format_field(account, 20),
                tier = format_field(tier, 12),
                zone = format_field(zone, 4),
                cidr = format_field(subnet, 20),
                last = format_field(format!("{last}_br"), 19),
                hosts = format_field(format!("{hosts}_hosts"), 13),
            ));
        }
    }
    rows
}

/// Print the per-subnet table and the per-account outcome to stderr.
pub fn print_summary(report: &PlanReport) {
    eprintln!(
        r#"            "account",       "tier", "az",         "subnet_cidr",         "broadcast",        "hosts""#
    );
    for (account, allocation) in report.allocation.iter() {
        for row in subnet_rows(account, allocation) {
            eprintln!("{row}");
        }
    }

    for (account, allocation) in report.allocation.iter() {
        eprintln!(
            "{ok} {account} {cidr} -> {used} x /{mask} in {azs}",
            ok = "OK".on_green(),
            cidr = allocation.cidr,
            used = allocation.total_subnets,
            mask = allocation
                .subnet_mask
                .map_or_else(|| "-".to_string(), |m| m.to_string()),
            azs = allocation.azs.join(","),
        );
    }
    for failure in &report.failures {
        eprintln!(
            "{failed} {account} [{kind}] {error}",
            failed = "FAILED".on_red(),
            account = failure.account,
            kind = failure.error.kind(),
            error = failure.error.to_string().red(),
        );
    }
    eprintln!(
        "#{}# {} of {} account(s) allocated at {}",
        "NOTE".on_blue(),
        report.allocation.len(),
        report.account_count(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}
