//! Allocate uniform, non-overlapping subnet CIDR blocks inside VPC blocks.
//!
//! Each account names a parent block, its availability zones and how many
//! zones every subnet tier spans. The smallest uniform prefix that fits the
//! total demand is chosen, and subnets are handed out in ascending address
//! order to tiers (declared order) and zones (declared order).
//!
//! ```
//! use vpc_cidr_blocks::config::parse_account_map;
//! use vpc_cidr_blocks::processing::allocate;
//!
//! let yaml = "
//! prod:
//!   cidr: 100.100.0.0/16
//!   region: us-east-1
//!   azs: [a, b, c]
//!   subnets: {public: 3, private: 3, lambda: 3}
//! ";
//! let entries = parse_account_map(yaml, "doc").unwrap();
//! let report = allocate(&entries);
//! let prod = report.allocation.get("prod").unwrap();
//! assert_eq!(prod.subnets.get("lambda").unwrap().get("c").unwrap().to_string(), "100.100.128.0/20");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use config::Cli;
use processing::PlanReport;

pub use error::{AllocError, AppError};

/// Load, allocate, print and persist. Account failures are in the report,
/// only run-level problems come back as `Err`.
pub fn run(cli: &Cli) -> error::Result<PlanReport> {
    log::info!("#Start run()");
    let entries = config::load_accounts(
        &cli.vpc_configuration,
        cli.vpc_configuration_array.as_deref(),
    )?;

    let report = processing::allocate(&entries);

    output::print_document(&report.allocation, cli.format)?;
    output::write_document(&cli.output, &report.allocation)?;
    output::print_summary(&report);

    Ok(report)
}
