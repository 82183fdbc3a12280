//! Whole-run driver.
//!
//! Accounts are independent: each one is validated and planned on its own,
//! successes go into the [`Allocation`], failures are collected next to it.

use super::planner::plan_account;
use crate::config::AccountEntry;
use crate::error::AllocError;
use crate::models::{AccountAllocation, Allocation};
use colored::Colorize;

/// An account that could not be allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFailure {
    pub account: String,
    pub error: AllocError,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct PlanReport {
    pub allocation: Allocation,
    pub failures: Vec<AccountFailure>,
}

impl PlanReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// 0 when every account was allocated, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn account_count(&self) -> usize {
        self.allocation.len() + self.failures.len()
    }

    fn record(&mut self, name: &str, result: Result<AccountAllocation, AllocError>) {
        let seen =
            self.allocation.contains_key(name) || self.failures.iter().any(|f| f.account == name);
        let result = if seen {
            Err(AllocError::shape(format!("account '{name}' defined more than once")))
        } else {
            result
        };
        match result {
            Ok(allocation) => {
                self.allocation.insert(name.to_string(), allocation);
            }
            Err(error) => self.fail(name, error),
        }
    }

    fn fail(&mut self, name: &str, error: AllocError) {
        log::error!(
            "{failed} account '{name}' [{kind}]: {error}",
            failed = "failed".on_red(),
            kind = error.kind()
        );
        self.failures.push(AccountFailure {
            account: name.to_string(),
            error,
        });
    }
}

/// Validate and allocate every configured account, in order.
pub fn allocate(entries: &[AccountEntry]) -> PlanReport {
    let mut report = PlanReport::default();
    for entry in entries {
        log::debug!("account '{}': {:?}", entry.name, entry.record);
        let result = entry.validate().and_then(|spec| plan_account(&spec));
        report.record(&entry.name, result);
    }
    log::info!(
        "Allocated {} of {} account(s)",
        report.allocation.len(),
        report.account_count()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_account_map;

    const YAML: &str = r#"
good:
  cidr: 10.0.0.0/16
  region: us-east-1
  azs: [a, b, c]
  subnets: {public: 3, private: 3}
tiny:
  cidr: 10.9.0.0/30
  region: us-east-1
  azs: [a, b, c]
  subnets: {public: 3, private: 3, lambda: 3, database: 1}
unshaped:
  cidr: 10.1.0.0/16
  azs: [a]
  subnets: {public: 1}
also-good:
  cidr: 10.2.0.0/24
  region: us-east-1
  azs: [a]
  subnets: {public: 1}
"#;

    #[test]
    fn test_failures_do_not_block_other_accounts() {
        let entries = parse_account_map(YAML, "inline.yaml").unwrap();
        let report = allocate(&entries);

        assert_eq!(
            report.allocation.keys().collect::<Vec<_>>(),
            vec!["good", "also-good"]
        );
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].account, "tiny");
        assert_eq!(
            report.failures[0].error,
            AllocError::Capacity {
                parent: crate::models::Ipv4::network("10.9.0.0/30").unwrap(),
                required: 10,
                available: 4,
            }
        );
        assert_eq!(report.failures[1].account, "unshaped");
        assert_eq!(report.failures[1].error.kind(), "ConfigShape");
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.account_count(), 4);
    }

    #[test]
    fn test_mistyped_field_only_fails_its_account() {
        let yaml = r#"
good:
  cidr: 10.0.0.0/16
  region: us-east-1
  azs: [a, b]
  subnets: {public: 2}
bad:
  cidr: 10.1.0.0/16
  region: us-east-1
  azs: [a, b]
  subnets: {public: three}
flat:
  cidr: 10.2.0.0/16
  region: us-east-1
  azs: a
  subnets: {public: 1}
"#;
        let entries = parse_account_map(yaml, "inline.yaml").unwrap();
        let report = allocate(&entries);

        assert_eq!(report.allocation.keys().collect::<Vec<_>>(), vec!["good"]);
        assert_eq!(
            report.failures.iter().map(|f| f.account.as_str()).collect::<Vec<_>>(),
            vec!["bad", "flat"]
        );
        assert_eq!(report.failures[0].error.kind(), "ConfigShape");
        assert!(report.failures[0].error.to_string().contains("subnets.public"));
        assert!(report.failures[1].error.to_string().contains("azs"));
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_duplicate_account_names() {
        let mut entries = parse_account_map(YAML, "inline.yaml").unwrap();
        entries.truncate(1);
        entries.push(entries[0].clone());
        let report = allocate(&entries);
        assert_eq!(report.allocation.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].account, "good");
    }

    #[test]
    fn test_all_good_exit_code() {
        let entries: Vec<AccountEntry> = parse_account_map(YAML, "inline.yaml")
            .unwrap()
            .into_iter()
            .filter(|entry| entry.name.ends_with("good"))
            .collect();
        let report = allocate(&entries);
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.allocation.len(), 2);
    }
}
