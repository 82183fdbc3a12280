//! Account configuration documents.
//!
//! Two YAML shapes are accepted:
//! - a mapping of account name → record (`vpc_configuration.yaml`)
//! - a sequence of records carrying their name in `environment`
//!   (`array_vpc_configuration.yaml`)
//!
//! Records are kept as untyped YAML until [`AccountEntry::validate`], so a
//! missing or mistyped field only fails its own account.

use crate::error::{AllocError, AppError, Result};
use crate::models::{AccountSpec, Ipv4, TierDemand, MAX_LENGTH};
use indexmap::IndexMap;
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use std::sync::OnceLock;

/// Zone letters as used by AWS, appended to the region name.
static ZONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_zone_regex() -> &'static Regex {
    ZONE_REGEX.get_or_init(|| Regex::new(r"^[a-z]$").expect("Invalid Regex"))
}

/// One account record as written in the document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawAccountSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default)]
    pub cidr: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub azs: Option<Vec<String>>,
    #[serde(default)]
    pub subnets: Option<IndexMap<String, i64>>,
    #[serde(default)]
    pub subnet_bits: Option<i64>,
}

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Key of the account mapping.
    Map,
    /// Position in the account sequence.
    Array(usize),
}

/// Named record as found in the document, ready for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountEntry {
    pub name: String,
    pub record: Value,
    pub origin: Origin,
}

fn missing(field: &str) -> AllocError {
    AllocError::shape(format!("missing required field '{field}'"))
}

impl AccountEntry {
    /// Type the record, reporting the path of the first mistyped field.
    pub fn raw(&self) -> std::result::Result<RawAccountSpec, AllocError> {
        serde_path_to_error::deserialize(self.record.clone()).map_err(|e| {
            AllocError::shape(format!("field '{}': {}", e.path(), e.inner()))
        })
    }

    /// Check the record shape and turn it into an [`AccountSpec`].
    pub fn validate(&self) -> std::result::Result<AccountSpec, AllocError> {
        let raw = self.raw()?;
        if let Origin::Array(_) = self.origin {
            if raw.environment.as_deref().map_or(true, str::is_empty) {
                return Err(missing("environment"));
            }
        }

        let cidr = raw.cidr.as_deref().ok_or_else(|| missing("cidr"))?;
        let parent = Ipv4::network(cidr)?;
        let region = raw.region.ok_or_else(|| missing("region"))?;
        let zones = raw.azs.ok_or_else(|| missing("azs"))?;
        let subnets = raw.subnets.as_ref().ok_or_else(|| missing("subnets"))?;

        if let Some(bad) = zones.iter().find(|z| !get_zone_regex().is_match(z)) {
            return Err(AllocError::shape(format!(
                "zone '{bad}' is not a single lowercase letter"
            )));
        }
        let duplicates: Vec<&String> = zones.iter().duplicates().collect();
        if !duplicates.is_empty() {
            return Err(AllocError::shape(format!(
                "zones listed more than once: {}",
                duplicates.iter().join(",")
            )));
        }

        let mut tiers = Vec::with_capacity(subnets.len());
        for (tier, &count) in subnets.iter() {
            if count < 0 {
                return Err(AllocError::shape(format!(
                    "tier '{tier}' asks for {count} subnets"
                )));
            }
            let count = count as usize;
            if count > zones.len() {
                return Err(AllocError::shape(format!(
                    "tier '{tier}' asks for {count} zones but only {} are declared",
                    zones.len()
                )));
            }
            tiers.push(TierDemand::new(tier, count));
        }

        let subnet_bits = match raw.subnet_bits {
            None => None,
            Some(bits) if (0..=i64::from(MAX_LENGTH)).contains(&bits) => Some(bits as u8),
            Some(bits) => {
                return Err(AllocError::shape(format!(
                    "subnet_bits {bits} is not a prefix length"
                )))
            }
        };

        Ok(AccountSpec {
            name: self.name.clone(),
            parent,
            region,
            zones,
            tiers,
            subnet_bits,
        })
    }
}

fn parse_yaml<T>(yaml: &str, file: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let deserializer = serde_yaml::Deserializer::from_str(yaml);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        log::error!("Error parsing {file} at '{}'", e.path());
        AppError::Yaml {
            file: file.to_string(),
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })
}

fn environment(record: &Value) -> Option<&str> {
    record
        .get("environment")
        .and_then(Value::as_str)
        .filter(|env| !env.is_empty())
}

/// Parse the account mapping shape.
pub fn parse_account_map(yaml: &str, file: &str) -> Result<Vec<AccountEntry>> {
    let accounts: Mapping = parse_yaml(yaml, file)?;
    let mut entries = Vec::with_capacity(accounts.len());
    for (key, record) in accounts {
        let name = match key.as_str() {
            Some(name) => name.to_string(),
            None => {
                return Err(AppError::Yaml {
                    file: file.to_string(),
                    path: ".".to_string(),
                    message: format!("account name {key:?} is not a string"),
                })
            }
        };
        if let Some(env) = environment(&record).filter(|env| *env != name) {
            log::debug!("account '{name}' carries environment '{env}', using the key");
        }
        entries.push(AccountEntry {
            name,
            record,
            origin: Origin::Map,
        });
    }
    Ok(entries)
}

/// Parse the account sequence shape.
pub fn parse_account_array(yaml: &str, file: &str) -> Result<Vec<AccountEntry>> {
    let records: Vec<Value> = parse_yaml(yaml, file)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, record)| AccountEntry {
            name: environment(&record)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{file}[{i}]")),
            record,
            origin: Origin::Array(i),
        })
        .collect())
}

fn read_file(path: &Path) -> Result<String> {
    log::info!("Reading configuration {}", path.display());
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load accounts from the mapping file, then the optional sequence file.
pub fn load_accounts(map_file: &Path, array_file: Option<&Path>) -> Result<Vec<AccountEntry>> {
    let mut entries = parse_account_map(&read_file(map_file)?, &map_file.display().to_string())?;
    if let Some(array_file) = array_file {
        let more =
            parse_account_array(&read_file(array_file)?, &array_file.display().to_string())?;
        entries.extend(more);
    }
    log::debug!(
        "Loaded {} account(s): {}",
        entries.len(),
        entries.iter().map(|e| e.name.as_str()).join(", ")
    );
    Ok(entries)
}
