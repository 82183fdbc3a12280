//! Command line arguments.

use crate::output::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn | LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

/// Allocate uniform subnet CIDR blocks inside AWS VPCs.
#[derive(Parser, Debug)]
#[command(name = "vpc-cidr-blocks", version, arg_required_else_help = true)]
pub struct Cli {
    /// AWS VPC configurations, keyed by account
    #[arg(
        short = 'c',
        long = "vpc-configuration",
        env = "VPC_CONFIGURATION",
        default_value = "vpc_configuration.yaml"
    )]
    pub vpc_configuration: PathBuf,

    /// AWS VPC configurations as a list of records with an `environment` name
    #[arg(long = "vpc-configuration-array", env = "VPC_CONFIGURATION_ARRAY")]
    pub vpc_configuration_array: Option<PathBuf>,

    /// Output location of the allocation document
    #[arg(
        short = 'o',
        long,
        env = "VPC_OUTPUT",
        default_value = "vpc_configuration_cidr_blocks.yaml"
    )]
    pub output: PathBuf,

    /// Log level [default: info], takes precedence over log4rs.yml
    #[arg(short = 'l', long, value_enum, env = "VPC_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// log4rs config file [default: log4rs.yml if present]
    #[arg(long)]
    pub log_config: Option<PathBuf>,

    /// Format of the document printed on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::try_parse_from([
            "vpc-cidr-blocks",
            "-c",
            "accounts.yaml",
            "--vpc-configuration-array",
            "array.yaml",
            "-o",
            "out/blocks.yaml",
            "-l",
            "critical",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.vpc_configuration, PathBuf::from("accounts.yaml"));
        assert_eq!(cli.vpc_configuration_array, Some(PathBuf::from("array.yaml")));
        assert_eq!(cli.output, PathBuf::from("out/blocks.yaml"));
        assert_eq!(cli.log_level.map(log::LevelFilter::from), Some(log::LevelFilter::Error));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_log_level_unset_by_default() {
        let cli = Cli::try_parse_from(["vpc-cidr-blocks", "-c", "accounts.yaml"]).unwrap();
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.log_config, None);
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["vpc-cidr-blocks", "-l", "verbose"]).is_err());
    }
}
