//! CLI argument definitions for the device import.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use curator_import::{DEFAULT_KEY_FIELD, DEFAULT_SOURCE_PATH, DuplicatePolicy, ImporterConfig};
use curator_output::{DEFAULT_ENDPOINT, DEFAULT_REGION, DEFAULT_TABLE_NAME, DynamoConfig};

#[derive(Parser)]
#[command(
    name = "curator-import",
    version,
    about = "Import a device CSV export into the curator inventory table",
    long_about = "Import a device CSV export into the curator inventory table.\n\n\
                  Every cell is stored as a trimmed string. Rows without the key\n\
                  column are skipped and reported; a failed write never stops the run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell values (owners, locations, keys) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import every row of the source into the selected sink.
    Import(ImportArgs),

    /// Show how the source's header columns map to item attributes.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV export to read (first line is the header).
    #[arg(long, value_name = "PATH", env = "CURATOR_SOURCE", default_value = DEFAULT_SOURCE_PATH)]
    pub source: PathBuf,

    /// Column that must be present and non-empty in every imported row.
    #[arg(long = "key-field", value_name = "COLUMN", env = "CURATOR_KEY_FIELD", default_value = DEFAULT_KEY_FIELD)]
    pub key_field: String,

    /// Where items are written.
    #[arg(long, value_enum, default_value = "dynamodb")]
    pub sink: SinkArg,

    /// DynamoDB table name.
    #[arg(long, value_name = "NAME", env = "CURATOR_TABLE", default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// DynamoDB endpoint (DynamoDB Local by default).
    #[arg(long, value_name = "URL", env = "CURATOR_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Use the regional AWS endpoint instead of --endpoint.
    #[arg(long = "no-endpoint")]
    pub no_endpoint: bool,

    /// AWS region for the DynamoDB client.
    #[arg(long, value_name = "REGION", env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Access key id (placeholder credentials are used for a local endpoint when unset).
    #[arg(long = "access-key-id", env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Secret access key.
    #[arg(long = "secret-access-key", env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Create the table (hash key = --key-field) if it does not exist.
    #[arg(long = "create-table")]
    pub create_table: bool,

    /// Output file for the jsonl sink.
    #[arg(long, value_name = "PATH", default_value = "devices.jsonl")]
    pub output: PathBuf,

    /// Handling of rows that repeat an earlier key value.
    #[arg(long, value_enum, default_value = "overwrite")]
    pub duplicates: DuplicatesArg,

    /// Maximum number of skipped/failed rows listed after the run.
    #[arg(long = "max-issues", value_name = "N", default_value_t = 50)]
    pub max_issues: usize,
}

impl ImportArgs {
    pub fn importer_config(&self) -> ImporterConfig {
        ImporterConfig::new()
            .with_source_path(&self.source)
            .with_key_field(&self.key_field)
            .with_duplicate_policy(match self.duplicates {
                DuplicatesArg::Overwrite => DuplicatePolicy::Overwrite,
                DuplicatesArg::FirstWins => DuplicatePolicy::FirstWins,
            })
            .with_issue_limit(self.max_issues)
    }

    pub fn dynamo_config(&self) -> DynamoConfig {
        let endpoint = (!self.no_endpoint).then(|| self.endpoint.clone());
        let mut config = DynamoConfig::default()
            .with_table_name(&self.table)
            .with_endpoint(endpoint)
            .with_region(&self.region);
        if let (Some(key), Some(secret)) = (&self.access_key_id, &self.secret_access_key) {
            config = config.with_credentials(key, secret);
        }
        config
    }
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// CSV export to inspect.
    #[arg(long, value_name = "PATH", env = "CURATOR_SOURCE", default_value = DEFAULT_SOURCE_PATH)]
    pub source: PathBuf,

    /// Column expected to hold the item key.
    #[arg(long = "key-field", value_name = "COLUMN", env = "CURATOR_KEY_FIELD", default_value = DEFAULT_KEY_FIELD)]
    pub key_field: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SinkArg {
    /// DynamoDB table (local or AWS).
    Dynamodb,
    /// JSON Lines file.
    Jsonl,
    /// Validate only; nothing is written.
    DryRun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    Overwrite,
    FirstWins,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
