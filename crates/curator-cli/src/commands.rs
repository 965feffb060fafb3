use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{error, info, warn};

use curator_import::{DiscardSink, Importer, ItemSink};
use curator_ingest::{ColumnStatus, CsvSource, inspect_headers};
use curator_output::{DynamoSink, JsonLinesSink, TableState};

use curator_cli::cli::{ColumnsArgs, ImportArgs, SinkArg};
use crate::summary::apply_table_style;
use crate::types::ImportReport;

pub fn run_import(args: &ImportArgs) -> Result<ImportReport> {
    let importer = Importer::new(args.importer_config()).context("invalid import settings")?;
    let config = importer.config();

    let (target, summary) = match args.sink {
        SinkArg::Dynamodb => {
            let mut sink = DynamoSink::connect(args.dynamo_config())?;
            if args.create_table {
                // Nothing should be created for a source we cannot read.
                CsvSource::open(&config.source_path)
                    .with_context(|| format!("open {}", config.source_path.display()))?;
                match sink.ensure_table(&config.key_field)? {
                    TableState::Created => info!(table = sink.target(), "created table"),
                    TableState::Existing => {}
                }
            }
            let summary = importer.run(&mut sink).context("import failed")?;
            (sink.target().to_string(), summary)
        }
        SinkArg::Jsonl => {
            let mut sink = JsonLinesSink::create(&args.output)?;
            let summary = importer.run(&mut sink).context("import failed")?;
            let target = sink.target().to_string();
            // Counts are final here; a failed sync is reported, not fatal.
            match sink.finish() {
                Ok(written) => info!(path = %args.output.display(), written, "wrote items"),
                Err(err) => error!(error = %format!("{err:#}"), "failed to sync output"),
            }
            (target, summary)
        }
        SinkArg::DryRun => {
            let mut sink = DiscardSink::new();
            let summary = importer.run(&mut sink).context("import failed")?;
            (sink.target().to_string(), summary)
        }
    };

    Ok(ImportReport {
        source: config.source_path.clone(),
        target,
        summary,
        max_issues: args.max_issues,
    })
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let source = CsvSource::open(&args.source)
        .with_context(|| format!("open {}", args.source.display()))?;
    let key_field = args.key_field.trim();
    let columns = inspect_headers(source.headers(), key_field);

    let mut table = Table::new();
    table.set_header(vec!["#", "Header", "Attribute", "Status"]);
    apply_table_style(&mut table);
    for column in &columns {
        table.add_row(vec![
            column.position.to_string(),
            format!("{:?}", column.raw),
            column.attribute.clone().unwrap_or_else(|| "-".to_string()),
            column.status.to_string(),
        ]);
    }
    println!("{table}");

    if !columns
        .iter()
        .any(|column| column.status == ColumnStatus::Key)
    {
        warn!(key_field, "key column not found; every row would be skipped");
        eprintln!("warning: no column named {key_field:?}; every row would be skipped");
    }
    Ok(())
}
