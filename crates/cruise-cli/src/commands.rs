use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use cruise_core::{StandardizedTable, apply_coverage};
use cruise_dsg::{read_data, read_metadata, write_dsg};
use cruise_ingest::{load_config, read_user_table};
use cruise_model::FieldRegistry;

use crate::cli::{ConvertArgs, InspectArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{ColumnSummary, ConvertResult, InspectResult, MetadataEntry};

pub fn run_fields() -> Result<()> {
    for (title, registry) in [
        ("Data fields", FieldRegistry::standard_data()),
        ("Metadata fields", FieldRegistry::standard_metadata()),
    ] {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Name"),
            header_cell("Kind"),
            header_cell("Units"),
            header_cell("Description"),
        ]);
        apply_table_style(&mut table);
        for field in registry.fields() {
            table.add_row(vec![
                field.name.clone(),
                field.kind.to_string(),
                field.units.join(", "),
                field.description.clone().unwrap_or_default(),
            ]);
        }
        println!("{title}:");
        println!("{table}");
    }
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let _span = info_span!("convert", csv = %args.csv.display()).entered();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.csv.with_extension("nc"));

    let config = load_config(&args.config)
        .with_context(|| format!("load declaration {}", args.config.display()))?;
    let user = read_user_table(&args.csv, &config)
        .with_context(|| format!("read {}", args.csv.display()))?;

    let data_registry = FieldRegistry::standard_data();
    let (table, report) =
        StandardizedTable::promote_with_report(&user, &data_registry).context("promote table")?;
    if !report.unparsed_cells.is_empty() {
        warn!(
            count = report.unparsed_cells.len(),
            "cells did not parse and were treated as missing"
        );
    }

    let mut metadata = config
        .build_metadata(&FieldRegistry::standard_metadata())
        .context("build metadata")?;
    let coverage_filled = if args.no_coverage {
        Vec::new()
    } else {
        apply_coverage(&mut metadata, &table).context("compute coverage")?
    };

    write_dsg(&output, &metadata, &table, args.format.into())
        .with_context(|| format!("write {}", output.display()))?;
    info!(output = %output.display(), rows = table.num_rows(), "conversion complete");

    Ok(ConvertResult {
        output,
        rows: table.num_rows(),
        columns: table.fields().iter().map(|field| field.name.clone()).collect(),
        strategy: report.strategy,
        dropped_columns: report.dropped_columns,
        derived_columns: report.derived_columns,
        unparsed_cells: report.unparsed_cells,
        coverage_filled: coverage_filled.into_iter().map(str::to_string).collect(),
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let _span = info_span!("inspect", path = %args.path.display()).entered();
    let (metadata, absent_metadata) =
        read_metadata(&args.path, &FieldRegistry::standard_metadata())
            .with_context(|| format!("read metadata from {}", args.path.display()))?;
    let (table, absent_columns) = read_data(&args.path, &FieldRegistry::standard_data())
        .with_context(|| format!("read data from {}", args.path.display()))?;

    let metadata = metadata
        .iter()
        .map(|(field, value)| MetadataEntry {
            name: field.name.clone(),
            kind: field.kind,
            value: (!value.is_missing()).then(|| value.clone()),
        })
        .collect();
    let columns = table
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| !absent_columns.contains(&field.name))
        .map(|(index, field)| ColumnSummary {
            name: field.name.clone(),
            kind: field.kind,
            units: field.file_unit().map(str::to_string),
            present: table
                .rows()
                .iter()
                .filter(|row| row.get(index).is_some_and(Option::is_some))
                .count(),
        })
        .collect();

    Ok(InspectResult {
        path: args.path.clone(),
        rows: table.num_rows(),
        metadata,
        columns,
        absent_metadata,
        absent_columns,
    })
}
