use anyhow::{anyhow, bail, Context, Result};
use comfy_table::Table;

use scoredeck_cli::config::{catalog, find_source};
use scoredeck_cli::pipeline::{run_batch, BatchOptions};
use scoredeck_cli::scriptgen::{generate_script, ScriptOptions};
use scoredeck_cli::types::RunResult;
use scoredeck_ingest::load_identifier_list;

use crate::cli::{ConvertArgs, ScriptArgs, SourcesArgs};
use crate::summary::apply_table_style;

pub fn run_convert(args: &ConvertArgs) -> Result<RunResult> {
    let sources = catalog(args.config.as_deref())?;
    if let Some(name) = &args.source {
        if find_source(&sources, name).is_none() {
            bail!("unknown source profile '{name}'; run `scoredeck sources` to list profiles");
        }
    }
    let options = BatchOptions {
        catalog: &sources,
        forced_source: args.source.as_deref(),
        output_dir: args.output_dir.as_deref(),
    };
    Ok(run_batch(&args.files, &options))
}

pub fn run_sources(args: &SourcesArgs) -> Result<()> {
    let sources = catalog(args.config.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        "Source",
        "Data sheet",
        "Strategies",
        "Numeric rules",
        "Date rules",
    ]);
    apply_table_style(&mut table);
    for source in &sources {
        table.add_row(vec![
            source.name.clone(),
            source.layout.data_sheet.clone(),
            source.strategies.len().to_string(),
            source.rules.numeric.len().to_string(),
            source.rules.date.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_script(args: &ScriptArgs) -> Result<()> {
    let sources = catalog(args.config.as_deref())?;
    let source = find_source(&sources, &args.source)
        .ok_or_else(|| anyhow!("unknown source profile '{}'", args.source))?;
    let ids = match &args.ids {
        Some(path) => load_identifier_list(path)
            .with_context(|| format!("load identifier list {}", path.display()))?,
        None => Vec::new(),
    };
    let mut options = ScriptOptions::default();
    if let Some(url) = &args.base_url {
        options.base_url = url.clone();
    }
    let script = generate_script(source, &ids, &options);
    match &args.output {
        Some(path) => {
            std::fs::write(path, &script)
                .with_context(|| format!("write script {}", path.display()))?;
            println!("Script written: {}", path.display());
        }
        None => println!("{script}"),
    }
    Ok(())
}
