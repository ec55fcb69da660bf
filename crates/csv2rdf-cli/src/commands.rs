use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use csv2rdf_core::{ConversionOutput, convert_inputs};
use csv2rdf_model::{ConverterConfig, DEFAULT_NAMESPACE, DEFAULT_PREFIX, Namespace};

use crate::types::{ConvertOptions, RunReport, RunResult};

pub fn run_convert(options: &ConvertOptions) -> Result<RunResult> {
    let start = Instant::now();
    let config = converter_config(options)?;

    let span = info_span!(
        "convert",
        inputs = options.inputs.len(),
        prefix = %config.namespace.prefix()
    );
    let _guard = span.enter();

    let output = convert_inputs(&options.inputs, &config).context("convert input files")?;

    let written = if options.stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(output.document.as_bytes())
            .and_then(|()| stdout.flush())
            .context("write document to stdout")?;
        None
    } else {
        write_document(&options.output, &output.document)?;
        Some(options.output.clone())
    };

    if let Some(path) = &options.report {
        write_report(path, &output)?;
    }

    let has_errors = options.strict && !output.diagnostics.is_empty();
    info!(
        entities = output.stats.entities(),
        triples = output.stats.triples,
        diagnostics = output.diagnostics.len(),
        strict = options.strict,
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    let ConversionOutput {
        diagnostics,
        files,
        stats,
        ..
    } = output;
    Ok(RunResult {
        output: written,
        report: options.report.clone(),
        files,
        diagnostics,
        stats,
        has_errors,
    })
}

fn converter_config(options: &ConvertOptions) -> Result<ConverterConfig> {
    let prefix = options.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
    let uri = options.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
    let namespace = Namespace::new(prefix, uri).context("invalid namespace configuration")?;
    Ok(ConverterConfig::new(namespace).with_log_values(options.log_values))
}

fn write_document(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, document).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = document.len(), "wrote turtle document");
    Ok(())
}

fn write_report(path: &Path, output: &ConversionOutput) -> Result<()> {
    let report = RunReport {
        stats: &output.stats,
        files: &output.files,
        diagnostics: &output.diagnostics,
    };
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), "wrote diagnostics report");
    Ok(())
}
