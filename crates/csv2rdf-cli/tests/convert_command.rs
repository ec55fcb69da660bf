//! Integration tests for the convert command.

use std::fs;
use std::path::{Path, PathBuf};

use csv2rdf_cli::commands::run_convert;
use csv2rdf_cli::types::ConvertOptions;
use csv2rdf_model::{ConversionStats, DiagnosticKind};
use tempfile::TempDir;

fn options(inputs: Vec<PathBuf>, output: PathBuf) -> ConvertOptions {
    ConvertOptions {
        inputs,
        output,
        stdout: false,
        namespace: None,
        prefix: None,
        report: None,
        strict: false,
        log_values: false,
    }
}

fn write_inputs(dir: &Path) -> PathBuf {
    let data = dir.join("data");
    fs::create_dir(&data).expect("mkdir");
    fs::write(
        data.join("er.csv"),
        "ER,customer,module,date\nER1,Tesla,CAD,2024-01-22\nER2,Tesla,,bad\n",
    )
    .expect("write er");
    fs::write(data.join("notes.txt"), "not an input").expect("write notes");
    data
}

#[test]
fn test_directory_input_writes_document() {
    let dir = TempDir::new().expect("temp dir");
    let data = write_inputs(dir.path());
    let output = dir.path().join("out").join("graph.ttl");

    let result = run_convert(&options(vec![data], output.clone())).expect("run");

    assert_eq!(result.output.as_deref(), Some(output.as_path()));
    assert_eq!(result.files.len(), 1);
    assert!(!result.has_errors);
    let document = fs::read_to_string(&output).expect("read output");
    assert!(document.starts_with("@prefix ex: <http://example.org/dassault#> .\n"));
    assert!(document.contains("ex:ER_ER2 a ex:EnhancementRequest ;\n    ex:belongsToCustomer ex:Customer_Tesla .\n"));
}

#[test]
fn test_report_lists_diagnostics_and_counts() {
    let dir = TempDir::new().expect("temp dir");
    let data = write_inputs(dir.path());
    let report = dir.path().join("report.json");
    let mut opts = options(
        vec![dir.path().join("absent.csv"), data],
        dir.path().join("out.ttl"),
    );
    opts.report = Some(report.clone());

    let result = run_convert(&opts).expect("run");
    assert_eq!(result.diagnostics.count(DiagnosticKind::FileNotFound), 1);
    assert_eq!(result.diagnostics.count(DiagnosticKind::UnparseableDate), 1);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    let stats: ConversionStats =
        serde_json::from_value(json["stats"].clone()).expect("stats");
    assert_eq!(
        stats,
        ConversionStats {
            files_read: 1,
            files_failed: 1,
            rows_seen: 2,
            rows_committed: 2,
            rows_skipped: 0,
            enhancement_requests: 2,
            incident_reports: 0,
            customers: 1,
            modules: 1,
            triples: 10,
        }
    );
    assert_eq!(json["files"][0]["encoding"], "utf8");
    assert_eq!(json["diagnostics"][0]["kind"], "file_not_found");
    assert_eq!(json["diagnostics"][1]["kind"], "unparseable_date");
    assert_eq!(json["diagnostics"][1]["field"], "created_on");
    assert_eq!(json["diagnostics"][1]["row"], 2);
}

#[test]
fn test_strict_mode_flags_diagnostics() {
    let dir = TempDir::new().expect("temp dir");
    let data = write_inputs(dir.path());
    let mut opts = options(vec![data], dir.path().join("out.ttl"));
    opts.strict = true;

    let result = run_convert(&opts).expect("run");
    assert!(result.has_errors);
    // the document is still written
    assert!(dir.path().join("out.ttl").exists());
}

#[test]
fn test_custom_namespace_and_prefix() {
    let dir = TempDir::new().expect("temp dir");
    let data = write_inputs(dir.path());
    let output = dir.path().join("out.ttl");
    let mut opts = options(vec![data], output.clone());
    opts.prefix = Some("ds".to_string());
    opts.namespace = Some("http://example.com/ds#".to_string());

    run_convert(&opts).expect("run");
    let document = fs::read_to_string(&output).expect("read output");
    assert!(document.starts_with("@prefix ds: <http://example.com/ds#> .\n"));
    assert!(document.contains("ds:Customer_Tesla a ds:Customer ;\n"));
}

#[test]
fn test_invalid_prefix_is_rejected_before_reading() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.ttl");
    let mut opts = options(vec![dir.path().join("absent.csv")], output.clone());
    opts.prefix = Some("1bad".to_string());

    let error = run_convert(&opts).unwrap_err();
    assert!(format!("{error:#}").contains("invalid namespace configuration"));
    assert!(!output.exists());
}

#[test]
fn test_no_readable_input_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.ttl");
    let opts = options(vec![dir.path().join("absent.csv")], output.clone());

    let error = run_convert(&opts).unwrap_err();
    assert!(format!("{error:#}").contains("no readable input"));
    assert!(!output.exists());
}
