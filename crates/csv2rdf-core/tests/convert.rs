//! End-to-end conversion over files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use csv2rdf_core::{ConvertError, Converter, FileOutcome, convert, convert_inputs};
use csv2rdf_ingest::IngestError;
use csv2rdf_model::{
    ConverterConfig, DiagnosticKind, EntityId, EntityKind, Namespace, Predicate, Value,
};
use tempfile::TempDir;

const ER_HEADER: &str =
    "ER,Customer,Created On,Description,Priority,Product,Request Type,Status,Module,Similar To";

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

fn id(value: &str) -> EntityId {
    EntityId::new(value).expect("valid id")
}

#[test]
fn test_single_enhancement_row_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let er = write_csv(
        dir.path(),
        "er.csv",
        &format!(
            "{ER_HEADER}\nER_ER004,Tesla,22-01-2024,\"Sync \"\"BOM\"\" with PLM\",P1,3DEXPERIENCE,\
             Feature,Go,Collaboration,\"ER_ER025,IR_IR004\"\n"
        ),
    );

    let output = convert(&[er], &ConverterConfig::default()).expect("convert");
    assert!(output.diagnostics.is_empty());

    insta::assert_snapshot!(output.document, @r#"
    @prefix ex: <http://example.org/dassault#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

    ex:ER_ER004 a ex:EnhancementRequest ;
        ex:belongsToCustomer ex:Customer_Tesla ;
        ex:createdOn "22-01-2024"^^xsd:date ;
        ex:description "Sync \"BOM\" with PLM" ;
        ex:isSimilarTo ex:ER_ER025, ex:IR_IR004 ;
        ex:mentionsFunction ex:Module_Collaboration ;
        ex:priority "P1" ;
        ex:product "3DEXPERIENCE" ;
        ex:requestType "Feature" ;
        ex:status "Go" .

    ex:Customer_Tesla a ex:Customer ;
        rdfs:label "Tesla" .

    ex:Module_Collaboration a ex:Module ;
        rdfs:label "Collaboration" .
    "#);

    let customer = output.registry.get(&id("Customer_Tesla")).expect("customer");
    assert_eq!(customer.property_count(), 1);
    let module = output
        .registry
        .get(&id("Module_Collaboration"))
        .expect("module");
    assert_eq!(module.property_count(), 1);

    assert_eq!(output.stats.enhancement_requests, 1);
    assert_eq!(output.stats.customers, 1);
    assert_eq!(output.stats.modules, 1);
    assert_eq!(output.stats.triples, output.triples().len());
}

#[test]
fn test_conversion_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let er = write_csv(
        dir.path(),
        "er.csv",
        "ER,customer,module,date\nER1,Tesla,CAD,2024/03/05\nER2,Airbus,PLM,05/03/2024\n",
    );
    let ir = write_csv(
        dir.path(),
        "ir.csv",
        "IR,customer,title,severity,similar to\nIR9,Airbus,Login fails,High,\"ER2, ER1\"\n",
    );
    let files = [er, ir];
    let config = ConverterConfig::default();

    let first = convert(&files, &config).expect("first run");
    let second = convert(&files, &config).expect("second run");
    assert_eq!(first.document, second.document);
}

#[test]
fn test_customer_deduplicated_across_files() {
    let dir = TempDir::new().expect("temp dir");
    let er = write_csv(dir.path(), "er.csv", "ER,customer\nER1,Tesla\nER2,  Tesla \n");
    let ir = write_csv(dir.path(), "ir.csv", "IR,client\nIR1,Tesla\n");

    let output = convert(&[er, ir], &ConverterConfig::default()).expect("convert");
    assert_eq!(output.stats.customers, 1);
    assert_eq!(output.document.matches("a ex:Customer ").count(), 1);

    for primary in ["ER_ER1", "ER_ER2", "IR_IR1"] {
        let entity = output.registry.get(&id(primary)).expect("primary");
        assert_eq!(
            entity.get(Predicate::BelongsToCustomer),
            Some(&Value::reference(id("Customer_Tesla")))
        );
    }
}

#[test]
fn test_lookalike_customer_labels_stay_distinct() {
    // 61db3f22 is the digest suffix minted for "Foo_Bar"
    let mut converter = Converter::new(ConverterConfig::default());
    converter
        .ingest_bytes("a.csv", b"ER,customer\nER1,Foo_Bar\nER2,Foo Bar 61db3f22\n")
        .expect("ingest");
    let output = converter.finish().expect("finish");

    assert!(output.diagnostics.is_empty());
    assert_eq!(output.registry.count_kind(EntityKind::Customer), 2);
    assert_eq!(
        output.registry.get(&id("ER_ER1")).expect("ER1").get(Predicate::BelongsToCustomer),
        Some(&Value::reference(id("Customer_Foo_Bar__61db3f22")))
    );
    assert_eq!(
        output.registry.get(&id("ER_ER2")).expect("ER2").get(Predicate::BelongsToCustomer),
        Some(&Value::reference(id("Customer_Foo_Bar_61db3f22")))
    );
    let lookalike = output.registry.get(&id("Customer_Foo_Bar_61db3f22")).expect("customer");
    assert_eq!(lookalike.get(Predicate::Label), Some(&Value::text("Foo Bar 61db3f22")));
}

#[test]
fn test_derived_ids_ignore_first_mention_order() {
    let dir = TempDir::new().expect("temp dir");
    let a = write_csv(dir.path(), "a.csv", "ER,customer,module\nER1,Société Générale,Digital Twin\n");
    let b = write_csv(dir.path(), "b.csv", "IR,customer,module\nIR1,Digital Twin,Société Générale\n");
    let config = ConverterConfig::default();

    let forward = convert(&[a.clone(), b.clone()], &config).expect("forward");
    let backward = convert(&[b, a], &config).expect("backward");

    let derived = |output: &csv2rdf_core::ConversionOutput| {
        let mut ids: Vec<String> = output
            .registry
            .entities()
            .filter(|entity| !entity.kind.is_primary())
            .map(|entity| entity.id.to_string())
            .collect();
        ids.sort();
        ids
    };
    assert_eq!(derived(&forward), derived(&backward));
    assert_eq!(derived(&forward).len(), 4);
    assert!(derived(&forward).contains(&"Module_Digital_Twin".to_string()));
}

#[test]
fn test_dangling_references_are_kept() {
    let dir = TempDir::new().expect("temp dir");
    let er = write_csv(dir.path(), "er.csv", "ER,similar to\nER1,\"ER_ER999, IR_IR004\"\n");

    let output = convert(&[er], &ConverterConfig::default()).expect("convert");
    assert!(output.diagnostics.is_empty());
    assert!(
        output
            .document
            .contains("    ex:isSimilarTo ex:ER_ER999, ex:IR_IR004 .\n")
    );
    assert_eq!(output.registry.dangling_references().len(), 2);
}

#[test]
fn test_forward_references_resolve_to_later_declarations() {
    let dir = TempDir::new().expect("temp dir");
    let er = write_csv(dir.path(), "er.csv", "ER,similar to\nER1,IR7\n");
    let ir = write_csv(dir.path(), "ir.csv", "IR,title\nIR7,Crash\n");

    let output = convert(&[er, ir], &ConverterConfig::default()).expect("convert");
    assert!(output.registry.dangling_references().is_empty());
    // not mirrored back onto the target
    let target = output.registry.get(&id("IR_IR7")).expect("ir");
    assert!(target.get(Predicate::IsSimilarTo).is_none());
}

#[test]
fn test_repeated_primary_id_merges_properties() {
    let dir = TempDir::new().expect("temp dir");
    let first = write_csv(dir.path(), "1.csv", "ER,priority,status\nER1,P1,Open\n");
    let second = write_csv(dir.path(), "2.csv", "ER,priority,status\nER1,,Closed\n");

    let output = convert(&[first, second], &ConverterConfig::default()).expect("convert");
    let entity = output.registry.get(&id("ER_ER1")).expect("er");
    assert_eq!(entity.get(Predicate::Priority), Some(&Value::text("P1")));
    assert_eq!(entity.get(Predicate::Status), Some(&Value::text("Closed")));
    assert_eq!(output.stats.enhancement_requests, 1);
    assert_eq!(output.stats.rows_committed, 2);
}

#[test]
fn test_missing_file_does_not_abort_run() {
    let dir = TempDir::new().expect("temp dir");
    let good = write_csv(dir.path(), "er.csv", "ER\nER1\n");
    let missing = dir.path().join("absent.csv");

    let output = convert(&[missing.clone(), good], &ConverterConfig::default()).expect("convert");
    assert_eq!(output.stats.files_read, 1);
    assert_eq!(output.stats.files_failed, 1);
    assert_eq!(output.diagnostics.count(DiagnosticKind::FileNotFound), 1);
    assert_eq!(
        output.diagnostics.failed_sources(),
        vec![missing.display().to_string()]
    );
    assert!(output.document.contains("ex:ER_ER1 a ex:EnhancementRequest ."));
}

#[test]
fn test_no_readable_input_fails_run() {
    let dir = TempDir::new().expect("temp dir");
    let result = convert(
        &[dir.path().join("a.csv"), dir.path().join("b.csv")],
        &ConverterConfig::default(),
    );
    assert!(matches!(
        result,
        Err(ConvertError::NoReadableInput { failed: 2 })
    ));

    let empty: [PathBuf; 0] = [];
    assert!(matches!(
        convert(&empty, &ConverterConfig::default()),
        Err(ConvertError::NoReadableInput { failed: 0 })
    ));
}

#[test]
fn test_unreadable_path_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let mut converter = Converter::new(ConverterConfig::default());

    let outcome = converter.ingest_path(dir.path()).expect("ingest");
    assert_eq!(outcome, FileOutcome::Failed(DiagnosticKind::FileUnreadable));
    assert_eq!(converter.diagnostics().count(DiagnosticKind::FileUnreadable), 1);
}

#[test]
fn test_unlisted_directory_costs_only_its_own_input() {
    let mut converter = Converter::new(ConverterConfig::default());
    let locked = Path::new("/data/locked");
    let error = IngestError::DirectoryRead {
        path: locked.to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };

    let outcome = converter.record_input_failure(locked, &error);
    assert_eq!(outcome, FileOutcome::Failed(DiagnosticKind::FileUnreadable));
    converter
        .ingest_bytes("er.csv", b"ER,customer\nER1,Tesla\n")
        .expect("ingest");

    let output = converter.finish().expect("finish");
    assert_eq!(output.stats.files_failed, 1);
    assert_eq!(output.stats.files_read, 1);
    let diagnostic = output.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.kind, DiagnosticKind::FileUnreadable);
    assert_eq!(diagnostic.source, locked.display().to_string());
    assert!(output.document.contains("ex:ER_ER1 a ex:EnhancementRequest ;\n"));
}

#[test]
fn test_convert_inputs_expands_directories() {
    let dir = TempDir::new().expect("temp dir");
    let data = dir.path().join("data");
    fs::create_dir(&data).expect("mkdir");
    write_csv(&data, "b.csv", "IR,customer\nIR1,Tesla\n");
    write_csv(&data, "a.csv", "ER,customer\nER1,Tesla\n");
    let missing = dir.path().join("missing.csv");

    let output =
        convert_inputs(&[data.clone(), missing], &ConverterConfig::default()).expect("convert");
    let sources: Vec<&str> = output.files.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(
        sources,
        vec![
            data.join("a.csv").display().to_string(),
            data.join("b.csv").display().to_string(),
        ]
    );
    assert_eq!(output.stats.files_failed, 1);
    assert_eq!(output.stats.customers, 1);
}

#[test]
fn test_in_memory_uploads_and_custom_namespace() {
    let namespace = Namespace::new("ds", "http://example.com/ds#").expect("namespace");
    let mut converter = Converter::new(ConverterConfig::new(namespace));

    let outcome = converter
        .ingest_bytes("upload.csv", b"IR,customer,created\nIR-17,Soci\xE9t\xE9,31/12/2023\n")
        .expect("ingest");
    let FileOutcome::Read(summary) = outcome else {
        panic!("upload should be readable");
    };
    assert_eq!(summary.encoding.name(), "ISO-8859-1");
    assert_eq!(summary.rows_committed, 1);

    let output = converter.finish().expect("finish");
    assert!(output.document.starts_with("@prefix ds: <http://example.com/ds#> .\n"));
    assert!(output.document.contains("ds:IR_17 a ds:IncidentReport ;\n"));
    assert!(output.document.contains("    ds:createdOn \"31-12-2023\"^^xsd:date .\n"));
    assert!(output.document.contains("    rdfs:label \"Société\" .\n"));
}

#[test]
fn test_row_diagnostics_are_collected() {
    let dir = TempDir::new().expect("temp dir");
    let er = write_csv(
        dir.path(),
        "er.csv",
        "ER,date,priority\n,2024-01-01,P1\nER2,not a date,P2\n",
    );
    let other = write_csv(dir.path(), "other.csv", "customer\nTesla\n");

    let output = convert(&[er, other], &ConverterConfig::default()).expect("convert");
    let kinds: Vec<DiagnosticKind> = output.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::MissingIdentifier,
            DiagnosticKind::UnparseableDate,
            DiagnosticKind::SkippedRow,
        ]
    );
    assert_eq!(output.stats.rows_seen, 3);
    assert_eq!(output.stats.rows_committed, 1);
    assert_eq!(output.stats.rows_skipped, 2);
    assert_eq!(output.registry.count_kind(EntityKind::Customer), 0);
}
