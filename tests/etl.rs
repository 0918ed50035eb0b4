mod common;

use std::fs;

use csv::ReaderBuilder;
use ny_tax_stats::data::{Column, DataLoader, NetworkError, TaxRecord};
use ny_tax_stats::etl::{self, EtlError};
use reqwest::StatusCode;

use common::{serve_once, unreachable_url, TestWorkspace, SAMPLE_EXPORT};

fn read_snapshot(path: &std::path::Path) -> Vec<TaxRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .expect("open snapshot");
    reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("decode snapshot")
}

#[test]
fn process_drops_rows_missing_required_fields() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");

    let report = etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("process");
    assert_eq!(report.rows_in, 5);
    assert_eq!(report.rows_dropped, 2);
    assert_eq!(report.rows_out, 3);
    assert!(report.dropped_column);

    let years: Vec<i64> = read_snapshot(&config.snapshot_path)
        .iter()
        .map(|r| r.tax_year)
        .collect();
    assert_eq!(years, vec![2019, 2021, 2022]);
}

#[test]
fn snapshot_header_excludes_nontaxable_liability() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");
    etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("process");

    let text = fs::read_to_string(&config.snapshot_path).expect("read snapshot");
    let header: Vec<&str> = text.lines().next().expect("header").split(',').collect();
    let expected: Vec<&str> = Column::cleaned().map(|c| c.name()).collect();
    assert_eq!(header, expected);
    assert!(!text.contains("tax_liability_of_nontaxable_returns_in_thousands"));
}

#[test]
fn snapshot_has_no_empty_cells() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");
    etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("process");

    let mut reader = ReaderBuilder::new()
        .from_path(&config.snapshot_path)
        .expect("open snapshot");
    for record in reader.records() {
        let record = record.expect("record");
        assert_eq!(record.len(), 20);
        assert!(record.iter().all(|cell| !cell.is_empty()), "{record:?}");
    }
}

#[test]
fn fills_defaults_and_truncates_floats() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");
    etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("process");

    let rows = read_snapshot(&config.snapshot_path);
    let first = &rows[0];
    assert_eq!(first.state, "unknown");
    assert_eq!(first.number_of_all_returns, 50);
    assert_eq!(first.average_ny_agi_of_all_returns, 20000);

    let second = &rows[1];
    assert_eq!(second.county, "Kings, Brooklyn");
    assert_eq!(second.ny_agi_of_all_returns_in_thousands, 1234);
    assert_eq!(second.tax_liability_of_taxable_returns_in_thousands, 70);
    assert_eq!(second.average_tax_of_taxable_returns, 787);
}

#[test]
fn snapshot_round_trips_through_loader() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");
    etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("process");

    let mut loader = DataLoader::new();
    loader.load_csv(&config.snapshot_path).expect("load");
    let expected: Vec<String> = Column::cleaned().map(|c| c.name().to_string()).collect();
    assert_eq!(loader.get_columns(), expected);
    assert_eq!(loader.get_row_count(), 3);
    assert_eq!(
        loader.column_values("tax_year").expect("years"),
        vec![Some(2019.0), Some(2021.0), Some(2022.0)]
    );
    assert_eq!(
        loader
            .column_values("ny_agi_of_all_returns_in_thousands")
            .expect("agi"),
        vec![Some(1000.0), Some(1234.0), Some(2000.0)]
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");

    etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("first run");
    let first = fs::read(&config.snapshot_path).expect("first snapshot");
    etl::process(SAMPLE_EXPORT.as_bytes(), &config).expect("second run");
    let second = fs::read(&config.snapshot_path).expect("second snapshot");

    assert_eq!(first, second);
}

#[test]
fn all_rows_dropped_still_writes_header() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");
    let payload = r#"<response><row><row>
        <tax_year>2020</tax_year>
        <county>Bronx</county>
        <average_tax_of_taxable_returns>500</average_tax_of_taxable_returns>
    </row></row></response>"#;

    let report = etl::process(payload.as_bytes(), &config).expect("process");
    assert_eq!(report.rows_in, 1);
    assert_eq!(report.rows_out, 0);

    let text = fs::read_to_string(&config.snapshot_path).expect("read snapshot");
    let expected: Vec<&str> = Column::cleaned().map(|c| c.name()).collect();
    assert_eq!(text, format!("{}\n", expected.join(",")));
    assert!(read_snapshot(&config.snapshot_path).is_empty());
}

#[test]
fn malformed_payload_writes_nothing() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config("unused");

    let err = etl::process(b"<response><row><tax_year>2020</county></row>", &config)
        .unwrap_err();
    assert!(matches!(err, EtlError::Parse(_)));
    assert!(!config.snapshot_path.exists());
}

#[test]
fn not_found_status_aborts_without_output() {
    let workspace = TestWorkspace::new();
    let url = serve_once(404, "Not Found", "missing");
    let config = workspace.pipeline_config(&url);

    let err = etl::run(&config).unwrap_err();
    match err {
        EtlError::Network(ref e @ NetworkError::Status(_)) => {
            assert_eq!(e.status(), Some(StatusCode::NOT_FOUND));
            assert!(e.to_string().contains("404"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(!config.snapshot_path.exists());
}

#[test]
fn successful_download_writes_snapshot() {
    let workspace = TestWorkspace::new();
    let url = serve_once(200, "OK", SAMPLE_EXPORT);
    let config = workspace.pipeline_config(&url);

    let report = etl::run(&config).expect("run");
    assert_eq!(report.rows_out, 3);
    assert_eq!(read_snapshot(&config.snapshot_path).len(), 3);
}

#[test]
fn refused_connection_is_a_transport_error() {
    let workspace = TestWorkspace::new();
    let config = workspace.pipeline_config(&unreachable_url());

    let err = etl::run(&config).unwrap_err();
    assert!(
        matches!(err, EtlError::Network(NetworkError::Transport(_))),
        "expected transport error, got {err:?}"
    );
    assert!(!config.snapshot_path.exists());
}
