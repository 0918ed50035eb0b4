#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;

use tempfile::{tempdir, TempDir};

use ny_tax_stats::config::PipelineConfig;

/// Export in the data.ny.gov layout: an outer `<row>` wrapping the records.
///
/// 2019 lacks `state` and carries the nontaxable liability column;
/// 2020 has an empty taxable liability and 2018 no average tax, so both drop.
pub const SAMPLE_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <row>
    <row _id="row-a" _uuid="a" _position="0" _address="https://data.ny.gov/resource/a">
      <tax_year>2019</tax_year>
      <resident_type>Full-Year Resident</resident_type>
      <place_of_residence>New York City</place_of_residence>
      <country>United States</country>
      <state/>
      <county>Bronx</county>
      <number_of_all_returns>50.0</number_of_all_returns>
      <ny_agi_of_all_returns_in_thousands>1000</ny_agi_of_all_returns_in_thousands>
      <tax_liability_of_all_returns_in_thousands>40</tax_liability_of_all_returns_in_thousands>
      <number_of_taxable_returns>30</number_of_taxable_returns>
      <ny_agi_of_taxable_returns_in_thousands>900</ny_agi_of_taxable_returns_in_thousands>
      <tax_liability_of_taxable_returns_in_thousands>10</tax_liability_of_taxable_returns_in_thousands>
      <number_of_nontaxable_returns>20</number_of_nontaxable_returns>
      <ny_agi_of_nontaxable_returns_in_thousands>100</ny_agi_of_nontaxable_returns_in_thousands>
      <tax_liability_of_nontaxable_returns_in_thousands>5</tax_liability_of_nontaxable_returns_in_thousands>
      <average_ny_agi_of_all_returns>20000.5</average_ny_agi_of_all_returns>
      <average_tax_of_all_returns>800</average_tax_of_all_returns>
      <average_ny_agi_of_taxable_returns>30000</average_ny_agi_of_taxable_returns>
      <average_tax_of_taxable_returns>2</average_tax_of_taxable_returns>
      <average_ny_agi_of_nontaxable_returns>5000</average_ny_agi_of_nontaxable_returns>
      <county_sort_order>3</county_sort_order>
    </row>
    <row _id="row-b" _uuid="b" _position="0">
      <tax_year>2020</tax_year>
      <number_of_all_returns>100</number_of_all_returns>
      <tax_liability_of_taxable_returns_in_thousands></tax_liability_of_taxable_returns_in_thousands>
      <average_tax_of_taxable_returns>500</average_tax_of_taxable_returns>
    </row>
    <row _id="row-c" _uuid="c" _position="0">
      <tax_year>2021</tax_year>
      <resident_type>Full-Year Resident</resident_type>
      <place_of_residence>New York City</place_of_residence>
      <country>United States</country>
      <state>New York</state>
      <county>Kings, Brooklyn</county>
      <number_of_all_returns>120</number_of_all_returns>
      <ny_agi_of_all_returns_in_thousands>1234.78</ny_agi_of_all_returns_in_thousands>
      <tax_liability_of_all_returns_in_thousands>77</tax_liability_of_all_returns_in_thousands>
      <number_of_taxable_returns>90</number_of_taxable_returns>
      <ny_agi_of_taxable_returns_in_thousands>1100</ny_agi_of_taxable_returns_in_thousands>
      <tax_liability_of_taxable_returns_in_thousands>70.9</tax_liability_of_taxable_returns_in_thousands>
      <number_of_nontaxable_returns>30</number_of_nontaxable_returns>
      <ny_agi_of_nontaxable_returns_in_thousands>134</ny_agi_of_nontaxable_returns_in_thousands>
      <average_ny_agi_of_all_returns>10289</average_ny_agi_of_all_returns>
      <average_tax_of_all_returns>641</average_tax_of_all_returns>
      <average_ny_agi_of_taxable_returns>12222</average_ny_agi_of_taxable_returns>
      <average_tax_of_taxable_returns>787.99</average_tax_of_taxable_returns>
      <average_ny_agi_of_nontaxable_returns>4466</average_ny_agi_of_nontaxable_returns>
      <county_sort_order>4</county_sort_order>
    </row>
    <row _id="row-d" _uuid="d" _position="0">
      <tax_year>2018</tax_year>
      <tax_liability_of_taxable_returns_in_thousands>12</tax_liability_of_taxable_returns_in_thousands>
    </row>
    <row _id="row-e" _uuid="e" _position="0">
      <tax_year>2022</tax_year>
      <resident_type>Part-Year Resident</resident_type>
      <place_of_residence>Rest of State</place_of_residence>
      <country>United States</country>
      <state>New York</state>
      <county>Albany</county>
      <number_of_all_returns>80</number_of_all_returns>
      <ny_agi_of_all_returns_in_thousands>2000</ny_agi_of_all_returns_in_thousands>
      <tax_liability_of_all_returns_in_thousands>95</tax_liability_of_all_returns_in_thousands>
      <number_of_taxable_returns>70</number_of_taxable_returns>
      <ny_agi_of_taxable_returns_in_thousands>1950</ny_agi_of_taxable_returns_in_thousands>
      <tax_liability_of_taxable_returns_in_thousands>95</tax_liability_of_taxable_returns_in_thousands>
      <number_of_nontaxable_returns>10</number_of_nontaxable_returns>
      <ny_agi_of_nontaxable_returns_in_thousands>50</ny_agi_of_nontaxable_returns_in_thousands>
      <average_ny_agi_of_all_returns>25000</average_ny_agi_of_all_returns>
      <average_tax_of_all_returns>1187</average_tax_of_all_returns>
      <average_ny_agi_of_taxable_returns>27857</average_ny_agi_of_taxable_returns>
      <average_tax_of_taxable_returns>1357</average_tax_of_taxable_returns>
      <average_ny_agi_of_nontaxable_returns>5000</average_ny_agi_of_nontaxable_returns>
      <county_sort_order>1</county_sort_order>
    </row>
  </row>
</response>
"#;

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Pipeline settings that write the snapshot into this workspace.
    pub fn pipeline_config(&self, source_url: &str) -> PipelineConfig {
        PipelineConfig {
            source_url: source_url.to_string(),
            snapshot_path: self.join("tax_data_cleaned_v6.csv"),
            ..PipelineConfig::default()
        }
    }
}

/// Serve a single HTTP response on a local port and return its URL.
pub fn serve_once(status: u16, reason: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while let Ok(n) = stream.read(&mut chunk) {
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}/api/views/nacg-rg66/rows.xml?accessType=DOWNLOAD")
}

/// URL of a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/rows.xml")
}
