//! End-to-end runs of the x509tojson binary

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn x509tojson_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_x509tojson"))
}

fn run(args: &[&str]) -> Output {
    Command::new(x509tojson_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute")
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    write_temp_bytes(contents.as_bytes())
}

fn write_temp_bytes(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents).expect("Failed to write temp file");
    file
}

fn ec_cert_base64() -> String {
    let csv = std::fs::read_to_string(fixtures_dir().join("certs.csv")).unwrap();
    csv.lines()
        .nth(1)
        .and_then(|line| line.split(',').nth(1))
        .expect("fixture has two lines")
        .to_string()
}

#[test]
fn test_pem_bundle_emits_one_line_per_certificate() {
    let output = run(&[fixtures_dir()
        .join("three-certs-and-key.pem")
        .to_str()
        .unwrap()]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "run failed: {}", stderr);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "Expected 3 JSON lines, got: {}", stdout);
    for line in lines {
        let doc: serde_json::Value =
            serde_json::from_str(line).expect("Each line should be valid JSON");
        assert!(doc.get("subject").is_some(), "Missing subject: {}", line);
    }

    assert!(
        stderr.contains("Loading certificates from"),
        "Progress goes to stderr: {}",
        stderr
    );
    assert!(stderr.contains("(PEM)"));
    assert!(!stdout.contains("Loading certificates"));
}

#[test]
fn test_multiple_files_processed_in_order() {
    let output = run(&[
        fixtures_dir().join("ec-cert.pem").to_str().unwrap(),
        fixtures_dir()
            .join("three-certs-and-key.pem")
            .to_str()
            .unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["subject"]["common_name"][0], "ec.example.com");
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn test_no_files_is_fatal() {
    let output = run(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("No files specified"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_csv_input() {
    let output = run(&[
        "--csv",
        fixtures_dir().join("certs.csv").to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_csv_short_line_is_fatal() {
    let csv = write_temp(&format!("a,{}\nshort\n", ec_cert_base64()));
    let output = run(&["--csv", csv.path().to_str().unwrap()]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(
        stderr.contains(&format!("{}:2", csv.path().display())),
        "stderr should cite file and line: {}",
        stderr
    );
}

#[test]
fn test_csv_invalid_base64_is_fatal() {
    let csv = write_temp("a,this-is-not-base64!\n");
    let output = run(&["--csv", csv.path().to_str().unwrap()]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Malformed base64"), "stderr: {}", stderr);
}

#[test]
fn test_undecodable_blob_is_logged_and_skipped() {
    let csv = write_temp(&format!("bad,AQIDBA==\ngood,{}\n", ec_cert_base64()));
    let output = run(&["--csv", csv.path().to_str().unwrap()]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Decode failures are not fatal");
    assert_eq!(stdout.lines().count(), 1, "Only the valid blob is emitted");
    assert_eq!(
        stderr.lines().filter(|l| l.contains("AQIDBA==")).count(),
        1,
        "Exactly one log line cites the bad blob: {}",
        stderr
    );
}

#[test]
fn test_index_connection_failure_is_fatal() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/ct/certificates/", port);

    let output = run(&[
        "--es",
        "--esurl",
        &url,
        fixtures_dir().join("ec-cert.pem").to_str().unwrap(),
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains(&format!("Sending certificates to {}", url)));
    assert!(output.stdout.is_empty(), "Index mode writes nothing to stdout");
}

#[test]
fn test_config_file_sets_csv_column() {
    let config = write_temp("[csv]\ncolumn = 0\n");
    let csv = write_temp(&format!("{},trailing\n", ec_cert_base64()));

    let output = run(&[
        "--config",
        config.path().to_str().unwrap(),
        "--csv",
        csv.path().to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn test_rows_before_a_fatal_error_are_still_written() {
    let csv = std::fs::read_to_string(fixtures_dir().join("certs.csv")).unwrap();
    let csv = write_temp(&format!("{}bad,***\n", csv));
    let output = run(&["--csv", csv.path().to_str().unwrap()]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert_eq!(stdout.lines().count(), 2, "stdout: {}", stdout);
    assert!(stderr.contains(&format!("Malformed base64 in {}:3", csv.path().display())));
}

#[test]
fn test_fatal_error_is_printed_once() {
    let output = run(&["/nonexistent/bundle.pem"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert_eq!(
        stderr.matches("/nonexistent/bundle.pem").count(),
        2,
        "one progress line and one error line: {}",
        stderr
    );
}

#[test]
fn test_csv_tolerates_non_utf8_in_unused_columns() {
    let mut data = b"caf\xe9.example,".to_vec();
    data.extend_from_slice(ec_cert_base64().as_bytes());
    data.push(b'\n');
    let csv = write_temp_bytes(&data);

    let output = run(&["--csv", csv.path().to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}
