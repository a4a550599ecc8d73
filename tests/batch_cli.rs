use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn kbconvert() -> Command {
    Command::cargo_bin("kbconvert").unwrap()
}

/// Build a one-page PDF containing `text` in Helvetica, with a correct xref
/// table so extraction libraries accept it.
fn minimal_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
    let objects = [
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>\nendobj\n"
            .to_string(),
        "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_string(),
        format!(
            "5 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content.len(),
            content
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for object in &objects {
        offsets.push(pdf.len());
        pdf.extend_from_slice(object.as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = String::from("xref\n0 6\n0000000000 65535 f \n");
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}

#[test]
fn help_lists_subcommands() {
    kbconvert()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdf2md"))
        .stdout(predicate::str::contains("md2doc"))
        .stdout(predicate::str::contains("generate-config"));
}

#[test]
fn no_arguments_shows_usage() {
    kbconvert()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn nonexistent_directory_is_fatal() {
    kbconvert()
        .args(["pdf2md", "-d", "/nonexistent/base_de_conocimiento"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn nonexistent_file_is_fatal() {
    kbconvert()
        .args(["pdf2md", "-f", "/nonexistent/tema1.pdf"])
        .assert()
        .code(2);
}

#[test]
fn file_with_wrong_extension_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("apuntes.txt");
    fs::write(&notes, "plain text").unwrap();

    kbconvert()
        .args(["pdf2md", "-f"])
        .arg(&notes)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pdf"));
}

#[test]
fn file_and_directory_flags_conflict() {
    kbconvert()
        .args(["pdf2md", "-f", "a.pdf", "-d", "apuntes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn empty_directory_succeeds_with_zero_summary() {
    let temp_dir = TempDir::new().unwrap();

    kbconvert()
        .args(["pdf2md", "-d"])
        .arg(temp_dir.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successful: 0"))
        .stdout(predicate::str::contains("Failed: 0"));
}

#[test]
fn pdf_conversion_writes_sibling_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let pdf_path = temp_dir.path().join("tema1.pdf");
    fs::write(&pdf_path, minimal_pdf("Hola curso")).unwrap();

    kbconvert()
        .args(["pdf2md", "-f"])
        .arg(&pdf_path)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successful: 1"))
        .stdout(predicate::str::contains("Failed: 0"));

    let markdown = fs::read_to_string(temp_dir.path().join("tema1.md")).unwrap();
    assert!(markdown.starts_with("# tema1"));
    assert!(markdown.contains("Hola curso"));
}

#[test]
fn corrupt_pdfs_are_reported_but_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("tema1.pdf"), b"not a pdf").unwrap();
    fs::write(temp_dir.path().join("tema2.pdf"), b"also not a pdf").unwrap();

    // Per-file extraction failures leave the exit status clean; the summary
    // carries the failed paths instead.
    kbconvert()
        .args(["pdf2md", "-d"])
        .arg(temp_dir.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed: 2"))
        .stdout(predicate::str::contains("tema1.pdf"))
        .stdout(predicate::str::contains("tema2.pdf"));
}

#[test]
fn json_output_reports_failures() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("roto.pdf"), b"garbage").unwrap();

    // The summary object is pretty-printed, so assert on its fields as text.
    kbconvert()
        .args(["pdf2md", "-d"])
        .arg(temp_dir.path())
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"summary\""))
        .stdout(predicate::str::contains("\"successes\": 0"))
        .stdout(predicate::str::contains("\"failures\": 1"))
        .stdout(predicate::str::contains("roto.pdf"));
}

#[test]
fn generate_config_writes_sample_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("kbconvert.toml");

    kbconvert()
        .arg("generate-config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[roots]"));
    assert!(content.contains("[filters]"));
    assert!(content.contains("[conversion]"));
}

#[test]
fn config_file_is_honored() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "[filters]\nmax_file_size = 0\n",
    )
    .unwrap();

    // Invalid configuration values fail validation before any scanning.
    kbconvert()
        .args(["pdf2md", "-d"])
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(4);
}

#[test]
fn invalid_output_format_value_is_rejected() {
    kbconvert()
        .args(["pdf2md", "--output-format", "yaml"])
        .assert()
        .failure();
}
