use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_document_to_markdown_outputs_text() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("notes.pdf");
    std::fs::write(&file_path, "This is not a valid PDF file content")?;

    let output = Command::new(env!("CARGO_BIN_EXE_mcp-docs"))
        .args([
            "document-to-markdown",
            "--path",
            file_path.to_string_lossy().as_ref(),
        ])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("This is not a valid PDF file content"));
    Ok(())
}

#[test]
fn cli_document_to_markdown_reports_unsupported_format() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("notes.txt");
    std::fs::write(&file_path, "plain")?;

    let output = Command::new(env!("CARGO_BIN_EXE_mcp-docs"))
        .args([
            "document-to-markdown",
            "--path",
            file_path.to_string_lossy().as_ref(),
        ])
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("unsupported file type"));
    Ok(())
}

#[test]
fn cli_binary_to_markdown_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("table.csv");
    std::fs::write(&file_path, "name,qty\nbolt,4\n")?;

    let output = Command::new(env!("CARGO_BIN_EXE_mcp-docs"))
        .args([
            "binary-to-markdown",
            "--input",
            file_path.to_string_lossy().as_ref(),
            "--file-type",
            "csv",
            "--json",
        ])
        .output()?;

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let markdown = value
        .get("result")
        .and_then(|v| v.as_str())
        .expect("result present");
    assert!(markdown.starts_with("| name | qty |"));
    Ok(())
}

#[test]
fn cli_add_prints_sum() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_mcp-docs"))
        .args(["add", "--a", "-2", "--b", "4.5"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.trim(), "2.5");
    Ok(())
}
