use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

#[test]
fn tools_list_includes_expected_tools() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-docs"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    });
    let serialized = serde_json::to_string(&request)?;
    writeln!(stdin, "{serialized}")?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;

    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    let tools = response
        .get("result")
        .and_then(|value| value.get("tools"))
        .and_then(|value| value.as_array())
        .expect("tools array present");

    let names: Vec<&str> = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|value| value.as_str()))
        .collect();
    assert_eq!(
        names,
        [
            "add",
            "binary_document_to_markdown",
            "document_path_to_markdown"
        ]
    );

    let expected_params: [&[&str]; 3] = [&["a", "b"], &["binary_data", "file_type"], &["file_path"]];
    for (tool, expected) in tools.iter().zip(expected_params) {
        let schema = tool.get("inputSchema").expect("inputSchema present");
        let properties: Vec<&str> = schema
            .get("properties")
            .and_then(|value| value.as_object())
            .expect("properties present")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(properties, expected);

        let required: Vec<&str> = schema
            .get("required")
            .and_then(|value| value.as_array())
            .expect("required present")
            .iter()
            .filter_map(|value| value.as_str())
            .collect();
        assert_eq!(required, expected);

        for name in expected {
            let description = schema
                .get("properties")
                .and_then(|value| value.get(*name))
                .and_then(|value| value.get("description"))
                .and_then(|value| value.as_str())
                .expect("description present");
            assert!(!description.is_empty());
        }
    }

    let _ = child.kill();
    Ok(())
}
