use crate::error::EngineError;

const TEXT_FORMATS: &[&str] = &[
    "txt", "text", "md", "markdown", "json", "xml", "html", "htm",
];

pub(super) fn is_text_format(format: &str) -> bool {
    TEXT_FORMATS.contains(&format)
}

/// Returns the bytes as text when they are UTF-8 without control
/// characters other than whitespace. The text is returned as-is, including
/// any leading byte-order mark.
pub(super) fn decode(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.chars()
        .all(|c| !c.is_control() || c.is_whitespace())
        .then_some(text)
}

pub(super) fn passthrough(bytes: &[u8], format: &str) -> Result<String, EngineError> {
    decode(bytes)
        .map(str::to_string)
        .ok_or_else(|| EngineError::NotText {
            format: format.to_string(),
        })
}

/// Renders CSV as a markdown table; the first record is the header.
pub(super) fn csv_to_markdown(bytes: &[u8]) -> Result<String, EngineError> {
    let text = decode(bytes).ok_or_else(|| EngineError::NotText {
        format: "csv".to_string(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    Ok(render_table(&parse_records(text)))
}

/// Splits CSV text into records. Quoted fields may contain commas, doubled
/// quotes and line breaks. Blank lines are skipped.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            '\n' if !quoted => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    push_record(&mut records, fields);
    records
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(fields);
    }
}

/// Shared by the CSV and DOCX converters. Short rows are padded to the
/// widest row.
pub(super) fn render_table(rows: &[Vec<String>]) -> String {
    let Some(width) = rows.iter().map(Vec::len).max() else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = (0..width)
            .map(|column| {
                row.get(column)
                    .map(|cell| escape_cell(cell))
                    .unwrap_or_default()
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            lines.push(format!("|{}", " --- |".repeat(width)));
        }
    }
    lines.join("\n")
}

fn escape_cell(cell: &str) -> String {
    cell.trim()
        .replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
