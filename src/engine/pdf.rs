use crate::error::EngineError;
use lopdf::Document;

pub(super) fn to_markdown(bytes: &[u8]) -> Result<String, EngineError> {
    let document = Document::load_mem(bytes)?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        let text = document.extract_text(&[page_number])?;
        let page = tidy_page(&text);
        if !page.is_empty() {
            pages.push(page);
        }
    }

    Ok(pages.join("\n\n"))
}

// Trailing whitespace is dropped and runs of blank lines collapse to one.
fn tidy_page(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().is_none_or(|last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
