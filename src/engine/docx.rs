use super::text::render_table;
use crate::error::EngineError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::{Cursor, Read};
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn to_markdown(bytes: &[u8]) -> Result<String, EngineError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Err(EngineError::MissingPart(DOCUMENT_PART)),
        Err(err) => return Err(err.into()),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(render(&xml)?)
}

#[derive(Default)]
struct Paragraph {
    heading: Option<usize>,
    list_item: bool,
    text: String,
    run: Option<Run>,
    table_depth: usize,
    // Set after inlined text-box content; the next text gets a separating space.
    gap: bool,
}

#[derive(Default)]
struct Run {
    bold: bool,
    italic: bool,
    text: String,
}

#[derive(Default)]
struct Table {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: Vec<String>,
}

/// Walks `word/document.xml` and emits one markdown block per body
/// paragraph or top-level table. Nested tables are flattened into the
/// enclosing cell. Paragraphs nested inside another paragraph (text boxes,
/// shapes) are folded into the enclosing paragraph's text; the
/// `mc:Fallback` copy of such content is skipped.
#[derive(Default)]
struct Renderer {
    blocks: Vec<String>,
    paragraphs: Vec<Paragraph>,
    in_text: bool,
    table_depth: usize,
    table: Table,
    fallback_depth: usize,
}

fn render(xml: &str) -> quick_xml::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut renderer = Renderer::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => renderer.open(&element)?,
            Event::Empty(element) => {
                renderer.open(&element)?;
                renderer.close(element.name().as_ref());
            }
            Event::End(element) => renderer.close(element.name().as_ref()),
            Event::Text(text) if renderer.in_text => {
                let text = text.unescape()?;
                renderer.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(renderer.blocks.join("\n\n"))
}

impl Renderer {
    fn open(&mut self, element: &BytesStart<'_>) -> quick_xml::Result<()> {
        let name = element.name();
        if name.as_ref() == b"mc:Fallback" {
            self.fallback_depth += 1;
        }
        if self.fallback_depth > 0 {
            return Ok(());
        }

        match name.as_ref() {
            b"w:p" => self.paragraphs.push(Paragraph {
                table_depth: self.table_depth,
                ..Paragraph::default()
            }),
            b"w:pStyle" => {
                if let Some(paragraph) = self.paragraphs.last_mut() {
                    paragraph.heading = heading_level(&attribute(element, "w:val")?);
                }
            }
            b"w:numPr" => {
                if let Some(paragraph) = self.paragraphs.last_mut() {
                    paragraph.list_item = true;
                }
            }
            b"w:r" => {
                if let Some(paragraph) = self.paragraphs.last_mut() {
                    paragraph.run = Some(Run::default());
                }
            }
            b"w:b" => {
                let enabled = toggle_enabled(element)?;
                if let Some(run) = self.run_mut() {
                    run.bold = enabled;
                }
            }
            b"w:i" => {
                let enabled = toggle_enabled(element)?;
                if let Some(run) = self.run_mut() {
                    run.italic = enabled;
                }
            }
            b"w:t" => self.in_text = true,
            b"w:tab" => self.push_text("\t"),
            b"w:br" | b"w:cr" => self.push_text("\n"),
            b"w:tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = Table::default();
                }
            }
            b"w:tr" if self.table_depth == 1 => self.table.row.clear(),
            b"w:tc" if self.table_depth == 1 => self.table.cell.clear(),
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        if self.fallback_depth > 0 {
            if name == b"mc:Fallback" {
                self.fallback_depth -= 1;
            }
            return;
        }

        match name {
            b"w:t" => self.in_text = false,
            b"w:r" => {
                if let Some(paragraph) = self.paragraphs.last_mut() {
                    paragraph.flush_run();
                    paragraph.run = None;
                }
            }
            b"w:p" => {
                if let Some(paragraph) = self.paragraphs.pop() {
                    self.finish_paragraph(paragraph);
                }
            }
            b"w:tc" if self.table_depth == 1 => {
                let cell = std::mem::take(&mut self.table.cell).join(" ");
                self.table.row.push(cell);
            }
            b"w:tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.table.row);
                self.table.rows.push(row);
            }
            b"w:tbl" => {
                self.table_depth = self.table_depth.saturating_sub(1);
                if self.table_depth == 0 {
                    let table = render_table(&std::mem::take(&mut self.table.rows));
                    if !table.is_empty() {
                        self.blocks.push(table);
                    }
                }
            }
            _ => {}
        }
    }

    fn run_mut(&mut self) -> Option<&mut Run> {
        self.paragraphs.last_mut()?.run.as_mut()
    }

    // Tabs and breaks only count inside a run; the same element names appear
    // in paragraph properties.
    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run_mut() {
            run.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self, mut paragraph: Paragraph) {
        paragraph.flush_run();
        let text = paragraph.text.trim();
        if text.is_empty() {
            return;
        }

        if let Some(outer) = self.paragraphs.last_mut()
            && outer.table_depth == self.table_depth
        {
            outer.inline(text);
            return;
        }

        if self.table_depth > 0 {
            self.table.cell.push(text.to_string());
            return;
        }

        let block = match (paragraph.heading, paragraph.list_item) {
            (Some(level), _) => format!("{} {text}", "#".repeat(level)),
            (None, true) => format!("- {text}"),
            (None, false) => text.to_string(),
        };
        self.blocks.push(block);
    }
}

impl Paragraph {
    fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.gap {
            let joined = self.text.is_empty()
                || self.text.ends_with(char::is_whitespace)
                || text.starts_with(char::is_whitespace);
            if !joined {
                self.text.push(' ');
            }
            self.gap = false;
        }
        self.text.push_str(text);
    }

    // Moves the open run's text into the paragraph, keeping its formatting
    // for any text that follows.
    fn flush_run(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let pending = Run {
            bold: run.bold,
            italic: run.italic,
            text: std::mem::take(&mut run.text),
        };
        self.append(&pending.render());
    }

    fn inline(&mut self, text: &str) {
        self.flush_run();
        self.gap = true;
        self.append(text);
        self.gap = true;
    }
}

impl Run {
    fn render(self) -> String {
        let marker = match (self.bold, self.italic) {
            (true, true) => "***",
            (true, false) => "**",
            (false, true) => "*",
            (false, false) => return self.text,
        };

        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return self.text;
        }
        let start = self.text.len() - self.text.trim_start().len();
        let end = start + trimmed.len();
        format!(
            "{}{marker}{trimmed}{marker}{}",
            &self.text[..start],
            &self.text[end..]
        )
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> quick_xml::Result<String> {
    match element.try_get_attribute(name)? {
        Some(value) => Ok(value.unescape_value()?.into_owned()),
        None => Ok(String::new()),
    }
}

// `<w:b/>` switches formatting on; `w:val` of 0/false/off switches it off.
fn toggle_enabled(element: &BytesStart<'_>) -> quick_xml::Result<bool> {
    let value = attribute(element, "w:val")?;
    Ok(!matches!(value.as_str(), "0" | "false" | "off"))
}

fn heading_level(style: &str) -> Option<usize> {
    let style = style.to_ascii_lowercase();
    if style == "title" {
        return Some(1);
    }
    let level: usize = style.strip_prefix("heading")?.trim().parse().ok()?;
    Some(level.clamp(1, 6))
}
