//! Plain-text extraction from DOCX documents.
//!
//! The validator only ever sees a single normalized text blob; this module
//! produces it by streaming over `word/document.xml` and concatenating the
//! text runs of each paragraph. Paragraphs are joined with a blank line.

use crate::container::DocxContainer;
use crate::error::Result;
use quick_xml::events::Event;
use std::path::Path;

/// Extract the paragraph text of a DOCX file as a single string.
///
/// # Example
///
/// ```no_run
/// use docqa::docx::extract_text;
///
/// let text = extract_text("report.docx")?;
/// println!("{}", text);
/// # Ok::<(), docqa::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let container = DocxContainer::open(path)?;
    extract_from_container(&container)
}

/// Extract paragraph text from in-memory DOCX bytes.
pub fn extract_text_from_bytes(data: Vec<u8>) -> Result<String> {
    let container = DocxContainer::from_bytes(data)?;
    extract_from_container(&container)
}

fn extract_from_container(container: &DocxContainer) -> Result<String> {
    let xml = container.read_xml("word/document.xml")?;
    parse_paragraphs(&xml)
}

/// Collect `w:t` runs per `w:p` element, joining paragraphs with `"\n\n"`.
///
/// Explicit breaks (`w:br`, `w:cr`) become `\n` and `w:tab` becomes `\t` so
/// intra-paragraph structure survives into the extracted text. Empty
/// paragraphs are dropped.
fn parse_paragraphs(xml: &str) -> Result<String> {
    let mut reader = quick_xml::Reader::from_reader(xml.as_bytes());

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text_run = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" if in_paragraph => {
                    in_text_run = true;
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) if in_paragraph => match e.name().as_ref() {
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:tab" => current.push('\t'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text_run => {
                let text = e.unescape().unwrap_or_default();
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => {
                    in_text_run = false;
                }
                b"w:p" => {
                    in_paragraph = false;
                    if !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n\n"))
}
