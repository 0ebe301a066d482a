use crate::error::ScheduleError;
use crate::extraction::{PageWords, Word, WordExtractor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox`, which reports every word together with its
/// bounding box, one `<page>` element per page in document order.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, ScheduleError> {
        // The temp file is the only handle on the document; it is removed
        // when `tmpfile` drops, on every return path.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ScheduleError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ScheduleError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScheduleError::PdftotextNotFound
                } else {
                    ScheduleError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ScheduleError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml)?;
        tracing::debug!(pages = pages.len(), "pdftotext extraction finished");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse the XHTML produced by `pdftotext -bbox` into per-page words.
fn parse_bbox_xml(xml: &str) -> Result<Vec<PageWords>, ScheduleError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    // The document is XHTML-ish; don't reject it over mismatched head tags.
    reader.config_mut().check_end_names = false;

    let mut pages = Vec::new();
    let mut current_page: Option<Vec<Word>> = None;
    let mut current_word: Option<Word> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => current_page = Some(Vec::new()),
                b"word" => current_word = Some(parse_word_box(&e)?),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"page" {
                    pages.push(PageWords {
                        page_number: pages.len() + 1,
                        words: Vec::new(),
                    });
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(word) = current_word.as_mut() {
                    let text = t.unescape().map_err(xml_error)?;
                    word.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"word" => {
                    if let (Some(mut word), Some(page)) =
                        (current_word.take(), current_page.as_mut())
                    {
                        word.text = word.text.trim().to_string();
                        if !word.text.is_empty() {
                            page.push(word);
                        }
                    }
                }
                b"page" => {
                    if let Some(words) = current_page.take() {
                        pages.push(PageWords {
                            page_number: pages.len() + 1,
                            words,
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    Ok(pages)
}

fn parse_word_box(tag: &BytesStart<'_>) -> Result<Word, ScheduleError> {
    let mut x_min = None;
    let mut y_min = None;
    let mut x_max = None;
    let mut y_max = None;

    for attr in tag.attributes() {
        let attr = attr.map_err(|e| ScheduleError::Extraction(format!("bad attribute: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(xml_error)?
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite());
        match attr.key.as_ref() {
            b"xMin" => x_min = value,
            b"yMin" => y_min = value,
            b"xMax" => x_max = value,
            b"yMax" => y_max = value,
            _ => {}
        }
    }

    match (x_min, y_min, x_max, y_max) {
        (Some(x0), Some(top), Some(x1), Some(bottom)) => Ok(Word {
            text: String::new(),
            x0,
            x1,
            top,
            bottom,
            size: Some(bottom - top),
        }),
        _ => Err(ScheduleError::Extraction(
            "word element without a complete bounding box".into(),
        )),
    }
}

fn xml_error(e: quick_xml::Error) -> ScheduleError {
    ScheduleError::Extraction(format!("malformed pdftotext output: {e}"))
}
