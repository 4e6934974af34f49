//! XML exchange document for bulk import/export.
//!
//! # Responsibility
//! - Produce `<notes><note>…</note></notes>` documents from note records.
//! - Parse such documents strictly: every record must carry all four fields
//!   with a parseable id and timestamp.
//!
//! # Invariants
//! - Text content is escaped on write and unescaped on read; titles and
//!   bodies survive the round trip verbatim.
//! - Unknown elements are skipped, not rejected.

use crate::model::note::{Note, NoteId};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WireResult<T> = Result<T, WireError>;

/// Exchange document failure: transport variants plus record-shape variants.
///
/// Record-shape errors carry the zero-based record index so the caller can
/// point at the offending `<note>` entry.
#[derive(Debug)]
pub enum WireError {
    Xml(quick_xml::Error),
    Io(std::io::Error),
    Utf8(std::string::FromUtf8Error),
    MissingField { record: usize, field: &'static str },
    InvalidId { record: usize, value: String },
    InvalidTimestamp { record: usize, value: String },
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml(err) => write!(f, "malformed document: {err}"),
            Self::Io(err) => write!(f, "document i/o failed: {err}"),
            Self::Utf8(err) => write!(f, "document is not valid UTF-8: {err}"),
            Self::MissingField { record, field } => {
                write!(f, "note record {record} is missing <{field}>")
            }
            Self::InvalidId { record, value } => {
                write!(f, "note record {record} has a non-integer id `{value}`")
            }
            Self::InvalidTimestamp { record, value } => write!(
                f,
                "note record {record} has an unparseable timestamp `{value}`"
            ),
        }
    }
}

impl Error for WireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Xml(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for WireError {
    fn from(value: quick_xml::Error) -> Self {
        Self::Xml(value)
    }
}

impl From<std::io::Error> for WireError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<std::string::FromUtf8Error> for WireError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::Utf8(value)
    }
}

/// Serializes notes into the pretty-printed exchange document.
pub fn serialize_notes(notes: &[Note]) -> WireResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Start(BytesStart::new("notes")))?;
    for note in notes {
        writer.write_event(Event::Start(BytesStart::new("note")))?;
        write_field(&mut writer, "id", &note.id.to_string())?;
        write_field(&mut writer, "title", &note.title)?;
        write_field(&mut writer, "body", &note.body)?;
        // AutoSi keeps every sub-second digit the stamp actually carries, so
        // a parse of the exported document reproduces the value exactly.
        write_field(
            &mut writer,
            "updated",
            &note.updated.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )?;
        writer.write_event(Event::End(BytesEnd::new("note")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("notes")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_field<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &'static str,
    value: &str,
) -> WireResult<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(value))?;
    Ok(())
}

/// Parses an exchange document into note records.
///
/// Field values are taken verbatim; in particular `updated` is not
/// regenerated, so imported timestamps survive as supplied.
pub fn parse_notes(document: &str) -> WireResult<Vec<Note>> {
    let mut reader = Reader::from_str(document);
    let mut notes = Vec::new();
    let mut current: Option<RawRecord> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = start.name();
                match name.as_ref() {
                    b"notes" => {}
                    b"note" => current = Some(RawRecord::default()),
                    b"id" | b"title" | b"body" | b"updated" => {
                        if let Some(record) = current.as_mut() {
                            let field = field_name(name.as_ref());
                            // read_text hands back the raw inner text;
                            // entities still need decoding here.
                            let raw = reader.read_text(name)?;
                            let value = quick_xml::escape::unescape(raw.as_ref())
                                .map_err(quick_xml::Error::EscapeError)?
                                .into_owned();
                            record.set(field, value);
                        } else {
                            // Field outside any <note>; skip it like any
                            // other unknown content.
                            reader.read_to_end(name)?;
                        }
                    }
                    _ => {
                        reader.read_to_end(name)?;
                    }
                }
            }
            Event::Empty(start) => {
                if let Some(record) = current.as_mut() {
                    let name = start.name();
                    if matches!(name.as_ref(), b"id" | b"title" | b"body" | b"updated") {
                        record.set(field_name(name.as_ref()), String::new());
                    }
                }
            }
            Event::End(end) if end.name().as_ref() == b"note" => {
                if let Some(record) = current.take() {
                    notes.push(record.finalize(notes.len())?);
                }
            }
            Event::Eof => break,
            // Inter-element whitespace from pretty-printing, comments, the
            // XML declaration: all irrelevant to the record shape.
            _ => {}
        }
    }

    Ok(notes)
}

fn field_name(raw: &[u8]) -> &'static str {
    match raw {
        b"id" => "id",
        b"title" => "title",
        b"body" => "body",
        _ => "updated",
    }
}

/// Accumulator for one `<note>` element while its children stream past.
#[derive(Debug, Default)]
struct RawRecord {
    id: Option<String>,
    title: Option<String>,
    body: Option<String>,
    updated: Option<String>,
}

impl RawRecord {
    fn set(&mut self, field: &'static str, value: String) {
        match field {
            "id" => self.id = Some(value),
            "title" => self.title = Some(value),
            "body" => self.body = Some(value),
            _ => self.updated = Some(value),
        }
    }

    fn finalize(self, record: usize) -> WireResult<Note> {
        let id_text = self.id.ok_or(WireError::MissingField { record, field: "id" })?;
        let id = id_text
            .trim()
            .parse::<NoteId>()
            .map_err(|_| WireError::InvalidId {
                record,
                value: id_text.clone(),
            })?;
        let title = self.title.ok_or(WireError::MissingField {
            record,
            field: "title",
        })?;
        let body = self.body.ok_or(WireError::MissingField {
            record,
            field: "body",
        })?;
        let updated_text = self.updated.ok_or(WireError::MissingField {
            record,
            field: "updated",
        })?;
        let updated = DateTime::parse_from_rfc3339(updated_text.trim())
            .map(|stamp| stamp.with_timezone(&Utc))
            .map_err(|_| WireError::InvalidTimestamp {
                record,
                value: updated_text.clone(),
            })?;

        Ok(Note {
            id,
            title,
            body,
            updated,
        })
    }
}
