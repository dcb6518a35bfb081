//! Reader for Qt Linguist `.ts` documents.
//!
//! The reader walks the event stream of [`quick_xml`] once and feeds every
//! `<message>` into a [`CatalogBuilder`]. Elements it does not know
//! (`<userdata>`, `<extra-*>`, `<dependencies>`, ...) are skipped whole.

use std::collections::HashMap;

use linguist_rs_core::catalog::{Location, TranslationEntry, TranslationStatus};
use linguist_rs_core::variant;
use linguist_rs_core::{Catalog, CatalogBuilder, LinguistError, LinguistResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parses a TS document held in memory.
pub(crate) fn parse(text: &str) -> LinguistResult<Catalog> {
    TsReader::new(text).read_catalog()
}

/// Text of an element together with the structured children a
/// `<translation>` may carry.
#[derive(Debug, Default)]
struct Content {
    text: String,
    numerus_forms: Vec<String>,
    length_variants: Vec<String>,
}

impl Content {
    /// Flattens length variants into one separator-joined string.
    fn into_text(self) -> String {
        if self.length_variants.is_empty() {
            self.text
        } else {
            variant::join_variants(&self.length_variants)
        }
    }
}

/// A parsed `<translation>` element.
#[derive(Debug)]
struct Translation {
    status: TranslationStatus,
    forms: Vec<String>,
    has_variants: bool,
}

/// A `<message>` whose context name may not have been seen yet.
#[derive(Debug, Default)]
struct PendingMessage {
    numerus: bool,
    source: Option<String>,
    old_source: Option<String>,
    comment: Option<String>,
    extra_comment: Option<String>,
    translator_comment: Option<String>,
    translation: Option<Translation>,
    locations: Vec<Location>,
}

impl PendingMessage {
    fn into_entry(self, context: &str) -> LinguistResult<TranslationEntry> {
        let source = self.source.ok_or_else(|| missing("message", "source"))?;
        let translation = self
            .translation
            .ok_or_else(|| missing("message", "translation"))?;

        let mut entry = if self.numerus {
            TranslationEntry::plural(context, source, translation.forms)
        } else if translation.has_variants {
            TranslationEntry::variants(context, source, translation.forms)
        } else {
            TranslationEntry::new(context, source, translation.forms.concat())
        };
        entry = entry.with_status(translation.status);
        if let Some(comment) = self.comment {
            entry = entry.with_comment(comment);
        }
        entry.old_source = self.old_source;
        entry.extra_comment = self.extra_comment;
        entry.translator_comment = self.translator_comment;
        entry.locations = self.locations;
        Ok(entry)
    }
}

fn missing(element: &str, field: &str) -> LinguistError {
    LinguistError::MissingField {
        element: element.to_string(),
        field: field.to_string(),
    }
}

struct TsReader<'a> {
    reader: Reader<&'a [u8]>,
    /// File of the last `<location>` seen anywhere in the document.
    last_file: Option<String>,
    /// Last resolved line per file.
    last_lines: HashMap<String, u32>,
}

impl<'a> TsReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::from_str(text),
            last_file: None,
            last_lines: HashMap::new(),
        }
    }

    fn xml_error(&self, err: impl std::fmt::Display) -> LinguistError {
        LinguistError::ParseError(format!(
            "malformed TS document at byte {}: {err}",
            self.reader.buffer_position()
        ))
    }

    fn next_event(&mut self) -> LinguistResult<Event<'a>> {
        let event = self.reader.read_event();
        event.map_err(|err| self.xml_error(err))
    }

    fn unexpected_eof(&self, element: &str) -> LinguistError {
        LinguistError::ParseError(format!(
            "document ends inside <{element}> at byte {}",
            self.reader.buffer_position()
        ))
    }

    fn attribute(&self, element: &BytesStart<'_>, name: &str) -> LinguistResult<Option<String>> {
        match element.try_get_attribute(name) {
            Ok(Some(attr)) => attr
                .unescape_value()
                .map(|value| Some(value.into_owned()))
                .map_err(|err| self.xml_error(err)),
            Ok(None) => Ok(None),
            Err(err) => Err(self.xml_error(err)),
        }
    }

    fn flag(&self, element: &BytesStart<'_>, name: &str) -> LinguistResult<bool> {
        Ok(self.attribute(element, name)?.as_deref() == Some("yes"))
    }

    fn skip(&mut self, element: &BytesStart<'_>) -> LinguistResult<()> {
        let result = self.reader.read_to_end(element.name());
        result.map(|_| ()).map_err(|err| self.xml_error(err))
    }

    // ── Document structure ───────────────────────────────────────────

    fn read_catalog(&mut self) -> LinguistResult<Catalog> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"TS" => {
                    let mut builder = self.builder_for(&e)?;
                    self.read_ts_body(&mut builder)?;
                    return Ok(builder.build());
                }
                Event::Empty(e) if e.name().as_ref() == b"TS" => {
                    return Ok(self.builder_for(&e)?.build());
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(LinguistError::ParseError(format!(
                        "expected <TS> root element, found <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Eof => {
                    return Err(LinguistError::ParseError(
                        "document has no <TS> element".to_string(),
                    ));
                }
                _ => {}
            }
        }
    }

    fn builder_for(&self, ts: &BytesStart<'_>) -> LinguistResult<CatalogBuilder> {
        let language = self.attribute(ts, "language")?.unwrap_or_default();
        let source_language = self.attribute(ts, "sourcelanguage")?.unwrap_or_default();
        if language.is_empty() {
            tracing::warn!("TS document has no language attribute");
        }
        Ok(CatalogBuilder::new(language).source_language(source_language))
    }

    fn read_ts_body(&mut self, builder: &mut CatalogBuilder) -> LinguistResult<()> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"context" => self.read_context(builder)?,
                Event::Start(e) => self.skip(&e)?,
                Event::End(e) if e.name().as_ref() == b"TS" => return Ok(()),
                Event::Eof => return Err(self.unexpected_eof("TS")),
                _ => {}
            }
        }
    }

    fn read_context(&mut self, builder: &mut CatalogBuilder) -> LinguistResult<()> {
        let mut name = None;
        let mut messages = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => name = Some(self.read_content(b"name")?.into_text()),
                    b"message" => messages.push(self.read_message(&e)?),
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"message" => return Err(missing("message", "source")),
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"context" => break,
                Event::Eof => return Err(self.unexpected_eof("context")),
                _ => {}
            }
        }

        let context = name.ok_or_else(|| missing("context", "name"))?;
        tracing::trace!(context = %context, messages = messages.len(), "read context");
        for message in messages {
            builder.insert(message.into_entry(&context)?)?;
        }
        Ok(())
    }

    fn read_message(&mut self, start: &BytesStart<'_>) -> LinguistResult<PendingMessage> {
        let mut message = PendingMessage {
            numerus: self.flag(start, "numerus")?,
            ..PendingMessage::default()
        };

        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"source" => message.source = Some(self.read_content(b"source")?.into_text()),
                    b"oldsource" => {
                        message.old_source = Some(self.read_content(b"oldsource")?.into_text());
                    }
                    b"comment" => message.comment = Some(self.read_content(b"comment")?.into_text()),
                    b"extracomment" => {
                        message.extra_comment =
                            Some(self.read_content(b"extracomment")?.into_text());
                    }
                    b"translatorcomment" => {
                        message.translator_comment =
                            Some(self.read_content(b"translatorcomment")?.into_text());
                    }
                    b"translation" => {
                        message.translation = Some(self.read_translation(&e, message.numerus)?);
                    }
                    b"location" => {
                        self.push_location(&e, &mut message.locations)?;
                        self.skip(&e)?;
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"source" => message.source = Some(String::new()),
                    b"translation" => {
                        message.translation = Some(Translation {
                            status: self.status(&e)?,
                            forms: vec![String::new()],
                            has_variants: false,
                        });
                    }
                    b"location" => self.push_location(&e, &mut message.locations)?,
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"message" => return Ok(message),
                Event::Eof => return Err(self.unexpected_eof("message")),
                _ => {}
            }
        }
    }

    /// Records a `<location>`. A missing `filename` repeats the previous
    /// file, and a signed `line` ("+3", "-1") is relative to the previous
    /// line recorded for that file, even when other files came in between.
    /// "Previous" spans messages, as in Qt's relative location mode. Lines
    /// that fall outside `u32` are dropped.
    fn push_location(
        &mut self,
        element: &BytesStart<'_>,
        locations: &mut Vec<Location>,
    ) -> LinguistResult<()> {
        let file = match self.attribute(element, "filename")? {
            Some(file) => file,
            None => self.last_file.clone().unwrap_or_default(),
        };
        let line = self.attribute(element, "line")?.and_then(|raw| {
            let raw = raw.trim();
            if raw.starts_with(['+', '-']) {
                let offset: i64 = raw.parse().ok()?;
                let base = self.last_lines.get(&file).map_or(0, |&l| i64::from(l));
                base.checked_add(offset).and_then(|v| u32::try_from(v).ok())
            } else {
                raw.parse().ok()
            }
        });
        if let Some(line) = line {
            self.last_lines.insert(file.clone(), line);
        }
        self.last_file = Some(file.clone());
        locations.push(Location { file, line });
        Ok(())
    }

    fn status(&self, translation: &BytesStart<'_>) -> LinguistResult<TranslationStatus> {
        self.attribute(translation, "type")?
            .as_deref()
            .unwrap_or("")
            .parse()
    }

    fn read_translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
    ) -> LinguistResult<Translation> {
        let status = self.status(start)?;
        let content = self.read_content(b"translation")?;

        if numerus {
            let forms = if content.numerus_forms.is_empty() {
                vec![content.into_text()]
            } else {
                content.numerus_forms
            };
            return Ok(Translation {
                status,
                forms,
                has_variants: false,
            });
        }

        let forms = if content.length_variants.is_empty() {
            variant::split_variants(&content.text)
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            content.length_variants
        };
        Ok(Translation {
            status,
            has_variants: forms.len() > 1,
            forms,
        })
    }

    // ── Text ─────────────────────────────────────────────────────────

    /// Reads everything up to `</tag>`: character data, `<byte value=".."/>`
    /// escapes, and `<numerusform>` / `<lengthvariant>` children.
    fn read_content(&mut self, tag: &[u8]) -> LinguistResult<Content> {
        let mut content = Content::default();
        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let text = t.unescape().map_err(|err| self.xml_error(err))?;
                    content.text.push_str(&text);
                }
                Event::CData(c) => content.text.push_str(&String::from_utf8_lossy(&c.into_inner())),
                Event::Empty(e) => match e.name().as_ref() {
                    b"byte" => content.text.push(self.byte_value(&e)?),
                    b"numerusform" => content.numerus_forms.push(String::new()),
                    b"lengthvariant" => content.length_variants.push(String::new()),
                    _ => {}
                },
                Event::Start(e) => match e.name().as_ref() {
                    b"numerusform" => {
                        let form = self.read_content(b"numerusform")?.into_text();
                        content.numerus_forms.push(form);
                    }
                    b"lengthvariant" => {
                        let text = self.read_content(b"lengthvariant")?.text;
                        content.length_variants.push(text);
                    }
                    _ => self.skip(&e)?,
                },
                Event::End(e) if e.name().as_ref() == tag => return Ok(content),
                Event::Eof => {
                    return Err(self.unexpected_eof(&String::from_utf8_lossy(tag)));
                }
                _ => {}
            }
        }
    }

    /// Decodes `<byte value="x9c"/>` (hex with an `x` prefix, or decimal).
    fn byte_value(&self, element: &BytesStart<'_>) -> LinguistResult<char> {
        let raw = self
            .attribute(element, "value")?
            .ok_or_else(|| missing("byte", "value"))?;
        let code = match raw.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => raw.parse(),
        };
        code.ok()
            .and_then(char::from_u32)
            .ok_or_else(|| LinguistError::ParseError(format!("invalid <byte> value '{raw}'")))
    }
}
