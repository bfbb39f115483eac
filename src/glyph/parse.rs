//! Reading the parts of a .glif file that promotion depends on.

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use super::Codepoints;
use crate::error::GlifError;

/// The glyph's name and its top-level `unicode` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GlyphHeader {
    pub(crate) name: String,
    pub(crate) codepoints: Codepoints,
}

pub(crate) fn parse_header(xml: &[u8]) -> Result<GlyphHeader, GlifError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let name = loop {
        match reader.read_event()? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => (),
            Event::Start(ref start) if start.name().as_ref() == b"glyph" => {
                break glyph_name(&reader, start)?;
            }
            // a glyph without any children has no codepoints either
            Event::Empty(ref start) if start.name().as_ref() == b"glyph" => {
                let name = glyph_name(&reader, start)?;
                return Ok(GlyphHeader { name, codepoints: Codepoints::default() });
            }
            Event::Eof => return Err(GlifError::UnexpectedEof),
            _ => return Err(GlifError::WrongFirstElement),
        }
    };

    let mut codepoints = Codepoints::default();
    let mut depth = 1usize;
    loop {
        match reader.read_event()? {
            Event::Start(ref start) => {
                if depth == 1 && start.name().as_ref() == b"unicode" {
                    codepoints.insert(parse_unicode(&reader, start)?);
                }
                depth += 1;
            }
            Event::Empty(ref start) if depth == 1 && start.name().as_ref() == b"unicode" => {
                codepoints.insert(parse_unicode(&reader, start)?);
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => return Err(GlifError::UnexpectedEof),
            _ => (),
        }
    }

    Ok(GlyphHeader { name, codepoints })
}

fn glyph_name(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<String, GlifError> {
    match attribute_value(reader, start, b"name")? {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(GlifError::WrongFirstElement),
    }
}

fn parse_unicode(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<char, GlifError> {
    let hex = attribute_value(reader, start, b"hex")?.ok_or(GlifError::UnicodeMissingHex)?;
    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
        Some(codepoint) => Ok(codepoint),
        None => Err(GlifError::BadUnicodeValue(hex)),
    }
}

pub(crate) fn attribute_value(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
    key: &[u8],
) -> Result<Option<String>, GlifError> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
