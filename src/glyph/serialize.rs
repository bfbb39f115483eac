//! Rewriting a small-caps .glif file into its base glyph.
//!
//! The rewrite streams the small-caps glyph's XML through unchanged except
//! for the root `name` attribute, the `unicode` elements and component bases.
//! Everything else, including whitespace, comments and the glyph lib, is
//! passed through as read.

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

use super::codepoints::to_hex;
use super::Codepoints;
use crate::error::GlifError;
use crate::names::{strip_small_caps_suffix, IgnoreList};
use crate::write::WriteOptions;

/// Produce the new content of a base glyph from its small-caps variant.
///
/// The result carries the small-caps glyph's outline and attributes under the
/// base glyph's name, with `codepoints` as its only `unicode` elements and
/// every component referencing a small-caps glyph retargeted to its base,
/// unless that small-caps glyph is in `ignore` and therefore stays around.
pub(crate) fn promote_xml(
    small_caps_xml: &[u8],
    codepoints: &Codepoints,
    ignore: &IgnoreList,
    options: &WriteOptions,
) -> Result<Vec<u8>, GlifError> {
    let mut reader = Reader::from_reader(small_caps_xml);
    let mut writer = Writer::new(Vec::with_capacity(small_caps_xml.len() + 64));
    writer.get_mut().extend_from_slice(options.xml_declaration().as_bytes());
    writer.get_mut().push(b'\n');

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut in_outline = false;
    let mut insert_codepoints = false;
    // whitespace before a top-level element, dropped along with a 'unicode' element
    let mut held_whitespace: Option<BytesText> = None;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) if depth == 0 => {
                check_root(&start, seen_root)?;
                seen_root = true;
                writer.write_event(Event::Start(rename_glyph(&reader, &start)?))?;
                insert_codepoints = true;
                depth = 1;
            }
            Event::Empty(start) if depth == 0 => {
                check_root(&start, seen_root)?;
                seen_root = true;
                writer.write_event(Event::Start(rename_glyph(&reader, &start)?))?;
                write_codepoints(&mut writer, codepoints, None)?;
                writer.write_event(Event::End(BytesEnd::new("glyph")))?;
            }
            // replaced by the declaration from the write options
            Event::Decl(_) | Event::Text(_) if depth == 0 => (),
            event if depth == 0 => {
                writer.write_event(event)?;
                writer.get_mut().push(b'\n');
            }
            Event::Text(text) if depth == 1 && is_whitespace(&text) => {
                if insert_codepoints {
                    write_codepoints(&mut writer, codepoints, Some(&text))?;
                    insert_codepoints = false;
                } else if let Some(previous) = held_whitespace.take() {
                    writer.write_event(Event::Text(previous))?;
                }
                held_whitespace = Some(text);
            }
            Event::Empty(start) if depth == 1 && start.name().as_ref() == b"unicode" => {
                held_whitespace = None;
            }
            Event::Start(start) if depth == 1 && start.name().as_ref() == b"unicode" => {
                held_whitespace = None;
                reader.read_to_end(start.name())?;
            }
            event => {
                if insert_codepoints {
                    write_codepoints(&mut writer, codepoints, None)?;
                    insert_codepoints = false;
                }
                if let Some(text) = held_whitespace.take() {
                    writer.write_event(Event::Text(text))?;
                }
                match event {
                    Event::Start(start) => {
                        if depth == 1 && start.name().as_ref() == b"outline" {
                            in_outline = true;
                        }
                        let start = if in_outline && is_component(&start) {
                            retarget_component(&reader, &start, ignore)?
                        } else {
                            start
                        };
                        writer.write_event(Event::Start(start))?;
                        depth += 1;
                    }
                    Event::Empty(start) => {
                        let start = if in_outline && is_component(&start) {
                            retarget_component(&reader, &start, ignore)?
                        } else {
                            start
                        };
                        writer.write_event(Event::Empty(start))?;
                    }
                    Event::End(end) => {
                        depth -= 1;
                        if depth == 1 && end.name().as_ref() == b"outline" {
                            in_outline = false;
                        }
                        writer.write_event(Event::End(end))?;
                    }
                    other => writer.write_event(other)?,
                }
            }
        }
    }

    if !seen_root || depth != 0 {
        return Err(GlifError::UnexpectedEof);
    }

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

fn check_root(start: &BytesStart, seen_root: bool) -> Result<(), GlifError> {
    if seen_root || start.name().as_ref() != b"glyph" {
        return Err(GlifError::WrongFirstElement);
    }
    Ok(())
}

fn is_whitespace(text: &BytesText) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

fn is_component(start: &BytesStart) -> bool {
    start.name().as_ref() == b"component"
}

fn rename_glyph(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
) -> Result<BytesStart<'static>, GlifError> {
    rewrite_attribute(reader, start, "name", strip_small_caps_suffix)
}

fn retarget_component(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
    ignore: &IgnoreList,
) -> Result<BytesStart<'static>, GlifError> {
    rewrite_attribute(reader, start, "base", |base| {
        strip_small_caps_suffix(base).filter(|_| !ignore.contains_glyph(base))
    })
}

/// Copy an element, replacing the value of `key` when `rewrite` returns a new one.
///
/// Attribute order is preserved; untouched attributes are copied verbatim.
fn rewrite_attribute(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
    key: &str,
    rewrite: impl Fn(&str) -> Option<&str>,
) -> Result<BytesStart<'static>, GlifError> {
    let mut rewritten = start.clone().into_owned();
    rewritten.clear_attributes();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            if let Some(new_value) = rewrite(value.as_ref()) {
                rewritten.push_attribute((key, new_value));
                continue;
            }
        }
        rewritten.push_attribute(attr);
    }
    Ok(rewritten)
}

fn write_codepoints(
    writer: &mut Writer<Vec<u8>>,
    codepoints: &Codepoints,
    separator: Option<&BytesText>,
) -> Result<(), GlifError> {
    for codepoint in codepoints.iter() {
        if let Some(separator) = separator {
            writer.write_event(Event::Text(separator.clone()))?;
        }
        writer.write_event(codepoint_to_event(codepoint))?;
    }
    Ok(())
}

fn codepoint_to_event(codepoint: char) -> Event<'static> {
    let mut start = BytesStart::new("unicode");
    start.push_attribute(("hex", to_hex(codepoint).as_str()));
    Event::Empty(start)
}
