use std::fs;

use pretty_assertions::assert_eq;

use super::parse::parse_header;
use super::serialize::promote_xml;
use super::*;
use crate::error::GlifError;
use crate::{IgnoreList, QuoteChar};

static BASE_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="a" format="2">
  <advance width="520"/>
  <unicode hex="0061"/>
  <outline>
  </outline>
</glyph>
"#;

static SMALL_CAPS_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="a.sc" format="2">
  <advance width="560"/>
  <anchor x="280" y="500" name="top"/>
  <outline>
    <contour>
      <point x="0" y="0" type="line"/>
      <point x="560" y="0" type="line"/>
      <point x="560" y="500" type="line"/>
      <point x="0" y="500" type="line"/>
    </contour>
  </outline>
</glyph>
"#;

fn codepoints(chars: &[char]) -> Codepoints {
    Codepoints::new(chars.iter().copied())
}

fn promote_file(dir: &std::path::Path, file_name: &str) -> Result<PromotedGlyph, Error> {
    promote_glyph(dir, file_name, &IgnoreList::default(), &WriteOptions::default())
}

fn promote(xml: &str, chars: &[char]) -> String {
    let ignore = IgnoreList::default();
    let bytes = promote_xml(xml.as_bytes(), &codepoints(chars), &ignore, &WriteOptions::default())
        .expect("promotion failed");
    String::from_utf8(bytes).unwrap()
}

#[test]
fn header() {
    let header = parse_header(BASE_A.as_bytes()).unwrap();
    assert_eq!(header.name, "a");
    assert_eq!(header.codepoints, codepoints(&['a']));

    let header = parse_header(SMALL_CAPS_A.as_bytes()).unwrap();
    assert_eq!(header.name, "a.sc");
    assert!(header.codepoints.is_empty());
}

#[test]
fn header_ignores_nested_unicode_like_elements() {
    let xml = r#"<glyph name="x" format="2">
  <unicode hex="0078"/>
  <unicode hex="0058"/>
  <lib>
    <dict>
      <key>unicode</key>
      <string>0041</string>
    </dict>
  </lib>
</glyph>"#;
    let header = parse_header(xml.as_bytes()).unwrap();
    assert_eq!(header.codepoints, codepoints(&['x', 'X']));
}

#[test]
fn header_errors() {
    let bad_hex = r#"<glyph name="x" format="2"><unicode hex="XYZ"/></glyph>"#;
    assert!(matches!(
        parse_header(bad_hex.as_bytes()),
        Err(GlifError::BadUnicodeValue(hex)) if hex == "XYZ"
    ));

    let no_hex = r#"<glyph name="x" format="2"><unicode/></glyph>"#;
    assert!(matches!(parse_header(no_hex.as_bytes()), Err(GlifError::UnicodeMissingHex)));

    let wrong_root = r#"<glif name="x" format="2"></glif>"#;
    assert!(matches!(parse_header(wrong_root.as_bytes()), Err(GlifError::WrongFirstElement)));

    let truncated = r#"<glyph name="x" format="2"><unicode hex="0078"/>"#;
    assert!(parse_header(truncated.as_bytes()).is_err());
}

#[test]
fn promote_keeps_outline_and_takes_base_codepoint() {
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="a" format="2">
  <unicode hex="0061"/>
  <advance width="560"/>
  <anchor x="280" y="500" name="top"/>
  <outline>
    <contour>
      <point x="0" y="0" type="line"/>
      <point x="560" y="0" type="line"/>
      <point x="560" y="500" type="line"/>
      <point x="0" y="500" type="line"/>
    </contour>
  </outline>
</glyph>
"#;
    assert_eq!(promote(SMALL_CAPS_A, &['a']), expected);
}

#[test]
fn promote_drops_small_caps_codepoints() {
    let small_caps = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="b.sc" format="2">
  <unicode hex="E000"/>
  <advance width="500"/>
  <unicode hex="E001"></unicode>
</glyph>
"#;
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="b" format="2">
  <unicode hex="0062"/>
  <advance width="500"/>
</glyph>
"#;
    assert_eq!(promote(small_caps, &['b']), expected);
}

#[test]
fn promote_retargets_small_caps_components() {
    let small_caps = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="aacute.sc" format="2">
  <advance width="560"/>
  <outline>
    <component base="a.sc"/>
    <component base="acutecomb.case" xOffset="140"/>
    <component base="hyphen.sc"/>
  </outline>
  <lib>
    <dict>
      <key>com.example.base</key>
      <string>a.sc</string>
    </dict>
  </lib>
</glyph>
"#;
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="aacute" format="2">
  <unicode hex="00E1"/>
  <advance width="560"/>
  <outline>
    <component base="a"/>
    <component base="acutecomb.case" xOffset="140"/>
    <component base="hyphen.sc"/>
  </outline>
  <lib>
    <dict>
      <key>com.example.base</key>
      <string>a.sc</string>
    </dict>
  </lib>
</glyph>
"#;
    assert_eq!(promote(small_caps, &['\u{E1}']), expected);
}

#[test]
fn promote_multiple_codepoints_and_single_quotes() {
    let small_caps = r#"<glyph name="A.sc" format="2"><advance width="600"/></glyph>"#;
    let options = WriteOptions::default().quote_char(QuoteChar::Single);
    let ignore = IgnoreList::empty();
    let bytes =
        promote_xml(small_caps.as_bytes(), &codepoints(&['A', 'a']), &ignore, &options).unwrap();
    let expected = r#"<?xml version='1.0' encoding='UTF-8'?>
<glyph name="A" format="2"><unicode hex="0041"/><unicode hex="0061"/><advance width="600"/></glyph>
"#;
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn promote_empty_glyph() {
    let small_caps = r#"<glyph name="space.sc" format="2"/>"#;
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<glyph name="space" format="2"><unicode hex="0020"/></glyph>
"#;
    assert_eq!(promote(small_caps, &[' ']), expected);
}

#[test]
fn promote_rejects_garbage() {
    let options = WriteOptions::default();
    let ignore = IgnoreList::empty();
    let result = promote_xml(b"<advance width=\"1\"/>", &codepoints(&['a']), &ignore, &options);
    assert!(matches!(result, Err(GlifError::WrongFirstElement)));
    let result = promote_xml(b"", &codepoints(&['a']), &ignore, &options);
    assert!(matches!(result, Err(GlifError::UnexpectedEof)));
}

#[test]
fn promote_glyph_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.glif"), BASE_A).unwrap();
    fs::write(dir.path().join("a.sc.glif"), SMALL_CAPS_A).unwrap();

    let promoted = promote_file(dir.path(), "a.sc.glif").unwrap();
    assert_eq!(promoted.name, "a");
    assert_eq!(promoted.small_caps_name, "a.sc");
    assert_eq!(promoted.file_name, "a.glif");
    assert_eq!(promoted.small_caps_file_name, "a.sc.glif");
    assert_eq!(promoted.codepoints, codepoints(&['a']));

    assert!(!dir.path().join("a.sc.glif").exists());
    let rewritten = fs::read_to_string(dir.path().join("a.glif")).unwrap();
    let header = parse_header(rewritten.as_bytes()).unwrap();
    assert_eq!(header.name, "a");
    assert_eq!(header.codepoints, codepoints(&['a']));
    assert!(rewritten.contains(r#"<advance width="560"/>"#));
}

#[test]
fn promote_glyph_requires_base_codepoint() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.glif"), r#"<glyph name="a" format="2"/>"#).unwrap();
    fs::write(dir.path().join("a.sc.glif"), SMALL_CAPS_A).unwrap();

    let result = promote_file(dir.path(), "a.sc.glif");
    assert!(matches!(result, Err(Error::MissingCodepoint { .. })));
    // nothing was touched
    assert!(dir.path().join("a.sc.glif").exists());
}

#[test]
fn promote_glyph_without_base_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.sc.glif"), SMALL_CAPS_A).unwrap();

    let result = promote_file(dir.path(), "a.sc.glif");
    assert!(matches!(result, Err(Error::Io { .. })));
    let result = promote_file(dir.path(), "a.glif");
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
