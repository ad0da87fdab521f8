//! XML schema loader.
//!
//! Reads a node hierarchy schema from XML. Variants and fields are collected
//! in document order, which is the order every emitted block follows.
//!
//! ```xml
//! <astSchema base="Expr" header="expr" tokenType="Token" tokenHeader="token">
//!     <variant name="Binary">
//!         <field name="left" type="owned-node"/>
//!         <field name="op" type="borrowed-token-ref"/>
//!         <field name="right" type="owned-node"/>
//!     </variant>
//! </astSchema>
//! ```

use crate::error::ParseError;
use crate::types::{FieldSpec, Schema, VariantSpec};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a node hierarchy schema from an XML string.
///
/// # Arguments
/// * `xml` - XML schema content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid schema elements.
pub fn parse_schema(xml: &str) -> Result<Schema, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut schema: Option<Schema> = None;
    let mut closed = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if closed {
                    return Err(ParseError::structure("content after astSchema element"));
                }
                parse_element(&mut reader, e, false, &mut schema)?;
            }
            Ok(Event::Empty(ref e)) => {
                if closed {
                    return Err(ParseError::structure("content after astSchema element"));
                }
                let opening = schema.is_none();
                parse_element(&mut reader, e, true, &mut schema)?;
                closed = opening;
            }
            Ok(Event::End(_)) => closed = true,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    schema.ok_or_else(|| ParseError::structure("No astSchema element found"))
}

/// Parses a top-level element: the schema root or one of its children.
fn parse_element(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
    schema: &mut Option<Schema>,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;

    match (name, schema.as_mut()) {
        ("astSchema", None) => {
            *schema = Some(parse_schema_attributes(e)?);
        }
        ("variant", Some(schema)) => {
            let variant = if is_empty {
                VariantSpec::new(parse_variant_name(e)?)
            } else {
                parse_variant(reader, e)?
            };
            schema.add_variant(variant);
        }
        ("include", Some(schema)) => {
            schema.includes.push(parse_include(e)?);
            if !is_empty {
                skip_to_end(reader)?;
            }
        }
        (other, Some(_)) => return Err(ParseError::unknown_element(other, "astSchema")),
        (other, None) => return Err(ParseError::unknown_element(other, "document")),
    }

    Ok(())
}

/// Parses a schema from an XML file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_schema_file(path: &std::path::Path) -> Result<Schema, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_schema(&xml)
}

/// Parses the astSchema element attributes.
fn parse_schema_attributes(e: &BytesStart<'_>) -> Result<Schema, ParseError> {
    let mut base = None;
    let mut header = None;
    let mut token_type = None;
    let mut token_header = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "base" => base = Some(value.trim().to_string()),
            "header" => header = Some(non_empty("astSchema", "header", value)?),
            "tokenType" => token_type = Some(non_empty("astSchema", "tokenType", value)?),
            "tokenHeader" => token_header = Some(non_empty("astSchema", "tokenHeader", value)?),
            _ => {}
        }
    }

    let base = base.ok_or_else(|| ParseError::missing_attr("astSchema", "base"))?;

    let mut schema = Schema::new(base);
    if let Some(header) = header {
        schema.header_name = header;
    }
    if let Some(token_type) = token_type {
        schema.token_type = token_type;
    }
    if let Some(token_header) = token_header {
        schema.token_header = token_header;
    }

    Ok(schema)
}

/// Reads the required name attribute of a variant element.
fn parse_variant_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            let value = std::str::from_utf8(&attr.value)?;
            return Ok(value.trim().to_string());
        }
    }
    Err(ParseError::missing_attr("variant", "name"))
}

/// Parses a variant with its fields.
fn parse_variant(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<VariantSpec, ParseError> {
    let mut variant = VariantSpec::new(parse_variant_name(e)?);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "field" {
                    return Err(ParseError::unknown_element(tag_name, "variant"));
                }
                variant.add_field(parse_field(e)?);
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"variant" {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!(
                    "unterminated variant '{}'",
                    variant.name
                )));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(variant)
}

/// Parses a field definition.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldSpec, ParseError> {
    let mut name = None;
    let mut type_tag = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.trim().to_string()),
            "type" => {
                let unescaped = quick_xml::escape::unescape(value)
                    .map_err(|_| ParseError::invalid_attr("field", "type", value))?;
                type_tag = Some(non_empty("field", "type", &unescaped)?);
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let type_tag = type_tag.ok_or_else(|| ParseError::missing_attr("field", "type"))?;

    Ok(FieldSpec::new(type_tag, name))
}

/// Parses an include element.
fn parse_include(e: &BytesStart<'_>) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"path" {
            let value = std::str::from_utf8(&attr.value)?;
            return non_empty("include", "path", value);
        }
    }
    Err(ParseError::missing_attr("include", "path"))
}

fn non_empty(element: &str, attribute: &str, value: &str) -> Result<String, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::invalid_attr(element, attribute, value));
    }
    Ok(trimmed.to_string())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
