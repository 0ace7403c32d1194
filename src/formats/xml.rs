//! XML <-> Value conversion.
//!
//! The tree mapping:
//! - an element becomes a key named after its tag
//! - attributes become `@name` keys, text next to attributes or children
//!   goes under `#text`
//! - an element with only text is that text, an empty one is null
//! - sibling elements sharing a tag collapse into a list
//!
//! All leaf values read back as strings; XML has no number or boolean type.

use std::fmt;

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::{FileFormat, FormatError};
use crate::value::{Key, Map, Value};

const ATTRIBUTE_PREFIX: char = '@';
const TEXT_KEY: &str = "#text";

fn xml_error(err: impl fmt::Display) -> FormatError {
    FormatError::Xml(err.to_string())
}

struct Frame {
    name: String,
    attributes: Map,
    children: Map,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, FormatError> {
        let name = String::from_utf8(start.name().as_ref().to_vec())?;
        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(xml_error)?;
            let key = String::from_utf8(attribute.key.as_ref().to_vec())?;
            let value = attribute.unescape_value().map_err(xml_error)?;
            attributes.insert(
                Key::String(format!("{}{}", ATTRIBUTE_PREFIX, key)),
                Value::String(value.into_owned()),
            );
        }
        Ok(Frame {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let Frame {
            name,
            attributes,
            children,
            text,
        } = self;
        if attributes.is_empty() && children.is_empty() {
            let value = if text.is_empty() {
                Value::Null
            } else {
                Value::String(text)
            };
            return (name, value);
        }
        let mut map = attributes;
        map.extend(children);
        if !text.is_empty() {
            map.insert(TEXT_KEY.into(), Value::String(text));
        }
        (name, Value::Object(map))
    }

    fn add_child(&mut self, name: String, value: Value) {
        let key = Key::String(name);
        match self.children.get_mut(&key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(key, value);
            }
        }
    }
}

pub fn parse(input: &str) -> Result<Value, FormatError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| FormatError::Xml("unexpected closing tag".to_string()))?;
                let (name, value) = frame.close();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(std::str::from_utf8(&data).map_err(xml_error)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(FormatError::Xml("unclosed element at end of document".to_string()));
    }
    let (name, value) =
        root.ok_or_else(|| FormatError::Xml("document has no root element".to_string()))?;
    Ok(Value::object([(name, value)]))
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) -> Result<(), FormatError> {
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None if root.is_none() => *root = Some((name, value)),
        None => return Err(FormatError::Xml("multiple root elements".to_string())),
    }
    Ok(())
}

/// Write a single-key mapping as an XML document with a declaration and
/// two-space indentation.
pub fn render(value: &Value) -> Result<String, FormatError> {
    let (name, content) = match value {
        Value::Object(map) if map.len() == 1 => map
            .iter()
            .next()
            .map(|(k, v)| (k.to_string(), v))
            .ok_or_else(|| FormatError::unrepresentable(FileFormat::Xml, "empty document"))?,
        _ => {
            return Err(FormatError::unrepresentable(
                FileFormat::Xml,
                "document must be a mapping with exactly one root key",
            ));
        }
    };
    if let Value::Array(_) = content {
        return Err(FormatError::unrepresentable(
            FileFormat::Xml,
            "root element cannot be a list",
        ));
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, &name, content)?;

    let mut out = String::from_utf8(writer.into_inner())?;
    out.push('\n');
    Ok(out)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), FormatError> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Null => {
            writer
                .write_event(Event::Empty(BytesStart::new(name)))
                .map_err(xml_error)?;
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(name);
            let mut text = None;
            let mut children = Vec::new();
            for (key, child) in map {
                let key = key.to_string();
                if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                    start.push_attribute((attribute, leaf_text(child)?.as_str()));
                } else if key == TEXT_KEY {
                    text = Some(leaf_text(child)?);
                } else {
                    children.push((key, child));
                }
            }
            if text.is_none() && children.is_empty() {
                writer.write_event(Event::Empty(start)).map_err(xml_error)?;
                return Ok(());
            }
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            if let Some(text) = text {
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(xml_error)?;
            }
            for (key, child) in children {
                write_element(writer, &key, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_error)?;
        }
        leaf => {
            let text = leaf_text(leaf)?;
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_error)?;
        }
    }
    Ok(())
}

fn leaf_text(value: &Value) -> Result<String, FormatError> {
    value.as_text().ok_or_else(|| {
        FormatError::unrepresentable(
            FileFormat::Xml,
            format!("{} cannot be written as text", value.type_name()),
        )
    })
}
