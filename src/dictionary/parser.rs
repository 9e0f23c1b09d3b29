//! SDEF XML to `Document`.
//!
//! Parsing happens in two passes: quick-xml events are folded into a small
//! element tree (rejecting anything that is not well-formed), then the tree is
//! walked into the dictionary model. Only direct children are consulted at
//! each level, so stray nested elements never leak into the wrong parent.

use crate::dictionary::model::{
    ANY_TYPE, Class, Command, CommandResult, DEFAULT_ACCESS, Document, Element, Enumeration,
    Enumerator, Parameter, Property, Suite,
};
use crate::error::DictionaryError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

/// Parse raw SDEF text into a `Document`.
///
/// Any markup error fails the whole parse with `MalformedDocument`; a broken
/// dictionary is not worth serving partially.
pub fn parse_document(raw: &str) -> Result<Document, DictionaryError> {
    let root = read_tree(raw)?;
    let document = Document {
        title: root.attr_or_empty("title"),
        suites: root.children_named("suite").map(parse_suite).collect(),
    };
    debug!(
        title = %document.title,
        suites = document.suites.len(),
        "parsed scripting dictionary"
    );
    Ok(document)
}

fn parse_suite(el: &XmlElement) -> Suite {
    let mut classes: Vec<Class> = el.children_named("class").map(parse_class).collect();
    classes.extend(el.children_named("class-extension").map(|ext| Class {
        is_extension: true,
        ..parse_class(ext)
    }));

    Suite {
        name: el.attr_or_empty("name"),
        code: el.attr_or_empty("code"),
        description: el.attr_or_empty("description"),
        commands: el.children_named("command").map(parse_command).collect(),
        classes,
        enumerations: el.children_named("enumeration").map(parse_enumeration).collect(),
    }
}

fn parse_command(el: &XmlElement) -> Command {
    Command {
        name: el.attr_or_empty("name"),
        code: el.attr_or_empty("code"),
        description: el.attr_or_empty("description"),
        direct_parameter: el.first_child("direct-parameter").map(parse_parameter),
        parameters: el.children_named("parameter").map(parse_parameter).collect(),
        result: el.first_child("result").map(|res| CommandResult {
            type_name: resolve_type(res),
            description: res.attr_or_empty("description"),
        }),
    }
}

fn parse_parameter(el: &XmlElement) -> Parameter {
    Parameter {
        name: el.attr_or_empty("name"),
        code: el.attr_or_empty("code"),
        description: el.attr_or_empty("description"),
        type_name: resolve_type(el),
        optional: el.flag("optional"),
    }
}

fn parse_class(el: &XmlElement) -> Class {
    Class {
        name: el.attr_or_empty("name"),
        code: el.attr_or_empty("code"),
        description: el.attr_or_empty("description"),
        inherits: el.attr_or_empty("inherits"),
        plural: el.attr_or_empty("plural"),
        properties: el
            .children_named("property")
            .map(|p| Property {
                name: p.attr_or_empty("name"),
                code: p.attr_or_empty("code"),
                description: p.attr_or_empty("description"),
                type_name: resolve_type(p),
                access: access_of(p),
            })
            .collect(),
        elements: el
            .children_named("element")
            .map(|e| Element {
                type_name: resolve_type(e),
                access: access_of(e),
            })
            .collect(),
        responds_to: el
            .children_named("responds-to")
            .filter_map(|rt| {
                rt.non_empty_attr("command")
                    .or_else(|| rt.non_empty_attr("name"))
                    .map(str::to_string)
            })
            .collect(),
        is_extension: false,
    }
}

fn parse_enumeration(el: &XmlElement) -> Enumeration {
    Enumeration {
        name: el.attr_or_empty("name"),
        code: el.attr_or_empty("code"),
        values: el
            .children_named("enumerator")
            .map(|v| Enumerator {
                name: v.attr_or_empty("name"),
                code: v.attr_or_empty("code"),
                description: v.attr_or_empty("description"),
            })
            .collect(),
    }
}

fn access_of(el: &XmlElement) -> String {
    el.non_empty_attr("access")
        .unwrap_or(DEFAULT_ACCESS)
        .to_string()
}

/// Resolve the type of a typed element.
///
/// An inline `type` attribute always wins. Without one, each direct `<type>`
/// child resolves on its own and the alternatives are joined with `" | "`.
/// Descriptor children are not searched for further nesting.
pub(crate) fn resolve_type(el: &XmlElement) -> String {
    if let Some(inline) = el.non_empty_attr("type") {
        return list_wrapped(inline, el.flag("list"));
    }

    let alternatives: Vec<String> = el
        .children_named("type")
        .map(|t| list_wrapped(t.non_empty_attr("type").unwrap_or(ANY_TYPE), t.flag("list")))
        .collect();
    if alternatives.is_empty() {
        ANY_TYPE.to_string()
    } else {
        alternatives.join(" | ")
    }
}

fn list_wrapped(type_name: &str, is_list: bool) -> String {
    if is_list {
        format!("list of {type_name}")
    } else {
        type_name.to_string()
    }
}

#[derive(Debug, Default)]
/// Minimal owned element tree; text content is irrelevant to SDEF and dropped.
pub(crate) struct XmlElement {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    fn attr_or_empty(&self, key: &str) -> String {
        self.attr(key).unwrap_or_default().to_string()
    }

    fn flag(&self, key: &str) -> bool {
        self.attr(key) == Some("yes")
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }
}

fn malformed(detail: impl Into<String>) -> DictionaryError {
    DictionaryError::MalformedDocument(detail.into())
}

/// Fold the event stream into a single-rooted tree.
pub(crate) fn read_tree(raw: &str) -> Result<XmlElement, DictionaryError> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|err| {
            malformed(format!("{err} (at byte {})", reader.buffer_position()))
        })?;
        match event {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let Some(element) = stack.pop() else {
                    return Err(malformed(format!("unexpected closing tag </{name}>")));
                };
                if element.name != name {
                    return Err(malformed(format!(
                        "expected </{}>, found </{name}>",
                        element.name
                    )));
                }
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) if stack.is_empty() => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(malformed("text outside the root element"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<XmlElement, DictionaryError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| malformed(format!("bad attribute on <{name}>: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(format!("bad value for {key} on <{name}>: {err}")))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(XmlElement {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), DictionaryError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(malformed(format!(
                "second root element <{}>",
                element.name
            )));
        }
    }
    Ok(())
}
