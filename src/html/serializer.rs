//! HTML serialization
//!
//! Parsed nodes are written back from their source text. Elements created in
//! code, or whose attributes changed, get a generated start tag.

use super::{Document, Element, EndTag, NodeData, NodeId};

pub(super) fn serialize(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.node(id).data {
        NodeData::Document => write_children(doc, id, out),
        NodeData::Doctype(raw)
        | NodeData::Comment(raw)
        | NodeData::Text(raw)
        | NodeData::Raw(raw) => out.push_str(raw),
        NodeData::Element(element) => {
            write_start_tag(element, out);
            if element.is_void() {
                return;
            }
            write_children(doc, id, out);
            match &element.end_tag {
                EndTag::Raw(raw) => out.push_str(raw),
                EndTag::Omitted => {}
                EndTag::Generated => {
                    out.push_str("</");
                    out.push_str(&element.name);
                    out.push('>');
                }
            }
        }
    }
}

fn write_children(doc: &Document, id: NodeId, out: &mut String) {
    for child in doc.children(id) {
        write_node(doc, *child, out);
    }
}

fn write_start_tag(element: &Element, out: &mut String) {
    if let Some(raw) = &element.raw_start_tag {
        out.push_str(raw);
        return;
    }

    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
    }
    out.push('>');
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
