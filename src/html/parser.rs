//! Lossless HTML parser
//!
//! This is not a full HTML5 tree builder. It recognizes tags, comments,
//! doctypes and raw text elements, and keeps the source text of every node so
//! unchanged markup serializes back byte for byte. Mismatched end tags are
//! kept as raw nodes.

use super::{Attribute, Document, Element, EndTag, NodeData, NodeId, RAW_TEXT_ELEMENTS};

pub(super) fn parse(input: &str) -> Document {
    let mut parser = Parser {
        input,
        pos: 0,
        doc: Document::new(),
        stack: Vec::new(),
    };
    parser.stack.push(parser.doc.root());
    parser.run();
    parser.doc
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    doc: Document,
    stack: Vec<NodeId>,
}

/// A start tag read from the input
struct StartTag {
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
    end: usize,
}

impl Parser<'_> {
    fn run(&mut self) {
        let input = self.input;
        while self.pos < input.len() {
            let rest = &input[self.pos..];
            if rest.starts_with("<!--") {
                self.comment();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.declaration();
            } else if rest.starts_with("</") && starts_with_alpha(&rest[2..]) {
                self.end_tag();
            } else if rest.starts_with('<') && starts_with_alpha(&rest[1..]) {
                if !self.start_tag() {
                    // Unterminated tag, keep the rest as text
                    self.push_leaf(NodeData::Text(rest.to_string()));
                    self.pos = input.len();
                }
            } else {
                self.text();
            }
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.doc.root())
    }

    fn push_leaf(&mut self, data: NodeData) -> NodeId {
        let id = self.doc.push_node(data);
        let parent = self.current();
        self.doc.append(parent, id);
        id
    }

    fn comment(&mut self) {
        let end = self.input[self.pos + 4..]
            .find("-->")
            .map_or(self.input.len(), |idx| self.pos + 4 + idx + 3);
        let raw = self.input[self.pos..end].to_string();
        self.push_leaf(NodeData::Comment(raw));
        self.pos = end;
    }

    fn declaration(&mut self) {
        let end = self.input[self.pos..]
            .find('>')
            .map_or(self.input.len(), |idx| self.pos + idx + 1);
        let raw = self.input[self.pos..end].to_string();
        let is_doctype = raw
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"));
        self.push_leaf(if is_doctype {
            NodeData::Doctype(raw)
        } else {
            NodeData::Raw(raw)
        });
        self.pos = end;
    }

    fn text(&mut self) {
        let input = self.input;
        let rest = &input[self.pos..];
        // Skip the first byte: it is either text or a `<` that starts no tag
        let mut end = rest.len();
        for (idx, _) in rest.match_indices('<').filter(|(idx, _)| *idx > 0) {
            if starts_markup(&rest[idx..]) {
                end = idx;
                break;
            }
        }
        self.push_leaf(NodeData::Text(rest[..end].to_string()));
        self.pos += end;
    }

    fn end_tag(&mut self) {
        let input = self.input;
        let start = self.pos;
        let end = input[start..]
            .find('>')
            .map_or(input.len(), |idx| start + idx + 1);
        let raw = &input[start..end];
        let name = tag_name(&raw[2..]);

        let open = self
            .stack
            .iter()
            .rposition(|id| self.doc.node(*id).is_element_named(&name));

        match open {
            Some(index) if index > 0 => {
                let element = self.stack[index];
                self.stack.truncate(index);
                if let NodeData::Element(el) = &mut self.doc.nodes[element.0].data {
                    el.end_tag = EndTag::Raw(raw.to_string());
                }
            }
            _ => {
                self.push_leaf(NodeData::Raw(raw.to_string()));
            }
        }
        self.pos = end;
    }

    /// Returns false when the tag is not terminated
    fn start_tag(&mut self) -> bool {
        let start = self.pos;
        let Some(tag) = read_start_tag(self.input, start) else {
            return false;
        };

        // `<body>` implicitly closes an open `<head>`
        if tag.name == "body" {
            if let Some(index) = self
                .stack
                .iter()
                .rposition(|id| self.doc.node(*id).is_element_named("head"))
            {
                self.stack.truncate(index);
            }
        }

        let element = Element {
            name: tag.name.clone(),
            attributes: tag.attributes,
            raw_start_tag: Some(self.input[start..tag.end].to_string()),
            end_tag: EndTag::Omitted,
        };
        let is_void = element.is_void();
        let id = self.push_leaf(NodeData::Element(element));
        self.pos = tag.end;

        if is_void || tag.self_closing {
            return true;
        }

        if RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            self.raw_text(id, &tag.name);
        } else {
            self.stack.push(id);
        }
        true
    }

    fn raw_text(&mut self, element: NodeId, name: &str) {
        let content_start = self.pos;
        let closing = find_closing_tag(&self.input[content_start..], name)
            .map(|idx| content_start + idx);
        let content_end = closing.unwrap_or(self.input.len());

        if content_end > content_start {
            let text = self
                .doc
                .push_node(NodeData::Text(self.input[content_start..content_end].to_string()));
            self.doc.append(element, text);
        }

        self.pos = content_end;
        if closing.is_some() {
            let end = self.input[content_end..]
                .find('>')
                .map_or(self.input.len(), |idx| content_end + idx + 1);
            if let NodeData::Element(el) = &mut self.doc.nodes[element.0].data {
                el.end_tag = EndTag::Raw(self.input[content_end..end].to_string());
            }
            self.pos = end;
        }
    }
}

fn starts_with_alpha(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
}

fn starts_markup(s: &str) -> bool {
    s.starts_with("<!")
        || s.starts_with("<?")
        || (s.starts_with("</") && starts_with_alpha(&s[2..]))
        || (s.starts_with('<') && starts_with_alpha(&s[1..]))
}

fn is_tag_delimiter(c: char) -> bool {
    c.is_ascii_whitespace() || c == '/' || c == '>'
}

fn tag_name(s: &str) -> String {
    s.chars()
        .take_while(|c| !is_tag_delimiter(*c))
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Find `</name` (case-insensitive) followed by a tag delimiter
fn find_closing_tag(content: &str, name: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut from = 0;
    while let Some(idx) = content[from..].find("</") {
        let at = from + idx;
        let name_end = at + 2 + name.len();
        if let Some(candidate) = content.get(at + 2..name_end) {
            let delimited = bytes
                .get(name_end)
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'/' || *b == b'>');
            if candidate.eq_ignore_ascii_case(name) && delimited {
                return Some(at);
            }
        }
        from = at + 2;
    }
    None
}

/// Read a start tag beginning at `start` (which points at `<`)
fn read_start_tag(input: &str, start: usize) -> Option<StartTag> {
    let bytes = input.as_bytes();
    let mut pos = start + 1;

    let name_start = pos;
    while pos < bytes.len() && !is_tag_delimiter(bytes[pos] as char) {
        pos += 1;
    }
    let name = input[name_start..pos].to_ascii_lowercase();
    let mut attributes = Vec::new();

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos)? {
            b'>' => {
                return Some(StartTag {
                    name,
                    attributes,
                    self_closing: false,
                    end: pos + 1,
                });
            }
            b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                return Some(StartTag {
                    name,
                    attributes,
                    self_closing: true,
                    end: pos + 2,
                });
            }
            b'/' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>')
            && !(bytes[pos] == b'/' && pos > attr_start)
        {
            pos += 1;
        }
        let attr_name = input[attr_start..pos].to_ascii_lowercase();

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let mut value = None;
        if bytes.get(pos) == Some(&b'=') {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            match bytes.get(pos)? {
                quote @ (b'"' | b'\'') => {
                    let value_start = pos + 1;
                    let value_len = input[value_start..].find(*quote as char)?;
                    value = Some(decode_entities(&input[value_start..value_start + value_len]));
                    pos = value_start + value_len + 1;
                }
                _ => {
                    let value_start = pos;
                    while pos < bytes.len()
                        && !bytes[pos].is_ascii_whitespace()
                        && bytes[pos] != b'>'
                    {
                        pos += 1;
                    }
                    value = Some(decode_entities(&input[value_start..pos]));
                }
            }
        }

        if !attr_name.is_empty() {
            attributes.push(Attribute {
                name: attr_name,
                value,
            });
        }
    }
}

/// Decode the character references that commonly appear in attribute values
pub(crate) fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "nbsp" => Some('\u{a0}'),
                _ => entity.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            c.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
