//! Tree-based HTML minification

use crate::config::HtmlMinifyOptions;
use crate::html::{Document, NodeData, NodeId};

/// Elements whose text content is whitespace sensitive
const PRESERVE_WHITESPACE: [&str; 4] = ["pre", "textarea", "script", "style"];

pub(super) fn minify(html: &str, options: &HtmlMinifyOptions) -> String {
    let mut doc = Document::parse(html);

    if options.remove_comments {
        remove_comments(&mut doc);
    }
    if options.collapse_whitespace {
        let root = doc.root();
        collapse_whitespace(&mut doc, root, options.conservative_collapse);
    }

    doc.serialize()
}

fn remove_comments(doc: &mut Document) {
    let comments = doc.query_all(|node| match &node.data {
        // conditional comments carry markup for old browsers
        NodeData::Comment(raw) => !raw.starts_with("<!--[if"),
        _ => false,
    });
    for id in comments {
        doc.remove(id);
    }
}

fn collapse_whitespace(doc: &mut Document, parent: NodeId, conservative: bool) {
    if doc
        .element(parent)
        .is_some_and(|element| PRESERVE_WHITESPACE.contains(&element.name.as_str()))
    {
        return;
    }

    merge_adjacent_text(doc, parent);

    for child in doc.children(parent).to_vec() {
        let collapsed = match &doc.node(child).data {
            NodeData::Text(text) => Some(collapse(text)),
            NodeData::Element(_) => {
                collapse_whitespace(doc, child, conservative);
                None
            }
            _ => None,
        };

        match collapsed {
            Some(text) if text == " " && !conservative => doc.remove(child),
            Some(text) => doc.set_text(child, text),
            None => {}
        }
    }
}

/// Merge text nodes left next to each other after comment removal
fn merge_adjacent_text(doc: &mut Document, parent: NodeId) {
    let children = doc.children(parent).to_vec();
    let mut previous: Option<(NodeId, String)> = None;

    for child in children {
        let text = match &doc.node(child).data {
            NodeData::Text(text) => text.clone(),
            _ => {
                previous = None;
                continue;
            }
        };

        match previous.as_mut() {
            Some((first, merged)) => {
                merged.push_str(&text);
                doc.set_text(*first, merged.clone());
                doc.remove(child);
            }
            None => previous = Some((child, text)),
        }
    }
}

fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}
