//! Arena-backed HTML document tree
//!
//! Nodes live in a single arena and are addressed by [`NodeId`]. Parent and
//! child links are kept by the [`Document`], which exposes the only mutation
//! surface the loader needs: attribute get/set, clone, insert-before, append
//! and remove. Detached nodes stay in the arena but are no longer reachable
//! from the root.
//!
//! Parsing is lossless: nodes that are not touched serialize back to the exact
//! source text they were parsed from.

mod parser;
mod serializer;

/// Elements that never have children or an end tag
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is raw text rather than markup
pub const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

/// Handle of a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for attributes written without a value, like `nomodule`
    pub value: Option<String>,
}

/// How the end tag of an element is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndTag {
    /// End tag as written in the source
    Raw(String),
    /// No end tag in the source
    Omitted,
    /// `</name>` for elements created in code
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub name: String,
    attributes: Vec<Attribute>,
    /// Start tag as written in the source, dropped once attributes change
    raw_start_tag: Option<String>,
    end_tag: EndTag,
}

impl Element {
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute value; attributes without a value read as `""`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_deref().unwrap_or(""))
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Doctype(String),
    Comment(String),
    /// Text as written in the source (entities are not decoded)
    Text(String),
    Element(Element),
    /// Markup kept verbatim, such as a stray end tag
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element_named(&self, name: &str) -> bool {
        self.as_element()
            .is_some_and(|element| element.name.eq_ignore_ascii_case(name))
    }
}

/// A parsed HTML document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    /// Parse an HTML string
    pub fn parse(html: &str) -> Self {
        parser::parse(html)
    }

    /// Serialize the whole document
    pub fn serialize(&self) -> String {
        serializer::serialize(self, self.root())
    }

    /// Serialize a single node and its descendants
    pub fn serialize_node(&self, id: NodeId) -> String {
        serializer::serialize(self, id)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).as_element()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.root()
    }

    /// All nodes below the root in document order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Find all attached nodes matching a predicate, in document order
    pub fn query_all<P>(&self, predicate: P) -> Vec<NodeId>
    where
        P: Fn(&Node) -> bool,
    {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| predicate(self.node(*id)))
            .collect()
    }

    /// Find the first attached node matching a predicate
    pub fn query<P>(&self, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Node) -> bool,
    {
        self.descendants(self.root())
            .into_iter()
            .find(|id| predicate(self.node(*id)))
    }

    /// Find all elements with the given tag name
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        self.query_all(|node| node.is_element_named(name))
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    /// Set an attribute, replacing an existing value
    ///
    /// Does nothing for nodes that are not elements.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element(element) = &mut self.nodes[id.0].data {
            element.raw_start_tag = None;
            match element
                .attributes
                .iter_mut()
                .find(|attr| attr.name.eq_ignore_ascii_case(name))
            {
                Some(attr) => attr.value = Some(value.to_string()),
                None => element.attributes.push(Attribute {
                    name: name.to_ascii_lowercase(),
                    value: Some(value.to_string()),
                }),
            }
        }
    }

    /// Content of the first child if it is a text node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.children(id)
            .first()
            .and_then(|child| match &self.node(*child).data {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let NodeData::Text(content) = &mut self.nodes[id.0].data {
            *content = text.into();
        }
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Create a detached element; attributes keep the given order
    pub fn create_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> NodeId {
        let element = Element {
            name: name.to_ascii_lowercase(),
            attributes: attributes
                .iter()
                .map(|(name, value)| Attribute {
                    name: (*name).to_string(),
                    value: Some((*value).to_string()),
                })
                .collect(),
            raw_start_tag: None,
            end_tag: EndTag::Generated,
        };
        self.push_node(NodeData::Element(element))
    }

    /// Create a detached text node, serialized verbatim
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeData::Text(text.into()))
    }

    /// Detach a node from its parent
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// Append a node as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `new_child` right before `reference`, a child of `parent`
    ///
    /// Appends when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, reference: NodeId, new_child: NodeId) {
        self.remove(new_child);
        let children = &mut self.nodes[parent.0].children;
        match children.iter().position(|child| *child == reference) {
            Some(index) => children.insert(index, new_child),
            None => children.push(new_child),
        }
        self.nodes[new_child.0].parent = Some(parent);
    }

    /// Deep clone a node; the clone is detached
    pub fn clone_node(&mut self, id: NodeId) -> NodeId {
        let data = self.node(id).data.clone();
        let clone = self.push_node(data);
        let children = self.children(id).to_vec();
        for child in children {
            let child_clone = self.clone_node(child);
            self.append(clone, child_clone);
        }
        clone
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Document {
    fn from(html: &str) -> Self {
        Self::parse(html)
    }
}

impl From<&String> for Document {
    fn from(html: &String) -> Self {
        Self::parse(html)
    }
}
