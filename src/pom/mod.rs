//! Generic navigation and mutation over a descriptor's XML tree
//!
//! [`PomDocument`] owns a parsed descriptor (a `xot` arena plus its root
//! element) and exposes the small vocabulary the serializer is written in:
//! read a value along a path, set or remove a child, enumerate children,
//! create container chains and reinsert opaque captures.
//!
//! ## Tolerant reads
//!
//! Every read helper degrades to `None` or an empty `Vec` when any segment of
//! its path is missing. The serializer never checks for absence itself.
//!
//! ## Namespaces
//!
//! Lookups match on local name only, so `<project xmlns="...">` descriptors
//! and bare ones behave the same. New elements take their parent's
//! namespace, which keeps the serializer from emitting `xmlns=""`.
//!
//! ## Layout
//!
//! Elements created by the serializer are indented with the unit detected
//! from the source (four spaces when nothing can be detected).
//!
//! Output is spliced from the source text. The parser records the byte
//! range of every element, and every mutation marks the mutated element and
//! its ancestors as touched. On output an element whose content is the same
//! as at parse time is copied from the source verbatim, so CDATA sections,
//! entity references, quoting and tag spacing survive. Only elements whose
//! content really changed are written out again, and those still reuse their
//! original start and end tags. Captured subtrees copied in from another
//! document carry their source text along.

mod blackbox;

pub use blackbox::BlackBox;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::Range;

use xot::{NameId, NamespaceId, Node, SpanInfo, SpanInfoKey, Value, Xot};

use crate::error::{Error, Result};

/// Namespace of the POM 4.0.0 model.
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

const DEFAULT_INDENT: &str = "    ";

/// One element of a [`PomDocument`].
///
/// Equality and hashing are by node identity: two elements with identical
/// content are still different elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PomElement(Node);

/// Where a parsed element sits in the source text.
#[derive(Debug, Clone)]
struct Markup {
    /// The whole element, start tag to end tag.
    outer: Range<usize>,
    /// The start tag without its closing `>` or `/>`.
    open: Range<usize>,
    /// The end tag; `None` for a self-closing element.
    close: Option<Range<usize>>,
}

/// A parsed (or freshly created) descriptor.
pub struct PomDocument {
    xot: Xot,
    root: PomElement,
    source: String,
    markup: HashMap<Node, Markup>,
    /// Source text of subtrees copied in from other documents.
    imported: HashMap<Node, String>,
    /// Canonical content of every touched element, taken before its first
    /// mutation.
    touched: HashMap<Node, String>,
    /// Everything before the root element, re-emitted verbatim.
    prolog: String,
    /// Everything after the root element, re-emitted verbatim.
    epilog: String,
    indent: String,
}

impl PomDocument {
    /// Parse descriptor markup.
    ///
    /// Malformed markup fails with the parser's own error.
    pub fn parse(content: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let (document, spans) = xot.parse_with_span_info(content)?;
        let root = xot
            .document_element(document)
            .map_err(|_| Error::MissingRoot)?;

        let markup = collect_markup(&xot, &spans, content, root);
        let (prolog, epilog) = match markup.get(&root) {
            Some(found) => (
                content[..found.outer.start].to_string(),
                content[found.outer.end..].to_string(),
            ),
            None => (String::new(), String::new()),
        };

        let mut doc = Self {
            xot,
            root: PomElement(root),
            source: content.to_string(),
            markup,
            imported: HashMap::new(),
            touched: HashMap::new(),
            prolog,
            epilog,
            indent: DEFAULT_INDENT.to_string(),
        };
        if let Some(indent) = doc.detect_indent() {
            doc.indent = indent;
        }
        Ok(doc)
    }

    /// A minimal descriptor: an empty `<project>` in the POM namespace.
    pub fn new() -> Self {
        let template = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project xmlns=\"{}\"></project>\n",
            POM_NAMESPACE
        );
        Self::parse(&template).expect("static descriptor template is well-formed")
    }

    pub fn root(&self) -> PomElement {
        self.root
    }

    /// Serialize the whole document.
    ///
    /// Untouched and unchanged elements come straight from the source text;
    /// see the module docs.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        out.push_str(&self.prolog);
        self.write_node(self.root.0, &mut out);
        out.push_str(&self.epilog);
        Ok(out)
    }

    /// Case-sensitive local name of an element.
    pub fn local_name(&self, element: PomElement) -> &str {
        match self.xot.element(element.0) {
            Some(e) => self.xot.local_name_str(e.name()),
            None => "",
        }
    }

    /// Concatenated text content of an element.
    pub fn value(&self, element: PomElement) -> String {
        self.xot.string_value(element.0)
    }

    /// All child elements, in document order.
    pub fn child_elements(&self, element: PomElement) -> Vec<PomElement> {
        self.xot
            .children(element.0)
            .filter(|&node| self.xot.is_element(node))
            .map(PomElement)
            .collect()
    }

    /// First child element named `name`.
    pub fn child(&self, element: PomElement, name: &str) -> Option<PomElement> {
        self.xot
            .children(element.0)
            .filter(|&node| self.xot.is_element(node))
            .map(PomElement)
            .find(|&child| self.local_name(child) == name)
    }

    /// Follow `path` from `element`; `None` if any segment is missing.
    pub fn single_or_none(&self, element: PomElement, path: &[&str]) -> Option<PomElement> {
        path.iter()
            .try_fold(element, |current, name| self.child(current, name))
    }

    /// Text of the element at `path`; `None` if any segment is missing.
    pub fn read_value_or_none(&self, element: PomElement, path: &[&str]) -> Option<String> {
        self.single_or_none(element, path)
            .map(|found| self.value(found))
    }

    /// Every `child_name` element inside the container at `path`.
    pub fn read_elements(
        &self,
        element: PomElement,
        path: &[&str],
        child_name: &str,
    ) -> Vec<PomElement> {
        match self.single_or_none(element, path) {
            Some(container) => self
                .child_elements(container)
                .into_iter()
                .filter(|&child| self.local_name(child) == child_name)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Follow `path` from `element`, creating every missing segment.
    pub fn single_or_create(&mut self, element: PomElement, path: &[&str]) -> Result<PomElement> {
        let mut current = element;
        for name in path {
            current = match self.child(current, name) {
                Some(existing) => existing,
                None => self.add_element(current, name)?,
            };
        }
        Ok(current)
    }

    /// Append a new, empty child element.
    pub fn add_element(&mut self, parent: PomElement, name: &str) -> Result<PomElement> {
        let name = self.child_name(parent, name);
        let node = self.xot.new_element(name);
        self.append_indented(parent, node)?;
        Ok(PomElement(node))
    }

    /// Create or update the text of the direct child `name`.
    ///
    /// `None` removes the child.
    pub fn set_value(&mut self, parent: PomElement, name: &str, value: Option<&str>) -> Result<()> {
        let Some(value) = value else {
            return self.remove_element(parent, name);
        };
        let child = match self.child(parent, name) {
            Some(existing) => existing,
            None => self.add_element(parent, name)?,
        };
        self.set_text(child, value)
    }

    /// Replace every child of `element` with a single text node.
    pub fn set_text(&mut self, element: PomElement, text: &str) -> Result<()> {
        self.remove_all_children(element)?;
        if !text.is_empty() {
            self.xot.append_text(element.0, text)?;
        }
        Ok(())
    }

    /// Remove the first child named `name`; no-op when there is none.
    pub fn remove_element(&mut self, parent: PomElement, name: &str) -> Result<()> {
        match self.child(parent, name) {
            Some(child) => self.remove(child),
            None => Ok(()),
        }
    }

    /// Remove `element` together with the indentation in front of it.
    pub fn remove(&mut self, element: PomElement) -> Result<()> {
        if let Some(parent) = self.xot.parent(element.0) {
            self.touch(parent);
        }
        if let Some(previous) = self.xot.previous_sibling(element.0) {
            if self.is_whitespace(previous) {
                self.xot.remove(previous)?;
            }
        }
        self.xot.remove(element.0)?;
        Ok(())
    }

    /// Remove every child node of `element`, text and comments included.
    pub fn remove_all_children(&mut self, element: PomElement) -> Result<()> {
        self.touch(element.0);
        let children: Vec<Node> = self.xot.children(element.0).collect();
        for child in children {
            self.xot.remove(child)?;
        }
        Ok(())
    }

    /// Swap `element` for a copy of the captured subtree.
    ///
    /// An empty capture leaves `element` untouched.
    pub fn replace_with(&mut self, element: PomElement, capture: &BlackBox) -> Result<PomElement> {
        let Some((source, captured)) = capture.raw() else {
            return Ok(element);
        };
        let Some(parent) = self.xot.parent(element.0) else {
            return Ok(element);
        };
        match self.transplant(source, captured.0, parent)? {
            Some(copy) => {
                self.touch(parent);
                self.xot.replace(element.0, copy)?;
                Ok(PomElement(copy))
            }
            None => Ok(element),
        }
    }

    /// Append a copy of the captured subtree as the last child of `parent`.
    pub fn append_capture(&mut self, parent: PomElement, capture: &BlackBox) -> Result<()> {
        let Some((source, captured)) = capture.raw() else {
            return Ok(());
        };
        if let Some(copy) = self.transplant(source, captured.0, parent.0)? {
            self.append_indented(parent, copy)?;
        }
        Ok(())
    }

    /// Render a subtree in a canonical form: names, attributes, text and
    /// comments, no namespace declarations.
    pub fn canonical(&self, element: PomElement) -> String {
        let mut out = String::new();
        self.render(element.0, &mut out);
        out
    }

    fn render(&self, node: Node, out: &mut String) {
        match self.xot.value(node) {
            Value::Element(element) => {
                let name = self.xot.local_name_str(element.name());
                let _ = write!(out, "<{}", name);
                for (attribute, value) in self.xot.attributes(node).iter() {
                    let _ = write!(out, " {}=\"", self.xot.local_name_str(attribute));
                    escape_attribute(value, out);
                    out.push('"');
                }
                out.push('>');
                for child in self.xot.children(node) {
                    self.render(child, out);
                }
                let _ = write!(out, "</{}>", name);
            }
            Value::Text(text) => escape_text(text.get(), out),
            Value::Comment(comment) => {
                let _ = write!(out, "<!--{}-->", comment.get());
            }
            _ => {}
        }
    }

    /// Record that `node`'s content is about to change.
    ///
    /// Every ancestor changes with it. An already touched node has touched
    /// ancestors, so the walk stops there.
    fn touch(&mut self, node: Node) {
        let mut current = Some(node);
        while let Some(node) = current {
            if self.touched.contains_key(&node) {
                break;
            }
            if self.markup.contains_key(&node) || self.imported.contains_key(&node) {
                let before = self.canonical(PomElement(node));
                self.touched.insert(node, before);
            }
            current = self.xot.parent(node);
        }
    }

    /// Source text standing for `node`, if its content is what was parsed.
    fn verbatim(&self, node: Node) -> Option<&str> {
        let text = match self.imported.get(&node) {
            Some(text) => text.as_str(),
            None => &self.source[self.markup.get(&node)?.outer.clone()],
        };
        match self.touched.get(&node) {
            Some(before) if *before != self.canonical(PomElement(node)) => None,
            _ => Some(text),
        }
    }

    fn write_node(&self, node: Node, out: &mut String) {
        match self.xot.value(node) {
            Value::Element(element) => self.write_element(node, element.name(), out),
            Value::Text(text) => escape_text(text.get(), out),
            Value::Comment(comment) => {
                let _ = write!(out, "<!--{}-->", comment.get());
            }
            Value::ProcessingInstruction(instruction) => {
                out.push_str("<?");
                out.push_str(self.xot.local_name_str(instruction.target()));
                if let Some(data) = instruction.data() {
                    out.push(' ');
                    out.push_str(data);
                }
                out.push_str("?>");
            }
            _ => {}
        }
    }

    fn write_element(&self, node: Node, name: NameId, out: &mut String) {
        if let Some(text) = self.verbatim(node) {
            out.push_str(text);
            return;
        }

        let markup = self.markup.get(&node);
        let has_children = self.xot.first_child(node).is_some();
        match markup {
            // a self-closing tag that gained children loses its trailing space
            Some(found) if found.close.is_none() && has_children => {
                out.push_str(self.source[found.open.clone()].trim_end())
            }
            Some(found) => out.push_str(&self.source[found.open.clone()]),
            None => self.write_start_tag(node, name, out),
        }

        let close = markup.and_then(|found| found.close.clone());
        if !has_children {
            match close {
                Some(close) => {
                    out.push('>');
                    out.push_str(&self.source[close]);
                }
                None => out.push_str("/>"),
            }
            return;
        }

        out.push('>');
        for child in self.xot.children(node) {
            self.write_node(child, out);
        }
        match close {
            Some(close) => out.push_str(&self.source[close]),
            None => {
                let (qualified, _) = self.qualified_name(node, name);
                let _ = write!(out, "</{}>", qualified);
            }
        }
    }

    /// `<name` plus namespace declarations and attributes, without the
    /// closing `>`.
    fn write_start_tag(&self, node: Node, name: NameId, out: &mut String) {
        let (qualified, undeclared) = self.qualified_name(node, name);
        let _ = write!(out, "<{}", qualified);
        for (prefix, namespace) in self.xot.namespaces(node).iter() {
            let prefix = self.xot.prefix_str(prefix);
            let uri = self.xot.namespace_str(*namespace);
            if prefix.is_empty() {
                let _ = write!(out, " xmlns=\"{}\"", uri);
            } else {
                let _ = write!(out, " xmlns:{}=\"{}\"", prefix, uri);
            }
        }
        if let Some(uri) = undeclared {
            let _ = write!(out, " xmlns=\"{}\"", uri);
        }
        for (attribute, value) in self.xot.attributes(node).iter() {
            let _ = write!(out, " {}=\"", self.attribute_name(node, attribute));
            escape_attribute(value, out);
            out.push('"');
        }
    }

    /// Element name with the prefix in scope at `node`.
    ///
    /// When no declaration in scope binds the name's namespace, the name is
    /// written unprefixed and the namespace URI is returned so the start tag
    /// can declare it.
    fn qualified_name(&self, node: Node, name: NameId) -> (String, Option<String>) {
        let local = self.xot.local_name_str(name);
        let namespace = self.xot.namespace_for_name(name);
        if namespace == self.xot.no_namespace() {
            return (local.to_string(), None);
        }
        match self.prefix_in_scope(node, namespace, false) {
            Some("") => (local.to_string(), None),
            Some(prefix) => (format!("{}:{}", prefix, local), None),
            None => (
                local.to_string(),
                Some(self.xot.namespace_str(namespace).to_string()),
            ),
        }
    }

    fn attribute_name(&self, node: Node, name: NameId) -> String {
        let local = self.xot.local_name_str(name);
        let namespace = self.xot.namespace_for_name(name);
        if namespace == self.xot.no_namespace() {
            return local.to_string();
        }
        if namespace == self.xot.xml_namespace() {
            return format!("xml:{}", local);
        }
        match self.prefix_in_scope(node, namespace, true) {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }

    fn prefix_in_scope(&self, node: Node, namespace: NamespaceId, named: bool) -> Option<&str> {
        let mut current = Some(node);
        while let Some(node) = current {
            for (prefix, declared) in self.xot.namespaces(node).iter() {
                let prefix = self.xot.prefix_str(prefix);
                if *declared == namespace && !(named && prefix.is_empty()) {
                    return Some(prefix);
                }
            }
            current = self.xot.parent(node);
        }
        None
    }

    /// Namespace declarations in scope at `node`, innermost first.
    fn scope(&self, node: Node) -> Vec<(&str, &str)> {
        let mut declared: Vec<(&str, &str)> = Vec::new();
        let mut current = Some(node);
        while let Some(node) = current {
            for (prefix, namespace) in self.xot.namespaces(node).iter() {
                let prefix = self.xot.prefix_str(prefix);
                if !declared.iter().any(|(seen, _)| *seen == prefix) {
                    declared.push((prefix, self.xot.namespace_str(*namespace)));
                }
            }
            current = self.xot.parent(node);
        }
        declared
    }

    /// Copy `node` out of `source` for insertion under `parent`.
    ///
    /// The copy keeps the source text of the subtree when every namespace
    /// binding it inherits in `source` holds under `parent` too.
    fn transplant(
        &mut self,
        source: &PomDocument,
        node: Node,
        parent: Node,
    ) -> Result<Option<Node>> {
        let Some(copy) = self.import(&source.xot, node)? else {
            return Ok(None);
        };
        if let Some(text) = source.verbatim(node) {
            let inherited = source
                .xot
                .parent(node)
                .map(|outer| source.scope(outer))
                .unwrap_or_default();
            let target = self.scope(parent);
            if inherited.iter().all(|binding| target.contains(binding)) {
                self.imported.insert(copy, text.to_string());
            }
        }
        Ok(Some(copy))
    }

    /// Deep-copy a node from another document's arena into this one.
    fn import(&mut self, source: &Xot, node: Node) -> Result<Option<Node>> {
        let copy = match source.value(node) {
            Value::Element(element) => {
                let name = self.import_name(source, element.name());
                let copy = self.xot.new_element(name);
                for (prefix, namespace) in source.namespaces(node).iter() {
                    let prefix = self.xot.add_prefix(source.prefix_str(prefix));
                    let namespace = self.xot.add_namespace(source.namespace_str(*namespace));
                    self.xot.namespaces_mut(copy).insert(prefix, namespace);
                }
                for (attribute, value) in source.attributes(node).iter() {
                    let attribute = self.import_name(source, attribute);
                    self.xot
                        .attributes_mut(copy)
                        .insert(attribute, value.to_string());
                }
                for child in source.children(node) {
                    if let Some(child_copy) = self.import(source, child)? {
                        self.xot.append(copy, child_copy)?;
                    }
                }
                copy
            }
            Value::Text(text) => self.xot.new_text(text.get()),
            Value::Comment(comment) => self.xot.new_comment(comment.get()),
            Value::ProcessingInstruction(instruction) => {
                let target = self.import_name(source, instruction.target());
                self.xot
                    .new_processing_instruction(target, instruction.data())
            }
            _ => return Ok(None),
        };
        Ok(Some(copy))
    }

    fn import_name(&mut self, source: &Xot, name: NameId) -> NameId {
        let (local, uri) = source.name_ns_str(name);
        let namespace = self.xot.add_namespace(uri);
        self.xot.add_name_ns(local, namespace)
    }

    fn child_name(&mut self, parent: PomElement, name: &str) -> NameId {
        let namespace = self
            .xot
            .element(parent.0)
            .map(|e| self.xot.namespace_for_name(e.name()));
        match namespace {
            Some(namespace) => self.xot.add_name_ns(name, namespace),
            None => self.xot.add_name(name),
        }
    }

    /// Append `node` to `parent` on its own line.
    fn append_indented(&mut self, parent: PomElement, node: Node) -> Result<()> {
        self.touch(parent.0);
        let depth = self.depth(parent);
        let child_indent = format!("\n{}", self.indent.repeat(depth + 1));
        let closing_indent = format!("\n{}", self.indent.repeat(depth));

        if let Some(last) = self.xot.last_child(parent.0) {
            if self.is_whitespace(last) {
                self.xot.remove(last)?;
            }
        }
        self.xot.append_text(parent.0, &child_indent)?;
        self.xot.append(parent.0, node)?;
        self.xot.append_text(parent.0, &closing_indent)?;
        Ok(())
    }

    fn depth(&self, element: PomElement) -> usize {
        let mut depth = 0;
        let mut current = self.xot.parent(element.0);
        while let Some(node) = current {
            if self.xot.is_element(node) {
                depth += 1;
            }
            current = self.xot.parent(node);
        }
        depth
    }

    fn is_whitespace(&self, node: Node) -> bool {
        self.xot
            .text_str(node)
            .is_some_and(|text| text.chars().all(char::is_whitespace))
    }

    /// Indent unit used in front of the root's first child element.
    fn detect_indent(&self) -> Option<String> {
        self.xot
            .children(self.root.0)
            .filter_map(|node| self.xot.text_str(node))
            .find_map(|text| {
                let (_, unit) = text.rsplit_once('\n')?;
                (!unit.is_empty() && unit.chars().all(|c| c == ' ' || c == '\t'))
                    .then(|| unit.to_string())
            })
    }
}

impl Default for PomDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte ranges of every element under `root`.
fn collect_markup(xot: &Xot, spans: &SpanInfo, source: &str, root: Node) -> HashMap<Node, Markup> {
    xot.descendants(root)
        .filter(|&node| xot.is_element(node))
        .filter_map(|node| {
            // the start span covers the name only; `<` sits right before it
            let name = spans.get(SpanInfoKey::ElementStart(node))?;
            let end = spans.get(SpanInfoKey::ElementEnd(node))?;
            let start = name.start.checked_sub(1)?;
            let self_closing = source.get(end.range())?.starts_with("/>");
            let open_end = if self_closing {
                end.start
            } else {
                start_tag_end(source, name.end)?
            };
            let markup = Markup {
                outer: start..end.end,
                open: start..open_end,
                close: (!self_closing).then(|| end.range()),
            };
            Some((node, markup))
        })
        .collect()
}

/// Offset of the `>` that ends a start tag, scanning from `from`.
fn start_tag_end(source: &str, from: usize) -> Option<usize> {
    let mut quote = None;
    for (offset, c) in source.get(from..)?.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(from + offset),
            None => {}
        }
    }
    None
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <!-- keep me -->
  <groupId>org.example</groupId>
  <parent>
    <artifactId>parent</artifactId>
  </parent>
  <modules>
    <module>a</module>
    <module>b</module>
  </modules>
</project>
"#;

    #[test]
    fn test_read_value_or_none_follows_path() {
        let doc = PomDocument::parse(DOC).unwrap();
        let root = doc.root();
        assert_eq!(
            doc.read_value_or_none(root, &["groupId"]),
            Some("org.example".to_string())
        );
        assert_eq!(
            doc.read_value_or_none(root, &["parent", "artifactId"]),
            Some("parent".to_string())
        );
        assert_eq!(doc.read_value_or_none(root, &["parent", "version"]), None);
        assert_eq!(doc.read_value_or_none(root, &["nope", "deeper"]), None);
    }

    #[test]
    fn test_read_elements_in_order_and_missing_container() {
        let doc = PomDocument::parse(DOC).unwrap();
        let modules: Vec<String> = doc
            .read_elements(doc.root(), &["modules"], "module")
            .into_iter()
            .map(|m| doc.value(m))
            .collect();
        assert_eq!(modules, vec!["a", "b"]);
        assert!(doc
            .read_elements(doc.root(), &["dependencies"], "dependency")
            .is_empty());
    }

    #[test]
    fn test_local_names_are_case_sensitive() {
        let doc = PomDocument::parse(DOC).unwrap();
        assert!(doc.child(doc.root(), "groupid").is_none());
        assert!(doc.child(doc.root(), "groupId").is_some());
    }

    #[test]
    fn test_set_value_creates_updates_and_removes() {
        let mut doc = PomDocument::parse(DOC).unwrap();
        let root = doc.root();
        doc.set_value(root, "version", Some("1.0")).unwrap();
        doc.set_value(root, "groupId", Some("org.changed")).unwrap();
        assert_eq!(doc.read_value_or_none(root, &["version"]), Some("1.0".to_string()));
        assert_eq!(
            doc.read_value_or_none(root, &["groupId"]),
            Some("org.changed".to_string())
        );

        doc.set_value(root, "version", None).unwrap();
        assert_eq!(doc.read_value_or_none(root, &["version"]), None);

        let xml = doc.to_xml_string().unwrap();
        assert!(!xml.contains("xmlns=\"\""));
        assert!(xml.contains("<!-- keep me -->"));
    }

    #[test]
    fn test_remove_element_is_noop_when_absent() {
        let mut doc = PomDocument::parse(DOC).unwrap();
        let before = doc.to_xml_string().unwrap();
        doc.remove_element(doc.root(), "dependencies").unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), before);
    }

    #[test]
    fn test_single_or_create_builds_chain() {
        let mut doc = PomDocument::parse(DOC).unwrap();
        let root = doc.root();
        let deps = doc
            .single_or_create(root, &["dependencyManagement", "dependencies"])
            .unwrap();
        assert_eq!(doc.local_name(deps), "dependencies");
        assert_eq!(
            doc.single_or_none(root, &["dependencyManagement", "dependencies"]),
            Some(deps)
        );
    }

    #[test]
    fn test_element_identity_is_not_content() {
        let doc = PomDocument::parse(
            "<project><profiles><profile><id>x</id></profile><profile><id>x</id></profile></profiles></project>",
        )
        .unwrap();
        let profiles = doc.read_elements(doc.root(), &["profiles"], "profile");
        assert_eq!(profiles.len(), 2);
        assert_ne!(profiles[0], profiles[1]);
        assert_eq!(doc.canonical(profiles[0]), doc.canonical(profiles[1]));
    }

    #[test]
    fn test_round_trip_without_changes_is_identical() {
        let doc = PomDocument::parse(DOC).unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), DOC);
    }

    #[test]
    fn test_new_element_uses_detected_indent() {
        let mut doc = PomDocument::parse(DOC).unwrap();
        let root = doc.root();
        doc.set_value(root, "packaging", Some("pom")).unwrap();
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("\n  <packaging>pom</packaging>\n</project>"));
    }

    #[test]
    fn test_malformed_markup_is_parse_error() {
        let result = PomDocument::parse("<project><groupId></project>");
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_fresh_document_is_empty_project() {
        let doc = PomDocument::new();
        assert_eq!(doc.local_name(doc.root()), "project");
        assert!(doc.child_elements(doc.root()).is_empty());
        assert!(doc.to_xml_string().unwrap().contains(POM_NAMESPACE));
    }

    const VERBATIM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated once, edited by hand since -->
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <version>1.0</version>
  <description lang='en'>a &amp; b &apos;q&apos; &#169;</description>
  <scm />
  <url><![CDATA[http://example.org/?a<b]]></url>
</project>
"#;

    #[test]
    fn test_untouched_markup_is_kept_byte_for_byte() {
        let mut doc = PomDocument::parse(VERBATIM).unwrap();
        let root = doc.root();
        doc.set_value(root, "version", Some("1.0")).unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), VERBATIM);
    }

    #[test]
    fn test_changed_element_is_spliced_into_source() {
        let mut doc = PomDocument::parse(VERBATIM).unwrap();
        let root = doc.root();
        doc.set_value(root, "version", Some("2.0")).unwrap();
        assert_eq!(
            doc.to_xml_string().unwrap(),
            VERBATIM.replace("<version>1.0</version>", "<version>2.0</version>")
        );
    }

    #[test]
    fn test_self_closing_element_gains_children() {
        let mut doc = PomDocument::parse("<project>\n  <build />\n</project>").unwrap();
        let root = doc.root();
        doc.single_or_create(root, &["build", "plugins"]).unwrap();
        assert_eq!(
            doc.to_xml_string().unwrap(),
            "<project>\n  <build>\n    <plugins/>\n  </build>\n</project>"
        );
    }

    #[test]
    fn test_new_text_is_escaped() {
        let mut doc = PomDocument::parse("<project>\n  <name>x</name>\n</project>").unwrap();
        let root = doc.root();
        doc.set_value(root, "name", Some("a < b & c")).unwrap();
        assert!(doc
            .to_xml_string()
            .unwrap()
            .contains("<name>a &lt; b &amp; c</name>"));
    }

    #[test]
    fn test_capture_keeps_its_source_text() {
        let source = Rc::new(
            PomDocument::parse(
                "<project><build><configuration><script><![CDATA[if (a < b) echo 'x']]></script></configuration></build></project>",
            )
            .unwrap(),
        );
        let captured = source.single_or_none(source.root(), &["build", "configuration"]);
        let capture = BlackBox::capture(&source, captured);

        let mut target = PomDocument::parse("<project>\n  <build>\n  </build>\n</project>").unwrap();
        let build = target.single_or_none(target.root(), &["build"]).unwrap();
        target.append_capture(build, &capture).unwrap();

        let xml = target.to_xml_string().unwrap();
        assert!(xml.contains("<script><![CDATA[if (a < b) echo 'x']]></script>"));
    }
}
