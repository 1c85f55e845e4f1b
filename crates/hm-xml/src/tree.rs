//! Owned element tree produced by the reader and consumed by the writer.

/// Namespace URI bound to the `xsi` prefix.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Element or attribute name with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Prefix as written in the source document, if any.
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local: String,
    /// Namespace URI the name resolved to; `None` for unqualified names.
    pub namespace: Option<String>,
}

impl Name {
    /// Unqualified name without prefix or namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Name {
            prefix: None,
            local: local.into(),
            namespace: None,
        }
    }

    /// Prefixed name bound to `namespace`.
    pub fn prefixed(
        prefix: impl Into<String>,
        local: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Name {
            prefix: Some(prefix.into()),
            local: local.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Name as it appears in markup (`prefix:local` or `local`).
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }

    pub fn is_xsi(&self) -> bool {
        self.namespace.as_deref() == Some(XSI_NS)
    }
}

/// `xmlns` / `xmlns:prefix` declaration carried by an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Declared prefix; `None` for the default namespace.
    pub prefix: Option<String>,
    pub uri: String,
}

/// Attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

/// Element node. Text and CDATA sections directly inside the element are
/// concatenated into `text`; the relative order of text and children is not
/// kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: Name,
    pub namespaces: Vec<NamespaceDecl>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Unqualified element with no content.
    pub fn new(local: impl Into<String>) -> Self {
        Element {
            name: Name::local(local),
            namespaces: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Unqualified element whose only content is `text`.
    pub fn with_text(local: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Element::new(local);
        element.text = text.into();
        element
    }

    /// Append an unqualified attribute.
    pub fn push_attribute(&mut self, local: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name: Name::local(local),
            value: value.into(),
        });
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Value of the first attribute with the given local name and no
    /// namespace.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.namespace.is_none() && attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    /// First child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name.local == local)
    }

    /// Whether the element carries any non-whitespace character data.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_empty()
    }
}
