//! Record label construction.
//!
//! Graphviz record labels are pipe-separated fields where `{...}` flips the
//! layout direction. Labels are assembled as a tree and flattened here.
//! Empty groups and empty or absent leaves are dropped together with their
//! separator, so field and port numbering only counts populated fields.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelTree {
    Leaf(Option<String>),
    Group(Vec<LabelTree>),
}

impl LabelTree {
    pub fn text(s: impl Into<String>) -> Self {
        LabelTree::Leaf(Some(s.into()))
    }

    pub fn absent() -> Self {
        LabelTree::Leaf(None)
    }

    pub fn group(children: impl IntoIterator<Item = LabelTree>) -> Self {
        LabelTree::Group(children.into_iter().collect())
    }

    /// Group of text leaves.
    pub fn column<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelTree::Group(items.into_iter().map(LabelTree::text).collect())
    }
}

impl From<&str> for LabelTree {
    fn from(s: &str) -> Self {
        LabelTree::text(s)
    }
}

impl From<String> for LabelTree {
    fn from(s: String) -> Self {
        LabelTree::text(s)
    }
}

impl From<Option<String>> for LabelTree {
    fn from(s: Option<String>) -> Self {
        LabelTree::Leaf(s)
    }
}

/// Backslash-escape characters that carry meaning in record labels, for
/// user-supplied text placed in a field.
pub fn escape_field(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Flatten a list of label trees into record label syntax.
pub fn serialize_label(children: &[LabelTree]) -> String {
    let mut fields = Vec::with_capacity(children.len());
    for child in children {
        match child {
            LabelTree::Group(inner) => {
                if !inner.is_empty() {
                    fields.push(format!("{{{}}}", serialize_label(inner)));
                }
            }
            LabelTree::Leaf(Some(text)) if !text.is_empty() => fields.push(text.clone()),
            LabelTree::Leaf(_) => {}
        }
    }
    fields.join("|")
}

impl LabelTree {
    /// Serialize this tree; a top-level group is not wrapped in braces.
    pub fn serialize(&self) -> String {
        match self {
            LabelTree::Group(children) => serialize_label(children),
            leaf => serialize_label(std::slice::from_ref(leaf)),
        }
    }
}
