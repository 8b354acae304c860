//! Header, group and page records.

use serde::Serialize;

/// A heading introduced by `\section`, `\subsection` or `\subsubsection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// 1 for `\section`, 2 for `\subsection`, 3 for `\subsubsection`.
    pub level: u8,
}

/// A documented header file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub id: String,
    /// Canonical include path.
    pub name: String,
    pub brief: String,
    pub doc: String,
    /// Ids of headers included directly by this one.
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
}

impl Header {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A documentation group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub brief: String,
    pub doc: String,
    #[serde(rename = "parent")]
    pub parent_id: String,
    pub subgroups: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
}

impl Group {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn add_subgroup(&mut self, id: &str) {
        if !self.subgroups.iter().any(|g| g == id) {
            self.subgroups.push(id.to_string());
        }
    }
}

/// A free-standing documentation page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub doc: String,
    #[serde(rename = "parent")]
    pub parent_id: String,
    pub subpages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
}

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn add_subpage(&mut self, id: &str) {
        if !self.subpages.iter().any(|p| p == id) {
            self.subpages.push(id.to_string());
        }
    }
}
