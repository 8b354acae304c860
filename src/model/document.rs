//! The finished document model and its JSON form.

use std::path::Path;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::entity::Entity;
use super::records::{Group, Header, Page};
use super::table::EntityTable;
use crate::base::constants::SCOPE_SEPARATOR;
use crate::config::JsonFormatting;
use crate::error::Result;

/// Entity forest plus headers, groups and pages.
#[derive(Debug, Clone, Default)]
pub struct DocumentModel {
    pub entities: EntityTable,
    pub headers: IndexMap<String, Header>,
    pub groups: IndexMap<String, Group>,
    pub pages: IndexMap<String, Page>,
}

impl DocumentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Fully qualified C++ name of an entity.
    pub fn qualified_name(&self, id: &str) -> Option<String> {
        self.entities.qualified_name(id)
    }

    /// Find an entity by its qualified name, e.g. `ns::A::f`.
    ///
    /// Overloads resolve to the first declared.
    pub fn entity_by_name(&self, qualified: &str) -> Option<&Entity> {
        let mut scope = String::new();
        let mut found = None;
        for segment in qualified.split(SCOPE_SEPARATOR) {
            let entity = self.entities.children_named(&scope, segment).next()?;
            scope = entity.id.clone();
            found = Some(entity);
        }
        found
    }

    /// Any group, page, header, entity or anchor with this exact id.
    pub fn contains_id(&self, id: &str) -> bool {
        self.entities.contains(id)
            || self.groups.contains_key(id)
            || self.pages.contains_key(id)
            || self.headers.contains_key(id)
    }

    pub fn to_json(&self, formatting: JsonFormatting) -> Result<String> {
        let text = match formatting {
            JsonFormatting::Compact => serde_json::to_string(self)?,
            JsonFormatting::Readable => serde_json::to_string_pretty(self)?,
        };
        Ok(text)
    }

    pub fn write_json(&self, path: impl AsRef<Path>, formatting: JsonFormatting) -> Result<()> {
        let text = self.to_json(formatting)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// An entity with its children nested under `members`.
#[derive(Serialize)]
struct MemberRecord<'a> {
    #[serde(flatten)]
    entity: &'a Entity,
    members: Vec<MemberRecord<'a>>,
}

impl<'a> MemberRecord<'a> {
    fn build(table: &'a EntityTable, entity: &'a Entity) -> Self {
        Self {
            entity,
            members: nested(table, &entity.children),
        }
    }
}

fn nested<'a>(table: &'a EntityTable, ids: &'a [String]) -> Vec<MemberRecord<'a>> {
    ids.iter()
        .filter_map(|id| table.get(id))
        .map(|entity| MemberRecord::build(table, entity))
        .collect()
}

impl Serialize for DocumentModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DocumentModel", 4)?;
        state.serialize_field("members", &nested(&self.entities, self.entities.roots()))?;
        state.serialize_field("headers", &self.headers.values().collect::<Vec<_>>())?;
        state.serialize_field("groups", &self.groups.values().collect::<Vec<_>>())?;
        state.serialize_field("pages", &self.pages.values().collect::<Vec<_>>())?;
        state.end()
    }
}
