//! Entity arena addressed by string id.

use indexmap::IndexMap;

use super::entity::Entity;
use crate::base::constants::SCOPE_SEPARATOR;

/// All entities of a run, in creation order, plus the ordered root list.
///
/// Parent/child links are kept in both directions: `Entity::parent_id` and
/// the parent's `children` list. `insert` maintains both.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    entities: IndexMap<String, Entity>,
    roots: Vec<String>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new entity and link it under its parent.
    ///
    /// Returns false (and leaves the table unchanged) if the id is taken.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.entities.contains_key(&entity.id) {
            return false;
        }
        let id = entity.id.clone();
        let parent_id = entity.parent_id.clone();
        self.entities.insert(id.clone(), entity);
        if parent_id.is_empty() {
            self.roots.push(id);
        } else {
            self.add_child(&parent_id, &id);
        }
        true
    }

    /// Append `child` to `parent`'s child list unless already present.
    pub fn add_child(&mut self, parent: &str, child: &str) {
        if let Some(parent) = self.entities.get_mut(parent) {
            if !parent.children.iter().any(|c| c == child) {
                parent.children.push(child.to_string());
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Ids in creation order.
    pub fn ids(&self) -> Vec<String> {
        self.entities.keys().cloned().collect()
    }

    /// Ids of root-scope entities in creation order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Child ids of a scope; the empty id denotes the root scope.
    pub fn children(&self, scope: &str) -> &[String] {
        if scope.is_empty() {
            return &self.roots;
        }
        self.entities
            .get(scope)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
    }

    /// Children of `scope` named `name`, in declaration order.
    pub fn children_named<'a, 'n>(
        &'a self,
        scope: &str,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Entity> + use<'a, 'n> {
        self.children(scope)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .filter(move |e| e.name == name)
    }

    /// `id` and its ancestors, innermost first.
    pub fn ancestors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Entity> + use<'a> {
        std::iter::successors(self.entities.get(id), |e| {
            if e.parent_id.is_empty() {
                None
            } else {
                self.entities.get(&e.parent_id)
            }
        })
    }

    /// `ns::Class::member` style name of an entity.
    pub fn qualified_name(&self, id: &str) -> Option<String> {
        self.entities.get(id)?;
        let mut names: Vec<&str> = self.ancestors(id).map(|e| e.name.as_str()).collect();
        names.reverse();
        Some(names.join(SCOPE_SEPARATOR))
    }
}
