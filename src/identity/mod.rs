//! Identity Resolver: stable ids and deduplication of re-declarations.
//!
//! Every declaration the walker visits carries the front-end's unique symbol
//! identity. The first sighting of a symbol creates its entity under an id
//! computed by [`member_id`]; later sightings (a forward declaration and its
//! definition, a declaration repeated in another header) are merged into the
//! same entity.
//!
//! Children may be seen before their semantic parent, e.g. the out-of-line
//! definition of a method whose class lives in a header that has not been
//! walked yet. The parent chain is then created eagerly as placeholder
//! ("ghost") entities so `parent_id` always points at an existing entity.

mod id;
mod merge;

use rustc_hash::FxHashMap;

use crate::front_end::{SymbolRef, Usr};
use crate::model::{Entity, EntityTable};
use crate::walk::classify_scope;

pub use id::{Disambiguator, header_id, member_id};
pub use merge::Merge;

/// Outcome of handing an entity to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// First sighting; the entity was stored.
    Created(String),
    /// Repeat sighting; merged into the existing entity.
    Merged(String),
    /// The computed id is taken by a different symbol; the entity was dropped.
    Collision(String),
}

impl Resolution {
    /// The id of the stored entity, unless it was dropped.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resolution::Created(id) | Resolution::Merged(id) => Some(id),
            Resolution::Collision(_) => None,
        }
    }
}

/// Unique symbol identity → entity id table.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    symbols: FxHashMap<Usr, String>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, usr: &Usr) -> Option<&str> {
        self.symbols.get(usr).map(String::as_str)
    }

    /// Bind a symbol to an existing id (used for scopes that are not
    /// entities themselves, like anonymous namespaces).
    pub fn register(&mut self, usr: Usr, id: impl Into<String>) {
        self.symbols.entry(usr).or_insert_with(|| id.into());
    }

    /// Store a new entity or merge a repeat sighting.
    ///
    /// `entity.id` must already hold the id computed by [`member_id`].
    pub fn resolve(&mut self, entities: &mut EntityTable, usr: &Usr, entity: Entity) -> Resolution {
        if let Some(id) = self.symbols.get(usr) {
            let id = id.clone();
            if let Some(existing) = entities.get_mut(&id) {
                existing.merge(entity);
                return Resolution::Merged(id);
            }
        }
        if entities.contains(&entity.id) {
            return Resolution::Collision(entity.id);
        }
        let id = entity.id.clone();
        self.symbols.insert(usr.clone(), id.clone());
        entities.insert(entity);
        Resolution::Created(id)
    }

    /// The id of a scope, creating placeholder entities for it and any of
    /// its parents that have not been seen yet.
    ///
    /// Returns the empty id for symbols that cannot hold documented
    /// children (functions, the translation unit).
    pub fn ensure_scope(&mut self, entities: &mut EntityTable, symbol: &SymbolRef) -> String {
        if let Some(id) = self.symbols.get(&symbol.usr) {
            return id.clone();
        }
        let parent_id = match &symbol.parent {
            Some(parent) => self.ensure_scope(entities, parent),
            None => String::new(),
        };
        let Some(classification) = classify_scope(symbol) else {
            return parent_id;
        };
        if is_anonymous(&symbol.name) {
            self.register(symbol.usr.clone(), parent_id.clone());
            return parent_id;
        }

        let disambiguator = Disambiguator {
            is_template: classification.is_template,
            ..Disambiguator::default()
        };
        let id = member_id(classification.kind, &symbol.name, &parent_id, &disambiguator);
        if !entities.contains(&id) {
            tracing::debug!(id = %id, kind = %classification.kind, "placeholder scope");
            let mut ghost = Entity::ghost(id.clone(), symbol.name.clone(), classification.kind)
                .with_parent(parent_id);
            if let Some(data) = ghost.kind.class_data_mut() {
                data.is_template = classification.is_template;
            }
            entities.insert(ghost);
        }
        self.symbols.insert(symbol.usr.clone(), id.clone());
        id
    }
}

/// Unnamed scopes: anonymous namespaces, structs, unions and enums.
pub fn is_anonymous(name: &str) -> bool {
    name.is_empty() || name.starts_with("(anonymous") || name.starts_with("(unnamed")
}
