//! Matching rule for `<kind>.get`.
//!
//! | Query | Matches |
//! |---|---|
//! | `{id}` | entity with that id, any tenant |
//! | `{id, group_id}` | entity with that id **and** that group |
//! | `{name}` | entity with that name, any tenant |
//! | `{name, group_id}` | entity with that name **and** that group |
//!
//! A zero `group_id` means "no tenant restriction".

use shared_types::{EntityQuery, Resource, UNASSIGNED_GROUP};

/// Whether `entity` satisfies `query`.
pub fn matches_query<E: Resource>(query: &EntityQuery, entity: &E) -> bool {
    let key_matches = match query.name.as_deref() {
        Some(name) => entity.name() == name,
        None => entity.id() == query.id,
    };

    if query.group_id == UNASSIGNED_GROUP {
        key_matches
    } else {
        key_matches && entity.group_id() == query.group_id
    }
}
