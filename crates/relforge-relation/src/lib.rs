//! Relation inference over introspected table schemas.
//!
//! Given a [`SchemaProvider`] and a [`Scope`], [`infer_relations`] walks every
//! foreign key in scope and builds a [`RelationMap`](relforge_core::RelationMap):
//! belongs-to and has-one/has-many pairs for ordinary keys, many-to-many pairs
//! for junction tables, and optionally linked back-references.

pub mod error;
pub mod infer;
pub mod inverse;
pub mod junction;
pub mod namer;
pub mod provider;

pub use error::{InferenceError, ProviderError};
pub use infer::{InferenceOptions, RelationInference, Scope, entity_reference, infer_relations};
pub use inverse::link_inverse_relations;
pub use junction::{JunctionClass, classify, junction_key_relations};
pub use namer::relation_name;
pub use provider::{InMemorySchemaProvider, SchemaCache, SchemaProvider};
