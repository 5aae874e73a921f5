// NOTE: Form Engine Rationale
//
// Why schema-driven (not one handler per entity)?
// - The source of truth for a form is its ordered field list; everything
//   else (defaults, edit dispatch, validation, wire payload) derives from it
// - Six entities share one engine instead of six hand-duplicated branches
// - A new entity is a new FormSchema constructor, not new control flow
//
// Why serde_json::Value drafts (not typed structs)?
// - Edits arrive as (path, raw string) pairs from the field renderer;
//   dispatching into a dynamic map is one pure function, into six structs
//   it is six match arms that drift apart
// - The wire format is JSON either way; the typed DTOs in qhse-types are
//   for reading API responses, drafts only ever flow outward
//
// Why explicit errors on bad paths/indices (not silent no-ops)?
// - A stale repeatable-group index is a caller bug; swallowing it turns a
//   lost keystroke into silent data corruption

pub mod draft;
pub mod edit;
pub mod entities;
pub mod error;
pub mod schema;
pub mod validate;
pub mod wire;

pub use draft::{get_path, new_draft, seed_from};
pub use edit::{add_item, apply_edit, remove_item, remove_item_by_key};
pub use error::{Error, Result};
pub use schema::{FieldKind, FieldSpec, FormSchema, GroupSpec};
pub use validate::validate;
pub use wire::to_wire_payload;

/// Helper key carried by repeatable-group items while a draft is being
/// edited. Stripped from wire payloads.
pub const ITEM_KEY: &str = "_key";
