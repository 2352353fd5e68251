//! Name to ID resolution against the bulk catalogs, and back.

mod identity;
mod target;

pub use identity::{resolve_identity_ids, resolve_identity_name};
pub use target::{
    bundle_by_id, bundle_target_to_model, find_bundle, find_integration, integration_by_id,
    integration_target_to_model, resolve_bundle_target, resolve_integration_target,
};

pub(crate) use identity::{identity_models_for, identity_refs_for};
