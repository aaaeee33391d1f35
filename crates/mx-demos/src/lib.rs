//! `mx-demos` - The example bindings shipped with the template.
//!
//! Each module declares one binding with [`mx_bind::declare_binding!`]: a
//! didactic docstring, the argument constraints, and a handler that wraps a
//! typed Rust API. `registry()` assembles the default dispatch surface the
//! FFI layer hands to hosts.

pub mod add_matrices;
pub mod mesh_stats;

use mx_bind::Registry;

/// The default registry with every example binding registered.
pub fn registry() -> Registry {
    Registry::new()
        .with(add_matrices::binding())
        .with(mesh_stats::binding())
}
