use mx_bind::Registry;

/// Opaque context handle that owns the binding registry.
pub struct MXContext {
    pub registry: Registry,
}

impl Default for MXContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MXContext {
    pub fn new() -> Self {
        Self {
            registry: mx_demos::registry(),
        }
    }
}
