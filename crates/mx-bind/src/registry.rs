use std::collections::BTreeMap;

use crate::error::BindError;
use crate::signature::{ArgType, FunctionSpec};
use crate::validate::bind_args;
use crate::value::{Args, Value};

/// The body of a binding, invoked with validated, positionally bound values.
pub type Handler = fn(Args) -> Result<Value, BindError>;

/// A declared binding: its spec plus the handler that implements it.
pub struct Binding {
    pub spec: FunctionSpec,
    pub handler: Handler,
}

/// Name-keyed collection of bindings, the dispatch surface a host talks to.
///
/// Lookup by name, docstring retrieval, and validated calls all go through
/// the registry.
pub struct Registry {
    bindings: BTreeMap<&'static str, Binding>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            bindings: BTreeMap::new(),
        }
    }

    /// Register a binding. Returns self for builder-style usage.
    ///
    /// # Panics
    /// Panics if the spec violates the declaration convention: a duplicate
    /// function name, a defaulted argument followed by a required one, a
    /// default on a non-scalar argument, or a `matches` reference to an
    /// argument that is not an earlier `dense` argument. Specs are authored
    /// in code, so these are programming errors, not runtime conditions.
    pub fn with(mut self, binding: Binding) -> Self {
        let spec = &binding.spec;
        let mut seen_default = false;
        for (i, arg) in spec.args.iter().enumerate() {
            if arg.default.is_some() {
                assert!(
                    matches!(arg.ty, ArgType::Scalar(_)),
                    "{}(): default on non-scalar argument '{}'",
                    spec.name,
                    arg.name
                );
                seen_default = true;
            } else {
                assert!(
                    !seen_default,
                    "{}(): required argument '{}' follows a defaulted argument",
                    spec.name,
                    arg.name
                );
            }
            if let ArgType::Matches(other) = arg.ty {
                let valid = spec.args[..i]
                    .iter()
                    .any(|a| a.name == other && matches!(a.ty, ArgType::Dense(_)));
                assert!(
                    valid,
                    "{}(): argument '{}' matches unknown or non-dense argument '{}'",
                    spec.name,
                    arg.name,
                    other
                );
            }
        }
        let previous = self.bindings.insert(spec.name, binding);
        assert!(previous.is_none(), "duplicate binding name");
        self
    }

    /// Look up a binding by its exposed name.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Exposed function names, in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.bindings.keys().copied().collect()
    }

    /// Docstring of a binding, if it exists.
    pub fn doc(&self, name: &str) -> Option<&'static str> {
        self.bindings.get(name).map(|b| b.spec.doc)
    }

    /// Validate `args` against the named binding's spec and invoke its
    /// handler.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, BindError> {
        let binding = self
            .bindings
            .get(name)
            .ok_or_else(|| BindError::UnknownFunction(name.to_string()))?;
        let bound = bind_args(&binding.spec, args)?;
        (binding.handler)(Args::new(bound))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
