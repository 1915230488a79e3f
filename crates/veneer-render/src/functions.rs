//! Helper function registry.
//!
//! A [`FunctionRegistry`] maps names to pure helper functions callable from
//! template bodies as `{{ name(args...) }}`. The registry is built once
//! before the first render — typically at process start — shared behind an
//! `Arc`, and never mutated afterwards, so concurrent renders read it
//! without synchronization.
//!
//! Arity is declared at registration time and enforced on every invocation;
//! a mismatch or a call to an unregistered name fails the render with a
//! descriptive error rather than producing empty output.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::Rest;
use minijinja::{Environment, ErrorKind, Value};

use crate::error::EngineError;

/// A registered helper: declared arity plus the callable itself.
#[derive(Clone)]
struct Helper {
    arity: usize,
    func: Arc<dyn Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync>,
}

/// Process-wide table of helper functions usable from template bodies.
///
/// # Example
///
/// ```rust
/// use minijinja::Value;
/// use veneer_render::FunctionRegistry;
///
/// let registry = FunctionRegistry::new().register("shout", 1, |args| {
///     let s = args[0].as_str().unwrap_or_default();
///     Ok(Value::from(format!("{}!", s.to_uppercase())))
/// });
/// assert!(registry.contains("shout"));
/// ```
///
/// Registering a name twice keeps the last registration.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    helpers: BTreeMap<String, Helper>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the stock helpers:
    ///
    /// | Name | Arity | Behavior |
    /// |------|-------|----------|
    /// | `to_upper` | 1 | uppercases a string |
    /// | `to_lower` | 1 | lowercases a string |
    /// | `add` | 2 | adds two integers |
    pub fn with_defaults() -> Self {
        Self::new()
            .register("to_upper", 1, |args| {
                let s = expect_str("to_upper", &args[0])?;
                Ok(Value::from(s.to_uppercase()))
            })
            .register("to_lower", 1, |args| {
                let s = expect_str("to_lower", &args[0])?;
                Ok(Value::from(s.to_lowercase()))
            })
            .register("add", 2, |args| {
                let a = expect_int("add", &args[0])?;
                let b = expect_int("add", &args[1])?;
                Ok(Value::from(a + b))
            })
    }

    /// Registers a helper under `name` with a fixed arity.
    ///
    /// The callable must be pure: renders may run concurrently and the
    /// registry is shared read-only between them.
    pub fn register(
        mut self,
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync + 'static,
    ) -> Self {
        self.helpers.insert(
            name.into(),
            Helper {
                arity,
                func: Arc::new(func),
            },
        );
        self
    }

    /// Whether a helper is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Registered helper names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    /// Number of registered helpers.
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Installs every helper into a template environment.
    ///
    /// The installed wrapper checks the argument count against the declared
    /// arity before delegating, so an arity mismatch fails the render.
    pub(crate) fn install(&self, env: &mut Environment<'static>) {
        for (name, helper) in &self.helpers {
            let arity = helper.arity;
            let func = Arc::clone(&helper.func);
            let fn_name = name.clone();
            env.add_function(
                name.clone(),
                move |args: Rest<Value>| -> Result<Value, minijinja::Error> {
                    if args.0.len() != arity {
                        return Err(minijinja::Error::new(
                            ErrorKind::InvalidOperation,
                            format!(
                                "{fn_name} expects {arity} argument(s), got {}",
                                args.0.len()
                            ),
                        ));
                    }
                    (func)(&args.0).map_err(|e| {
                        minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string())
                    })
                },
            );
        }
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("names", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, EngineError> {
    value
        .as_str()
        .ok_or_else(|| EngineError::Render(format!("{name} expects a string argument")))
}

fn expect_int(name: &str, value: &Value) -> Result<i64, EngineError> {
    i64::try_from(value.clone())
        .map_err(|_| EngineError::Render(format!("{name} expects an integer argument")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let registry = FunctionRegistry::with_defaults();
        assert!(registry.contains("to_upper"));
        assert!(registry.contains("to_lower"));
        assert!(registry.contains("add"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_custom_helper() {
        let registry = FunctionRegistry::new().register("double", 1, |args| {
            let n = expect_int("double", &args[0])?;
            Ok(Value::from(n * 2))
        });
        assert!(registry.contains("double"));
        assert!(!registry.contains("triple"));
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = FunctionRegistry::new()
            .register("answer", 0, |_| Ok(Value::from(1)))
            .register("answer", 0, |_| Ok(Value::from(42)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let registry = FunctionRegistry::with_defaults();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["add", "to_lower", "to_upper"]);
    }

    #[test]
    fn test_installed_helper_callable() {
        let registry = FunctionRegistry::with_defaults();
        let mut env = Environment::new();
        registry.install(&mut env);

        let out = env.render_str("{{ to_upper('go corp') }}", ()).unwrap();
        assert_eq!(out, "GO CORP");
    }

    #[test]
    fn test_installed_helper_arity_checked() {
        let registry = FunctionRegistry::with_defaults();
        let mut env = Environment::new();
        registry.install(&mut env);

        let err = env.render_str("{{ add(1) }}", ()).unwrap_err();
        assert!(err.to_string().contains("expects 2 argument(s)"));
    }
}
