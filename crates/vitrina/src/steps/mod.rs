//! Step catalogue: sentence patterns bound to handlers.
//!
//! A [`StepRegistry`] is a table of anchored regex patterns, each bound at
//! registration time to an async handler. At run time a scenario line is
//! matched against the table; captures are handed to the handler through
//! [`StepArgs`], which parses them at the boundary so business logic never
//! sees raw capture strings.

mod catalogue;

pub use catalogue::{catalogue, PURCHASE_COMPLETED_MARKER};

use futures::future::BoxFuture;
use regex::Regex;

use crate::context::ScenarioContext;
use crate::result::{VitrinaError, VitrinaResult};

/// Captured parameters of a matched sentence.
#[derive(Debug, Clone)]
pub struct StepArgs {
    captures: Vec<String>,
}

impl StepArgs {
    /// Build args from raw capture strings (mostly for tests)
    pub fn new(captures: Vec<String>) -> Self {
        Self { captures }
    }

    /// The `index`-th capture as text.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::InvalidArgument`] if the capture is missing.
    pub fn get(&self, index: usize) -> VitrinaResult<&str> {
        self.captures
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| VitrinaError::InvalidArgument {
                message: format!("step pattern has no capture group {index}"),
            })
    }

    /// The `index`-th capture parsed as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::InvalidArgument`] if the capture is missing or
    /// does not parse.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> VitrinaResult<T> {
        let raw = self.get(index)?;
        raw.parse().map_err(|_| VitrinaError::InvalidArgument {
            message: format!(
                "capture {index} ({raw:?}) is not a valid {}",
                std::any::type_name::<T>()
            ),
        })
    }
}

/// Handler bound to a sentence pattern.
///
/// The context is a cheap bundle of shared handles, so each invocation gets
/// its own clone; page objects carry no local state to mutate.
pub type StepHandler =
    Box<dyn Fn(ScenarioContext, StepArgs) -> BoxFuture<'static, VitrinaResult<()>> + Send + Sync>;

struct StepDef {
    pattern: Regex,
    handler: StepHandler,
}

/// Registration table of sentence patterns.
#[derive(Default)]
pub struct StepRegistry {
    defs: Vec<StepDef>,
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry")
            .field("patterns", &self.defs.len())
            .finish()
    }
}

impl StepRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a sentence pattern to a handler.
    ///
    /// The pattern is anchored to the whole sentence.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::InvalidArgument`] if the pattern is not a
    /// valid regex.
    pub fn register<F>(&mut self, pattern: &str, handler: F) -> VitrinaResult<()>
    where
        F: Fn(ScenarioContext, StepArgs) -> BoxFuture<'static, VitrinaResult<()>>
            + Send
            + Sync
            + 'static,
    {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|e| VitrinaError::InvalidArgument {
            message: format!("invalid step pattern {pattern:?}: {e}"),
        })?;
        self.defs.push(StepDef {
            pattern: regex,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Whether any pattern matches `sentence`
    pub fn matches(&self, sentence: &str) -> bool {
        self.defs.iter().any(|def| def.pattern.is_match(sentence))
    }

    /// Match `sentence` against the table and run the bound handler.
    ///
    /// Patterns are tried in registration order; the first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::UndefinedStep`] when nothing matches, or the
    /// handler's error.
    pub async fn execute(&self, ctx: &ScenarioContext, sentence: &str) -> VitrinaResult<()> {
        for def in &self.defs {
            if let Some(caps) = def.pattern.captures(sentence) {
                let args = StepArgs::new(
                    caps.iter()
                        .skip(1)
                        .map(|c| c.map_or_else(String::new, |m| m.as_str().to_string()))
                        .collect(),
                );
                return (def.handler)(ctx.clone(), args).await;
            }
        }
        Err(VitrinaError::UndefinedStep {
            sentence: sentence.to_string(),
        })
    }
}
