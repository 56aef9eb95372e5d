//! Run the served browser scripts in an embedded JavaScript engine.
//!
//! The sandbox installs a recorded stand-in for the DOM, `fetch`, timers and
//! the console (`browser_stub.js`), so tests can assert on what a script did
//! to the page and the network without a browser.

use boa_engine::{Context, JsError, Source};
use thiserror::Error;

const BROWSER_STUB: &str = include_str!("browser_stub.js");

/// Errors raised while evaluating a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script threw or failed to parse.
    #[error("script error: {0}")]
    Js(String),

    /// The report expression did not produce JSON.
    #[error("report is not JSON: {0}")]
    Report(#[from] serde_json::Error),
}

impl From<JsError> for ScriptError {
    fn from(err: JsError) -> Self {
        Self::Js(err.to_string())
    }
}

/// A fresh JavaScript global scope with the browser stub installed.
pub struct ScriptSandbox {
    context: Context,
}

impl ScriptSandbox {
    /// Create a sandbox.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Js` if the stub fails to evaluate.
    pub fn new() -> Result<Self, ScriptError> {
        let mut sandbox = Self {
            context: Context::default(),
        };
        sandbox.eval(BROWSER_STUB)?;
        Ok(sandbox)
    }

    /// Evaluate source in the global scope.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Js` if the source throws.
    pub fn eval(&mut self, source: &str) -> Result<(), ScriptError> {
        self.context.eval(Source::from_bytes(source))?;
        Ok(())
    }

    /// Run queued promise jobs until none remain.
    pub fn settle(&mut self) {
        self.context.run_jobs();
    }

    /// Evaluate `expression` and return it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression throws or cannot be serialized.
    pub fn report(&mut self, expression: &str) -> Result<serde_json::Value, ScriptError> {
        let source = format!("JSON.stringify({expression})");
        let value = self.context.eval(Source::from_bytes(&source))?;
        let text = value.to_string(&mut self.context)?.to_std_string_escaped();
        Ok(serde_json::from_str(&text)?)
    }
}
