//! Path and matching templates
//!
//! Settings carry small Jinja templates such as
//! `{{ obj.site.slug }}/{{ obj.name }}.cfg` that are rendered against a
//! device with [`minijinja`]. Rendering is all-or-nothing: on any failure
//! no partial output is returned.

use std::fmt;

use minijinja::{Environment, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Classification of a template failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateErrorKind {
    /// An attribute path did not resolve against the context.
    Undefined,
    /// The template text is not well formed.
    Syntax,
    /// The template parsed but could not be rendered.
    Render,
}

impl fmt::Display for TemplateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Syntax => write!(f, "syntax"),
            Self::Render => write!(f, "render"),
        }
    }
}

impl From<ErrorKind> for TemplateErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::UndefinedError => Self::Undefined,
            ErrorKind::SyntaxError
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction => Self::Syntax,
            _ => Self::Render,
        }
    }
}

/// What to do when an attribute path does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedBehavior {
    /// Fail the render with [`TemplateErrorKind::Undefined`].
    #[default]
    Strict,
    /// Substitute an empty string.
    Lenient,
}

impl From<UndefinedBehavior> for minijinja::UndefinedBehavior {
    fn from(behavior: UndefinedBehavior) -> Self {
        match behavior {
            UndefinedBehavior::Strict => Self::Strict,
            UndefinedBehavior::Lenient => Self::Lenient,
        }
    }
}

/// Capability to render a template string against a context.
///
/// The resolver and orchestrator depend on this seam rather than a
/// concrete engine.
pub trait TemplateEvaluator: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String>;
}

/// Jinja rendering with a configurable undefined policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct JinjaTemplateEngine {
    undefined: UndefinedBehavior,
}

impl JinjaTemplateEngine {
    /// Engine that fails on undefined attributes.
    pub fn strict() -> Self {
        Self::new(UndefinedBehavior::Strict)
    }

    pub fn new(undefined: UndefinedBehavior) -> Self {
        Self { undefined }
    }

    fn environment<'s>(&self) -> Environment<'s> {
        let mut env = Environment::new();
        env.set_undefined_behavior(self.undefined.into());
        env
    }

    /// Compile a template without rendering it.
    pub fn check(&self, template: &str) -> Result<()> {
        let env = self.environment();
        env.template_from_str(template)
            .map(|_| ())
            .map_err(|e| template_error(template, &e))
    }

    /// Evaluate a single expression such as `site.slug`.
    ///
    /// Undefined and none values come back as `None`.
    pub fn evaluate(&self, expression: &str, context: &Value) -> Result<Option<String>> {
        let env = self.environment();
        let compiled = env
            .compile_expression(expression)
            .map_err(|e| template_error(expression, &e))?;
        let value = compiled
            .eval(context)
            .map_err(|e| template_error(expression, &e))?;

        if value.is_undefined() || value.is_none() {
            Ok(None)
        } else {
            Ok(Some(value.to_string()))
        }
    }
}

impl TemplateEvaluator for JinjaTemplateEngine {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        self.environment()
            .render_str(template, context)
            .map_err(|e| template_error(template, &e))
    }
}

fn template_error(template: &str, err: &minijinja::Error) -> Error {
    Error::template(template, err.kind().into(), err.to_string())
}
