//! Command handlers for the `stencil` CLI.
//!
//! Each submodule implements one command. Argument parsing, file loading and
//! error reporting are shared and live here. This module is the only place
//! that touches the file system.

use std::path::{Path, PathBuf};

use stencil_diagnostic::ErrorCode;
use stencil_ir::Template;

use crate::{EngineError, TemplateRegistry};

mod attrs;
mod explain;
mod extract;
mod pattern;
mod render;

pub use attrs::attrs;
pub use explain::explain;
pub use extract::extract;
pub use pattern::pattern;
pub use render::render;

/// Extension of template files loaded by `--include-dir`.
pub const TEMPLATE_EXTENSION: &str = "ft";

/// A failed command. [`CliError::report`] is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{message}")]
    Io { message: String },
    /// A template operation failed; reported against the template's text.
    #[error("{error}")]
    Template {
        path: String,
        text: String,
        error: EngineError,
    },
    #[error("unknown error code `{0}`")]
    UnknownCode(String),
    #[error("`{document}` does not contain an instance of `{template}`")]
    NoMatch { template: String, document: String },
}

impl CliError {
    pub fn template(path: &str, text: &str, error: impl Into<EngineError>) -> Self {
        CliError::Template {
            path: path.to_owned(),
            text: text.to_owned(),
            error: error.into(),
        }
    }

    /// Error text for stderr, with a source snippet where there is one.
    pub fn report(&self) -> String {
        match self {
            CliError::Template { path, text, error } => error.to_diagnostic().render(path, text),
            CliError::UnknownCode(_) => format!(
                "error: {self}\n\nCodes look like E0001 (lexical), E1001 (parse), \
                 E3001 (pattern) or E6001 (render).\n"
            ),
            _ => format!("error: {self}\n"),
        }
    }
}

/// Arguments after the command name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandArgs {
    pub positional: Vec<String>,
    pub include_dirs: Vec<PathBuf>,
    pub known: Vec<String>,
    pub dummies: bool,
}

impl CommandArgs {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut parsed = CommandArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if let Some(dir) = arg.strip_prefix("--include-dir=") {
                parsed.include_dirs.push(PathBuf::from(dir));
            } else if let Some(name) = arg.strip_prefix("--known=") {
                parsed.known.push(name.to_owned());
            } else if arg == "--include-dir" || arg == "-I" {
                let dir = iter.next().ok_or_else(|| missing_value(arg))?;
                parsed.include_dirs.push(PathBuf::from(dir));
            } else if arg == "--known" || arg == "-k" {
                let name = iter.next().ok_or_else(|| missing_value(arg))?;
                parsed.known.push(name.clone());
            } else if arg == "--dummies" {
                parsed.dummies = true;
            } else if arg.starts_with("--") {
                return Err(CliError::Usage(format!("unknown option `{arg}`")));
            } else {
                parsed.positional.push(arg.clone());
            }
        }
        Ok(parsed)
    }

    /// The `index`-th positional argument, or a usage error naming it.
    pub fn required(&self, index: usize, what: &str, usage: &str) -> Result<&str, CliError> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("missing {what}\nUsage: {usage}")))
    }

    /// Registry of every template in the include directories.
    pub fn registry(&self) -> Result<TemplateRegistry, CliError> {
        let mut registry = TemplateRegistry::new();
        for dir in &self.include_dirs {
            load_include_dir(dir, &mut registry)?;
        }
        Ok(registry)
    }
}

fn missing_value(option: &str) -> CliError {
    CliError::Usage(format!("`{option}` needs a value"))
}

/// Read a file, mapping failures to a user-facing message.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        let shown = path.display();
        let message = match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file `{shown}`"),
            std::io::ErrorKind::PermissionDenied => format!("permission denied reading `{shown}`"),
            std::io::ErrorKind::InvalidData => format!("`{shown}` contains invalid UTF-8 data"),
            _ => format!("error reading `{shown}`: {e}"),
        };
        CliError::Io { message }
    })
}

/// Load the template at `path`, named after its file name.
pub fn load_template(path: &str) -> Result<Template, CliError> {
    let path = Path::new(path);
    let text = read_file(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    Ok(template_from_file_name(file_name, text))
}

/// `Header.java.ft` is template `Header` with extension `java`.
pub fn template_from_file_name(file_name: &str, text: String) -> Template {
    let stem = file_name
        .strip_suffix(TEMPLATE_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(file_name);
    match stem.rsplit_once('.') {
        Some((name, extension)) if !name.is_empty() => Template::new(name, extension, text),
        _ => Template::new(stem, "", text),
    }
}

/// Add every `*.ft` file in `dir` as an include template, in file-name order.
fn load_include_dir(dir: &Path, registry: &mut TemplateRegistry) -> Result<(), CliError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::Io {
        message: format!("cannot read include directory `{}`: {e}", dir.display()),
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION)
        })
        .collect();
    paths.sort();

    for path in paths {
        let text = read_file(&path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        registry.add_include(template_from_file_name(file_name, text));
    }
    tracing::debug!(dir = %dir.display(), templates = registry.len(), "loaded include directory");
    Ok(())
}

/// Whether `code` names a known error code.
pub fn parse_code(code: &str) -> Result<ErrorCode, CliError> {
    ErrorCode::from_code(code).ok_or_else(|| CliError::UnknownCode(code.to_owned()))
}

#[cfg(test)]
mod tests;
