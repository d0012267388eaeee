//! The `render` command: merge a template with `NAME=VALUE` properties.

use chrono::Local;

use super::{load_template, CliError, CommandArgs};
use crate::{DefaultProperties, EngineConfig, PropertyMap, TemplateEngine, Value};

const USAGE: &str = "stencil render <file> [NAME=VALUE]... [--include-dir DIR]";

/// Print the merged template. On a render failure the partial output is
/// still printed before the error is reported.
pub fn render(args: &[String]) -> Result<(), CliError> {
    let args = CommandArgs::parse(args)?;
    let path = args.required(0, "template file", USAGE)?;
    let properties = parse_properties(&args.positional[1..])?;
    let template = load_template(path)?;
    let registry = args.registry()?;

    let config = EngineConfig::default()
        .with_default_properties(DefaultProperties::from_env(&Local::now().naive_local()));
    let engine = TemplateEngine::new(&registry).with_config(config);

    match engine.merge_template(&template, &properties) {
        Ok(merged) => {
            print!("{}", merged.text);
            Ok(())
        }
        Err(err) => {
            if let Some(partial) = err.partial_output() {
                print!("{partial}");
            }
            Err(CliError::template(path, &template.text, err))
        }
    }
}

/// `NAME=VALUE` pairs. Values are strings; a later pair wins.
pub(super) fn parse_properties(pairs: &[String]) -> Result<PropertyMap, CliError> {
    let mut properties = PropertyMap::default();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(CliError::Usage(format!(
                "expected NAME=VALUE, found `{pair}`\nUsage: {USAGE}"
            )));
        };
        if name.is_empty() {
            return Err(CliError::Usage(format!("empty property name in `{pair}`")));
        }
        properties.insert(name.to_owned(), Value::from(value));
    }
    Ok(properties)
}
