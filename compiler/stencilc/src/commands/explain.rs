//! The `explain` command: describe an error code.

use super::{parse_code, CliError};

pub fn explain(args: &[String]) -> Result<(), CliError> {
    let Some(code) = args.first() else {
        return Err(CliError::Usage(
            "missing error code\nUsage: stencil explain <CODE>".to_owned(),
        ));
    };
    let code = parse_code(code)?;
    println!("{code}: {}", code.description());
    Ok(())
}
