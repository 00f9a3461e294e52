use std::process;

use graphdb_filter::parse_filter_value;

use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_filter(
    scalar_type: &str,
    input: &str,
    pretty: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let value = match parse_filter_value(scalar_type, input) {
        Ok(value) => value,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => match value.encode() {
            Ok(json) => print_json(&json, pretty),
            Err(e) => {
                report_error(&e.to_string(), output, quiet);
                process::exit(1);
            }
        },
    }
}
