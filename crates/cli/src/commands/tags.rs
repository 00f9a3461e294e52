use graphdb_codec::{logical_type_tags, value_tags};

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_tags(pretty: bool, output: OutputFormat) {
    let values = value_tags();
    let logical_types = logical_type_tags();

    match output {
        OutputFormat::Text => {
            println!("Value tags ({}):", values.len());
            for tag in &values {
                println!("  {}", tag);
            }
            println!("LogicalType tags ({}):", logical_types.len());
            for tag in &logical_types {
                println!("  {}", tag);
            }
        }
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "value": values,
                "logical_type": logical_types,
            });
            print_json(&doc, pretty);
        }
    }
}
