use std::io::{self, Write};

use serde_json::Value;
use stockcast_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(&mut out, envelope)?,
    }

    Ok(())
}

fn write_table(out: &mut impl Write, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "endpoint    : {}", envelope.meta.endpoint)?;
    writeln!(out, "base_url    : {}", envelope.meta.base_url)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if let Some(data) = &envelope.data {
        writeln!(out, "data:")?;
        write_value(out, data, 1)?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

fn write_value(out: &mut impl Write, value: &Value, depth: usize) -> Result<(), CliError> {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                if item.is_object() || item.is_array() {
                    writeln!(out, "{indent}{key}:")?;
                    write_value(out, item, depth + 1)?;
                } else {
                    writeln!(out, "{indent}{key}: {}", scalar(item))?;
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                writeln!(out, "{indent}[{index}]")?;
                write_value(out, item, depth + 1)?;
            }
        }
        other => writeln!(out, "{indent}{}", scalar(other))?,
    }
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
