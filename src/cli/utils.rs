use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::pages::{Notice, View};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(obj) = response.as_object_mut() {
                    obj.extend(extra);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Print a page: its rendered frame and message area as text, or the view
/// model itself as JSON
pub fn output_view<T: Serialize>(
    output_format: &OutputFormat,
    view: &View,
    data: &T,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "success": true, "data": data });
            if let Some(Notice::Success(msg)) = view.notice() {
                response["message"] = json!(msg);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            if let Some(Notice::Success(msg)) = view.notice() {
                println!("✓ {}", msg);
            }
            if !view.frame().is_empty() {
                print!("{}", view.frame());
            }
        }
    }
    Ok(())
}

/// Report the message area of a page after a mutation
pub fn output_notice(output_format: &OutputFormat, view: &View) -> anyhow::Result<()> {
    match view.notice() {
        Some(Notice::Success(msg)) => output_success(output_format, msg, None),
        Some(Notice::Error(msg)) => output_error(output_format, msg, None),
        None => Ok(()),
    }
}

/// Read one line from stdin after printing a label on stderr
pub async fn prompt_line(label: &str) -> anyhow::Result<String> {
    let label = label.to_string();
    let line = tokio::task::spawn_blocking(move || -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}: ", label)?;
        stderr.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    })
    .await??;
    Ok(line)
}

/// Use the provided value or ask for it
pub async fn value_or_prompt(provided: Option<String>, label: &str) -> anyhow::Result<String> {
    match provided {
        Some(value) => Ok(value),
        None => prompt_line(label).await,
    }
}
