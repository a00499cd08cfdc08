use std::io::Write as _;

use anyhow::Result;
use colored::Colorize;
use futures_util::StreamExt;
use serde_json::Value;

use crate::api::{EngineClient, EngineError, NdjsonDecoder};
use crate::commands::sessions::resolve_engine;
use crate::config::Config;

/// Send a message into a session and stream the agent's response
pub async fn run(
    config: &Config,
    engine_id: &str,
    session_id: &str,
    message: &str,
    user_id: &str,
    raw_output: bool,
    debug: bool,
) -> Result<()> {
    let api = EngineClient::new(config)?;

    println!(
        "{} Sending message to session '{}'...",
        "→".blue().bold(),
        session_id
    );
    println!("  User: '{}'", message);

    let Some(_engine) = resolve_engine(&api, engine_id).await else {
        return Ok(());
    };

    match stream_response(&api, engine_id, session_id, user_id, message, raw_output).await {
        Ok(()) => {}
        Err(EngineError::NotFound { message }) => {
            eprintln!(
                "{} Error during chat: resource not found. Check your session ID.",
                "✗".red().bold()
            );
            eprintln!("  Details: {}", message);
        }
        Err(EngineError::Api { status, message }) => {
            eprintln!(
                "{} Error during chat: API call failed with status {}",
                "✗".red().bold(),
                status
            );
            eprintln!("  Details: {}", message);
        }
        Err(e) => {
            eprintln!(
                "{} An unexpected error occurred during chat session: {}",
                "✗".red().bold(),
                e
            );
            if debug {
                eprintln!("  {:?}", e);
            }
        }
    }

    Ok(())
}

/// Consume the NDJSON chunk stream, printing each chunk as it arrives.
/// The stream is finite; it ends when the remote side closes the body.
async fn stream_response(
    api: &EngineClient,
    engine_id: &str,
    session_id: &str,
    user_id: &str,
    message: &str,
    raw_output: bool,
) -> Result<(), EngineError> {
    let response = api
        .stream_query(engine_id, session_id, user_id, message)
        .await?;

    println!();
    if raw_output {
        println!("{}", "--- RAW AGENT STREAM ---".dimmed());
    } else {
        println!("{}", "Agent:".bold());
    }

    let mut stream = response.bytes_stream();
    let mut decoder = NdjsonDecoder::default();

    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        for value in decoder.push(&bytes)? {
            emit_chunk(&value, raw_output)?;
        }
    }
    if let Some(value) = decoder.finish()? {
        emit_chunk(&value, raw_output)?;
    }

    if raw_output {
        println!("{}", "--- END RAW AGENT STREAM ---".dimmed());
    } else {
        println!();
    }

    Ok(())
}

/// Print one received chunk: verbatim in raw mode, otherwise the first text
/// part, flushed immediately so output appears as it arrives.
fn emit_chunk(chunk: &Value, raw_output: bool) -> Result<(), EngineError> {
    if raw_output {
        let rendered = serde_json::to_string_pretty(chunk)
            .map_err(|e| EngineError::Unexpected(format!("unprintable chunk: {}", e)))?;
        println!("{}", rendered);
    } else if let Some(text) = extract_text(chunk) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
    }
    Ok(())
}

/// The first text part of a chunk, when it carries one.
fn extract_text(chunk: &Value) -> Option<&str> {
    chunk
        .get("content")?
        .get("parts")?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_from_model_chunk() {
        let chunk = json!({
            "content": {
                "role": "model",
                "parts": [{ "text": "Shortened: " }, { "text": "ignored tail" }]
            }
        });
        assert_eq!(extract_text(&chunk), Some("Shortened: "));
    }

    #[test]
    fn test_extract_text_ignores_non_text_chunks() {
        let tool_call = json!({
            "content": {
                "parts": [{ "function_call": { "name": "count_characters" } }]
            }
        });
        assert_eq!(extract_text(&tool_call), None);

        let metadata = json!({ "usage": { "tokens": 12 } });
        assert_eq!(extract_text(&metadata), None);

        let empty_parts = json!({ "content": { "parts": [] } });
        assert_eq!(extract_text(&empty_parts), None);
    }
}
