//! Interactive mode for the server.
//!
//! Prompts for the bind address, port and sightings API before starting.

use dialoguer::{Confirm, Input};

use crate::config::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Current environment values are offered as defaults. Answers are written
/// back to `BIND_ADDR`, `PORT` and `TICKSIGHT_API_URL` before delegating to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("TickSight UK Server");
    println!();

    let current = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(current.bind_addr.clone())
        .interact_text()
        .unwrap_or(current.bind_addr);

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default(current.port.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            input
                .trim()
                .parse::<u16>()
                .map(|_| ())
                .map_err(|_| "Enter a port number between 0 and 65535")
        })
        .interact_text()
        .unwrap_or_else(|_| current.port.to_string());

    let api_url: String = Input::new()
        .with_prompt("Sightings API URL")
        .default(current.api_url.clone())
        .interact_text()
        .unwrap_or(current.api_url);

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port_str.trim());
        std::env::set_var("TICKSIGHT_API_URL", &api_url);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{}?", port_str.trim()))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
