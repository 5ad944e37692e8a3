// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive part of the initial OAuth authorization.

use std::io::{BufRead, Write};

use crate::error::{AppError, Result};

/// Sends the operator to the consent page and collects the redirect URL.
pub trait AuthorizationPrompt: Send + Sync {
    fn redirect_url(&self, authorize_url: &str) -> Result<String>;
}

/// Opens the browser and reads the pasted redirect URL from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl AuthorizationPrompt for ConsolePrompt {
    fn redirect_url(&self, authorize_url: &str) -> Result<String> {
        eprintln!("\nOpen this URL in your browser to authorize namelizer:\n");
        eprintln!("{}\n", authorize_url);

        if open::that(authorize_url).is_err() {
            eprintln!("(Could not open browser automatically, please copy the URL above)");
        }

        print!("Please enter the return link: ");
        std::io::stdout()
            .flush()
            .map_err(|e| AppError::Internal(e.into()))?;

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| AppError::Auth(format!("Failed to read return link: {}", e)))?;

        Ok(line.trim().to_string())
    }
}
