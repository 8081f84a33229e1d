//! Interactive confirmation prompts

use std::io::{self, Write};

use anyhow::Result;

/// Ask the user a yes/no question, defaulting to no.
///
/// Returns false when stdin is not a TTY so piped invocations never
/// hang waiting for input.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
