//! Reads an admin password from stdin and prints the Argon2 PHC string to put
//! in `admin.password_hash` (or `NOTE_BOARD__ADMIN__PASSWORD_HASH`).
//!
//! ```text
//! echo -n 'correct horse' | hash-password
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);

    let hash = auth_adapters::hash_password(password)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{hash}")?;
    Ok(())
}
