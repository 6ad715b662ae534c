//! Prints an Argon2 hash for the shared admin password.
//! Run with: cargo run --bin hash-password -- <password>
//! and put the output in ADMIN__PASSWORD_HASH.

use tamsa_cms::services::AuthService;

fn main() -> anyhow::Result<()> {
    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => std::env::var("ADMIN_PASSWORD")
            .map_err(|_| anyhow::anyhow!("usage: hash-password <password> (or set ADMIN_PASSWORD)"))?,
    };

    if password.len() < 8 {
        anyhow::bail!("Admin password must be at least 8 characters");
    }

    let hash = AuthService::hash_password(&password)?;
    println!("{}", hash);

    Ok(())
}
