//! Login, registration, role selection, and logout commands.

use std::io::{BufRead, Write};

use agrent_core::api::{LoginOutcome, Registration};
use agrent_core::config::Config;
use agrent_core::session::{Role, SessionStore};
use anyhow::{Context, Result};

use super::build_client;

pub struct RegisterArgs {
    pub username: String,
    pub password: Option<String>,
    pub fullname: String,
    pub phone: String,
    pub address: String,
}

/// Reads the password from stdin when it wasn't passed as a flag.
fn resolve_password(password: Option<&str>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password.to_string());
    }

    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    let password = line.trim().to_string();
    anyhow::ensure!(!password.is_empty(), "Password must not be empty");
    Ok(password)
}

pub async fn login(config: &Config, username: &str, password: Option<&str>) -> Result<()> {
    let password = resolve_password(password)?;
    let client = build_client(config)?;

    match client.login(username, &password).await? {
        LoginOutcome::Authenticated {
            role,
        } => {
            println!("Logged in as {username} ({role}).");
        }
        LoginOutcome::RoleSelectionRequired {
            username,
        } => {
            println!("Welcome {username} — no role is assigned to this account yet.");
            println!("Run `agrent role owner` or `agrent role renter` to finish logging in.");
        }
    }
    Ok(())
}

pub async fn register(config: &Config, args: RegisterArgs) -> Result<()> {
    let password = resolve_password(args.password.as_deref())?;
    let client = build_client(config)?;

    let reply = client
        .register(&Registration {
            username: args.username,
            password,
            fullname: args.fullname,
            phone: args.phone,
            address: args.address,
        })
        .await?;

    println!("{}", reply.message);
    println!("Run `agrent role owner` or `agrent role renter` to finish logging in.");
    Ok(())
}

pub async fn select_role(config: &Config, role: &str) -> Result<()> {
    let role: Role = role.parse()?;
    let client = build_client(config)?;
    let message = client.select_role(role).await?;
    if message.is_empty() {
        println!("Role set to {role}. You are now logged in.");
    } else {
        println!("{message}");
    }
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let session = client.session().current();
    if !session.is_authenticated() && !session.role_selection_pending() {
        println!("Not logged in.");
        return Ok(());
    }
    client.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami() -> Result<()> {
    let store = SessionStore::open();
    let session = store.current();
    match (&session.token, session.role) {
        (Some(_), Some(role)) => println!("Logged in ({role})."),
        (Some(_), None) => println!("Logged in, but no role is stored."),
        (None, _) if session.role_selection_pending() => {
            let username = session.username.as_deref().unwrap_or("(unknown)");
            println!("Role selection pending for {username}. Run `agrent role <owner|renter>`.");
        }
        (None, _) => println!("Not logged in."),
    }
    Ok(())
}
