//! Session commands: login, logout, whoami.

use clap::Args;
use soundstore_client::{LoginRequest, SessionManager};

use crate::commands::{command_error, print_json};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address of the admin account.
    #[arg(long, env = "SOUNDSTORE_EMAIL")]
    pub email: String,

    /// Password of the admin account.
    #[arg(long, env = "SOUNDSTORE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn login(session: &mut SessionManager, args: LoginArgs) -> anyhow::Result<()> {
    let user = session
        .login(&LoginRequest::new(args.email, args.password))
        .await
        .map_err(command_error)?
        .clone();

    println!(
        "Logged in as {} {} ({})",
        user.first_name, user.last_name, user.role
    );
    if let Some(expires_at) = session.stored_expiration() {
        println!("Session expires at {expires_at}");
    }

    Ok(())
}

pub fn logout(session: &mut SessionManager) -> anyhow::Result<()> {
    session.logout();
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(session: &mut SessionManager, json: bool) -> anyhow::Result<()> {
    let user = session.refresh().await.map_err(command_error)?.clone();

    if json {
        return print_json(&user);
    }

    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
    println!("id:      {}", user.id);
    println!("role:    {}", user.role);
    if !user.phone_number.is_empty() {
        println!("phone:   {}", user.phone_number);
    }
    if !user.address.is_empty() {
        println!("address: {}", user.address);
    }

    Ok(())
}
