//! Session commands: login, logout, whoami.

use clap::Subcommand;
use kiogloss_client::models::account::RegisterRequest;
use kiogloss_client::{SessionState, Storefront};
use kiogloss_core::Email;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show who is signed in
    Whoami,
}

pub async fn run(
    storefront: &Storefront,
    action: AuthAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { email, password } => {
            let email: Email = email.parse()?;
            let identity = storefront.session.login(email, password).await?;
            println!("signed in as {}", identity.email);
            if identity.is_admin() {
                println!("  (administrator)");
            }
        }
        AuthAction::Register {
            email,
            name,
            password,
        } => {
            let request = RegisterRequest {
                email: email.parse()?,
                name,
                password,
                profile_image: None,
                phone_number: None,
                account: None,
                address: None,
            };
            let identity = storefront.session.register(&request).await?;
            println!("account created, signed in as {}", identity.email);
        }
        AuthAction::Logout => {
            storefront.session.logout();
            println!("signed out");
        }
        AuthAction::Whoami => match storefront.session.state() {
            SessionState::Anonymous | SessionState::Pending => println!("not signed in"),
            SessionState::Authenticated => {
                if let Some(identity) = storefront.session.identity() {
                    println!("{} (user {})", identity.email, identity.user_id);
                    if let Some(name) = &identity.name {
                        println!("  name: {name}");
                    }
                    if let Some(account) = identity.account_id {
                        println!("  account: {account}");
                    }
                    if identity.is_admin() {
                        println!("  roles: {}", identity.roles.join(", "));
                    }
                }
            }
        },
    }
    Ok(())
}
