//! User administration commands

use crate::error::CliResult;
use crate::output::{self, print_success, OutputFormat};
use crate::session::Session;
use clap::Subcommand;
use srat_types::{NewUser, Role, User};
use tabled::Tabled;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users (Admin)
    List,

    /// Create a user (Admin)
    Create {
        /// Login name
        #[arg(long)]
        username: String,

        /// Role (Admin, PI, Facilitator, Coordinator, "Field Staff", Finance)
        #[arg(short, long)]
        role: Option<Role>,

        /// Display name (defaults to the username)
        #[arg(short, long)]
        name: Option<String>,

        /// Initial password (defaults to "changeme")
        #[arg(long)]
        new_password: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        national_id: Option<String>,

        #[arg(long)]
        driver_license: Option<String>,

        #[arg(long)]
        passport: Option<String>,

        /// Funder the user covers (Coordinator); repeat for more
        #[arg(long = "fund-source")]
        fund_sources: Vec<String>,
    },
}

#[derive(Tabled)]
struct UserRow {
    id: String,
    username: String,
    name: String,
    role: String,
    funders: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            name: u.name.clone(),
            role: u.role.to_string(),
            funders: u
                .fund_sources
                .as_ref()
                .map(|f| f.iter().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default(),
        }
    }
}

/// Execute a user command
pub async fn execute(
    command: UserCommands,
    session: &mut Session,
    actor: &User,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        UserCommands::List => {
            let users = session.desk().users(actor)?;
            output::print_output(&users, |u| UserRow::from(*u), format)
        }

        UserCommands::Create {
            username,
            role,
            name,
            new_password,
            email,
            phone,
            national_id,
            driver_license,
            passport,
            fund_sources,
        } => {
            let input = NewUser {
                username,
                password: new_password,
                name,
                role,
                email,
                phone,
                national_id,
                driver_license,
                passport,
                fund_sources,
            };
            let user = session.desk_mut().create_user(actor, input)?;
            session.save().await?;

            match format {
                OutputFormat::Table => print_success(&format!(
                    "Created {} ({}) as {}",
                    user.username, user.id, user.role
                )),
                _ => output::print_single(&user, format)?,
            }
            Ok(())
        }
    }
}
