//! `campusvault session` — interactive menu over a single `Session`.
//!
//! Everything lives in memory for the lifetime of the command: accounts
//! and the sealed message are gone once the user quits.

use std::fmt;

use dialoguer::{Input, Password, Select};
use zeroize::Zeroizing;

use crate::cli::{load_settings, output, Cli};
use crate::directory::{FriendQuery, Gender, Personality, UserProfile};
use crate::errors::{CampusVaultError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    SignUp,
    LogIn,
    FindFriends,
    SendMessage,
    ViewMessage,
    LogOut,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::SignUp,
        MenuAction::LogIn,
        MenuAction::FindFriends,
        MenuAction::SendMessage,
        MenuAction::ViewMessage,
        MenuAction::LogOut,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuAction::SignUp => "Sign up",
            MenuAction::LogIn => "Log in",
            MenuAction::FindFriends => "Find friends",
            MenuAction::SendMessage => "Send message",
            MenuAction::ViewMessage => "View message",
            MenuAction::LogOut => "Log out",
            MenuAction::Quit => "Quit",
        })
    }
}

/// Execute the `session` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (cwd, settings) = load_settings(cli)?;
    let mut session = Session::from_settings(&settings, &cwd)?;

    output::info("Connect with friends from your university or department!");

    loop {
        if let Some(me) = session.current_user() {
            output::tip(&format!("Logged in as {}", me.username));
        }

        let choice = Select::new()
            .with_prompt("Choose an action")
            .items(&MenuAction::ALL)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let outcome = match MenuAction::ALL[choice] {
            MenuAction::SignUp => sign_up(&mut session),
            MenuAction::LogIn => log_in(&mut session),
            MenuAction::FindFriends => find_friends(&session),
            MenuAction::SendMessage => send_message(&mut session),
            MenuAction::ViewMessage => view_message(&session),
            MenuAction::LogOut => {
                if session.log_out() {
                    output::success("Logged out.");
                } else {
                    output::info("Nobody is logged in.");
                }
                Ok(())
            }
            MenuAction::Quit => break,
        };

        if let Err(e) = outcome {
            handle_form_error(e)?;
        }
    }

    output::info("Session ended — the stored message has been discarded.");
    Ok(())
}

fn sign_up(session: &mut Session) -> Result<()> {
    let name = text("Full name")?;
    let university = text("University")?;
    let department = text("Department")?;
    let academic_session = text("Session (e.g. 2022-23)")?;
    let gender = pick("Gender", &Gender::ALL)?;
    let username = text("Username")?;
    let password = secret("Password")?;

    session.sign_up(
        UserProfile {
            name,
            university,
            department,
            session: academic_session,
            gender,
            username: username.clone(),
        },
        &password,
    )?;
    output::success(&format!("Account '{}' created. You can log in now.", username.trim()));
    Ok(())
}

fn log_in(session: &mut Session) -> Result<()> {
    let username = text("Username")?;
    let password = secret("Password")?;
    let me = session.log_in(&username, &password)?;
    output::success(&format!("Login successful — welcome, {}!", me.name));
    Ok(())
}

fn find_friends(session: &Session) -> Result<()> {
    let personality = pick("Personality", &Personality::ALL)?;
    let university = text("University (blank for any)")?;
    let department = text("Department (blank for any)")?;
    let academic_session = text("Session (blank for any)")?;

    let gender_choices = ["Any", "Male", "Female", "Other"];
    let gender = match pick("Gender", &gender_choices)? {
        "Any" => None,
        g => Some(g.parse::<Gender>()?),
    };

    let query = FriendQuery {
        university: Some(university),
        department: Some(department),
        session: Some(academic_session),
        gender,
        exclude_username: None,
    };

    output::info(&format!("Showing {personality} students matching your filters:"));
    output::print_profiles_table(&session.find_friends(query));
    Ok(())
}

fn send_message(session: &mut Session) -> Result<()> {
    let message = Zeroizing::new(text("Message")?);
    let passphrase = secret("Secret key for encryption")?;

    let blob = session.send_message(&message, &passphrase)?;
    output::success("Message sent successfully!");
    output::tip(&format!("Sealed message fingerprint: {}", blob.fingerprint()));
    Ok(())
}

fn view_message(session: &Session) -> Result<()> {
    let passphrase = secret("Secret key to view the message")?;
    match session.open_message(&passphrase) {
        Ok(plaintext) => {
            output::success("Message decrypted:");
            println!("{}", plaintext.as_str());
        }
        Err(CampusVaultError::NoMessageStored) => output::info(crate::session::NO_MESSAGE),
        Err(_) => output::error(crate::session::OPEN_FAILED),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

/// Show a form error and return to the menu.  Prompt failures (closed
/// terminal) end the session instead.
fn handle_form_error(e: CampusVaultError) -> Result<()> {
    match e {
        CampusVaultError::PromptFailed(_) => Err(e),
        other => {
            output::error(&other.to_string());
            Ok(())
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> CampusVaultError {
    CampusVaultError::PromptFailed(e.to_string())
}

fn text(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn secret(prompt: &str) -> Result<Zeroizing<String>> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(prompt_error)
}

fn pick<T: Copy + fmt::Display>(prompt: &str, items: &[T]) -> Result<T> {
    let idx = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(items[idx])
}
