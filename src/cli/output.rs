//! Styled terminal output helpers used across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::directory::UserProfile;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of matching profiles (Username, Name, University, ...).
pub fn print_profiles_table(profiles: &[UserProfile]) {
    if profiles.is_empty() {
        info("No matching students found.");
        tip("Leave a field blank to match everyone.");
        return;
    }

    println!("{table}", table = profiles_table(profiles));
}

fn profiles_table(profiles: &[UserProfile]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Username",
        "Name",
        "University",
        "Department",
        "Session",
        "Gender",
    ]);

    for p in profiles {
        table.add_row(vec![
            p.username.clone(),
            p.name.clone(),
            p.university.clone(),
            p.department.clone(),
            p.session.clone(),
            p.gender.to_string(),
        ]);
    }

    table
}
