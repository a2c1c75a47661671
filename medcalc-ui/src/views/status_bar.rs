//! Status bar listing the most useful prompt commands.

/// Command hint for the status bar.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Build a status bar line from a list of command hints.
pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Common command hints.
pub mod hints {
    use super::KeyHint;

    pub const AGE: KeyHint = KeyHint::new("age <n>", "Age");
    pub const YEARS: KeyHint = KeyHint::new("years <n>", "Horizon");
    pub const INFLATION: KeyHint = KeyHint::new("inflation on|off", "Inflation");
    pub const RETRY: KeyHint = KeyHint::new("retry", "Retry");
    pub const HELP: KeyHint = KeyHint::new("help", "Commands");
    pub const BACK: KeyHint = KeyHint::new("back", "Tools");
    pub const QUIT: KeyHint = KeyHint::new("quit", "Quit");

    pub const MAIN: &[KeyHint] = &[AGE, YEARS, INFLATION, RETRY, HELP, BACK, QUIT];
}
