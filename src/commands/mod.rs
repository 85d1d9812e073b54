use teloxide::types::BotCommand;

use crate::location::normalize;

/// Bot commands, shared by every channel. Telegram users type them with a
/// leading slash; WhatsApp users usually type the bare word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Next,
    Rules,
    City,
    English,
    Spanish,
    Help,
}

const COMMANDS: &[(Command, &[&str], &str)] = &[
    (Command::Start, &["start", "empezar", "inicio", "hola"], "Start the bot"),
    (Command::Stop, &["stop", "salir", "cancelar"], "Unsubscribe from reminders"),
    (Command::Next, &["next", "proximo", "próximo"], "Show the next Ekadasi"),
    (Command::Rules, &["rules", "reglas", "fasting"], "Show the fasting rules"),
    (Command::City, &["city", "ciudad"], "Change your location"),
    (Command::English, &["english", "ingles", "inglés"], "Switch to English"),
    (Command::Spanish, &["spanish", "espanol", "español"], "Cambiar a español"),
    (Command::Help, &["help", "ayuda"], "Show the command list"),
];

impl Command {
    /// Recognizes `/next`, `NEXT`, `/proximo@MyBot`, `Hola!` and friends.
    /// Punctuation, emoji and accents are ignored on both sides.
    pub fn parse(text: &str) -> Option<Command> {
        let word = text.trim().strip_prefix('/').unwrap_or(text.trim());
        let word = normalize(word.split('@').next().unwrap_or(word));
        if word.is_empty() {
            return None;
        }

        COMMANDS
            .iter()
            .find(|(_, aliases, _)| aliases.iter().any(|a| normalize(a) == word))
            .map(|(cmd, _, _)| *cmd)
    }

    /// Canonical names for Telegram's command menu.
    pub fn menu() -> Vec<BotCommand> {
        COMMANDS
            .iter()
            .map(|(_, aliases, description)| BotCommand::new(aliases[0], *description))
            .collect()
    }
}
