//! Parse terminal input into client intents.

use flashtrack_shared::protocol::ClientEvent;
use flashtrack_shared::role::{Item, Role};

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Send an intent to the gateway.
    Send(ClientEvent),
    /// Print the roster.
    Users,
    /// Print the command reference.
    Help,
    /// Disconnect and exit.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub String);

/// Parse one input line.
///
/// ```text
/// f top        flash used on TOP
/// c top        cancel TOP's flash
/// b mid        toggle boots on MID
/// r adc        toggle rune on ADC
/// adj sup -5   nudge SUPPORT's timer by -5s
/// users        show roster
/// quit         exit
/// ```
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ParseError("empty command".to_string()));
    };

    match verb.to_ascii_lowercase().as_str() {
        "users" | "who" => Ok(Command::Users),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "f" | "flash" => {
            let role = parse_role(words.next())?;
            Ok(Command::Send(ClientEvent::UseFlash { role }))
        }
        "c" | "cancel" => {
            let role = parse_role(words.next())?;
            Ok(Command::Send(ClientEvent::CancelFlash { role }))
        }
        "b" | "boots" => {
            let role = parse_role(words.next())?;
            Ok(Command::Send(ClientEvent::ToggleItem {
                role,
                item: Item::Boots,
            }))
        }
        "r" | "rune" => {
            let role = parse_role(words.next())?;
            Ok(Command::Send(ClientEvent::ToggleItem {
                role,
                item: Item::Rune,
            }))
        }
        "adj" | "adjust" => {
            let role = parse_role(words.next())?;
            let amount = words
                .next()
                .ok_or_else(|| ParseError("usage: adj <role> <±seconds>".to_string()))?;
            let adjustment_seconds: i64 = amount
                .parse()
                .map_err(|_| ParseError(format!("'{amount}' is not a number of seconds")))?;
            Ok(Command::Send(ClientEvent::AdjustTimer {
                role,
                adjustment_seconds,
            }))
        }
        other => Err(ParseError(format!(
            "unknown command '{other}' (try 'help')"
        ))),
    }
}

fn parse_role(word: Option<&str>) -> Result<Role, ParseError> {
    let word = word.ok_or_else(|| ParseError("missing role".to_string()))?;
    word.parse::<Role>()
        .map_err(|e| ParseError(e.to_string()))
}
