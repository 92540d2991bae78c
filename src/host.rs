/// Terminal host
///
/// Turns typed lines into host commands, standing in for the browser view
/// layer. Each line is one action:
///
/// ```text
/// 123456          digits, one key press each
/// bs              backspace
/// paste <text>    paste event
/// ctrl-v          Ctrl+V shortcut (reads the system clipboard)
/// focus text|none text field focus
/// next | prev | goto <n> | reset
/// name <text>     edit the printer name
/// agree           toggle the agreement checkbox
/// mobile on|off
/// prefix <url> | prefix reset
/// quit
/// ```
use crate::input::{Focus, InputEvent, Key};
use crate::runtime::HostCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

fn key_press(key: Key) -> [HostCommand; 2] {
    [
        HostCommand::Input(InputEvent::KeyDown(key)),
        HostCommand::Input(InputEvent::KeyUp(key)),
    ]
}

/// Parse one line into the commands it stands for
pub fn parse_line(line: &str) -> Result<Vec<HostCommand>, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let commands = match word {
        "" => Vec::new(),
        digits if digits.chars().all(|c| c.is_ascii_digit()) => digits
            .chars()
            .flat_map(|c| key_press(Key::Character(c)))
            .collect(),
        "bs" => key_press(Key::Backspace).to_vec(),
        "paste" => vec![HostCommand::Input(InputEvent::Paste(rest.to_string()))],
        "ctrl-v" => vec![
            HostCommand::Input(InputEvent::KeyDown(Key::Control)),
            HostCommand::Input(InputEvent::KeyDown(Key::Character('v'))),
            HostCommand::Input(InputEvent::KeyUp(Key::Character('v'))),
            HostCommand::Input(InputEvent::KeyUp(Key::Control)),
        ],
        "focus" => {
            let focus = match rest {
                "text" => Focus::TextField,
                "none" => Focus::None,
                other => return Err(ParseError(format!("unknown focus target: {:?}", other))),
            };
            vec![HostCommand::Input(InputEvent::FocusChanged(focus))]
        }
        "next" => vec![HostCommand::Next],
        "prev" => vec![HostCommand::Prev],
        "goto" => {
            let step = rest
                .parse::<i32>()
                .map_err(|_| ParseError(format!("not a step number: {:?}", rest)))?;
            vec![HostCommand::GoTo(step)]
        }
        "reset" => vec![HostCommand::Reset],
        "name" => vec![HostCommand::EditName(rest.to_string())],
        "agree" => vec![HostCommand::ToggleAgreement],
        "mobile" => match rest {
            "on" => vec![HostCommand::SetMobileFlow(true)],
            "off" => vec![HostCommand::SetMobileFlow(false)],
            other => return Err(ParseError(format!("expected on/off, got {:?}", other))),
        },
        "prefix" => match rest {
            "reset" => vec![HostCommand::ResetEndpointPrefix],
            "" => return Err(ParseError("prefix needs a URL or 'reset'".to_string())),
            url => vec![HostCommand::SetEndpointPrefix(url.to_string())],
        },
        "quit" | "exit" => vec![HostCommand::Shutdown],
        other => return Err(ParseError(format!("unknown command: {}", other))),
    };

    Ok(commands)
}
