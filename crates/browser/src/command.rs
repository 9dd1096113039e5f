use tracing::debug;

use super::browser::{Navigation, PostBrowser};

pub const HELP: &str = "n: next page, p: previous page, r: reload, q: quit";

/// A key typed into the terminal front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Reload,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim() {
            "n" => Some(Command::Next),
            "p" => Some(Command::Previous),
            "r" => Some(Command::Reload),
            "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Run `command` against the browser and return the text to print, if the
/// view changed.
pub async fn apply(browser: &mut PostBrowser, command: Command) -> Option<String> {
    let nav = match command {
        Command::Next => browser.next().await,
        Command::Previous => browser.previous().await,
        Command::Reload => {
            browser.reload().await;
            return Some(browser.render());
        }
        Command::Quit => return None,
    };
    match nav {
        Navigation::Moved(_) => Some(browser.render()),
        Navigation::Ignored => {
            debug!("{:?} changed nothing", command);
            None
        }
    }
}
