// REPL input: `:`-prefixed commands drive the coordinator, anything else is a
// prompt for the assistant.

use thiserror::Error;
use urban_state::{Tab, UiEvent};
use urban_types::{OverlayCategory, ScreenPoint};

pub const HELP: &str = "\
Commands:
  <text>                    ask the assistant
  :tab filters|poi|assistant|none
  :filter <category|index> on|off
  :focus <id> [click-x]     open the detail panel for a point
  :close                    close the detail panel
  :hover <id> <x> <y>       hover a point
  :leave                    end hover / close popup
  :goto <point-id>          focus an AI recommendation
  :reset                    remove AI recommendations
  :prompts | :chat          switch assistant pane
  :category <n> | :back | :pick <n>
  :retry                    re-check the assistant connection
  :clear                    clear the chat history
  :cancel                   cancel the pending prompt
  :width <px>               set the viewport width
  :show                     print the current view
  :help | :quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Events to forward to the coordinator, in order.
    Events(Vec<UiEvent>),
    Show,
    Help,
    Quit,
    Nothing,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Nothing);
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Events(vec![
                UiEvent::InputChanged(line.to_string()),
                UiEvent::PromptSubmitted,
            ]));
        };

        let mut args = rest.split_whitespace();
        let name = args.next().unwrap_or_default();

        let event = match name {
            "show" => return Ok(Command::Show),
            "help" | "h" => return Ok(Command::Help),
            "quit" | "q" | "exit" => return Ok(Command::Quit),
            "tab" => {
                let tab = required(args.next(), "tab")?;
                UiEvent::TabSelected(tab.parse::<Tab>().map_err(|reason| invalid(tab, reason))?)
            }
            "filter" => {
                let category = parse_category(required(args.next(), "category")?)?;
                let enabled = match required(args.next(), "on|off")? {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    other => return Err(invalid(other, "expected on or off")),
                };
                UiEvent::FilterToggled { category, enabled }
            }
            "focus" => {
                let id = required(args.next(), "id")?.to_string();
                let click_x = args.next().map(parse_number).transpose()?;
                UiEvent::PointClicked { id, click_x }
            }
            "close" => UiEvent::PanelDismissed,
            "hover" => {
                let id = required(args.next(), "id")?.to_string();
                let x = parse_number(required(args.next(), "x")?)?;
                let y = parse_number(required(args.next(), "y")?)?;
                UiEvent::PointHovered {
                    id,
                    cursor: ScreenPoint::new(x, y),
                }
            }
            "leave" => UiEvent::PointLeft,
            "goto" => {
                let id = required(args.next(), "point id")?;
                UiEvent::RecommendationActivated(id.to_string())
            }
            "reset" => UiEvent::ResetAiRecommendations,
            "prompts" => UiEvent::ShowPromptSelector,
            "chat" => UiEvent::ShowChat,
            "category" => UiEvent::CategorySelected(parse_index(required(args.next(), "n")?)?),
            "back" => UiEvent::BackToCategories,
            "pick" => UiEvent::PromptPicked(parse_index(required(args.next(), "n")?)?),
            "retry" => UiEvent::RetryConnection,
            "clear" => UiEvent::ClearHistory,
            "cancel" => UiEvent::CancelPrompt,
            "width" => UiEvent::ViewportResized(parse_number(required(args.next(), "px")?)?),
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Command::Events(vec![event]))
    }
}

fn required<'a>(arg: Option<&'a str>, name: &'static str) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument(name))
}

fn invalid(value: &str, reason: impl Into<String>) -> CommandError {
    CommandError::InvalidArgument {
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_number(value: &str) -> Result<f64, CommandError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(value, "expected a number"))
}

fn parse_index(value: &str) -> Result<usize, CommandError> {
    value
        .parse::<usize>()
        .map_err(|_| invalid(value, "expected a non-negative integer"))
}

/// Category by name or by position in the filter panel.
fn parse_category(value: &str) -> Result<OverlayCategory, CommandError> {
    if let Ok(index) = value.parse::<usize>() {
        return OverlayCategory::from_index(index)
            .ok_or_else(|| invalid(value, "no filter at that position"));
    }
    value.parse().map_err(|reason: String| invalid(value, reason))
}
