//! Line-oriented command scripts.
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped. The first word is the command, the rest of the line its
//! argument.
//!
//! ```text
//! query chicken
//! diet Veg
//! view item4
//! lang fr
//! wait 300
//! show
//! ```

use std::fmt;

use visuplate::{CategoryFilter, Diet, ItemId, Msg};
use web_time::Duration;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Category(CategoryFilter),
    Diet(Diet),
    Clear,
    View(ItemId),
    Ar(ItemId),
    Model,
    Image,
    Close,
    Lang(String),
    /// Advance the clock and deliver due timers.
    Wait(Duration),
    Visible(ItemId),
    Show,
    Languages,
}

/// Why a line did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first word is not a command. Aborts the script.
    Unknown(String),
    /// The command is known but its argument is missing or malformed.
    BadArgument(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(command) => write!(f, "unknown command '{command}'"),
            Self::BadArgument(message) => write!(f, "{message}"),
        }
    }
}

impl Command {
    /// Parse one line. `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            // An empty query is valid and clears the search.
            "query" => Self::Query(rest.to_owned()),
            "category" => Self::Category(CategoryFilter::from(required(word, rest)?)),
            "diet" => Self::Diet(
                required(word, rest)?
                    .parse()
                    .map_err(|err: visuplate::catalog::ParseDietError| {
                        ParseError::BadArgument(err.to_string())
                    })?,
            ),
            "clear" => Self::Clear,
            "view" => Self::View(ItemId::new(required(word, rest)?)),
            "ar" => Self::Ar(ItemId::new(required(word, rest)?)),
            "3d" => Self::Model,
            "image" => Self::Image,
            "close" => Self::Close,
            "lang" => Self::Lang(required(word, rest)?.to_owned()),
            "wait" => {
                let ms = required(word, rest)?.parse::<u64>().map_err(|_| {
                    ParseError::BadArgument(format!("wait expects milliseconds, got '{rest}'"))
                })?;
                Self::Wait(Duration::from_millis(ms))
            }
            "visible" => Self::Visible(ItemId::new(required(word, rest)?)),
            "show" => Self::Show,
            "languages" => Self::Languages,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }

    /// The store message this command sends, if any.
    #[must_use]
    pub fn into_msg(self) -> Option<Msg> {
        Some(match self {
            Self::Query(query) => Msg::SetQuery(query),
            Self::Category(category) => Msg::SetCategory(category),
            Self::Diet(diet) => Msg::SetDiet(diet),
            Self::Clear => Msg::ClearAllFilters,
            Self::View(id) => Msg::View(id),
            Self::Ar(id) => Msg::ViewModel(id),
            Self::Model => Msg::SwitchToModel,
            Self::Image => Msg::SwitchToImage,
            Self::Close => Msg::Dismiss,
            Self::Lang(code) => Msg::RequestLanguage(code),
            Self::Visible(id) => Msg::ItemVisible(id),
            Self::Wait(_) | Self::Show | Self::Languages => return None,
        })
    }
}

fn required<'a>(command: &str, rest: &'a str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::BadArgument(format!("{command} expects an argument")))
    } else {
        Ok(rest)
    }
}
