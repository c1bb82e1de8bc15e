//! Types representing the directives found in a Modelfile

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A single directive as scanned from the source document. The `name` is
/// always lowercase; for PARAMETER lines it is the parameter key rather than
/// the word "parameter".
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Command {
    pub name: String,
    pub value: String,
}

impl Command {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Command {
        Command {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_model(&self) -> bool {
        self.name == MODEL
    }
}

/// The name that FROM is recorded under.
pub const MODEL: &str = "model";

/// What the scanner expects to read after a directive keyword.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    Value,
    ParameterKey,
    MessageRole,
}

/// An entry in the table of recognized directive keywords.
#[derive(Debug, Eq, PartialEq)]
pub struct Keyword {
    /// lowercase form of the word as written in the document
    pub word: &'static str,
    /// name the resulting Command is recorded under
    pub name: &'static str,
    pub route: Route,
}

pub static KEYWORDS: &[Keyword] = &[
    Keyword {
        word: "from",
        name: MODEL,
        route: Route::Value,
    },
    Keyword {
        word: "adapter",
        name: "adapter",
        route: Route::Value,
    },
    Keyword {
        word: "license",
        name: "license",
        route: Route::Value,
    },
    Keyword {
        word: "template",
        name: "template",
        route: Route::Value,
    },
    Keyword {
        word: "system",
        name: "system",
        route: Route::Value,
    },
    Keyword {
        word: "parameter",
        name: "parameter",
        route: Route::ParameterKey,
    },
    Keyword {
        word: "message",
        name: "message",
        route: Route::MessageRole,
    },
];

/// Look up an already lowercased directive word. Words not in the table are
/// passed through as-is and read a plain value.
pub fn lookup_keyword(word: &str) -> (&str, Route) {
    match KEYWORDS
        .iter()
        .find(|keyword| keyword.word == word)
    {
        Some(keyword) => (keyword.name, keyword.route),
        None => (word, Route::Value),
    }
}

/// Find the keyword that writes out a Command recorded under `name`, if any.
pub fn keyword_for_name(name: &str) -> Option<&'static Keyword> {
    KEYWORDS
        .iter()
        .find(|keyword| keyword.name == name)
}

/// Speaker of a MESSAGE directive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    // Case sensitive: "System" is not a role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split the value of a `message` Command back into its role and content.
/// Returns None if the value doesn't start with a recognized role.
pub fn split_message(value: &str) -> Option<(Role, &str)> {
    let (role, content) = value.split_once(": ")?;
    let role = role
        .parse::<Role>()
        .ok()?;
    Some((role, content))
}
