//! The scanner proper: a character-at-a-time state machine turning Modelfile
//! text into a list of Commands.

use std::mem;
use tracing::trace;

use crate::language::*;

const DELIMITER: &str = r#"""""#;

/// Scan an entire document. The first error encountered stops the scan;
/// no partial result is returned.
pub fn parse_commands(content: &str) -> Result<Vec<Command>, ParsingError> {
    let mut input = Parser::new();
    input.initialize(content);
    input.parse_from_start()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsingError {
    #[error("missing value for [{1}]")]
    MissingValue(usize, String),
    #[error("role must be one of \"system\", \"user\", or \"assistant\"")]
    InvalidRole(usize, String),
    #[error("unterminated multiline string")]
    UnterminatedMultiline(usize),
    #[error("unexpected character {1:?}")]
    UnexpectedCharacter(usize, char),
    #[error("no FROM line")]
    MissingFrom,
}

impl ParsingError {
    /// Byte offset into the source where the problem was found. A missing
    /// FROM line is a property of the whole document and so has no position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParsingError::MissingValue(offset, _) => Some(*offset),
            ParsingError::InvalidRole(offset, _) => Some(*offset),
            ParsingError::UnterminatedMultiline(offset) => Some(*offset),
            ParsingError::UnexpectedCharacter(offset, _) => Some(*offset),
            ParsingError::MissingFrom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Name,
    ParameterKey,
    MessageRole,
    Value,
    QuotedValue,
    Comment,
}

#[derive(Debug)]
pub struct Parser<'i> {
    source: &'i str,
    offset: usize,
    state: State,
    // accumulates the token or value currently being read
    buffer: String,
    // name the in-progress Command will be recorded under
    name: String,
    // most recently completed token, as written, for error messages
    token: String,
    // where the current token (or quoted value) began
    start: usize,
    commands: Vec<Command>,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            source: "",
            offset: 0,
            state: State::Name,
            buffer: String::new(),
            name: String::new(),
            token: String::new(),
            start: 0,
            commands: Vec::new(),
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.source = content;
        self.offset = 0;
        self.state = State::Name;
        self.buffer
            .clear();
        self.name
            .clear();
        self.token
            .clear();
        self.start = 0;
        self.commands
            .clear();
    }

    fn advance(&mut self, width: usize) {
        self.source = &self.source[width..];
        self.offset += width;
    }

    fn peek_next_char(&self) -> Option<char> {
        self.source
            .chars()
            .next()
    }

    pub fn parse_from_start(&mut self) -> Result<Vec<Command>, ParsingError> {
        while let Some(c) = self.peek_next_char() {
            let here = self.offset;
            self.advance(c.len_utf8());

            match self.state {
                State::Name => self.read_name(here, c)?,
                State::ParameterKey => self.read_parameter_key(here, c)?,
                State::MessageRole => self.read_message_role(here, c)?,
                State::Value => self.read_value(c),
                State::QuotedValue => self.read_quoted_value(c),
                State::Comment => {
                    if is_newline(c) {
                        self.state = State::Name;
                    }
                }
            }
        }

        self.finish()?;

        let commands = mem::take(&mut self.commands);
        if commands
            .iter()
            .any(Command::is_model)
        {
            Ok(commands)
        } else {
            Err(ParsingError::MissingFrom)
        }
    }

    fn read_name(&mut self, here: usize, c: char) -> Result<(), ParsingError> {
        if c.is_ascii_alphanumeric() {
            if self
                .buffer
                .is_empty()
            {
                self.start = here;
            }
            self.buffer
                .push(c);
        } else if c == '#' && self
            .buffer
            .is_empty()
        {
            self.state = State::Comment;
        } else if is_space(c) {
            if !self
                .buffer
                .is_empty()
            {
                self.finish_directive();
            }
        } else if is_newline(c) {
            if !self
                .buffer
                .is_empty()
            {
                return Err(ParsingError::MissingValue(
                    self.start,
                    self.buffer
                        .clone(),
                ));
            }
        } else {
            return Err(ParsingError::UnexpectedCharacter(here, c));
        }
        Ok(())
    }

    fn finish_directive(&mut self) {
        let word = self
            .buffer
            .to_ascii_lowercase();
        let (name, route) = lookup_keyword(&word);

        self.name = name.to_string();
        self.token = mem::take(&mut self.buffer);

        match route {
            Route::Value => self.begin_value(),
            Route::ParameterKey => self.state = State::ParameterKey,
            Route::MessageRole => self.state = State::MessageRole,
        }
    }

    fn read_parameter_key(&mut self, here: usize, c: char) -> Result<(), ParsingError> {
        if c.is_ascii_alphanumeric() || c == '_' {
            if self
                .buffer
                .is_empty()
            {
                self.start = here;
            }
            self.buffer
                .push(c);
        } else if is_space(c) {
            if !self
                .buffer
                .is_empty()
            {
                self.name = self
                    .buffer
                    .to_ascii_lowercase();
                self.token = mem::take(&mut self.buffer);
                self.begin_value();
            }
        } else if is_newline(c) {
            return Err(self.missing_value());
        } else {
            return Err(ParsingError::UnexpectedCharacter(here, c));
        }
        Ok(())
    }

    fn read_message_role(&mut self, here: usize, c: char) -> Result<(), ParsingError> {
        if is_space(c) {
            if !self
                .buffer
                .is_empty()
            {
                let role = mem::take(&mut self.buffer);
                if role
                    .parse::<Role>()
                    .is_err()
                {
                    return Err(ParsingError::InvalidRole(self.start, role));
                }

                self.buffer
                    .push_str(&role);
                self.buffer
                    .push_str(": ");
                self.token = role;
                self.begin_value();
            }
        } else if is_newline(c) {
            return Err(self.missing_value());
        } else {
            if self
                .buffer
                .is_empty()
            {
                self.start = here;
            }
            self.buffer
                .push(c);
        }
        Ok(())
    }

    /// Entered once the separator after a directive, parameter key, or role
    /// has been seen. Any further run of separators is skipped, then a
    /// leading triple quote switches to reading a quoted value.
    fn begin_value(&mut self) {
        let width = self
            .source
            .len()
            - self
                .source
                .trim_start_matches(is_space)
                .len();
        self.advance(width);

        // for a quoted value this is the position of the opening delimiter
        self.start = self.offset;

        if self
            .source
            .starts_with(DELIMITER)
        {
            self.advance(DELIMITER.len());
            self.state = State::QuotedValue;
        } else {
            self.state = State::Value;
        }
    }

    // An empty value is still a value; the separator was seen.
    fn read_value(&mut self, c: char) {
        if is_newline(c) {
            self.complete_command();
        } else {
            self.buffer
                .push(c);
        }
    }

    fn read_quoted_value(&mut self, c: char) {
        // c has already been consumed, so only two more quotes are needed to
        // close the value.
        if c == '"' && self
            .source
            .starts_with(&DELIMITER[1..])
        {
            self.advance(2);
            self.complete_command();
        } else {
            self.buffer
                .push(c);
        }
    }

    fn complete_command(&mut self) {
        let command = Command {
            name: mem::take(&mut self.name),
            value: mem::take(&mut self.buffer),
        };
        trace!(name = %command.name, "completed command");

        self.commands
            .push(command);
        self.state = State::Name;
    }

    /// The error for a token that was started but never given a value. If
    /// nothing of the token itself has been read yet, the word before it is
    /// named instead.
    fn missing_value(&self) -> ParsingError {
        if self
            .buffer
            .is_empty()
        {
            ParsingError::MissingValue(
                self.start,
                self.token
                    .clone(),
            )
        } else {
            ParsingError::MissingValue(
                self.start,
                self.buffer
                    .clone(),
            )
        }
    }

    // End of input is treated as a final newline, except that a quoted value
    // must have been explicitly closed.
    fn finish(&mut self) -> Result<(), ParsingError> {
        match self.state {
            State::Name => {
                if !self
                    .buffer
                    .is_empty()
                {
                    return Err(ParsingError::MissingValue(
                        self.start,
                        self.buffer
                            .clone(),
                    ));
                }
            }
            State::ParameterKey | State::MessageRole => return Err(self.missing_value()),
            State::Value => {
                // a seeded "role: " counts; a bare trailing separator doesn't
                if !self
                    .buffer
                    .is_empty()
                {
                    self.complete_command();
                }
            }
            State::QuotedValue => {
                return Err(ParsingError::UnterminatedMultiline(self.start))
            }
            State::Comment => {}
        }
        Ok(())
    }
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_newline(c: char) -> bool {
    c == '\r' || c == '\n'
}
