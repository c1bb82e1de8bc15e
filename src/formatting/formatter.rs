//! Code formatter for Modelfiles

use crate::formatting::*;
use crate::language::*;

const DELIMITER: &str = "\"\"\"";

/// Write Commands out as canonical Modelfile text with no markup.
pub fn format(commands: &[Command]) -> String {
    render(&Identity, commands)
}

/// We do the code formatting in two passes. First we convert the Commands
/// into a Vec of "fragments" (Syntax tag, String pairs). Then second we apply
/// the specified renderer to each pair to result in an embellished String.
pub fn render(renderer: &impl Render, commands: &[Command]) -> String {
    let fragments = format_with_renderer(commands);

    let mut output = String::new();
    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }
    output
}

pub fn format_with_renderer(commands: &[Command]) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new();

    for command in commands {
        output.format_command(command);
    }

    output.fragments
}

struct Formatter {
    fragments: Vec<(Syntax, String)>,
}

impl Formatter {
    fn new() -> Formatter {
        Formatter {
            fragments: Vec::new(),
        }
    }

    fn append(&mut self, syntax: Syntax, content: &str) {
        self.fragments
            .push((syntax, content.to_string()));
    }

    fn append_keyword(&mut self, word: &str) {
        self.append(Syntax::Keyword, &word.to_ascii_uppercase());
        self.append(Syntax::Neutral, " ");
    }

    fn format_command(&mut self, command: &Command) {
        let name = command
            .name
            .as_str();

        match keyword_for_name(name) {
            Some(keyword) if keyword.route == Route::Value => {
                self.append_keyword(keyword.word);
                self.append_value(&command.value);
            }
            Some(keyword) if keyword.route == Route::MessageRole => {
                match split_message(&command.value) {
                    Some((role, content)) => {
                        self.append_keyword(keyword.word);
                        self.append(Syntax::Role, role.as_str());
                        self.append(Syntax::Neutral, " ");
                        self.append_value(content);
                    }
                    // a parameter that happens to be called "message"
                    None => self.append_parameter(name, &command.value),
                }
            }
            _ => self.append_parameter(name, &command.value),
        }

        self.append(Syntax::Newline, "\n");
    }

    fn append_parameter(&mut self, name: &str, value: &str) {
        self.append_keyword("parameter");
        self.append(Syntax::Parameter, name);
        self.append(Syntax::Neutral, " ");
        self.append_value(value);
    }

    fn append_value(&mut self, value: &str) {
        if needs_quoting(value) {
            self.append(Syntax::Quote, DELIMITER);
            self.append(Syntax::Multiline, value);
            self.append(Syntax::Quote, DELIMITER);
        } else {
            self.append(Syntax::Value, value);
        }
    }
}

/// A value can only be written plain if reading it back would give the same
/// text: no line breaks, no leading whitespace (it would be taken as part of
/// the separator), and not empty.
fn needs_quoting(value: &str) -> bool {
    value.is_empty() || value.starts_with([' ', '\t']) || value.contains(['\r', '\n'])
}
