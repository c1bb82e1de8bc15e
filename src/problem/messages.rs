use crate::formatting::{render, Render, Syntax};
use crate::language::Command;
use crate::parsing::ParsingError;

/// Generate problem and detail messages for parsing errors, illustrating
/// the fix with correctly formatted examples.
pub fn generate_error_message(error: &ParsingError, renderer: &impl Render) -> (String, String) {
    match error {
        ParsingError::MissingValue(_, token) => {
            let examples = vec![
                Command::new("model", "llama3"),
                Command::new("temperature", "0.7"),
                Command::new("message", "user: Is the sky blue?"),
            ];

            (
                format!("Missing value for {}", token),
                format!(
                    r#"
Every directive must be followed, on the same line, by a space and then its
value. PARAMETER needs both a parameter name and a value, and MESSAGE needs
both a role and the message content. For example:

{}
                    "#,
                    render(renderer, &examples).trim_end()
                )
                .trim_ascii()
                .to_string(),
            )
        }
        ParsingError::InvalidRole(_, role) => (
            format!("Invalid role '{}'", role),
            format!(
                r#"
The role given to a MESSAGE must be one of {}, {}, or {}, written
exactly like that in lower case.
                "#,
                renderer.style(Syntax::Role, "system"),
                renderer.style(Syntax::Role, "user"),
                renderer.style(Syntax::Role, "assistant"),
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::UnterminatedMultiline(_) => {
            let examples = vec![Command::new(
                "template",
                "\n{{ .System }}\n{{ .Prompt }}\n",
            )];

            (
                "Unterminated multiline string".to_string(),
                format!(
                    r#"
A value opened with {} continues across lines until the matching {} is found,
but the file ended before that happened. For example:

{}
                    "#,
                    renderer.style(Syntax::Quote, r#"""""#),
                    renderer.style(Syntax::Quote, r#"""""#),
                    render(renderer, &examples).trim_end()
                )
                .trim_ascii()
                .to_string(),
            )
        }
        ParsingError::UnexpectedCharacter(_, c) => (
            format!("Unexpected character {:?}", c),
            r#"
Directive keywords and parameter names can only contain letters, numbers,
and (for parameter names) underscores. Lines starting with '#' are comments.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::MissingFrom => {
            let examples = vec![Command::new("model", "llama3")];

            (
                "No FROM line".to_string(),
                format!(
                    r#"
A Modelfile must name the model it builds on. Add a line such as:

{}
                    "#,
                    render(renderer, &examples).trim_end()
                )
                .trim_ascii()
                .to_string(),
            )
        }
    }
}
