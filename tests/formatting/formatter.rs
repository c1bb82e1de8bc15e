#[cfg(test)]
mod verify {
    use modelfile::formatting::*;
    use modelfile::language::*;
    use modelfile::parsing;

    fn trim(text: &str) -> &str {
        let head = text.trim_start_matches('\n');
        let tail = head.trim_end_matches(' ');
        tail
    }

    fn combine(fragments: Vec<(Syntax, String)>) -> String {
        let mut result = String::new();
        for fragment in fragments {
            result.push_str(&fragment.1);
        }
        result
    }

    #[test]
    fn every_directive() {
        let commands = vec![
            Command::new("model", "llama3"),
            Command::new("adapter", "./adapter.gguf"),
            Command::new("license", "MIT"),
            Command::new("template", "{{ .Prompt }}"),
            Command::new("system", "Be brief."),
            Command::new("num_ctx", "4096"),
            Command::new("message", "assistant: Ahoy!"),
        ];

        let result = format(&commands);
        assert_eq!(
            result,
            trim(
                r#"
FROM llama3
ADAPTER ./adapter.gguf
LICENSE MIT
TEMPLATE {{ .Prompt }}
SYSTEM Be brief.
PARAMETER num_ctx 4096
MESSAGE assistant Ahoy!
                "#
            )
        );
    }

    #[test]
    fn comments_and_blank_lines_are_dropped() {
        let content = trim(
            r#"
# comment

from   llama3

Parameter Temperature 0.5
                "#,
        );
        let commands = parsing::parse(content).unwrap();

        assert_eq!(format(&commands), "FROM llama3\nPARAMETER temperature 0.5\n");
    }

    #[test]
    fn fragments_combine_to_plain_output() {
        let commands = vec![
            Command::new("model", "foo"),
            Command::new("system", "\nline one\nline two\n"),
        ];

        let fragments = format_with_renderer(&commands);
        assert_eq!(combine(fragments), format(&commands));
        assert_eq!(render(&Identity, &commands), format(&commands));
    }

    #[test]
    fn terminal_output_keeps_text() {
        let commands = vec![Command::new("model", "foo")];

        let result = render(&Terminal, &commands);
        assert!(result.contains("FROM"));
        assert!(result.contains("foo"));
        assert_ne!(result, format(&commands));
    }

    #[test]
    fn reparsing_formatted_samples() {
        let content = trim(
            r#"
FROM foo
MESSAGE system """
You are a multiline Parser. Always Parse things.
"""
MESSAGE user """  leading spaces matter"""
TEMPLATE """"""
SYSTEM trailing spaces matter   
QUANTIZE q4_K_M
                "#,
        );

        let commands = parsing::parse(content).unwrap();
        let formatted = format(&commands);
        assert_eq!(parsing::parse(&formatted), Ok(commands));
    }
}
