#[cfg(test)]
mod verify {
    use std::thread;

    use modelfile::language::*;
    use modelfile::parsing::parser::{self, Parser};
    use modelfile::parsing::{self, ParsingError};

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn only_from() {
        let result = parsing::parse("FROM x");
        assert_eq!(result, Ok(vec![Command::new("model", "x")]));
    }

    #[test]
    fn order_is_preserved() {
        let result = parsing::parse(trim(
            r#"
PARAMETER temperature 1.0
SYSTEM You are helpful.
FROM foo
ADAPTER ./adapter.gguf
PARAMETER stop <|im_end|>
PARAMETER stop <|im_start|>
            "#,
        ));
        assert_eq!(
            result,
            Ok(vec![
                Command::new("temperature", "1.0"),
                Command::new("system", "You are helpful."),
                Command::new("model", "foo"),
                Command::new("adapter", "./adapter.gguf"),
                Command::new("stop", "<|im_end|>"),
                Command::new("stop", "<|im_start|>"),
            ])
        );
    }

    #[test]
    fn known_parameters() {
        let cases = vec![
            "numa true",
            "num_ctx 1",
            "num_batch 1",
            "num_gqa 1",
            "num_gpu 1",
            "main_gpu 1",
            "low_vram true",
            "f16_kv true",
            "logits_all true",
            "vocab_only true",
            "use_mmap true",
            "use_mlock true",
            "num_thread 1",
            "num_keep 1",
            "seed 1",
            "num_predict 1",
            "top_k 1",
            "top_p 1.0",
            "tfs_z 1.0",
            "typical_p 1.0",
            "repeat_last_n 1",
            "temperature 1.0",
            "repeat_penalty 1.0",
            "presence_penalty 1.0",
            "frequency_penalty 1.0",
            "mirostat 1",
            "mirostat_tau 1.0",
            "mirostat_eta 1.0",
            "penalize_newline true",
            "stop foo",
        ];

        for case in cases {
            let content = format!("FROM foo\nPARAMETER {}\n", case);
            let result = parsing::parse(&content);

            let (key, value) = case
                .split_once(' ')
                .unwrap();
            assert_eq!(
                result,
                Ok(vec![Command::new("model", "foo"), Command::new(key, value)]),
                "input: {}",
                content
            );
        }
    }

    #[test]
    fn messages() {
        let result = parsing::parse("FROM foo\nMESSAGE system You are helpful.\n");
        assert_eq!(
            result,
            Ok(vec![
                Command::new("model", "foo"),
                Command::new("message", "system: You are helpful."),
            ])
        );

        let commands = result.unwrap();
        assert_eq!(
            split_message(&commands[1].value),
            Some((Role::System, "You are helpful."))
        );
    }

    #[test]
    fn empty_values_are_recorded() {
        let source = "FROM foo\nSYSTEM \nMESSAGE user \n";
        let expected = vec![
            Command::new("model", "foo"),
            Command::new("system", ""),
            Command::new("message", "user: "),
        ];

        assert_eq!(parsing::parse(source), Ok(expected.clone()));

        let commands = parsing::parse_reader(source.as_bytes()).expect("should parse");
        assert_eq!(commands, expected);
    }

    #[test]
    fn multiline_block_round_trips() {
        let interior = "\nThis is a\nmultiline template.\n";
        let block = format!("TEMPLATE \"\"\"{}\"\"\"", interior);
        let content = format!("FROM foo\n{}\n", block);

        let result = parsing::parse(&content);
        assert_eq!(
            result,
            Ok(vec![
                Command::new("model", "foo"),
                Command::new("template", interior),
            ])
        );

        // re-wrapping the captured value reproduces the source block exactly
        let commands = result.unwrap();
        let rewrapped = format!("TEMPLATE \"\"\"{}\"\"\"", commands[1].value);
        assert_eq!(rewrapped, block);
    }

    #[test]
    fn multiline_variations() {
        let result = parsing::parse(trim(
            r#"
FROM foo
TEMPLATE """
This is a
multiline template."""
            "#,
        ));
        assert_eq!(
            result,
            Ok(vec![
                Command::new("model", "foo"),
                Command::new("template", "\nThis is a\nmultiline template."),
            ])
        );

        let result = parsing::parse(trim(
            r#"
FROM foo
TEMPLATE """This is a multiline template."""
            "#,
        ));
        assert_eq!(
            result,
            Ok(vec![
                Command::new("model", "foo"),
                Command::new("template", "This is a multiline template."),
            ])
        );

        // windows line endings are kept inside quoted values
        let result = parsing::parse("FROM foo\r\nSYSTEM \"\"\"one\r\ntwo\"\"\"\r\n");
        assert_eq!(
            result,
            Ok(vec![
                Command::new("model", "foo"),
                Command::new("system", "one\r\ntwo"),
            ])
        );
    }

    #[test]
    fn comments_do_not_interfere() {
        let result = parsing::parse(trim(
            r#"
# Modelfile for a pirate
  # with an indented note
FROM llama3
# PARAMETER temperature 2
PARAMETER temperature 1
            "#,
        ));
        assert_eq!(
            result,
            Ok(vec![
                Command::new("model", "llama3"),
                Command::new("temperature", "1"),
            ])
        );
    }

    #[test]
    fn idempotent() {
        let content = trim(
            r#"
FROM foo
SYSTEM """
Be brief.
"""
MESSAGE user Hi
            "#,
        );

        let first = parsing::parse(content);
        let second = parsing::parse(content);
        assert_eq!(first, second);

        let mut input = Parser::new();
        input.initialize(content);
        let third = input.parse_from_start();
        assert_eq!(first, third);
    }

    #[test]
    fn concurrent_scans_are_deterministic() {
        let documents = vec![
            "FROM a\nPARAMETER seed 1\n",
            "FROM b\nTEMPLATE \"\"\"\n{{ .Prompt }}\n\"\"\"\n",
            "PARAMETER seed 1\n",
            "FROM c\nMESSAGE nobody hi\n",
        ];
        let expected: Vec<_> = documents
            .iter()
            .map(|content| parser::parse_commands(content))
            .collect();

        let documents = &documents;
        thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(move || {
                        documents
                            .iter()
                            .map(|content| parser::parse_commands(content))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                let results = handle
                    .join()
                    .unwrap();
                assert_eq!(results, expected);
            }
        });

        assert_eq!(expected[2], Err(ParsingError::MissingFrom));
    }
}
