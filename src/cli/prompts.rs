//! Yes/no questions asked before an interactive `apply`.

use anyhow::Result;
use lang_router_plugin::config::GeneratorOptions;
use std::io::{BufRead, Write};

pub trait Prompter {
    /// Ask `question`, falling back to `default` on an empty answer
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Reads answers from `input` and writes questions to `output`
pub struct TerminalPrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "❓ {} ({}) ", question, hint)?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                // EOF
                return Ok(default);
            }

            match answer.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => writeln!(self.output, "   Please answer y or n (got \"{}\")", other)?,
            }
        }
    }
}

/// Ask the generator questions, using the current options as defaults
pub fn ask_options(prompter: &mut impl Prompter, options: &mut GeneratorOptions) -> Result<()> {
    options.render_template = prompter.confirm(
        "Add example translation files (src/lang/translations, src/lang/localized-urls)?",
        options.render_template,
    )?;
    options.rewrite_router_link = prompter.confirm(
        "Replace <router-link> with <localized-link> in App.vue?",
        options.rewrite_router_link,
    )?;
    options.add_language_switcher = prompter.confirm(
        "Add a <language-switcher> to the navigation in App.vue?",
        options.add_language_switcher,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(answers: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_empty_answer_takes_default() {
        let mut prompter = prompter("\n\n");
        assert!(prompter.confirm("Continue?", true).unwrap());
        assert!(!prompter.confirm("Continue?", false).unwrap());
    }

    #[test]
    fn test_invalid_answer_asks_again() {
        let mut prompter = prompter("maybe\nNO\n");
        assert!(!prompter.confirm("Continue?", true).unwrap());

        let output = String::from_utf8(prompter.output).unwrap();
        assert_eq!(output.matches("Continue?").count(), 2);
        assert!(output.contains("Please answer y or n"));
    }

    #[test]
    fn test_eof_takes_default() {
        let mut prompter = prompter("");
        assert!(prompter.confirm("Continue?", true).unwrap());
    }

    #[test]
    fn test_ask_options() {
        let mut prompter = prompter("n\n\ny\n");
        let mut options = GeneratorOptions::default();

        ask_options(&mut prompter, &mut options).unwrap();

        assert!(!options.render_template);
        assert!(options.rewrite_router_link);
        assert!(options.add_language_switcher);
        assert!(options.inject_i18n);
    }
}
