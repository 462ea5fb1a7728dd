use std::io::{self, BufRead, Write};

use crate::error::DictResult;

/// Questions the record flows ask the person at the keyboard.
pub trait UserPrompt {
    fn ask_yes_no(&mut self, question: &str) -> DictResult<bool>;

    /// Index into `options`, or `None` when the user cancels.
    fn ask_selection(&mut self, prompt: &str, options: &[String]) -> DictResult<Option<usize>>;

    /// Trimmed answer; empty when the user just pressed Enter.
    fn ask_text(&mut self, prompt: &str) -> DictResult<String>;

    /// True once the input is exhausted and no further answers will come.
    fn is_closed(&self) -> bool {
        false
    }
}

const YES: [&str; 4] = ["y", "yes", "s", "sim"];
const CANCEL: [&str; 2] = ["cancel", "c"];

pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> UserPrompt for ConsolePrompt<R, W> {
    fn ask_yes_no(&mut self, question: &str) -> DictResult<bool> {
        let answer = self.ask_text(&format!("{question} (y/n)"))?.to_lowercase();
        Ok(YES.contains(&answer.as_str()))
    }

    fn ask_selection(&mut self, prompt: &str, options: &[String]) -> DictResult<Option<usize>> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }

        loop {
            let choice = self.ask_text(&format!("{prompt} (number) or 'cancel'"))?;
            if self.closed || CANCEL.contains(&choice.to_lowercase().as_str()) {
                return Ok(None);
            }

            match choice.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                Ok(_) => writeln!(self.output, "Invalid number. Try again.")?,
                Err(_) => writeln!(self.output, "Invalid input. Use numbers.")?,
            }
        }
    }

    fn ask_text(&mut self, prompt: &str) -> DictResult<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            writeln!(self.output)?;
        }

        Ok(line.trim().to_string())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn yes_no_accepts_english_and_portuguese_confirmations() {
        let mut p = prompt("s\nYES\nn\n\n");
        assert!(p.ask_yes_no("Overwrite?").unwrap());
        assert!(p.ask_yes_no("Overwrite?").unwrap());
        assert!(!p.ask_yes_no("Overwrite?").unwrap());
        assert!(!p.ask_yes_no("Overwrite?").unwrap());
    }

    #[test]
    fn selection_retries_until_a_valid_number() {
        let mut p = prompt("abc\n7\n2\n");
        let options = vec!["one".to_string(), "two".to_string()];

        let chosen = p.ask_selection("Select an entry", &options).unwrap();

        assert_eq!(chosen, Some(1));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("1. one"));
        assert!(out.contains("Invalid input. Use numbers."));
        assert!(out.contains("Invalid number. Try again."));
    }

    #[test]
    fn selection_can_be_cancelled_or_closed() {
        let options = vec!["one".to_string()];
        assert_eq!(prompt("cancel\n").ask_selection("Pick", &options).unwrap(), None);
        assert_eq!(prompt("").ask_selection("Pick", &options).unwrap(), None);
    }

    #[test]
    fn text_is_trimmed_and_eof_closes_the_prompt() {
        let mut p = prompt("  hello  \n");
        assert_eq!(p.ask_text("Word").unwrap(), "hello");
        assert!(!p.is_closed());
        assert_eq!(p.ask_text("Word").unwrap(), "");
        assert!(p.is_closed());
    }
}
