//! Line-oriented prompting for the interactive menu.
//!
//! `Prompter` is generic over its input and output so the menu can be driven by
//! stdin/stdout in production and by in-memory buffers in tests. Every `ask_*`
//! helper re-prompts until the answer is acceptable; the only way out of a
//! prompt without a valid answer is end of input, reported as
//! [`StockError::InputClosed`].

use phonestock::error::{Result, StockError};
use phonestock::index::SelectionMenu;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use super::print::render_menu;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Writes `prompt` and reads one line, without its line ending.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, which no validator accepts.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(StockError::InputClosed);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_parsed<T, E, F>(&mut self, prompt: &str, parse: F) -> Result<T>
    where
        E: Display,
        F: Fn(&str) -> std::result::Result<T, E>,
    {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format!("  {}", e))?,
            }
        }
    }

    /// Asks until `check` accepts the answer and returns the raw answer.
    pub fn ask_valid<T, E, F>(&mut self, prompt: &str, check: F) -> Result<String>
    where
        E: Display,
        F: Fn(&str) -> std::result::Result<T, E>,
    {
        self.ask_parsed(prompt, |answer| check(answer).map(|_| answer.to_string()))
    }

    /// Asks for a whole number within `min..=max`.
    pub fn ask_number<T>(&mut self, prompt: &str, min: T, max: T) -> Result<T>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        self.ask_parsed(prompt, |answer| {
            parse_whole::<T>(answer).and_then(|n| {
                if n < min || n > max {
                    Err(format!("Enter a number between {} and {}", min, max))
                } else {
                    Ok(n)
                }
            })
        })
    }

    /// Shows `menu` under `title` and asks until a listed number is picked.
    pub fn choose(&mut self, title: &str, menu: &SelectionMenu) -> Result<String> {
        self.say(title)?;
        write!(self.output, "{}", render_menu(menu))?;
        self.ask_parsed("Choose a number: ", |answer| {
            let choice = parse_whole::<usize>(answer)?;
            menu.select(choice)
                .map(str::to_string)
                .map_err(|e| e.to_string())
        })
    }
}

pub fn parse_whole<T: FromStr>(answer: &str) -> std::result::Result<T, String> {
    answer
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Enter a whole number, got {:?}", answer.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output().clone()).unwrap()
    }

    #[test]
    fn ask_strips_line_endings() {
        let mut p = prompter("Galaxy S23\r\n");
        assert_eq!(p.ask("Model: ").unwrap(), "Galaxy S23");
        assert_eq!(written(&mut p), "Model: ");
    }

    #[test]
    fn invalid_utf8_is_an_answer_not_an_error() {
        let mut p = Prompter::new(Cursor::new(vec![0xff, b'\n', b'4', b'\n']), Vec::new());
        assert_eq!(p.ask_number("Option: ", 0u8, 6).unwrap(), 4);
        assert!(written(&mut p).contains("Enter a whole number"));
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut p = prompter("");
        assert!(matches!(p.ask("> "), Err(StockError::InputClosed)));
    }

    #[test]
    fn number_reprompts_until_in_range() {
        let mut p = prompter("abc\n9\n3\n");
        assert_eq!(p.ask_number("Option: ", 0u8, 6).unwrap(), 3);
        let out = written(&mut p);
        assert!(out.contains("Enter a whole number, got \"abc\""));
        assert!(out.contains("Enter a number between 0 and 6"));
        assert_eq!(out.matches("Option: ").count(), 3);
    }

    #[test]
    fn invalid_answers_run_out_into_input_closed() {
        let mut p = prompter("x\n");
        assert!(matches!(
            p.ask_number("Option: ", 0u8, 6),
            Err(StockError::InputClosed)
        ));
    }

    #[test]
    fn choose_is_one_based() {
        let menu = SelectionMenu::new(vec!["Apple".into(), "Samsung".into()]);
        let mut p = prompter("0\n3\n2\n");
        assert_eq!(p.choose("Brands:", &menu).unwrap(), "Samsung");
        let out = written(&mut p);
        assert_eq!(
            out.matches("Invalid selection").count(),
            2,
            "0 and 3 are both outside the menu"
        );
    }

    #[test]
    fn ask_valid_returns_raw_answer() {
        let mut p = prompter("-1\n12\n");
        let answer = p
            .ask_valid("Quantity: ", phonestock::validation::validate_quantity)
            .unwrap();
        assert_eq!(answer, "12");
    }
}
