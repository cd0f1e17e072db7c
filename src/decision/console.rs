use super::{Decider, UnrecognizedInput, parse_decision};
use crate::trace::{ChangeMessage, Decision};
use crate::ui::render::{MessageFormat, render_message};
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};

/// Prompt written before every read.
pub const PROMPT: &str = ">>> ";

/// Interactive decision source: prints the change, reads one line.
pub struct ConsolePrompt {
    io: Mutex<ConsoleIo>,
    format: MessageFormat,
    on_unrecognized: UnrecognizedInput,
}

struct ConsoleIo {
    input: Input,
    output: Box<dyn Write + Send>,
}

enum Input {
    /// Reads through the process-wide stdin buffer, so several prompts can
    /// share the terminal without stealing each other's lines.
    Stdin,
    Reader(Box<dyn BufRead + Send>),
}

impl Input {
    fn read_line(&mut self, line: &mut String) -> io::Result<usize> {
        match self {
            Self::Stdin => io::stdin().read_line(line),
            Self::Reader(reader) => reader.read_line(line),
        }
    }
}

impl ConsolePrompt {
    pub fn new(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self::with_io(Input::Reader(Box::new(input)), Box::new(output))
    }

    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::with_io(Input::Stdin, Box::new(io::stdout()))
    }

    fn with_io(input: Input, output: Box<dyn Write + Send>) -> Self {
        Self {
            io: Mutex::new(ConsoleIo { input, output }),
            format: MessageFormat::default(),
            on_unrecognized: UnrecognizedInput::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: MessageFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_unrecognized(mut self, policy: UnrecognizedInput) -> Self {
        self.on_unrecognized = policy;
        self
    }

    fn ask(&self, message: &ChangeMessage) -> io::Result<Decision> {
        let mut io = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let ConsoleIo { input, output } = &mut *io;

        writeln!(output, "{}", render_message(message, self.format))?;

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!(
                    attribute = %message.attribute_name,
                    "prompt.input_closed"
                );
                writeln!(output)?;
                return Ok(Decision::Drop);
            }

            match parse_decision(&line) {
                Some(Decision::Drop) => {
                    writeln!(output, "Dropping change.")?;
                    return Ok(Decision::Drop);
                }
                Some(decision) => return Ok(decision),
                None => match self.on_unrecognized {
                    UnrecognizedInput::Drop => {
                        tracing::debug!(
                            input = %line.trim(),
                            "prompt.unrecognized_input_dropped"
                        );
                        return Ok(Decision::Drop);
                    }
                    UnrecognizedInput::Reprompt => {
                        writeln!(
                            output,
                            "Unrecognized choice {:?}. Press Y, D or Q.",
                            line.trim()
                        )?;
                    }
                },
            }
        }
    }
}

impl Decider for ConsolePrompt {
    fn decide(&self, message: &ChangeMessage) -> Decision {
        match self.ask(message) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(
                    attribute = %message.attribute_name,
                    error = %e,
                    "prompt failed; dropping change"
                );
                Decision::Drop
            }
        }
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("buffer lock").clone();
            console::strip_ansi_codes(&String::from_utf8_lossy(&bytes)).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn message() -> ChangeMessage {
        ChangeMessage {
            target_repr: "Widget".into(),
            attribute_name: "attr".into(),
            old_value: "0".into(),
            new_value: "5".into(),
            filename: "src/app/demo.rs".into(),
            line_number: 31,
            function_name: "change_attr".into(),
            source_text: "self.attr.set(value)".into(),
        }
    }

    fn prompt(input: &str) -> (ConsolePrompt, SharedBuffer) {
        let output = SharedBuffer::default();
        let prompt = ConsolePrompt::new(Cursor::new(input.to_string()), output.clone())
            .with_format(MessageFormat::Plain);
        (prompt, output)
    }

    #[test]
    fn commit_on_y() {
        let (prompt, output) = prompt("y\n");
        assert_eq!(prompt.decide(&message()), Decision::Commit);
        let text = output.contents();
        assert!(text.contains("changing from 0 to 5"));
        assert!(text.contains("change_attr"));
        assert!(text.ends_with(PROMPT));
    }

    #[test]
    fn drop_on_d_announces_it() {
        let (prompt, output) = prompt("D\n");
        assert_eq!(prompt.decide(&message()), Decision::Drop);
        assert!(output.contents().contains("Dropping change."));
    }

    #[test]
    fn abort_on_uppercase_q() {
        let (prompt, _) = prompt("Q\n");
        assert_eq!(prompt.decide(&message()), Decision::Abort);
    }

    #[test]
    fn empty_line_quietly_drops_by_default() {
        let (prompt, output) = prompt("\n");
        assert_eq!(prompt.decide(&message()), Decision::Drop);
        assert!(!output.contents().contains("Dropping change."));
    }

    #[test]
    fn reprompt_policy_asks_again() {
        let (prompt, output) = prompt("maybe\n\ny\n");
        let prompt = prompt.with_unrecognized(UnrecognizedInput::Reprompt);
        assert_eq!(prompt.decide(&message()), Decision::Commit);
        let text = output.contents();
        assert_eq!(text.matches(PROMPT).count(), 3);
        assert!(text.contains("Unrecognized choice \"maybe\""));
    }

    #[test]
    fn end_of_input_drops() {
        let (prompt, _) = prompt("");
        assert_eq!(prompt.decide(&message()), Decision::Drop);
    }

    #[test]
    fn output_failure_drops() {
        let prompt = ConsolePrompt::new(Cursor::new("y\n".to_string()), FailingWriter);
        assert_eq!(prompt.decide(&message()), Decision::Drop);
    }

    #[test]
    fn successive_decisions_read_successive_lines() {
        let (prompt, _) = prompt("y\nd\nq\n");
        assert_eq!(prompt.decide(&message()), Decision::Commit);
        assert_eq!(prompt.decide(&message()), Decision::Drop);
        assert_eq!(prompt.decide(&message()), Decision::Abort);
        assert_eq!(prompt.name(), "console");
    }
}
