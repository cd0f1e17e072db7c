#![allow(dead_code)]

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use attr_tracers::decision::ConsolePrompt;
use attr_tracers::trace::TracedClass;
use attr_tracers::ui::MessageFormat;
use attr_tracers::UnrecognizedInput;

/// Cloneable sink so a test can read what the prompt wrote.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
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

/// Console prompt fed from `input`, with output captured.
pub fn scripted_prompt(input: &str, policy: UnrecognizedInput) -> (ConsolePrompt, SharedBuffer) {
    let output = SharedBuffer::default();
    let prompt = ConsolePrompt::new(Cursor::new(input.to_string()), output.clone())
        .with_format(MessageFormat::Styled)
        .with_unrecognized(policy);
    (prompt, output)
}

/// `Widget` class answering from `input` with the default policies.
pub fn widget_class(input: &str) -> (TracedClass, SharedBuffer) {
    let (prompt, output) = scripted_prompt(input, UnrecognizedInput::Drop);
    let class = TracedClass::named("Widget").with_decider(Arc::new(prompt));
    (class, output)
}
