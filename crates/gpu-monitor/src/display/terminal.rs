use super::StatusDisplay;
use std::io::{self, Stdout, Write};
use tracing::debug;

/// Carriage return followed by "erase entire line"
const REWRITE_LINE: &str = "\r\x1b[2K";

/// Status line redrawn in place on a terminal
#[derive(Debug)]
pub struct TerminalStatusLine<W: Write + Send = Stdout> {
    out: W,
    created: bool,
    visible: bool,
}

impl TerminalStatusLine<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalStatusLine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            created: false,
            visible: false,
        }
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{REWRITE_LINE}{text}")?;
        self.out.flush()
    }
}

impl<W: Write + Send> StatusDisplay for TerminalStatusLine<W> {
    fn create(&mut self) {
        self.created = true;
    }

    fn publish(&mut self, text: &str) {
        // A closed or broken terminal must not take the monitor down
        if let Err(e) = self.draw(text) {
            debug!("Failed to draw status line: {}", e);
            return;
        }
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_until_first_publish() {
        let mut line = TerminalStatusLine::new(Vec::new());
        line.create();

        assert!(line.is_created());
        assert!(!line.is_visible());
        assert!(line.into_inner().is_empty());
    }

    #[test]
    fn test_publish_rewrites_line_in_place() {
        let mut line = TerminalStatusLine::new(Vec::new());
        line.create();
        line.publish("(cuda:0) 1 / 3 MB");
        line.publish("(cuda:0) 2 / 3 MB");

        assert!(line.is_visible());
        let written = String::from_utf8(line.into_inner()).unwrap();
        assert_eq!(
            written,
            "\r\x1b[2K(cuda:0) 1 / 3 MB\r\x1b[2K(cuda:0) 2 / 3 MB"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_contained() {
        let mut line = TerminalStatusLine::new(BrokenPipe);
        line.create();
        line.publish("(cuda:0) 1 / 3 MB");

        assert!(!line.is_visible());
    }
}
