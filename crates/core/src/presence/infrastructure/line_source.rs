use std::io::BufRead;

use crate::presence::domain::presence_source::PresenceSource;

/// Presence samples read one-per-line from a text stream.
///
/// This is the wire format for an external detector piping its per-frame
/// boolean into the process (stdin in the CLI). Accepted spellings,
/// case-insensitive: `1`/`0`, `true`/`false`, `yes`/`no`. Blank lines are
/// skipped; anything else is an error that ends the stream.
pub struct LinePresenceSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LinePresenceSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead + Send> PresenceSource for LinePresenceSource<R> {
    fn next_sample(&mut self) -> Result<Option<bool>, Box<dyn std::error::Error>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            return match token.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(Some(true)),
                "0" | "false" | "no" => Ok(Some(false)),
                other => Err(format!("unrecognized presence sample: {other:?}").into()),
            };
        }
    }
}
