//! Paced character-by-character rendering of streamed text.
//!
//! `Typewriter` writes one character at a time, pausing after each, with a
//! longer pause after a period. It soft-wraps by turning the first space past
//! the wrap column into a line break, and drops spaces at column zero. The
//! only state is the current column; there is no lookahead and no buffering.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use daydream_types::config::TimingPolicy;

/// Source of the pauses between characters.
pub trait Pacer {
    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real-time pacing with `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Paced terminal writer.
pub struct Typewriter<W, P> {
    out: W,
    pacer: P,
    timing: TimingPolicy,
    column: usize,
}

impl<W: Write, P: Pacer> Typewriter<W, P> {
    pub fn new(out: W, pacer: P, timing: TimingPolicy) -> Self {
        Self {
            out,
            pacer,
            timing,
            column: 0,
        }
    }

    /// Current column on the output line.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Emit every character of `text` in order.
    pub async fn emit_fragment(&mut self, text: &str) -> std::io::Result<()> {
        for c in text.chars() {
            self.emit_char(c).await?;
        }
        Ok(())
    }

    /// Emit a single character and apply its pauses.
    pub async fn emit_char(&mut self, c: char) -> std::io::Result<()> {
        match c {
            '.' => {
                self.write_char(c)?;
                self.column += 1;
                self.pacer.pause(self.timing.sentence).await;
            }
            '\n' => {
                self.write_char(c)?;
                self.column = 0;
            }
            ' ' => {
                if self.column == 0 {
                    // Leading blank on a fresh line.
                } else if self.column > self.timing.wrap_column {
                    self.write_char('\n')?;
                    self.column = 0;
                } else {
                    self.write_char(c)?;
                    self.column += 1;
                }
            }
            _ => {
                self.write_char(c)?;
                self.column += 1;
            }
        }
        self.pacer.pause(self.timing.character).await;
        Ok(())
    }

    fn write_char(&mut self, c: char) -> std::io::Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        self.out.flush()
    }
}
