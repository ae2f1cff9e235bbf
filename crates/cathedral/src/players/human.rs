//! Human player that types move codes at a terminal.

use super::Player;
use anyhow::{Context, Result, bail};
use cathedral_rules::{Game, MoveCode, Piece};
use std::io::{BufRead, StdinLock, Stdout, Write};
use tracing::{debug, instrument, warn};

/// Human player reading five-character move codes, one per line.
///
/// Malformed or illegal input is reported and the player is asked again.
pub struct LocalHuman<R, W> {
    name: String,
    input: R,
    output: W,
}

impl LocalHuman<StdinLock<'static>, Stdout> {
    /// Creates a human player on the process's stdin and stdout.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LocalHuman<R, W> {
    /// Creates a human player over any line source and prompt sink.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Player for LocalHuman<R, W> {
    #[instrument(skip(self, game), fields(player = %self.name))]
    fn next_move(&mut self, game: &Game) -> Result<Piece> {
        let owner = game.next_turn().context("the game is already over")?;
        writeln!(self.output, "\n{}", game.board())?;

        loop {
            write!(self.output, "{} to move (e.g. TAn00): ", self.name)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read move")?;
            if read == 0 {
                bail!("input closed before {} moved", self.name);
            }

            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let code: MoveCode = match text.parse() {
                Ok(code) => code,
                Err(e) => {
                    warn!(input = text, error = %e, "Malformed move code");
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };

            match game.check_place(code.building, owner, code.direction, code.anchor) {
                Ok(()) => {
                    debug!(%code, "Move accepted");
                    return Ok(Piece::new(owner, code.building, code.direction, code.anchor));
                }
                Err(e) => {
                    warn!(%code, error = %e, "Illegal move entered");
                    writeln!(self.output, "{code} is not legal: {e}")?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
