//! Interactive terminal session.
//!
//! Reads one command per line, plays it on the [`Game`] and prints the
//! board. Rendering lives here; the rules crate only answers questions.

use std::io::{self, BufRead, Write};

use chess_core::{Color, Move, PromotionPiece, Square, BOARD_SIZE};
use chess_rules::{
    Board, FixedChoice, Game, GameError, GameStatus, MoveEvent, MoveOutcome, PromotionChooser,
    SideEffect,
};

use crate::config::parse_promotion;

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A coordinate move, optionally with a promotion letter.
    Play(Move),
    /// List the legal destinations of a square.
    Moves(Square),
    Board,
    Help,
    Quit,
}

impl Command {
    /// Parses a line of input. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(None);
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "quit" | "exit" => Command::Quit,
            "help" | "?" => Command::Help,
            "board" => Command::Board,
            "moves" => {
                let name = words.next().ok_or("usage: moves <square>")?;
                let square = Square::from_algebraic(name)
                    .ok_or_else(|| format!("not a square: {name}"))?;
                Command::Moves(square)
            }
            other => Move::from_uci(other)
                .map(Command::Play)
                .ok_or_else(|| format!("unknown command: {first} (try `help`)"))?,
        };

        if words.next().is_some() {
            return Err(format!("unexpected input after `{first}`"));
        }
        Ok(Some(command))
    }
}

/// Options that shape a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Promote to this piece without asking.
    pub auto_promote: Option<PromotionPiece>,
    /// Print legal destinations for `moves` queries.
    pub show_moves: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            auto_promote: None,
            show_moves: true,
        }
    }
}

/// Asks the player on the terminal which piece to promote to.
///
/// An empty line, end of input, or a failed read or write cancels the
/// promotion.
struct PromptChooser<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> PromotionChooser for PromptChooser<'_, R, W> {
    fn choose(&mut self, square: Square, color: Color) -> Option<PromotionPiece> {
        loop {
            let prompt = write!(
                self.output,
                "{color} pawn on {square} promotes to (q/r/b/n, empty to keep the pawn): "
            )
            .and_then(|()| self.output.flush());
            if prompt.is_err() {
                return None;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            if line.trim().is_empty() {
                return None;
            }
            if let Some(piece) = parse_promotion(&line) {
                return Some(piece);
            }
            if writeln!(self.output, "not a promotion piece: {}", line.trim()).is_err() {
                return None;
            }
        }
    }
}

/// A game played over a line-based reader and writer.
pub struct Session<R, W> {
    game: Game,
    input: R,
    output: W,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Game, input: R, output: W, options: SessionOptions) -> Self {
        Session {
            game,
            input,
            output,
            options,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs until `quit`, end of input, or the end of the game.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", render_board(self.game.board()))?;
        self.print_status()?;

        loop {
            if self.game.status().is_over() {
                return Ok(());
            }

            write!(self.output, "{} to move> ", self.game.side_to_move())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(command)) => self.execute(command)?,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Play(m) => self.play(m),
            Command::Moves(square) => self.list_moves(square),
            Command::Board => writeln!(self.output, "{}", render_board(self.game.board())),
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }

    fn play(&mut self, m: Move) -> io::Result<()> {
        let result = match (m.promotion, self.options.auto_promote) {
            (Some(_), _) => match self.game.make_move_uci(&m.to_uci()) {
                Ok(MoveEvent::Completed(outcome)) => Ok(outcome),
                Ok(MoveEvent::PromotionRequired { square, .. }) => {
                    Err(GameError::PromotionPending(square))
                }
                Err(err) => Err(err),
            },
            (None, Some(piece)) => {
                self.game
                    .make_move_with(m.from, m.to, &mut FixedChoice(Some(piece)))
            }
            (None, None) => {
                let mut chooser = PromptChooser {
                    input: &mut self.input,
                    output: &mut self.output,
                };
                self.game.make_move_with(m.from, m.to, &mut chooser)
            }
        };

        match result {
            Ok(outcome) => {
                tracing::debug!(mv = %m, "move played");
                self.describe(&outcome)?;
                writeln!(self.output, "{}", render_board(self.game.board()))?;
                self.print_status()
            }
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn list_moves(&mut self, square: Square) -> io::Result<()> {
        match self.game.legal_moves_from(square) {
            Ok(moves) if moves.is_empty() => writeln!(self.output, "{square}: no legal moves"),
            Ok(moves) if self.options.show_moves => {
                let names: Vec<String> = moves.iter().map(|to| to.to_string()).collect();
                writeln!(self.output, "{square}: {}", names.join(" "))
            }
            Ok(moves) => writeln!(self.output, "{square}: {} legal moves", moves.len()),
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn describe(&mut self, outcome: &MoveOutcome) -> io::Result<()> {
        match outcome.effect {
            Some(SideEffect::Castle { from, to, .. }) => {
                writeln!(self.output, "castled; rook {from} -> {to}")
            }
            Some(SideEffect::EnPassant { square, .. }) => {
                writeln!(self.output, "en passant; pawn on {square} taken")
            }
            Some(SideEffect::Promotion { kind, .. }) => {
                writeln!(self.output, "promoted to {kind}")
            }
            None => Ok(()),
        }
    }

    fn print_status(&mut self) -> io::Result<()> {
        let to_move = self.game.side_to_move();
        match self.game.status() {
            GameStatus::Ongoing if self.game.is_in_check(to_move) => {
                writeln!(self.output, "{to_move} is in check")
            }
            GameStatus::Ongoing => Ok(()),
            status => writeln!(self.output, "Game over: {status}"),
        }
    }
}

const HELP: &str = "\
commands:
  e2e4        move a piece (add q/r/b/n to promote, e.g. e7e8q)
  moves e2    list the legal destinations of a piece
  board       print the board
  quit        leave the game";

/// Renders the board as text, rank 8 at the top, with file and rank labels.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for rank in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..BOARD_SIZE {
            let c = board
                .piece_on(Square::new(file, rank))
                .map(|p| p.kind().to_fen_char(p.color()))
                .unwrap_or('.');
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h");
    out
}
