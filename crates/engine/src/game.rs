//! Single-player game state: board, current piece, hold, a fixed preview
//! queue and the counters the scoring modes advance.

use shaktris_core::{Board, Movement, Piece, PieceType, SpinType};
use tracing::debug;

use crate::bag::SevenBag;
use crate::collision::{collides, sonic_drop_y};
use crate::error::GameError;
use crate::modes::{Botris, Mode, ScoringMode};

pub const QUEUE_SIZE: usize = 6;

/// What one placement did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub lines: u32,
    pub spin: SpinType,
    pub perfect_clear: bool,
    /// Damage after cancelling pending garbage.
    pub damage: u32,
    pub first_hold: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub board: Board,
    pub current_piece: Option<PieceType>,
    pub hold: Option<PieceType>,
    pub queue: [Option<PieceType>; QUEUE_SIZE],
    /// Incoming garbage not yet cancelled or applied.
    pub garbage_meter: u32,
    pub b2b: u16,
    pub combo: u16,
    pub mode: Mode,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Mode::Botris(Botris))
    }
}

impl Game {
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            hold: None,
            queue: [None; QUEUE_SIZE],
            garbage_meter: 0,
            b2b: 0,
            combo: 0,
            mode,
        }
    }

    /// Front of the queue, shifting the rest forward.
    fn pop_queue(&mut self) -> Option<PieceType> {
        let front = self.queue[0];
        self.queue.rotate_left(1);
        self.queue[QUEUE_SIZE - 1] = None;
        front
    }

    /// The piece a hold would bring in.
    fn hold_candidate(&self) -> Option<PieceType> {
        self.hold.or(self.queue[0])
    }

    /// Append to the queue; an empty current slot is filled first.
    pub fn push_queue(&mut self, kind: PieceType) -> Result<(), GameError> {
        if self.current_piece.is_none() && self.queue.iter().all(Option::is_none) {
            self.current_piece = Some(kind);
            return Ok(());
        }
        let slot = self.queue.iter_mut().find(|p| p.is_none()).ok_or(GameError::QueueFull)?;
        *slot = Some(kind);
        Ok(())
    }

    /// Draw from `bag` until the current slot and the queue are full.
    pub fn fill_queue(&mut self, bag: &mut SevenBag) {
        if self.current_piece.is_none() {
            self.current_piece = self.pop_queue().or_else(|| Some(bag.next_piece()));
        }
        for slot in self.queue.iter_mut().filter(|p| p.is_none()) {
            *slot = Some(bag.next_piece());
        }
    }

    /// Swap the current piece with the hold slot. With an empty hold the
    /// queue front becomes current.
    pub fn do_hold(&mut self) -> Result<(), GameError> {
        let current = self.current_piece.ok_or(GameError::NoCurrentPiece)?;
        self.current_piece = match self.hold {
            Some(held) => Some(held),
            None => self.pop_queue(),
        };
        self.hold = Some(current);
        Ok(())
    }

    /// Lock `piece`, which must be the current piece or the piece a hold
    /// would bring in. Returns true when this was the first hold, which
    /// consumed a queue piece.
    pub fn place_piece(&mut self, piece: &Piece) -> Result<bool, GameError> {
        let current = self.current_piece.ok_or(GameError::NoCurrentPiece)?;
        let held = piece.kind != current;
        if held && self.hold_candidate() != Some(piece.kind) {
            return Err(GameError::NotPlayable(piece.kind));
        }
        if collides(&self.board, piece) {
            return Err(GameError::Collision(*piece));
        }

        let first_hold = held && self.hold.is_none();
        if held {
            if first_hold {
                self.pop_queue();
            }
            self.hold = Some(current);
        }
        self.board.set_piece(piece);
        self.current_piece = self.pop_queue();
        Ok(first_hold)
    }

    /// Hard drop the current piece from spawn and lock it.
    pub fn place_current(&mut self) -> Result<Piece, GameError> {
        let kind = self.current_piece.ok_or(GameError::NoCurrentPiece)?;
        let mut piece = Piece::new(kind);
        if collides(&self.board, &piece) {
            return Err(GameError::Collision(piece));
        }
        piece.y = sonic_drop_y(&self.board, &piece);
        self.place_piece(&piece)?;
        Ok(piece)
    }

    /// Push garbage in from the bottom with a hole at `location`.
    pub fn add_garbage(&mut self, lines: u32, location: usize) {
        self.board.add_garbage(lines, location);
    }

    /// Queue incoming garbage for cancellation by the next clears.
    pub fn receive_garbage(&mut self, lines: u32) {
        self.garbage_meter = self.garbage_meter.saturating_add(lines);
    }

    /// Damage for a clear under the current mode. Advances combo and b2b.
    pub fn damage_sent(&mut self, lines: u32, spin: SpinType, perfect_clear: bool) -> u32 {
        self.mode.points(lines, spin, perfect_clear, &mut self.combo, &mut self.b2b)
    }

    pub fn process_movement(&self, piece: &mut Piece, movement: Movement) -> bool {
        crate::movement::process_movement(&self.board, piece, movement)
    }

    /// Placements for the current piece, followed by those of the piece a
    /// hold would bring in when it is a different type.
    pub fn possible_placements(&self) -> Vec<Piece> {
        let Some(current) = self.current_piece else {
            return Vec::new();
        };
        let mut placements = crate::movegen(&self.board, current);
        if let Some(other) = self.hold_candidate().filter(|&k| k != current) {
            placements.extend(crate::movegen(&self.board, other));
        }
        placements
    }

    /// The current piece cannot spawn.
    pub fn is_topped_out(&self) -> bool {
        self.current_piece.is_some_and(|kind| collides(&self.board, &Piece::new(kind)))
    }

    /// Place, clear lines and score one piece.
    pub fn play(&mut self, piece: &Piece) -> Result<TurnOutcome, GameError> {
        let first_hold = self.place_piece(piece)?;
        let lines = self.board.clear_lines();
        let perfect_clear = lines > 0 && self.board.is_empty();
        let mut damage = self.damage_sent(lines, piece.spin, perfect_clear);

        let cancelled = damage.min(self.garbage_meter);
        self.garbage_meter -= cancelled;
        damage -= cancelled;

        debug!(
            piece = %piece.kind,
            lines,
            spin = ?piece.spin,
            perfect_clear,
            damage,
            combo = self.combo,
            b2b = self.b2b,
            "turn"
        );
        Ok(TurnOutcome {
            lines,
            spin: piece.spin,
            perfect_clear,
            damage,
            first_hold,
        })
    }
}
