use crate::engine::Move;
use crate::logic::rules::MoveError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SIZE: usize = 6;
pub const MAX_SIZE: usize = 20;

/// Number of cells left empty by the initial fill (the central 2x2 block).
pub const INITIAL_EMPTY_CELLS: usize = 4;

pub const EMPTY_SYMBOL: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
}

impl PieceKind {
    pub const COUNT: usize = 5;
    pub const ALL: [Self; Self::COUNT] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            4 => Some(Self::E),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }
}

/// Zero-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: usize,
    pub col: usize,
}

impl BoardCoordinate {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts 1-based user input (`1..=size` on both axes).
    pub fn from_user(row: i64, col: i64, size: usize) -> Result<Self, MoveError> {
        let in_range = |v: i64| usize::try_from(v).ok().filter(|v| (1..=size).contains(v));
        match (in_range(row), in_range(col)) {
            (Some(r), Some(c)) => Ok(Self::new(r - 1, c - 1)),
            _ => Err(MoveError::InvalidCoordinate { size }),
        }
    }

    /// 1-based `(row, col)` pair, the form users type and read.
    pub const fn to_user(self) -> (usize, usize) {
        (self.row + 1, self.col + 1)
    }

    /// Shifts by `(dr, dc)`, returning `None` when the result leaves a `size` x `size` board.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Self::new(row, col))
    }

    #[must_use]
    pub const fn midpoint(self, other: Self) -> Self {
        Self::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_user();
        write!(f, "({row}, {col})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    // Row-major, `size * size` cells
    cells: Vec<Option<PieceKind>>,
}

impl Board {
    /// An all-empty board. Sizes are not clamped here; callers validate with
    /// [`Board::is_valid_size`] before starting a game.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// A freshly filled starting position.
    pub fn filled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut board = Self::new(size);
        board.fill(rng);
        board
    }

    pub fn is_valid_size(size: usize) -> bool {
        (MIN_SIZE..=MAX_SIZE).contains(&size)
    }

    /// Builds a board from one string per row using the save-file symbols
    /// (`A`..`E`, `*` for empty). Whitespace between cells is ignored.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut board = Self::new(size);
        for (r, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size {
                return None;
            }
            for (c, &symbol) in symbols.iter().enumerate() {
                let cell = match symbol {
                    EMPTY_SYMBOL => None,
                    other => Some(PieceKind::from_symbol(other)?),
                };
                board.set(BoardCoordinate::new(r, c), cell);
            }
        }
        Some(board)
    }

    /// How many pieces of each kind the initial fill places on a board of `size`:
    /// an even split of `size² - 4`, remainder handed out round-robin from `A`.
    #[must_use]
    pub fn initial_distribution(size: usize) -> [usize; PieceKind::COUNT] {
        let total = (size * size).saturating_sub(INITIAL_EMPTY_CELLS);
        let per_kind = total / PieceKind::COUNT;
        let remainder = total % PieceKind::COUNT;
        let mut counts = [per_kind; PieceKind::COUNT];
        for count in counts.iter_mut().take(remainder) {
            *count += 1;
        }
        counts
    }

    /// The four cells left empty at game start.
    #[must_use]
    pub fn center_cells(size: usize) -> [BoardCoordinate; 4] {
        let hi = size / 2;
        let lo = hi.saturating_sub(1);
        [
            BoardCoordinate::new(lo, lo),
            BoardCoordinate::new(lo, hi),
            BoardCoordinate::new(hi, lo),
            BoardCoordinate::new(hi, hi),
        ]
    }

    fn is_center(&self, coord: BoardCoordinate) -> bool {
        Self::center_cells(self.size).contains(&coord)
    }

    /// Fills every non-center cell with a shuffled, evenly distributed piece multiset.
    ///
    /// The shuffle swaps each position with a uniformly random index over the
    /// whole range instead of the shrinking range of Fisher-Yates, so the
    /// resulting permutations are close to, but not exactly, uniform.
    pub fn fill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut pieces: Vec<PieceKind> = Self::initial_distribution(self.size)
            .iter()
            .zip(PieceKind::ALL)
            .flat_map(|(&count, kind)| std::iter::repeat(kind).take(count))
            .collect();

        let total = pieces.len();
        if total > 0 {
            for i in 0..total {
                let j = rng.gen_range(0..total);
                pieces.swap(i, j);
            }
        }

        let coords: Vec<BoardCoordinate> = self.coordinates().collect();
        let mut next = pieces.into_iter();
        for coord in coords {
            let cell = if self.is_center(coord) { None } else { next.next() };
            self.set(coord, cell);
        }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: BoardCoordinate) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    const fn index(&self, coord: BoardCoordinate) -> usize {
        coord.row * self.size + coord.col
    }

    /// Cell contents; out-of-bounds coordinates read as empty.
    #[must_use]
    pub fn get(&self, coord: BoardCoordinate) -> Option<PieceKind> {
        if !self.contains(coord) {
            return None;
        }
        self.cells.get(self.index(coord)).copied().flatten()
    }

    pub fn set(&mut self, coord: BoardCoordinate, cell: Option<PieceKind>) {
        if !self.contains(coord) {
            return;
        }
        let idx = self.index(coord);
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
    }

    pub fn is_occupied(&self, coord: BoardCoordinate) -> bool {
        self.get(coord).is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.occupied_count()
    }

    /// Pieces of each kind still on the board.
    #[must_use]
    pub fn piece_counts(&self) -> [usize; PieceKind::COUNT] {
        let mut counts = [0; PieceKind::COUNT];
        for kind in self.cells.iter().flatten() {
            if let Some(count) = counts.get_mut(kind.index()) {
                *count += 1;
            }
        }
        counts
    }

    /// All coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = BoardCoordinate> {
        let size = self.size;
        (0..size).flat_map(move |r| (0..size).map(move |c| BoardCoordinate::new(r, c)))
    }

    /// Performs a jump: the piece moves from `mv.from` to `mv.to` and the
    /// piece at the midpoint is removed. Legality is the caller's concern.
    pub fn apply_jump(&mut self, mv: &Move) {
        let piece = self.get(mv.from);
        self.set(mv.to, piece);
        self.set(mv.from, None);
        self.set(mv.midpoint(), None);
    }

    /// Exact inverse of [`Board::apply_jump`].
    pub fn undo_jump(&mut self, mv: &Move) {
        let piece = self.get(mv.to);
        self.set(mv.from, piece);
        self.set(mv.to, None);
        self.set(mv.midpoint(), Some(mv.captured));
    }

    /// One string per row, cells as save-file symbols separated by spaces.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.size).map(move |r| {
            (0..self.size)
                .map(|c| {
                    self.get(BoardCoordinate::new(r, c))
                        .map_or(EMPTY_SYMBOL, PieceKind::symbol)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
