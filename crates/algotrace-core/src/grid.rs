//! Grid cells and validated puzzle instances.
//!
//! A [`GridInstance`] is a rectangular maze: every cell is either open or a
//! wall, with a distinguished start, exit and an ordered set of treasure
//! targets. Instances are immutable once built. Structural rules (start and
//! exit open, targets distinct and open) are checked on construction;
//! reachability is not, that is the oracle's job in the engine crate.
//!
//! Instances can be written and read as ASCII layouts:
//!
//! ```text
//! S.#.
//! .$#.
//! ...E
//! ```
//!
//! `#` is a wall, `.` empty, `$` a treasure, `S` the start and `E` the exit.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CoreError;
use crate::id::InstanceId;

/// A `(row, col)` coordinate on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellTag {
    Empty,
    Wall,
    Treasure,
    Start,
    Exit,
}

impl CellTag {
    /// The ASCII glyph used in layouts.
    pub fn glyph(self) -> char {
        match self {
            CellTag::Empty => '.',
            CellTag::Wall => '#',
            CellTag::Treasure => '$',
            CellTag::Start => 'S',
            CellTag::Exit => 'E',
        }
    }

    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | ' ' => Some(CellTag::Empty),
            '#' => Some(CellTag::Wall),
            '$' => Some(CellTag::Treasure),
            'S' => Some(CellTag::Start),
            'E' => Some(CellTag::Exit),
            _ => None,
        }
    }
}

/// A validated maze layout.
///
/// Cells are stored row-major. When start and exit coincide (a 1x1 grid) the
/// shared cell is tagged [`CellTag::Start`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord", into = "GridRecord")]
pub struct GridInstance {
    id: InstanceId,
    width: usize,
    height: usize,
    tags: Vec<CellTag>,
    start: Cell,
    exit: Cell,
    targets: IndexSet<Cell>,
}

impl GridInstance {
    /// Builds an instance from a row-major wall mask and the special cells.
    ///
    /// Targets keep the order they are given in; duplicates are rejected.
    pub fn new(
        width: usize,
        height: usize,
        walls: Vec<bool>,
        start: Cell,
        exit: Cell,
        targets: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::MalformedGrid {
                reason: format!("dimensions must be positive, got {width}x{height}"),
            });
        }
        let area = width.checked_mul(height).ok_or_else(|| CoreError::MalformedGrid {
            reason: format!("dimensions {width}x{height} overflow"),
        })?;
        if walls.len() != area {
            return Err(CoreError::MalformedGrid {
                reason: format!("expected {area} cells, got {}", walls.len()),
            });
        }

        let mut tags: Vec<CellTag> = walls
            .iter()
            .map(|&wall| if wall { CellTag::Wall } else { CellTag::Empty })
            .collect();

        let mut ordered = IndexSet::new();
        for target in targets {
            if !ordered.insert(target) {
                return Err(CoreError::MalformedGrid {
                    reason: format!("duplicate target at {target}"),
                });
            }
        }

        let mut grid = GridInstance {
            id: InstanceId(0),
            width,
            height,
            tags: Vec::new(),
            start,
            exit,
            targets: IndexSet::new(),
        };

        for (cell, tag) in ordered
            .iter()
            .map(|&cell| (cell, CellTag::Treasure))
            .chain([(exit, CellTag::Exit), (start, CellTag::Start)])
        {
            let idx = grid.index_of(cell)?;
            match tags[idx] {
                CellTag::Wall => {
                    return Err(CoreError::MalformedGrid {
                        reason: format!("{tag:?} at {cell} is a wall"),
                    });
                }
                CellTag::Treasure if tag == CellTag::Start || tag == CellTag::Exit => {
                    return Err(CoreError::MalformedGrid {
                        reason: format!("target at {cell} overlaps the {tag:?} cell"),
                    });
                }
                _ => tags[idx] = tag,
            }
        }

        grid.tags = tags;
        grid.targets = ordered;
        grid.id = grid.content_id();
        Ok(grid)
    }

    /// Parses an ASCII layout. Blank lines are ignored; every other line is
    /// a row and all rows must have the same width. Targets are ordered
    /// row-major.
    pub fn from_ascii(layout: &str) -> Result<Self, CoreError> {
        let rows: Vec<Vec<char>> = layout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut walls = Vec::with_capacity(width * height);
        let mut start = None;
        let mut exit = None;
        let mut targets = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            if line.len() != width {
                return Err(CoreError::MalformedGrid {
                    reason: format!("row {row} has {} cells, expected {width}", line.len()),
                });
            }
            for (col, &glyph) in line.iter().enumerate() {
                let cell = Cell::new(row, col);
                let tag = CellTag::from_glyph(glyph).ok_or_else(|| CoreError::MalformedGrid {
                    reason: format!("unknown glyph '{glyph}' at {cell}"),
                })?;
                walls.push(tag == CellTag::Wall);
                match tag {
                    CellTag::Start if start.replace(cell).is_some() => {
                        return Err(CoreError::MalformedGrid {
                            reason: "more than one start cell".into(),
                        });
                    }
                    CellTag::Exit if exit.replace(cell).is_some() => {
                        return Err(CoreError::MalformedGrid {
                            reason: "more than one exit cell".into(),
                        });
                    }
                    CellTag::Treasure => targets.push(cell),
                    _ => {}
                }
            }
        }

        let start = start.ok_or_else(|| CoreError::MalformedGrid {
            reason: "missing start cell 'S'".into(),
        })?;
        let exit = exit.ok_or_else(|| CoreError::MalformedGrid {
            reason: "missing exit cell 'E'".into(),
        })?;

        GridInstance::new(width, height, walls, start, exit, targets)
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn exit(&self) -> Cell {
        self.exit
    }

    /// Treasure cells in placement order.
    pub fn targets(&self) -> &IndexSet<Cell> {
        &self.targets
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Row-major index of a cell.
    pub fn index_of(&self, cell: Cell) -> Result<usize, CoreError> {
        if self.in_bounds(cell) {
            Ok(cell.row * self.width + cell.col)
        } else {
            Err(CoreError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Tag of a cell, or `None` outside the grid.
    pub fn tag(&self, cell: Cell) -> Option<CellTag> {
        self.index_of(cell).ok().map(|idx| self.tags[idx])
    }

    /// True for walls and for anything outside the grid.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !matches!(self.tag(cell), Some(tag) if tag != CellTag::Wall)
    }

    /// In-bounds 4-neighbours in a fixed order: up, right, down, left.
    /// Walls are included; callers filter with [`is_blocked`](Self::is_blocked).
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        let mut out = SmallVec::new();
        if cell.row > 0 {
            out.push(Cell::new(cell.row - 1, cell.col));
        }
        if cell.col + 1 < self.width {
            out.push(Cell::new(cell.row, cell.col + 1));
        }
        if cell.row + 1 < self.height {
            out.push(Cell::new(cell.row + 1, cell.col));
        }
        if cell.col > 0 {
            out.push(Cell::new(cell.row, cell.col - 1));
        }
        out
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellTag)> + '_ {
        self.tags
            .iter()
            .enumerate()
            .map(move |(idx, &tag)| (Cell::new(idx / self.width, idx % self.width), tag))
    }

    pub fn wall_count(&self) -> usize {
        self.tags.iter().filter(|&&tag| tag == CellTag::Wall).count()
    }

    /// Hashes the layout field by field, so the id does not depend on any
    /// serialization format.
    fn content_id(&self) -> InstanceId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.width as u64).to_le_bytes());
        hasher.update(&(self.height as u64).to_le_bytes());
        for tag in &self.tags {
            hasher.update(&[u8::from(*tag == CellTag::Wall)]);
        }
        for cell in [self.start, self.exit].iter().chain(self.targets.iter()) {
            hasher.update(&(cell.row as u64).to_le_bytes());
            hasher.update(&(cell.col as u64).to_le_bytes());
        }
        InstanceId::from_bytes(hasher.finalize().as_bytes())
    }
}

impl fmt::Display for GridInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.tags.chunks(self.width).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for tag in line {
                write!(f, "{}", tag.glyph())?;
            }
        }
        Ok(())
    }
}

/// Serialized form of a [`GridInstance`]; deserializing goes back through
/// [`GridInstance::new`] so a loaded grid is validated like a built one.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridRecord {
    width: usize,
    height: usize,
    rows: Vec<String>,
    start: Cell,
    exit: Cell,
    targets: Vec<Cell>,
}

impl From<GridInstance> for GridRecord {
    fn from(grid: GridInstance) -> Self {
        GridRecord {
            width: grid.width,
            height: grid.height,
            rows: grid.to_string().lines().map(str::to_owned).collect(),
            start: grid.start,
            exit: grid.exit,
            targets: grid.targets.into_iter().collect(),
        }
    }
}

impl TryFrom<GridRecord> for GridInstance {
    type Error = CoreError;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        if record.rows.len() != record.height {
            return Err(CoreError::MalformedGrid {
                reason: format!(
                    "expected {} rows, got {}",
                    record.height,
                    record.rows.len()
                ),
            });
        }
        for (row, line) in record.rows.iter().enumerate() {
            let cells = line.chars().count();
            if cells != record.width {
                return Err(CoreError::MalformedGrid {
                    reason: format!("row {row} has {cells} cells, expected {}", record.width),
                });
            }
        }

        let walls = record
            .rows
            .iter()
            .flat_map(|row| row.chars().map(|glyph| glyph == '#'))
            .collect();
        GridInstance::new(
            record.width,
            record.height,
            walls,
            record.start,
            record.exit,
            record.targets,
        )
    }
}
