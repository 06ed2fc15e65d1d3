//! The toroidal cell grid and its text form.

use life_core::{Error, Position, Result};
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Glyph printed for a live cell (U+1F7E9)
pub const ALIVE_GLYPH: &str = "\u{1F7E9}";
/// Glyph printed for a dead cell (U+1F7EB)
pub const DEAD_GLYPH: &str = "\u{1F7EB}";

/// A 2D toroidal grid of alive/dead cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl World {
    /// Create an all-dead world. Both dimensions must be at least 1.
    pub fn new(height: i32, width: i32) -> Result<Self> {
        if height < 1 || width < 1 {
            return Err(Error::InvalidDimension {
                height: height.into(),
                width: width.into(),
            });
        }

        let (height, width) = (height as usize, width as usize);
        Ok(Self {
            height,
            width,
            cells: vec![false; height * width],
        })
    }

    /// Build a world from a row-major cell vector of exactly `height * width` entries.
    pub fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> Result<Self> {
        if height < 1 || width < 1 {
            return Err(Error::InvalidDimension {
                height: height as i64,
                width: width as i64,
            });
        }
        if cells.len() != height * width {
            return Err(Error::MalformedState(format!(
                "expected {} cells for a {}x{} grid, got {}",
                height * width,
                height,
                width,
                cells.len()
            )));
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> bool {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set cell at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, alive: bool) {
        let index = self.pos_to_index(pos);
        self.cells[index] = alive;
    }

    /// Rows top to bottom, each exactly `width` cells long
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterator over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    pub fn same_dimensions(&self, other: &World) -> bool {
        self.height == other.height && self.width == other.width
    }

    /// Seed roughly `percentage` percent of the grid.
    ///
    /// The first `percentage * height * width / 100` cells in row-major order are
    /// set alive, then `height * width` random pairwise swaps scatter them. The
    /// live count is therefore exact, while the layout is only roughly uniform.
    pub fn rand_init<R: Rng + ?Sized>(&mut self, percentage: u32, rng: &mut R) {
        let total = self.cells.len();
        let num_alive = percentage.min(100) as usize * total / 100;
        self.fill_alive(num_alive);

        for _ in 0..total {
            let left = self.rc_to_index(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
            let right = self.rc_to_index(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
            self.cells.swap(left, right);
        }

        debug!(
            height = self.height,
            width = self.width,
            percentage,
            num_alive,
            "World seeded"
        );
    }

    fn fill_alive(&mut self, num: usize) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = i < num;
        }
    }

    /// Serialize as one line of `0`/`1` per row, without a trailing newline
    pub fn to_state_string(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|&alive| if alive { '1' } else { '0' }));
        }
        out
    }

    /// Write the current state to `path`, replacing any existing file.
    pub fn save_state(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.to_state_string().as_bytes())?;
        writer.flush()?;

        debug!(path = %path.display(), height = self.height, width = self.width, "State saved");
        Ok(())
    }

    /// Read a world from a state file; dimensions are taken from the file.
    pub fn from_state_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::MalformedState(format!(
                "invalid character at byte {}",
                e.utf8_error().valid_up_to() + 1
            ))
        })?;
        let world: World = text.parse()?;

        debug!(path = %path.display(), height = world.height, width = world.width, "State loaded");
        Ok(world)
    }

    /// Replace this world with the state stored at `path`.
    ///
    /// Dimensions are taken from the file. On any error the world is left untouched.
    pub fn load_state(&mut self, path: impl AsRef<Path>) -> Result<()> {
        *self = World::from_state_file(path)?;
        Ok(())
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.width as i32, self.height as i32);
        self.rc_to_index(wrapped.y as usize, wrapped.x as usize)
    }

    fn rc_to_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index % self.width) as i32;
        let y = (index / self.width) as i32;
        Position::new(x, y)
    }
}

impl FromStr for World {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let width = match lines.first() {
            Some(first) => first.len(),
            None => return Err(Error::MalformedState("no rows found".to_string())),
        };

        let mut cells = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            if line.len() != width {
                return Err(Error::MalformedState(format!(
                    "row {} has length {}, expected {}",
                    row + 1,
                    line.len(),
                    width
                )));
            }
            for (col, byte) in line.bytes().enumerate() {
                match byte {
                    b'1' => cells.push(true),
                    b'0' => cells.push(false),
                    _ => {
                        return Err(Error::MalformedState(format!(
                            "invalid character at row {}, column {}",
                            row + 1,
                            col + 1
                        )))
                    }
                }
            }
        }

        World::from_cells(lines.len(), width, cells)
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &alive in row {
                f.write_str(if alive { ALIVE_GLYPH } else { DEAD_GLYPH })?;
            }
        }
        Ok(())
    }
}
