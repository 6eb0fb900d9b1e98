//! Matrix rain visual mode.
//!
//! `Stopped -> Running` on `cmatrix`, `Running -> Stopped` on Escape. Each
//! start bumps a generation number; the runtime tags ticker messages with
//! it so a tick from a stopped or replaced ticker is ignored.

use std::time::Duration;

use rand::Rng;

/// Redraw period of the rain.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Intensity removed from every cell per tick (the trailing fade).
pub const FADE_STEP: u8 = 14;

/// Chance per tick that a column below the viewport restarts at the top.
pub const RESET_PROBABILITY: f64 = 0.025;

/// Half-width katakana and digits, all single-cell wide.
pub const GLYPHS: &str = "ｦｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixState {
    #[default]
    Stopped,
    Running,
}

/// One character cell. `intensity == 0` means blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub intensity: u8,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: ' ',
        intensity: 0,
    };
}

/// Immutable copy of the drawing area for the render thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixFrame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl MatrixFrame {
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

#[derive(Debug, Default)]
pub struct MatrixRain {
    state: MatrixState,
    generation: u64,
    width: u16,
    height: u16,
    drops: Vec<u16>,
    cells: Vec<Cell>,
    frames: u64,
    glyphs: Vec<char>,
}

impl MatrixRain {
    pub fn new() -> Self {
        Self {
            glyphs: GLYPHS.chars().collect(),
            ..Self::default()
        }
    }

    pub fn state(&self) -> MatrixState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MatrixState::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of frames drawn since the last start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Start (or cleanly restart) the rain sized to the viewport.
    /// Returns the generation the ticker must carry.
    pub fn start(&mut self, width: u16, height: u16) -> u64 {
        self.generation += 1;
        self.state = MatrixState::Running;
        self.frames = 0;
        self.resize(width, height);
        self.generation
    }

    /// Stop the rain. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = MatrixState::Stopped;
        self.cells.clear();
        self.drops.clear();
        true
    }

    /// Resize the drawing area, restarting every column at the top.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.drops = vec![0; width as usize];
        self.cells = vec![Cell::BLANK; width as usize * height as usize];
    }

    /// Advance one frame if `generation` is the live one. Returns whether a
    /// frame was drawn.
    pub fn tick<R: Rng>(&mut self, generation: u64, rng: &mut R) -> bool {
        if !self.is_running() || generation != self.generation {
            return false;
        }
        self.advance(rng);
        true
    }

    fn advance<R: Rng>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            cell.intensity = cell.intensity.saturating_sub(FADE_STEP);
            if cell.intensity == 0 {
                *cell = Cell::BLANK;
            }
        }

        let width = self.width as usize;
        for (x, depth) in self.drops.iter_mut().enumerate() {
            if *depth < self.height {
                let glyph = self.glyphs[rng.gen_range(0..self.glyphs.len())];
                self.cells[*depth as usize * width + x] = Cell {
                    glyph,
                    intensity: u8::MAX,
                };
            }

            if *depth >= self.height && rng.gen_bool(RESET_PROBABILITY) {
                *depth = 0;
            } else {
                *depth = depth.saturating_add(1);
            }
        }
        self.frames += 1;
    }

    pub fn frame(&self) -> MatrixFrame {
        MatrixFrame {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
        }
    }
}
