use crate::{BOARD_SIZE, Direction, FOOD_SIZE, GameState, Point, SNAKE_SIZE};

/// Board pixels per raster dot.
pub const PX_PER_DOT: f64 = 5.0;

/// Dots per side of the full board.
pub const RASTER_SIDE: i32 = (BOARD_SIZE / PX_PER_DOT) as i32;

/// Integer coordinate type for raster dots (not pixels)
pub type Coord = i32;

/// On/off dot grid that the Braille packer consumes.
#[derive(Debug, Clone)]
pub struct Raster2D {
    pub width: Coord,
    pub height: Coord,
    pub cells: Vec<bool>,
}

impl Raster2D {
    pub fn new(width: Coord, height: Coord) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            cells: vec![false; size],
        }
    }

    #[inline]
    fn idx(&self, x: Coord, y: Coord) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Out-of-range writes are dropped.
    pub fn set(&mut self, x: Coord, y: Coord, on: bool) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = on;
        }
    }

    /// Out-of-range reads are off.
    pub fn get(&self, x: Coord, y: Coord) -> bool {
        self.idx(x, y).is_some_and(|i| self.cells[i])
    }

    fn fill_square(&mut self, (x0, y0, x1, y1): (Coord, Coord, Coord, Coord), on: bool) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, on);
            }
        }
    }

    fn outline(&mut self, (x0, y0, x1, y1): (Coord, Coord, Coord, Coord)) {
        for x in x0..=x1 {
            self.set(x, y0, true);
            self.set(x, y1, true);
        }
        for y in y0..=y1 {
            self.set(x0, y, true);
            self.set(x1, y, true);
        }
    }
}

/// Print raster in simple ascii
impl std::fmt::Display for Raster2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.get(x, y) { '8' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        write!(f, "{}", rows.join("\n"))
    }
}

#[inline]
fn to_dot(px: f64) -> Coord {
    (px / PX_PER_DOT).floor() as Coord
}

/// Dot span of a `size`-pixel square centred on `p`.
fn square_around(p: Point, size: f64) -> (Coord, Coord, Coord, Coord) {
    let half = size / 2.0;
    (
        to_dot(p.x - half),
        to_dot(p.y - half),
        to_dot(p.x + half - 1.0),
        to_dot(p.y + half - 1.0),
    )
}

/// Board outline, snake body as filled squares, food as a hollow square.
/// The head is hollow too, with a nose dot pointing where it is heading.
pub fn rasterize_game(state: &GameState) -> Raster2D {
    let mut r = Raster2D::new(RASTER_SIDE, RASTER_SIDE);
    let edge = to_dot(state.board_size - 1.0);
    r.outline((0, 0, edge, edge));

    for p in state.snake.iter().skip(1) {
        r.fill_square(square_around(*p, SNAKE_SIZE), true);
    }
    if let Some(&head) = state.snake.front() {
        let span @ (x0, y0, x1, y1) = square_around(head, SNAKE_SIZE);
        r.fill_square(span, false);
        r.outline(span);

        // Heading right until the game starts.
        let (cx, cy) = (to_dot(head.x), to_dot(head.y));
        let (nx, ny) = match state.direction.unwrap_or(Direction::Right) {
            Direction::Up => (cx, y0 - 1),
            Direction::Down => (cx, y1 + 1),
            Direction::Left => (x0 - 1, cy),
            Direction::Right => (x1 + 1, cy),
        };
        r.set(nx, ny, true);
    }
    if state.is_initialized {
        r.outline(square_around(state.food.position, FOOD_SIZE));
    }
    r
}

/// Dot-to-bit mapping of one Braille cell, indexed `[row][column]`.
const BRAILLE_BITS: [[u32; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Print raster in braille, 2x4 dots per character. Partial cells at the
/// right or bottom edge are padded with off dots.
pub fn render_braille(raster: &Raster2D) -> String {
    let cols = (raster.width + 1) / 2;
    let rows = (raster.height + 3) / 4;

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let mut bits = 0;
                    for (dy, line) in BRAILLE_BITS.iter().enumerate() {
                        for (dx, bit) in line.iter().enumerate() {
                            if raster.get(col * 2 + dx as Coord, row * 4 + dy as Coord) {
                                bits |= bit;
                            }
                        }
                    }
                    char::from_u32(0x2800 + bits).unwrap_or(' ')
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
