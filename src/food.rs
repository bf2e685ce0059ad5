use std::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::{FOOD_CLEARANCE, FOOD_SIZE, Point};

/// Give up sampling after this many rejected candidates and use the centre.
pub const MAX_FOOD_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodType {
    Btc,
    Eth,
    Sonic,
    OneInch,
    Aarna,
}

/// Static spawn table entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSpec {
    pub kind: FoodType,
    pub score: u32,
    pub probability: f64,
}

/// Declared order is the order probability mass is accumulated in.
pub const FOOD_TABLE: [FoodSpec; 5] = [
    FoodSpec {
        kind: FoodType::Btc,
        score: 1,
        probability: 0.25,
    },
    FoodSpec {
        kind: FoodType::Eth,
        score: 1,
        probability: 0.25,
    },
    FoodSpec {
        kind: FoodType::Sonic,
        score: 1,
        probability: 0.2,
    },
    FoodSpec {
        kind: FoodType::OneInch,
        score: 1,
        probability: 0.2,
    },
    FoodSpec {
        kind: FoodType::Aarna,
        score: 10,
        probability: 0.1,
    },
];

impl FoodType {
    pub fn ticker(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Sonic => "SONIC",
            Self::OneInch => "1INCH",
            Self::Aarna => "AARNA",
        }
    }

    pub fn spec(self) -> FoodSpec {
        FOOD_TABLE
            .iter()
            .copied()
            .find(|s| s.kind == self)
            .unwrap_or(FOOD_TABLE[0])
    }

    /// Walk the table accumulating probability and take the first entry whose
    /// running total reaches `draw`. Falls back to the first entry.
    pub fn for_draw(draw: f64) -> FoodSpec {
        let mut cumulative = 0.0;
        FOOD_TABLE
            .iter()
            .copied()
            .find(|s| {
                cumulative += s.probability;
                draw <= cumulative
            })
            .unwrap_or(FOOD_TABLE[0])
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Point,
    pub kind: FoodType,
    pub score: u32,
}

impl Food {
    pub fn new(position: Point, spec: FoodSpec) -> Self {
        Self {
            position,
            kind: spec.kind,
            score: spec.score,
        }
    }

    /// Off-board stand-in used before the first real food is placed.
    pub fn placeholder() -> Self {
        Self::new(Point::new(-1.0, -1.0), FoodType::Btc.spec())
    }
}

/// Pick a type from the table and place it clear of the snake.
pub fn spawn_food<'a, R, I>(snake: I, board_size: f64, rng: &mut R) -> Food
where
    R: Rng,
    I: IntoIterator<Item = &'a Point>,
    I::IntoIter: Clone,
{
    let spec = FoodType::for_draw(rng.random::<f64>());
    let position = free_position(snake, board_size, rng);
    debug!(
        "spawned {} at ({}, {}) on board {}",
        spec.kind, position.x, position.y, board_size
    );
    Food::new(position, spec)
}

/// Reject-and-retry sampling inside the board, inset by half a food.
fn free_position<'a, R, I>(snake: I, board_size: f64, rng: &mut R) -> Point
where
    R: Rng,
    I: IntoIterator<Item = &'a Point>,
    I::IntoIter: Clone,
{
    let body = snake.into_iter();
    let span = (board_size - FOOD_SIZE).max(0.0);
    let mut sample = || (rng.random::<f64>() * span).floor() + FOOD_SIZE / 2.0;

    for _ in 0..MAX_FOOD_ATTEMPTS {
        let candidate = Point::new(sample(), sample());
        if body.clone().all(|s| s.distance(candidate) >= FOOD_CLEARANCE) {
            return candidate;
        }
    }

    let centre = board_size / 2.0;
    warn!("no free food position after {MAX_FOOD_ATTEMPTS} attempts, using board centre");
    Point::new(centre, centre)
}
