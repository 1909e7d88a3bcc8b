pub mod game;

pub use game::{
    Direction, FoundRecord, Grid, Placement, Placements, Position, RoundSummary,
};
