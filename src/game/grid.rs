use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{GameError, GameResult},
    models::{Direction, Grid, Placement, Placements, Position},
    utils::letters::random_letter,
};

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Random start cells tried per word before giving up on it
    pub placement_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Result of trying to fit one word onto the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(Placement),
    NotPlaced { word: String },
}

/// Output of a full generation pass.
#[derive(Debug, Clone)]
pub struct GeneratedGrid {
    pub grid: Grid,
    pub placements: Placements,
    /// Words that exhausted the attempt budget, in input order
    pub unplaced: Vec<String>,
}

/// Partially built grid. Cells are `None` until a word or a noise letter lands on them.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Board {
    pub fn new(size: usize) -> GameResult<Self> {
        if size < 2 {
            return Err(GameError::InvalidGridSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Cells `word` would occupy from `start` along `direction`, provided the
    /// whole extent is on the board and every one of those cells is still empty.
    /// An empty word occupies nothing and never fits.
    fn free_path(&self, word: &str, start: Position, direction: Direction) -> Option<Vec<Position>> {
        let len = word.chars().count();
        if len == 0 || len > self.size {
            return None;
        }

        let mut cells = Vec::with_capacity(len);
        let mut pos = start;

        for i in 0..len {
            if i > 0 {
                pos = pos.step(direction)?;
            }
            if pos.row >= self.size || pos.col >= self.size {
                return None;
            }
            if self.cells[self.index(pos)].is_some() {
                return None;
            }
            cells.push(pos);
        }

        Some(cells)
    }

    /// Write `word` at an exact start and direction. Returns `None` without
    /// touching the board if it would run off the edge or cross another word.
    pub fn place_at(&mut self, word: &str, start: Position, direction: Direction) -> Option<Placement> {
        let cells = self.free_path(word, start, direction)?;
        for (pos, letter) in cells.iter().zip(word.chars()) {
            let idx = self.index(*pos);
            self.cells[idx] = Some(letter);
        }
        Some(Placement {
            word: word.to_string(),
            direction,
            cells,
        })
    }

    /// Fill every empty cell with a random letter and freeze the board.
    pub fn fill<R: Rng + ?Sized>(self, rng: &mut R) -> Grid {
        let mut cells = Vec::with_capacity(self.cells.len());
        for cell in self.cells {
            cells.push(match cell {
                Some(letter) => letter,
                None => random_letter(rng),
            });
        }
        Grid::from_cells(self.size, cells)
    }
}

pub struct GridGenerator {
    config: GeneratorConfig,
}

impl GridGenerator {
    pub fn new(config: GeneratorConfig) -> GameResult<Self> {
        if config.size < 2 {
            return Err(GameError::InvalidGridSize(config.size));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> GeneratorConfig {
        self.config
    }

    /// Generate a grid with `words` hidden in it, placed in input order.
    /// Words that cannot be placed are reported in `unplaced` rather than failing the grid.
    pub fn generate<R: Rng + ?Sized>(&self, words: &[String], rng: &mut R) -> GeneratedGrid {
        let mut board = Board {
            size: self.config.size,
            cells: vec![None; self.config.size * self.config.size],
        };
        let mut placements = Placements::new();
        let mut unplaced = Vec::new();

        for word in words {
            match self.place_word(&mut board, word, rng) {
                PlacementOutcome::Placed(placement) => {
                    tracing::debug!(
                        "Placed {} at ({}, {}) heading ({}, {})",
                        word,
                        placement.start().row,
                        placement.start().col,
                        placement.direction.d_row,
                        placement.direction.d_col
                    );
                    placements.insert(word.clone(), placement);
                }
                PlacementOutcome::NotPlaced { word } => {
                    tracing::debug!(
                        "Could not place {} after {} attempts",
                        word,
                        self.config.placement_attempts
                    );
                    unplaced.push(word);
                }
            }
        }

        GeneratedGrid {
            grid: board.fill(rng),
            placements,
            unplaced,
        }
    }

    /// Bounded retry: each attempt picks a random start cell and tries all
    /// eight directions in shuffled order. The first fit wins.
    pub fn place_word<R: Rng + ?Sized>(&self, board: &mut Board, word: &str, rng: &mut R) -> PlacementOutcome {
        let len = word.chars().count();
        if len == 0 || len > board.size {
            return PlacementOutcome::NotPlaced {
                word: word.to_string(),
            };
        }

        let mut directions = Direction::ALL;

        for _ in 0..self.config.placement_attempts {
            let start = Position::new(
                rng.random_range(0..board.size),
                rng.random_range(0..board.size),
            );
            directions.shuffle(rng);

            for direction in directions {
                if let Some(placement) = board.place_at(word, start, direction) {
                    return PlacementOutcome::Placed(placement);
                }
            }
        }

        PlacementOutcome::NotPlaced {
            word: word.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn read_back(grid: &Grid, placement: &Placement) -> String {
        grid.letters_at(&placement.cells).unwrap()
    }

    #[test]
    fn test_grid_generation() {
        let generator = GridGenerator::new(GeneratorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let generated = generator.generate(&words(&["LION", "TIGER", "BEAR"]), &mut rng);

        assert_eq!(generated.grid.size(), 10);
        assert!(generated
            .grid
            .rows()
            .iter()
            .all(|row| row.len() == 10 && row.chars().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_placed_words_read_back_exactly() {
        let generator = GridGenerator::new(GeneratorConfig::default()).unwrap();
        let list = words(&[
            "ELEPHANT", "GIRAFFE", "ZEBRA", "MONKEY", "KANGAROO", "PANDA", "KOALA", "OTTER",
            "RABBIT", "TURTLE",
        ]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let generated = generator.generate(&list, &mut rng);
            for (word, placement) in &generated.placements {
                assert_eq!(&read_back(&generated.grid, placement), word, "seed {seed}");
                assert_eq!(placement.cells.len(), word.len());
                for pair in placement.cells.windows(2) {
                    assert_eq!(pair[0].step(placement.direction), Some(pair[1]));
                }
            }
        }
    }

    #[test]
    fn test_placements_never_share_cells() {
        let generator = GridGenerator::new(GeneratorConfig {
            size: 6,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        })
        .unwrap();
        let list = words(&["APPLE", "MANGO", "GRAPE", "LEMON", "PEACH", "MELON", "KIWI", "PEAR"]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let generated = generator.generate(&list, &mut rng);
            let mut seen = std::collections::HashSet::new();
            for placement in generated.placements.values() {
                for cell in &placement.cells {
                    assert!(seen.insert(*cell), "Cell {cell:?} used twice (seed {seed})");
                }
            }
            assert_eq!(
                generated.placements.len() + generated.unplaced.len(),
                list.len(),
                "Every word is either placed or reported"
            );
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let generator = GridGenerator::new(GeneratorConfig::default()).unwrap();
        let list = words(&["RED", "BLUE", "GREEN"]);
        let a = generator.generate(&list, &mut StdRng::seed_from_u64(42));
        let b = generator.generate(&list, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.placements, b.placements);
    }

    #[test]
    fn test_word_that_cannot_fit_is_reported_not_placed() {
        let generator = GridGenerator::new(GeneratorConfig {
            size: 3,
            placement_attempts: 10,
        })
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let generated = generator.generate(&words(&["TOOLONG"]), &mut rng);
        assert!(generated.placements.is_empty());
        assert_eq!(generated.unplaced, vec!["TOOLONG"]);
    }

    #[test]
    fn test_zero_attempt_budget_places_nothing() {
        let generator = GridGenerator::new(GeneratorConfig {
            size: 5,
            placement_attempts: 0,
        })
        .unwrap();
        let mut board = Board::new(5).unwrap();
        let outcome = generator.place_word(&mut board, "CAT", &mut StdRng::seed_from_u64(0));
        assert_eq!(
            outcome,
            PlacementOutcome::NotPlaced {
                word: "CAT".to_string()
            }
        );
    }

    #[test]
    fn test_place_at_refuses_conflicts_and_edges() {
        let mut board = Board::new(4).unwrap();
        let cat = board
            .place_at("CAT", Position::new(0, 0), Direction::EAST)
            .expect("CAT fits along the top row");
        assert_eq!(cat.end(), Position::new(0, 2));

        // Crosses the A of CAT
        assert!(board.place_at("DOG", Position::new(0, 1), Direction::SOUTH).is_none());
        // Runs off the right edge
        assert!(board.place_at("DOG", Position::new(1, 2), Direction::EAST).is_none());
        // Runs off the top
        assert!(board.place_at("DOG", Position::new(1, 3), Direction::NORTH).is_none());

        let dog = board.place_at("DOG", Position::new(1, 0), Direction::SOUTH_EAST);
        assert!(dog.is_some());

        let grid = board.fill(&mut StdRng::seed_from_u64(9));
        assert_eq!(grid.rows()[0][..3].to_string(), "CAT");
        assert_eq!(grid.get(Position::new(3, 2)), Some('G'));
    }

    #[test]
    fn test_empty_word_is_never_placed() {
        let generator = GridGenerator::new(GeneratorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let generated = generator.generate(&words(&["", "OWL"]), &mut rng);
        assert!(!generated.placements.contains_key(""), "Empty word must not get a placement");
        assert_eq!(generated.unplaced, vec![""]);
        assert_eq!(generated.placements["OWL"].end(), generated.placements["OWL"].cells[2]);

        let mut board = Board::new(4).unwrap();
        assert!(board.place_at("", Position::new(0, 0), Direction::EAST).is_none());
    }

    #[test]
    fn test_place_at_counts_letters_not_bytes() {
        let mut board = Board::new(4).unwrap();
        // Four letters but five bytes
        let placement = board
            .place_at("ÉCRU", Position::new(0, 0), Direction::EAST)
            .expect("four letters fit a 4-wide row");
        assert_eq!(placement.cells.len(), 4);

        let grid = board.fill(&mut StdRng::seed_from_u64(2));
        assert_eq!(grid.letters_at(&placement.cells).as_deref(), Some("ÉCRU"));
    }

    #[test]
    fn test_invalid_grid_size() {
        assert!(GridGenerator::new(GeneratorConfig {
            size: 1,
            placement_attempts: 100
        })
        .is_err());
        assert!(Board::new(0).is_err());
    }
}
