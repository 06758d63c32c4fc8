//! Game orchestration: setup, drafting turns, round scoring and game end.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::board::{Board, FinalBonus};
use crate::config::GameConfig;
use crate::error::{AzulError, AzulResult};
use crate::supply::{Bag, CenterOfTheTable, Factory, Lid};
use crate::tiles::{Color, Tile};
use crate::wall::WallScore;
use crate::BOARD_SIZE;

// =============================================================================
// Players and moves
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct Player {
    name: String,
    is_first_player: bool,
    board: Board,
}

impl Player {
    pub fn new(name: impl Into<String>, palette: &[Color; BOARD_SIZE]) -> Self {
        Player {
            name: name.into(),
            is_first_player: false,
            board: Board::new(palette),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this player started the current round
    pub fn is_first_player(&self) -> bool {
        self.is_first_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> i32 {
        self.board.score()
    }
}

/// Where a turn takes its tiles from
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSource {
    Factory(usize),
    Center,
}

/// Where a turn puts the tiles it took
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    PatternLine(usize),
    Floor,
}

/// One drafting turn: take every `color` tile from `source`, put them on `destination`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub source: DrawSource,
    pub color: Color,
    pub destination: Destination,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Phase {
    Drafting,
    GameOver,
}

// =============================================================================
// Round and game results
// =============================================================================

/// What one player earned in a round-end scoring pass
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundScore {
    pub player: usize,
    pub placements: Vec<WallScore>,
    pub wall_points: i32,
    pub floor_penalty: i32,
    /// Running score after this round
    pub score: i32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum GameEnd {
    /// A player finished a horizontal row of their wall
    RowCompleted,
    /// The bag and the lid could not fill the factories for another round
    SupplyExhausted,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub player: usize,
    pub name: String,
    pub score: i32,
    pub completed_rows: usize,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameResult {
    pub reason: GameEnd,
    /// End-of-game bonus per seat
    pub bonuses: Vec<FinalBonus>,
    /// Best first; ties on score go to the player with more complete rows
    pub standings: Vec<Standing>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TurnOutcome {
    /// Drafting continues
    Continue { next_player: usize },
    /// The round was scored and the next one set up
    RoundOver {
        scores: Vec<RoundScore>,
        next_player: usize,
    },
    GameOver {
        scores: Vec<RoundScore>,
        result: GameResult,
    },
}

// =============================================================================
// Game
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    factories: Vec<Factory>,
    center: CenterOfTheTable,
    bag: Bag,
    lid: Lid,
    #[serde(skip)]
    rng: StdRng,
    current_player: usize,
    /// Seat that took the first-player marker this round
    next_first_player: Option<usize>,
    phase: Phase,
    /// 1-based number of the round being played
    round: u32,
    result: Option<GameResult>,
}

impl Game {
    /// Start a game; seat 0 goes first. `seed` drives every bag draw.
    pub fn new<S: Into<String>>(
        config: GameConfig,
        names: impl IntoIterator<Item = S>,
        seed: u64,
    ) -> AzulResult<Self> {
        Self::with_rng(config, names, 0, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<S: Into<String>>(
        config: GameConfig,
        names: impl IntoIterator<Item = S>,
        starting_player: usize,
        rng: StdRng,
    ) -> AzulResult<Self> {
        config.validate()?;
        let palette = config.wall_palette()?;

        let players: Vec<Player> = names
            .into_iter()
            .map(|name| Player::new(name, &palette))
            .collect();
        let num_factories = config.factories_for(players.len())?;
        if starting_player >= players.len() {
            return Err(AzulError::invalid_config(format!(
                "starting player {starting_player} is not seated"
            )));
        }
        let total_tiles = config.total_tiles()?;
        if config.tiles_per_round(players.len())? > total_tiles {
            return Err(AzulError::invalid_config(format!(
                "{total_tiles} tiles cannot fill {num_factories} factories of {}",
                config.tiles_per_factory
            )));
        }

        let bag = Bag::filled(&config.tile_colors, config.tiles_per_color);
        let mut game = Game {
            config,
            players,
            factories: vec![Factory::new(); num_factories],
            center: CenterOfTheTable::new(),
            bag,
            lid: Lid::default(),
            rng,
            current_player: starting_player,
            next_first_player: Some(starting_player),
            phase: Phase::Drafting,
            round: 0,
            result: None,
        };
        game.start_round()?;
        Ok(game)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    pub fn center(&self) -> &CenterOfTheTable {
        &self.center
    }

    pub fn bag_tile_count(&self) -> usize {
        self.bag.tile_count()
    }

    pub fn lid_tile_count(&self) -> usize {
        self.lid.tile_count()
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Final result, once the game is over
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Every factory is empty and the center has no colored tile left
    pub fn is_round_over(&self) -> bool {
        self.factories.iter().all(|f| !f.has_tiles()) && self.center.is_empty()
    }

    /// Every move the current player may make
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        let board = &self.players[self.current_player].board;

        let sources = self
            .factories
            .iter()
            .enumerate()
            .map(|(i, f)| (DrawSource::Factory(i), f.colors()))
            .chain(std::iter::once((DrawSource::Center, self.center.colors())));

        let mut moves = Vec::new();
        for (source, colors) in sources {
            for color in colors {
                for line in 0..BOARD_SIZE {
                    if board.check_placement(line, color).is_ok() {
                        moves.push(Move {
                            source,
                            color,
                            destination: Destination::PatternLine(line),
                        });
                    }
                }
                moves.push(Move {
                    source,
                    color,
                    destination: Destination::Floor,
                });
            }
        }
        moves
    }

    /// Seats ordered best first
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| Standing {
                player: seat,
                name: p.name.clone(),
                score: p.score(),
                completed_rows: p.board.wall().completed_rows(),
            })
            .collect();
        standings.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.completed_rows.cmp(&a.completed_rows))
                .then(a.player.cmp(&b.player))
        });
        standings
    }

    // -------------------------------------------------------------------------
    // Mutating surface
    // -------------------------------------------------------------------------

    /// Take every `color` tile from `source`.
    ///
    /// From a factory, the rest of its tiles slide to the center. From the
    /// center, the first-player marker comes along if it is still there.
    pub fn draw_tiles(&mut self, source: DrawSource, color: Color) -> AzulResult<Vec<Tile>> {
        self.ensure_drafting()?;
        let drawn = match source {
            DrawSource::Factory(index) => {
                let factory = self.factories.get_mut(index).ok_or_else(|| {
                    AzulError::invalid_action(format!("There is no factory #{index}"))
                })?;
                let drawn = factory.draw_all_tiles_by_color(color)?;
                self.center.add_tiles(factory.draw_all_tiles());
                drawn
            }
            DrawSource::Center => self.center.draw_all_tiles_by_color(color)?,
        };
        trace!(?source, %color, count = drawn.len(), "drew tiles");
        Ok(drawn)
    }

    /// Put drawn tiles on a player's board. Whoever receives the marker
    /// starts the next round.
    pub fn place_tiles(
        &mut self,
        seat: usize,
        destination: Destination,
        tiles: Vec<Tile>,
    ) -> AzulResult<()> {
        self.ensure_drafting()?;
        let player = self
            .players
            .get_mut(seat)
            .ok_or_else(|| AzulError::invalid_action(format!("There is no player #{seat}")))?;

        let took_marker = tiles.iter().any(|t| t.is_first_player_marker());
        let overflow = match destination {
            Destination::PatternLine(line) => player.board.place_tiles(line, tiles)?,
            Destination::Floor => player.board.place_on_floor(tiles),
        };
        if took_marker {
            self.next_first_player = Some(seat);
        }
        self.lid.discard(overflow);
        Ok(())
    }

    /// Play one turn for the current player.
    ///
    /// A rejected move leaves the game untouched. When the move empties the
    /// table the round is scored, and the next round is set up or the game ends.
    #[instrument(
        level = "debug",
        skip(self),
        fields(round = self.round, player = self.current_player)
    )]
    pub fn take_turn(&mut self, mv: Move) -> AzulResult<TurnOutcome> {
        self.ensure_drafting()?;
        let seat = self.current_player;

        // Validate the destination before any tile moves
        if let Destination::PatternLine(line) = mv.destination {
            self.players[seat].board.check_placement(line, mv.color)?;
        }
        let drawn = self.draw_tiles(mv.source, mv.color)?;
        self.place_tiles(seat, mv.destination, drawn)?;

        if !self.is_round_over() {
            self.current_player = (seat + 1) % self.players.len();
            return Ok(TurnOutcome::Continue {
                next_player: self.current_player,
            });
        }
        self.score_round()
    }

    /// Close a round once the table is empty.
    ///
    /// Every board is scored: completed pattern lines go to the wall, floors
    /// are charged and cleared, and removed tiles go to the lid. Then the game
    /// ends if a wall row is complete or the supply cannot deal another round;
    /// otherwise the next round is set up.
    #[instrument(level = "debug", skip(self), fields(round = self.round))]
    pub fn score_round(&mut self) -> AzulResult<TurnOutcome> {
        self.ensure_drafting()?;
        if !self.is_round_over() {
            return Err(AzulError::invalid_action(
                "The round is not over: tiles are still on the table",
            ));
        }

        let scores = self.score_boards();
        if self.players.iter().any(|p| has_complete_row(&p.board)) {
            let result = self.end_game(GameEnd::RowCompleted);
            return Ok(TurnOutcome::GameOver { scores, result });
        }
        match self.start_round() {
            Ok(()) => Ok(TurnOutcome::RoundOver {
                scores,
                next_player: self.current_player,
            }),
            Err(err) => {
                debug!(%err, "cannot set up another round");
                let result = self.end_game(GameEnd::SupplyExhausted);
                Ok(TurnOutcome::GameOver { scores, result })
            }
        }
    }

    fn score_boards(&mut self) -> Vec<RoundScore> {
        let mut scores = Vec::with_capacity(self.players.len());
        for (seat, player) in self.players.iter_mut().enumerate() {
            let lines = player.board.score_pattern_lines();
            let floor = player.board.score_floor();
            self.lid.discard(lines.discarded);
            self.lid.discard(floor.removed);

            debug!(
                player = seat,
                wall_points = lines.points,
                floor_penalty = floor.penalty,
                score = player.board.score(),
                "scored board"
            );
            scores.push(RoundScore {
                player: seat,
                placements: lines.placements,
                wall_points: lines.points,
                floor_penalty: floor.penalty,
                score: player.board.score(),
            });
        }
        scores
    }

    // -------------------------------------------------------------------------
    // Round lifecycle
    // -------------------------------------------------------------------------

    fn ensure_drafting(&self) -> AzulResult<()> {
        match self.phase {
            Phase::Drafting => Ok(()),
            Phase::GameOver => Err(AzulError::GameOver),
        }
    }

    /// Refill the factories, put the marker back in the center and hand the
    /// first turn to whoever took the marker last round.
    fn start_round(&mut self) -> AzulResult<()> {
        let leftovers = self.center.reset_with_marker();
        self.lid.discard(leftovers);
        self.refill_factories()?;

        if let Some(first) = self.next_first_player.take() {
            for (seat, player) in self.players.iter_mut().enumerate() {
                player.is_first_player = seat == first;
            }
        }
        self.current_player = self
            .players
            .iter()
            .position(|p| p.is_first_player)
            .unwrap_or(0);
        self.round += 1;

        debug!(
            round = self.round,
            first_player = self.current_player,
            bag = self.bag.tile_count(),
            lid = self.lid.tile_count(),
            "round started"
        );
        Ok(())
    }

    /// Fill every factory from the bag. An empty bag is topped up from the
    /// lid; running out of both is an error.
    fn refill_factories(&mut self) -> AzulResult<()> {
        for factory in &mut self.factories {
            self.lid.discard(factory.draw_all_tiles());
            for _ in 0..self.config.tiles_per_factory {
                if self.bag.is_empty() {
                    self.bag.refill_from(&mut self.lid);
                }
                let tile = self.bag.draw(&mut self.rng)?;
                factory.add_tile(tile);
            }
        }
        Ok(())
    }

    fn end_game(&mut self, reason: GameEnd) -> GameResult {
        let bonuses = self
            .players
            .iter_mut()
            .map(|p| p.board.apply_final_bonus())
            .collect();
        self.phase = Phase::GameOver;

        let result = GameResult {
            reason,
            bonuses,
            standings: self.standings(),
        };
        info!(
            ?reason,
            round = self.round,
            winner = %result.standings[0].name,
            score = result.standings[0].score,
            "game over"
        );
        self.result = Some(result.clone());
        result
    }

    /// Every colored tile of `color`, wherever it is. Constant for the whole game.
    pub fn count_tiles(&self, color: Color) -> usize {
        let on_boards: usize = self.players.iter().map(|p| p.board.count_of(color)).sum();
        let on_factories: usize = self.factories.iter().map(|f| f.count_of(color)).sum();
        on_boards
            + on_factories
            + self.center.count_of(color)
            + self.bag.count_of(color)
            + self.lid.count_of(color)
    }
}

fn has_complete_row(board: &Board) -> bool {
    (0..BOARD_SIZE).any(|row| board.wall().is_row_complete(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::ALL_COLORS;
    use rand::Rng;

    fn two_player_game(seed: u64) -> Game {
        Game::new(GameConfig::default(), ["Ada", "Grace"], seed).unwrap()
    }

    /// Replace the table with known contents. Tiles come from and go back
    /// to the bag, so the colored tile count is unchanged.
    fn set_table(game: &mut Game, factories: &[&[Color]], center: &[Color]) {
        for f in &mut game.factories {
            game.lid.discard(f.draw_all_tiles());
        }
        game.lid.discard(game.center.reset_with_marker());
        game.bag.refill_from(&mut game.lid);

        for (f, colors) in game.factories.iter_mut().zip(factories) {
            for &c in colors.iter() {
                f.add_tile(game.bag.take(c).unwrap());
            }
        }
        for &c in center {
            let tile = game.bag.take(c).unwrap();
            game.center.add_tiles([tile]);
        }
    }

    fn mv(source: DrawSource, color: Color, destination: Destination) -> Move {
        Move {
            source,
            color,
            destination,
        }
    }

    fn assert_tiles_conserved(game: &Game) {
        for color in ALL_COLORS {
            assert_eq!(
                game.count_tiles(color),
                game.config().tiles_per_color,
                "{color} tiles"
            );
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    #[test]
    fn test_new_game_two_players() {
        let game = two_player_game(42);
        assert_eq!(game.factories().len(), 5);
        for f in game.factories() {
            assert_eq!(f.tile_count(), 4);
        }
        assert_eq!(game.bag_tile_count(), 80);
        assert_eq!(game.center().tiles(), &[Tile::FirstPlayerMarker]);
        assert_eq!(game.current_player(), 0);
        assert!(game.players()[0].is_first_player());
        assert!(!game.players()[1].is_first_player());
        assert_eq!(game.round(), 1);
        assert_eq!(game.phase(), Phase::Drafting);
        assert_tiles_conserved(&game);
    }

    #[test]
    fn test_new_game_factory_counts() {
        for (names, factories) in [(vec!["a", "b", "c"], 7), (vec!["a", "b", "c", "d"], 9)] {
            let game = Game::new(GameConfig::default(), names, 1).unwrap();
            assert_eq!(game.factories().len(), factories);
            assert_eq!(game.bag_tile_count(), 100 - 4 * factories);
        }
    }

    #[test]
    fn test_new_game_rejects_player_counts() {
        assert!(matches!(
            Game::new(GameConfig::default(), ["solo"], 1),
            Err(AzulError::InvalidConfig(_))
        ));
        assert!(Game::new(GameConfig::default(), ["a", "b", "c", "d", "e"], 1).is_err());
    }

    #[test]
    fn test_new_game_rejects_tiny_bag() {
        let config = GameConfig {
            tiles_per_color: 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(config, ["a", "b"], 1),
            Err(AzulError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_same_seed_same_factories() {
        let a = two_player_game(9);
        let b = two_player_game(9);
        for (fa, fb) in a.factories().iter().zip(b.factories()) {
            assert_eq!(fa.tiles(), fb.tiles());
        }
    }

    #[test]
    fn test_starting_player_respected() {
        let game = Game::with_rng(
            GameConfig::default(),
            ["a", "b", "c"],
            2,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(game.current_player(), 2);
        assert!(game.players()[2].is_first_player());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    #[test]
    fn test_set_table_keeps_every_tile() {
        let mut game = two_player_game(9);
        set_table(
            &mut game,
            &[&[Color::Red, Color::Red], &[Color::Blue]],
            &[Color::White],
        );
        assert_eq!(game.factories()[0].tile_count(), 2);
        assert_eq!(game.center().tile_count(), 2);
        assert_eq!(game.lid_tile_count(), 0);
        assert_tiles_conserved(&game);
    }

    #[test]
    fn test_draw_from_factory_moves_leftovers_to_center() {
        let mut game = two_player_game(1);
        set_table(
            &mut game,
            &[&[Color::Red, Color::Blue, Color::Red, Color::White]],
            &[],
        );

        let drawn = game.draw_tiles(DrawSource::Factory(0), Color::Red).unwrap();
        assert_eq!(drawn, vec![Tile::Colored(Color::Red); 2]);
        assert!(!game.factories()[0].has_tiles());
        assert_eq!(game.center().count_of(Color::Blue), 1);
        assert_eq!(game.center().count_of(Color::White), 1);
        assert!(game.center().has_first_player_marker());
    }

    #[test]
    fn test_draw_errors_are_translated() {
        let mut game = two_player_game(1);
        set_table(&mut game, &[&[Color::Black, Color::Black, Color::Blue]], &[]);

        assert_eq!(
            game.draw_tiles(DrawSource::Factory(0), Color::Orange),
            Err(AzulError::InvalidAction(
                "There are no orange tiles on this factory".into()
            ))
        );
        assert_eq!(
            game.draw_tiles(DrawSource::Factory(1), Color::Orange),
            Err(AzulError::InvalidAction("This factory has no tiles".into()))
        );
        assert_eq!(
            game.draw_tiles(DrawSource::Factory(17), Color::Orange),
            Err(AzulError::InvalidAction("There is no factory #17".into()))
        );
        assert_eq!(game.factories()[0].tile_count(), 3);
    }

    #[test]
    fn test_draw_from_center_takes_marker() {
        let mut game = two_player_game(1);
        set_table(&mut game, &[], &[Color::White, Color::Red, Color::White]);

        let drawn = game.draw_tiles(DrawSource::Center, Color::White).unwrap();
        assert_eq!(drawn.len(), 3);
        assert!(drawn.contains(&Tile::FirstPlayerMarker));
        assert_eq!(game.center().tiles(), &[Tile::Colored(Color::Red)]);
    }

    // =========================================================================
    // Turns
    // =========================================================================

    #[test]
    fn test_turn_advances_seating_order() {
        let mut game = two_player_game(3);
        let first = game.legal_moves()[0];
        let outcome = game.take_turn(first).unwrap();
        assert_eq!(outcome, TurnOutcome::Continue { next_player: 1 });
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_rejected_turn_changes_nothing() {
        let mut game = two_player_game(3);
        set_table(
            &mut game,
            &[&[Color::Red, Color::Red], &[Color::Blue], &[Color::White]],
            &[],
        );
        game.take_turn(mv(DrawSource::Factory(1), Color::Blue, Destination::PatternLine(0)))
            .unwrap();
        game.take_turn(mv(DrawSource::Factory(0), Color::Red, Destination::Floor))
            .unwrap();

        // Seat 0 has a full line 0; nothing may move
        set_table(&mut game, &[&[Color::Blue, Color::Red]], &[]);
        let err = game
            .take_turn(mv(DrawSource::Factory(0), Color::Blue, Destination::PatternLine(0)))
            .unwrap_err();
        assert!(matches!(err, AzulError::InvalidAction(_)));
        assert_eq!(game.factories()[0].tile_count(), 2);
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn test_marker_goes_to_floor_and_sets_next_first_player() {
        let mut game = two_player_game(4);
        set_table(
            &mut game,
            &[&[Color::Orange, Color::Blue]],
            &[Color::White],
        );

        // Seat 0 takes orange from the factory; blue slides to the center
        game.take_turn(mv(DrawSource::Factory(0), Color::Orange, Destination::PatternLine(0)))
            .unwrap();
        // Seat 1 takes white from the center along with the marker
        game.take_turn(mv(DrawSource::Center, Color::White, Destination::PatternLine(1)))
            .unwrap();
        assert!(game.players()[1].board().floor().has_first_player_marker());
        assert_eq!(game.players()[1].board().floor().len(), 1);

        // Seat 0 clears the table, ending the round
        let outcome = game
            .take_turn(mv(DrawSource::Center, Color::Blue, Destination::PatternLine(2)))
            .unwrap();
        let TurnOutcome::RoundOver {
            scores,
            next_player,
        } = outcome
        else {
            panic!("expected the round to end, got {outcome:?}");
        };
        assert_eq!(next_player, 1);
        assert_eq!(game.current_player(), 1);
        assert!(game.players()[1].is_first_player());
        assert!(!game.players()[0].is_first_player());

        // Seat 0 completed line 0; seat 1's marker sat in the free first floor slot
        assert_eq!(scores[0].wall_points, 1);
        assert_eq!(scores[1].floor_penalty, 0);
        assert_eq!(game.players()[1].score(), 0);
        assert_tiles_conserved(&game);
        assert_eq!(game.round(), 2);
        assert_eq!(game.center().tiles(), &[Tile::FirstPlayerMarker]);
        for f in game.factories() {
            assert_eq!(f.tile_count(), 4);
        }
    }

    #[test]
    fn test_round_scoring_discards_to_lid() {
        let mut game = two_player_game(8);
        set_table(&mut game, &[&[Color::Red, Color::Red, Color::Red]], &[]);

        let outcome = game
            .take_turn(mv(DrawSource::Factory(0), Color::Red, Destination::PatternLine(1)))
            .unwrap();
        assert!(matches!(outcome, TurnOutcome::RoundOver { .. }));
        assert_eq!(game.round(), 2);
        // One tile to the wall; the spare from the line and the floor tile go to the lid
        assert_eq!(game.players()[0].board().wall().tile_count(), 1);
        assert_eq!(game.lid_tile_count(), 2);
        assert_tiles_conserved(&game);
    }

    #[test]
    fn test_score_round_deals_the_next_round() {
        let mut game = two_player_game(21);
        set_table(&mut game, &[&[Color::Blue, Color::Blue]], &[Color::Red]);
        assert!(matches!(
            game.score_round(),
            Err(AzulError::InvalidAction(_))
        ));

        // Draft with the primitive calls only
        let drawn = game.draw_tiles(DrawSource::Factory(0), Color::Blue).unwrap();
        game.place_tiles(0, Destination::PatternLine(1), drawn).unwrap();
        let drawn = game.draw_tiles(DrawSource::Center, Color::Red).unwrap();
        game.place_tiles(1, Destination::PatternLine(0), drawn).unwrap();
        assert!(game.is_round_over());

        let TurnOutcome::RoundOver { scores, next_player } = game.score_round().unwrap() else {
            panic!("expected the next round to be dealt");
        };
        assert_eq!(next_player, 1);
        assert_eq!(scores[0].wall_points, 1);
        assert_eq!(scores[1].wall_points, 1);
        assert_eq!(game.round(), 2);
        assert_eq!(game.phase(), Phase::Drafting);
        assert!(game.factories().iter().all(|f| f.tile_count() == 4));
        assert!(!game.legal_moves().is_empty());
        assert_eq!(game.lid_tile_count(), 1);
        assert_tiles_conserved(&game);
    }

    #[test]
    fn test_place_tiles_for_any_seat() {
        let mut game = two_player_game(2);
        let tiles = vec![Tile::Colored(Color::Black); 3];
        game.place_tiles(1, Destination::PatternLine(2), tiles)
            .unwrap();
        assert_eq!(game.players()[1].board().pattern_lines()[2].count(), 3);
        assert!(game
            .place_tiles(5, Destination::Floor, vec![Tile::Colored(Color::Red)])
            .is_err());
    }

    #[test]
    fn test_floor_overflow_goes_to_lid() {
        let mut game = two_player_game(2);
        let before = game.lid_tile_count();
        game.place_tiles(0, Destination::Floor, vec![Tile::Colored(Color::Red); 9])
            .unwrap();
        assert_eq!(game.players()[0].board().floor().len(), 7);
        assert_eq!(game.lid_tile_count(), before + 2);
    }

    #[test]
    fn test_legal_moves_respect_the_wall() {
        let mut game = two_player_game(6);
        set_table(&mut game, &[&[Color::Orange]], &[]);
        game.players[0]
            .board
            .place_tiles(0, vec![Tile::Colored(Color::Orange)])
            .unwrap();
        game.players[0].board.score_pattern_lines();

        let moves = game.legal_moves();
        assert!(moves.iter().all(|m| m.color == Color::Orange));
        assert!(!moves.contains(&mv(
            DrawSource::Factory(0),
            Color::Orange,
            Destination::PatternLine(0)
        )));
        // Lines 1..=4 plus the floor
        assert_eq!(moves.len(), 5);
    }

    // =========================================================================
    // Full games
    // =========================================================================

    fn play_random_game(game: &mut Game, rng: &mut StdRng) -> GameResult {
        for _ in 0..5000 {
            assert_tiles_conserved(game);
            let moves = game.legal_moves();
            assert!(!moves.is_empty(), "drafting with no legal move");
            let choice = moves[rng.random_range(0..moves.len())];
            if let TurnOutcome::GameOver { result, .. } = game.take_turn(choice).unwrap() {
                return result;
            }
        }
        panic!("game did not finish");
    }

    #[test]
    fn test_random_games_finish() {
        let mut rng = StdRng::seed_from_u64(2024);
        for seed in 0..10 {
            let mut game = two_player_game(seed);
            let result = play_random_game(&mut game, &mut rng);

            assert!(game.is_over());
            assert_eq!(game.result(), Some(&result));
            assert!(game.legal_moves().is_empty());
            assert_eq!(result.standings.len(), 2);
            assert!(result.standings[0].score >= result.standings[1].score);
            assert_eq!(
                game.take_turn(mv(DrawSource::Center, Color::Red, Destination::Floor)),
                Err(AzulError::GameOver)
            );
            assert_eq!(game.score_round(), Err(AzulError::GameOver));
        }
    }

    #[test]
    fn test_game_ends_when_a_row_is_complete() {
        let mut game = two_player_game(11);
        // Four tiles of row 0 already on seat 0's wall
        for color in [Color::Orange, Color::Blue, Color::White, Color::Black] {
            game.players[0]
                .board
                .place_tiles(0, vec![Tile::Colored(color)])
                .unwrap();
            game.players[0].board.score_pattern_lines();
        }
        let before = game.players()[0].score();

        set_table(&mut game, &[&[Color::Red]], &[]);
        let outcome = game
            .take_turn(mv(DrawSource::Factory(0), Color::Red, Destination::PatternLine(0)))
            .unwrap();
        let TurnOutcome::GameOver { scores, result } = outcome else {
            panic!("expected game over, got {outcome:?}");
        };
        assert_eq!(result.reason, GameEnd::RowCompleted);
        assert_eq!(scores[0].wall_points, 5);
        assert_eq!(result.bonuses[0].rows, 1);
        assert_eq!(game.players()[0].score(), before + 5 + 2);
        assert_eq!(result.standings[0].player, 0);
    }

    #[test]
    fn test_supply_exhaustion_ends_the_game() {
        let config = GameConfig {
            tiles_per_color: 4,
            ..GameConfig::default()
        };
        let mut game = Game::new(config, ["a", "b"], 13).unwrap();
        assert_eq!(game.bag_tile_count(), 0);

        // Wall tiles never return, so the second round cannot be dealt
        let mut rng = StdRng::seed_from_u64(13);
        let result = play_random_game(&mut game, &mut rng);
        assert_eq!(result.reason, GameEnd::SupplyExhausted);
        assert_eq!(game.round(), 1);
        assert_tiles_conserved(&game);
    }

    #[test]
    fn test_standings_break_ties_on_rows() {
        let mut game = two_player_game(1);
        // Seat 1: a full top row, 1+2+3+4+5
        for color in ALL_COLORS {
            game.players[1]
                .board
                .place_tiles(0, vec![Tile::Colored(color)])
                .unwrap();
            game.players[1].board.score_pattern_lines();
        }
        // Seat 0: a full first column in one scoring pass, same points
        let column = [Color::Orange, Color::Red, Color::Black, Color::White, Color::Blue];
        for (line, color) in column.into_iter().enumerate() {
            game.players[0]
                .board
                .place_tiles(line, vec![Tile::Colored(color); line + 1])
                .unwrap();
        }
        game.players[0].board.score_pattern_lines();
        assert_eq!(game.players()[0].score(), 15);
        assert_eq!(game.players()[1].score(), 15);

        let standings = game.standings();
        assert_eq!(standings[0].player, 1);
        assert_eq!(standings[0].completed_rows, 1);
        assert_eq!(standings[1].completed_rows, 0);
    }
}
