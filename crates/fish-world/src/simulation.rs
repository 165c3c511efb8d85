//! Simulation engine: drives a match one tick at a time.

use crate::game::{Game, Placement, TurnReport};
use fish_core::{
    ControllerKind, Error, GameConfig, HexCoord, MatchId, Move, Phase, PlayerId, Result, Standing,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Decision logic for one player.
///
/// Controllers see a read-only snapshot and the shared match RNG; they never
/// mutate the game directly.
pub trait Controller {
    fn kind(&self) -> ControllerKind;

    /// Tile for the next penguin, `None` if there is nowhere to go
    fn choose_placement(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<HexCoord>;

    /// Slide for the current player, `None` if no move exists
    fn choose_move(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<Move>;
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TickEvent {
    Placed(Placement),
    Moved(TurnReport),
}

pub struct Simulation {
    game: Game,
    /// Indexed by `PlayerId`
    controllers: Vec<Box<dyn Controller>>,
    config: GameConfig,
    rng: ChaCha8Rng,
    match_id: MatchId,
    tick: u64,
    events: Vec<TickEvent>,
}

impl Simulation {
    /// `controllers[i]` plays for `config.players[i]`
    pub fn new(config: GameConfig, controllers: Vec<Box<dyn Controller>>) -> Result<Self> {
        config.validate()?;
        if controllers.len() != config.players.len() {
            return Err(Error::Validation(format!(
                "{} players configured but {} controllers supplied",
                config.players.len(),
                controllers.len()
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let match_id = MatchId::from_rng(&mut rng);
        let game = Game::new(&config, &mut rng)?;

        Ok(Self {
            game,
            controllers,
            config,
            rng,
            match_id,
            tick: 0,
            events: Vec::new(),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True once the game is over or the tick cap is reached
    pub fn is_finished(&self) -> bool {
        self.game.is_over() || self.tick >= self.config.max_ticks
    }

    /// Execute one tick: the player to act decides, the decision is applied
    pub fn step(&mut self) -> Result<TickEvent> {
        let (player, name) = match self.game.current_player() {
            Some(p) => (p.id, p.name.clone()),
            None => return Err(Error::InvalidState("Match is already over".to_string())),
        };

        let controller = self
            .controllers
            .get_mut(player.0 as usize)
            .ok_or_else(|| Error::NotFound(format!("No controller for {}", player)))?;

        let event = match self.game.phase() {
            Phase::Placing => {
                let coord = controller
                    .choose_placement(&self.game, &mut self.rng)
                    .ok_or_else(|| Error::InvalidState(format!("{} has nowhere to place", name)))?;
                TickEvent::Placed(self.game.place_penguin(coord)?)
            }
            Phase::Playing => {
                let mv = controller
                    .choose_move(&self.game, &mut self.rng)
                    .ok_or_else(|| Error::InvalidState(format!("{} has no move to make", name)))?;
                TickEvent::Moved(self.game.apply_move(mv)?)
            }
            Phase::GameOver => {
                return Err(Error::InvalidState("Match is already over".to_string()));
            }
        };

        self.tick += 1;
        debug!(tick = self.tick, player = %name, event = ?event, "Tick complete");
        self.events.push(event.clone());

        Ok(event)
    }

    /// Run the match to the end
    pub fn run(&mut self) -> Result<MatchResult> {
        self.run_with(|_, _| {})
    }

    /// Run the match, handing the game and each tick's event to `observer`
    #[instrument(skip(self, observer), fields(match_id = %self.match_id, seed = self.config.seed))]
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<MatchResult>
    where
        F: FnMut(&Game, &TickEvent),
    {
        info!(
            players = self.config.players.len(),
            tiles = self.game.board().tile_count(),
            fish = self.game.board().total_fish(),
            max_ticks = self.config.max_ticks,
            "Starting match"
        );

        while !self.is_finished() {
            let event = self.step()?;
            observer(&self.game, &event);
        }

        if !self.game.is_over() {
            warn!(
                tick = self.tick,
                max_ticks = self.config.max_ticks,
                "Tick limit reached before the game ended"
            );
        }

        self.emit_match_summary();

        Ok(self.result())
    }

    fn emit_match_summary(&self) {
        let standings = self.game.standings();
        let winners: Vec<&str> = self
            .game
            .winners()
            .into_iter()
            .filter_map(|id| self.game.player(id).map(|p| p.name.as_str()))
            .collect();

        info!(
            event = "match_summary",
            match_id = %self.match_id,
            ticks = self.tick,
            completed = self.game.is_over(),
            tiles_left = self.game.board().tile_count(),
            fish_left = self.game.board().total_fish(),
            winners = ?winners,
            "🏁 Match complete"
        );

        for standing in &standings {
            info!(
                event = "final_standing",
                rank = standing.rank,
                player = %standing.name,
                color = %standing.color,
                fish = standing.score.fish,
                tiles = standing.score.tiles,
                moves = standing.score.moves,
                "Final standing"
            );
        }
    }

    /// Snapshot of the match so far
    pub fn result(&self) -> MatchResult {
        MatchResult {
            match_id: self.match_id,
            seed: self.config.seed,
            ticks: self.tick,
            completed: self.game.is_over(),
            standings: self.game.standings(),
            winners: self.game.winners(),
            events: self.events.clone(),
        }
    }
}

/// Serializable outcome of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub seed: u64,
    pub ticks: u64,
    /// False when the tick cap stopped the match early
    pub completed: bool,
    pub standings: Vec<Standing>,
    pub winners: Vec<PlayerId>,
    pub events: Vec<TickEvent>,
}

impl MatchResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
