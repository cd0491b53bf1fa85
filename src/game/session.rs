//! The game session: one table, one game, every rule applied in order.
//!
//! All mutation goes through [`GameSession::roll`], [`GameSession::mark`]
//! and [`GameSession::player_done`] (or [`GameSession::apply_action`],
//! which dispatches to them). A rejected call returns an error and leaves
//! the session untouched.

use crate::core::{
    Action, Color, ConfigError, EventLog, GameConfig, GameError, GameEvent, GameRng, LockSet, Move,
    PenaltyReason, PlayerId, PlayerMap, RuleViolation, Stage, TurnState,
};
use crate::dice::{DiceResult, DiceRoller};
use crate::rules::{decide_result, game_over_reason, GameOverReason, GameResult, MoveList, StageContext};

use super::player::PlayerRecord;
use super::snapshot::{GameSnapshot, PlayerSnapshot};

/// What a successful mark did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkOutcome {
    pub stage: Stage,

    /// The mark locked its row.
    pub locked: bool,

    /// The mark ended the game.
    pub game_over: bool,
}

#[derive(Clone, Debug)]
pub struct GameSession {
    pub(super) config: GameConfig,
    pub(super) players: PlayerMap<PlayerRecord>,
    dice: DiceRoller,
    pub(super) ai_rng: GameRng,
    state: TurnState,
    rolling: PlayerId,
    dice_result: Option<DiceResult>,
    locked: LockSet,
    events: EventLog,
    message: String,
    over: Option<(GameOverReason, GameResult)>,
}

impl GameSession {
    /// Start a game with dice drawn from the config's seed.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        let dice = DiceRoller::seeded(rng.for_context("dice"));
        Self::with_dice(config, dice)
    }

    /// Start a game with an explicit dice source.
    pub fn with_dice(config: GameConfig, dice: DiceRoller) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut players = PlayerMap::from_vec(
            PlayerId::all(config.player_count())
                .zip(&config.players)
                .map(|(id, setup)| PlayerRecord::new(id, setup.name.clone(), setup.kind))
                .collect(),
        );
        let rolling = PlayerId(0);
        players[rolling].active = true;

        let mut events = EventLog::new();
        events.record(GameEvent::PlayersSetup {
            names: players.values().map(|p| p.name.clone()).collect(),
        });

        let ai_rng = GameRng::new(config.seed).for_context("ai");
        let message = format!("{}'s turn. Roll the dice.", players[rolling].name);

        Ok(Self {
            config,
            players,
            dice,
            ai_rng,
            state: TurnState::AwaitingRoll,
            rolling,
            dice_result: None,
            locked: LockSet::new(),
            events,
            message,
            over: None,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    #[must_use]
    pub fn rolling_player(&self) -> PlayerId {
        self.rolling
    }

    #[must_use]
    pub fn dice_result(&self) -> Option<DiceResult> {
        self.dice_result
    }

    #[must_use]
    pub fn locked_colors(&self) -> LockSet {
        self.locked
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.events.turn()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.over.as_ref().map(|(_, result)| result)
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.over.as_ref().map(|(reason, _)| *reason)
    }

    /// Current total per player, in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<(PlayerId, i32)> {
        self.players
            .iter()
            .map(|(id, p)| (id, p.sheet.total_score(self.config.scoring)))
            .collect()
    }

    /// Legal moves for `player` in the open stage. Empty outside a stage or
    /// once the player is done with it.
    pub fn legal_moves(&self, player: PlayerId) -> Result<MoveList, GameError> {
        let record = self.players.get(player).ok_or(GameError::UnknownPlayer(player))?;
        let (Some(stage), Some(dice)) = (self.state.open_stage(), self.dice_result.as_ref()) else {
            return Ok(MoveList::new());
        };
        if stage == Stage::WhiteSum && record.counters.is_stage1_done() {
            return Ok(MoveList::new());
        }
        let ctx = StageContext::new(dice, self.locked);
        Ok(ctx.legal_moves(stage, record, player == self.rolling))
    }

    /// Whether `player` still owes a decision in the open stage.
    #[must_use]
    pub fn is_pending(&self, player: PlayerId) -> bool {
        match self.state {
            TurnState::Stage1Moves => self
                .players
                .get(player)
                .is_some_and(|p| !p.counters.is_stage1_done()),
            TurnState::Stage2Moves => player == self.rolling,
            _ => false,
        }
    }

    /// The table as a presentation layer sees it.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            turn: self.turn(),
            rolling_player: self.rolling,
            dice: self.dice_result,
            locked_colors: self.locked.iter().collect(),
            players: self
                .players
                .values()
                .map(|p| PlayerSnapshot::new(p, self.config.scoring))
                .collect(),
            message: self.message.clone(),
            result: self.result().cloned(),
        }
    }

    // === Actions ===

    /// Roll all dice for the rolling player and open the first playable stage.
    pub fn roll(&mut self) -> Result<DiceResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.state != TurnState::AwaitingRoll {
            return Err(RuleViolation::NotAwaitingRoll(self.state).into());
        }

        let dice = self.dice.roll_all(self.locked);
        self.dice_result = Some(dice);
        self.state = TurnState::DiceRolled;
        self.events.record(GameEvent::DiceRolled {
            player: self.rolling,
            dice,
        });

        let ctx = StageContext::new(&dice, self.locked);
        let anyone_stage1 = self
            .players
            .values()
            .any(|p| ctx.has_move(Stage::WhiteSum, p, p.id == self.rolling));
        let rolling_stage2 = ctx.has_move(Stage::ColoredCombination, &self.players[self.rolling], true);

        if anyone_stage1 {
            self.open_stage(Stage::WhiteSum);
        } else if rolling_stage2 {
            self.open_stage(Stage::ColoredCombination);
        } else {
            self.end_turn(PenaltyReason::NoLegalMoves);
        }
        Ok(dice)
    }

    /// Mark `number` in `color` for `player` in the open stage.
    pub fn mark(&mut self, player: PlayerId, color: Color, number: u8) -> Result<MarkOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let record = self.players.get(player).ok_or(GameError::UnknownPlayer(player))?;
        let stage = self.state.open_stage().ok_or(RuleViolation::NoOpenStage(self.state))?;
        let dice = self.dice_result.ok_or(RuleViolation::NoOpenStage(self.state))?;

        if stage == Stage::WhiteSum && record.counters.is_stage1_done() {
            return Err(RuleViolation::AlreadyDone { player, stage }.into());
        }

        let is_rolling = player == self.rolling;
        StageContext::new(&dice, self.locked).check_move(stage, record, is_rolling, Move::new(color, number))?;

        let record = &mut self.players[player];
        record.sheet.mark(color, number);
        record.counters.record(stage);
        self.events.record(GameEvent::Marked {
            player,
            color,
            number,
            stage,
        });

        let locked = record.sheet.can_lock(color) && record.sheet.lock(color);
        if locked {
            self.locked.insert(color);
            self.events.record(GameEvent::RowLocked { player, color });
            self.message = format!("{} locked the {} row!", self.players[player].name, color);
        } else {
            self.message = format!("{} marked {} in the {} row.", self.players[player].name, number, color);
        }

        if self.check_game_over() {
            return Ok(MarkOutcome {
                stage,
                locked,
                game_over: true,
            });
        }

        match stage {
            Stage::WhiteSum => {
                self.events.record(GameEvent::PlayerDone { player, stage });
                if self.all_done_stage1() {
                    self.close_stage1();
                }
            }
            Stage::ColoredCombination => self.end_turn(PenaltyReason::NoMarks),
        }

        Ok(MarkOutcome {
            stage,
            locked,
            game_over: self.is_over(),
        })
    }

    /// Boolean facade over [`GameSession::mark`].
    pub fn try_mark(&mut self, player: PlayerId, color: Color, number: u8) -> bool {
        self.mark(player, color, number).is_ok()
    }

    /// `player` is finished with the open stage.
    ///
    /// A no-op for players who have nothing pending, and after the game
    /// has ended.
    pub fn player_done(&mut self, player: PlayerId) -> Result<(), GameError> {
        if !self.players.contains(player) {
            return Err(GameError::UnknownPlayer(player));
        }
        if !self.is_pending(player) {
            return Ok(());
        }

        match self.state {
            TurnState::Stage1Moves => {
                self.players[player].counters.finish_stage1();
                self.events.record(GameEvent::PlayerDone {
                    player,
                    stage: Stage::WhiteSum,
                });
                if self.all_done_stage1() {
                    self.close_stage1();
                }
            }
            TurnState::Stage2Moves => {
                self.events.record(GameEvent::PlayerDone {
                    player,
                    stage: Stage::ColoredCombination,
                });
                self.end_turn(PenaltyReason::NoMarks);
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply one action on behalf of `player`.
    pub fn apply_action(&mut self, player: PlayerId, action: &Action) -> Result<(), GameError> {
        match action {
            Action::Roll => {
                if !self.players.contains(player) {
                    return Err(GameError::UnknownPlayer(player));
                }
                if !self.is_over() && player != self.rolling {
                    return Err(RuleViolation::NotRollingPlayer(player).into());
                }
                self.roll().map(drop)
            }
            Action::Mark(mv) => self.mark(player, mv.color, mv.number).map(drop),
            Action::Done => self.player_done(player),
        }
    }

    // === Turn flow ===

    pub(super) fn record_event(&mut self, event: GameEvent) {
        self.events.record(event);
    }

    fn open_stage(&mut self, stage: Stage) {
        self.state = match stage {
            Stage::WhiteSum => TurnState::Stage1Moves,
            Stage::ColoredCombination => TurnState::Stage2Moves,
        };
        self.events.record(GameEvent::StageOpened(stage));
        self.message = match (stage, self.dice_result) {
            (Stage::WhiteSum, Some(dice)) => format!(
                "{stage}: all players may mark the white sum ({}).",
                dice.white_sum()
            ),
            _ => format!(
                "{stage}: {} may mark a white + colored sum.",
                self.players[self.rolling].name
            ),
        };
    }

    fn all_done_stage1(&self) -> bool {
        self.players.values().all(|p| p.counters.is_stage1_done())
    }

    fn close_stage1(&mut self) {
        let rolling = &self.players[self.rolling];
        let stage2 = rolling.counters.can_use_colored(true)
            && self.dice_result.as_ref().is_some_and(|dice| {
                StageContext::new(dice, self.locked).has_move(Stage::ColoredCombination, rolling, true)
            });

        if stage2 {
            self.open_stage(Stage::ColoredCombination);
        } else {
            self.end_turn(PenaltyReason::NoMarks);
        }
    }

    /// Penalize a rolling player without marks, then hand the dice on.
    fn end_turn(&mut self, reason: PenaltyReason) {
        let rolling = self.rolling;
        let mut note = None;
        if self.players[rolling].counters.marks() == 0 {
            let record = &mut self.players[rolling];
            record.sheet.add_penalty();
            let total = record.sheet.penalties();
            self.events.record(GameEvent::PenaltyApplied {
                player: rolling,
                reason,
                total,
            });
            let name = &self.players[rolling].name;
            note = Some(match reason {
                PenaltyReason::NoLegalMoves => format!("No legal moves for this roll. {name} takes a penalty."),
                PenaltyReason::NoMarks => format!("{name} made no mark and takes a penalty."),
            });
        }

        if self.check_game_over() {
            return;
        }
        self.rotate();
        if let Some(note) = note {
            self.message = format!("{note} {}", self.message);
        }
    }

    fn rotate(&mut self) {
        let from = self.rolling;
        let to = from.next(self.players.player_count());

        for (id, record) in self.players.iter_mut() {
            record.counters.reset();
            record.active = id == to;
        }
        self.rolling = to;
        self.dice_result = None;
        self.state = TurnState::AwaitingRoll;

        self.events.record(GameEvent::TurnChanged { from, to });
        self.events.advance_turn();
        self.message = format!("{}'s turn. Roll the dice.", self.players[to].name);
    }

    /// End the game if two colors are locked or a penalty box is full.
    fn check_game_over(&mut self) -> bool {
        let sheets = self.players.iter().map(|(id, p)| (id, &p.sheet));
        let Some(reason) = game_over_reason(self.locked, sheets) else {
            return false;
        };
        let Some(result) = decide_result(self.standings()) else {
            return false;
        };

        self.state = TurnState::GameOver;
        self.message = format!("Game Over! {} {}", self.reason_text(reason), self.result_text(&result));
        self.events.record(GameEvent::GameOver {
            reason,
            result: result.clone(),
        });
        self.over = Some((reason, result));
        true
    }

    fn reason_text(&self, reason: GameOverReason) -> String {
        match reason {
            GameOverReason::RowsLocked => "Two colors locked.".to_string(),
            GameOverReason::PenaltyLimit(id) => format!("{} has 4 penalties.", self.players[id].name),
        }
    }

    fn result_text(&self, result: &GameResult) -> String {
        let total = |id: PlayerId| self.players[id].sheet.total_score(self.config.scoring);
        match result {
            GameResult::Winner(id) => format!("{} wins with {} points!", self.players[*id].name, total(*id)),
            GameResult::Tie(ids) => {
                let names: Vec<&str> = ids.iter().map(|id| self.players[*id].name.as_str()).collect();
                let points = ids.first().map_or(0, |id| total(*id));
                format!("It's a tie between {} with {} points!", join_names(&names), points)
            }
        }
    }
}

/// "A", "A and B", "A, B and C".
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
