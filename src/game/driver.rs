//! Driving automated seats.
//!
//! The session never decides for anyone on its own. The driver walks the
//! open stage, asks the strategy for every automated seat that still owes a
//! decision, and passes for human seats that have nothing to mark. It stops
//! as soon as a human has a real choice to make.

use smallvec::SmallVec;

use crate::ai::{decide, PlayerView};
use crate::core::{Difficulty, GameError, GameEvent, PlayerId, PlayerKind, Stage, TurnState};
use crate::rules::GameResult;

use super::session::GameSession;

impl GameSession {
    /// Play automated decisions until a human must act or the game ends.
    ///
    /// Returns the number of actions taken.
    pub fn advance_automated(&mut self) -> Result<usize, GameError> {
        let mut actions = 0;
        loop {
            let taken = match self.state() {
                TurnState::AwaitingRoll => match self.player_kind(self.rolling_player()) {
                    PlayerKind::Automated(_) => {
                        self.roll()?;
                        1
                    }
                    PlayerKind::Human => 0,
                },
                TurnState::Stage1Moves => self.run_stage1()?,
                TurnState::Stage2Moves => self.run_stage2()?,
                TurnState::DiceRolled | TurnState::GameOver => 0,
            };
            if taken == 0 {
                return Ok(actions);
            }
            actions += taken;
        }
    }

    /// Drive a game to the end, giving up after `max_turns` turns.
    ///
    /// `None` if the turn limit was hit or a human seat has to act.
    pub fn play_to_end(&mut self, max_turns: u32) -> Result<Option<GameResult>, GameError> {
        let last_turn = self.turn().saturating_add(max_turns);
        while !self.is_over() && self.turn() < last_turn {
            if self.advance_automated()? == 0 {
                break;
            }
        }
        Ok(self.result().cloned())
    }

    fn player_kind(&self, player: PlayerId) -> PlayerKind {
        self.players[player].kind
    }

    fn run_stage1(&mut self) -> Result<usize, GameError> {
        let pending: SmallVec<[PlayerId; 5]> = self
            .players
            .player_ids()
            .filter(|&id| self.is_pending(id))
            .collect();

        let mut actions = 0;
        for player in pending {
            if self.state() != TurnState::Stage1Moves {
                break;
            }
            actions += self.step(player, Stage::WhiteSum)?;
        }
        Ok(actions)
    }

    fn run_stage2(&mut self) -> Result<usize, GameError> {
        self.step(self.rolling_player(), Stage::ColoredCombination)
    }

    /// One decision for `player`. Humans only ever get an automatic pass.
    fn step(&mut self, player: PlayerId, stage: Stage) -> Result<usize, GameError> {
        match self.player_kind(player) {
            PlayerKind::Automated(difficulty) => {
                self.automated_turn(player, difficulty, stage)?;
                Ok(1)
            }
            PlayerKind::Human => {
                if self.legal_moves(player)?.is_empty() {
                    self.player_done(player)?;
                    Ok(1)
                } else {
                    Ok(0)
                }
            }
        }
    }

    fn automated_turn(&mut self, player: PlayerId, difficulty: Difficulty, stage: Stage) -> Result<(), GameError> {
        let moves = self.legal_moves(player)?;
        let is_rolling = player == self.rolling_player();
        let locked = self.locked_colors();

        let decision = {
            let view = PlayerView {
                sheet: &self.players[player].sheet,
                opponents: self
                    .players
                    .iter()
                    .filter(|(id, _)| *id != player)
                    .map(|(_, p)| &p.sheet)
                    .collect(),
                locked,
                is_rolling,
            };
            decide(&view, &moves, difficulty, stage, &self.config.ai, &mut self.ai_rng)
        };

        self.record_event(GameEvent::AutomatedDecision {
            player,
            stage,
            choice: decision.choice,
            best_score: decision.best_score,
        });

        match decision.choice {
            Some(mv) => self.mark(player, mv.color, mv.number).map(drop),
            None => self.player_done(player),
        }
    }
}
