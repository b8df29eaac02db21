//! Стейт-машина раздачи.
//!
//! `HandState` меняется только через `apply`, которая забирает значение и
//! возвращает новое. Реплей с любого префикса – просто свёртка токенов.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{
    first_duplicate, Card, Chips, HandPhase, PlayerStatus, SeatIndex, SeatedPlayer, Street,
    TableConfig,
};
use crate::engine::actions::{Action, BoardReveal, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::{BettingRule, ReplayError};
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{
    big_blind_seat, button_seat, postflop_first_seat, preflop_first_seat, seats_from,
    small_blind_seat, Seating,
};
use crate::engine::pot::Pot;
use crate::engine::validation::{
    check_fold, check_reveal, classify_bet_or_raise, classify_check_or_call, require_actor,
    Commitment,
};

/// Полное состояние раздачи в точке наблюдения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandState {
    pub config: TableConfig,
    pub phase: HandPhase,
    pub players: Vec<SeatedPlayer>,
    pub board: Vec<Card>,
    pub betting: BettingState,
    pub pot: Pot,
    pub button: SeatIndex,
    pub history: HandHistory,
}

impl HandState {
    /// Посадить игроков, раздать карманные карты и поставить блайнды.
    ///
    /// `hole_cards` – по внешнему id игрока.
    pub fn start(
        config: TableConfig,
        seating: &Seating,
        hole_cards: &HashMap<String, [Card; 2]>,
    ) -> Result<Self, ReplayError> {
        if !config.is_valid() {
            return Err(ReplayError::InvalidTableConfig {
                small_blind: config.small_blind,
                big_blind: config.big_blind,
            });
        }
        if seating.len() < 2 {
            return Err(ReplayError::InsufficientPlayers {
                eligible: seating.len(),
            });
        }

        let mut players = Vec::with_capacity(seating.len());
        for seat in seating.seats.iter() {
            let cards = hole_cards
                .get(&seat.external_id)
                .ok_or_else(|| ReplayError::MissingHoleCards {
                    player: seat.external_id.clone(),
                })?;
            players.push(SeatedPlayer::new(
                seat.seat,
                seat.external_id.clone(),
                seat.display_name.clone(),
                seat.stack,
                *cards,
            ));
        }

        let dealt: Vec<Card> = players.iter().flat_map(|p| p.hole_cards).collect();
        if let Some(card) = first_duplicate(&dealt) {
            return Err(ReplayError::DuplicateCard {
                card,
                action_index: None,
            });
        }

        let n = players.len();
        let mut state = HandState {
            config,
            phase: HandPhase::Betting(Street::Preflop),
            players,
            board: Vec::new(),
            betting: BettingState::new(Street::Preflop, Chips::ZERO, config.big_blind, Vec::new()),
            pot: Pot::new(),
            button: button_seat(n),
            history: HandHistory::new(),
        };

        state.post_blinds();
        state.advance_phase();
        Ok(state)
    }

    /// Применить одно действие. `index`/`token` нужны только для ошибок и истории.
    pub fn apply(mut self, index: usize, token: &str, action: &Action) -> Result<Self, ReplayError> {
        match action {
            Action::Reveal(reveal) => {
                check_reveal(self.phase, &self.betting, reveal)
                    .map_err(|rule| violation(index, token, rule))?;
                self.reveal(index, reveal)?;
            }
            Action::Fold => {
                let seat = require_actor(self.phase, &self.betting)
                    .map_err(|rule| violation(index, token, rule))?;
                check_fold(self.player(seat), &self.betting)
                    .map_err(|rule| violation(index, token, rule))?;
                self.fold(index, seat);
            }
            Action::CheckOrCall => {
                let seat = require_actor(self.phase, &self.betting)
                    .map_err(|rule| violation(index, token, rule))?;
                let commitment = classify_check_or_call(self.player(seat), &self.betting);
                self.commit(index, seat, commitment);
            }
            Action::BetOrRaiseTo(amount) => {
                let seat = require_actor(self.phase, &self.betting)
                    .map_err(|rule| violation(index, token, rule))?;
                let opponents_can_act = self.players.iter().any(|p| p.seat != seat && p.can_act());
                let commitment =
                    classify_bet_or_raise(self.player(seat), &self.betting, *amount, opponents_can_act)
                        .map_err(|rule| violation(index, token, rule))?;
                self.commit(index, seat, commitment);
            }
        }

        self.advance_phase();
        Ok(self)
    }

    pub fn player(&self, seat: SeatIndex) -> &SeatedPlayer {
        &self.players[seat as usize]
    }

    /// Чей ход (None – улица закрыта или раздача окончена).
    pub fn current_actor(&self) -> Option<SeatIndex> {
        match self.phase {
            HandPhase::Betting(_) => self.betting.actor(),
            HandPhase::Showdown | HandPhase::UncontestedEnd { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Кто не сфолдил (по возрастанию seat).
    pub fn live_seats(&self) -> Vec<SeatIndex> {
        self.players
            .iter()
            .filter(|p| p.is_in_hand())
            .map(|p| p.seat)
            .collect()
    }

    /// Вклад каждого seat за раздачу (включая нулевые).
    pub fn contributions(&self) -> BTreeMap<SeatIndex, Chips> {
        self.players.iter().map(|p| (p.seat, p.committed)).collect()
    }

    /// Стеки + всё внесённое. Не меняется за всю раздачу.
    pub fn chip_total(&self) -> Chips {
        self.players.iter().map(|p| p.stack + p.committed).sum()
    }

    /// Все карты в игре: карманные + борд.
    pub fn dealt_cards(&self) -> Vec<Card> {
        self.players
            .iter()
            .flat_map(|p| p.hole_cards)
            .chain(self.board.iter().copied())
            .collect()
    }

    fn post_blinds(&mut self) {
        let sb_seat = small_blind_seat();
        let bb_seat = big_blind_seat();
        let n = self.players.len();

        let sb_paid = self.players[sb_seat as usize].commit(self.config.small_blind);
        let bb_paid = self.players[bb_seat as usize].commit(self.config.big_blind);
        self.pot.add(Street::Preflop, sb_paid);
        self.pot.add(Street::Preflop, bb_paid);

        // Кто первый ходит на префлопе: следующий после BB, BB ходит последним.
        let to_act = self.acting_seats_from(preflop_first_seat(n));

        self.betting = BettingState::new(
            Street::Preflop,
            sb_paid.max(bb_paid),
            self.config.big_blind,
            to_act,
        );
        self.betting.last_aggressor = Some(bb_seat);

        self.history.push(HandEventKind::BlindsPosted {
            button: self.button,
            small_blind: (sb_seat, sb_paid),
            big_blind: (bb_seat, bb_paid),
        });

        tracing::debug!(
            players = n,
            small_blind = %sb_paid,
            big_blind = %bb_paid,
            "posted blinds"
        );
    }

    fn fold(&mut self, index: usize, seat: SeatIndex) {
        let player = &mut self.players[seat as usize];
        player.status = PlayerStatus::Folded;
        let new_stack = player.stack;

        self.betting.mark_acted(seat);
        self.history.push(HandEventKind::PlayerActed {
            action_index: index,
            seat,
            action: PlayerActionKind::Fold,
            new_stack,
            pot_after: self.pot.total,
        });
    }

    fn commit(&mut self, index: usize, seat: SeatIndex, commitment: Commitment) {
        let bet_before = self.betting.current_bet;
        let street = self.betting.street;

        let player = &mut self.players[seat as usize];
        let (kind, raised_to) = match commitment {
            Commitment::Check => (PlayerActionKind::Check, None),
            Commitment::Call { owed } => {
                let paid = player.commit(owed);
                self.pot.add(street, paid);
                let all_in = player.status == PlayerStatus::AllIn;
                (PlayerActionKind::Call { paid, all_in }, None)
            }
            Commitment::Raise { to, full } => {
                let delta = to - player.street_bet;
                let paid = player.commit(delta);
                self.pot.add(street, paid);
                let all_in = player.status == PlayerStatus::AllIn;
                let to = player.street_bet;
                let kind = if bet_before.is_zero() {
                    PlayerActionKind::Bet { to, all_in }
                } else {
                    PlayerActionKind::RaiseTo {
                        to,
                        all_in,
                        reopens: full,
                    }
                };
                (kind, Some((to, full)))
            }
        };
        let new_stack = player.stack;

        match raised_to {
            Some((to, true)) => {
                let order = self.others_to_act_after(seat);
                self.betting.on_full_raise(seat, to, to - bet_before, order);
            }
            Some((to, false)) => {
                let order = self.others_to_act_after(seat);
                self.betting.on_short_all_in(seat, to, order);
            }
            None => {}
        }
        self.betting.mark_acted(seat);

        tracing::debug!(action_index = index, seat, action = ?kind, stack = %new_stack, "applied action");

        self.history.push(HandEventKind::PlayerActed {
            action_index: index,
            seat,
            action: kind,
            new_stack,
            pot_after: self.pot.total,
        });
    }

    fn reveal(&mut self, index: usize, reveal: &BoardReveal) -> Result<(), ReplayError> {
        let mut dealt = self.dealt_cards();
        for card in reveal.cards.iter() {
            if dealt.contains(card) {
                return Err(ReplayError::DuplicateCard {
                    card: *card,
                    action_index: Some(index),
                });
            }
            dealt.push(*card);
        }

        self.board.extend_from_slice(&reveal.cards);
        for p in self.players.iter_mut() {
            p.street_bet = Chips::ZERO;
        }

        let street = reveal.street;
        let to_act = self.acting_seats_from(postflop_first_seat(self.players.len()));
        self.betting = BettingState::new(street, Chips::ZERO, self.config.big_blind, to_act);
        self.phase = HandPhase::Betting(street);

        self.history.push(HandEventKind::BoardDealt {
            action_index: index,
            street,
            cards: reveal.cards.clone(),
        });
        self.history.push(HandEventKind::StreetChanged { street });

        Ok(())
    }

    /// Пересчитать фазу после любого перехода.
    fn advance_phase(&mut self) {
        let HandPhase::Betting(street) = self.phase else {
            return;
        };

        let live = self.live_seats();
        if let [winner] = live.as_slice() {
            self.phase = HandPhase::UncontestedEnd { winner: *winner };
            return;
        }

        self.refresh_round();

        if street == Street::River && self.betting.is_round_complete() {
            self.phase = HandPhase::Showdown;
        }
    }

    /// Убрать из очереди тех, кто больше не может ходить. Если активный игрок
    /// остался один и ему нечего уравнивать – торговаться не с кем, улица закрыта.
    fn refresh_round(&mut self) {
        let players = &self.players;
        self.betting
            .to_act
            .retain(|s| players[*s as usize].can_act());

        let active: Vec<&SeatedPlayer> = players.iter().filter(|p| p.can_act()).collect();
        let all_matched = active
            .iter()
            .all(|p| p.street_bet >= self.betting.current_bet);

        if active.len() <= 1 && all_matched {
            self.betting.to_act.clear();
        }
    }

    /// Активные игроки по кругу, начиная со `start`.
    fn acting_seats_from(&self, start: SeatIndex) -> Vec<SeatIndex> {
        seats_from(start, self.players.len())
            .into_iter()
            .filter(|s| self.players[*s as usize].can_act())
            .collect()
    }

    /// После рейза: все активные, кроме рейзера, начиная со следующего за ним.
    fn others_to_act_after(&self, raiser: SeatIndex) -> Vec<SeatIndex> {
        let n = self.players.len();
        let next = ((raiser as usize + 1) % n) as SeatIndex;
        self.acting_seats_from(next)
            .into_iter()
            .filter(|s| *s != raiser)
            .collect()
    }
}

fn violation(index: usize, token: &str, rule: BettingRule) -> ReplayError {
    ReplayError::BettingRuleViolation {
        index,
        token: token.to_string(),
        rule,
    }
}
