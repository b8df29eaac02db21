//! Точка входа: реплей раздачи по токенам и расчёт выплат.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{parse_card, Card, HandPhase, SeatIndex, TableConfig, TableSeating};
use crate::engine::actions::{parse_action, TokenError};
use crate::engine::errors::ReplayError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{normalize_seating, Seating};
use crate::engine::settlement::{award_by_strength, award_evenly, net_payoffs, Settlement};
use crate::engine::side_pots::{compute_side_pots, SidePot};
use crate::engine::state::HandState;
use crate::eval::{evaluate_best_hand, HandStrength};

/// Внешний id игрока → чистый выигрыш (+) или проигрыш (−) в фишках.
pub type PayoffsById = BTreeMap<String, i64>;

/// Что делать с нераспознанным токеном.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTokenPolicy {
    /// Ошибка `UnknownActionToken`.
    #[default]
    Reject,
    /// Пропустить и записать в лог (чистка исторических данных).
    SkipAndLog,
}

/// Что делать, если токены кончились раньше конца раздачи.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteHandPolicy {
    /// Ошибка `IncompleteHand`.
    #[default]
    Reject,
    /// Посчитать выплаты «как получится» и пометить их как предварительные.
    Tentative,
}

/// Режим реплея. По умолчанию всё строго.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplayOptions {
    pub unknown_tokens: UnknownTokenPolicy,
    pub incomplete_hands: IncompleteHandPolicy,
}

impl ReplayOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            unknown_tokens: UnknownTokenPolicy::SkipAndLog,
            incomplete_hands: IncompleteHandPolicy::Tentative,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettlementStatus {
    Settled,
    Tentative,
}

/// Чем закончилась раздача.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEnd {
    Showdown,
    Uncontested { winner: SeatIndex },
    Incomplete,
}

/// Рука игрока на вскрытии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownHand {
    pub seat: SeatIndex,
    pub external_id: String,
    pub hole_cards: [Card; 2],
    pub strength: HandStrength,
}

/// Полный отчёт о реплее.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplayReport {
    pub payoffs: PayoffsById,
    pub status: SettlementStatus,
    pub end: HandEnd,
    pub board: Vec<Card>,
    pub pots: Vec<SidePot>,
    pub showdown: Vec<ShowdownHand>,
    /// Индексы токенов, пропущенных в нестрогом режиме.
    pub skipped_tokens: Vec<usize>,
    /// Игроки, не попавшие в раздачу из-за нулевого стека.
    pub dropped_seats: Vec<String>,
    pub history: HandHistory,
}

/// Реплей раздачи в строгом режиме: только выплаты.
pub fn replay_hand<S: AsRef<str>>(
    config: &TableConfig,
    seating: &TableSeating,
    hole_cards: &HashMap<String, Vec<String>>,
    action_tokens: &[S],
) -> Result<PayoffsById, ReplayError> {
    replay_hand_with_options(config, seating, hole_cards, action_tokens, &ReplayOptions::default())
        .map(|report| report.payoffs)
}

/// Реплей раздачи с явным режимом и полным отчётом.
pub fn replay_hand_with_options<S: AsRef<str>>(
    config: &TableConfig,
    seating: &TableSeating,
    hole_cards: &HashMap<String, Vec<String>>,
    action_tokens: &[S],
    options: &ReplayOptions,
) -> Result<ReplayReport, ReplayError> {
    let normalized = normalize_seating(seating)?;
    let (state, skipped) = replay_state(config, &normalized, hole_cards, action_tokens, options)?;

    let tentative = match state.phase {
        HandPhase::Showdown | HandPhase::UncontestedEnd { .. } => false,
        HandPhase::Betting(_) => match options.incomplete_hands {
            IncompleteHandPolicy::Reject => {
                return Err(ReplayError::IncompleteHand {
                    actions: action_tokens.len(),
                    phase: state.phase,
                });
            }
            IncompleteHandPolicy::Tentative => {
                tracing::warn!(
                    actions = action_tokens.len(),
                    phase = %state.phase,
                    "hand did not reach a terminal state, settling tentatively"
                );
                true
            }
        },
    };

    let report = settle(state, skipped, normalized.dropped, tentative)?;

    tracing::info!(
        players = report.payoffs.len(),
        end = ?report.end,
        status = ?report.status,
        "replayed hand"
    );

    Ok(report)
}

/// Прогнать токены через стейт-машину и вернуть состояние после последнего.
///
/// Ничего не рассчитывает: подходит для проверки инвариантов на любом префиксе.
/// Второй элемент – индексы пропущенных токенов.
pub fn replay_state<S: AsRef<str>>(
    config: &TableConfig,
    seating: &Seating,
    hole_cards: &HashMap<String, Vec<String>>,
    action_tokens: &[S],
    options: &ReplayOptions,
) -> Result<(HandState, Vec<usize>), ReplayError> {
    let hole = parse_hole_cards(seating, hole_cards)?;
    let mut state = HandState::start(*config, seating, &hole)?;
    let mut skipped = Vec::new();

    for (index, token) in action_tokens.iter().enumerate() {
        let token = token.as_ref();
        let action = match parse_action(token) {
            Ok(action) => action,
            Err(TokenError::InvalidCard(err)) => {
                return Err(ReplayError::InvalidCardCode {
                    code: err.0,
                    action_index: Some(index),
                });
            }
            Err(TokenError::Unknown(_)) => match options.unknown_tokens {
                UnknownTokenPolicy::Reject => {
                    return Err(ReplayError::UnknownActionToken {
                        index,
                        token: token.to_string(),
                    });
                }
                UnknownTokenPolicy::SkipAndLog => {
                    tracing::warn!(index, token, "unknown action token, skipping");
                    state.history.push(HandEventKind::TokenSkipped {
                        action_index: index,
                        token: token.to_string(),
                    });
                    skipped.push(index);
                    continue;
                }
            },
        };

        state = state.apply(index, token, &action)?;
    }

    Ok((state, skipped))
}

/// Карманные карты всех посаженных игроков: ровно две различные карты у каждого.
fn parse_hole_cards(
    seating: &Seating,
    hole_cards: &HashMap<String, Vec<String>>,
) -> Result<HashMap<String, [Card; 2]>, ReplayError> {
    let mut parsed = HashMap::with_capacity(seating.len());

    for seat in seating.seats.iter() {
        let codes = hole_cards
            .get(&seat.external_id)
            .ok_or_else(|| ReplayError::MissingHoleCards {
                player: seat.external_id.clone(),
            })?;

        let [first, second] = codes.as_slice() else {
            return Err(ReplayError::WrongHoleCardCount {
                player: seat.external_id.clone(),
                count: codes.len(),
            });
        };

        let first = parse_hole_card(first)?;
        let second = parse_hole_card(second)?;
        if first == second {
            return Err(ReplayError::DuplicateCard {
                card: first,
                action_index: None,
            });
        }

        parsed.insert(seat.external_id.clone(), [first, second]);
    }

    Ok(parsed)
}

fn parse_hole_card(code: &str) -> Result<Card, ReplayError> {
    parse_card(code).map_err(|err| ReplayError::InvalidCardCode {
        code: err.0,
        action_index: None,
    })
}

/// Разбить банк на уровни, наградить победителей, посчитать чистые выплаты.
fn settle(
    mut state: HandState,
    skipped_tokens: Vec<usize>,
    dropped_seats: Vec<String>,
    tentative: bool,
) -> Result<ReplayReport, ReplayError> {
    let contributions = state.contributions();
    let mut showdown = Vec::new();

    let (end, pots, settlement): (HandEnd, Vec<SidePot>, Settlement) = match state.phase {
        HandPhase::UncontestedEnd { winner } => {
            // Без вскрытия и оценки рук: всё забирает оставшийся.
            let pots = compute_side_pots(&contributions, &[winner]);
            let settlement = award_evenly(&pots);
            (HandEnd::Uncontested { winner }, pots, settlement)
        }
        HandPhase::Showdown | HandPhase::Betting(_) => {
            let live = state.live_seats();
            let pots = compute_side_pots(&contributions, &live);

            let settlement = if state.board.len() == 5 {
                let strengths = evaluate_live_hands(&mut state, &live, &mut showdown)?;
                award_by_strength(&pots, &strengths)
            } else {
                // Неполный борд в предварительном режиме: уровни делятся поровну.
                award_evenly(&pots)
            };

            let end = if state.phase == HandPhase::Showdown {
                HandEnd::Showdown
            } else {
                HandEnd::Incomplete
            };
            (end, pots, settlement)
        }
    };

    for award in settlement.awards.iter() {
        for (seat, amount) in award.winners.iter() {
            state.history.push(HandEventKind::PotAwarded {
                pot_index: award.pot_index,
                seat: *seat,
                amount: *amount,
            });
        }
    }
    state.history.push(HandEventKind::HandFinished { phase: state.phase });

    let payoffs = net_payoffs(&settlement, &contributions)
        .into_iter()
        .map(|(seat, net)| (state.player(seat).external_id.clone(), net))
        .collect();

    Ok(ReplayReport {
        payoffs,
        status: if tentative {
            SettlementStatus::Tentative
        } else {
            SettlementStatus::Settled
        },
        end,
        board: state.board,
        pots,
        showdown,
        skipped_tokens,
        dropped_seats,
        history: state.history,
    })
}

/// Оценить руки всех не сфолдивших и записать вскрытие в историю.
fn evaluate_live_hands(
    state: &mut HandState,
    live: &[SeatIndex],
    showdown: &mut Vec<ShowdownHand>,
) -> Result<BTreeMap<SeatIndex, HandStrength>, ReplayError> {
    let mut strengths = BTreeMap::new();

    for &seat in live {
        let player = state.player(seat);
        let strength = evaluate_best_hand(&player.hole_cards, &state.board)?;
        let hole_cards = player.hole_cards;
        let external_id = player.external_id.clone();

        state.history.push(HandEventKind::ShowdownReveal {
            seat,
            hole_cards,
            category: strength.category,
            rank_value: strength.rank.0,
        });
        showdown.push(ShowdownHand {
            seat,
            external_id,
            hole_cards,
            strength,
        });
        strengths.insert(seat, strength);
    }

    Ok(strengths)
}
