//! Правила легальности действий. Каждое правило – отдельная функция,
//! нарушение возвращается как `BettingRule`, движок ничего не «угадывает».

use crate::domain::{Chips, HandPhase, SeatIndex, SeatedPlayer, Street};
use crate::engine::actions::BoardReveal;
use crate::engine::betting::BettingState;
use crate::engine::errors::BettingRule;

/// Во что превращается действие игрока после проверки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commitment {
    Check,
    /// Доплатить `owed` (движок сам ограничит остатком стека).
    Call { owed: Chips },
    /// Довести ставку на улице до `to`. `full == false` – неполный олл-ин рейз.
    Raise { to: Chips, full: bool },
}

/// Раздача ещё идёт и на улице есть кому ходить. Возвращает seat ходящего.
pub fn require_actor(phase: HandPhase, betting: &BettingState) -> Result<SeatIndex, BettingRule> {
    let street = match phase {
        HandPhase::Betting(street) => street,
        HandPhase::Showdown | HandPhase::UncontestedEnd { .. } => {
            return Err(BettingRule::HandAlreadyFinished { phase });
        }
    };
    betting.actor().ok_or(BettingRule::NoPlayerToAct { street })
}

/// Сколько игроку нужно доплатить до текущей ставки.
pub fn owed(player: &SeatedPlayer, betting: &BettingState) -> Chips {
    betting.current_bet.saturating_sub(player.street_bet)
}

/// Фолд разрешён только когда есть что уравнивать.
pub fn check_fold(player: &SeatedPlayer, betting: &BettingState) -> Result<(), BettingRule> {
    if owed(player, betting).is_zero() {
        return Err(BettingRule::UnnecessaryFold { seat: player.seat });
    }
    Ok(())
}

/// `c`/`x` легален всегда: чек, если уравнено, иначе колл (олл-ин колл при нехватке).
pub fn classify_check_or_call(player: &SeatedPlayer, betting: &BettingState) -> Commitment {
    let owed = owed(player, betting);
    if owed.is_zero() {
        Commitment::Check
    } else {
        Commitment::Call { owed }
    }
}

/// Правило «ставка в размер текущей – это колл».
///
/// Токен `r<N>`/`b<N>`, который не поднимает текущую ставку, а только
/// уравнивает её (в том числе олл-ином на меньшую сумму), не должен заново
/// открывать торговлю – особенно против чужого олл-ина.
pub fn matching_bet_is_call(player: &SeatedPlayer, betting: &BettingState, requested: Chips) -> bool {
    let cap = player.max_street_total();
    let target = requested.min(cap);
    let all_in = target == cap;

    player.street_bet < betting.current_bet
        && target <= betting.current_bet
        && (requested == betting.current_bet || all_in)
}

/// Проверка bet/raise до `requested` (сумма на улице, не прирост).
///
/// Запрос больше стека обрезается до олл-ина. Если ни один соперник уже не
/// может ходить (все в олл-ине или сбросили), повышать не для кого: ставка
/// выше текущей применяется как колл.
pub fn classify_bet_or_raise(
    player: &SeatedPlayer,
    betting: &BettingState,
    requested: Chips,
    opponents_can_act: bool,
) -> Result<Commitment, BettingRule> {
    if requested.is_zero() {
        return Err(BettingRule::ZeroAmount);
    }

    if matching_bet_is_call(player, betting, requested) {
        return Ok(Commitment::Call {
            owed: owed(player, betting),
        });
    }

    let cap = player.max_street_total();
    let target = requested.min(cap);
    let all_in = target == cap;

    if target <= betting.current_bet {
        return Err(BettingRule::BetNotAboveCurrent {
            requested,
            current_bet: betting.current_bet,
        });
    }

    if !opponents_can_act {
        return Ok(classify_check_or_call(player, betting));
    }

    if betting.is_locked(player.seat) {
        return Err(BettingRule::ActionNotReopened { seat: player.seat });
    }

    let increment = target - betting.current_bet;
    let full = increment >= betting.min_raise;
    if !full && !all_in {
        return Err(BettingRule::RaiseBelowMinimum {
            requested,
            minimum: betting.current_bet + betting.min_raise,
        });
    }

    Ok(Commitment::Raise { to: target, full })
}

/// Открытие карт: нужная улица, закрытый раунд ставок, верное число карт.
pub fn check_reveal(phase: HandPhase, betting: &BettingState, reveal: &BoardReveal) -> Result<(), BettingRule> {
    let street: Street = match phase {
        HandPhase::Betting(street) => street,
        HandPhase::Showdown | HandPhase::UncontestedEnd { .. } => {
            return Err(BettingRule::HandAlreadyFinished { phase });
        }
    };

    let expected = street.next();
    if expected != Some(reveal.street) {
        return Err(BettingRule::UnexpectedReveal {
            expected,
            got: reveal.street,
        });
    }

    if !betting.is_round_complete() {
        return Err(BettingRule::StreetNotSealed {
            street,
            pending: betting.to_act.len(),
        });
    }

    let need = reveal.street.reveal_count();
    if reveal.cards.len() != need {
        return Err(BettingRule::WrongRevealCount {
            street: reveal.street,
            expected: need,
            got: reveal.cards.len(),
        });
    }

    Ok(())
}
