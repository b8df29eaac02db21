//! Стейт-машина торговли: блайнды, очередь хода, минимальный рейз,
//! неполный олл-ин, правило «ставка в размер текущей – это колл», открытие карт.

use std::collections::HashMap;

use holdem_replay::domain::{
    parse_card_run, Card, Chips, HandPhase, PlayerStatus, SeatEntry, Street, TableConfig,
    TableSeating,
};
use holdem_replay::engine::{
    normalize_seating, parse_action, BettingRule, HandEventKind, HandState, PlayerActionKind,
    ReplayError,
};

const HOLE: &str = "AsKsQsJsTs9s8s7s6s5s4s3s";

/// Стол: места P0..Pn в порядке `stacks`, P0 – малый блайнд.
fn start(stacks: &[i64], sb: u64, bb: u64) -> HandState {
    let seats = stacks
        .iter()
        .enumerate()
        .map(|(i, s)| SeatEntry::new(format!("p{i}"), format!("P{i}"), *s))
        .collect();
    let seating = normalize_seating(&TableSeating::new(seats, "P0")).unwrap();

    let pool = parse_card_run(HOLE).unwrap();
    let hole: HashMap<String, [Card; 2]> = (0..stacks.len())
        .map(|i| (format!("p{i}"), [pool[2 * i], pool[2 * i + 1]]))
        .collect();

    HandState::start(TableConfig::new(sb, bb), &seating, &hole).unwrap()
}

fn play(state: HandState, tokens: &[&str]) -> Result<HandState, ReplayError> {
    tokens
        .iter()
        .enumerate()
        .try_fold(state, |s, (i, t)| s.apply(i, t, &parse_action(t).unwrap()))
}

fn violation(err: ReplayError) -> (usize, BettingRule) {
    match err {
        ReplayError::BettingRuleViolation { index, rule, .. } => (index, rule),
        other => panic!("ожидали нарушение правил, получили {other:?}"),
    }
}

fn last_action(state: &HandState) -> PlayerActionKind {
    state
        .history
        .player_actions()
        .last()
        .map(|(_, a)| a.clone())
        .unwrap()
}

//
// ====================== БЛАЙНДЫ И ОЧЕРЕДЬ ======================
//

#[test]
fn blinds_are_posted_and_utg_acts_first() {
    let s = start(&[1000, 1000, 1000], 20, 40);

    assert_eq!(s.phase, HandPhase::Betting(Street::Preflop));
    assert_eq!(s.player(0).street_bet, Chips(20));
    assert_eq!(s.player(1).street_bet, Chips(40));
    assert_eq!(s.betting.current_bet, Chips(40));
    assert_eq!(s.betting.min_raise, Chips(40));
    assert_eq!(s.pot.total, Chips(60));
    assert_eq!(s.button, 2);
    assert_eq!(s.current_actor(), Some(2));

    assert_eq!(
        s.history.events[0].kind,
        HandEventKind::BlindsPosted {
            button: 2,
            small_blind: (0, Chips(20)),
            big_blind: (1, Chips(40)),
        }
    );
}

/// Короткий BB ставит сколько есть; ставка для колла – наибольший блайнд.
#[test]
fn short_big_blind_posts_what_it_has() {
    let s = start(&[1000, 30], 20, 40);

    assert_eq!(s.player(1).committed, Chips(30));
    assert_eq!(s.player(1).status, PlayerStatus::AllIn);
    assert_eq!(s.betting.current_bet, Chips(30));
    assert_eq!(s.current_actor(), Some(0));

    let s = play(s, &["c"]).unwrap();
    assert_eq!(s.player(0).committed, Chips(30));
    assert_eq!(s.current_actor(), None);
    assert!(s.betting.is_round_complete());
}

/// Хедз-ап: SB первым на префлопе, BB первым после флопа.
#[test]
fn heads_up_action_order() {
    let s = start(&[1000, 1000], 10, 20);
    assert_eq!(s.current_actor(), Some(0));

    let s = play(s, &["c"]).unwrap();
    assert_eq!(s.current_actor(), Some(1));

    let s = play(s, &["x"]).unwrap();
    assert_eq!(s.current_actor(), None);
    assert_eq!(s.phase, HandPhase::Betting(Street::Preflop));

    let s = play(s, &["F[2h3h4d]"]).unwrap();
    assert_eq!(s.phase, HandPhase::Betting(Street::Flop));
    assert_eq!(s.current_actor(), Some(1));
    assert_eq!(s.betting.current_bet, Chips::ZERO);
    assert_eq!(s.player(0).street_bet, Chips::ZERO);
}

/// После лимпов у BB остаётся право хода (опция).
#[test]
fn big_blind_keeps_the_option() {
    let s = play(start(&[1000, 1000, 1000], 20, 40), &["c", "c"]).unwrap();
    assert_eq!(s.current_actor(), Some(1));

    let s = play(s, &["r120"]).unwrap();
    assert_eq!(s.betting.current_bet, Chips(120));
    assert_eq!(s.betting.min_raise, Chips(80));
    assert_eq!(s.current_actor(), Some(2));
    assert_eq!(
        last_action(&s),
        PlayerActionKind::RaiseTo {
            to: Chips(120),
            all_in: false,
            reopens: true,
        }
    );
}

//
// ====================== РАЗМЕРЫ СТАВОК ======================
//

#[test]
fn raise_below_minimum_is_rejected() {
    let err = play(start(&[1000, 1000, 1000], 10, 20), &["r60", "r90"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            1,
            BettingRule::RaiseBelowMinimum {
                requested: Chips(90),
                minimum: Chips(100),
            }
        )
    );
}

/// Первая ставка постфлоп не меньше BB.
#[test]
fn postflop_bet_must_be_at_least_big_blind() {
    let err = play(start(&[1000, 1000], 20, 40), &["c", "x", "F[2h3h4d]", "b20"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            3,
            BettingRule::RaiseBelowMinimum {
                requested: Chips(20),
                minimum: Chips(40),
            }
        )
    );

    let s = play(start(&[1000, 1000], 20, 40), &["c", "x", "F[2h3h4d]", "b40"]).unwrap();
    assert_eq!(last_action(&s), PlayerActionKind::Bet { to: Chips(40), all_in: false });
}

#[test]
fn zero_and_undersized_amounts() {
    let err = play(start(&[1000, 1000, 1000], 20, 40), &["r0"]).unwrap_err();
    assert_eq!(violation(err), (0, BettingRule::ZeroAmount));

    let err = play(start(&[1000, 1000, 1000], 20, 40), &["r30"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            0,
            BettingRule::BetNotAboveCurrent {
                requested: Chips(30),
                current_bet: Chips(40),
            }
        )
    );
}

/// `r<N>` ровно в размер текущей ставки – это колл.
#[test]
fn matching_bet_is_treated_as_call() {
    let s = play(start(&[1000, 1000, 1000], 20, 40), &["r40"]).unwrap();
    assert_eq!(
        last_action(&s),
        PlayerActionKind::Call {
            paid: Chips(40),
            all_in: false,
        }
    );
    assert_eq!(s.betting.current_bet, Chips(40));
    assert_eq!(s.current_actor(), Some(0));
}

/// Против олл-ина «рейз» до его суммы уравнивает и не открывает торговлю заново.
#[test]
fn matching_an_all_in_closes_the_street() {
    let s = play(start(&[1000, 100], 10, 20), &["c", "r100"]).unwrap();
    assert_eq!(s.player(1).status, PlayerStatus::AllIn);

    let s = play(s, &["r100"]).unwrap();
    assert_eq!(
        last_action(&s),
        PlayerActionKind::Call {
            paid: Chips(80),
            all_in: false,
        }
    );
    assert_eq!(s.player(0).committed, Chips(100));
    assert_eq!(s.current_actor(), None);
}

/// Ставка больше стека превращается в олл-ин.
#[test]
fn oversized_bet_is_capped_to_all_in() {
    let s = play(start(&[1000, 1000], 10, 20), &["r5000"]).unwrap();
    assert_eq!(
        last_action(&s),
        PlayerActionKind::RaiseTo {
            to: Chips(1000),
            all_in: true,
            reopens: true,
        }
    );
    assert_eq!(s.player(0).stack, Chips::ZERO);
    assert_eq!(s.betting.current_bet, Chips(1000));
}

//
// ====================== НЕПОЛНЫЙ ОЛЛ-ИН ======================
//

/// Неполный олл-ин рейз не даёт перерейзить тому, кто уже ходил.
#[test]
fn short_all_in_does_not_reopen_for_previous_raiser() {
    let s = play(start(&[70, 1000, 1000], 10, 20), &["r60", "r70"]).unwrap();

    assert_eq!(
        last_action(&s),
        PlayerActionKind::RaiseTo {
            to: Chips(70),
            all_in: true,
            reopens: false,
        }
    );
    assert_eq!(s.betting.locked, vec![2]);
    assert_eq!(s.betting.min_raise, Chips(40));

    let s = play(s, &["c"]).unwrap();
    assert_eq!(s.current_actor(), Some(2));

    let err = play(s.clone(), &["r200"]).unwrap_err();
    assert_eq!(violation(err), (0, BettingRule::ActionNotReopened { seat: 2 }));

    // Колл по-прежнему можно.
    let s = play(s, &["c"]).unwrap();
    assert!(s.betting.is_round_complete());
    assert_eq!(s.player(2).committed, Chips(70));
}

/// Полный рейз после неполного олл-ина снова открывает торговлю всем.
#[test]
fn full_raise_after_short_all_in_reopens() {
    let s = play(start(&[70, 1000, 1000], 10, 20), &["r60", "r70", "r150"]).unwrap();
    assert!(s.betting.locked.is_empty());
    assert_eq!(s.betting.min_raise, Chips(80));
    assert_eq!(s.current_actor(), Some(2));

    let s = play(s, &["r400"]).unwrap();
    assert_eq!(s.betting.current_bet, Chips(400));
    assert_eq!(s.current_actor(), Some(1));
}

/// Два неполных олл-ина подряд вместе дают полный рейз: торговля снова открыта.
#[test]
fn short_all_ins_add_up_to_a_full_raise() {
    let s = play(
        start(&[190, 250, 1000, 1000], 20, 40),
        &["c", "c", "c", "x", "F[2d3h4c]", "x", "x", "b100", "c"],
    )
    .unwrap();
    assert_eq!(s.betting.min_raise, Chips(100));

    // +50: меньше полного рейза, ставивший и колировавший закрыты.
    let s = play(s, &["r150"]).unwrap();
    assert_eq!(s.betting.locked, vec![2, 3]);

    // Ещё +60: с хода P2 и P3 цель выросла на 110 – это полный рейз.
    let s = play(s, &["r210"]).unwrap();
    assert!(s.betting.locked.is_empty());
    assert_eq!(s.betting.min_raise, Chips(100));
    assert_eq!(s.current_actor(), Some(2));

    let err = play(s.clone(), &["r300"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            0,
            BettingRule::RaiseBelowMinimum {
                requested: Chips(300),
                minimum: Chips(310),
            }
        )
    );

    let s = play(s, &["r600"]).unwrap();
    assert_eq!(
        last_action(&s),
        PlayerActionKind::RaiseTo {
            to: Chips(600),
            all_in: false,
            reopens: true,
        }
    );
    assert_eq!(s.current_actor(), Some(3));

    let s = play(s, &["c"]).unwrap();
    assert!(s.betting.is_round_complete());
    assert_eq!(s.player(3).committed, Chips(640));
}

/// Все соперники в олл-ине: «рейз» поверх применяется как колл.
#[test]
fn raise_against_only_all_in_opponents_is_a_call() {
    let s = play(start(&[100, 1000], 20, 40), &["r100", "r500"]).unwrap();
    assert_eq!(
        last_action(&s),
        PlayerActionKind::Call {
            paid: Chips(60),
            all_in: false,
        }
    );
    assert_eq!(s.betting.current_bet, Chips(100));
    assert_eq!(s.player(1).committed, Chips(100));
    assert!(s.betting.is_round_complete());

    let s = play(s, &["F[2h3h4d]", "T[8d]", "R[9c]"]).unwrap();
    assert_eq!(s.phase, HandPhase::Showdown);
}

//
// ====================== ФОЛД И ОЧЕРЕДЬ ======================
//

#[test]
fn fold_without_a_bet_is_rejected() {
    let err = play(start(&[1000, 1000], 10, 20), &["c", "f"]).unwrap_err();
    assert_eq!(violation(err), (1, BettingRule::UnnecessaryFold { seat: 1 }));
}

#[test]
fn everyone_folds_to_the_big_blind() {
    let s = play(start(&[1000, 1000, 1000], 20, 40), &["f", "f"]).unwrap();
    assert_eq!(s.phase, HandPhase::UncontestedEnd { winner: 1 });
    assert!(s.is_terminal());
    assert_eq!(s.current_actor(), None);
}

#[test]
fn acting_after_the_hand_is_over() {
    let err = play(start(&[1000, 1000], 10, 20), &["f", "c"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            1,
            BettingRule::HandAlreadyFinished {
                phase: HandPhase::UncontestedEnd { winner: 1 },
            }
        )
    );
}

#[test]
fn acting_on_a_sealed_street() {
    let err = play(start(&[1000, 1000], 10, 20), &["c", "x", "c"]).unwrap_err();
    assert_eq!(violation(err), (2, BettingRule::NoPlayerToAct { street: Street::Preflop }));
}

//
// ====================== ОТКРЫТИЕ КАРТ ======================
//

#[test]
fn reveal_before_street_is_sealed() {
    let err = play(start(&[1000, 1000], 10, 20), &["F[2h3h4d]"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            0,
            BettingRule::StreetNotSealed {
                street: Street::Preflop,
                pending: 2,
            }
        )
    );
}

#[test]
fn reveal_of_the_wrong_street_or_size() {
    let err = play(start(&[1000, 1000], 10, 20), &["c", "x", "T[2h]"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            2,
            BettingRule::UnexpectedReveal {
                expected: Some(Street::Flop),
                got: Street::Turn,
            }
        )
    );

    let err = play(start(&[1000, 1000], 10, 20), &["c", "x", "F[2h3h]"]).unwrap_err();
    assert_eq!(
        violation(err),
        (
            2,
            BettingRule::WrongRevealCount {
                street: Street::Flop,
                expected: 3,
                got: 2,
            }
        )
    );
}

/// Карта борда, которая уже на руках у игрока.
#[test]
fn reveal_of_a_dealt_card() {
    let err = play(start(&[1000, 1000], 10, 20), &["c", "x", "F[As2h3h]"]).unwrap_err();
    assert_eq!(
        err,
        ReplayError::DuplicateCard {
            card: parse_card_run("As").unwrap()[0],
            action_index: Some(2),
        }
    );
}

/// Все в олл-ине: борд докладывается без торговли и ведёт к шоудауну.
#[test]
fn all_in_runout_reaches_showdown() {
    let s = play(
        start(&[100, 100], 20, 40),
        &["r100", "c", "F[2h3h4d]", "T[8d]", "R[9c]"],
    )
    .unwrap();
    assert_eq!(s.phase, HandPhase::Showdown);
    assert_eq!(s.board.len(), 5);
    assert_eq!(s.pot.total, Chips(200));
    assert_eq!(s.pot.street_total(Street::Preflop), Chips(200));
    assert_eq!(s.pot.street_total(Street::River), Chips::ZERO);
}

//
// ====================== ИНВАРИАНТЫ ======================
//

/// Реплей с любого префикса даёт то же состояние.
#[test]
fn replay_from_any_prefix_is_identical() {
    let tokens = ["c", "r80", "c", "F[2h3h4d]", "b40", "r160", "c", "T[8d]", "x", "x"];
    let full = play(start(&[1000, 1000], 10, 20), &tokens).unwrap();

    for k in 0..=tokens.len() {
        let prefix = play(start(&[1000, 1000], 10, 20), &tokens[..k]).unwrap();
        let resumed = tokens[k..]
            .iter()
            .enumerate()
            .try_fold(prefix, |s, (i, t)| s.apply(k + i, t, &parse_action(t).unwrap()))
            .unwrap();
        assert_eq!(resumed, full, "префикс длины {k}");
    }
}

/// Ошибка не портит исходное состояние: оно остаётся у вызывающего.
#[test]
fn failed_action_leaves_prior_state_usable() {
    let s = play(start(&[1000, 1000], 10, 20), &["c"]).unwrap();
    let before = s.clone();

    assert!(play(s.clone(), &["r15"]).is_err());
    assert_eq!(s, before);

    let s = play(s, &["x"]).unwrap();
    assert!(s.betting.is_round_complete());
}

#[test]
fn chip_total_is_constant() {
    let tokens = ["r60", "r70", "r150", "r400", "c"];
    let mut s = start(&[70, 1000, 1000], 10, 20);
    let total = s.chip_total();
    assert_eq!(total, Chips(2070));

    for (i, t) in tokens.iter().enumerate() {
        s = s.apply(i, t, &parse_action(t).unwrap()).unwrap();
        assert_eq!(s.chip_total(), total);
        assert_eq!(s.pot.total, s.players.iter().map(|p| p.committed).sum::<Chips>());
        for p in s.players.iter() {
            assert!(p.committed <= p.starting_stack);
        }
    }
}
