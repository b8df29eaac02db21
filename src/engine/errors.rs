use thiserror::Error;

use crate::domain::{Card, Chips, HandPhase, SeatIndex, Street};
use crate::eval::EvalError;

/// Конкретное правило торговли, нарушенное действием.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BettingRule {
    #[error("Раздача уже завершена ({phase})")]
    HandAlreadyFinished { phase: HandPhase },

    #[error("Улица {street} закрыта – ходить некому, ожидается открытие карт")]
    NoPlayerToAct { street: Street },

    #[error("Фолд без ставки: игроку {seat} нечего уравнивать")]
    UnnecessaryFold { seat: SeatIndex },

    #[error("Ставка должна быть больше нуля")]
    ZeroAmount,

    #[error("Ставка до {requested} не превышает текущую {current_bet}")]
    BetNotAboveCurrent { requested: Chips, current_bet: Chips },

    #[error("Рейз до {requested} меньше минимального {minimum}")]
    RaiseBelowMinimum { requested: Chips, minimum: Chips },

    #[error("Игрок {seat} уже ходил после неполного олл-ин рейза – доступны только call/fold")]
    ActionNotReopened { seat: SeatIndex },

    #[error("Нельзя открыть карты: на улице {street} ещё должны походить {pending} игрок(ов)")]
    StreetNotSealed { street: Street, pending: usize },

    #[error("Ожидалось открытие {expected:?}, пришло {got}")]
    UnexpectedReveal { expected: Option<Street>, got: Street },

    #[error("На {street} открывается {expected} карт(а), пришло {got}")]
    WrongRevealCount { street: Street, expected: usize, got: usize },
}

/// Ошибки реплея раздачи. Любая ошибка прерывает реплей целиком.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("Некорректные блайнды: SB={small_blind}, BB={big_blind}")]
    InvalidTableConfig { small_blind: Chips, big_blind: Chips },

    #[error("Некорректный код карты {code:?} (действие {action_index:?})")]
    InvalidCardCode { code: String, action_index: Option<usize> },

    #[error("Карта {card} уже в игре (действие {action_index:?})")]
    DuplicateCard { card: Card, action_index: Option<usize> },

    #[error("Недостаточно игроков с фишками: {eligible}")]
    InsufficientPlayers { eligible: usize },

    #[error("Малый блайнд {name:?} не найден в рассадке")]
    UnknownSmallBlind { name: String },

    #[error("Нет карманных карт у игрока {player}")]
    MissingHoleCards { player: String },

    #[error("У игрока {player} должно быть 2 карманные карты, передано {count}")]
    WrongHoleCardCount { player: String, count: usize },

    #[error("Неизвестное действие {token:?} на позиции {index}")]
    UnknownActionToken { index: usize, token: String },

    #[error("Действие {index} ({token:?}) нарушает правила: {rule}")]
    BettingRuleViolation { index: usize, token: String, rule: BettingRule },

    #[error("Действия закончились ({actions} шт.), а раздача не завершена: {phase}")]
    IncompleteHand { actions: usize, phase: HandPhase },

    #[error("Ошибка оценки руки: {0}")]
    Evaluation(#[from] EvalError),
}
