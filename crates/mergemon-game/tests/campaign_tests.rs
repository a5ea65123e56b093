use mergemon_campaign::board::GridError;
use mergemon_campaign::shop::ShopError;
use mergemon_core::errors::MergeError;
use mergemon_core::events::GameEvent;
use mergemon_core::types::{Side, Tier};
use mergemon_game::session::{GameConfig, GameError, GamePhase, GameSession, MoveOutcome};

fn funded_session() -> GameSession {
    let mut session = GameSession::new();
    session.progression.add_coins(5000);
    session
}

// --- Fresh Session ---

#[test]
fn default_session_state() {
    let session = GameSession::new();
    assert_eq!(session.phase, GamePhase::Preparation);
    assert_eq!(session.progression.coins(), 100);
    assert_eq!(session.progression.wave(), 1);
    assert_eq!(session.progression.highest_tier(), Tier::new(1));
    assert!(session.board.is_empty());
}

// --- Shop ---

#[test]
fn buying_fills_cells_row_major() {
    let mut session = GameSession::new();
    assert_eq!(session.buy_monster(Tier::new(1)).unwrap(), (0, 0));
    assert_eq!(session.buy_monster(Tier::new(1)).unwrap(), (0, 1));
    assert_eq!(session.progression.coins(), 0);
    assert_eq!(session.board.unit_count(), 2);
}

#[test]
fn locked_tier_cannot_be_bought() {
    let mut session = funded_session();
    assert!(matches!(
        session.buy_monster(Tier::new(4)),
        Err(GameError::Shop(ShopError::TierLocked(_)))
    ));
    assert!(session.board.is_empty());
}

#[test]
fn purchases_stop_when_coins_run_out() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();
    session.buy_monster(Tier::new(1)).unwrap();
    assert!(matches!(
        session.buy_monster(Tier::new(1)),
        Err(GameError::Shop(ShopError::InsufficientCoins { .. }))
    ));
    assert_eq!(session.board.unit_count(), 2);
}

#[test]
fn full_board_rejects_purchases() {
    let mut session = funded_session();
    for _ in 0..25 {
        session.buy_monster(Tier::new(1)).unwrap();
    }
    assert!(session.board.is_full());
    assert!(matches!(
        session.buy_monster(Tier::new(1)),
        Err(GameError::Shop(ShopError::BoardFull))
    ));
}

// --- Moving and Merging ---

#[test]
fn moving_to_an_empty_cell() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();
    session.drain_events();

    assert_eq!(
        session.move_monster(0, 0, 3, 3).unwrap(),
        MoveOutcome::Moved
    );
    assert!(session.board.unit_at(0, 0).is_none());
    assert!(session.board.unit_at(3, 3).is_some());

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::MonsterMoved {
            to_row: 3,
            to_col: 3,
            ..
        }
    )));
}

#[test]
fn merging_equal_tiers_pays_and_unlocks() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();
    session.buy_monster(Tier::new(1)).unwrap();
    session.drain_events();

    assert_eq!(
        session.move_monster(0, 1, 0, 0).unwrap(),
        MoveOutcome::Merged(Tier::new(2))
    );
    assert_eq!(session.board.unit_count(), 1);
    assert_eq!(session.board.unit_at(0, 0).unwrap().tier, Tier::new(2));
    // 100 starting coins, two 50-coin purchases, 10 coins for the merge.
    assert_eq!(session.progression.coins(), 10);
    assert_eq!(session.progression.highest_tier(), Tier::new(2));
    assert!(session.progression.can_unlock_tier(Tier::new(4)));

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::MonsterMerged {
            coins_awarded: 10,
            ..
        }
    )));
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::TierUnlocked { tier } if tier.get() == 2)));
}

#[test]
fn mismatched_merge_is_rejected_and_reverts() {
    let mut session = funded_session();
    session.buy_monster(Tier::new(1)).unwrap();
    session.buy_monster(Tier::new(2)).unwrap();

    assert!(matches!(
        session.move_monster(0, 1, 0, 0),
        Err(GameError::Grid(GridError::Merge(
            MergeError::TierMismatch { .. }
        )))
    ));
    assert_eq!(session.board.unit_at(0, 0).unwrap().tier, Tier::new(1));
    assert_eq!(session.board.unit_at(0, 1).unwrap().tier, Tier::new(2));
}

#[test]
fn merge_chain_reaches_higher_tiers() {
    let mut session = funded_session();
    for _ in 0..4 {
        session.buy_monster(Tier::new(1)).unwrap();
    }
    session.move_monster(0, 1, 0, 0).unwrap();
    session.move_monster(0, 3, 0, 2).unwrap();
    assert_eq!(
        session.move_monster(0, 2, 0, 0).unwrap(),
        MoveOutcome::Merged(Tier::new(3))
    );

    assert_eq!(session.progression.highest_tier(), Tier::new(3));
    assert!(session.progression.can_unlock_tier(Tier::new(5)));
    assert!(!session.progression.can_unlock_tier(Tier::new(6)));
}

// --- Battle Flow ---

#[test]
fn winning_a_battle_advances_the_wave() {
    let mut session = GameSession::new();
    let champion = session.factory.create(Tier::new(9), Side::Player);
    session.board.place(champion, 0, 0).unwrap();

    session.start_battle().unwrap();
    assert_eq!(session.phase, GamePhase::Battle);
    let result = session.resolve_battle().unwrap();

    assert!(result.is_victory());
    assert_eq!(session.phase, GamePhase::Preparation);
    assert_eq!(session.progression.wave(), 2);
    // Wave 1 victory with one survivor: floor(15 + 10 + 22.5) = 47.
    assert_eq!(session.progression.coins(), 147);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::BattleStarted {
            wave: 1,
            enemy_count: 2
        }
    )));
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::WaveCompleted { wave: 1, .. })));
}

#[test]
fn losing_a_battle_keeps_the_wave() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();

    session.start_battle().unwrap();
    let result = session.resolve_battle().unwrap();

    // One tier-1 monster cannot outlast two of itself.
    assert!(!result.is_victory());
    assert_eq!(session.progression.wave(), 1);
    // 50 coins left after the purchase, plus floor(15 * 0.3) = 4.
    assert_eq!(session.progression.coins(), 54);
    assert!(session.board.is_empty(), "the fallen leave the grid");

    let events = session.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::WaveFailed { wave: 1, .. })));
}

#[test]
fn survivors_carry_their_wounds_back() {
    let mut session = GameSession::new();
    let champion = session.factory.create(Tier::new(9), Side::Player);
    session.board.place(champion, 0, 0).unwrap();

    session.start_battle().unwrap();
    let result = session.resolve_battle().unwrap();
    assert!(result.is_victory());

    // The champion one-shots each tier-1 enemy, so the battle lasts two
    // turns and the lone counterattack lands for the 1-damage minimum.
    assert_eq!(result.turns, 2);
    let survivor = session.board.unit_at(0, 0).unwrap();
    assert_eq!(survivor.health, survivor.max_health - 1);
    assert_eq!(survivor.id, champion.id);
}

#[test]
fn a_wiped_board_cannot_start_the_next_battle() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();
    session.start_battle().unwrap();
    session.resolve_battle().unwrap();

    assert!(session.board.is_empty());
    assert!(matches!(
        session.start_battle(),
        Err(GameError::EmptyBoard)
    ));
}

// --- Events ---

#[test]
fn events_drain_once() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();

    assert!(!session.drain_events().is_empty());
    assert!(session.drain_events().is_empty());
}

// --- Persistence ---

#[test]
fn save_and_restore_roundtrip() {
    let mut session = funded_session();
    session.buy_monster(Tier::new(1)).unwrap();
    session.buy_monster(Tier::new(1)).unwrap();
    session.move_monster(0, 1, 0, 0).unwrap();
    session.buy_monster(Tier::new(3)).unwrap();

    let saved = session.save_state().unwrap();
    let restored = GameSession::restore(&saved, GameConfig::default()).unwrap();

    assert_eq!(restored.phase, GamePhase::Preparation);
    assert_eq!(restored.board.unit_count(), session.board.unit_count());
    assert_eq!(
        restored.board.unit_at(0, 0).unwrap().tier,
        Tier::new(2)
    );
    assert_eq!(restored.progression.coins(), session.progression.coins());
    assert_eq!(restored.progression.wave(), session.progression.wave());
    assert_eq!(
        restored.progression.highest_tier(),
        session.progression.highest_tier()
    );
    assert_eq!(
        restored.progression.unlocked_tiers(),
        session.progression.unlocked_tiers()
    );
}

#[test]
fn restore_realigns_ids_for_new_purchases() {
    let mut session = funded_session();
    session.buy_monster(Tier::new(1)).unwrap();
    session.buy_monster(Tier::new(1)).unwrap();

    let saved = session.save_state().unwrap();
    let mut restored = GameSession::restore(&saved, GameConfig::default()).unwrap();
    restored.progression.add_coins(100);

    let (row, col) = restored.buy_monster(Tier::new(1)).unwrap();
    let fresh_id = restored.board.unit_at(row, col).unwrap().id;
    let saved_ids: Vec<_> = restored
        .board
        .iter_units()
        .map(|(_, _, unit)| unit.id)
        .collect();
    assert_eq!(saved_ids.iter().filter(|id| **id == fresh_id).count(), 1);
    assert!(fresh_id.get() > 2, "restored ids stay unique");
}

#[test]
fn saving_during_a_battle_keeps_the_pre_battle_board() {
    let mut session = GameSession::new();
    session.buy_monster(Tier::new(1)).unwrap();
    session.start_battle().unwrap();
    session.advance_battle().unwrap();

    let saved = session.save_state().unwrap();
    let restored = GameSession::restore(&saved, GameConfig::default()).unwrap();

    assert_eq!(restored.phase, GamePhase::Preparation);
    assert!(restored.battle.is_none());
    assert_eq!(restored.board.unit_count(), 1);
    let unit = restored.board.unit_at(0, 0).unwrap();
    assert_eq!(unit.health, unit.max_health, "combat damage is not saved");
}
