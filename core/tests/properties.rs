use proptest::prelude::*;
use sapper_core::*;

#[derive(Copy, Clone, Debug)]
enum Move {
    Reveal(Pos),
    Flag(Pos),
    Chord(Pos),
}

fn pos_in(rows: Coord, cols: Coord) -> impl Strategy<Value = Pos> {
    (0..rows, 0..cols)
}

fn moves(rows: Coord, cols: Coord) -> impl Strategy<Value = Vec<Move>> {
    let one = prop_oneof![
        3 => pos_in(rows, cols).prop_map(Move::Reveal),
        2 => pos_in(rows, cols).prop_map(Move::Flag),
        1 => pos_in(rows, cols).prop_map(Move::Chord),
    ];
    prop::collection::vec(one, 1..60)
}

fn phase_rank(phase: Phase) -> u8 {
    match phase {
        Phase::NotStarted => 0,
        Phase::InProgress => 1,
        Phase::Won | Phase::Lost => 2,
    }
}

proptest! {
    #[test]
    fn first_reveal_is_never_a_mine(seed in any::<u64>(), pos in pos_in(16, 30)) {
        let mut session = Session::with_seed(Difficulty::HARD, seed);

        let outcome = session.reveal_at(pos).unwrap();

        prop_assert_eq!(outcome, RevealOutcome::Cleared);
        prop_assert_eq!(session.phase(), Phase::InProgress);
        prop_assert_eq!(session.grid().mine_count(), 99);
        prop_assert_eq!(session.grid().get(pos).unwrap().adjacent_mines(), 0);
    }

    #[test]
    fn counters_match_board_after_any_script(seed in any::<u64>(), script in moves(9, 9)) {
        let mut session = Session::with_seed(Difficulty::EASY, seed);
        let mut rank = phase_rank(session.phase());

        for step in script {
            let result = match step {
                Move::Reveal(pos) => session.reveal_at(pos).map(drop),
                Move::Flag(pos) => session.toggle_flag_at(pos).map(drop),
                Move::Chord(pos) => session.chord_at(pos).map(drop),
            };
            if let Err(err) = result {
                prop_assert!(matches!(err, GameError::InvalidAction { .. }), "{:?}", err);
            }

            let grid = session.grid();
            prop_assert_eq!(grid.revealed_count(), grid.scan_revealed());
            let flagged = grid
                .positions()
                .filter(|&pos| grid.get(pos).unwrap().is_flagged())
                .count();
            prop_assert_eq!(usize::from(grid.flagged_count()), flagged);

            let next = phase_rank(session.phase());
            prop_assert!(next >= rank);
            rank = next;

            if session.phase() == Phase::Won {
                prop_assert!(grid.all_safe_revealed());
            }
        }
    }

    #[test]
    fn numbered_cells_do_not_propagate(seed in any::<u64>(), start in pos_in(16, 16)) {
        let mut session = Session::with_seed(Difficulty::MEDIUM, seed);
        session.reveal_at(start).unwrap();
        let grid = session.grid();

        let target = grid.positions().find(|&pos| {
            let cell = grid.get(pos).unwrap();
            !cell.is_revealed() && !cell.is_mine() && cell.adjacent_mines() > 0
        });
        if let Some(target) = target {
            let before = session.revealed_count();
            session.reveal_at(target).unwrap();
            prop_assert!(
                session.phase() == Phase::Won || session.revealed_count() == before + 1
            );
        }
    }

    #[test]
    fn flagging_twice_is_a_net_no_op(seed in any::<u64>(), pos in pos_in(9, 9)) {
        let mut session = Session::with_seed(Difficulty::EASY, seed);
        session.reveal_at((4, 4)).unwrap();
        prop_assume!(session.phase() == Phase::InProgress);
        let before = session.grid().clone();
        let remaining = session.mines_remaining();

        let first = session.toggle_flag_at(pos).unwrap();
        let second = session.toggle_flag_at(pos).unwrap();

        prop_assert_eq!(first == FlagOutcome::Rejected, second == FlagOutcome::Rejected);
        prop_assert_eq!(session.grid(), &before);
        prop_assert_eq!(session.mines_remaining(), remaining);
    }
}
