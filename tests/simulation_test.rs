//! End-to-end behavior of dice, games and analyzers

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{choose, coin, faces, played_game, test_rng};
use montecarlo::{Analyzer, Die, Face, Game, Layout, PlayResults, SimError};

#[test]
fn test_fresh_die_weights_are_one() {
    for labels in [vec!["a"], vec!["H", "T"], vec!["x", "y", "z", "w"]] {
        let die = Die::new(labels.clone()).unwrap();
        let state = die.current_state();
        assert_eq!(state.len(), labels.len());
        assert!(state.iter().all(|e| e.weight == 1.0));
    }
}

#[test]
fn test_reweight_coin_scenario() {
    let die = coin();
    die.set_weight("H", 2.0).unwrap();

    let state = die.current_state();
    assert_eq!(state.weight(&Face::from("H")), Some(2.0));
    assert_eq!(state.weight(&Face::from("T")), Some(1.0));

    assert_eq!(
        die.set_weight("E", 1.0),
        Err(SimError::UnknownFace(Face::from("E")))
    );
}

#[test]
fn test_roll_returns_requested_count() {
    let die = Die::standard(20).unwrap();
    let mut rng = test_rng(1);
    for n in [1, 7, 100] {
        let rolls = die.roll_with(n, &mut rng).unwrap();
        assert_eq!(rolls.len(), n);
        assert!(rolls.iter().all(|f| die.faces().contains(f)));
    }
}

#[test]
fn test_single_coin_game_scenario() {
    let game = played_game(vec![coin()], 4, 10);

    match game.results(Layout::Wide) {
        PlayResults::Wide(table) => {
            assert_eq!(table.num_rolls(), 4);
            assert_eq!(table.num_dice(), 1);
        }
        other => panic!("expected wide table, got {:?}", other),
    }
    assert_eq!(Analyzer::new(&game).jackpot_count(), 4);
}

#[test]
fn test_narrow_is_bijection_with_wide() {
    let d6 = Arc::new(Die::standard(6).unwrap());
    let game = played_game(vec![coin(), d6, coin()], 9, 4);

    let wide = game.results(Layout::Wide);
    let narrow = game.results(Layout::Narrow);
    assert_eq!(wide.cell_count(), 27);
    assert_eq!(narrow.cell_count(), 27);

    let PlayResults::Narrow(entries) = narrow else {
        panic!("expected narrow results");
    };
    let mut seen = HashSet::new();
    for e in &entries {
        assert!(seen.insert((e.roll, e.die)), "duplicate cell {:?}", e);
        assert_eq!(game.last_play().get(e.roll, e.die), Some(&e.face));
    }
}

#[test]
fn test_layout_flag_validation() {
    assert!(matches!(
        "sideways".parse::<Layout>(),
        Err(SimError::InvalidInput(_))
    ));
    assert_eq!("Narrow".parse::<Layout>().unwrap(), Layout::Narrow);
}

#[test]
fn test_two_dice_permutation_and_combo_scenario() {
    let d = || Arc::new(Die::new([1, 2]).unwrap());
    let game = played_game(vec![d(), d()], 2, 21);
    let mut analyzer = Analyzer::new(&game);

    let perms = analyzer.permutation_count().unwrap().clone();
    assert_eq!(perms.len(), 4);
    for outcome in [[1, 1], [1, 2], [2, 1], [2, 2]] {
        assert!(perms.get(&faces(&outcome)).is_some());
    }
    assert_eq!(perms.total(), 2);

    let combos = analyzer.combo_count().unwrap();
    assert_eq!(combos.len(), 3);
    for outcome in [[1, 1], [1, 2], [2, 2]] {
        assert!(combos.get(&faces(&outcome)).is_some());
    }
    assert!(combos.get(&faces(&[2, 1])).is_none());
    assert_eq!(combos.total(), 2);
}

#[test]
fn test_space_sizes_across_shapes() {
    for sides in 1..=4u32 {
        for dice in 1..=4usize {
            let die = Arc::new(Die::standard(sides).unwrap());
            let seed = sides as u64 * 10 + dice as u64;
            let game = played_game(vec![die; dice], 30, seed);
            let mut analyzer = Analyzer::new(&game);

            let perms = analyzer.permutation_count().unwrap();
            assert_eq!(perms.len(), (sides as usize).pow(dice as u32));
            assert_eq!(perms.total(), 30);

            let combos = analyzer.combo_count().unwrap();
            assert_eq!(combos.len(), choose(sides as usize + dice - 1, dice));
            assert_eq!(combos.total(), 30);
        }
    }
}

#[test]
fn test_mixed_label_types() {
    let die = Arc::new(Die::new(vec![Face::Int(1), Face::from("1")]).unwrap());
    let game = played_game(vec![die.clone(), die], 50, 6);
    let mut analyzer = Analyzer::new(&game);

    let perms = analyzer.permutation_count().unwrap();
    assert_eq!(perms.len(), 4);
    assert_eq!(perms.total(), 50);

    let counts = analyzer.face_counts_per_roll();
    assert_eq!(counts.faces(), &[Face::Int(1), Face::from("1")]);
}

#[test]
fn test_analyzer_reads_latest_play() {
    let mut game = Game::new(vec![coin(), coin()]).unwrap();

    game.play_with(10, &mut test_rng(1)).unwrap();
    assert_eq!(Analyzer::new(&game).permutation_count().unwrap().total(), 10);

    game.play_with(3, &mut test_rng(2)).unwrap();
    assert_eq!(Analyzer::new(&game).permutation_count().unwrap().total(), 3);
}

#[test]
fn test_dice_shared_across_games() {
    let shared = coin();
    let mut first = Game::new(vec![shared.clone()]).unwrap();
    let mut second = Game::new(vec![shared.clone(), shared.clone()]).unwrap();

    shared.set_weight("H", 1e12).unwrap();
    first.play_with(20, &mut test_rng(3)).unwrap();
    second.play_with(20, &mut test_rng(4)).unwrap();

    let heads = Face::from("H");
    assert!(first.last_play().rows().iter().flatten().all(|f| *f == heads));
    assert!(second.last_play().rows().iter().flatten().all(|f| *f == heads));
    assert_eq!(Analyzer::new(&second).jackpot_count(), 20);
}

#[test]
fn test_face_counts_sum_to_dice_per_roll() {
    let d6 = Arc::new(Die::standard(6).unwrap());
    let game = played_game(vec![d6; 5], 40, 99);
    let mut analyzer = Analyzer::new(&game);
    let table = analyzer.face_counts_per_roll();

    assert_eq!(table.faces(), faces(&[1, 2, 3, 4, 5, 6]).as_slice());
    for roll in 1..=40 {
        assert_eq!(table.row(roll).unwrap().iter().sum::<usize>(), 5);
    }
}

#[test]
fn test_float_faced_die_rolls_and_analyzes() {
    let die = Arc::new(Die::new([0.5, 1.5, 2.5]).unwrap());
    die.set_weight(1.5, 3.0).unwrap();
    assert_eq!(die.current_state().weight(&Face::Float(1.5)), Some(3.0));

    let game = played_game(vec![die.clone(), die], 25, 17);
    assert!(game
        .last_play()
        .rows()
        .iter()
        .flatten()
        .all(|f| f.as_float().is_some()));

    let mut analyzer = Analyzer::new(&game);
    let counts = analyzer.face_counts_per_roll();
    assert_eq!(
        counts.faces(),
        &[Face::Float(0.5), Face::Float(1.5), Face::Float(2.5)]
    );

    let perms = analyzer.permutation_count().unwrap();
    assert_eq!(perms.len(), 9);
    assert_eq!(perms.total(), 25);

    let combos = analyzer.combo_count().unwrap();
    assert_eq!(combos.len(), 6);
    assert_eq!(combos.total(), 25);
    assert!(combos.get(&[Face::Float(0.5), Face::Float(2.5)]).is_some());
}

#[test]
fn test_int_and_float_faces_stay_distinct() {
    let labels = vec![Face::Int(2), Face::Float(2.0), Face::Float(2.5)];
    let die = Arc::new(Die::new(labels).unwrap());
    let game = played_game(vec![die], 10, 8);
    let mut analyzer = Analyzer::new(&game);
    assert_eq!(
        analyzer.face_counts_per_roll().faces(),
        &[Face::Int(2), Face::Float(2.0), Face::Float(2.5)]
    );
    assert_eq!(analyzer.combo_count().unwrap().len(), 3);
}
