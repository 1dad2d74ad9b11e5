use std::collections::BTreeSet;
use std::iter::FromIterator;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Cell, Inference, MinesweeperAi, Sentence};

fn ai(height: usize, width: usize, inference: Inference) -> MinesweeperAi {
    MinesweeperAi::with_rng(height, width, inference, StdRng::seed_from_u64(7))
}

fn set(cells: &[Cell]) -> BTreeSet<Cell> {
    BTreeSet::from_iter(cells.iter().cloned())
}

#[test]
fn first_clue_becomes_a_sentence() {
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.add_knowledge((0, 0), 1);

    assert_eq!(ai.moves_made(), &set(&[(0, 0)]));
    assert_eq!(ai.safes(), &set(&[(0, 0)]));
    assert!(ai.mines().is_empty());
    assert_eq!(ai.knowledge(), &[Sentence::new(vec![(0, 1), (1, 0), (1, 1)], 1)]);
}

#[test]
fn zero_clue_clears_neighbours() {
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.add_knowledge((0, 0), 0);
    assert_eq!(ai.safes(), &set(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
    assert!(ai.mines().is_empty());
}

#[test]
fn known_mines_are_taken_out_of_new_clues() {
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.mark_mine((1, 1));
    ai.add_knowledge((0, 0), 1);

    // the remaining neighbours hold no mine
    assert_eq!(ai.safes(), &set(&[(0, 0), (0, 1), (1, 0)]));
    assert_eq!(ai.mines(), &set(&[(1, 1)]));
}

#[test]
fn known_safes_are_taken_out_of_new_clues() {
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.add_knowledge((0, 0), 0);
    // (1, 0) and (1, 1) are safe but unplayed
    assert!(!ai.moves_made().contains(&(1, 1)));
    ai.add_knowledge((0, 1), 1);

    assert_eq!(ai.knowledge(), &[Sentence::new(vec![(0, 2), (1, 2)], 1)]);
    assert_eq!(ai.safes(), &set(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
    assert!(ai.mines().is_empty());
}

#[test]
fn subset_rule_isolates_a_mine() {
    let mut ai = ai(1, 5, Inference::Saturate);
    ai.knowledge.push(Sentence::new(vec![(0, 1), (0, 2), (0, 3)], 1));
    ai.knowledge.push(Sentence::new(vec![(0, 1), (0, 2), (0, 3), (0, 4)], 2));

    assert!(ai.infer_subsets());
    assert!(ai.knowledge().contains(&Sentence::new(vec![(0, 4)], 1)));

    assert!(ai.extract_facts());
    assert_eq!(ai.mines(), &set(&[(0, 4)]));
}

#[test]
fn duplicate_and_empty_sentences_are_dropped() {
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.knowledge.push(Sentence::new(vec![(0, 1), (1, 1)], 1));
    ai.knowledge.push(Sentence::new(vec![], 0));
    ai.knowledge.push(Sentence::new(vec![(1, 1), (0, 1)], 1));

    assert!(!ai.infer_subsets());
    assert_eq!(ai.knowledge(), &[Sentence::new(vec![(0, 1), (1, 1)], 1)]);
}

#[test]
fn overlapping_clues_stay_ambiguous() {
    // 3x3 board, single mine at (1, 1)
    for &inference in &[Inference::Saturate, Inference::SinglePass] {
        let mut ai = ai(3, 3, inference);
        ai.add_knowledge((0, 0), 1);
        ai.add_knowledge((0, 2), 1);

        assert!(ai.mines().is_empty(), "{:?}", inference);
        assert!(ai.knowledge().contains(&Sentence::new(vec![(0, 1), (1, 0), (1, 1)], 1)));
        assert!(ai.knowledge().contains(&Sentence::new(vec![(0, 1), (1, 1), (1, 2)], 1)));
    }
}

#[test]
fn clues_isolate_the_mine() {
    // 3x3 board, single mine at (1, 1)
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.add_knowledge((0, 0), 1);
    ai.add_knowledge((0, 1), 1);

    // {(1, 0), (1, 1)} holds the mine, so (0, 2) and (1, 2) are safe
    assert!(ai.mines().is_empty());
    assert_eq!(ai.safes(), &set(&[(0, 0), (0, 1), (0, 2), (1, 2)]));
    assert_eq!(ai.knowledge(), &[Sentence::new(vec![(1, 0), (1, 1)], 1)]);

    ai.add_knowledge((1, 0), 1);
    assert_eq!(ai.mines(), &set(&[(1, 1)]));
    assert_eq!(
        ai.safes(),
        &set(&[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)])
    );
}

#[test]
fn single_pass_defers_to_later_clues() {
    let mut ai = ai(3, 3, Inference::SinglePass);
    ai.add_knowledge((0, 0), 1);
    ai.add_knowledge((0, 1), 1);

    // derived but not yet extracted
    assert_eq!(ai.safes(), &set(&[(0, 0), (0, 1)]));
    assert!(ai.knowledge().contains(&Sentence::new(vec![(0, 2), (1, 2)], 0)));

    ai.add_knowledge((1, 0), 1);
    assert!(ai.safes().contains(&(0, 2)));
    assert!(ai.safes().contains(&(1, 2)));
    assert!(ai.mines().contains(&(1, 1)));
}

#[test]
fn repeated_clue_is_harmless() {
    let mut ai = ai(3, 3, Inference::Saturate);
    ai.add_knowledge((0, 0), 1);
    ai.add_knowledge((0, 0), 1);

    assert_eq!(ai.moves_made().len(), 1);
    assert_eq!(ai.knowledge(), &[Sentence::new(vec![(0, 1), (1, 0), (1, 1)], 1)]);
}

#[test]
fn safe_move() {
    let mut ai = ai(3, 3, Inference::Saturate);
    assert_eq!(ai.make_safe_move(), None);

    ai.add_knowledge((0, 0), 0);
    let unplayed = set(&[(0, 1), (1, 0), (1, 1)]);
    for _ in 0..20 {
        let cell = ai.make_safe_move().unwrap();
        assert!(unplayed.contains(&cell));
    }

    ai.moves_made.extend(unplayed);
    assert_eq!(ai.make_safe_move(), None);
}

#[test]
fn random_move_avoids_mines_and_played_cells() {
    let mut ai = ai(4, 4, Inference::Saturate);
    ai.add_knowledge((0, 0), 0);
    ai.mark_mine((3, 3));
    for _ in 0..100 {
        let cell = ai.make_random_move().unwrap();
        assert!(cell.0 < 4 && cell.1 < 4);
        assert_ne!(cell, (0, 0));
        assert_ne!(cell, (3, 3));
    }
}

#[test]
fn random_move_finds_the_last_cell() {
    let mut ai = ai(2, 2, Inference::Saturate);
    ai.moves_made.extend(vec![(0, 0), (0, 1)]);
    ai.mines.insert((1, 0));
    for _ in 0..20 {
        assert_eq!(ai.make_random_move(), Some((1, 1)));
    }

    ai.moves_made.insert((1, 1));
    assert_eq!(ai.make_random_move(), None);
}
