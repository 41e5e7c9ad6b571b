//! NoteStore / validation property tests
//!
//! ストアの公開APIだけを使い、Vec モデルと同じ振る舞いになることを確認する

use memocho::error::StoreError;
use memocho::note::validation::{self, validate};
use memocho::{Note, NoteStore};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

#[derive(Debug, Clone)]
enum Operation {
    Append(Note),
    Replace { index: usize, note: Note },
    Remove { index: usize },
}

fn note_strategy() -> impl Strategy<Value = Note> {
    ("[a-zA-Z ]{0,12}", "[a-z, ]{0,20}").prop_map(|(title, description)| Note::new(title, description))
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        note_strategy().prop_map(Operation::Append),
        (0usize..12, note_strategy()).prop_map(|(index, note)| Operation::Replace { index, note }),
        (0usize..12).prop_map(|index| Operation::Remove { index }),
    ]
}

fn chars(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), range).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn store_matches_vec_model(ops in proptest::collection::vec(operation_strategy(), 0..40)) {
        let mut store = NoteStore::new();
        let mut model: Vec<Note> = Vec::new();

        for op in ops {
            match op {
                Operation::Append(note) => {
                    store.append(note.clone());
                    model.push(note);
                }
                Operation::Replace { index, note } => {
                    let result = store.replace_at(index, note.clone());
                    if index < model.len() {
                        prop_assert!(result.is_ok());
                        model[index] = note;
                    } else {
                        prop_assert_eq!(result, Err(StoreError::OutOfRange { index, len: model.len() }));
                    }
                }
                Operation::Remove { index } => {
                    let result = store.remove_at(index);
                    if index < model.len() {
                        prop_assert_eq!(result, Ok(model.remove(index)));
                    } else {
                        prop_assert_eq!(result, Err(StoreError::OutOfRange { index, len: model.len() }));
                    }
                }
            }
            prop_assert_eq!(store.len(), model.len());
        }

        let collected: Vec<Note> = store.iter().cloned().collect();
        prop_assert_eq!(collected, model);
    }

    #[test]
    fn valid_pairs_can_be_saved_and_grow_store(
        title in chars(3..=50),
        description in chars(1..=120),
    ) {
        let validation = validate(&title, &description);
        prop_assert!(validation.can_save);

        let mut store = NoteStore::new();
        store.append(Note::new(title.clone(), description.clone()));
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.get(0).unwrap(), &Note::new(title, description));
    }

    #[test]
    fn short_titles_never_save(title in chars(1..=2), description in chars(0..=130)) {
        let validation = validate(&title, &description);
        prop_assert!(validation.errors.title_error);
        prop_assert!(!validation.can_save);
    }

    #[test]
    fn long_titles_never_save(title in chars(51..=80), description in chars(0..=130)) {
        let validation = validate(&title, &description);
        prop_assert!(validation.errors.title_error);
        prop_assert!(!validation.can_save);
    }

    #[test]
    fn empty_title_hides_error_and_blocks_save(description in chars(0..=130)) {
        let validation = validate("", &description);
        prop_assert!(!validation.errors.title_error);
        prop_assert!(!validation.can_save);
    }

    #[test]
    fn replace_changes_only_target(
        notes in proptest::collection::vec(note_strategy(), 1..10),
        pick in any::<prop::sample::Index>(),
        replacement in note_strategy(),
    ) {
        let mut store = NoteStore::new();
        for note in &notes {
            store.append(note.clone());
        }
        let index = pick.index(notes.len());

        store.replace_at(index, replacement.clone()).unwrap();

        prop_assert_eq!(store.len(), notes.len());
        for (i, original) in notes.iter().enumerate() {
            let expected = if i == index { &replacement } else { original };
            prop_assert_eq!(store.get(i).unwrap(), expected);
        }
    }

    #[test]
    fn remove_shifts_following_notes(
        notes in proptest::collection::vec(note_strategy(), 2..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = NoteStore::new();
        for note in &notes {
            store.append(note.clone());
        }
        let index = pick.index(notes.len() - 1);

        store.remove_at(index).unwrap();

        prop_assert_eq!(store.len(), notes.len() - 1);
        prop_assert_eq!(store.get(index).unwrap(), &notes[index + 1]);
    }
}

#[test]
fn boundary_titles_and_descriptions() {
    assert!(!validation::title_error("Tea"));
    assert!(!validation::title_error(&"t".repeat(50)));
    assert!(validation::title_error("Hi"));
    assert!(!validation::description_error(&"d".repeat(120)));
    assert!(validation::description_error(&"d".repeat(121)));
}

#[test]
fn groceries_round_trip() {
    let mut store = NoteStore::new();
    assert!(validate("Groceries", "Milk, eggs").can_save);

    store.append(Note::new("Groceries", "Milk, eggs"));

    assert_eq!(
        store.get(store.len() - 1).unwrap(),
        &Note::new("Groceries", "Milk, eggs")
    );
}

#[test]
fn deletion_makes_later_indices_stale() {
    let mut store = NoteStore::new();
    store.append(Note::new("First", "1"));
    store.append(Note::new("Second", "2"));
    store.append(Note::new("Third", "3"));
    let held = 2;

    store.remove_at(0).unwrap();

    // 位置2を参照していた側は、もう「Third」を取得できない
    assert!(store.get(held).is_err());
    assert_eq!(store.get(held - 1).unwrap().title, "Third");
}
