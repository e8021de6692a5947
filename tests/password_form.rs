use rand::rngs::StdRng;
use rand::SeedableRng;

use passform::password_generation::from_fn;
use passform::{
    build_pool, generate_random_password, validate_length, Action, CharacterClass,
    CharacterClasses, FormState, LengthError, PasswordLength, Status,
};

fn run(actions: Vec<Action>, seed: u64) -> FormState {
    let mut rng = StdRng::seed_from_u64(seed);
    actions
        .into_iter()
        .fold(FormState::new(), |state, action| state.reduce(action, &mut rng))
}

fn every_selection() -> impl Iterator<Item = CharacterClasses> {
    (0u8..16).map(|bits| CharacterClasses {
        upper: bits & 1 != 0,
        lower: bits & 2 != 0,
        digits: bits & 4 != 0,
        symbols: bits & 8 != 0,
    })
}

#[test]
fn eight_lowercase_characters() {
    let state = run(vec![Action::SetLength("8".into()), Action::Submit], 2024);
    let password = state.password().expect("a password should be shown");
    assert_eq!(password.char_count(), 8);
    assert!(password
        .as_str()
        .chars()
        .all(|c| "abcdefghijklmnopqrstuvwxyz".contains(c)));
}

#[test]
fn zero_is_too_short() {
    let state = run(vec![Action::SetLength("0".into()), Action::Submit], 0);
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(
        state.field_error().map(|e| e.to_string()).as_deref(),
        Some("Should be min of 4 characters")
    );
}

#[test]
fn twenty_is_too_long() {
    let state = run(vec![Action::SetLength("20".into()), Action::Submit], 0);
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(
        state.field_error().map(|e| e.to_string()).as_deref(),
        Some("Should be max of 16 characters")
    );
}

#[test]
fn empty_length_is_required_and_stays_blocked() {
    let state = run(vec![Action::SetLength(String::new()), Action::Submit], 0);
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(
        state.field_error().map(|e| e.to_string()).as_deref(),
        Some("Length is required")
    );
    assert!(!state.can_submit());
}

#[test]
fn invalid_lengths_never_reach_the_generator() {
    for raw in ["", "3", "17", "-4", "x", "4.0", "1000000"] {
        let mut draws = 0;
        let mut source = from_fn(|_| {
            draws += 1;
            0
        });
        let state = FormState::new()
            .reduce(Action::SetLength(raw.into()), &mut source)
            .reduce(Action::Submit, &mut source);
        drop(source);
        assert_eq!(draws, 0, "{raw:?}");
        assert_eq!(state.status(), Status::Idle, "{raw:?}");
        assert!(validate_length(raw).is_err(), "{raw:?}");
    }
}

#[test]
fn every_selection_and_length_stays_in_the_pool() {
    let mut rng = StdRng::seed_from_u64(17);
    for selection in every_selection().filter(CharacterClasses::any) {
        let pool = build_pool(&selection).unwrap();
        let allowed = CharacterClass::ALL
            .iter()
            .filter(|class| selection.is_enabled(**class))
            .flat_map(|class| class.literal().chars())
            .collect::<String>();
        for n in PasswordLength::MIN..=PasswordLength::MAX {
            let length = validate_length(&n.to_string()).unwrap();
            let password = generate_random_password(&mut rng, &pool, length);
            assert_eq!(password.char_count(), n);
            assert!(password.as_str().chars().all(|c| allowed.contains(c)));
        }
    }
}

#[test]
fn empty_selection_never_generates() {
    let state = run(
        vec![
            Action::SetLength("8".into()),
            Action::ToggleClass(CharacterClass::Lower),
            Action::Submit,
        ],
        5,
    );
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(
        state.validate().unwrap_err().to_string(),
        "Select at least one character class"
    );
}

#[test]
fn all_classes_eventually_show_up() {
    let state = run(
        vec![
            Action::SetLength("16".into()),
            Action::ToggleClass(CharacterClass::Upper),
            Action::ToggleClass(CharacterClass::Digits),
            Action::ToggleClass(CharacterClass::Symbols),
        ],
        0,
    );
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = String::new();
    for _ in 0..200 {
        let shown = state.reduce(Action::Submit, &mut rng);
        seen.push_str(shown.password().unwrap().as_str());
    }
    for class in CharacterClass::ALL {
        assert!(
            class.literal().chars().any(|c| seen.contains(c)),
            "{class:?} never drawn"
        );
    }
}

#[test]
fn reset_from_shown_returns_to_defaults() {
    let state = run(
        vec![
            Action::SetLength("10".into()),
            Action::ToggleClass(CharacterClass::Symbols),
            Action::Submit,
            Action::Reset,
        ],
        1,
    );
    assert_eq!(state, FormState::new());
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(state.length_text(), "");
    assert_eq!(state.classes(), CharacterClasses::default());
    assert_eq!(state.field_error(), None::<LengthError>);
}
