//! Tests for the session state machine and reveal sequence.

use digitguess::{
    Action, GameError, GameSession, GuessError, Outcome, Phase, RevealFrames, SecretNumber,
    compute_score,
};

/// A session advanced into an active round for the named player.
fn active_session(name: &str) -> GameSession {
    let mut session = GameSession::new();
    session.apply(Action::Start).expect("start");
    session
        .apply(Action::SubmitName(name.to_string()))
        .expect("name accepted");
    session
}

/// A valid guess guaranteed not to win: the secret's digits rotated by one.
/// Distinct digits mean the rotation always differs from the secret.
fn losing_guess(session: &GameSession) -> String {
    let s = session.secret().expect("active round").to_string();
    let bytes = s.as_bytes();
    format!(
        "{}{}{}{}",
        bytes[1] as char, bytes[2] as char, bytes[3] as char, bytes[0] as char
    )
}

#[test]
fn test_start_moves_to_name_entry() {
    let mut session = GameSession::new();
    assert_eq!(session.phase(), Phase::Idle);
    let outcome = session.apply(Action::Start).expect("start accepted");
    assert_eq!(outcome, Outcome::AwaitingName);
    assert_eq!(session.phase(), Phase::NameEntry);
}

#[test]
fn test_empty_name_rejected_without_transition() {
    let mut session = GameSession::new();
    session.apply(Action::Start).expect("start");

    for bad in ["", "   ", "\t\n"] {
        let err = session
            .apply(Action::SubmitName(bad.to_string()))
            .expect_err("empty name must be rejected");
        assert_eq!(err, GameError::EmptyName);
        assert_eq!(session.phase(), Phase::NameEntry);
    }
}

#[test]
fn test_name_submission_starts_fresh_round() {
    let mut session = GameSession::new();
    session.apply(Action::Start).expect("start");
    let outcome = session
        .apply(Action::SubmitName("  Alice  ".to_string()))
        .expect("name accepted");
    assert_eq!(
        outcome,
        Outcome::RoundStarted {
            player: "Alice".to_string()
        }
    );
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.player_name(), "Alice");
    assert_eq!(session.guesses(), 0);
    assert!(session.history().is_empty());
    assert!(session.secret().is_some());
}

#[test]
fn test_invalid_guess_rejected_without_counting() {
    let mut session = active_session("Bob");

    let err = session
        .apply(Action::SubmitGuess("1123".to_string()))
        .expect_err("duplicate digits must be rejected");
    assert_eq!(
        err,
        GameError::InvalidGuess(GuessError::DuplicateDigit(1))
    );
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.guesses(), 0);
    assert!(session.history().is_empty());

    let err = session
        .apply(Action::SubmitGuess("12x4".to_string()))
        .expect_err("non-digit must be rejected");
    assert_eq!(err, GameError::InvalidGuess(GuessError::NonDigit('x')));
    assert_eq!(session.guesses(), 0);
}

#[test]
fn test_only_accepted_guesses_count() {
    let mut session = active_session("Carol");

    for i in 1..=3 {
        let g = losing_guess(&session);
        match session.apply(Action::SubmitGuess(g)).expect("valid guess") {
            Outcome::Feedback(record) => assert_eq!(record.guess_number, i),
            Outcome::Won { .. } => panic!("rotated guess cannot win"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        // Interleave a rejected submission; it must not count.
        session
            .apply(Action::SubmitGuess("0000".to_string()))
            .expect_err("duplicate digits");
        assert_eq!(session.guesses(), i);
    }

    assert_eq!(session.history().len(), 3);
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn test_winning_guess_ends_round_with_summary() {
    let mut session = active_session("Dave");
    session
        .apply(Action::SubmitGuess(losing_guess(&session)))
        .expect("valid guess");

    let winning = session.secret().expect("active round").to_string();
    match session
        .apply(Action::SubmitGuess(winning.clone()))
        .expect("winning guess accepted")
    {
        Outcome::Won { record, summary } => {
            assert_eq!(record.guess_number, 2);
            assert_eq!(record.guess.to_string(), winning);
            assert!(record.result.is_win());
            assert_eq!(summary.name(), "Dave");
            assert_eq!(*summary.guesses(), 2);
            assert_eq!(
                *summary.score(),
                compute_score(*summary.guesses(), *summary.time_taken())
            );
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert_eq!(session.phase(), Phase::Won);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_play_again_after_win_resets() {
    let mut session = active_session("Eve");
    let winning = session.secret().expect("active round").to_string();
    session
        .apply(Action::SubmitGuess(winning))
        .expect("winning guess");

    let outcome = session.apply(Action::PlayAgain).expect("play again");
    assert_eq!(outcome, Outcome::Reset);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.guesses(), 0);
    assert!(session.history().is_empty());
    assert!(session.secret().is_none());
    assert_eq!(session.player_name(), "");
}

#[test]
fn test_give_up_reveals_secret_frame_by_frame() {
    let mut session = active_session("Frank");
    let secret = session.secret().expect("active round").to_string();

    let mut frames = Vec::new();
    match session.apply(Action::GiveUp).expect("give up accepted") {
        Outcome::RevealFrame(frame) => frames.push(frame),
        other => panic!("expected first frame, got {other:?}"),
    }
    assert_eq!(session.phase(), Phase::Revealing);

    // Play-again is not available while frames remain.
    let err = session
        .apply(Action::PlayAgain)
        .expect_err("reveal not finished");
    assert!(matches!(err, GameError::UnexpectedAction { .. }));

    loop {
        match session.apply(Action::AdvanceReveal).expect("advance") {
            Outcome::RevealFrame(frame) => frames.push(frame),
            Outcome::RevealDone { secret: revealed } => {
                assert_eq!(revealed, secret);
                break;
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(frames.len() <= 16, "reveal must be finite");
    }

    assert!(frames.len() >= 2);
    for frame in &frames {
        assert_eq!(frame.chars().count(), 4);
    }
    assert_eq!(frames.last().expect("frames nonempty"), &secret);

    // Done is idempotent; play-again now folds back to Idle.
    match session.apply(Action::AdvanceReveal).expect("advance") {
        Outcome::RevealDone { secret: revealed } => assert_eq!(revealed, secret),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let outcome = session.apply(Action::PlayAgain).expect("play again");
    assert_eq!(outcome, Outcome::Reset);
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn test_actions_rejected_outside_their_phase() {
    let mut session = GameSession::new();

    for action in [
        Action::SubmitGuess("1234".to_string()),
        Action::GiveUp,
        Action::AdvanceReveal,
        Action::PlayAgain,
        Action::SubmitName("Grace".to_string()),
    ] {
        let err = session
            .apply(action.clone())
            .expect_err("idle session accepts only Start");
        assert!(matches!(err, GameError::UnexpectedAction { .. }), "{action}");
        assert_eq!(session.phase(), Phase::Idle);
    }

    let mut session = active_session("Hank");
    let err = session
        .apply(Action::Start)
        .expect_err("cannot start mid-round");
    assert!(matches!(err, GameError::UnexpectedAction { .. }));
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn test_reveal_frames_are_finite_and_restartable() {
    let secret: SecretNumber = "5087".parse().expect("valid secret");
    let mut frames = RevealFrames::new(secret);

    let first_pass: Vec<String> = frames.by_ref().collect();
    assert_eq!(first_pass.len(), frames.frame_count());
    assert_eq!(first_pass.last().expect("nonempty"), "5087");
    assert!(frames.is_exhausted());
    assert_eq!(frames.next(), None);

    frames.restart();
    assert!(!frames.is_exhausted());
    let second_pass: Vec<String> = frames.collect();
    assert_eq!(second_pass.len(), first_pass.len());
    assert_eq!(second_pass.last().expect("nonempty"), "5087");
}
