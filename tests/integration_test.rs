//! End-to-end flow: question bank -> scheduler -> session -> history.

use chrono::{Duration, Utc};

use docquiz_algo::{
    learning_stats, AnswerInput, AnswerKey, HistoryTracker, JsonHistoryStore, MemoryHistoryStore,
    MemoryQuestionBank, Question, QuestionFilter, QuestionStore, QuizSession, Scheduler,
    SchedulerConfig, MAX_BOX,
};

fn sample_bank() -> MemoryQuestionBank {
    MemoryQuestionBank::new(vec![
        Question::new("alg-1", "algebra", AnswerKey::TrueFalse { answer: true })
            .with_prompt("Every linear equation has exactly one solution.")
            .with_tags(vec!["equations".into()]),
        Question::new(
            "alg-2",
            "algebra",
            AnswerKey::MultipleChoice {
                choices: vec!["1".into(), "2".into(), "4".into()],
                correct_index: 2,
            },
        )
        .with_prompt("2^2 = ?")
        .with_difficulty(1),
        Question::new(
            "phy-1",
            "physics",
            AnswerKey::NumericInput {
                answer: 9.81,
                tolerance: 0.1,
            },
        )
        .with_prompt("g in m/s^2?")
        .with_difficulty(3),
    ])
}

#[test]
fn full_quiz_round_updates_history() {
    let bank = sample_bank();
    let tracker = HistoryTracker::new(MemoryHistoryStore::new());
    let mut scheduler = Scheduler::with_seed(SchedulerConfig::default(), 11);
    let now = Utc::now();

    let pool = bank
        .list_questions(&QuestionFilter::by_topic("algebra"))
        .expect("list");
    assert_eq!(pool.len(), 2);

    let selected = scheduler
        .select_questions(&tracker, &pool, 10, now)
        .expect("select");
    assert_eq!(selected.len(), 2);

    let mut session = QuizSession::new(selected);
    let mut step = now;
    while let Some(question) = session.current_question().cloned() {
        // Answer the true/false question correctly, everything else wrong.
        let answer = match question.answer {
            AnswerKey::TrueFalse { answer } => AnswerInput::TrueFalse(answer),
            _ => AnswerInput::Choice(0),
        };
        step += Duration::seconds(30);
        session
            .submit_answer(&tracker, &answer, step)
            .expect("submit")
            .expect("in progress");
    }

    let score = session.score();
    assert_eq!(score.correct, 1);
    assert_eq!(score.wrong, 1);

    let right = tracker.get_state("alg-1").expect("state");
    assert_eq!(right.box_level, 1);
    assert_eq!(right.correct_count, 1);

    let wrong = tracker.get_state("alg-2").expect("state");
    assert_eq!(wrong.box_level, 0);
    assert_eq!(wrong.wrong_count, 1);

    // Both answered moments ago: alg-2 (box 0) is due again immediately,
    // alg-1 (box 1) is cooling down.
    let stats = learning_stats(&tracker, &pool, step).expect("stats");
    assert_eq!(stats.due_now, 1);
    assert_eq!(stats.cooling_down, 1);
}

#[test]
fn graduation_takes_the_full_ladder() {
    let tracker = HistoryTracker::new(MemoryHistoryStore::new());
    let mut now = Utc::now();

    // Answer correctly exactly when each box becomes due again.
    for expected_box in 1..=MAX_BOX {
        let state = tracker.record_answer("q", true, now).expect("record");
        assert_eq!(state.box_level, expected_box);
        now += docquiz_algo::box_wait(state.box_level);
    }

    // One more correct answer stays parked at the top box.
    let state = tracker.record_answer("q", true, now).expect("record");
    assert_eq!(state.box_level, MAX_BOX);

    // A single miss drops all the way back down.
    let state = tracker.record_answer("q", false, now).expect("record");
    assert_eq!(state.box_level, 0);
    assert_eq!(state.correct_count, MAX_BOX as u32 + 1);
    assert_eq!(state.wrong_count, 1);
}

#[test]
fn json_store_survives_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("learner.json");
    let now = Utc::now();

    {
        let store = JsonHistoryStore::open(&path).expect("open");
        let tracker = HistoryTracker::new(store);
        tracker.record_answer("q1", true, now).expect("record");
        tracker.record_answer("q1", true, now).expect("record");
        tracker.record_answer("q2", false, now).expect("record");
    }

    // "Restart": reopen the document and keep scheduling from it.
    let store = JsonHistoryStore::open(&path).expect("reopen");
    let tracker = HistoryTracker::new(store);

    let q1 = tracker.get_state("q1").expect("state");
    assert_eq!(q1.box_level, 2);
    assert_eq!(q1.correct_count, 2);

    let q2 = tracker.get_state("q2").expect("state");
    assert_eq!(q2.box_level, 0);
    assert_eq!(q2.wrong_count, 1);

    let pool = vec![
        Question::new("q1", "algebra", AnswerKey::TrueFalse { answer: true }),
        Question::new("q2", "algebra", AnswerKey::TrueFalse { answer: true }),
        Question::new("q3", "algebra", AnswerKey::TrueFalse { answer: true }).with_difficulty(3),
    ];
    let mut scheduler = Scheduler::with_seed(SchedulerConfig::default(), 3);
    let selected = scheduler
        .select_questions(&tracker, &pool, 2, now + Duration::seconds(1))
        .expect("select");

    // q3 never attempted, q2 due again (box 0); q1 is cooling in box 2.
    let ids: Vec<&str> = selected.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q3", "q2"]);
}
