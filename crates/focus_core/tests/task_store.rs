use chrono::NaiveDate;
use focus_core::{
    add_task, delete_task, reset_day, toggle_task, AppState, FixedClock, ListSelector, PillarId,
    SequentialIds, TaskValidationError,
};

fn setup() -> (AppState, FixedClock, SequentialIds) {
    let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (
        AppState::initial(today),
        FixedClock::new(today, 1_704_153_600_000),
        SequentialIds::new("task"),
    )
}

#[test]
fn add_prepends_trimmed_unchecked_task() {
    let (state, clock, ids) = setup();
    let college = ListSelector::Pillar(PillarId::College);

    let state = add_task(&state, college, "lecture notes", &ids, &clock).unwrap();
    let state = add_task(&state, college, "  problem set  ", &ids, &clock).unwrap();

    let tasks = state.tasks(college).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, "task-2");
    assert_eq!(tasks[0].text, "problem set");
    assert!(!tasks[0].completed);
    assert_eq!(tasks[0].created_at, 1_704_153_600_000);
    assert_eq!(tasks[1].text, "lecture notes");
}

#[test]
fn blank_text_is_rejected_and_state_unchanged() {
    let (state, clock, ids) = setup();

    let err = add_task(&state, ListSelector::General, "   ", &ids, &clock).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyText);
    assert!(state.general_tasks.is_empty());
}

#[test]
fn add_only_touches_selected_list() {
    let (state, clock, ids) = setup();

    let next = add_task(&state, ListSelector::General, "groceries", &ids, &clock).unwrap();
    assert_eq!(next.general_tasks.len(), 1);
    assert!(next.pillars.iter().all(|pillar| pillar.tasks.is_empty()));
    assert_eq!(next.overflow_tasks, state.overflow_tasks);
}

#[test]
fn add_to_pillar_missing_from_stored_state_is_noop() {
    let (mut state, clock, ids) = setup();
    state.pillars.retain(|pillar| pillar.id != PillarId::Job);

    let next = add_task(&state, ListSelector::Pillar(PillarId::Job), "shift", &ids, &clock).unwrap();
    assert_eq!(next, state);
}

#[test]
fn toggle_flips_and_unknown_id_is_noop() {
    let (state, clock, ids) = setup();
    let workout = ListSelector::Pillar(PillarId::Workout);
    let state = add_task(&state, workout, "run 5k", &ids, &clock).unwrap();

    let toggled = toggle_task(&state, workout, "task-1");
    assert!(toggled.tasks(workout).unwrap()[0].completed);
    let toggled_back = toggle_task(&toggled, workout, "task-1");
    assert!(!toggled_back.tasks(workout).unwrap()[0].completed);

    assert_eq!(toggle_task(&state, workout, "missing"), state);
    // Right id, wrong list.
    assert_eq!(toggle_task(&state, ListSelector::General, "task-1"), state);
}

#[test]
fn delete_preserves_order_of_remaining_tasks() {
    let (mut state, clock, ids) = setup();
    for text in ["a", "b", "c"] {
        state = add_task(&state, ListSelector::General, text, &ids, &clock).unwrap();
    }

    let next = delete_task(&state, ListSelector::General, "task-2");
    let texts: Vec<&str> = next.general_tasks.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["c", "a"]);
    assert_eq!(delete_task(&next, ListSelector::General, "task-2"), next);
}

#[test]
fn reset_day_unchecks_everything_but_keeps_ledger_and_dates() {
    let (state, clock, ids) = setup();
    let state = add_task(&state, ListSelector::General, "email", &ids, &clock).unwrap();
    let state = add_task(&state, ListSelector::Pillar(PillarId::Upskilling), "course", &ids, &clock)
        .unwrap();
    let mut state = toggle_task(&state, ListSelector::General, "task-1");
    state = toggle_task(&state, ListSelector::Pillar(PillarId::Upskilling), "task-2");
    state.streak = 3;
    state.last_completed_date = Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

    let next = reset_day(&state);
    assert!(next.all_tasks().all(|task| !task.completed));
    assert_eq!(next.streak, 3);
    assert_eq!(next.last_completed_date, state.last_completed_date);
    assert_eq!(next.last_active_date, state.last_active_date);
    assert_eq!(next.overflow_tasks, state.overflow_tasks);
}


#[test]
fn rejected_add_does_not_consume_an_id() {
    let (state, clock, ids) = setup();

    add_task(&state, ListSelector::General, " \t ", &ids, &clock).unwrap_err();
    let state = add_task(&state, ListSelector::General, "groceries", &ids, &clock).unwrap();

    assert_eq!(state.general_tasks[0].id, "task-1");
}
