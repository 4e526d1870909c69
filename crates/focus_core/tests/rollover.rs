use chrono::NaiveDate;
use focus_core::{
    run_rollover, AppState, FixedClock, ListSelector, OverflowTask, PillarId, RolloverEngine,
    RolloverOutcome, SequentialIds, Task,
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn task(id: &str, text: &str, completed: bool) -> Task {
    let mut task = Task::new(id, text, 0).unwrap();
    task.completed = completed;
    task
}

fn state_active_on(date: &str) -> AppState {
    let mut state = AppState::initial(day(date));
    state
        .tasks_mut(ListSelector::Pillar(PillarId::Job))
        .unwrap()
        .extend([task("j1", "inventory count", false), task("j2", "timesheet", true)]);
    state
        .tasks_mut(ListSelector::Pillar(PillarId::Upskilling))
        .unwrap()
        .push(task("u1", "rust chapter", true));
    state.general_tasks.extend([
        task("g1", "call bank", false),
        task("g2", "pay rent", false),
    ]);
    state.streak = 4;
    state.last_completed_date = Some(day("2023-12-31"));
    state
}

fn incomplete_count(state: &AppState) -> usize {
    state.all_tasks().filter(|task| !task.completed).count()
}

#[test]
fn single_incomplete_pillar_task_is_archived_with_due_date() {
    let mut state = AppState::initial(day("2024-01-01"));
    state
        .tasks_mut(ListSelector::Pillar(PillarId::College))
        .unwrap()
        .push(task("c1", "lab report", false));
    let clock = FixedClock::new(day("2024-01-02"), 1_000);
    let ids = SequentialIds::new("ovf");

    let (next, outcome) = run_rollover(&state, day("2024-01-02"), &ids, &clock);

    assert_eq!(
        outcome,
        RolloverOutcome::Audited {
            missed_date: day("2024-01-01"),
            harvested: 1
        }
    );
    let college = next.tasks(ListSelector::Pillar(PillarId::College)).unwrap();
    assert_eq!(college.len(), 1);
    assert_eq!(college[0].id, "c1");
    assert!(!college[0].completed);

    assert_eq!(next.overflow_tasks.len(), 1);
    let entry = &next.overflow_tasks[0];
    assert_eq!(entry.text, "lab report");
    assert_eq!(entry.origin_pillar_title, "College");
    assert_eq!(entry.date_missed, day("2024-01-01"));
    assert_eq!(entry.created_at, 1_000);
    assert_eq!(next.last_active_date, day("2024-01-02"));
}

#[test]
fn same_day_activation_changes_nothing() {
    let state = state_active_on("2024-01-02");
    let clock = FixedClock::new(day("2024-01-02"), 0);
    let ids = SequentialIds::new("ovf");

    let (next, outcome) = run_rollover(&state, day("2024-01-02"), &ids, &clock);

    assert_eq!(outcome, RolloverOutcome::AlreadyAudited);
    assert_eq!(next, state);
}

#[test]
fn harvest_count_equals_incomplete_count_and_all_tasks_reset() {
    let state = state_active_on("2024-01-01");
    let clock = FixedClock::new(day("2024-01-02"), 0);
    let ids = SequentialIds::new("ovf");

    let (next, outcome) = run_rollover(&state, day("2024-01-02"), &ids, &clock);

    assert_eq!(next.overflow_tasks.len(), incomplete_count(&state));
    assert!(matches!(outcome, RolloverOutcome::Audited { harvested: 3, .. }));
    assert!(next.all_tasks().all(|task| !task.completed));
    assert_eq!(next.all_tasks().count(), state.all_tasks().count());
}

#[test]
fn new_batch_is_prepended_ahead_of_existing_entries() {
    let mut state = state_active_on("2024-01-01");
    state.overflow_tasks.push(OverflowTask {
        id: "old".to_string(),
        text: "old debt".to_string(),
        origin_pillar_title: "Workout".to_string(),
        date_missed: day("2023-12-20"),
        created_at: 5,
    });
    let clock = FixedClock::new(day("2024-01-02"), 0);
    let ids = SequentialIds::new("ovf");

    let (next, _) = run_rollover(&state, day("2024-01-02"), &ids, &clock);

    let order: Vec<&str> = next
        .overflow_tasks
        .iter()
        .map(|entry| entry.text.as_str())
        .collect();
    assert_eq!(
        order,
        vec!["inventory count", "call bank", "pay rent", "old debt"]
    );
}

#[test]
fn rollover_leaves_streak_fields_alone() {
    let state = state_active_on("2024-01-01");
    let clock = FixedClock::new(day("2024-01-05"), 0);
    let ids = SequentialIds::new("ovf");

    let (next, _) = run_rollover(&state, day("2024-01-05"), &ids, &clock);

    assert_eq!(next.streak, 4);
    assert_eq!(next.last_completed_date, Some(day("2023-12-31")));
}

#[test]
fn multi_day_absence_produces_one_batch_stamped_with_last_active_date() {
    let state = state_active_on("2024-01-01");
    let clock = FixedClock::new(day("2024-01-04"), 0);
    let ids = SequentialIds::new("ovf");

    let (next, _) = run_rollover(&state, day("2024-01-04"), &ids, &clock);

    assert_eq!(next.overflow_tasks.len(), 3);
    assert!(next
        .overflow_tasks
        .iter()
        .all(|entry| entry.date_missed == day("2024-01-01")));
    assert_eq!(next.last_active_date, day("2024-01-04"));
}

#[test]
fn clock_behind_last_active_date_keeps_date_monotonic() {
    let state = state_active_on("2024-01-05");
    let clock = FixedClock::new(day("2024-01-03"), 0);
    let ids = SequentialIds::new("ovf");

    let (next, outcome) = run_rollover(&state, day("2024-01-03"), &ids, &clock);

    assert_eq!(
        outcome,
        RolloverOutcome::ClockBehind {
            last_active_date: day("2024-01-05")
        }
    );
    assert_eq!(next, state);
}

#[test]
fn engine_audits_at_most_once_per_activation() {
    let state = state_active_on("2024-01-01");
    let clock = FixedClock::new(day("2024-01-02"), 0);
    let ids = SequentialIds::new("ovf");
    let mut engine = RolloverEngine::new();
    assert_eq!(engine.outcome(), None);

    let (first, outcome) = engine.activate(&state, day("2024-01-02"), &ids, &clock);
    assert!(outcome.is_audited());

    // Even if the calendar moves on, this activation has already audited.
    let (second, repeated) = engine.activate(&first, day("2024-01-03"), &ids, &clock);
    assert_eq!(second, first);
    assert_eq!(repeated, outcome);
    assert_eq!(engine.outcome(), Some(outcome));
}

#[test]
fn running_twice_on_same_date_is_idempotent() {
    let state = state_active_on("2024-01-01");
    let clock = FixedClock::new(day("2024-01-02"), 0);
    let ids = SequentialIds::new("ovf");

    let (once, _) = run_rollover(&state, day("2024-01-02"), &ids, &clock);
    let (twice, outcome) = run_rollover(&once, day("2024-01-02"), &ids, &clock);

    assert_eq!(outcome, RolloverOutcome::AlreadyAudited);
    assert_eq!(twice, once);
}
