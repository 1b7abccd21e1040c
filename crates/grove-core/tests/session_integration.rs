//! End-to-end session scenarios driven through the App context.

use grove_core::{App, Category, Database, Event, Settings, SessionPhase};

fn memory_app() -> App<Database> {
    App::init(Database::open_in_memory().unwrap())
}

#[test]
fn full_default_session_grows_one_tree() {
    let mut app = memory_app();
    assert_eq!(app.settings().focus_minutes, 25);
    assert!(app.settings().sound_enabled);
    assert_eq!(app.settings().notification_threshold_hours, 2.0);

    app.set_category(Category::Study);
    assert!(app.start().is_some());

    let mut completions = 0;
    let mut levels_seen = Vec::new();
    for _ in 0..1500 {
        for event in app.tick() {
            match event {
                Event::SessionCompleted { category, focus_minutes, .. } => {
                    completions += 1;
                    assert_eq!(category, Category::Study);
                    assert_eq!(focus_minutes, 25);
                }
                Event::TreeLeveled { level, .. } => levels_seen.push(level),
                _ => {}
            }
        }
    }

    assert_eq!(completions, 1);
    // One level per 300 s: levels 2..=5 fire before the 1500 s completion.
    assert_eq!(levels_seen, vec![2, 3, 4, 5]);
    assert_eq!(app.stats().trees_grown, 1);
    assert_eq!(app.stats().sessions_completed, 1);
    assert_eq!(app.stats().focus_minutes, 25);
    assert_eq!(app.session().phase(), SessionPhase::Idle);
    assert_eq!(app.session().elapsed_secs(), 0);
    assert_eq!(app.session().level(), 1);
}

#[test]
fn ticks_beyond_completion_do_not_double_count() {
    let mut app = memory_app();
    app.update_settings(Settings {
        focus_minutes: 1,
        ..Settings::default()
    })
    .unwrap();

    app.start();
    for _ in 0..120 {
        app.tick();
    }
    // The clock went idle after the 60th tick; the rest were no-ops.
    assert_eq!(app.stats().sessions_completed, 1);
}

#[test]
fn abandoned_sessions_leave_no_statistics() {
    let mut app = memory_app();
    app.start();
    for _ in 0..600 {
        app.tick();
    }
    app.reset();
    assert_eq!(app.stats().sessions_completed, 0);
    assert_eq!(app.stats().trees_grown, 0);
    assert_eq!(app.stats().total_trees, 0);
    assert_eq!(app.session().phase(), SessionPhase::Idle);
}

#[test]
fn milestone_fires_once_at_threshold() {
    let mut app = memory_app();
    app.update_settings(Settings {
        focus_minutes: 10,
        notification_threshold_hours: 0.1,
        ..Settings::default()
    })
    .unwrap();

    app.start();
    let mut milestones = 0;
    for _ in 0..600 {
        for event in app.tick() {
            if let Event::MilestoneReached { hours, .. } = event {
                milestones += 1;
                assert!((hours - 0.1).abs() < f64::EPSILON);
            }
        }
    }
    assert_eq!(milestones, 1);
}

#[test]
fn pause_suspends_elapsed_time() {
    let mut app = memory_app();
    app.start();
    for _ in 0..30 {
        app.tick();
    }
    app.toggle_pause();
    for _ in 0..30 {
        assert!(app.tick().is_empty());
    }
    assert_eq!(app.session().elapsed_secs(), 30);
    app.toggle_pause();
    app.tick();
    assert_eq!(app.session().elapsed_secs(), 31);
}
