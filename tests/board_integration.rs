//! End-to-end tests: the app, the store worker and an in-memory store.

use std::sync::Arc;
use std::time::Duration;

use tasklane_board::OverlayPolicy;
use tasklane_config::PollingConfig;
use tasklane_protocol::{Message, TaskId, TaskStatus, dummy::sample_tasks};
use tasklane_store::{MemoryStore, TaskStore};
use tasklane_tui::App;
use tasklane_tui::state::NotificationLevel;
use tasklane_tui::worker::{StoreCommand, StoreEvent, WorkerHandle, spawn_worker};

/// Feeds worker events to the app until one matches `stop`.
async fn pump_until(
    app: &mut App,
    handle: &mut WorkerHandle,
    stop: impl Fn(&StoreEvent) -> bool,
) {
    loop {
        let event = tokio::time::timeout(Duration::from_secs(5), handle.events.recv())
            .await
            .expect("timed out waiting for the store worker")
            .expect("store worker stopped");
        let done = stop(&event);
        app.handle_store_event(event);
        if done {
            return;
        }
    }
}

async fn start(policy: OverlayPolicy) -> (Arc<MemoryStore>, WorkerHandle, App) {
    let store = Arc::new(MemoryStore::with_tasks(sample_tasks()));
    let mut handle = spawn_worker(store.clone(), &PollingConfig::default());
    let mut app = App::new(policy).connect(handle.commands.clone());
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;
    (store, handle, app)
}

async fn shutdown(handle: WorkerHandle) {
    handle.commands.send(StoreCommand::Shutdown).unwrap();
    handle.join.await.unwrap();
}

fn move_first_todo_right(app: &mut App) {
    app.update(Message::NavigateDown);
    app.update(Message::GrabOrDrop);
    app.update(Message::NavigateRight);
    app.update(Message::GrabOrDrop);
}

#[tokio::test]
async fn keyboard_move_is_confirmed_by_the_store() {
    let (store, mut handle, mut app) = start(OverlayPolicy::default()).await;
    assert_eq!(app.state().stats.total, 8);

    let id = TaskId::from("sample-1");
    move_first_todo_right(&mut app);

    // Shown in its new column before the store answers.
    assert!(app.state().board.pending(&id).is_some());
    assert_eq!(
        app.state().columns().column_of(&id),
        Some(TaskStatus::InProgress)
    );

    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Tasks(_))).await;

    assert!(app.state().board.pending(&id).is_none());
    assert_eq!(
        app.state().columns().column_of(&id),
        Some(TaskStatus::InProgress)
    );
    assert_eq!(
        store.fetch_task(&id).await.unwrap().status,
        TaskStatus::InProgress
    );

    shutdown(handle).await;
}

#[tokio::test]
async fn failed_move_rolls_back_when_configured() {
    let policy = OverlayPolicy {
        rollback_on_failure: true,
        ..OverlayPolicy::default()
    };
    let (store, mut handle, mut app) = start(policy).await;
    store.set_fail_writes(true);

    let id = TaskId::from("sample-1");
    move_first_todo_right(&mut app);
    pump_until(&mut app, &mut handle, |e| {
        matches!(e, StoreEvent::Failed { .. })
    })
    .await;

    assert!(app.state().board.pending(&id).is_none());
    assert_eq!(app.state().columns().column_of(&id), Some(TaskStatus::Todo));
    let notification = app.state().notification.clone().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(store.fetch_task(&id).await.unwrap().status, TaskStatus::Todo);

    shutdown(handle).await;
}

#[tokio::test]
async fn failed_move_stays_pending_by_default() {
    let (store, mut handle, mut app) = start(OverlayPolicy::default()).await;
    store.set_fail_writes(true);

    let id = TaskId::from("sample-1");
    move_first_todo_right(&mut app);
    pump_until(&mut app, &mut handle, |e| {
        matches!(e, StoreEvent::Failed { .. })
    })
    .await;

    assert!(app.state().board.pending(&id).is_some());
    assert_eq!(
        app.state().columns().column_of(&id),
        Some(TaskStatus::InProgress)
    );

    shutdown(handle).await;
}

#[tokio::test]
async fn archived_task_leaves_the_board() {
    let (_store, mut handle, mut app) = start(OverlayPolicy::default()).await;

    app.update(Message::NavigateDown);
    app.update(Message::Archive);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;

    let id = TaskId::from("sample-1");
    assert_eq!(app.state().columns().column_of(&id), None);
    assert_eq!(app.state().stats.total, 7);
    assert_eq!(app.state().stats.archived, 2);

    shutdown(handle).await;
}

#[tokio::test]
async fn status_filter_narrows_the_board() {
    let (_store, mut handle, mut app) = start(OverlayPolicy::default()).await;

    // First status filter step is "To Do".
    app.update(Message::CycleStatusFilter);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Tasks(_))).await;

    let columns = app.state().columns();
    assert_eq!(columns.column(TaskStatus::Todo).len(), 3);
    assert!(columns.column(TaskStatus::Done).is_empty());

    shutdown(handle).await;
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.update(Message::DialogInput { ch });
    }
}

#[tokio::test]
async fn quick_add_creates_a_task_in_the_selected_column() {
    let (_store, mut handle, mut app) = start(OverlayPolicy::default()).await;

    app.update(Message::NavigateRight);
    app.update(Message::NewTask);
    type_text(&mut app, "Write release notes");
    app.update(Message::DialogConfirm);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;

    let selected = app.state().selected_task().unwrap();
    assert_eq!(selected.title, "Write release notes");
    assert_eq!(selected.status, TaskStatus::InProgress);
    assert_eq!(app.state().stats.total, 9);
    assert_eq!(app.state().columns().column(TaskStatus::InProgress).len(), 3);

    shutdown(handle).await;
}

#[tokio::test]
async fn edited_title_reaches_the_store() {
    let (store, mut handle, mut app) = start(OverlayPolicy::default()).await;
    let id = TaskId::from("sample-1");
    let before = store.fetch_task(&id).await.unwrap().title;

    app.update(Message::NavigateDown);
    app.update(Message::EditTask);
    type_text(&mut app, " soon");
    app.update(Message::DialogConfirm);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;

    let expected = format!("{before} soon");
    assert_eq!(store.fetch_task(&id).await.unwrap().title, expected);
    assert_eq!(app.state().selected_task().unwrap().title, expected);

    shutdown(handle).await;
}

#[tokio::test]
async fn confirmed_delete_removes_the_task() {
    let (store, mut handle, mut app) = start(OverlayPolicy::default()).await;
    let id = TaskId::from("sample-1");

    app.update(Message::NavigateDown);
    app.update(Message::DeleteTask);
    assert!(app.state().dialog.is_some());
    app.update(Message::DialogConfirm);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;

    assert!(store.fetch_task(&id).await.is_err());
    assert_eq!(app.state().columns().column_of(&id), None);
    assert_eq!(app.state().stats.total, 7);
    assert!(app.state().notification.clone().unwrap().text.starts_with("Deleted"));

    shutdown(handle).await;
}

#[tokio::test]
async fn archive_can_be_undone() {
    let (_store, mut handle, mut app) = start(OverlayPolicy::default()).await;
    let id = TaskId::from("sample-1");

    app.update(Message::NavigateDown);
    app.update(Message::Archive);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;
    assert_eq!(app.state().columns().column_of(&id), None);

    app.update(Message::UndoArchive);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Stats(_))).await;

    assert_eq!(app.state().columns().column_of(&id), Some(TaskStatus::Todo));
    assert_eq!(app.state().stats.total, 8);
    assert_eq!(app.state().stats.archived, 1);

    shutdown(handle).await;
}

#[tokio::test]
async fn tag_filter_narrows_the_board() {
    let (_store, mut handle, mut app) = start(OverlayPolicy::default()).await;

    // Tags cycle alphabetically; "backend" comes first in the sample data.
    app.update(Message::CycleTagFilter);
    pump_until(&mut app, &mut handle, |e| matches!(e, StoreEvent::Tasks(_))).await;

    assert_eq!(app.state().filter.tags, ["backend"]);
    assert!(!app.state().tasks.is_empty());
    assert!(app.state().tasks.iter().all(|task| task.has_tag("backend")));
    assert!(app.state().tasks.len() < 8);

    shutdown(handle).await;
}
