//! End-to-end: a real server on an ephemeral port, the HTTP client, and a
//! Gemini endpoint that always fails.

use std::sync::Arc;

use taskdeck_ai::{FALLBACK_SUBTASKS, GeminiConfig, GeminiSubtaskProvider};
use taskdeck_client::{Board, Connectivity, HttpTaskClient, TaskApi};
use taskdeck_core::{TaskFilter, TaskPriority};
use taskdeck_server::{ServerConfig, TaskServer};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    api_url: String,
    _gemini: MockServer,
    board: Board,
    shutdown: Arc<taskdeck_server::ShutdownCoordinator>,
}

async fn start() -> Harness {
    let pool = taskdeck_store::connection::open_in_memory().unwrap();
    let server = TaskServer::new(
        ServerConfig {
            port: 0,
            ..ServerConfig::default()
        },
        pool,
    );
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = server.shutdown().clone();
    let _ = tokio::spawn(server.serve(listener));

    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&gemini)
        .await;

    let api_url = format!("http://{addr}/api/tasks");
    let api = Arc::new(HttpTaskClient::new(api_url.clone()));
    let ai = Arc::new(GeminiSubtaskProvider::new(GeminiConfig {
        base_url: gemini.uri(),
        ..GeminiConfig::with_api_key("test-key")
    }));

    Harness {
        api_url,
        _gemini: gemini,
        board: Board::new(api, ai),
        shutdown,
    }
}

#[tokio::test]
async fn buy_milk_lifecycle() {
    let mut h = start().await;
    h.board.load().await;
    assert_eq!(h.board.connectivity(), Connectivity::Online);
    assert!(h.board.tasks().is_empty());

    h.board.set_title("Walk dog");
    h.board.add_task().await;
    h.board.set_title("Buy milk");
    h.board.set_priority(TaskPriority::Low);
    h.board.add_task().await;

    let first = h.board.tasks()[0].clone();
    assert_eq!(first.title, "Buy milk");
    assert_eq!(first.priority, TaskPriority::Low);
    assert!(!first.completed);
    assert!(first.subtasks.is_empty());

    // The server agrees on order
    h.board.load().await;
    assert_eq!(h.board.tasks()[0].id, first.id);
    assert_eq!(h.board.tasks()[1].title, "Walk dog");

    h.board.toggle_completed(&first.id).await;
    let toggled = h.board.task(&first.id).unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.id, first.id);

    h.board.breakdown(&first.id).await;
    assert_eq!(h.board.task(&first.id).unwrap().subtasks, FALLBACK_SUBTASKS);
    assert!(h.board.is_expanded(&first.id));

    // Stored server-side, not only in the cache
    h.board.load().await;
    assert_eq!(h.board.task(&first.id).unwrap().subtasks, FALLBACK_SUBTASKS);

    h.board.delete_task(&first.id).await;
    for filter in TaskFilter::ALL {
        h.board.set_filter(filter);
        assert!(h.board.visible_tasks().iter().all(|t| t.id != first.id));
    }
    h.board.load().await;
    assert!(h.board.task(&first.id).is_none());
    assert!(h.board.error_message().is_none());

    h.shutdown.shutdown();
}

#[tokio::test]
async fn deleting_missing_task_succeeds() {
    let h = start().await;
    let api = HttpTaskClient::new(h.api_url.clone());
    api.delete_task("task-does-not-exist").await.unwrap();
    h.shutdown.shutdown();
}

#[tokio::test]
async fn offline_board_after_server_stops() {
    let mut h = start().await;
    h.shutdown.shutdown();
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    h.board.load().await;
    assert_eq!(h.board.connectivity(), Connectivity::Offline);
    let address = h.api_url.trim_start_matches("http://").trim_end_matches("/api/tasks");
    assert_eq!(
        h.board.error_message().unwrap(),
        format!("The backend server ({address}) is unreachable. Please ensure it is running.")
    );
}
