//! End-to-end pipeline tests.
//!
//! Drives the real router (registrar + authorization gate + handler +
//! envelope) with an in-memory route store and a scripted command
//! runner, so every outcome of the request pipeline is exercised
//! without MySQL or an SSH host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use exec_gateway::exec::{CommandOutput, CommandRunner, ExecError, ExecResult, ExecTarget};
use exec_gateway::http::Envelope;
use exec_gateway::routing::RegistrarError;
use exec_gateway::store::{RouteDefinition, RouteSpec, RouteStore, StoreError, StoreResult};
use exec_gateway::HttpServer;

/// In-memory route store keyed by (method, path).
struct MemoryStore {
    rows: HashMap<(String, String), RouteSpec>,
    /// Pairs that should report an ambiguous fetch.
    ambiguous: Vec<(String, String)>,
}

impl MemoryStore {
    fn new(rows: Vec<(&str, &str, RouteSpec)>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|(m, p, spec)| ((m.to_string(), p.to_string()), spec))
                .collect(),
            ambiguous: Vec::new(),
        }
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn list_routes(&self) -> StoreResult<Vec<RouteDefinition>> {
        Ok(self
            .rows
            .keys()
            .map(|(method, path)| RouteDefinition {
                method: method.clone(),
                path: path.clone(),
            })
            .collect())
    }

    async fn route_config(&self, method: &str, path: &str) -> StoreResult<RouteSpec> {
        let key = (method.to_string(), path.to_string());
        if self.ambiguous.contains(&key) {
            return Err(StoreError::Ambiguous {
                method: method.to_string(),
                path: path.to_string(),
                count: 2,
            });
        }
        self.rows.get(&key).cloned().ok_or(StoreError::Missing {
            method: method.to_string(),
            path: path.to_string(),
        })
    }
}

/// What the scripted runner should do when invoked.
#[derive(Clone)]
enum Script {
    Succeed { stdout: &'static str, stderr: &'static str },
    ConnectFail,
    ExecuteFail,
}

struct ScriptedRunner {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedRunner {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, _target: &ExecTarget, _command: &str) -> ExecResult<CommandOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Succeed { stdout, stderr } => Ok(CommandOutput {
                stdout: (*stdout).to_string(),
                stderr: (*stderr).to_string(),
            }),
            Script::ConnectFail => Err(ExecError::Connect("connection refused".to_string())),
            Script::ExecuteFail => Err(ExecError::Execution("exit status 2".to_string())),
        }
    }
}

fn spec(token_type: &str, token_value: &str) -> RouteSpec {
    RouteSpec {
        token_type: token_type.to_string(),
        token_value: token_value.to_string(),
        ssh_authorize_type: "password".to_string(),
        ssh_authorize_value: "pw".to_string(),
        ssh_host: "10.0.0.5".to_string(),
        ssh_port: "22".to_string(),
        ssh_user: "deploy".to_string(),
        ssh_command: "uptime".to_string(),
    }
}

fn router(store: MemoryStore, runner: Arc<ScriptedRunner>) -> Router {
    let routes: Vec<RouteDefinition> = store
        .rows
        .keys()
        .map(|(method, path)| RouteDefinition {
            method: method.clone(),
            path: path.clone(),
        })
        .collect();

    HttpServer::new(&routes, Arc::new(store), runner)
        .expect("router builds")
        .into_router()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Envelope) {
    let response = router.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let envelope = serde_json::from_slice(&bytes).expect("envelope json");
    (status, envelope)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn get_with_auth(path: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header("Authorization", auth)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_open_route_executes_without_header() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "hello\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]),
        runner.clone(),
    );

    let (status, body) = send(&router, get("/uptime")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Envelope::success("hello\n"));
    assert_eq!(runner.calls(), 1);
}

#[tokio::test]
async fn test_open_route_is_idempotent() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "static output\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]),
        runner,
    );

    let (_, first) = send(&router, get("/uptime")).await;
    let (_, second) = send(&router, get("/uptime")).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_static_secret_match_executes() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/restart", spec("static", "s3cr3t"))]),
        runner.clone(),
    );

    let (status, body) = send(&router, get_with_auth("/restart", "s3cr3t")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, 200);
    assert_eq!(runner.calls(), 1);
}

#[tokio::test]
async fn test_static_secret_mismatch_is_401() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/restart", spec("static", "s3cr3t"))]),
        runner.clone(),
    );

    let (status, body) = send(&router, get_with_auth("/restart", "wrong")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Envelope::not_authorized());
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn test_static_secret_missing_header_is_401() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/restart", spec("static", "s3cr3t"))]),
        runner.clone(),
    );

    let (_, body) = send(&router, get("/restart")).await;

    assert_eq!(body, Envelope::not_authorized());
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn test_reserved_token_modes_are_501() {
    for token_type in ["bearer", "custom"] {
        let runner = ScriptedRunner::new(Script::Succeed {
            stdout: "ok\n",
            stderr: "",
        });
        let router = router(
            MemoryStore::new(vec![("GET", "/restart", spec(token_type, "x"))]),
            runner.clone(),
        );

        let (status, body) = send(&router, get_with_auth("/restart", "x")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Envelope::not_implemented());
        assert_eq!(runner.calls(), 0);
    }
}

#[tokio::test]
async fn test_private_key_mode_is_501_without_connecting() {
    let mut row = spec("open", "");
    row.ssh_authorize_type = "private_key".to_string();
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(MemoryStore::new(vec![("GET", "/deploy", row)]), runner.clone());

    let (_, body) = send(&router, get("/deploy")).await;

    assert_eq!(body, Envelope::not_implemented());
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn test_connect_failure_is_500() {
    let runner = ScriptedRunner::new(Script::ConnectFail);
    let router = router(
        MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]),
        runner,
    );

    let (status, body) = send(&router, get("/uptime")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Envelope::remote_failed());
    assert_eq!(body.message, "Failed to remote server");
}

#[tokio::test]
async fn test_execution_failure_is_500() {
    let runner = ScriptedRunner::new(Script::ExecuteFail);
    let router = router(
        MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]),
        runner,
    );

    let (status, body) = send(&router, get("/uptime")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Envelope::execute_failed());
    assert_eq!(body.message, "Failed execute command");
}

#[tokio::test]
async fn test_stderr_masks_stdout_on_success() {
    // Preserved precedence: any stderr content wins over stdout, even
    // when the command succeeded.
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "hello\n",
        stderr: "warn\n",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]),
        runner,
    );

    let (_, body) = send(&router, get("/uptime")).await;

    assert_eq!(body, Envelope::success("warn\n"));
}

#[tokio::test]
async fn test_missing_config_row_is_recovered_500() {
    // The route is registered but its configuration row is gone at
    // request time; the process must answer, not crash.
    let store = MemoryStore {
        rows: HashMap::new(),
        ambiguous: Vec::new(),
    };
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let routes = vec![RouteDefinition {
        method: "GET".to_string(),
        path: "/orphan".to_string(),
    }];
    let router = HttpServer::new(&routes, Arc::new(store), runner)
        .unwrap()
        .into_router();

    let (status, body) = send(&router, get("/orphan")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Envelope::internal_error());
}

#[tokio::test]
async fn test_ambiguous_config_row_is_recovered_500() {
    let mut store = MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]);
    store
        .ambiguous
        .push(("GET".to_string(), "/uptime".to_string()));
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(store, runner.clone());

    let (_, body) = send(&router, get("/uptime")).await;

    assert_eq!(body, Envelope::internal_error());
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn test_bad_port_row_is_recovered_500() {
    let mut row = spec("open", "");
    row.ssh_port = "not-a-port".to_string();
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(MemoryStore::new(vec![("GET", "/uptime", row)]), runner.clone());

    let (_, body) = send(&router, get("/uptime")).await;

    assert_eq!(body, Envelope::internal_error());
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn test_duplicate_route_rows_rejected_at_startup() {
    let routes = vec![
        RouteDefinition {
            method: "GET".to_string(),
            path: "/uptime".to_string(),
        },
        RouteDefinition {
            method: "GET".to_string(),
            path: "/uptime".to_string(),
        },
    ];
    let store = MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]);
    let runner = ScriptedRunner::new(Script::ConnectFail);

    let err = HttpServer::new(&routes, Arc::new(store), runner).err();

    assert!(matches!(err, Some(RegistrarError::DuplicateRoute { .. })));
}

#[tokio::test]
async fn test_unregistered_path_is_transport_404() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("GET", "/uptime", spec("open", ""))]),
        runner,
    );

    let response = router.clone().oneshot(get("/nowhere")).await.unwrap();

    // Only configured routes carry the envelope contract.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_method_is_part_of_route_identity() {
    let runner = ScriptedRunner::new(Script::Succeed {
        stdout: "ok\n",
        stderr: "",
    });
    let router = router(
        MemoryStore::new(vec![("POST", "/restart", spec("open", ""))]),
        runner,
    );

    let response = router.clone().oneshot(get("/restart")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
