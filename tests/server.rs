//! Boots the built-in modules behind a real listener.

use std::sync::Arc;
use std::time::Duration;

use module_host::config::{Environment, HostConfig};
use module_host::lifecycle::{ModuleHost, Shutdown};
use module_host::modules::builtin_catalog;
use module_host::{HttpServer, ServiceCollection};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_builtin_modules_serve_requests_until_shutdown() {
    let config = HostConfig::default();
    let host = ModuleHost::new(builtin_catalog().unwrap(), Environment::from(&config.environment));

    let mut services = ServiceCollection::new();
    services.add_singleton(Arc::new(config.modules.clone()));
    let activation = host
        .activate_with(config.modules.enabled.as_slice(), services)
        .expect("built-in modules should activate");
    assert_eq!(activation.order, vec!["request-tracing", "health", "diagnostics"]);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(activation.router, &config);
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    let client = reqwest::Client::new();

    let health = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    assert!(health.headers().contains_key("x-request-id"));
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");

    let modules = client
        .get(format!("http://{addr}/_modules"))
        .header("x-request-id", "integration-1")
        .send()
        .await
        .unwrap();
    assert_eq!(modules.status(), 200);
    assert_eq!(modules.headers()["x-request-id"], "integration-1");
    let body: serde_json::Value = modules.json().await.unwrap();
    assert_eq!(
        body["modules"],
        serde_json::json!(["request-tracing", "health", "diagnostics"])
    );

    let missing = client
        .get(format!("http://{addr}/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    drop(client);
    shutdown.trigger("test finished");
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
