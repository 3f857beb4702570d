//! HTTP router tests over the shapes fixture.

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use class_structure::adapters::ordering::KindVisibilityName;
use class_structure::app::engine::ModelEngine;
use class_structure::server::http::build_router;
use common::fixtures::{shapes_snapshot, write_snapshot};
use tempfile::TempDir;
use tower::ServiceExt;

fn router() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(dir.path(), "shapes.json", &shapes_snapshot());
    let engine = ModelEngine::load_from_json(&path, Arc::new(KindVisibilityName)).unwrap();
    (dir, build_router(engine))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_and_classes() {
    let (_dir, app) = router();

    let (status, health) = call(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["class_count"], 11);
    assert_eq!(health["placeholder_count"], 2);

    let (status, classes) = call(&app, Method::GET, "/classes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(classes["total"], 11);
    assert_eq!(classes["items"][0]["id"], "geo.AbstractShape");
    assert_eq!(classes["items"][0]["style"]["bold"], true);
}

#[tokio::test]
async fn test_hierarchy_root_query() {
    let (_dir, app) = router();
    let (status, body) = call(&app, Method::GET, "/hierarchy?root=geo.AbstractShape").await;
    assert_eq!(status, StatusCode::OK);
    let root = &body["roots"][0];
    assert_eq!(root["subtree_classes_count"], 2);
    assert_eq!(root["children"][1]["class"]["id"], "geo.Square");
}

#[tokio::test]
async fn test_members_tree_json_shape() {
    let (_dir, app) = router();
    let (status, body) = call(&app, Method::GET, "/members?class=geo.Circle$Builder").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "class");
    assert_eq!(body["class"]["name"], "Builder");

    let relations = &body["children"][1];
    assert_eq!(relations["marker"], "RELATIONS");
    let markers: Vec<&str> = relations["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["marker"].as_str().unwrap())
        .collect();
    assert_eq!(markers, vec!["ASSOCIATION:OUTBOUND", "INNER_CLASS:INBOUND"]);
}

#[tokio::test]
async fn test_uml_and_summary() {
    let (_dir, app) = router();

    let (status, uml) = call(&app, Method::GET, "/uml?class=geo.AbstractShape").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(uml["parents"][0]["text"], "Object");
    assert_eq!(uml["sections"][0]["kind"], "FIELDS");
    assert_eq!(uml["sections"][0]["rows"][0]["text"], "# name : String");
    assert_eq!(
        uml["sections"][1]["rows"][0]["text"],
        "+ AbstractShape( name : String )"
    );

    let (status, summary) = call(&app, Method::GET, "/summary?class=geo.Canvas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["uses"], 3);
    assert_eq!(summary["cells"][2], " ");
}

#[tokio::test]
async fn test_unknown_class_and_missing_query() {
    let (_dir, app) = router();

    let (status, body) = call(&app, Method::GET, "/summary?class=geo.Triangle").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Class not found: geo.Triangle");

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/uml").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reload() {
    let (_dir, app) = router();
    let (status, body) = call(&app, Method::POST, "/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed_count"], 9);
}
