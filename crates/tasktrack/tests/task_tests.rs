//! Task API integration tests.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::test_app;

#[tokio::test]
async fn test_task_routes_require_session() {
    let app = test_app().await;

    assert_eq!(
        app.get("/task/usertasks", None).await.status,
        StatusCode::UNAUTHORIZED
    );
    let resp = app
        .post("/task/create", None, json!({"task_Name": "x"}))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    let resp = app
        .send(Method::PUT, "/task/update/1", None, Some(json!({})))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    let resp = app.send(Method::DELETE, "/task/delete/1", None, None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_own_tasks() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;
    let bob = app.signed_in("b@x.com", "bob").await;

    let id = app.create_task(&alice, "Write report", "Pending").await;
    app.create_task(&bob, "Bob's task", "Pending").await;

    let resp = app.get("/task/usertasks", Some(&alice)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let tasks = resp.body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["taskID"], id);
    assert_eq!(tasks[0]["task_Name"], "Write report");
    assert_eq!(tasks[0]["task_Status"], "Pending");
    assert_eq!(tasks[0]["task_Priority"], 1);
    assert_eq!(tasks[0]["isDeleted"], false);
}

#[tokio::test]
async fn test_create_accepts_capitalised_field_names() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;

    let resp = app
        .post(
            "/task/create",
            Some(&alice),
            json!({
                "Task_Name": "n",
                "Task_Description": "d",
                "Task_Status": "Completed",
                "Task_Priority": 3
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["message"], "Task Created Successfully");
    assert_eq!(resp.body["task"]["task_Priority"], 3);
}

#[tokio::test]
async fn test_create_validation() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;

    let resp = app
        .post("/task/create", Some(&alice), json!({"task_Name": "only a name"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["details"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_precedence_and_ownership() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;
    let bob = app.signed_in("b@x.com", "bob").await;
    let id = app.create_task(&alice, "mine", "Pending").await;

    let body = json!({"task_Status": "Completed"});

    let resp = app
        .send(Method::PUT, &format!("/task/update/{id}"), Some(&bob), Some(body.clone()))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .send(Method::PUT, "/task/update/9999", Some(&bob), Some(body.clone()))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .send(Method::PUT, &format!("/task/update/{id}"), Some(&alice), Some(body))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["task"]["task_Status"], "Completed");
    assert_eq!(resp.body["task"]["task_Name"], "mine");
}

#[tokio::test]
async fn test_update_rejects_bad_priority_and_non_object() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;
    let id = app.create_task(&alice, "mine", "Pending").await;
    let uri = format!("/task/update/{id}");

    let resp = app
        .send(Method::PUT, &uri, Some(&alice), Some(json!({"task_Priority": "high"})))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .send(Method::PUT, &uri, Some(&alice), Some(json!(["task_Priority", 1])))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .send(Method::PUT, &uri, Some(&alice), Some(json!({"task_priority": "7"})))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["task"]["task_Priority"], 7);
}

#[tokio::test]
async fn test_soft_delete() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;
    let bob = app.signed_in("b@x.com", "bob").await;
    let id = app.create_task(&alice, "mine", "Pending").await;
    let uri = format!("/task/delete/{id}");

    let resp = app.send(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app.get("/task/usertasks", Some(&alice)).await;
    assert!(resp.body.as_array().unwrap().is_empty());

    let resp = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .send(
            Method::PUT,
            &format!("/task/update/{id}"),
            Some(&alice),
            Some(json!({"task_Status": "Completed"})),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_filter() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;
    app.create_task(&alice, "a", "In Progress").await;
    app.create_task(&alice, "b", "Pending").await;
    app.create_task(&alice, "c", "Completed").await;

    let resp = app.get("/task/usertask/InProgress", Some(&alice)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let tasks = resp.body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["task_Name"], "a");

    let resp = app.get("/task/usertask/Pending", Some(&alice)).await;
    assert_eq!(resp.body.as_array().unwrap().len(), 1);

    let resp = app.get("/task/usertask/In%20Progress", Some(&alice)).await;
    assert_eq!(resp.body.as_array().unwrap().len(), 1);

    let resp = app.get("/task/usertask/pending", Some(&alice)).await;
    assert!(resp.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_is_json_bad_request() {
    let app = test_app().await;
    let alice = app.signed_in("a@x.com", "alice123").await;
    let admin = app.signed_in_admin("root@x.com", "root").await;

    let responses = [
        app.send(
            Method::PUT,
            "/task/update/abc",
            Some(&alice),
            Some(json!({"task_Status": "Completed"})),
        )
        .await,
        app.send(Method::DELETE, "/task/delete/abc", Some(&alice), None)
            .await,
        app.get("/admin/users/abc/tasks", Some(&admin)).await,
    ];

    for resp in responses {
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["code"], "BAD_REQUEST");
        assert!(resp.body["error"].is_string());
    }

    // Anonymous callers are still turned away first.
    let resp = app.send(Method::DELETE, "/task/delete/abc", None, None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
