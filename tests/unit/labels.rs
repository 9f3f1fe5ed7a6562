use axum::http::StatusCode;
use serde_json::json;

use crate::{
    OWNER_ID, PRIVATE_REPO, READ_ONLY_REPO, READER_ID, WRITABLE_REPO, WRITER_ID, create_test_jwt,
    send, setup,
};

fn labels_uri(repo_id: i64) -> String {
    format!("/api/v1/repos/{}/labels", repo_id)
}

fn label_uri(repo_id: i64, label_id: i64) -> String {
    format!("/api/v1/repos/{}/labels/{}", repo_id, label_id)
}

#[tokio::test]
async fn label_lifecycle_on_writable_repository() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    let created = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(token.as_str()),
        Some(r##"{"name":"bug","color":"#ff0000"}"##),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let data = &created.body["data"];
    assert_eq!(data["name"], "bug");
    assert_eq!(data["color"], "#ff0000");
    assert_eq!(data["repository_id"], WRITABLE_REPO);
    let id = data["id"].as_i64().unwrap();
    assert_eq!(
        data["url"],
        format!("http://localhost:3000/api/v1/repos/{}/labels/{}", WRITABLE_REPO, id)
    );

    let edited = send(
        &t.app,
        "PATCH",
        &label_uri(WRITABLE_REPO, id),
        Some(token.as_str()),
        Some(r##"{"color":"#00ff00"}"##),
    )
    .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["data"]["id"], id);
    assert_eq!(edited.body["data"]["name"], "bug");
    assert_eq!(edited.body["data"]["color"], "#00ff00");

    let fetched = send(&t.app, "GET", &label_uri(WRITABLE_REPO, id), Some(token.as_str()), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"], edited.body["data"]);

    let deleted = send(&t.app, "DELETE", &label_uri(WRITABLE_REPO, id), Some(token.as_str()), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_null());

    let gone = send(&t.app, "GET", &label_uri(WRITABLE_REPO, id), Some(token.as_str()), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["errors"][0]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn mutations_without_write_access_are_forbidden() {
    let t = setup();
    let owner = create_test_jwt(OWNER_ID);
    let reader = create_test_jwt(READER_ID);

    let existing = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(owner.as_str()),
        Some(r##"{"name":"bug","color":"#ff0000"}"##),
    )
    .await;
    let id = existing.body["data"]["id"].as_i64().unwrap();

    let create = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(reader.as_str()),
        Some(r##"{"name":"nope","color":"#000000"}"##),
    )
    .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
    assert_eq!(create.body["errors"][0]["code"], "FORBIDDEN");

    let edit = send(
        &t.app,
        "PATCH",
        &label_uri(WRITABLE_REPO, id),
        Some(reader.as_str()),
        Some(r#"{"name":"renamed"}"#),
    )
    .await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);

    let delete = send(&t.app, "DELETE", &label_uri(WRITABLE_REPO, id), Some(reader.as_str()), None).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let list = send(&t.app, "GET", &labels_uri(WRITABLE_REPO), Some(reader.as_str()), None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["meta"]["total_count"], 1);
    assert_eq!(list.body["data"][0]["name"], "bug");
}

#[tokio::test]
async fn read_only_repository_rejects_create() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    let create = send(
        &t.app,
        "POST",
        &labels_uri(READ_ONLY_REPO),
        Some(token.as_str()),
        Some(r##"{"name":"bug","color":"#ff0000"}"##),
    )
    .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let list = send(&t.app, "GET", &labels_uri(READ_ONLY_REPO), Some(token.as_str()), None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"], json!([]));
    assert!(t.labels.is_empty());
}

#[tokio::test]
async fn create_ignores_client_supplied_repository() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    let created = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(token.as_str()),
        Some(
            json!({"name": "bug", "color": "#ff0000", "repository_id": READ_ONLY_REPO, "id": 500})
                .to_string()
                .as_str(),
        ),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["repository_id"], WRITABLE_REPO);
    assert_ne!(created.body["data"]["id"], 500);
}

#[tokio::test]
async fn create_requires_name_and_color() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    for body in [
        r##"{"name":"","color":"#ff0000"}"##,
        r#"{"name":"bug","color":""}"#,
        r#"{"name":"bug"}"#,
        "not json",
    ] {
        let resp = send(&t.app, "POST", &labels_uri(WRITABLE_REPO), Some(token.as_str()), Some(body)).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(resp.body["errors"][0]["code"], "VALIDATION_ERROR");
    }
    assert!(t.labels.is_empty());
}

#[tokio::test]
async fn create_reports_each_invalid_field() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    let resp = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(token.as_str()),
        Some(r#"{"name":"","color":""}"#),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Validation failed");

    let errors = resp.body["errors"].as_array().unwrap();
    let fields: Vec<_> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["color", "name"]);
    assert!(errors.iter().all(|e| e["code"] == "VALIDATION_ERROR"));
    assert_eq!(errors[1]["message"], "Label name is required");

    let resp = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(token.as_str()),
        Some(r##"{"name":"","color":"#ff0000"}"##),
    )
    .await;
    assert_eq!(resp.body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(resp.body["errors"][0]["field"], "name");
    assert!(t.labels.is_empty());
}

#[tokio::test]
async fn long_names_and_colors_are_stored_as_given() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);
    let name = "n".repeat(200);
    let body = json!({ "name": name, "color": "not-a-7-char-color" }).to_string();

    let created = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(token.as_str()),
        Some(body.as_str()),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["name"], name.as_str());
    assert_eq!(created.body["data"]["color"], "not-a-7-char-color");

    let id = created.body["data"]["id"].as_i64().unwrap();
    let longer = "c".repeat(64);
    let edited = send(
        &t.app,
        "PATCH",
        &label_uri(WRITABLE_REPO, id),
        Some(token.as_str()),
        Some(json!({ "color": longer }).to_string().as_str()),
    )
    .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["data"]["color"], longer.as_str());
}

#[tokio::test]
async fn non_numeric_label_id_is_bad_request() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);
    let uri = format!("{}/abc", labels_uri(WRITABLE_REPO));

    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(r#"{"name":"x"}"#)),
        ("DELETE", None),
    ] {
        let resp = send(&t.app, method, &uri, Some(token.as_str()), body).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(resp.body["success"], false);
        assert_eq!(resp.body["errors"][0]["code"], "VALIDATION_ERROR");
        assert_eq!(resp.body["errors"][0]["message"], "Invalid label id");
    }
}

#[tokio::test]
async fn edit_with_empty_fields_keeps_label() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);
    let created = send(
        &t.app,
        "POST",
        &labels_uri(WRITABLE_REPO),
        Some(token.as_str()),
        Some(r##"{"name":"bug","color":"#ff0000"}"##),
    )
    .await;
    let id = created.body["data"]["id"].as_i64().unwrap();

    for body in ["{}", r#"{"name":"","color":""}"#] {
        let resp = send(&t.app, "PATCH", &label_uri(WRITABLE_REPO, id), Some(token.as_str()), Some(body)).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["data"], created.body["data"]);
    }

    let renamed = send(
        &t.app,
        "PATCH",
        &label_uri(WRITABLE_REPO, id),
        Some(token.as_str()),
        Some(r#"{"name":"defect"}"#),
    )
    .await;
    assert_eq!(renamed.body["data"]["name"], "defect");
    assert_eq!(renamed.body["data"]["color"], "#ff0000");

    let malformed = send(&t.app, "PATCH", &label_uri(WRITABLE_REPO, id), Some(token.as_str()), Some("{")).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_label_is_not_found() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);
    let uri = label_uri(WRITABLE_REPO, 12345);

    assert_eq!(send(&t.app, "GET", &uri, Some(token.as_str()), None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        send(&t.app, "PATCH", &uri, Some(token.as_str()), Some(r#"{"name":"x"}"#)).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(send(&t.app, "DELETE", &uri, Some(token.as_str()), None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn label_of_other_repository_cannot_be_edited_through_this_one() {
    let t = setup();
    let owner = create_test_jwt(OWNER_ID);
    let created = send(
        &t.app,
        "POST",
        &labels_uri(READ_ONLY_REPO),
        Some(owner.as_str()),
        Some(r##"{"name":"bug","color":"#ff0000"}"##),
    )
    .await;
    let id = created.body["data"]["id"].as_i64().unwrap();

    let writer = create_test_jwt(WRITER_ID);
    let edit = send(
        &t.app,
        "PATCH",
        &label_uri(WRITABLE_REPO, id),
        Some(writer.as_str()),
        Some(r#"{"name":"hijacked"}"#),
    )
    .await;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);

    // The scoped delete leaves the other repository's label alone.
    let delete = send(&t.app, "DELETE", &label_uri(WRITABLE_REPO, id), Some(writer.as_str()), None).await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);

    let list = send(&t.app, "GET", &labels_uri(READ_ONLY_REPO), Some(owner.as_str()), None).await;
    assert_eq!(list.body["data"][0]["name"], "bug");
}

#[tokio::test]
async fn list_reflects_creates_and_deletes() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    let mut ids = Vec::new();
    for name in ["bug", "feature", "question"] {
        let resp = send(
            &t.app,
            "POST",
            &labels_uri(WRITABLE_REPO),
            Some(token.as_str()),
            Some(json!({"name": name, "color": "#123456"}).to_string().as_str()),
        )
        .await;
        ids.push(resp.body["data"]["id"].as_i64().unwrap());
    }
    send(&t.app, "DELETE", &label_uri(WRITABLE_REPO, ids[0]), Some(token.as_str()), None).await;

    let list = send(&t.app, "GET", &labels_uri(WRITABLE_REPO), Some(token.as_str()), None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["meta"]["total_count"], 2);
    let names: Vec<_> = list.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["feature", "question"]);
}

#[tokio::test]
async fn requests_require_valid_token() {
    let t = setup();

    let missing = send(&t.app, "GET", &labels_uri(WRITABLE_REPO), None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["errors"][0]["code"], "UNAUTHORIZED");

    let garbage = send(&t.app, "GET", &labels_uri(WRITABLE_REPO), Some("not-a-jwt"), None).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invisible_repositories_are_not_found() {
    let t = setup();
    let outsider = create_test_jwt(WRITER_ID);

    let private = send(&t.app, "GET", &labels_uri(PRIVATE_REPO), Some(outsider.as_str()), None).await;
    assert_eq!(private.status, StatusCode::NOT_FOUND);
    assert_eq!(private.body["message"], "repository not found");

    let missing = send(&t.app, "GET", &labels_uri(5000), Some(outsider.as_str()), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let owner = create_test_jwt(OWNER_ID);
    let visible = send(&t.app, "GET", &labels_uri(PRIVATE_REPO), Some(owner.as_str()), None).await;
    assert_eq!(visible.status, StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let t = setup();
    let token = create_test_jwt(WRITER_ID);

    let list = send(&t.app, "GET", &labels_uri(WRITABLE_REPO), Some(token.as_str()), None).await;
    let request_id = list.request_id.expect("x-request-id header");
    assert_eq!(list.body["meta"]["request_id"], request_id);
}
