//! Folder management screens.

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new().await;

    let response = app.call("folderList", &[]).await;
    response.assert_observer("core.custom", "folderList");
    assert_eq!(response.body["title"], "Folders");
    assert!(response.body["context"].as_object().unwrap().is_empty());
    let actions = response.body["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["icon"], "images/close.png");

    assert_eq!(response.component_count(), 4);
    assert_eq!(response.coords("folder"), (0, 1, 2, 1));
    let headers: Vec<_> = response.component("folder")["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(headers, vec!["name", "description", "parent"]);
    assert_eq!(response.record_count("folder"), 0);
}

#[tokio::test]
async fn test_add_form() {
    let app = TestApp::new().await;

    let response = app.call("folderAddModify", &[]).await;
    response.assert_observer("core.custom", "folderAddModify");
    assert_eq!(response.body["title"], "Add a folder");
    assert_eq!(response.component("name")["kind"], "edit");
    assert_eq!(response.component("description")["kind"], "memo");
    assert_eq!(response.component("parent")["value"], "0");
    assert_eq!(response.cases("parent"), vec![("0".to_string(), "---".to_string())]);
    assert_eq!(response.cases("viewer").len(), 2);
    assert_eq!(response.component("modifier")["multi"], true);
}

#[tokio::test]
async fn test_add_save() {
    let app = TestApp::new().await;

    let response = app
        .call(
            "folderAddModify",
            &[
                ("SAVE", "YES"),
                ("name", "newcat"),
                ("description", "new folder"),
                ("parent", "0"),
                ("viewer", "1;2"),
                ("modifier", "2"),
            ],
        )
        .await;
    response.assert_observer("core.acknowledge", "folderAddModify");
    assert_eq!(response.body["context"].as_object().unwrap().len(), 6);

    let admin = app.admin().await;
    let list = app.state.folder_service.list(&admin).await.unwrap();
    assert_eq!(list.len(), 1);
    let saved = &list[0].folder;
    assert_eq!(saved.folder.name, "newcat");
    assert_eq!(saved.folder.description, "new folder");
    assert_eq!(saved.folder.parent_id, None);
    assert_eq!(saved.viewer, vec![1, 2]);
    assert_eq!(saved.modifier, vec![2]);

    let response = app.call("folderList", &[]).await;
    assert_eq!(response.record_count("folder"), 1);
    assert_eq!(response.component("folder")["records"][0]["values"]["parent"], "---");
}

#[tokio::test]
async fn test_modify_keeps_unsent_fields() {
    let app = TestApp::with_tree().await;

    let response = app.call("folderAddModify", &[("folder", "3")]).await;
    assert_eq!(response.body["title"], "Modify a folder");
    assert_eq!(response.component("name")["value"], "truc3");
    assert_eq!(response.component("parent")["value"], "2");
    // truc3 may not become its own parent.
    assert!(!response.cases("parent").iter().any(|(id, _)| id == "3"));

    let response = app
        .call("folderAddModify", &[("SAVE", "YES"), ("folder", "3"), ("name", "truc4")])
        .await;
    response.assert_observer("core.acknowledge", "folderAddModify");

    let admin = app.admin().await;
    let form = app.state.folder_service.form(&admin, Some(3)).await.unwrap();
    let current = form.current.unwrap();
    assert_eq!(current.folder.name, "truc4");
    assert_eq!(current.folder.description, "----");
    assert_eq!(current.folder.parent_id, Some(2));
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    app.folder("truc", "blabla", None, &[1, 2], &[2]).await;

    let response = app.call("folderList", &[]).await;
    assert_eq!(response.record_count("folder"), 1);

    let response = app.call("folderDel", &[("folder", "1")]).await;
    response.assert_observer("core.dialogbox", "folderDel");
    assert_eq!(response.body["context"]["folder"], "1");

    let response = app.call("folderDel", &[("folder", "1"), ("CONFIRME", "YES")]).await;
    response.assert_observer("core.acknowledge", "folderDel");

    let response = app.call("folderList", &[]).await;
    assert_eq!(response.record_count("folder"), 0);
}

#[tokio::test]
async fn test_delete_requires_selection() {
    let app = TestApp::with_tree().await;

    let response = app.call("folderDel", &[]).await;
    assert_eq!(response.status, http::StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");

    let response = app
        .call("folderDel", &[("folder", "2;99"), ("CONFIRME", "YES")])
        .await;
    assert_eq!(response.status, http::StatusCode::NOT_FOUND);
    let response = app.call("folderList", &[]).await;
    assert_eq!(response.record_count("folder"), 3);
}

#[tokio::test]
async fn test_management_requires_superuser() {
    let app = TestApp::with_tree().await;
    let token = app.user_token("reader", &["my_group", "other_group"]).await;

    let response = app.call_as(&token, "folderList", &[]).await;
    assert_eq!(response.status, http::StatusCode::FORBIDDEN);
    assert_eq!(response.body["observer"], "core.exception");
    assert_eq!(response.body["code"], "AUTHORIZATION");

    let response = app.call_as(&token, "folderDel", &[("folder", "1")]).await;
    assert_eq!(response.status, http::StatusCode::FORBIDDEN);
}
