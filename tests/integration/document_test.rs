//! Document screens.

use http::StatusCode;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use crate::helpers::TestApp;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake image";

fn case(id: &str, caption: &str) -> (String, String) {
    (id.to_string(), caption.to_string())
}

#[tokio::test]
async fn test_list_navigation() {
    let app = TestApp::with_tree().await;

    let response = app.call("documentList", &[]).await;
    response.assert_observer("core.custom", "documentList");
    assert_eq!(response.body["title"], "Documents");
    assert!(response.body["context"].as_object().unwrap().is_empty());
    assert_eq!(response.body["actions"].as_array().unwrap().len(), 1);
    assert_eq!(response.coords("document"), (2, 2, 2, 2));
    assert_eq!(response.component("document")["headers"].as_array().unwrap().len(), 4);
    assert_eq!(response.record_count("document"), 0);
    assert_eq!(response.coords("current_folder"), (0, 2, 2, 1));
    assert_eq!(
        response.cases("current_folder"),
        vec![case("1", "truc1"), case("2", "truc2")]
    );
    assert_eq!(response.component("lbltitlecat")["value"], ">");
    assert_eq!(response.component("lbldesc")["value"], "{[center]}{[i]}{[/i]}{[/center]}");

    let response = app.call("documentList", &[("current_folder", "1")]).await;
    assert_eq!(response.cases("current_folder"), vec![case("0", "..")]);
    assert_eq!(response.component("lbltitlecat")["value"], ">truc1");
    assert_eq!(
        response.component("lbldesc")["value"],
        "{[center]}{[i]}blabla{[/i]}{[/center]}"
    );

    let response = app.call("documentList", &[("current_folder", "2")]).await;
    assert_eq!(
        response.cases("current_folder"),
        vec![case("0", ".."), case("3", "truc3")]
    );
    assert_eq!(response.component("lbltitlecat")["value"], ">truc2");

    let response = app.call("documentList", &[("current_folder", "3")]).await;
    assert_eq!(response.cases("current_folder"), vec![case("2", "..")]);
    assert_eq!(response.component("lbltitlecat")["value"], ">truc2>truc3");
    assert_eq!(
        response.component("lbldesc")["value"],
        "{[center]}{[i]}----{[/i]}{[/center]}"
    );
}

#[tokio::test]
async fn test_add_form() {
    let app = TestApp::with_tree().await;

    let response = app.call("documentAddModify", &[("current_folder", "2")]).await;
    response.assert_observer("core.custom", "documentAddModify");
    assert_eq!(response.body["title"], "Add a document");
    assert_eq!(response.component_count(), 7);
    assert_eq!(response.component("folder")["value"], ">truc2");
    assert_eq!(response.coords("folder"), (2, 0, 1, 1));
    assert_eq!(response.component("filename")["kind"], "upload");
    assert_eq!(response.coords("filename"), (2, 1, 1, 1));
    assert_eq!(response.coords("description"), (2, 2, 1, 1));
}

#[tokio::test]
async fn test_add_save() {
    let app = TestApp::with_tree().await;
    assert!(!app.slot_path(1).exists());

    let response = app
        .call_multipart(
            "documentAddModify",
            &[
                ("current_folder", "2"),
                ("SAVE", "YES"),
                ("description", "new doc"),
                ("filename_FILENAME", "doc.png"),
            ],
            ("filename", "upload.bin", PNG),
        )
        .await;
    response.assert_observer("core.acknowledge", "documentAddModify");
    assert_eq!(response.body["context"].as_object().unwrap().len(), 4);

    let admin = app.admin().await;
    let details = app.state.document_service.get(&admin, 1).await.unwrap();
    assert_eq!(details.document.folder_id, Some(2));
    assert_eq!(details.document.name, "doc.png");
    assert_eq!(details.document.description, "new doc");
    assert_eq!(details.creator, "empty");
    assert_eq!(details.modifier, "empty");
    assert_eq!(details.document.date_creation, details.document.date_modification);
    assert_eq!(std::fs::read(app.slot_path(1)).unwrap(), PNG);
}

#[tokio::test]
async fn test_add_save_requires_file() {
    let app = TestApp::with_tree().await;

    let response = app
        .call(
            "documentAddModify",
            &[("current_folder", "2"), ("SAVE", "YES"), ("description", "x")],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_show_then_save_again() {
    let app = TestApp::with_tree().await;
    let document = app.document(2, "doc.png", PNG).await;
    let format = app.state.config.documents.datetime_format.clone();
    let created = document.date_creation.format(&format).to_string();

    let response = app.call("documentShow", &[("document", "1")]).await;
    response.assert_observer("core.custom", "documentShow");
    assert_eq!(response.body["title"], "Show a document");
    assert_eq!(response.component_count(), 16);
    assert_eq!(response.component("folder")["value"], ">truc2");
    assert_eq!(response.coords("folder"), (2, 0, 3, 1));
    assert_eq!(response.component("name")["value"], "doc.png");
    assert_eq!(response.coords("name"), (2, 1, 3, 1));
    assert_eq!(response.component("description")["value"], "new doc");
    assert_eq!(response.coords("description"), (2, 2, 3, 1));
    assert_eq!(response.component("modifier")["value"], "empty");
    assert_eq!(response.coords("modifier"), (2, 3, 1, 1));
    assert_eq!(response.component("date_modification")["value"], created.as_str());
    assert_eq!(response.coords("date_modification"), (4, 3, 1, 1));
    assert_eq!(response.component("creator")["value"], "empty");
    assert_eq!(response.coords("creator"), (2, 4, 1, 1));
    assert_eq!(response.component("date_creation")["value"], created.as_str());
    assert_eq!(response.coords("date_creation"), (4, 4, 1, 1));

    let response = app
        .call(
            "documentAddModify",
            &[("SAVE", "YES"), ("document", "1"), ("description", "old doc")],
        )
        .await;
    response.assert_observer("core.acknowledge", "documentAddModify");

    let admin = app.admin().await;
    let details = app.state.document_service.get(&admin, 1).await.unwrap();
    assert_eq!(details.document.folder_id, Some(2));
    assert_eq!(details.document.name, "doc.png");
    assert_eq!(details.document.description, "old doc");
    assert_eq!(details.creator, "empty");
    assert_eq!(details.modifier, "empty");
    assert_eq!(details.document.date_creation, document.date_creation);
    assert!(details.document.date_modification > details.document.date_creation);
}

#[tokio::test]
async fn test_save_again_with_new_file() {
    let app = TestApp::with_tree().await;
    let document = app.document(2, "doc.png", PNG).await;

    let response = app
        .call_multipart(
            "documentAddModify",
            &[
                ("SAVE", "YES"),
                ("document", "1"),
                ("filename_FILENAME", "other.pdf"),
            ],
            ("filename", "other.pdf", b"%PDF-1.4 replacement"),
        )
        .await;
    response.assert_observer("core.acknowledge", "documentAddModify");

    let admin = app.admin().await;
    let details = app.state.document_service.get(&admin, 1).await.unwrap();
    assert_eq!(details.document.name, "doc.png");
    assert_eq!(details.document.description, "new doc");
    assert_eq!(details.document.date_creation, document.date_creation);
    assert!(details.document.date_modification > document.date_modification);
    assert_eq!(
        std::fs::read(app.slot_path(1)).unwrap(),
        b"%PDF-1.4 replacement"
    );

    let response = app
        .call_multipart(
            "documentAddModify",
            &[("SAVE", "YES"), ("document", "1"), ("name", "renamed.pdf")],
            ("filename", "ignored.pdf", b"%PDF-1.4 v3"),
        )
        .await;
    response.assert_observer("core.acknowledge", "documentAddModify");
    let details = app.state.document_service.get(&admin, 1).await.unwrap();
    assert_eq!(details.document.name, "renamed.pdf");
    assert_eq!(std::fs::read(app.slot_path(1)).unwrap(), b"%PDF-1.4 v3");
}

#[tokio::test]
async fn test_delete_removes_row_and_file() {
    let app = TestApp::with_tree().await;
    app.document(2, "doc.png", PNG).await;

    let response = app.call("documentList", &[("current_folder", "2")]).await;
    assert_eq!(response.record_count("document"), 1);
    let record = &response.component("document")["records"][0];
    assert_eq!(record["id"], "1");
    assert_eq!(record["values"]["name"], "doc.png");
    assert_eq!(record["values"]["description"], "new doc");
    assert_eq!(record["values"]["modifier"], "empty");
    assert!(app.slot_path(1).exists());

    let response = app.call("documentDel", &[("document", "1")]).await;
    response.assert_observer("core.dialogbox", "documentDel");

    let response = app.call("documentDel", &[("document", "1"), ("CONFIRME", "YES")]).await;
    response.assert_observer("core.acknowledge", "documentDel");

    let response = app.call("documentList", &[("current_folder", "2")]).await;
    assert_eq!(response.record_count("document"), 0);
    assert!(!app.slot_path(1).exists());
}

#[tokio::test]
async fn test_folder_delete_removes_document_files() {
    let app = TestApp::with_tree().await;
    app.document(3, "deep.png", PNG).await;
    assert!(app.slot_path(1).exists());

    let response = app.call("folderDel", &[("folder", "2"), ("CONFIRME", "YES")]).await;
    response.assert_observer("core.acknowledge", "folderDel");
    assert!(!app.slot_path(1).exists());
}

#[tokio::test]
async fn test_download() {
    let app = TestApp::with_tree().await;
    app.document(2, "doc.png", PNG).await;

    let response = app.call("documentDownload", &[("document", "1")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[CONTENT_TYPE], "image/png");
    assert_eq!(
        response.headers[CONTENT_DISPOSITION],
        "attachment; filename=\"doc.png\""
    );
    assert_eq!(response.bytes, PNG);
}

#[tokio::test]
async fn test_group_rights() {
    let app = TestApp::with_tree().await;
    app.document(2, "doc.png", PNG).await;
    let viewer = app.user_token("viewer", &["my_group"]).await;

    // my_group sees truc1 only.
    let response = app.call_as(&viewer, "documentList", &[]).await;
    assert_eq!(response.cases("current_folder"), vec![case("1", "truc1")]);

    let response = app.call_as(&viewer, "documentList", &[("current_folder", "2")]).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.call_as(&viewer, "documentShow", &[("document", "1")]).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Viewing truc1 does not allow adding to it.
    let response = app.call_as(&viewer, "documentList", &[("current_folder", "1")]).await;
    assert_eq!(response.component("document")["actions"].as_array().unwrap().len(), 2);
    let response = app
        .call_as(&viewer, "documentAddModify", &[("current_folder", "1")])
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let modifier = app.user_token("modifier", &["other_group"]).await;
    let response = app.call_as(&modifier, "documentShow", &[("document", "1")]).await;
    response.assert_observer("core.custom", "documentShow");
    let response = app
        .call_as(&modifier, "documentDel", &[("document", "1"), ("CONFIRME", "YES")])
        .await;
    response.assert_observer("core.acknowledge", "documentDel");
}
