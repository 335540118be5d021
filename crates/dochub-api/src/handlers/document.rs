//! Document screens: folder browsing, add/modify form, details, deletion,
//! and download.

use axum::body::Body;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use dochub_core::error::AppError;
use dochub_service::document::{DocumentChanges, NewDocument};

use crate::error::ApiError;
use crate::extractors::{AuthUser, Params};
use crate::state::AppState;
use crate::ui::{Case, Component, Grid, UiAction, UiResponse, format_datetime};

const DOCUMENT_ICON: &str = "images/document.png";

/// Parameter naming the selected document(s).
const DOCUMENT: &str = "document";

/// Parameter naming the browsed folder.
const CURRENT_FOLDER: &str = "current_folder";

/// Parameter carrying the uploaded file.
const FILENAME: &str = "filename";

/// GET|POST /api/documents/documentList
pub async fn document_list(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Params,
) -> Result<UiResponse, ApiError> {
    let current_folder = params.get_folder_id(CURRENT_FOLDER)?;
    let view = state.document_service.browse(&auth, current_folder).await?;
    let datetime_format = &state.config.documents.datetime_format;

    let cases = view
        .entries
        .iter()
        .map(|(id, caption)| Case::new(id, caption.as_str()))
        .collect();
    let navigation = Component::checklist(CURRENT_FOLDER, Vec::new(), cases, false)
        .on_change(UiAction::new("open", "Open", "documentList"));

    let mut grid = Grid::new()
        .header("name", "name")
        .header("description", "description")
        .header("date_modification", "date modification")
        .header("modifier", "modifier")
        .action(UiAction::new("show", "Show", "documentShow").icon("images/show.png"))
        .action(
            UiAction::new("download", "Download", "documentDownload").icon("images/download.png"),
        );
    if view.can_modify {
        grid = grid
            .action(UiAction::new("edit", "Edit", "documentAddModify").icon("images/edit.png"))
            .action(UiAction::new("delete", "Delete", "documentDel").icon("images/delete.png"))
            .action(
                UiAction::new("add", "Add", "documentAddModify")
                    .icon("images/add.png")
                    .param("unique", "false"),
            );
    }
    for row in &view.documents {
        grid.record(
            row.document.id,
            [
                ("name", row.document.name.clone()),
                ("description", row.document.description.clone()),
                (
                    "date_modification",
                    format_datetime(&row.document.date_modification, datetime_format),
                ),
                ("modifier", row.modifier.clone()),
            ],
        );
    }

    let mut response = UiResponse::custom("documentList", "Documents");
    if let Some(id) = current_folder {
        response = response.context(CURRENT_FOLDER, id);
    }
    response.push(Component::image("img", DOCUMENT_ICON).at(0, 0, 1, 1));
    response.push(Component::label("lbltitlecat", view.path.title()).at(1, 0, 3, 1));
    response.push(
        Component::label(
            "lbldesc",
            format!("{{[center]}}{{[i]}}{}{{[/i]}}{{[/center]}}", view.description),
        )
        .at(1, 1, 3, 1),
    );
    response.push(navigation.at(0, 2, 2, 1));
    response.push(grid.into_component(DOCUMENT).at(2, 2, 2, 2));
    Ok(response.action(UiAction::close_screen()))
}

/// GET|POST /api/documents/documentAddModify
///
/// Shows the form, or saves it when `SAVE=YES`. Without a `document`
/// parameter a new document is added to `current_folder`.
pub async fn document_add_modify(
    State(state): State<AppState>,
    auth: AuthUser,
    mut params: Params,
) -> Result<UiResponse, ApiError> {
    let document_id = params.get_i64(DOCUMENT)?;
    let current_folder = params.get_folder_id(CURRENT_FOLDER)?;

    if params.is_yes("SAVE") {
        let upload = params.take_upload(FILENAME);
        match document_id {
            Some(id) => {
                let changes = DocumentChanges {
                    name: params.get("name").map(str::to_string),
                    description: params.get("description").map(str::to_string),
                    folder_id: None,
                    upload,
                };
                state.document_service.update(&auth, id, changes).await?;
            }
            None => {
                let new = NewDocument {
                    folder_id: current_folder,
                    description: params.text("description"),
                    upload,
                };
                state.document_service.create(&auth, new).await?;
            }
        }
        return Ok(UiResponse::acknowledge("documentAddModify", params.context()));
    }

    let max_upload = state.config.storage.max_upload_size_bytes;
    let (title, folder_title, description, name) = match document_id {
        Some(id) => {
            let details = state.document_service.get(&auth, id).await?;
            if !details.can_modify {
                return Err(AppError::authorization("You may not modify this document").into());
            }
            (
                "Modify a document",
                details.folder_title,
                details.document.description,
                Some(details.document.name),
            )
        }
        None => (
            "Add a document",
            state
                .document_service
                .folder_title(&auth, current_folder)
                .await?,
            String::new(),
            None,
        ),
    };

    let mut response = UiResponse::custom("documentAddModify", title)
        .context(CURRENT_FOLDER, current_folder.unwrap_or(0));
    if let Some(id) = document_id {
        response = response.context(DOCUMENT, id);
    }
    let rows = if name.is_some() { 4 } else { 3 };
    response.push(Component::image("img", DOCUMENT_ICON).at(0, 0, 1, rows));
    response.push(Component::label("lbl_folder", "{[b]}folder{[/b]}").at(1, 0, 1, 1));
    response.push(Component::label("folder", folder_title).at(2, 0, 1, 1));
    response.push(Component::label("lbl_filename", "{[b]}file{[/b]}").at(1, 1, 1, 1));
    response.push(Component::upload(FILENAME, max_upload).at(2, 1, 1, 1));
    response.push(Component::label("lbl_description", "{[b]}description{[/b]}").at(1, 2, 1, 1));
    response.push(Component::memo("description", description).at(2, 2, 1, 1));
    if let Some(name) = name {
        response.push(Component::label("lbl_name", "{[b]}name{[/b]}").at(1, 3, 1, 1));
        response.push(Component::edit("name", name).at(2, 3, 1, 1));
    }

    Ok(response
        .action(
            UiAction::new("ok", "Ok", "documentAddModify")
                .icon("images/ok.png")
                .param("SAVE", "YES")
                .closing(),
        )
        .action(UiAction::cancel()))
}

/// GET|POST /api/documents/documentShow
pub async fn document_show(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Params,
) -> Result<UiResponse, ApiError> {
    let id = params
        .get_i64(DOCUMENT)?
        .ok_or_else(|| AppError::validation("No document selected"))?;
    let details = state.document_service.get(&auth, id).await?;
    let datetime_format = &state.config.documents.datetime_format;
    let doc = &details.document;

    let mut response = UiResponse::custom("documentShow", "Show a document").context(DOCUMENT, id);
    response.push(Component::image("img", DOCUMENT_ICON).at(0, 0, 1, 6));
    response.push(Component::label("lbl_folder", "{[b]}folder{[/b]}").at(1, 0, 1, 1));
    response.push(Component::label("folder", details.folder_title.as_str()).at(2, 0, 3, 1));
    response.push(Component::label("lbl_name", "{[b]}name{[/b]}").at(1, 1, 1, 1));
    response.push(Component::label("name", doc.name.as_str()).at(2, 1, 3, 1));
    response.push(Component::label("lbl_description", "{[b]}description{[/b]}").at(1, 2, 1, 1));
    response.push(Component::label("description", doc.description.as_str()).at(2, 2, 3, 1));
    response.push(Component::label("lbl_modifier", "{[b]}modifier{[/b]}").at(1, 3, 1, 1));
    response.push(Component::label("modifier", details.modifier.as_str()).at(2, 3, 1, 1));
    response.push(
        Component::label("lbl_date_modification", "{[b]}date modification{[/b]}").at(3, 3, 1, 1),
    );
    response.push(
        Component::label(
            "date_modification",
            format_datetime(&doc.date_modification, datetime_format),
        )
        .at(4, 3, 1, 1),
    );
    response.push(Component::label("lbl_creator", "{[b]}creator{[/b]}").at(1, 4, 1, 1));
    response.push(Component::label("creator", details.creator.as_str()).at(2, 4, 1, 1));
    response.push(
        Component::label("lbl_date_creation", "{[b]}date creation{[/b]}").at(3, 4, 1, 1),
    );
    response.push(
        Component::label(
            "date_creation",
            format_datetime(&doc.date_creation, datetime_format),
        )
        .at(4, 4, 1, 1),
    );
    response.push(
        Component::button(
            "download",
            UiAction::new("download", "Download", "documentDownload")
                .icon("images/download.png")
                .param(DOCUMENT, id),
        )
        .at(2, 5, 3, 1),
    );

    if details.can_modify {
        response = response.action(
            UiAction::new("edit", "Edit", "documentAddModify")
                .icon("images/edit.png")
                .param(DOCUMENT, id)
                .closing(),
        );
    }
    Ok(response.action(UiAction::close_screen()))
}

/// GET|POST /api/documents/documentDel
///
/// Asks for confirmation, then deletes when `CONFIRME=YES`.
pub async fn document_del(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Params,
) -> Result<UiResponse, ApiError> {
    let ids = params.get_ids(DOCUMENT)?;

    if params.is_yes("CONFIRME") {
        state.document_service.delete(&auth, &ids).await?;
        return Ok(UiResponse::acknowledge("documentDel", params.context()));
    }

    if ids.is_empty() {
        return Err(AppError::validation("No document selected").into());
    }
    let mut dialog = UiResponse::dialog(
        "documentDel",
        "Delete documents",
        format!("Do you want to delete the {} selected document(s)?", ids.len()),
    );
    dialog.context = params.context();
    Ok(dialog
        .action(
            UiAction::new("yes", "Yes", "documentDel")
                .icon("images/ok.png")
                .param("CONFIRME", "YES")
                .closing(),
        )
        .action(UiAction::new("no", "No", "").icon("images/cancel.png").closing()))
}

/// GET|POST /api/documents/documentDownload
pub async fn document_download(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Params,
) -> Result<Response, ApiError> {
    let id = params
        .get_i64(DOCUMENT)?
        .ok_or_else(|| AppError::validation("No document selected"))?;
    let (document, content) = state.document_service.download(&auth, id).await?;

    let mime = mime_guess::from_path(&document.name).first_or_octet_stream();
    let content_type = HeaderValue::from_str(mime.as_ref())
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&content_disposition(&document.name))
        .unwrap_or(HeaderValue::from_static("attachment"));

    Ok((
        [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
        Body::from_stream(content),
    )
        .into_response())
}

/// `attachment` disposition with a quoted, ASCII-safe file name.
fn content_disposition(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
