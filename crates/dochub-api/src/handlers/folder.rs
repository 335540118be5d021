//! Folder management screens: list, add/modify form, and deletion.

use axum::extract::State;

use dochub_core::error::AppError;
use dochub_entity::folder::FolderInput;
use dochub_service::folder::NO_PARENT;

use crate::error::ApiError;
use crate::extractors::{AuthUser, Params};
use crate::state::AppState;
use crate::ui::{Case, Component, Grid, UiAction, UiResponse};

const FOLDER_ICON: &str = "images/folder.png";

/// Parameter naming the selected folder(s).
const FOLDER: &str = "folder";

/// GET|POST /api/documents/folderList
pub async fn folder_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<UiResponse, ApiError> {
    let entries = state.folder_service.list(&auth).await?;

    let mut grid = Grid::new()
        .header("name", "name")
        .header("description", "description")
        .header("parent", "parent")
        .action(
            UiAction::new("add", "Add", "folderAddModify")
                .icon("images/add.png")
                .param("unique", "false"),
        )
        .action(UiAction::new("edit", "Edit", "folderAddModify").icon("images/edit.png"))
        .action(UiAction::new("delete", "Delete", "folderDel").icon("images/delete.png"));
    for entry in &entries {
        grid.record(
            entry.folder.folder.id,
            [
                ("name", entry.folder.folder.name.as_str()),
                ("description", entry.folder.folder.description.as_str()),
                ("parent", entry.parent_title.as_str()),
            ],
        );
    }
    let total = grid.len();

    let mut response = UiResponse::custom("folderList", "Folders");
    response.push(Component::image("img", FOLDER_ICON).at(0, 0, 1, 1));
    response.push(Component::label("title", "{[center]}{[b]}Folders{[/b]}{[/center]}").at(1, 0, 1, 1));
    response.push(grid.into_component(FOLDER).at(0, 1, 2, 1));
    response.push(Component::label("nb", format!("Total: {total}")).at(0, 2, 2, 1));
    Ok(response.action(UiAction::close_screen()))
}

/// GET|POST /api/documents/folderAddModify
///
/// Shows the form, or saves it when `SAVE=YES`. A `folder` parameter
/// selects the folder to modify.
pub async fn folder_add_modify(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Params,
) -> Result<UiResponse, ApiError> {
    let folder_id = params.get_i64(FOLDER)?;

    if params.is_yes("SAVE") {
        let current = match folder_id {
            Some(id) => state.folder_service.form(&auth, Some(id)).await?.current,
            None => None,
        };
        let mut input = match &current {
            Some(current) => FolderInput {
                name: current.folder.name.clone(),
                description: current.folder.description.clone(),
                parent_id: current.folder.parent_id,
                viewer: current.viewer.clone(),
                modifier: current.modifier.clone(),
            },
            None => FolderInput::default(),
        };
        if let Some(name) = params.get("name") {
            input.name = name.to_string();
        }
        if let Some(description) = params.get("description") {
            input.description = description.to_string();
        }
        if params.contains("parent") {
            input.parent_id = params.get_folder_id("parent")?;
        }
        if params.contains("viewer") {
            input.viewer = params.get_ids("viewer")?;
        }
        if params.contains("modifier") {
            input.modifier = params.get_ids("modifier")?;
        }

        state.folder_service.save(&auth, folder_id, input).await?;
        return Ok(UiResponse::acknowledge("folderAddModify", params.context()));
    }

    let form = state.folder_service.form(&auth, folder_id).await?;
    let title = if form.current.is_some() {
        "Modify a folder"
    } else {
        "Add a folder"
    };

    let (name, description, parent, viewer, modifier) = match &form.current {
        Some(current) => (
            current.folder.name.clone(),
            current.folder.description.clone(),
            current.folder.parent_id.unwrap_or(0),
            current.viewer.clone(),
            current.modifier.clone(),
        ),
        None => (String::new(), String::new(), 0, Vec::new(), Vec::new()),
    };

    let parents = std::iter::once(Case::new(0, NO_PARENT))
        .chain(form.parents.iter().map(|(id, title)| Case::new(id, title.as_str())))
        .collect();
    let group_cases: Vec<Case> = form
        .groups
        .iter()
        .map(|g| Case::new(g.id, g.name.as_str()))
        .collect();
    let ids = |ids: Vec<i64>| ids.iter().map(i64::to_string).collect::<Vec<_>>();

    let mut response = UiResponse::custom("folderAddModify", title);
    if let Some(id) = folder_id {
        response = response.context(FOLDER, id);
    }
    response.push(Component::image("img", FOLDER_ICON).at(0, 0, 1, 5));
    response.push(Component::label("lbl_name", "{[b]}name{[/b]}").at(1, 0, 1, 1));
    response.push(Component::edit("name", name).at(2, 0, 1, 1));
    response.push(Component::label("lbl_description", "{[b]}description{[/b]}").at(1, 1, 1, 1));
    response.push(Component::memo("description", description).at(2, 1, 1, 1));
    response.push(Component::label("lbl_parent", "{[b]}parent{[/b]}").at(1, 2, 1, 1));
    response.push(Component::select("parent", parent, parents).at(2, 2, 1, 1));
    response.push(Component::label("lbl_viewer", "{[b]}viewer{[/b]}").at(1, 3, 1, 1));
    response.push(
        Component::checklist("viewer", ids(viewer), group_cases.clone(), true).at(2, 3, 1, 1),
    );
    response.push(Component::label("lbl_modifier", "{[b]}modifier{[/b]}").at(1, 4, 1, 1));
    response.push(Component::checklist("modifier", ids(modifier), group_cases, true).at(2, 4, 1, 1));

    Ok(response
        .action(
            UiAction::new("ok", "Ok", "folderAddModify")
                .icon("images/ok.png")
                .param("SAVE", "YES")
                .closing(),
        )
        .action(UiAction::cancel()))
}

/// GET|POST /api/documents/folderDel
///
/// Asks for confirmation, then deletes when `CONFIRME=YES`.
pub async fn folder_del(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Params,
) -> Result<UiResponse, ApiError> {
    let ids = params.get_ids(FOLDER)?;

    if params.is_yes("CONFIRME") {
        state.folder_service.delete(&auth, &ids).await?;
        return Ok(UiResponse::acknowledge("folderDel", params.context()));
    }

    state.folder_service.check_admin(&auth)?;
    if ids.is_empty() {
        return Err(AppError::validation("No folder selected").into());
    }
    let mut dialog = UiResponse::dialog(
        "folderDel",
        "Delete folders",
        format!(
            "Do you want to delete the {} selected folder(s), with their sub-folders and documents?",
            ids.len()
        ),
    );
    dialog.context = params.context();
    Ok(dialog
        .action(
            UiAction::new("yes", "Yes", "folderDel")
                .icon("images/ok.png")
                .param("CONFIRME", "YES")
                .closing(),
        )
        .action(UiAction::new("no", "No", "").icon("images/cancel.png").closing()))
}
