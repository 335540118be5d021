//! `Params` extractor: the flat name/value parameters of a screen call.
//!
//! Query-string values come first, then the body, which may be
//! url-encoded or multipart. Multipart parts carrying a file name are
//! kept apart as uploads.

use std::collections::BTreeMap;

use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, RequestExt};
use bytes::Bytes;

use dochub_core::error::AppError;
use dochub_service::document::Upload;

use crate::error::ApiError;

/// Value that confirms a save or delete.
const YES: &str = "YES";

/// Separator of id lists.
const ID_SEPARATOR: char = ';';

/// Suffix of the parameter carrying an upload's client-side name.
const FILENAME_SUFFIX: &str = "_FILENAME";

/// An uploaded multipart file.
#[derive(Debug, Clone)]
struct FilePart {
    file_name: String,
    content: Bytes,
}

/// Submitted screen parameters.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: Vec<(String, String)>,
    files: BTreeMap<String, FilePart>,
}

impl Params {
    /// Build from plain name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            files: BTreeMap::new(),
        }
    }

    /// Last submitted value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name` or an empty string.
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Whether `name` was submitted at all.
    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(k, _)| k == name)
    }

    /// `name` parsed as an integer; absent or empty is `None`.
    pub fn get_i64(&self, name: &str) -> Result<Option<i64>, ApiError> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::validation(format!("Parameter '{name}' must be a number")).into()),
        }
    }

    /// A folder reference where `0`, empty and absent mean the root level.
    pub fn get_folder_id(&self, name: &str) -> Result<Option<i64>, ApiError> {
        Ok(self.get_i64(name)?.filter(|id| *id > 0))
    }

    /// An id list: every value of `name`, each split on `;`.
    pub fn get_ids(&self, name: &str) -> Result<Vec<i64>, ApiError> {
        self.values
            .iter()
            .filter(|(k, _)| k == name)
            .flat_map(|(_, v)| v.split(ID_SEPARATOR))
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse().map_err(|_| {
                    ApiError::from(AppError::validation(format!(
                        "Parameter '{name}' must be a list of numbers"
                    )))
                })
            })
            .collect()
    }

    /// Whether `name` is `YES`.
    pub fn is_yes(&self, name: &str) -> bool {
        self.get(name) == Some(YES)
    }

    /// Remove the upload submitted as `name`.
    ///
    /// Its name is taken from `<name>_FILENAME` when given, else from the
    /// multipart part.
    pub fn take_upload(&mut self, name: &str) -> Option<Upload> {
        let part = self.files.remove(name)?;
        let file_name = self
            .get(&format!("{name}{FILENAME_SUFFIX}"))
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .unwrap_or(part.file_name);
        Some(Upload {
            file_name,
            content: part.content,
        })
    }

    /// Every plain value, for echoing back in an acknowledgement.
    pub fn context(&self) -> BTreeMap<String, String> {
        self.values.iter().cloned().collect()
    }

    async fn read_multipart(&mut self, mut multipart: Multipart) -> Result<(), ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read field '{name}': {e}")))?;

            match file_name {
                // An empty file input submits a nameless, empty part.
                Some(file_name) if file_name.is_empty() && content.is_empty() => {}
                Some(file_name) => {
                    self.files.insert(name, FilePart { file_name, content });
                }
                None => {
                    let value = String::from_utf8(content.to_vec()).map_err(|_| {
                        AppError::validation(format!("Field '{name}' is not valid UTF-8"))
                    })?;
                    self.values.push((name, value));
                }
            }
        }
        Ok(())
    }
}

impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|e| AppError::validation(format!("Invalid query string: {e}")))?;
        let mut params = Params::from_pairs(query);

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            let multipart: Multipart = req
                .extract()
                .await
                .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?;
            params.read_multipart(multipart).await?;
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form): Form<Vec<(String, String)>> = req
                .extract()
                .await
                .map_err(|e| AppError::validation(format!("Invalid form body: {e}")))?;
            params.values.extend(form);
        }

        Ok(params)
    }
}
