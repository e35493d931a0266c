use super::GraphqlRequest;
use crate::error::{AdminError, Result};
use reqwest::multipart::{Form, Part};
use serde_json::{json, Map, Value};
use std::path::Path;

/// A file bound to one variable of a GraphQL upload request.
///
/// `variable_path` uses the multipart request convention, e.g.
/// `variables.primaryImage` or `variables.secondaryImages.1`.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub variable_path: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn from_path(path: &Path, variable_path: impl Into<String>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AdminError::Validation(format!("invalid file name: {}", path.display())))?
            .to_string();
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            variable_path: variable_path.into(),
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Build the `operations` and `map` fields for a multipart upload.
///
/// Every file path is set to `null` in the operations variables, which is
/// where the server substitutes the uploaded stream.
pub(crate) fn operations_and_map(request: &GraphqlRequest, files: &[UploadFile]) -> Result<(Value, Value)> {
    let mut variables = match &request.variables {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };
    let mut map = Map::new();

    for (index, file) in files.iter().enumerate() {
        let segments: Vec<&str> = file.variable_path.split('.').collect();
        match segments.split_first() {
            Some((&"variables", rest)) if !rest.is_empty() => null_at(&mut variables, rest)?,
            _ => {
                return Err(AdminError::Validation(format!(
                    "upload path must start with `variables.`: {}",
                    file.variable_path
                )))
            }
        }
        map.insert(index.to_string(), json!([file.variable_path]));
    }

    let operations = json!({
        "query": request.query,
        "variables": variables,
    });
    Ok((operations, Value::Object(map)))
}

fn null_at(target: &mut Value, segments: &[&str]) -> Result<()> {
    let Some((head, rest)) = segments.split_first() else {
        *target = Value::Null;
        return Ok(());
    };

    let slot = match head.parse::<usize>() {
        Ok(index) => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            let items = target
                .as_array_mut()
                .ok_or_else(|| AdminError::Validation(format!("bad upload index {head}")))?;
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        Err(_) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            let fields = target
                .as_object_mut()
                .ok_or_else(|| AdminError::Validation(format!("bad upload field {head}")))?;
            fields.entry(head.to_string()).or_insert(Value::Null)
        }
    };

    null_at(slot, rest)
}

pub(crate) fn multipart_form(request: &GraphqlRequest, files: Vec<UploadFile>) -> Result<Form> {
    let (operations, map) = operations_and_map(request, &files)?;
    let mut form = Form::new()
        .text("operations", operations.to_string())
        .text("map", map.to_string());

    for (index, file) in files.into_iter().enumerate() {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        form = form.part(index.to_string(), part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::documents;

    fn file(path: &str) -> UploadFile {
        UploadFile {
            variable_path: path.to_string(),
            file_name: "a.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn map_indexes_files_and_nulls_their_variables() {
        let request = GraphqlRequest::new(documents::ADD_CAR, json!({ "name": "Yaris" }));
        let files = vec![
            file("variables.primaryImage"),
            file("variables.secondaryImages.0"),
            file("variables.secondaryImages.1"),
        ];

        let (operations, map) = operations_and_map(&request, &files).unwrap();

        assert_eq!(
            operations["variables"],
            json!({
                "name": "Yaris",
                "primaryImage": null,
                "secondaryImages": [null, null]
            })
        );
        assert_eq!(
            map,
            json!({
                "0": ["variables.primaryImage"],
                "1": ["variables.secondaryImages.0"],
                "2": ["variables.secondaryImages.1"]
            })
        );
    }

    #[test]
    fn path_outside_variables_is_rejected() {
        let request = GraphqlRequest::new(documents::ADD_CAR_BY_EXCEL, Value::Null);
        let err = operations_and_map(&request, &[file("excelFile")]).unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn from_path_guesses_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.xlsx");
        tokio::fs::write(&path, b"PK").await.unwrap();

        let upload = UploadFile::from_path(&path, "variables.excelFile").await.unwrap();
        assert_eq!(upload.file_name, "cars.xlsx");
        assert_eq!(
            upload.content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(upload.bytes, b"PK");
    }
}
