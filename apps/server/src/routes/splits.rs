// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Split endpoints: create, read, list and delete split triples.

use crate::error::ApiError;
use crate::types::{CreateSplitInput, DeleteAllResponse, ListParams, SplitRecord};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

const MAX_PROJECT_LEN: usize = 50;

fn validate_project(project: &str) -> Result<(), ApiError> {
    let len = project.chars().count();
    if len == 0 || len > MAX_PROJECT_LEN {
        return Err(ApiError::InvalidProject {
            max: MAX_PROJECT_LEN,
        });
    }
    Ok(())
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidId(id.to_string()))
}

fn split_not_found() -> ApiError {
    ApiError::NotFound("Split not found".to_string())
}

/// POST /projects/:project/splits - Split and persist.
pub async fn create_split(
    State(state): State<AppState>,
    Path(project): Path<String>,
    payload: Result<Json<CreateSplitInput>, JsonRejection>,
) -> Result<(StatusCode, Json<SplitRecord>), ApiError> {
    validate_project(&project)?;
    let Json(input) = payload?;

    tracing::debug!(
        project = %project,
        building_limits = input.building_limits.len(),
        height_plateaus = input.height_plateaus.len(),
        "Processing split"
    );

    // Process on blocking thread pool (CPU-intensive)
    let splitter = state.splitter.clone();
    let (input, result) = tokio::task::spawn_blocking(move || {
        let result = splitter.split(&input.building_limits, &input.height_plateaus);
        (input, result)
    })
    .await?;

    let split = match result {
        Ok(split) => split,
        Err(e) => {
            tracing::info!(project = %project, reason = %e, "Split rejected");
            return Err(e.into());
        }
    };
    tracing::debug!(project = %project, pieces = split.len(), "Processing split done");

    let record = state
        .store
        .save(&project, input.building_limits, input.height_plateaus, split)
        .await?;
    tracing::info!(project = %project, id = %record.id, "Split created");

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /projects/:project/splits/:id - Retrieve a stored split.
pub async fn get_split(
    State(state): State<AppState>,
    Path((project, id)): Path<(String, String)>,
) -> Result<Json<SplitRecord>, ApiError> {
    validate_project(&project)?;
    let id = parse_id(&id)?;

    match state.store.get(&project, &id).await? {
        Some(record) => Ok(Json(record)),
        None => {
            tracing::debug!(project = %project, id = %id, "Split not found");
            Err(split_not_found())
        }
    }
}

/// DELETE /projects/:project/splits/:id - Delete a stored split.
pub async fn delete_split(
    State(state): State<AppState>,
    Path((project, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    validate_project(&project)?;
    let id = parse_id(&id)?;

    if !state.store.delete(&project, &id).await? {
        return Err(split_not_found());
    }
    tracing::info!(project = %project, id = %id, "Split deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /projects/:project/splits - Delete all splits of a project.
pub async fn delete_all_splits(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    validate_project(&project)?;
    let num_deleted = state.store.delete_all(&project).await?;
    tracing::info!(project = %project, num_deleted, "Splits deleted");
    Ok(Json(DeleteAllResponse { num_deleted }))
}

/// GET /projects/:project/splits - List stored splits.
pub async fn list_splits(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<SplitRecord>>, ApiError> {
    validate_project(&project)?;
    let records = state
        .store
        .list(&project, params.skip, params.limit)
        .await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::SplitStore;
    use crate::build_router;
    use archsplit_geometry::Splitter;
    use axum::{body::Body, http::Request, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const TESTCASES_PATH: &str = "../../tests/testcases";

    fn load_testcase(name: &str) -> Value {
        let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(TESTCASES_PATH)
            .join(name);
        let read = |file: &str| -> Value {
            let content = std::fs::read_to_string(dir.join(file)).unwrap();
            serde_json::from_str(&content).unwrap()
        };
        json!({
            "building_limits": read("building_limits.geojson"),
            "height_plateaus": read("height_plateaus.geojson"),
        })
    }

    async fn test_app() -> Router {
        let data_dir = std::env::temp_dir().join(format!("archsplit-routes-{}", Uuid::new_v4()));
        let config = Config::from_lookup(|key| match key {
            "DATA_DIR" => data_dir.to_str().map(|s| s.to_string()),
            "MAX_PAGE_SIZE" => Some("5".to_string()),
            _ => None,
        });

        let state = AppState {
            store: Arc::new(SplitStore::new(&config.data_dir, config.max_page_size).await),
            splitter: Arc::new(Splitter::new(config.split_config())),
            config: Arc::new(config),
        };
        build_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["health"], "OK");
    }

    #[tokio::test]
    async fn test_create_vaterlandsparken() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/projects/oslo/splits",
            Some(load_testcase("vaterlandsparken")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["project"], "oslo");

        let features = body["split"]["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        let elevation = |i: usize| features[i]["properties"]["elevation"].as_f64().unwrap();
        assert_ne!(elevation(0), elevation(1));
        assert_ne!(elevation(0), elevation(2));
        assert_ne!(elevation(1), elevation(2));

        // The stored record is returned unchanged
        let id = body["id"].as_str().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/projects/oslo/splits/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_height_plateaus_do_not_cover() {
        let app = test_app().await;
        let mut input = load_testcase("vaterlandsparken");
        let ring = input["height_plateaus"]["features"][0]["geometry"]["coordinates"][0]
            .as_array_mut()
            .unwrap();
        ring.pop();
        let first = ring[0].clone();
        *ring.last_mut().unwrap() = first;

        let (status, body) = send(&app, "POST", "/projects/oslo/splits", Some(input)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("The height plateaus do not completely cover the building limits"));
    }

    #[tokio::test]
    async fn test_invalid_testcases_are_rejected() {
        let app = test_app().await;
        for name in [
            "invalid_overlapping_building_limits",
            "invalid_overlapping_height_plateaus",
            "invalid_not_covering",
        ] {
            let (status, body) =
                send(&app, "POST", "/projects/oslo/splits", Some(load_testcase(name))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", name);
            assert_eq!(body["code"], "SPLITTING_ERROR");
        }
    }

    #[tokio::test]
    async fn test_structural_errors_are_unprocessable() {
        let app = test_app().await;

        for missing in ["building_limits", "height_plateaus"] {
            let mut input = load_testcase("vaterlandsparken");
            input.as_object_mut().unwrap().remove(missing);
            let (status, body) = send(&app, "POST", "/projects/oslo/splits", Some(input)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["detail"].as_str().unwrap().contains(missing));
        }

        let mut input = load_testcase("vaterlandsparken");
        input["height_plateaus"]["features"][0]["properties"]
            .as_object_mut()
            .unwrap()
            .remove("elevation");
        let (status, body) = send(&app, "POST", "/projects/oslo/splits", Some(input)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("Missing 'elevation' property"));

        let mut input = load_testcase("vaterlandsparken");
        input["height_plateaus"]["features"][0]["properties"]["elevation"] = json!("wrong type");
        let (status, body) = send(&app, "POST", "/projects/oslo/splits", Some(input)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("'elevation' property must be a float"));

        let mut input = load_testcase("vaterlandsparken");
        input["building_limits"]["features"][0]["geometry"]["type"] = json!("MultiPolygon");
        let (status, _) = send(&app, "POST", "/projects/oslo/splits", Some(input)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_project_name_length() {
        let app = test_app().await;
        let project = "p".repeat(MAX_PROJECT_LEN + 1);
        let (status, body) = send(
            &app,
            "POST",
            &format!("/projects/{}/splits", project),
            Some(load_testcase("vaterlandsparken")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PROJECT");

        let id = Uuid::new_v4();
        for (method, uri) in [
            ("GET", format!("/projects/{}/splits", project)),
            ("DELETE", format!("/projects/{}/splits", project)),
            ("GET", format!("/projects/{}/splits/{}", project, id)),
            ("DELETE", format!("/projects/{}/splits/{}", project, id)),
        ] {
            let (status, body) = send(&app, method, &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert_eq!(body["code"], "INVALID_PROJECT");
        }
    }

    #[tokio::test]
    async fn test_delete_split() {
        let app = test_app().await;
        let (_, created) = send(
            &app,
            "POST",
            "/projects/oslo/splits",
            Some(load_testcase("vaterlandsparken")),
        )
        .await;
        let uri = format!("/projects/oslo/splits/{}", created["id"].as_str().unwrap());

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Split not found");

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let app = test_app().await;
        let (status, body) = send(&app, "DELETE", "/projects/oslo/splits/invalid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("'invalid' is not a valid id"));
    }

    #[tokio::test]
    async fn test_list_and_delete_all() {
        let app = test_app().await;
        for _ in 0..7 {
            let (status, _) = send(
                &app,
                "POST",
                "/projects/oslo/splits",
                Some(load_testcase("vaterlandsparken")),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        // Page size is capped at MAX_PAGE_SIZE
        let (status, body) = send(&app, "GET", "/projects/oslo/splits?limit=50", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);

        let (_, body) = send(&app, "GET", "/projects/oslo/splits?skip=5", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = send(&app, "GET", "/projects/bergen/splits", None).await;
        assert!(body.as_array().unwrap().is_empty());

        let (status, body) = send(&app, "DELETE", "/projects/oslo/splits", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["num_deleted"], 7);

        let (_, body) = send(&app, "GET", "/projects/oslo/splits", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }
}
