//! Experiment API operations.

use exptrack_core::tracking::{
    AddExperimentTags, CreateExperiment, ExperimentResponse, ExperimentSnapshot,
    GetExperimentById, GetExperimentByName, GetTags, GetTagsResponse, TagList,
};
use serde_json::json;

use super::Connection;
use crate::error::{ClientError, Result};
use crate::transport::Method;

pub const GET_BY_ID_PATH: &str = "/api/v1/modeldb/experiment/getExperimentById";
pub const GET_BY_NAME_PATH: &str = "/api/v1/modeldb/experiment/getExperimentByName";
pub const CREATE_PATH: &str = "/api/v1/modeldb/experiment/createExperiment";
pub const ADD_TAGS_PATH: &str = "/api/v1/modeldb/experiment/addExperimentTags";
pub const GET_TAGS_PATH: &str = "/api/v1/modeldb/experiment/getExperimentTags";
pub const DELETE_PATH: &str = "/api/v1/modeldb/experiment/deleteExperiment";

impl Connection {
    /// Get experiment by ID.
    pub fn get_experiment_by_id(&self, id: &str) -> Result<ExperimentSnapshot> {
        let resource = format!("Experiment {id}");
        let message = GetExperimentById { id: id.to_string() };
        let response = self.send_message(Method::Get, GET_BY_ID_PATH, &message, &resource)?;
        let response: ExperimentResponse = self.decode(&response)?;
        response
            .experiment
            .ok_or(ClientError::NotFound { resource })
    }

    /// Get experiment by name within a project.
    pub fn get_experiment_by_name(&self, project_id: &str, name: &str) -> Result<ExperimentSnapshot> {
        let resource = format!("Experiment {name:?} in project {project_id}");
        let message = GetExperimentByName {
            project_id: project_id.to_string(),
            name: name.to_string(),
        };
        let response = self.send_message(Method::Get, GET_BY_NAME_PATH, &message, &resource)?;
        let response: ExperimentResponse = self.decode(&response)?;
        response
            .experiment
            .ok_or(ClientError::NotFound { resource })
    }

    /// Create a new experiment.
    ///
    /// Unlike lookups, an empty response here is a malformed reply rather
    /// than a miss.
    pub fn create_experiment(&self, request: &CreateExperiment) -> Result<ExperimentSnapshot> {
        let resource = format!("Project {}", request.project_id);
        let response = self.send_message(Method::Post, CREATE_PATH, request, &resource)?;
        let response: ExperimentResponse = self.decode(&response)?;
        response.experiment.ok_or_else(|| {
            ClientError::Codec(exptrack_core::codec::CodecError::Schema {
                message: "CreateExperiment.Response",
                reason: "missing field `experiment`".to_string(),
            })
        })
    }

    /// Add tags to an experiment.
    pub fn add_experiment_tags(&self, id: &str, tags: &TagList) -> Result<()> {
        let message = AddExperimentTags {
            id: id.to_string(),
            tags: tags.to_strings(),
        };
        self.send_message(
            Method::Post,
            ADD_TAGS_PATH,
            &message,
            &format!("Experiment {id}"),
        )?;
        Ok(())
    }

    /// Get the tags of an experiment.
    pub fn get_experiment_tags(&self, id: &str) -> Result<Vec<String>> {
        let message = GetTags { id: id.to_string() };
        let response =
            self.send_message(Method::Get, GET_TAGS_PATH, &message, &format!("Experiment {id}"))?;
        let response: GetTagsResponse = self.decode(&response)?;
        Ok(response.tags)
    }

    /// Delete experiment by ID.
    ///
    /// The endpoint takes a bare `{"id": ...}` body rather than an encoded
    /// message, so this goes through [`Connection::request`] directly.
    pub fn delete_experiment(&self, id: &str) -> Result<()> {
        self.request(
            Method::Delete,
            DELETE_PATH,
            None,
            Some(json!({ "id": id })),
            &format!("Experiment {id}"),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::tests::mock_connection;
    use serde_json::json;

    #[test]
    fn test_get_by_id_sends_query() {
        let (conn, transport) = mock_connection();
        transport.push_json(200, json!({"experiment": {"id": "e-1", "name": "Expt 1"}}));

        let experiment = conn.get_experiment_by_id("e-1").unwrap();

        assert_eq!(experiment.name, "Expt 1");
        let request = transport.last_request();
        assert!(request.url.ends_with(GET_BY_ID_PATH));
        assert_eq!(request.query, vec![("id".to_string(), "e-1".to_string())]);
    }

    #[test]
    fn test_get_by_id_empty_response_is_not_found() {
        let (conn, transport) = mock_connection();
        transport.push_json(200, json!({}));

        let result = conn.get_experiment_by_id("missing");
        assert!(matches!(result, Err(ClientError::NotFound { .. })));
    }

    #[test]
    fn test_get_by_name_sends_project_and_name() {
        let (conn, transport) = mock_connection();
        transport.push_json(200, json!({"experiment": {"id": "e-1", "name": "Expt 1"}}));

        conn.get_experiment_by_name("p1", "Expt 1").unwrap();

        let query = transport.last_request().query;
        assert!(query.contains(&("project_id".to_string(), "p1".to_string())));
        assert!(query.contains(&("name".to_string(), "Expt 1".to_string())));
    }

    #[test]
    fn test_create_without_experiment_is_codec_error() {
        let (conn, transport) = mock_connection();
        transport.push_json(200, json!({}));

        let request = CreateExperiment {
            project_id: "p1".to_string(),
            name: "Expt 1".to_string(),
            description: String::new(),
            tags: vec![],
            attributes: vec![],
            date_created: 0,
        };
        let result = conn.create_experiment(&request);
        assert!(matches!(result, Err(ClientError::Codec(_))));
    }

    #[test]
    fn test_delete_sends_bare_id_body() {
        let (conn, transport) = mock_connection();
        transport.push_json(200, json!({"status": true}));

        conn.delete_experiment("e-1").unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.body, Some(json!({"id": "e-1"})));
    }
}
