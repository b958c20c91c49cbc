//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use floorplan_lib::Heuristic;

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require(field: &str, value: Option<&str>, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", field),
            request_id,
        ))),
    }
}

/// Request body for `POST /api/v1/route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Node identifier the route starts at.
    pub start: String,

    /// Node identifier the route ends at.
    pub end: String,

    /// Search heuristic; euclidean when omitted.
    #[serde(default)]
    pub heuristic: Heuristic,
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("start", Some(&self.start), request_id)?;
        require("end", Some(&self.end), request_id)
    }
}

/// Query string for `GET /floorplan/path`.
///
/// Both fields are optional at the type level so a missing parameter is
/// reported as a validation problem rather than a rejected extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PathQuery {
    /// The validated `(start, end)` pair.
    pub fn endpoints(&self, request_id: &str) -> Result<(&str, &str), Box<ProblemDetails>> {
        self.validate(request_id)?;
        Ok((
            self.start.as_deref().unwrap_or_default(),
            self.end.as_deref().unwrap_or_default(),
        ))
    }
}

impl Validate for PathQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("start", self.start.as_deref(), request_id)?;
        require("end", self.end.as_deref(), request_id)
    }
}

/// Query string for `POST /floorplan/load`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadFloorPlanQuery {
    /// File name relative to the configured floor-plan directory.
    pub file: Option<String>,
}

impl Validate for LoadFloorPlanQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("file", self.file.as_deref(), request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_valid() {
        let req = RouteRequest {
            start: "entrance".to_string(),
            end: "room-103".to_string(),
            heuristic: Heuristic::Euclidean,
        };
        assert!(req.validate("test").is_ok());
    }

    #[test]
    fn test_route_request_empty_start() {
        let req = RouteRequest {
            start: "".to_string(),
            end: "room-103".to_string(),
            heuristic: Heuristic::Zero,
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'start'"));
    }

    #[test]
    fn test_route_request_blank_end() {
        let req = RouteRequest {
            start: "entrance".to_string(),
            end: "   ".to_string(),
            heuristic: Heuristic::Euclidean,
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'end'"));
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_route_request_deserialization_defaults() {
        let json = r#"{"start":"entrance","end":"stairs"}"#;
        let req: RouteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.heuristic, Heuristic::Euclidean);

        let json = r#"{"start":"entrance","end":"stairs","heuristic":"manhattan"}"#;
        let req: RouteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.heuristic, Heuristic::Manhattan);
    }

    #[test]
    fn test_path_query_missing_parameter() {
        let query = PathQuery {
            start: Some("entrance".to_string()),
            end: None,
        };
        let err = query.endpoints("req-1").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'end'"));
        assert_eq!(err.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_path_query_endpoints() {
        let query = PathQuery {
            start: Some("entrance".to_string()),
            end: Some("stairs".to_string()),
        };
        assert_eq!(query.endpoints("req").unwrap(), ("entrance", "stairs"));
    }

    #[test]
    fn test_load_query_requires_file() {
        let err = LoadFloorPlanQuery::default().validate("req").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'file'"));

        let ok = LoadFloorPlanQuery {
            file: Some("floor_plan.json".to_string()),
        };
        assert!(ok.validate("req").is_ok());
    }
}
