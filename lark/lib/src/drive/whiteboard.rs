//! Whiteboard operations.

use serde::{Deserialize, Serialize};

use crate::params::{ApiRequest, PathParams};

/// Classic style; the node stays editable after import.
pub const STYLE_CLASSIC: i64 = 2;
/// PlantUML source syntax.
pub const SYNTAX_PLANTUML: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadWhiteboardImageReq {
    #[serde(skip)]
    pub whiteboard_id: String,
}

impl DownloadWhiteboardImageReq {
    pub fn new(whiteboard_id: impl Into<String>) -> Self {
        Self {
            whiteboard_id: whiteboard_id.into(),
        }
    }
}

impl ApiRequest for DownloadWhiteboardImageReq {
    fn path_params(&self) -> PathParams {
        PathParams::new().with("whiteboard_id", &self.whiteboard_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateWhiteboardPlantUmlReq {
    #[serde(skip)]
    pub whiteboard_id: String,
    pub plant_uml_code: String,
    pub style_type: i64,
    pub syntax_type: i64,
}

impl CreateWhiteboardPlantUmlReq {
    pub fn new(whiteboard_id: impl Into<String>, plant_uml_code: impl Into<String>) -> Self {
        Self {
            whiteboard_id: whiteboard_id.into(),
            plant_uml_code: plant_uml_code.into(),
            style_type: STYLE_CLASSIC,
            syntax_type: SYNTAX_PLANTUML,
        }
    }

    pub fn style_type(mut self, style_type: i64) -> Self {
        self.style_type = style_type;
        self
    }
}

impl ApiRequest for CreateWhiteboardPlantUmlReq {
    fn path_params(&self) -> PathParams {
        PathParams::new().with("whiteboard_id", &self.whiteboard_id)
    }
}

/// The platform answers with an empty `data` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWhiteboardPlantUmlResp {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plantuml_body_excludes_whiteboard_id() {
        let req = CreateWhiteboardPlantUmlReq::new("wb1", "@startuml\nA -> B\n@enduml");
        assert_eq!(req.path_params().get("whiteboard_id"), Some("wb1"));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "plant_uml_code": "@startuml\nA -> B\n@enduml",
                "style_type": 2,
                "syntax_type": 1
            })
        );
    }

    #[test]
    fn test_download_request_has_no_body_fields() {
        let req = DownloadWhiteboardImageReq::new("wb1");
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({}));
        assert!(req.query_params().is_empty());
    }

    #[test]
    fn test_plantuml_reply_ignores_unknown_fields() {
        let resp: CreateWhiteboardPlantUmlResp =
            serde_json::from_value(json!({"node_id": "n1"})).unwrap();
        assert_eq!(resp, CreateWhiteboardPlantUmlResp::default());
    }
}
