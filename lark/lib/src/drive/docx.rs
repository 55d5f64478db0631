//! Document (docx) block operations.
//!
//! Block bodies stay as raw JSON: their structure belongs to the document
//! model, not to the transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::params::{ApiRequest, PathParams, QueryParams};

/// Revision id meaning "the latest revision".
pub const LATEST_REVISION: i64 = -1;

/// Insert position meaning "after the last child".
pub const APPEND_INDEX: i64 = -1;

/// How user ids in request and response bodies are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    OpenId,
    UnionId,
    UserId,
}

/// Source format accepted by the convert operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Markdown,
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchUpdateDocxBlockReq {
    #[serde(skip)]
    pub document_id: String,
    #[serde(skip)]
    pub document_revision_id: Option<i64>,
    /// Idempotency key.
    #[serde(skip)]
    pub client_token: Option<String>,
    #[serde(skip)]
    pub user_id_type: Option<IdType>,
    /// At most 200 entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<BlockUpdate>,
}

impl BatchUpdateDocxBlockReq {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            document_revision_id: None,
            client_token: None,
            user_id_type: None,
            requests: Vec::new(),
        }
    }

    pub fn revision(mut self, revision: i64) -> Self {
        self.document_revision_id = Some(revision);
        self
    }

    pub fn client_token(mut self, token: impl Into<String>) -> Self {
        self.client_token = Some(token.into());
        self
    }

    pub fn user_id_type(mut self, id_type: IdType) -> Self {
        self.user_id_type = Some(id_type);
        self
    }

    pub fn update(mut self, update: BlockUpdate) -> Self {
        self.requests.push(update);
        self
    }
}

impl ApiRequest for BatchUpdateDocxBlockReq {
    fn path_params(&self) -> PathParams {
        PathParams::new().with("document_id", &self.document_id)
    }

    fn query_params(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("document_revision_id", self.document_revision_id)
            .with_opt("client_token", self.client_token.as_deref())
            .with_opt("user_id_type", self.user_id_type)
    }
}

/// One block change inside a batch update. Set exactly one action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockUpdate {
    pub block_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_text_elements: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_file: Option<Value>,
}

impl BlockUpdate {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            ..Self::default()
        }
    }

    pub fn update_text_elements(mut self, elements: Value) -> Self {
        self.update_text_elements = Some(elements);
        self
    }

    pub fn update_text(mut self, text: Value) -> Self {
        self.update_text = Some(text);
        self
    }

    pub fn replace_image(mut self, image: Value) -> Self {
        self.replace_image = Some(image);
        self
    }

    pub fn replace_file(mut self, file: Value) -> Self {
        self.replace_file = Some(file);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateDocxBlockResp {
    /// Revision after the update.
    #[serde(default)]
    pub document_revision_id: i64,
    #[serde(default)]
    pub client_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertDocxBlockReq {
    pub content_type: ContentType,
    pub content: String,
}

impl ConvertDocxBlockReq {
    pub fn new(content_type: ContentType, content: impl Into<String>) -> Self {
        Self {
            content_type,
            content: content.into(),
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self::new(ContentType::Markdown, content)
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self::new(ContentType::Html, content)
    }
}

impl ApiRequest for ConvertDocxBlockReq {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertDocxBlockResp {
    #[serde(default)]
    pub first_level_block_ids: Vec<String>,
    /// Every converted block, flat, with temporary ids.
    #[serde(default)]
    pub blocks: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDocxDescendantReq {
    #[serde(skip)]
    pub document_id: String,
    /// Parent block.
    #[serde(skip)]
    pub block_id: String,
    #[serde(skip)]
    pub document_revision_id: Option<i64>,
    #[serde(skip)]
    pub client_token: Option<String>,
    /// Temporary ids of the top-level children, in order.
    pub children_id: Vec<String>,
    /// All descendants as a flat list.
    pub descendants: Vec<Value>,
    pub index: i64,
}

impl CreateDocxDescendantReq {
    /// Inserts under `block_id`, after its last child unless
    /// [`index`](Self::index) says otherwise.
    pub fn new(document_id: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            block_id: block_id.into(),
            document_revision_id: None,
            client_token: None,
            children_id: Vec::new(),
            descendants: Vec::new(),
            index: APPEND_INDEX,
        }
    }

    pub fn revision(mut self, revision: i64) -> Self {
        self.document_revision_id = Some(revision);
        self
    }

    pub fn client_token(mut self, token: impl Into<String>) -> Self {
        self.client_token = Some(token.into());
        self
    }

    pub fn index(mut self, index: i64) -> Self {
        self.index = index;
        self
    }

    pub fn children(mut self, children_id: Vec<String>, descendants: Vec<Value>) -> Self {
        self.children_id = children_id;
        self.descendants = descendants;
        self
    }

    /// Takes the children straight from a convert reply.
    pub fn converted(self, converted: ConvertDocxBlockResp) -> Self {
        self.children(converted.first_level_block_ids, converted.blocks)
    }
}

impl ApiRequest for CreateDocxDescendantReq {
    fn path_params(&self) -> PathParams {
        PathParams::new()
            .with("document_id", &self.document_id)
            .with("block_id", &self.block_id)
    }

    fn query_params(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("document_revision_id", self.document_revision_id)
            .with_opt("client_token", self.client_token.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDocxDescendantResp {
    #[serde(default)]
    pub children: Vec<DescendantChild>,
    #[serde(default)]
    pub block_id_relations: Vec<BlockIdRelation>,
    #[serde(default)]
    pub document_revision_id: i64,
}

impl CreateDocxDescendantResp {
    /// Returns the real id assigned to a temporary block id.
    pub fn resolve(&self, temporary_block_id: &str) -> Option<&str> {
        self.block_id_relations
            .iter()
            .find(|r| r.temporary_block_id == temporary_block_id)
            .map(|r| r.block_id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescendantChild {
    #[serde(default)]
    pub block_id: String,
    #[serde(default)]
    pub block_type: i64,
    /// Present for whiteboard blocks; holds the new whiteboard's token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIdRelation {
    #[serde(default)]
    pub temporary_block_id: String,
    #[serde(default)]
    pub block_id: String,
}
