//! Descriptors of the Drive operations.
//!
//! Each descriptor is built once on first use and shared by every client.

use std::sync::LazyLock;

use crate::endpoint::Endpoint;
use crate::method::HttpMethod;
use crate::operation_id::OperationId;
use crate::response::{BinaryDownload, JsonEnvelope};

use super::docx::{BatchUpdateDocxBlockResp, ConvertDocxBlockResp, CreateDocxDescendantResp};
use super::whiteboard::CreateWhiteboardPlantUmlResp;

/// Scope shared by every operation in this module.
pub const SCOPE: &str = "Drive";

fn drive_operation(api: &'static str) -> OperationId {
    OperationId::new(SCOPE, api).expect("Drive operation names are valid identifiers")
}

static BATCH_UPDATE_DOCX_BLOCK: LazyLock<Endpoint<JsonEnvelope<BatchUpdateDocxBlockResp>>> =
    LazyLock::new(|| {
        Endpoint::builder()
            .operation(drive_operation("BatchUpdateDocxBlock"))
            .method(HttpMethod::Patch)
            .path("/open-apis/docx/v1/documents/:document_id/blocks/batch_update")
            .need_tenant_access_token(true)
            .need_user_access_token(true)
            .description("Update up to 200 blocks of a document in one call")
            .build()
    });

static CONVERT_DOCX_BLOCK: LazyLock<Endpoint<JsonEnvelope<ConvertDocxBlockResp>>> =
    LazyLock::new(|| {
        Endpoint::builder()
            .operation(drive_operation("ConvertDocxBlock"))
            .method(HttpMethod::Post)
            .path("/open-apis/docx/v1/documents/blocks/convert")
            .need_tenant_access_token(true)
            .need_user_access_token(true)
            .description("Convert Markdown or HTML into document blocks")
            .build()
    });

static CREATE_DOCX_DESCENDANT: LazyLock<Endpoint<JsonEnvelope<CreateDocxDescendantResp>>> =
    LazyLock::new(|| {
        Endpoint::builder()
            .operation(drive_operation("CreateDocxDescendant"))
            .method(HttpMethod::Post)
            .path("/open-apis/docx/v1/documents/:document_id/blocks/:block_id/descendant")
            .need_tenant_access_token(true)
            .need_user_access_token(true)
            .description("Insert a tree of blocks under a parent block")
            .build()
    });

static DOWNLOAD_WHITEBOARD_IMAGE: LazyLock<Endpoint<BinaryDownload>> = LazyLock::new(|| {
    Endpoint::builder()
        .operation(drive_operation("DownloadWhiteboardImage"))
        .method(HttpMethod::Get)
        .path("/open-apis/board/v1/whiteboards/:whiteboard_id/download_as_image")
        .need_tenant_access_token(true)
        .need_user_access_token(true)
        .description("Render a whiteboard as an image")
        .build()
});

static CREATE_WHITEBOARD_PLANTUML: LazyLock<Endpoint<JsonEnvelope<CreateWhiteboardPlantUmlResp>>> =
    LazyLock::new(|| {
        Endpoint::builder()
            .operation(drive_operation("CreateWhiteboardPlantUML"))
            .method(HttpMethod::Post)
            .path("/open-apis/board/v1/whiteboards/:whiteboard_id/nodes/plantuml")
            .need_tenant_access_token(true)
            .need_user_access_token(true)
            .description("Add a PlantUML node to a whiteboard")
            .build()
    });

pub fn batch_update_docx_block() -> &'static Endpoint<JsonEnvelope<BatchUpdateDocxBlockResp>> {
    &BATCH_UPDATE_DOCX_BLOCK
}

pub fn convert_docx_block() -> &'static Endpoint<JsonEnvelope<ConvertDocxBlockResp>> {
    &CONVERT_DOCX_BLOCK
}

pub fn create_docx_descendant() -> &'static Endpoint<JsonEnvelope<CreateDocxDescendantResp>> {
    &CREATE_DOCX_DESCENDANT
}

pub fn download_whiteboard_image() -> &'static Endpoint<BinaryDownload> {
    &DOWNLOAD_WHITEBOARD_IMAGE
}

pub fn create_whiteboard_plantuml() -> &'static Endpoint<JsonEnvelope<CreateWhiteboardPlantUmlResp>> {
    &CREATE_WHITEBOARD_PLANTUML
}
