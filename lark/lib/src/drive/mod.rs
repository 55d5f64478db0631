//! Drive operations: document blocks and whiteboards.
//!
//! [`DriveService`] is a thin view over an [`ApiClient`]; every method is
//! one call to [`ApiClient::dispatch`] with the matching descriptor from
//! [`endpoints`]. The `mock_*` / `unmock_*` pairs install and remove
//! per-operation overrides on the client.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use lark_lib::drive::{ConvertDocxBlockReq, CreateDocxDescendantReq};
//!
//! let drive = client.drive();
//! let converted = drive
//!     .convert_docx_block(&ConvertDocxBlockReq::markdown("# Notes"), None)
//!     .await?
//!     .into_data()
//!     .unwrap_or_default();
//!
//! let insert = CreateDocxDescendantReq::new(&doc_id, &doc_id).converted(converted);
//! drive.create_docx_descendant(&insert, None).await?;
//! ```

mod docx;
pub mod endpoints;
mod whiteboard;

pub use docx::{
    APPEND_INDEX, BatchUpdateDocxBlockReq, BatchUpdateDocxBlockResp, BlockIdRelation, BlockUpdate,
    ContentType, ConvertDocxBlockReq, ConvertDocxBlockResp, CreateDocxDescendantReq,
    CreateDocxDescendantResp, DescendantChild, IdType, LATEST_REVISION,
};
pub use whiteboard::{
    CreateWhiteboardPlantUmlReq, CreateWhiteboardPlantUmlResp, DownloadWhiteboardImageReq,
    STYLE_CLASSIC, SYNTAX_PLANTUML,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::options::MethodOptions;
use crate::response::{ApiReply, FileDownload};

/// Drive operations bound to one client.
#[derive(Debug, Clone, Copy)]
pub struct DriveService<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn drive(&self) -> DriveService<'_> {
        DriveService { client: self }
    }
}

impl<'a> DriveService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Applies block updates to a document.
    ///
    /// `PATCH /open-apis/docx/v1/documents/:document_id/blocks/batch_update`
    pub async fn batch_update_docx_block(
        &self,
        request: &BatchUpdateDocxBlockReq,
        options: Option<&MethodOptions>,
    ) -> Result<ApiReply<BatchUpdateDocxBlockResp>, ApiError> {
        self.client
            .dispatch(endpoints::batch_update_docx_block(), request, options)
            .await
    }

    /// Converts Markdown or HTML into blocks with temporary ids.
    ///
    /// `POST /open-apis/docx/v1/documents/blocks/convert`
    pub async fn convert_docx_block(
        &self,
        request: &ConvertDocxBlockReq,
        options: Option<&MethodOptions>,
    ) -> Result<ApiReply<ConvertDocxBlockResp>, ApiError> {
        self.client
            .dispatch(endpoints::convert_docx_block(), request, options)
            .await
    }

    /// Inserts a block tree under a parent block.
    ///
    /// `POST /open-apis/docx/v1/documents/:document_id/blocks/:block_id/descendant`
    pub async fn create_docx_descendant(
        &self,
        request: &CreateDocxDescendantReq,
        options: Option<&MethodOptions>,
    ) -> Result<ApiReply<CreateDocxDescendantResp>, ApiError> {
        self.client
            .dispatch(endpoints::create_docx_descendant(), request, options)
            .await
    }

    /// Downloads a whiteboard rendered as an image.
    ///
    /// `GET /open-apis/board/v1/whiteboards/:whiteboard_id/download_as_image`
    pub async fn download_whiteboard_image(
        &self,
        request: &DownloadWhiteboardImageReq,
        options: Option<&MethodOptions>,
    ) -> Result<ApiReply<FileDownload>, ApiError> {
        self.client
            .dispatch(endpoints::download_whiteboard_image(), request, options)
            .await
    }

    /// Adds a PlantUML node to a whiteboard.
    ///
    /// `POST /open-apis/board/v1/whiteboards/:whiteboard_id/nodes/plantuml`
    pub async fn create_whiteboard_plantuml(
        &self,
        request: &CreateWhiteboardPlantUmlReq,
        options: Option<&MethodOptions>,
    ) -> Result<ApiReply<CreateWhiteboardPlantUmlResp>, ApiError> {
        self.client
            .dispatch(endpoints::create_whiteboard_plantuml(), request, options)
            .await
    }

    pub fn mock_batch_update_docx_block<M>(&self, mock: M)
    where
        M: Fn(&BatchUpdateDocxBlockReq, &MethodOptions) -> Result<ApiReply<BatchUpdateDocxBlockResp>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.client
            .mocks()
            .install::<BatchUpdateDocxBlockReq, _, _>(endpoints::batch_update_docx_block(), mock);
    }

    pub fn unmock_batch_update_docx_block(&self) {
        self.client.mocks().remove(endpoints::batch_update_docx_block());
    }

    pub fn mock_convert_docx_block<M>(&self, mock: M)
    where
        M: Fn(&ConvertDocxBlockReq, &MethodOptions) -> Result<ApiReply<ConvertDocxBlockResp>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.client
            .mocks()
            .install::<ConvertDocxBlockReq, _, _>(endpoints::convert_docx_block(), mock);
    }

    pub fn unmock_convert_docx_block(&self) {
        self.client.mocks().remove(endpoints::convert_docx_block());
    }

    pub fn mock_create_docx_descendant<M>(&self, mock: M)
    where
        M: Fn(&CreateDocxDescendantReq, &MethodOptions) -> Result<ApiReply<CreateDocxDescendantResp>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.client
            .mocks()
            .install::<CreateDocxDescendantReq, _, _>(endpoints::create_docx_descendant(), mock);
    }

    pub fn unmock_create_docx_descendant(&self) {
        self.client.mocks().remove(endpoints::create_docx_descendant());
    }

    pub fn mock_download_whiteboard_image<M>(&self, mock: M)
    where
        M: Fn(&DownloadWhiteboardImageReq, &MethodOptions) -> Result<ApiReply<FileDownload>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.client
            .mocks()
            .install::<DownloadWhiteboardImageReq, _, _>(endpoints::download_whiteboard_image(), mock);
    }

    pub fn unmock_download_whiteboard_image(&self) {
        self.client.mocks().remove(endpoints::download_whiteboard_image());
    }

    pub fn mock_create_whiteboard_plantuml<M>(&self, mock: M)
    where
        M: Fn(&CreateWhiteboardPlantUmlReq, &MethodOptions) -> Result<ApiReply<CreateWhiteboardPlantUmlResp>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.client.mocks().install::<CreateWhiteboardPlantUmlReq, _, _>(
            endpoints::create_whiteboard_plantuml(),
            mock,
        );
    }

    pub fn unmock_create_whiteboard_plantuml(&self) {
        self.client.mocks().remove(endpoints::create_whiteboard_plantuml());
    }
}
