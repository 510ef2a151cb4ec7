//! HTTP client for the document store.

use crate::config::ViewerConfig;
use crate::error::{Result, StoreError};
use crate::model::{Document, DocumentId, DocumentSummary, FileType, Page};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

const DOCUMENTS_PATH: &str = "api/documents/";
const UPLOAD_FAILED: &str = "Upload failed";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the document list, detail and upload endpoints
#[derive(Debug, Clone)]
pub struct DocumentStore {
    http: reqwest::Client,
    base: Url,
}

impl DocumentStore {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let base = config
            .api_base_url()
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| StoreError::InvalidUrl(format!("{path}: {e}")))
    }

    /// `GET /api/documents/`
    pub async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let url = self.join(DOCUMENTS_PATH)?;
        tracing::debug!(%url, "listing documents");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `GET /api/documents/{id}/`
    pub async fn get_document(&self, id: DocumentId) -> Result<Document> {
        let url = self.join(&format!("{DOCUMENTS_PATH}{id}/"))?;
        tracing::debug!(%url, "loading document");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `POST /api/documents/` with a multipart `file` and `title`
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>, title: &str) -> Result<Document> {
        check_upload_name(file_name)?;

        let url = self.join(DOCUMENTS_PATH)?;
        tracing::info!(file_name, size = bytes.len(), "uploading document");

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("title", title.to_string());
        let response = self.http.post(url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| UPLOAD_FAILED.to_string());
            tracing::warn!(status = status.as_u16(), %message, "upload rejected");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let document: Document = decode(response).await?;
        tracing::info!(
            id = document.id,
            pages = document.total_pages,
            "document uploaded"
        );
        Ok(document)
    }

    /// Upload a local file, titled with its file name
    pub async fn upload_path(&self, path: &Path) -> Result<Document> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::UnsupportedFileType(path.display().to_string()))?
            .to_string();
        check_upload_name(&file_name)?;

        let bytes = tokio::fs::read(path).await?;
        self.upload(&file_name, bytes, &file_name).await
    }

    /// Absolute URL of a page image
    pub fn page_image_url(&self, page: &Page) -> Result<Url> {
        match Url::parse(&page.image) {
            Ok(url) => Ok(url),
            Err(_) => self.join(page.image.trim_start_matches('/')),
        }
    }

    /// Raw encoded bytes of a page image
    pub async fn fetch_page_image(&self, page: &Page) -> Result<Vec<u8>> {
        let url = self.page_image_url(page)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Only PDF and DOCX files are accepted by the store
pub fn check_upload_name(file_name: &str) -> Result<FileType> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileType::from_extension)
        .ok_or_else(|| StoreError::UnsupportedFileType(file_name.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> DocumentStore {
        DocumentStore::new(&ViewerConfig {
            api_base: base.to_string(),
            ..ViewerConfig::default()
        })
        .unwrap()
    }

    fn page(image: &str) -> Page {
        Page {
            id: 1,
            page_number: 1,
            image: image.to_string(),
        }
    }

    #[test]
    fn upload_name_validation() {
        assert_eq!(check_upload_name("Thesis.PDF").unwrap(), FileType::Pdf);
        assert_eq!(check_upload_name("notes.docx").unwrap(), FileType::Docx);
        assert!(matches!(
            check_upload_name("notes.doc"),
            Err(StoreError::UnsupportedFileType(_))
        ));
        assert!(check_upload_name("README").is_err());
    }

    #[test]
    fn relative_page_images_resolve_against_base() {
        let store = store("http://localhost:8000");
        let url = store
            .page_image_url(&page("/media/pages/doc_1_page_1.jpg"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/media/pages/doc_1_page_1.jpg"
        );
    }

    #[test]
    fn absolute_page_images_are_kept() {
        let store = store("http://localhost:8000");
        let url = store
            .page_image_url(&page("https://cdn.example.com/p/1.jpg"))
            .unwrap();
        assert_eq!(url.host_str(), Some("cdn.example.com"));
    }

    #[test]
    fn document_urls_keep_base_path() {
        let store = store("http://localhost:8000/viewer");
        assert_eq!(
            store.join(DOCUMENTS_PATH).unwrap().as_str(),
            "http://localhost:8000/viewer/api/documents/"
        );
    }
}
