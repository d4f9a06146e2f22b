//! CSV import/export passthrough endpoints.
//!
//! The backend owns the CSV processing; these calls only move bytes and
//! return its opaque status documents.

use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

use super::ServerApiClient;

impl ServerApiClient {
    /// Uploads a CSV file as `multipart/form-data` (field `file`) and returns
    /// the backend's status document.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Remote`] on a non-2xx status.
    /// - [`ClientError::Transport`] on network failure.
    /// - [`ClientError::Decode`] if the response body is not JSON.
    pub async fn upload_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint("api/csv/upload")?;
        let part = Part::bytes(contents)
            .file_name(file_name.to_owned())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        tracing::debug!(method = "POST", %url, file_name, "server api request");
        let request = self.client.post(url.clone()).multipart(form);
        let response = self.send(request, &url).await?;
        Self::decode(response, "csv upload").await
    }

    /// Downloads the current CSV export as raw bytes.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Remote`] on a non-2xx status.
    /// - [`ClientError::Transport`] on network failure or an unreadable body.
    pub async fn download_csv(&self) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint("api/csv/download")?;
        tracing::debug!(method = "GET", %url, "server api request");
        let response = self.send(self.client.get(url.clone()), &url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Returns the backend's CSV processing status document.
    ///
    /// # Errors
    ///
    /// Same as [`ServerApiClient::upload_csv`].
    pub async fn get_csv_status(&self) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint("api/csv/status")?;
        self.get_json(url, "csv status").await
    }
}
