use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;

const SAMPLE_TEXTS_PREFIX: &str = "sample-texts";

/// Object key for an uploaded sample-text file. The millisecond timestamp
/// keeps re-uploads of the same filename from overwriting each other.
pub fn sample_texts_key(filename: &str) -> String {
    format!(
        "{SAMPLE_TEXTS_PREFIX}/{}-{filename}",
        Utc::now().timestamp_millis()
    )
}

/// Uploads an employee's sample texts and returns the object key.
pub async fn upload_sample_texts(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    filename: &str,
    data: Bytes,
) -> Result<String, AppError> {
    let key = sample_texts_key(filename);

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(data))
        .content_type("text/plain")
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("sample text upload failed: {e}")))?;

    info!("Uploaded sample texts to s3://{bucket}/{key}");
    Ok(key)
}

/// Downloads an employee's sample texts as UTF-8 text.
pub async fn fetch_sample_texts(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<String, AppError> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("sample text download failed: {e}")))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::Storage(format!("sample text read failed: {e}")))?;

    String::from_utf8(data.into_bytes().to_vec())
        .map_err(|_| AppError::Validation("Sample texts are not valid UTF-8".into()))
}

/// Deletes an employee's sample texts from the bucket.
pub async fn delete_sample_texts(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("sample text delete failed: {e}")))?;

    info!("Deleted sample texts s3://{bucket}/{key}");
    Ok(())
}
