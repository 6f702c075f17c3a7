use crate::analysis::{self, AudioStats};
use crate::models::AudioRecording;
use crate::startup::AppState;
use axum::{
    extract::{multipart::Field, multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::extract::{optional_text, Page, QueryParams};

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingResponse {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AudioStats>,
    pub created_at: DateTime<Utc>,
}

impl From<AudioRecording> for RecordingResponse {
    fn from(r: AudioRecording) -> Self {
        Self {
            id: r.id,
            file_name: r.file_name,
            content_type: r.content_type,
            size_bytes: r.size_bytes,
            word: r.word,
            language: r.language,
            speaker: r.speaker,
            stats: r.stats,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListRecordingsQuery {
    pub word: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingListResponse {
    pub recordings: Vec<RecordingResponse>,
    pub count: usize,
}

struct UploadedFile {
    file_name: String,
    declared_type: Option<String>,
    data: Vec<u8>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Audio file is too large".to_string())
    } else {
        AppError::BadRequest(anyhow::anyhow!("Invalid multipart body: {}", err.body_text()))
    }
}

async fn read_file(mut field: Field<'_>, max_bytes: usize) -> Result<UploadedFile, AppError> {
    let file_name = field.file_name().unwrap_or("recording").to_string();
    let declared_type = field.content_type().map(str::to_string);

    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if data.len() + chunk.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Audio file exceeds the {} byte limit",
                max_bytes
            )));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(UploadedFile {
        file_name,
        declared_type,
        data,
    })
}

async fn read_text(field: Field<'_>) -> Result<Option<String>, AppError> {
    let text = field.text().await.map_err(multipart_error)?;
    Ok(optional_text(Some(text)))
}

fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "ogg" | "oga" => Some("audio/ogg"),
        "flac" => Some("audio/flac"),
        "m4a" => Some("audio/mp4"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}

fn extension_for_content_type(content_type: &str) -> &'static str {
    match content_type {
        "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => "wav",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" => "ogg",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/mp4" | "audio/x-m4a" => "m4a",
        "audio/webm" => "webm",
        _ => "bin",
    }
}

/// The declared type wins unless it is the generic octet-stream, in which
/// case the file extension decides.
fn resolve_content_type(declared: Option<&str>, file_name: &str) -> Result<String, AppError> {
    let declared = declared
        .map(|t| t.split(';').next().unwrap_or_default().trim().to_lowercase())
        .filter(|t| !t.is_empty() && t != "application/octet-stream");

    let resolved = declared.or_else(|| {
        extension_of(file_name)
            .and_then(|ext| content_type_for_extension(&ext))
            .map(str::to_string)
    });

    match resolved {
        Some(t) if t.starts_with("audio/") => Ok(t),
        Some(t) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Unsupported content type '{}', expected audio/*",
            t
        ))),
        None => Err(AppError::BadRequest(anyhow::anyhow!(
            "Could not determine an audio content type for '{}'",
            file_name
        ))),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_recording(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<RecordingResponse>), AppError> {
    let mut upload = None;
    let mut word = None;
    let mut language = None;
    let mut speaker = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => upload = Some(read_file(field, state.max_audio_bytes).await?),
            "word" => word = read_text(field).await?,
            "language" => language = read_text(field).await?,
            "speaker" => speaker = read_text(field).await?,
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;
    if upload.data.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Uploaded file is empty")));
    }

    let content_type = resolve_content_type(upload.declared_type.as_deref(), &upload.file_name)?;
    let extension = extension_for_content_type(&content_type);

    let (data, stats) = if extension == "wav" {
        let data = upload.data;
        let (data, result) = tokio::task::spawn_blocking(move || {
            let result = analysis::analyze_bytes(&data);
            (data, result)
        })
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Audio analysis task failed: {}", e)))?;
        let stats = result
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Malformed WAV file: {}", e)))?;
        (data, Some(stats))
    } else {
        (upload.data, None)
    };

    let mut recording = AudioRecording::new(
        upload.file_name,
        content_type,
        data.len() as i64,
        extension,
    );
    recording.word = word;
    recording.language = language;
    recording.speaker = speaker;
    recording.stats = stats;

    state
        .storage
        .upload(&recording.storage_key, data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store audio {}: {}", recording.storage_key, e);
            e
        })?;

    if let Err(e) = state.repository.insert(&recording).await {
        // Keep storage in step with metadata.
        if let Err(cleanup) = state.storage.delete(&recording.storage_key).await {
            tracing::warn!(storage_key = %recording.storage_key, error = %cleanup, "Failed to remove orphaned audio");
        }
        return Err(e);
    }

    tracing::info!(
        recording_id = %recording.id,
        size_bytes = recording.size_bytes,
        analysed = recording.stats.is_some(),
        "Recording stored"
    );

    Ok((StatusCode::CREATED, Json(recording.into())))
}

#[tracing::instrument(skip(state))]
pub async fn list_recordings(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListRecordingsQuery>,
) -> Result<Json<RecordingListResponse>, AppError> {
    let word = optional_text(query.word);
    let page = Page::new(query.limit, query.offset);

    let recordings: Vec<RecordingResponse> = state
        .repository
        .list(word.as_deref(), page)
        .await?
        .into_iter()
        .map(RecordingResponse::from)
        .collect();

    Ok(Json(RecordingListResponse {
        count: recordings.len(),
        recordings,
    }))
}

async fn find_recording(state: &AppState, id: &str) -> Result<AudioRecording, AppError> {
    state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Recording not found: {}", id)))
}

#[tracing::instrument(skip(state))]
pub async fn get_recording(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecordingResponse>, AppError> {
    Ok(Json(find_recording(&state, &id).await?.into()))
}

#[tracing::instrument(skip(state))]
pub async fn download_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recording = find_recording(&state, &id).await?;
    let data = state.storage.download(&recording.storage_key).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, recording.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", recording.file_name.replace('"', "")),
            ),
        ],
        data,
    ))
}

#[tracing::instrument(skip(state))]
pub async fn delete_recording(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let recording = state
        .repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Recording not found: {}", id)))?;

    // The file goes first: a storage failure leaves the record in place for a retry.
    state.storage.delete(&recording.storage_key).await?;
    state
        .repository
        .delete(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Recording not found: {}", id)))?;

    tracing::info!(recording_id = %id, "Recording deleted");
    Ok(StatusCode::NO_CONTENT)
}
