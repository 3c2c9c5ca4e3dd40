use axum_test::multipart::{MultipartForm, Part};
use chrono::Utc;
use uuid::Uuid;
use vidhost_core::models::Video;

pub fn video_owned_by(user_id: Uuid) -> Video {
    let now = Utc::now();
    Video {
        id: Uuid::new_v4(),
        user_id,
        title: "Beach trip".to_string(),
        description: "Sunset timelapse".to_string(),
        video_url: None,
        created_at: now,
        updated_at: now,
    }
}

/// Start of an MP4 (`ftyp` box) padded to `len` bytes. The fakes never decode it.
pub fn fake_mp4(len: usize) -> Vec<u8> {
    let mut data = vec![
        0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm', 0x00, 0x00, 0x02,
        0x00,
    ];
    data.resize(len.max(data.len()), 0xAB);
    data
}

/// Multipart form with a single `video` part.
pub fn video_form(bytes: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(bytes))
        .file_name("clip.mp4")
        .mime_type(mime_type);
    MultipartForm::new().add_part("video", part)
}
