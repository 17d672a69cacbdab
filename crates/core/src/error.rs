/// Result alias that carries the custom [`LyricVideoError`] type.
pub type Result<T> = std::result::Result<T, LyricVideoError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum LyricVideoError {
    /// The uploaded file's MIME type is not one of the accepted kinds.
    #[error("Unsupported file type: {0}. Please use MP3 or WAV for audio, MP4 or WebM for video, and JPG, PNG, or GIF for images.")]
    UnsupportedFileType(String),
    /// The uploaded file is larger than the configured limit.
    #[error("File size {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
    /// Audio data could not be decoded, either at upload or when loading the
    /// waveform.
    #[error("Invalid audio file: {0}")]
    InvalidAudioDecode(String),
    /// A drag/drop payload was missing or did not describe a media record.
    #[error("Dropped data is malformed: {0}")]
    DroppedDataMalformed(String),
    /// The waveform widget failed to start or stop playback.
    #[error("Playback failed: {0}")]
    PlaybackFailure(String),
    /// A pointer gesture was started while another one still holds capture.
    #[error("a gesture is already in progress for item `{0}`")]
    GestureInProgress(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Free-form message for collaborator failures without a dedicated kind.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl LyricVideoError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Returns `true` for failures that end the attempt for one file or one
    /// widget without touching the rest of the editor state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType(_)
                | Self::FileTooLarge { .. }
                | Self::InvalidAudioDecode(_)
                | Self::PlaybackFailure(_)
        )
    }
}

impl From<&str> for LyricVideoError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for LyricVideoError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
