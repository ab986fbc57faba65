use thiserror::Error;

/// Errors produced while cooking a `.bbmodel` document into a
/// [`Model`](crate::model::Model). All of them abort the load of the
/// offending document; animation sampling itself never fails.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("box UV layout is not supported, disable it in the authoring tool")]
    BoxUvUnsupported,

    #[error("invalid texture resolution {width}x{height}")]
    InvalidResolution { width: i32, height: i32 },

    #[error("cube '{element}' is rotated on more than one axis")]
    MultiAxisRotation { element: String },

    #[error("bone '{bone}' references unknown cube id '{cube_id}'")]
    UnknownCubeId { bone: String, cube_id: String },

    #[error("invalid child entry in bone '{bone}'")]
    InvalidChild { bone: String },

    #[error("duplicate bone name '{name}'")]
    DuplicateBoneName { name: String },

    #[error("negative keyframe time in animation '{animation}', bone '{bone}'")]
    NegativeKeyframeTime { animation: String, bone: String },

    #[error("texture '{name}' could not be decoded: {reason}")]
    BadTextureData { name: String, reason: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReadError>;
