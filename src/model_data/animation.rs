use serde::Deserialize;
use std::collections::HashMap;

#[derive(Clone, Deserialize, Debug)]
pub struct RawAnimation {
    pub name: String,

    #[serde(rename = "loop")]
    #[serde(default)]
    pub loop_mode: String,

    #[serde(default)]
    pub length: f32,

    #[serde(default)]
    pub animators: HashMap<String, RawAnimator>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawAnimator {
    pub name: String,

    #[serde(rename = "type")]
    #[serde(default)]
    pub animator_type: String,

    #[serde(default)]
    pub keyframes: Vec<RawKeyframe>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawKeyframe {
    pub channel: String,

    pub time: f32,

    #[serde(default)]
    pub interpolation: String,

    #[serde(default)]
    pub data_points: Vec<RawDataPoint>,
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct RawDataPoint {
    #[serde(default)]
    pub x: RawScalar,

    #[serde(default)]
    pub y: RawScalar,

    #[serde(default)]
    pub z: RawScalar,
}

/// Blockbench writes data point components either as plain numbers or as
/// strings holding expressions; only numeric strings are supported here.
#[derive(Clone, Deserialize, Debug)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f32),
    Text(String),
}

impl Default for RawScalar {
    fn default() -> Self {
        RawScalar::Number(0.0)
    }
}

impl RawScalar {
    pub fn to_f32(&self) -> Option<f32> {
        match self {
            RawScalar::Number(value) => Some(*value),
            RawScalar::Text(text) => text.trim().parse().ok(),
        }
    }
}
