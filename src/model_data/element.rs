use serde::Deserialize;
use std::collections::HashMap;

#[derive(Clone, Deserialize, Debug)]
pub struct RawElement {
    pub uuid: String,

    #[serde(default)]
    pub name: String,

    pub from: [f32; 3],

    pub to: [f32; 3],

    #[serde(default)]
    pub origin: [f32; 3],

    #[serde(default)]
    pub rotation: [f32; 3],

    #[serde(default)]
    pub faces: HashMap<String, RawFace>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawFace {
    pub uv: [f32; 4],

    // absent and null both mean "no texture bound"
    #[serde(default)]
    pub texture: Option<i32>,
}
