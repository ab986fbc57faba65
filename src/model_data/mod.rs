pub mod animation;
pub mod element;
pub mod outliner;
pub mod texture;

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct RawModelData {
    #[serde(default)]
    pub meta: RawMeta,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub geometry_name: String,

    pub resolution: RawResolution,

    #[serde(default)]
    pub elements: Vec<element::RawElement>,

    #[serde(default)]
    pub outliner: Vec<outliner::RawOutlinerChild>,

    #[serde(default)]
    pub textures: Vec<texture::RawTexture>,

    #[serde(default)]
    pub animations: Vec<animation::RawAnimation>,
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct RawMeta {
    #[serde(default)]
    pub format_version: String,

    #[serde(default)]
    pub box_uv: bool,
}

#[derive(Copy, Clone, Deserialize, Debug)]
pub struct RawResolution {
    pub width: i32,
    pub height: i32,
}
