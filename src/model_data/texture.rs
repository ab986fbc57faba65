use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct RawTexture {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub id: String,

    // a data URI, "data:image/png;base64,..."
    #[serde(default)]
    pub source: String,
}
