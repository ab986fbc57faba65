use crate::shared_types::default_true;
use serde::Deserialize;

/// An outliner entry is either a nested bone node or a string reference
/// to a cuboid in the flat element list. Anything else deserializes into
/// `Malformed` and is rejected when the tree is cooked, so the error can
/// name the enclosing bone.
#[derive(Clone, Deserialize, Debug)]
#[serde(untagged)]
pub enum RawOutlinerChild {
    CubeId(String),
    Node(RawOutlinerNode),
    Malformed(serde_json::Value),
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawOutlinerNode {
    pub name: String,

    #[serde(default)]
    pub origin: [f32; 3],

    #[serde(default)]
    pub rotation: [f32; 3],

    #[serde(default = "default_true")]
    pub visibility: bool,

    #[serde(default)]
    pub children: Vec<RawOutlinerChild>,
}
