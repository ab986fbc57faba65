use nalgebra::{Vector3, Vector4};
use std::collections::HashMap;

use crate::animation::Animation;
use crate::shared_types::{Axis3, CubeFace};

/// Everything the packaging side needs to bake renderer-visible shapes:
/// textures, the bone asset tree and the animation set.
#[derive(Clone, Debug)]
pub struct ModelAsset {
    pub name: String,

    pub textures: Vec<Texture>,

    /// Element texture index to texture name.
    pub texture_mapping: HashMap<usize, String>,

    pub bones: Vec<BoneAsset>,

    pub animations: HashMap<String, Animation>,
}

/// Geometry payload of a single bone; structurally isomorphic to the
/// [`Bone`](crate::model::Bone) tree by name.
#[derive(Clone, Debug)]
pub struct BoneAsset {
    pub name: String,

    /// Rotation origin in (converted) source coordinates.
    pub pivot: Vector3<f32>,

    pub custom_model_data: i32,

    /// Displacement from the pivot to the geometry center, model units.
    pub offset: Vector3<f32>,

    pub elements: Vec<ElementAsset>,

    /// The geometry is below the smallest reliably displayed size and
    /// was inflated at bake time.
    pub small: bool,

    pub children: Vec<BoneAsset>,
}

#[derive(Clone, Debug)]
pub struct ElementAsset {
    pub from: Vector3<f32>,
    pub to: Vector3<f32>,
    pub rotation: ElementRotation,
    pub faces: HashMap<CubeFace, ElementFace>,
}

/// Cuboids may only rotate around one axis at a time.
#[derive(Copy, Clone, Debug)]
pub struct ElementRotation {
    pub origin: Vector3<f32>,
    pub axis: Axis3,
    pub angle: f32,
}

#[derive(Clone, Debug)]
pub struct ElementFace {
    /// UV rectangle normalized by the declared texture resolution.
    pub uv: Vector4<f32>,

    /// Symbolic texture reference, `"#<index>"`.
    pub texture: String,
}

#[derive(Clone, Debug)]
pub struct Texture {
    pub name: String,

    /// Decoded PNG payload.
    pub data: Vec<u8>,

    pub width: u32,
    pub height: u32,
}
