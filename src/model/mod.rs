pub mod asset;

use nalgebra::Vector3;

use crate::animation::Animation;

/// A movable part of a [`Model`]. Bone names are unique in the scope of
/// the whole model, child order follows the source document.
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,

    /// Translation relative to the parent bone pivot, in model units.
    pub position: Vector3<f32>,

    /// Initial orientation, degrees per axis.
    pub rotation: Vector3<f32>,

    pub children: Vec<Bone>,

    /// Handle binding this bone to its pre-baked renderable shape.
    pub custom_model_data: i32,

    /// Display compensation factor, always `>= 1.0`. One when the bone
    /// geometry already renders at its authored size.
    pub scale: f32,

    /// The bone participates in the hierarchy but is never displayed
    /// itself.
    pub parent_only: bool,
}

impl Bone {
    pub fn child(&self, name: &str) -> Option<&Bone> {
        self.children.iter().find(|bone| bone.name == name)
    }
}

/// An immutable model cooked from a `.bbmodel` document: the bone tree,
/// its geometry payload and every animation. Safe to share read-only
/// between threads.
#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,

    pub bones: Vec<Bone>,

    pub texture_width: u32,
    pub texture_height: u32,

    pub asset: asset::ModelAsset,
}

impl Model {
    /// Finds a bone anywhere in the tree by its unique name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        fn find<'a>(bones: &'a [Bone], name: &str) -> Option<&'a Bone> {
            for bone in bones {
                if bone.name == name {
                    return Some(bone);
                }
                if let Some(found) = find(&bone.children, name) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.bones, name)
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.asset.animations.get(name)
    }
}
