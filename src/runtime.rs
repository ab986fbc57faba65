use indextree::{Arena, NodeId};
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};
use std::collections::HashMap;
use std::sync::Arc;

use crate::animation::{Animation, Channel, Interpolator};
use crate::model::{Bone, Model};

#[derive(Clone, Debug)]
struct RuntimeBone {
    name: String,
    parent_id: Option<usize>,
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: f32,
    parent_only: bool,
}

/// Immutable per-model data shared by every instance.
#[derive(Clone)]
struct SharedModelInfo {
    bones: Arc<Vec<RuntimeBone>>,
    bone_lookup: Arc<HashMap<String, usize>>,
    bone_tree: Arc<Arena<usize>>,
    roots: Arc<Vec<NodeId>>,
}

/// Absolute transform of one bone for the current evaluation.
pub struct BonePose<'a> {
    pub name: &'a str,

    /// The bone positions descendants but is never displayed itself.
    pub parent_only: bool,

    pub transform: &'a Matrix4<f32>,
}

/// Walks the bone tree every tick and composes, per bone, the static
/// rest transform with the sampled animation channels. One instance per
/// animated entity; instances share the model data and own only their
/// pose matrices.
pub struct RuntimeModel {
    shared_info: SharedModelInfo,
    pose_matrices: Vec<Matrix4<f32>>,
    fallback: Interpolator,
}

impl RuntimeModel {
    pub fn extract(model: &Model) -> Self {
        let mut bones = Vec::new();
        let mut bone_lookup = HashMap::new();
        let mut bone_tree = Arena::new();
        let mut tree_handles: Vec<NodeId> = Vec::new();
        let mut roots = Vec::new();

        fn flatten(
            bone: &Bone,
            parent_id: Option<usize>,
            bones: &mut Vec<RuntimeBone>,
            bone_lookup: &mut HashMap<String, usize>,
            bone_tree: &mut Arena<usize>,
            tree_handles: &mut Vec<NodeId>,
            roots: &mut Vec<NodeId>,
        ) {
            let id = bones.len();
            bones.push(RuntimeBone {
                name: bone.name.clone(),
                parent_id,
                position: bone.position,
                rotation: bone.rotation,
                scale: bone.scale,
                parent_only: bone.parent_only,
            });
            bone_lookup.insert(bone.name.clone(), id);
            let handle = bone_tree.new_node(id);
            match parent_id {
                Some(parent) => tree_handles[parent].append(handle, bone_tree),
                None => roots.push(handle),
            }
            tree_handles.push(handle);
            for child in &bone.children {
                flatten(
                    child,
                    Some(id),
                    bones,
                    bone_lookup,
                    bone_tree,
                    tree_handles,
                    roots,
                );
            }
        }

        for root in &model.bones {
            flatten(
                root,
                None,
                &mut bones,
                &mut bone_lookup,
                &mut bone_tree,
                &mut tree_handles,
                &mut roots,
            );
        }

        let pose_matrices = vec![Matrix4::identity(); bones.len()];
        Self {
            shared_info: SharedModelInfo {
                bones: Arc::new(bones),
                bone_lookup: Arc::new(bone_lookup),
                bone_tree: Arc::new(bone_tree),
                roots: Arc::new(roots),
            },
            pose_matrices,
            fallback: Interpolator::Linear,
        }
    }

    /// A fresh instance over the same shared model data, starting from
    /// the rest pose.
    pub fn instantiate(&self) -> Self {
        Self {
            shared_info: self.shared_info.clone(),
            pose_matrices: vec![Matrix4::identity(); self.pose_matrices.len()],
            fallback: self.fallback,
        }
    }

    /// Interpolator used for keyframes that do not carry their own.
    pub fn with_fallback_interpolator(mut self, fallback: Interpolator) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn bone_count(&self) -> usize {
        self.shared_info.bones.len()
    }

    pub fn get_bone_by_name(&self, bone_name: &str) -> Option<usize> {
        self.shared_info.bone_lookup.get(bone_name).copied()
    }

    pub fn pose_matrix(&self, bone_id: usize) -> &Matrix4<f32> {
        &self.pose_matrices[bone_id]
    }

    /// Recomputes every bone's absolute transform for `animation` at
    /// `time` ticks, depth-first from each root. Bones the animation
    /// does not touch keep their rest transform; out-of-range times
    /// clamp inside the evaluator, so this never fails for finite time
    /// values.
    pub fn update_pose(&mut self, animation: &Animation, time: f32) {
        for &root in self.shared_info.roots.iter() {
            for node_id in root.descendants(&self.shared_info.bone_tree) {
                let bone_id = *self.shared_info.bone_tree[node_id].get();
                let bone = &self.shared_info.bones[bone_id];
                let local = self.local_transform(bone, animation, time);
                self.pose_matrices[bone_id] = match bone.parent_id {
                    None => local,
                    Some(parent_id) => self.pose_matrices[parent_id] * local,
                };
            }
        }
    }

    fn local_transform(
        &self,
        bone: &RuntimeBone,
        animation: &Animation,
        time: f32,
    ) -> Matrix4<f32> {
        let rest = compose(
            bone.position,
            bone.rotation,
            Vector3::repeat(bone.scale),
        );
        let animated = compose(
            animation.sample(&bone.name, Channel::Position, time, self.fallback),
            animation.sample(&bone.name, Channel::Rotation, time, self.fallback),
            animation.sample(&bone.name, Channel::Scale, time, self.fallback),
        );
        rest * animated
    }

    /// Every bone's current absolute transform, depth-first from each
    /// root, parents before children.
    pub fn poses(&self) -> impl Iterator<Item = BonePose<'_>> + '_ {
        self.shared_info
            .roots
            .iter()
            .flat_map(move |&root| root.descendants(&self.shared_info.bone_tree))
            .map(move |node_id| {
                let bone_id = *self.shared_info.bone_tree[node_id].get();
                let bone = &self.shared_info.bones[bone_id];
                BonePose {
                    name: &bone.name,
                    parent_only: bone.parent_only,
                    transform: &self.pose_matrices[bone_id],
                }
            })
    }
}

/// `translate . rotate . scale`, rotation given as Euler degrees.
fn compose(
    translation: Vector3<f32>,
    rotation_degrees: Vector3<f32>,
    scale: Vector3<f32>,
) -> Matrix4<f32> {
    let translation: Matrix4<f32> = Translation3::from(translation).to_homogeneous();
    let rotation = Rotation3::from_euler_angles(
        rotation_degrees.x.to_radians(),
        rotation_degrees.y.to_radians(),
        rotation_degrees.z.to_radians(),
    )
    .to_homogeneous();
    translation * rotation * Matrix4::new_nonuniform_scaling(&scale)
}
