pub mod cursor;
mod process;

mod animation;
mod texture;

use log::debug;
use nalgebra::{Vector3, Vector4};
use std::collections::{HashMap, HashSet};

use crate::error::{ReadError, Result};
use crate::model::asset::{BoneAsset, ElementAsset, ElementFace, ElementRotation, ModelAsset};
use crate::model::{Bone, Model};
use crate::model_data::element::RawElement;
use crate::model_data::outliner::{RawOutlinerChild, RawOutlinerNode};
use crate::model_data::RawModelData;
use crate::shared_types::{vec3, Axis3, CubeFace};
use self::cursor::ModelDataCursor;

pub use self::process::MIN_RENDER_SIZE;

/// Reads a `.bbmodel` document into an immutable [`Model`]. Handles for
/// the produced bones are drawn from `cursor`, so several documents can
/// be packaged into one non-colliding handle space.
pub fn read_model(bytes: &[u8], cursor: &ModelDataCursor) -> Result<Model> {
    let raw: RawModelData = serde_json::from_slice(bytes)?;
    cook_model(&raw, cursor)
}

fn cook_model(raw: &RawModelData, cursor: &ModelDataCursor) -> Result<Model> {
    if raw.meta.box_uv {
        return Err(ReadError::BoxUvUnsupported);
    }

    let name = if raw.geometry_name.is_empty() {
        raw.name.clone()
    } else {
        raw.geometry_name.clone()
    };

    let (width, height) = (raw.resolution.width, raw.resolution.height);
    if width <= 0 || height <= 0 {
        return Err(ReadError::InvalidResolution { width, height });
    }
    let resolution = (width as u32, height as u32);

    let (textures, texture_mapping) = texture::read_textures(&raw.textures, resolution)?;
    let animations = animation::read_animations(&raw.animations)?;

    // cubes are shared by id between outliner nodes, parse them once
    let cube_id_map = parse_elements(&raw.elements, resolution)?;

    let mut bones = Vec::new();
    let mut bone_assets = Vec::new();
    let mut seen_names = HashSet::new();
    for entry in &raw.outliner {
        match entry {
            RawOutlinerChild::Node(node) => create_bone(
                Vector3::zeros(),
                &cube_id_map,
                node,
                cursor,
                &mut seen_names,
                &mut bones,
                &mut bone_assets,
            )?,
            // loose root cubes have no bone to hang on, skip them
            RawOutlinerChild::CubeId(id) => debug!("skipping root cube reference '{}'", id),
            RawOutlinerChild::Malformed(_) => {
                return Err(ReadError::InvalidChild {
                    bone: name.clone(),
                })
            }
        }
    }

    debug!(
        "read model '{}': {} root bones, {} animations",
        name,
        bones.len(),
        animations.len()
    );

    Ok(Model {
        name: name.clone(),
        bones,
        texture_width: resolution.0,
        texture_height: resolution.1,
        asset: ModelAsset {
            name,
            textures,
            texture_mapping,
            bones: bone_assets,
            animations,
        },
    })
}

/// Converts every cuboid in the flat element list, keyed by uuid. Corner
/// and pivot coordinates change to the target convention here; everything
/// downstream works on converted values.
fn parse_elements(
    raw_elements: &[RawElement],
    resolution: (u32, u32),
) -> Result<HashMap<String, ElementAsset>> {
    let mut cube_id_map = HashMap::new();

    for raw in raw_elements {
        let pivot = vec3(raw.origin).component_mul(&Vector3::new(-1.0, 1.0, 1.0));
        let from = vec3(raw.from);
        let to = vec3(raw.to);

        let origin = Vector3::new(-to.x, from.y, from.z);
        let to = origin + (to - from);

        let rotation = vec3(raw.rotation);
        let axes_rotated = [rotation.x, rotation.y, rotation.z]
            .iter()
            .filter(|angle| **angle != 0.0)
            .count();
        if axes_rotated > 1 {
            return Err(ReadError::MultiAxisRotation {
                element: raw.uuid.clone(),
            });
        }
        let (axis, angle) = if rotation.x != 0.0 {
            (Axis3::X, rotation.x)
        } else if rotation.y != 0.0 {
            (Axis3::Y, rotation.y)
        } else {
            (Axis3::Z, rotation.z)
        };

        let mut faces = HashMap::new();
        for (face_name, raw_face) in &raw.faces {
            let face = match CubeFace::parse(face_name) {
                Some(face) => face,
                None => {
                    debug!("skipping unknown face '{}' on cube '{}'", face_name, raw.uuid);
                    continue;
                }
            };
            let (width, height) = (resolution.0 as f32, resolution.1 as f32);
            let uv = Vector4::new(
                raw_face.uv[0] / width,
                raw_face.uv[1] / height,
                raw_face.uv[2] / width,
                raw_face.uv[3] / height,
            );
            // an all-zero rectangle marks the face as absent
            if uv != Vector4::zeros() {
                faces.insert(
                    face,
                    ElementFace {
                        uv,
                        texture: format!("#{}", raw_face.texture.unwrap_or(-1)),
                    },
                );
            }
        }

        cube_id_map.insert(
            raw.uuid.clone(),
            ElementAsset {
                from: origin,
                to,
                rotation: ElementRotation {
                    origin: pivot,
                    axis,
                    angle,
                },
                faces,
            },
        );
    }

    Ok(cube_id_map)
}

/// Cooks one outliner node and its subtree into a [`Bone`] and its
/// sibling [`BoneAsset`], pushed into the caller's sibling collections.
/// `parent_scaled_pivot` is the parent bone pivot in model units; the
/// bone position is the delta between the two scaled pivots.
fn create_bone(
    parent_scaled_pivot: Vector3<f32>,
    cube_id_map: &HashMap<String, ElementAsset>,
    node: &RawOutlinerNode,
    cursor: &ModelDataCursor,
    seen_names: &mut HashSet<String>,
    siblings: &mut Vec<Bone>,
    sibling_assets: &mut Vec<BoneAsset>,
) -> Result<()> {
    let name = node.name.clone();
    if !seen_names.insert(name.clone()) {
        return Err(ReadError::DuplicateBoneName { name });
    }

    let pivot = vec3(node.origin).component_mul(&Vector3::new(-1.0, 1.0, 1.0));
    let rotation = vec3(node.rotation);

    // source units are sixteenths of a model unit
    let scaled_pivot = pivot.component_div(&Vector3::new(16.0, 16.0, -16.0));
    let offset = scaled_pivot - parent_scaled_pivot;

    let mut cubes = Vec::new();
    let mut children = Vec::new();
    let mut child_assets = Vec::new();

    for child in &node.children {
        match child {
            RawOutlinerChild::Node(sub_node) => create_bone(
                scaled_pivot,
                cube_id_map,
                sub_node,
                cursor,
                seen_names,
                &mut children,
                &mut child_assets,
            )?,
            RawOutlinerChild::CubeId(id) => match cube_id_map.get(id) {
                Some(cube) => cubes.push(cube.clone()),
                None => {
                    return Err(ReadError::UnknownCubeId {
                        bone: name.clone(),
                        cube_id: id.clone(),
                    })
                }
            },
            RawOutlinerChild::Malformed(_) => {
                return Err(ReadError::InvalidChild { bone: name.clone() })
            }
        }
    }

    let parent_only = !node.visibility && cubes.is_empty();
    let processed = process::process(pivot, cubes);
    let custom_model_data = cursor.next();

    sibling_assets.push(BoneAsset {
        name: name.clone(),
        pivot,
        custom_model_data,
        offset: processed.offset,
        elements: processed.elements,
        small: processed.small,
        children: child_assets,
    });
    siblings.push(Bone {
        name,
        position: offset,
        rotation,
        children,
        custom_model_data,
        scale: processed.scale,
        parent_only,
    });

    Ok(())
}
