use log::{debug, warn};
use nalgebra::Vector3;
use std::collections::HashMap;

use crate::animation::{Animation, BoneTimeline, Channel, Interpolator, KeyFrame, LoopMode, Timeline};
use crate::error::{ReadError, Result};
use crate::model_data::animation::{RawAnimation, RawKeyframe, RawScalar};
use crate::shared_types::TICKS_PER_SECOND;

/// Cooks the raw animation list into the per-bone, per-channel keyframe
/// store. Keyframe times convert from authored seconds to ticks.
pub fn read_animations(raw_animations: &[RawAnimation]) -> Result<HashMap<String, Animation>> {
    let mut animations = HashMap::new();

    for raw in raw_animations {
        let mut timelines = HashMap::new();

        for animator in raw.animators.values() {
            if !animator.animator_type.is_empty() && animator.animator_type != "bone" {
                debug!(
                    "skipping {} animator '{}' in animation '{}'",
                    animator.animator_type, animator.name, raw.name
                );
                continue;
            }

            let mut position = Vec::new();
            let mut rotation = Vec::new();
            let mut scale = Vec::new();

            for keyframe in &animator.keyframes {
                if keyframe.time < 0.0 {
                    return Err(ReadError::NegativeKeyframeTime {
                        animation: raw.name.clone(),
                        bone: animator.name.clone(),
                    });
                }
                let channel = match keyframe.channel.as_str() {
                    "position" => Channel::Position,
                    "rotation" => Channel::Rotation,
                    "scale" => Channel::Scale,
                    other => {
                        debug!(
                            "skipping '{}' keyframe channel in animation '{}'",
                            other, raw.name
                        );
                        continue;
                    }
                };
                let cooked = KeyFrame {
                    time: (keyframe.time * TICKS_PER_SECOND).round() as u32,
                    value: keyframe_value(keyframe, channel, &raw.name, &animator.name),
                    interpolator: parse_interpolator(&keyframe.interpolation),
                };
                match channel {
                    Channel::Position => position.push(cooked),
                    Channel::Rotation => rotation.push(cooked),
                    Channel::Scale => scale.push(cooked),
                }
            }

            let bone_timeline = BoneTimeline {
                position: Timeline::new(position),
                rotation: Timeline::new(rotation),
                scale: Timeline::new(scale),
            };
            if !bone_timeline.is_empty() {
                timelines.insert(animator.name.clone(), bone_timeline);
            }
        }

        animations.insert(
            raw.name.clone(),
            Animation {
                name: raw.name.clone(),
                length: (raw.length * TICKS_PER_SECOND).round() as u32,
                loop_mode: parse_loop_mode(&raw.loop_mode),
                timelines,
            },
        );
    }

    Ok(animations)
}

fn parse_loop_mode(raw: &str) -> LoopMode {
    match raw {
        "loop" => LoopMode::Loop,
        "hold" => LoopMode::Hold,
        _ => LoopMode::Once,
    }
}

fn parse_interpolator(raw: &str) -> Option<Interpolator> {
    match raw {
        "linear" => Some(Interpolator::Linear),
        "step" => Some(Interpolator::Step),
        "catmullrom" | "smooth" => Some(Interpolator::CatmullRom),
        "" => None,
        other => {
            debug!("unknown interpolation '{}', using the caller fallback", other);
            None
        }
    }
}

fn keyframe_value(keyframe: &RawKeyframe, channel: Channel, animation: &str, bone: &str) -> Vector3<f32> {
    match keyframe.data_points.first() {
        Some(point) => Vector3::new(
            component(&point.x, animation, bone),
            component(&point.y, animation, bone),
            component(&point.z, animation, bone),
        ),
        None => channel.neutral(),
    }
}

fn component(scalar: &RawScalar, animation: &str, bone: &str) -> f32 {
    scalar.to_f32().unwrap_or_else(|| {
        warn!(
            "non-numeric keyframe component in animation '{}', bone '{}'",
            animation, bone
        );
        0.0
    })
}
