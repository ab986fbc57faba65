use nalgebra::Vector3;
use std::collections::HashMap;

/// Independently animated property of a bone.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

impl Channel {
    /// Value of the channel when no keyframes animate it.
    pub fn neutral(self) -> Vector3<f32> {
        match self {
            Channel::Position | Channel::Rotation => Vector3::zeros(),
            Channel::Scale => Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LoopMode {
    Once,
    Hold,
    Loop,
}

/// How a keyframe reaches the next one. `CatmullRom` is what the
/// authoring tool calls a "smooth" keyframe; it samples with the
/// neighbouring keyframes as tangent context.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Interpolator {
    Linear,
    Step,
    CatmullRom,
}

#[derive(Copy, Clone, Debug)]
pub struct KeyFrame {
    /// Timestamp in ticks.
    pub time: u32,

    pub value: Vector3<f32>,

    /// When `None` the evaluator uses the caller-supplied fallback.
    pub interpolator: Option<Interpolator>,
}

impl KeyFrame {
    pub fn interpolator_or(&self, fallback: Interpolator) -> Interpolator {
        self.interpolator.unwrap_or(fallback)
    }
}

/// One channel of one bone: keyframes ordered by time, non-empty by
/// construction. Equal timestamps keep their source order and act as a
/// step discontinuity at that tick.
#[derive(Clone, Debug)]
pub struct Timeline {
    frames: Vec<KeyFrame>,
}

impl Timeline {
    pub fn new(mut frames: Vec<KeyFrame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        // stable, so equal times preserve document order
        frames.sort_by_key(|frame| frame.time);
        Some(Self { frames })
    }

    pub fn frames(&self) -> &[KeyFrame] {
        &self.frames
    }

    /// Samples the timeline at `time` ticks. Out-of-range times clamp to
    /// the first/last keyframe value; in-range times interpolate between
    /// the bracketing pair with the earlier keyframe's interpolator, or
    /// `fallback` when it carries none.
    pub fn sample(&self, time: f32, fallback: Interpolator) -> Vector3<f32> {
        debug_assert!(self
            .frames
            .windows(2)
            .all(|pair| pair[0].time <= pair[1].time));

        let frames = &self.frames;
        let first = &frames[0];
        if time < first.time as f32 {
            return first.value;
        }
        let last = &frames[frames.len() - 1];
        if time >= last.time as f32 {
            return last.value;
        }

        // first index whose timestamp is past the query; both bounds are
        // in range because of the clamps above
        let hi = frames.partition_point(|frame| frame.time as f32 <= time);
        let lo = hi - 1;
        let k0 = &frames[lo];
        let k1 = &frames[hi];
        let t = (time - k0.time as f32) / (k1.time - k0.time) as f32;

        match k0.interpolator_or(fallback) {
            Interpolator::Step => k0.value,
            Interpolator::Linear => k0.value.lerp(&k1.value, t),
            Interpolator::CatmullRom => {
                let before = if lo == 0 { k0.value } else { frames[lo - 1].value };
                let after = if hi + 1 == frames.len() {
                    k1.value
                } else {
                    frames[hi + 1].value
                };
                catmull_rom(before, k0.value, k1.value, after, t)
            }
        }
    }
}

fn catmull_rom(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    p3: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
        * 0.5
}

/// The animated channels of a single bone. Channels without keyframes
/// are omitted rather than stored empty.
#[derive(Clone, Default, Debug)]
pub struct BoneTimeline {
    pub position: Option<Timeline>,
    pub rotation: Option<Timeline>,
    pub scale: Option<Timeline>,
}

impl BoneTimeline {
    pub fn channel(&self, channel: Channel) -> Option<&Timeline> {
        match channel {
            Channel::Position => self.position.as_ref(),
            Channel::Rotation => self.rotation.as_ref(),
            Channel::Scale => self.scale.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct Animation {
    pub name: String,

    /// Authored duration in ticks.
    pub length: u32,

    pub loop_mode: LoopMode,

    /// Per-bone timelines, keyed by bone name.
    pub timelines: HashMap<String, BoneTimeline>,
}

impl Animation {
    /// Evaluates one channel of one bone at `time` ticks. Bones or
    /// channels this animation does not touch yield the channel's
    /// neutral value.
    pub fn sample(
        &self,
        bone: &str,
        channel: Channel,
        time: f32,
        fallback: Interpolator,
    ) -> Vector3<f32> {
        match self
            .timelines
            .get(bone)
            .and_then(|timeline| timeline.channel(channel))
        {
            Some(timeline) => timeline.sample(time, fallback),
            None => channel.neutral(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(time: u32, value: f32) -> KeyFrame {
        KeyFrame {
            time,
            value: Vector3::new(value, value, value),
            interpolator: None,
        }
    }

    #[test]
    fn sample_clamps_before_first_keyframe() {
        let timeline = Timeline::new(vec![frame(10, 1.0), frame(20, 2.0)]).unwrap();
        assert_eq!(
            timeline.sample(0.0, Interpolator::Linear),
            Vector3::new(1.0, 1.0, 1.0)
        );
        assert_eq!(
            timeline.sample(9.999, Interpolator::Linear),
            Vector3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn sample_clamps_at_and_after_last_keyframe() {
        let timeline = Timeline::new(vec![frame(10, 1.0), frame(20, 2.0)]).unwrap();
        assert_eq!(
            timeline.sample(20.0, Interpolator::Linear),
            Vector3::new(2.0, 2.0, 2.0)
        );
        assert_eq!(
            timeline.sample(100.0, Interpolator::Linear),
            Vector3::new(2.0, 2.0, 2.0)
        );
    }

    #[test]
    fn sample_linear_midpoint() {
        let timeline = Timeline::new(vec![frame(0, 0.0), frame(10, 10.0)]).unwrap();
        assert_eq!(
            timeline.sample(5.0, Interpolator::Linear),
            Vector3::new(5.0, 5.0, 5.0)
        );
    }

    #[test]
    fn sample_step_holds_until_next_keyframe() {
        let frames = vec![
            KeyFrame {
                time: 0,
                value: Vector3::new(0.0, 0.0, 0.0),
                interpolator: Some(Interpolator::Step),
            },
            frame(10, 10.0),
        ];
        let timeline = Timeline::new(frames).unwrap();
        assert_eq!(
            timeline.sample(9.999, Interpolator::Linear),
            Vector3::zeros()
        );
        assert_eq!(
            timeline.sample(10.0, Interpolator::Linear),
            Vector3::new(10.0, 10.0, 10.0)
        );
    }

    #[test]
    fn equal_time_pair_acts_as_step() {
        // two keyframes on the same tick: the later one wins exactly at
        // that tick, the earlier one is the clamp value before it
        let timeline = Timeline::new(vec![frame(5, 1.0), frame(5, 2.0)]).unwrap();
        assert_eq!(
            timeline.sample(5.0, Interpolator::Linear),
            Vector3::new(2.0, 2.0, 2.0)
        );
        assert_eq!(
            timeline.sample(4.999, Interpolator::Linear),
            Vector3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn equal_time_pair_between_other_keyframes() {
        let timeline = Timeline::new(vec![
            frame(0, 0.0),
            frame(5, 1.0),
            frame(5, 2.0),
            frame(10, 4.0),
        ])
        .unwrap();
        assert_eq!(
            timeline.sample(5.0, Interpolator::Linear),
            Vector3::new(2.0, 2.0, 2.0)
        );
        // interpolation below the tie targets the earlier twin
        assert_eq!(
            timeline.sample(2.5, Interpolator::Linear),
            Vector3::new(0.5, 0.5, 0.5)
        );
        assert_eq!(
            timeline.sample(7.5, Interpolator::Linear),
            Vector3::new(3.0, 3.0, 3.0)
        );
    }

    #[test]
    fn per_keyframe_interpolator_overrides_fallback() {
        let frames = vec![
            KeyFrame {
                time: 0,
                value: Vector3::new(0.0, 0.0, 0.0),
                interpolator: Some(Interpolator::Step),
            },
            frame(10, 10.0),
        ];
        let timeline = Timeline::new(frames).unwrap();
        // fallback is linear but keyframe zero asks for step
        assert_eq!(timeline.sample(5.0, Interpolator::Linear), Vector3::zeros());
    }

    #[test]
    fn catmull_rom_hits_bracket_endpoints() {
        let frames = vec![
            frame(0, 0.0),
            KeyFrame {
                time: 10,
                value: Vector3::new(4.0, 4.0, 4.0),
                interpolator: Some(Interpolator::CatmullRom),
            },
            frame(20, 8.0),
            frame(30, 2.0),
        ];
        let timeline = Timeline::new(frames).unwrap();
        assert_eq!(
            timeline.sample(10.0, Interpolator::Linear),
            Vector3::new(4.0, 4.0, 4.0)
        );
        let near_end = timeline.sample(19.999, Interpolator::Linear);
        assert!((near_end.x - 8.0).abs() < 0.01);
    }

    #[test]
    fn missing_bone_or_channel_yields_neutral_value() {
        let animation = Animation {
            name: "idle".into(),
            length: 20,
            loop_mode: LoopMode::Loop,
            timelines: HashMap::new(),
        };
        assert_eq!(
            animation.sample("head", Channel::Position, 3.0, Interpolator::Linear),
            Vector3::zeros()
        );
        assert_eq!(
            animation.sample("head", Channel::Rotation, 3.0, Interpolator::Linear),
            Vector3::zeros()
        );
        assert_eq!(
            animation.sample("head", Channel::Scale, 3.0, Interpolator::Linear),
            Vector3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn empty_channel_is_omitted() {
        assert!(Timeline::new(Vec::new()).is_none());
        let bone_timeline = BoneTimeline::default();
        assert!(bone_timeline.is_empty());
    }

    #[test]
    fn sample_is_deterministic() {
        let timeline = Timeline::new(vec![frame(0, 0.0), frame(7, 3.5)]).unwrap();
        let a = timeline.sample(3.3, Interpolator::Linear);
        let b = timeline.sample(3.3, Interpolator::Linear);
        assert_eq!(a, b);
    }
}
