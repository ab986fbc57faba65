use nalgebra::Vector3;

use crate::model::asset::ElementAsset;

/// Largest dimension, in source units, below which the display backend
/// stops rendering geometry reliably.
pub const MIN_RENDER_SIZE: f32 = 8.0;

pub struct ProcessResult {
    /// Displacement from the bone pivot to the geometry center, in model
    /// units.
    pub offset: Vector3<f32>,

    /// Compensation factor, `> 1.0` when the geometry had to be inflated.
    pub scale: f32,

    pub small: bool,

    /// The element list re-based around the bone pivot.
    pub elements: Vec<ElementAsset>,
}

/// Normalizes a bone's cuboid set: computes the bounding box, inflates
/// geometry that is too small for the display backend, and re-bases the
/// elements relative to the bone pivot. Callers must apply the inverse
/// of `scale` on the display side so the shown size matches the
/// authored one.
pub fn process(pivot: Vector3<f32>, elements: Vec<ElementAsset>) -> ProcessResult {
    if elements.is_empty() {
        return ProcessResult {
            offset: Vector3::zeros(),
            scale: 1.0,
            small: false,
            elements,
        };
    }

    let mut min = Vector3::repeat(f32::INFINITY);
    let mut max = Vector3::repeat(f32::NEG_INFINITY);
    for element in &elements {
        min = min.inf(&element.from.inf(&element.to));
        max = max.sup(&element.from.sup(&element.to));
    }

    let largest = (max - min).max();
    let (scale, small) = if largest > 0.0 && largest < MIN_RENDER_SIZE {
        (MIN_RENDER_SIZE / largest, true)
    } else {
        (1.0, false)
    };

    let center = (min + max) * 0.5;
    let elements = elements
        .into_iter()
        .map(|mut element| {
            if small {
                element.from = center + (element.from - center) * scale;
                element.to = center + (element.to - center) * scale;
                element.rotation.origin = center + (element.rotation.origin - center) * scale;
            }
            element.from -= pivot;
            element.to -= pivot;
            element.rotation.origin -= pivot;
            element
        })
        .collect();

    ProcessResult {
        offset: (center - pivot) / 16.0,
        scale,
        small,
        elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::asset::ElementRotation;
    use crate::shared_types::Axis3;
    use std::collections::HashMap;

    fn cube(from: [f32; 3], to: [f32; 3]) -> ElementAsset {
        ElementAsset {
            from: Vector3::new(from[0], from[1], from[2]),
            to: Vector3::new(to[0], to[1], to[2]),
            rotation: ElementRotation {
                origin: Vector3::zeros(),
                axis: Axis3::Z,
                angle: 0.0,
            },
            faces: HashMap::new(),
        }
    }

    #[test]
    fn no_elements_yields_neutral_result() {
        let result = process(Vector3::new(1.0, 2.0, 3.0), Vec::new());
        assert_eq!(result.offset, Vector3::zeros());
        assert_eq!(result.scale, 1.0);
        assert!(!result.small);
        assert!(result.elements.is_empty());
    }

    #[test]
    fn geometry_at_threshold_keeps_scale_one() {
        let result = process(Vector3::zeros(), vec![cube([0.0, 0.0, 0.0], [8.0, 2.0, 2.0])]);
        assert_eq!(result.scale, 1.0);
        assert!(!result.small);
    }

    #[test]
    fn tiny_geometry_is_inflated() {
        let result = process(Vector3::zeros(), vec![cube([0.0, 0.0, 0.0], [2.0, 1.0, 1.0])]);
        assert!(result.small);
        assert_eq!(result.scale, 4.0);
        // inflated around the bounding box center
        let element = &result.elements[0];
        assert_eq!(element.to.x - element.from.x, 8.0);
    }

    #[test]
    fn offset_points_at_geometry_center_in_model_units() {
        let pivot = Vector3::new(8.0, 0.0, 0.0);
        let result = process(pivot, vec![cube([8.0, 0.0, 0.0], [24.0, 16.0, 16.0])]);
        assert_eq!(result.offset, Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(result.scale, 1.0);
        // elements are re-based around the pivot
        assert_eq!(result.elements[0].from, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(result.elements[0].to, Vector3::new(16.0, 16.0, 16.0));
    }
}
