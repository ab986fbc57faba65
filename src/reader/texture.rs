use image::GenericImageView;
use log::warn;
use std::collections::HashMap;

use crate::error::{ReadError, Result};
use crate::model::asset::Texture;
use crate::model_data::texture::RawTexture;

/// Decodes every texture's base64 data URI and records the element
/// texture index -> texture name mapping used by face references.
pub fn read_textures(
    raw_textures: &[RawTexture],
    resolution: (u32, u32),
) -> Result<(Vec<Texture>, HashMap<usize, String>)> {
    let mut textures = Vec::with_capacity(raw_textures.len());
    let mut mapping = HashMap::new();

    for (index, raw) in raw_textures.iter().enumerate() {
        let name = raw.name.trim_end_matches(".png").to_string();

        let payload = raw
            .source
            .splitn(2, "base64,")
            .nth(1)
            .ok_or_else(|| ReadError::BadTextureData {
                name: name.clone(),
                reason: "source is not a base64 data URI".to_string(),
            })?;
        let data = base64::decode(payload.trim()).map_err(|error| ReadError::BadTextureData {
            name: name.clone(),
            reason: error.to_string(),
        })?;

        let decoded =
            image::load_from_memory(&data).map_err(|error| ReadError::BadTextureData {
                name: name.clone(),
                reason: error.to_string(),
            })?;
        let (width, height) = decoded.dimensions();

        // UVs are normalized against the declared resolution; a texture
        // with a different aspect will display distorted
        let (declared_width, declared_height) = resolution;
        if width * declared_height != height * declared_width {
            warn!(
                "texture '{}' is {}x{} but the declared resolution is {}x{}",
                name, width, height, declared_width, declared_height
            );
        }

        let id = raw.id.parse::<usize>().unwrap_or(index);
        mapping.insert(id, name.clone());
        textures.push(Texture {
            name,
            data,
            width,
            height,
        });
    }

    Ok((textures, mapping))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 opaque PNG
    const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    #[test]
    fn decodes_data_uri_and_exposes_dimensions() {
        let raw = vec![RawTexture {
            name: "skin.png".to_string(),
            id: "0".to_string(),
            source: PNG_DATA_URI.to_string(),
        }];
        let (textures, mapping) = read_textures(&raw, (16, 16)).unwrap();
        assert_eq!(textures.len(), 1);
        assert_eq!(textures[0].name, "skin");
        assert_eq!((textures[0].width, textures[0].height), (1, 1));
        assert!(!textures[0].data.is_empty());
        assert_eq!(mapping.get(&0).map(String::as_str), Some("skin"));
    }

    #[test]
    fn rejects_non_data_uri_source() {
        let raw = vec![RawTexture {
            name: "skin".to_string(),
            id: "0".to_string(),
            source: "textures/skin.png".to_string(),
        }];
        let error = read_textures(&raw, (16, 16)).unwrap_err();
        assert!(matches!(error, ReadError::BadTextureData { .. }));
    }

    #[test]
    fn rejects_malformed_base64_payload() {
        let raw = vec![RawTexture {
            name: "skin".to_string(),
            id: "0".to_string(),
            source: "data:image/png;base64,@@not-base64@@".to_string(),
        }];
        let error = read_textures(&raw, (16, 16)).unwrap_err();
        assert!(matches!(error, ReadError::BadTextureData { .. }));
    }
}
