use crate::error::MintError;
use crate::state::{Attribute, Creator, GeoTag, MetadataFile, NftMetadata, Properties};
use crate::util::constants::{
    CREATOR_SHARE, IMAGE_CATEGORY, LATITUDE_TRAIT, LONGITUDE_TRAIT, MAX_NAME_LENGTH,
    MAX_SYMBOL_LENGTH,
};

/// Assemble the metadata document for a pinned photo.
///
/// Pure and deterministic: the same inputs always produce the same document,
/// with the Latitude attribute ahead of Longitude.
pub fn build_metadata(
    image_url: &str,
    content_type: &str,
    geo_tag: Option<&GeoTag>,
    creator_address: &str,
    name: &str,
    symbol: &str,
) -> Result<NftMetadata, MintError> {
    let geo_tag = geo_tag.ok_or_else(|| MintError::invalid_input("geotag is missing"))?;
    geo_tag.validate()?;

    let creator_address = creator_address.trim();
    if creator_address.is_empty() {
        return Err(MintError::invalid_input("creator address is empty"));
    }
    if image_url.is_empty() {
        return Err(MintError::invalid_input("image url is empty"));
    }
    validate_label("name", name, MAX_NAME_LENGTH)?;
    validate_label("symbol", symbol, MAX_SYMBOL_LENGTH)?;

    Ok(NftMetadata {
        name: name.to_string(),
        symbol: symbol.to_string(),
        description: format!(
            "Photo taken at latitude {}, longitude {}",
            geo_tag.latitude, geo_tag.longitude
        ),
        image: image_url.to_string(),
        attributes: vec![
            Attribute {
                trait_type: LATITUDE_TRAIT.to_string(),
                value: geo_tag.latitude,
            },
            Attribute {
                trait_type: LONGITUDE_TRAIT.to_string(),
                value: geo_tag.longitude,
            },
        ],
        properties: Properties {
            files: vec![MetadataFile {
                uri: image_url.to_string(),
                content_type: content_type.to_string(),
            }],
            category: IMAGE_CATEGORY.to_string(),
        },
        creators: vec![Creator {
            address: creator_address.to_string(),
            share: CREATOR_SHARE,
        }],
    })
}

pub(crate) fn validate_label(field: &str, value: &str, max: usize) -> Result<(), MintError> {
    if value.is_empty() || value.len() > max {
        return Err(MintError::invalid_input(format!(
            "{field} must be 1..={max} bytes, got {}",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGE: &str = "https://gateway.pinata.cloud/ipfs/QmImage";

    fn build(geo_tag: Option<&GeoTag>, creator: &str) -> Result<NftMetadata, MintError> {
        build_metadata(IMAGE, "image/jpeg", geo_tag, creator, "Latitude Mint", "LAT")
    }

    #[test]
    fn attributes_and_creators_match_document_format() {
        let metadata = build(Some(&GeoTag::new(1.23, 4.56)), "ABC...XYZ").unwrap();
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(
            value["attributes"],
            json!([
                {"trait_type": "Latitude", "value": 1.23},
                {"trait_type": "Longitude", "value": 4.56}
            ])
        );
        assert_eq!(value["creators"], json!([{"address": "ABC...XYZ", "share": 100}]));
        assert_eq!(
            value["properties"],
            json!({"files": [{"uri": IMAGE, "type": "image/jpeg"}], "category": "image"})
        );
        assert_eq!(value["image"], json!(IMAGE));
        assert!(metadata.is_consistent());
    }

    #[test]
    fn description_embeds_geotag() {
        let metadata = build(Some(&GeoTag::new(-33.5, 151.25)), "creator").unwrap();
        assert_eq!(metadata.description, "Photo taken at latitude -33.5, longitude 151.25");
    }

    #[test]
    fn build_is_deterministic() {
        let tag = GeoTag::new(48.8584, 2.2945);
        let first = serde_json::to_string(&build(Some(&tag), "creator").unwrap()).unwrap();
        let second = serde_json::to_string(&build(Some(&tag), "creator").unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_geotag_is_rejected() {
        assert!(matches!(build(None, "creator"), Err(MintError::InvalidMetadataInput(_))));
    }

    #[test]
    fn blank_creator_is_rejected() {
        let tag = GeoTag::new(1.0, 1.0);
        assert!(matches!(build(Some(&tag), "  "), Err(MintError::InvalidMetadataInput(_))));
    }

    #[test]
    fn overlong_symbol_is_rejected() {
        let tag = GeoTag::new(1.0, 1.0);
        let result = build_metadata(IMAGE, "image/jpeg", Some(&tag), "c", "Name", "WAYTOOLONGSYM");
        assert!(matches!(result, Err(MintError::InvalidMetadataInput(_))));
    }
}
