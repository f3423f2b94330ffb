//! End-to-end conversion: encoded image in, indexed PNG out.

mod common;

use common::fixtures::{self, systems};
use common::*;
use pretty_assertions::assert_eq;
use retro_dither::{PaletteCatalog, Rgb};
use retrovision::models::AppConfig;
use retrovision::rendering::{decode_source, encode_indexed_png, load_source, Canvas};
use retrovision::services::Session;

fn convert(system: &str, scale: f32) -> (retro_dither::DitheredImage, Vec<u8>) {
    let catalog = PaletteCatalog::builtin();
    let palette = catalog.get(system).unwrap().clone();
    let png = fixtures::png_bytes(&fixtures::gradient(64, 48), 255);
    let source = decode_source(&png, &palette, scale).unwrap();

    let mut session = Session::new(catalog, system, Canvas::new()).unwrap();
    session.set_source(source);
    let image = session.convert().unwrap();
    let encoded = encode_indexed_png(&image).unwrap();
    ((*image).clone(), encoded)
}

#[test]
fn test_every_builtin_system_produces_valid_indexed_png() {
    for system in systems::ALL {
        let (image, encoded) = convert(system, 0.25);
        assert_indices_valid(&image);

        let decoded = fixtures::decode_indexed_png(&encoded);
        assert_eq!((decoded.width, decoded.height), (image.width(), image.height()));
        assert_eq!(decoded.palette.len(), image.palette().len(), "{system}");
        assert_eq!(decoded.indices, image.indices().to_vec(), "{system}");
        for (entry, color) in decoded.palette.iter().zip(image.palette().colors()) {
            assert_eq!(*entry, color.to_bytes());
        }
    }
}

#[test]
fn test_output_width_follows_native_resolution() {
    let (c64, _) = convert(systems::C64, 0.25);
    let (ega, _) = convert(systems::EGA, 0.25);
    assert_eq!((c64.width(), c64.height()), (80, 60));
    assert_eq!((ega.width(), ega.height()), (160, 120));
}

#[test]
fn test_bit_depth_tracks_palette_size() {
    let (_, c64) = convert(systems::C64, 0.1);
    let (_, vga) = convert(systems::VGA, 0.1);
    assert_eq!(fixtures::decode_indexed_png(&c64).bit_depth, 4);
    assert_eq!(fixtures::decode_indexed_png(&vga).bit_depth, 8);
}

#[test]
fn test_conversion_is_deterministic() {
    let (first, first_png) = convert(systems::AMIGA, 0.2);
    let (second, second_png) = convert(systems::AMIGA, 0.2);
    assert_eq!(first, second);
    assert_eq!(first_png, second_png);
}

#[test]
fn test_transparent_source_flattens_to_black() {
    let catalog = PaletteCatalog::builtin();
    let palette = catalog.get(systems::C64).unwrap();
    let png = fixtures::png_bytes(&fixtures::gradient(32, 32), 0);
    let source = decode_source(&png, palette, 0.1).unwrap();
    assert!(source.pixels().iter().all(|&p| p == Rgb::BLACK));
}

#[test]
fn test_load_source_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.png");
    std::fs::write(&path, fixtures::png_bytes(&fixtures::gradient(20, 10), 255)).unwrap();

    let catalog = PaletteCatalog::builtin();
    let source = load_source(&path, catalog.get(systems::EGA).unwrap(), 0.125).unwrap();
    assert_eq!((source.width(), source.height()), (80, 40));

    assert!(load_source(&dir.path().join("missing.png"), catalog.get("ega").unwrap(), 1.0).is_err());
}

#[test]
fn test_undecodable_source_is_an_error() {
    let catalog = PaletteCatalog::builtin();
    assert!(decode_source(b"not an image", catalog.get("c64").unwrap(), 1.0).is_err());
}

#[test]
fn test_configured_palette_converts() {
    let config = AppConfig::from_yaml(fixtures::CUSTOM_PALETTE_CONFIG).unwrap();
    let catalog = config.build_catalog();
    assert_eq!(catalog.len(), 6);

    let palette = catalog.get("gameboy").unwrap().clone();
    assert_eq!(palette.native_width(), Some(160));

    let png = fixtures::png_bytes(&fixtures::gradient(32, 16), 255);
    let source = decode_source(&png, &palette, config.resolution_scale).unwrap();

    let mut session = Session::new(catalog, config.system.clone(), Canvas::new()).unwrap();
    session.set_strength(config.strength);
    session.set_source(source);
    let image = session.convert().unwrap();

    assert_eq!((image.width(), image.height()), (160, 80));
    assert_indices_valid(&image);
    let decoded = fixtures::decode_indexed_png(&encode_indexed_png(&image).unwrap());
    assert_eq!(decoded.bit_depth, 2);
    assert_eq!(decoded.palette[0], [0x0f, 0x38, 0x0f]);
}
