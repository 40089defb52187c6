extern crate imgico;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

//===========================================================================//

#[test]
fn wrap_embeds_png_as_data_uri() {
    let png: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let svg = imgico::wrap(&png, 50, 50).unwrap();
    assert!(svg.starts_with("<svg"));
    let root_tag = &svg[..svg.find('>').unwrap()];
    assert!(root_tag.contains("width=\"50\""));
    assert!(root_tag.contains("height=\"50\""));
    let start = svg.find(imgico::PNG_DATA_URI_PREFIX).unwrap()
        + imgico::PNG_DATA_URI_PREFIX.len();
    let end = start + svg[start..].find('"').unwrap();
    assert_eq!(STANDARD.decode(&svg[start..end]).unwrap(), png);
}

#[test]
fn wrap_uses_given_dimensions() {
    let svg = imgico::wrap(b"\x89PNG\r\n\x1a\n", 120, 30).unwrap();
    assert!(svg.starts_with("<svg width=\"120\" height=\"30\" "));
    assert!(svg.contains("<image width=\"120\" height=\"30\" "));
    assert!(svg.ends_with("</svg>"));
    assert!(!svg.contains("<?xml"));
}

#[test]
fn wrap_rejects_zero_dimensions() {
    match imgico::wrap(b"", 0, 0) {
        Err(imgico::Error::InvalidDimensions { width: 0, height: 0 }) => {}
        other => panic!("expected InvalidDimensions, got {:?}", other),
    }
}

//===========================================================================//
