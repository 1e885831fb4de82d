use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Encode a tiny solid-color image in the requested format.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 60, 60]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .expect("encode test image");
    bytes.into_inner()
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, image_bytes(width, height, ImageFormat::Png)).expect("write png file");
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, image_bytes(width, height, ImageFormat::Jpeg)).expect("write jpeg file");
}

/// Build a zip archive at `path` from (entry name, contents) pairs.
pub fn build_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }

    let file = fs::File::create(path).expect("create zip file");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, contents) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(contents).expect("write zip entry");
    }

    writer.finish().expect("finish zip file");
}

/// The archive from the nested-wrapper scenario: split directories buried
/// under unrelated folders, exactly as a real distribution might ship them.
pub fn build_nested_dataset_zip(path: &Path) {
    build_zip(
        path,
        &[
            (
                "misc/Training/glioma/1.jpg",
                image_bytes(8, 8, ImageFormat::Jpeg),
            ),
            (
                "misc/Training/meningioma/2.png",
                image_bytes(8, 8, ImageFormat::Png),
            ),
            (
                "extra/Testing/glioma/3.jpeg",
                image_bytes(8, 8, ImageFormat::Jpeg),
            ),
        ],
    );
}
