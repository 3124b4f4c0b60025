use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba};
use titans_schedule_lambda_rust::images::{SPONSOR_IMAGE_SIZE, load_sponsor_images, normalize_image};

fn red(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([220, 0, 0])))
}

#[test]
fn wide_image_is_centred_on_a_white_square() {
    let bytes = normalize_image(&red(400, 100), 200).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);

    let out = image::load_from_memory(&bytes).unwrap();
    assert_eq!(out.dimensions(), (200, 200));
    assert_eq!(out.get_pixel(100, 5), Rgba([255, 255, 255, 255]));
    assert_eq!(out.get_pixel(100, 195), Rgba([255, 255, 255, 255]));
    let centre = out.get_pixel(100, 100);
    assert!(centre[0] > 200 && centre[1] < 30 && centre[2] < 30, "centre was {centre:?}");
}

#[test]
fn tall_image_fills_the_height() {
    let bytes = normalize_image(&red(50, 100), SPONSOR_IMAGE_SIZE).unwrap();
    let out = image::load_from_memory(&bytes).unwrap();
    assert_eq!(out.dimensions(), (SPONSOR_IMAGE_SIZE, SPONSOR_IMAGE_SIZE));
    assert_eq!(out.get_pixel(10, 600), Rgba([255, 255, 255, 255]));
    let top_centre = out.get_pixel(600, 2);
    assert!(top_centre[0] > 200 && top_centre[1] < 30, "top centre was {top_centre:?}");
}

#[test]
fn loads_only_images_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    red(30, 30).save(dir.path().join("Zeta.PNG")).unwrap();
    red(30, 30).save(dir.path().join("alpha.jpg")).unwrap();
    std::fs::write(dir.path().join("readme.md"), "sponsors").unwrap();
    std::fs::write(dir.path().join("broken.png"), "not a png").unwrap();

    let blobs = load_sponsor_images(dir.path(), 64);

    let names: Vec<_> = blobs.iter().map(|b| b.file_name.as_str()).collect();
    assert_eq!(names, vec!["resized_Zeta.png", "resized_alpha.png"]);
    for blob in &blobs {
        assert_eq!(image::load_from_memory(&blob.bytes).unwrap().dimensions(), (64, 64));
    }
}

#[test]
fn missing_directory_yields_no_images() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_sponsor_images(&dir.path().join("Commanditaire"), 64).is_empty());
}
