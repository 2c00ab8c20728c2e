use super::prelude::*;
use crate::{
    gateways::PhotoStorageGateway,
    util::image::{compress_image, CompressionOptions, COMPRESSED_CONTENT_TYPE},
};

pub fn photo_file_name(user_id: &Id, review_id: &Id, index: usize, now: TimestampMs) -> String {
    format!("{user_id}_{review_id}_{index}_{}.jpg", now.into_inner())
}

pub fn placeholder_photo_url(index: usize) -> String {
    format!("/placeholder.svg?height=300&width=300&text=Foto+{index}")
}

/// Turns the photos of a review into URLs.
///
/// Uploaded images are compressed and stored, hosted images are kept.
/// A photo that cannot be compressed or stored is replaced by a
/// placeholder instead of failing the whole review.
pub fn materialize_photos(
    storage: &dyn PhotoStorageGateway,
    user_id: &Id,
    review_id: &Id,
    photos: Vec<PhotoSource>,
    options: &CompressionOptions,
) -> Vec<String> {
    photos
        .into_iter()
        .enumerate()
        .map(|(i, photo)| {
            let index = i + 1;
            match photo {
                PhotoSource::Hosted(url) => url,
                PhotoSource::Upload(file) => {
                    match upload_photo(storage, user_id, review_id, index, &file, options) {
                        Ok(url) => url,
                        Err(err) => {
                            log::warn!(
                                "Failed to upload photo {index} of review {review_id}: {err:#}"
                            );
                            placeholder_photo_url(index)
                        }
                    }
                }
            }
        })
        .collect()
}

fn upload_photo(
    storage: &dyn PhotoStorageGateway,
    user_id: &Id,
    review_id: &Id,
    index: usize,
    file: &ImageFile,
    options: &CompressionOptions,
) -> anyhow::Result<String> {
    let compressed = compress_image(file, options)?;
    let file_name = photo_file_name(user_id, review_id, index, TimestampMs::now());
    let url = storage.upload(&file_name, COMPRESSED_CONTENT_TYPE, &compressed.data)?;
    log::debug!("Uploaded photo {file_name} to {url}");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, io::Cursor};

    #[derive(Default)]
    struct MockStorage {
        fail: bool,
        uploads: RefCell<Vec<(String, String, usize)>>,
    }

    impl PhotoStorageGateway for MockStorage {
        fn upload(
            &self,
            file_name: &str,
            content_type: &str,
            data: &[u8],
        ) -> anyhow::Result<String> {
            if self.fail {
                anyhow::bail!("storage is down");
            }
            self.uploads
                .borrow_mut()
                .push((file_name.into(), content_type.into(), data.len()));
            Ok(format!("https://storage/{file_name}"))
        }
    }

    fn png_upload() -> PhotoSource {
        let img = image::RgbImage::from_pixel(64, 48, image::Rgb([200, 100, 50]));
        let mut data = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();
        PhotoSource::Upload(ImageFile {
            file_name: "plato.png".into(),
            content_type: "image/png".into(),
            data,
        })
    }

    #[test]
    fn upload_compressed_images_and_keep_hosted_ones() {
        let storage = MockStorage::default();
        let urls = materialize_photos(
            &storage,
            &"u1".into(),
            &"r1".into(),
            vec![
                PhotoSource::Hosted("https://elsewhere/a.jpg".into()),
                png_upload(),
            ],
            &Default::default(),
        );
        assert_eq!("https://elsewhere/a.jpg", urls[0]);
        assert!(urls[1].starts_with("https://storage/u1_r1_2_"));
        assert!(urls[1].ends_with(".jpg"));
        let uploads = storage.uploads.borrow();
        assert_eq!(1, uploads.len());
        assert_eq!("image/jpeg", uploads[0].1);
    }

    #[test]
    fn fall_back_to_placeholder_if_upload_fails() {
        let storage = MockStorage {
            fail: true,
            ..Default::default()
        };
        let urls = materialize_photos(
            &storage,
            &"u1".into(),
            &"r1".into(),
            vec![png_upload(), png_upload()],
            &Default::default(),
        );
        assert_eq!(
            vec![
                "/placeholder.svg?height=300&width=300&text=Foto+1".to_string(),
                "/placeholder.svg?height=300&width=300&text=Foto+2".to_string()
            ],
            urls
        );
    }

    #[test]
    fn file_name_pattern() {
        let name = photo_file_name(
            &"user".into(),
            &"review".into(),
            1,
            TimestampMs::from_inner(1_700_000_000_000),
        );
        assert_eq!("user_review_1_1700000000000.jpg", name);
    }
}
