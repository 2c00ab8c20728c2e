pub mod prelude {

    use std::{cell::RefCell, io::Cursor};

    pub use comidita_core::{
        entities::*,
        gateways::PhotoStorageGateway,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    #[derive(Default)]
    pub struct MockPhotoStorage {
        pub fail: bool,
        pub uploads: RefCell<Vec<String>>,
    }

    impl PhotoStorageGateway for MockPhotoStorage {
        fn upload(&self, file_name: &str, _: &str, _: &[u8]) -> anyhow::Result<String> {
            if self.fail {
                anyhow::bail!("storage unavailable");
            }
            self.uploads.borrow_mut().push(file_name.to_owned());
            Ok(format!("https://storage/{file_name}"))
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub photo_storage: MockPhotoStorage,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            comidita_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            Self {
                db_connections,
                photo_storage: MockPhotoStorage::default(),
            }
        }

        pub fn submit(
            &self,
            new_review: usecases::NewDetailedReview,
        ) -> crate::Result<usecases::ReviewReceipt> {
            flows::submit_detailed_review(
                &self.db_connections,
                &self.photo_storage,
                new_review,
                &Default::default(),
            )
        }

        pub fn try_get_user(&self, id: &str) -> Option<User> {
            self.db_connections
                .shared()
                .unwrap()
                .try_get_user(id)
                .unwrap()
        }
    }

    pub fn new_review(
        user_id: &str,
        google_place_id: &str,
        photos: Vec<PhotoSource>,
    ) -> usecases::NewDetailedReview {
        usecases::NewDetailedReview {
            user: Some(user_id.into()),
            place: PlaceRef {
                id: None,
                google_place_id: google_place_id.into(),
                name: "El Establo".into(),
                address: "Pellegrini 1501, Rosario, Santa Fe".into(),
                pos: MapPoint::new(-32.955, -60.65),
                phone: None,
                website: None,
            },
            ratings: AspectRatings::uniform(RatingValue::try_from(8).unwrap()),
            dish_name: Some("Vacío".into()),
            comment: None,
            photos,
            price_range: PriceRange::From20000To30000,
            category: RestaurantCategory::Parrillas,
        }
    }

    pub fn hosted(url: &str) -> PhotoSource {
        PhotoSource::Hosted(url.into())
    }

    pub fn png_upload() -> PhotoSource {
        let img = image::RgbImage::from_pixel(120, 80, image::Rgb([180, 90, 30]));
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
}
