pub mod google_places;
pub mod object_storage;
pub mod photos_to_dir;

const USER_AGENT: &str = "Comidita App/1.0";
