pub mod dashboard;
pub mod gallery;
pub mod health;
pub mod ingest;

pub use dashboard::print_dashboard;
pub use gallery::{
    get_first_image_in_album, like_image, like_image_v2, print_images, skip_image, skip_image_v2,
};
pub use health::health_check;
pub use ingest::download_images;
