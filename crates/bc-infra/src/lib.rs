pub mod catalog;
pub mod http;
pub mod media;

pub use catalog::StaticDonationCatalog;
pub use http::HttpApiClient;
pub use media::ImagePreparer;
