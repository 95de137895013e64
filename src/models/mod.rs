pub mod loaders;
pub mod profile;
pub mod snapshot;
pub mod video_id;

pub use loaders::load_site_profile;
pub use profile::SiteProfile;
pub use snapshot::{PageSnapshot, VideoStatus};
pub use video_id::VideoId;
