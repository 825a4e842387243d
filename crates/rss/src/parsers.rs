mod anime_world;
mod channel;
mod erai_raws;

pub use anime_world::parse_anime_world_feed;
pub use erai_raws::parse_erai_raws_feed;
