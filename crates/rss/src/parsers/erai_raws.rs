use crate::models::EraiRawsItem;
use crate::RssError;

use super::channel::read_channel_items;

/// Parse an erai-raws magnet feed from raw XML bytes
pub fn parse_erai_raws_feed(xml: &[u8]) -> Result<Vec<EraiRawsItem>, RssError> {
    let items = read_channel_items(xml)?
        .into_iter()
        .filter_map(|item| item.into_parts())
        .map(|(title, link, pub_date)| EraiRawsItem {
            title,
            link,
            pub_date,
        })
        .collect();

    Ok(items)
}
