use regex::Regex;
use std::sync::LazyLock;

use crate::models::AnimeWorldItem;
use crate::RssError;

use super::channel::read_channel_items;

// "One Piece - Episodio 1050", "Dr. Stone Episodio 10-11"
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<name>.+?)\s*-?\s+Episodio\s+(?P<episode>\S.*?)\s*$").unwrap()
});

/// Parse the animeworld episodes feed from raw XML bytes.
///
/// Items whose title has no `Episodio` field are dropped.
pub fn parse_anime_world_feed(xml: &[u8]) -> Result<Vec<AnimeWorldItem>, RssError> {
    let items = read_channel_items(xml)?
        .into_iter()
        .filter_map(|item| item.into_parts())
        .filter_map(|(title, link, pub_date)| {
            let Some((anime_name, episode)) = split_title(&title) else {
                tracing::debug!("Skipping animeworld item without episode field: {}", title);
                return None;
            };
            let double = episode
                .split_whitespace()
                .next()
                .is_some_and(|token| token.contains('-'));

            Some(AnimeWorldItem {
                title,
                anime_name,
                episode,
                double,
                link,
                pub_date,
            })
        })
        .collect();

    Ok(items)
}

fn split_title(title: &str) -> Option<(String, String)> {
    let caps = TITLE_PATTERN.captures(title.trim())?;
    let name = caps.name("name")?.as_str().trim();
    let episode = caps.name("episode")?.as_str().trim();
    if name.is_empty() || episode.is_empty() {
        return None;
    }
    Some((name.to_string(), episode.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
    <title>AnimeWorld</title>
    <item>
        <title>One Piece - Episodio 1050</title>
        <link>https://www.animeworld.so/play/one-piece.abc/Xy12</link>
        <pubDate>Sun, 06 Oct 2024 09:00:00 +0200</pubDate>
    </item>
    <item>
        <title>Dr. Stone Episodio 10-11</title>
        <link>https://www.animeworld.so/play/dr-stone.def/Zz34</link>
        <pubDate>Sun, 06 Oct 2024 08:00:00 +0200</pubDate>
    </item>
    <item>
        <title>Site announcement</title>
        <link>https://www.animeworld.so/news</link>
        <pubDate>Sun, 06 Oct 2024 07:00:00 +0200</pubDate>
    </item>
</channel>
</rss>"#;

    #[test]
    fn test_parse_anime_world_feed() {
        let items = parse_anime_world_feed(FEED.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].anime_name, "One Piece");
        assert_eq!(items[0].episode, "1050");
        assert!(!items[0].double);
        assert_eq!(items[0].pub_date.to_rfc3339(), "2024-10-06T07:00:00+00:00");

        assert_eq!(items[1].anime_name, "Dr. Stone");
        assert_eq!(items[1].episode, "10-11");
        assert!(items[1].double);
    }

    #[test]
    fn test_split_title() {
        assert_eq!(
            split_title("Boku no Hero Academia - Episodio 12v2"),
            Some(("Boku no Hero Academia".to_string(), "12v2".to_string()))
        );
        assert_eq!(
            split_title("Jujutsu Kaisen episodio 24 END"),
            Some(("Jujutsu Kaisen".to_string(), "24 END".to_string()))
        );
        assert_eq!(split_title("Episodio 3"), None);
        assert_eq!(split_title("Jujutsu Kaisen"), None);
    }
}
