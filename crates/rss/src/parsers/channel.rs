use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::RssError;

/// `<item>` fields shared by both feed dialects
#[derive(Debug, Default)]
pub(crate) struct ChannelItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
}

impl ChannelItem {
    /// Title, link and a valid RFC 2822 publish date, or `None` when any is missing
    pub fn into_parts(self) -> Option<(String, String, DateTime<Utc>)> {
        let title = self.title?;
        let link = self.link?;
        let pub_date = self.pub_date?;

        match DateTime::parse_from_rfc2822(&pub_date) {
            Ok(date) => Some((title, link, date.with_timezone(&Utc))),
            Err(e) => {
                tracing::warn!("Skipping item '{}': invalid pubDate '{}': {}", title, pub_date, e);
                None
            }
        }
    }
}

/// Read every `<item>` of an RSS 2.0 channel from raw XML bytes
pub(crate) fn read_channel_items(xml: &[u8]) -> Result<Vec<ChannelItem>, RssError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<ChannelItem> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    current_item = Some(ChannelItem::default());
                }
                current_element = name;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    if let Some(item) = current_item.take() {
                        items.push(item);
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e.unescape().unwrap_or_default().to_string();
                    assign_field(item, &current_element, text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = String::from_utf8_lossy(&e.into_inner()).trim().to_string();
                    assign_field(item, &current_element, text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(RssError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

fn assign_field(item: &mut ChannelItem, element: &str, text: String) {
    if text.is_empty() {
        return;
    }
    match element {
        "title" => item.title = Some(text),
        "link" => item.link = Some(text),
        "pubDate" => item.pub_date = Some(text),
        _ => {}
    }
}
