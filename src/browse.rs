//! Grouping, ordering and search over a loaded catalog

use std::cmp::Ordering;

use crate::models::{Channel, ChannelsByCategory, DEFAULT_CATEGORY, DEFAULT_COUNTRY};

pub fn group_by_category(channels: &[Channel]) -> ChannelsByCategory {
    group_by(channels, |c| &c.category, DEFAULT_CATEGORY)
}

pub fn group_by_country(channels: &[Channel]) -> ChannelsByCategory {
    group_by(channels, |c| &c.country, DEFAULT_COUNTRY)
}

fn group_by<F>(channels: &[Channel], key: F, fallback: &str) -> ChannelsByCategory
where
    F: Fn(&Channel) -> &String,
{
    let mut groups = ChannelsByCategory::new();
    for channel in channels {
        let label = key(channel);
        let label = if label.is_empty() { fallback } else { label.as_str() };
        groups
            .entry(label.to_string())
            .or_default()
            .push(channel.clone());
    }
    groups
}

/// Group labels with `priority` entries first (in that order), the rest alphabetical
pub fn sorted_categories(groups: &ChannelsByCategory, priority: &[String]) -> Vec<String> {
    let rank = |label: &str| priority.iter().position(|p| p == label);

    let mut labels: Vec<String> = groups.keys().cloned().collect();
    labels.sort_by(|a, b| match (rank(a.as_str()), rank(b.as_str())) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    labels
}

/// Case-insensitive match on name, category or country. Blank query matches nothing.
pub fn search<'a>(channels: &'a [Channel], query: &str) -> Vec<&'a Channel> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    channels
        .iter()
        .filter(|c| {
            [&c.name, &c.category, &c.country]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}
