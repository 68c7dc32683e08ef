//! Channel tree construction.
//!
//! Every non-category channel lands in exactly one bucket: its parent's bucket
//! when the parent is a known category, the root bucket otherwise. Buckets and
//! categories are ordered by ascending position, ties broken by id.

use super::model::{Channel, GuildSnapshot};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub category: Channel,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelTree {
    /// Channels without a (known) parent category.
    pub root: Vec<Channel>,
    /// One group per category, including empty ones.
    pub categories: Vec<CategoryGroup>,
}

/// One visible line of the tree, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow {
    RootHeader,
    Category {
        id: String,
        name: String,
        collapsed: bool,
    },
    Channel {
        id: String,
        name: String,
        icon: &'static str,
        nested: bool,
    },
}

fn by_position(a: &Channel, b: &Channel) -> std::cmp::Ordering {
    a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id))
}

/// Groups `channels` under `categories`.
///
/// When `categories` is empty, the channels of type 4 are the categories.
pub fn build_tree(channels: &[Channel], categories: &[Channel]) -> ChannelTree {
    let mut category_nodes: Vec<Channel> = if categories.is_empty() {
        channels.iter().filter(|c| c.is_category()).cloned().collect()
    } else {
        categories.to_vec()
    };
    category_nodes.sort_by(by_position);

    let category_ids: HashSet<&str> = category_nodes.iter().map(|c| c.id.as_str()).collect();

    let mut root = Vec::new();
    let mut by_parent: HashMap<&str, Vec<Channel>> = HashMap::new();
    for channel in channels {
        if category_ids.contains(channel.id.as_str()) || channel.is_category() {
            continue;
        }
        match channel.parent_id.as_deref() {
            Some(parent) if category_ids.contains(parent) => {
                by_parent.entry(parent).or_default().push(channel.clone());
            }
            _ => root.push(channel.clone()),
        }
    }
    root.sort_by(by_position);

    let groups = category_nodes
        .into_iter()
        .map(|category| {
            let mut children = by_parent.remove(category.id.as_str()).unwrap_or_default();
            children.sort_by(by_position);
            CategoryGroup {
                category,
                channels: children,
            }
        })
        .collect();

    ChannelTree {
        root,
        categories: groups,
    }
}

impl GuildSnapshot {
    pub fn tree(&self) -> ChannelTree {
        build_tree(&self.channels, &self.categories)
    }
}

impl ChannelTree {
    /// Flattens the tree for display; collapsed categories hide their channels.
    pub fn rows(&self, collapsed: &HashSet<String>) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        if !self.root.is_empty() {
            rows.push(TreeRow::RootHeader);
            rows.extend(self.root.iter().map(|c| channel_row(c, false)));
        }
        for group in &self.categories {
            let is_collapsed = collapsed.contains(&group.category.id);
            rows.push(TreeRow::Category {
                id: group.category.id.clone(),
                name: group.category.name.clone(),
                collapsed: is_collapsed,
            });
            if !is_collapsed {
                rows.extend(group.channels.iter().map(|c| channel_row(c, true)));
            }
        }
        rows
    }

    pub fn channel_count(&self) -> usize {
        self.root.len() + self.categories.iter().map(|g| g.channels.len()).sum::<usize>()
    }
}

fn channel_row(channel: &Channel, nested: bool) -> TreeRow {
    TreeRow::Channel {
        id: channel.id.clone(),
        name: channel.name.clone(),
        icon: channel.icon(),
        nested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guild::model::CATEGORY_TYPE;

    fn channel(id: &str, parent: Option<&str>, position: i64) -> Channel {
        Channel {
            id: id.to_string(),
            name: format!("chan-{}", id),
            kind: 0,
            parent_id: parent.map(str::to_string),
            position,
        }
    }

    fn category(id: &str, position: i64) -> Channel {
        Channel {
            id: id.to_string(),
            name: format!("cat-{}", id),
            kind: CATEGORY_TYPE,
            parent_id: None,
            position,
        }
    }

    fn ids(channels: &[Channel]) -> Vec<&str> {
        channels.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn two_categories_and_five_channels() {
        let categories = vec![category("A", 0), category("B", 1)];
        let channels = vec![
            channel("a3", Some("A"), 7),
            channel("r2", None, 4),
            channel("a1", Some("A"), 1),
            channel("r1", None, 2),
            channel("a2", Some("A"), 3),
        ];

        let tree = build_tree(&channels, &categories);

        assert_eq!(ids(&tree.root), vec!["r1", "r2"]);
        assert_eq!(tree.categories.len(), 2);
        assert_eq!(tree.categories[0].category.id, "A");
        assert_eq!(ids(&tree.categories[0].channels), vec!["a1", "a2", "a3"]);
        assert_eq!(tree.categories[1].category.id, "B");
        assert!(tree.categories[1].channels.is_empty());
        assert_eq!(tree.channel_count(), 5);
    }

    #[test]
    fn build_is_deterministic() {
        let channels = vec![
            category("C", 1),
            channel("x", Some("C"), 1),
            channel("y", Some("C"), 1),
            channel("z", None, 0),
        ];
        let first = build_tree(&channels, &[]);
        let second = build_tree(&channels, &[]);
        assert_eq!(first, second);

        let mut reversed = channels.clone();
        reversed.reverse();
        assert_eq!(build_tree(&reversed, &[]), first);
        assert_eq!(ids(&first.categories[0].channels), vec!["x", "y"]);
    }

    #[test]
    fn unknown_parents_fall_back_to_root() {
        let channels = vec![
            category("C", 0),
            channel("known", Some("C"), 0),
            channel("stray", Some("gone"), 1),
        ];
        let tree = build_tree(&channels, &[]);
        assert_eq!(ids(&tree.root), vec!["stray"]);
        assert_eq!(ids(&tree.categories[0].channels), vec!["known"]);
    }

    #[test]
    fn categories_derived_from_type_four_are_not_channels() {
        let channels = vec![category("C", 0), channel("c1", Some("C"), 0)];
        let tree = build_tree(&channels, &[]);
        assert!(tree.root.is_empty());
        assert_eq!(tree.channel_count(), 1);
    }

    #[test]
    fn every_channel_lands_in_exactly_one_bucket() {
        let categories = vec![category("A", 2), category("B", 1)];
        let channels: Vec<Channel> = (0..30)
            .map(|i| {
                let parent = match i % 3 {
                    0 => Some("A"),
                    1 => Some("B"),
                    _ => None,
                };
                channel(&format!("c{}", i), parent, (i * 7 % 11) as i64)
            })
            .collect();

        let tree = build_tree(&channels, &categories);
        let mut seen: Vec<&str> = ids(&tree.root);
        for group in &tree.categories {
            seen.extend(ids(&group.channels));
            assert!(group.channels.windows(2).all(|w| w[0].position <= w[1].position));
        }
        seen.sort();
        let mut expected = ids(&channels);
        expected.sort();
        assert_eq!(seen, expected);
        assert_eq!(tree.categories[0].category.id, "B");
    }

    #[test]
    fn collapsed_categories_hide_their_channels() {
        let channels = vec![
            category("C", 0),
            channel("c1", Some("C"), 0),
            channel("r1", None, 0),
        ];
        let tree = build_tree(&channels, &[]);

        let rows = tree.rows(&HashSet::new());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], TreeRow::RootHeader);

        let collapsed: HashSet<String> = ["C".to_string()].into_iter().collect();
        let rows = tree.rows(&collapsed);
        assert_eq!(rows.len(), 3);
        assert!(matches!(&rows[2], TreeRow::Category { collapsed: true, .. }));
    }
}
