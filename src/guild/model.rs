//! Guild state as served by the Relay.
//!
//! The snapshot arrives whole and is never patched locally.

use serde::{Deserialize, Deserializer, Serialize};

/// Channel type of a category.
pub const CATEGORY_TYPE: u16 = 4;

/// Channel type of a voice channel.
pub const VOICE_TYPE: u16 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuildInfo {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: u16,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub position: i64,
}

impl Channel {
    pub fn is_category(&self) -> bool {
        self.kind == CATEGORY_TYPE
    }

    pub fn icon(&self) -> &'static str {
        if self.kind == VOICE_TYPE { "🔊" } else { "#" }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub managed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Member {
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nick) if !nick.is_empty() => nick,
            _ => &self.tag,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    #[serde(default)]
    pub guild: Option<GuildInfo>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Explicit category objects. When empty, categories are the channels of type 4.
    #[serde(default)]
    pub categories: Vec<Channel>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl GuildSnapshot {
    pub fn guild_name(&self) -> &str {
        self.guild
            .as_ref()
            .map(|g| g.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Guild")
    }

    pub fn find_channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn find_category(&self, id: &str) -> Option<&Channel> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .or_else(|| self.channels.iter().find(|c| c.id == id && c.is_category()))
    }

    pub fn find_member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn role_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
            .unwrap_or(id)
    }
}

/// Discord ids are snowflakes; accept them as strings or numbers.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }
    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Text(s)) if !s.is_empty() => Some(s),
        Some(Id::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_decodes_relay_payload() {
        let snapshot: GuildSnapshot = serde_json::from_value(json!({
            "guild": { "id": "1", "name": "War Room" },
            "channels": [
                { "id": "10", "name": "general", "type": 0, "parentId": "100", "position": 2 },
                { "id": 11, "name": "lobby", "type": 2, "parentId": null, "position": 0 },
                { "id": "12", "name": "orphan", "type": 0, "parentId": "", "position": 1 }
            ],
            "roles": [{ "id": "5", "name": "Admin", "position": 3, "managed": false }],
            "members": [{ "id": "7", "tag": "ops#0001", "roles": ["5"] }]
        }))
        .unwrap();

        assert_eq!(snapshot.guild_name(), "War Room");
        assert_eq!(snapshot.channels[0].parent_id.as_deref(), Some("100"));
        assert_eq!(snapshot.channels[1].id, "11");
        assert_eq!(snapshot.channels[1].icon(), "🔊");
        assert_eq!(snapshot.channels[2].parent_id, None);
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.members[0].display_name(), "ops#0001");
        assert_eq!(snapshot.role_name("5"), "Admin");
        assert_eq!(snapshot.role_name("99"), "99");
    }

    #[test]
    fn categories_fall_back_to_type_four_channels() {
        let snapshot = GuildSnapshot {
            channels: vec![
                Channel { id: "b".into(), kind: CATEGORY_TYPE, position: 5, ..Channel::default() },
                Channel { id: "a".into(), kind: CATEGORY_TYPE, position: 1, ..Channel::default() },
                Channel { id: "c".into(), kind: 0, position: 0, ..Channel::default() },
            ],
            ..GuildSnapshot::default()
        };
        let tree = snapshot.tree();
        let ids: Vec<&str> = tree.categories.iter().map(|g| g.category.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(snapshot.find_category("a").is_some());
        assert!(snapshot.find_category("c").is_none());
    }
}
