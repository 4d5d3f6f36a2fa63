use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque entity identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current local time as an RFC 3339 string (second precision).
/// All `dateCreated`/`dateUpdated` fields carry this format.
pub fn now_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// The named colors a label may carry. Serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

impl LabelColor {
    /// User-friendly display name (capitalized).
    pub fn display_name(&self) -> &'static str {
        match self {
            LabelColor::Red => "Red",
            LabelColor::Orange => "Orange",
            LabelColor::Amber => "Amber",
            LabelColor::Yellow => "Yellow",
            LabelColor::Lime => "Lime",
            LabelColor::Green => "Green",
            LabelColor::Emerald => "Emerald",
            LabelColor::Teal => "Teal",
            LabelColor::Cyan => "Cyan",
            LabelColor::Sky => "Sky",
            LabelColor::Blue => "Blue",
            LabelColor::Indigo => "Indigo",
            LabelColor::Violet => "Violet",
            LabelColor::Purple => "Purple",
            LabelColor::Fuchsia => "Fuchsia",
            LabelColor::Pink => "Pink",
            LabelColor::Rose => "Rose",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub theme_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque per-board view preferences; stored verbatim, never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_settings: Option<serde_json::Value>,
    pub date_created: String,
    pub date_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub board_id: String,
    pub title: String,
    pub order: i64,
    pub date_created: String,
    pub date_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLink {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTodo {
    pub id: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub column_id: String,
    /// Label references. Entries may be stale after external edits; readers
    /// skip ids that no longer resolve.
    #[serde(default)]
    pub label_ids: Vec<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<CardLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<CardTodo>>,
    pub order: i64,
    pub date_created: String,
    pub date_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub title: String,
    pub color: LabelColor,
    pub date_created: String,
    pub date_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub title: String,
    /// Stored-file reference produced by the image collaborator, e.g.
    /// `app://theme-image-…`. Opaque to the core.
    pub image: String,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
}

// ---------------------------------------------------------------------------
// Drafts (create input: no id, no timestamps)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDraft {
    pub theme_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub view_settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDraft {
    pub board_id: String,
    pub title: String,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub column_id: String,
    #[serde(default)]
    pub label_ids: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<CardLink>>,
    #[serde(default)]
    pub todos: Option<Vec<CardTodo>>,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDraft {
    pub title: String,
    pub color: LabelColor,
}

/// Theme drafts carry no `isCustom` flag: user-created themes are always
/// custom, whatever the caller might claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDraft {
    pub title: String,
    pub image: String,
    pub thumbnail: String,
}

// ---------------------------------------------------------------------------
// Patches (update input: id required, all other fields optional; absent
// fields leave the stored value untouched)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    pub id: String,
    #[serde(default)]
    pub theme_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub view_settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPatch {
    pub id: String,
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    pub id: String,
    #[serde(default)]
    pub column_id: Option<String>,
    #[serde(default)]
    pub label_ids: Option<Vec<String>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<CardLink>>,
    #[serde(default)]
    pub todos: Option<Vec<CardTodo>>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPatch {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub color: Option<LabelColor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// A single entry in a bulk column reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntry {
    pub id: String,
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_label_color_wire_format() {
        let json = serde_json::to_string(&LabelColor::Amber).unwrap();
        assert_eq!(json, "\"amber\"");
        let back: LabelColor = serde_json::from_str("\"rose\"").unwrap();
        assert_eq!(back, LabelColor::Rose);
        assert_eq!(LabelColor::Rose.display_name(), "Rose");
    }

    #[test]
    fn test_card_wire_shape() {
        let card = Card {
            id: "c1".into(),
            column_id: "col1".into(),
            label_ids: vec!["l1".into()],
            title: "Ship it".into(),
            description: None,
            links: None,
            todos: None,
            order: 2,
            date_created: "2026-01-01T10:00:00+00:00".into(),
            date_updated: "2026-01-01T10:00:00+00:00".into(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["columnId"], "col1");
        assert_eq!(json["labelIds"][0], "l1");
        // absent optionals are omitted from the wire shape
        assert!(json.get("description").is_none());
        assert!(json.get("todos").is_none());
    }

    #[test]
    fn test_theme_is_custom_defaults_false() {
        let theme: Theme = serde_json::from_str(
            r#"{"id":"t1","title":"Forest","image":"a.png","thumbnail":"b.png"}"#,
        )
        .unwrap();
        assert!(!theme.is_custom);
        // falsy flag is omitted on the way out
        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("isCustom").is_none());
    }

    #[test]
    fn test_patch_accepts_partial_json() {
        let patch: CardPatch =
            serde_json::from_str(r#"{"id":"c1","title":"  renamed  "}"#).unwrap();
        assert_eq!(patch.id, "c1");
        assert_eq!(patch.title.as_deref(), Some("  renamed  "));
        assert!(patch.column_id.is_none());
        assert!(patch.order.is_none());
    }
}
