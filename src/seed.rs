//! Built-in fallback data, used whenever a collection key is absent from the
//! persistence layer: one sample board with four columns and one sample card,
//! three priority labels, and the set of built-in (non-custom) themes.

use crate::types::{now_timestamp, Board, Card, Column, Label, LabelColor, Theme};

pub fn seed_boards() -> Vec<Board> {
    let now = now_timestamp();
    vec![Board {
        id: "1".into(),
        theme_id: "1".into(),
        title: "My Board".into(),
        description: None,
        view_settings: None,
        date_created: now.clone(),
        date_updated: now,
    }]
}

pub fn seed_columns() -> Vec<Column> {
    let now = now_timestamp();
    ["Backlog", "To do", "In progress", "Done"]
        .iter()
        .enumerate()
        .map(|(i, title)| Column {
            id: (i + 1).to_string(),
            board_id: "1".into(),
            title: (*title).into(),
            order: i as i64,
            date_created: now.clone(),
            date_updated: now.clone(),
        })
        .collect()
}

pub fn seed_cards() -> Vec<Card> {
    let now = now_timestamp();
    vec![Card {
        id: "1".into(),
        column_id: "1".into(),
        label_ids: vec!["3".into()],
        title: "My first card".into(),
        description: Some(
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
             tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
             quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
             consequat."
                .into(),
        ),
        links: Some(Vec::new()),
        todos: None,
        order: 1,
        date_created: now.clone(),
        date_updated: now,
    }]
}

pub fn seed_labels() -> Vec<Label> {
    let now = now_timestamp();
    [
        ("1", "Low Priority", LabelColor::Green),
        ("2", "Medium Priority", LabelColor::Amber),
        ("3", "High Priority", LabelColor::Red),
    ]
    .iter()
    .map(|(id, title, color)| Label {
        id: (*id).into(),
        title: (*title).into(),
        color: *color,
        date_created: now.clone(),
        date_updated: now.clone(),
    })
    .collect()
}

pub fn seed_themes() -> Vec<Theme> {
    [
        ("1", "Abstract Waves", "abstract-waves.png", "abstract-waves-thumbnail.png"),
        ("2", "Blue Bubbles", "blue-bubbles.jpg", "blue-bubbles-thumbnail.jpg"),
        ("3", "Forest", "forest.png", "forest-thumbnail.png"),
        ("4", "Space", "space.jpg", "space-thumbnail.jpg"),
    ]
    .iter()
    .map(|(id, title, image, thumbnail)| Theme {
        id: (*id).into(),
        title: (*title).into(),
        image: format!("themes/{image}"),
        thumbnail: format!("themes/{thumbnail}"),
        is_custom: false,
        date_created: None,
        date_updated: None,
    })
    .collect()
}
