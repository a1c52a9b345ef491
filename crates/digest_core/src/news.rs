use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single extracted news line and the date it was announced under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: Option<NaiveDate>,
    pub text: String,
}

impl NewsItem {
    pub fn new(date: Option<NaiveDate>, text: impl Into<String>) -> Self {
        Self {
            date,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCategory {
    pub label: String,
    pub items: Vec<NewsItem>,
}

/// Category label to items, keyed in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorizedNews {
    categories: Vec<NewsCategory>,
}

impl CategorizedNews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &str, item: NewsItem) {
        match self.categories.iter_mut().find(|c| c.label == label) {
            Some(category) => category.items.push(item),
            None => self.categories.push(NewsCategory {
                label: label.to_string(),
                items: vec![item],
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[NewsItem]> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.items.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NewsCategory> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
