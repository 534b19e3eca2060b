use crate::wire::{decode_folded, nullable};
use serde::{Deserialize, Deserializer};

/// A single category assignment reported by the classification daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Category {
    pub category_id: i32,
    pub confidence: i32,
}

impl Category {
    pub fn new(category_id: i32, confidence: i32) -> Self {
        Self {
            category_id,
            confidence,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CategoryFields {
    #[serde(alias = "categoryid", deserialize_with = "nullable")]
    catid: i32,
    #[serde(alias = "confidence", deserialize_with = "nullable")]
    conf: i32,
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields: CategoryFields = decode_folded(deserializer)?;
        Ok(Category::new(fields.catid, fields.conf))
    }
}

/// Classification result for one query name.
///
/// Field names follow the daemon's wire format (`Url`, `Reputation`, `Cats`,
/// `A1cat`, `Source`) and match in any letter case. Missing and `null`
/// fields decode to their zero value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    pub url: String,
    pub reputation: i32,
    pub categories: Vec<Category>,
    pub is_category1: bool,
    pub source: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct VerdictFields {
    #[serde(deserialize_with = "nullable")]
    url: String,
    #[serde(deserialize_with = "nullable")]
    reputation: i32,
    #[serde(alias = "categories", deserialize_with = "nullable")]
    cats: Vec<Category>,
    #[serde(alias = "iscategory1", deserialize_with = "nullable")]
    a1cat: bool,
    #[serde(deserialize_with = "nullable")]
    source: String,
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields: VerdictFields = decode_folded(deserializer)?;
        Ok(Verdict {
            url: fields.url,
            reputation: fields.reputation,
            categories: fields.cats,
            is_category1: fields.a1cat,
            source: fields.source,
        })
    }
}

impl Verdict {
    pub fn new(url: impl Into<String>, reputation: i32) -> Self {
        Self {
            url: url.into(),
            reputation,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, category_ids: &[i32]) -> Self {
        self.categories = category_ids
            .iter()
            .map(|&id| Category::new(id, 0))
            .collect();
        self
    }
}
