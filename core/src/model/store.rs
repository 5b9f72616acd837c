use serde::{Deserialize, Serialize};
use std::fmt;

/// 店舗。宣言順がそのまま表示順・CSV出力順になる。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Store {
    #[serde(rename = "栄")]
    Sakae,
    #[serde(rename = "今池")]
    Imaike,
    #[serde(rename = "福岡")]
    Fukuoka,
}

impl Store {
    pub const ALL: [Store; 3] = [Store::Sakae, Store::Imaike, Store::Fukuoka];

    /// Name of the spreadsheet tab holding this store's rows.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Store::Sakae => "栄",
            Store::Imaike => "今池",
            Store::Fukuoka => "福岡",
        }
    }

    pub fn from_sheet_name(name: &str) -> Option<Store> {
        Store::ALL.into_iter().find(|s| s.sheet_name() == name.trim())
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}
