use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::field::SalesField;
use crate::model::record::SalesRecord;
use crate::model::store::Store;

/// 店舗ごとの売上行。並びは取得元の順序のまま(日付順とは限らない)。
pub type AllStoresData = BTreeMap<Store, Vec<SalesRecord>>;

/// 店舗ごとの特定日のレコード。該当なしは None。
pub type DailyStoreData = BTreeMap<Store, Option<SalesRecord>>;

pub type FieldTotals = BTreeMap<SalesField, f64>;

/// 店舗ごとの期間合計。
pub type PeriodSummary = BTreeMap<Store, FieldTotals>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "新しい順",
            SortOrder::Oldest => "古い順",
        }
    }
}
