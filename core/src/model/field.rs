use serde::{Deserialize, Serialize};
use std::fmt;

/// 集計対象の数値列。ラベルはスプレッドシートの列名(半角化済み)。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SalesField {
    DailyTotal,
    Sauna,
    Lodging,
    Massage,
    Grill,
    Retail,
    SaunaVisitors,
    LodgingGuests,
    MassageVisitors,
    GrillOrders,
}

impl SalesField {
    /// Every field summed by the period summarizer.
    pub const SUMMABLE: [SalesField; 10] = [
        SalesField::DailyTotal,
        SalesField::Sauna,
        SalesField::Lodging,
        SalesField::Massage,
        SalesField::Grill,
        SalesField::Retail,
        SalesField::SaunaVisitors,
        SalesField::LodgingGuests,
        SalesField::MassageVisitors,
        SalesField::GrillOrders,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SalesField::DailyTotal => "売上日計",
            SalesField::Sauna => "サウナ",
            SalesField::Lodging => "宿泊売上計",
            SalesField::Massage => "マッサージ",
            SalesField::Grill => "グリル",
            SalesField::Retail => "物販",
            SalesField::SaunaVisitors => "人数(S)",
            SalesField::LodgingGuests => "人数(C)",
            SalesField::MassageVisitors => "人数(M)",
            SalesField::GrillOrders => "件数(G)",
        }
    }

    pub fn from_label(label: &str) -> Option<SalesField> {
        SalesField::SUMMABLE.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for SalesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A count shown under a sales category, e.g. visitors under サウナ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubItem {
    pub label: &'static str,
    pub field: SalesField,
    pub unit: &'static str,
}

const SAUNA_ITEMS: [SubItem; 1] = [SubItem { label: "人数", field: SalesField::SaunaVisitors, unit: "人" }];
const LODGING_ITEMS: [SubItem; 1] = [SubItem { label: "人数", field: SalesField::LodgingGuests, unit: "人" }];
const MASSAGE_ITEMS: [SubItem; 1] = [SubItem { label: "人数", field: SalesField::MassageVisitors, unit: "人" }];
const GRILL_ITEMS: [SubItem; 1] = [SubItem { label: "件数", field: SalesField::GrillOrders, unit: "件" }];

/// 前年比較を行う売上カテゴリ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    DailyTotal,
    Sauna,
    Lodging,
    Massage,
    Grill,
    Retail,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::DailyTotal,
        Category::Sauna,
        Category::Lodging,
        Category::Massage,
        Category::Grill,
        Category::Retail,
    ];

    pub fn field(self) -> SalesField {
        match self {
            Category::DailyTotal => SalesField::DailyTotal,
            Category::Sauna => SalesField::Sauna,
            Category::Lodging => SalesField::Lodging,
            Category::Massage => SalesField::Massage,
            Category::Grill => SalesField::Grill,
            Category::Retail => SalesField::Retail,
        }
    }

    /// Label used in CSV exports (the sheet column name).
    pub fn label(self) -> &'static str {
        self.field().label()
    }

    /// Label used on the period summary breakdown.
    pub fn short_label(self) -> &'static str {
        match self {
            Category::Lodging => "宿泊",
            other => other.label(),
        }
    }

    pub fn sub_items(self) -> &'static [SubItem] {
        match self {
            Category::Sauna => &SAUNA_ITEMS,
            Category::Lodging => &LODGING_ITEMS,
            Category::Massage => &MASSAGE_ITEMS,
            Category::Grill => &GRILL_ITEMS,
            Category::DailyTotal | Category::Retail => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(SalesField::from_label("人数(S)"), Some(SalesField::SaunaVisitors));
        assert_eq!(SalesField::from_label("売上日計"), Some(SalesField::DailyTotal));
        // 全角括弧はサニタイズ後にしか一致しない
        assert_eq!(SalesField::from_label("人数（S）"), None);
    }

    #[test]
    fn test_sub_items() {
        assert!(Category::DailyTotal.sub_items().is_empty());
        assert!(Category::Retail.sub_items().is_empty());
        assert_eq!(Category::Grill.sub_items()[0].field, SalesField::GrillOrders);
        assert_eq!(Category::Grill.sub_items()[0].unit, "件");
        assert_eq!(Category::Lodging.short_label(), "宿泊");
        assert_eq!(Category::Lodging.label(), "宿泊売上計");
    }
}
