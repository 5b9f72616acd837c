use serde::{Deserialize, Deserializer, Serialize};

use crate::model::field::SalesField;

/// 1店舗1日分の売上行。
///
/// 数値列が欠けている・null の場合は 0 として扱う。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SalesRecord {
    #[serde(rename = "対象日")]
    pub date: String,
    #[serde(rename = "売上日計", default, deserialize_with = "zero_if_null")]
    pub daily_total: f64,
    #[serde(rename = "サウナ", default, deserialize_with = "zero_if_null")]
    pub sauna: f64,
    #[serde(rename = "宿泊売上計", default, deserialize_with = "zero_if_null")]
    pub lodging: f64,
    #[serde(rename = "マッサージ", default, deserialize_with = "zero_if_null")]
    pub massage: f64,
    #[serde(rename = "グリル", default, deserialize_with = "zero_if_null")]
    pub grill: f64,
    #[serde(rename = "物販", default, deserialize_with = "zero_if_null")]
    pub retail: f64,
    #[serde(rename = "人数(S)", default, deserialize_with = "zero_if_null")]
    pub sauna_visitors: f64,
    #[serde(rename = "人数(C)", default, deserialize_with = "zero_if_null")]
    pub lodging_guests: f64,
    #[serde(rename = "人数(M)", default, deserialize_with = "zero_if_null")]
    pub massage_visitors: f64,
    #[serde(rename = "件数(G)", default, deserialize_with = "zero_if_null")]
    pub grill_orders: f64,
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl SalesRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter, mostly handy when assembling fixtures.
    pub fn with(mut self, field: SalesField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: SalesField) -> f64 {
        match field {
            SalesField::DailyTotal => self.daily_total,
            SalesField::Sauna => self.sauna,
            SalesField::Lodging => self.lodging,
            SalesField::Massage => self.massage,
            SalesField::Grill => self.grill,
            SalesField::Retail => self.retail,
            SalesField::SaunaVisitors => self.sauna_visitors,
            SalesField::LodgingGuests => self.lodging_guests,
            SalesField::MassageVisitors => self.massage_visitors,
            SalesField::GrillOrders => self.grill_orders,
        }
    }

    pub fn set(&mut self, field: SalesField, value: f64) {
        let slot = match field {
            SalesField::DailyTotal => &mut self.daily_total,
            SalesField::Sauna => &mut self.sauna,
            SalesField::Lodging => &mut self.lodging,
            SalesField::Massage => &mut self.massage,
            SalesField::Grill => &mut self.grill,
            SalesField::Retail => &mut self.retail,
            SalesField::SaunaVisitors => &mut self.sauna_visitors,
            SalesField::LodgingGuests => &mut self.lodging_guests,
            SalesField::MassageVisitors => &mut self.massage_visitors,
            SalesField::GrillOrders => &mut self.grill_orders,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_numbers_default_to_zero() {
        let json = r#"{"対象日": "2025/10/05", "売上日計": 1200, "サウナ": null}"#;
        let record: SalesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, "2025/10/05");
        assert_eq!(record.get(SalesField::DailyTotal), 1200.0);
        assert_eq!(record.get(SalesField::Sauna), 0.0);
        assert_eq!(record.get(SalesField::GrillOrders), 0.0);
    }

    #[test]
    fn test_get_set_cover_every_field() {
        let mut record = SalesRecord::new("2025/10/05");
        for (i, field) in SalesField::SUMMABLE.into_iter().enumerate() {
            record.set(field, i as f64 + 1.0);
        }
        for (i, field) in SalesField::SUMMABLE.into_iter().enumerate() {
            assert_eq!(record.get(field), i as f64 + 1.0, "{}", field);
        }
    }
}
