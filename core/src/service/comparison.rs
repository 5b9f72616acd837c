/// Shown wherever a prior-year value does not exist.
pub const NOT_APPLICABLE: &str = "N/A";

/// 浮動小数点の誤差を吸収する不感帯 (%)。
const DEAD_ZONE_PERCENT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Increase,
    Decrease,
    Same,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub kind: ChangeKind,
    pub label: String,
}

impl Comparison {
    fn new(kind: ChangeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// 前年比を計算する。`previous` が None の場合は比較不能 (N/A)。
pub fn compare(current: f64, previous: Option<f64>) -> Comparison {
    let Some(previous) = previous else {
        return Comparison::new(ChangeKind::Same, NOT_APPLICABLE);
    };

    if previous == 0.0 {
        return if current > 0.0 {
            Comparison::new(ChangeKind::Increase, "+∞%")
        } else if current < 0.0 {
            Comparison::new(ChangeKind::Decrease, "-∞%")
        } else {
            Comparison::new(ChangeKind::Same, "0%")
        };
    }

    let percentage = (current - previous) / previous * 100.0;
    let kind = if percentage > DEAD_ZONE_PERCENT {
        ChangeKind::Increase
    } else if percentage < -DEAD_ZONE_PERCENT {
        ChangeKind::Decrease
    } else {
        ChangeKind::Same
    };
    let sign = if percentage > 0.0 { "+" } else { "" };
    // 0.05 刻みの端数は0から遠い側に丸める
    let rounded = (percentage * 10.0).round() / 10.0;

    Comparison::new(kind, format!("{}{:.1}%", sign, rounded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_previous_is_not_applicable() {
        for current in [0.0, 5.0, -5.0, 1e9] {
            let c = compare(current, None);
            assert_eq!(c.kind, ChangeKind::Same);
            assert_eq!(c.label, "N/A");
        }
    }

    #[test]
    fn test_zero_previous() {
        assert_eq!(compare(5.0, Some(0.0)), Comparison::new(ChangeKind::Increase, "+∞%"));
        assert_eq!(compare(0.0, Some(0.0)), Comparison::new(ChangeKind::Same, "0%"));
        assert_eq!(compare(-3.0, Some(0.0)), Comparison::new(ChangeKind::Decrease, "-∞%"));
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(compare(110.0, Some(100.0)), Comparison::new(ChangeKind::Increase, "+10.0%"));
        assert_eq!(compare(100.0, Some(110.0)), Comparison::new(ChangeKind::Decrease, "-9.1%"));
        assert_eq!(compare(1200.0, Some(1000.0)), Comparison::new(ChangeKind::Increase, "+20.0%"));
        assert_eq!(compare(100.0, Some(100.0)), Comparison::new(ChangeKind::Same, "0.0%"));
    }

    #[test]
    fn test_percentage_ties_round_away_from_zero() {
        assert_eq!(compare(401.0, Some(400.0)), Comparison::new(ChangeKind::Increase, "+0.3%"));
        assert_eq!(compare(449.0, Some(400.0)), Comparison::new(ChangeKind::Increase, "+12.3%"));
        assert_eq!(compare(399.0, Some(400.0)), Comparison::new(ChangeKind::Decrease, "-0.3%"));
    }

    #[test]
    fn test_dead_zone() {
        // +0.04% は誤差扱い
        let c = compare(10004.0, Some(10000.0));
        assert_eq!(c.kind, ChangeKind::Same);
        assert_eq!(c.label, "+0.0%");

        assert_eq!(compare(9996.0, Some(10000.0)).kind, ChangeKind::Same);

        assert_eq!(compare(10006.0, Some(10000.0)).kind, ChangeKind::Increase);
        assert_eq!(compare(9994.0, Some(10000.0)).kind, ChangeKind::Decrease);
    }
}
