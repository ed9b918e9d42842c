use bazi_engine::{compute_chart, BaziError, Branch, Element, ElementWeights, PillarPosition, SolarTerm, Stem};
use chrono::{TimeZone, Utc};

#[test]
fn test_shanghai_1990_pillars() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();

    assert_eq!(chart.year.combined, "庚午");
    assert_eq!(chart.month.combined, "己卯");
    assert_eq!(chart.day.combined, "己卯");
    assert_eq!(chart.hour.combined, "己巳");
    assert_eq!(chart.day_stem(), Stem::Ji);
    assert_eq!(chart.day.stem.element(), Element::Earth);

    assert_eq!(
        chart.metadata.utc_instant,
        Utc.with_ymd_and_hms(1990, 3, 15, 2, 0, 0).unwrap()
    );
    assert_eq!(chart.metadata.timezone, "Asia/Shanghai");
    assert_eq!(chart.metadata.solar_term, SolarTerm::Jingzhe);

    let lunar = chart.metadata.lunar_date.as_ref().unwrap();
    assert_eq!((lunar.year, lunar.month, lunar.day), (1990, 2, 19));
    assert!(!lunar.is_leap_month);
}

#[test]
fn test_shanghai_1990_elements() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let elements = chart.elements;

    assert_eq!(elements.wood, 2.6);
    assert_eq!(elements.metal, 1.1);
    assert_eq!(elements.water, 0.0);
    assert!(elements.earth > elements.wood);
    assert!((elements.total() - 9.2).abs() <= 0.15);
}

#[test]
fn test_new_york_midnight_is_zi_hour() {
    let chart = compute_chart("2000-01-01T00:30:00", "America/New_York", None).unwrap();
    assert_eq!(chart.hour.branch, Branch::Zi);
    assert_eq!(chart.hour.combined, "壬子");
    assert_eq!(chart.day.combined, "戊午");
}

#[test]
fn test_same_instant_different_zone() {
    let utc = compute_chart("2000-01-01T05:30:00", "UTC", None).unwrap();
    let new_york = compute_chart("2000-01-01T00:30:00", "America/New_York", None).unwrap();

    assert_eq!(utc.metadata.utc_instant, new_york.metadata.utc_instant);
    assert_eq!(utc.day, new_york.day);
    assert_eq!(utc.month, new_york.month);
    assert_eq!(utc.year, new_york.year);
    assert_ne!(utc.hour, new_york.hour);
    assert_eq!(utc.hour.branch, Branch::Mao);
}

#[test]
fn test_zi_hour_window() {
    let dates = ["1999-12-31", "2000-01-01", "2010-06-01", "2024-02-29", "2024-12-31"];
    let zones = ["Asia/Shanghai", "America/New_York", "Europe/London", "UTC"];
    for zone in zones {
        for date in dates {
            for time in ["23:00", "23:59", "00:00", "00:59"] {
                let local = format!("{}T{}", date, time);
                let chart = compute_chart(&local, zone, None).unwrap();
                assert_eq!(chart.hour.branch, Branch::Zi, "{} {}", local, zone);
            }
            let chart = compute_chart(&format!("{}T01:00", date), zone, None).unwrap();
            assert_eq!(chart.hour.branch, Branch::Chou, "{} 01:00 {}", date, zone);
            let chart = compute_chart(&format!("{}T22:59", date), zone, None).unwrap();
            assert_eq!(chart.hour.branch, Branch::Hai, "{} 22:59 {}", date, zone);
        }
    }
}

#[test]
fn test_hour_stem_follows_utc_day() {
    // 00:30 in Shanghai is still the previous day in UTC.
    let chart = compute_chart("2000-01-02T00:30:00", "Asia/Shanghai", None).unwrap();
    assert_eq!(chart.day.combined, "戊午");
    assert_eq!(chart.hour.combined, "壬子");
}

#[test]
fn test_month_boundary_before_1860() {
    // The beginning of spring 1700 fell late on 3 February UTC.
    let before = compute_chart("1700-02-03T12:00:00", "UTC", None).unwrap();
    assert_eq!(before.metadata.solar_term, SolarTerm::Xiaohan);
    assert_eq!(before.year.combined, "己卯");
    assert_eq!(before.month.combined, "丁丑");

    let after = compute_chart("1700-02-04T12:00:00", "UTC", None).unwrap();
    assert_eq!(after.metadata.solar_term, SolarTerm::Lichun);
    assert_eq!(after.year.combined, "庚辰");
    assert_eq!(after.month.combined, "戊寅");
}

#[test]
fn test_chart_is_deterministic() {
    let first = compute_chart("1985-07-21T16:45:00", "Europe/London", None).unwrap();
    let second = compute_chart("1985-07-21T16:45:00", "Europe/London", None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hidden_weight_alone_changes_total() {
    let base = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let weights = ElementWeights {
        hidden_stem_weight: 0.9,
        ..ElementWeights::default()
    };
    let heavier = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", Some(&weights)).unwrap();

    assert!(heavier.elements.total() > base.elements.total());
    assert_eq!(heavier.day, base.day);
    assert_eq!(heavier.metadata.weights, weights);
}

#[test]
fn test_ambiguous_local_time_takes_earlier_instant() {
    // 01:30 happened twice in New York on 2021-11-07; the first was EDT.
    let chart = compute_chart("2021-11-07T01:30:00", "America/New_York", None).unwrap();
    assert_eq!(
        chart.metadata.utc_instant,
        Utc.with_ymd_and_hms(2021, 11, 7, 5, 30, 0).unwrap()
    );
}

#[test]
fn test_rejected_inputs() {
    let cases = [
        ("not a date", "UTC"),
        ("1990-13-01T10:00:00", "UTC"),
        ("1990-03-15T10:00:00", "Nowhere/Special"),
        ("2021-03-14T02:30:00", "America/New_York"),
    ];
    for (local, zone) in cases {
        let err = compute_chart(local, zone, None).unwrap_err();
        assert!(matches!(err, BaziError::InvalidInput(_)), "{} {}: {:?}", local, zone, err);
    }
}

#[test]
fn test_lunar_date_absent_outside_table() {
    let chart = compute_chart("1890-06-01T12:00:00", "UTC", None).unwrap();
    assert!(chart.metadata.lunar_date.is_none());
    assert_eq!(chart.pillars().len(), 4);
}

#[test]
fn test_pillar_order() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let positions: Vec<PillarPosition> = chart.pillars().iter().map(|(p, _)| *p).collect();
    assert_eq!(
        positions,
        vec![PillarPosition::Year, PillarPosition::Month, PillarPosition::Day, PillarPosition::Hour]
    );
}

#[test]
fn test_chart_serialises_camel_case() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["day"]["combined"], "己卯");
    assert_eq!(json["day"]["stem"], "己");
    assert_eq!(json["metadata"]["solarTerm"], "jingzhe");
    assert_eq!(json["metadata"]["lunarDate"]["isLeapMonth"], false);
    assert_eq!(json["metadata"]["weights"]["hiddenStemWeight"], 0.3);
}
