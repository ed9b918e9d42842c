use bazi_engine::{
    compute_chart, compute_insights, compute_insights_with, to_persistence_form, CondensedInsights,
    Element, Engine, EngineConfig, LuckCycleConfig, LuckDirection, PillarPosition, Stem, TagCategory,
    TagSource, TenGod,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_shanghai_1990_insights() {
    init_logger();
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let insights = compute_insights(&chart, 1990).unwrap();

    assert_eq!(insights.day_master.stem, Stem::Ji);
    assert_eq!(insights.day_master.element, Element::Earth);
    assert!(insights.day_master.keywords.iter().any(|k| k == "mild"));
    assert!(insights.day_master.keywords.iter().any(|k| k == "nurturing"));
    assert_eq!(insights.ten_gods.relationships[&PillarPosition::Day], TenGod::Peer);
    assert_eq!(insights.luck_cycles.len(), 8);
    assert_eq!(insights.luck_cycles[0].age_start, 8);
    assert_eq!(insights.luck_cycles[0].gregorian_start, 1998);
}

#[test]
fn test_summary_follows_tags() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let insights = compute_insights(&chart, 1990).unwrap();
    let summary = &insights.summary;

    assert_eq!(summary.overall_balance, 86);
    assert_eq!(summary.dominant_elements, vec![Element::Earth, Element::Wood]);
    assert_eq!(summary.favorable_elements, summary.dominant_elements);
    assert_eq!(summary.unfavorable_elements, vec![Element::Water, Element::Metal]);
    assert_eq!(summary.key_strengths, vec!["independent", "confident", "well-balanced"]);
    assert!(summary.areas_for_growth.is_empty());

    let tags = &insights.personality_tags;
    assert!(tags.iter().take(5).all(|t| t.source == TagSource::DayMaster));
    assert!(tags
        .iter()
        .any(|t| t.source == TagSource::Elements && t.tag == "grounded" && t.category == TagCategory::Traits));
}

#[test]
fn test_insights_are_deterministic() {
    let chart = compute_chart("2003-11-30T18:20:00", "Europe/Paris", None).unwrap();
    assert_eq!(compute_insights(&chart, 2003).unwrap(), compute_insights(&chart, 2003).unwrap());
}

#[test]
fn test_custom_luck_config() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let config = LuckCycleConfig {
        direction: LuckDirection::Backward,
        start_age: 3,
    };
    let insights = compute_insights_with(&chart, 1990, &config).unwrap();
    assert_eq!(insights.luck_cycles[0].combined, "戊寅");
    assert_eq!(insights.luck_cycles[0].age_start, 3);
}

#[test]
fn test_condensed_form() {
    let chart = compute_chart("1990-03-15T10:00:00", "Asia/Shanghai", None).unwrap();
    let insights = compute_insights(&chart, 1990).unwrap();
    let condensed = to_persistence_form(&insights);

    assert_eq!(condensed.day_master_stem, Stem::Ji);
    assert_eq!(condensed.luck_cycles.len(), insights.luck_cycles.len());
    assert_eq!(condensed.relationships, insights.ten_gods.relationships);
    assert_eq!(condensed.strengths[0].relationship, TenGod::Peer);
    assert_eq!(condensed.strengths[0].strength, 50);
    assert_eq!(condensed.luck_cycles[0].age_end, 17);

    let json = condensed.to_json().unwrap();
    assert!(json.contains("\"dayMasterStem\":\"己\""));
    assert!(json.contains("\"year\":\"rebelliousOutput\""));
    assert_eq!(CondensedInsights::from_json(&json).unwrap(), condensed);
}

#[test]
fn test_engine_uses_config() {
    let config = EngineConfig::from_toml_str(
        "[weights]\nhidden_stem_weight = 0.9\n\n[luck]\ndirection = \"backward\"\nstart_age = 5\n",
    )
    .unwrap();
    let engine = Engine::new(config).unwrap();

    let chart = engine.chart("1990-03-15T10:00:00", "Asia/Shanghai").unwrap();
    assert_eq!(chart.metadata.weights.hidden_stem_weight, 0.9);

    let insights = engine.insights(&chart, 1990).unwrap();
    assert_eq!(insights.luck_cycles[0].age_start, 5);
    assert_eq!(insights.luck_cycles[0].combined, "戊寅");

    let condensed = engine.condense(&insights);
    assert_eq!(condensed.luck_cycles.len(), 8);
}
