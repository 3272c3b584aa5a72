//! Tests for query classification and labels.

use super::*;
use chrono::NaiveDate;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn free_text(term: &str) -> Classification {
    Classification::FreeText {
        term: term.to_string(),
    }
}

// ==================== Empty Query Tests ====================

#[test]
fn test_classify_empty() {
    assert_eq!(classify(""), Classification::EmptyQuery);
    assert_eq!(classify("   "), Classification::EmptyQuery);
    assert_eq!(classify("\t\n "), Classification::EmptyQuery);
}

// ==================== Date Range Tests ====================

#[test]
fn test_classify_date_range() {
    assert_eq!(
        classify("01.01.2025 - 30.06.2025"),
        Classification::DateRange {
            from: ymd(2025, 1, 1),
            to: ymd(2025, 6, 30)
        }
    );
}

#[test]
fn test_classify_date_range_spacing() {
    let expected = Classification::DateRange {
        from: ymd(2025, 1, 1),
        to: ymd(2025, 6, 30),
    };
    assert_eq!(classify("1.1.2025-30.6.2025"), expected);
    assert_eq!(classify("  01.01.2025   -   30.06.2025  "), expected);
    assert_eq!(classify("01.01.2025\t-\t30.06.2025"), expected);
}

#[test]
fn test_classify_date_range_invalid_half_falls_through() {
    assert_eq!(
        classify("01.01.2025 - 31.02.2025"),
        free_text("01.01.2025 - 31.02.2025")
    );
    assert_eq!(
        classify("32.01.2025 - 01.02.2025"),
        free_text("32.01.2025 - 01.02.2025")
    );
}

#[test]
fn test_classify_date_range_rejects_extra_hyphens() {
    assert_eq!(
        classify("01.01.2025 -- 30.06.2025"),
        free_text("01.01.2025 -- 30.06.2025")
    );
    assert_eq!(
        classify("01.01.2025 - 02.01.2025 - 03.01.2025"),
        free_text("01.01.2025 - 02.01.2025 - 03.01.2025")
    );
}

#[test]
fn test_classify_date_range_keeps_order() {
    assert_eq!(
        classify("30.06.2025 - 01.01.2025"),
        Classification::DateRange {
            from: ymd(2025, 6, 30),
            to: ymd(2025, 1, 1)
        }
    );
}

// ==================== Exact Date Tests ====================

#[test]
fn test_classify_exact_date() {
    assert_eq!(
        classify("15.03.2026"),
        Classification::ExactDate {
            date: ymd(2026, 3, 15)
        }
    );
    assert_eq!(
        classify(" 5.3.2026 "),
        Classification::ExactDate {
            date: ymd(2026, 3, 5)
        }
    );
}

#[test]
fn test_classify_calendar_invalid_date_is_text() {
    assert_eq!(classify("31.02.2025"), free_text("31.02.2025"));
    assert_eq!(classify("29.02.2025"), free_text("29.02.2025"));
    assert_eq!(classify("00.01.2025"), free_text("00.01.2025"));
    assert_eq!(
        classify("29.02.2024"),
        Classification::ExactDate {
            date: ymd(2024, 2, 29)
        }
    );
}

#[test]
fn test_classify_date_shapes_that_are_text() {
    for query in ["01.01.25", "2025-01-01", "01/01/2025", "1.1.", "001.01.2025"] {
        assert_eq!(classify(query), free_text(query), "query {query:?}");
    }
}

// ==================== Year Tests ====================

#[test]
fn test_classify_year() {
    assert_eq!(classify("2026"), Classification::YearMatch { year: 2026 });
    assert_eq!(classify(" 1990 "), Classification::YearMatch { year: MIN_YEAR });
    assert_eq!(classify("2100"), Classification::YearMatch { year: MAX_YEAR });
}

#[test]
fn test_classify_year_out_of_bounds_is_text() {
    assert_eq!(classify("1989"), free_text("1989"));
    assert_eq!(classify("2101"), free_text("2101"));
    assert_eq!(classify("0000"), free_text("0000"));
}

#[test]
fn test_classify_non_year_numbers_are_text() {
    assert_eq!(classify("202"), free_text("202"));
    assert_eq!(classify("20266"), free_text("20266"));
    assert_eq!(classify("+2026"), free_text("+2026"));
}

// ==================== Year Range Tests ====================

#[test]
fn test_classify_year_range() {
    assert_eq!(
        classify("2020 - 2025"),
        Classification::YearRange {
            from: 2020,
            to: 2025
        }
    );
    assert_eq!(
        classify("2020-2025"),
        Classification::YearRange {
            from: 2020,
            to: 2025
        }
    );
}

#[test]
fn test_classify_year_range_checks_outer_bounds_only() {
    assert_eq!(classify("1989 - 2000"), free_text("1989 - 2000"));
    assert_eq!(classify("2000 - 2101"), free_text("2000 - 2101"));

    // The inner bounds are not checked and the order is not enforced.
    assert_eq!(
        classify("2200 - 2100"),
        Classification::YearRange {
            from: 2200,
            to: 2100
        }
    );
    assert_eq!(
        classify("2025 - 1000"),
        Classification::YearRange {
            from: 2025,
            to: 1000
        }
    );
}

// ==================== Free Text Tests ====================

#[test]
fn test_classify_free_text_trims_but_keeps_case() {
    assert_eq!(classify("  Sico Project "), free_text("Sico Project"));
}

#[test]
fn test_classify_is_total() {
    let queries = [
        "-",
        " - ",
        "..",
        "...",
        "1.2.3.4",
        "ß",
        "ü.ö.ä",
        "01.01.2025 -",
        "- 01.01.2025",
        "2020 -",
        "\u{0}",
        "𝟚𝟘𝟚𝟞",
    ];
    for query in queries {
        let classification = classify(query);
        assert!(
            matches!(classification, Classification::FreeText { .. }),
            "{query:?} gave {classification:?}"
        );
    }
}

// ==================== Label Tests ====================

#[test]
fn test_describe_each_kind() {
    assert_eq!(describe(&classify("")), "");
    assert_eq!(
        describe(&classify("1.1.2025 - 30.6.2025")),
        "date range: 01.01.2025 to 30.06.2025"
    );
    assert_eq!(describe(&classify("5.3.2026")), "date: 05.03.2026");
    assert_eq!(describe(&classify("2026")), "year: 2026");
    assert_eq!(describe(&classify("2020 - 2025")), "year range: 2020 to 2025");
    assert_eq!(describe(&classify(" Sico ")), "text search: \"Sico\"");
}

#[test]
fn test_describe_is_deterministic() {
    for query in ["", "2026", "31.02.2025", "01.01.2025 - 30.06.2025", "abc"] {
        assert_eq!(describe(&classify(query)), describe(&classify(query)));
    }
}

#[test]
fn test_classification_kind_and_serialize() {
    let classification = classify("2020 - 2025");
    assert_eq!(classification.kind(), "year_range");

    let json = serde_json::to_value(&classification).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"kind": "year_range", "from": 2020, "to": 2025})
    );

    let json = serde_json::to_value(classify("15.03.2026")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"kind": "exact_date", "date": "2026-03-15"})
    );

    assert_eq!(
        serde_json::to_value(Classification::EmptyQuery).unwrap(),
        serde_json::json!({"kind": "empty_query"})
    );
}

// ==================== Date Picker Tests ====================

#[test]
fn test_compose_date_range_query() {
    assert_eq!(
        compose_date_range_query(Some("01.01.2025"), Some("30.06.2025")),
        "01.01.2025 - 30.06.2025"
    );
    assert_eq!(compose_date_range_query(Some("01.01.2025"), None), "01.01.2025");
    assert_eq!(compose_date_range_query(None, Some("30.06.2025")), "30.06.2025");
    assert_eq!(compose_date_range_query(Some("  "), Some("")), "");
    assert_eq!(compose_date_range_query(None, None), "");
}

#[test]
fn test_composed_query_round_trips_through_classify() {
    let query = compose_date_range_query(Some("1.1.2025"), Some("30.6.2025"));
    assert!(matches!(classify(&query), Classification::DateRange { .. }));

    let query = compose_date_range_query(None, Some("30.6.2025"));
    assert!(matches!(classify(&query), Classification::ExactDate { .. }));
}
