use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use receipt_synth::format::*;
use rust_decimal_macros::dec;

fn line(unit: &str) -> PriceLine<'_> {
    PriceLine {
        quantity: dec!(2),
        unit,
        unit_price: dec!(3.50),
        total_price: dec!(7.00),
        vat_symbol: "A",
    }
}

// ---------------------------------------------------------------------------
// Numbers and prices
// ---------------------------------------------------------------------------

#[test]
fn number_formatting() {
    assert_eq!(format_number(dec!(123.45), ".", 2), "123.45");
    assert_eq!(format_number(dec!(123.45), ",", 2), "123,45");
    assert_eq!(format_number(dec!(123.45), ".", 3), "123.450");
    assert_eq!(format_number(dec!(0), ",", 2), "0,00");
}

#[test]
fn price_standard() {
    let style = PriceStyle::new("x", ".", PriceFormat::Standard);
    assert_eq!(format_price(&line("szt."), &style), "2 szt. x 3.50 = 7.00 A");
}

#[test]
fn price_no_spaces() {
    let style = PriceStyle::new("x", ".", PriceFormat::NoSpaces);
    assert_eq!(format_price(&line("szt."), &style), "2szt.x3.50=7.00A");
}

#[test]
fn price_hybrid() {
    let style = PriceStyle::new("x", ".", PriceFormat::Hybrid);
    assert_eq!(format_price(&line("szt."), &style), "2 szt. x 3.50 = 7.00A");
}

#[test]
fn price_without_unit() {
    let style = PriceStyle::new("x", ".", PriceFormat::Standard);
    assert_eq!(format_price(&line(""), &style), "2 x 3.50 = 7.00 A");
}

#[test]
fn price_weighed_goods() {
    let weighed = PriceLine {
        quantity: dec!(1.25),
        unit: "kg",
        unit_price: dec!(5.99),
        total_price: dec!(7.49),
        vat_symbol: "C",
    };
    let style = PriceStyle::new("*", ",", PriceFormat::Standard);
    assert_eq!(format_price(&weighed, &style), "1,250 kg * 5,99 = 7,49 C");
}

// ---------------------------------------------------------------------------
// Text splitting
// ---------------------------------------------------------------------------

#[test]
fn split_exact_multiple() {
    assert_eq!(split_long_text("abcdef", 3), ["abc", "def"]);
}

#[test]
fn split_with_remainder() {
    assert_eq!(split_long_text("abcdefg", 3), ["abc", "def", "g"]);
}

#[test]
fn split_counts_characters_not_bytes() {
    let chunks = split_long_text("żółćźą", 4);
    assert_eq!(chunks, ["żółć", "źą"]);
}

#[test]
fn split_empty_and_zero() {
    assert!(split_long_text("", 5).is_empty());
    assert_eq!(split_long_text("abc", 0), ["abc"]);
}

// ---------------------------------------------------------------------------
// Weighted choice
// ---------------------------------------------------------------------------

#[test]
fn weighted_choice_empty_is_none() {
    let mut rng = StdRng::seed_from_u64(1);
    let options: Vec<WeightedOption<String>> = Vec::new();
    assert!(weighted_choice(&options, &mut rng).is_none());
}

#[test]
fn weighted_choice_single_option() {
    let mut rng = StdRng::seed_from_u64(2);
    let options = vec![WeightedOption::new("A".to_string(), 1.0)];
    for _ in 0..50 {
        assert_eq!(weighted_choice(&options, &mut rng).unwrap(), "A");
    }
}

#[test]
fn weighted_choice_frequency() {
    let mut rng = StdRng::seed_from_u64(3);
    let options = vec![
        WeightedOption::new("x", 5.0),
        WeightedOption::new("*", 1.0),
        WeightedOption::new("X", 1.0),
    ];
    let trials = 20_000;
    let hits = (0..trials)
        .filter(|_| *weighted_choice(&options, &mut rng).unwrap() == "x")
        .count();
    let share = hits as f64 / trials as f64;
    assert!((share - 5.0 / 7.0).abs() < 0.02, "share {share}");
}

#[test]
fn weighted_option_accepts_legacy_keys() {
    let json = r##"[{"symbol": "x", "weight": 5}, {"format": "#{number}"}]"##;
    let options: Vec<WeightedOption<String>> = serde_json::from_str(json).unwrap();
    assert_eq!(options[0].value, "x");
    assert_eq!(options[1].value, "#{number}");
    assert_eq!(options[1].weight, 1.0);
}

// ---------------------------------------------------------------------------
// Dates and formatting choice
// ---------------------------------------------------------------------------

#[test]
fn date_styles() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(
        format_receipt_date(day, 9, 7, DateStyle::Dash),
        "Data: 05-01-2024 09:07"
    );
    assert_eq!(
        format_receipt_date(day, 21, 30, DateStyle::Dot),
        "Data: 05.01.2024 21:30"
    );
    assert_eq!(
        format_receipt_date(day, 12, 0, DateStyle::Slash),
        "Data: 05/01/2024 12:00"
    );
}

#[test]
fn sum_amount_currency() {
    let mut choice = FormattingChoice::default();
    assert_eq!(choice.sum_amount("12,30"), "12,30");
    choice.sum_label = "RAZEM:".into();
    assert_eq!(choice.sum_amount("12,30"), "12,30 PLN");
}

#[test]
fn default_tables_produce_known_values() {
    let config = FormattingConfig::default();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let choice = config.choose(&mut rng);
        assert!(["x", "*", "X"].contains(&choice.multiply_sign.as_str()));
        assert!(["szt.", "szt", ""].contains(&choice.unit_format.as_str()));
        assert!([".", ","].contains(&choice.decimal_separator.as_str()));
        assert!(choice.number_template.contains("{number}"));
        assert_eq!(choice.currency, "PLN");
    }
}
