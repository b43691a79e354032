use canal_discharge::app::models::Season;
use canal_discharge::app::services::analytics::{
    calculate_seasonal_analytics, calculate_yearly_comparison,
};
use canal_discharge::app::services::feed_parser::FeedParser;
use canal_discharge::app::services::record_processor::deduplicate_records;
use canal_discharge::config::ParsingConfig;
use chrono::{Duration, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const OBJECTS: &[&str] = &["LNK", "BNK", "DUS", "KKK"];
const COUNTRIES: &[&str] = &["all", "Uzbekistan", "Tajikistan"];

/// Ten years of daily rows per object and country, with every month
/// duplicated from a neighbouring file
fn synthetic_feed() -> String {
    let mut text = String::from("segment,code,name,country,parameter,date,value,file\n");
    let start = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap_or_default();

    for day in 0..3650 {
        let date = start + Duration::days(day);
        let iso = date.format("%Y-%m-%d");
        let month = date.format("%B").to_string().to_lowercase();
        let year = date.format("%Y");
        for (i, object) in OBJECTS.iter().enumerate() {
            for country in COUNTRIES {
                let value = 5.0 + ((day as usize + i) % 25) as f64;
                text.push_str(&format!(
                    "Upper,{object},{object} canal,{country},Q,{iso},{value},{month}_{year}.xlsx\n"
                ));
                if day % 30 == 0 {
                    text.push_str(&format!(
                        "Upper,{object},{object} canal,{country},Q,{iso},{value},other_{year}.xlsx\n"
                    ));
                }
            }
        }
    }
    text
}

fn bench_pipeline(c: &mut Criterion) {
    let text = synthetic_feed();
    let parser = FeedParser::new(&ParsingConfig::default());

    c.bench_function("feed.parse", |b| {
        b.iter(|| parser.parse_text(black_box(&text), "bench"));
    });

    let records = match parser.parse_text(&text, "bench") {
        Ok(parsed) => parsed.records,
        Err(e) => panic!("synthetic feed failed to parse: {}", e),
    };

    c.bench_function("records.deduplicate", |b| {
        b.iter(|| deduplicate_records(black_box(records.clone())));
    });

    let (canonical, _) = deduplicate_records(records);

    c.bench_function("analytics.seasonal", |b| {
        b.iter(|| {
            calculate_seasonal_analytics(
                black_box(&canonical)
                    .iter()
                    .filter(|r| r.season() == Season::Vegetation),
            )
        });
    });

    c.bench_function("analytics.yearly", |b| {
        b.iter(|| calculate_yearly_comparison(black_box(&canonical)));
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
