use chrono::{TimeZone, Utc};
use issuegraph::IntervalIndex;
use issuegraph_mock::{SyntheticSpec, synthetic};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Generate a reproducible dataset.
    let records = synthetic(SyntheticSpec {
        issues: 5_000,
        ..SyntheticSpec::default()
    });
    let as_of = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).single().ok_or("bad date")?;

    // 2. Index it once.
    let index = IntervalIndex::build(&records, as_of)?;
    let (first, last) = index.day_range();
    println!("{} issues over days {first}..={last}", index.len());

    // 3. Ask who was alive on a few days.
    for day in [first, (first + last) / 2, last] {
        let alive = index.stab(day);
        let bugs = alive
            .iter()
            .filter(|iv| iv.record.attribute("label").is_some_and(|v| v.as_str() == Some("bug")))
            .count();
        println!("day {day}: {} alive, {bugs} labelled bug", alive.len());
    }

    Ok(())
}
