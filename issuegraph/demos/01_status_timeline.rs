use issuegraph::{IssueGraph, loader};
use issuegraph_mock::{GITHUB_SAMPLE_AS_OF, github_sample_json};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load a small GitHub-style dump.
    let records = loader::records_from_str(github_sample_json())?;

    // 2. Pin "now" so the output is reproducible, and count bugs on the side.
    let graph = IssueGraph::builder()
        .records(records)
        .as_of(GITHUB_SAMPLE_AS_OF.parse()?)
        .filter("kind=bug".parse()?)
        .build()?;

    // 3. Compute and print the per-day table.
    let report = graph.compute()?;
    println!("day 0 starts at {}", report.epoch);
    println!("{:>4} {:>5} {:>7} {:>5}", "day", "open", "closed", "bugs");
    let bugs = &report.filtered[0].counts;
    for (day, open, closed) in report.timeline.combined() {
        let b = bugs.get(day).unwrap_or(0);
        println!("{day:>4} {open:>5} {closed:>7} {b:>5}");
    }

    Ok(())
}
