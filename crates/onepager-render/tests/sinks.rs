//! Integration tests for the report export sinks

use chrono::{TimeZone, Utc};
use onepager_core::{
    generate_report_at, Cell, CellValue, Column, Dataset, Report, ReportRenderer, ReportRequest,
    Row, Tone,
};
use onepager_render::{MarkdownRenderer, SlideOutlineRenderer, TextRenderer};
use pretty_assertions::assert_eq;

fn text(column: u64, value: &str) -> Cell {
    Cell::new(column, CellValue::text(value))
}

fn roadmap_report() -> Report {
    let mut dataset = Dataset::new("Roadmap");
    dataset.columns = vec![
        Column::new(1, "Task Name"),
        Column::new(2, "Status"),
        Column::new(3, "Delta"),
        Column::new(4, "Blockers"),
        Column::new(5, "Owner"),
    ];
    dataset.rows = vec![
        Row::new(1)
            .cell(text(1, "Partner API"))
            .cell(text(2, "Green"))
            .cell(text(3, "+2 partners"))
            .cell(text(5, "Lee")),
        Row::new(2)
            .cell(text(1, "Data residency"))
            .cell(text(2, "Red"))
            .cell(text(4, "waiting on legal"))
            .cell(text(5, "Priya")),
        Row::new(3).cell(text(1, "Pricing | tiers")).cell(text(2, "")),
    ];

    let request = ReportRequest::new()
        .status_column("Status")
        .delta_column("Delta")
        .blockers_column("Blockers")
        .owner_column("Owner")
        .tone(Tone::Executive)
        .notes("Kickoff done\nLaunch date set");
    let at = Utc.with_ymd_and_hms(2026, 5, 4, 8, 15, 0).unwrap();
    generate_report_at(Some(&dataset), &request, at).unwrap()
}

const NARRATIVE: &str = "Executive summary: 1/3 initiatives on track, 1 critical. \
    1 blocker needs attention. Key movements: Partner API (+2 partners). \
    Focus decisions on red items and unblock owners before next checkpoint.";

#[test]
fn narrative_fixture_matches_report() {
    assert_eq!(roadmap_report().narrative(), NARRATIVE);
}

#[test]
fn markdown_full_document() {
    let markdown = MarkdownRenderer::new().no_header().render(&roadmap_report()).unwrap();

    let expected = format!(
        "# One Page Report

## Overall health

| Green | Yellow | Red |
|---|---|---|
| **1** | **0** | **1** |
| 33% on track | 0% watch list | 33% critical |

## Traffic lights

| Initiative | Status | Delta vs last week | Owner |
|---|---|---|---|
| Partner API | ● Green | +2 partners | Lee |
| Data residency | ● Red | — | Priya |
| Pricing \\| tiers | — | — | — |

## Blockers

- **Data residency**: waiting on legal — Owner: Priya

## Delta vs last week

- **Partner API**: +2 partners

## Narrative

{}

## Meeting highlights

- Kickoff done
- Launch date set
",
        NARRATIVE
    );
    assert_eq!(markdown, expected);
}

#[test]
fn markdown_header_line() {
    let markdown = MarkdownRenderer::new().render(&roadmap_report()).unwrap();
    assert!(markdown.contains(
        "_Source sheet: Roadmap · Generated: 2026-05-04 08:15 UTC · Tone: executive_"
    ));
}

#[test]
fn slide_outline_layout() {
    let slides = SlideOutlineRenderer::new().render(&roadmap_report()).unwrap();

    assert!(slides.starts_with("# One Page Report\nSheet: Roadmap\n\n"));
    assert!(slides.contains(&format!("> {}\n", NARRATIVE)));
    assert!(slides.contains("| Partner API | GREEN | +2 partners | Lee |\n"));
    assert!(slides.contains("| Pricing \\| tiers | OTHER | — | — |\n"));
    assert!(slides.ends_with("## Blockers\nData residency: waiting on legal\n"));
}

#[test]
fn slide_outline_truncates_long_cells() {
    let mut dataset = Dataset::new("Long");
    dataset.columns = vec![Column::new(1, "Task Name"), Column::new(2, "Blockers")];
    let long_name = "N".repeat(70);
    let long_blocker = "b".repeat(50);
    for id in 0..12 {
        dataset
            .rows
            .push(Row::new(id).cell(text(1, &long_name)).cell(text(2, &long_blocker)));
    }
    let request = ReportRequest::new().blockers_column("Blockers");
    let report = generate_report_at(Some(&dataset), &request, Utc::now()).unwrap();

    let slides = SlideOutlineRenderer::new().render(&report).unwrap();

    let short_name = format!("{}…", "N".repeat(59));
    assert_eq!(slides.matches(&format!("| {} |", short_name)).count(), 10);
    let blocker_line = format!("{}…: {}…\n", "N".repeat(29), "b".repeat(39));
    assert_eq!(slides.matches(&blocker_line).count(), 4);
}

#[test]
fn slide_table_cells_are_escaped() {
    let mut dataset = Dataset::new("Escapes");
    dataset.columns = vec![Column::new(1, "Task Name"), Column::new(2, "Delta")];
    dataset.rows = vec![Row::new(1).cell(text(1, "A | B")).cell(text(2, "line1\nline2"))];
    let request = ReportRequest::new().delta_column("Delta");
    let report = generate_report_at(Some(&dataset), &request, Utc::now()).unwrap();

    let slides = SlideOutlineRenderer::new().render(&report).unwrap();
    let markdown = MarkdownRenderer::new().render(&report).unwrap();

    assert!(slides.contains("| A \\| B | OTHER | line1 line2 | — |\n"), "{}", slides);
    assert!(markdown.contains("| A \\| B | — | line1 line2 | — |\n"), "{}", markdown);
}

#[test]
fn sinks_share_row_order() {
    let report = roadmap_report();
    let text = TextRenderer::new().render(&report).unwrap();
    let markdown = MarkdownRenderer::new().render(&report).unwrap();

    for output in [&text, &markdown] {
        let api = output.find("Partner API").unwrap();
        let residency = output.find("Data residency").unwrap();
        assert!(api < residency);
    }
}
