use std::collections::BTreeMap;

use crate::data::filter::top_n;
use crate::data::model::{CellValue, Column, Listing, ListingTable};

// ---------------------------------------------------------------------------
// View parameters
// ---------------------------------------------------------------------------

/// Display hint handed to the chart renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Bar,
    Sunburst,
    MapScatter,
    GeoScatter,
}

/// Static per-view configuration: which columns feed which chart channel.
/// Only the top-charts view derives anything from data (a largest-n pick);
/// everything else here is constant.
#[derive(Debug, Clone, Copy)]
pub struct ViewParams {
    pub title: &'static str,
    pub kind: ViewKind,
    pub x: Option<Column>,
    pub y: Option<Column>,
    /// Grouping path for hierarchical views (outermost ring last).
    pub path: &'static [Column],
    pub color: Option<Column>,
    pub size: Option<Column>,
    pub hover: &'static [Column],
    /// Largest-n ranking applied before charting (the top-charts view);
    /// `None` aggregates per category instead.
    pub rank: Option<usize>,
}

pub const PRICE_BY_PROPERTY_TYPE: ViewParams = ViewParams {
    title: "Average Price by Property Type",
    kind: ViewKind::Bar,
    x: Some(Column::PropertyType),
    y: Some(Column::Price),
    path: &[],
    color: Some(Column::Price),
    size: None,
    hover: &[Column::NumberOfReviews, Column::ReviewScores],
    rank: None,
};

pub const AVAILABILITY_SUNBURST: ViewParams = ViewParams {
    title: "Availability Distribution",
    kind: ViewKind::Sunburst,
    x: None,
    y: Some(Column::Availability365),
    path: &[Column::RoomType, Column::BedType, Column::IsLocationExact],
    color: None,
    size: None,
    hover: &[],
    rank: None,
};

pub const PRICE_MAP: ViewParams = ViewParams {
    title: "Listing Prices by Location",
    kind: ViewKind::MapScatter,
    x: Some(Column::Longitude),
    y: Some(Column::Latitude),
    path: &[],
    color: Some(Column::Price),
    size: None,
    hover: &[Column::Name, Column::RoomType, Column::PropertyType],
    rank: None,
};

pub const GEO_SCATTER: ViewParams = ViewParams {
    title: "Geospatial Distribution",
    kind: ViewKind::GeoScatter,
    x: Some(Column::Longitude),
    y: Some(Column::Latitude),
    path: &[],
    color: Some(Column::Price),
    size: Some(Column::Accommodates),
    hover: &[Column::Name],
    rank: None,
};

pub const TOP_CHARTS: ViewParams = ViewParams {
    title: "Top 10 Highest Priced Listings",
    kind: ViewKind::Bar,
    x: Some(Column::Name),
    y: Some(Column::Price),
    path: &[],
    color: Some(Column::Price),
    size: None,
    hover: &[Column::RoomType, Column::PropertyType],
    rank: Some(TOP_LISTING_COUNT),
};

/// How many listings the top-charts view ranks.
pub const TOP_LISTING_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Mean of `metric` per distinct value of `category`, in category order.
/// Rows with a null metric are skipped; categories with no numeric rows are
/// dropped.  An empty table yields an empty result, not an error.
pub fn mean_by_category(
    table: &ListingTable,
    category: Column,
    metric: Column,
) -> Vec<(CellValue, f64)> {
    let mut sums: BTreeMap<CellValue, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        let key = row.get(category);
        if *key == CellValue::Null {
            continue;
        }
        if let Some(v) = row.number(metric) {
            let entry = sums.entry(key.clone()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// One bar of a bar view: axis label, bar height, and tooltip text built
/// from the view's hover columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
    pub hover: String,
}

/// Assemble the bars for a bar view from its parameters.
///
/// With `rank` set, the largest-n rows by the metric become one bar each and
/// hover columns read straight off the row.  Without it, bars are per-category
/// means of the metric and the hover columns carry per-category means too.
pub fn bar_entries(table: &ListingTable, params: &ViewParams) -> Vec<BarEntry> {
    let (Some(category), Some(metric)) = (params.x, params.y) else {
        return Vec::new();
    };

    match params.rank {
        Some(n) => top_n(table, metric, n)
            .rows
            .iter()
            .map(|row| BarEntry {
                label: row.text(category),
                value: row.number(metric).unwrap_or(0.0),
                hover: hover_text(row, params.hover),
            })
            .collect(),
        None => {
            let hover_means: Vec<(Column, BTreeMap<CellValue, f64>)> = params
                .hover
                .iter()
                .map(|col| {
                    (
                        *col,
                        mean_by_category(table, category, *col).into_iter().collect(),
                    )
                })
                .collect();

            mean_by_category(table, category, metric)
                .into_iter()
                .map(|(key, value)| {
                    let hover = hover_means
                        .iter()
                        .filter_map(|(col, means)| {
                            means.get(&key).map(|m| format!("{col}: {m:.1}"))
                        })
                        .collect::<Vec<_>>()
                        .join(" · ");
                    BarEntry {
                        label: key.to_string(),
                        value,
                        hover,
                    }
                })
                .collect()
        }
    }
}

/// Tooltip text for one row: the hover columns as `name: value` pairs.
pub fn hover_text(row: &Listing, columns: &[Column]) -> String {
    columns
        .iter()
        .map(|col| format!("{col}: {}", row.text(*col)))
        .collect::<Vec<_>>()
        .join(" · ")
}

// ---------------------------------------------------------------------------
// Sunburst aggregation
// ---------------------------------------------------------------------------

/// One ring segment of a sunburst: a group of rows at a given depth of the
/// grouping path, with its angular extent as a fraction of the full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct SunburstSector {
    /// Depth in the grouping path; 0 is the innermost ring.
    pub level: usize,
    pub label: String,
    /// Sum of the value column over the group's rows.
    pub value: f64,
    /// Start angle as a fraction of the full circle, in `[0, 1)`.
    pub start: f64,
    /// Angular extent as a fraction of the full circle.
    pub span: f64,
}

/// Aggregate a table into sunburst sectors along `path`, sized by `value_col`.
///
/// Each ring partitions its parent sector proportionally to the group sums;
/// rows with a null value count as zero.  Groups whose parent sums to zero
/// get zero span.
pub fn sunburst_sectors(
    table: &ListingTable,
    path: &[Column],
    value_col: Column,
) -> Vec<SunburstSector> {
    let rows: Vec<_> = table.rows.iter().collect();
    let total: f64 = rows
        .iter()
        .map(|r| r.number(value_col).unwrap_or(0.0))
        .sum();

    let mut sectors = Vec::new();
    subdivide(&rows, path, value_col, 0, 0.0, 1.0, total, &mut sectors);
    sectors
}

fn subdivide(
    rows: &[&Listing],
    path: &[Column],
    value_col: Column,
    level: usize,
    start: f64,
    span: f64,
    parent_sum: f64,
    out: &mut Vec<SunburstSector>,
) {
    let Some(&group_col) = path.first() else {
        return;
    };

    let mut groups: BTreeMap<CellValue, Vec<&Listing>> = BTreeMap::new();
    for &row in rows {
        groups.entry(row.get(group_col).clone()).or_default().push(row);
    }

    let mut cursor = start;
    for (key, group_rows) in groups {
        let group_sum: f64 = group_rows
            .iter()
            .map(|r| r.number(value_col).unwrap_or(0.0))
            .sum();
        let group_span = if parent_sum > 0.0 {
            span * (group_sum / parent_sum)
        } else {
            0.0
        };

        out.push(SunburstSector {
            level,
            label: key.to_string(),
            value: group_sum,
            start: cursor,
            span: group_span,
        });

        subdivide(
            &group_rows,
            &path[1..],
            value_col,
            level + 1,
            cursor,
            group_span,
            group_sum,
            out,
        );
        cursor += group_span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn listing(cells: &[(Column, CellValue)]) -> Listing {
        let mut l = Listing::default();
        for (col, val) in cells {
            l.values.insert(*col, val.clone());
        }
        l
    }

    fn table(rows: Vec<Listing>) -> ListingTable {
        let columns: BTreeSet<Column> = Column::ALL.into_iter().collect();
        ListingTable::new(columns, rows)
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn mean_by_category_averages_per_group() {
        let t = table(vec![
            listing(&[(Column::PropertyType, s("Apartment")), (Column::Price, CellValue::Float(100.0))]),
            listing(&[(Column::PropertyType, s("Apartment")), (Column::Price, CellValue::Float(200.0))]),
            listing(&[(Column::PropertyType, s("House")), (Column::Price, CellValue::Float(300.0))]),
        ]);
        let means = mean_by_category(&t, Column::PropertyType, Column::Price);
        assert_eq!(means, vec![(s("Apartment"), 150.0), (s("House"), 300.0)]);
    }

    #[test]
    fn mean_by_category_skips_null_metrics() {
        let t = table(vec![
            listing(&[(Column::PropertyType, s("Loft")), (Column::Price, CellValue::Null)]),
            listing(&[(Column::PropertyType, s("Loft")), (Column::Price, CellValue::Float(80.0))]),
        ]);
        let means = mean_by_category(&t, Column::PropertyType, Column::Price);
        assert_eq!(means, vec![(s("Loft"), 80.0)]);
    }

    #[test]
    fn mean_by_category_on_empty_table_is_empty() {
        assert!(mean_by_category(&table(vec![]), Column::PropertyType, Column::Price).is_empty());
    }

    #[test]
    fn sunburst_first_ring_partitions_the_circle() {
        let t = table(vec![
            listing(&[(Column::RoomType, s("Entire home")), (Column::Availability365, CellValue::Integer(300))]),
            listing(&[(Column::RoomType, s("Private room")), (Column::Availability365, CellValue::Integer(100))]),
        ]);
        let sectors = sunburst_sectors(&t, &[Column::RoomType], Column::Availability365);

        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].label, "Entire home");
        assert!((sectors[0].span - 0.75).abs() < 1e-9);
        assert!((sectors[1].start - 0.75).abs() < 1e-9);
        assert!((sectors[1].span - 0.25).abs() < 1e-9);
    }

    #[test]
    fn sunburst_children_subdivide_their_parent() {
        let t = table(vec![
            listing(&[
                (Column::RoomType, s("Entire home")),
                (Column::BedType, s("Real Bed")),
                (Column::Availability365, CellValue::Integer(120)),
            ]),
            listing(&[
                (Column::RoomType, s("Entire home")),
                (Column::BedType, s("Futon")),
                (Column::Availability365, CellValue::Integer(40)),
            ]),
            listing(&[
                (Column::RoomType, s("Private room")),
                (Column::BedType, s("Real Bed")),
                (Column::Availability365, CellValue::Integer(40)),
            ]),
        ]);
        let sectors = sunburst_sectors(
            &t,
            &[Column::RoomType, Column::BedType],
            Column::Availability365,
        );

        // Entire home, its two bed types, Private room, its one bed type.
        assert_eq!(sectors.len(), 5);

        let parent = sectors.iter().find(|x| x.label == "Entire home" && x.level == 0).unwrap();
        let children: Vec<_> = sectors.iter().filter(|x| x.level == 1 && x.start >= parent.start && x.start < parent.start + parent.span).collect();
        let child_span: f64 = children.iter().map(|c| c.span).sum();
        assert!((child_span - parent.span).abs() < 1e-9);
    }

    #[test]
    fn sunburst_of_empty_table_has_no_span() {
        let sectors = sunburst_sectors(
            &table(vec![]),
            &[Column::RoomType, Column::BedType],
            Column::Availability365,
        );
        assert!(sectors.is_empty());
    }

    #[test]
    fn sunburst_zero_total_yields_zero_spans() {
        let t = table(vec![listing(&[
            (Column::RoomType, s("Entire home")),
            (Column::Availability365, CellValue::Integer(0)),
        ])]);
        let sectors = sunburst_sectors(&t, &[Column::RoomType], Column::Availability365);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].span, 0.0);
    }

    #[test]
    fn ranked_bar_entries_take_the_largest_priced_rows() {
        let rows = (0..12)
            .map(|i| {
                listing(&[
                    (Column::Name, s(&format!("listing {i}"))),
                    (Column::RoomType, s("Private room")),
                    (Column::PropertyType, s("Loft")),
                    (Column::Price, CellValue::Float(i as f64 * 10.0)),
                ])
            })
            .collect();
        let entries = bar_entries(&table(rows), &TOP_CHARTS);

        assert_eq!(entries.len(), TOP_LISTING_COUNT);
        assert_eq!(entries[0].label, "listing 11");
        assert_eq!(entries[0].value, 110.0);
        assert_eq!(entries[0].hover, "room_type: Private room · property_type: Loft");
    }

    #[test]
    fn mean_bar_entries_average_metric_and_hover_columns() {
        let t = table(vec![
            listing(&[
                (Column::PropertyType, s("Apartment")),
                (Column::Price, CellValue::Float(100.0)),
                (Column::NumberOfReviews, CellValue::Integer(10)),
                (Column::ReviewScores, CellValue::Float(4.0)),
            ]),
            listing(&[
                (Column::PropertyType, s("Apartment")),
                (Column::Price, CellValue::Float(200.0)),
                (Column::NumberOfReviews, CellValue::Integer(30)),
                (Column::ReviewScores, CellValue::Float(5.0)),
            ]),
        ]);
        let entries = bar_entries(&t, &PRICE_BY_PROPERTY_TYPE);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Apartment");
        assert_eq!(entries[0].value, 150.0);
        assert_eq!(entries[0].hover, "number_of_reviews: 20.0 · review_scores: 4.5");
    }

    #[test]
    fn bar_entries_on_empty_table_are_empty() {
        assert!(bar_entries(&table(vec![]), &PRICE_BY_PROPERTY_TYPE).is_empty());
        assert!(bar_entries(&table(vec![]), &TOP_CHARTS).is_empty());
    }

    #[test]
    fn hover_text_labels_each_column() {
        let row = listing(&[
            (Column::Name, s("Sunny Loft")),
            (Column::RoomType, s("Private room")),
        ]);
        let text = hover_text(&row, &[Column::Name, Column::RoomType]);
        assert_eq!(text, "name: Sunny Loft · room_type: Private room");
    }
}
