//! CSV rendering of the containment table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use ccs_accounting::Phase;
use ccs_boundary::ContainmentCategory;
use ccs_grid::{RegionLabel, ZoneLabel};
use chrono::NaiveDate;

use crate::types::ContainmentRecord;

pub const RECORD_HEADER: &str = "date,zone,region,category,phase,calculation_mode,value";

/// Quote a field if it would break the row.
fn field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// The long table: one line per record, in record order.
pub fn records_csv(records: &[ContainmentRecord]) -> String {
    let mut out = String::new();
    out.push_str(RECORD_HEADER);
    out.push('\n');
    for r in records {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            r.date.format("%Y-%m-%d"),
            field(&r.zone.to_string()),
            r.region,
            r.category,
            r.phase,
            r.calculation_mode,
            r.value
        );
    }
    out
}

type RowKey = (NaiveDate, ZoneLabel, RegionLabel);

/// The wide table: one line per (date, zone, region).
///
/// Columns are `total`, then `total_<phase>` and `total_<category>` summed
/// over the other dimension, then `<phase>_<category>`.
pub fn readable_csv(records: &[ContainmentRecord]) -> String {
    let mut rows: BTreeMap<RowKey, BTreeMap<(Phase, ContainmentCategory), f64>> = BTreeMap::new();
    let mut phases = BTreeSet::new();
    let mut categories = BTreeSet::new();
    for r in records {
        rows.entry((r.date, r.zone.clone(), r.region))
            .or_default()
            .insert((r.phase, r.category), r.value);
        if r.phase != Phase::Total {
            phases.insert(r.phase);
        }
        categories.insert(r.category);
    }

    let mut out = String::from("date,zone,region,total");
    for phase in &phases {
        let _ = write!(out, ",total_{phase}");
    }
    for category in &categories {
        let _ = write!(out, ",total_{category}");
    }
    for phase in &phases {
        for category in &categories {
            let _ = write!(out, ",{phase}_{category}");
        }
    }
    out.push('\n');

    for ((date, zone, region), values) in &rows {
        let value = |phase: Phase, category: ContainmentCategory| {
            values.get(&(phase, category)).copied().unwrap_or(0.0)
        };
        let over_categories =
            |phase: Phase| -> f64 { categories.iter().map(|&c| value(phase, c)).sum() };

        let _ = write!(
            out,
            "{},{},{},{}",
            date.format("%Y-%m-%d"),
            field(&zone.to_string()),
            region,
            over_categories(Phase::Total)
        );
        for &phase in &phases {
            let _ = write!(out, ",{}", over_categories(phase));
        }
        for &category in &categories {
            let _ = write!(out, ",{}", value(Phase::Total, category));
        }
        for &phase in &phases {
            for &category in &categories {
                let _ = write!(out, ",{}", value(phase, category));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccs_accounting::CalculationMode;

    fn record(phase: Phase, category: ContainmentCategory, value: f64) -> ContainmentRecord {
        ContainmentRecord {
            date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            zone: ZoneLabel::All,
            region: RegionLabel::All,
            category,
            phase,
            calculation_mode: CalculationMode::Mass,
            value,
        }
    }

    #[test]
    fn long_table_rows() {
        let csv = records_csv(&[record(Phase::Gas, ContainmentCategory::Contained, 1.5)]);
        assert_eq!(
            csv,
            "date,zone,region,category,phase,calculation_mode,value\n\
             2030-01-01,all,all,contained,gas,mass,1.5\n"
        );
    }

    #[test]
    fn zone_names_with_commas_are_quoted() {
        let mut r = record(Phase::Total, ContainmentCategory::Outside, 0.0);
        r.zone = ZoneLabel::named("Upper, east");
        assert!(records_csv(&[r]).contains("\"Upper, east\""));
    }

    #[test]
    fn wide_table_sums() {
        use ContainmentCategory::*;
        let records = vec![
            record(Phase::Total, Contained, 3.0),
            record(Phase::Gas, Contained, 2.0),
            record(Phase::Dissolved, Contained, 1.0),
            record(Phase::Total, Outside, 4.0),
            record(Phase::Gas, Outside, 4.0),
            record(Phase::Dissolved, Outside, 0.0),
        ];
        let csv = readable_csv(&records);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,zone,region,total,total_gas,total_dissolved,total_contained,total_outside,\
             gas_contained,gas_outside,dissolved_contained,dissolved_outside"
        );
        assert_eq!(lines.next().unwrap(), "2030-01-01,all,all,7,6,1,3,4,2,4,1,0");
        assert!(lines.next().is_none());
    }
}
