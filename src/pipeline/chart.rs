//! Bar-chart view over a table's numeric columns.

use crate::table::Table;

/// Number of numeric columns the chart view takes, in column order.
pub(crate) const CHART_COLUMNS: usize = 2;

/// One charted column: its name and the numeric series, missing cells as `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// A bar-chart rendering intent built from at most the first two numeric
/// columns of the current table. Pure view data; nothing downstream consumes it.
///
/// A column with no present values is not classified numeric and is never
/// charted, matching how mean-fill skips such columns.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    pub series: Vec<Series>,
}

impl BarChart {
    pub(crate) fn from_table(table: &Table) -> BarChart {
        let series = table
            .numeric_column_indexes()
            .into_iter()
            .take(CHART_COLUMNS)
            .map(|column| Series {
                name: table.columns()[column].to_owned(),
                values: table
                    .rows()
                    .iter()
                    .map(|row| row[column].as_number())
                    .collect(),
            })
            .collect();
        BarChart { series }
    }

    /// True when the table had no numeric columns to chart.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn takes_first_two_numeric_columns_in_order() {
        let table = Table::new(
            vec![
                "label".to_owned(),
                "x".to_owned(),
                "y".to_owned(),
                "z".to_owned(),
            ],
            vec![
                vec![
                    Value::Text("a".to_owned()),
                    Value::Number(1.0),
                    Value::Missing,
                    Value::Number(7.0),
                ],
                vec![
                    Value::Text("b".to_owned()),
                    Value::Number(2.0),
                    Value::Number(4.0),
                    Value::Number(8.0),
                ],
            ],
        )
        .unwrap();

        let chart = BarChart::from_table(&table);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "x");
        assert_eq!(chart.series[0].values, [Some(1.0), Some(2.0)]);
        assert_eq!(chart.series[1].name, "y");
        assert_eq!(chart.series[1].values, [None, Some(4.0)]);
    }

    #[test]
    fn skips_columns_with_no_present_values() {
        let table = Table::new(
            vec!["x".to_owned(), "gap".to_owned()],
            vec![
                vec![Value::Number(1.0), Value::Missing],
                vec![Value::Number(2.0), Value::Missing],
            ],
        )
        .unwrap();

        let chart = BarChart::from_table(&table);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "x");
    }

    #[test]
    fn empty_without_numeric_columns() {
        let table = Table::new(
            vec!["label".to_owned()],
            vec![vec![Value::Text("a".to_owned())]],
        )
        .unwrap();
        assert!(BarChart::from_table(&table).is_empty());
    }
}
