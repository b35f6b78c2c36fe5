//! Group-by partitions and per-group aggregation.

use std::collections::HashMap;
use std::fmt;

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::types::{DataType, Value};

use super::DataFrame;

/// Statistic computed per group by [`Groups::aggregation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationType {
    /// [`Series::max`]
    Max,
    /// [`Series::min`]
    Min,
    /// [`Series::mean`]
    Mean,
    /// [`Series::median`]
    Median,
    /// [`Series::std_dev`]
    StdDev,
    /// [`Series::sum`]
    Sum,
    /// Number of rows in the group.
    Count,
}

impl AggregationType {
    fn apply(self, col: &Series) -> Value {
        match self {
            Self::Max => col.max(),
            Self::Min => col.min(),
            Self::Mean => Value::Float64(col.mean()),
            Self::Median => Value::Float64(col.median()),
            Self::StdDev => Value::Float64(col.std_dev()),
            Self::Sum => Value::Float64(col.sum()),
            Self::Count => Value::Float64(col.len() as f64),
        }
    }

    fn output_type(self, source: DataType) -> DataType {
        match (self, source) {
            (Self::Max | Self::Min, DataType::Utf8) => DataType::Utf8,
            _ => DataType::Float64,
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Max => "Max",
            Self::Min => "Min",
            Self::Mean => "Mean",
            Self::Median => "Median",
            Self::StdDev => "StdDev",
            Self::Sum => "Sum",
            Self::Count => "Count",
        };
        f.write_str(name)
    }
}

/// A partition of a table's rows by the values of its key columns.
///
/// Groups are kept in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups {
    key_names: Vec<String>,
    groups: Vec<(String, DataFrame)>,
    index: HashMap<String, usize>,
    template: DataFrame,
}

/// One requested output field of an aggregation.
#[derive(Debug, Clone)]
pub(crate) struct AggregationField {
    kind: AggregationType,
    column: String,
    name: String,
    dtype: DataType,
}

impl Groups {
    /// Names of the key columns.
    pub fn key_names(&self) -> &[String] {
        &self.key_names
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups (the source table had no rows).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sub-table for a composite key such as `"A"` or `"A_1"`.
    pub fn get(&self, key: &str) -> Option<&DataFrame> {
        self.index.get(key).map(|&i| &self.groups[i].1)
    }

    /// `(key, sub-table)` pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.groups.iter().map(|(k, df)| (k.as_str(), df))
    }

    /// One row per group: the key columns followed by one `<column>_<Kind>` field per
    /// `(kinds[i], colnames[i])` pair.
    pub fn aggregation(
        &self,
        kinds: &[AggregationType],
        colnames: &[&str],
    ) -> FrameResult<DataFrame> {
        let fields = self.aggregation_fields(kinds, colnames)?;
        let rows = self
            .groups
            .iter()
            .map(|(_, sub)| self.summarize(sub, &fields))
            .collect::<FrameResult<Vec<_>>>()?;
        self.summary_frame(&fields, rows)
    }

    pub(crate) fn frames(&self) -> impl Iterator<Item = &DataFrame> {
        self.groups.iter().map(|(_, df)| df)
    }

    /// Validate an aggregation request and name its output fields.
    pub(crate) fn aggregation_fields(
        &self,
        kinds: &[AggregationType],
        colnames: &[&str],
    ) -> FrameResult<Vec<AggregationField>> {
        if kinds.len() != colnames.len() {
            return Err(FrameError::dimension(format!(
                "aggregation: {} kinds for {} columns",
                kinds.len(),
                colnames.len()
            )));
        }
        kinds
            .iter()
            .zip(colnames)
            .map(|(&kind, &column)| {
                let source = self.template.column(column)?;
                Ok(AggregationField {
                    kind,
                    column: column.to_string(),
                    name: format!("{column}_{kind}"),
                    dtype: kind.output_type(source.dtype()),
                })
            })
            .collect()
    }

    /// Key values followed by one value per field, for one sub-table.
    pub(crate) fn summarize(
        &self,
        sub: &DataFrame,
        fields: &[AggregationField],
    ) -> FrameResult<Vec<Value>> {
        let mut row = Vec::with_capacity(self.key_names.len() + fields.len());
        for key in &self.key_names {
            row.push(sub.column(key)?.value(0));
        }
        for field in fields {
            row.push(field.kind.apply(sub.column(&field.column)?));
        }
        Ok(row)
    }

    /// Assemble summarized rows into the result table.
    ///
    /// Only text, integer and real columns are emitted; boolean key columns are dropped.
    pub(crate) fn summary_frame(
        &self,
        fields: &[AggregationField],
        rows: Vec<Vec<Value>>,
    ) -> FrameResult<DataFrame> {
        let mut specs = Vec::with_capacity(self.key_names.len() + fields.len());
        for key in &self.key_names {
            specs.push((key.clone(), self.template.column(key)?.dtype()));
        }
        specs.extend(fields.iter().map(|f| (f.name.clone(), f.dtype)));

        let columns = specs
            .into_iter()
            .enumerate()
            .filter(|(_, (_, dtype))| is_summary_type(*dtype))
            .map(|(c, (name, dtype))| Series::new(rows.iter().map(|r| r[c].clone()), dtype, name))
            .collect();
        DataFrame::new(columns)
    }
}

impl DataFrame {
    /// Partition rows by the values of `colnames`.
    ///
    /// The composite key of a row is its key values rendered as text and joined with `_`.
    /// A missing key value is a coercion error.
    pub fn group_by(&self, colnames: &[&str]) -> FrameResult<Groups> {
        if colnames.is_empty() {
            return Err(FrameError::empty("group_by needs at least one key column"));
        }
        let keys = colnames
            .iter()
            .map(|name| self.column(name))
            .collect::<FrameResult<Vec<_>>>()?;

        let mut order: Vec<(String, Vec<usize>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for row in 0..self.nrows {
            let key = group_key(&keys, row)?;
            match index.get(&key) {
                Some(&g) => order[g].1.push(row),
                None => {
                    index.insert(key.clone(), order.len());
                    order.push((key, vec![row]));
                }
            }
        }

        Ok(Groups {
            key_names: colnames.iter().map(|s| s.to_string()).collect(),
            groups: order
                .into_iter()
                .map(|(key, rows)| (key, self.take_rows(&rows)))
                .collect(),
            index,
            template: self.take_rows(&[]),
        })
    }
}

fn is_summary_type(dtype: DataType) -> bool {
    matches!(dtype, DataType::Utf8 | DataType::Int64 | DataType::Float64)
}

fn group_key(keys: &[&Series], row: usize) -> FrameResult<String> {
    let parts = keys
        .iter()
        .map(|col| {
            let e = col.elem(row);
            if e.is_missing() {
                Err(FrameError::coercion(format!(
                    "group key '{}' is missing at row {row}",
                    col.name()
                )))
            } else {
                Ok(e.to_string())
            }
        })
        .collect::<FrameResult<Vec<_>>>()?;
    Ok(parts.join("_"))
}

#[cfg(test)]
mod tests {
    use super::AggregationType;
    use crate::error::FrameError;
    use crate::frame::DataFrame;
    use crate::series::Series;
    use crate::types::{DataType, Value};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(["A", "A", "B"], DataType::Utf8, "k"),
            Series::new([1, 2, 5], DataType::Int64, "v"),
            Series::new(["x", "z", "y"], DataType::Utf8, "s"),
        ])
        .unwrap()
    }

    #[test]
    fn group_by_partitions_in_first_appearance_order() {
        let groups = sample_frame().group_by(&["k"]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.key_names(), ["k".to_string()]);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
        let a = groups.get("A").unwrap();
        assert_eq!(a.nrow(), 2);
        assert_eq!(a.types(), vec![DataType::Utf8, DataType::Int64, DataType::Utf8]);
        assert!(groups.get("C").is_none());
    }

    #[test]
    fn composite_keys_join_with_underscore() {
        let df = sample_frame();
        let groups = df.group_by(&["k", "v"]).unwrap();
        assert_eq!(groups.len(), 3);
        assert!(groups.get("A_2").is_some());
    }

    #[test]
    fn aggregation_sums_per_group() {
        let groups = sample_frame().group_by(&["k"]).unwrap();
        let out = groups.aggregation(&[AggregationType::Sum], &["v"]).unwrap();
        assert_eq!(out.names(), vec!["k", "v_Sum"]);
        assert_eq!(out.col("k").unwrap().records(), vec!["A", "B"]);
        assert_eq!(out.col("v_Sum").unwrap().to_f64s(), vec![3.0, 5.0]);
    }

    #[test]
    fn aggregation_of_several_fields() {
        let groups = sample_frame().group_by(&["k"]).unwrap();
        let out = groups
            .aggregation(
                &[AggregationType::Count, AggregationType::Max, AggregationType::Mean],
                &["v", "s", "v"],
            )
            .unwrap();
        assert_eq!(out.names(), vec!["k", "v_Count", "s_Max", "v_Mean"]);
        assert_eq!(
            out.types(),
            vec![DataType::Utf8, DataType::Float64, DataType::Utf8, DataType::Float64]
        );
        assert_eq!(out.col("v_Count").unwrap().to_f64s(), vec![2.0, 1.0]);
        assert_eq!(out.col("s_Max").unwrap().value(0), Value::Utf8("z".to_string()));
        assert_eq!(out.col("v_Mean").unwrap().to_f64s(), vec![1.5, 5.0]);
    }

    #[test]
    fn aggregation_validation() {
        let groups = sample_frame().group_by(&["k"]).unwrap();
        let err = groups
            .aggregation(&[AggregationType::Sum, AggregationType::Max], &["v"])
            .unwrap_err();
        assert!(matches!(err, FrameError::Dimension { .. }));
        let err = groups.aggregation(&[AggregationType::Sum], &["nope"]).unwrap_err();
        assert!(matches!(err, FrameError::UnknownColumn { .. }));
    }

    #[test]
    fn empty_table_aggregates_to_empty_table() {
        let empty = sample_frame().subset(Vec::<usize>::new()).unwrap();
        let groups = empty.group_by(&["k"]).unwrap();
        assert!(groups.is_empty());
        let out = groups.aggregation(&[AggregationType::Median], &["v"]).unwrap();
        assert_eq!(out.dims(), (0, 2));
        assert_eq!(out.names(), vec!["k", "v_Median"]);
    }

    #[test]
    fn aggregation_drops_boolean_keys() {
        let df = DataFrame::new(vec![
            Series::new([true, false, true], DataType::Bool, "flag"),
            Series::new(["A", "B", "A"], DataType::Utf8, "k"),
            Series::new([1, 2, 5], DataType::Int64, "v"),
        ])
        .unwrap();

        let out = df
            .group_by(&["flag"])
            .unwrap()
            .aggregation(&[AggregationType::Sum], &["v"])
            .unwrap();
        assert_eq!(out.names(), vec!["v_Sum"]);
        assert_eq!(out.col("v_Sum").unwrap().to_f64s(), vec![6.0, 2.0]);

        let out = df
            .group_by(&["k", "flag"])
            .unwrap()
            .aggregation(&[AggregationType::Count], &["v"])
            .unwrap();
        assert_eq!(out.names(), vec!["k", "v_Count"]);
        assert_eq!(out.col("k").unwrap().records(), vec!["A", "B"]);
    }

    #[test]
    fn group_by_errors() {
        let df = sample_frame();
        assert!(matches!(df.group_by(&["nope"]).unwrap_err(), FrameError::UnknownColumn { .. }));

        let with_missing = DataFrame::new(vec![Series::new(
            vec![Value::Int64(1), Value::Null],
            DataType::Int64,
            "k",
        )])
        .unwrap();
        assert!(matches!(
            with_missing.group_by(&["k"]).unwrap_err(),
            FrameError::Coercion { .. }
        ));
    }
}
