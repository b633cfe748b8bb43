#![allow(dead_code)]

use polars::prelude::*;

/// Builds a string-typed frame, as the loader would produce it.
pub fn frame(columns: &[(&str, Vec<Option<&str>>)]) -> DataFrame {
    let columns: Vec<Column> = columns
        .iter()
        .map(|(name, values)| Series::new((*name).into(), values.as_slice()).into_column())
        .collect();
    DataFrame::new(columns).expect("fixture frame")
}

/// Same value in every row.
pub fn repeat<'a>(value: Option<&'a str>, rows: usize) -> Vec<Option<&'a str>> {
    vec![value; rows]
}

pub fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    let column = df
        .column(name)
        .expect("column present")
        .cast(&DataType::String)
        .expect("cast to string");
    column
        .str()
        .expect("string column")
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

pub fn ints(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .expect("column present")
        .i64()
        .expect("int64 column")
        .into_iter()
        .collect()
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Casts every column to `String`, for feeding output back as input.
pub fn as_strings(df: &DataFrame) -> DataFrame {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|column| column.cast(&DataType::String).expect("cast to string"))
        .collect();
    DataFrame::new(columns).expect("string frame")
}
